//! Short data service payload decoding: SDS type 4 protocols, SDS-TL, text, location and LIP
pub mod lip;
pub mod location;
pub mod sds_tl;
pub mod text;
pub mod type4;
