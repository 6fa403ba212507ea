pub mod d_mle_sync;
pub mod d_mle_sysinfo;
pub mod d_nwrk_broadcast;
pub mod d_nwrk_broadcast_ext;
