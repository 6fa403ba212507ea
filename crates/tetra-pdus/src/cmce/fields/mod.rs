pub mod party_address;
pub mod tetra_digits;
