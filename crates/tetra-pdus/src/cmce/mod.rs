pub mod enums;
pub mod fields;
pub mod pdus;
pub mod sds;
