pub mod defrag;
pub mod fillbits;
