//! Service primitives exchanged between the decoding entities

pub mod lcmc;
pub mod lmm;
pub mod ltpd;
pub mod sapmsg;
pub mod tla;
pub mod tlmb;
pub mod tma;
pub mod tmd;
pub mod tmv;
pub mod tp;

pub use sapmsg::*;
