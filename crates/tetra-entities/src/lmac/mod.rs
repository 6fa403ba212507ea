pub mod components;

pub mod lmac_dl;
