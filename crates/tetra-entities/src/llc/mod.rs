pub mod components;

pub mod llc_dl;
