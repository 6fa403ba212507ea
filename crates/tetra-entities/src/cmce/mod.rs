pub mod subentities;

pub mod cmce_dl;
