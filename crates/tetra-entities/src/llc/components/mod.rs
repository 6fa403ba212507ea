pub mod fcs;
