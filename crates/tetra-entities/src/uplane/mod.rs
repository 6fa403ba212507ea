pub mod tch_frame;
pub mod uplane_dl;
