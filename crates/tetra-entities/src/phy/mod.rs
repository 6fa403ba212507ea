pub mod components;

pub mod burst_sync;
pub mod phy_dl;
