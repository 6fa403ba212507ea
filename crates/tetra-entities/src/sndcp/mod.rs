pub mod sndcp_dl;
