pub mod cc_dl;
pub mod sds_dl;
