pub mod call_control;
pub mod d_sds_data;
pub mod d_status;
pub mod layouts;
