pub mod cmce_pdu_type_dl;
pub mod sds_protocol_id;
pub mod type3_elem_id;
