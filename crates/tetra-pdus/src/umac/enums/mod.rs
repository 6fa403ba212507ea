pub mod broadcast_type;
pub mod length_ind;
pub mod mac_pdu_type;
