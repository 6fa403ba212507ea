/// Clause 14.8.48 Type 3 element identifier
/// Bits: 4
pub mod cmce_type3_elem_id {
    pub const DTMF: u64 = 1;
    pub const EXTERNAL_SUBSCRIBER_NUMBER: u64 = 2;
    pub const FACILITY: u64 = 3;
    pub const POLL_RESPONSE_ADDRESSES: u64 = 4;
    pub const TEMPORARY_ADDRESS: u64 = 5;
    pub const DM_MS_ADDRESS: u64 = 6;
    pub const PROPRIETARY: u64 = 15;
}

use cmce_type3_elem_id::*;

/// Names of the type 3 elements that can trail a downlink CMCE PDU
pub const CMCE_TYPE3_NAMES: &[(u64, &str)] = &[
    (DTMF, "DTMF"),
    (EXTERNAL_SUBSCRIBER_NUMBER, "external subscriber number"),
    (FACILITY, "facility"),
    (POLL_RESPONSE_ADDRESSES, "poll response addresses"),
    (TEMPORARY_ADDRESS, "temporary address"),
    (DM_MS_ADDRESS, "DM-MS address"),
    (PROPRIETARY, "proprietary"),
];
