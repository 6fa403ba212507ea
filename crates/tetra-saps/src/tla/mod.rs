use tetra_core::{BitBuffer, MacAddress};

use crate::tmv::enums::logical_chans::LogicalChannel;

/// Clause 20.4.3
/// TL-DATA / TL-UNITDATA indication, delivering a TL-SDU from the LLC to the MLE.
/// Basic and advanced link variants are merged, the LLC PDU name is carried for reporting.
#[derive(Debug)]
pub struct TlaTlDataInd {
    pub tl_sdu: BitBuffer,
    pub address: MacAddress,
    pub logical_channel: LogicalChannel,
    pub llc_pdu: &'static str,
}
