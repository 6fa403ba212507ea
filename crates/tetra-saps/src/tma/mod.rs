use tetra_core::{BitBuffer, MacAddress};

use crate::tmv::enums::logical_chans::LogicalChannel;

/// Clause 20.4.1.1.4
/// TMA-UNITDATA indication: this primitive shall be used by the MAC to deliver a
/// received TM-SDU, after reassembly if it was fragmented.
#[derive(Debug)]
pub struct TmaUnitdataInd {
    pub pdu: BitBuffer,
    /// Addressing of the MAC PDU that carried (or started) this TM-SDU
    pub address: MacAddress,
    pub logical_channel: LogicalChannel,
}
