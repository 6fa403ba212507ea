pub mod enums;

use tetra_core::{BitBuffer, PhyBlockNum};

use crate::tmv::enums::logical_chans::LogicalChannel;

/// The TMV-UNITDATA indication primitive shall be used by the lower MAC to deliver a received MAC block.
/// Only blocks that passed their CRC (or have none, like the AACH) are delivered.
#[derive(Debug)]
pub struct TmvUnitdataInd {
    pub pdu: BitBuffer,

    /// Not in the standard. The UMAC uses it to tell the two half-slots of a burst apart.
    pub block_num: PhyBlockNum,

    pub logical_channel: LogicalChannel,
}
