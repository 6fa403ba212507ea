use tetra_core::{BitBuffer, BurstType, PhyBlockNum, PhyBlockType};

/// Coded block cut from a synchronized burst, not yet descrambled.
/// Contents not defined in the standard.
#[derive(Debug)]
pub struct TpUnitdataInd {
    pub burst_type: BurstType,
    pub block_type: PhyBlockType,
    /// Both for BBK and full-slot blocks, otherwise [ Block1 | Block2 ]
    pub block_num: PhyBlockNum,
    pub block: BitBuffer,
}
