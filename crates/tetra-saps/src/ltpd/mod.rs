use tetra_core::{BitBuffer, MacAddress};

/// Clause 17.3.4
/// MLE-UNITDATA indication towards SNDCP
#[derive(Debug)]
pub struct LtpdMleUnitdataInd {
    pub sdu: BitBuffer,
    pub address: MacAddress,
}
