use tetra_core::{BitBuffer, MacAddress};

/// Clause 17.3.3
/// MLE-UNITDATA indication towards the CMCE
#[derive(Debug)]
pub struct LcmcMleUnitdataInd {
    pub sdu: BitBuffer,
    pub address: MacAddress,
}
