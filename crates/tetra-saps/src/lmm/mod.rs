use tetra_core::{BitBuffer, MacAddress};

/// Clause 17.3.2
/// MLE-UNITDATA indication towards MM
#[derive(Debug)]
pub struct LmmMleUnitdataInd {
    pub sdu: BitBuffer,
    pub address: MacAddress,
}
