use tetra_core::BitBuffer;

/// TMD-UNITDATA indication: traffic channel contents for the U-plane.
/// The block is descrambled but otherwise left uncoded.
#[derive(Debug)]
pub struct TmdCircuitDataInd {
    pub data: BitBuffer,
    /// Usage marker from the AACH of the same slot
    pub usage_marker: u8,
    /// Encryption mode recorded for this usage marker
    pub encryption_mode: u8,
}
