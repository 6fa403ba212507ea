/// Clause 21.4.1 Table 21.38: MAC PDU types on SCH/F, SCH/HD, STCH and BNCH
/// Bits: 2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MacPduType {
    /// TMA-SAP: MAC-RESOURCE
    MacResource = 0,
    /// TMA-SAP: MAC-FRAG or MAC-END, told apart by the subtype bit
    MacFragMacEnd = 1,
    /// TMB-SAP: Broadcast
    Broadcast = 2,
    /// TMA-SAP: Supplementary (MAC-D-BLCK)
    Supplementary = 3,
}

impl std::convert::TryFrom<u64> for MacPduType {
    type Error = ();
    fn try_from(x: u64) -> Result<Self, Self::Error> {
        match x {
            0 => Ok(MacPduType::MacResource),
            1 => Ok(MacPduType::MacFragMacEnd),
            2 => Ok(MacPduType::Broadcast),
            3 => Ok(MacPduType::Supplementary),
            _ => Err(()),
        }
    }
}

impl MacPduType {
    /// Convert this enum back into the raw integer value
    pub fn into_raw(self) -> u64 {
        self as u64
    }
}

impl From<MacPduType> for u64 {
    fn from(e: MacPduType) -> Self { e.into_raw() }
}

impl core::fmt::Display for MacPduType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MacPduType::MacResource => write!(f, "MacResource"),
            MacPduType::MacFragMacEnd => write!(f, "MacFragMacEnd"),
            MacPduType::Broadcast => write!(f, "Broadcast"),
            MacPduType::Supplementary => write!(f, "Supplementary"),
        }
    }
}
