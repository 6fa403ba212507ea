/// Clause 21.4.3.1 Table 21.55: meaning of the 6-bit length indication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthInd {
    /// Reserved code, or a QAM-only length
    Invalid(u8),
    /// PDU length in octets, 1 to 58
    Octets(u8),
    /// Second half slot stolen on STCH, the PDU fills the first half slot
    SecondSlotStolen,
    /// Start of a fragmented message, the PDU fills the slot
    FragStart,
}

impl LengthInd {
    pub const SECOND_SLOT_STOLEN: u8 = 0b111110;
    pub const FRAG_START: u8 = 0b111111;

    /// Decode a length indication for pi/4-DQPSK (Y2 = Z2 = 1 octet).
    pub fn from_raw(val: u8) -> Self {
        const Y2: u8 = 1;
        const Z2: u8 = 1;
        match val {
            0 | 0b111011 | 0b111100 => LengthInd::Invalid(val),
            1..=0b010010 => LengthInd::Octets(val * Y2),
            0b010011..=0b111010 => LengthInd::Octets(18 * Y2 + (val - 18) * Z2),
            0b111101 => LengthInd::Invalid(val),
            Self::SECOND_SLOT_STOLEN => LengthInd::SecondSlotStolen,
            Self::FRAG_START => LengthInd::FragStart,
            _ => LengthInd::Invalid(val),
        }
    }

    /// PDU length in bits, None for the sentinels and reserved codes
    pub fn len_bits(self) -> Option<usize> {
        match self {
            LengthInd::Octets(n) => Some(n as usize * 8),
            _ => None,
        }
    }

    /// Both sentinels mean the PDU occupies the rest of the block
    pub fn fills_block(self) -> bool {
        matches!(self, LengthInd::SecondSlotStolen | LengthInd::FragStart)
    }
}

impl core::fmt::Display for LengthInd {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LengthInd::Invalid(v) => write!(f, "invalid({})", v),
            LengthInd::Octets(n) => write!(f, "{} octets", n),
            LengthInd::SecondSlotStolen => write!(f, "second slot stolen"),
            LengthInd::FragStart => write!(f, "fragmentation start"),
        }
    }
}
