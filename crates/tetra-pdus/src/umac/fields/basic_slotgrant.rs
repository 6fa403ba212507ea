use core::fmt;

use tetra_core::{BitBuffer, pdu_parse_error::PduParseErr};


/// 21.5.6 Basic slot granting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicSlotgrant {
    // 4
    pub capacity_allocation: u8,
    // 4
    pub granting_delay: u8,
}

impl BasicSlotgrant {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let capacity_allocation = buf.read_field(4, "capacity_allocation")? as u8;
        let granting_delay = buf.read_field(4, "granting_delay")? as u8;
        Ok(BasicSlotgrant { capacity_allocation, granting_delay })
    }

    pub fn to_bitbuf(&self, buf: &mut BitBuffer) {
        buf.write_bits(self.capacity_allocation as u64, 4);
        buf.write_bits(self.granting_delay as u64, 4);
    }

    /// Capacity allocation 0 is the first subslot, 0b1111 is reserved; other values are a number of slots
    pub fn granted_slots(&self) -> Option<u8> {
        match self.capacity_allocation {
            0 => Some(0),
            0b1111 => None,
            n => Some(n),
        }
    }
}

impl fmt::Display for BasicSlotgrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BasicSlotgrant {{cap {} delay {} }}", self.capacity_allocation, self.granting_delay)
    }
}
