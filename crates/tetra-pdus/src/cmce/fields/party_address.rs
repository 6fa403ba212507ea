use core::fmt;

use tetra_core::{BitBuffer, pdu_parse_error::PduParseErr};

/// Calling / transmitting party address, selected by a 2-bit type identifier
/// (clause 14.8.9 and 14.8.10)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartyAddress {
    pub type_identifier: u8,
    pub ssi: Option<u32>,
    pub ext: Option<u32>,
}

impl PartyAddress {
    /// Reads the type identifier and the address it selects. Type 0 (short number address)
    /// is only read as an 8-bit value when `with_sna` is set; type 3 is reserved and leaves
    /// both fields empty.
    pub fn from_bitbuf(buf: &mut BitBuffer, with_sna: bool) -> Result<Self, PduParseErr> {
        let type_identifier = buf.read_field(2, "party_type_identifier")? as u8;
        let (ssi, ext) = match type_identifier {
            0 if with_sna => (Some(buf.read_field(8, "short_number_address")? as u32), None),
            1 => (Some(buf.read_field(24, "ssi")? as u32), None),
            2 => (
                Some(buf.read_field(24, "ssi")? as u32),
                Some(buf.read_field(24, "address_extension")? as u32),
            ),
            _ => (None, None),
        };
        Ok(PartyAddress { type_identifier, ssi, ext })
    }

    /// Type 3 carries no address; decoding of the PDU cannot continue after it
    pub fn is_reserved(&self) -> bool {
        self.type_identifier == 3
    }
}

impl fmt::Display for PartyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.ssi, self.ext) {
            (Some(ssi), Some(ext)) => write!(f, "{}:{}", ext, ssi),
            (Some(ssi), None) => write!(f, "{}", ssi),
            _ => write!(f, "type {}", self.type_identifier),
        }
    }
}
