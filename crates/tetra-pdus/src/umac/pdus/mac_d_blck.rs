use core::fmt;

use tetra_core::{BitBuffer, expect_pdu_type, expect_value};
use tetra_core::pdu_parse_error::PduParseErr;

use crate::umac::enums::mac_pdu_type::MacPduType;
use crate::umac::fields::basic_slotgrant::BasicSlotgrant;


/// Clause 21.4.3.4 MAC-D-BLCK, only allowed on SCH/F
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacDBlck {
    // 1
    pub fill_bits: bool,
    // 2
    pub encryption_mode: u8,
    // 10
    pub event_label: u16,
    // 1
    pub imm_napping_permission: bool,
    // 1 + 8 opt
    pub slot_granting_element: Option<BasicSlotgrant>,
}

impl MacDBlck {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let mac_pdu_type = buf.read_field(2, "mac_pdu_type")?;
        expect_pdu_type!(mac_pdu_type, MacPduType::Supplementary)?;
        let pdu_subtype = buf.read_field(1, "pdu_subtype")?;
        expect_value!(pdu_subtype, 0)?;

        let fill_bits = buf.read_flag("fill_bits")?;
        let encryption_mode = buf.read_field(2, "encryption_mode")? as u8;
        let event_label = buf.read_field(10, "event_label")? as u16;
        let imm_napping_permission = buf.read_flag("imm_napping_permission")?;
        let slot_granting_element = if buf.read_flag("slot_granting_flag")? {
            Some(BasicSlotgrant::from_bitbuf(buf)?)
        } else {
            None
        };

        Ok(MacDBlck {
            fill_bits,
            encryption_mode,
            event_label,
            imm_napping_permission,
            slot_granting_element,
        })
    }
}

impl fmt::Display for MacDBlck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacDBlck {{ fill_bits: {} encryption_mode: {} event_label: {} imm_napping_permission: {}",
            self.fill_bits, self.encryption_mode, self.event_label, self.imm_napping_permission)?;
        if let Some(s) = &self.slot_granting_element {
            write!(f, " {}", s)?;
        }
        write!(f, " }}")
    }
}
