use core::fmt;

use tetra_core::{BitBuffer, expect_pdu_type, expect_value};
use tetra_core::pdu_parse_error::PduParseErr;

use crate::umac::enums::mac_pdu_type::MacPduType;
use crate::umac::fields::basic_slotgrant::BasicSlotgrant;
use crate::umac::fields::channel_allocation::ChanAllocElement;


/// Clause 21.4.3.3 MAC-END (downlink)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacEndDl {
    // 1
    pub fill_bits: bool,
    // 1
    pub pos_of_grant: u8,
    /// 6 bits, length of the PDU in octets. Values below 2 and above 34 are reserved
    pub length_ind: u8,
    // 1 + 8 opt
    pub slot_granting_element: Option<BasicSlotgrant>,
    // 1 + var opt
    pub chan_alloc_element: Option<ChanAllocElement>,
}

impl MacEndDl {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let mac_pdu_type = buf.read_field(2, "mac_pdu_type")?;
        expect_pdu_type!(mac_pdu_type, MacPduType::MacFragMacEnd)?;
        let pdu_subtype = buf.read_field(1, "pdu_subtype")?;
        expect_value!(pdu_subtype, 1)?;

        let fill_bits = buf.read_flag("fill_bits")?;
        let pos_of_grant = buf.read_field(1, "pos_of_grant")? as u8;
        let length_ind = buf.read_field(6, "length_ind")? as u8;
        if !(2..=34).contains(&length_ind) {
            return Err(PduParseErr::InvalidLength { field: "length_ind", value: length_ind as u64 });
        }

        let slot_granting_element = if buf.read_flag("slot_granting_flag")? {
            Some(BasicSlotgrant::from_bitbuf(buf)?)
        } else {
            None
        };

        let chan_alloc_element = if buf.read_flag("chan_alloc_flag")? {
            Some(ChanAllocElement::from_bitbuf(buf)?)
        } else {
            None
        };

        Ok(MacEndDl {
            fill_bits,
            pos_of_grant,
            length_ind,
            slot_granting_element,
            chan_alloc_element,
        })
    }

    /// PDU length in bits as signalled by the length indication
    pub fn len_bits(&self) -> usize {
        self.length_ind as usize * 8
    }
}

impl fmt::Display for MacEndDl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacEndDl {{ fill_bits: {} pos_of_grant: {} length_ind: {}", self.fill_bits, self.pos_of_grant, self.length_ind)?;
        if let Some(s) = &self.slot_granting_element {
            write!(f, " {}", s)?;
        }
        if let Some(c) = &self.chan_alloc_element {
            write!(f, " {}", c)?;
        }
        write!(f, " }}")
    }
}
