use core::fmt;

use tetra_core::{BitBuffer, MacAddress, MacAddressType, expect_pdu_type, pdu_parse_error::PduParseErr};

use crate::umac::enums::{length_ind::LengthInd, mac_pdu_type::MacPduType};
use crate::umac::fields::{basic_slotgrant::BasicSlotgrant, channel_allocation::ChanAllocElement};


/// Clause 21.4.3.1 MAC-RESOURCE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacResource {
    /// 1 bit, designates if SDU is followed by fill bits to obtain 8-bit alignment.
    /// Carries no meaning if Null PDU
    pub fill_bits: bool,
    /// 1 bit, only relevant if slot granting element present.
    /// 0 -> current chan, 1 -> grant on allocated chan
    pub pos_of_grant: u8,
    /// 2 bits. upper bit = encryption enabled, lower bit = cck parity
    pub encryption_mode: u8,
    /// 1 bit. If true, random access acknowledged
    pub random_access_flag: bool,
    /// 6 bits, raw. See `length()`
    pub length_ind: u8,

    /// 3 bit address type plus the address fields. Type Null means this is a null PDU
    pub addr: MacAddress,
    /// 4 opt
    pub power_control_element: Option<u8>,
    /// 8 opt
    pub slot_granting_element: Option<BasicSlotgrant>,
    pub chan_alloc_element: Option<ChanAllocElement>,
}

impl MacResource {
    /// Header bits up to and including the address type
    pub const MIN_LEN_BITS: usize = 16;

    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let pdu_type = buf.read_field(2, "mac_pdu_type")?;
        expect_pdu_type!(pdu_type, MacPduType::MacResource)?;

        let fill_bits = buf.read_flag("fill_bits")?;
        let pos_of_grant = buf.read_field(1, "pos_of_grant")? as u8;
        let encryption_mode = buf.read_field(2, "encryption_mode")? as u8;
        let random_access_flag = buf.read_flag("random_access_flag")?;
        let length_ind = buf.read_field(6, "length_ind")? as u8;

        let mut addr = MacAddress {
            address_type: MacAddressType::from_raw(buf.read_field(3, "addr_type")?),
            encryption_mode,
            ..Default::default()
        };

        match addr.address_type {
            MacAddressType::Null => {
                return Ok(MacResource {
                    fill_bits,
                    pos_of_grant,
                    encryption_mode,
                    random_access_flag,
                    length_ind,
                    addr,
                    power_control_element: None,
                    slot_granting_element: None,
                    chan_alloc_element: None,
                });
            }
            MacAddressType::Ssi => {
                addr.ssi = buf.read_field(24, "ssi")? as u32;
            }
            MacAddressType::EventLabel => {
                addr.event_label = buf.read_field(10, "event_label")? as u16;
            }
            MacAddressType::Ussi => {
                addr.ussi = buf.read_field(24, "ussi")? as u32;
            }
            MacAddressType::Smi => {
                addr.smi = buf.read_field(24, "smi")? as u32;
            }
            MacAddressType::SsiEventLabel => {
                addr.ssi = buf.read_field(24, "ssi")? as u32;
                addr.event_label = buf.read_field(10, "event_label")? as u16;
            }
            MacAddressType::SsiUsageMarker => {
                addr.ssi = buf.read_field(24, "ssi")? as u32;
                addr.usage_marker = buf.read_field(6, "usage_marker")? as u8;
            }
            MacAddressType::SmiEventLabel => {
                addr.smi = buf.read_field(24, "smi")? as u32;
                addr.event_label = buf.read_field(10, "event_label")? as u16;
            }
        }

        let power_control_element = if buf.read_flag("power_control_flag")? {
            Some(buf.read_field(4, "power_control_element")? as u8)
        } else {
            None
        };

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

        Ok(MacResource {
            fill_bits,
            pos_of_grant,
            encryption_mode,
            random_access_flag,
            length_ind,
            addr,
            power_control_element,
            slot_granting_element,
            chan_alloc_element,
        })
    }

    /// Writes a MAC-RESOURCE header. Channel allocation elements are not supported.
    pub fn to_bitbuf(&self, buf: &mut BitBuffer) -> Result<(), PduParseErr> {
        if self.chan_alloc_element.is_some() {
            return Err(PduParseErr::NotImplemented { field: Some("chan_alloc_element") });
        }

        buf.write_bits(MacPduType::MacResource.into_raw(), 2);
        buf.write_bits(self.fill_bits as u64, 1);
        buf.write_bits(self.pos_of_grant as u64, 1);
        buf.write_bits(self.encryption_mode as u64, 2);
        buf.write_bits(self.random_access_flag as u64, 1);
        buf.write_bits(self.length_ind as u64, 6);
        buf.write_bits(self.addr.address_type.into_raw(), 3);

        match self.addr.address_type {
            MacAddressType::Null => return Ok(()),
            MacAddressType::Ssi => buf.write_bits(self.addr.ssi as u64, 24),
            MacAddressType::EventLabel => buf.write_bits(self.addr.event_label as u64, 10),
            MacAddressType::Ussi => buf.write_bits(self.addr.ussi as u64, 24),
            MacAddressType::Smi => buf.write_bits(self.addr.smi as u64, 24),
            MacAddressType::SsiEventLabel => {
                buf.write_bits(self.addr.ssi as u64, 24);
                buf.write_bits(self.addr.event_label as u64, 10);
            }
            MacAddressType::SsiUsageMarker => {
                buf.write_bits(self.addr.ssi as u64, 24);
                buf.write_bits(self.addr.usage_marker as u64, 6);
            }
            MacAddressType::SmiEventLabel => {
                buf.write_bits(self.addr.smi as u64, 24);
                buf.write_bits(self.addr.event_label as u64, 10);
            }
        }

        match self.power_control_element {
            Some(v) => {
                buf.write_bit(1);
                buf.write_bits(v as u64, 4);
            }
            None => buf.write_bit(0),
        }
        match &self.slot_granting_element {
            Some(v) => {
                buf.write_bit(1);
                v.to_bitbuf(buf);
            }
            None => buf.write_bit(0),
        }
        buf.write_bit(0);
        Ok(())
    }

    pub fn is_null_pdu(&self) -> bool {
        self.addr.address_type == MacAddressType::Null
    }

    pub fn length(&self) -> LengthInd {
        LengthInd::from_raw(self.length_ind)
    }

    pub fn is_encrypted(&self) -> bool {
        self.encryption_mode != 0
    }
}

impl fmt::Display for MacResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacResource {{ fill_bits: {} pos_of_grant: {} encryption_mode: {} random_access_flag: {} length: {} addr: {}",
            self.fill_bits, self.pos_of_grant, self.encryption_mode, self.random_access_flag, self.length(), self.addr)?;
        if let Some(p) = self.power_control_element {
            write!(f, " power_control: {}", p)?;
        }
        if let Some(s) = &self.slot_granting_element {
            write!(f, " {}", s)?;
        }
        if let Some(c) = &self.chan_alloc_element {
            write!(f, " {}", c)?;
        }
        write!(f, " }}")
    }
}
