use core::fmt;

use tetra_core::{BitBuffer, assert_warn, expect_pdu_type, pdu_parse_error::PduParseErr};

use crate::umac::enums::{broadcast_type::BroadcastType, mac_pdu_type::MacPduType};


/// Clause 21.4.4.3 ACCESS-DEFINE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDefine {
    // 1
    pub common_or_assigned_control: bool,
    // 2
    pub access_code: u8,
    // 4
    pub imm: u8,
    // 4
    pub wt: u8,
    // 4
    pub nu: u8,
    // 1
    pub frame_len_factor: bool,
    // 4
    pub ts_pointer: u8,
    // 3
    pub min_pdu_prio: u8,
    // 2
    pub opt_field_flag: u8,
    // 16 opt
    pub subscriber_class: Option<u16>,
    // 24 opt
    pub gssi: Option<u32>,
}

impl AccessDefine {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let pdu_type = buf.read_field(2, "mac_pdu_type")?;
        expect_pdu_type!(pdu_type, MacPduType::Broadcast)?;
        let bcast_type = buf.read_field(2, "broadcast_type")?;
        expect_pdu_type!(bcast_type, BroadcastType::AccessDefine)?;

        let common_or_assigned_control = buf.read_flag("common_or_assigned_control")?;
        let access_code = buf.read_field(2, "access_code")? as u8;
        let imm = buf.read_field(4, "imm")? as u8;
        let wt = buf.read_field(4, "wt")? as u8;
        let nu = buf.read_field(4, "nu")? as u8;
        let frame_len_factor = buf.read_flag("frame_len_factor")?;
        let ts_pointer = buf.read_field(4, "ts_pointer")? as u8;
        let min_pdu_prio = buf.read_field(3, "min_pdu_prio")? as u8;
        let opt_field_flag = buf.read_field(2, "opt_field_flag")? as u8;
        let subscriber_class = if opt_field_flag == 1 { Some(buf.read_field(16, "subscriber_class")? as u16) } else { None };
        let gssi = if opt_field_flag == 2 { Some(buf.read_field(24, "gssi")? as u32) } else { None };
        // Filler bits are only present when the block has room for them
        if let Some(filler) = buf.read_bits(3) {
            assert_warn!(filler == 0b100, "unexpected ACCESS-DEFINE filler {:03b}", filler);
        }

        Ok(AccessDefine {
            common_or_assigned_control,
            access_code,
            imm,
            wt,
            nu,
            frame_len_factor,
            ts_pointer,
            min_pdu_prio,
            opt_field_flag,
            subscriber_class,
            gssi,
        })
    }
}

impl fmt::Display for AccessDefine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessDefine {{ access_code: {} imm: {} wt: {} nu: {} ts_pointer: {} min_pdu_prio: {} }}",
            self.access_code, self.imm, self.wt, self.nu, self.ts_pointer, self.min_pdu_prio)
    }
}
