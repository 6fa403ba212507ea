use core::fmt;

use tetra_core::{BitBuffer, TdmaTime, assert_warn};
use tetra_core::pdu_parse_error::PduParseErr;


/// Clause 21.4.4.2
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacSync {
    // 4
    pub system_code: u8,
    // 6
    pub colour_code: u8,
    // 2 + 5 + 6, timeslot is transmitted zero based
    pub time: TdmaTime,
    // 2
    pub sharing_mode: u8,
    // 3
    pub ts_reserved_frames: u8,
    // 1
    pub u_plane_dtx: bool,
    // 1
    pub frame_18_ext: bool,
    // 1 reserved
}

impl MacSync {
    /// Length of the MAC part; the D-MLE-SYNC TM-SDU follows
    pub const MAC_LEN_BITS: usize = 31;

    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let system_code = buf.read_field(4, "system_code")? as u8;
        let colour_code = buf.read_field(6, "colour_code")? as u8;
        let t = buf.read_field(2, "timeslot_number")? as u8 + 1;
        let f = buf.read_field(5, "frame_number")? as u8;
        let m = buf.read_field(6, "multiframe_number")? as u8;
        let time = TdmaTime { t, f, m };
        let sharing_mode = buf.read_field(2, "sharing_mode")? as u8;
        let ts_reserved_frames = buf.read_field(3, "ts_reserved_frames")? as u8;
        let u_plane_dtx = buf.read_flag("u_plane_dtx")?;
        let frame_18_ext = buf.read_flag("frame_18_ext")?;
        assert_warn!(buf.read_field(1, "reserved")? == 0, "reserved bit not zero");

        if !time.is_valid() {
            return Err(PduParseErr::Inconsistency { field: "time", reason: "frame or multiframe number out of range" });
        }

        Ok(MacSync {
            system_code,
            colour_code,
            time,
            sharing_mode,
            ts_reserved_frames,
            u_plane_dtx,
            frame_18_ext,
        })
    }

    pub fn to_bitbuf(&self, buf: &mut BitBuffer) {
        buf.write_bits(self.system_code as u64, 4);
        buf.write_bits(self.colour_code as u64, 6);
        buf.write_bits(self.time.t as u64 - 1, 2);
        buf.write_bits(self.time.f as u64, 5);
        buf.write_bits(self.time.m as u64, 6);
        buf.write_bits(self.sharing_mode as u64, 2);
        buf.write_bits(self.ts_reserved_frames as u64, 3);
        buf.write_bits(self.u_plane_dtx as u8 as u64, 1);
        buf.write_bits(self.frame_18_ext as u8 as u64, 1);
        buf.write_bits(0, 1);
    }
}

impl fmt::Display for MacSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacSync {{ system_code: {}", self.system_code)?;
        write!(f, "  colour_code: {}", self.colour_code)?;
        write!(f, "  time: {}", self.time)?;
        write!(f, "  sharing_mode: {}", self.sharing_mode)?;
        write!(f, "  ts_reserved_frames: {}", self.ts_reserved_frames)?;
        write!(f, "  u_plane_dtx: {}", self.u_plane_dtx)?;
        write!(f, "  frame_18_ext: {}", self.frame_18_ext)?;
        write!(f, " }}")
    }
}
