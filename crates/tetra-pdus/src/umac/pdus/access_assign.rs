use core::fmt;

use tetra_core::{BitBuffer, DownlinkUsage, TdmaTime, pdu_parse_error::PduParseErr};


/// Clause 21.4.7.2 ACCESS-ASSIGN, carried on the AACH
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessAssign {
    // 2
    pub header: u8,
    // 6
    pub field1: u8,
    // 6
    pub field2: u8,
    /// Downlink usage of the slot that carries this AACH
    pub dl_usage: DownlinkUsage,
    /// Usage marker if dl_usage is Traffic, else 0
    pub dl_usage_marker: u8,
}

impl AccessAssign {
    /// Parse the AACH of a slot at `time`. Frame 18 is always control signalling (23.3.1.3).
    pub fn from_bitbuf(buf: &mut BitBuffer, time: TdmaTime) -> Result<Self, PduParseErr> {
        let header = buf.read_field(2, "header")? as u8;
        let field1 = buf.read_field(6, "field1")? as u8;
        let field2 = buf.read_field(6, "field2")? as u8;

        let (dl_usage, dl_usage_marker) = if time.is_control_frame() || header == 0 {
            (DownlinkUsage::CommonControl, 0)
        } else {
            match field1 {
                0b000000 => (DownlinkUsage::Unallocated, 0),
                0b000001 => (DownlinkUsage::AssignedControl, 0),
                0b000010 => (DownlinkUsage::CommonControl, 0),
                0b000011 => (DownlinkUsage::Reserved, 0),
                marker => (DownlinkUsage::Traffic, marker),
            }
        };

        Ok(AccessAssign { header, field1, field2, dl_usage, dl_usage_marker })
    }

    pub fn to_bitbuf(&self, buf: &mut BitBuffer) {
        buf.write_bits(self.header as u64, 2);
        buf.write_bits(self.field1 as u64, 6);
        buf.write_bits(self.field2 as u64, 6);
    }
}

impl fmt::Display for AccessAssign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AccessAssign {{ header: {} field1: {} field2: {} dl_usage: {}",
            self.header, self.field1, self.field2, self.dl_usage.name())?;
        if self.dl_usage == DownlinkUsage::Traffic {
            write!(f, " marker: {}", self.dl_usage_marker)?;
        }
        write!(f, " }}")
    }
}
