use core::fmt;

use tetra_core::{BitBuffer, pdu_parse_error::PduParseErr};

/// Clause 18.4.2.1 D-MLE-SYNC, the TM-SDU of the BSCH SYNC PDU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DMleSync {
    // 10
    pub mcc: u16,
    // 14
    pub mnc: u16,
    // 2
    pub neighbour_cell_broadcast: u8,
    // 2
    pub cell_service_level: u8,
    // 1
    pub late_entry_supported: bool,
}

impl DMleSync {
    pub const LEN_BITS: usize = 29;

    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let mcc = buf.read_field(10, "mcc")? as u16;
        let mnc = buf.read_field(14, "mnc")? as u16;
        let neighbour_cell_broadcast = buf.read_field(2, "neighbour_cell_broadcast")? as u8;
        let cell_service_level = buf.read_field(2, "cell_service_level")? as u8;
        let late_entry_supported = buf.read_flag("late_entry_supported")?;

        Ok(DMleSync {
            mcc,
            mnc,
            neighbour_cell_broadcast,
            cell_service_level,
            late_entry_supported,
        })
    }

    pub fn to_bitbuf(&self, buf: &mut BitBuffer) {
        buf.write_bits(self.mcc as u64, 10);
        buf.write_bits(self.mnc as u64, 14);
        buf.write_bits(self.neighbour_cell_broadcast as u64, 2);
        buf.write_bits(self.cell_service_level as u64, 2);
        buf.write_bits(self.late_entry_supported as u64, 1);
    }
}

impl fmt::Display for DMleSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DMleSync {{ mcc: {} mnc: {} neighbour_cell_broadcast: {} cell_service_level: {} late_entry_supported: {} }}",
            self.mcc, self.mnc, self.neighbour_cell_broadcast, self.cell_service_level, self.late_entry_supported,
        )
    }
}
