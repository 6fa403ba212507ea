use core::fmt;

use tetra_core::{BitBuffer, expect_pdu_type, freqs::FreqInfo};
use tetra_core::pdu_parse_error::PduParseErr;

use crate::umac::enums::{broadcast_type::BroadcastType, mac_pdu_type::MacPduType};


/// Clause 21.4.4.1 Table 21.68: meaning of the 20 bit optional field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysinfoOptField {
    EvenMfDefForTsMode(u32),
    OddMfDefForTsMode(u32),
    DefaultDefForAccCodeA(u32),
    ExtServicesBroadcast(u32),
}

impl SysinfoOptField {
    pub fn raw(&self) -> u32 {
        match *self {
            SysinfoOptField::EvenMfDefForTsMode(v)
            | SysinfoOptField::OddMfDefForTsMode(v)
            | SysinfoOptField::DefaultDefForAccCodeA(v)
            | SysinfoOptField::ExtServicesBroadcast(v) => v,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SysinfoOptField::EvenMfDefForTsMode(_) => "even multiframe definition for TS mode",
            SysinfoOptField::OddMfDefForTsMode(_) => "odd multiframe definition for TS mode",
            SysinfoOptField::DefaultDefForAccCodeA(_) => "default definition for access code A",
            SysinfoOptField::ExtServicesBroadcast(_) => "extended services broadcast",
        }
    }
}

/// Clause 21.4.4.1 SYSINFO
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacSysinfo {
    // 12
    pub main_carrier: u16,
    // 4
    pub freq_band: u8,
    // 2
    pub freq_offset_index: u8,
    // 3
    pub duplex_spacing: u8,
    // 1
    pub reverse_operation: bool,
    // 2 Number of common secondary control channels on CA main carrier
    pub num_of_csch: u8,
    // 3
    pub ms_txpwr_max_cell: u8,
    // 4
    pub rxlev_access_min: u8,
    // 4
    pub access_parameter: u8,
    // 4
    pub radio_dl_timeout: u8,
    // 16 opt
    pub cck_id: Option<u16>,
    // 16 opt
    pub hyperframe_number: Option<u16>,
    // 2 + 20
    pub option_field: SysinfoOptField,
}

/// Parses SYSINFO pdu
/// Updates pos to start of TM-SDU (the D-MLE-SYSINFO part)
impl MacSysinfo {
    /// Length of the MAC part including the broadcast header
    pub const MAC_LEN_BITS: usize = 82;

    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let pdu_type = buf.read_field(2, "mac_pdu_type")?;
        expect_pdu_type!(pdu_type, MacPduType::Broadcast)?;
        let bcast_type = buf.read_field(2, "broadcast_type")?;
        expect_pdu_type!(bcast_type, BroadcastType::Sysinfo)?;

        let main_carrier = buf.read_field(12, "main_carrier")? as u16;
        let freq_band = buf.read_field(4, "freq_band")? as u8;
        let freq_offset_index = buf.read_field(2, "freq_offset")? as u8;
        let duplex_spacing = buf.read_field(3, "duplex_spacing")? as u8;
        let reverse_operation = buf.read_flag("reverse_operation")?;
        let num_of_csch = buf.read_field(2, "num_of_csch")? as u8;
        let ms_txpwr_max_cell = buf.read_field(3, "ms_txpwr_max_cell")? as u8;
        let rxlev_access_min = buf.read_field(4, "rxlev_access_min")? as u8;
        let access_parameter = buf.read_field(4, "access_parameter")? as u8;
        let radio_dl_timeout = buf.read_field(4, "radio_dl_timeout")? as u8;

        let (cck_id, hyperframe_number) = if buf.read_flag("has_cck_field")? {
            (Some(buf.read_field(16, "cck_id")? as u16), None)
        } else {
            (None, Some(buf.read_field(16, "hyperframe_number")? as u16))
        };

        let flag = buf.read_field(2, "option_field")?;
        let value = buf.read_field(20, "option_field_value")? as u32;
        let option_field = match flag {
            0 => SysinfoOptField::EvenMfDefForTsMode(value),
            1 => SysinfoOptField::OddMfDefForTsMode(value),
            2 => SysinfoOptField::DefaultDefForAccCodeA(value),
            _ => SysinfoOptField::ExtServicesBroadcast(value),
        };

        Ok(MacSysinfo {
            main_carrier,
            freq_band,
            freq_offset_index,
            duplex_spacing,
            reverse_operation,
            num_of_csch,
            ms_txpwr_max_cell,
            rxlev_access_min,
            access_parameter,
            radio_dl_timeout,
            cck_id,
            hyperframe_number,
            option_field,
        })
    }

    /// Carrier description of the main carrier, used to compute the absolute downlink frequency
    pub fn freq_info(&self) -> Result<FreqInfo, String> {
        FreqInfo::from_sysinfo_fields(
            self.freq_band,
            self.main_carrier,
            self.freq_offset_index,
            self.duplex_spacing,
            self.reverse_operation,
        )
    }
}

impl fmt::Display for MacSysinfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacSysinfo {{ main_carrier: {} band: {} offset: {} duplex: {} reverse: {}",
            self.main_carrier, self.freq_band, self.freq_offset_index, self.duplex_spacing, self.reverse_operation)?;
        write!(f, " num_of_csch: {} ms_txpwr_max_cell: {} rxlev_access_min: {}",
            self.num_of_csch, self.ms_txpwr_max_cell, self.rxlev_access_min)?;
        write!(f, " access_parameter: {} radio_dl_timeout: {}", self.access_parameter, self.radio_dl_timeout)?;
        if let Some(h) = self.hyperframe_number {
            write!(f, " hyperframe: {}", h)?;
        }
        if let Some(c) = self.cck_id {
            write!(f, " cck_id: {}", c)?;
        }
        write!(f, " {}: {:05x} }}", self.option_field.name(), self.option_field.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetra_core::debug;

    #[test]
    fn test_sysinfo_bnch_vector() {
        debug::setup_logging_verbose();
        let mut buf = BitBuffer::from_bitstr("1000001111101001010000000000101001101110011000000000000000001010000101010100000000000000000000101111111111111111110100100000");
        let pdu = MacSysinfo::from_bitbuf(&mut buf).unwrap();
        tracing::info!("{}", pdu);
        assert_eq!(buf.get_pos(), MacSysinfo::MAC_LEN_BITS);
        assert_eq!(pdu.main_carrier, 0b001111101001);
        assert_eq!(pdu.freq_band, 4);
        assert_eq!(pdu.hyperframe_number, Some(0));
        let freq = pdu.freq_info().unwrap();
        assert_eq!(freq.dl_freq(), 400_000_000 + 1001 * 25_000);
    }

    #[test]
    fn test_wrong_broadcast_type() {
        let mut buf = BitBuffer::from_bitstr("1001000000000000");
        assert!(matches!(MacSysinfo::from_bitbuf(&mut buf), Err(PduParseErr::InvalidPduType { .. })));
    }
}
