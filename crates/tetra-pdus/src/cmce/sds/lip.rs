//! Location Information Protocol, EN 300 392-18-1

use tetra_core::{BitBuffer, let_field, pdu_parse_error::PduParseErr};

/// Clause 6.2, 2-bit LIP PDU type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LipPduType {
    ShortLocationReport,
    WithExtension,
    Reserved(u8),
}

impl LipPduType {
    pub fn from_raw(raw: u64) -> Self {
        match raw {
            0 => LipPduType::ShortLocationReport,
            1 => LipPduType::WithExtension,
            r => LipPduType::Reserved((r & 0b11) as u8),
        }
    }
}

/// Additional data of a short location report (clause 6.3.87)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LipAdditionalData {
    ReasonForSending(u8),
    UserDefined(u8),
}

/// Clause 6.2.1 short location report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortLocationReport {
    pub time_elapsed: u8,
    /// 25-bit two's complement
    pub longitude_raw: u32,
    /// 24-bit two's complement
    pub latitude_raw: u32,
    pub position_error: u8,
    pub horizontal_velocity: u8,
    pub direction_of_travel: u8,
    pub additional_data: LipAdditionalData,
}

impl ShortLocationReport {
    /// Parses the report following the 2-bit LIP PDU type
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buf, time_elapsed, 2);
        let_field!(buf, longitude, 25);
        let_field!(buf, latitude, 24);
        let_field!(buf, position_error, 3);
        let_field!(buf, horizontal_velocity, 7);
        let_field!(buf, direction_of_travel, 4);
        let user_defined = buf.read_flag("type_of_additional_data")?;
        let_field!(buf, additional_data, 8);

        let additional_data = if user_defined {
            LipAdditionalData::UserDefined(additional_data as u8)
        } else {
            LipAdditionalData::ReasonForSending(additional_data as u8)
        };

        Ok(ShortLocationReport {
            time_elapsed: time_elapsed as u8,
            longitude_raw: longitude as u32,
            latitude_raw: latitude as u32,
            position_error: position_error as u8,
            horizontal_velocity: horizontal_velocity as u8,
            direction_of_travel: direction_of_travel as u8,
            additional_data,
        })
    }

    /// Longitude in degrees, clause 6.3.50
    pub fn longitude(&self) -> f64 {
        decode_twos_complement(self.longitude_raw, 25, 180.0)
    }

    /// Latitude in degrees, clause 6.3.30
    pub fn latitude(&self) -> f64 {
        decode_twos_complement(self.latitude_raw, 24, 90.0)
    }
}

/// Scales an `n_bits` two's complement value so that 2^(n_bits-1) maps to `full_scale`
pub fn decode_twos_complement(raw: u32, n_bits: u32, full_scale: f64) -> f64 {
    let half = 1i64 << (n_bits - 1);
    let mut value = (raw as i64) & ((1i64 << n_bits) - 1);
    if value >= half {
        value -= 1i64 << n_bits;
    }
    value as f64 * full_scale / half as f64
}

/// Parsed LIP PDU. Only the short location report is decoded
#[derive(Debug, Clone, PartialEq)]
pub enum LipPdu {
    ShortLocationReport(ShortLocationReport),
    Other(LipPduType),
}

impl LipPdu {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buf, pdu_type, 2);
        match LipPduType::from_raw(pdu_type) {
            LipPduType::ShortLocationReport => Ok(LipPdu::ShortLocationReport(ShortLocationReport::from_bitbuf(buf)?)),
            other => Ok(LipPdu::Other(other)),
        }
    }
}
