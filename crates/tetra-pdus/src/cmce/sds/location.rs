use tetra_core::{BitBuffer, let_field, pdu_parse_error::PduParseErr};

use super::text::{TextContent, decode_8bit};

/// Clause 29.5.5.3 location system coding: 0 is NMEA 0183
pub const LOCATION_CODING_NMEA: u8 = 0;

/// Simple location system / location system with SDS-TL payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationMessage {
    pub location_system_coding: u8,
    /// NMEA sentences as text, any other coding as raw bits
    pub content: TextContent,
}

impl LocationMessage {
    /// Positioned at the location system coding field
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buf, location_system_coding, 8);
        let location_system_coding = location_system_coding as u8;
        let payload = BitBuffer::from_bitbuffer_pos(buf);
        let content = if location_system_coding == LOCATION_CODING_NMEA {
            TextContent::Text(decode_8bit(&payload))
        } else {
            TextContent::Raw(payload)
        };
        Ok(LocationMessage { location_system_coding, content })
    }
}
