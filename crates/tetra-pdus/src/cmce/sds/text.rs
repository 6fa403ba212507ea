//! Text payloads of SDS, clause 29.5.2 / 29.5.3 / 29.5.4

use tetra_core::{BitBuffer, let_field, pdu_parse_error::PduParseErr};

/// GSM 03.38 default alphabet. 0x1B is the escape to the extension table.
const GSM7_DEFAULT: [char; 128] = [
    '@', '£', '$', '¥', 'è', 'é', 'ù', 'ì', 'ò', 'Ç', '\n', 'Ø', 'ø', '\r', 'Å', 'å', //
    'Δ', '_', 'Φ', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ', 'Σ', 'Θ', 'Ξ', ' ', 'Æ', 'æ', 'ß', 'É', //
    ' ', '!', '"', '#', '¤', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', //
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?', //
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', //
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '§', //
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', //
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à', //
];

const GSM7_ESCAPE: u8 = 0x1b;

fn gsm7_extension(septet: u8) -> char {
    match septet {
        0x0a => '\x0c',
        0x14 => '^',
        0x28 => '{',
        0x29 => '}',
        0x2f => '\\',
        0x3c => '[',
        0x3d => '~',
        0x3e => ']',
        0x40 => '|',
        0x65 => '€',
        other => GSM7_DEFAULT[other as usize & 0x7f],
    }
}

/// Decodes consecutive septets, most significant bit first. Trailing bits shorter than a
/// septet are ignored
pub fn decode_gsm7(buf: &BitBuffer) -> String {
    let mut buf = buf.clone();
    let mut out = String::with_capacity(buf.get_len_remaining() / 7);
    let mut escaped = false;
    while let Some(septet) = buf.read_bits(7) {
        let septet = septet as u8;
        if escaped {
            out.push(gsm7_extension(septet));
            escaped = false;
        } else if septet == GSM7_ESCAPE {
            escaped = true;
        } else {
            out.push(GSM7_DEFAULT[septet as usize]);
        }
    }
    out
}

/// Decodes 8-bit characters, substituting '.' for anything outside printable ASCII
pub fn decode_8bit(buf: &BitBuffer) -> String {
    let mut buf = buf.clone();
    let mut out = String::with_capacity(buf.get_len_remaining() / 8);
    while let Some(byte) = buf.read_bits(8) {
        let byte = byte as u8;
        out.push(if (0x20..=0x7e).contains(&byte) { byte as char } else { '.' });
    }
    out
}

/// Text decoded from a known alphabet, or the raw bits of an unsupported coding scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextContent {
    Text(String),
    Raw(BitBuffer),
}

impl TextContent {
    /// Clause 29.5.4.1 text coding scheme: 0 is GSM 7-bit, 1..=25 are 8-bit alphabets
    pub fn decode(text_coding_scheme: u8, payload: BitBuffer) -> Self {
        match text_coding_scheme {
            0 => TextContent::Text(decode_gsm7(&payload)),
            1..=25 => TextContent::Text(decode_8bit(&payload)),
            _ => TextContent::Raw(payload),
        }
    }

    /// Text, or the raw payload as hex bytes
    pub fn to_report_string(&self) -> String {
        match self {
            TextContent::Text(s) => s.clone(),
            TextContent::Raw(buf) => buf.dump_hex(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage {
    pub text_coding_scheme: u8,
    pub timestamp: Option<u32>,
    pub content: TextContent,
}

impl TextMessage {
    /// Simple text messaging (protocol 0x02), positioned after the protocol identifier:
    /// one fill bit, then the coding scheme
    pub fn parse_simple(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buf, _fill_bit, 1);
        let_field!(buf, text_coding_scheme, 7);
        let payload = BitBuffer::from_bitbuffer_pos(buf);
        Ok(TextMessage {
            text_coding_scheme: text_coding_scheme as u8,
            timestamp: None,
            content: TextContent::decode(text_coding_scheme as u8, payload),
        })
    }

    /// Text messaging with SDS-TL (protocol 0x82), positioned at the SDS-TL user data:
    /// timestamp flag, coding scheme, optional 24-bit timestamp
    pub fn parse_sds_tl(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let has_timestamp = buf.read_flag("timestamp_used")?;
        let_field!(buf, text_coding_scheme, 7);
        let timestamp = if has_timestamp { Some(buf.read_field(24, "timestamp")? as u32) } else { None };
        let payload = BitBuffer::from_bitbuffer_pos(buf);
        Ok(TextMessage {
            text_coding_scheme: text_coding_scheme as u8,
            timestamp,
            content: TextContent::decode(text_coding_scheme as u8, payload),
        })
    }
}
