//! SDS transport layer, clause 29.4

use tetra_core::{BitBuffer, let_field, pdu_parse_error::PduParseErr};

use crate::cmce::enums::sds_protocol_id::SdsProtocolId;
use crate::cmce::fields::tetra_digits;

use super::location::LocationMessage;
use super::text::TextMessage;

/// Clause 29.4.3.8, 4-bit SDS-TL message type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdsTlMessageType {
    Transfer,
    Report,
    Ack,
    Reserved(u8),
    ApplicationDefined(u8),
}

impl SdsTlMessageType {
    pub fn from_raw(raw: u64) -> Self {
        match raw & 0xf {
            0 => SdsTlMessageType::Transfer,
            1 => SdsTlMessageType::Report,
            2 => SdsTlMessageType::Ack,
            r @ 3..=7 => SdsTlMessageType::Reserved(r as u8),
            r => SdsTlMessageType::ApplicationDefined(r as u8),
        }
    }

    pub fn into_raw(self) -> u64 {
        match self {
            SdsTlMessageType::Transfer => 0,
            SdsTlMessageType::Report => 1,
            SdsTlMessageType::Ack => 2,
            SdsTlMessageType::Reserved(r) | SdsTlMessageType::ApplicationDefined(r) => r as u64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SdsTlMessageType::Transfer => "SDS-TRANSFER",
            SdsTlMessageType::Report => "SDS-REPORT",
            SdsTlMessageType::Ack => "SDS-ACK",
            SdsTlMessageType::Reserved(_) => "reserved for additional message types",
            SdsTlMessageType::ApplicationDefined(_) => "defined by application",
        }
    }
}

/// Clause 29.4.3.5 forward address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardAddress {
    Sna(u8),
    Ssi(u32),
    Tsi { ssi: u32, ext: u32 },
    ExternalNumber(String),
    NotPresent,
    Reserved(u8),
}

impl ForwardAddress {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buf, forward_address_type, 3);
        Ok(match forward_address_type {
            0 => ForwardAddress::Sna(buf.read_field(8, "forward_address_sna")? as u8),
            1 => ForwardAddress::Ssi(buf.read_field(24, "forward_address_ssi")? as u32),
            2 => ForwardAddress::Tsi {
                ssi: buf.read_field(24, "forward_address_ssi")? as u32,
                ext: buf.read_field(24, "forward_address_ext")? as u32,
            },
            3 => ForwardAddress::ExternalNumber(tetra_digits::read_external_number(buf)?),
            7 => ForwardAddress::NotPresent,
            r => ForwardAddress::Reserved(r as u8),
        })
    }

    pub fn type_raw(&self) -> u8 {
        match self {
            ForwardAddress::Sna(_) => 0,
            ForwardAddress::Ssi(_) => 1,
            ForwardAddress::Tsi { .. } => 2,
            ForwardAddress::ExternalNumber(_) => 3,
            ForwardAddress::NotPresent => 7,
            ForwardAddress::Reserved(r) => *r,
        }
    }
}

/// User data of an SDS-TRANSFER interpreted per protocol identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdsTlPayload {
    Text(TextMessage),
    Location(LocationMessage),
    Undecoded,
}

/// Clause 29.4.2.4 SDS-TRANSFER
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdsTransfer {
    pub protocol_id: SdsProtocolId,
    pub delivery_report_request: u8,
    pub service_selection: bool,
    pub service_forward_control: bool,
    pub message_reference: u8,
    pub validity_period: Option<u8>,
    pub forward_address: Option<ForwardAddress>,
    /// Everything after the SDS-TL header
    pub user_data: BitBuffer,
    pub payload: SdsTlPayload,
}

impl SdsTransfer {
    /// Positioned after the message type
    pub fn from_bitbuf(protocol_id: SdsProtocolId, buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buf, delivery_report_request, 2);
        let service_selection = buf.read_flag("service_selection")?;
        let service_forward_control = buf.read_flag("service_forward_control")?;
        let_field!(buf, message_reference, 8);

        let (validity_period, forward_address) = if service_forward_control {
            let_field!(buf, validity_period, 5);
            (Some(validity_period as u8), Some(ForwardAddress::from_bitbuf(buf)?))
        } else {
            (None, None)
        };

        let user_data = BitBuffer::from_bitbuffer_pos(buf);
        let mut sdu = BitBuffer::from_bitbuffer(&user_data);
        let payload = match protocol_id {
            SdsProtocolId::TextMessagingSdsTl => SdsTlPayload::Text(TextMessage::parse_sds_tl(&mut sdu)?),
            SdsProtocolId::LocationSystemSdsTl => SdsTlPayload::Location(LocationMessage::from_bitbuf(&mut sdu)?),
            _ => SdsTlPayload::Undecoded,
        };

        Ok(SdsTransfer {
            protocol_id,
            delivery_report_request: delivery_report_request as u8,
            service_selection,
            service_forward_control,
            message_reference: message_reference as u8,
            validity_period,
            forward_address,
            user_data,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmce::sds::text::TextContent;

    fn from_hex(hex: &str) -> BitBuffer {
        let bytes: Vec<u8> = hex
            .split_whitespace()
            .map(|b| u8::from_str_radix(b, 16).unwrap())
            .collect();
        BitBuffer::from_bytes_msb(&bytes)
    }

    #[test]
    fn test_transfer_text() {
        let mut buf = from_hex("82 00 e3 01 f0 80 00 c2 0c 12 07 29 05 99 05 82 01 0e 00 00 00");
        let protocol_id = SdsProtocolId::from_raw(buf.read_bits(8).unwrap());
        assert_eq!(SdsTlMessageType::from_raw(buf.read_bits(4).unwrap()), SdsTlMessageType::Transfer);

        let transfer = SdsTransfer::from_bitbuf(protocol_id, &mut buf).unwrap();
        assert_eq!(transfer.protocol_id, SdsProtocolId::TextMessagingSdsTl);
        assert_eq!(transfer.message_reference, 227);
        assert!(!transfer.service_forward_control);
        assert_eq!(transfer.user_data.dump_hex(), "01 f0 80 00 c2 0c 12 07 29 05 99 05 82 01 0e 00 00 00");
        let SdsTlPayload::Text(text) = transfer.payload else {
            panic!("expected text payload");
        };
        assert_eq!(text.text_coding_scheme, 1);
        assert_eq!(text.timestamp, None);
        assert!(matches!(text.content, TextContent::Text(_)));
    }

    #[test]
    fn test_forward_address_external_number() {
        // drr 01, ss 0, sfc 1, ref 5, validity 3, type 3, two digits 9 9
        let mut buf = BitBuffer::from_bitstr("01 0 1 00000101 00011 011 00000010 1001 1001 10101010");
        let transfer = SdsTransfer::from_bitbuf(SdsProtocolId::Other(0xc0), &mut buf).unwrap();
        assert_eq!(transfer.delivery_report_request, 1);
        assert_eq!(transfer.validity_period, Some(3));
        assert_eq!(transfer.forward_address, Some(ForwardAddress::ExternalNumber("99".to_string())));
        assert_eq!(transfer.user_data.dump_hex(), "aa");
        assert_eq!(transfer.payload, SdsTlPayload::Undecoded);
    }

    #[test]
    fn test_message_type_ranges() {
        assert_eq!(SdsTlMessageType::from_raw(2).name(), "SDS-ACK");
        assert_eq!(SdsTlMessageType::from_raw(5).name(), "reserved for additional message types");
        assert_eq!(SdsTlMessageType::from_raw(9).name(), "defined by application");
        assert_eq!(SdsTlMessageType::from_raw(9).into_raw(), 9);
    }
}
