use tetra_core::{BitBuffer, let_field, pdu_parse_error::PduParseErr};

use crate::cmce::enums::sds_protocol_id::SdsProtocolId;

use super::lip::LipPdu;
use super::location::LocationMessage;
use super::sds_tl::{SdsTlMessageType, SdsTransfer};
use super::text::TextMessage;

#[derive(Debug, Clone, PartialEq)]
pub enum Type4Payload {
    SimpleText(TextMessage),
    SimpleLocation(LocationMessage),
    Lip(LipPdu),
    /// SDS-TL header. Only SDS-TRANSFER is decoded further
    SdsTl { message_type: SdsTlMessageType, transfer: Option<SdsTransfer> },
    /// No decoder for this protocol
    Undecoded,
}

/// User defined data 4 of D-SDS-DATA, dispatched on the protocol identifier
#[derive(Debug, Clone, PartialEq)]
pub struct Type4Data {
    pub protocol_id: SdsProtocolId,
    pub payload: Type4Payload,
}

impl Type4Data {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buf, protocol_id, 8);
        let protocol_id = SdsProtocolId::from_raw(protocol_id);

        let payload = if protocol_id.uses_sds_tl() {
            let_field!(buf, message_type, 4);
            let message_type = SdsTlMessageType::from_raw(message_type);
            let transfer = match message_type {
                SdsTlMessageType::Transfer => Some(SdsTransfer::from_bitbuf(protocol_id, buf)?),
                _ => None,
            };
            Type4Payload::SdsTl { message_type, transfer }
        } else {
            match protocol_id {
                SdsProtocolId::SimpleTextMessaging => Type4Payload::SimpleText(TextMessage::parse_simple(buf)?),
                SdsProtocolId::SimpleLocationSystem => Type4Payload::SimpleLocation(LocationMessage::from_bitbuf(buf)?),
                SdsProtocolId::LocationInformationProtocol => Type4Payload::Lip(LipPdu::from_bitbuf(buf)?),
                _ => Type4Payload::Undecoded,
            }
        };

        Ok(Type4Data { protocol_id, payload })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmce::sds::lip::LipPdu;
    use crate::cmce::sds::text::TextContent;

    #[test]
    fn test_simple_text() {
        let mut buf = BitBuffer::from_bytes_msb(b"\x02\x01hey");
        let data = Type4Data::from_bitbuf(&mut buf).unwrap();
        assert_eq!(data.protocol_id, SdsProtocolId::SimpleTextMessaging);
        let Type4Payload::SimpleText(msg) = data.payload else {
            panic!("expected simple text");
        };
        assert_eq!(msg.content, TextContent::Text("hey".to_string()));
    }

    #[test]
    fn test_lip() {
        let mut buf = BitBuffer::new_autoexpand(84);
        buf.write_bits(10, 8);
        buf.write_bits(0, 2);
        buf.write_bits(0, 2);
        buf.write_bits(0x0CE6C98, 25);
        buf.write_bits(0xCA1959, 24);
        buf.write_zeroes(23);
        buf.seek(0);
        let data = Type4Data::from_bitbuf(&mut buf).unwrap();
        let Type4Payload::Lip(LipPdu::ShortLocationReport(report)) = data.payload else {
            panic!("expected LIP short location report");
        };
        assert!((report.latitude() - -37.899131).abs() < 1e-5);
    }

    #[test]
    fn test_sds_ack_not_decoded() {
        let mut buf = BitBuffer::from_bitstr("10000010 0010 0000");
        let data = Type4Data::from_bitbuf(&mut buf).unwrap();
        assert_eq!(data.payload, Type4Payload::SdsTl { message_type: SdsTlMessageType::Ack, transfer: None });
    }

    #[test]
    fn test_unknown_protocol() {
        let mut buf = BitBuffer::from_bitstr("00000001 1111");
        assert_eq!(Type4Data::from_bitbuf(&mut buf).unwrap().payload, Type4Payload::Undecoded);
    }
}
