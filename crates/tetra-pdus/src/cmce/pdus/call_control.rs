use core::fmt;

use tetra_core::typed_pdu_fields::layout::{DecodedField, parse_layout};
use tetra_core::{BitBuffer, pdu_parse_error::PduParseErr};

use crate::cmce::enums::cmce_pdu_type_dl::CmcePduTypeDl;
use crate::cmce::pdus::layouts;

/// A downlink call control PDU decoded through its field layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallControlPdu {
    pub pdu_type: CmcePduTypeDl,
    pub fields: Vec<DecodedField>,
}

impl CallControlPdu {
    /// Parse a CMCE PDU, including its 5-bit type. Fails with NotImplemented for the
    /// PDU types that have no call control layout.
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let pdu_type = CmcePduTypeDl::from_raw(buf.read_field(5, "pdu_type")?);
        let layout = layouts::layout_for(pdu_type).ok_or(PduParseErr::NotImplemented { field: Some("pdu_type") })?;
        let fields = parse_layout(buf, layout)?;
        Ok(CallControlPdu { pdu_type, fields })
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.value)
    }

    /// Call identifier, present in every call control PDU
    pub fn call_identifier(&self) -> Option<u16> {
        self.get("call identifier").map(|v| v as u16)
    }
}

impl fmt::Display for CallControlPdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.pdu_type)?;
        for field in &self.fields {
            write!(f, " {}: {}", field.name, field.value)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d_tx_granted() {
        // cid 0x123, grant 0, permission 1, encryption 0, reserved, o-bit,
        // notification absent, party type 1 ssi 0x00abcd, no type3
        let mut buf = BitBuffer::from_bitstr(concat!(
            "01011 00000100100011 00 1 0 0 1 ",
            "0 1 01 000000001010101111001101 0"
        ));
        let pdu = CallControlPdu::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.pdu_type, CmcePduTypeDl::DTxGranted);
        assert_eq!(pdu.call_identifier(), Some(0x123));
        assert_eq!(pdu.get("transmission request permission"), Some(1));
        assert_eq!(pdu.get("notification indicator"), None);
        assert_eq!(pdu.get("transmission party type identifier"), Some(1));
        assert_eq!(pdu.get("transmitting party ssi"), Some(0xabcd));
    }

    #[test]
    fn test_d_release_without_options() {
        let mut buf = BitBuffer::from_bitstr("00110 00000000000111 01101 0");
        let pdu = CallControlPdu::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.pdu_type, CmcePduTypeDl::DRelease);
        let names: Vec<_> = pdu.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["call identifier", "disconnect cause"]);
        assert_eq!(pdu.get("disconnect cause"), Some(13));
    }

    #[test]
    fn test_d_connect_with_type2_and_facility() {
        let mut buf = BitBuffer::from_bitstr(concat!(
            "00010 00000000000001 0011 1 0 00 1 0 ",
            // o-bit, priority 5, no basic service, temporary address 42, notification absent
            "1 1 0101 0 1 000000000000000000101010 0 ",
            // facility element of 4 bits, trailing m-bit
            "1 0011 00000000100 1001 0"
        ));
        let pdu = CallControlPdu::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.get("call timeout"), Some(3));
        assert_eq!(pdu.get("hook method selection"), Some(1));
        assert_eq!(pdu.get("call priority"), Some(5));
        assert_eq!(pdu.get("basic service information"), None);
        assert_eq!(pdu.get("temporary address"), Some(42));
        assert_eq!(pdu.get("facility"), Some(0b1001));
    }

    #[test]
    fn test_sds_has_no_layout() {
        let mut buf = BitBuffer::from_bitstr("01111 01");
        assert_eq!(
            CallControlPdu::from_bitbuf(&mut buf),
            Err(PduParseErr::NotImplemented { field: Some("pdu_type") })
        );
    }

    #[test]
    fn test_truncated_type1() {
        let mut buf = BitBuffer::from_bitstr("00000 0000000000");
        assert_eq!(
            CallControlPdu::from_bitbuf(&mut buf),
            Err(PduParseErr::BufferEnded { field: Some("call identifier") })
        );
    }
}
