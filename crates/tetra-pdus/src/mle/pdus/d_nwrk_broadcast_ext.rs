use core::fmt;

use tetra_core::typed_pdu_fields::*;
use tetra_core::{BitBuffer, expect_pdu_type, pdu_parse_error::PduParseErr};

use crate::mle::enums::mle_pdu_type_dl::MlePduTypeDl;

/// D-NWRK-BROADCAST-EXTENSION PDU (Clause 18.4.1.4.1a).
/// Only the channel class count is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DNwrkBroadcastExt {
    /// Type2, 4 bits
    pub number_of_channel_classes: Option<u8>,
}

impl DNwrkBroadcastExt {
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let pdu_type = buffer.read_field(3, "pdu_type")?;
        expect_pdu_type!(pdu_type, MlePduTypeDl::DNwrkBroadcastExt)?;

        let obit = delimiters::read_obit(buffer)?;
        let number_of_channel_classes =
            typed::parse_type2_generic(obit, buffer, 4, "number_of_channel_classes")?.map(|v| v as u8);

        Ok(DNwrkBroadcastExt { number_of_channel_classes })
    }
}

impl fmt::Display for DNwrkBroadcastExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DNwrkBroadcastExt {{ number_of_channel_classes: {:?} }}", self.number_of_channel_classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let mut buf = BitBuffer::from_bitstr("011 1 1 0101");
        let pdu = DNwrkBroadcastExt::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.number_of_channel_classes, Some(5));

        let mut buf = BitBuffer::from_bitstr("011 0");
        let pdu = DNwrkBroadcastExt::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.number_of_channel_classes, None);
    }
}
