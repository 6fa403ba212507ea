use tetra_core::{BitBuffer, expect_pdu_type, let_field, pdu_parse_error::PduParseErr};

use crate::cmce::enums::cmce_pdu_type_dl::CmcePduTypeDl;
use crate::cmce::fields::party_address::PartyAddress;

/// User defined data carried by D-SDS-DATA, selected by the SDS type identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdsUserData {
    /// 16-bit user defined data 1
    Data1(u16),
    /// 32-bit user defined data 2
    Data2(u32),
    /// 64-bit user defined data 3
    Data3(u64),
    /// Variable length user defined data 4, starting with the protocol identifier
    Data4(BitBuffer),
}

impl SdsUserData {
    /// Raw bits of the user data, for reporting
    pub fn to_bitbuf(&self) -> BitBuffer {
        let mut buf = BitBuffer::new_autoexpand(64);
        match self {
            SdsUserData::Data1(v) => buf.write_bits(*v as u64, 16),
            SdsUserData::Data2(v) => buf.write_bits(*v as u64, 32),
            SdsUserData::Data3(v) => buf.write_bits(*v, 64),
            SdsUserData::Data4(sdu) => return BitBuffer::from_bitbuffer(sdu),
        }
        buf
    }
}

/// Clause 14.7.1.10 D-SDS-DATA
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DSdsData {
    pub calling_party: PartyAddress,
    pub sds_type_identifier: Option<u8>,
    /// None if decoding stopped at a reserved calling party type
    pub user_data: Option<SdsUserData>,
}

impl DSdsData {
    /// Parses the PDU from the CMCE PDU type onwards
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buffer, pdu_type, 5);
        expect_pdu_type!(pdu_type, CmcePduTypeDl::DSdsData)?;

        let calling_party = PartyAddress::from_bitbuf(buffer, true)?;
        if calling_party.is_reserved() {
            return Ok(DSdsData { calling_party, sds_type_identifier: None, user_data: None });
        }

        let_field!(buffer, sds_type_identifier, 2);
        let user_data = match sds_type_identifier {
            0 => SdsUserData::Data1(buffer.read_field(16, "user_defined_data_1")? as u16),
            1 => SdsUserData::Data2(buffer.read_field(32, "user_defined_data_2")? as u32),
            2 => SdsUserData::Data3(buffer.read_field(64, "user_defined_data_3")?),
            _ => {
                let_field!(buffer, length_indicator, 11);
                let len = length_indicator as usize;
                if len > buffer.get_len_remaining() {
                    return Err(PduParseErr::InvalidLength { field: "length_indicator", value: length_indicator });
                }
                let sdu = buffer
                    .slice(buffer.get_pos(), len)
                    .ok_or(PduParseErr::BufferEnded { field: Some("user_defined_data_4") })?;
                buffer.seek_rel(len as isize);
                SdsUserData::Data4(sdu)
            }
        };

        Ok(DSdsData {
            calling_party,
            sds_type_identifier: Some(sds_type_identifier as u8),
            user_data: Some(user_data),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_data_1() {
        // D-SDS-DATA, ssi 0x000102, sdti 0, data 0xbeef
        let mut buf = BitBuffer::from_bitstr("01111 01 000000000000000100000010 00 1011111011101111");
        let pdu = DSdsData::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.calling_party.ssi, Some(0x102));
        assert_eq!(pdu.sds_type_identifier, Some(0));
        assert_eq!(pdu.user_data, Some(SdsUserData::Data1(0xbeef)));
        assert_eq!(pdu.user_data.unwrap().to_bitbuf().dump_hex(), "be ef");
    }

    #[test]
    fn test_user_data_4() {
        // sna 7, sdti 3, length 12, protocol id 0x82 followed by 4 bits
        let mut buf = BitBuffer::from_bitstr("01111 00 00000111 11 00000001100 10000010 1010 111");
        let pdu = DSdsData::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.calling_party.ssi, Some(7));
        let Some(SdsUserData::Data4(sdu)) = pdu.user_data else {
            panic!("expected user data 4");
        };
        assert_eq!(sdu.get_len(), 12);
        assert_eq!(sdu.peek_bits(8), Some(0x82));
        assert_eq!(buf.get_len_remaining(), 3);
    }

    #[test]
    fn test_reserved_calling_party_stops() {
        let mut buf = BitBuffer::from_bitstr("01111 11 0101");
        let pdu = DSdsData::from_bitbuf(&mut buf).unwrap();
        assert!(pdu.calling_party.is_reserved());
        assert_eq!(pdu.user_data, None);
    }

    #[test]
    fn test_length_indicator_overrun() {
        let mut buf = BitBuffer::from_bitstr("01111 00 00000111 11 00001000000 1010");
        assert!(matches!(DSdsData::from_bitbuf(&mut buf), Err(PduParseErr::InvalidLength { .. })));
    }

    #[test]
    fn test_wrong_pdu_type() {
        let mut buf = BitBuffer::from_bitstr("01000 01 000000000000000100000010");
        assert!(matches!(DSdsData::from_bitbuf(&mut buf), Err(PduParseErr::InvalidPduType { .. })));
    }
}
