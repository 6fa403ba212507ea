use tetra_core::typed_pdu_fields::{delimiters, typed};
use tetra_core::{BitBuffer, expect_pdu_type, let_field, pdu_parse_error::PduParseErr};

use crate::cmce::enums::cmce_pdu_type_dl::CmcePduTypeDl;
use crate::cmce::enums::type3_elem_id::cmce_type3_elem_id;
use crate::cmce::fields::party_address::PartyAddress;
use crate::cmce::fields::tetra_digits;

/// Clause 14.7.1.11 D-STATUS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DStatus {
    pub calling_party: PartyAddress,
    /// None if decoding stopped at a reserved calling party type
    pub pre_coded_status: Option<u16>,
    /// Type3 external subscriber number, as TETRA digits
    pub external_subscriber_number: Option<String>,
}

impl DStatus {
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buffer, pdu_type, 5);
        expect_pdu_type!(pdu_type, CmcePduTypeDl::DStatus)?;

        let calling_party = PartyAddress::from_bitbuf(buffer, false)?;
        if calling_party.is_reserved() {
            return Ok(DStatus { calling_party, pre_coded_status: None, external_subscriber_number: None });
        }

        let_field!(buffer, pre_coded_status, 16);
        let mut external_subscriber_number = None;

        // A PDU cut short after the status is common, treat a missing o-bit as "no options"
        if buffer.get_len_remaining() > 0 && delimiters::read_obit(buffer)? {
            loop {
                let pos = buffer.get_pos();
                let Some(elem) = typed::parse_next_type3(buffer)? else { break };
                if elem.field_id == cmce_type3_elem_id::EXTERNAL_SUBSCRIBER_NUMBER {
                    // Re-read the element body as digits, positioned after m-bit, id and length
                    let mut body = buffer
                        .slice(pos + 16, elem.len)
                        .ok_or(PduParseErr::BufferEnded { field: Some("external_subscriber_number") })?;
                    external_subscriber_number = Some(tetra_digits::read_external_number(&mut body)?);
                }
            }
        }

        Ok(DStatus {
            calling_party,
            pre_coded_status: Some(pre_coded_status as u16),
            external_subscriber_number,
        })
    }
}
