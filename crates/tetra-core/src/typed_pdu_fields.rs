#[derive(Debug, PartialEq, Eq)]
pub struct Type3FieldGeneric {
    pub field_id: u64,
    pub len: usize,
    /// Up to 64 bits of data (later bits are discarded)
    pub data: u64,
}

/// Helper functions for dealing with type2 and type3 fields of MLE, CMCE and MM PDUs.
pub mod delimiters {
    use crate::{bitbuffer::BitBuffer, pdu_parse_error::PduParseErr};

    /// Read the o-bit between type1 and type2/type3 elements
    pub fn read_obit(buffer: &mut BitBuffer) -> Result<bool, PduParseErr> {
        Ok(buffer.read_field(1, "obit")? == 1)
    }

    /// Read a p-bit preceding a type2 element
    pub fn read_pbit(buffer: &mut BitBuffer) -> Result<bool, PduParseErr> {
        Ok(buffer.read_field(1, "pbit")? == 1)
    }

    /// Read an m-bit found before a type3 element, and trailing the message.
    /// A buffer that ends where an m-bit is expected is treated as "no more elements".
    pub fn read_mbit(buffer: &mut BitBuffer) -> bool {
        buffer.read_bit() == Some(1)
    }
}

pub mod typed {
    use crate::{bitbuffer::BitBuffer, pdu_parse_error::PduParseErr, typed_pdu_fields::{delimiters, Type3FieldGeneric}};

    pub fn parse_type2_generic(
        obit: bool,
        buffer: &mut BitBuffer,
        num_bits: usize,
        field_name: &'static str,
    ) -> Result<Option<u64>, PduParseErr> {
        if !obit {
            return Ok(None);
        }
        if delimiters::read_pbit(buffer)? {
            tracing::trace!("parse_type2_generic field_present {:20}: {}", field_name, buffer.dump_bin());
            Ok(Some(buffer.read_field(num_bits, field_name)?))
        } else {
            tracing::trace!("parse_type2_generic no_field      {:20}: {}", field_name, buffer.dump_bin());
            Ok(None)
        }
    }

    /// Parse a Type-2 element into a struct through `parser`.
    pub fn parse_type2_struct<T, F>(obit: bool, buffer: &mut BitBuffer, parser: F) -> Result<Option<T>, PduParseErr>
    where
        F: FnOnce(&mut BitBuffer) -> Result<T, PduParseErr>,
    {
        if !obit {
            return Ok(None);
        }
        if delimiters::read_pbit(buffer)? {
            Ok(Some(parser(buffer)?))
        } else {
            Ok(None)
        }
    }

    /// Read the next type3 element, if the m-bit announces one.
    /// Returns None at the trailing m-bit or at the end of the buffer.
    pub fn parse_next_type3(buffer: &mut BitBuffer) -> Result<Option<Type3FieldGeneric>, PduParseErr> {
        if !delimiters::read_mbit(buffer) {
            return Ok(None);
        }
        let field_id = buffer.read_field(4, "type3 element id")?;
        let len = buffer.read_field(11, "type3 length")? as usize;
        if len > buffer.get_len_remaining() {
            return Err(PduParseErr::InvalidLength { field: "type3 length", value: len as u64 });
        }
        let read = len.min(64);
        let data = buffer.read_field(read, "type3 data")?;
        if len > 64 {
            tracing::debug!("Type3 element {} length {} exceeds 64 bits, data truncated", field_id, len);
            buffer.seek_rel((len - 64) as isize);
        }
        Ok(Some(Type3FieldGeneric { field_id, len, data }))
    }
}

/// Declarative field layouts.
///
/// A PDU body is described as a list of steps. The interpreter walks them over a
/// `BitBuffer` and yields the named values in order, so every optional element
/// follows the same o-bit / p-bit / m-bit rules.
pub mod layout {
    use crate::{bitbuffer::BitBuffer, pdu_parse_error::PduParseErr, typed_pdu_fields::{delimiters, typed}};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FieldStep {
        /// Mandatory type1 field
        Fixed { name: &'static str, bits: usize },
        /// Bits that are skipped without being reported
        Reserved { bits: usize },
        /// The o-bit. Type2 and type3 steps after it are only parsed if it is set
        Obit,
        /// Optional type2 field, preceded by its p-bit
        Type2 { name: &'static str, bits: usize },
        /// Optional type2 party identifier: p-bit, 2-bit type identifier, then SNA (8),
        /// SSI (24) or SSI (24) + extension (24)
        Type2Party { type_name: &'static str, ssi_name: &'static str, ext_name: &'static str },
        /// Sequence of type3 elements, each announced by an m-bit. Known element ids are named
        Type3 { known: &'static [(u64, &'static str)] },
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DecodedField {
        pub name: &'static str,
        pub value: u64,
    }

    pub const UNKNOWN_TYPE3: &str = "type3 element";

    /// Walk `steps` over `buffer`.
    pub fn parse_layout(buffer: &mut BitBuffer, steps: &[FieldStep]) -> Result<Vec<DecodedField>, PduParseErr> {
        let mut fields = Vec::with_capacity(steps.len());
        let mut obit = true;
        for step in steps {
            match *step {
                FieldStep::Fixed { name, bits } => {
                    let value = buffer.read_field(bits, name)?;
                    fields.push(DecodedField { name, value });
                }
                FieldStep::Reserved { bits } => {
                    buffer.read_field(bits, "reserved")?;
                }
                FieldStep::Obit => {
                    obit = delimiters::read_obit(buffer)?;
                }
                FieldStep::Type2 { name, bits } => {
                    if let Some(value) = typed::parse_type2_generic(obit, buffer, bits, name)? {
                        fields.push(DecodedField { name, value });
                    }
                }
                FieldStep::Type2Party { type_name, ssi_name, ext_name } => {
                    let party = typed::parse_type2_struct(obit, buffer, |buf| {
                        let ptype = buf.read_field(2, type_name)?;
                        let mut out = vec![DecodedField { name: type_name, value: ptype }];
                        match ptype {
                            0 => out.push(DecodedField { name: ssi_name, value: buf.read_field(8, ssi_name)? }),
                            1 => out.push(DecodedField { name: ssi_name, value: buf.read_field(24, ssi_name)? }),
                            2 => {
                                out.push(DecodedField { name: ssi_name, value: buf.read_field(24, ssi_name)? });
                                out.push(DecodedField { name: ext_name, value: buf.read_field(24, ext_name)? });
                            }
                            _ => {}
                        }
                        Ok(out)
                    })?;
                    if let Some(party) = party {
                        fields.extend(party);
                    }
                }
                FieldStep::Type3 { known } => {
                    if !obit {
                        continue;
                    }
                    while let Some(elem) = typed::parse_next_type3(buffer)? {
                        let name = known
                            .iter()
                            .find(|(id, _)| *id == elem.field_id)
                            .map(|(_, name)| *name)
                            .unwrap_or(UNKNOWN_TYPE3);
                        fields.push(DecodedField { name, value: elem.data });
                    }
                }
            }
        }
        Ok(fields)
    }

}
