use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PduParseErr {
    InvalidPduType { expected: u64, found: u64 },
    BufferEnded { field: Option<&'static str> },
    InvalidTrailingMbitValue,
    InvalidValue { field: &'static str, value: u64 },
    /// PDU shorter than the minimum length of its type
    TooShort { pdu: &'static str, len: usize, min: usize },
    InvalidLength { field: &'static str, value: u64 },
    Inconsistency { field: &'static str, reason: &'static str },
    NotImplemented { field: Option<&'static str> },
}

impl fmt::Display for PduParseErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PduParseErr::InvalidPduType { expected, found } => {
                write!(f, "invalid pdu type {}, expected {}", found, expected)
            }
            PduParseErr::BufferEnded { field: Some(field) } => write!(f, "buffer ended while reading {}", field),
            PduParseErr::BufferEnded { field: None } => write!(f, "buffer ended"),
            PduParseErr::InvalidTrailingMbitValue => write!(f, "invalid trailing m-bit"),
            PduParseErr::InvalidValue { field, value } => write!(f, "invalid value {} for {}", value, field),
            PduParseErr::TooShort { pdu, len, min } => write!(f, "{} too short: {} < {} bits", pdu, len, min),
            PduParseErr::InvalidLength { field, value } => write!(f, "invalid length {} in {}", value, field),
            PduParseErr::Inconsistency { field, reason } => write!(f, "{}: {}", field, reason),
            PduParseErr::NotImplemented { field: Some(field) } => write!(f, "not implemented: {}", field),
            PduParseErr::NotImplemented { field: None } => write!(f, "not implemented"),
        }
    }
}

impl std::error::Error for PduParseErr {}

/// Checks whether a PDU type value matches the expected value. If not, returns PduParseErr::InvalidPduType
#[macro_export]
macro_rules! expect_pdu_type {
    ($value:expr, $expected:expr) => {{
        let raw_expected = $expected.into_raw();
        if $value == raw_expected {
            Ok(())
        } else {
            Err($crate::PduParseErr::InvalidPduType {
                expected: raw_expected as u64,
                found: $value,
            })
        }
    }};
}

/// Checks whether a value matches an expected value. If not, returns PduParseErr::InvalidValue
#[macro_export]
macro_rules! expect_value {
    ($value:ident, $expected:expr) => {
        $crate::expect_value!(@inner $value, $expected, stringify!($value))
    };
    ($value:expr, $expected:expr, $field:expr) => {
        $crate::expect_value!(@inner $value, $expected, $field)
    };

    (@inner $value:expr, $expected:expr, $field:expr) => {{
        let val = $value;
        if val == $expected {
            Ok(())
        } else {
            Err($crate::PduParseErr::InvalidValue {
                field: $field,
                value: val.into(),
            })
        }
    }};
}

/// Fails with PduParseErr::TooShort if the buffer window is shorter than `min` bits
#[macro_export]
macro_rules! expect_min_len {
    ($buf:expr, $min:expr, $pdu:expr) => {{
        let len = $buf.get_len();
        if len >= $min {
            Ok(())
        } else {
            Err($crate::PduParseErr::TooShort { pdu: $pdu, len, min: $min })
        }
    }};
}

/// Reads a field named after the binding
#[macro_export]
macro_rules! let_field {
    ($buf:expr, $ident:ident, $bits:expr) => {
        let $ident = $buf.read_field($bits, stringify!($ident))?;
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = PduParseErr::TooShort { pdu: "MAC-RESOURCE", len: 20, min: 40 };
        assert_eq!(e.to_string(), "MAC-RESOURCE too short: 20 < 40 bits");
        let e = PduParseErr::BufferEnded { field: Some("ssi") };
        assert_eq!(e.to_string(), "buffer ended while reading ssi");
    }
}
