use tetra_core::{BitBuffer, pdu_parse_error::PduParseErr};

/// Clause 14.8.20, table 14.76: 4-bit TETRA digit alphabet
pub fn tetra_digit(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        0xa => '*',
        0xb => '#',
        0xc => '+',
        _ => '?',
    }
}

/// Reads an external subscriber number: 8-bit digit count, then one nibble per digit.
/// An odd count is followed by a dummy nibble.
pub fn read_external_number(buf: &mut BitBuffer) -> Result<String, PduParseErr> {
    let count = buf.read_field(8, "number_of_digits")? as usize;
    let mut number = String::with_capacity(count);
    for _ in 0..count {
        number.push(tetra_digit(buf.read_field(4, "digit")? as u8));
    }
    if count % 2 != 0 {
        buf.read_field(4, "dummy_digit")?;
    }
    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits() {
        assert_eq!(tetra_digit(7), '7');
        assert_eq!(tetra_digit(0xa), '*');
        assert_eq!(tetra_digit(0xb), '#');
        assert_eq!(tetra_digit(0xc), '+');
        assert_eq!(tetra_digit(0xf), '?');
    }

    #[test]
    fn test_odd_number_skips_dummy_digit() {
        let mut buf = BitBuffer::from_bitstr("00000011 0001 1011 1100 0000 1");
        assert_eq!(read_external_number(&mut buf).unwrap(), "1#+");
        assert_eq!(buf.get_len_remaining(), 1);
    }
}
