use tetra_core::BitBuffer;

/// FCS over the bit range [start, end) of the window, Clause 22.3.3.
/// Returns None if the range is outside the window.
pub fn compute_fcs(bitbuf: &BitBuffer, start: usize, end: usize) -> Option<u32> {
    if start > end || end > bitbuf.get_len() {
        return None;
    }

    let mut crc: u32 = 0xFFFFFFFF;
    let len = end - start;
    if len < 32 {
        crc <<= 32 - len;
    }

    for bit_pos in start..end {
        let bit = bitbuf.peek_bits_startoffset(bit_pos, 1)? as u8;
        let feedback = (bit ^ (crc >> 31) as u8) & 1;
        crc <<= 1;
        if feedback != 0 {
            crc ^= 0x04C11DB7;
        }
    }

    Some(!crc)
}

/// Checks the FCS in the last 32 bits of the window against the bits from pos up to it
pub fn check_fcs(bitbuf: &BitBuffer) -> bool {
    if bitbuf.get_len_remaining() < 32 {
        tracing::warn!("check_fcs: Not enough bits for FCS, length remaining: {}", bitbuf.get_len_remaining());
        return false;
    }
    let fcs_start = bitbuf.get_len() - 32;
    let computed = compute_fcs(bitbuf, bitbuf.get_pos(), fcs_start);
    let extracted = bitbuf.peek_bits_startoffset(fcs_start, 32).map(|v| v as u32);
    computed.is_some() && computed == extracted
}

#[cfg(test)]
mod tests {
    use tetra_pdus::llc::enums::llc_pdu_type::LlcPduType;
    use tetra_pdus::llc::pdus::llc_header::LlcHeader;

    use super::*;

    const BL_DATA_FCS: &str = "010100100111101011010111110000100110000110001011000011000000000000000011000100000001001100110011000000110010001011000011001000110000001100100011000100110001001100010011000100110101001100100011000000110010001100000011000000110001011001111010000010101011000110101";

    #[test]
    fn test_fcs_matches_vector() {
        let bitbuf = BitBuffer::from_bitstr(BL_DATA_FCS);
        let fcs = compute_fcs(&bitbuf, 5, 5 + 224).unwrap();
        let extracted = bitbuf.peek_bits_startoffset(5 + 224, 32).unwrap() as u32;
        assert_eq!(fcs, extracted);
    }

    #[test]
    fn test_bl_data_with_fcs() {
        let mut bitbuf = BitBuffer::from_bitstr(BL_DATA_FCS);
        let hdr = LlcHeader::from_bitbuf(&mut bitbuf).unwrap();
        assert_eq!(hdr.pdu_type, LlcPduType::BlDataFcs);
        assert!(check_fcs(&bitbuf));
    }

    #[test]
    fn test_corrupted_fcs() {
        let mut bitbuf = BitBuffer::from_bitstr(BL_DATA_FCS);
        bitbuf.seek(20);
        bitbuf.xor_bit(1);
        bitbuf.seek(5);
        assert!(!check_fcs(&bitbuf));
        assert_eq!(compute_fcs(&bitbuf, 10, 5000), None);
    }
}
