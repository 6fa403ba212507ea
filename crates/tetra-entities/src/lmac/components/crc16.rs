/// CRC-16 ITU-T over bit-per-byte buffers, Clause 8.2.3.3
pub const GEN_POLY: u16 = 0x1021;

/// Remainder left when the CRC is computed over data plus its (inverted) checksum
pub const TETRA_CRC_OK: u16 = 0x1d0f;

/// CRC-16 ITU-T over a bit-per-byte slice: each `input[i] & 1` is one bit.
/// `crc` is the initial CRC value. Processes the first `number_bits` entries of `input`.
pub fn crc16_itut_bits(mut crc: u16, input: &[u8], number_bits: usize) -> u16 {
    for &b in input.iter().take(number_bits) {
        crc ^= ((b & 1) as u16) << 15;
        if (crc & 0x8000) != 0 {
            crc = (crc << 1) ^ GEN_POLY;
        } else {
            crc <<= 1;
        }
    }
    crc
}

/// Standard CRC-ITU-T (initial 0xffff) over a bit-per-byte slice, as it is used in TETRA.
pub fn crc16_ccitt_bits(input: &[u8], len: usize) -> u16 {
    crc16_itut_bits(0xffff, input, len)
}

/// True if the last 16 of `len` bits hold the inverted CRC of the bits before them
pub fn check_crc16_ccitt(input: &[u8], len: usize) -> bool {
    len >= 16 && input.len() >= len && crc16_ccitt_bits(input, len) == TETRA_CRC_OK
}
