use tetra_core::BitBuffer;

/// Descrambling of type5 bits back to type4, Clause 8.2.5
/// The LFSR stream is symmetric, so the same routine scrambles test vectors.

/// Scrambling code of the BSCH, cell independent
pub const SCRAMB_INIT: u32 = 3;

/// Clock the 32-bit LFSR once and return the output bit.
/// Feedback taps are 32,26,23,22,16,12,11,10,8,7,5,4,2,1.
#[inline]
fn next_lfsr_bit(lfsr: &mut u32) -> u8 {
    const TAPS: [u32; 14] = [32, 26, 23, 22, 16, 12, 11, 10, 8, 7, 5, 4, 2, 1];
    let x = *lfsr;
    let bit = TAPS.iter().fold(0u32, |acc, tap| acc ^ (x >> (32 - tap))) & 1;
    *lfsr = (x >> 1) | (bit << 31);
    bit as u8
}

/// XOR all bits from the current position to the end of `buf` with the LFSR
/// sequence seeded by `lfsr_init`. The position is left unchanged.
pub fn tetra_scramb_bits(mut lfsr_init: u32, buf: &mut BitBuffer) {
    let num_bits = buf.get_len_remaining() as isize;
    for _ in 0..num_bits {
        let bit = next_lfsr_bit(&mut lfsr_init);
        buf.xor_bit(bit);
    }
    buf.seek_rel(-num_bits);
}

/// Cell scrambling code from the colour code and network identity, Clause 23.2.1.
/// The 30-bit extended colour code is shifted up and the two fixed lowest bits set.
pub fn tetra_scramb_get_init(mcc: u16, mnc: u16, colour: u8) -> u32 {
    let colour = (colour as u32) & 0x3f;
    let mnc = (mnc as u32) & 0x3fff;
    let mcc = (mcc as u32) & 0x3ff;
    ((colour | (mnc << 6) | (mcc << 20)) << 2) | SCRAMB_INIT
}
