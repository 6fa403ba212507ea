//! Shortened Reed-Muller RM(30,14) code of the AACH, Clause 8.2.3.2
//!
//! The code is systematic: the upper 14 bits of the 30-bit codeword are the information
//! bits, the lower 16 the parity. Codewords are held MSB first in a u32.

/// Parity part of the generator matrix, one row per information bit
const RM_30_14_PARITY: [[u8; 16]; 14] = [
    [1, 0, 0, 1, 1, 0, 1, 1, 0, 1, 1, 0, 0, 0, 0, 0],
    [0, 0, 1, 0, 1, 1, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0],
    [1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
    [1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0],
    [1, 0, 0, 1, 1, 0, 0, 0, 0, 0, 1, 1, 1, 0, 1, 0],
    [0, 1, 0, 1, 0, 1, 0, 0, 0, 0, 1, 1, 0, 1, 1, 0],
    [0, 0, 1, 0, 1, 1, 0, 0, 0, 0, 1, 0, 1, 1, 1, 0],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 1, 1, 1, 0, 0, 1],
    [0, 1, 0, 0, 0, 0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1],
    [0, 0, 1, 0, 0, 0, 0, 1, 1, 0, 1, 0, 1, 1, 0, 1],
    [0, 0, 0, 1, 0, 0, 1, 0, 0, 1, 1, 1, 0, 0, 1, 1],
    [0, 0, 0, 0, 1, 0, 0, 1, 0, 1, 1, 0, 1, 0, 1, 1],
    [0, 0, 0, 0, 0, 1, 0, 0, 1, 1, 1, 0, 0, 1, 1, 1],
];

/// Parity row `i` packed MSB first
const fn parity_row(i: usize) -> u16 {
    let mut v = 0u16;
    let mut j = 0;
    while j < 16 {
        v = (v << 1) | RM_30_14_PARITY[i][j] as u16;
        j += 1;
    }
    v
}

const fn compute_parity_rows() -> [u16; 14] {
    let mut out = [0u16; 14];
    let mut i = 0;
    while i < 14 {
        out[i] = parity_row(i);
        i += 1;
    }
    out
}

const PARITY_ROWS: [u16; 14] = compute_parity_rows();

/// Syndrome caused by a single error in codeword bit `k` (0 = MSB)
const fn compute_error_syndromes() -> [u16; 30] {
    let mut out = [0u16; 30];
    let mut k = 0;
    while k < 30 {
        out[k] = if k < 14 { PARITY_ROWS[k] } else { 1 << (29 - k) };
        k += 1;
    }
    out
}

const ERROR_SYNDROMES: [u16; 30] = compute_error_syndromes();

fn parity_of(info: u16) -> u16 {
    (0..14)
        .filter(|i| (info >> (13 - i)) & 1 == 1)
        .fold(0u16, |acc, i| acc ^ PARITY_ROWS[i])
}

/// Encode 14 information bits into a 30-bit codeword
pub fn tetra_rm3014_compute(info: u16) -> u32 {
    let info = info & 0x3fff;
    ((info as u32) << 16) | parity_of(info) as u32
}

/// Takes the information bits as they are, without any error correction
pub fn tetra_rm3014_decode_naive(codeword: u32) -> u16 {
    ((codeword >> 16) & 0x3fff) as u16
}

fn syndrome(codeword: u32) -> u16 {
    parity_of(tetra_rm3014_decode_naive(codeword)) ^ (codeword & 0xffff) as u16
}

/// Corrects a single bit error, if the syndrome matches one. Otherwise the information
/// bits are returned as received.
pub fn tetra_rm3014_decode_limited_ecc(codeword: u32) -> u16 {
    let syn = syndrome(codeword);
    if syn == 0 {
        return tetra_rm3014_decode_naive(codeword);
    }
    match ERROR_SYNDROMES.iter().position(|&s| s == syn) {
        Some(k) => tetra_rm3014_decode_naive(codeword ^ (1 << (29 - k))),
        None => tetra_rm3014_decode_naive(codeword),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGES: [u16; 5] = [0, 1, 0x1fff, 0x1234, 0x2a3b];

    #[test]
    fn test_first_generator_row() {
        assert_eq!(tetra_rm3014_compute(0x2000), 0x2000_9b60);
    }

    #[test]
    fn test_encode_decode_no_error() {
        for &msg in &MESSAGES {
            let code = tetra_rm3014_compute(msg);
            assert_eq!(tetra_rm3014_decode_naive(code), msg);
            assert_eq!(tetra_rm3014_decode_limited_ecc(code), msg);
        }
    }

    #[test]
    fn test_single_bit_error_correction() {
        for &msg in &MESSAGES {
            let code = tetra_rm3014_compute(msg);
            for bit in 0..30 {
                let decoded = tetra_rm3014_decode_limited_ecc(code ^ (1 << bit));
                assert_eq!(decoded, msg, "failed to correct bit {}", bit);
            }
        }
    }

    #[test]
    fn test_naive_decoding_keeps_errors() {
        let code = tetra_rm3014_compute(0x1234);
        assert_eq!(tetra_rm3014_decode_naive(code ^ (1 << 20)), 0x1234 ^ (1 << 4));
        assert_eq!(tetra_rm3014_decode_naive(code ^ 1), 0x1234);
    }

    #[test]
    fn test_uncorrectable_errors() {
        let code = tetra_rm3014_compute(0x1234);
        assert_ne!(tetra_rm3014_decode_limited_ecc(code ^ 0xbadd00), 0x1234);
    }
}
