//! Rate 1/4 mother code encoder and the rate 2/3 puncturing, Clause 8.2.3.1

/// Value of a depunctured position, neither 0 nor 1
pub const ERASURE: u8 = 2;

/// Shift register of the 16-state (K=5) mother code encoder
#[derive(Clone, Copy, Debug, Default)]
pub struct ConvEncState {
    delayed: [u8; 4],
}

impl ConvEncState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode a single input bit into the four mother code outputs g1..g4
    #[inline]
    fn encode_bit(&mut self, bit: u8) -> [u8; 4] {
        let [d0, d1, d2, d3] = self.delayed;

        let g1 = bit ^ d0 ^ d3;
        let g2 = bit ^ d1 ^ d2 ^ d3;
        let g3 = bit ^ d0 ^ d1 ^ d3;
        let g4 = bit ^ d0 ^ d2 ^ d3;

        self.delayed = [bit, d0, d1, d2];
        [g1, g2, g3, g4]
    }

    /// Encode `input` (one bit per byte) into `4 * input.len()` bits in `output`.
    pub fn encode(&mut self, input: &[u8], output: &mut [u8]) {
        assert!(output.len() >= input.len() * 4);
        for (&bit, out) in input.iter().zip(output.chunks_exact_mut(4)) {
            out.copy_from_slice(&self.encode_bit(bit & 1));
        }
    }
}

/// Puncturing pattern: out of every `period` mother bits the positions in `p` are kept,
/// `t` bits per period survive.
struct Puncturer {
    p: [u32; 4],
    t: u32,
    period: u32,
}

/// Rate 2/3, used by all signalling channels
const RATE_2_3: Puncturer = Puncturer { p: [0, 1, 2, 5], t: 3, period: 8 };

impl Puncturer {
    /// 1-based position in the mother code of punctured bit `j` (1-based)
    #[inline]
    fn mother_pos(&self, j: u32) -> usize {
        let blk = (j - 1) / self.t;
        let idx = (j - self.t * blk) as usize;
        (self.period * blk + self.p[idx]) as usize
    }
}

/// Puncture `input` mother code bits into `output`, whose length determines how many are taken
pub fn puncture_2_3(input: &[u8], output: &mut [u8]) {
    for (j, out) in (1..).zip(output.iter_mut()) {
        *out = input[RATE_2_3.mother_pos(j) - 1];
    }
}

/// Reverse `puncture_2_3` for `len` received bits. `output` is first filled with
/// erasures, so punctured positions keep `ERASURE`.
pub fn depuncture_2_3(input: &[u8], len: usize, output: &mut [u8]) {
    output.fill(ERASURE);
    for (j, &bit) in (1..).zip(input.iter().take(len)) {
        output[RATE_2_3.mother_pos(j) - 1] = bit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_impulse_response() {
        let mut enc = ConvEncState::new();
        let mut out = [0u8; 20];
        enc.encode(&[1, 0, 0, 0, 0], &mut out);
        // Generator polynomials read column-wise
        assert_eq!(&out[0..4], &[1, 1, 1, 1]);
        assert_eq!(&out[4..8], &[1, 0, 1, 1]);
        assert_eq!(&out[8..12], &[0, 1, 1, 0]);
        assert_eq!(&out[12..16], &[0, 1, 0, 1]);
        assert_eq!(&out[16..20], &[1, 1, 1, 1]);
    }

    #[test]
    fn test_depuncture_marks_erasures() {
        let mother: Vec<u8> = (0..32).map(|i| (i % 2) as u8).collect();
        let mut punct = vec![0u8; 12];
        puncture_2_3(&mother, &mut punct);

        let mut depunct = vec![0u8; 32];
        depuncture_2_3(&punct, punct.len(), &mut depunct);
        for (i, (&m, &d)) in mother.iter().zip(depunct.iter()).enumerate() {
            // kept positions 1, 2 and 5 of every 8
            if [0, 1, 4].contains(&(i % 8)) {
                assert_eq!(d, m, "position {}", i);
            } else {
                assert_eq!(d, ERASURE, "position {}", i);
            }
        }
    }
}
