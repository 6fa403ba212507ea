use super::convenc::ERASURE;

/// Soft input of the decoder: -1 for "0", +1 for "1", 0 for an erased (punctured) bit
pub type SoftBit = i8;

/// Accumulated path metric. Block lengths stay far below the i16 range, no renormalization needed.
type Metric = i16;

/// Constraint length of the mother code
const K: usize = 5;

/// Outputs per input bit of the mother code
const N: usize = 4;

const NUM_STATES: usize = 1 << (K - 1);

/// One decision bit per state and trellis step
type DecisionBitmap = u16;

/// Generator polynomials of the rate 1/4 mother code, Clause 8.2.3.1.1
const GENERATORS: [[bool; K]; N] = [
    [true, true, false, false, true],
    [true, false, true, true, true],
    [true, true, true, false, true],
    [true, true, false, true, true],
];

/// Hard decision Viterbi decoder for the 16-state rate 1/4 mother code.
pub struct TetraViterbiDecoder {
    /// Encoder output per generator and state, for input "0", as soft bits.
    /// Every generator taps the input, so the outputs for "1" are the negation.
    expected_0: [[SoftBit; NUM_STATES]; N],
}

impl Default for TetraViterbiDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TetraViterbiDecoder {
    pub fn new() -> Self {
        let expected_0 = std::array::from_fn(|g| {
            let poly = GENERATORS[g];
            std::array::from_fn(|state| {
                // Bit (K-2-i) of the state is the input i+1 steps back
                let parity = (0..K - 1)
                    .filter(|&i| poly[i] && state & (1 << (K - 2 - i)) != 0)
                    .count()
                    % 2;
                if parity == 1 { 1 } else { -1 }
            })
        });
        Self { expected_0 }
    }

    /// Decode `received.len() / 4` bits. The encoder is assumed to start in, and
    /// be terminated to, state 0.
    pub fn decode(&self, received: &[SoftBit]) -> Vec<u8> {
        let num_output_bits = received.len() / N;
        let mut decisions_per_step: Vec<DecisionBitmap> = Vec::with_capacity(num_output_bits);

        let mut metrics: [Metric; NUM_STATES] = [Metric::MAX / 2; NUM_STATES];
        metrics[0] = 0;

        for symbols in received.chunks_exact(N) {
            let mut branch_0: [Metric; NUM_STATES] = [0; NUM_STATES];
            for (&rx, expected) in symbols.iter().zip(self.expected_0.iter()) {
                for (bm, &exp) in branch_0.iter_mut().zip(expected.iter()) {
                    *bm -= (rx * exp) as Metric;
                }
            }

            let mut decisions: DecisionBitmap = 0;
            metrics = std::array::from_fn(|state| {
                let pred_0 = (state * 2) % NUM_STATES;
                let pred_1 = pred_0 + 1;
                let metric_0 = metrics[pred_0] + branch_0[state];
                let metric_1 = metrics[pred_1] - branch_0[state];
                if metric_1 < metric_0 {
                    decisions |= 1 << state;
                    metric_1
                } else {
                    metric_0
                }
            });
            decisions_per_step.push(decisions);
        }

        // Traceback from the terminated state
        let mut state = 0usize;
        let mut decoded: Vec<u8> = Vec::with_capacity(num_output_bits);
        for decisions in decisions_per_step.iter().rev() {
            decoded.push(((state >> (K - 2)) & 1) as u8);
            state = state * 2 % NUM_STATES + ((*decisions >> state) & 1) as usize;
        }
        decoded.reverse();
        decoded
    }
}

/// Decode a depunctured block of `num_bits * 4` mother code bits into `num_bits` type2 bits.
/// Positions holding `ERASURE` carry no information; any other value above 1 is treated as an erasure too.
pub fn decode_mother_code(depunct: &[u8], num_bits: usize) -> Vec<u8> {
    let soft: Vec<SoftBit> = depunct
        .iter()
        .take(num_bits * N)
        .map(|&b| match b {
            0 => -1,
            1 => 1,
            ERASURE => 0,
            other => {
                tracing::trace!("unexpected soft input {}, treated as erasure", other);
                0
            }
        })
        .collect();

    TetraViterbiDecoder::new().decode(&soft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::convenc;

    #[test]
    fn test_decoder_with_erasures() {
        // Random message with 4 zero tail bits
        let message: Vec<u8> = (0..288)
            .map(|_| rand::random_range(0..2))
            .chain(std::iter::repeat_n(0, 4))
            .collect();

        let mut encoder = convenc::ConvEncState::new();
        let mut encoded = vec![0u8; message.len() * 4];
        encoder.encode(&message, &mut encoded);

        // Rate 2/3 of 4 * len mother bits
        let mut punct = vec![0u8; message.len() * 3 / 2];
        convenc::puncture_2_3(&encoded, &mut punct);
        let mut depunct = vec![0u8; encoded.len()];
        convenc::depuncture_2_3(&punct, punct.len(), &mut depunct);

        let decoded = decode_mother_code(&depunct, message.len());
        assert_eq!(decoded, message);
    }

    #[test]
    fn test_decoder_corrects_bit_errors() {
        let message: Vec<u8> = (0..60).map(|i| ((i * 13) % 5 < 2) as u8).chain(std::iter::repeat_n(0, 4)).collect();
        let mut encoder = convenc::ConvEncState::new();
        let mut encoded = vec![0u8; message.len() * 4];
        encoder.encode(&message, &mut encoded);
        encoded[17] ^= 1;
        encoded[101] ^= 1;
        encoded[200] ^= 1;

        assert_eq!(decode_mother_code(&encoded, message.len()), message);
    }
}
