/// (K, a) block interleaving, Clause 8.2.4.1
/// Bit i (1-based) of the type3 block lands at position 1 + (a * i mod K) of the type4 block.
pub const fn block_interl_func(k: u32, a: u32, i: u32) -> u32 {
    1 + ((a.wrapping_mul(i)) % k)
}

pub fn block_interleave(k: usize, a: usize, input: &[u8], output: &mut [u8]) {
    assert!(input.len() >= k && output.len() >= k);
    for i in 1..=k {
        let j = block_interl_func(k as u32, a as u32, i as u32) as usize;
        output[j - 1] = input[i - 1];
    }
}

pub fn block_deinterleave(k: usize, a: usize, input: &[u8], output: &mut [u8]) {
    assert!(input.len() >= k && output.len() >= k);
    for i in 1..=k {
        let j = block_interl_func(k as u32, a as u32, i as u32) as usize;
        output[i - 1] = input[j - 1];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_interleave_roundtrip() {
        // All (K, a) pairs used on the downlink: BSCH, SCH/HD+STCH+BNCH, SCH/F
        for (k, a) in [(120, 11), (216, 101), (432, 103)] {
            // LCG bits, periodic patterns can map onto themselves
            let mut x: u32 = 0x1234_5678;
            let data: Vec<u8> = (0..k)
                .map(|_| {
                    x = x.wrapping_mul(1_103_515_245).wrapping_add(12345);
                    ((x >> 16) & 1) as u8
                })
                .collect();
            let mut tmp = vec![0u8; k];
            let mut out = vec![0u8; k];

            block_interleave(k, a, &data, &mut tmp);
            assert_ne!(data, tmp);
            block_deinterleave(k, a, &tmp, &mut out);
            assert_eq!(data, out);
        }
    }

    #[test]
    fn test_permutation_indices() {
        // K=10, a=3: i=1 goes to position 4, i=10 goes to position 1
        let data: Vec<u8> = (1..=10).collect();
        let mut out = vec![0u8; 10];
        block_interleave(10, 3, &data, &mut out);
        assert_eq!(out[3], 1);
        assert_eq!(out[0], 10);
    }
}
