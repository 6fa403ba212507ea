use tetra_core::BitBuffer;

/// Minimum number of bits in a TCH/S block
pub const TCH_S_MIN_BITS: usize = 432;

/// Number of 16-bit words in a packed speech frame
pub const FRAME_WORDS: usize = 690;

/// Number of bytes in a packed speech frame
pub const FRAME_BYTES: usize = FRAME_WORDS * 2;

/// Words per codec block, including the block header
const BLOCK_WORDS: usize = 115;

/// Header word of codec block 0, block `i` carries `FRAME_MAGIC + i`
pub const FRAME_MAGIC: u16 = 0x6b21;

/// Soft values handed to the speech decoder
const SOFT_ONE: u16 = (-127i16) as u16;
const SOFT_ZERO: u16 = 127;

/// (frame word offset, block bit offset, number of bits)
const SEGMENTS: [(usize, usize, usize); 4] = [(1, 0, 114), (116, 114, 114), (231, 228, 114), (346, 342, 90)];

/// Packs the first 432 bits of a TCH/S block into the soft-bit frame layout the codec
/// expects: six 115-word blocks, each starting with a header word. Bits beyond the
/// available data are left zero.
pub fn pack_speech_frame(block: &BitBuffer) -> [u16; FRAME_WORDS] {
    let mut frame = [0u16; FRAME_WORDS];
    for (i, word) in frame.iter_mut().step_by(BLOCK_WORDS).enumerate() {
        *word = FRAME_MAGIC + i as u16;
    }

    // Offsets are relative to the window start, regardless of the read position
    let len = block.get_len();
    for (word_offset, bit_offset, num_bits) in SEGMENTS {
        for i in 0..num_bits {
            let pos = bit_offset + i;
            if pos >= len {
                return frame;
            }
            let Some(bit) = block.peek_bits_startoffset(pos, 1) else {
                return frame;
            };
            frame[word_offset + i] = if bit == 1 { SOFT_ONE } else { SOFT_ZERO };
        }
    }
    frame
}

/// Serializes a packed frame as little-endian 16-bit words
pub fn frame_to_bytes(frame: &[u16; FRAME_WORDS]) -> Vec<u8> {
    frame.iter().flat_map(|w| w.to_le_bytes()).collect()
}
