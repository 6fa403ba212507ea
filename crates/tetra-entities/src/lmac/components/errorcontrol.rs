use tetra_core::BitBuffer;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

use crate::lmac::components::convenc::{self, ConvEncState};
use crate::lmac::components::errorcontrol_params::{self, ErrorControlParams};
use crate::lmac::components::{crc16, interleaver, rm3014, scrambler, viterbi};

/// Number of zero tail bits terminating the convolutional code
const TAIL_BITS: usize = 4;

/// Decodes a control plane block from type5 to type1 bits, Clause 8.3.1
/// Returns (buf, bool):
/// buf holds the type1 bits, or is None if the channel or block size has no decoding parameters
/// bool is true if the CRC check was successful
pub fn decode_cp(lchan: LogicalChannel, block: BitBuffer, scrambling_code: u32) -> (Option<BitBuffer>, bool) {
    let Some(params) = errorcontrol_params::get_params(lchan).filter(|p| p.have_crc16) else {
        tracing::warn!("decode_cp: {} is not a CRC protected control channel", lchan);
        return (None, false);
    };
    if block.get_len() != params.type345_bits {
        tracing::warn!("decode_cp: {} block has {} bits, expected {}", lchan, block.get_len(), params.type345_bits);
        return (None, false);
    }

    let mut type5 = block;
    type5.seek(0);
    tracing::trace!("decode_cp {} type5: {}", lchan, type5.dump_bin());

    // Unscrambling, type5 -> type4
    scrambler::tetra_scramb_bits(scrambling_code, &mut type5);
    let type4 = type5;

    // De-interleaving, type4 -> type3
    let mut type3_arr = vec![0u8; params.type345_bits];
    interleaver::block_deinterleave(params.type345_bits, params.interleave_a, type4.as_bits(), &mut type3_arr);
    tracing::trace!("decode_cp {} type3: {}", lchan, BitBuffer::from_bitarr(&type3_arr).dump_bin());

    // De-puncturing, type3 -> mother code with erasures
    let mut type3dp_arr = vec![convenc::ERASURE; params.type2_bits * 4];
    convenc::depuncture_2_3(&type3_arr, params.type345_bits, &mut type3dp_arr);

    // Viterbi, mother code -> type2
    let type2_arr = viterbi::decode_mother_code(&type3dp_arr, params.type2_bits);
    tracing::trace!("decode_cp {} type2: {}", lchan, BitBuffer::from_bitarr(&type2_arr).dump_bin());

    // CRC check, type2 -> type1
    let crc_ok = crc16::check_crc16_ccitt(&type2_arr, params.type1_bits + 16);
    let type1 = BitBuffer::from_bitarr(&type2_arr[..params.type1_bits]);

    (Some(type1), crc_ok)
}

/// Encodes a control plane block from type1 to type5 bits.
/// The downlink decoder never transmits; this builds coded blocks for test vectors and replay.
pub fn encode_cp(lchan: LogicalChannel, type1: &BitBuffer, scrambling_code: u32) -> Option<BitBuffer> {
    let params: &ErrorControlParams = errorcontrol_params::get_params(lchan).filter(|p| p.have_crc16)?;
    if type1.get_len() != params.type1_bits {
        tracing::warn!("encode_cp: {} block has {} bits, expected {}", lchan, type1.get_len(), params.type1_bits);
        return None;
    }

    // CRC and tail addition, type1 -> type2
    let mut type2_arr = Vec::with_capacity(params.type2_bits);
    type2_arr.extend_from_slice(type1.as_bits());
    let crc = !crc16::crc16_ccitt_bits(&type2_arr, params.type1_bits);
    type2_arr.extend((0..16).map(|i| ((crc >> (15 - i)) & 1) as u8));
    type2_arr.extend(std::iter::repeat_n(0, TAIL_BITS));

    // Mother code, type2 -> type3dp
    let mut type3dp_arr = vec![0u8; params.type2_bits * 4];
    ConvEncState::new().encode(&type2_arr, &mut type3dp_arr);

    // Puncturing, type3dp -> type3
    let mut type3_arr = vec![0u8; params.type345_bits];
    convenc::puncture_2_3(&type3dp_arr, &mut type3_arr);

    // Interleaving, type3 -> type4
    let mut type4_arr = vec![0u8; params.type345_bits];
    interleaver::block_interleave(params.type345_bits, params.interleave_a, &type3_arr, &mut type4_arr);

    // Scrambling, type4 -> type5
    let mut type5 = BitBuffer::from_bitarr(&type4_arr);
    scrambler::tetra_scramb_bits(scrambling_code, &mut type5);
    tracing::trace!("encode_cp {} type5: {}", lchan, type5.dump_bin());
    Some(type5)
}

/// Decodes the 30-bit AACH from type5 to its 14 type1 bits.
/// Without `single_error_correction` the information bits are taken as received.
pub fn decode_aach(buf: BitBuffer, scrambling_code: u32, single_error_correction: bool) -> Option<BitBuffer> {
    let mut type5 = buf;
    type5.seek(0);
    if type5.get_len() != errorcontrol_params::AACH_PARAMS.type345_bits {
        tracing::warn!("decode_aach: block has {} bits, expected 30", type5.get_len());
        return None;
    }

    scrambler::tetra_scramb_bits(scrambling_code, &mut type5);
    let mut type2 = type5;
    tracing::trace!("decode_aach type2: {}", type2.dump_bin());

    let codeword = type2.read_bits(30)? as u32;
    let info = if single_error_correction {
        rm3014::tetra_rm3014_decode_limited_ecc(codeword)
    } else {
        rm3014::tetra_rm3014_decode_naive(codeword)
    };

    let mut type1 = BitBuffer::new(14);
    type1.write_bits(info as u64, 14);
    type1.seek(0);
    Some(type1)
}

/// Encodes 14 AACH information bits to a type5 block
pub fn encode_aach(type1: &BitBuffer, scrambling_code: u32) -> Option<BitBuffer> {
    let info = type1.peek_bits_startoffset(0, 14)? as u16;
    let mut type5 = BitBuffer::new(30);
    type5.write_bits(rm3014::tetra_rm3014_compute(info) as u64, 30);
    type5.seek(0);
    scrambler::tetra_scramb_bits(scrambling_code, &mut type5);
    Some(type5)
}
