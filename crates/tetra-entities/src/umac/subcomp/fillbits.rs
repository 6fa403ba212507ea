use tetra_core::BitBuffer;

/// Number of fill bits at the end of the first `pdu_len_bits` bits of the window:
/// trailing zeroes plus the 1 preceding them. Bits before the current position are never
/// counted. Returns 0 if no 1 bit was found.
pub fn get_num_fill_bits(bitbuf: &BitBuffer, pdu_len_bits: usize, suppress_warning: bool) -> usize {
    let pdu_len_bits = pdu_len_bits.min(bitbuf.get_len());
    let mut index = pdu_len_bits as isize - 1;
    while index >= bitbuf.get_pos() as isize {
        match bitbuf.peek_bits_startoffset(index as usize, 1) {
            Some(0) => index -= 1,
            Some(_) => return pdu_len_bits - index as usize,
            None => break,
        }
    }

    if !suppress_warning {
        tracing::warn!("No fill bits found");
    }
    0
}

/// Shrinks the window of `bitbuf` so that it ends before its fill bits.
/// Returns the number of bits removed.
pub fn strip(bitbuf: &mut BitBuffer) -> usize {
    let num = get_num_fill_bits(bitbuf, bitbuf.get_len(), false);
    if num > 0 {
        let end = bitbuf.get_raw_end();
        bitbuf.set_raw_end(end - num);
    }
    num
}
