use std::fmt;

use crate::pdu_parse_error::PduParseErr;

/// Windowed bit cursor over a byte-per-bit vector.
///
/// Every element of the backing vector holds a single bit; the channel coding stages
/// additionally store the erasure marker `2` in depunctured blocks. Reads and writes
/// operate at `pos`, inside the window `[start, end)`.
#[derive(Clone, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<u8>,
    start: usize,            // bits before this are out of window
    pos: usize,              // next bit offset for read/write (absolute)
    end: usize,              // bits at or after this are out of window
    flag_autoexpand: bool,   // if true, writes past end grow the buffer
}

impl BitBuffer {
    /// Create a zeroed buffer holding exactly `len_bits` bits.
    pub fn new(len_bits: usize) -> Self {
        BitBuffer {
            bits: vec![0; len_bits],
            start: 0,
            pos: 0,
            end: len_bits,
            flag_autoexpand: false,
        }
    }

    /// Create an empty buffer that grows on write. `initial_cap_bits` is only a capacity hint.
    pub fn new_autoexpand(initial_cap_bits: usize) -> Self {
        BitBuffer {
            bits: Vec::with_capacity(initial_cap_bits),
            start: 0,
            pos: 0,
            end: 0,
            flag_autoexpand: true,
        }
    }

    /// Parse a string of '0' and '1' characters. Any other character is skipped,
    /// so vectors may be grouped with spaces or underscores.
    pub fn from_bitstr(bitstr: &str) -> Self {
        let bits: Vec<u8> = bitstr
            .chars()
            .filter_map(|c| match c {
                '0' => Some(0),
                '1' => Some(1),
                _ => None,
            })
            .collect();
        Self::from_bitarr(&bits)
    }

    /// Copy a byte-per-bit array. Values are kept as-is, including erasure markers.
    pub fn from_bitarr(data: &[u8]) -> Self {
        BitBuffer {
            bits: data.to_vec(),
            start: 0,
            pos: 0,
            end: data.len(),
            flag_autoexpand: false,
        }
    }

    /// Unpack packed bytes, most significant bit first.
    pub fn from_bytes_msb(data: &[u8]) -> Self {
        let mut bits = Vec::with_capacity(data.len() * 8);
        for byte in data {
            for i in (0..8).rev() {
                bits.push((byte >> i) & 1);
            }
        }
        Self::from_bitarr(&bits)
    }

    /// Copy of the window of another buffer, position reset to the start.
    pub fn from_bitbuffer(other: &BitBuffer) -> Self {
        Self::from_bitarr(other.as_bits())
    }

    /// Copy of the remaining (unread) part of another buffer.
    pub fn from_bitbuffer_pos(other: &BitBuffer) -> Self {
        Self::from_bitarr(&other.bits[other.pos..other.end])
    }

    /// Copy `len` bits starting at window offset `offset`. Returns None if out of range.
    pub fn slice(&self, offset: usize, len: usize) -> Option<BitBuffer> {
        let s = self.start + offset;
        if s + len > self.end {
            return None;
        }
        Some(Self::from_bitarr(&self.bits[s..s + len]))
    }

    // Reading ////////////////////////////////////////////////

    /// Read `num_bits` (max 64) at pos without advancing.
    pub fn peek_bits(&self, num_bits: usize) -> Option<u64> {
        self.peek_at(self.pos, num_bits)
    }

    /// Peek relative to pos. Offset may be negative, but not before start.
    pub fn peek_bits_posoffset(&self, offset: isize, num_bits: usize) -> Option<u64> {
        let p = self.pos as isize + offset;
        if p < self.start as isize {
            return None;
        }
        self.peek_at(p as usize, num_bits)
    }

    /// Peek relative to window start.
    pub fn peek_bits_startoffset(&self, offset: usize, num_bits: usize) -> Option<u64> {
        self.peek_at(self.start + offset, num_bits)
    }

    /// Read `num_bits` (max 64) and advance pos. Returns None, without advancing,
    /// if fewer bits remain.
    pub fn read_bits(&mut self, num_bits: usize) -> Option<u64> {
        let v = self.peek_at(self.pos, num_bits)?;
        self.pos += num_bits;
        Some(v)
    }

    /// Like `read_bits`, but yields a `PduParseErr::BufferEnded` naming `field` on underrun.
    pub fn read_field(&mut self, num_bits: usize, field: &'static str) -> Result<u64, PduParseErr> {
        self.read_bits(num_bits).ok_or(PduParseErr::BufferEnded { field: Some(field) })
    }

    pub fn read_bit(&mut self) -> Option<u8> {
        if self.pos >= self.end {
            return None;
        }
        let b = self.bits[self.pos];
        self.pos += 1;
        Some(b)
    }

    /// Read a flag bit as bool.
    pub fn read_flag(&mut self, field: &'static str) -> Result<bool, PduParseErr> {
        Ok(self.read_field(1, field)? == 1)
    }

    fn peek_at(&self, p: usize, num_bits: usize) -> Option<u64> {
        assert!(num_bits <= 64, "cannot read more than 64 bits at once");
        if p + num_bits > self.end {
            return None;
        }
        let mut v = 0u64;
        for &b in &self.bits[p..p + num_bits] {
            v = (v << 1) | (b & 1) as u64;
        }
        Some(v)
    }

    // Writing ////////////////////////////////////////////////

    /// Xor the bit at pos with value (0 or 1) and advance.
    pub fn xor_bit(&mut self, value: u8) {
        assert!(self.pos < self.end, "xor_bit would exceed buffer end");
        self.bits[self.pos] ^= value & 1;
        self.pos += 1;
    }

    /// Write a raw element at pos. Values other than 0/1 are allowed for erasure-marked blocks.
    pub fn write_raw(&mut self, value: u8) {
        self.make_room(1);
        self.bits[self.pos] = value;
        self.pos += 1;
    }

    pub fn write_bit(&mut self, value: u8) {
        assert!(value == 0 || value == 1, "write_bit: value must be 0 or 1");
        self.write_raw(value);
    }

    /// Write the low `num_bits` of `value`, most significant first.
    pub fn write_bits(&mut self, value: u64, num_bits: usize) {
        assert!(num_bits <= 64, "cannot write more than 64 bits at once");
        assert!(num_bits == 64 || value >> num_bits == 0, "value exceeds num_bits");
        self.make_room(num_bits);
        for i in (0..num_bits).rev() {
            self.bits[self.pos] = ((value >> i) & 1) as u8;
            self.pos += 1;
        }
    }

    pub fn write_zeroes(&mut self, num_bits: usize) {
        self.make_room(num_bits);
        self.bits[self.pos..self.pos + num_bits].fill(0);
        self.pos += num_bits;
    }

    /// Append the unread part of `src` at pos. `src` is not advanced.
    pub fn append(&mut self, src: &BitBuffer) {
        let n = src.get_len_remaining();
        self.make_room(n);
        self.bits[self.pos..self.pos + n].copy_from_slice(&src.bits[src.pos..src.end]);
        self.pos += n;
    }

    /// Copy `num_bits` from src at its pos into self at pos, advancing both.
    pub fn copy_bits(&mut self, src: &mut BitBuffer, num_bits: usize) {
        assert!(src.get_len_remaining() >= num_bits, "copy_bits: source too short");
        self.make_room(num_bits);
        self.bits[self.pos..self.pos + num_bits].copy_from_slice(&src.bits[src.pos..src.pos + num_bits]);
        self.pos += num_bits;
        src.pos += num_bits;
    }

    fn make_room(&mut self, num_bits: usize) {
        if self.pos + num_bits <= self.end {
            return;
        }
        assert!(self.flag_autoexpand, "write would exceed buffer end");
        let new_end = self.pos + num_bits;
        if new_end > self.bits.len() {
            self.bits.resize(new_end, 0);
        }
        self.end = new_end;
    }

    // Conversion /////////////////////////////////////////////

    /// The window as a byte-per-bit slice.
    pub fn as_bits(&self) -> &[u8] {
        &self.bits[self.start..self.end]
    }

    pub fn to_bitvec(&self) -> Vec<u8> {
        self.as_bits().to_vec()
    }

    /// Pack the window into bytes, most significant bit first. The last byte is zero padded.
    pub fn to_bytes_msb(&self) -> Vec<u8> {
        self.as_bits()
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &b)| acc | ((b & 1) << (7 - i)))
            })
            .collect()
    }

    pub fn to_bitstr(&self) -> String {
        self.as_bits().iter().map(|&b| bit_char(b)).collect()
    }

    // Positioning ////////////////////////////////////////////

    /// Length of the window
    pub fn get_len(&self) -> usize {
        self.end - self.start
    }

    /// Bits between pos and end
    pub fn get_len_remaining(&self) -> usize {
        self.end - self.pos
    }

    /// Bits between start and pos
    pub fn get_len_written(&self) -> usize {
        self.pos - self.start
    }

    /// Position relative to window start
    pub fn get_pos(&self) -> usize {
        self.pos - self.start
    }

    /// Seek relative to window start.
    pub fn seek(&mut self, offset: usize) {
        let p = self.start + offset;
        assert!(p <= self.end, "seek beyond end of window");
        self.pos = p;
    }

    pub fn seek_rel(&mut self, offset: isize) {
        let p = self.pos as isize + offset;
        assert!(p >= self.start as isize && p as usize <= self.end, "seek_rel outside window");
        self.pos = p as usize;
    }

    pub fn get_raw_start(&self) -> usize {
        self.start
    }

    pub fn get_raw_end(&self) -> usize {
        self.end
    }

    pub fn get_raw_pos(&self) -> usize {
        self.pos
    }

    pub fn set_raw_start(&mut self, s: usize) {
        assert!(s <= self.end, "start must not exceed end");
        self.start = s;
        if self.pos < s {
            self.pos = s;
        }
    }

    /// Move the window end. pos is clamped so it never exceeds end.
    pub fn set_raw_end(&mut self, e: usize) {
        assert!(e >= self.start && e <= self.bits.len(), "end outside of buffer");
        self.end = e;
        if self.pos > e {
            self.pos = e;
        }
    }

    pub fn set_raw_pos(&mut self, p: usize) {
        assert!(self.start <= p, "pos must not be before start");
        assert!(p <= self.end, "pos must not exceed end");
        self.pos = p;
    }

    // String representations /////////////////////////////////

    /// Window as space separated lowercase hex bytes, bits packed MSB first.
    pub fn dump_hex(&self) -> String {
        self.to_bytes_msb()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Window as a '0'/'1' string with a '^' marker before pos.
    pub fn dump_bin(&self) -> String {
        let mut s = String::with_capacity(self.get_len() + 1);
        for i in self.start..self.end {
            if i == self.pos {
                s.push('^');
            }
            s.push(bit_char(self.bits[i]));
        }
        if self.pos == self.end {
            s.push('^');
        }
        s
    }
}

fn bit_char(b: u8) -> char {
    match b {
        0 => '0',
        1 => '1',
        _ => 'x',
    }
}

impl fmt::Debug for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitBuffer {{ <{} ^{} >{} {} }}", self.start, self.pos, self.end, self.dump_bin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_byte_read_write() {
        let mut bb = BitBuffer::new(16);
        bb.write_bits(0xAB, 8);
        bb.write_bits(0xCD, 8);
        bb.seek(0);
        assert_eq!(bb.read_bits(8).unwrap(), 0xAB);
        assert_eq!(bb.read_bits(8).unwrap(), 0xCD);
    }

    #[test]
    fn test_read_overflow_does_not_advance() {
        let mut bb = BitBuffer::new(10);
        assert!(bb.read_bits(11).is_none());
        assert_eq!(bb.get_pos(), 0);
        assert_eq!(bb.read_bits(0).unwrap(), 0);
        assert_eq!(
            bb.read_field(12, "foo"),
            Err(PduParseErr::BufferEnded { field: Some("foo") })
        );
    }

    #[test]
    #[should_panic(expected = "write would exceed buffer end")]
    fn test_write_overflow() {
        let mut bb = BitBuffer::new(10);
        bb.write_bits(1, 11);
    }

    #[test]
    #[should_panic(expected = "value exceeds num_bits")]
    fn test_value_above_num_bits() {
        let mut bb = BitBuffer::new(4);
        bb.write_bits(0b11111, 4);
    }

    #[test]
    fn test_write_autoexpand() {
        let mut bb = BitBuffer::new_autoexpand(10);
        bb.write_bits(1, 5);
        assert_eq!(bb.get_pos(), 5);
        assert_eq!(bb.get_raw_end(), 5);
        bb.write_bits(1, 6);
        assert_eq!(bb.get_raw_end(), 11);
        bb.write_bit(1);
        assert_eq!(bb.get_raw_end(), 12);
        assert_eq!(bb.to_bitstr(), "000010000011");
    }

    #[test]
    fn test_windowing_and_peeks() {
        let mut bb = BitBuffer::from_bitstr("1111 0000 1010 0101");
        bb.set_raw_start(4);
        bb.set_raw_end(12);
        assert_eq!(bb.get_len(), 8);
        assert_eq!(bb.peek_bits(4), Some(0b0000));
        assert_eq!(bb.peek_bits_startoffset(4, 4), Some(0b1010));
        bb.seek(6);
        assert_eq!(bb.peek_bits_posoffset(-2, 2), Some(0b10));
        assert_eq!(bb.peek_bits_posoffset(-7, 1), None);
        assert_eq!(bb.read_bits(3), None);
        assert_eq!(bb.read_bits(2), Some(0b10));
        assert_eq!(bb.get_len_remaining(), 0);
    }

    #[test]
    fn test_shrinking_end_clamps_pos() {
        let mut bb = BitBuffer::from_bitstr("101101");
        bb.seek(6);
        bb.set_raw_end(3);
        assert_eq!(bb.get_pos(), 3);
        assert_eq!(bb.to_bitstr(), "101");
    }

    #[test]
    fn test_xor_bit() {
        let mut bb = BitBuffer::from_bitstr("0101");
        for v in [1, 1, 0, 0] {
            bb.xor_bit(v);
        }
        assert_eq!(bb.to_bitstr(), "1001");
    }

    #[test]
    fn test_append_and_from_pos() {
        let mut src = BitBuffer::from_bitstr("110011");
        src.seek(2);
        let mut dst = BitBuffer::new_autoexpand(8);
        dst.write_bits(0b1, 1);
        dst.append(&src);
        assert_eq!(dst.to_bitstr(), "10011");
        assert_eq!(BitBuffer::from_bitbuffer_pos(&src).to_bitstr(), "0011");
        assert_eq!(src.get_pos(), 2);
    }

    #[test]
    fn test_erasures_survive_bitarr() {
        let bb = BitBuffer::from_bitarr(&[1, 2, 0]);
        assert_eq!(bb.as_bits(), &[1, 2, 0]);
        assert_eq!(bb.to_bitstr(), "1x0");
    }

    #[test]
    fn test_hex_and_bytes() {
        let bb = BitBuffer::from_bitstr("0000000111111111101");
        assert_eq!(bb.to_bytes_msb(), vec![0x01, 0xFF, 0xA0]);
        assert_eq!(bb.dump_hex(), "01 ff a0");
        assert_eq!(BitBuffer::from_bytes_msb(&[0xA5]).to_bitstr(), "10100101");
    }

    #[test]
    fn test_slice() {
        let bb = BitBuffer::from_bitstr("0011100");
        assert_eq!(bb.slice(2, 3).unwrap().to_bitstr(), "111");
        assert!(bb.slice(5, 3).is_none());
    }
}
