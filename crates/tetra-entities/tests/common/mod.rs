#![allow(dead_code)]

pub mod component_test;
pub mod sink;

pub use component_test::ComponentTest;

use tetra_core::BitBuffer;

/// Bit string of `buf` from its window start, padded with zeroes to `len` bits
pub fn padded_bitstr(buf: &BitBuffer, len: usize) -> String {
    let mut s = buf.to_bitstr();
    assert!(s.len() <= len, "{} bits do not fit {}", s.len(), len);
    s.push_str(&"0".repeat(len - s.len()));
    s
}
