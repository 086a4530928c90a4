//! Unchecked fast path.
//!
//! Mirrors the checked API for input the caller has already validated.
//! Nothing here inspects continuation bytes, code point ranges or
//! surrogate pairing. Malformed input produces unspecified code points and
//! output bytes; reading past the end of the slice panics through normal
//! slice indexing. None of it is memory-unsafe.
//!
//! ```
//! use utfcodec::text::{unchecked, utf8};
//!
//! let text = "validated 日本語 🎉";
//! assert!(utf8::is_valid(text.as_bytes()));
//!
//! let mut units = Vec::new();
//! unchecked::utf8_to_utf16(text.as_bytes(), &mut units);
//! assert_eq!(units, text.encode_utf16().collect::<Vec<_>>());
//! ```

use super::classify::{is_continuation_byte, is_lead_surrogate, sequence_length, Octet, Utf16Unit};
use super::transcode::{combine_surrogates, encode_utf16_raw};
use super::utf8::encode_raw;

/// Append the UTF-8 encoding of `cp` without validating it.
///
/// Returns the number of bytes written.
#[inline]
pub fn append<E: Extend<u8>>(cp: u32, out: &mut E) -> usize {
    let (buf, len) = encode_raw(cp);
    out.extend(buf[..len].iter().copied());
    len
}

/// Decode the code point at `*pos` and move past it.
#[inline]
pub fn next<T: Octet>(input: &[T], pos: &mut usize) -> u32 {
    let lead = input[*pos].mask8();
    let length = sequence_length(lead);
    let mut cp = match length {
        2 => (lead & 0x1F) as u32,
        3 => (lead & 0x0F) as u32,
        4 => (lead & 0x07) as u32,
        _ => lead as u32,
    };
    for offset in 1..length {
        cp = (cp << 6) | (input[*pos + offset].mask8() & 0x3F) as u32;
    }
    *pos += length.max(1);
    cp
}

/// Decode the code point at `pos` without moving.
#[inline]
pub fn peek_next<T: Octet>(input: &[T], mut pos: usize) -> u32 {
    next(input, &mut pos)
}

/// Step back to the previous lead byte and decode from there.
#[inline]
pub fn prior<T: Octet>(input: &[T], pos: &mut usize) -> u32 {
    *pos -= 1;
    while is_continuation_byte(input[*pos]) {
        *pos -= 1;
    }
    peek_next(input, *pos)
}

/// Step `*pos` forward over `n` code points.
pub fn advance<T: Octet>(input: &[T], pos: &mut usize, n: usize) {
    for _ in 0..n {
        next(input, pos);
    }
}

/// Count the code points in `input`.
pub fn distance<T: Octet>(input: &[T]) -> usize {
    let mut pos = 0;
    let mut count = 0;
    while pos < input.len() {
        pos += sequence_length(input[pos]).max(1);
        count += 1;
    }
    count
}

/// Convert UTF-16 to UTF-8.
///
/// A lead surrogate is combined with whatever unit follows it, without
/// checking that it is a trail surrogate.
pub fn utf16_to_utf8<T: Utf16Unit, E: Extend<u8>>(input: &[T], out: &mut E) {
    let mut i = 0;
    while i < input.len() {
        let unit = input[i].mask16();
        i += 1;
        let cp = if is_lead_surrogate(unit as u32) {
            let trail = input[i].mask16();
            i += 1;
            combine_surrogates(unit, trail)
        } else {
            unit as u32
        };
        append(cp, out);
    }
}

/// Convert UTF-8 to UTF-16.
pub fn utf8_to_utf16<T: Octet, E: Extend<u16>>(input: &[T], out: &mut E) {
    let mut pos = 0;
    while pos < input.len() {
        let (units, len) = encode_utf16_raw(next(input, &mut pos));
        out.extend(units[..len].iter().copied());
    }
}

/// Convert UTF-32 to UTF-8.
pub fn utf32_to_utf8<E: Extend<u8>>(input: &[u32], out: &mut E) {
    for &cp in input {
        append(cp, out);
    }
}

/// Convert UTF-8 to UTF-32.
pub fn utf8_to_utf32<T: Octet, E: Extend<u32>>(input: &[T], out: &mut E) {
    let mut pos = 0;
    while pos < input.len() {
        out.extend(core::iter::once(next(input, &mut pos)));
    }
}

/// Unchecked bidirectional UTF-8 iterator.
///
/// Holds only a position into the buffer. Stepping forward skips by the
/// length the lead byte announces without decoding.
#[derive(Debug, Clone, Copy)]
pub struct Utf8Iter<'a, T: Octet = u8> {
    bytes: &'a [T],
    pos: usize,
}

impl<'a, T: Octet> Utf8Iter<'a, T> {
    /// Iterator at `pos`, which must be on a lead byte.
    pub fn new(bytes: &'a [T], pos: usize) -> Self {
        Self { bytes, pos }
    }

    /// Current byte position.
    pub fn base(&self) -> usize {
        self.pos
    }

    /// Decode the code point at the current position.
    pub fn get(&self) -> u32 {
        peek_next(self.bytes, self.pos)
    }

    /// Step forward one code point.
    pub fn move_next(&mut self) {
        self.pos += sequence_length(self.bytes[self.pos]).max(1);
    }

    /// Step backward one code point, returning the one now under the iterator.
    pub fn move_prev(&mut self) -> u32 {
        prior(self.bytes, &mut self.pos)
    }
}

/// Positions only.
impl<T: Octet> PartialEq for Utf8Iter<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl<T: Octet> Eq for Utf8Iter<'_, T> {}

impl<T: Octet> Iterator for Utf8Iter<'_, T> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.pos >= self.bytes.len() {
            return None;
        }
        Some(next(self.bytes, &mut self.pos))
    }
}
