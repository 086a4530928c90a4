//! Checked UTF-8 decoding, encoding and validation.
//!
//! Every function here validates its input and reports the first problem as
//! an [`Error`]. Decoding functions take the buffer as a slice and the
//! current position as `&mut usize`; the slice length is the exclusive end
//! bound. On failure the position is left exactly where it was, so a caller
//! can inspect the offending byte, substitute something, and carry on.
//!
//! ## UTF-8 Encoding Rules
//!
//! UTF-8 is a variable-width encoding that uses 1-4 bytes per character:
//!
//! | Bytes | First byte    | Continuation bytes | Code point range     |
//! |-------|---------------|-------------------|----------------------|
//! | 1     | `0xxxxxxx`    | -                 | U+0000 - U+007F      |
//! | 2     | `110xxxxx`    | `10xxxxxx`        | U+0080 - U+07FF      |
//! | 3     | `1110xxxx`    | `10xxxxxx` × 2    | U+0800 - U+FFFF      |
//! | 4     | `11110xxx`    | `10xxxxxx` × 3    | U+10000 - U+10FFFF   |
//!
//! ## Validation Checks
//!
//! The decoder checks, in this order:
//! 1. **Invalid lead bytes**: 0x80-0xBF or 0xF8-0xFF where a lead byte is expected
//! 2. **Truncated sequences**: multi-byte sequence cut off at the end of input
//! 3. **Invalid continuation bytes**: non-continuation byte inside a sequence
//! 4. **Invalid code points**: surrogates (U+D800-U+DFFF) and values above U+10FFFF
//! 5. **Overlong encodings**: more bytes than necessary (security vulnerability)

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::classify::{
    encoded_length, is_code_point_valid, is_continuation_byte, is_overlong_sequence,
    sequence_length, Octet,
};
use crate::error::{Error, ErrorKind, Result};

/// The UTF-8 byte order mark.
pub const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Location of the first invalid sequence in a buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[error("{kind} at byte {offset}, line {line}, column {column}")]
pub struct Utf8Error {
    /// The byte offset of the start of the invalid sequence (0-indexed).
    pub offset: usize,
    /// The line number where the error occurred (1-indexed).
    pub line: usize,
    /// The column (byte position within the line, 1-indexed).
    pub column: usize,
    /// The kind of UTF-8 error.
    pub kind: ErrorKind,
}

/// Decode one code point starting at `*pos`.
///
/// On success `*pos` moves past the consumed bytes. On failure `*pos` is
/// unchanged and the error says why:
///
/// - [`Error::InvalidLead`] the byte at `*pos` cannot start a sequence
/// - [`Error::NotEnoughRoom`] the input ends before the sequence does
/// - [`Error::IncompleteSequence`] a continuation byte is missing
/// - [`Error::InvalidCodePoint`] the sequence decodes to a surrogate or to a
///   value above U+10FFFF
/// - [`Error::OverlongSequence`] the value has a shorter encoding
///
/// # Examples
///
/// ```
/// use utfcodec::text::utf8::decode_next;
/// use utfcodec::Error;
///
/// let bytes = "a€".as_bytes();
/// let mut pos = 0;
/// assert_eq!(decode_next(bytes, &mut pos), Ok('a' as u32));
/// assert_eq!(decode_next(bytes, &mut pos), Ok(0x20AC));
/// assert_eq!(pos, bytes.len());
///
/// // Overlong NUL: rejected, position untouched
/// let mut pos = 0;
/// assert_eq!(decode_next(&[0xC0, 0x80], &mut pos), Err(Error::OverlongSequence(0)));
/// assert_eq!(pos, 0);
/// ```
pub fn decode_next<T: Octet>(input: &[T], pos: &mut usize) -> Result<u32> {
    let start = *pos;
    let Some(&lead) = input.get(start) else {
        return Err(Error::NotEnoughRoom);
    };
    let lead = lead.mask8();

    let length = sequence_length(lead);
    let mut cp = match length {
        0 => return Err(Error::InvalidLead(lead)),
        1 => return advance_by(pos, start, lead as u32, 1),
        2 => (lead & 0x1F) as u32,
        3 => (lead & 0x0F) as u32,
        _ => (lead & 0x07) as u32,
    };

    for offset in 1..length {
        let Some(&unit) = input.get(start + offset) else {
            return Err(Error::NotEnoughRoom);
        };
        if !is_continuation_byte(unit) {
            return Err(Error::IncompleteSequence(lead));
        }
        cp = (cp << 6) | (unit.mask8() & 0x3F) as u32;
    }

    if !is_code_point_valid(cp) {
        return Err(Error::InvalidCodePoint(cp));
    }
    if is_overlong_sequence(cp, length) {
        return Err(Error::OverlongSequence(cp));
    }

    advance_by(pos, start, cp, length)
}

#[inline(always)]
fn advance_by(pos: &mut usize, start: usize, cp: u32, length: usize) -> Result<u32> {
    *pos = start + length;
    Ok(cp)
}

/// Decode the code point at `pos` without moving.
pub fn peek_next<T: Octet>(input: &[T], mut pos: usize) -> Result<u32> {
    decode_next(input, &mut pos)
}

/// Decode the code point that ends just before `*pos`.
///
/// Walks backward over continuation bytes to the lead byte, then decodes
/// forward from there, bounded by the original position. On success `*pos`
/// is the lead byte's index.
///
/// Fails with [`Error::NotEnoughRoom`] when `*pos` is 0 and with
/// [`Error::InvalidLead`] when only continuation bytes precede `*pos`. Any
/// decode failure also leaves `*pos` unchanged.
///
/// # Examples
///
/// ```
/// use utfcodec::text::utf8::decode_prior;
///
/// let bytes = "añ".as_bytes();
/// let mut pos = bytes.len();
/// assert_eq!(decode_prior(bytes, &mut pos), Ok(0xF1));
/// assert_eq!(pos, 1);
/// assert_eq!(decode_prior(bytes, &mut pos), Ok('a' as u32));
/// assert_eq!(pos, 0);
/// assert!(decode_prior(bytes, &mut pos).is_err());
/// ```
pub fn decode_prior<T: Octet>(input: &[T], pos: &mut usize) -> Result<u32> {
    let end = *pos;
    if end == 0 {
        return Err(Error::NotEnoughRoom);
    }
    if end > input.len() {
        return Err(Error::OutOfRange {
            pos: end,
            start: 0,
            end: input.len(),
        });
    }

    let mut lead = end - 1;
    while is_continuation_byte(input[lead]) {
        if lead == 0 {
            return Err(Error::InvalidLead(input[lead].mask8()));
        }
        lead -= 1;
    }

    let cp = peek_next(&input[..end], lead)?;
    *pos = lead;
    Ok(cp)
}

/// Decode a single code point from the front of `input`.
///
/// Returns the code point and the number of bytes it occupied.
///
/// # Examples
///
/// ```
/// use utfcodec::text::utf8::decode_code_point;
///
/// // ASCII
/// assert_eq!(decode_code_point(b"A"), Ok(('A' as u32, 1)));
///
/// // Multi-byte
/// assert_eq!(decode_code_point("日".as_bytes()), Ok((0x65E5, 3)));
///
/// // Empty input
/// assert!(decode_code_point(b"").is_err());
/// ```
pub fn decode_code_point<T: Octet>(input: &[T]) -> Result<(u32, usize)> {
    let mut pos = 0;
    let cp = decode_next(input, &mut pos)?;
    Ok((cp, pos))
}

/// Encode a Unicode code point as UTF-8.
///
/// Returns the UTF-8 bytes and the number of bytes used, always the
/// shortest form.
///
/// # Examples
///
/// ```
/// use utfcodec::text::utf8::encode_code_point;
///
/// // ASCII
/// let (bytes, len) = encode_code_point(0x41).unwrap();
/// assert_eq!(&bytes[..len], b"A");
///
/// // 2-byte character (é)
/// let (bytes, len) = encode_code_point(0xE9).unwrap();
/// assert_eq!(&bytes[..len], "é".as_bytes());
///
/// // 4-byte character (🎉)
/// let (bytes, len) = encode_code_point(0x1F389).unwrap();
/// assert_eq!(&bytes[..len], "🎉".as_bytes());
///
/// // Invalid: surrogate
/// assert!(encode_code_point(0xD800).is_err());
///
/// // Invalid: out of range
/// assert!(encode_code_point(0x110000).is_err());
/// ```
pub fn encode_code_point(cp: u32) -> Result<([u8; 4], usize)> {
    if !is_code_point_valid(cp) {
        return Err(Error::InvalidCodePoint(cp));
    }
    Ok(encode_raw(cp))
}

/// Bit layout shared by the checked and unchecked encoders.
#[inline(always)]
pub(crate) fn encode_raw(cp: u32) -> ([u8; 4], usize) {
    let mut buf = [0u8; 4];

    let len = encoded_length(cp);
    match len {
        1 => {
            buf[0] = cp as u8;
        }
        2 => {
            buf[0] = 0xC0 | ((cp >> 6) as u8);
            buf[1] = 0x80 | ((cp & 0x3F) as u8);
        }
        3 => {
            buf[0] = 0xE0 | ((cp >> 12) as u8);
            buf[1] = 0x80 | (((cp >> 6) & 0x3F) as u8);
            buf[2] = 0x80 | ((cp & 0x3F) as u8);
        }
        _ => {
            buf[0] = 0xF0 | ((cp >> 18) as u8);
            buf[1] = 0x80 | (((cp >> 12) & 0x3F) as u8);
            buf[2] = 0x80 | (((cp >> 6) & 0x3F) as u8);
            buf[3] = 0x80 | ((cp & 0x3F) as u8);
        }
    }

    (buf, len)
}

/// Append the UTF-8 encoding of `cp` to `out`.
///
/// Returns the number of bytes written. An invalid code point fails with
/// [`Error::InvalidCodePoint`] and writes nothing.
///
/// # Examples
///
/// ```
/// use utfcodec::text::utf8::append;
///
/// let mut out = Vec::new();
/// assert_eq!(append(0x20AC, &mut out), Ok(3));
/// assert_eq!(out, "€".as_bytes());
///
/// assert!(append(0xDFFF, &mut out).is_err());
/// assert_eq!(out.len(), 3);
/// ```
pub fn append<E: Extend<u8>>(cp: u32, out: &mut E) -> Result<usize> {
    let (buf, len) = encode_code_point(cp)?;
    out.extend(buf[..len].iter().copied());
    Ok(len)
}

/// Index of the first byte that does not start a valid sequence, or
/// `input.len()` if the whole buffer is valid.
pub fn find_invalid<T: Octet>(input: &[T]) -> usize {
    let mut pos = 0;
    while pos < input.len() {
        if decode_next(input, &mut pos).is_err() {
            return pos;
        }
    }
    pos
}

/// True iff the whole buffer is valid UTF-8.
///
/// # Examples
///
/// ```
/// use utfcodec::text::utf8::is_valid;
///
/// assert!(is_valid("日本語".as_bytes()));
/// assert!(!is_valid(&[0x48, 0x65, 0xFF]));
/// ```
#[inline]
pub fn is_valid<T: Octet>(input: &[T]) -> bool {
    find_invalid(input) == input.len()
}

/// True if the buffer starts with the UTF-8 byte order mark `EF BB BF`.
pub fn starts_with_bom<T: Octet>(input: &[T]) -> bool {
    input.len() >= BOM.len() && input.iter().zip(BOM).all(|(&unit, b)| unit.mask8() == b)
}

/// Validate that the input is valid UTF-8.
///
/// Returns `Ok(())` if the input is valid UTF-8, or an `Err(Utf8Error)`
/// locating the first invalid sequence by byte offset, line and column.
///
/// # Examples
///
/// ```
/// use utfcodec::text::utf8::validate_utf8;
/// use utfcodec::ErrorKind;
///
/// assert!(validate_utf8(b"Hello, world!").is_ok());
///
/// let err = validate_utf8(b"ok\nbad \x80").unwrap_err();
/// assert_eq!(err.kind, ErrorKind::InvalidLead);
/// assert_eq!((err.offset, err.line, err.column), (7, 2, 5));
/// ```
pub fn validate_utf8<T: Octet>(input: &[T]) -> core::result::Result<(), Utf8Error> {
    let mut pos = 0;
    while pos < input.len() {
        if let Err(err) = decode_next(input, &mut pos) {
            let (line, column) = line_and_column(input, pos);
            return Err(Utf8Error {
                offset: pos,
                line,
                column,
                kind: err.kind(),
            });
        }
    }
    Ok(())
}

/// 1-indexed line and byte column of `offset`.
fn line_and_column<T: Octet>(input: &[T], offset: usize) -> (usize, usize) {
    let before = &input[..offset];
    let line = 1 + before.iter().filter(|&&unit| unit.mask8() == b'\n').count();
    let line_start = before
        .iter()
        .rposition(|&unit| unit.mask8() == b'\n')
        .map_or(0, |i| i + 1);
    (line, offset - line_start + 1)
}

/// Step `*pos` forward over `n` code points.
///
/// Stops at the first failing step; `*pos` then sits on the sequence that
/// failed.
pub fn advance<T: Octet>(input: &[T], pos: &mut usize, n: usize) -> Result<()> {
    for _ in 0..n {
        decode_next(input, pos)?;
    }
    Ok(())
}

/// Count the code points in `input`.
///
/// # Examples
///
/// ```
/// use utfcodec::text::utf8::distance;
///
/// assert_eq!(distance("añ日🎉".as_bytes()), Ok(4));
/// ```
pub fn distance<T: Octet>(input: &[T]) -> Result<usize> {
    let mut pos = 0;
    let mut count = 0;
    while pos < input.len() {
        decode_next(input, &mut pos)?;
        count += 1;
    }
    Ok(count)
}
