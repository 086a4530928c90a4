//! Checked whole-buffer conversion between UTF-8, UTF-16 and UTF-32.
//!
//! Each converter reads the whole input, appends to `out`, and stops at the
//! first invalid element. Whatever was converted before the failure stays
//! in `out`.

use log::trace;

use super::classify::{
    is_lead_surrogate, is_trail_surrogate, Octet, Utf16Unit, LEAD_OFFSET, SURROGATE_OFFSET,
    TRAIL_SURROGATE_MIN,
};
use super::utf8::{append, decode_next};
use crate::error::{Error, Result};

/// Split a code point into one or two UTF-16 code units.
#[inline(always)]
pub(crate) fn encode_utf16_raw(cp: u32) -> ([u16; 2], usize) {
    if cp > 0xFFFF {
        (
            [
                ((cp >> 10) + LEAD_OFFSET) as u16,
                ((cp & 0x3FF) + TRAIL_SURROGATE_MIN as u32) as u16,
            ],
            2,
        )
    } else {
        ([cp as u16, 0], 1)
    }
}

/// Combine a lead and trail surrogate.
#[inline(always)]
pub(crate) fn combine_surrogates(lead: u16, trail: u16) -> u32 {
    ((lead as u32) << 10)
        .wrapping_add(trail as u32)
        .wrapping_add(SURROGATE_OFFSET)
}

/// Convert UTF-16 to UTF-8.
///
/// Fails with [`Error::InvalidUtf16`] on a lead surrogate that is not
/// followed by a trail surrogate (carrying the unit that should have been
/// the trail, or the lead itself at end of input) and on a lone trail
/// surrogate.
///
/// # Examples
///
/// ```
/// use utfcodec::text::transcode::utf16_to_utf8;
/// use utfcodec::Error;
///
/// let units: Vec<u16> = "a🎉".encode_utf16().collect();
/// let mut out = Vec::new();
/// utf16_to_utf8(&units, &mut out).unwrap();
/// assert_eq!(out, "a🎉".as_bytes());
///
/// let mut out = Vec::new();
/// assert_eq!(utf16_to_utf8(&[0xDC00u16], &mut out), Err(Error::InvalidUtf16(0xDC00)));
/// ```
pub fn utf16_to_utf8<T: Utf16Unit, E: Extend<u8>>(input: &[T], out: &mut E) -> Result<()> {
    let mut units = input.iter().map(|&unit| unit.mask16());
    while let Some(unit) = units.next() {
        let cp = if is_lead_surrogate(unit as u32) {
            match units.next() {
                Some(trail) if is_trail_surrogate(trail as u32) => combine_surrogates(unit, trail),
                Some(other) => return Err(reject_utf16(other)),
                None => return Err(reject_utf16(unit)),
            }
        } else if is_trail_surrogate(unit as u32) {
            return Err(reject_utf16(unit));
        } else {
            unit as u32
        };
        append(cp, out)?;
    }
    Ok(())
}

fn reject_utf16(unit: u16) -> Error {
    trace!("rejecting UTF-16 code unit 0x{:04X}", unit);
    Error::InvalidUtf16(unit)
}

/// Convert UTF-8 to UTF-16.
///
/// Code points above U+FFFF become surrogate pairs. Fails with the first
/// decode error.
pub fn utf8_to_utf16<T: Octet, E: Extend<u16>>(input: &[T], out: &mut E) -> Result<()> {
    let mut pos = 0;
    while pos < input.len() {
        let cp = decode_next(input, &mut pos).inspect_err(|err| {
            trace!("UTF-8 to UTF-16 stopped at byte {}: {}", pos, err);
        })?;
        let (units, len) = encode_utf16_raw(cp);
        out.extend(units[..len].iter().copied());
    }
    Ok(())
}

/// Convert UTF-32 to UTF-8.
///
/// Fails with [`Error::InvalidCodePoint`] on a surrogate or a value above
/// U+10FFFF.
pub fn utf32_to_utf8<E: Extend<u8>>(input: &[u32], out: &mut E) -> Result<()> {
    for &cp in input {
        append(cp, out).inspect_err(|err| trace!("UTF-32 to UTF-8 stopped: {}", err))?;
    }
    Ok(())
}

/// Convert UTF-8 to UTF-32.
pub fn utf8_to_utf32<T: Octet, E: Extend<u32>>(input: &[T], out: &mut E) -> Result<()> {
    let mut pos = 0;
    while pos < input.len() {
        let cp = decode_next(input, &mut pos).inspect_err(|err| {
            trace!("UTF-8 to UTF-32 stopped at byte {}: {}", pos, err);
        })?;
        out.extend(core::iter::once(cp));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const SAMPLES: &[&str] = &["", "ascii only", "café", "日本語", "🎉🚀🌍", "a€𝄞ñ\u{10FFFF}"];

    // =========================================================================
    // UTF-16
    // =========================================================================

    mod utf16 {
        use super::*;

        #[test]
        fn matches_std_both_ways() {
            for s in SAMPLES {
                let units: Vec<u16> = s.encode_utf16().collect();

                let mut utf16 = Vec::new();
                utf8_to_utf16(s.as_bytes(), &mut utf16).unwrap();
                assert_eq!(utf16, units, "{}", s);

                let mut utf8 = Vec::new();
                utf16_to_utf8(&units, &mut utf8).unwrap();
                assert_eq!(utf8, s.as_bytes(), "{}", s);
            }
        }

        #[test]
        fn surrogate_pair_formula() {
            assert_eq!(combine_surrogates(0xD800, 0xDC00), 0x10000);
            assert_eq!(combine_surrogates(0xDBFF, 0xDFFF), 0x10FFFF);
            assert_eq!(encode_utf16_raw(0x1F389), ([0xD83C, 0xDF89], 2));
            assert_eq!(encode_utf16_raw(0xFFFF), ([0xFFFF, 0], 1));
        }

        #[test]
        fn lone_trail_surrogate() {
            let mut out = Vec::new();
            assert_eq!(
                utf16_to_utf8(&[0x61u16, 0xDC00, 0x62], &mut out),
                Err(Error::InvalidUtf16(0xDC00))
            );
            assert_eq!(out, b"a");
        }

        #[test]
        fn lead_surrogate_at_end() {
            let mut out = Vec::new();
            assert_eq!(
                utf16_to_utf8(&[0xD83Cu16], &mut out),
                Err(Error::InvalidUtf16(0xD83C))
            );
        }

        #[test]
        fn lead_followed_by_non_trail() {
            let mut out = Vec::new();
            assert_eq!(
                utf16_to_utf8(&[0xD83Cu16, 0x0041], &mut out),
                Err(Error::InvalidUtf16(0x0041))
            );
            assert_eq!(
                utf16_to_utf8(&[0xD83Cu16, 0xD83C], &mut out),
                Err(Error::InvalidUtf16(0xD83C))
            );
        }

        #[test]
        fn wide_and_signed_units() {
            let wide: Vec<u32> = "a🎉".encode_utf16().map(u32::from).collect();
            let mut out = Vec::new();
            utf16_to_utf8(&wide, &mut out).unwrap();
            assert_eq!(out, "a🎉".as_bytes());

            let signed: Vec<i16> = "a🎉".encode_utf16().map(|u| u as i16).collect();
            out.clear();
            utf16_to_utf8(&signed, &mut out).unwrap();
            assert_eq!(out, "a🎉".as_bytes());
        }

        #[test]
        fn invalid_utf8_input() {
            let mut out: Vec<u16> = Vec::new();
            assert_eq!(
                utf8_to_utf16(&[b'a', 0xED, 0xA0, 0x80], &mut out),
                Err(Error::InvalidCodePoint(0xD800))
            );
            assert_eq!(out, [0x61]);
        }
    }

    // =========================================================================
    // UTF-32
    // =========================================================================

    mod utf32 {
        use super::*;

        #[test]
        fn matches_std_both_ways() {
            for s in SAMPLES {
                let cps: Vec<u32> = s.chars().map(u32::from).collect();

                let mut utf32 = Vec::new();
                utf8_to_utf32(s.as_bytes(), &mut utf32).unwrap();
                assert_eq!(utf32, cps, "{}", s);

                let mut utf8 = Vec::new();
                utf32_to_utf8(&cps, &mut utf8).unwrap();
                assert_eq!(utf8, s.as_bytes(), "{}", s);
            }
        }

        #[test]
        fn invalid_code_points() {
            let mut out = Vec::new();
            assert_eq!(
                utf32_to_utf8(&[0x41, 0xD800], &mut out),
                Err(Error::InvalidCodePoint(0xD800))
            );
            assert_eq!(out, b"A");
            assert_eq!(
                utf32_to_utf8(&[0x110000], &mut out),
                Err(Error::InvalidCodePoint(0x110000))
            );
        }

        #[test]
        fn truncated_utf8_input() {
            let mut out: Vec<u32> = Vec::new();
            assert_eq!(
                utf8_to_utf32(&[b'a', 0xF0, 0x9F], &mut out),
                Err(Error::NotEnoughRoom)
            );
            assert_eq!(out, [0x61]);
        }
    }
}
