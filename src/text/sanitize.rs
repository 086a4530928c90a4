//! Replacement of malformed UTF-8.
//!
//! [`sanitize`] copies every well-formed sequence through unchanged and
//! writes one replacement code point for each malformed run: a bad lead
//! byte, or a broken sequence together with the continuation bytes that
//! trail it. A buffer truncated in the middle of a sequence is not
//! malformed in that sense, and the whole call fails with
//! [`Error::NotEnoughRoom`].

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::classify::{is_continuation_byte, Octet, REPLACEMENT_CHARACTER};
use super::utf8::{decode_next, encode_code_point, starts_with_bom, BOM};
use crate::error::{Error, Result};

/// Configuration for [`sanitize`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SanitizeConfig {
    /// Code point written for each malformed run (default: U+FFFD)
    pub replacement: u32,
    /// Drop a leading byte order mark from the output (default: false)
    pub strip_bom: bool,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            replacement: REPLACEMENT_CHARACTER,
            strip_bom: false,
        }
    }
}

impl SanitizeConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the replacement code point.
    pub fn with_replacement(mut self, replacement: u32) -> Self {
        self.replacement = replacement;
        self
    }

    /// Drop a leading byte order mark.
    pub fn with_strip_bom(mut self, strip_bom: bool) -> Self {
        self.strip_bom = strip_bom;
        self
    }
}

/// Copy `input` to `out`, replacing each malformed run with U+FFFD.
///
/// Returns the number of replacements made.
///
/// # Examples
///
/// ```
/// use utfcodec::text::sanitize::replace_invalid;
///
/// let mut out = Vec::new();
/// let replaced = replace_invalid(&[0x48, 0x65, 0xFF, 0x6C, 0x6C, 0x6F], &mut out).unwrap();
/// assert_eq!(replaced, 1);
/// assert_eq!(out, "He\u{FFFD}llo".as_bytes());
/// ```
pub fn replace_invalid<T: Octet, E: Extend<u8>>(input: &[T], out: &mut E) -> Result<usize> {
    sanitize(input, &SanitizeConfig::default(), out)
}

/// [`replace_invalid`] with a caller-chosen replacement code point.
pub fn replace_invalid_with<T: Octet, E: Extend<u8>>(
    input: &[T],
    out: &mut E,
    replacement: u32,
) -> Result<usize> {
    sanitize(input, &SanitizeConfig::new().with_replacement(replacement), out)
}

/// Copy `input` to `out` according to `config`.
///
/// Fails with [`Error::InvalidCodePoint`] before writing anything when the
/// configured replacement is not a valid code point, and with
/// [`Error::NotEnoughRoom`] when the input ends inside a sequence. In the
/// latter case `out` holds everything sanitized up to that sequence.
pub fn sanitize<T: Octet, E: Extend<u8>>(
    input: &[T],
    config: &SanitizeConfig,
    out: &mut E,
) -> Result<usize> {
    let (marker, marker_len) = encode_code_point(config.replacement)?;
    let marker = &marker[..marker_len];

    let mut pos = if config.strip_bom && starts_with_bom(input) {
        BOM.len()
    } else {
        0
    };
    let mut replaced = 0;

    while pos < input.len() {
        let start = pos;
        match decode_next(input, &mut pos) {
            Ok(_) => out.extend(input[start..pos].iter().map(|&unit| unit.mask8())),
            Err(Error::NotEnoughRoom) => return Err(Error::NotEnoughRoom),
            Err(err) => {
                debug!("replacing malformed UTF-8 at byte {}: {}", start, err);
                out.extend(marker.iter().copied());
                replaced += 1;
                pos = start + 1;
                if !matches!(err, Error::InvalidLead(_)) {
                    while pos < input.len() && is_continuation_byte(input[pos]) {
                        pos += 1;
                    }
                }
            }
        }
    }

    Ok(replaced)
}
