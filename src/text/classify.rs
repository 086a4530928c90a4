//! Byte and code unit classification.
//!
//! Everything the decoders need to know about a single element: whether it
//! is a continuation byte, which sequence length a lead byte announces, and
//! whether a 32-bit value is a usable code point.
//!
//! ## Element types
//!
//! The decoders accept any element type implementing [`Octet`] (UTF-8) or
//! [`Utf16Unit`] (UTF-16). Wider or signed element types are truncated to
//! 8 or 16 bits on read, so a `&[i8]` coming from C or a `&[u32]` holding one
//! byte per slot decode the same as the equivalent `&[u8]`.

/// First lead (high) surrogate.
pub const LEAD_SURROGATE_MIN: u16 = 0xD800;
/// Last lead (high) surrogate.
pub const LEAD_SURROGATE_MAX: u16 = 0xDBFF;
/// First trail (low) surrogate.
pub const TRAIL_SURROGATE_MIN: u16 = 0xDC00;
/// Last trail (low) surrogate.
pub const TRAIL_SURROGATE_MAX: u16 = 0xDFFF;

/// Largest valid Unicode code point.
pub const CODE_POINT_MAX: u32 = 0x10FFFF;

/// Default replacement marker for malformed input (U+FFFD).
pub const REPLACEMENT_CHARACTER: u32 = 0xFFFD;

/// `(cp >> 10) + LEAD_OFFSET` is the lead surrogate of a supplementary code point.
pub(crate) const LEAD_OFFSET: u32 = LEAD_SURROGATE_MIN as u32 - (0x10000 >> 10);

/// `(lead << 10) + trail + SURROGATE_OFFSET` assembles a surrogate pair.
pub(crate) const SURROGATE_OFFSET: u32 = 0x10000u32
    .wrapping_sub((LEAD_SURROGATE_MIN as u32) << 10)
    .wrapping_sub(TRAIL_SURROGATE_MIN as u32);

/// An element that can be read as one UTF-8 code unit.
pub trait Octet: Copy {
    /// The low 8 bits of this element.
    fn mask8(self) -> u8;
}

/// An element that can be read as one UTF-16 code unit.
pub trait Utf16Unit: Copy {
    /// The low 16 bits of this element.
    fn mask16(self) -> u16;
}

macro_rules! octet_impl {
    ($($ty:ty),*) => {
        $(
            impl Octet for $ty {
                #[inline(always)]
                fn mask8(self) -> u8 {
                    self as u8
                }
            }
        )*
    };
}

macro_rules! utf16_unit_impl {
    ($($ty:ty),*) => {
        $(
            impl Utf16Unit for $ty {
                #[inline(always)]
                fn mask16(self) -> u16 {
                    self as u16
                }
            }
        )*
    };
}

octet_impl! { u8, i8, u16, i16, u32, i32 }
utf16_unit_impl! { u16, i16, u32, i32 }

/// Truncate an element to 8 bits.
#[inline(always)]
pub fn mask8<T: Octet>(unit: T) -> u8 {
    unit.mask8()
}

/// Truncate an element to 16 bits.
#[inline(always)]
pub fn mask16<T: Utf16Unit>(unit: T) -> u16 {
    unit.mask16()
}

/// Check if a byte is a UTF-8 continuation byte (`10xxxxxx`).
#[inline(always)]
pub fn is_continuation_byte<T: Octet>(unit: T) -> bool {
    (unit.mask8() & 0xC0) == 0x80
}

/// U+D800-U+DBFF.
#[inline]
pub fn is_lead_surrogate(cp: u32) -> bool {
    (LEAD_SURROGATE_MIN as u32..=LEAD_SURROGATE_MAX as u32).contains(&cp)
}

/// U+DC00-U+DFFF.
#[inline]
pub fn is_trail_surrogate(cp: u32) -> bool {
    (TRAIL_SURROGATE_MIN as u32..=TRAIL_SURROGATE_MAX as u32).contains(&cp)
}

/// U+D800-U+DFFF.
#[inline]
pub fn is_surrogate(cp: u32) -> bool {
    (LEAD_SURROGATE_MIN as u32..=TRAIL_SURROGATE_MAX as u32).contains(&cp)
}

/// True iff `cp` is at most U+10FFFF and not a surrogate.
///
/// # Examples
///
/// ```
/// use utfcodec::text::classify::is_code_point_valid;
///
/// assert!(is_code_point_valid(0x41));
/// assert!(is_code_point_valid(0x10FFFF));
/// assert!(!is_code_point_valid(0xD800));
/// assert!(!is_code_point_valid(0x110000));
/// ```
#[inline]
pub fn is_code_point_valid(cp: u32) -> bool {
    cp <= CODE_POINT_MAX && !is_surrogate(cp)
}

/// Get the expected sequence length from a lead byte.
/// Returns 0 for invalid lead bytes (continuation bytes or 0xF8+).
#[inline]
pub fn sequence_length<T: Octet>(lead: T) -> usize {
    let lead = lead.mask8();
    if lead < 0x80 {
        1
    } else if (lead >> 5) == 0x6 {
        2
    } else if (lead >> 4) == 0xE {
        3
    } else if (lead >> 3) == 0x1E {
        4
    } else {
        0
    }
}

/// Number of bytes in the shortest UTF-8 encoding of `cp`.
#[inline]
pub fn encoded_length(cp: u32) -> usize {
    if cp < 0x80 {
        1
    } else if cp < 0x800 {
        2
    } else if cp < 0x10000 {
        3
    } else {
        4
    }
}

/// True if `length` bytes is longer than the minimal encoding of `cp`.
#[inline]
pub fn is_overlong_sequence(cp: u32, length: usize) -> bool {
    encoded_length(cp) != length
}
