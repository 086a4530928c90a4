//! Tests for the public text API.

use utfcodec::text::iter::Utf8Iter;
use utfcodec::text::sanitize::{replace_invalid_with, sanitize, SanitizeConfig};
use utfcodec::text::{transcode, unchecked, utf8};
use utfcodec::{Error, ErrorKind};

// ============================================================================
// Mixed-script round trips
// ============================================================================

const MIXED: &str = "Hello, мир! 日本語 🎉 𝄞 café";

#[test]
fn test_mixed_text_through_every_encoding() {
    let mut utf16 = Vec::new();
    transcode::utf8_to_utf16(MIXED.as_bytes(), &mut utf16).unwrap();
    let mut utf32 = Vec::new();
    transcode::utf8_to_utf32(MIXED.as_bytes(), &mut utf32).unwrap();

    let mut from16 = Vec::new();
    transcode::utf16_to_utf8(&utf16, &mut from16).unwrap();
    let mut from32 = Vec::new();
    transcode::utf32_to_utf8(&utf32, &mut from32).unwrap();

    assert_eq!(from16, MIXED.as_bytes());
    assert_eq!(from32, MIXED.as_bytes());
    assert_eq!(utf32.len(), MIXED.chars().count());
    assert_eq!(utf8::distance(MIXED.as_bytes()), Ok(utf32.len()));
}

#[test]
fn test_signed_byte_input() {
    // Buffers of i8 behave exactly like buffers of u8
    let signed: Vec<i8> = MIXED.bytes().map(|b| b as i8).collect();
    assert!(utf8::is_valid(&signed));

    let mut utf32 = Vec::new();
    transcode::utf8_to_utf32(&signed, &mut utf32).unwrap();
    assert_eq!(utf32, MIXED.chars().map(u32::from).collect::<Vec<_>>());

    let mut pos = signed.len();
    assert_eq!(utf8::decode_prior(&signed, &mut pos), Ok('é' as u32));
}

#[test]
fn test_wide_byte_input_uses_low_octet() {
    // Only the low 8 bits of each element are looked at
    let wide: Vec<u32> = "añ".bytes().map(|b| 0xAB00 | b as u32).collect();
    assert!(utf8::is_valid(&wide));
    assert_eq!(utf8::distance(&wide), Ok(2));
}

// ============================================================================
// Error reporting
// ============================================================================

#[test]
fn test_error_priority() {
    // Lead checked first
    assert_eq!(utf8::decode_code_point(&[0x80]), Err(Error::InvalidLead(0x80)));
    // Running out of input beats a bad continuation later on
    assert_eq!(utf8::decode_code_point(&[0xF0, 0x9F]), Err(Error::NotEnoughRoom));
    // Bad continuation
    assert_eq!(
        utf8::decode_code_point(&[0xE2, 0x28, 0xA1]),
        Err(Error::IncompleteSequence(0xE2))
    );
    // Surrogate
    assert_eq!(
        utf8::decode_code_point(&[0xED, 0xA0, 0x80]),
        Err(Error::InvalidCodePoint(0xD800))
    );
    // Overlong
    assert_eq!(
        utf8::decode_code_point(&[0xE0, 0x80, 0xAF]),
        Err(Error::OverlongSequence(0x2F))
    );
}

#[test]
fn test_validate_report_location() {
    let input = b"line one\nline two\nbad \xC3\x28 here\n";
    let err = utf8::validate_utf8(input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::IncompleteSequence);
    assert_eq!(err.offset, 22);
    assert_eq!(err.line, 3);
    assert_eq!(err.column, 5);
    assert_eq!(utf8::find_invalid(input), err.offset);
    assert_eq!(
        err.to_string(),
        "invalid UTF-8 continuation byte at byte 22, line 3, column 5"
    );
}

#[test]
fn test_error_messages() {
    assert_eq!(Error::InvalidLead(0xFF).to_string(), "invalid UTF-8 lead byte 0xFF");
    assert_eq!(Error::InvalidUtf16(0xDC00).to_string(), "invalid UTF-16 code unit 0xDC00");
    assert!(Error::OverlongSequence(0).is_malformed_utf8());
    assert!(!Error::NotEnoughRoom.is_malformed_utf8());
}

// ============================================================================
// Sanitizing
// ============================================================================

#[test]
fn test_sanitize_with_config() {
    let input = b"\xEF\xBB\xBFok \xFF\xC0\xAF done";
    let config = SanitizeConfig::new()
        .with_replacement('?' as u32)
        .with_strip_bom(true);

    let mut out = Vec::new();
    let replaced = sanitize(input, &config, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "ok ?? done");
    assert_eq!(replaced, 2);
}

#[test]
fn test_sanitize_keeps_bom_by_default() {
    let input = b"\xEF\xBB\xBFhi";
    let mut out = Vec::new();
    sanitize(input, &SanitizeConfig::default(), &mut out).unwrap();
    assert_eq!(out, input);
}

#[test]
fn test_sanitize_truncated_input() {
    let mut out = Vec::new();
    assert_eq!(
        replace_invalid_with(b"abc\xE2\x82", &mut out, 0xFFFD),
        Err(Error::NotEnoughRoom)
    );
    assert_eq!(out, b"abc");
}

#[test]
fn test_sanitize_rejects_bad_replacement() {
    let mut out = Vec::new();
    assert_eq!(
        replace_invalid_with(b"\xFF", &mut out, 0xD800),
        Err(Error::InvalidCodePoint(0xD800))
    );
    assert!(out.is_empty());
}

// ============================================================================
// Iterators
// ============================================================================

#[test]
fn test_iterator_over_subrange() {
    let bytes = "xx日本語yy".as_bytes();
    let mut it = Utf8Iter::new(bytes, 2, 2, 11).unwrap();
    let cps: Result<Vec<u32>, _> = it.collect();
    assert_eq!(cps.unwrap(), vec![0x65E5, 0x672C, 0x8A9E]);

    assert_eq!(it.move_next(), Ok(0x65E5));
    assert_eq!(it.move_prev(), Ok(0x65E5));
    assert_eq!(it.move_prev(), Err(Error::NotEnoughRoom));
    assert_eq!(it.base(), 2);
}

#[test]
fn test_iterator_range_checks() {
    let bytes = &b"abc"[..];
    assert_eq!(
        Utf8Iter::new(bytes, 5, 0, 3).unwrap_err(),
        Error::OutOfRange { pos: 5, start: 0, end: 3 }
    );
    let whole = Utf8Iter::over(bytes);
    let tail = Utf8Iter::new(bytes, 1, 1, 3).unwrap();
    assert_eq!(whole.try_eq(&tail), Err(Error::RangeMismatch));
}

#[test]
fn test_iterator_stops_at_error() {
    let bytes = &b"a\xFFb"[..];
    let mut it = Utf8Iter::over(bytes);
    assert_eq!(it.next(), Some(Ok('a' as u32)));
    assert_eq!(it.next(), Some(Err(Error::InvalidLead(0xFF))));
    assert_eq!(it.next(), None);
}

#[test]
fn test_unchecked_iterator_matches_checked() {
    let bytes = MIXED.as_bytes();
    let fast: Vec<u32> = unchecked::Utf8Iter::new(bytes, 0).collect();
    let checked: Vec<u32> = Utf8Iter::over(bytes).map(Result::unwrap).collect();
    assert_eq!(fast, checked);
}
