//! Error types for checked operations.
//!
//! Every checked decode, encode, transcode and iterator step reports failure
//! through [`Error`]. The payload identifies the offending input (the lead
//! byte, the decoded value, or the UTF-16 code unit) so callers can build
//! their own diagnostics. [`ErrorKind`] is the payload-free mirror for
//! branching and reporting.
//!
//! A checked operation that fails leaves the caller's position where it was
//! before the call.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failure of a checked operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The input ends in the middle of a multi-byte sequence.
    #[error("not enough room: input ends in the middle of a UTF-8 sequence")]
    NotEnoughRoom,

    /// The byte at the current position cannot start a UTF-8 sequence.
    #[error("invalid UTF-8 lead byte 0x{0:02X}")]
    InvalidLead(u8),

    /// A continuation byte was expected but something else was found.
    /// Carries the lead byte of the broken sequence.
    #[error("incomplete UTF-8 sequence starting with 0x{0:02X}")]
    IncompleteSequence(u8),

    /// The sequence decodes to a value that has a shorter encoding.
    #[error("overlong UTF-8 encoding of U+{0:04X}")]
    OverlongSequence(u32),

    /// A surrogate or a value above U+10FFFF.
    #[error("invalid code point 0x{0:X}")]
    InvalidCodePoint(u32),

    /// A lone or mismatched UTF-16 surrogate.
    #[error("invalid UTF-16 code unit 0x{0:04X}")]
    InvalidUtf16(u16),

    /// An iterator was positioned outside the range it was built over.
    #[error("position {pos} outside iterator range {start}..{end}")]
    OutOfRange {
        /// Requested position.
        pos: usize,
        /// Start of the range.
        start: usize,
        /// End of the range.
        end: usize,
    },

    /// Two iterators built over different ranges were compared.
    #[error("comparing UTF-8 iterators defined over different ranges")]
    RangeMismatch,
}

impl Error {
    /// The payload-free kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotEnoughRoom => ErrorKind::NotEnoughRoom,
            Self::InvalidLead(_) => ErrorKind::InvalidLead,
            Self::IncompleteSequence(_) => ErrorKind::IncompleteSequence,
            Self::OverlongSequence(_) => ErrorKind::OverlongSequence,
            Self::InvalidCodePoint(_) => ErrorKind::InvalidCodePoint,
            Self::InvalidUtf16(_) => ErrorKind::InvalidUtf16,
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::RangeMismatch => ErrorKind::RangeMismatch,
        }
    }

    /// True for the kinds a UTF-8 decode can produce on malformed bytes.
    pub fn is_malformed_utf8(&self) -> bool {
        matches!(
            self,
            Self::InvalidLead(_)
                | Self::IncompleteSequence(_)
                | Self::OverlongSequence(_)
                | Self::InvalidCodePoint(_)
        )
    }
}

/// The kind of a checked-operation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ErrorKind {
    /// Multi-byte sequence cut off at the end of input.
    NotEnoughRoom,
    /// Byte that cannot start a sequence (0x80-0xBF, 0xF8-0xFF).
    InvalidLead,
    /// Missing or malformed continuation byte.
    IncompleteSequence,
    /// Encoding longer than necessary.
    /// For example `C0 81` for U+0041 instead of `41`.
    OverlongSequence,
    /// Surrogate (U+D800-U+DFFF) or value above U+10FFFF.
    InvalidCodePoint,
    /// Lone or mismatched UTF-16 surrogate.
    InvalidUtf16,
    /// Iterator position outside its range.
    OutOfRange,
    /// Iterators over different ranges compared.
    RangeMismatch,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotEnoughRoom => write!(f, "truncated UTF-8 sequence"),
            Self::InvalidLead => write!(f, "invalid UTF-8 lead byte"),
            Self::IncompleteSequence => write!(f, "invalid UTF-8 continuation byte"),
            Self::OverlongSequence => write!(f, "overlong UTF-8 encoding"),
            Self::InvalidCodePoint => write!(f, "invalid code point"),
            Self::InvalidUtf16 => write!(f, "invalid UTF-16"),
            Self::OutOfRange => write!(f, "iterator position out of range"),
            Self::RangeMismatch => write!(f, "iterator range mismatch"),
        }
    }
}
