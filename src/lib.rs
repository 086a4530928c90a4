//! # utfcodec
//!
//! UTF-8, UTF-16 and UTF-32 transcoding and UTF-8 validation.
//!
//! ## Module Organization
//!
//! - [`text::classify`] - Byte roles, sequence lengths, code point validity
//! - [`text::utf8`] - Checked decode/encode, validation, BOM detection
//! - [`text::sanitize`] - Replacement of malformed sequences
//! - [`text::iter`] - Checked bidirectional code point iterator
//! - [`text::transcode`] - Checked UTF-16/UTF-32 conversion
//! - [`text::unchecked`] - The same operations without validation
//!
//! ## Quick Start
//!
//! ```
//! use utfcodec::text::{transcode, utf8};
//! use utfcodec::Error;
//!
//! // Decode one code point at a time
//! let bytes = "héllo".as_bytes();
//! let mut pos = 1;
//! assert_eq!(utf8::decode_next(bytes, &mut pos), Ok(0xE9));
//! assert_eq!(pos, 3);
//!
//! // Overlong encodings are rejected
//! assert_eq!(
//!     utf8::decode_code_point(&[0xC0, 0x80]),
//!     Err(Error::OverlongSequence(0))
//! );
//!
//! // Convert to UTF-16
//! let mut units = Vec::new();
//! transcode::utf8_to_utf16("🎉".as_bytes(), &mut units).unwrap();
//! assert_eq!(units, [0xD83C, 0xDF89]);
//! ```
//!
//! ## Features
//!
//! - `std` (default) - Link the standard library; without it the crate is `no_std`
//! - `serde` - Serialization of [`text::SanitizeConfig`] and [`ErrorKind`]
//! - `cli` - The `utfcodec` command line tool

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

/// Error types for checked operations.
pub mod error;

/// Unicode encoding, decoding and validation.
pub mod text;

pub use error::{Error, ErrorKind, Result};
pub use text::utf8::{find_invalid, is_valid, starts_with_bom, BOM};
