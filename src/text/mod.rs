//! Unicode text encoding.
//!
//! This module converts between UTF-8, UTF-16 and UTF-32, validates UTF-8,
//! and walks UTF-8 buffers one code point at a time.
//!
//! ## Checked and unchecked
//!
//! Every operation comes in two flavours. The checked ones ([`utf8`],
//! [`sanitize`], [`iter`], [`transcode`]) validate each sequence and return
//! an [`Error`](crate::Error) describing the first problem. The
//! [`unchecked`] ones trust the caller to pass well-formed input and skip
//! all validation.
//!
//! ```
//! use utfcodec::text::utf8::{is_valid, find_invalid};
//! use utfcodec::text::sanitize::replace_invalid;
//!
//! let bytes = b"He\xFFllo";
//! assert!(!is_valid(bytes));
//! assert_eq!(find_invalid(bytes), 2);
//!
//! let mut clean = Vec::new();
//! replace_invalid(bytes, &mut clean).unwrap();
//! assert_eq!(String::from_utf8(clean).unwrap(), "He\u{FFFD}llo");
//! ```

pub mod classify;
pub mod iter;
pub mod sanitize;
pub mod transcode;
pub mod unchecked;
pub mod utf8;

// Re-export commonly used types
pub use classify::{Octet, Utf16Unit};
pub use iter::Utf8Iter;
pub use sanitize::{replace_invalid, sanitize, SanitizeConfig};
pub use utf8::{validate_utf8, Utf8Error};
