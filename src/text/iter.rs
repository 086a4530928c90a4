//! Checked bidirectional code point iterator.
//!
//! [`Utf8Iter`] walks a fixed range `[start, end)` of a byte buffer one code
//! point at a time, in either direction. Each step validates the sequence it
//! crosses; a failing step reports the error and leaves the iterator where it
//! was. The position is always on a lead byte or at `end`.
//!
//! The iterator only borrows the buffer. Copying it is cheap, and two copies
//! over the same range can be compared with [`Utf8Iter::try_eq`].

use log::trace;

use super::classify::Octet;
use super::utf8::{decode_next, decode_prior, peek_next};
use crate::error::{Error, Result};

/// Checked UTF-8 iterator over `bytes[start..end]`.
///
/// # Examples
///
/// ```
/// use utfcodec::text::iter::Utf8Iter;
///
/// let text = "añ🎉";
/// let mut it = Utf8Iter::over(text.as_bytes());
/// assert_eq!(it.get(), Ok('a' as u32));
/// assert_eq!(it.move_next(), Ok('a' as u32));
/// assert_eq!(it.get(), Ok(0xF1));
///
/// let end = Utf8Iter::at_end(text.as_bytes());
/// let mut back = end;
/// assert_eq!(back.move_prev(), Ok(0x1F389));
/// assert_eq!(back.base(), 3);
///
/// let cps: Result<Vec<u32>, _> = Utf8Iter::over(text.as_bytes()).collect();
/// assert_eq!(cps.unwrap(), vec![0x61, 0xF1, 0x1F389]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Utf8Iter<'a, T: Octet = u8> {
    bytes: &'a [T],
    pos: usize,
    start: usize,
    end: usize,
}

impl<'a, T: Octet> Utf8Iter<'a, T> {
    /// Create an iterator at `pos` over `bytes[start..end]`.
    ///
    /// Fails with [`Error::OutOfRange`] unless `start <= pos <= end <= bytes.len()`.
    pub fn new(bytes: &'a [T], pos: usize, start: usize, end: usize) -> Result<Self> {
        if start > pos || pos > end || end > bytes.len() {
            trace!("rejecting iterator at {} over {}..{}", pos, start, end);
            return Err(Error::OutOfRange { pos, start, end });
        }
        Ok(Self {
            bytes,
            pos,
            start,
            end,
        })
    }

    /// Iterator at the start of the whole buffer.
    pub fn over(bytes: &'a [T]) -> Self {
        Self {
            bytes,
            pos: 0,
            start: 0,
            end: bytes.len(),
        }
    }

    /// Iterator at the end of the whole buffer.
    pub fn at_end(bytes: &'a [T]) -> Self {
        Self {
            pos: bytes.len(),
            ..Self::over(bytes)
        }
    }

    /// Current byte position.
    pub fn base(&self) -> usize {
        self.pos
    }

    /// The `(start, end)` range this iterator was built over.
    pub fn range(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Decode the code point at the current position.
    pub fn get(&self) -> Result<u32> {
        peek_next(self.window(), self.pos)
    }

    /// Step forward one code point, returning the one stepped over.
    pub fn move_next(&mut self) -> Result<u32> {
        let mut pos = self.pos;
        let cp = decode_next(self.window(), &mut pos)?;
        self.pos = pos;
        Ok(cp)
    }

    /// Step backward one code point, returning the one now under the iterator.
    ///
    /// Fails with [`Error::NotEnoughRoom`] at the range start, and with
    /// [`Error::InvalidLead`] when no lead byte precedes the position inside
    /// the range.
    pub fn move_prev(&mut self) -> Result<u32> {
        let window = &self.bytes[self.start..self.end];
        let mut rel = self.pos - self.start;
        let cp = decode_prior(window, &mut rel)?;
        self.pos = self.start + rel;
        Ok(cp)
    }

    /// Compare positions.
    ///
    /// Fails with [`Error::RangeMismatch`] when the two iterators were built
    /// over different ranges.
    pub fn try_eq(&self, other: &Self) -> Result<bool> {
        if self.start != other.start
            || self.end != other.end
            || self.bytes.as_ptr() != other.bytes.as_ptr()
            || self.bytes.len() != other.bytes.len()
        {
            return Err(Error::RangeMismatch);
        }
        Ok(self.pos == other.pos)
    }

    /// Bytes up to the range end; positions stay absolute.
    #[inline]
    fn window(&self) -> &'a [T] {
        &self.bytes[..self.end]
    }
}

/// Yields code points up to the range end. After an error the iterator is
/// exhausted.
impl<T: Octet> Iterator for Utf8Iter<'_, T> {
    type Item = Result<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }
        let step = self.move_next();
        if let Err(err) = step {
            trace!("UTF-8 iterator stopped at byte {}: {}", self.pos, err);
            self.pos = self.end;
        }
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn construction_bounds() {
        let bytes = b"abcd";
        assert!(Utf8Iter::new(&bytes[..], 0, 0, 4).is_ok());
        assert!(Utf8Iter::new(&bytes[..], 4, 0, 4).is_ok());
        assert!(Utf8Iter::new(&bytes[..], 2, 1, 3).is_ok());
        assert_eq!(
            Utf8Iter::new(&bytes[..], 0, 1, 3).unwrap_err(),
            Error::OutOfRange {
                pos: 0,
                start: 1,
                end: 3
            }
        );
        assert!(Utf8Iter::new(&bytes[..], 4, 1, 3).is_err());
        assert!(Utf8Iter::new(&bytes[..], 2, 0, 5).is_err());
    }

    #[test]
    fn forward_walk() {
        let text = "z€𝄞é";
        let mut it = Utf8Iter::over(text.as_bytes());
        let mut cps = Vec::new();
        while it.base() < text.len() {
            assert_eq!(it.get(), it.clone().move_next());
            cps.push(it.move_next().unwrap());
        }
        let expected: Vec<u32> = text.chars().map(|c| c as u32).collect();
        assert_eq!(cps, expected);
        assert_eq!(it.move_next(), Err(Error::NotEnoughRoom));
    }

    #[test]
    fn backward_walk_returns_to_start() {
        let text = "z€𝄞é";
        let count = text.chars().count();
        let mut it = Utf8Iter::at_end(text.as_bytes());
        for _ in 0..count {
            it.move_prev().unwrap();
        }
        assert_eq!(it.base(), 0);
        assert!(it.try_eq(&Utf8Iter::over(text.as_bytes())).unwrap());
        assert_eq!(it.move_prev(), Err(Error::NotEnoughRoom));
    }

    #[test]
    fn sub_range_bounds_decoding() {
        // Range covers only "€" out of "a€b"
        let bytes = "a€b".as_bytes();
        let mut it = Utf8Iter::new(bytes, 1, 1, 4).unwrap();
        assert_eq!(it.move_next(), Ok(0x20AC));
        assert_eq!(it.base(), 4);
        assert_eq!(it.move_next(), Err(Error::NotEnoughRoom));

        // Range ending mid-sequence sees a truncated sequence
        let it = Utf8Iter::new(bytes, 1, 1, 3).unwrap();
        assert_eq!(it.get(), Err(Error::NotEnoughRoom));
    }

    #[test]
    fn move_prev_stops_at_range_start() {
        // Continuation bytes right after the range start have no lead inside the range
        let bytes = "€".as_bytes();
        let mut it = Utf8Iter::new(bytes, 3, 1, 3).unwrap();
        assert_eq!(it.move_prev(), Err(Error::InvalidLead(0x82)));
        assert_eq!(it.base(), 3);
    }

    #[test]
    fn failure_leaves_position() {
        let bytes = [b'a', 0xC0, 0x80];
        let mut it = Utf8Iter::over(&bytes[..]);
        it.move_next().unwrap();
        assert_eq!(it.move_next(), Err(Error::OverlongSequence(0)));
        assert_eq!(it.base(), 1);
    }

    #[test]
    fn iterator_fuses_after_error() {
        let bytes = [b'a', 0xFF, b'b'];
        let items: Vec<_> = Utf8Iter::over(&bytes[..]).collect();
        assert_eq!(items, [Ok('a' as u32), Err(Error::InvalidLead(0xFF))]);
    }

    #[test]
    fn equality_requires_same_range() {
        let bytes = b"hello";
        let a = Utf8Iter::new(&bytes[..], 1, 0, 5).unwrap();
        let b = Utf8Iter::new(&bytes[..], 1, 0, 5).unwrap();
        let c = Utf8Iter::new(&bytes[..], 1, 1, 5).unwrap();
        let d = Utf8Iter::new(&bytes[..], 2, 0, 5).unwrap();
        assert_eq!(a.try_eq(&b), Ok(true));
        assert_eq!(a.try_eq(&d), Ok(false));
        assert_eq!(a.try_eq(&c), Err(Error::RangeMismatch));

        let other = *b"hello";
        let e = Utf8Iter::new(&other[..], 1, 0, 5).unwrap();
        assert_eq!(a.try_eq(&e), Err(Error::RangeMismatch));
    }
}
