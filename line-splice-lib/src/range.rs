//! Inclusive, 1-indexed line ranges and their bounds checks.

use crate::error::SpliceError;
use std::fmt;
use std::ops::Range;

/// An inclusive span of lines, numbered from 1 as editors display them.
///
/// A `LineRange` is always well-formed (`1 <= start <= end`); whether it fits
/// a particular document is checked separately with [`LineRange::check_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl LineRange {
    /// Builds a range covering lines `start..=end`.
    ///
    /// Returns [`SpliceError::InvalidRange`] when `start` is zero or greater than `end`.
    pub fn new(start: usize, end: usize) -> Result<Self, SpliceError> {
        if start == 0 || start > end {
            return Err(SpliceError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of lines covered by the range. Never zero.
    pub fn line_count(&self) -> usize {
        self.end - self.start + 1
    }

    /// Ensures the range lies within a document of `line_count` lines.
    pub fn check_bounds(&self, line_count: usize) -> Result<(), SpliceError> {
        if self.end > line_count {
            return Err(SpliceError::RangeOutOfBounds {
                end: self.end,
                line_count,
            });
        }
        Ok(())
    }

    /// Zero-based, end-exclusive indices into a line vector.
    pub fn indices(&self) -> Range<usize> {
        (self.start - 1)..self.end
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}
