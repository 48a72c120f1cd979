use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// A selection in character offsets.
///
/// `start <= end` always holds; a caret is a selection with `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Create a selection, swapping the bounds if they are reversed.
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A collapsed selection at `pos`.
    pub const fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Clamp both bounds into `0..=len`.
    ///
    /// Hosts occasionally hand over offsets from a stale buffer; clamping keeps
    /// every mutation total instead of failing.
    #[must_use]
    pub fn clamp(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }

    /// Whether the selection lies entirely inside `start..=end`.
    pub const fn within(&self, start: usize, end: usize) -> bool {
        self.start >= start && self.end <= end
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl FromStr for Selection {
    type Err = Error;

    /// Parse `START:END`, or a bare `POS` for a caret.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidSelection(s.to_string());
        let s = s.trim();
        match s.split_once(':') {
            Some((start, end)) => {
                let start = start.trim().parse().map_err(|_| invalid())?;
                let end = end.trim().parse().map_err(|_| invalid())?;
                Ok(Self::new(start, end))
            }
            None => s.parse().map(Self::caret).map_err(|_| invalid()),
        }
    }
}
