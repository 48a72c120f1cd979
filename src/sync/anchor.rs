use std::str::FromStr;

use crate::error::{Error, Result};

/// The vertical position of a rendered element, tagged with the 1-based
/// source line it was rendered from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub line: usize,
    pub offset: f64,
}

impl Anchor {
    /// Create an anchor. Negative or non-finite offsets are pulled to 0.
    pub fn new(line: usize, offset: f64) -> Result<Self> {
        if line == 0 {
            return Err(Error::AnchorLineZero(line));
        }
        let offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        Ok(Self { line, offset })
    }

    /// Build an anchor from a rendered element's `data-line` attribute.
    ///
    /// Missing, unparsable or zero line numbers yield `None`; such elements
    /// carry no usable source position.
    pub fn from_data_line(attr: &str, offset: f64) -> Option<Self> {
        let line = attr.trim().parse().ok()?;
        Self::new(line, offset).ok()
    }
}

impl FromStr for Anchor {
    type Err = Error;

    /// Parse `LINE:OFFSET`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidAnchor(s.to_string());
        let (line, offset) = s.trim().split_once(':').ok_or_else(invalid)?;
        let line = line.trim().parse().map_err(|_| invalid())?;
        let offset = offset.trim().parse().map_err(|_| invalid())?;
        Self::new(line, offset)
    }
}

/// The anchors of one render pass, ordered by source line.
///
/// Several anchors may share a line (nested elements rendered from the same
/// source line). Order between anchors with equal lines is preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorSet {
    anchors: Vec<Anchor>,
}

impl AnchorSet {
    /// Build a set, sorting by line if the renderer emitted them out of order.
    pub fn new(mut anchors: Vec<Anchor>) -> Self {
        if !anchors.is_sorted_by_key(|a| a.line) {
            tracing::warn!(
                count = anchors.len(),
                "renderer anchors out of source order, sorting"
            );
            anchors.sort_by_key(|a| a.line);
        }
        Self { anchors }
    }

    /// Parse a comma-separated list of `LINE:OFFSET` pairs.
    pub fn parse_list(s: &str) -> Result<Self> {
        let anchors = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Anchor>>>()?;
        Ok(Self::new(anchors))
    }

    /// Anchors for block start lines laid out at a fixed height per source
    /// line, for previews whose rendered height tracks the source.
    pub fn uniform(lines: &[usize], line_height: f64) -> Self {
        Self::new(
            lines
                .iter()
                .filter_map(|&line| Anchor::new(line, line.saturating_sub(1) as f64 * line_height).ok())
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn as_slice(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Anchor> {
        self.anchors.iter()
    }
}

impl FromIterator<Anchor> for AnchorSet {
    fn from_iter<I: IntoIterator<Item = Anchor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AnchorSet {
    type Item = &'a Anchor;
    type IntoIter = std::slice::Iter<'a, Anchor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
