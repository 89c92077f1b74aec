//! Index paths for addressing cells in a sectioned table.
//!
//! The [`IndexPath`] type is the coordinate every table callback receives.
//! It identifies a cell by the section it lives in and its row within that
//! section. Propagating delegates pick one of the two components to decide
//! which child answers a call.

use std::fmt;

/// A `(section, row)` coordinate identifying a cell in a table.
///
/// Index paths are plain values: they carry no reference to the table they
/// were produced for, and a path that was valid before a reload may point at
/// a different (or no) cell afterwards.
///
/// # Ordering
///
/// Paths order by section first, then by row, which matches the order cells
/// appear on screen.
///
/// # Example
///
/// ```
/// use cascading_table::IndexPath;
///
/// let first = IndexPath::new(0, 0);
/// let next = first.with_row(1);
///
/// assert!(first < next);
/// assert_eq!(next.section(), 0);
/// assert_eq!(next.to_string(), "[0, 1]");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
    /// The section containing the cell.
    section: usize,
    /// The row within the section.
    row: usize,
}

impl IndexPath {
    /// Creates an index path for `row` within `section`.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// Returns the section component.
    #[inline]
    pub const fn section(&self) -> usize {
        self.section
    }

    /// Returns the row component.
    #[inline]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Returns a path in the same section at a different row.
    #[inline]
    pub const fn with_row(&self, row: usize) -> Self {
        Self::new(self.section, row)
    }

    /// Returns a path at the same row in a different section.
    #[inline]
    pub const fn with_section(&self, section: usize) -> Self {
        Self::new(section, self.row)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.row)
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, row): (usize, usize)) -> Self {
        Self::new(section, row)
    }
}
