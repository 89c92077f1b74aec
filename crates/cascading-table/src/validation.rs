//! Consistency check for a delegate's children.
//!
//! Children are expected to report `index == position`. Anything else still
//! dispatches safely (positional lookups ignore `index`, section row counts
//! use the first child whose `index` matches), but usually means a section
//! was inserted or reordered without renumbering its siblings.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::traits::CascadingTableDelegate;

/// A problem found in a children list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The child at `position` reports a different `index`.
    IndexMismatch {
        /// Position in the children list.
        position: usize,
        /// Index reported by the child.
        index: usize,
    },
    /// Two children report the same `index`.
    DuplicateIndex {
        /// The shared index.
        index: usize,
        /// Position of the first child reporting it.
        first: usize,
        /// Position of the later child reporting it.
        second: usize,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexMismatch { position, index } => {
                write!(f, "child at position {position} reports index {index}")
            }
            Self::DuplicateIndex {
                index,
                first,
                second,
            } => write!(
                f,
                "children at positions {first} and {second} both report index {index}"
            ),
        }
    }
}

impl std::error::Error for ValidationIssue {}

/// Checks that every child's `index` equals its position.
///
/// Returns all issues in list order; an empty list (including an empty
/// children list) means the children are consistent.
pub fn validate_children(children: &[Arc<dyn CascadingTableDelegate>]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen: HashMap<usize, usize> = HashMap::with_capacity(children.len());

    for (position, child) in children.iter().enumerate() {
        let index = child.index();

        if index != position {
            issues.push(ValidationIssue::IndexMismatch { position, index });
        }

        if let Some(&first) = seen.get(&index) {
            issues.push(ValidationIssue::DuplicateIndex {
                index,
                first,
                second: position,
            });
        } else {
            seen.insert(index, position);
        }
    }

    issues
}
