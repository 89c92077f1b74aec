//! Value types exchanged between a table and its delegates.
//!
//! These describe *what* a table should show (cells, header and footer
//! views, swipe actions) without tying the delegate layer to a particular
//! rendering backend. A host table turns them into real widgets.

use crate::index::IndexPath;

/// Row height sentinel meaning "let the table compute the height".
///
/// Returned by row-height callbacks that have no opinion, including when a
/// propagating delegate cannot resolve a coordinate to a child.
pub const AUTOMATIC_DIMENSION: f32 = -1.0;

/// Accessory shown on the trailing edge of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellAccessory {
    /// No accessory.
    #[default]
    None,
    /// A chevron hinting that selecting the row navigates somewhere.
    DisclosureIndicator,
    /// An info button; tapping it reports `accessory_button_tapped`.
    DetailButton,
    /// A checkmark.
    Checkmark,
}

/// A cell produced by a data source for one row.
///
/// # Example
///
/// ```
/// use cascading_table::{CellAccessory, TableCell};
///
/// let cell = TableCell::new("review")
///     .with_text("Great place")
///     .with_detail_text("5 stars")
///     .with_accessory(CellAccessory::DisclosureIndicator);
///
/// assert_eq!(cell.reuse_identifier, "review");
/// assert_eq!(cell.text.as_deref(), Some("Great place"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCell {
    /// Identifier the cell was registered and dequeued under.
    ///
    /// Empty for the placeholder cell returned when no delegate can answer.
    pub reuse_identifier: String,
    /// The index path the cell was dequeued for, if any.
    pub index_path: Option<IndexPath>,
    /// Primary text.
    pub text: Option<String>,
    /// Secondary text.
    pub detail_text: Option<String>,
    /// Trailing accessory.
    pub accessory: CellAccessory,
    /// Indentation level of the content.
    pub indentation_level: usize,
}

impl TableCell {
    /// Creates an empty cell with the given reuse identifier.
    pub fn new(reuse_identifier: impl Into<String>) -> Self {
        Self {
            reuse_identifier: reuse_identifier.into(),
            ..Default::default()
        }
    }

    /// Returns `true` if this is the placeholder cell (no reuse identifier).
    pub fn is_placeholder(&self) -> bool {
        self.reuse_identifier.is_empty()
    }

    /// Sets the index path.
    pub fn with_index_path(mut self, index_path: IndexPath) -> Self {
        self.index_path = Some(index_path);
        self
    }

    /// Sets the primary text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the secondary text.
    pub fn with_detail_text(mut self, text: impl Into<String>) -> Self {
        self.detail_text = Some(text.into());
        self
    }

    /// Sets the accessory.
    pub fn with_accessory(mut self, accessory: CellAccessory) -> Self {
        self.accessory = accessory;
        self
    }

    /// Sets the indentation level.
    pub fn with_indentation_level(mut self, level: usize) -> Self {
        self.indentation_level = level;
        self
    }
}

/// A section header or footer view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderFooterView {
    /// Identifier the view was registered under, if it is reusable.
    pub reuse_identifier: Option<String>,
    /// Title drawn by the view.
    pub title: Option<String>,
}

impl HeaderFooterView {
    /// Creates a reusable view with the given identifier.
    pub fn new(reuse_identifier: impl Into<String>) -> Self {
        Self {
            reuse_identifier: Some(reuse_identifier.into()),
            title: None,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Editing control shown for a row in editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditingStyle {
    /// No editing control.
    #[default]
    None,
    /// A delete control.
    Delete,
    /// An insert control.
    Insert,
}

/// Visual style of a swipe action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowActionStyle {
    /// The platform default style.
    #[default]
    Default,
    /// Destructive (usually red).
    Destructive,
    /// Neutral.
    Normal,
}

/// A swipe action offered for a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    /// Visual style.
    pub style: RowActionStyle,
    /// Button title.
    pub title: String,
    /// Identifier reported back when the action is triggered.
    pub identifier: String,
}

impl RowAction {
    /// Creates a new action.
    pub fn new(
        style: RowActionStyle,
        title: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            style,
            title: title.into(),
            identifier: identifier.into(),
        }
    }
}

/// An edit-menu action a row can be asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuAction(&'static str);

impl MenuAction {
    /// Copy the row's content.
    pub const COPY: Self = Self("copy");
    /// Cut the row's content.
    pub const CUT: Self = Self("cut");
    /// Paste into the row.
    pub const PASTE: Self = Self("paste");

    /// Creates a custom action.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the action name.
    pub const fn name(&self) -> &'static str {
        self.0
    }
}
