//! The propagating delegate: a tree node that fans table callbacks out to
//! its children.
//!
//! A [`PropagatingTableDelegate`] owns an ordered list of child delegates
//! and forwards each callback to exactly one of them. Which one is decided
//! by its [`PropagationMode`]:
//!
//! - [`PropagationMode::Section`]: the child at position `index_path.section()`
//!   answers. The node reports one table section per child.
//! - [`PropagationMode::Row`]: the child at position `index_path.row()`
//!   answers. The node reports one row per child and no sections, so it is
//!   meant to sit *below* a section-mode node.
//!
//! Coordinates that resolve to no child are never an error. The node answers
//! them with the callback's neutral value (zero counts, `None` views and
//! titles, [`AUTOMATIC_DIMENSION`] row heights, `0.0` header/footer heights,
//! `false` for most boolean queries) and forwards nothing.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cascading_table::{
//!     CascadingTableDelegate, IndexPath, PropagatingTableDelegate, PropagationMode, TableCell,
//!     TableDataSource, TableDelegate, TableView, VirtualTableView,
//! };
//!
//! struct Rows { index: usize, count: usize }
//!
//! impl TableDataSource for Rows {
//!     fn number_of_rows_in_section(&self, _table_view: &dyn TableView, _section: usize) -> usize {
//!         self.count
//!     }
//!
//!     fn cell_for_row(&self, _table_view: &dyn TableView, index_path: IndexPath) -> TableCell {
//!         TableCell::new("row").with_index_path(index_path)
//!     }
//! }
//!
//! impl TableDelegate for Rows {}
//!
//! impl CascadingTableDelegate for Rows {
//!     fn index(&self) -> usize { self.index }
//! }
//!
//! let root = PropagatingTableDelegate::with_mode(
//!     0,
//!     vec![
//!         Arc::new(Rows { index: 0, count: 1 }),
//!         Arc::new(Rows { index: 1, count: 3 }),
//!     ],
//!     PropagationMode::Section,
//! );
//!
//! let table = VirtualTableView::new();
//! assert_eq!(root.number_of_sections(&table), 2);
//! assert_eq!(root.number_of_rows_in_section(&table, 1), 3);
//! assert_eq!(root.number_of_rows_in_section(&table, 5), 0);
//! ```
//!
//! # Not propagated
//!
//! Section index titles, row moves, focus-update notifications and move
//! target redirection have no single obvious owner among the children and
//! are not part of the delegate surface.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::config::{CascadeConfig, ValidationPolicy};
use crate::error::Result;
use crate::index::IndexPath;
use crate::logging::targets;
use crate::traits::{Capability, CascadingTableDelegate, TableDataSource, TableDelegate, TableView};
use crate::validation::{ValidationIssue, validate_children};
use crate::view::{
    AUTOMATIC_DIMENSION, EditingStyle, HeaderFooterView, MenuAction, RowAction, TableCell,
};

/// Selects which component of an [`IndexPath`] picks the child that answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropagationMode {
    /// Children are addressed by `index_path.row()`.
    ///
    /// The node reports `children.len()` rows for any section and zero
    /// sections; section-addressed callbacks always answer neutral.
    Row,
    /// Children are addressed by `index_path.section()`.
    ///
    /// The node reports `children.len()` sections. The row count of section
    /// `s` comes from the child whose [`index`](CascadingTableDelegate::index)
    /// equals `s`.
    #[default]
    Section,
}

/// A [`CascadingTableDelegate`] that forwards every callback to one of its
/// child delegates, chosen by its [`PropagationMode`].
///
/// Nodes are created behind an [`Arc`] so they can hand their children a
/// weak back-reference. All setters take `&self`; the children list, index
/// and mode live behind locks so a node stays usable while it is itself a
/// child of another node.
///
/// Nothing is cached: every call resolves its child afresh.
pub struct PropagatingTableDelegate {
    /// Position among the parent's children.
    index: RwLock<usize>,
    /// Owned children, addressed by position.
    children: RwLock<Vec<Arc<dyn CascadingTableDelegate>>>,
    /// Non-owning back-reference to the parent.
    parent: RwLock<Option<Weak<dyn CascadingTableDelegate>>>,
    mode: RwLock<PropagationMode>,
    /// Outcome of the most recent children check.
    issues: RwLock<Vec<ValidationIssue>>,
    config: CascadeConfig,
    this: Weak<PropagatingTableDelegate>,
}

impl PropagatingTableDelegate {
    /// Creates a section-mode node with the default configuration.
    pub fn new(index: usize, children: Vec<Arc<dyn CascadingTableDelegate>>) -> Arc<Self> {
        Self::with_config(index, children, CascadeConfig::default())
    }

    /// Creates a node with an explicit propagation mode.
    pub fn with_mode(
        index: usize,
        children: Vec<Arc<dyn CascadingTableDelegate>>,
        mode: PropagationMode,
    ) -> Arc<Self> {
        Self::with_config(
            index,
            children,
            CascadeConfig::default().with_default_mode(mode),
        )
    }

    /// Creates a node using `config.default_mode` and `config.validation`.
    pub fn with_config(
        index: usize,
        children: Vec<Arc<dyn CascadingTableDelegate>>,
        config: CascadeConfig,
    ) -> Arc<Self> {
        let node = Arc::new_cyclic(|this| Self {
            index: RwLock::new(index),
            children: RwLock::new(Vec::new()),
            parent: RwLock::new(None),
            mode: RwLock::new(config.default_mode),
            issues: RwLock::new(Vec::new()),
            config,
            this: this.clone(),
        });
        node.set_child_delegates(children);
        node
    }

    /// Sets this node's position among its siblings.
    ///
    /// The parent is not re-validated; reassign the parent's children to
    /// re-run its check.
    pub fn set_index(&self, index: usize) {
        *self.index.write() = index;
    }

    /// Returns the propagation mode.
    pub fn propagation_mode(&self) -> PropagationMode {
        *self.mode.read()
    }

    /// Sets the propagation mode.
    pub fn set_propagation_mode(&self, mode: PropagationMode) {
        *self.mode.write() = mode;
    }

    /// Replaces the children wholesale.
    ///
    /// Every child's parent is set to this node and the consistency check
    /// runs again, even if the new list equals the old one. Children that
    /// are not in the new list get a dead parent reference.
    pub fn set_child_delegates(&self, children: Vec<Arc<dyn CascadingTableDelegate>>) {
        let parent: Weak<dyn CascadingTableDelegate> = self.this.clone();
        for child in &children {
            child.set_parent_delegate(parent.clone());
        }

        let removed = std::mem::replace(&mut *self.children.write(), children);
        let current = self.child_delegates();
        for old in removed {
            if !current.iter().any(|child| Arc::ptr_eq(child, &old)) {
                let orphan: Weak<dyn CascadingTableDelegate> = Weak::<Self>::new();
                old.set_parent_delegate(orphan);
            }
        }

        self.validate_child_delegates();
    }

    /// Returns the number of children.
    pub fn child_count(&self) -> usize {
        self.children.read().len()
    }

    /// Returns the issues found by the most recent children check.
    pub fn validation_issues(&self) -> Vec<ValidationIssue> {
        self.issues.read().clone()
    }

    /// Runs the children check now, regardless of the validation policy.
    ///
    /// Returns the first issue as an error. Useful in tests that assemble
    /// trees and want inconsistencies to fail loudly.
    pub fn ensure_consistent(&self) -> Result<()> {
        match validate_children(&self.children.read()).into_iter().next() {
            Some(issue) => Err(issue.into()),
            None => Ok(()),
        }
    }

    /// Returns the configuration this node was built with.
    pub fn config(&self) -> &CascadeConfig {
        &self.config
    }

    fn validate_child_delegates(&self) {
        let issues = match self.config.validation {
            ValidationPolicy::Ignore => Vec::new(),
            ValidationPolicy::Log | ValidationPolicy::DebugAssert => {
                validate_children(&self.children.read())
            }
        };

        let index = self.index();
        for issue in &issues {
            tracing::warn!(target: targets::VALIDATION, index, %issue, "inconsistent child delegates");
        }

        if self.config.validation == ValidationPolicy::DebugAssert {
            debug_assert!(
                issues.is_empty(),
                "inconsistent child delegates under index {index}: {issues:?}"
            );
        }

        *self.issues.write() = issues;
    }

    /// Resolves the child addressed by `index_path` under the current mode.
    ///
    /// The child is cloned out of the lock so a forwarded call may re-enter
    /// this node.
    fn child_for_row(&self, index_path: IndexPath) -> Option<Arc<dyn CascadingTableDelegate>> {
        let position = match self.propagation_mode() {
            PropagationMode::Row => index_path.row(),
            PropagationMode::Section => index_path.section(),
        };

        let child = self.children.read().get(position).cloned();
        if child.is_none() {
            tracing::trace!(target: targets::PROPAGATION, %index_path, "no child for index path");
        }
        child
    }

    /// Resolves the child for a section-addressed callback.
    ///
    /// Only section mode forwards these.
    fn child_for_section(&self, section: usize) -> Option<Arc<dyn CascadingTableDelegate>> {
        if self.propagation_mode() != PropagationMode::Section {
            tracing::trace!(target: targets::PROPAGATION, section, "section callback in row mode");
            return None;
        }

        let child = self.children.read().get(section).cloned();
        if child.is_none() {
            tracing::trace!(target: targets::PROPAGATION, section, "no child for section");
        }
        child
    }

    fn forward_row<T>(
        &self,
        index_path: IndexPath,
        neutral: T,
        call: impl FnOnce(&dyn CascadingTableDelegate) -> T,
    ) -> T {
        match self.child_for_row(index_path) {
            Some(child) => call(child.as_ref()),
            None => neutral,
        }
    }

    fn forward_section<T>(
        &self,
        section: usize,
        neutral: T,
        call: impl FnOnce(&dyn CascadingTableDelegate) -> T,
    ) -> T {
        match self.child_for_section(section) {
            Some(child) => call(child.as_ref()),
            None => neutral,
        }
    }
}

impl fmt::Debug for PropagatingTableDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropagatingTableDelegate")
            .field("index", &self.index())
            .field("mode", &self.propagation_mode())
            .field("child_count", &self.child_count())
            .field("config", &self.config)
            .finish()
    }
}

impl CascadingTableDelegate for PropagatingTableDelegate {
    fn index(&self) -> usize {
        *self.index.read()
    }

    fn set_parent_delegate(&self, parent: Weak<dyn CascadingTableDelegate>) {
        *self.parent.write() = Some(parent);
    }

    fn parent_delegate(&self) -> Option<Arc<dyn CascadingTableDelegate>> {
        self.parent.read().as_ref().and_then(Weak::upgrade)
    }

    fn child_delegates(&self) -> Vec<Arc<dyn CascadingTableDelegate>> {
        self.children.read().clone()
    }

    fn prepare(&self, table_view: &mut dyn TableView) {
        let children = self.child_delegates();
        tracing::debug!(
            target: targets::PROPAGATION,
            index = self.index(),
            children = children.len(),
            "preparing child delegates"
        );

        for child in children {
            child.prepare(table_view);
        }
    }

    fn responds_to(&self, capability: Capability) -> bool {
        if !capability.is_estimated_height() {
            return true;
        }

        self.child_delegates()
            .iter()
            .any(|child| child.responds_to(capability))
    }

    fn debug_name(&self) -> &'static str {
        "PropagatingTableDelegate"
    }
}

// =============================================================================
// Data source
// =============================================================================

impl TableDataSource for PropagatingTableDelegate {
    fn number_of_rows_in_section(&self, table_view: &dyn TableView, section: usize) -> usize {
        match self.propagation_mode() {
            PropagationMode::Row => self.child_count(),
            PropagationMode::Section => {
                // Matched by reported index, not position; the first match wins.
                let child = self
                    .children
                    .read()
                    .iter()
                    .find(|child| child.index() == section)
                    .cloned();

                child.map_or(0, |child| {
                    child.number_of_rows_in_section(table_view, section)
                })
            }
        }
    }

    fn cell_for_row(&self, table_view: &dyn TableView, index_path: IndexPath) -> TableCell {
        self.forward_row(index_path, TableCell::default(), |child| {
            child.cell_for_row(table_view, index_path)
        })
    }

    fn number_of_sections(&self, _table_view: &dyn TableView) -> usize {
        match self.propagation_mode() {
            PropagationMode::Section => self.child_count(),
            PropagationMode::Row => 0,
        }
    }

    fn title_for_header_in_section(
        &self,
        table_view: &dyn TableView,
        section: usize,
    ) -> Option<String> {
        self.forward_section(section, None, |child| {
            child.title_for_header_in_section(table_view, section)
        })
    }

    fn title_for_footer_in_section(
        &self,
        table_view: &dyn TableView,
        section: usize,
    ) -> Option<String> {
        self.forward_section(section, None, |child| {
            child.title_for_footer_in_section(table_view, section)
        })
    }

    fn can_edit_row(&self, table_view: &dyn TableView, index_path: IndexPath) -> bool {
        self.forward_row(index_path, false, |child| {
            child.can_edit_row(table_view, index_path)
        })
    }

    fn can_move_row(&self, table_view: &dyn TableView, index_path: IndexPath) -> bool {
        self.forward_row(index_path, false, |child| {
            child.can_move_row(table_view, index_path)
        })
    }

    fn commit_editing(&self, table_view: &dyn TableView, style: EditingStyle, index_path: IndexPath) {
        self.forward_row(index_path, (), |child| {
            child.commit_editing(table_view, style, index_path)
        });
    }
}

// =============================================================================
// Delegate
// =============================================================================

impl TableDelegate for PropagatingTableDelegate {
    // -------------------------------------------------------------------------
    // Display customization
    // -------------------------------------------------------------------------

    fn will_display_cell(&self, table_view: &dyn TableView, cell: &TableCell, index_path: IndexPath) {
        self.forward_row(index_path, (), |child| {
            child.will_display_cell(table_view, cell, index_path)
        });
    }

    fn will_display_header_view(
        &self,
        table_view: &dyn TableView,
        view: &HeaderFooterView,
        section: usize,
    ) {
        self.forward_section(section, (), |child| {
            child.will_display_header_view(table_view, view, section)
        });
    }

    fn will_display_footer_view(
        &self,
        table_view: &dyn TableView,
        view: &HeaderFooterView,
        section: usize,
    ) {
        self.forward_section(section, (), |child| {
            child.will_display_footer_view(table_view, view, section)
        });
    }

    fn did_end_displaying_cell(
        &self,
        table_view: &dyn TableView,
        cell: &TableCell,
        index_path: IndexPath,
    ) {
        self.forward_row(index_path, (), |child| {
            child.did_end_displaying_cell(table_view, cell, index_path)
        });
    }

    fn did_end_displaying_header_view(
        &self,
        table_view: &dyn TableView,
        view: &HeaderFooterView,
        section: usize,
    ) {
        self.forward_section(section, (), |child| {
            child.did_end_displaying_header_view(table_view, view, section)
        });
    }

    fn did_end_displaying_footer_view(
        &self,
        table_view: &dyn TableView,
        view: &HeaderFooterView,
        section: usize,
    ) {
        self.forward_section(section, (), |child| {
            child.did_end_displaying_footer_view(table_view, view, section)
        });
    }

    // -------------------------------------------------------------------------
    // Heights
    // -------------------------------------------------------------------------

    fn height_for_row(&self, table_view: &dyn TableView, index_path: IndexPath) -> f32 {
        self.forward_row(index_path, AUTOMATIC_DIMENSION, |child| {
            child.height_for_row(table_view, index_path)
        })
    }

    fn height_for_header_in_section(&self, table_view: &dyn TableView, section: usize) -> f32 {
        self.forward_section(section, 0.0, |child| {
            child.height_for_header_in_section(table_view, section)
        })
    }

    fn height_for_footer_in_section(&self, table_view: &dyn TableView, section: usize) -> f32 {
        self.forward_section(section, 0.0, |child| {
            child.height_for_footer_in_section(table_view, section)
        })
    }

    // The table asks for estimates from the whole tree once any child provides
    // them, so children without estimates answer with their exact height.

    fn estimated_height_for_row(&self, table_view: &dyn TableView, index_path: IndexPath) -> f32 {
        self.forward_row(index_path, AUTOMATIC_DIMENSION, |child| {
            if child.responds_to(Capability::EstimatedHeightForRow) {
                child.estimated_height_for_row(table_view, index_path)
            } else {
                child.height_for_row(table_view, index_path)
            }
        })
    }

    fn estimated_height_for_header_in_section(
        &self,
        table_view: &dyn TableView,
        section: usize,
    ) -> f32 {
        self.forward_section(section, 0.0, |child| {
            if child.responds_to(Capability::EstimatedHeightForHeader) {
                child.estimated_height_for_header_in_section(table_view, section)
            } else {
                child.height_for_header_in_section(table_view, section)
            }
        })
    }

    fn estimated_height_for_footer_in_section(
        &self,
        table_view: &dyn TableView,
        section: usize,
    ) -> f32 {
        self.forward_section(section, 0.0, |child| {
            if child.responds_to(Capability::EstimatedHeightForFooter) {
                child.estimated_height_for_footer_in_section(table_view, section)
            } else {
                child.height_for_footer_in_section(table_view, section)
            }
        })
    }

    // -------------------------------------------------------------------------
    // Header and footer views
    // -------------------------------------------------------------------------

    fn view_for_header_in_section(
        &self,
        table_view: &dyn TableView,
        section: usize,
    ) -> Option<HeaderFooterView> {
        self.forward_section(section, None, |child| {
            child.view_for_header_in_section(table_view, section)
        })
    }

    fn view_for_footer_in_section(
        &self,
        table_view: &dyn TableView,
        section: usize,
    ) -> Option<HeaderFooterView> {
        self.forward_section(section, None, |child| {
            child.view_for_footer_in_section(table_view, section)
        })
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    fn editing_style_for_row(&self, table_view: &dyn TableView, index_path: IndexPath) -> EditingStyle {
        self.forward_row(index_path, EditingStyle::None, |child| {
            child.editing_style_for_row(table_view, index_path)
        })
    }

    fn title_for_delete_confirmation_button(
        &self,
        table_view: &dyn TableView,
        index_path: IndexPath,
    ) -> Option<String> {
        self.forward_row(index_path, None, |child| {
            child.title_for_delete_confirmation_button(table_view, index_path)
        })
    }

    fn edit_actions_for_row(
        &self,
        table_view: &dyn TableView,
        index_path: IndexPath,
    ) -> Option<Vec<RowAction>> {
        self.forward_row(index_path, None, |child| {
            child.edit_actions_for_row(table_view, index_path)
        })
    }

    fn should_indent_while_editing_row(&self, table_view: &dyn TableView, index_path: IndexPath) -> bool {
        self.forward_row(index_path, false, |child| {
            child.should_indent_while_editing_row(table_view, index_path)
        })
    }

    fn will_begin_editing_row(&self, table_view: &dyn TableView, index_path: IndexPath) {
        self.forward_row(index_path, (), |child| {
            child.will_begin_editing_row(table_view, index_path)
        });
    }

    fn did_end_editing_row(&self, table_view: &dyn TableView, index_path: Option<IndexPath>) {
        let Some(path) = index_path else {
            return;
        };

        self.forward_row(path, (), |child| {
            child.did_end_editing_row(table_view, index_path)
        });
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    fn accessory_button_tapped(&self, table_view: &dyn TableView, index_path: IndexPath) {
        self.forward_row(index_path, (), |child| {
            child.accessory_button_tapped(table_view, index_path)
        });
    }

    fn should_highlight_row(&self, table_view: &dyn TableView, index_path: IndexPath) -> bool {
        self.forward_row(index_path, true, |child| {
            child.should_highlight_row(table_view, index_path)
        })
    }

    fn did_highlight_row(&self, table_view: &dyn TableView, index_path: IndexPath) {
        self.forward_row(index_path, (), |child| {
            child.did_highlight_row(table_view, index_path)
        });
    }

    fn did_unhighlight_row(&self, table_view: &dyn TableView, index_path: IndexPath) {
        self.forward_row(index_path, (), |child| {
            child.did_unhighlight_row(table_view, index_path)
        });
    }

    // A `None` answer cancels the selection, so a child without the hook
    // keeps the proposed path.

    fn will_select_row(&self, table_view: &dyn TableView, index_path: IndexPath) -> Option<IndexPath> {
        self.forward_row(index_path, Some(index_path), |child| {
            if child.responds_to(Capability::WillSelectRow) {
                child.will_select_row(table_view, index_path)
            } else {
                Some(index_path)
            }
        })
    }

    fn will_deselect_row(
        &self,
        table_view: &dyn TableView,
        index_path: IndexPath,
    ) -> Option<IndexPath> {
        self.forward_row(index_path, Some(index_path), |child| {
            if child.responds_to(Capability::WillDeselectRow) {
                child.will_deselect_row(table_view, index_path)
            } else {
                Some(index_path)
            }
        })
    }

    fn did_select_row(&self, table_view: &dyn TableView, index_path: IndexPath) {
        self.forward_row(index_path, (), |child| {
            child.did_select_row(table_view, index_path)
        });
    }

    fn did_deselect_row(&self, table_view: &dyn TableView, index_path: IndexPath) {
        self.forward_row(index_path, (), |child| {
            child.did_deselect_row(table_view, index_path)
        });
    }

    // -------------------------------------------------------------------------
    // Edit menu
    // -------------------------------------------------------------------------

    fn should_show_menu_for_row(&self, table_view: &dyn TableView, index_path: IndexPath) -> bool {
        self.forward_row(index_path, false, |child| {
            child.should_show_menu_for_row(table_view, index_path)
        })
    }

    fn can_perform_action(
        &self,
        table_view: &dyn TableView,
        action: MenuAction,
        index_path: IndexPath,
        sender: Option<&dyn Any>,
    ) -> bool {
        self.forward_row(index_path, false, |child| {
            child.can_perform_action(table_view, action, index_path, sender)
        })
    }

    fn perform_action(
        &self,
        table_view: &dyn TableView,
        action: MenuAction,
        index_path: IndexPath,
        sender: Option<&dyn Any>,
    ) {
        self.forward_row(index_path, (), |child| {
            child.perform_action(table_view, action, index_path, sender)
        });
    }

    // -------------------------------------------------------------------------
    // Focus and indentation
    // -------------------------------------------------------------------------

    fn can_focus_row(&self, table_view: &dyn TableView, index_path: IndexPath) -> bool {
        self.forward_row(index_path, false, |child| {
            child.can_focus_row(table_view, index_path)
        })
    }

    fn indentation_level_for_row(&self, table_view: &dyn TableView, index_path: IndexPath) -> usize {
        self.forward_row(index_path, 0, |child| {
            child.indentation_level_for_row(table_view, index_path)
        })
    }
}

static_assertions::assert_impl_all!(PropagatingTableDelegate: Send, Sync);
