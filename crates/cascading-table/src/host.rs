//! An in-memory table that drives a delegate tree.
//!
//! [`VirtualTableView`] implements [`TableView`] and plays the part of a
//! toolkit's layout engine: it asks the delegate for sections, rows, cells
//! and heights, and runs the highlight/selection, editing and edit-menu
//! sequences a real table would. It is the reference driver for delegate
//! trees and the host used by this crate's tests.
//!
//! # Example
//!
//! ```
//! use cascading_table::{PropagatingTableDelegate, VirtualTableView};
//!
//! let root = PropagatingTableDelegate::new(0, Vec::new());
//! let mut table = VirtualTableView::new();
//! let layout = table.load(root.as_ref());
//!
//! assert_eq!(layout.row_count(), 0);
//! ```

use std::any::Any;
use std::collections::{BTreeSet, HashSet};

use crate::index::IndexPath;
use crate::logging::targets;
use crate::traits::{Capability, CascadingTableDelegate, TableView};
use crate::view::{AUTOMATIC_DIMENSION, EditingStyle, HeaderFooterView, MenuAction, TableCell};

/// Height used for rows whose delegate answers [`AUTOMATIC_DIMENSION`].
pub const DEFAULT_ROW_HEIGHT: f32 = 44.0;

/// A laid-out row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    /// Position of the row.
    pub index_path: IndexPath,
    /// The cell the data source produced.
    pub cell: TableCell,
    /// Height reported by the delegate (may be [`AUTOMATIC_DIMENSION`]).
    pub height: f32,
    /// Estimated height, if the delegate provides estimates.
    pub estimated_height: Option<f32>,
    /// Indentation level reported by the delegate.
    pub indentation_level: usize,
}

impl RowLayout {
    /// Returns the height the row occupies on screen.
    pub fn resolved_height(&self) -> f32 {
        if self.height == AUTOMATIC_DIMENSION {
            DEFAULT_ROW_HEIGHT
        } else {
            self.height
        }
    }
}

/// A laid-out section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionLayout {
    /// Section number.
    pub section: usize,
    /// Plain-text header title.
    pub header_title: Option<String>,
    /// Plain-text footer title.
    pub footer_title: Option<String>,
    /// Custom header view.
    pub header_view: Option<HeaderFooterView>,
    /// Custom footer view.
    pub footer_view: Option<HeaderFooterView>,
    /// Header height.
    pub header_height: f32,
    /// Footer height.
    pub footer_height: f32,
    /// Estimated header height, if the delegate provides estimates.
    pub estimated_header_height: Option<f32>,
    /// Estimated footer height, if the delegate provides estimates.
    pub estimated_footer_height: Option<f32>,
    /// Rows in display order.
    pub rows: Vec<RowLayout>,
}

/// The result of one layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableLayout {
    /// Sections in display order.
    pub sections: Vec<SectionLayout>,
}

impl TableLayout {
    /// Total number of rows across all sections.
    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }

    /// Returns the row at `index_path`.
    pub fn row(&self, index_path: IndexPath) -> Option<&RowLayout> {
        self.sections
            .get(index_path.section())
            .and_then(|s| s.rows.get(index_path.row()))
    }

    /// Total height of headers, rows and footers.
    pub fn content_height(&self) -> f32 {
        self.sections
            .iter()
            .map(|s| {
                s.header_height
                    + s.footer_height
                    + s.rows.iter().map(RowLayout::resolved_height).sum::<f32>()
            })
            .sum()
    }
}

/// An in-memory [`TableView`].
#[derive(Debug, Default)]
pub struct VirtualTableView {
    cell_identifiers: HashSet<String>,
    header_footer_identifiers: HashSet<String>,
    selected: BTreeSet<IndexPath>,
    allows_multiple_selection: bool,
}

impl VirtualTableView {
    /// Creates an empty table with single selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allows more than one row to be selected at a time.
    pub fn with_multiple_selection(mut self, allows: bool) -> Self {
        self.allows_multiple_selection = allows;
        self
    }

    /// Attaches `delegate`: runs its `prepare` pass, then lays the table out
    /// and reports every cell, header and footer as displayed.
    pub fn load(&mut self, delegate: &dyn CascadingTableDelegate) -> TableLayout {
        let _span = tracing::debug_span!(target: targets::HOST, "load").entered();

        delegate.prepare(self);
        let layout = self.layout(delegate);
        self.display(delegate, &layout);
        layout
    }

    /// Queries `delegate` for a complete layout. Nothing is cached.
    pub fn layout(&self, delegate: &dyn CascadingTableDelegate) -> TableLayout {
        let estimate_rows = delegate.responds_to(Capability::EstimatedHeightForRow);
        let estimate_headers = delegate.responds_to(Capability::EstimatedHeightForHeader);
        let estimate_footers = delegate.responds_to(Capability::EstimatedHeightForFooter);

        let section_count = delegate.number_of_sections(self);
        let mut sections = Vec::with_capacity(section_count);

        for section in 0..section_count {
            let row_count = delegate.number_of_rows_in_section(self, section);
            let rows = (0..row_count)
                .map(|row| {
                    let index_path = IndexPath::new(section, row);
                    RowLayout {
                        index_path,
                        cell: delegate.cell_for_row(self, index_path),
                        height: delegate.height_for_row(self, index_path),
                        estimated_height: estimate_rows
                            .then(|| delegate.estimated_height_for_row(self, index_path)),
                        indentation_level: delegate.indentation_level_for_row(self, index_path),
                    }
                })
                .collect();

            sections.push(SectionLayout {
                section,
                header_title: delegate.title_for_header_in_section(self, section),
                footer_title: delegate.title_for_footer_in_section(self, section),
                header_view: delegate.view_for_header_in_section(self, section),
                footer_view: delegate.view_for_footer_in_section(self, section),
                header_height: delegate.height_for_header_in_section(self, section),
                footer_height: delegate.height_for_footer_in_section(self, section),
                estimated_header_height: estimate_headers
                    .then(|| delegate.estimated_height_for_header_in_section(self, section)),
                estimated_footer_height: estimate_footers
                    .then(|| delegate.estimated_height_for_footer_in_section(self, section)),
                rows,
            });
        }

        tracing::debug!(
            target: targets::HOST,
            sections = sections.len(),
            "laid out table"
        );
        TableLayout { sections }
    }

    /// Reports every cell and header/footer view in `layout` as displayed.
    pub fn display(&self, delegate: &dyn CascadingTableDelegate, layout: &TableLayout) {
        for section in &layout.sections {
            if let Some(view) = &section.header_view {
                delegate.will_display_header_view(self, view, section.section);
            }
            for row in &section.rows {
                delegate.will_display_cell(self, &row.cell, row.index_path);
            }
            if let Some(view) = &section.footer_view {
                delegate.will_display_footer_view(self, view, section.section);
            }
        }
    }

    /// Reports every cell and header/footer view in `layout` as gone.
    pub fn end_display(&self, delegate: &dyn CascadingTableDelegate, layout: &TableLayout) {
        for section in &layout.sections {
            if let Some(view) = &section.header_view {
                delegate.did_end_displaying_header_view(self, view, section.section);
            }
            for row in &section.rows {
                delegate.did_end_displaying_cell(self, &row.cell, row.index_path);
            }
            if let Some(view) = &section.footer_view {
                delegate.did_end_displaying_footer_view(self, view, section.section);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Runs a tap on the row at `index_path`.
    ///
    /// Returns the path that ended up selected: the delegate may redirect the
    /// selection or cancel it (`None`). With single selection, the previous
    /// selection is deselected first.
    pub fn select_row(
        &mut self,
        delegate: &dyn CascadingTableDelegate,
        index_path: IndexPath,
    ) -> Option<IndexPath> {
        if !delegate.should_highlight_row(self, index_path) {
            tracing::trace!(target: targets::HOST, %index_path, "highlight refused");
            return None;
        }

        delegate.did_highlight_row(self, index_path);
        let target = delegate.will_select_row(self, index_path);
        delegate.did_unhighlight_row(self, index_path);

        let target = target?;

        if !self.allows_multiple_selection {
            let previous: Vec<IndexPath> = self
                .selected
                .iter()
                .copied()
                .filter(|p| *p != target)
                .collect();
            for path in previous {
                self.deselect_row(delegate, path);
            }
        }

        self.selected.insert(target);
        delegate.did_select_row(self, target);
        Some(target)
    }

    /// Deselects the row at `index_path` if it is selected.
    ///
    /// Returns the path that ended up deselected.
    pub fn deselect_row(
        &mut self,
        delegate: &dyn CascadingTableDelegate,
        index_path: IndexPath,
    ) -> Option<IndexPath> {
        if !self.selected.contains(&index_path) {
            return None;
        }

        let target = delegate.will_deselect_row(self, index_path)?;
        if !self.selected.remove(&target) {
            return None;
        }

        delegate.did_deselect_row(self, target);
        Some(target)
    }

    /// Returns the selected rows in order.
    pub fn selected_rows(&self) -> Vec<IndexPath> {
        self.selected.iter().copied().collect()
    }

    /// Returns `true` if the row at `index_path` is selected.
    pub fn is_selected(&self, index_path: IndexPath) -> bool {
        self.selected.contains(&index_path)
    }

    /// Taps the accessory button of the row at `index_path`.
    pub fn tap_accessory(&self, delegate: &dyn CascadingTableDelegate, index_path: IndexPath) {
        delegate.accessory_button_tapped(self, index_path);
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Puts the row into editing mode if the data source allows it.
    pub fn begin_editing_row(
        &self,
        delegate: &dyn CascadingTableDelegate,
        index_path: IndexPath,
    ) -> bool {
        if !delegate.can_edit_row(self, index_path) {
            return false;
        }

        delegate.will_begin_editing_row(self, index_path);
        true
    }

    /// Takes the row out of editing mode.
    pub fn end_editing_row(&self, delegate: &dyn CascadingTableDelegate, index_path: IndexPath) {
        delegate.did_end_editing_row(self, Some(index_path));
    }

    /// Confirms the row's editing control.
    ///
    /// Returns the committed style, or `None` if the row has no control.
    pub fn commit_editing_row(
        &self,
        delegate: &dyn CascadingTableDelegate,
        index_path: IndexPath,
    ) -> Option<EditingStyle> {
        match delegate.editing_style_for_row(self, index_path) {
            EditingStyle::None => None,
            style => {
                delegate.commit_editing(self, style, index_path);
                Some(style)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Edit menu
    // -------------------------------------------------------------------------

    /// Runs an edit-menu action on the row.
    ///
    /// Returns `true` if the menu was shown and the action performed.
    pub fn perform_menu_action(
        &self,
        delegate: &dyn CascadingTableDelegate,
        action: MenuAction,
        index_path: IndexPath,
        sender: Option<&dyn Any>,
    ) -> bool {
        if !delegate.should_show_menu_for_row(self, index_path)
            || !delegate.can_perform_action(self, action, index_path, sender)
        {
            return false;
        }

        delegate.perform_action(self, action, index_path, sender);
        true
    }
}

impl TableView for VirtualTableView {
    fn register_cell(&mut self, reuse_identifier: &str) {
        tracing::trace!(target: targets::HOST, reuse_identifier, "registered cell");
        self.cell_identifiers.insert(reuse_identifier.to_owned());
    }

    fn register_header_footer_view(&mut self, reuse_identifier: &str) {
        tracing::trace!(target: targets::HOST, reuse_identifier, "registered header/footer view");
        self.header_footer_identifiers
            .insert(reuse_identifier.to_owned());
    }

    fn is_cell_registered(&self, reuse_identifier: &str) -> bool {
        self.cell_identifiers.contains(reuse_identifier)
    }

    fn dequeue_reusable_cell(&self, reuse_identifier: &str, index_path: IndexPath) -> TableCell {
        if !self.is_cell_registered(reuse_identifier) {
            tracing::warn!(
                target: targets::HOST,
                reuse_identifier,
                %index_path,
                "dequeued unregistered cell identifier"
            );
        }

        TableCell::new(reuse_identifier).with_index_path(index_path)
    }

    fn dequeue_header_footer_view(&self, reuse_identifier: &str) -> Option<HeaderFooterView> {
        self.header_footer_identifiers
            .contains(reuse_identifier)
            .then(|| HeaderFooterView::new(reuse_identifier))
    }
}

static_assertions::assert_impl_all!(VirtualTableView: Send, Sync);
