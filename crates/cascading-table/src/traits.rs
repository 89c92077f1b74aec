//! Core traits for cascading table delegates.
//!
//! A table asks two collaborators for everything it shows: a
//! [`TableDataSource`] (what rows exist and which cell each one gets) and a
//! [`TableDelegate`] (heights, selection, editing, menus, display
//! notifications). [`CascadingTableDelegate`] combines both with the
//! bookkeeping needed to arrange delegates in a tree, so every visual
//! section of a table can be written and tested on its own.
//!
//! Every optional callback has a default implementation that returns the
//! callback's *neutral* value. A delegate that does not override a callback
//! therefore answers exactly like a missing delegate would.
//!
//! # Implementing a section
//!
//! ```
//! use std::sync::Arc;
//! use cascading_table::{
//!     CascadingTableDelegate, IndexPath, TableCell, TableDataSource, TableDelegate, TableView,
//! };
//!
//! struct TitleSection {
//!     index: usize,
//! }
//!
//! impl TableDataSource for TitleSection {
//!     fn number_of_rows_in_section(&self, _table_view: &dyn TableView, _section: usize) -> usize {
//!         1
//!     }
//!
//!     fn cell_for_row(&self, table_view: &dyn TableView, index_path: IndexPath) -> TableCell {
//!         table_view
//!             .dequeue_reusable_cell("title", index_path)
//!             .with_text("Bali")
//!     }
//! }
//!
//! impl TableDelegate for TitleSection {
//!     fn height_for_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) -> f32 {
//!         88.0
//!     }
//! }
//!
//! impl CascadingTableDelegate for TitleSection {
//!     fn index(&self) -> usize {
//!         self.index
//!     }
//!
//!     fn prepare(&self, table_view: &mut dyn TableView) {
//!         table_view.register_cell("title");
//!     }
//! }
//!
//! let section: Arc<dyn CascadingTableDelegate> = Arc::new(TitleSection { index: 0 });
//! assert_eq!(section.index(), 0);
//! ```

use std::any::Any;
use std::sync::{Arc, Weak};

use crate::index::IndexPath;
use crate::view::{
    AUTOMATIC_DIMENSION, EditingStyle, HeaderFooterView, MenuAction, RowAction, TableCell,
};

/// The table a delegate tree is attached to.
///
/// Delegates use it to register reusable cell identifiers once (from
/// [`CascadingTableDelegate::prepare`]) and to dequeue cells while
/// answering [`TableDataSource::cell_for_row`].
pub trait TableView {
    /// Registers a reusable cell identifier.
    fn register_cell(&mut self, reuse_identifier: &str);

    /// Registers a reusable header/footer view identifier.
    fn register_header_footer_view(&mut self, reuse_identifier: &str);

    /// Returns `true` if a cell identifier has been registered.
    fn is_cell_registered(&self, reuse_identifier: &str) -> bool;

    /// Returns a cell for `reuse_identifier`, prepared for `index_path`.
    fn dequeue_reusable_cell(&self, reuse_identifier: &str, index_path: IndexPath) -> TableCell;

    /// Returns a header/footer view for `reuse_identifier`.
    ///
    /// Returns `None` if the identifier was never registered.
    fn dequeue_header_footer_view(&self, reuse_identifier: &str) -> Option<HeaderFooterView>;
}

/// Optional callbacks whose *presence* changes how a table behaves.
///
/// A table only asks for estimated heights when the delegate says it
/// provides them, and a missing will-select/will-deselect hook means "keep
/// the proposed index path" rather than "cancel". Delegates declare these
/// through [`CascadingTableDelegate::responds_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// [`TableDelegate::estimated_height_for_row`].
    EstimatedHeightForRow,
    /// [`TableDelegate::estimated_height_for_header_in_section`].
    EstimatedHeightForHeader,
    /// [`TableDelegate::estimated_height_for_footer_in_section`].
    EstimatedHeightForFooter,
    /// [`TableDelegate::will_select_row`].
    WillSelectRow,
    /// [`TableDelegate::will_deselect_row`].
    WillDeselectRow,
}

impl Capability {
    /// The capabilities a propagating delegate answers on behalf of *any* child.
    pub const ESTIMATED_HEIGHTS: [Capability; 3] = [
        Capability::EstimatedHeightForRow,
        Capability::EstimatedHeightForHeader,
        Capability::EstimatedHeightForFooter,
    ];

    /// Returns `true` for the estimated-height capabilities.
    pub fn is_estimated_height(&self) -> bool {
        Self::ESTIMATED_HEIGHTS.contains(self)
    }
}

/// Supplies the rows and cells of a table.
pub trait TableDataSource {
    /// Returns the number of rows in `section`.
    fn number_of_rows_in_section(&self, table_view: &dyn TableView, section: usize) -> usize;

    /// Returns the cell for the row at `index_path`.
    fn cell_for_row(&self, table_view: &dyn TableView, index_path: IndexPath) -> TableCell;

    /// Returns the number of sections. Defaults to `0`.
    fn number_of_sections(&self, _table_view: &dyn TableView) -> usize {
        0
    }

    /// Returns the plain-text header title for `section`.
    fn title_for_header_in_section(
        &self,
        _table_view: &dyn TableView,
        _section: usize,
    ) -> Option<String> {
        None
    }

    /// Returns the plain-text footer title for `section`.
    fn title_for_footer_in_section(
        &self,
        _table_view: &dyn TableView,
        _section: usize,
    ) -> Option<String> {
        None
    }

    /// Returns `true` if the row may enter editing mode.
    fn can_edit_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) -> bool {
        false
    }

    /// Returns `true` if the row may be reordered.
    fn can_move_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) -> bool {
        false
    }

    /// Commits an insertion or deletion for the row.
    fn commit_editing(
        &self,
        _table_view: &dyn TableView,
        _style: EditingStyle,
        _index_path: IndexPath,
    ) {
    }
}

/// Customizes display, layout, editing and selection of a table.
pub trait TableDelegate {
    // -------------------------------------------------------------------------
    // Display customization
    // -------------------------------------------------------------------------

    /// Called before `cell` is displayed at `index_path`.
    fn will_display_cell(
        &self,
        _table_view: &dyn TableView,
        _cell: &TableCell,
        _index_path: IndexPath,
    ) {
    }

    /// Called before a header view is displayed for `section`.
    fn will_display_header_view(
        &self,
        _table_view: &dyn TableView,
        _view: &HeaderFooterView,
        _section: usize,
    ) {
    }

    /// Called before a footer view is displayed for `section`.
    fn will_display_footer_view(
        &self,
        _table_view: &dyn TableView,
        _view: &HeaderFooterView,
        _section: usize,
    ) {
    }

    /// Called after `cell` left the screen.
    fn did_end_displaying_cell(
        &self,
        _table_view: &dyn TableView,
        _cell: &TableCell,
        _index_path: IndexPath,
    ) {
    }

    /// Called after the header view for `section` left the screen.
    fn did_end_displaying_header_view(
        &self,
        _table_view: &dyn TableView,
        _view: &HeaderFooterView,
        _section: usize,
    ) {
    }

    /// Called after the footer view for `section` left the screen.
    fn did_end_displaying_footer_view(
        &self,
        _table_view: &dyn TableView,
        _view: &HeaderFooterView,
        _section: usize,
    ) {
    }

    // -------------------------------------------------------------------------
    // Heights
    // -------------------------------------------------------------------------

    /// Returns the row height. Defaults to [`AUTOMATIC_DIMENSION`].
    fn height_for_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) -> f32 {
        AUTOMATIC_DIMENSION
    }

    /// Returns the header height for `section`. Defaults to `0.0`.
    fn height_for_header_in_section(&self, _table_view: &dyn TableView, _section: usize) -> f32 {
        0.0
    }

    /// Returns the footer height for `section`. Defaults to `0.0`.
    fn height_for_footer_in_section(&self, _table_view: &dyn TableView, _section: usize) -> f32 {
        0.0
    }

    /// Returns an estimated row height.
    ///
    /// Only consulted when [`Capability::EstimatedHeightForRow`] is reported.
    fn estimated_height_for_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) -> f32 {
        AUTOMATIC_DIMENSION
    }

    /// Returns an estimated header height.
    ///
    /// Only consulted when [`Capability::EstimatedHeightForHeader`] is reported.
    fn estimated_height_for_header_in_section(
        &self,
        _table_view: &dyn TableView,
        _section: usize,
    ) -> f32 {
        0.0
    }

    /// Returns an estimated footer height.
    ///
    /// Only consulted when [`Capability::EstimatedHeightForFooter`] is reported.
    fn estimated_height_for_footer_in_section(
        &self,
        _table_view: &dyn TableView,
        _section: usize,
    ) -> f32 {
        0.0
    }

    // -------------------------------------------------------------------------
    // Header and footer views
    // -------------------------------------------------------------------------

    /// Returns a custom header view for `section`.
    fn view_for_header_in_section(
        &self,
        _table_view: &dyn TableView,
        _section: usize,
    ) -> Option<HeaderFooterView> {
        None
    }

    /// Returns a custom footer view for `section`.
    fn view_for_footer_in_section(
        &self,
        _table_view: &dyn TableView,
        _section: usize,
    ) -> Option<HeaderFooterView> {
        None
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Returns the editing control for the row.
    fn editing_style_for_row(
        &self,
        _table_view: &dyn TableView,
        _index_path: IndexPath,
    ) -> EditingStyle {
        EditingStyle::None
    }

    /// Returns a custom title for the delete confirmation button.
    fn title_for_delete_confirmation_button(
        &self,
        _table_view: &dyn TableView,
        _index_path: IndexPath,
    ) -> Option<String> {
        None
    }

    /// Returns the swipe actions for the row.
    fn edit_actions_for_row(
        &self,
        _table_view: &dyn TableView,
        _index_path: IndexPath,
    ) -> Option<Vec<RowAction>> {
        None
    }

    /// Returns `true` if the row's content indents while editing.
    fn should_indent_while_editing_row(
        &self,
        _table_view: &dyn TableView,
        _index_path: IndexPath,
    ) -> bool {
        false
    }

    /// Called when the row is about to enter editing mode.
    fn will_begin_editing_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) {}

    /// Called when a row left editing mode.
    ///
    /// `index_path` is `None` when the table could not tell which row it was.
    fn did_end_editing_row(&self, _table_view: &dyn TableView, _index_path: Option<IndexPath>) {}

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Called when the row's accessory button was tapped.
    fn accessory_button_tapped(&self, _table_view: &dyn TableView, _index_path: IndexPath) {}

    /// Returns `true` if the row may be highlighted. Defaults to `true`.
    fn should_highlight_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) -> bool {
        true
    }

    /// Called after the row was highlighted.
    fn did_highlight_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) {}

    /// Called after the row lost its highlight.
    fn did_unhighlight_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) {}

    /// Returns the path to select instead of `index_path`, or `None` to cancel.
    ///
    /// An override must also report [`Capability::WillSelectRow`] from
    /// [`CascadingTableDelegate::responds_to`]; otherwise a propagating
    /// parent skips it and keeps `index_path`.
    fn will_select_row(
        &self,
        _table_view: &dyn TableView,
        index_path: IndexPath,
    ) -> Option<IndexPath> {
        Some(index_path)
    }

    /// Returns the path to deselect instead of `index_path`, or `None` to cancel.
    ///
    /// An override must also report [`Capability::WillDeselectRow`] from
    /// [`CascadingTableDelegate::responds_to`]; otherwise a propagating
    /// parent skips it and keeps `index_path`.
    fn will_deselect_row(
        &self,
        _table_view: &dyn TableView,
        index_path: IndexPath,
    ) -> Option<IndexPath> {
        Some(index_path)
    }

    /// Called after the row was selected.
    fn did_select_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) {}

    /// Called after the row was deselected.
    fn did_deselect_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) {}

    // -------------------------------------------------------------------------
    // Edit menu
    // -------------------------------------------------------------------------

    /// Returns `true` if the edit menu should be shown for the row.
    fn should_show_menu_for_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) -> bool {
        false
    }

    /// Returns `true` if the row can perform `action`.
    fn can_perform_action(
        &self,
        _table_view: &dyn TableView,
        _action: MenuAction,
        _index_path: IndexPath,
        _sender: Option<&dyn Any>,
    ) -> bool {
        false
    }

    /// Performs `action` on the row.
    fn perform_action(
        &self,
        _table_view: &dyn TableView,
        _action: MenuAction,
        _index_path: IndexPath,
        _sender: Option<&dyn Any>,
    ) {
    }

    // -------------------------------------------------------------------------
    // Focus and indentation
    // -------------------------------------------------------------------------

    /// Returns `true` if the row can receive focus.
    fn can_focus_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) -> bool {
        false
    }

    /// Returns the indentation level of the row.
    fn indentation_level_for_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) -> usize {
        0
    }
}

/// A node in a tree of table delegates.
///
/// Implementors are either leaves (one visual section or row group) or
/// [`PropagatingTableDelegate`](crate::PropagatingTableDelegate)s that fan
/// calls out to children. Parents own their children; children only keep a
/// weak back-reference to their parent.
pub trait CascadingTableDelegate: TableDataSource + TableDelegate + Send + Sync {
    /// Position of this delegate among its siblings.
    ///
    /// Meaningful only relative to the parent's children ordering.
    fn index(&self) -> usize;

    /// Records the parent delegate. Leaves that don't track parents ignore it.
    fn set_parent_delegate(&self, _parent: Weak<dyn CascadingTableDelegate>) {}

    /// Returns the parent delegate, if it is tracked and still alive.
    fn parent_delegate(&self) -> Option<Arc<dyn CascadingTableDelegate>> {
        None
    }

    /// Returns the child delegates. Leaves have none.
    fn child_delegates(&self) -> Vec<Arc<dyn CascadingTableDelegate>> {
        Vec::new()
    }

    /// Called once when the tree is attached to `table_view`.
    ///
    /// Use it for one-time registrations such as reusable cell identifiers.
    fn prepare(&self, _table_view: &mut dyn TableView) {}

    /// Reports whether an optional callback is implemented.
    ///
    /// Defaults to `false` for every [`Capability`].
    fn responds_to(&self, _capability: Capability) -> bool {
        false
    }

    /// Short name used in debug output.
    fn debug_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
