//! Hierarchical table delegates.
//!
//! A table view asks its data source and delegate dozens of questions per
//! layout pass: how many sections and rows, which cell goes where, how tall
//! every row and header is, what happens on selection or editing. Answering
//! all of them from one object couples every visual section of a screen.
//!
//! This crate splits those answers across a tree:
//!
//! - **Leaves** implement [`CascadingTableDelegate`] for one section (or one
//!   group of rows) and can be written and tested in isolation.
//! - **[`PropagatingTableDelegate`]** nodes own an ordered list of children
//!   and forward every callback to the child addressed by the section or
//!   the row of the incoming [`IndexPath`], depending on their
//!   [`PropagationMode`].
//!
//! Coordinates that no child can answer get the callback's neutral value;
//! dispatch never fails and never panics.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cascading_table::{
//!     CascadingTableDelegate, IndexPath, PropagatingTableDelegate, TableCell, TableDataSource,
//!     TableDelegate, TableView, VirtualTableView,
//! };
//!
//! struct Reviews {
//!     index: usize,
//!     titles: Vec<&'static str>,
//! }
//!
//! impl TableDataSource for Reviews {
//!     fn number_of_rows_in_section(&self, _table_view: &dyn TableView, _section: usize) -> usize {
//!         self.titles.len()
//!     }
//!
//!     fn cell_for_row(&self, table_view: &dyn TableView, index_path: IndexPath) -> TableCell {
//!         table_view
//!             .dequeue_reusable_cell("review", index_path)
//!             .with_text(self.titles[index_path.row()])
//!     }
//!
//!     fn title_for_header_in_section(&self, _table_view: &dyn TableView, _section: usize) -> Option<String> {
//!         Some("Reviews".into())
//!     }
//! }
//!
//! impl TableDelegate for Reviews {}
//!
//! impl CascadingTableDelegate for Reviews {
//!     fn index(&self) -> usize {
//!         self.index
//!     }
//!
//!     fn prepare(&self, table_view: &mut dyn TableView) {
//!         table_view.register_cell("review");
//!     }
//! }
//!
//! let root = PropagatingTableDelegate::new(
//!     0,
//!     vec![Arc::new(Reviews { index: 0, titles: vec!["Lovely", "Too hot"] })],
//! );
//!
//! let mut table = VirtualTableView::new();
//! let layout = table.load(root.as_ref());
//!
//! assert!(table.is_cell_registered("review"));
//! assert_eq!(layout.sections[0].header_title.as_deref(), Some("Reviews"));
//! assert_eq!(layout.sections[0].rows[1].cell.text.as_deref(), Some("Too hot"));
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌────────────────────────────┐
//!   table ──────> │ PropagatingTableDelegate   │  mode = Section
//!                 └──────┬──────────┬──────────┘
//!              section 0 │          │ section 1
//!                 ┌──────┴───┐  ┌───┴────────────────────────┐
//!                 │  leaf    │  │ PropagatingTableDelegate   │  mode = Row
//!                 └──────────┘  └──────┬──────────┬──────────┘
//!                                row 0 │          │ row 1
//!                                 ┌────┴───┐  ┌───┴────┐
//!                                 │  leaf  │  │  leaf  │
//!                                 └────────┘  └────────┘
//! ```

pub mod config;
pub mod error;
pub mod host;
mod index;
pub mod logging;
mod propagating;
mod traits;
pub mod validation;
mod view;

pub use config::{CascadeConfig, ValidationPolicy};
pub use error::{Error, Result};
pub use host::{DEFAULT_ROW_HEIGHT, RowLayout, SectionLayout, TableLayout, VirtualTableView};
pub use index::IndexPath;
pub use logging::{DelegateTreeDebug, TreeStyle};
pub use propagating::{PropagatingTableDelegate, PropagationMode};
pub use traits::{Capability, CascadingTableDelegate, TableDataSource, TableDelegate, TableView};
pub use validation::{ValidationIssue, validate_children};
pub use view::{
    AUTOMATIC_DIMENSION, CellAccessory, EditingStyle, HeaderFooterView, MenuAction, RowAction,
    RowActionStyle, TableCell,
};
