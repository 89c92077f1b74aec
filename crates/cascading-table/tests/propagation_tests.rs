//! Integration tests for dispatch through `PropagatingTableDelegate`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use cascading_table::{
    AUTOMATIC_DIMENSION, Capability, CascadingTableDelegate, EditingStyle, HeaderFooterView,
    IndexPath, MenuAction, PropagatingTableDelegate, PropagationMode, RowAction, RowActionStyle,
    TableCell, TableDataSource, TableDelegate, TableView, ValidationIssue, VirtualTableView,
};
use parking_lot::{Mutex, RwLock};

/// A leaf section that records every callback it receives.
#[derive(Default)]
struct Recorder {
    index: AtomicUsize,
    rows: usize,
    estimated_row_height: Option<f32>,
    estimated_header_height: Option<f32>,
    /// `Some(answer)` implements will-select / will-deselect with `answer`.
    selection_override: Option<Option<IndexPath>>,
    parent: RwLock<Option<Weak<dyn CascadingTableDelegate>>>,
    calls: Mutex<Vec<String>>,
}

impl Recorder {
    fn new(index: usize, rows: usize) -> Self {
        Self {
            index: AtomicUsize::new(index),
            rows,
            ..Default::default()
        }
    }

    fn with_estimated_row_height(mut self, height: f32) -> Self {
        self.estimated_row_height = Some(height);
        self
    }

    fn with_estimated_header_height(mut self, height: f32) -> Self {
        self.estimated_header_height = Some(height);
        self
    }

    fn with_selection_override(mut self, answer: Option<IndexPath>) -> Self {
        self.selection_override = Some(answer);
        self
    }

    fn set_index(&self, index: usize) {
        self.index.store(index, Ordering::SeqCst);
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn id(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }
}

impl TableDataSource for Recorder {
    fn number_of_rows_in_section(&self, _table_view: &dyn TableView, section: usize) -> usize {
        self.record(format!("rows {section}"));
        self.rows
    }

    fn cell_for_row(&self, _table_view: &dyn TableView, index_path: IndexPath) -> TableCell {
        self.record(format!("cell {index_path}"));
        TableCell::new(format!("recorder-{}", self.id())).with_index_path(index_path)
    }

    fn title_for_header_in_section(&self, _table_view: &dyn TableView, section: usize) -> Option<String> {
        self.record(format!("header title {section}"));
        Some(format!("Section {}", self.id()))
    }

    fn can_edit_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) -> bool {
        true
    }

    fn commit_editing(&self, _table_view: &dyn TableView, style: EditingStyle, index_path: IndexPath) {
        self.record(format!("commit {style:?} {index_path}"));
    }
}

impl TableDelegate for Recorder {
    fn height_for_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) -> f32 {
        10.0 * (self.id() + 1) as f32
    }

    fn height_for_header_in_section(&self, _table_view: &dyn TableView, _section: usize) -> f32 {
        30.0
    }

    fn estimated_height_for_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) -> f32 {
        self.estimated_row_height.unwrap_or(AUTOMATIC_DIMENSION)
    }

    fn estimated_height_for_header_in_section(&self, _table_view: &dyn TableView, _section: usize) -> f32 {
        self.estimated_header_height.unwrap_or_default()
    }

    fn view_for_header_in_section(
        &self,
        _table_view: &dyn TableView,
        _section: usize,
    ) -> Option<HeaderFooterView> {
        Some(HeaderFooterView::default().with_title("custom"))
    }

    fn edit_actions_for_row(
        &self,
        _table_view: &dyn TableView,
        _index_path: IndexPath,
    ) -> Option<Vec<RowAction>> {
        Some(vec![RowAction::new(RowActionStyle::Destructive, "Delete", "delete")])
    }

    fn will_select_row(&self, _table_view: &dyn TableView, index_path: IndexPath) -> Option<IndexPath> {
        self.record(format!("will select {index_path}"));
        self.selection_override.unwrap_or(Some(index_path))
    }

    fn will_deselect_row(&self, _table_view: &dyn TableView, index_path: IndexPath) -> Option<IndexPath> {
        self.record(format!("will deselect {index_path}"));
        self.selection_override.unwrap_or(Some(index_path))
    }

    fn did_select_row(&self, _table_view: &dyn TableView, index_path: IndexPath) {
        self.record(format!("did select {index_path}"));
    }

    fn did_end_editing_row(&self, _table_view: &dyn TableView, index_path: Option<IndexPath>) {
        self.record(format!("end editing {index_path:?}"));
    }

    fn can_perform_action(
        &self,
        _table_view: &dyn TableView,
        action: MenuAction,
        _index_path: IndexPath,
        sender: Option<&dyn std::any::Any>,
    ) -> bool {
        action == MenuAction::COPY && sender.is_some_and(|s| s.is::<&'static str>())
    }

    fn can_focus_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) -> bool {
        true
    }

    fn indentation_level_for_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) -> usize {
        self.id() + 1
    }
}

impl CascadingTableDelegate for Recorder {
    fn index(&self) -> usize {
        self.id()
    }

    fn set_parent_delegate(&self, parent: Weak<dyn CascadingTableDelegate>) {
        *self.parent.write() = Some(parent);
    }

    fn parent_delegate(&self) -> Option<Arc<dyn CascadingTableDelegate>> {
        self.parent.read().as_ref().and_then(Weak::upgrade)
    }

    fn responds_to(&self, capability: Capability) -> bool {
        match capability {
            Capability::EstimatedHeightForRow => self.estimated_row_height.is_some(),
            Capability::EstimatedHeightForHeader => self.estimated_header_height.is_some(),
            Capability::EstimatedHeightForFooter => false,
            Capability::WillSelectRow | Capability::WillDeselectRow => {
                self.selection_override.is_some()
            }
        }
    }
}

fn children(recorders: &[Arc<Recorder>]) -> Vec<Arc<dyn CascadingTableDelegate>> {
    recorders
        .iter()
        .map(|r| Arc::clone(r) as Arc<dyn CascadingTableDelegate>)
        .collect()
}

#[test]
fn test_section_mode_example() {
    let table = VirtualTableView::new();
    let a = Arc::new(Recorder::new(0, 3));
    let b = Arc::new(Recorder::new(1, 7));
    let node = PropagatingTableDelegate::new(0, children(&[a.clone(), b.clone()]));

    assert_eq!(node.number_of_rows_in_section(&table, 1), 7);
    assert_eq!(node.number_of_sections(&table), 2);
    assert_eq!(node.number_of_rows_in_section(&table, 5), 0);

    assert!(a.calls().is_empty());
    assert_eq!(b.calls(), vec!["rows 1"]);
}

#[test]
fn test_section_row_count_uses_reported_index() {
    let table = VirtualTableView::new();
    // Listed out of order: position 0 reports index 1.
    let first = Arc::new(Recorder::new(1, 4));
    let second = Arc::new(Recorder::new(0, 2));
    let node = PropagatingTableDelegate::new(0, children(&[first.clone(), second.clone()]));

    assert_eq!(node.number_of_rows_in_section(&table, 0), 2);
    assert_eq!(node.number_of_rows_in_section(&table, 1), 4);
}

#[test]
fn test_sparse_indices_yield_zero_rows() {
    let table = VirtualTableView::new();
    let node = PropagatingTableDelegate::new(
        0,
        children(&[Arc::new(Recorder::new(0, 2)), Arc::new(Recorder::new(3, 2))]),
    );

    assert_eq!(node.number_of_sections(&table), 2);
    assert_eq!(node.number_of_rows_in_section(&table, 1), 0);
    assert_eq!(node.number_of_rows_in_section(&table, 3), 2);
}

#[test]
fn test_row_mode_counts_and_dispatch() {
    let table = VirtualTableView::new();
    let recorders = [
        Arc::new(Recorder::new(0, 9)),
        Arc::new(Recorder::new(1, 9)),
    ];
    let node =
        PropagatingTableDelegate::with_mode(0, children(&recorders), PropagationMode::Row);

    for section in [0, 1, 100] {
        assert_eq!(node.number_of_rows_in_section(&table, section), 2);
    }
    assert_eq!(node.number_of_sections(&table), 0);

    let cell = node.cell_for_row(&table, IndexPath::new(4, 1));
    assert_eq!(cell.reuse_identifier, "recorder-1");
    assert_eq!(recorders[1].calls(), vec!["cell [4, 1]"]);
    assert!(recorders[0].calls().is_empty());
}

#[test]
fn test_out_of_range_returns_neutral_values() {
    let table = VirtualTableView::new();
    let recorder = Arc::new(Recorder::new(0, 1).with_selection_override(None));
    let node = PropagatingTableDelegate::new(0, children(&[recorder.clone()]));
    let path = IndexPath::new(1, 0);

    assert!(node.cell_for_row(&table, path).is_placeholder());
    assert!(node.title_for_header_in_section(&table, 1).is_none());
    assert!(node.title_for_footer_in_section(&table, 1).is_none());
    assert!(node.view_for_header_in_section(&table, 1).is_none());
    assert!(!node.can_edit_row(&table, path));
    assert!(!node.can_move_row(&table, path));
    assert_eq!(node.height_for_row(&table, path), AUTOMATIC_DIMENSION);
    assert_eq!(node.estimated_height_for_row(&table, path), AUTOMATIC_DIMENSION);
    assert_eq!(node.height_for_header_in_section(&table, 1), 0.0);
    assert_eq!(node.estimated_height_for_footer_in_section(&table, 1), 0.0);
    assert_eq!(node.editing_style_for_row(&table, path), EditingStyle::None);
    assert!(node.title_for_delete_confirmation_button(&table, path).is_none());
    assert!(node.edit_actions_for_row(&table, path).is_none());
    assert!(!node.should_indent_while_editing_row(&table, path));
    assert!(node.should_highlight_row(&table, path));
    assert_eq!(node.will_select_row(&table, path), Some(path));
    assert_eq!(node.will_deselect_row(&table, path), Some(path));
    assert!(!node.should_show_menu_for_row(&table, path));
    assert!(!node.can_perform_action(&table, MenuAction::COPY, path, Some(&"menu")));
    assert!(!node.can_focus_row(&table, path));
    assert_eq!(node.indentation_level_for_row(&table, path), 0);

    node.commit_editing(&table, EditingStyle::Delete, path);
    node.did_select_row(&table, path);
    node.did_end_editing_row(&table, Some(path));
    node.did_end_editing_row(&table, None);

    assert!(recorder.calls().is_empty());
}

#[test]
fn test_in_range_forwards_unchanged() {
    let table = VirtualTableView::new();
    let recorders = [Arc::new(Recorder::new(0, 1)), Arc::new(Recorder::new(1, 1))];
    let node = PropagatingTableDelegate::new(0, children(&recorders));
    let path = IndexPath::new(1, 0);

    assert_eq!(node.height_for_row(&table, path), 20.0);
    assert_eq!(node.indentation_level_for_row(&table, path), 2);
    assert_eq!(
        node.title_for_header_in_section(&table, 1).as_deref(),
        Some("Section 1")
    );
    assert_eq!(
        node.edit_actions_for_row(&table, path).map(|a| a.len()),
        Some(1)
    );
    assert!(node.can_focus_row(&table, path));
    assert!(node.can_perform_action(&table, MenuAction::COPY, path, Some(&"menu")));
    assert!(!node.can_perform_action(&table, MenuAction::PASTE, path, Some(&"menu")));

    node.commit_editing(&table, EditingStyle::Delete, path);
    node.did_end_editing_row(&table, Some(path));
    assert_eq!(
        recorders[1].calls(),
        vec![
            "header title 1".to_string(),
            "commit Delete [1, 0]".to_string(),
            "end editing Some(IndexPath { section: 1, row: 0 })".to_string(),
        ]
    );
}

#[test]
fn test_estimated_capability_is_any_child() {
    let plain = Arc::new(Recorder::new(0, 1));
    let estimating = Arc::new(Recorder::new(1, 1).with_estimated_row_height(55.0));

    let none = PropagatingTableDelegate::new(0, children(&[plain.clone()]));
    assert!(!none.responds_to(Capability::EstimatedHeightForRow));
    assert!(!none.responds_to(Capability::EstimatedHeightForHeader));

    let some = PropagatingTableDelegate::new(0, children(&[plain, estimating]));
    assert!(some.responds_to(Capability::EstimatedHeightForRow));
    assert!(!some.responds_to(Capability::EstimatedHeightForHeader));
    assert!(!some.responds_to(Capability::EstimatedHeightForFooter));

    // Selection hooks are always reported by the node itself.
    assert!(none.responds_to(Capability::WillSelectRow));
    assert!(none.responds_to(Capability::WillDeselectRow));
}

#[test]
fn test_estimated_capability_propagates_through_levels() {
    let leaf = Arc::new(Recorder::new(0, 1).with_estimated_header_height(12.0));
    let inner = PropagatingTableDelegate::new(0, children(&[leaf]));
    let root = PropagatingTableDelegate::new(0, vec![inner]);

    assert!(root.responds_to(Capability::EstimatedHeightForHeader));
    assert!(!root.responds_to(Capability::EstimatedHeightForRow));
}

#[test]
fn test_estimated_height_falls_back_to_height() {
    let table = VirtualTableView::new();
    let plain = Arc::new(Recorder::new(0, 1));
    let estimating = Arc::new(
        Recorder::new(1, 1)
            .with_estimated_row_height(55.0)
            .with_estimated_header_height(18.0),
    );
    let node = PropagatingTableDelegate::new(0, children(&[plain, estimating]));

    assert_eq!(node.estimated_height_for_row(&table, IndexPath::new(0, 0)), 10.0);
    assert_eq!(node.estimated_height_for_row(&table, IndexPath::new(1, 0)), 55.0);
    assert_eq!(node.estimated_height_for_header_in_section(&table, 0), 30.0);
    assert_eq!(node.estimated_height_for_header_in_section(&table, 1), 18.0);
    assert_eq!(node.estimated_height_for_footer_in_section(&table, 1), 0.0);
}

#[test]
fn test_will_select_defaults_to_proposed_path() {
    let table = VirtualTableView::new();
    let silent = Arc::new(Recorder::new(0, 1));
    let node = PropagatingTableDelegate::new(0, children(&[silent.clone()]));
    let path = IndexPath::new(0, 0);

    assert_eq!(node.will_select_row(&table, path), Some(path));
    assert_eq!(node.will_deselect_row(&table, path), Some(path));
    // The child's hook is not called when it doesn't report the capability.
    assert!(silent.calls().is_empty());
}

#[test]
fn test_will_select_uses_implementing_child() {
    let table = VirtualTableView::new();
    let redirect = IndexPath::new(0, 2);
    let child = Arc::new(Recorder::new(0, 3).with_selection_override(Some(redirect)));
    let cancelling = Arc::new(Recorder::new(1, 3).with_selection_override(None));
    let node = PropagatingTableDelegate::new(0, children(&[child.clone(), cancelling]));

    assert_eq!(node.will_select_row(&table, IndexPath::new(0, 0)), Some(redirect));
    assert_eq!(node.will_deselect_row(&table, IndexPath::new(0, 1)), Some(redirect));
    assert_eq!(node.will_select_row(&table, IndexPath::new(1, 0)), None);
    assert_eq!(
        child.calls(),
        vec!["will select [0, 0]", "will deselect [0, 1]"]
    );
}

#[test]
fn test_replacing_children_revalidates() {
    let first = Arc::new(Recorder::new(0, 1));
    let second = Arc::new(Recorder::new(5, 1));
    let node = PropagatingTableDelegate::new(0, children(&[first.clone(), second.clone()]));

    assert_eq!(
        node.validation_issues(),
        vec![ValidationIssue::IndexMismatch {
            position: 1,
            index: 5
        }]
    );

    // Fixing the child alone does not re-run the check.
    second.set_index(1);
    assert_eq!(node.validation_issues().len(), 1);

    // Assigning the same list again does.
    node.set_child_delegates(children(&[first, second]));
    assert!(node.validation_issues().is_empty());
}

#[test]
fn test_children_receive_parent() {
    let leaf = Arc::new(Recorder::new(0, 1));
    let node = PropagatingTableDelegate::new(4, children(&[leaf.clone()]));

    let parent = leaf.parent_delegate().expect("parent is alive");
    assert_eq!(parent.index(), 4);
    assert_eq!(node.child_delegates().len(), 1);
}

#[test]
fn test_removed_children_lose_parent() {
    let kept = Arc::new(Recorder::new(0, 1));
    let dropped = Arc::new(Recorder::new(1, 1));
    let node = PropagatingTableDelegate::new(7, children(&[kept.clone(), dropped.clone()]));
    assert_eq!(dropped.parent_delegate().map(|p| p.index()), Some(7));

    let added = Arc::new(Recorder::new(1, 2));
    node.set_child_delegates(children(&[kept.clone(), added.clone()]));

    assert!(dropped.parent_delegate().is_none());
    assert_eq!(kept.parent_delegate().map(|p| p.index()), Some(7));
    assert_eq!(added.parent_delegate().map(|p| p.index()), Some(7));
}

#[test]
fn test_prepare_reaches_every_descendant() {
    struct Registering(usize, &'static str);

    impl TableDataSource for Registering {
        fn number_of_rows_in_section(&self, _table_view: &dyn TableView, _section: usize) -> usize {
            0
        }

        fn cell_for_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) -> TableCell {
            TableCell::default()
        }
    }

    impl TableDelegate for Registering {}

    impl CascadingTableDelegate for Registering {
        fn index(&self) -> usize {
            self.0
        }

        fn prepare(&self, table_view: &mut dyn TableView) {
            table_view.register_cell(self.1);
        }
    }

    let rows = PropagatingTableDelegate::with_mode(
        1,
        vec![
            Arc::new(Registering(0, "rating")),
            Arc::new(Registering(1, "user")),
        ],
        PropagationMode::Row,
    );
    let root = PropagatingTableDelegate::new(0, vec![Arc::new(Registering(0, "header")), rows]);

    let mut table = VirtualTableView::new();
    root.prepare(&mut table);

    for id in ["header", "rating", "user"] {
        assert!(table.is_cell_registered(id), "{id} not registered");
    }
}
