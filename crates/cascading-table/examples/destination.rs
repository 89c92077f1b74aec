//! Builds a destination screen from independent sections and prints its layout.
//!
//! Run with:
//!
//! ```text
//! RUST_LOG=cascading_table=debug cargo run --example destination
//! ```

use std::sync::Arc;

use cascading_table::{
    CascadingTableDelegate, DelegateTreeDebug, IndexPath, PropagatingTableDelegate,
    PropagationMode, TableCell, TableDataSource, TableDelegate, TableView, VirtualTableView,
};
use tracing_subscriber::EnvFilter;

struct InfoSection {
    index: usize,
    title: &'static str,
    lines: Vec<&'static str>,
}

impl TableDataSource for InfoSection {
    fn number_of_rows_in_section(&self, _table_view: &dyn TableView, _section: usize) -> usize {
        self.lines.len()
    }

    fn cell_for_row(&self, table_view: &dyn TableView, index_path: IndexPath) -> TableCell {
        table_view
            .dequeue_reusable_cell("info", index_path)
            .with_text(self.lines[index_path.row()])
    }

    fn title_for_header_in_section(&self, _table_view: &dyn TableView, _section: usize) -> Option<String> {
        Some(self.title.to_string())
    }
}

impl TableDelegate for InfoSection {
    fn height_for_header_in_section(&self, _table_view: &dyn TableView, _section: usize) -> f32 {
        28.0
    }
}

impl CascadingTableDelegate for InfoSection {
    fn index(&self) -> usize {
        self.index
    }

    fn prepare(&self, table_view: &mut dyn TableView) {
        table_view.register_cell("info");
    }
}

struct ReviewRow {
    index: usize,
    author: &'static str,
}

impl TableDataSource for ReviewRow {
    fn number_of_rows_in_section(&self, _table_view: &dyn TableView, _section: usize) -> usize {
        1
    }

    fn cell_for_row(&self, table_view: &dyn TableView, index_path: IndexPath) -> TableCell {
        table_view
            .dequeue_reusable_cell("review", index_path)
            .with_text(self.author)
    }
}

impl TableDelegate for ReviewRow {
    fn height_for_row(&self, _table_view: &dyn TableView, _index_path: IndexPath) -> f32 {
        72.0
    }

    fn did_select_row(&self, _table_view: &dyn TableView, index_path: IndexPath) {
        tracing::info!(author = self.author, %index_path, "review selected");
    }
}

impl CascadingTableDelegate for ReviewRow {
    fn index(&self) -> usize {
        self.index
    }

    fn prepare(&self, table_view: &mut dyn TableView) {
        table_view.register_cell("review");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let reviews = PropagatingTableDelegate::with_mode(
        2,
        vec![
            Arc::new(ReviewRow { index: 0, author: "Ayu" }),
            Arc::new(ReviewRow { index: 1, author: "Budi" }),
        ],
        PropagationMode::Row,
    );

    let root = PropagatingTableDelegate::new(
        0,
        vec![
            Arc::new(InfoSection {
                index: 0,
                title: "Bali",
                lines: vec!["Island of the Gods"],
            }),
            Arc::new(InfoSection {
                index: 1,
                title: "Info",
                lines: vec!["Best time: April to October", "Currency: IDR"],
            }),
            reviews,
        ],
    );

    println!("{}", DelegateTreeDebug::new().format(root.as_ref()));

    let mut table = VirtualTableView::new();
    let layout = table.load(root.as_ref());

    for section in &layout.sections {
        println!(
            "section {} {:?}",
            section.section,
            section.header_title.as_deref().unwrap_or("-")
        );
        for row in &section.rows {
            println!(
                "  {} {:<30} {:>6.1}pt",
                row.index_path,
                row.cell.text.as_deref().unwrap_or_default(),
                row.resolved_height()
            );
        }
    }
    println!("content height: {:.1}pt", layout.content_height());

    table.select_row(root.as_ref(), IndexPath::new(2, 1));
}
