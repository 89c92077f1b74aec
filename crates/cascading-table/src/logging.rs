//! Logging and debugging facilities for cascading table delegates.
//!
//! This crate uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("cascading_table::validation=warn")
//!     .init();
//! ```
//!
//! Use [`DelegateTreeDebug`] to print the shape of a delegate tree:
//!
//! ```
//! use cascading_table::{DelegateTreeDebug, PropagatingTableDelegate, TreeStyle};
//!
//! let root = PropagatingTableDelegate::new(0, vec![PropagatingTableDelegate::new(0, vec![])]);
//! let text = DelegateTreeDebug::new().with_style(TreeStyle::Ascii).format(root.as_ref());
//!
//! assert_eq!(text, "PropagatingTableDelegate #0 (1 child)\n`-- PropagatingTableDelegate #0\n");
//! ```

use std::fmt::Write as FmtWrite;

use crate::traits::CascadingTableDelegate;

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Callback propagation (unresolved coordinates, prepare passes).
    pub const PROPAGATION: &str = "cascading_table::propagation";
    /// Children consistency checks.
    pub const VALIDATION: &str = "cascading_table::validation";
    /// The in-memory table host.
    pub const HOST: &str = "cascading_table::host";
}

/// Branch drawing style for [`DelegateTreeDebug`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

impl TreeStyle {
    /// Returns `(tee, corner, pipe, blank)` for this style.
    fn glyphs(self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            TreeStyle::Ascii => ("|-- ", "`-- ", "|   ", "    "),
            TreeStyle::Unicode => (
                "\u{251c}\u{2500}\u{2500} ",
                "\u{2514}\u{2500}\u{2500} ",
                "\u{2502}   ",
                "    ",
            ),
        }
    }
}

/// Renders a delegate tree as indented text.
#[derive(Debug, Clone, Default)]
pub struct DelegateTreeDebug {
    style: TreeStyle,
    max_depth: Option<usize>,
}

impl DelegateTreeDebug {
    /// Creates a renderer with Unicode branches and unlimited depth.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the branch style.
    pub fn with_style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    /// Limits how many levels below the root are rendered.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Formats the tree rooted at `root`.
    pub fn format(&self, root: &dyn CascadingTableDelegate) -> String {
        let mut output = String::new();
        self.format_node(root, 0, "", &mut output);
        output
    }

    fn format_node(
        &self,
        node: &dyn CascadingTableDelegate,
        depth: usize,
        prefix: &str,
        output: &mut String,
    ) {
        let short_name = node.debug_name().rsplit("::").next().unwrap_or_default();
        let children = node.child_delegates();

        // Writing into a String cannot fail.
        let _ = write!(output, "{short_name} #{}", node.index());
        match children.len() {
            0 => {}
            1 => output.push_str(" (1 child)"),
            n => {
                let _ = write!(output, " ({n} children)");
            }
        }
        output.push('\n');

        if self.max_depth.is_some_and(|max| depth >= max) {
            return;
        }

        let (tee, corner, pipe, blank) = self.style.glyphs();
        let last = children.len().saturating_sub(1);
        for (i, child) in children.iter().enumerate() {
            let is_last = i == last;
            output.push_str(prefix);
            output.push_str(if is_last { corner } else { tee });

            let child_prefix = format!("{prefix}{}", if is_last { blank } else { pipe });
            self.format_node(child.as_ref(), depth + 1, &child_prefix, output);
        }
    }
}
