//! Indented tree-text renderers.

use dirscope_core::{Node, NodeKind};

use crate::format::format_size;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// Marker appended to directories whose contents were cut by the depth limit.
pub const TRUNCATED_MARKER: &str = "…";

/// Options for the size-annotated renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeOptions {
    /// Also annotate directories with the recursive total of their files.
    pub directory_totals: bool,
}

impl SizeOptions {
    /// Annotate files and directories.
    pub fn with_directory_totals() -> Self {
        Self {
            directory_totals: true,
        }
    }
}

/// Render the tree as indented text, one line per node.
///
/// ```text
/// project/
/// ├── src/
/// │   └── main.rs
/// └── README.md
/// ```
pub fn render_tree(root: &Node) -> String {
    render(root, None)
}

/// Render the tree like [`render_tree`], annotating sizes.
pub fn render_tree_with_sizes(root: &Node, options: SizeOptions) -> String {
    render(root, Some(options))
}

fn render(root: &Node, sizes: Option<SizeOptions>) -> String {
    let mut out = String::new();
    out.push_str(&label(root, sizes));
    out.push('\n');
    render_children(root, "", sizes, &mut out);
    out
}

fn render_children(node: &Node, prefix: &str, sizes: Option<SizeOptions>, out: &mut String) {
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        let is_last = i + 1 == count;
        out.push_str(prefix);
        out.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        out.push_str(&label(child, sizes));
        out.push('\n');

        if !child.children.is_empty() {
            let child_prefix = format!("{prefix}{}", if is_last { BLANK } else { PIPE });
            render_children(child, &child_prefix, sizes, out);
        }
    }
}

fn label(node: &Node, sizes: Option<SizeOptions>) -> String {
    match node.kind {
        NodeKind::Directory => {
            let mut text = format!("{}/", node.name);
            if node.truncated {
                text.push(' ');
                text.push_str(TRUNCATED_MARKER);
            }
            if sizes.is_some_and(|s| s.directory_totals) {
                text.push_str(&format!(" ({})", format_size(node.total_file_size())));
            }
            text
        }
        NodeKind::File => match sizes {
            Some(_) => format!("{} ({})", node.name, format_size(node.size)),
            None => node.name.to_string(),
        },
        NodeKind::Symlink => match &node.link_target {
            Some(target) => format!("{} -> {target}", node.name),
            None => node.name.to_string(),
        },
    }
}
