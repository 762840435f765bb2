//! Analysis prompt built from a structure document.

use dirscope_core::{Node, NodeKind};

use crate::document::StructureDocument;
use crate::format::format_size;

/// Default outline depth sent for analysis.
pub const DEFAULT_PROMPT_DEPTH: u32 = 3;

/// Default upper bound on the outline length, in characters.
pub const DEFAULT_MAX_CHARS: usize = 24_000;

/// Fixed instruction placed before every outline.
pub const ANALYSIS_PREAMBLE: &str = "Analyze the following directory structure. \
Identify the kind of project it contains, describe how it is organized, and \
answer the question at the end based on the structure.";

/// Question used when the caller does not supply one.
pub const DEFAULT_QUESTION: &str =
    "What is the structure, type and likely purpose of this project?";

/// Turns a structure document into the text payload for the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptBuilder {
    depth: u32,
    max_chars: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT_DEPTH)
    }
}

impl PromptBuilder {
    /// Outline nodes down to `depth` levels below the root.
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    /// Cap the outline at `max_chars` characters.
    pub fn max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Render the depth- and size-bounded outline of a tree.
    ///
    /// Directory contents below the depth budget collapse into a single
    /// `... (N entries)` line.
    pub fn outline(&self, root: &Node) -> String {
        let mut outline = Outline {
            text: String::new(),
            chars: 0,
            max_chars: self.max_chars,
            full: false,
        };
        self.visit(root, 0, &mut outline);
        if outline.full {
            outline.text.push_str("... (outline truncated)\n");
        }
        outline.text
    }

    /// Build the complete prompt: preamble, path, summary, outline, question.
    pub fn build(&self, document: &StructureDocument, question: &str) -> String {
        let mut prompt = String::from(ANALYSIS_PREAMBLE);
        prompt.push_str("\n\n");

        if let Some(path) = &document.path {
            prompt.push_str(&format!("Directory: {}\n", path.display()));
        }
        if let Some(stats) = &document.stats {
            prompt.push_str(&format!(
                "Summary: {} files, {} directories, {} total\n",
                stats.total_files,
                stats.total_dirs,
                format_size(stats.total_size)
            ));
        }

        prompt.push_str("\nStructure:\n");
        prompt.push_str(&self.outline(&document.root));

        let question = question.trim();
        let question = if question.is_empty() {
            DEFAULT_QUESTION
        } else {
            question
        };
        prompt.push_str(&format!("\nQuestion: {question}\n"));
        prompt
    }

    fn visit(&self, node: &Node, level: u32, outline: &mut Outline) {
        let indent = "  ".repeat(level as usize);
        let line = match node.kind {
            NodeKind::Directory => format!("{indent}{}/", node.name),
            NodeKind::File => format!("{indent}{} ({})", node.name, format_size(node.size)),
            NodeKind::Symlink => format!("{indent}{} (link)", node.name),
        };
        if !outline.push(&line) {
            return;
        }

        if node.truncated {
            outline.push(&format!("{indent}  ... (not scanned)"));
            return;
        }
        if node.children.is_empty() {
            return;
        }
        if level >= self.depth {
            outline.push(&format!("{indent}  ... ({} entries)", node.node_count() - 1));
            return;
        }
        for child in &node.children {
            if outline.full {
                return;
            }
            self.visit(child, level + 1, outline);
        }
    }
}

/// Outline text under construction, bounded by a character budget.
struct Outline {
    text: String,
    chars: usize,
    max_chars: usize,
    full: bool,
}

impl Outline {
    /// Append a line; returns false once the budget is exhausted.
    fn push(&mut self, line: &str) -> bool {
        if self.full {
            return false;
        }
        let len = line.chars().count() + 1;
        if self.chars + len > self.max_chars {
            self.full = true;
            return false;
        }
        self.text.push_str(line);
        self.text.push('\n');
        self.chars += len;
        true
    }
}
