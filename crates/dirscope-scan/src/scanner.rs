//! JWalk-based directory tree builder.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use compact_str::CompactString;
use jwalk::{Parallelism, WalkDir};

use dirscope_core::{
    ExcludeMatcher, Node, ScanConfig, ScanError, ScanOutcome, ScanWarning, WarningKind,
};

/// Builds a [`Node`] tree by walking a directory.
///
/// The walk is serial and sorted, so two builds of an unchanged directory
/// produce identical trees.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    cancel: Arc<AtomicBool>,
}

impl TreeBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that aborts an in-progress build when set.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Build the tree described by `config`.
    pub fn build(&self, config: &ScanConfig) -> Result<ScanOutcome, ScanError> {
        let start = Instant::now();
        let matcher = config.exclude_matcher()?;
        let root_path = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;

        // Verify root is a listable directory before walking anything
        let root_metadata = fs::metadata(&root_path).map_err(|e| ScanError::io(&root_path, e))?;
        if !root_metadata.is_dir() {
            return Err(ScanError::NotADirectory { path: root_path });
        }
        fs::read_dir(&root_path).map_err(|e| ScanError::io(&root_path, e))?;

        let Collected {
            mut entries_by_parent,
            warnings,
        } = self.collect_entries(config, &root_path, matcher)?;

        let root_name = root_path
            .file_name()
            .map(|n| CompactString::new(n.to_string_lossy()))
            .unwrap_or_else(|| CompactString::new(root_path.to_string_lossy()));
        let root = build_node(&root_path, root_name, 0, false, &mut entries_by_parent);

        let scan_duration = start.elapsed();
        tracing::debug!(
            root = %root_path.display(),
            nodes = root.node_count(),
            warnings = warnings.len(),
            elapsed_ms = scan_duration.as_millis() as u64,
            "scan finished"
        );

        Ok(ScanOutcome::new(root, root_path, scan_duration, warnings))
    }

    /// Walk the tree, grouping entries under their parent directory.
    fn collect_entries(
        &self,
        config: &ScanConfig,
        root_path: &Path,
        matcher: ExcludeMatcher,
    ) -> Result<Collected, ScanError> {
        // Directories at this node depth are recorded but never listed
        let walk_limit = config
            .max_depth
            .map_or(usize::MAX, |depth| depth as usize + 1);

        let walker = WalkDir::new(root_path)
            .parallelism(Parallelism::Serial)
            .sort(true)
            .skip_hidden(false)
            .follow_links(false)
            .min_depth(1)
            .process_read_dir(move |depth, _path, _state, children| {
                // The root itself is never excluded
                if depth.is_none() {
                    return;
                }
                children.retain(|entry_result| match entry_result {
                    Ok(entry) => !matcher.is_excluded(&entry.file_name.to_string_lossy()),
                    Err(_) => true,
                });
                for entry in children.iter_mut().flatten() {
                    if entry.depth >= walk_limit {
                        entry.read_children_path = None;
                    }
                }
            });

        let mut entries_by_parent: HashMap<PathBuf, Vec<EntryInfo>> = HashMap::new();
        let mut warnings = Vec::new();

        for entry_result in walker {
            if self.cancel.load(Ordering::Relaxed) {
                return Err(ScanError::Interrupted);
            }

            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    push_warning(&mut warnings, walk_warning(&err, None));
                    continue;
                }
            };

            // A directory whose listing failed is kept, with no children
            if let Some(err) = &entry.read_children_error {
                push_warning(&mut warnings, walk_warning(err, Some(&entry.path())));
            }

            let path = entry.path();
            let Some(parent) = path.parent().map(Path::to_path_buf) else {
                continue;
            };
            let name = CompactString::new(entry.file_name().to_string_lossy());
            let file_type = entry.file_type();

            let kind = if file_type.is_dir() {
                EntryKind::Directory {
                    truncated: !config.expands_below((entry.depth as u32).saturating_sub(1)),
                }
            } else if file_type.is_symlink() {
                let target = fs::read_link(&path)
                    .ok()
                    .map(|t| CompactString::new(t.to_string_lossy()));
                EntryKind::Symlink { target }
            } else {
                let size = file_size(&path, fs::metadata(&path), &mut warnings);
                EntryKind::File { size }
            };

            entries_by_parent.entry(parent).or_default().push(EntryInfo {
                name,
                path,
                kind,
            });
        }

        Ok(Collected {
            entries_by_parent,
            warnings,
        })
    }
}

/// Entries grouped by parent plus the warnings produced while walking.
struct Collected {
    entries_by_parent: HashMap<PathBuf, Vec<EntryInfo>>,
    warnings: Vec<ScanWarning>,
}

/// Temporary struct for collecting entry information.
struct EntryInfo {
    name: CompactString,
    path: PathBuf,
    kind: EntryKind,
}

enum EntryKind {
    File { size: u64 },
    Directory { truncated: bool },
    Symlink { target: Option<CompactString> },
}

/// Size of a regular file, or 0 with a warning when its metadata is unreadable.
fn file_size(
    path: &Path,
    metadata: io::Result<fs::Metadata>,
    warnings: &mut Vec<ScanWarning>,
) -> u64 {
    match metadata {
        Ok(metadata) => metadata.len(),
        Err(err) => {
            push_warning(warnings, ScanWarning::metadata_error(path, &err));
            0
        }
    }
}

/// Record a warning once per path.
fn push_warning(warnings: &mut Vec<ScanWarning>, warning: ScanWarning) {
    if warnings.iter().any(|w| w.path == warning.path) {
        return;
    }
    tracing::warn!("{warning}");
    warnings.push(warning);
}

/// Convert a walker error into a warning, falling back to `path` when the
/// error carries none.
fn walk_warning(err: &jwalk::Error, path: Option<&Path>) -> ScanWarning {
    let path = err
        .path()
        .or(path)
        .map(Path::to_path_buf)
        .unwrap_or_default();
    match err.io_error() {
        Some(io_err) => ScanWarning::read_error(path, io_err),
        None => ScanWarning::new(path, err.to_string(), WarningKind::ReadError),
    }
}

/// Recursively build a directory node and its children.
fn build_node(
    path: &Path,
    name: CompactString,
    depth: u32,
    truncated: bool,
    entries_by_parent: &mut HashMap<PathBuf, Vec<EntryInfo>>,
) -> Node {
    let mut node = Node::new_directory(name, depth);
    node.truncated = truncated;

    let children_entries = entries_by_parent.remove(path).unwrap_or_default();
    for entry in children_entries {
        let child = match entry.kind {
            EntryKind::Directory { truncated } => {
                build_node(&entry.path, entry.name, depth + 1, truncated, entries_by_parent)
            }
            EntryKind::File { size } => Node::new_file(entry.name, size, depth + 1),
            EntryKind::Symlink { target } => Node::new_symlink(entry.name, target, depth + 1),
        };
        node.children.push(child);
    }

    // jwalk already yields sorted entries; keep the order independent of it
    node.children
        .sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));

    node
}
