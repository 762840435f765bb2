//! Statistics text renderer.

use std::path::Path;

use itertools::Itertools;

use dirscope_core::Stats;

use crate::format::format_size;

/// Number of extension buckets listed before the rest are folded.
pub const TOP_EXTENSIONS: usize = 10;

/// Render statistics as a short console report.
pub fn render_stats(stats: &Stats, root_path: &Path) -> String {
    let mut lines = vec![
        format!("├── Directories: {}", stats.total_dirs),
        format!("├── Files: {}", stats.total_files),
    ];
    if stats.total_symlinks > 0 {
        lines.push(format!("├── Symlinks: {}", stats.total_symlinks));
    }
    lines.push(format!("├── Total size: {}", format_size(stats.total_size)));
    lines.push(format!("├── Max depth: {}", stats.max_depth));
    if let Some((path, size)) = &stats.largest_file {
        lines.push(format!("├── Largest file: {path} ({})", format_size(*size)));
    }
    lines.push(format!("└── Scanned path: {}", root_path.display()));

    let mut out = String::from("Structure statistics:\n");
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }

    if !stats.extension_counts.is_empty() {
        out.push_str("\nFile types:\n");
        let ranked = stats
            .extension_counts
            .iter()
            .sorted_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)))
            .collect_vec();
        let width = ranked
            .iter()
            .take(TOP_EXTENSIONS)
            .map(|(ext, _)| ext.len())
            .max()
            .unwrap_or(0);

        for (ext, count) in ranked.iter().take(TOP_EXTENSIONS) {
            out.push_str(&format!("  {ext:<width$}  {count:>6}\n"));
        }
        let rest: u64 = ranked.iter().skip(TOP_EXTENSIONS).map(|(_, c)| **c).sum();
        if rest > 0 {
            out.push_str(&format!(
                "  {} more type(s): {rest} file(s)\n",
                ranked.len() - TOP_EXTENSIONS
            ));
        }
    }

    out
}
