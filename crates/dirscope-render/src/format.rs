//! Human-readable size formatting.

use humansize::{FormatSizeOptions, WINDOWS};

/// Format a byte count with 1024-based units and one decimal place.
///
/// Values below 1024 are printed as whole bytes (`"512 B"`); larger values
/// switch unit at each power of 1024 (`"1.5 KB"`, `"3.2 MB"`).
pub fn format_size(bytes: u64) -> String {
    let options = FormatSizeOptions::from(WINDOWS).decimal_places(1);
    let formatted = humansize::format_size(bytes, options);
    // humansize spells the kilo label in lowercase
    match formatted.strip_suffix("kB") {
        Some(value) => format!("{value}KB"),
        None => formatted,
    }
}
