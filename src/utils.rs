/*!
 * Utility functions for codedump
 */

use std::fs;
use std::path::Path;

/// Name shown for the project: the last component of `root`.
///
/// Paths without one, such as `.` or `..`, are resolved first.
pub fn project_name(root: &Path) -> String {
    if let Some(name) = root.file_name() {
        return name.to_string_lossy().to_string();
    }

    fs::canonicalize(root)
        .ok()
        .and_then(|abs| abs.file_name().map(|name| name.to_string_lossy().to_string()))
        .unwrap_or_else(|| root.display().to_string())
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
