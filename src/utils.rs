/*!
 * Utility functions for ccopier
 */

use once_cell::sync::Lazy;

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

/// Entry names never listed as part of a project: version control metadata
/// and files the OS drops into folders
pub static DEFAULT_IGNORE: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version Control
        ".git",
        ".svn",
        ".hg",
        ".bzr",
        "CVS",
        // OS Files
        ".DS_Store",
        "Thumbs.db",
        "desktop.ini",
        "ehthumbs.db",
        ".directory",
        // IDE metadata
        ".idea",
    ]
});

/// Whether an entry name is on the default ignore list
pub fn is_default_ignored(name: &str) -> bool {
    DEFAULT_IGNORE.iter().any(|&p| p == name)
}

/// Remove `count` characters from the end of `text`.
///
/// Removes everything when `text` has fewer characters than `count`.
pub fn truncate_chars_from_end(text: &mut String, count: usize) {
    if count == 0 {
        return;
    }
    match text.char_indices().rev().nth(count - 1) {
        Some((idx, _)) => text.truncate(idx),
        None => text.clear(),
    }
}
