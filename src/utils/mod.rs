//! Small helpers shared across the crate: path sanitizing and naming.

use std::path::Path;

/// Characters stripped from user-supplied path strings.
///
/// These are the characters that commonly leak into pasted paths from shells
/// and file managers (quoting, wildcard remnants) and are invalid in
/// filenames on at least one supported platform.
const DISALLOWED: &[char] = &['<', '>', ':', '"', '|', '?', '*', '\''];

/// Remove disallowed characters from a raw path string and trim whitespace.
///
/// Pure function with no error cases; a string containing none of the
/// disallowed characters passes through unchanged (minus surrounding
/// whitespace).
///
/// # Examples
///
/// ```
/// use pdffold::utils::sanitize_path;
///
/// assert_eq!(sanitize_path("  '/tmp/scans'  "), "/tmp/scans");
/// assert_eq!(sanitize_path("inv<oi>ce?.pdf"), "invoice.pdf");
/// ```
pub fn sanitize_path(raw: &str) -> String {
    raw.chars()
        .filter(|c| !DISALLOWED.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Last path segment as an owned string, used to label folder outputs.
///
/// Falls back to the full (lossy) path display for paths without a final
/// component, such as `/`.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format a byte count as a human-readable string.
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
        format!("{size} bytes")
    }
}
