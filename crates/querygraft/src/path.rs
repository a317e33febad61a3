//! Dot-separated path strings for addressing nodes in a selection tree.

/// Splits a dot-separated path into its segments.
///
/// Segments are trimmed; empty segments from stray or consecutive dots are
/// silently dropped, so `""`, `"."`, and `".."` all mean the root (an empty
/// segment list).
pub fn parse_path(path: &str) -> Vec<String> {
    path.split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins segments back into a dot-separated path string.
///
/// The left inverse of [`parse_path`] for non-empty, dot-free, pre-trimmed
/// segments.
pub fn format_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(".")
}
