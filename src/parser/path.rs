//! Helpers for dotted/bracketed parameter paths.

/// Strip the trailing `[i]` index: `"a.b[2]"` → `"a.b"`, `"a[0][1]"` → `"a[0]"`.
///
/// Paths without a bracket are returned unchanged.
pub fn array_prefix(path: &str) -> &str {
    match path.rfind('[') {
        Some(pos) => &path[..pos],
        None => path,
    }
}

/// Everything before the first `.`; `None` when the path has a single segment.
///
/// A leading `.` leaves an empty head, which is also `None`: such a path has
/// no top-level segment and never sits under a dependency name.
pub fn top_level_name(path: &str) -> Option<&str> {
    match path.split_once('.') {
        Some((head, _)) if !head.is_empty() => Some(head),
        _ => None,
    }
}

/// Join a mapping key onto a parent path.
pub fn child(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Append a sequence index to a parent path.
pub fn index(parent: &str, i: usize) -> String {
    format!("{parent}[{i}]")
}

/// True when `path` is `prefix` itself or lies underneath it.
pub fn is_within(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}
