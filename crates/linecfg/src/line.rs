//! Structural line records and line-shape probes.
//!
//! Documents remember file layout as a list of [`Line`] entries so comments
//! and blank lines survive a rewrite. A value entry records only its key;
//! the live value is looked up in the owning section at render time, which
//! is what lets edits happen without ever touching the line list.

/// One logical line of a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A whitespace-only line.
    Blank,
    /// A `#` comment, stored trimmed.
    Comment(String),
    /// A `key = value` line, identified by key only.
    Value(String),
    /// A `[name]` header, identified by the bare section name.
    Section(String),
}

pub(crate) fn is_comment(line: &str) -> bool {
    line.trim().starts_with('#')
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Split a `key = value` line on the first delimiter, trimming both halves.
/// Returns None when the line carries no delimiter.
pub(crate) fn split_pair(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once('=')?;
    Some((key.trim().to_owned(), value.trim().to_owned()))
}

/// Extract the name from a `[name]` header line, trimmed inside and out.
pub(crate) fn section_name(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('[')?.strip_suffix(']')?;
    Some(inner.trim().to_owned())
}
