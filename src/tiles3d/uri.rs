//! Content URI classification and path resolution

use std::path::{Component, Path, PathBuf};

use crate::config::ManifestConfig;

/// What a content URI points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Leaf payload (b3dm by default)
    Payload,
    /// Nested tileset document
    Document,
    /// Anything else
    Unclassified,
}

/// Drop the query string and fragment from a URI
pub fn strip_query_fragment(uri: &str) -> &str {
    let path = uri.split('?').next().unwrap_or(uri);
    path.split('#').next().unwrap_or(path)
}

/// Classify a URI by the suffix of its path component.
///
/// Payload suffix is checked first, so a config with overlapping suffixes still
/// treats payloads as payloads. Every `.json` path is assumed to be a tileset.
pub fn classify(uri: &str, config: &ManifestConfig) -> ReferenceKind {
    let path = strip_query_fragment(uri).to_ascii_lowercase();
    if path.ends_with(&config.payload_suffix.to_ascii_lowercase()) {
        ReferenceKind::Payload
    } else if path.ends_with(&config.document_suffix.to_ascii_lowercase()) {
        ReferenceKind::Document
    } else {
        ReferenceKind::Unclassified
    }
}

/// Resolve a URI relative to the directory of the document that contains it.
///
/// Existing paths are canonicalized so the same file reached through different
/// relative spellings gets one key; missing paths are normalized lexically.
pub fn resolve(base_dir: &Path, uri: &str) -> PathBuf {
    let joined = base_dir.join(strip_query_fragment(uri));
    absolute_path(&joined)
}

/// Absolute, canonical-when-possible form of a path
pub fn absolute_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    normalize_lexically(&absolute)
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
