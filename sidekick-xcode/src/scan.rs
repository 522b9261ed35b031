//! Source file discovery

use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid scan pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Build the recursive glob pattern for `root` and `extension`.
///
/// The root is escaped so directory names containing `[` or `*` match literally.
pub fn source_pattern(root: &Path, extension: &str) -> String {
    let root = root.to_string_lossy();
    let root = root.trim_end_matches('/');
    let extension = extension.trim_start_matches('.');
    format!(
        "{}/**/*.{}",
        Pattern::escape(root),
        Pattern::escape(extension)
    )
}

/// Recursively collect regular files under `root` ending in `.extension`.
///
/// A missing root yields an empty list. Results are sorted.
pub fn scan_sources(root: impl AsRef<Path>, extension: &str) -> Result<Vec<PathBuf>, ScanError> {
    let pattern = source_pattern(root.as_ref(), extension);
    log::debug!("Scanning with pattern {}", pattern);

    let mut files = Vec::new();
    for entry in glob(&pattern)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(path) => log::debug!("Skipping non-file {}", path.display()),
            Err(e) => log::warn!("Skipping unreadable entry: {}", e),
        }
    }

    files.sort();
    log::info!("Found {} .{} files under {}", files.len(), extension.trim_start_matches('.'), root.as_ref().display());
    Ok(files)
}
