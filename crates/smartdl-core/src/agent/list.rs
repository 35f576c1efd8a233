//! Directory listing for `list_downloads`.

use anyhow::{Context, Result};
use globset::GlobBuilder;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One listed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub size_formatted: String,
}

/// Regular files under `dir` whose path relative to `dir` matches
/// `pattern`, sorted by path.
///
/// `*` never crosses a `/`, so plain patterns see the top level only; a
/// pattern containing `**` or `/` descends into subdirectories.
pub fn list_files(dir: &Path, pattern: &str) -> Result<Vec<FileEntry>> {
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .with_context(|| format!("invalid pattern {pattern:?}"))?
        .compile_matcher();
    let max_depth = if pattern.contains("**") || pattern.contains('/') {
        usize::MAX
    } else {
        1
    };

    let mut files: Vec<(PathBuf, FileEntry)> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(max_depth) {
        let entry = entry.with_context(|| format!("read {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        if !matcher.is_match(relative) {
            continue;
        }
        let size = entry
            .metadata()
            .with_context(|| format!("stat {}", entry.path().display()))?
            .len();
        files.push((
            entry.path().to_path_buf(),
            FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path().display().to_string(),
                size,
                size_formatted: format_size(size),
            },
        ));
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files.into_iter().map(|(_, entry)| entry).collect())
}

/// Human-readable size with one decimal, in 1024 steps up to TB.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} TB")
}
