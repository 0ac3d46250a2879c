use std::fs::ReadDir;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::style;

/// Files found under the repository root, for display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileListing {
    /// Paths relative to the root, sorted
    pub files: Vec<PathBuf>,
}

impl FileListing {
    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The first `limit` paths
    pub fn sample(&self, limit: usize) -> &[PathBuf] {
        &self.files[..limit.min(self.files.len())]
    }

    /// How many paths `sample(limit)` leaves out
    pub fn remaining(&self, limit: usize) -> usize {
        self.files.len().saturating_sub(limit)
    }

    /// Console lines: total, up to `limit` sample paths, then the overflow count
    pub fn display_lines(&self, limit: usize) -> Vec<String> {
        if self.is_empty() {
            return vec![format!("   {}", style::info("No files to track (empty folder)"))];
        }

        let mut lines = vec![format!("   Files found: {}", self.total())];
        lines.extend(
            self.sample(limit)
                .iter()
                .map(|p| style::file_entry(&p.display().to_string())),
        );
        let rest = self.remaining(limit);
        if rest > 0 {
            lines.push(style::hint(&format!("      ... and {} more", rest)));
        }
        lines
    }
}

/// Walk `root` and collect every file, skipping directories whose name is in
/// `exclude` at any depth. Anything whose relative path starts with ".git"
/// (.gitignore, .gitattributes, ...) is left out as well.
///
/// Symlinks to directories are neither followed nor counted. Only an
/// unreadable `root` is an error; unreadable entries below it are skipped.
pub fn discover_files(root: &Path, exclude: &[String]) -> Result<FileListing> {
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("Failed to read directory: {}", root.display()))?;

    let mut files = Vec::new();
    collect_entries(root, entries, exclude, &mut files);
    files.sort();
    Ok(FileListing { files })
}

fn walk_dir(root: &Path, dir: &Path, exclude: &[String], out: &mut Vec<PathBuf>) {
    match std::fs::read_dir(dir) {
        Ok(entries) => collect_entries(root, entries, exclude, out),
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory")
        }
    }
}

fn collect_entries(root: &Path, entries: ReadDir, exclude: &[String], out: &mut Vec<PathBuf>) {
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping entry");
                continue;
            }
        };

        let is_dir = if file_type.is_symlink() {
            std::fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false)
        } else {
            file_type.is_dir()
        };

        if is_dir {
            let name = entry.file_name();
            if file_type.is_symlink() || exclude.iter().any(|e| name.to_str() == Some(e.as_str())) {
                continue;
            }
            walk_dir(root, &path, exclude, out);
        } else {
            let rel = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            if rel.to_string_lossy().starts_with(".git") {
                continue;
            }
            out.push(rel);
        }
    }
}
