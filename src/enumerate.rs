//! File enumeration: non-recursive listing of a directory, filtered by a filename glob.

use std::io;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use walkdir::WalkDir;

use crate::error::Result;

/// A matched file, split into its directory and base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub full_path: PathBuf,
    pub file_name: String,
    pub directory: PathBuf,
}

impl FileEntry {
    /// `None` for paths without a UTF-8 file name.
    pub fn from_path(full_path: impl Into<PathBuf>) -> Option<Self> {
        let full_path = full_path.into();
        let file_name = full_path.file_name()?.to_str()?.to_owned();
        let directory = full_path.parent().map(Path::to_path_buf).unwrap_or_default();
        Some(Self { full_path, file_name, directory })
    }
}

/// Compile a filename glob (`*`, `?`, `[..]`) using the host's case convention.
pub fn build_glob(file_match: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(file_match).literal_separator(true)
                                           .case_insensitive(cfg!(windows))
                                           .build()?;
    Ok(glob.compile_matcher())
}

/// Files directly inside `dir` whose name matches `file_match`.
///
/// Order is whatever the directory listing yields.
#[tracing::instrument]
pub fn matching_files(dir: &Path, file_match: &str) -> Result<Vec<FileEntry>> {
    let glob = build_glob(file_match)?;
    // a bad root is fatal; per-entry errors below are only logged
    if !dir.metadata()?.is_dir() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("{} is not a directory", dir.display())).into());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        // Guard: walk errors (e.g. entry vanished mid-listing)
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::error!("Error encountered while listing dir: {}", e);
                continue;
            }
        };
        // Guard: directories and other non-files (symlinks count if they resolve to a file)
        if !entry.path().is_file() {
            tracing::trace!("Not a file: {:?}", entry.path());
            continue;
        }
        // Guard: non-utf8 names
        let Some(file) = FileEntry::from_path(entry.path()) else {
            tracing::error!("Entry name could not convert to a string: {:?}", entry.path());
            continue;
        };
        // Guard: no glob match
        if !glob.is_match(&file.file_name) {
            tracing::trace!("No glob match for: {:?}", file.file_name);
            continue;
        }
        files.push(file);
    }
    tracing::debug!("{} file(s) match `{}`", files.len(), file_match);
    Ok(files)
}
