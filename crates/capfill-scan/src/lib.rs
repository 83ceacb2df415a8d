//! # capfill Scan
//!
//! Source-tree discovery for the capfill pipeline: recursive traversal plus
//! the match predicate (extension patterns, minimum size, "live recording"
//! exclusion). Entries whose size cannot be resolved are dropped here,
//! before selection, and treated as non-existent for sizing.

#![warn(missing_docs)]
#![warn(clippy::all)]

use capfill_core::{CandidateFile, Event, EventSender};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Word-boundary match for "live" in a file or directory name.
static LIVE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\blive\b").expect("static regex must compile"));

/// Scan errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// The source root itself is missing or unreadable
    #[error("cannot read source root {path}: {source}")]
    Root {
        /// Source root path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Match predicate applied to every discovered file
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    extensions: Vec<String>,
    skip_live: bool,
    min_size: u64,
}

impl FileFilter {
    /// Create a filter matching the given extensions.
    ///
    /// Extensions are normalized: leading dots stripped, lowercased,
    /// surrounding whitespace trimmed, empties dropped. An empty list
    /// matches every extension.
    #[must_use]
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self {
            extensions,
            skip_live: false,
            min_size: 0,
        }
    }

    /// Exclude files whose name, or whose parent directory name, contains
    /// the word "live" (case-insensitive)
    #[must_use]
    pub fn skip_live(mut self, skip: bool) -> Self {
        self.skip_live = skip;
        self
    }

    /// Drop files smaller than `min_size` bytes
    #[must_use]
    pub fn min_size(mut self, min_size: u64) -> Self {
        self.min_size = min_size;
        self
    }

    /// Whether a file at `path` with the given size passes the filter
    #[must_use]
    pub fn matches(&self, path: &Path, size: u64) -> bool {
        if size < self.min_size {
            return false;
        }
        if self.skip_live && is_live(path) {
            return false;
        }
        if self.extensions.is_empty() {
            return true;
        }
        match path.extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy().to_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            }
            None => false,
        }
    }
}

fn is_live(path: &Path) -> bool {
    let name_is_live = |name: &std::ffi::OsStr| {
        LIVE_PATTERN.is_match(&name.to_string_lossy().to_lowercase())
    };
    if path.file_name().is_some_and(name_is_live) {
        return true;
    }
    path.parent()
        .and_then(Path::file_name)
        .is_some_and(name_is_live)
}

/// Walk `root` and return every file passing `filter`, in traversal order.
///
/// Emits [`Event::Scanned`] for every file visited and [`Event::Matched`]
/// for every accepted candidate. Unreadable entries and files whose metadata
/// cannot be resolved are logged and dropped.
///
/// # Errors
///
/// Fails only if the source root itself cannot be read.
pub fn scan(
    root: &Path,
    filter: &FileFilter,
    events: &EventSender,
) -> Result<Vec<CandidateFile>, ScanError> {
    // Surface a bad root as an error instead of a silently empty catalog.
    root.metadata().map_err(|source| ScanError::Root {
        path: root.to_path_buf(),
        source,
    })?;

    let mut candidates = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        events.emit(Event::Scanned {
            path: path.to_path_buf(),
        });

        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(error) => {
                warn!(path = %path.display(), %error, "cannot resolve size, dropping");
                continue;
            }
        };

        if filter.matches(path, size) {
            events.emit(Event::Matched {
                path: path.to_path_buf(),
            });
            candidates.push(CandidateFile::new(path, size));
        }
    }

    debug!(candidates = candidates.len(), root = %root.display(), "scan complete");
    Ok(candidates)
}
