//! Shared data model for selection and transfer.

use std::path::PathBuf;

/// A discovered file eligible for selection.
///
/// Immutable snapshot taken at discovery time; the size is never re-resolved
/// after this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Absolute or root-relative source path
    pub path: PathBuf,
    /// File size in bytes at discovery time
    pub size: u64,
}

impl CandidateFile {
    /// Create a candidate from a path and size
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// File name component, lossily decoded
    #[must_use]
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// The committed subset of candidates chosen for transfer.
///
/// Invariant: `total_bytes` never exceeds the capacity the selector was
/// given, and equals the sum of the member sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected files in acceptance order
    pub files: Vec<CandidateFile>,
    /// Sum of the selected file sizes
    pub total_bytes: u64,
}

impl Selection {
    /// Number of selected files
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the selection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Per-file transfer lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    /// Queued, not yet dequeued by the engine
    Pending,
    /// Copy in progress
    InProgress,
    /// Copied; verification was disabled
    Completed,
    /// Copied and the source/destination hashes matched
    Verified,
    /// Copied but the hashes differed; destination left in place
    Mismatched,
    /// Copy aborted by an I/O error
    Failed,
}

impl TransferStatus {
    /// Whether this is a terminal state
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::InProgress)
    }

    /// Whether this terminal state counts as a batch error
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Mismatched | Self::Failed)
    }
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in progress"),
            Self::Completed => write!(f, "completed"),
            Self::Verified => write!(f, "verified"),
            Self::Mismatched => write!(f, "hash mismatch"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Record of one file's journey through the transfer engine
#[derive(Debug, Clone)]
pub struct TransferRecord {
    /// Zero-based position in the selection
    pub index: usize,
    /// Source path
    pub source: PathBuf,
    /// Generated destination file name
    pub dest_name: String,
    /// Size in bytes
    pub size: u64,
    /// Current lifecycle state
    pub status: TransferStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_name() {
        let c = CandidateFile::new("/music/album/track.mp3", 42);
        assert_eq!(c.name(), "track.mp3");
        assert_eq!(c.size, 42);
    }

    #[test]
    fn test_selection_empty() {
        let s = Selection::default();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
        assert_eq!(s.total_bytes, 0);
    }

    #[test]
    fn test_status_terminality() {
        assert!(!TransferStatus::Pending.is_terminal());
        assert!(!TransferStatus::InProgress.is_terminal());
        assert!(TransferStatus::Completed.is_terminal());
        assert!(TransferStatus::Verified.is_terminal());
        assert!(TransferStatus::Mismatched.is_terminal());
        assert!(TransferStatus::Failed.is_terminal());
    }

    #[test]
    fn test_status_failure_classification() {
        assert!(TransferStatus::Mismatched.is_failure());
        assert!(TransferStatus::Failed.is_failure());
        assert!(!TransferStatus::Verified.is_failure());
        assert!(!TransferStatus::Completed.is_failure());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(TransferStatus::Verified.to_string(), "verified");
        assert_eq!(TransferStatus::Mismatched.to_string(), "hash mismatch");
    }
}
