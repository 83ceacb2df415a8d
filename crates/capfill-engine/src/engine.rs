//! The sequential transfer engine.
//!
//! Copies each selected file to the destination under a generated
//! collision-free name, reports fine-grained progress, optionally verifies
//! content hashes, and accumulates per-file failures instead of aborting.
//! Transfers are strictly sequential: one deterministic progress stream, no
//! contention on the (often slow, removable) destination medium.

use crate::copy::copy_with_progress;
use crate::error::{EngineError, FileError};
use crate::hasher::hash_file;
use capfill_core::{Event, EventSender, Selection, TransferRecord, TransferStatus};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Transfer behavior switches
#[derive(Debug, Clone, Copy)]
pub struct TransferOptions {
    /// Compare source and destination hashes after each copy
    pub verify: bool,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self { verify: true }
    }
}

/// Outcome of a whole batch.
///
/// Per-file failures accumulate here; the caller decides the final exit
/// status from whether [`BatchReport::is_clean`] holds.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One record per selected file, in acceptance order
    pub records: Vec<TransferRecord>,
    /// Accumulated per-file failures
    pub errors: Vec<FileError>,
}

impl BatchReport {
    /// Whether the batch finished without any per-file failure
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Generate the destination name for the file at `index`: a zero-padded
/// decimal counter plus the source extension.
///
/// Monotonic in acceptance order, so the destination listing preserves write
/// order, and collision-free even among identical source basenames.
///
/// # Example
///
/// ```
/// use capfill_engine::dest_name;
/// use std::path::Path;
///
/// assert_eq!(dest_name(0, Path::new("/music/song.mp3")), "0000000000.mp3");
/// assert_eq!(dest_name(1, Path::new("/music/song.flac")), "0000000001.flac");
/// ```
#[must_use]
pub fn dest_name(index: usize, source: &Path) -> String {
    match source.extension() {
        Some(ext) => format!("{index:010}.{}", ext.to_string_lossy()),
        None => format!("{index:010}"),
    }
}

/// Sequential file transfer engine
pub struct TransferEngine {
    dest_root: PathBuf,
    options: TransferOptions,
}

impl TransferEngine {
    /// Create an engine writing into `dest_root`.
    ///
    /// The directory is not created here; creation happens lazily before the
    /// first write so a run with an empty selection touches nothing.
    pub fn new(dest_root: impl Into<PathBuf>, options: TransferOptions) -> Self {
        Self {
            dest_root: dest_root.into(),
            options,
        }
    }

    /// Copy every file in `selection`, emitting progress events throughout.
    ///
    /// Emits [`Event::BatchSized`] first and always closes the stream with
    /// [`Event::BatchDone`], on the fatal path included. Per-file I/O errors
    /// and hash mismatches are recorded in the report and processing
    /// continues with the next file.
    ///
    /// # Errors
    ///
    /// The only fatal condition: the destination root cannot be created.
    pub fn run(
        &self,
        selection: &Selection,
        events: &EventSender,
    ) -> Result<BatchReport, EngineError> {
        events.emit(Event::BatchSized {
            file_count: selection.len(),
            total_bytes: selection.total_bytes,
        });

        let mut report = BatchReport::default();
        let mut dest_ready = false;

        for (index, file) in selection.files.iter().enumerate() {
            let mut record = TransferRecord {
                index,
                source: file.path.clone(),
                dest_name: dest_name(index, &file.path),
                size: file.size,
                status: TransferStatus::Pending,
            };

            if !dest_ready {
                if let Err(source) = fs::create_dir_all(&self.dest_root) {
                    events.emit(Event::BatchDone);
                    return Err(EngineError::CreateDest {
                        path: self.dest_root.clone(),
                        source,
                    });
                }
                dest_ready = true;
            }

            events.emit(Event::FileStarted {
                index,
                name: file.name(),
                size: file.size,
                path: file.path.clone(),
            });
            record.status = TransferStatus::InProgress;

            let dest_path = self.dest_root.join(&record.dest_name);
            info!(from = %file.path.display(), to = %dest_path.display(), "copying");

            if let Err(source) = copy_with_progress(&file.path, &dest_path, events) {
                warn!(path = %file.path.display(), error = %source, "copy failed");
                events.emit(Event::FileFailed {
                    index,
                    path: file.path.clone(),
                    message: source.to_string(),
                });
                record.status = TransferStatus::Failed;
                report.errors.push(FileError::Copy {
                    path: file.path.clone(),
                    source,
                });
                report.records.push(record);
                continue;
            }

            record.status = if self.options.verify {
                self.verify_pair(&file.path, &dest_path, index, events, &mut report.errors)
            } else {
                TransferStatus::Completed
            };
            report.records.push(record);
        }

        events.emit(Event::BatchDone);
        Ok(report)
    }

    /// Hash source and destination and compare. A mismatched destination is
    /// left in place for inspection, never cleaned up silently.
    fn verify_pair(
        &self,
        source: &Path,
        dest: &Path,
        index: usize,
        events: &EventSender,
        errors: &mut Vec<FileError>,
    ) -> TransferStatus {
        let hashes = hash_file(source)
            .map_err(|e| (source, e))
            .and_then(|s| hash_file(dest).map_err(|e| (dest, e)).map(|d| (s, d)));

        match hashes {
            Ok((source_hash, dest_hash)) if source_hash == dest_hash => {
                events.emit(Event::FileVerified {
                    path: source.to_path_buf(),
                    passed: true,
                });
                TransferStatus::Verified
            }
            Ok(_) => {
                warn!(from = %source.display(), to = %dest.display(), "hash mismatch");
                events.emit(Event::FileVerified {
                    path: source.to_path_buf(),
                    passed: false,
                });
                errors.push(FileError::HashMismatch {
                    from: source.to_path_buf(),
                    to: dest.to_path_buf(),
                });
                TransferStatus::Mismatched
            }
            Err((path, source_err)) => {
                warn!(path = %path.display(), error = %source_err, "verification read failed");
                events.emit(Event::FileFailed {
                    index,
                    path: path.to_path_buf(),
                    message: source_err.to_string(),
                });
                errors.push(FileError::Hash {
                    path: path.to_path_buf(),
                    source: source_err,
                });
                TransferStatus::Failed
            }
        }
    }
}
