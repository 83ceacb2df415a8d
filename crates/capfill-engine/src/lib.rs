//! # capfill Engine
//!
//! Sequential file transfer for the capfill pipeline.
//!
//! This crate provides:
//! - Chunked streaming copy with per-chunk progress events
//! - BLAKE3 source/destination verification
//! - Collision-free monotonic destination naming
//! - Batch-level failure accumulation (per-file errors never abort the batch)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod copy;
pub mod engine;
pub mod error;
pub mod hasher;

pub use engine::{BatchReport, TransferEngine, TransferOptions, dest_name};
pub use error::{EngineError, FileError};

/// Copy buffer size (128 KiB)
pub const COPY_BUFFER_SIZE: usize = 128 * 1024;
