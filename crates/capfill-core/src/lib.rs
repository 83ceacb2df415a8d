//! # capfill Core
//!
//! Core building blocks for the capfill pipeline.
//!
//! This crate provides:
//! - The candidate/selection/transfer-record data model
//! - Randomized greedy selection under a byte budget with bounded-miss exit
//! - The closed progress-event set and its bounded producer/consumer channel

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod events;
pub mod selector;
pub mod types;

pub use events::{EVENT_QUEUE_DEPTH, Event, EventReceiver, EventSender, channel};
pub use selector::{DEFAULT_MISS_LIMIT, SelectorConfig, select};
pub use types::{CandidateFile, Selection, TransferRecord, TransferStatus};
