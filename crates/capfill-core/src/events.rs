//! Progress-event protocol between the transfer pipeline and its observer.
//!
//! A bounded, ordered, single-producer channel decouples the blocking
//! producer (scan, selection, transfer) from an independently paced consumer
//! (renderer, logger, or none). A full channel blocks the producer until the
//! consumer drains; that backpressure is intended, not an error.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::path::PathBuf;

/// Default channel depth: headroom for bursts, not an unbounded queue.
pub const EVENT_QUEUE_DEPTH: usize = 10;

/// Closed set of pipeline progress events.
///
/// Payloads are never mutated after emission and arrive in emission order.
/// [`Event::BatchDone`] is always last; nothing follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A file was visited during the source scan
    Scanned {
        /// Visited path
        path: PathBuf,
    },
    /// A scanned file passed the match filters
    Matched {
        /// Accepted candidate path
        path: PathBuf,
    },
    /// Selection is committed; transfer begins
    BatchSized {
        /// Number of files selected
        file_count: usize,
        /// Total bytes to copy
        total_bytes: u64,
    },
    /// The engine dequeued a file and is about to copy it
    FileStarted {
        /// Zero-based position in the selection
        index: usize,
        /// Source file name
        name: String,
        /// File size in bytes
        size: u64,
        /// Source path
        path: PathBuf,
    },
    /// One write chunk completed
    BytesCopied {
        /// Bytes written by this chunk
        delta: u64,
        /// Running total for the current file
        file_total: u64,
    },
    /// Post-copy hash comparison finished
    FileVerified {
        /// Source path
        path: PathBuf,
        /// Whether source and destination hashes matched
        passed: bool,
    },
    /// The copy of one file was aborted by an I/O error
    FileFailed {
        /// Zero-based position in the selection
        index: usize,
        /// Source path
        path: PathBuf,
        /// Error description
        message: String,
    },
    /// Terminal event closing the stream
    BatchDone,
}

/// Producer half of the event channel
pub struct EventSender {
    tx: Sender<Event>,
}

impl EventSender {
    /// Emit an event, blocking while the channel is full.
    ///
    /// If the consumer has detached (receiver dropped) the event is silently
    /// discarded so a headless producer can still run to completion.
    pub fn emit(&self, event: Event) {
        let _ = self.tx.send(event);
    }
}

/// Consumer half of the event channel
pub type EventReceiver = Receiver<Event>;

/// Create a bounded event channel.
///
/// Exactly one producer is expected; `capacity` is the number of in-flight
/// events before `emit` blocks.
#[must_use]
pub fn channel(capacity: usize) -> (EventSender, EventReceiver) {
    let (tx, rx) = bounded(capacity);
    (EventSender { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_events_arrive_in_emission_order() {
        let (tx, rx) = channel(EVENT_QUEUE_DEPTH);

        tx.emit(Event::BatchSized {
            file_count: 2,
            total_bytes: 8,
        });
        tx.emit(Event::FileStarted {
            index: 0,
            name: "a.mp3".into(),
            size: 4,
            path: PathBuf::from("/src/a.mp3"),
        });
        tx.emit(Event::BatchDone);

        assert!(matches!(rx.recv().unwrap(), Event::BatchSized { .. }));
        assert!(matches!(rx.recv().unwrap(), Event::FileStarted { .. }));
        assert_eq!(rx.recv().unwrap(), Event::BatchDone);
    }

    #[test]
    fn test_full_channel_blocks_until_drained() {
        let (tx, rx) = channel(4);

        let producer = thread::spawn(move || {
            for delta in 0..100u64 {
                tx.emit(Event::BytesCopied {
                    delta,
                    file_total: delta,
                });
            }
            tx.emit(Event::BatchDone);
        });

        let mut seen = 0u64;
        for event in rx.iter() {
            match event {
                Event::BytesCopied { delta, .. } => {
                    // FIFO even across producer stalls
                    assert_eq!(delta, seen);
                    seen += 1;
                }
                Event::BatchDone => break,
                other => panic!("unexpected event: {other:?}"),
            }
        }

        assert_eq!(seen, 100);
        producer.join().unwrap();
    }

    #[test]
    fn test_emit_after_consumer_detach_is_noop() {
        let (tx, rx) = channel(1);
        drop(rx);

        // Must neither panic nor block
        tx.emit(Event::BatchDone);
        tx.emit(Event::BatchDone);
    }
}
