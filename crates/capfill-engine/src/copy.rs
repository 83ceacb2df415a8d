//! Chunked streaming copy with per-chunk progress events.

use crate::COPY_BUFFER_SIZE;
use capfill_core::{Event, EventSender};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Copy `from` to `to`, emitting a [`Event::BytesCopied`] for every chunk
/// written. Returns the number of bytes copied.
///
/// The destination is created (truncating any file the engine itself wrote
/// earlier under the same generated name); the engine's naming scheme
/// guarantees it never points at a pre-existing foreign file.
///
/// # Errors
///
/// Returns the first I/O error from opening, reading, creating, or writing.
pub fn copy_with_progress(from: &Path, to: &Path, events: &EventSender) -> io::Result<u64> {
    let mut reader = File::open(from)?;
    let mut writer = File::create(to)?;

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;

    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        writer.write_all(&buffer[..read])?;

        let delta = read as u64;
        total += delta;
        events.emit(Event::BytesCopied {
            delta,
            file_total: total,
        });
    }

    writer.flush()?;
    Ok(total)
}
