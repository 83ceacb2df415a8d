//! Event consumers: the interactive progress display and the headless log.
//!
//! Both drain the channel until [`Event::BatchDone`] (or producer
//! disconnect) and never mutate producer state; all display bookkeeping is
//! local, updated by value from the received events.

use crate::history::{EntryStatus, RecentFiles};
use crate::progress::{TransferBars, format_bytes, scan_spinner};
use capfill_core::{Event, EventReceiver};
use console::style;
use indicatif::MultiProgress;
use tracing::{error, info};

/// Drain events into the interactive progress display.
pub fn run_display(rx: &EventReceiver, history_lines: usize) {
    let mp = MultiProgress::new();
    let spinner = scan_spinner(&mp);

    let mut scanned = 0usize;
    let mut matched = 0usize;
    let mut bars: Option<TransferBars> = None;
    let mut history = RecentFiles::new(history_lines);
    let mut file_count = 0usize;
    let mut failures = 0usize;

    for event in rx.iter() {
        match event {
            Event::Scanned { .. } => {
                scanned += 1;
                spinner.set_message(format!("{scanned} files seen ({matched} match)"));
            }
            Event::Matched { .. } => {
                matched += 1;
            }
            Event::BatchSized {
                file_count: count,
                total_bytes,
            } => {
                spinner.finish_with_message(format!(
                    "{matched} candidates, selected {count} files ({})",
                    format_bytes(total_bytes)
                ));
                let transfer = TransferBars::new(&mp, total_bytes);
                transfer
                    .overall
                    .set_message(format!("Copying {count} files"));
                bars = Some(transfer);
                file_count = count;
            }
            Event::FileStarted {
                index,
                name,
                size,
                path,
            } => {
                if let Some(bars) = &bars {
                    bars.current.reset();
                    bars.current.set_length(size);
                    bars.current.set_message(format!(
                        "[{}/{}] {} ({})",
                        index + 1,
                        file_count,
                        name,
                        format_bytes(size)
                    ));
                }
                history.push(path, name);
                refresh_recent(&bars, &history);
            }
            Event::BytesCopied { delta, file_total } => {
                if let Some(bars) = &bars {
                    bars.overall.inc(delta);
                    bars.current.set_position(file_total);
                }
            }
            Event::FileVerified { path, passed } => {
                if !passed {
                    failures += 1;
                }
                history.mark(
                    &path,
                    if passed {
                        EntryStatus::Passed
                    } else {
                        EntryStatus::Failed
                    },
                );
                refresh_recent(&bars, &history);
            }
            Event::FileFailed { path, message, .. } => {
                failures += 1;
                history.mark(&path, EntryStatus::Failed);
                refresh_recent(&bars, &history);
                if let Some(bars) = &bars {
                    bars.recent.println(format!(
                        "{} {}: {message}",
                        style("error:").red().bold(),
                        path.display()
                    ));
                }
            }
            Event::BatchDone => break,
        }
    }

    if let Some(bars) = bars {
        bars.current.finish_and_clear();
        bars.recent.finish_and_clear();
        if failures == 0 {
            bars.overall.finish_with_message("Done");
        } else {
            bars.overall
                .finish_with_message(format!("Done, {failures} file(s) failed"));
        }
    } else {
        spinner.finish_and_clear();
    }
}

/// Drain events into the structured log (headless mode).
pub fn run_log(rx: &EventReceiver) {
    for event in rx.iter() {
        match event {
            Event::Scanned { .. } | Event::BytesCopied { .. } => {
                // Too chatty for log output
            }
            Event::Matched { path } => {
                info!(path = %path.display(), "candidate matched");
            }
            Event::BatchSized {
                file_count,
                total_bytes,
            } => {
                info!(file_count, total_bytes, "selection committed");
            }
            Event::FileStarted {
                index, name, size, ..
            } => {
                info!(index, name = %name, size, "file started");
            }
            Event::FileVerified { path, passed } => {
                if passed {
                    info!(path = %path.display(), "verification passed");
                } else {
                    error!(path = %path.display(), "verification failed");
                }
            }
            Event::FileFailed { path, message, .. } => {
                error!(path = %path.display(), message = %message, "file failed");
            }
            Event::BatchDone => break,
        }
    }
}

fn refresh_recent(bars: &Option<TransferBars>, history: &RecentFiles) {
    if let Some(bars) = bars {
        bars.recent.set_message(history.render());
    }
}
