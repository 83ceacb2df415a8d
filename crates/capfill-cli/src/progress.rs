//! Progress bars and human-readable size handling.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while the source tree is being scanned
pub fn scan_spinner(mp: &MultiProgress) -> ProgressBar {
    let spinner = mp.add(ProgressBar::new_spinner());
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("Invalid progress bar template"),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Scanning...");
    spinner
}

/// The transfer-phase bar set: overall bytes, current file, recent files.
pub struct TransferBars {
    /// Whole-batch byte progress
    pub overall: ProgressBar,
    /// Current file byte progress
    pub current: ProgressBar,
    /// Message-only line showing the recent-file window
    pub recent: ProgressBar,
}

impl TransferBars {
    /// Create the transfer bars under one `MultiProgress`
    #[must_use]
    pub fn new(mp: &MultiProgress, total_bytes: u64) -> Self {
        let overall = mp.add(ProgressBar::new(total_bytes));
        overall.set_style(
            ProgressStyle::default_bar()
                .template("{msg}\n[{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );

        let current = mp.add(ProgressBar::new(0));
        current.set_style(
            ProgressStyle::default_bar()
                .template("{msg}\n[{wide_bar:.white/black}] {bytes}/{total_bytes}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );

        let recent = mp.add(ProgressBar::new(0));
        recent.set_style(
            ProgressStyle::default_bar()
                .template("{msg}")
                .expect("Invalid progress bar template"),
        );

        Self {
            overall,
            current,
            recent,
        }
    }
}

/// Format bytes in human-readable form, e.g. `1.50 KB`
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;

    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{size:.2} {}", UNITS[unit])
}

/// Parse a human-readable size such as `15G`, `1.5gb`, `900K`, or a bare
/// byte count. Units are powers of 1024.
///
/// # Errors
///
/// Returns an error for malformed input and for non-positive sizes.
pub fn parse_size(input: &str) -> anyhow::Result<u64> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(input.len());
    let (number, unit) = input.split_at(split);

    let value: f64 = number
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid size: {input} (expected e.g. 15G or 900K)"))?;
    if !value.is_finite() || value <= 0.0 {
        anyhow::bail!("Size must be greater than zero: {input}");
    }

    let multiplier: u64 = match unit.trim().to_lowercase().as_str() {
        "" => 1,
        "k" | "kb" => 1024,
        "m" | "mb" => 1024 * 1024,
        "g" | "gb" => 1024 * 1024 * 1024,
        "t" | "tb" => 1024_u64.pow(4),
        other => anyhow::bail!("Unknown size unit: {other} (expected K, M, G, or T)"),
    };

    Ok((value * multiplier as f64) as u64)
}
