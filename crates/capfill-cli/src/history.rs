//! Bounded window over recently transferred files.
//!
//! Owned exclusively by the event consumer and updated by value from
//! received events; nothing here is shared back across the producer
//! boundary.

use console::style;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Display state of one recently transferred file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Copy or verification still running
    InProgress,
    /// Verification passed (or copy finished with verification off)
    Passed,
    /// Copy failed or hashes mismatched
    Failed,
}

/// One entry in the window
#[derive(Debug, Clone)]
pub struct RecentEntry {
    /// Source path, used to match status updates
    pub path: PathBuf,
    /// Display name
    pub name: String,
    /// Current display state
    pub status: EntryStatus,
}

/// Fixed-capacity window of the last transferred files.
///
/// Pushing beyond capacity evicts the oldest entry.
#[derive(Debug)]
pub struct RecentFiles {
    capacity: usize,
    entries: VecDeque<RecentEntry>,
}

impl RecentFiles {
    /// Create a window holding at most `capacity` entries
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    /// Add a file in the in-progress state, evicting the oldest if full
    pub fn push(&mut self, path: PathBuf, name: String) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(RecentEntry {
            path,
            name,
            status: EntryStatus::InProgress,
        });
    }

    /// Update the status of the entry for `path`, if still in the window
    pub fn mark(&mut self, path: &Path, status: EntryStatus) {
        if let Some(entry) = self.entries.iter_mut().rev().find(|e| e.path == path) {
            entry.status = status;
        }
    }

    /// Number of entries currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the window is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries oldest-first
    pub fn iter(&self) -> impl Iterator<Item = &RecentEntry> {
        self.entries.iter()
    }

    /// Render the window as a single styled line, oldest first
    #[must_use]
    pub fn render(&self) -> String {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|e| match e.status {
                EntryStatus::InProgress => style(format!("> {}", e.name)).bold().to_string(),
                EntryStatus::Passed => style(e.name.clone()).green().to_string(),
                EntryStatus::Failed => style(e.name.clone()).red().to_string(),
            })
            .collect();
        parts.join("  ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(window: &mut RecentFiles, name: &str) {
        window.push(PathBuf::from(format!("/src/{name}")), name.to_string());
    }

    #[test]
    fn test_push_evicts_oldest_beyond_capacity() {
        let mut window = RecentFiles::new(3);
        for name in ["a", "b", "c", "d"] {
            push(&mut window, name);
        }

        assert_eq!(window.len(), 3);
        let names: Vec<&str> = window.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b", "c", "d"]);
    }

    #[test]
    fn test_mark_updates_matching_entry() {
        let mut window = RecentFiles::new(3);
        push(&mut window, "a");
        push(&mut window, "b");

        window.mark(Path::new("/src/a"), EntryStatus::Passed);
        window.mark(Path::new("/src/b"), EntryStatus::Failed);

        let statuses: Vec<EntryStatus> = window.iter().map(|e| e.status).collect();
        assert_eq!(statuses, [EntryStatus::Passed, EntryStatus::Failed]);
    }

    #[test]
    fn test_mark_after_eviction_is_noop() {
        let mut window = RecentFiles::new(1);
        push(&mut window, "a");
        push(&mut window, "b");

        window.mark(Path::new("/src/a"), EntryStatus::Passed);
        assert_eq!(window.iter().next().unwrap().status, EntryStatus::InProgress);
    }

    #[test]
    fn test_render_contains_names_oldest_first() {
        let mut window = RecentFiles::new(2);
        push(&mut window, "first");
        push(&mut window, "second");

        let rendered = window.render();
        let first = rendered.find("first").unwrap();
        let second = rendered.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut window = RecentFiles::new(0);
        push(&mut window, "a");
        assert_eq!(window.len(), 1);
    }
}
