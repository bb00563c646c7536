//! Debouncing of file system events.
//!
//! Editors emit several events per save. Each path is reported once, after
//! it has been quiet for the debounce duration.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Thread-safe per-path event debouncer.
pub(crate) struct ChangeDebouncer {
    pending: Mutex<HashMap<PathBuf, Instant>>,
    debounce_duration: Duration,
}

impl ChangeDebouncer {
    pub(crate) fn new(debounce_duration: Duration) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            debounce_duration,
        }
    }

    /// Record a change, pushing back the deadline for `path`.
    ///
    /// Called from watcher callbacks.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub(crate) fn record(&self, path: PathBuf) {
        let deadline = Instant::now() + self.debounce_duration;
        self.pending.lock().unwrap().insert(path, deadline);
    }

    /// Remove and return paths whose deadline has passed, sorted.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub(crate) fn drain_ready(&self) -> Vec<PathBuf> {
        let now = Instant::now();
        let mut pending = self.pending.lock().unwrap();

        let mut ready = Vec::new();
        pending.retain(|path, deadline| {
            if *deadline <= now {
                ready.push(path.clone());
                false
            } else {
                true
            }
        });
        ready.sort();
        ready
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_change_emitted_after_deadline() {
        let debouncer = ChangeDebouncer::new(Duration::from_millis(10));
        let path = PathBuf::from("/docs/navigation.toml");

        debouncer.record(path.clone());
        assert!(debouncer.drain_ready().is_empty());

        thread::sleep(Duration::from_millis(15));

        assert_eq!(debouncer.drain_ready(), vec![path]);
        assert!(debouncer.drain_ready().is_empty());
    }

    #[test]
    fn test_burst_on_one_path_coalesces() {
        let debouncer = ChangeDebouncer::new(Duration::from_millis(10));
        let path = PathBuf::from("/docs/navigation.toml");

        debouncer.record(path.clone());
        debouncer.record(path.clone());
        debouncer.record(path.clone());

        thread::sleep(Duration::from_millis(15));

        assert_eq!(debouncer.drain_ready(), vec![path]);
    }

    #[test]
    fn test_new_event_extends_deadline() {
        let debouncer = ChangeDebouncer::new(Duration::from_millis(30));
        let path = PathBuf::from("/docs/navigation.toml");

        debouncer.record(path.clone());
        thread::sleep(Duration::from_millis(20));
        debouncer.record(path.clone());
        thread::sleep(Duration::from_millis(20));

        // 40ms since first event, only 20ms since the last one
        assert!(debouncer.drain_ready().is_empty());

        thread::sleep(Duration::from_millis(20));
        assert_eq!(debouncer.drain_ready(), vec![path]);
    }

    #[test]
    fn test_paths_are_independent() {
        let debouncer = ChangeDebouncer::new(Duration::from_millis(10));
        let nav = PathBuf::from("/docs/navigation.toml");
        let page = PathBuf::from("/docs/guide.md");

        debouncer.record(page.clone());
        debouncer.record(nav.clone());

        thread::sleep(Duration::from_millis(15));

        assert_eq!(debouncer.drain_ready(), vec![page, nav]);
    }
}
