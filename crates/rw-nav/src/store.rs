//! Shared, swappable navigation snapshot.
//!
//! [`NavigationStore`] owns the current [`SiteConfig`] behind an `Arc`.
//! Readers clone the `Arc` and never observe a partially updated tree; a
//! rebuild loads and normalizes a complete new value before swapping it in.
//!
//! # Thread Safety
//!
//! - `get()` takes a read lock just long enough to clone the `Arc`
//! - reloads are serialized by a `Mutex<()>` with double-checked validity
//! - `invalidate()` is lock-free (atomic flag)
//! - a failed reload keeps the previous snapshot

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Instant;

use crate::error::LoadError;
use crate::loader::{elapsed_ms, load_file};
use crate::model::SiteConfig;
use crate::normalize::normalize;

/// Load and normalize a navigation file.
fn load_normalized(path: &Path) -> Result<SiteConfig, LoadError> {
    load_file(path).map(normalize)
}

/// Navigation snapshot backed by a configuration file.
pub struct NavigationStore {
    path: PathBuf,
    /// Mutex for serializing reload operations.
    reload_lock: Mutex<()>,
    /// Current snapshot (atomically swappable).
    current: RwLock<Arc<SiteConfig>>,
    /// Snapshot validity flag.
    valid: AtomicBool,
    /// Number of successful loads.
    generation: AtomicU64,
}

impl NavigationStore {
    /// Load the navigation file and create a store holding it.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] of the initial load; there is no previous
    /// snapshot to fall back to.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let path = path.into();
        let start = Instant::now();
        let config = load_normalized(&path)?;

        tracing::info!(
            path = %path.display(),
            nav = config.nav.len(),
            leaves = config.leaf_count(),
            elapsed_ms = elapsed_ms(start),
            "Navigation loaded"
        );

        Ok(Self {
            path,
            reload_lock: Mutex::new(()),
            current: RwLock::new(Arc::new(config)),
            valid: AtomicBool::new(true),
            generation: AtomicU64::new(1),
        })
    }

    /// Path of the backing navigation file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current snapshot, without checking validity.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn get(&self) -> Arc<SiteConfig> {
        self.current.read().unwrap().clone()
    }

    /// Number of successful loads, starting at 1 for the initial load.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Mark the snapshot stale; the next [`reload_if_needed`](Self::reload_if_needed)
    /// rebuilds it.
    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }

    /// Whether the snapshot is known to be up to date.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    /// Return the current snapshot, rebuilding it first if invalidated.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] of a failed rebuild. The previous snapshot
    /// stays current and the store stays invalid, so the next call retries.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn reload_if_needed(&self) -> Result<Arc<SiteConfig>, LoadError> {
        // Fast path: snapshot valid
        if self.is_valid() {
            return Ok(self.get());
        }

        let _guard = self.reload_lock.lock().unwrap();

        // Double-check after acquiring lock
        if self.is_valid() {
            return Ok(self.get());
        }

        self.reload_locked()
    }

    /// Rebuild the snapshot unconditionally.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] of a failed rebuild; the previous snapshot
    /// stays current.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn reload(&self) -> Result<Arc<SiteConfig>, LoadError> {
        let _guard = self.reload_lock.lock().unwrap();
        self.reload_locked()
    }

    /// Caller must hold `reload_lock`.
    fn reload_locked(&self) -> Result<Arc<SiteConfig>, LoadError> {
        let start = Instant::now();

        // Set before reading so an invalidate() racing with this load is not lost
        self.valid.store(true, Ordering::Release);

        match load_normalized(&self.path) {
            Ok(config) => {
                let config = Arc::new(config);
                *self.current.write().unwrap() = Arc::clone(&config);
                let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
                tracing::info!(
                    path = %self.path.display(),
                    generation,
                    nav = config.nav.len(),
                    leaves = config.leaf_count(),
                    elapsed_ms = elapsed_ms(start),
                    "Navigation reloaded"
                );
                Ok(config)
            }
            Err(err) => {
                self.valid.store(false, Ordering::Release);
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Navigation reload failed, keeping previous snapshot"
                );
                Err(err)
            }
        }
    }
}
