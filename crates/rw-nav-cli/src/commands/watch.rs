//! `rw-nav watch` command implementation.
//!
//! Keeps a [`NavigationStore`] for the navigation file. Changes to that file
//! invalidate the store and trigger a rebuild; changes to markdown pages
//! only re-run link validation against the current snapshot.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Args;
use notify::{RecursiveMode, Watcher};
use rw_config::{CliSettings, Config};
use rw_nav::{LoadError, NavigationStore, SiteConfig};

use super::{dangling_links, load_failure, report_load_error};
use crate::debouncer::ChangeDebouncer;
use crate::error::CliError;
use crate::output::Output;
use crate::pages;

/// How often debounced changes are collected.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Arguments for the watch command.
#[derive(Args)]
pub(crate) struct WatchArgs {
    /// Path to configuration file (default: auto-discover rw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Navigation file (overrides config).
    #[arg(short, long)]
    navigation: Option<PathBuf>,

    /// Quiet period in milliseconds before a change is handled (overrides config).
    #[arg(long)]
    debounce_ms: Option<u64>,
}

impl WatchArgs {
    /// Execute the watch command. Runs until interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the initial navigation load
    /// fails, or the file watchers cannot be started.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            navigation_file: self.navigation,
            debounce_ms: self.debounce_ms,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        // Watcher events carry canonical paths
        let nav_path = canonical(&config.navigation_resolved.file);
        let source_dir = canonical(&config.docs_resolved.source_dir);

        let store =
            NavigationStore::open(&nav_path).map_err(|err| load_failure(&output, err))?;

        let debouncer = Arc::new(ChangeDebouncer::new(Duration::from_millis(
            config.watch.debounce_ms,
        )));
        let _nav_watcher = watch_navigation(&nav_path, &debouncer)?;
        let _pages_watcher = if source_dir.is_dir() {
            Some(watch_pages(&source_dir, &debouncer)?)
        } else {
            output.warning(&format!(
                "Source directory not found, page changes are not watched: {}",
                source_dir.display()
            ));
            None
        };

        if let Some(config_path) = &config.config_path {
            output.info(&format!("Config: {}", config_path.display()));
        }
        output.info(&format!("Watching {}", nav_path.display()));
        report_links(&output, &store.get(), &source_dir);

        loop {
            thread::sleep(POLL_INTERVAL);

            let changed = debouncer.drain_ready();
            if changed.is_empty() {
                continue;
            }
            tracing::debug!(count = changed.len(), "Handling file changes");

            match refresh(&store, &changed) {
                Ok(site) => {
                    output.success(&format!(
                        "Navigation ready (generation {})",
                        store.generation()
                    ));
                    report_links(&output, &site, &source_dir);
                }
                Err(err) => {
                    report_load_error(&output, &err);
                    output.warning("Keeping previous navigation");
                }
            }
        }
    }
}

/// Invalidate the store when the navigation file is among `changed`, then
/// return the current snapshot, rebuilding it if needed.
fn refresh(store: &NavigationStore, changed: &[PathBuf]) -> Result<Arc<SiteConfig>, LoadError> {
    if changed.iter().any(|path| path == store.path()) {
        store.invalidate();
    }
    store.reload_if_needed()
}

/// Print dangling links of `site`, or a confirmation when there are none.
fn report_links(output: &Output, site: &SiteConfig, source_dir: &Path) {
    match dangling_links(site, source_dir) {
        Ok(problems) if problems.is_empty() => output.success("All links resolve"),
        Ok(problems) => output.problems(&problems),
        Err(err) => output.warning(&err.to_string()),
    }
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Whether a notify event changes file content or existence.
fn is_change(kind: &notify::EventKind) -> bool {
    matches!(
        kind,
        notify::EventKind::Create(_) | notify::EventKind::Modify(_) | notify::EventKind::Remove(_)
    )
}

/// Record changed paths of a notify event that pass `filter`.
fn record_events(
    res: notify::Result<notify::Event>,
    debouncer: &ChangeDebouncer,
    filter: impl Fn(&Path) -> bool,
) {
    let Ok(event) = res else { return };
    if !is_change(&event.kind) {
        return;
    }
    for path in event.paths {
        if filter(&path) {
            debouncer.record(path);
        }
    }
}

/// Watch the directory holding the navigation file.
///
/// Editors often replace the file on save, so the parent directory is
/// watched and events are filtered to the file itself.
fn watch_navigation(
    nav_path: &Path,
    debouncer: &Arc<ChangeDebouncer>,
) -> Result<notify::RecommendedWatcher, CliError> {
    let debouncer = Arc::clone(debouncer);
    let target = nav_path.to_path_buf();

    let mut watcher = notify::recommended_watcher(move |res| {
        record_events(res, &debouncer, |path| path == target);
    })?;
    watcher.watch(nav_path.parent().unwrap_or(nav_path), RecursiveMode::NonRecursive)?;

    Ok(watcher)
}

/// Watch the source directory for markdown page changes.
fn watch_pages(
    source_dir: &Path,
    debouncer: &Arc<ChangeDebouncer>,
) -> Result<notify::RecommendedWatcher, CliError> {
    let debouncer = Arc::clone(debouncer);

    let mut watcher = notify::recommended_watcher(move |res| {
        record_events(res, &debouncer, pages::is_markdown);
    })?;
    watcher.watch(source_dir, RecursiveMode::Recursive)?;

    Ok(watcher)
}
