//! `rw-nav check` command implementation.

use std::path::PathBuf;

use clap::Args;
use rw_config::{CliSettings, Config};

use super::{collect_problems, problems_found};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover rw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Navigation file (overrides config).
    #[arg(short, long)]
    navigation: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or navigation file cannot be
    /// loaded, or if any navigation problem is found. Invariant violations
    /// and dangling links are reported together.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            navigation_file: self.navigation,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let nav_path = &config.navigation_resolved.file;
        let source_dir = &config.docs_resolved.source_dir;
        if let Some(config_path) = &config.config_path {
            output.info(&format!("Config: {}", config_path.display()));
        }
        output.info(&format!("Navigation: {}", nav_path.display()));
        output.info(&format!("Source directory: {}", source_dir.display()));

        let (site, problems) = collect_problems(nav_path, source_dir)?;
        if !problems.is_empty() {
            output.problems(&problems);
            return Err(problems_found(problems.len()));
        }

        output.success(&format!(
            "Navigation OK: {} top bar links, {} sidebar links",
            site.nav.len(),
            site.leaf_count()
        ));
        Ok(())
    }
}
