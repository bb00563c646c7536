//! `rw-nav show` command implementation.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use rw_config::{CliSettings, Config};
use rw_nav::{SiteConfig, SourceFormat, flatten, load_file, normalize};

use super::load_failure;
use crate::error::CliError;
use crate::output::Output;

/// Output format for the show command.
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Toml,
    Yaml,
    Json,
}

impl From<Format> for SourceFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Toml => Self::Toml,
            Format::Yaml => Self::Yaml,
            Format::Json => Self::Json,
        }
    }
}

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Path to configuration file (default: auto-discover rw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Navigation file (overrides config).
    #[arg(short, long)]
    navigation: Option<PathBuf>,

    /// Output format (default: format of the navigation file).
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Print the sidebar reading order instead of the configuration.
    #[arg(long, conflicts_with = "format")]
    flat: bool,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or navigation file cannot be
    /// loaded, or serialization fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            navigation_file: self.navigation,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let nav_path = &config.navigation_resolved.file;

        let site = normalize(load_file(nav_path).map_err(|err| load_failure(&output, err))?);

        let rendered = if self.flat {
            render_flat(&site)
        } else {
            let format = self.format.map_or_else(
                || SourceFormat::from_path(nav_path).unwrap_or(SourceFormat::Toml),
                SourceFormat::from,
            );
            site.to_source(format)?
        };

        output.data(&rendered);
        Ok(())
    }
}

/// Sidebar leaves in reading order, one `link<TAB>text` line each.
fn render_flat(site: &SiteConfig) -> String {
    flatten(&site.sidebar).fold(String::new(), |mut out, leaf| {
        let _ = writeln!(out, "{}\t{}", leaf.link, leaf.text);
        out
    })
}
