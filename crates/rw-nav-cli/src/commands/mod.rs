//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod show;
pub(crate) mod watch;

pub(crate) use check::CheckArgs;
pub(crate) use show::ShowArgs;
pub(crate) use watch::WatchArgs;

use std::path::Path;

use rw_nav::{
    LoadError, SiteConfig, ValidationError, check_invariants, load_file_unchecked, normalize,
    validate_links,
};

use crate::error::CliError;
use crate::output::Output;
use crate::pages;

/// Check every site-relative link of `site` against the pages in `source_dir`.
pub(crate) fn dangling_links(
    site: &SiteConfig,
    source_dir: &Path,
) -> Result<Vec<ValidationError>, CliError> {
    let known = pages::scan_pages(source_dir).map_err(|e| {
        CliError::Validation(format!(
            "Cannot read source directory {}: {e}",
            source_dir.display()
        ))
    })?;
    Ok(validate_links(site, &known))
}

/// Load the navigation file and collect every problem in one pass.
///
/// Invariant violations come first, followed by dangling links of the
/// normalized configuration. Only unreadable or structurally malformed files
/// fail.
pub(crate) fn collect_problems(
    nav_path: &Path,
    source_dir: &Path,
) -> Result<(SiteConfig, Vec<ValidationError>), CliError> {
    let site = load_file_unchecked(nav_path)?;
    let mut problems = check_invariants(&site);
    let site = normalize(site);
    problems.extend(dangling_links(&site, source_dir)?);
    Ok((site, problems))
}

/// Print a load failure; invariant violations are listed one per line.
pub(crate) fn report_load_error(output: &Output, err: &LoadError) {
    let problems = err.validation_errors();
    if problems.is_empty() {
        output.error(&err.to_string());
    } else {
        output.error("Invalid navigation configuration:");
        output.problems(problems);
    }
}

/// Turn an initial load failure into the command's error.
///
/// Invariant violations are printed first and summarized; other failures
/// are returned as is.
pub(crate) fn load_failure(output: &Output, err: LoadError) -> CliError {
    let problems = err.validation_errors();
    if problems.is_empty() {
        return err.into();
    }
    output.problems(problems);
    problems_found(problems.len())
}

/// Summary error for a run that printed `count` problems.
pub(crate) fn problems_found(count: usize) -> CliError {
    let noun = if count == 1 { "problem" } else { "problems" };
    CliError::Validation(format!("{count} navigation {noun} found"))
}
