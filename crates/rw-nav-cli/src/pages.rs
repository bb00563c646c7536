//! Discovery of documentation pages on disk.
//!
//! Every `*.md` file under the source directory is a page; its site-relative
//! path is the file path without the extension (`guide/setup.md` becomes
//! `/guide/setup`, `index.md` becomes `/index`). Hidden files and
//! directories are skipped.

use std::fs;
use std::path::Path;

/// Collect site-relative paths of all pages under `source_dir`, sorted.
///
/// # Errors
///
/// Returns an error if `source_dir` cannot be read. Unreadable
/// subdirectories are skipped with a warning.
pub(crate) fn scan_pages(source_dir: &Path) -> std::io::Result<Vec<String>> {
    let entries = fs::read_dir(source_dir)?;
    let mut pages = Vec::new();
    scan_entries(entries, "", &mut pages);
    pages.sort();

    tracing::debug!(
        source_dir = %source_dir.display(),
        pages = pages.len(),
        "Scanned pages"
    );
    Ok(pages)
}

fn scan_directory(dir: &Path, url_prefix: &str, pages: &mut Vec<String>) {
    match fs::read_dir(dir) {
        Ok(entries) => scan_entries(entries, url_prefix, pages),
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "Failed to read directory, skipping");
        }
    }
}

fn scan_entries(entries: fs::ReadDir, url_prefix: &str, pages: &mut Vec<String>) {
    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&path, &format!("{url_prefix}/{name}"), pages);
        } else if is_markdown(&path)
            && let Some(stem) = path.file_stem()
        {
            pages.push(format!("{url_prefix}/{}", stem.to_string_lossy()));
        }
    }
}

/// Whether `path` names a markdown page.
pub(crate) fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}
