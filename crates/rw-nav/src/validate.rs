//! Invariant checks and link validation.
//!
//! Every check here collects errors instead of returning on the first one,
//! so an author sees every broken entry after a single run.

use std::collections::{HashMap, HashSet};

use crate::error::{Location, ValidationError, ValidationErrorKind};
use crate::model::{LinkKind, NavLink, SidebarGroup, SidebarItem, SiteConfig};

/// Check the structural invariants of a parsed configuration.
///
/// Reports empty `text`, empty or malformed `link`, and duplicate links among
/// siblings. Links repeated in different groups are allowed. [`load`](crate::load)
/// runs this itself; call it directly after [`load_unchecked`](crate::load_unchecked).
#[must_use]
pub fn check_invariants(config: &SiteConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let nav_location = Location::field("nav");
    for (i, link) in config.nav.iter().enumerate() {
        check_link(link, &nav_location.index(i), &mut errors);
    }
    check_siblings(
        config.nav.iter().map(|l| l.link.as_str()),
        &nav_location,
        None,
        &mut errors,
    );

    let sidebar_location = Location::field("sidebar");
    for (i, group) in config.sidebar.iter().enumerate() {
        check_group(group, &sidebar_location.index(i), &mut errors);
    }

    errors
}

fn check_link(link: &NavLink, location: &Location, errors: &mut Vec<ValidationError>) {
    if link.text.trim().is_empty() {
        errors.push(ValidationError::new(
            location.clone(),
            None,
            ValidationErrorKind::EmptyText,
        ));
    }

    if link.link.is_empty() {
        errors.push(ValidationError::new(
            location.clone(),
            Some(&link.text),
            ValidationErrorKind::EmptyLink,
        ));
    } else if LinkKind::of(&link.link).is_none() {
        errors.push(ValidationError::new(
            location.clone(),
            Some(&link.text),
            ValidationErrorKind::MalformedLink {
                link: link.link.clone(),
            },
        ));
    }
}

fn check_group(group: &SidebarGroup, location: &Location, errors: &mut Vec<ValidationError>) {
    if group.text.trim().is_empty() {
        errors.push(ValidationError::new(
            location.clone(),
            None,
            ValidationErrorKind::EmptyText,
        ));
    }

    let items_location = location.child("items");
    for (i, item) in group.items.iter().enumerate() {
        match item {
            SidebarItem::Group(child) => check_group(child, &items_location.index(i), errors),
            SidebarItem::Link(link) => check_link(link, &items_location.index(i), errors),
        }
    }

    let leaf_links = group.items.iter().filter_map(|item| match item {
        SidebarItem::Link(link) => Some(link.link.as_str()),
        SidebarItem::Group(_) => None,
    });
    check_siblings(leaf_links, location, Some(&group.text), errors);
}

/// Report each link value shared by more than one sibling, once, in order of
/// first appearance.
fn check_siblings<'a>(
    links: impl Iterator<Item = &'a str>,
    location: &Location,
    text: Option<&str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut order = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for link in links.filter(|l| !l.is_empty()) {
        let count = counts.entry(link).or_insert(0);
        if *count == 0 {
            order.push(link);
        }
        *count += 1;
    }

    for link in order {
        let count = counts[link];
        if count > 1 {
            errors.push(ValidationError::new(
                location.clone(),
                text,
                ValidationErrorKind::DuplicateLink {
                    link: link.to_owned(),
                    count,
                },
            ));
        }
    }
}

/// Lookup key of a site-relative link or page path.
///
/// - `#fragment` and `?query` are dropped
/// - a trailing `/` maps to the directory's `index` page
/// - `.html` and `.md` suffixes are dropped
/// - a leading `/` is added when missing
///
/// ```
/// use rw_nav::page_key;
///
/// assert_eq!(page_key("/"), "/index");
/// assert_eq!(page_key("/guide/#setup"), "/guide/index");
/// assert_eq!(page_key("/buttons.html?tab=api"), "/buttons");
/// assert_eq!(page_key("installation"), "/installation");
/// ```
#[must_use]
pub fn page_key(link: &str) -> String {
    let path = link.split(['#', '?']).next().unwrap_or_default();

    let mut key = if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    };

    if key.ends_with('/') {
        key.push_str("index");
    } else if let Some(len) = key
        .strip_suffix(".html")
        .or_else(|| key.strip_suffix(".md"))
        .map(str::len)
    {
        key.truncate(len);
    }

    key
}

/// Report every site-relative link that does not resolve to a known page.
///
/// `known_pages` holds site-relative page paths (e.g. `/index`,
/// `/installation`); both sides are compared by [`page_key`]. External links
/// are never checked. The full list of violations is returned; this function
/// does not fail fast.
pub fn validate_links<I>(config: &SiteConfig, known_pages: I) -> Vec<ValidationError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let known: HashSet<String> = known_pages
        .into_iter()
        .map(|page| page_key(page.as_ref()))
        .collect();

    let mut errors = Vec::new();

    let nav_location = Location::field("nav");
    for (i, link) in config.nav.iter().enumerate() {
        check_known(link, &nav_location.index(i), &known, &mut errors);
    }

    let sidebar_location = Location::field("sidebar");
    for (i, group) in config.sidebar.iter().enumerate() {
        check_group_known(group, &sidebar_location.index(i), &known, &mut errors);
    }

    tracing::debug!(
        known_pages = known.len(),
        dangling = errors.len(),
        "Validated navigation links"
    );

    errors
}

fn check_group_known(
    group: &SidebarGroup,
    location: &Location,
    known: &HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    let items_location = location.child("items");
    for (i, item) in group.items.iter().enumerate() {
        match item {
            SidebarItem::Group(child) => {
                check_group_known(child, &items_location.index(i), known, errors);
            }
            SidebarItem::Link(link) => check_known(link, &items_location.index(i), known, errors),
        }
    }
}

fn check_known(
    link: &NavLink,
    location: &Location,
    known: &HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    if !link.is_internal() || known.contains(&page_key(&link.link)) {
        return;
    }
    errors.push(ValidationError::new(
        location.clone(),
        Some(&link.text),
        ValidationErrorKind::DanglingLink {
            link: link.link.clone(),
        },
    ));
}
