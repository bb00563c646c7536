//! Parsing configuration documents into typed entities.
//!
//! Documents are deserialized with serde into permissive raw structures
//! (every field optional) and then converted into the typed model. The
//! conversion step owns the schema rules, so a missing `text` or a leaf where
//! a group is required is reported with its exact location instead of a
//! generic "data did not match any variant" message.
//!
//! # Example
//!
//! ```
//! use rw_nav::{SourceFormat, load};
//!
//! let source = r#"
//! title = "Docs"
//!
//! [[sidebar]]
//! text = "UI Kit"
//! collapsed = true
//!
//! [[sidebar.items]]
//! text = "Buttons"
//! link = "/buttons"
//! "#;
//!
//! let config = load(source, SourceFormat::Toml).unwrap();
//! assert_eq!(config.sidebar[0].text, "UI Kit");
//! ```

use std::fmt;
use std::path::Path;
use std::time::Instant;

use serde::Deserialize;

use crate::error::{LoadError, Location, SchemaError, SerializeError};
use crate::model::{FooterConfig, NavLink, SidebarGroup, SidebarItem, SiteConfig};
use crate::validate::check_invariants;

/// Supported configuration document formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// TOML (`.toml`).
    Toml,
    /// YAML (`.yaml`, `.yml`).
    Yaml,
    /// JSON (`.json`).
    Json,
}

impl SourceFormat {
    /// Detect format from a file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "TOML",
            Self::Yaml => "YAML",
            Self::Json => "JSON",
        })
    }
}

/// Raw document as deserialized, before schema checks.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSiteConfig {
    title: Option<String>,
    description: Option<String>,
    nav: Vec<RawItem>,
    sidebar: Vec<RawItem>,
    footer: Option<RawFooter>,
}

/// Raw navigation entry: link, group, or something malformed.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawItem {
    text: Option<String>,
    link: Option<String>,
    collapsed: Option<bool>,
    items: Option<Vec<RawItem>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFooter {
    message: Option<String>,
    copyright: Option<String>,
}

impl RawSiteConfig {
    fn parse(source: &str, format: SourceFormat) -> Result<Self, SchemaError> {
        let syntax = |message: String| SchemaError::Syntax {
            format,
            message: message.trim().to_owned(),
        };

        match format {
            SourceFormat::Toml => toml::from_str(source).map_err(|e| syntax(e.to_string())),
            // An empty YAML document deserializes as null, not as an empty mapping
            SourceFormat::Yaml if source.trim().is_empty() => Ok(Self::default()),
            SourceFormat::Yaml => serde_yaml::from_str(source).map_err(|e| syntax(e.to_string())),
            SourceFormat::Json => serde_json::from_str(source).map_err(|e| syntax(e.to_string())),
        }
    }

    fn into_config(self) -> Result<SiteConfig, SchemaError> {
        let root = Location::default();
        let title = self.title.ok_or(SchemaError::MissingField {
            location: root.clone(),
            field: "title",
        })?;

        let nav_location = root.child("nav");
        let nav = self
            .nav
            .into_iter()
            .enumerate()
            .map(|(i, raw)| raw.into_nav_link(&nav_location.index(i)))
            .collect::<Result<Vec<_>, _>>()?;

        let sidebar_location = root.child("sidebar");
        let sidebar = self
            .sidebar
            .into_iter()
            .enumerate()
            .map(|(i, raw)| raw.into_group(&sidebar_location.index(i)))
            .collect::<Result<Vec<_>, _>>()?;

        let footer = self
            .footer
            .map(|raw| FooterConfig {
                message: raw.message.unwrap_or_default(),
                copyright: raw.copyright.unwrap_or_default(),
            })
            .unwrap_or_default();

        Ok(SiteConfig {
            title,
            description: self.description.unwrap_or_default(),
            nav,
            sidebar,
            footer,
        })
    }
}

impl RawItem {
    fn require_text(&mut self, location: &Location) -> Result<String, SchemaError> {
        self.text.take().ok_or_else(|| SchemaError::MissingField {
            location: location.clone(),
            field: "text",
        })
    }

    fn into_nav_link(self, location: &Location) -> Result<NavLink, SchemaError> {
        if self.items.is_some() {
            return Err(SchemaError::Shape {
                location: location.clone(),
                message: "navigation bar entries cannot contain `items`".to_owned(),
            });
        }
        self.into_link(location)
    }

    fn into_link(mut self, location: &Location) -> Result<NavLink, SchemaError> {
        let text = self.require_text(location)?;
        if self.collapsed.is_some() {
            return Err(SchemaError::Shape {
                location: location.clone(),
                message: "`collapsed` is only valid on groups with `items`".to_owned(),
            });
        }
        let link = self.link.ok_or_else(|| SchemaError::MissingField {
            location: location.clone(),
            field: "link",
        })?;
        Ok(NavLink { text, link })
    }

    fn into_group(mut self, location: &Location) -> Result<SidebarGroup, SchemaError> {
        let text = self.require_text(location)?;
        let Some(raw_items) = self.items else {
            return Err(SchemaError::Shape {
                location: location.clone(),
                message: "expected a sidebar group with `items`".to_owned(),
            });
        };
        if self.link.is_some() {
            return Err(SchemaError::Shape {
                location: location.clone(),
                message: "sidebar groups cannot have a `link`".to_owned(),
            });
        }

        let items_location = location.child("items");
        let items = raw_items
            .into_iter()
            .enumerate()
            .map(|(i, raw)| raw.into_item(&items_location.index(i)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SidebarGroup {
            text,
            collapsed: self.collapsed,
            items,
        })
    }

    fn into_item(self, location: &Location) -> Result<SidebarItem, SchemaError> {
        if self.items.is_some() {
            self.into_group(location).map(SidebarItem::Group)
        } else {
            self.into_link(location).map(SidebarItem::Link)
        }
    }
}

/// Milliseconds since `start`.
pub(crate) fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Parse a configuration document into a [`SiteConfig`].
///
/// Schema problems abort immediately with [`LoadError::Schema`]. Invariant
/// violations are all collected and returned together as
/// [`LoadError::Invalid`].
///
/// The result is not normalized; see [`normalize`](crate::normalize).
///
/// # Errors
///
/// Returns [`LoadError::Schema`] or [`LoadError::Invalid`].
pub fn load(source: &str, format: SourceFormat) -> Result<SiteConfig, LoadError> {
    into_checked(load_unchecked(source, format)?)
}

/// Parse a configuration document, enforcing the schema only.
///
/// Invariants are left to the caller, who can report them with
/// [`check_invariants`](crate::check_invariants) alongside other problems
/// such as dangling links.
///
/// # Errors
///
/// Returns [`LoadError::Schema`] if the document is structurally malformed.
pub fn load_unchecked(source: &str, format: SourceFormat) -> Result<SiteConfig, LoadError> {
    let start = Instant::now();

    let config = RawSiteConfig::parse(source, format)?.into_config()?;

    tracing::debug!(
        %format,
        nav = config.nav.len(),
        groups = config.sidebar.len(),
        elapsed_ms = elapsed_ms(start),
        "Navigation configuration parsed"
    );

    Ok(config)
}

fn into_checked(config: SiteConfig) -> Result<SiteConfig, LoadError> {
    let errors = check_invariants(&config);
    if errors.is_empty() {
        Ok(config)
    } else {
        tracing::debug!(count = errors.len(), "Navigation configuration invalid");
        Err(LoadError::Invalid(errors))
    }
}

/// Read and parse a configuration file, picking the format from its extension.
///
/// # Errors
///
/// Returns [`LoadError::UnsupportedFormat`] for unknown extensions,
/// [`LoadError::Io`] if the file cannot be read, and any error of [`load`].
pub fn load_file(path: &Path) -> Result<SiteConfig, LoadError> {
    into_checked(load_file_unchecked(path)?)
}

/// File counterpart of [`load_unchecked`].
///
/// # Errors
///
/// Returns [`LoadError::UnsupportedFormat`], [`LoadError::Io`] or
/// [`LoadError::Schema`].
pub fn load_file_unchecked(path: &Path) -> Result<SiteConfig, LoadError> {
    let format = SourceFormat::from_path(path)
        .ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_unchecked(&content, format)
}

impl SiteConfig {
    /// Serialize back into a configuration document.
    ///
    /// Field and item order are preserved, so the output loads back into an
    /// equal value.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`] if the serializer rejects the value.
    pub fn to_source(&self, format: SourceFormat) -> Result<String, SerializeError> {
        let error = |message: String| SerializeError { format, message };
        match format {
            SourceFormat::Toml => toml::to_string(self).map_err(|e| error(e.to_string())),
            SourceFormat::Yaml => serde_yaml::to_string(self).map_err(|e| error(e.to_string())),
            SourceFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| error(e.to_string()))
            }
        }
    }
}
