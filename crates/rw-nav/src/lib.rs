//! Navigation and sidebar configuration model for RW documentation sites.
//!
//! This crate provides:
//! - Typed entities: [`SiteConfig`], [`NavLink`], [`SidebarGroup`],
//!   [`SidebarItem`], [`FooterConfig`]
//! - [`load`] / [`load_file`]: parse TOML, YAML or JSON into the model,
//!   with [`SchemaError`] and collected [`ValidationError`]s
//! - [`load_unchecked`] / [`check_invariants`]: the same in two steps, for
//!   callers reporting invariant and link problems together
//! - [`normalize`]: defaults and canonical formatting (idempotent)
//! - Queries: [`find_by_link`], [`flatten`], [`adjacent`]
//! - [`validate_links`]: report dangling site-relative links in one pass
//! - [`NavigationStore`]: shared snapshot with rebuild-and-swap reloads
//!
//! # Quick Start
//!
//! ```
//! use rw_nav::{SourceFormat, find_by_link, flatten, load, normalize, validate_links};
//!
//! let source = r#"
//! title: Docs
//! nav:
//!   - text: Home
//!     link: /
//! sidebar:
//!   - text: Getting Started
//!     items:
//!       - text: Installation
//!         link: /installation
//!       - text: Theming
//!         link: /theming
//! "#;
//!
//! let config = normalize(load(source, SourceFormat::Yaml)?);
//!
//! let order: Vec<_> = flatten(&config.sidebar).map(|l| l.link.as_str()).collect();
//! assert_eq!(order, ["/installation", "/theming"]);
//!
//! assert!(find_by_link(&config, "/theming").is_some());
//!
//! let errors = validate_links(&config, ["/index", "/installation"]);
//! assert_eq!(errors.len(), 1);
//! # Ok::<(), rw_nav::LoadError>(())
//! ```

mod error;
mod loader;
mod model;
mod normalize;
mod query;
mod store;
mod validate;

pub use error::{
    LoadError, Location, SchemaError, SerializeError, ValidationError, ValidationErrorKind,
};
pub use loader::{SourceFormat, load, load_file, load_file_unchecked, load_unchecked};
pub use model::{
    FooterConfig, LinkKind, NavLink, SidebarGroup, SidebarItem, SidebarTree, SiteConfig,
};
pub use normalize::normalize;
pub use query::{Adjacent, Leaves, LinkMatch, adjacent, find_by_link, flatten};
pub use store::NavigationStore;
pub use validate::{check_invariants, page_key, validate_links};
