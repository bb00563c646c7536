//! Typed navigation entities.
//!
//! A [`SiteConfig`] owns the top navigation bar, the sidebar tree and the
//! footer. Sidebar entries are a tagged variant ([`SidebarItem`]) so groups
//! and leaf links are distinguished at load time, not at use.
//!
//! Values are constructed by [`load`](crate::load) and treated as immutable
//! snapshots afterwards. Ordering of every sequence is display order.

use serde::Serialize;

/// Sidebar root: ordered groups shown in the documentation side panel.
pub type SidebarTree = Vec<SidebarGroup>;

/// Single clickable navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Display text (may contain emoji or inline markup).
    pub text: String,
    /// Target: absolute `http(s)` URL or site-relative path starting with `/`.
    pub link: String,
}

/// Where a link points to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    /// Site-relative path, resolved against the site's own pages.
    Internal,
    /// Absolute `http://` or `https://` URL.
    External,
}

impl LinkKind {
    /// Classify a link value.
    ///
    /// Returns `None` for empty links and for anything that is neither a
    /// site-relative path nor an absolute http(s) URL.
    #[must_use]
    pub fn of(link: &str) -> Option<Self> {
        if link.starts_with('/') {
            Some(Self::Internal)
        } else if has_scheme(link, "http://") || has_scheme(link, "https://") {
            Some(Self::External)
        } else {
            None
        }
    }
}

/// Case-insensitive scheme prefix check.
fn has_scheme(link: &str, scheme: &str) -> bool {
    link.get(..scheme.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
}

impl NavLink {
    /// Create a link.
    #[must_use]
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
        }
    }

    /// Link classification, `None` when the link is malformed.
    #[must_use]
    pub fn kind(&self) -> Option<LinkKind> {
        LinkKind::of(&self.link)
    }

    /// True for site-relative links.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.kind() == Some(LinkKind::Internal)
    }
}

/// Named, collapsible container of sidebar items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarGroup {
    /// Group heading.
    pub text: String,
    /// Initial collapse state. `None` until normalization applies the default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Ordered children.
    pub items: Vec<SidebarItem>,
}

impl SidebarGroup {
    /// Create an expanded group with no explicit collapse state.
    #[must_use]
    pub fn new(text: impl Into<String>, items: Vec<SidebarItem>) -> Self {
        Self {
            text: text.into(),
            collapsed: None,
            items,
        }
    }

    /// Effective collapse state (`false` when unspecified).
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.collapsed.unwrap_or(false)
    }
}

/// Sidebar entry: either a nested group or a leaf link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SidebarItem {
    /// Nested group.
    Group(SidebarGroup),
    /// Leaf link.
    Link(NavLink),
}

impl From<NavLink> for SidebarItem {
    fn from(link: NavLink) -> Self {
        Self::Link(link)
    }
}

impl From<SidebarGroup> for SidebarItem {
    fn from(group: SidebarGroup) -> Self {
        Self::Group(group)
    }
}

/// Footer metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FooterConfig {
    /// Footer tagline.
    pub message: String,
    /// Legal/contact line, may embed inline hyperlinks.
    pub copyright: String,
}

/// Aggregate root of the navigation configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    /// Site title, used in generated page `<title>`.
    pub title: String,
    /// Site meta description.
    pub description: String,
    /// Top navigation bar entries.
    pub nav: Vec<NavLink>,
    /// Sidebar groups.
    pub sidebar: SidebarTree,
    /// Footer metadata.
    pub footer: FooterConfig,
}

impl SiteConfig {
    /// Number of leaf links in the sidebar.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        crate::flatten(&self.sidebar).count()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_kind_internal() {
        assert_eq!(LinkKind::of("/buttons"), Some(LinkKind::Internal));
        assert_eq!(LinkKind::of("/"), Some(LinkKind::Internal));
    }

    #[test]
    fn test_link_kind_external() {
        assert_eq!(
            LinkKind::of("https://wa.me/123456"),
            Some(LinkKind::External)
        );
        assert_eq!(LinkKind::of("http://example.com"), Some(LinkKind::External));
    }

    #[test]
    fn test_link_kind_malformed() {
        assert_eq!(LinkKind::of(""), None);
        assert_eq!(LinkKind::of("buttons"), None);
        assert_eq!(LinkKind::of("mailto:team@example.com"), None);
    }

    #[test]
    fn test_group_collapsed_defaults_to_false() {
        let group = SidebarGroup::new("Guide", Vec::new());
        assert!(!group.is_collapsed());

        let group = SidebarGroup {
            collapsed: Some(true),
            ..group
        };
        assert!(group.is_collapsed());
    }

    #[test]
    fn test_sidebar_item_serializes_untagged() {
        let item = SidebarItem::from(NavLink::new("Buttons", "/buttons"));
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"text":"Buttons","link":"/buttons"}"#);
    }

    #[test]
    fn test_link_kind_scheme_is_case_insensitive() {
        assert_eq!(
            LinkKind::of("HTTPS://Example.com/Docs"),
            Some(LinkKind::External)
        );
        assert_eq!(LinkKind::of("Http://example.com"), Some(LinkKind::External));
        assert_eq!(LinkKind::of("HTTP:/example.com"), None);
        assert_eq!(LinkKind::of("ht"), None);
    }

    #[test]
    fn test_leaf_count_ignores_nav() {
        let config = SiteConfig {
            title: "Docs".to_owned(),
            description: String::new(),
            nav: vec![NavLink::new("Home", "/")],
            sidebar: vec![SidebarGroup::new(
                "Guide",
                vec![NavLink::new("Intro", "/intro").into()],
            )],
            footer: FooterConfig::default(),
        };

        assert_eq!(config.leaf_count(), 1);
    }
}
