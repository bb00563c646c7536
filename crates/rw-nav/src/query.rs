//! Read-only queries over a loaded configuration.
//!
//! - [`find_by_link`]: locate the active entry for the current page
//! - [`flatten`]: linear reading order of sidebar leaves
//! - [`adjacent`]: previous/next page around a sidebar leaf

use std::iter::FusedIterator;
use std::slice;

use crate::model::{NavLink, SidebarGroup, SidebarItem, SiteConfig};

/// Result of [`find_by_link`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkMatch<'a> {
    /// Entry of the top navigation bar.
    Nav {
        /// Position in `nav`.
        index: usize,
        /// Matched entry.
        link: &'a NavLink,
    },
    /// Sidebar leaf.
    Sidebar {
        /// Enclosing groups, outermost first.
        trail: Vec<&'a SidebarGroup>,
        /// Matched leaf.
        link: &'a NavLink,
    },
}

impl<'a> LinkMatch<'a> {
    /// Matched link entry.
    #[must_use]
    pub fn link(&self) -> &'a NavLink {
        match self {
            Self::Nav { link, .. } | Self::Sidebar { link, .. } => link,
        }
    }

    /// Enclosing sidebar groups (empty for nav matches).
    #[must_use]
    pub fn trail(&self) -> &[&'a SidebarGroup] {
        match self {
            Self::Nav { .. } => &[],
            Self::Sidebar { trail, .. } => trail,
        }
    }
}

/// Find the first entry whose `link` equals `link`.
///
/// Searches `nav` first, then the sidebar depth-first in document order.
/// Comparison is exact; callers wanting fragment-insensitive matching should
/// strip it before calling.
#[must_use]
pub fn find_by_link<'a>(config: &'a SiteConfig, link: &str) -> Option<LinkMatch<'a>> {
    if let Some((index, nav)) = config
        .nav
        .iter()
        .enumerate()
        .find(|(_, nav)| nav.link == link)
    {
        return Some(LinkMatch::Nav { index, link: nav });
    }

    let mut trail = Vec::new();
    for group in &config.sidebar {
        if let Some(found) = find_in_group(group, link, &mut trail) {
            return Some(found);
        }
    }
    None
}

fn find_in_group<'a>(
    group: &'a SidebarGroup,
    link: &str,
    trail: &mut Vec<&'a SidebarGroup>,
) -> Option<LinkMatch<'a>> {
    trail.push(group);
    for item in &group.items {
        match item {
            SidebarItem::Link(leaf) if leaf.link == link => {
                return Some(LinkMatch::Sidebar {
                    trail: trail.clone(),
                    link: leaf,
                });
            }
            SidebarItem::Group(child) => {
                if let Some(found) = find_in_group(child, link, trail) {
                    return Some(found);
                }
            }
            SidebarItem::Link(_) => {}
        }
    }
    trail.pop();
    None
}

/// Iterate every sidebar leaf in depth-first pre-order.
///
/// The iterator is lazy and borrows the tree; cloning it (or calling
/// `flatten` again) restarts from the current position or the beginning.
#[must_use]
pub fn flatten(sidebar: &[SidebarGroup]) -> Leaves<'_> {
    Leaves {
        groups: sidebar.iter(),
        stack: Vec::new(),
    }
}

/// Iterator returned by [`flatten`].
#[derive(Clone, Debug)]
pub struct Leaves<'a> {
    groups: slice::Iter<'a, SidebarGroup>,
    stack: Vec<slice::Iter<'a, SidebarItem>>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a NavLink;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(items) = self.stack.last_mut() {
                match items.next() {
                    Some(SidebarItem::Link(link)) => return Some(link),
                    Some(SidebarItem::Group(group)) => self.stack.push(group.items.iter()),
                    None => {
                        self.stack.pop();
                    }
                }
            } else {
                let group = self.groups.next()?;
                self.stack.push(group.items.iter());
            }
        }
    }
}

impl FusedIterator for Leaves<'_> {}

/// Neighbours of a page in sidebar reading order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Adjacent<'a> {
    /// Previous page, `None` for the first page.
    pub prev: Option<&'a NavLink>,
    /// Next page, `None` for the last page.
    pub next: Option<&'a NavLink>,
}

/// Previous and next site-relative pages around `link`.
///
/// External leaves are skipped. Returns `None` when no site-relative leaf
/// has this link; with duplicates, the first occurrence wins.
#[must_use]
pub fn adjacent<'a>(sidebar: &'a [SidebarGroup], link: &str) -> Option<Adjacent<'a>> {
    let mut pages = flatten(sidebar).filter(|leaf| leaf.is_internal());
    let mut prev = None;
    while let Some(current) = pages.next() {
        if current.link == link {
            return Some(Adjacent {
                prev,
                next: pages.next(),
            });
        }
        prev = Some(current);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FooterConfig;

    fn leaf(text: &str, link: &str) -> SidebarItem {
        NavLink::new(text, link).into()
    }

    fn tree() -> Vec<SidebarGroup> {
        vec![
            SidebarGroup::new(
                "Getting Started",
                vec![leaf("Introduction", "/index"), leaf("Installation", "/installation")],
            ),
            SidebarGroup::new(
                "Components",
                vec![
                    leaf("Buttons", "/buttons"),
                    SidebarGroup::new(
                        "Charts",
                        vec![
                            leaf("Data Visualization", "/data-viz"),
                            SidebarGroup::new("Advanced", vec![leaf("Heatmaps", "/heatmaps")])
                                .into(),
                        ],
                    )
                    .into(),
                    leaf("Support", "https://wa.me/15550100"),
                    leaf("Forms", "/forms"),
                ],
            ),
            SidebarGroup::new("Empty", Vec::new()),
            SidebarGroup::new("Patterns", vec![leaf("Data Visualization", "/data-viz")]),
        ]
    }

    fn site(sidebar: Vec<SidebarGroup>) -> SiteConfig {
        SiteConfig {
            title: "Docs".to_owned(),
            description: String::new(),
            nav: vec![NavLink::new("Home", "/index"), NavLink::new("Guide", "/guide")],
            sidebar,
            footer: FooterConfig::default(),
        }
    }

    /// Reference pre-order traversal written recursively.
    fn manual_preorder<'a>(items: &'a [SidebarItem], out: &mut Vec<&'a NavLink>) {
        for item in items {
            match item {
                SidebarItem::Link(link) => out.push(link),
                SidebarItem::Group(group) => manual_preorder(&group.items, out),
            }
        }
    }

    #[test]
    fn test_flatten_matches_manual_preorder() {
        let sidebar = tree();
        let mut expected = Vec::new();
        for group in &sidebar {
            manual_preorder(&group.items, &mut expected);
        }

        let flat: Vec<_> = flatten(&sidebar).collect();

        assert_eq!(flat, expected);
        let links: Vec<_> = flat.iter().map(|l| l.link.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "/index",
                "/installation",
                "/buttons",
                "/data-viz",
                "/heatmaps",
                "https://wa.me/15550100",
                "/forms",
                "/data-viz",
            ]
        );
    }

    /// Sidebar with `breadth` groups per level down to `depth`; leaves and
    /// nested groups alternate so order mistakes show up.
    fn generated_sidebar(depth: usize, breadth: usize) -> Vec<SidebarGroup> {
        fn group(prefix: &str, level: usize, depth: usize, breadth: usize) -> SidebarGroup {
            let mut items = Vec::new();
            for i in 0..breadth {
                items.push(leaf(&format!("Page {i}"), &format!("{prefix}/page-{i}")));
                if level < depth {
                    let child = format!("{prefix}/section-{i}");
                    items.push(group(&child, level + 1, depth, breadth).into());
                }
            }
            SidebarGroup::new(format!("Level {level}"), items)
        }

        (0..breadth)
            .map(|i| group(&format!("/root-{i}"), 1, depth, breadth))
            .collect()
    }

    #[test]
    fn test_flatten_matches_manual_preorder_on_generated_trees() {
        for (depth, breadth) in [(1, 1), (1, 4), (2, 3), (3, 2), (4, 3)] {
            let sidebar = generated_sidebar(depth, breadth);
            let mut expected = Vec::new();
            for group in &sidebar {
                manual_preorder(&group.items, &mut expected);
            }

            let flat: Vec<_> = flatten(&sidebar).collect();

            assert_eq!(flat, expected, "depth {depth}, breadth {breadth}");
            assert!(!flat.is_empty());
        }
    }

    #[test]
    fn test_find_by_link_trail_depth_on_generated_tree() {
        let config = site(generated_sidebar(3, 2));

        for leaf in flatten(&config.sidebar) {
            let found = find_by_link(&config, &leaf.link).unwrap();
            let level = leaf.link.matches("/section-").count() + 1;
            assert!(std::ptr::eq(found.link(), leaf));
            assert_eq!(found.trail().len(), level, "link {}", leaf.link);
        }
    }

    #[test]
    fn test_flatten_single_collapsed_group() {
        let sidebar = vec![SidebarGroup {
            text: "UI Kit".to_owned(),
            collapsed: Some(true),
            items: vec![leaf("Buttons", "/buttons")],
        }];

        let flat: Vec<_> = flatten(&sidebar).cloned().collect();

        assert_eq!(flat, vec![NavLink::new("Buttons", "/buttons")]);
    }

    #[test]
    fn test_flatten_empty_tree() {
        assert_eq!(flatten(&[]).count(), 0);
        assert_eq!(flatten(&[SidebarGroup::new("Empty", Vec::new())]).count(), 0);
    }

    #[test]
    fn test_flatten_is_restartable() {
        let sidebar = tree();
        let mut leaves = flatten(&sidebar);
        leaves.next();

        let rest_a: Vec<_> = leaves.clone().collect();
        let rest_b: Vec<_> = leaves.collect();
        assert_eq!(rest_a, rest_b);
        assert_eq!(flatten(&sidebar).count(), rest_a.len() + 1);
    }

    #[test]
    fn test_find_by_link_prefers_nav() {
        let config = site(tree());

        let found = find_by_link(&config, "/index").unwrap();

        assert!(matches!(found, LinkMatch::Nav { index: 0, .. }));
        assert!(found.trail().is_empty());
    }

    #[test]
    fn test_find_by_link_returns_first_sidebar_occurrence() {
        let config = site(tree());

        let found = find_by_link(&config, "/data-viz").unwrap();

        let trail: Vec<_> = found.trail().iter().map(|g| g.text.as_str()).collect();
        assert_eq!(trail, vec!["Components", "Charts"]);
        assert_eq!(found.link().text, "Data Visualization");
    }

    #[test]
    fn test_find_by_link_nested_trail() {
        let config = site(tree());

        let found = find_by_link(&config, "/heatmaps").unwrap();

        let trail: Vec<_> = found.trail().iter().map(|g| g.text.as_str()).collect();
        assert_eq!(trail, vec!["Components", "Charts", "Advanced"]);
    }

    #[test]
    fn test_find_by_link_trail_resets_after_backtracking() {
        let config = site(tree());

        let found = find_by_link(&config, "/forms").unwrap();

        let trail: Vec<_> = found.trail().iter().map(|g| g.text.as_str()).collect();
        assert_eq!(trail, vec!["Components"]);
    }

    #[test]
    fn test_find_by_link_absent() {
        let config = site(tree());
        assert!(find_by_link(&config, "/theming").is_none());
        assert!(find_by_link(&config, "").is_none());
    }

    #[test]
    fn test_adjacent_in_middle() {
        let sidebar = tree();

        let around = adjacent(&sidebar, "/buttons").unwrap();

        assert_eq!(around.prev.map(|l| l.link.as_str()), Some("/installation"));
        assert_eq!(around.next.map(|l| l.link.as_str()), Some("/data-viz"));
    }

    #[test]
    fn test_adjacent_skips_external_links() {
        let sidebar = tree();

        let around = adjacent(&sidebar, "/forms").unwrap();

        assert_eq!(around.prev.map(|l| l.link.as_str()), Some("/heatmaps"));
    }

    #[test]
    fn test_adjacent_at_edges() {
        let sidebar = tree();

        let first = adjacent(&sidebar, "/index").unwrap();
        assert!(first.prev.is_none());
        assert_eq!(first.next.map(|l| l.link.as_str()), Some("/installation"));

        let single = vec![SidebarGroup::new("Solo", vec![leaf("Only", "/only")])];
        let only = adjacent(&single, "/only").unwrap();
        assert_eq!(only, Adjacent::default());
    }

    #[test]
    fn test_adjacent_unknown_link() {
        assert!(adjacent(&tree(), "/missing").is_none());
        assert!(adjacent(&tree(), "https://wa.me/15550100").is_none());
    }
}
