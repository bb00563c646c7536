//! Canonical form of a loaded configuration.

use crate::model::{FooterConfig, NavLink, SidebarGroup, SidebarItem, SiteConfig};

/// Apply defaults and canonical formatting.
///
/// - `collapsed` becomes `Some(false)` when unspecified
/// - `text` of every link and group is trimmed
/// - `title`, `description` and both footer fields are trimmed
///
/// Links and ordering are left untouched. The operation is idempotent:
/// `normalize(normalize(x)) == normalize(x)`.
#[must_use]
pub fn normalize(config: SiteConfig) -> SiteConfig {
    SiteConfig {
        title: trimmed(config.title),
        description: trimmed(config.description),
        nav: config.nav.into_iter().map(normalize_link).collect(),
        sidebar: config.sidebar.into_iter().map(normalize_group).collect(),
        footer: FooterConfig {
            message: trimmed(config.footer.message),
            copyright: trimmed(config.footer.copyright),
        },
    }
}

fn normalize_link(link: NavLink) -> NavLink {
    NavLink {
        text: trimmed(link.text),
        link: link.link,
    }
}

fn normalize_group(group: SidebarGroup) -> SidebarGroup {
    SidebarGroup {
        text: trimmed(group.text),
        collapsed: Some(group.collapsed.unwrap_or(false)),
        items: group
            .items
            .into_iter()
            .map(|item| match item {
                SidebarItem::Group(child) => SidebarItem::Group(normalize_group(child)),
                SidebarItem::Link(link) => SidebarItem::Link(normalize_link(link)),
            })
            .collect(),
    }
}

/// Trim surrounding whitespace, reusing the allocation when already clean.
fn trimmed(value: String) -> String {
    if value.trim().len() == value.len() {
        value
    } else {
        value.trim().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{SourceFormat, load};

    fn sample() -> SiteConfig {
        SiteConfig {
            title: "  Docs ".to_owned(),
            description: "Component docs\n".to_owned(),
            nav: vec![NavLink::new(" Home ", "/")],
            sidebar: vec![SidebarGroup {
                text: "\tUI Kit".to_owned(),
                collapsed: Some(true),
                items: vec![
                    NavLink::new("Buttons  ", "/buttons").into(),
                    SidebarGroup::new(" Charts", vec![NavLink::new("Bars", "/bars").into()])
                        .into(),
                ],
            }],
            footer: FooterConfig {
                message: " Built for developers ".to_owned(),
                copyright: "Copyright © 2025 ".to_owned(),
            },
        }
    }

    #[test]
    fn test_normalize_trims_text_and_applies_defaults() {
        let config = normalize(sample());

        assert_eq!(config.title, "Docs");
        assert_eq!(config.description, "Component docs");
        assert_eq!(config.nav[0], NavLink::new("Home", "/"));
        assert_eq!(config.sidebar[0].text, "UI Kit");
        assert_eq!(config.sidebar[0].collapsed, Some(true));
        let SidebarItem::Group(charts) = &config.sidebar[0].items[1] else {
            panic!("expected nested group");
        };
        assert_eq!(charts.text, "Charts");
        assert_eq!(charts.collapsed, Some(false));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(sample());
        let twice = normalize(once.clone());
        assert_eq!(twice, once);
    }

    /// Untrimmed tree with a mix of explicit and missing `collapsed`.
    fn generated_site(depth: usize, breadth: usize) -> SiteConfig {
        fn group(prefix: &str, level: usize, depth: usize, breadth: usize) -> SidebarGroup {
            let mut items: Vec<SidebarItem> = (0..breadth)
                .map(|i| NavLink::new(format!(" Page {i}\t"), format!("{prefix}/page-{i}")).into())
                .collect();
            if level < depth {
                items.extend((0..breadth).map(|i| {
                    group(&format!("{prefix}/section-{i}"), level + 1, depth, breadth).into()
                }));
            }
            SidebarGroup {
                text: format!("  Level {level} "),
                collapsed: (level % 2 == 0).then_some(true),
                items,
            }
        }

        SiteConfig {
            sidebar: (0..breadth)
                .map(|i| group(&format!("/root-{i}"), 1, depth, breadth))
                .collect(),
            ..sample()
        }
    }

    #[test]
    fn test_normalize_is_idempotent_on_generated_trees() {
        for (depth, breadth) in [(1, 1), (2, 3), (3, 2), (4, 2)] {
            let once = normalize(generated_site(depth, breadth));
            assert_eq!(normalize(once.clone()), once, "depth {depth}, breadth {breadth}");
            assert!(
                crate::flatten(&once.sidebar).all(|leaf| leaf.text == leaf.text.trim()),
                "depth {depth}, breadth {breadth}"
            );
        }
    }

    #[test]
    fn test_normalize_keeps_links_untouched() {
        let mut config = sample();
        config.nav[0].link = "/guide#intro".to_owned();
        let config = normalize(config);
        assert_eq!(config.nav[0].link, "/guide#intro");
    }

    #[test]
    fn test_footer_scenario() {
        let toml = r#"
title = "Docs"

[footer]
message = "Built for developers"
copyright = "Copyright © 2025"
"#;
        let config = normalize(load(toml, SourceFormat::Toml).unwrap());
        assert_eq!(
            config.footer,
            FooterConfig {
                message: "Built for developers".to_owned(),
                copyright: "Copyright © 2025".to_owned(),
            }
        );
    }

    #[test]
    fn test_load_then_normalize_is_idempotent() {
        let yaml = r"
title: ' Docs '
sidebar:
  - text: ' Guide '
    items:
      - text: Setup
        link: /setup
      - text: ' Advanced'
        collapsed: true
        items:
          - text: 'Tuning '
            link: /tuning
";
        let once = normalize(load(yaml, SourceFormat::Yaml).unwrap());
        assert_eq!(normalize(once.clone()), once);
        assert_eq!(once.sidebar[0].collapsed, Some(false));
    }
}
