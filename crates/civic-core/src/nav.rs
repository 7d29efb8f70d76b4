use civic_types::api::{NavItem, NavSection, NavigationResponse, SidebarMode};

pub const DASHBOARD: &str = "/dashboard";
pub const REPORTS: &str = "/reports";
pub const PROFILE: &str = "/profile";
pub const SUBMIT_REPORT: &str = "/report";
pub const MAP: &str = "/map";
pub const COMMUNITY: &str = "/community";
pub const LOGIN: &str = "/login";

struct Entry {
    title: &'static str,
    path: &'static str,
}

struct Section {
    label: &'static str,
    entries: &'static [Entry],
}

const SECTIONS: &[Section] = &[
    Section {
        label: "Main",
        entries: &[
            Entry { title: "Dashboard", path: DASHBOARD },
            Entry { title: "My Reports", path: REPORTS },
            Entry { title: "Profile", path: PROFILE },
        ],
    },
    Section {
        label: "Explore",
        entries: &[
            Entry { title: "Map View", path: MAP },
            Entry { title: "Community", path: COMMUNITY },
        ],
    },
    Section {
        label: "Actions",
        entries: &[Entry { title: "Report Issue", path: SUBMIT_REPORT }],
    },
];

/// Every route the shell can navigate to, in sidebar order.
pub fn routes() -> impl Iterator<Item = &'static str> {
    SECTIONS
        .iter()
        .flat_map(|s| s.entries.iter().map(|e| e.path))
}

/// Builds the sidebar for `current_path`. Collapsed mode keeps the icons'
/// paths but drops section labels and item titles.
pub fn sidebar(mode: SidebarMode, current_path: Option<&str>) -> NavigationResponse {
    let expanded = mode == SidebarMode::Expanded;

    let sections = SECTIONS
        .iter()
        .map(|section| NavSection {
            label: expanded.then(|| section.label.to_string()),
            items: section
                .entries
                .iter()
                .map(|entry| NavItem {
                    title: expanded.then(|| entry.title.to_string()),
                    path: entry.path.to_string(),
                    active: current_path == Some(entry.path),
                })
                .collect(),
        })
        .collect();

    NavigationResponse {
        mode,
        sections,
        logout_path: LOGIN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_every_route() {
        let all: Vec<_> = routes().collect();
        assert_eq!(all, [DASHBOARD, REPORTS, PROFILE, MAP, COMMUNITY, SUBMIT_REPORT]);
    }

    #[test]
    fn marks_only_the_current_path_active() {
        let nav = sidebar(SidebarMode::Expanded, Some("/community"));
        let active: Vec<_> = nav
            .sections
            .iter()
            .flat_map(|s| &s.items)
            .filter(|i| i.active)
            .map(|i| i.path.as_str())
            .collect();
        assert_eq!(active, ["/community"]);
        assert_eq!(nav.sections[0].label.as_deref(), Some("Main"));
        assert_eq!(nav.sections[1].items[1].title.as_deref(), Some("Community"));
    }

    #[test]
    fn collapsed_hides_text() {
        let nav = sidebar(SidebarMode::Collapsed, None);
        assert!(nav.sections.iter().all(|s| s.label.is_none()));
        assert!(
            nav.sections
                .iter()
                .flat_map(|s| &s.items)
                .all(|i| i.title.is_none() && !i.active)
        );
        assert_eq!(nav.logout_path, LOGIN);
    }
}
