//! Pagination Component
//!
//! Page links for the catalog picker: previous/next, a window of numbered
//! pages around the current one, first and last page with ellipses.

use leptos::prelude::*;

use crate::models::PageInfo;

/// Numbered links shown at most
pub const MAX_VISIBLE_PAGES: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Previous(u32),
    Number { page: u32, active: bool },
    Ellipsis,
    Next(u32),
}

impl PageLink {
    /// Page to load when clicked
    pub fn target(self) -> Option<u32> {
        match self {
            Self::Previous(page) | Self::Next(page) | Self::Number { page, .. } => Some(page),
            Self::Ellipsis => None,
        }
    }

    pub fn label(self) -> String {
        match self {
            Self::Previous(_) => "Предишна".to_string(),
            Self::Next(_) => "Следваща".to_string(),
            Self::Number { page, .. } => page.to_string(),
            Self::Ellipsis => "...".to_string(),
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::Number { active: true, .. })
    }
}

/// Links for a listing page; empty when everything fits on one page
pub fn page_links(info: &PageInfo) -> Vec<PageLink> {
    let total = info.total_pages;
    if total <= 1 {
        return Vec::new();
    }
    let current = info.current_page.clamp(1, total);
    let half = MAX_VISIBLE_PAGES / 2;

    let mut start = current.saturating_sub(half).max(1);
    let end = (start + MAX_VISIBLE_PAGES - 1).min(total);
    if end - start + 1 < MAX_VISIBLE_PAGES {
        start = (end + 1).saturating_sub(MAX_VISIBLE_PAGES).max(1);
    }

    let mut links = Vec::new();
    if info.has_previous {
        links.push(PageLink::Previous(info.previous_page.unwrap_or(current - 1).max(1)));
    }
    if start > 1 {
        links.push(PageLink::Number { page: 1, active: false });
        if start > 2 {
            links.push(PageLink::Ellipsis);
        }
    }
    for page in start..=end {
        links.push(PageLink::Number { page, active: page == current });
    }
    if end < total {
        if end < total - 1 {
            links.push(PageLink::Ellipsis);
        }
        links.push(PageLink::Number { page: total, active: false });
    }
    if info.has_next {
        links.push(PageLink::Next(info.next_page.unwrap_or(current + 1).min(total)));
    }
    links
}

#[component]
pub fn PaginationNav(
    #[prop(into)] info: Signal<Option<PageInfo>>,
    #[prop(into)] on_page: Callback<u32>,
) -> impl IntoView {
    let links = move || info.get().map(|info| page_links(&info)).unwrap_or_default();

    view! {
        <nav class="sklad-pagination">
            <ul class="pagination pagination-sm justify-content-center" id="skladPaginationList">
                {move || links().into_iter().map(|link| {
                    let class = match link {
                        PageLink::Ellipsis => "page-item disabled",
                        _ if link.is_active() => "page-item active",
                        _ => "page-item",
                    };
                    view! {
                        <li class=class>
                            <a
                                class="page-link"
                                href="#"
                                on:click=move |ev| {
                                    ev.prevent_default();
                                    if let Some(page) = link.target() {
                                        if !link.is_active() {
                                            on_page.run(page);
                                        }
                                    }
                                }
                            >
                                {link.label()}
                            </a>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(current: u32, total: u32) -> PageInfo {
        PageInfo {
            current_page: current,
            total_pages: total,
            has_previous: current > 1,
            has_next: current < total,
            previous_page: (current > 1).then(|| current - 1),
            next_page: (current < total).then(|| current + 1),
        }
    }

    fn numbers(links: &[PageLink]) -> Vec<u32> {
        links
            .iter()
            .filter_map(|link| match link {
                PageLink::Number { page, .. } => Some(*page),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_page_has_no_links() {
        assert!(page_links(&info(1, 1)).is_empty());
        assert!(page_links(&info(1, 0)).is_empty());
    }

    #[test]
    fn test_few_pages_all_shown() {
        let links = page_links(&info(2, 4));
        assert_eq!(links.first(), Some(&PageLink::Previous(1)));
        assert_eq!(links.last(), Some(&PageLink::Next(3)));
        assert_eq!(numbers(&links), vec![1, 2, 3, 4]);
        assert!(!links.contains(&PageLink::Ellipsis));
    }

    #[test]
    fn test_window_in_the_middle() {
        let links = page_links(&info(10, 20));
        assert_eq!(numbers(&links), vec![1, 7, 8, 9, 10, 11, 12, 13, 20]);
        assert_eq!(links.iter().filter(|l| **l == PageLink::Ellipsis).count(), 2);
        assert!(links.contains(&PageLink::Number { page: 10, active: true }));
    }

    #[test]
    fn test_window_at_the_start() {
        let links = page_links(&info(1, 20));
        assert_eq!(links.first(), Some(&PageLink::Number { page: 1, active: true }));
        assert_eq!(numbers(&links), vec![1, 2, 3, 4, 5, 6, 7, 20]);
    }

    #[test]
    fn test_window_at_the_end() {
        let links = page_links(&info(20, 20));
        assert_eq!(numbers(&links), vec![1, 14, 15, 16, 17, 18, 19, 20]);
        assert_eq!(links.last(), Some(&PageLink::Number { page: 20, active: true }));
    }

    #[test]
    fn test_no_ellipsis_when_adjacent() {
        let links = page_links(&info(5, 9));
        assert_eq!(numbers(&links), vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert!(!links.contains(&PageLink::Ellipsis));
    }

    #[test]
    fn test_link_targets() {
        assert_eq!(PageLink::Ellipsis.target(), None);
        assert_eq!(PageLink::Next(4).target(), Some(4));
        assert_eq!(PageLink::Previous(2).label(), "Предишна");
    }
}
