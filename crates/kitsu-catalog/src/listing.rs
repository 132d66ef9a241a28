//! Paginated category listings and search results.
//!
//! A [`ListView`] fetches exactly one page per navigation and only when the
//! page number or the listing itself changed since the last request.

use crate::api::{CatalogPage, CatalogSource, Query};
use shared::{CatalogItem, FetchState, Pagination};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Shown in place of a grid when a page has no items
pub const EMPTY_MESSAGE: &str = "No anime found.";

/// The fixed catalog listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingKind {
    Trending,
    Popular,
    TopRated,
    Upcoming,
}

impl ListingKind {
    pub const ALL: [ListingKind; 4] = [
        ListingKind::Trending,
        ListingKind::Popular,
        ListingKind::TopRated,
        ListingKind::Upcoming,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Trending => "trending",
            ListingKind::Popular => "popular",
            ListingKind::TopRated => "top-rated",
            ListingKind::Upcoming => "upcoming",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ListingKind::Trending => "Trending Anime",
            ListingKind::Popular => "Most Popular Anime",
            ListingKind::TopRated => "Top Rated Anime",
            ListingKind::Upcoming => "Upcoming Anime",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            ListingKind::Trending => "/trending/anime",
            _ => "/anime",
        }
    }

    /// Sort and filter parameters, without pagination
    pub fn query(&self) -> Query {
        match self {
            ListingKind::Trending => Query::new(),
            ListingKind::Popular => Query::new().sort("-user_count"),
            ListingKind::TopRated => Query::new().sort("-average_rating"),
            ListingKind::Upcoming => Query::new()
                .filter("status", "upcoming")
                .sort("-start_date"),
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trending" => Ok(ListingKind::Trending),
            "popular" => Ok(ListingKind::Popular),
            "top-rated" | "top_rated" => Ok(ListingKind::TopRated),
            "upcoming" => Ok(ListingKind::Upcoming),
            _ => Err(format!(
                "Invalid listing: {} (expected trending, popular, top-rated or upcoming)",
                s
            )),
        }
    }
}

/// What a list view shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListTarget {
    Listing(ListingKind),
    Search(String),
}

impl ListTarget {
    pub fn title(&self) -> String {
        match self {
            ListTarget::Listing(kind) => kind.title().to_string(),
            ListTarget::Search(text) if text.trim().is_empty() => "Search Anime".to_string(),
            ListTarget::Search(text) => format!("Search Results for \"{}\"", text.trim()),
        }
    }
}

/// One loaded page
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub items: Vec<CatalogItem>,
    pub pagination: Pagination,
}

impl ListPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Paginated list bound to one listing or search query
pub struct ListView<S> {
    source: S,
    target: ListTarget,
    page_size: u32,
    last_request: Option<(ListTarget, u32)>,
    state: FetchState<ListPage>,
}

impl<S: CatalogSource> ListView<S> {
    pub fn new(source: S, target: ListTarget, page_size: u32) -> Self {
        Self {
            source,
            target,
            page_size,
            last_request: None,
            state: FetchState::Loading,
        }
    }

    pub fn listing(source: S, kind: ListingKind, page_size: u32) -> Self {
        Self::new(source, ListTarget::Listing(kind), page_size)
    }

    pub fn search(source: S, text: impl Into<String>, page_size: u32) -> Self {
        Self::new(source, ListTarget::Search(text.into()), page_size)
    }

    pub fn target(&self) -> &ListTarget {
        &self.target
    }

    pub fn state(&self) -> &FetchState<ListPage> {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Point the view at another listing or query; the next navigation fetches
    pub fn set_target(&mut self, target: ListTarget) {
        if target != self.target {
            self.target = target;
            self.last_request = None;
        }
    }

    /// Go to `page`, fetching only if it differs from the last request.
    ///
    /// Returns whether a request was made.
    pub async fn navigate(&mut self, page: u32) -> bool {
        let key = (self.target.clone(), page.max(1));
        if self.last_request.as_ref() == Some(&key) {
            debug!(page = key.1, "Page already loaded, skipping fetch");
            return false;
        }
        self.load(page).await;
        true
    }

    /// Fetch `page` unconditionally (also the manual retry)
    pub async fn load(&mut self, page: u32) -> &FetchState<ListPage> {
        let page = page.max(1);
        self.state.begin();
        self.last_request = Some((self.target.clone(), page));

        let request = match &self.target {
            ListTarget::Listing(kind) => Some((
                kind.endpoint(),
                kind.query().page(page, self.page_size),
            )),
            ListTarget::Search(text) if text.trim().is_empty() => None,
            ListTarget::Search(text) => Some((
                "/anime",
                Query::new()
                    .filter("text", text.trim())
                    .page(page, self.page_size),
            )),
        };

        let Some((endpoint, query)) = request else {
            // Nothing to search for yet
            self.state = FetchState::Ready(ListPage {
                items: Vec::new(),
                pagination: Pagination::compute(1, 0, self.page_size),
            });
            return &self.state;
        };

        info!(
            listing = %self.target.title(),
            page = page,
            page_size = self.page_size,
            "Fetching list page"
        );

        let result = self
            .source
            .catalog_page(endpoint, &query)
            .await
            .map(|page_data| self.to_list_page(page, page_data));

        if let Err(e) = &result {
            warn!(
                listing = %self.target.title(),
                page = page,
                error = %e,
                "Failed to load list page"
            );
        }

        self.state.settle(result);
        &self.state
    }

    fn to_list_page(&self, page: u32, data: CatalogPage) -> ListPage {
        let total = data.total_count.unwrap_or(0);
        ListPage {
            items: data.items,
            pagination: Pagination::compute(page, total, self.page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{anime_list, StubSource};

    #[test]
    fn test_listing_kind_round_trip_names() {
        for kind in ListingKind::ALL {
            assert_eq!(kind.as_str().parse::<ListingKind>().unwrap(), kind);
        }
        assert!("weekly".parse::<ListingKind>().is_err());
    }

    #[test]
    fn test_listing_queries() {
        assert_eq!(ListingKind::Trending.endpoint(), "/trending/anime");
        assert!(ListingKind::Trending.query().pairs().is_empty());

        let upcoming = ListingKind::Upcoming.query().pairs();
        assert!(upcoming.contains(&("filter[status]".to_string(), "upcoming".to_string())));
        assert!(upcoming.contains(&("sort".to_string(), "-start_date".to_string())));
    }

    #[tokio::test]
    async fn test_load_computes_pagination() {
        let source = StubSource::new().on(
            "/anime",
            &[("sort", "-user_count"), ("page[offset]", "48")],
            anime_list(&["1", "2"], Some(100)),
        );
        let mut view = ListView::listing(source, ListingKind::Popular, 24);

        view.load(3).await;
        let page = view.state().data().unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.current_page, 3);
        assert_eq!(page.pagination.total_pages, 5);
        assert!(page.pagination.has_next_page);
        assert!(page.pagination.has_previous_page);
    }

    #[tokio::test]
    async fn test_navigate_skips_unchanged_page() {
        let source = StubSource::new().on("/trending/anime", &[], anime_list(&["1"], Some(1)));
        let mut view = ListView::listing(source, ListingKind::Trending, 24);

        assert!(view.navigate(1).await);
        assert!(!view.navigate(1).await);
        assert!(view.navigate(2).await);
        assert_eq!(view.source().request_count(), 2);
    }

    #[tokio::test]
    async fn test_changing_target_refetches_same_page() {
        let source = StubSource::new()
            .on("/trending/anime", &[], anime_list(&["1"], Some(1)))
            .on("/anime", &[("sort", "-average_rating")], anime_list(&["2"], Some(1)));
        let mut view = ListView::listing(source, ListingKind::Trending, 24);

        view.navigate(1).await;
        view.set_target(ListTarget::Listing(ListingKind::TopRated));
        assert!(view.navigate(1).await);
        assert_eq!(view.state().data().unwrap().items[0].id, "2");
    }

    #[tokio::test]
    async fn test_missing_count_means_single_page() {
        let source = StubSource::new().on("/trending/anime", &[], anime_list(&["1"], None));
        let mut view = ListView::listing(source, ListingKind::Trending, 24);

        view.load(1).await;
        let pagination = view.state().data().unwrap().pagination;
        assert_eq!(pagination.total_pages, 1);
        assert!(!pagination.has_next_page);
    }

    #[tokio::test]
    async fn test_empty_page_is_not_an_error() {
        let source = StubSource::new().on("/anime", &[], anime_list(&[], Some(0)));
        let mut view = ListView::listing(source, ListingKind::Upcoming, 24);

        view.load(1).await;
        assert!(view.state().data().unwrap().is_empty());
        assert!(view.state().error().is_none());
    }

    #[tokio::test]
    async fn test_failed_page_reports_error_and_retry_recovers() {
        let source = StubSource::new().fail("/anime", &[], 500, "Internal Server Error");
        let mut view = ListView::listing(source, ListingKind::Popular, 24);

        view.load(1).await;
        assert_eq!(
            view.state().error(),
            Some("HTTP error 500 Internal Server Error: Internal Server Error")
        );

        // Same page again counts as a retry, not a skip
        view.load(1).await;
        assert_eq!(view.source().request_count(), 2);
    }

    #[tokio::test]
    async fn test_search_sends_text_filter() {
        let source = StubSource::new().on(
            "/anime",
            &[("filter[text]", "bebop"), ("page[limit]", "20")],
            anime_list(&["1"], Some(1)),
        );
        let mut view = ListView::search(source, "  bebop ", 20);

        view.load(1).await;
        assert_eq!(view.state().data().unwrap().items.len(), 1);
        assert_eq!(view.target().title(), "Search Results for \"bebop\"");
    }

    #[tokio::test]
    async fn test_empty_search_does_not_fetch() {
        let mut view = ListView::search(StubSource::new(), "   ", 20);

        view.load(1).await;
        assert!(view.state().data().unwrap().is_empty());
        assert_eq!(view.source().request_count(), 0);
        assert_eq!(view.target().title(), "Search Anime");
    }
}
