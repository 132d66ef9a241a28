//! Landing feed: four listings fetched together.
//!
//! All four queries run concurrently and the feed only becomes ready when
//! every one of them succeeded. A single failure turns the whole feed into
//! an error; partial sections are never exposed.

use crate::api::{CatalogSource, Result};
use crate::listing::ListingKind;
use shared::{CatalogItem, FetchState};
use tracing::{error, info};

/// Items shown in the hero carousel
pub const HERO_ITEMS: usize = 5;

/// The four sections of the landing feed
#[derive(Debug, Clone, PartialEq)]
pub struct HomeSections {
    pub trending: Vec<CatalogItem>,
    pub popular: Vec<CatalogItem>,
    pub top_rated: Vec<CatalogItem>,
    pub upcoming: Vec<CatalogItem>,
}

impl HomeSections {
    /// Leading trending items for the carousel
    pub fn hero(&self) -> &[CatalogItem] {
        &self.trending[..self.trending.len().min(HERO_ITEMS)]
    }

    pub fn section(&self, kind: ListingKind) -> &[CatalogItem] {
        match kind {
            ListingKind::Trending => &self.trending,
            ListingKind::Popular => &self.popular,
            ListingKind::TopRated => &self.top_rated,
            ListingKind::Upcoming => &self.upcoming,
        }
    }
}

/// Aggregated landing feed
pub struct HomeFeed<S> {
    source: S,
    section_limit: u32,
    state: FetchState<HomeSections>,
}

impl<S: CatalogSource> HomeFeed<S> {
    pub fn new(source: S, section_limit: u32) -> Self {
        Self {
            source,
            section_limit,
            state: FetchState::Loading,
        }
    }

    pub fn state(&self) -> &FetchState<HomeSections> {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch all sections again; also the manual retry
    pub async fn refresh(&mut self) -> &FetchState<HomeSections> {
        self.state.begin();
        info!(section_limit = self.section_limit, "Refreshing home feed");

        let result = self.fetch_sections().await;
        match &result {
            Ok(sections) => info!(
                trending = sections.trending.len(),
                popular = sections.popular.len(),
                top_rated = sections.top_rated.len(),
                upcoming = sections.upcoming.len(),
                "Home feed ready"
            ),
            Err(e) => error!(error = %e, "Error fetching home feed"),
        }

        self.state.settle(result);
        &self.state
    }

    async fn fetch_sections(&self) -> Result<HomeSections> {
        let limit = self.section_limit;
        let fetch = |kind: ListingKind| {
            let query = kind.query().limit(limit);
            async move { self.source.catalog_page(kind.endpoint(), &query).await }
        };

        // Wait for every query to settle before looking at any of them
        let (trending, popular, top_rated, upcoming) = tokio::join!(
            fetch(ListingKind::Trending),
            fetch(ListingKind::Popular),
            fetch(ListingKind::TopRated),
            fetch(ListingKind::Upcoming),
        );

        Ok(HomeSections {
            trending: trending?.items,
            popular: popular?.items,
            top_rated: top_rated?.items,
            upcoming: upcoming?.items,
        })
    }
}
