//! Watch view: one show, its episodes, and shows related to it.

use crate::api::{CatalogError, CatalogSource};
use shared::{CatalogItem, CategoryTag, Episode, FetchState};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Shown when the related-shows query fails
pub const RELATED_UNAVAILABLE: &str = "Could not load related anime.";

/// Failures that prevent the watch view from rendering
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Failed to fetch anime: {0}")]
    Anime(#[source] CatalogError),

    #[error("Failed to fetch episodes: {0}")]
    Episodes(#[source] CatalogError),

    #[error("Anime has no episodes.")]
    NoEpisodes,
}

/// Everything the watch view shows once loaded
#[derive(Debug, Clone, PartialEq)]
pub struct WatchData {
    pub anime: CatalogItem,
    pub categories: Vec<CategoryTag>,
    pub episodes: Vec<Episode>,
    current: usize,
    /// Episode number actually shown when the requested one was missing
    pub redirected_to: Option<u32>,
}

impl WatchData {
    pub fn current_episode(&self) -> &Episode {
        &self.episodes[self.current]
    }

    /// Switch to another episode of the loaded page.
    ///
    /// Unknown numbers leave the selection unchanged. Returns whether the
    /// selection moved.
    pub fn select_episode(&mut self, number: u32) -> bool {
        match self.episodes.iter().position(|ep| ep.number == Some(number)) {
            Some(index) if index != self.current => {
                self.current = index;
                true
            }
            _ => false,
        }
    }

    /// Episodes whose title or number contains `text`, ignoring case
    pub fn filter_episodes(&self, text: &str) -> Vec<&Episode> {
        let needle = text.trim().to_lowercase();
        self.episodes
            .iter()
            .filter(|ep| {
                let title = shared::display::episode_title(ep).to_lowercase();
                let number = ep.number.map(|n| n.to_string()).unwrap_or_default();
                title.contains(&needle) || number.contains(&needle)
            })
            .collect()
    }
}

/// Watch page for one show
pub struct WatchView<S> {
    source: S,
    episode_limit: u32,
    related_limit: u32,
    anime_id: Option<String>,
    state: FetchState<WatchData>,
    related: FetchState<Vec<CatalogItem>>,
}

impl<S: CatalogSource> WatchView<S> {
    pub fn new(source: S, episode_limit: u32, related_limit: u32) -> Self {
        Self {
            source,
            episode_limit,
            related_limit,
            anime_id: None,
            state: FetchState::Loading,
            related: FetchState::Loading,
        }
    }

    pub fn state(&self) -> &FetchState<WatchData> {
        &self.state
    }

    pub fn related(&self) -> &FetchState<Vec<CatalogItem>> {
        &self.related
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load a show and select `episode_number`, falling back to the first
    /// episode when it is absent from the fetched page.
    pub async fn load(
        &mut self,
        anime_id: &str,
        episode_number: Option<u32>,
    ) -> &FetchState<WatchData> {
        self.state.begin();
        self.related.begin();
        self.anime_id = Some(anime_id.to_string());

        info!(anime_id = anime_id, episode = ?episode_number, "Loading watch view");

        let result = self.fetch(anime_id, episode_number).await;
        if let Err(e) = &result {
            warn!(anime_id = anime_id, error = %e, "Failed to load watch view");
        }

        self.state.settle(result);
        &self.state
    }

    async fn fetch(
        &self,
        anime_id: &str,
        episode_number: Option<u32>,
    ) -> Result<WatchData, WatchError> {
        let anime = self
            .source
            .anime(anime_id)
            .await
            .map_err(WatchError::Anime)?;

        // Categories only feed the related-shows query
        let categories = match self.source.anime_categories(anime_id).await {
            Ok(categories) => categories,
            Err(e) => {
                warn!(anime_id = anime_id, error = %e, "Failed to fetch categories");
                Vec::new()
            }
        };

        let episodes = self
            .source
            .episodes(anime_id, self.episode_limit)
            .await
            .map_err(WatchError::Episodes)?;

        if episodes.is_empty() {
            return Err(WatchError::NoEpisodes);
        }

        let (current, redirected_to) = match episode_number {
            None => (0, None),
            Some(n) => match episodes.iter().position(|ep| ep.number == Some(n)) {
                Some(index) => (index, None),
                None => {
                    let first = episodes[0].number;
                    debug!(
                        anime_id = anime_id,
                        requested = n,
                        shown = ?first,
                        "Requested episode not on page, showing first"
                    );
                    (0, first)
                }
            },
        };

        Ok(WatchData {
            anime,
            categories,
            episodes,
            current,
            redirected_to,
        })
    }

    /// Switch episodes without refetching
    pub fn select_episode(&mut self, number: u32) -> bool {
        self.state
            .data_mut()
            .map(|data| data.select_episode(number))
            .unwrap_or(false)
    }

    /// Fetch shows sharing the loaded show's categories
    pub async fn load_related(&mut self) -> &FetchState<Vec<CatalogItem>> {
        let (anime_id, categories) = match (&self.anime_id, self.state.data()) {
            (Some(id), Some(data)) => (id.clone(), data.categories.clone()),
            _ => {
                self.related = FetchState::Ready(Vec::new());
                return &self.related;
            }
        };

        if categories.is_empty() {
            self.related = FetchState::Ready(Vec::new());
            return &self.related;
        }

        self.related.begin();
        let result = self
            .source
            .related(&anime_id, &categories, self.related_limit)
            .await;

        self.related = match result {
            Ok(items) => FetchState::Ready(items),
            Err(e) => {
                warn!(anime_id = %anime_id, error = %e, "Error fetching related anime");
                FetchState::Error(RELATED_UNAVAILABLE.to_string())
            }
        };
        &self.related
    }
}
