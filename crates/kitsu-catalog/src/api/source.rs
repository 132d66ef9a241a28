//! The seam between views and the transport.
//!
//! Views only talk to a [`CatalogSource`]. The typed endpoints are provided
//! methods built on the two raw document fetches, so any source that can
//! serve JSON-API documents gets the whole catalog surface.

use super::error::Result;
use super::query::Query;
use super::types::{
    AnimeAttributes, CategoryAttributes, EpisodeAttributes, ListDocument, SingleDocument,
};
use serde::de::DeserializeOwned;
use shared::{CatalogItem, CategoryTag, Episode};

/// One page of catalog items plus the server-reported total
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogPage {
    pub items: Vec<CatalogItem>,
    pub total_count: Option<u64>,
}

impl From<ListDocument<AnimeAttributes>> for CatalogPage {
    fn from(doc: ListDocument<AnimeAttributes>) -> Self {
        CatalogPage {
            items: doc.data.into_iter().map(CatalogItem::from).collect(),
            total_count: doc.meta.and_then(|m| m.count),
        }
    }
}

/// Anything that can answer catalog queries
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    /// Fetch a document whose `data` is a list
    async fn fetch_list<A: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &Query,
    ) -> Result<ListDocument<A>>;

    /// Fetch a document whose `data` is a single resource
    async fn fetch_one<A: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &Query,
    ) -> Result<SingleDocument<A>>;

    /// Fetch one page of shows from any listing endpoint
    async fn catalog_page(&self, endpoint: &str, query: &Query) -> Result<CatalogPage> {
        let doc: ListDocument<AnimeAttributes> = self.fetch_list(endpoint, query).await?;
        Ok(doc.into())
    }

    /// Currently trending shows
    async fn trending(&self, limit: u32) -> Result<Vec<CatalogItem>> {
        let page = self
            .catalog_page("/trending/anime", &Query::new().limit(limit))
            .await?;
        Ok(page.items)
    }

    /// One show by id
    async fn anime(&self, anime_id: &str) -> Result<CatalogItem> {
        let doc: SingleDocument<AnimeAttributes> = self
            .fetch_one(&format!("/anime/{}", anime_id), &Query::new())
            .await?;
        Ok(doc.data.into())
    }

    /// Categories attached to a show
    async fn anime_categories(&self, anime_id: &str) -> Result<Vec<CategoryTag>> {
        let doc: ListDocument<CategoryAttributes> = self
            .fetch_list(&format!("/anime/{}/categories", anime_id), &Query::new())
            .await?;
        Ok(doc.data.into_iter().map(CategoryTag::from).collect())
    }

    /// First page of a show's episodes, ordered by number
    async fn episodes(&self, anime_id: &str, limit: u32) -> Result<Vec<Episode>> {
        let query = Query::new().limit(limit).sort("number");
        let doc: ListDocument<EpisodeAttributes> = self
            .fetch_list(&format!("/anime/{}/episodes", anime_id), &query)
            .await?;
        Ok(doc.data.into_iter().map(Episode::from).collect())
    }

    /// Free-text search over shows
    async fn search(&self, text: &str, page: u32, page_size: u32) -> Result<CatalogPage> {
        let query = Query::new().filter("text", text).page(page, page_size);
        self.catalog_page("/anime", &query).await
    }

    /// Shows sharing any of `categories`, excluding `anime_id`
    async fn related(
        &self,
        anime_id: &str,
        categories: &[CategoryTag],
        limit: u32,
    ) -> Result<Vec<CatalogItem>> {
        let category_ids = categories
            .iter()
            .map(|c| c.id.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let query = Query::new()
            .filter("categories", category_ids)
            .nested_filter("id", "not", anime_id)
            .limit(limit)
            .sort("-user_count");

        let page = self.catalog_page("/anime", &query).await?;
        Ok(page.items)
    }
}
