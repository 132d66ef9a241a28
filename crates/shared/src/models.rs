//! Data models for the catalog.
//!
//! These are the domain shapes the views work with. They are built from the
//! remote API's resources once and never mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Localized titles of a show
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Titles {
    pub en: Option<String>,
    pub en_jp: Option<String>,
    pub ja_jp: Option<String>,
}

/// Image URLs in the resolutions the API provides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSet {
    pub tiny: Option<String>,
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
    pub original: Option<String>,
}

/// One show in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,

    // Titles
    pub titles: Titles,
    pub canonical_title: Option<String>,

    // Artwork
    pub poster: ImageSet,
    pub cover: Option<ImageSet>,

    /// Average rating on a 0-100 scale, kept as the API sends it
    pub average_rating: Option<String>,
    pub episode_count: Option<u32>,
    /// TV, movie, OVA, ...
    pub show_type: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub synopsis: Option<String>,
}

/// One episode of a show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub number: Option<u32>,
    pub title: Option<String>,
    pub synopsis: Option<String>,
    pub air_date: Option<NaiveDate>,
    pub duration_minutes: Option<u32>,
    pub thumbnail: Option<String>,
}

/// Category attached to a show, used to look up related shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTag {
    pub id: String,
    pub title: Option<String>,
    pub slug: Option<String>,
}

/// Pagination flags for one page of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl Pagination {
    /// Compute pagination from the server-reported total count.
    ///
    /// A page number of 0 is treated as the first page. An empty listing
    /// still has one (empty) page.
    pub fn compute(current_page: u32, total_count: u64, page_size: u32) -> Self {
        let current_page = current_page.max(1);
        let total_pages = if page_size == 0 {
            1
        } else {
            let pages = total_count.div_ceil(u64::from(page_size));
            u32::try_from(pages).unwrap_or(u32::MAX).max(1)
        };

        Self {
            current_page,
            total_pages,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
        }
    }

    /// Zero-based item offset of the first entry on `page`
    pub fn offset_for(page: u32, page_size: u32) -> u64 {
        u64::from(page.max(1) - 1) * u64::from(page_size)
    }
}
