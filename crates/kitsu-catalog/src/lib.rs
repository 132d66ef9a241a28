//! Kitsu catalog library for browsing anime listings.
//!
//! This library provides a single-attempt client for the Kitsu JSON-API and
//! the views built on it: the aggregated landing feed, paginated listings and
//! search, and the watch view with its episode browser.

pub mod api;
pub mod feed;
pub mod listing;
pub mod render;
pub mod watch;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{CatalogError, CatalogSource, KitsuClient, Query};
pub use feed::{HomeFeed, HomeSections};
pub use listing::{ListPage, ListTarget, ListView, ListingKind};
pub use watch::{WatchData, WatchError, WatchView};
