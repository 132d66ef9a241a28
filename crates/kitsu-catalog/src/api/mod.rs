//! Kitsu API client implementation.
//!
//! This module provides a single-attempt client for the Kitsu JSON-API,
//! the query builder it uses, and the [`CatalogSource`] trait views fetch
//! through.

pub mod client;
pub mod error;
pub mod query;
pub mod source;
pub mod types;

pub use client::KitsuClient;
pub use error::{CatalogError, Result};
pub use query::Query;
pub use source::{CatalogPage, CatalogSource};
pub use types::*;
