//! JSON-API query string builder.
//!
//! Pagination goes to `page[limit]` / `page[offset]`, filters to
//! `filter[field]` (or `filter[field][op]`), sorting to `sort`.

use reqwest::Url;
use shared::Pagination;

/// Query parameters for one catalog request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    limit: Option<u32>,
    offset: Option<u64>,
    sort: Option<String>,
    filters: Vec<(String, String)>,
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Limit and offset for a 1-based page number
    pub fn page(self, page: u32, page_size: u32) -> Self {
        self.limit(page_size)
            .offset(Pagination::offset_for(page, page_size))
    }

    /// Sort field, prefixed with `-` for descending order
    pub fn sort(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(field.into());
        self
    }

    /// `filter[field]=value`
    pub fn filter(mut self, field: &str, value: impl Into<String>) -> Self {
        self.filters.push((format!("filter[{}]", field), value.into()));
        self
    }

    /// `filter[field][op]=value`
    pub fn nested_filter(mut self, field: &str, op: &str, value: impl Into<String>) -> Self {
        self.filters
            .push((format!("filter[{}][{}]", field, op), value.into()));
        self
    }

    /// Any other plain key/value pair
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// All key/value pairs in the order they are sent
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(3 + self.filters.len() + self.params.len());

        if let Some(limit) = self.limit {
            pairs.push(("page[limit]".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("page[offset]".to_string(), offset.to_string()));
        }
        pairs.extend(self.filters.iter().cloned());
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        pairs.extend(self.params.iter().cloned());

        pairs
    }

    /// Append this query to a URL
    pub fn apply_to(&self, url: &mut Url) {
        let pairs = self.pairs();
        if pairs.is_empty() {
            return;
        }
        url.query_pairs_mut().extend_pairs(pairs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_page_parameters() {
        let query = Query::new().page(3, 24);
        assert_eq!(
            query.pairs(),
            owned(&[("page[limit]", "24"), ("page[offset]", "48")])
        );
    }

    #[test]
    fn test_upcoming_listing_url() {
        let mut url = Url::parse("https://kitsu.io/api/edge/anime").unwrap();
        Query::new()
            .page(1, 24)
            .filter("status", "upcoming")
            .sort("-start_date")
            .apply_to(&mut url);

        assert_eq!(
            decoded(&url),
            owned(&[
                ("page[limit]", "24"),
                ("page[offset]", "0"),
                ("filter[status]", "upcoming"),
                ("sort", "-start_date"),
            ])
        );
    }

    #[test]
    fn test_nested_filter_and_params() {
        let query = Query::new()
            .limit(5)
            .filter("categories", "1,2")
            .nested_filter("id", "not", "7")
            .sort("-user_count")
            .param("include", "categories");

        assert_eq!(
            query.pairs(),
            owned(&[
                ("page[limit]", "5"),
                ("filter[categories]", "1,2"),
                ("filter[id][not]", "7"),
                ("sort", "-user_count"),
                ("include", "categories"),
            ])
        );
    }

    #[test]
    fn test_search_text_is_encoded() {
        let mut url = Url::parse("https://kitsu.io/api/edge/anime").unwrap();
        Query::new()
            .filter("text", "cowboy bebop & co")
            .apply_to(&mut url);

        assert!(!url.as_str().contains(' '));
        assert_eq!(
            decoded(&url),
            owned(&[("filter[text]", "cowboy bebop & co")])
        );
    }

    #[test]
    fn test_empty_query_leaves_url_untouched() {
        let mut url = Url::parse("https://kitsu.io/api/edge/anime/1").unwrap();
        Query::new().apply_to(&mut url);
        assert_eq!(url.as_str(), "https://kitsu.io/api/edge/anime/1");
        assert_eq!(url.query(), None);
    }
}
