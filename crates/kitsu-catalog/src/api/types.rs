//! Kitsu JSON-API response types.
//!
//! These types mirror the documents returned by the API. They are converted
//! into the `shared` models before reaching any view.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use shared::{CatalogItem, CategoryTag, Episode, ImageSet, Titles};

/// Document whose `data` is a list of resources
#[derive(Debug, Clone, Deserialize)]
pub struct ListDocument<A> {
    #[serde(default = "Vec::new")]
    pub data: Vec<Resource<A>>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

/// Document whose `data` is a single resource
#[derive(Debug, Clone, Deserialize)]
pub struct SingleDocument<A> {
    pub data: Resource<A>,
}

/// Top-level `meta` object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    /// Total number of records matching the query
    pub count: Option<u64>,
}

/// A JSON-API resource object
#[derive(Debug, Clone, Deserialize)]
pub struct Resource<A> {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: A,
}

/// Error document returned alongside non-success statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDocument {
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorObject {
    pub title: Option<String>,
    pub detail: Option<String>,
}

impl ErrorDocument {
    /// First human-readable detail, if the server sent one
    pub fn first_detail(&self) -> Option<&str> {
        self.errors
            .iter()
            .find_map(|e| e.detail.as_deref().or(e.title.as_deref()))
            .filter(|d| !d.is_empty())
    }
}

/// `anime` resource attributes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeAttributes {
    pub canonical_title: Option<String>,
    #[serde(default)]
    pub titles: Option<TitleMap>,
    pub poster_image: Option<ImageMap>,
    pub cover_image: Option<ImageMap>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub average_rating: Option<String>,
    pub episode_count: Option<u32>,
    pub subtype: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub synopsis: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TitleMap {
    pub en: Option<String>,
    pub en_jp: Option<String>,
    pub ja_jp: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageMap {
    pub tiny: Option<String>,
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
    pub original: Option<String>,
}

/// `episodes` resource attributes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeAttributes {
    pub canonical_title: Option<String>,
    pub number: Option<u32>,
    pub synopsis: Option<String>,
    pub airdate: Option<String>,
    /// Runtime in minutes
    pub length: Option<u32>,
    pub thumbnail: Option<ImageMap>,
}

/// `categories` resource attributes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryAttributes {
    pub title: Option<String>,
    pub slug: Option<String>,
}

/// Accept a string or a number, keeping the textual form
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Parse "YYYY-MM-DD", also accepting a full timestamp
fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

impl From<ImageMap> for ImageSet {
    fn from(images: ImageMap) -> Self {
        ImageSet {
            tiny: images.tiny,
            small: images.small,
            medium: images.medium,
            large: images.large,
            original: images.original,
        }
    }
}

impl From<TitleMap> for Titles {
    fn from(titles: TitleMap) -> Self {
        Titles {
            en: titles.en,
            en_jp: titles.en_jp,
            ja_jp: titles.ja_jp,
        }
    }
}

impl From<Resource<AnimeAttributes>> for CatalogItem {
    fn from(resource: Resource<AnimeAttributes>) -> Self {
        let attrs = resource.attributes;
        CatalogItem {
            id: resource.id,
            titles: attrs.titles.map(Titles::from).unwrap_or_default(),
            canonical_title: attrs.canonical_title,
            poster: attrs.poster_image.map(ImageSet::from).unwrap_or_default(),
            cover: attrs.cover_image.map(ImageSet::from),
            average_rating: attrs.average_rating,
            episode_count: attrs.episode_count,
            show_type: attrs.subtype,
            status: attrs.status,
            start_date: parse_date(attrs.start_date.as_deref()),
            synopsis: attrs.synopsis,
        }
    }
}

impl From<Resource<EpisodeAttributes>> for Episode {
    fn from(resource: Resource<EpisodeAttributes>) -> Self {
        let attrs = resource.attributes;
        Episode {
            id: resource.id,
            number: attrs.number,
            title: attrs.canonical_title,
            synopsis: attrs.synopsis,
            air_date: parse_date(attrs.airdate.as_deref()),
            duration_minutes: attrs.length,
            thumbnail: attrs.thumbnail.and_then(|t| t.original),
        }
    }
}

impl From<Resource<CategoryAttributes>> for CategoryTag {
    fn from(resource: Resource<CategoryAttributes>) -> Self {
        CategoryTag {
            id: resource.id,
            title: resource.attributes.title,
            slug: resource.attributes.slug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_anime_list_document() {
        let body = json!({
            "data": [{
                "id": "1",
                "type": "anime",
                "attributes": {
                    "canonicalTitle": "Cowboy Bebop",
                    "titles": { "en": "Cowboy Bebop", "en_jp": "Cowboy Bebop", "ja_jp": "カウボーイビバップ" },
                    "posterImage": { "tiny": "t.jpg", "small": "s.jpg", "meta": { "dimensions": {} } },
                    "averageRating": "82.35",
                    "episodeCount": 26,
                    "subtype": "TV",
                    "status": "finished",
                    "startDate": "1998-04-03",
                    "synopsis": "In the year 2071..."
                }
            }],
            "meta": { "count": 19000 },
            "links": { "next": "https://kitsu.io/api/edge/anime?page%5Blimit%5D=10" }
        });

        let doc: ListDocument<AnimeAttributes> = serde_json::from_value(body).unwrap();
        assert_eq!(doc.meta.and_then(|m| m.count), Some(19000));

        let item = CatalogItem::from(doc.data.into_iter().next().unwrap());
        assert_eq!(item.id, "1");
        assert_eq!(item.titles.ja_jp.as_deref(), Some("カウボーイビバップ"));
        assert_eq!(item.poster.small.as_deref(), Some("s.jpg"));
        assert_eq!(item.average_rating.as_deref(), Some("82.35"));
        assert_eq!(item.episode_count, Some(26));
        assert_eq!(item.show_type.as_deref(), Some("TV"));
        assert_eq!(item.start_date, NaiveDate::from_ymd_opt(1998, 4, 3));
        assert!(item.cover.is_none());
    }

    #[test]
    fn test_missing_data_is_empty_list() {
        let doc: ListDocument<AnimeAttributes> =
            serde_json::from_value(json!({ "meta": {} })).unwrap();
        assert!(doc.data.is_empty());
        assert_eq!(doc.meta.and_then(|m| m.count), None);
    }

    #[test]
    fn test_numeric_and_null_rating() {
        let attrs: AnimeAttributes =
            serde_json::from_value(json!({ "averageRating": 77.5 })).unwrap();
        assert_eq!(attrs.average_rating.as_deref(), Some("77.5"));

        let attrs: AnimeAttributes =
            serde_json::from_value(json!({ "averageRating": null })).unwrap();
        assert_eq!(attrs.average_rating, None);
    }

    #[test]
    fn test_episode_conversion() {
        let resource: Resource<EpisodeAttributes> = serde_json::from_value(json!({
            "id": "100",
            "type": "episodes",
            "attributes": {
                "canonicalTitle": "Asteroid Blues",
                "number": 1,
                "airdate": "1998-10-24",
                "length": 25,
                "thumbnail": { "original": "thumb.jpg" }
            }
        }))
        .unwrap();

        let episode = Episode::from(resource);
        assert_eq!(episode.number, Some(1));
        assert_eq!(episode.title.as_deref(), Some("Asteroid Blues"));
        assert_eq!(episode.air_date, NaiveDate::from_ymd_opt(1998, 10, 24));
        assert_eq!(episode.duration_minutes, Some(25));
        assert_eq!(episode.thumbnail.as_deref(), Some("thumb.jpg"));
    }

    #[test]
    fn test_parse_date_variants() {
        assert_eq!(
            parse_date(Some("2024-01-05T00:00:00.000Z")),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(parse_date(Some("soon")), None);
        assert_eq!(parse_date(None), None);
    }

    #[test]
    fn test_error_document_detail() {
        let doc: ErrorDocument = serde_json::from_value(json!({
            "errors": [{ "title": "Record not found", "detail": "The record identified by 999999 could not be found.", "code": "404", "status": "404" }]
        }))
        .unwrap();
        assert_eq!(
            doc.first_detail(),
            Some("The record identified by 999999 could not be found.")
        );

        let empty = ErrorDocument::default();
        assert_eq!(empty.first_detail(), None);
    }
}
