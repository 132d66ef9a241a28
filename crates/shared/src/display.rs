//! Text helpers used when rendering catalog entries.

use crate::models::{CatalogItem, Episode};

/// Shown when a rating is missing or unreadable
pub const RATING_UNAVAILABLE: &str = "N/A";

/// Teaser length on list cards
pub const CARD_SYNOPSIS_CHARS: usize = 60;

/// Teaser length in the hero carousel
pub const HERO_SYNOPSIS_CHARS: usize = 150;

/// Best title for display: English, then romanized, then canonical
pub fn display_title(item: &CatalogItem) -> &str {
    [
        item.titles.en.as_deref(),
        item.titles.en_jp.as_deref(),
        item.canonical_title.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|t| !t.is_empty())
    .unwrap_or("Unknown title")
}

/// Convert a 0-100 rating string into a 0-10 label with one decimal
pub fn rating_label(average_rating: Option<&str>) -> String {
    average_rating
        .map(str::trim)
        .and_then(|r| r.parse::<f64>().ok())
        .filter(|r| r.is_finite())
        .map(|r| format!("{:.1}", r / 10.0))
        .unwrap_or_else(|| RATING_UNAVAILABLE.to_string())
}

/// Poster URL suitable for a card
pub fn poster_url(item: &CatalogItem) -> Option<&str> {
    item.poster
        .small
        .as_deref()
        .or(item.poster.tiny.as_deref())
        .or(item.poster.original.as_deref())
}

/// First `max_chars` characters of a synopsis, with an ellipsis when cut
pub fn synopsis_teaser(synopsis: Option<&str>, max_chars: usize) -> Option<String> {
    let synopsis = synopsis.filter(|s| !s.trim().is_empty())?;
    let mut chars = synopsis.char_indices();
    match chars.nth(max_chars) {
        Some((cut, _)) => Some(format!("{}...", &synopsis[..cut])),
        None => Some(synopsis.to_string()),
    }
}

/// "1 Episode" / "12 Episodes"
pub fn episode_count_label(count: Option<u32>) -> Option<String> {
    match count? {
        0 => None,
        1 => Some("1 Episode".to_string()),
        n => Some(format!("{} Episodes", n)),
    }
}

/// Episode title, falling back to its number
pub fn episode_title(episode: &Episode) -> String {
    match (&episode.title, episode.number) {
        (Some(title), _) if !title.is_empty() => title.clone(),
        (_, Some(number)) => format!("Episode {}", number),
        _ => "Episode".to_string(),
    }
}
