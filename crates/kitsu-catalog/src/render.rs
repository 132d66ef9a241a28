//! Plain-text rendering of the views for the terminal.

use crate::feed::HomeSections;
use crate::listing::{ListPage, ListingKind, EMPTY_MESSAGE};
use crate::watch::WatchData;
use shared::display::{
    display_title, episode_count_label, episode_title, poster_url, rating_label,
    synopsis_teaser, CARD_SYNOPSIS_CHARS, HERO_SYNOPSIS_CHARS,
};
use shared::{CatalogItem, FetchState};
use std::fmt::Write;

/// One catalog entry as a short card
pub fn card(item: &CatalogItem) -> String {
    let mut out = String::new();
    let _ = write!(out, "[{}] {}", item.id, display_title(item));

    let rating = rating_label(item.average_rating.as_deref());
    if rating != shared::display::RATING_UNAVAILABLE {
        let _ = write!(out, "  ★ {}", rating);
    }
    if let Some(kind) = &item.show_type {
        let _ = write!(out, "  {}", kind);
    }
    if let Some(episodes) = episode_count_label(item.episode_count) {
        let _ = write!(out, "  {}", episodes);
    }
    if let Some(teaser) = synopsis_teaser(item.synopsis.as_deref(), CARD_SYNOPSIS_CHARS) {
        let _ = write!(out, "\n    {}", teaser);
    }
    out
}

fn hero(item: &CatalogItem) -> String {
    let mut out = format!("» {}", display_title(item));
    if let Some(teaser) = synopsis_teaser(item.synopsis.as_deref(), HERO_SYNOPSIS_CHARS) {
        let _ = write!(out, "\n  {}", teaser);
    }
    if let Some(url) = item
        .cover
        .as_ref()
        .and_then(|c| c.large.as_deref().or(c.original.as_deref()))
        .or(poster_url(item))
    {
        let _ = write!(out, "\n  {}", url);
    }
    out
}

/// Render any fetch state, delegating ready data to `ready`
pub fn state<T>(title: &str, state: &FetchState<T>, ready: impl Fn(&T) -> String) -> String {
    match state {
        FetchState::Loading => format!("{}\n  Loading...", title),
        FetchState::Error(message) => format!("{}\n  Error: {}", title, message),
        FetchState::Ready(data) => ready(data),
    }
}

pub fn home(sections: &HomeSections) -> String {
    let mut out = String::new();
    for item in sections.hero() {
        let _ = writeln!(out, "{}\n", hero(item));
    }
    for kind in ListingKind::ALL {
        let _ = writeln!(out, "== {} ==", kind.title());
        let items = sections.section(kind);
        if items.is_empty() {
            let _ = writeln!(out, "  {}", EMPTY_MESSAGE);
        }
        for item in items {
            let _ = writeln!(out, "{}", card(item));
        }
        out.push('\n');
    }
    out
}

pub fn list_page(title: &str, page: &ListPage) -> String {
    let mut out = format!("== {} ==\n", title);
    if page.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_MESSAGE);
        return out;
    }
    for item in &page.items {
        let _ = writeln!(out, "{}", card(item));
    }

    let p = &page.pagination;
    let _ = write!(out, "\nPage {} of {}", p.current_page, p.total_pages);
    if p.has_previous_page {
        let _ = write!(out, "  (previous: --page {})", p.current_page - 1);
    }
    if p.has_next_page {
        let _ = write!(out, "  (next: --page {})", p.current_page + 1);
    }
    out.push('\n');
    out
}

pub fn watch(data: &WatchData) -> String {
    let mut out = format!("== {} ==\n", display_title(&data.anime));
    if let Some(number) = data.redirected_to {
        let _ = writeln!(out, "(requested episode not found, showing episode {})", number);
    }

    let current = data.current_episode();
    let _ = writeln!(out, "Now playing: {}", episode_title(current));
    if let Some(date) = current.air_date {
        let _ = writeln!(out, "  Aired: {}", date.format("%B %-d, %Y"));
    }
    if let Some(minutes) = current.duration_minutes {
        let _ = writeln!(out, "  Duration: {} min", minutes);
    }
    match &current.synopsis {
        Some(synopsis) => {
            let _ = writeln!(out, "  {}", synopsis);
        }
        None => {
            let _ = writeln!(out, "  No synopsis available for this episode.");
        }
    }

    let _ = writeln!(out, "\nEpisodes:");
    for episode in &data.episodes {
        let marker = if episode.id == current.id { '▶' } else { ' ' };
        let _ = writeln!(out, " {} {}", marker, episode_title(episode));
    }
    out
}

pub fn related(items: &[CatalogItem]) -> String {
    let mut out = String::from("== Related Anime ==\n");
    if items.is_empty() {
        let _ = writeln!(out, "No related anime found.");
    }
    for item in items {
        let _ = writeln!(out, "{}", card(item));
    }
    out
}
