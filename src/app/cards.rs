//! Card view models built from [`AppState`].
//!
//! Everything here is pure: the terminal layer in `ui::cards` draws the
//! result without looking at the state itself.

use super::state::{AppState, DetailView, Display};
use crate::catalog::CatalogEntry;

/// Default sprite location, one `{id}.png` per entry.
pub const DEFAULT_SPRITE_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

pub const NOT_FOUND_MESSAGE: &str = "Pokémon not found.";
pub const LOADING_MESSAGE: &str = "Loading...";
pub const NO_MATCHES_MESSAGE: &str = "No entries on this page match the filter.";

/// State of a card's favorite control. `Saved` is terminal and disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteControl {
    Available,
    Saved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: u32,
    pub display_name: String,
    pub sprite_url: String,
    pub favorite: FavoriteControl,
    pub detail: Option<DetailView>,
    pub selected: bool,
}

/// Contents of the card region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRegion {
    Cards(Vec<CardView>),
    Message { text: String, is_error: bool },
}

/// First character uppercased, the rest untouched.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn sprite_url(sprite_base: &str, id: u32) -> String {
    format!("{}/{id}.png", sprite_base.trim_end_matches('/'))
}

/// Build one card for `entry`.
pub fn card_view(state: &AppState, entry: &CatalogEntry, sprite_base: &str) -> CardView {
    let favorite = if state.is_favorite(entry.id) {
        FavoriteControl::Saved
    } else {
        FavoriteControl::Available
    };
    CardView {
        id: entry.id,
        display_name: capitalize(&entry.name),
        sprite_url: sprite_url(sprite_base, entry.id),
        favorite,
        detail: state.details.get(&entry.id).cloned(),
        selected: false,
    }
}

/// Render the card region: one card per visible entry in order, or a message.
pub fn render(state: &AppState, sprite_base: &str) -> DisplayRegion {
    match &state.display {
        Display::Loading => DisplayRegion::Message {
            text: LOADING_MESSAGE.to_string(),
            is_error: false,
        },
        Display::NotFound(_) => DisplayRegion::Message {
            text: NOT_FOUND_MESSAGE.to_string(),
            is_error: true,
        },
        Display::LoadFailed(reason) => DisplayRegion::Message {
            text: reason.clone(),
            is_error: true,
        },
        Display::Filtered(entries) if entries.is_empty() => DisplayRegion::Message {
            text: NO_MATCHES_MESSAGE.to_string(),
            is_error: false,
        },
        Display::Page | Display::Filtered(_) | Display::SearchResult(_) => {
            let cards = state
                .visible_entries()
                .iter()
                .enumerate()
                .map(|(index, entry)| CardView {
                    selected: index == state.selected,
                    ..card_view(state, entry, sprite_base)
                })
                .collect();
            DisplayRegion::Cards(cards)
        }
    }
}
