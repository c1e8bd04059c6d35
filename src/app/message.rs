use crate::catalog::{CatalogEntry, CatalogPage, FetchError};
use crate::storage::FavoriteRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Previous,
    Next,
}

/// Everything that can change [`AppState`](super::AppState).
///
/// User intents come from the input layer; the `*Loaded` / `*Completed` /
/// `*Saved` variants carry results of [`Effect`]s back from background tasks.
#[derive(Debug)]
pub enum Msg {
    PageChanged(PageDirection),
    /// Explicit search (submit key or Enter in the search bar).
    SearchSubmitted(String),
    /// Search bar contents after a keystroke.
    SearchInput(String),
    FavoriteClicked(u32),
    CardToggled(u32),
    SelectNext,
    SelectPrevious,

    PageLoaded {
        page: u32,
        generation: u64,
        result: Result<CatalogPage, FetchError>,
    },
    LookupCompleted {
        query: String,
        generation: u64,
        result: Result<CatalogEntry, FetchError>,
    },
    DetailLoaded {
        id: u32,
        result: Result<Vec<String>, FetchError>,
    },
    /// `Ok(true)` written, `Ok(false)` already stored.
    FavoriteSaved {
        record: FavoriteRecord,
        result: Result<bool, String>,
    },
    /// A background task panicked.
    TaskPanicked {
        task: &'static str,
        error: String,
    },
}

/// Side effects requested by `update`, executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPage { page: u32, generation: u64 },
    Lookup { query: String, generation: u64 },
    FetchDetail { id: u32, detail_url: String },
    SaveFavorite(FavoriteRecord),
}
