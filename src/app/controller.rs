//! The single update function over [`AppState`].

use crate::catalog::FetchError;
use crate::storage::FavoriteRecord;

use super::filter;
use super::message::{Effect, Msg};
use super::pagination;
use super::state::{AppState, DetailView};

// Task names carried by `Msg::TaskPanicked`.
pub const TASK_FETCH_PAGE: &str = "fetch_page";
pub const TASK_LOOKUP: &str = "lookup";
pub const TASK_FETCH_DETAIL: &str = "fetch_detail";
pub const TASK_SAVE_FAVORITE: &str = "save_favorite";

/// Effects to run at startup: fetch the starting page.
pub fn init(state: &mut AppState) -> Vec<Effect> {
    pagination::request_page(state, state.page.current_page)
}

/// Apply one message and return the effects it requests.
pub fn update(state: &mut AppState, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::PageChanged(direction) => pagination::on_page_changed(state, direction),
        Msg::SearchSubmitted(query) => filter::on_search_submit(state, &query),
        Msg::SearchInput(query) => filter::on_search_input(state, &query),
        Msg::FavoriteClicked(id) => on_favorite_clicked(state, id),
        Msg::CardToggled(id) => on_card_toggled(state, id),
        Msg::SelectNext => {
            state.select_next();
            Vec::new()
        }
        Msg::SelectPrevious => {
            state.select_previous();
            Vec::new()
        }
        Msg::PageLoaded {
            page,
            generation,
            result,
        } => pagination::on_page_loaded(state, page, generation, result),
        Msg::LookupCompleted {
            query,
            generation,
            result,
        } => filter::on_lookup_completed(state, query, generation, result),
        Msg::DetailLoaded { id, result } => on_detail_loaded(state, id, result),
        Msg::FavoriteSaved { record, result } => on_favorite_saved(state, record, result),
        Msg::TaskPanicked { task, error } => on_task_panicked(state, task, &error),
    }
}

// ============================================================================
// Favorites
// ============================================================================

/// Mark a visible entry as favorite.
///
/// The control flips to saved immediately; the write happens in the
/// background. Already-saved entries are ignored.
fn on_favorite_clicked(state: &mut AppState, id: u32) -> Vec<Effect> {
    if state.is_favorite(id) {
        return Vec::new();
    }
    let Some(entry) = state.visible_entries().iter().find(|e| e.id == id) else {
        tracing::debug!(id, "Favorite for entry not on screen ignored");
        return Vec::new();
    };

    let record = FavoriteRecord {
        id: entry.id,
        name: entry.name.clone(),
    };
    state.favorites.push(record.clone());
    vec![Effect::SaveFavorite(record)]
}

fn on_favorite_saved(
    state: &mut AppState,
    record: FavoriteRecord,
    result: Result<bool, String>,
) -> Vec<Effect> {
    match result {
        Ok(true) => {
            state.notice = Some(format!("Saved {} to favorites", record.name));
        }
        Ok(false) => {}
        Err(e) => {
            tracing::error!(id = record.id, error = %e, "Failed to save favorite");
            state.favorites.retain(|f| f.id != record.id);
            state.notice = Some(format!("Could not save {}: {e}", record.name));
        }
    }
    Vec::new()
}

// ============================================================================
// Card Details
// ============================================================================

/// Expand or collapse the moves list under a card.
///
/// Collapsing never touches the network. Expanding always fetches again.
fn on_card_toggled(state: &mut AppState, id: u32) -> Vec<Effect> {
    if state.details.remove(&id).is_some() {
        tracing::trace!(id, "Collapsed card");
        return Vec::new();
    }
    let Some(entry) = state.visible_entries().iter().find(|e| e.id == id) else {
        return Vec::new();
    };

    let detail_url = entry.detail_url.clone();
    state.details.insert(id, DetailView::Loading);
    vec![Effect::FetchDetail { id, detail_url }]
}

fn on_detail_loaded(
    state: &mut AppState,
    id: u32,
    result: Result<Vec<String>, FetchError>,
) -> Vec<Effect> {
    // Collapsed or re-rendered while the request was out
    if state.details.get(&id) != Some(&DetailView::Loading) {
        tracing::debug!(id, "Dropping detail for collapsed card");
        return Vec::new();
    }

    match result {
        Ok(moves) => {
            state.details.insert(id, DetailView::Expanded(moves));
        }
        Err(e) => {
            tracing::warn!(id, error = %e, "Failed to load detail");
            state.details.remove(&id);
            state.notice = Some(format!("Could not load moves for #{id}: {e}"));
        }
    }
    Vec::new()
}

// ============================================================================
// Task Failures
// ============================================================================

/// Release whatever the panicked task was holding so the UI stays usable.
fn on_task_panicked(state: &mut AppState, task: &str, error: &str) -> Vec<Effect> {
    tracing::error!(task, error, "Background task panicked");
    match task {
        TASK_FETCH_PAGE => state.pending_page = None,
        TASK_LOOKUP => state.pending_lookup = None,
        TASK_FETCH_DETAIL => state
            .details
            .retain(|_, detail| *detail != DetailView::Loading),
        _ => {}
    }
    state.notice = Some(format!("Internal error in {task}"));
    Vec::new()
}
