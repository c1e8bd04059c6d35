//! Search bar handling: live in-memory filtering and explicit remote lookup.

use crate::catalog::{CatalogEntry, FetchError};

use super::message::Effect;
use super::pagination;
use super::state::{AppState, Display};

/// Trim and lowercase raw search text.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Entries whose name or decimal id contains `query`, case-insensitively.
///
/// Relative order of `entries` is preserved. An empty query matches everything.
pub fn filter_entries(entries: &[CatalogEntry], query: &str) -> Vec<CatalogEntry> {
    let query = normalize_query(query);
    entries
        .iter()
        .filter(|entry| {
            entry.name.to_lowercase().contains(&query) || entry.id.to_string().contains(&query)
        })
        .cloned()
        .collect()
}

/// Live filter on every keystroke. Never touches the network.
pub(crate) fn on_search_input(state: &mut AppState, raw: &str) -> Vec<Effect> {
    let query = normalize_query(raw);
    if query.is_empty() {
        return restore_page_view(state);
    }

    cancel_lookup(state);
    let matches = filter_entries(&state.page.entries, &query);
    tracing::trace!(query = %query, matches = matches.len(), "Filtering loaded page");
    state.filter_query = Some(query);
    pagination::hide(state);
    state.show(Display::Filtered(matches));
    Vec::new()
}

/// Explicit search: a single remote lookup by exact name or id.
pub(crate) fn on_search_submit(state: &mut AppState, raw: &str) -> Vec<Effect> {
    let query = normalize_query(raw);
    if query.is_empty() {
        return restore_page_view(state);
    }

    state.lookup_generation += 1;
    state.pending_lookup = Some(query.clone());
    state.filter_query = None;
    pagination::hide(state);

    tracing::debug!(query = %query, generation = state.lookup_generation, "Looking up entry");
    vec![Effect::Lookup {
        query,
        generation: state.lookup_generation,
    }]
}

/// Leave search mode and show the loaded page with pagination.
///
/// Fetches only when no page has ever loaded and none is on its way.
pub(crate) fn restore_page_view(state: &mut AppState) -> Vec<Effect> {
    cancel_lookup(state);
    state.filter_query = None;
    pagination::show(state);

    if state.page_loaded {
        state.show(Display::Page);
        return Vec::new();
    }

    state.show(Display::Loading);
    if state.pending_page.is_some() {
        return Vec::new();
    }
    pagination::request_page(state, state.page.current_page)
}

/// Apply a remote lookup result. Stale responses are dropped.
pub(crate) fn on_lookup_completed(
    state: &mut AppState,
    query: String,
    generation: u64,
    result: Result<CatalogEntry, FetchError>,
) -> Vec<Effect> {
    if generation != state.lookup_generation {
        tracing::debug!(query = %query, generation, "Dropping stale lookup response");
        return Vec::new();
    }
    state.pending_lookup = None;
    pagination::hide(state);

    match result {
        Ok(entry) => {
            tracing::debug!(query = %query, id = entry.id, "Lookup matched");
            state.show(Display::SearchResult(entry));
        }
        Err(FetchError::NotFound(_)) => {
            state.show(Display::NotFound(query));
        }
        Err(e) => {
            tracing::warn!(query = %query, error = %e, "Lookup failed");
            state.notice = Some(format!("Search failed: {e}"));
            state.show(Display::NotFound(query));
        }
    }
    Vec::new()
}

fn cancel_lookup(state: &mut AppState) {
    if state.pending_lookup.take().is_some() {
        tracing::debug!("Superseding pending lookup");
    }
    state.lookup_generation += 1;
}
