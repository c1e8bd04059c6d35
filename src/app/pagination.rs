//! Page math, the pagination control view model, and page-change handling.

use crate::catalog::{page_offset, CatalogPage, FetchError, PAGE_SIZE};

use super::message::{Effect, PageDirection};
use super::state::{AppState, Display};

/// Listing offset for a 1-based page.
pub fn offset(page: u32) -> u32 {
    page_offset(page)
}

/// `ceil(total_count / PAGE_SIZE)`, saturating at `u32::MAX`.
pub fn total_pages(total_count: u64) -> u32 {
    let pages = total_count.div_ceil(u64::from(PAGE_SIZE));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Pagination region as the terminal layer draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub visible: bool,
    pub previous_enabled: bool,
    pub label: String,
    pub next_enabled: bool,
}

/// Build the pagination controls for the current page state.
///
/// Previous is disabled on page 1 and Next on the last page. An empty
/// catalog has zero pages, so Next is disabled there too. Until the first
/// page arrives the page count is unknown and shown as `…`.
pub fn controls(state: &AppState) -> PaginationView {
    let current = state.page.current_page;
    let pages = total_pages(state.page.total_count);
    let label = if state.page_loaded {
        format!("Page {current} of {pages}")
    } else {
        format!("Page {current} of …")
    };
    PaginationView {
        visible: state.pagination_visible,
        previous_enabled: current > 1,
        label,
        next_enabled: state.page_loaded && current < pages,
    }
}

pub(crate) fn hide(state: &mut AppState) {
    state.pagination_visible = false;
}

pub(crate) fn show(state: &mut AppState) {
    state.pagination_visible = true;
}

/// Step one page back or forward.
///
/// The step is taken from the page already requested, so repeated presses
/// before a response arrives keep moving. Ignored while pagination is hidden,
/// before the first page has loaded, and at either bound.
pub(crate) fn on_page_changed(state: &mut AppState, direction: PageDirection) -> Vec<Effect> {
    if !state.pagination_visible || !state.page_loaded {
        return Vec::new();
    }

    let from = state.pending_page.unwrap_or(state.page.current_page);
    let pages = total_pages(state.page.total_count);
    let target = match direction {
        PageDirection::Previous if from > 1 => from - 1,
        PageDirection::Next if from < pages => from + 1,
        _ => {
            tracing::debug!(page = from, ?direction, "Page change ignored at bound");
            return Vec::new();
        }
    };

    request_page(state, target)
}

/// Issue a fetch for `page`, superseding any page fetch or lookup in flight.
pub(crate) fn request_page(state: &mut AppState, page: u32) -> Vec<Effect> {
    // A lookup answered after this would replace the page the user asked for
    state.lookup_generation += 1;
    state.pending_lookup = None;

    fetch_page(state, page)
}

fn fetch_page(state: &mut AppState, page: u32) -> Vec<Effect> {
    let page = page.max(1);
    state.page_generation += 1;
    state.pending_page = Some(page);

    tracing::debug!(page, generation = state.page_generation, "Requesting page");
    vec![Effect::FetchPage {
        page,
        generation: state.page_generation,
    }]
}

/// Apply a page fetch result.
///
/// Responses from superseded requests are dropped. A successful page always
/// becomes the loaded page; it replaces the card region only in page view,
/// and re-runs an active in-memory filter over the new entries. A page past
/// the end of the catalog is replaced by a fetch of the last page. Failures
/// only take over the card region while it is waiting for a page.
pub(crate) fn on_page_loaded(
    state: &mut AppState,
    page: u32,
    generation: u64,
    result: Result<CatalogPage, FetchError>,
) -> Vec<Effect> {
    if generation != state.page_generation {
        tracing::debug!(
            page,
            generation,
            latest = state.page_generation,
            "Dropping stale page response"
        );
        return Vec::new();
    }
    state.pending_page = None;

    match result {
        Ok(loaded) => {
            let pages = total_pages(loaded.total_count);
            if page > pages && pages > 0 {
                tracing::info!(page, last = pages, "Requested page past the end, loading last page");
                state.page.total_count = loaded.total_count;
                state.notice = Some(format!("Page {page} does not exist, showing page {pages}"));
                return fetch_page(state, pages);
            }

            tracing::debug!(page, entries = loaded.entries.len(), "Page loaded");
            state.page.current_page = page;
            state.page.total_count = loaded.total_count;
            state.page.entries = loaded.entries;
            state.page_loaded = true;

            match state.display {
                Display::Loading | Display::Page | Display::LoadFailed(_) => {
                    state.show(Display::Page);
                }
                Display::Filtered(_) => {
                    if let Some(query) = state.filter_query.clone() {
                        let matches = super::filter::filter_entries(&state.page.entries, &query);
                        state.show(Display::Filtered(matches));
                    }
                }
                Display::SearchResult(_) | Display::NotFound(_) => {}
            }
        }
        Err(e) => {
            tracing::warn!(page, error = %e, "Failed to load page");
            let waiting = matches!(state.display, Display::Loading | Display::LoadFailed(_));
            if !state.page_loaded && waiting {
                state.show(Display::LoadFailed(load_failure_message(&e)));
            }
            state.notice = Some(format!("Could not load page {page}: {e}"));
        }
    }
    Vec::new()
}

fn load_failure_message(error: &FetchError) -> String {
    if error.is_network() {
        "Could not reach the catalog. Check your connection.".to_string()
    } else {
        format!("Could not load the catalog: {error}")
    }
}
