use std::collections::HashMap;

use crate::catalog::CatalogEntry;
use crate::storage::FavoriteRecord;

/// The remote page most recently fetched successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    /// 1-based page number.
    pub current_page: u32,
    pub total_count: u64,
    pub entries: Vec<CatalogEntry>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_count: 0,
            entries: Vec::new(),
        }
    }
}

/// What the card region currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Display {
    /// No page has arrived yet.
    Loading,
    /// The loaded remote page.
    Page,
    /// In-memory subset of the loaded page.
    Filtered(Vec<CatalogEntry>),
    /// Single entry from a remote lookup.
    SearchResult(CatalogEntry),
    /// A remote lookup failed for this query.
    NotFound(String),
    /// The first page could not be loaded.
    LoadFailed(String),
}

/// Expanded moves list under one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    Loading,
    Expanded(Vec<String>),
}

/// All state owned by the controller.
///
/// Mutated only through [`crate::app::update`]; the terminal layer reads it
/// to build view models.
#[derive(Debug, Clone)]
pub struct AppState {
    pub page: PageState,
    pub display: Display,
    pub pagination_visible: bool,
    /// Mirror of the persisted favorites, in insertion order.
    pub favorites: Vec<FavoriteRecord>,
    /// Per-card detail views keyed by entry id. Discarded on every re-render.
    pub details: HashMap<u32, DetailView>,
    /// Index into `visible_entries()`.
    pub selected: usize,
    /// True once any page fetch has succeeded.
    pub page_loaded: bool,
    /// Page requested but not yet arrived.
    pub pending_page: Option<u32>,
    /// Normalized query of the active in-memory filter.
    pub filter_query: Option<String>,
    /// Query of the remote lookup in flight.
    pub pending_lookup: Option<String>,
    /// One-shot message for the status bar, taken by the terminal layer.
    pub notice: Option<String>,
    pub(crate) page_generation: u64,
    pub(crate) lookup_generation: u64,
}

impl AppState {
    /// Fresh state that will start on `start_page` once the first fetch lands.
    pub fn new(start_page: u32, favorites: Vec<FavoriteRecord>) -> Self {
        Self {
            page: PageState {
                current_page: start_page.max(1),
                ..PageState::default()
            },
            display: Display::Loading,
            pagination_visible: true,
            favorites,
            details: HashMap::new(),
            selected: 0,
            page_loaded: false,
            pending_page: None,
            filter_query: None,
            pending_lookup: None,
            notice: None,
            page_generation: 0,
            lookup_generation: 0,
        }
    }

    /// Entries the card region is showing right now, in display order.
    pub fn visible_entries(&self) -> &[CatalogEntry] {
        match &self.display {
            Display::Page => &self.page.entries,
            Display::Filtered(entries) => entries,
            Display::SearchResult(entry) => std::slice::from_ref(entry),
            Display::Loading | Display::NotFound(_) | Display::LoadFailed(_) => &[],
        }
    }

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.visible_entries().get(self.selected)
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.iter().any(|f| f.id == id)
    }

    /// True while any network request started by the user is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending_page.is_some() || self.pending_lookup.is_some()
    }

    /// Replace the card region wholesale.
    ///
    /// Cards are rebuilt from scratch, so every open detail view goes away.
    pub(crate) fn show(&mut self, display: Display) {
        self.display = display;
        self.details.clear();
        self.selected = 0;
    }

    pub(crate) fn select_next(&mut self) {
        let len = self.visible_entries().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub(crate) fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
