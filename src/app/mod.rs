//! Application core: explicit state, messages, and the update function.
//!
//! - [`state`] - `AppState` and the card region's `Display`
//! - [`message`] - `Msg` inputs and `Effect` outputs of `update`
//! - [`pagination`] - page math and pagination controls
//! - [`filter`] - live filter and remote lookup from the search bar
//! - [`cards`] - pure card view models
//! - [`controller`] - `init` / `update` dispatch, favorites and card details
//!
//! [`App`] wraps the core with what only the terminal needs: theme,
//! keybindings, search bar text, overlays and the status line.

pub mod cards;
mod controller;
pub mod filter;
mod message;
pub mod pagination;
mod state;

pub use cards::{
    render as render_cards, CardView, DisplayRegion, FavoriteControl, DEFAULT_SPRITE_BASE_URL,
    NOT_FOUND_MESSAGE,
};
pub use controller::{
    init, update, TASK_FETCH_DETAIL, TASK_FETCH_PAGE, TASK_LOOKUP, TASK_SAVE_FAVORITE,
};
pub use message::{Effect, Msg, PageDirection};
pub use pagination::PaginationView;
pub use state::{AppState, DetailView, Display, PageState};

use crate::catalog::CatalogClient;
use crate::keybindings::KeybindingRegistry;
use crate::storage::FavoritesStore;
use crate::theme::{StyleMap, ThemeVariant};
use ratatui::style::Style;
use std::borrow::Cow;
use tokio::time::Instant;

/// Status messages disappear after this many seconds.
const STATUS_TTL_SECS: u64 = 3;

// ============================================================================
// Application Shell
// ============================================================================

/// Central application state for the terminal UI.
pub struct App {
    /// Controller state. Changed only through [`App::dispatch`].
    pub state: AppState,

    pub catalog: CatalogClient,
    pub favorites_store: FavoritesStore,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    pub keybindings: KeybindingRegistry,

    /// Base URL the card sprites are templated on.
    pub sprite_base_url: String,

    // Search bar
    /// True while keystrokes go to the search bar.
    pub search_mode: bool,
    pub search_input: String,

    // Overlays
    pub show_help: bool,
    pub help_scroll_offset: usize,
    pub show_favorites: bool,

    /// Status message with the time it was set.
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders.
    pub needs_redraw: bool,
}

impl App {
    pub fn new(catalog: CatalogClient, favorites_store: FavoritesStore, state: AppState) -> Self {
        Self {
            state,
            catalog,
            favorites_store,
            theme_variant: ThemeVariant::Dark,
            theme: StyleMap::from_palette(&ThemeVariant::Dark.palette()),
            keybindings: KeybindingRegistry::new(),
            sprite_base_url: DEFAULT_SPRITE_BASE_URL.to_string(),
            search_mode: false,
            search_input: String::new(),
            show_help: false,
            help_scroll_offset: 0,
            show_favorites: false,
            status_message: None,
            needs_redraw: true,
        }
    }

    /// Effects to run before the first frame.
    pub fn start(&mut self) -> Vec<Effect> {
        init(&mut self.state)
    }

    /// Feed one message through [`update`] and surface any notice it left.
    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let effects = update(&mut self.state, msg);
        if let Some(notice) = self.state.notice.take() {
            self.set_status(notice);
        }
        self.needs_redraw = true;
        effects
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Switch to a different theme variant at runtime.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant (Dark → Light → Dark).
    ///
    /// Returns the name of the new theme for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired.
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    /// Card views for the current frame.
    pub fn card_region(&self) -> DisplayRegion {
        render_cards(&self.state, &self.sprite_base_url)
    }

    pub fn pagination(&self) -> PaginationView {
        pagination::controls(&self.state)
    }
}
