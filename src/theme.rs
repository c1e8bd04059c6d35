//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Cards --
    pub card_name: Style,
    pub card_selected: Style,
    pub card_id: Style,
    pub card_sprite: Style,
    pub favorite_available: Style,
    pub favorite_saved: Style,
    pub move_item: Style,
    pub detail_loading: Style,
    pub message_error: Style,

    // -- Pagination --
    pub pagination_enabled: Style,
    pub pagination_disabled: Style,
    pub pagination_label: Style,

    // -- Search bar --
    pub search_idle: Style,
    pub search_active: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,

    // -- Overlays --
    pub overlay_heading: Style,
    pub overlay_body: Style,
    pub overlay_metadata: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            card_name: Style::default().add_modifier(Modifier::BOLD),
            card_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            card_id: Style::default().fg(Color::DarkGray),
            card_sprite: Style::default().fg(Color::Blue),
            favorite_available: Style::default().fg(Color::Yellow),
            favorite_saved: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            move_item: Style::default().fg(Color::Cyan),
            detail_loading: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            message_error: Style::default().fg(Color::Red),

            pagination_enabled: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            pagination_disabled: Style::default().fg(Color::DarkGray),
            pagination_label: Style::default(),

            search_idle: Style::default().fg(Color::DarkGray),
            search_active: Style::default().fg(Color::Yellow),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),

            overlay_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            overlay_body: Style::default(),
            overlay_metadata: Style::default().fg(Color::DarkGray),
        }
    }

    /// Adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            card_name: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_selected: Style::default().bg(Color::Blue).fg(Color::White),
            card_id: Style::default().fg(Color::DarkGray),
            card_sprite: Style::default().fg(Color::Blue),
            favorite_available: Style::default().fg(Color::Magenta),
            favorite_saved: Style::default().fg(Color::Gray),
            move_item: Style::default().fg(Color::Blue),
            detail_loading: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            message_error: Style::default().fg(Color::Red),

            pagination_enabled: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            pagination_disabled: Style::default().fg(Color::Gray),
            pagination_label: Style::default().fg(Color::Black),

            search_idle: Style::default().fg(Color::DarkGray),
            search_active: Style::default().fg(Color::Magenta),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),

            overlay_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            overlay_body: Style::default().fg(Color::Black),
            overlay_metadata: Style::default().fg(Color::DarkGray),
        }
    }
}

// ============================================================================
// Style Map: string-keyed lookup for render code
// ============================================================================

/// String-keyed style lookup.
///
/// Built from a `ColorPalette`, this allows resolving role names (e.g.
/// `"favorite_saved"`) to their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 20] = [
    "card_name",
    "card_selected",
    "card_id",
    "card_sprite",
    "favorite_available",
    "favorite_saved",
    "move_item",
    "detail_loading",
    "message_error",
    "pagination_enabled",
    "pagination_disabled",
    "pagination_label",
    "search_idle",
    "search_active",
    "status_bar",
    "panel_border",
    "panel_border_focused",
    "overlay_heading",
    "overlay_body",
    "overlay_metadata",
];

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 20] = [
            p.card_name,
            p.card_selected,
            p.card_id,
            p.card_sprite,
            p.favorite_available,
            p.favorite_saved,
            p.move_item,
            p.detail_loading,
            p.message_error,
            p.pagination_enabled,
            p.pagination_disabled,
            p.pagination_label,
            p.search_idle,
            p.search_active,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
            p.overlay_heading,
            p.overlay_body,
            p.overlay_metadata,
        ];

        let mut map = HashMap::with_capacity(ROLE_NAMES.len());
        for (name, style) in ROLE_NAMES.iter().zip(styles.iter()) {
            map.insert(*name, *style);
        }

        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
