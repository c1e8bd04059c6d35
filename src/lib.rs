//! Terminal catalog viewer for the PokeAPI.
//!
//! Pages through the catalog twenty entries at a time, filters the loaded
//! page as you type, looks up single entries by name or number, expands a
//! card's first moves on demand and keeps favorites in a local SQLite store.

pub mod app;
pub mod catalog;
pub mod config;
pub mod keybindings;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod util;
