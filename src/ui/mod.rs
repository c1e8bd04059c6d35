//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `effects` - Background tasks spawned from `update` effects
//! - `render` - Frame layout, search bar, pagination bar, favorites overlay
//! - `cards` - Card list widget
//! - `status` - Status bar widget
//! - `help` - Keybinding overlay

mod cards;
mod effects;
mod help;
mod input;
mod loop_runner;
mod render;
mod status;

pub use effects::execute_effect;
pub use loop_runner::{run, Action};
