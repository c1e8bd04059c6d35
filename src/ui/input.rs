//! Input handling for the TUI.
//!
//! Keys are resolved through the keybinding registry and turned into `Msg`
//! values for the controller, or into purely local UI changes (overlays,
//! theme, search bar focus).

use crate::app::{App, Display, Msg, PageDirection};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::util::{validate_url_for_open, MAX_SEARCH_QUERY_LENGTH};
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::effects::spawn_effects;
use super::Action;

/// Main input dispatch function.
///
/// Overlays capture all keys while visible; the search bar captures text.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    msg_tx: &mpsc::Sender<Msg>,
) -> Action {
    // Shifted letters arrive with SHIFT set; bindings are written as the letter itself
    let modifiers = match code {
        KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
        _ => modifiers,
    };

    if app.show_help {
        handle_help_input(app, code);
        return Action::Continue;
    }

    if app.show_favorites {
        handle_favorites_input(app, code);
        return Action::Continue;
    }

    if app.search_mode {
        handle_search_input(app, code, modifiers, msg_tx);
        return Action::Continue;
    }

    handle_browse_input(app, code, modifiers, msg_tx)
}

/// Dispatch a message and run whatever effects it produced.
pub(super) fn send(app: &mut App, msg: Msg, msg_tx: &mpsc::Sender<Msg>) {
    let effects = app.dispatch(msg);
    spawn_effects(app, effects, msg_tx);
}

/// Handle input while the help overlay is visible.
///
/// j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_favorites_input(app: &mut App, code: KeyCode) {
    if matches!(
        code,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('F') | KeyCode::Enter
    ) {
        app.show_favorites = false;
    }
}

/// Keys while the search bar has focus.
///
/// Every edit re-runs the in-memory filter; the submit key runs a remote lookup.
fn handle_search_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    msg_tx: &mpsc::Sender<Msg>,
) {
    match app
        .keybindings
        .context_action(code, modifiers, KbContext::Search)
    {
        Some(KbAction::SubmitSearch) => {
            app.search_mode = false;
            let query = app.search_input.clone();
            send(app, Msg::SearchSubmitted(query), msg_tx);
            return;
        }
        Some(KbAction::ExitSearch) => {
            app.search_mode = false;
            return;
        }
        _ => {}
    }

    match code {
        KeyCode::Backspace => {
            if app.search_input.pop().is_some() {
                let query = app.search_input.clone();
                send(app, Msg::SearchInput(query), msg_tx);
            }
        }
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            if app.search_input.chars().count() >= MAX_SEARCH_QUERY_LENGTH {
                app.set_status(format!(
                    "Search query at max length ({} chars)",
                    MAX_SEARCH_QUERY_LENGTH
                ));
                return;
            }
            app.search_input.push(c);
            let query = app.search_input.clone();
            send(app, Msg::SearchInput(query), msg_tx);
        }
        _ => {}
    }
}

/// Keys on the card list.
fn handle_browse_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    msg_tx: &mpsc::Sender<Msg>,
) -> Action {
    let action = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Global);

    match action {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::NavDown) => send(app, Msg::SelectNext, msg_tx),
        Some(KbAction::NavUp) => send(app, Msg::SelectPrevious, msg_tx),
        Some(KbAction::PreviousPage) => {
            send(app, Msg::PageChanged(PageDirection::Previous), msg_tx)
        }
        Some(KbAction::NextPage) => send(app, Msg::PageChanged(PageDirection::Next), msg_tx),
        Some(KbAction::ToggleDetail) => {
            if let Some(id) = app.state.selected_entry().map(|e| e.id) {
                send(app, Msg::CardToggled(id), msg_tx);
            }
        }
        Some(KbAction::Favorite) => {
            if let Some(id) = app.state.selected_entry().map(|e| e.id) {
                if app.state.is_favorite(id) {
                    app.set_status("Already in favorites");
                } else {
                    send(app, Msg::FavoriteClicked(id), msg_tx);
                }
            }
        }
        Some(KbAction::EnterSearch) => {
            app.search_mode = true;
        }
        Some(KbAction::SubmitSearch) => {
            let query = app.search_input.clone();
            send(app, Msg::SearchSubmitted(query), msg_tx);
        }
        Some(KbAction::Back) => {
            // Leave any search view and return to the page
            if !app.search_input.is_empty() || app.state.display != Display::Page {
                app.search_input.clear();
                send(app, Msg::SearchInput(String::new()), msg_tx);
            }
        }
        Some(KbAction::ShowFavorites) => {
            app.show_favorites = true;
        }
        Some(KbAction::OpenSprite) => open_selected_sprite(app),
        Some(KbAction::CycleTheme) => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        Some(KbAction::ShowHelp) => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        Some(KbAction::ExitSearch) | None => {}
    }
    Action::Continue
}

fn open_selected_sprite(app: &mut App) {
    let Some(entry) = app.state.selected_entry() else {
        return;
    };
    let url = crate::app::cards::sprite_url(&app.sprite_base_url, entry.id);

    // Only hand http(s) URLs to the system opener
    match validate_url_for_open(&url) {
        Err(e) => app.set_status(e.to_string()),
        Ok(valid) => {
            tracing::debug!(url = %valid, "Opening sprite in browser");
            if let Err(e) = open::that(valid.as_str()) {
                app.set_status(format!("Failed to open browser: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppState;
    use crate::catalog::{CatalogClient, CatalogEntry, CatalogPage};
    use crate::storage::{Database, FavoritesStore};

    async fn loaded_app() -> (App, mpsc::Sender<Msg>, mpsc::Receiver<Msg>) {
        let db = Database::open(":memory:").await.unwrap();
        let catalog = CatalogClient::new(reqwest::Client::new(), "http://127.0.0.1:9").unwrap();
        let mut app = App::new(catalog, FavoritesStore::new(db), AppState::new(1, Vec::new()));
        app.start();
        app.dispatch(Msg::PageLoaded {
            page: 1,
            generation: 1,
            result: Ok(CatalogPage {
                total_count: 40,
                entries: vec![
                    CatalogEntry {
                        id: 1,
                        name: "bulbasaur".into(),
                        detail_url: "http://127.0.0.1:9/pokemon/1/".into(),
                    },
                    CatalogEntry {
                        id: 25,
                        name: "pikachu".into(),
                        detail_url: "http://127.0.0.1:9/pokemon/25/".into(),
                    },
                ],
            }),
        });
        let (tx, rx) = mpsc::channel(16);
        (app, tx, rx)
    }

    fn key(app: &mut App, code: KeyCode, tx: &mpsc::Sender<Msg>) -> Action {
        handle_input(app, code, KeyModifiers::NONE, tx)
    }

    #[tokio::test]
    async fn test_quit() {
        let (mut app, tx, _rx) = loaded_app().await;
        assert!(matches!(key(&mut app, KeyCode::Char('q'), &tx), Action::Quit));
    }

    #[tokio::test]
    async fn test_typing_filters_live() {
        let (mut app, tx, _rx) = loaded_app().await;
        key(&mut app, KeyCode::Char('/'), &tx);
        assert!(app.search_mode);

        key(&mut app, KeyCode::Char('2'), &tx);
        key(&mut app, KeyCode::Char('5'), &tx);
        assert_eq!(app.search_input, "25");
        assert_eq!(app.state.visible_entries().len(), 1);
        assert!(!app.state.pagination_visible);

        key(&mut app, KeyCode::Backspace, &tx);
        key(&mut app, KeyCode::Backspace, &tx);
        assert_eq!(app.state.display, Display::Page);
        assert!(app.state.pagination_visible);
    }

    #[tokio::test]
    async fn test_q_is_text_in_search_bar() {
        let (mut app, tx, _rx) = loaded_app().await;
        key(&mut app, KeyCode::Char('/'), &tx);
        assert!(matches!(key(&mut app, KeyCode::Char('q'), &tx), Action::Continue));
        assert_eq!(app.search_input, "q");
    }

    #[tokio::test]
    async fn test_enter_and_submit_key_start_same_lookup() {
        let (mut app, tx, _rx) = loaded_app().await;
        app.search_input = "pikachu".into();
        key(&mut app, KeyCode::Char('s'), &tx);
        let via_key = app.state.pending_lookup.clone();

        let (mut app, tx, _rx) = loaded_app().await;
        key(&mut app, KeyCode::Char('/'), &tx);
        for c in "pikachu".chars() {
            key(&mut app, KeyCode::Char(c), &tx);
        }
        key(&mut app, KeyCode::Enter, &tx);
        assert!(!app.search_mode);
        assert_eq!(app.state.pending_lookup, via_key);
        assert_eq!(via_key.as_deref(), Some("pikachu"));
    }

    #[tokio::test]
    async fn test_shifted_letter_opens_favorites() {
        let (mut app, tx, _rx) = loaded_app().await;
        handle_input(&mut app, KeyCode::Char('F'), KeyModifiers::SHIFT, &tx);
        assert!(app.show_favorites);
        key(&mut app, KeyCode::Esc, &tx);
        assert!(!app.show_favorites);
    }

    #[tokio::test]
    async fn test_favorite_key_marks_selected() {
        let (mut app, tx, _rx) = loaded_app().await;
        key(&mut app, KeyCode::Char('j'), &tx);
        key(&mut app, KeyCode::Char('f'), &tx);
        assert!(app.state.is_favorite(25));
        assert!(app.state.details.is_empty());
    }

    #[tokio::test]
    async fn test_esc_returns_to_page() {
        let (mut app, tx, _rx) = loaded_app().await;
        key(&mut app, KeyCode::Char('/'), &tx);
        key(&mut app, KeyCode::Char('x'), &tx);
        key(&mut app, KeyCode::Esc, &tx); // leave search bar
        assert!(!app.search_mode);
        assert!(matches!(app.state.display, Display::Filtered(_)));

        key(&mut app, KeyCode::Esc, &tx); // back to page
        assert_eq!(app.state.display, Display::Page);
        assert!(app.search_input.is_empty());
    }
}
