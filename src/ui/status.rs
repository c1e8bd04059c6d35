use crate::app::App;
use crate::keybindings::{Action, Context};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    f.render_widget(
        Paragraph::new(status_text(app)).style(app.style("status_bar")),
        area,
    );
}

fn status_text(app: &App) -> Cow<'_, str> {
    if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(&**msg)
    } else if let Some(query) = &app.state.pending_lookup {
        Cow::Owned(format!("Looking up \"{}\"...", query))
    } else if let Some(page) = app.state.pending_page {
        Cow::Owned(format!("Loading page {}...", page))
    } else if app.search_mode {
        Cow::Owned(key_hints(app, Context::Search, &SEARCH_HINTS).join(" | "))
    } else {
        Cow::Owned(key_hints(app, Context::Global, &BROWSE_HINTS).join(" "))
    }
}

const BROWSE_HINTS: [(Action, &str); 8] = [
    (Action::PreviousPage, "prev"),
    (Action::NextPage, "next"),
    (Action::ToggleDetail, "moves"),
    (Action::Favorite, "favorite"),
    (Action::EnterSearch, "search"),
    (Action::ShowFavorites, "favorites"),
    (Action::ShowHelp, "help"),
    (Action::Quit, "quit"),
];

const SEARCH_HINTS: [(Action, &str); 2] =
    [(Action::SubmitSearch, "look up"), (Action::ExitSearch, "done")];

/// `[key]label` for each action, using the live bindings. Unbound actions are skipped.
fn key_hints(app: &App, context: Context, hints: &[(Action, &str)]) -> Vec<String> {
    hints
        .iter()
        .filter_map(|(action, label)| {
            app.keybindings
                .key_for(context, *action)
                .map(|key| format!("[{}]{}", key, label))
        })
        .collect()
}
