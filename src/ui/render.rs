//! Frame layout and the smaller widgets: search bar, pagination bar and
//! the favorites overlay.

use crate::app::{App, PaginationView};
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{cards, help, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let pagination = app.pagination();
    // The pagination row disappears entirely in search mode
    let pagination_height = if pagination.visible { 1 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(pagination_height),
            Constraint::Length(1),
        ])
        .split(area);

    render_search_bar(f, app, chunks[0]);
    cards::render(f, app, chunks[1]);
    if pagination.visible {
        f.render_widget(
            Paragraph::new(pagination_line(app, &pagination)).alignment(Alignment::Center),
            chunks[2],
        );
    }
    status::render(f, app, chunks[3]);

    if app.show_favorites {
        render_favorites_overlay(f, app);
    }
    if app.show_help {
        help::render(f, app);
    }
}

fn render_search_bar(f: &mut Frame, app: &App, area: Rect) {
    let (border_style, text) = if app.search_mode {
        (app.style("search_active"), format!("{}_", app.search_input))
    } else if app.search_input.is_empty() {
        (
            app.style("search_idle"),
            "Press / to search by name or number".to_string(),
        )
    } else {
        (app.style("search_idle"), app.search_input.clone())
    };

    let width = area.width.saturating_sub(2) as usize;
    let paragraph = Paragraph::new(truncate_to_width(&text, width).into_owned()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Search "),
    );
    f.render_widget(paragraph, area);
}

/// `[< Prev]  Page X of Y  [Next >]` with disabled buttons dimmed.
pub(super) fn pagination_line(app: &App, view: &PaginationView) -> Line<'static> {
    let button_style = |enabled: bool| {
        if enabled {
            app.style("pagination_enabled")
        } else {
            app.style("pagination_disabled")
        }
    };
    Line::from(vec![
        Span::styled("[< Prev]", button_style(view.previous_enabled)),
        Span::styled(format!("  {}  ", view.label), app.style("pagination_label")),
        Span::styled("[Next >]", button_style(view.next_enabled)),
    ])
}

/// Lines listed in the favorites overlay, in save order.
pub(super) fn favorites_lines(app: &App) -> Vec<String> {
    if app.state.favorites.is_empty() {
        return vec!["No favorites saved.".to_string()];
    }
    app.state
        .favorites
        .iter()
        .map(|record| format!("{} - {}", record.id, strip_control_chars(&record.name)))
        .collect()
}

fn render_favorites_overlay(f: &mut Frame, app: &App) {
    let overlay = centered_rect(50, 70, f.area());
    if overlay.width < 20 || overlay.height < 5 {
        return;
    }

    f.render_widget(Clear, overlay);

    let lines: Vec<Line> = favorites_lines(app).into_iter().map(Line::from).collect();
    let title = format!(" Favorites ({}) ", app.state.favorites.len());
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(title),
        )
        .style(app.style("overlay_body"));
    f.render_widget(paragraph, overlay);
}

/// Create a centered rectangle with the given percentage of the parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
