use crate::app::{App, CardView, DetailView, DisplayRegion, FavoriteControl};
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const FAVORITE_LABEL: &str = "[+ Favorite]";
const SAVED_LABEL: &str = "[* Saved]";

/// Render the card region: either the card list or a single message.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if app.search_mode {
            app.style("panel_border")
        } else {
            app.style("panel_border_focused")
        })
        .title(" Pokédex ");

    match app.card_region() {
        DisplayRegion::Message { text, is_error } => {
            let style = if is_error {
                app.style("message_error")
            } else {
                app.style("detail_loading")
            };
            let paragraph = Paragraph::new(Span::styled(text, style))
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
        }
        DisplayRegion::Cards(cards) => {
            let inner_width = area.width.saturating_sub(2) as usize;
            let selected = cards.iter().position(|c| c.selected);
            let items: Vec<ListItem> = cards
                .iter()
                .map(|card| ListItem::new(card_lines(app, card, inner_width)))
                .collect();

            let list = List::new(items).block(block);
            let mut list_state = ListState::default().with_selected(selected);
            f.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

/// Lines for one card: header, sprite, and the moves list when expanded.
fn card_lines<'a>(app: &App, card: &'a CardView, width: usize) -> Vec<Line<'a>> {
    let name_style = if card.selected {
        app.style("card_selected")
    } else {
        app.style("card_name")
    };
    let (favorite_label, favorite_style) = match card.favorite {
        FavoriteControl::Available => (FAVORITE_LABEL, app.style("favorite_available")),
        FavoriteControl::Saved => (SAVED_LABEL, app.style("favorite_saved")),
    };

    let id_label = format!("  #{}  ", card.id);
    // Leave room for the id and the favorite control on the same line
    let name_budget = width
        .saturating_sub(id_label.len())
        .saturating_sub(favorite_label.len());
    let name = strip_control_chars(&card.display_name);
    let name = truncate_to_width(&name, name_budget).into_owned();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(name, name_style),
            Span::styled(id_label, app.style("card_id")),
            Span::styled(favorite_label, favorite_style),
        ]),
        Line::from(Span::styled(
            format!(
                "  {}",
                truncate_to_width(&card.sprite_url, width.saturating_sub(2))
            ),
            app.style("card_sprite"),
        )),
    ];

    match &card.detail {
        None => {}
        Some(DetailView::Loading) => {
            lines.push(Line::from(Span::styled(
                "  Loading moves...",
                app.style("detail_loading"),
            )));
        }
        Some(DetailView::Expanded(moves)) if moves.is_empty() => {
            lines.push(Line::from(Span::styled(
                "  No moves listed.",
                app.style("detail_loading"),
            )));
        }
        Some(DetailView::Expanded(moves)) => {
            for name in moves {
                let name = strip_control_chars(name);
                lines.push(Line::from(Span::styled(
                    format!(
                        "  - {}",
                        truncate_to_width(&name, width.saturating_sub(4))
                    ),
                    app.style("move_item"),
                )));
            }
        }
    }

    lines.push(Line::from(""));
    lines
}
