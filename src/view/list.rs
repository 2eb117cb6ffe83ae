use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};

use crate::app::App;
use crate::view::{HitMap, HitTarget, item_style, status_span};

/// Single-column compact rows.
pub fn render(frame: &mut Frame, area: Rect, app: &App, hits: &mut HitMap) {
    let plugins = app.catalog.plugins();
    let name_width = plugins
        .iter()
        .map(|plugin| plugin.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(32);

    let items: Vec<ListItem> = plugins
        .iter()
        .map(|plugin| {
            let mut name = plugin.name.clone();
            if name.chars().count() > name_width {
                name = name.chars().take(name_width.saturating_sub(1)).collect();
                name.push('…');
            }

            ListItem::new(Line::from(vec![
                Span::raw(format!(" {:<2} ", app.icons.glyph(plugin))),
                Span::raw(format!("{name:<name_width$}  ")),
                status_span(plugin.enabled, app.toggles.is_updating(&plugin.id)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(item_style(true));

    let mut state = ListState::default().with_selected(app.selected_index());
    frame.render_stateful_widget(list, area, &mut state);

    let offset = state.offset();
    for (row, plugin) in plugins.iter().enumerate().skip(offset) {
        let y = area.y + (row - offset) as u16;
        if y >= area.bottom() {
            break;
        }
        hits.push(
            Rect::new(area.x, y, area.width, 1),
            HitTarget::Item(plugin.id.clone()),
        );
    }
}
