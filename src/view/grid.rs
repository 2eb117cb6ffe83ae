use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::view::{HitMap, HitTarget, status_span};

const CELL_HEIGHT: u16 = 5;

/// Icon-per-item grid, `grid_columns` wide, scrolled so the selected row
/// stays visible.
pub fn render(frame: &mut Frame, area: Rect, app: &App, hits: &mut HitMap) {
    let plugins = app.catalog.plugins();
    let columns = app.selection.columns();
    let selected = app.selected_index();

    let visible_rows = usize::from((area.height / CELL_HEIGHT).max(1));
    let selected_row = selected.unwrap_or(0) / columns;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    let rows = Layout::vertical(vec![Constraint::Length(CELL_HEIGHT); visible_rows]).split(area);
    let column_count = u32::try_from(columns).unwrap_or(u32::MAX);

    for (offset, row_area) in rows.iter().enumerate() {
        let row = first_row + offset;
        let cells =
            Layout::horizontal(vec![Constraint::Ratio(1, column_count); columns]).split(*row_area);

        for (col, cell) in cells.iter().enumerate() {
            let idx = row * columns + col;
            let Some(plugin) = plugins.get(idx) else {
                return;
            };

            let is_selected = selected == Some(idx);
            let border_style = if is_selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(50, 50, 70))
            };

            let glyph_style = if app.icons.has_failed(&plugin.id) {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            };

            let lines = vec![
                Line::from(Span::styled(app.icons.glyph(plugin), glyph_style)),
                Line::from(Span::styled(
                    plugin.name.clone(),
                    Style::default().fg(if is_selected { Color::Cyan } else { Color::Gray }),
                )),
                Line::from(status_span(plugin.enabled, app.toggles.is_updating(&plugin.id))),
            ];

            let tile = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(border_style));
            frame.render_widget(tile, *cell);
            hits.push(*cell, HitTarget::Item(plugin.id.clone()));
        }
    }
}
