use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Cell, Row, Table, TableState};

use crate::app::App;
use crate::plugin::manifest::Plugin;
use crate::view::{HitMap, HitTarget, item_style};

/// Width of the leading enable/disable control column.
const CONTROL_WIDTH: u16 = 7;

/// One row per plugin with an inline enable/disable control and capability
/// counts.
pub fn render(frame: &mut Frame, area: Rect, app: &App, hits: &mut HitMap) {
    let plugins = app.catalog.plugins();

    let rows: Vec<Row> = plugins
        .iter()
        .map(|plugin| {
            Row::new(vec![
                Cell::from(control(plugin, app.toggles.is_updating(&plugin.id))),
                Cell::from(plugin.name.clone()),
                Cell::from(plugin.operation_count().to_string()),
                Cell::from(plugin.utility_count().to_string()),
                Cell::from(plugin.description.clone().unwrap_or_default()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(CONTROL_WIDTH),
        Constraint::Percentage(25),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["", "Name", "Ops", "Utils", "Description"])
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD)),
        )
        .style(Style::default().fg(Color::Gray))
        .row_highlight_style(item_style(true));

    let mut state = TableState::default().with_selected(app.selected_index());
    frame.render_stateful_widget(table, area, &mut state);

    // Header takes the first line of the area.
    let offset = state.offset();
    for (row, plugin) in plugins.iter().enumerate().skip(offset) {
        let y = area.y + 1 + (row - offset) as u16;
        if y >= area.bottom() {
            break;
        }
        hits.push(
            Rect::new(area.x, y, area.width, 1),
            HitTarget::Item(plugin.id.clone()),
        );
        hits.push(
            Rect::new(area.x, y, CONTROL_WIDTH.min(area.width), 1),
            HitTarget::Toggle(plugin.id.clone()),
        );
    }
}

fn control(plugin: &Plugin, updating: bool) -> Span<'static> {
    if updating {
        // Control is inert while a write is in flight.
        Span::styled("[ … ]", Style::default().fg(Color::DarkGray))
    } else if plugin.enabled {
        Span::styled("[ on]", Style::default().fg(Color::Green))
    } else {
        Span::styled("[off]", Style::default().fg(Color::Red))
    }
}

#[cfg(test)]
mod tests {
    use crate::app::tests::ready_app;
    use crate::model::mode::ViewMode;
    use crate::msg::Msg;
    use crate::plugin::manifest::PluginId;
    use crate::view::HitTarget;
    use crate::view::testing::render_to_text;

    #[test]
    fn shows_controls_and_counts() {
        let (mut app, _rx) = ready_app(&[("a", "Alpha"), ("b", "Beta")]);
        app.update(Msg::SetViewMode(ViewMode::Table));

        let text = render_to_text(&mut app, 80, 10);

        assert!(text.contains("Name"));
        assert!(text.contains("[off]"));
        assert!(text.contains("Alpha"));
    }

    #[test]
    fn control_cell_maps_to_toggle() {
        let (mut app, _rx) = ready_app(&[("a", "Alpha"), ("b", "Beta")]);
        app.update(Msg::SetViewMode(ViewMode::Table));
        render_to_text(&mut app, 80, 10);

        // Tab bar on row 0, header on row 1, first plugin on row 2.
        assert_eq!(app.hit_map.hit(2, 2), Some(&HitTarget::Toggle(PluginId::new("a"))));
        assert_eq!(app.hit_map.hit(20, 3), Some(&HitTarget::Item(PluginId::new("b"))));
    }
}
