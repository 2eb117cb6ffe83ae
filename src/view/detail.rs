use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::view::{HitMap, HitTarget, PANEL_BG, status_span};

pub fn render(frame: &mut Frame, area: Rect, app: &App, hits: &mut HitMap) {
    let Some(plugin) = app.detail.plugin() else {
        return;
    };
    let updating = app.toggles.is_updating(&plugin.id);

    let block = Block::default()
        .title(format!(" {} ", plugin.name))
        .borders(Borders::LEFT)
        .style(Style::default().bg(PANEL_BG));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // body
            Constraint::Length(1), // action
            Constraint::Length(1), // hints
        ])
        .split(inner);

    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" id: {}", plugin.id),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![Span::raw(" "), status_span(plugin.enabled, updating)]),
    ];
    if let Some(reason) = app.toggle_failures.get(&plugin.id) {
        lines.push(Line::from(Span::styled(
            format!(" Last update failed: {reason}"),
            Style::default().fg(Color::Red),
        )));
    }
    lines.extend([
        Line::default(),
        Line::from(Span::raw(format!(
            " {}",
            plugin.description.as_deref().unwrap_or("No description")
        ))),
        Line::default(),
        Line::from(Span::styled(
            format!(" Operations ({})", plugin.operation_count()),
            heading,
        )),
    ]);
    lines.extend(
        plugin
            .operations
            .iter()
            .map(|op| Line::from(format!("   • {op}"))),
    );
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!(" Utilities ({})", plugin.utility_count()),
        heading,
    )));
    lines.extend(
        plugin
            .utilities
            .iter()
            .map(|utility| Line::from(format!("   • {utility}"))),
    );

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(Color::Gray)),
        chunks[0],
    );

    let (label, style) = match (updating, plugin.enabled) {
        (true, _) => (" [t] Updating…", Style::default().fg(Color::DarkGray)),
        (false, true) => (
            " [t] Disable",
            Style::default().fg(Color::Black).bg(Color::Red),
        ),
        (false, false) => (
            " [t] Enable",
            Style::default().fg(Color::Black).bg(Color::Green),
        ),
    };
    frame.render_widget(Paragraph::new(Span::styled(label, style)), chunks[1]);
    if !updating {
        hits.push(chunks[1], HitTarget::Toggle(plugin.id.clone()));
    }

    frame.render_widget(
        Paragraph::new(" Enter: open  Esc: close").style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}
