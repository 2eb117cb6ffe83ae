use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, LoadState};
use crate::model::mode::{Mode, ViewMode};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mode_style = match app.mode {
        Mode::Normal => Style::default()
            .fg(Color::Black)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        Mode::Command => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    };
    let mode_span = Span::styled(format!(" {} ", app.mode.label()), mode_style);

    let state = match &app.load_state {
        LoadState::Idle => "inactive".to_string(),
        LoadState::Loading => "loading".to_string(),
        LoadState::Errored(_) => "error".to_string(),
        LoadState::Ready => format!(
            "{} plugins, {} enabled",
            app.catalog.len(),
            app.catalog.enabled_count()
        ),
    };

    let mut suffix = String::new();
    let in_flight = app.toggles.in_flight();
    if in_flight > 0 {
        suffix.push_str(&format!(" | {in_flight} updating"));
    }
    let failed = app.toggle_failures.len();
    if failed > 0 {
        suffix.push_str(&format!(" | {failed} failed"));
    }
    if app.selection.view_mode() == ViewMode::Grid {
        suffix.push_str(&format!(" | {} cols", app.selection.grid_columns()));
    }
    if let Some(notice) = app.current_notice() {
        suffix.push_str(&format!(" | {notice}"));
    }

    let info = Span::styled(
        format!(
            " {} | {state}{suffix} ",
            app.selection.view_mode().label()
        ),
        Style::default().fg(Color::Gray).bg(Color::DarkGray),
    );

    let bar = Line::from(vec![mode_span, info]);
    let status = Paragraph::new(bar).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
