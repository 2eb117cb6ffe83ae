pub mod detail;
pub mod grid;
pub mod list;
pub mod status_bar;
pub mod table;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{App, LoadState};
use crate::model::mode::{Mode, ViewMode};
use crate::plugin::manifest::PluginId;

pub const BG: Color = Color::Rgb(12, 12, 18);
pub const PANEL_BG: Color = Color::Rgb(15, 15, 24);

/// What a screen cell maps back to for pointer input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Item(PluginId),
    Toggle(PluginId),
}

/// Clickable regions recorded during the last draw. Later regions sit on top.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, HitTarget)>,
}

impl HitMap {
    pub fn push(&mut self, area: Rect, target: HitTarget) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, target));
        }
    }

    pub fn hit(&self, x: u16, y: u16) -> Option<&HitTarget> {
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(Position { x, y }))
            .map(|(_, target)| target)
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }
}

/// Draw the entire UI and return the clickable regions.
pub fn draw(frame: &mut Frame, app: &App) -> HitMap {
    let mut hits = HitMap::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // view tabs
            Constraint::Min(1),    // body
            Constraint::Length(1), // status bar
        ])
        .split(frame.area());

    render_tab_bar(frame, chunks[0], app);

    let body = if app.detail.is_open() {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Percentage(35)])
            .split(chunks[1]);
        detail::render(frame, split[1], app, &mut hits);
        split[0]
    } else {
        chunks[1]
    };

    frame.render_widget(Block::default().style(Style::default().bg(BG)), body);

    match &app.load_state {
        LoadState::Idle => render_message(frame, body, "Inactive", Color::DarkGray),
        LoadState::Loading => render_message(frame, body, "Loading plugins…", Color::Gray),
        LoadState::Errored(message) => render_message(
            frame,
            body,
            &format!("Failed to load plugins: {message}\n\nPress r to retry"),
            Color::Red,
        ),
        LoadState::Ready if app.catalog.is_empty() => {
            render_message(frame, body, "No plugins installed", Color::DarkGray)
        }
        LoadState::Ready => match app.selection.view_mode() {
            ViewMode::Grid => grid::render(frame, body, app, &mut hits),
            ViewMode::List => list::render(frame, body, app, &mut hits),
            ViewMode::Table => table::render(frame, body, app, &mut hits),
        },
    }

    status_bar::render(frame, chunks[2], app);

    if app.mode == Mode::Command {
        render_command_overlay(frame, app);
    }

    hits
}

fn render_tab_bar(frame: &mut Frame, area: Rect, app: &App) {
    let active = app.selection.view_mode();
    let mut spans = Vec::new();

    for (idx, mode) in ViewMode::ALL.iter().enumerate() {
        let style = if *mode == active {
            Style::default()
                .bg(Color::Rgb(30, 30, 45))
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::Rgb(18, 18, 28)).fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} {} ", idx + 1, mode.label()), style));
    }

    spans.push(Span::styled(
        "  hjkl: Move  Space: Details  Enter: Open  t: Toggle  v: Layout  +/-: Columns  r: Reload  : Command  q: Quit ",
        Style::default()
            .bg(Color::Rgb(20, 20, 30))
            .fg(Color::DarkGray),
    ));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Rgb(20, 20, 30))),
        area,
    );
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Min(1),
            Constraint::Percentage(40),
        ])
        .split(area);

    let text = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(color).bg(BG));
    frame.render_widget(text, vertical[1]);
}

fn render_command_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 20, frame.area());
    frame.render_widget(Clear, area);

    let prompt = Paragraph::new(format!(":{}", app.command_input)).block(
        Block::default()
            .title(" Command ")
            .borders(Borders::ALL)
            .style(Style::default().bg(PANEL_BG)),
    );
    frame.render_widget(prompt, area);

    let cursor_x = area.x + 2 + app.command_input.chars().count() as u16;
    let cursor_y = area.y + 1;
    frame.set_cursor_position((cursor_x, cursor_y));
}

/// Style for an item, highlighted when selected.
pub(crate) fn item_style(selected: bool) -> Style {
    if selected {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

pub(crate) fn status_span(enabled: bool, updating: bool) -> Span<'static> {
    if updating {
        Span::styled("… updating", Style::default().fg(Color::Yellow))
    } else if enabled {
        Span::styled("● enabled", Style::default().fg(Color::Green))
    } else {
        Span::styled("○ disabled", Style::default().fg(Color::DarkGray))
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
