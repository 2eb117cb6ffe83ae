use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;

use crate::error::{GatewayError, ToggleError};
use crate::model::config::AppConfig;
use crate::model::detail::DetailPanel;
use crate::model::icons::IconStore;
use crate::model::mode::{Mode, ViewMode};
use crate::model::selection::Selection;
use crate::msg::{Direction, Msg};
use crate::plugin::gateway::action_name;
use crate::plugin::host::{HostShell, OpenEvent};
use crate::plugin::toggle::ToggleOutcome;
use crate::plugin::worker::{self, Activation};
use crate::plugin::{Plugin, PluginCatalog, PluginGateway, PluginId, ToggleController};
use crate::view::{self, HitMap, HitTarget};

const MAX_NOTIFICATIONS: usize = 8;
const NOTICE_TTL: Duration = Duration::from_secs(4);
const HELP: &str = "grid | list | table | columns <n> | detail <id> | open <id> | enable <id> | disable <id> | reload | q";

/// Lifecycle of the plugin set for the current activation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No activation running.
    #[default]
    Idle,
    Loading,
    Ready,
    /// Terminal for this activation; leaving it takes a re-activation.
    Errored(String),
}

pub struct App {
    pub mode: Mode,
    pub load_state: LoadState,
    pub catalog: PluginCatalog,
    pub selection: Selection,
    pub toggles: ToggleController,
    pub detail: DetailPanel,
    pub icons: IconStore,
    pub should_quit: bool,
    pub notifications: VecDeque<String>,
    /// Last rejected write per plugin, cleared by a later successful one.
    pub toggle_failures: HashMap<PluginId, String>,
    pub(crate) command_input: String,
    pub(crate) hit_map: HitMap,
    gateway: Arc<dyn PluginGateway>,
    host: Box<dyn HostShell>,
    event_tx: mpsc::Sender<Msg>,
    activation: Option<Activation>,
    generation: u64,
    double_click: Duration,
    last_click: Option<((u16, u16), PluginId, Instant)>,
    notice_until: Option<Instant>,
}

impl App {
    pub fn new(
        config: &AppConfig,
        gateway: Arc<dyn PluginGateway>,
        host: Box<dyn HostShell>,
        event_tx: mpsc::Sender<Msg>,
    ) -> Self {
        Self {
            mode: Mode::Normal,
            load_state: LoadState::Idle,
            catalog: PluginCatalog::default(),
            selection: Selection::new(config.view.default_mode, config.view.grid_columns),
            toggles: ToggleController::default(),
            detail: DetailPanel::default(),
            icons: IconStore::new(config.icons_dir()),
            should_quit: false,
            notifications: VecDeque::new(),
            toggle_failures: HashMap::new(),
            command_input: String::new(),
            hit_map: HitMap::default(),
            gateway,
            host,
            event_tx,
            activation: None,
            generation: 0,
            double_click: Duration::from_millis(config.view.double_click_ms),
            last_click: None,
            notice_until: None,
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Start a fresh activation and issue its single load.
    pub fn activate(&mut self) {
        self.deactivate();

        self.generation += 1;
        let activation = Activation::new(self.generation);
        self.load_state = LoadState::Loading;
        tracing::info!("activation {}: loading plugins", self.generation);

        worker::spawn_load(
            Arc::clone(&self.gateway),
            activation.clone(),
            self.event_tx.clone(),
        );
        self.activation = Some(activation);
    }

    /// Cancel pending I/O and discard all plugin state.
    pub fn deactivate(&mut self) {
        if let Some(activation) = self.activation.take() {
            activation.cancel();
            tracing::debug!("activation {} cancelled", activation.generation());
        }

        self.catalog.clear();
        self.selection.clear();
        self.toggles.reset();
        self.toggle_failures.clear();
        self.detail.close();
        self.icons.reset();
        self.hit_map.clear();
        self.last_click = None;
        self.load_state = LoadState::Idle;
    }

    fn accepts(&self, activation: &Activation) -> bool {
        self.activation
            .as_ref()
            .is_some_and(|current| current.accepts(activation))
    }

    fn quit(&mut self) {
        self.deactivate();
        self.should_quit = true;
    }

    // ── MVU: Update ──────────────────────────────────────────────

    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Key(key) => self.handle_key(key),
            Msg::Mouse(mouse) => self.handle_mouse(mouse),
            Msg::Resize(width, height) => tracing::debug!("resized to {width}x{height}"),
            Msg::Move(direction) => self.move_selection(direction),
            Msg::Select(id) => self.select(id),
            Msg::Open(id) => self.open(id),
            Msg::CloseDetail => self.detail.close(),
            Msg::SetViewMode(mode) => self.selection.set_view_mode(mode),
            Msg::SetEnabled(id, desired) => self.set_enabled(id, desired),
            Msg::Command(command) => self.handle_command(command),
            Msg::PluginsLoaded { activation, result } => {
                self.handle_plugins_loaded(activation, result)
            }
            Msg::ToggleFinished {
                activation,
                id,
                desired,
                result,
            } => self.handle_toggle_finished(activation, id, desired, result),
            Msg::Reload => self.activate(),
            Msg::Tick => self.handle_tick(),
            Msg::Quit => self.quit(),
        }
    }

    fn handle_plugins_loaded(
        &mut self,
        activation: Activation,
        result: Result<Vec<Plugin>, GatewayError>,
    ) {
        if !self.accepts(&activation) {
            tracing::debug!(
                "discarding plugin list from stale activation {}",
                activation.generation()
            );
            return;
        }

        match result {
            Ok(plugins) => {
                self.catalog.replace(plugins);
                self.icons.prime(self.catalog.plugins());
                let ids = self.catalog.ids();
                self.selection.reconcile(&ids);
                self.load_state = LoadState::Ready;
                tracing::info!("loaded {} plugins", self.catalog.len());
            }
            Err(err) => {
                tracing::error!("failed to load plugins: {err}");
                self.catalog.clear();
                self.selection.clear();
                self.load_state = LoadState::Errored(err.to_string());
            }
        }
    }

    fn handle_toggle_finished(
        &mut self,
        activation: Activation,
        id: PluginId,
        desired: bool,
        result: Result<(), GatewayError>,
    ) {
        if !self.accepts(&activation) {
            tracing::debug!("discarding toggle result for {id} from stale activation");
            return;
        }

        let outcome = self
            .toggles
            .settle(&mut self.catalog, &mut self.detail, &id, desired, result);
        match outcome {
            ToggleOutcome::Failed(reason) => {
                self.toggle_failures.insert(id, reason);
            }
            ToggleOutcome::Committed | ToggleOutcome::Vanished => {
                self.toggle_failures.remove(&id);
            }
        }
    }

    fn handle_tick(&mut self) {
        if self
            .notice_until
            .is_some_and(|until| Instant::now() >= until)
        {
            self.notice_until = None;
        }
    }

    // ── Selection & navigation ───────────────────────────────────

    /// Select `id` and bind the detail panel to it.
    pub fn select(&mut self, id: PluginId) {
        let Some(plugin) = self.catalog.get(&id) else {
            self.notify_not_found(&id);
            return;
        };

        self.detail.open(plugin);
        self.selection.select(id);
    }

    /// Ask the host shell to open `id`. Selection is left alone.
    pub fn open(&mut self, id: PluginId) {
        let Some(plugin) = self.catalog.get(&id) else {
            self.notify_not_found(&id);
            return;
        };

        let event = OpenEvent::for_plugin(plugin);
        if self.selection.selected() == Some(&id) {
            self.detail.open(plugin);
        }
        self.host.open(&event);
    }

    fn move_selection(&mut self, direction: Direction) {
        let ids = self.catalog.ids();
        if self.selection.move_selection(direction, &ids) && self.detail.is_open() {
            // Keep the open panel bound to the selection.
            if let Some(plugin) = self
                .selection
                .selected()
                .and_then(|id| self.catalog.get(id))
            {
                self.detail.open(plugin);
            }
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection
            .selected()
            .and_then(|id| self.catalog.position(id))
    }

    fn adjust_columns(&mut self, delta: isize) {
        let columns = self.selection.grid_columns().saturating_add_signed(delta);
        self.selection.set_grid_columns(columns);
    }

    // ── Toggles ──────────────────────────────────────────────────

    /// Request `enabled = desired` for `id`. Ignored while a write for the
    /// same plugin is in flight.
    pub fn set_enabled(&mut self, id: PluginId, desired: bool) {
        if self.load_state != LoadState::Ready {
            tracing::debug!("ignoring toggle for {id}: plugins not loaded");
            return;
        }
        let Some(activation) = self.activation.clone() else {
            return;
        };

        match self.toggles.begin(&self.catalog, &id) {
            Ok(()) => {
                tracing::debug!("{} {id}", action_name(desired));
                worker::spawn_toggle(
                    Arc::clone(&self.gateway),
                    activation,
                    id,
                    desired,
                    self.event_tx.clone(),
                );
            }
            Err(ToggleError::NotFound(id)) => self.notify_not_found(&id),
            Err(err) => tracing::debug!("toggle ignored: {err}"),
        }
    }

    fn toggle_plugin(&mut self, id: PluginId) {
        match self.catalog.get(&id).map(|plugin| !plugin.enabled) {
            Some(desired) => self.update(Msg::SetEnabled(id, desired)),
            None => self.notify_not_found(&id),
        }
    }

    /// `t`: the detail panel's plugin, or the selected table row.
    fn toggle_focused(&mut self) {
        let target = match self.detail.bound_id() {
            Some(id) => Some(id.clone()),
            None if self.selection.view_mode() == ViewMode::Table => {
                self.selection.selected().cloned()
            }
            None => None,
        };

        if let Some(id) = target {
            self.toggle_plugin(id);
        }
    }

    // ── Input ────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        match self.mode {
            Mode::Normal => self.handle_key_normal(key),
            Mode::Command => self.handle_key_command(key),
        }
    }

    fn handle_key_normal(&mut self, key: KeyEvent) {
        let msg = match key.code {
            KeyCode::Char('q') => Msg::Quit,
            KeyCode::Char(':') => {
                self.mode = Mode::Command;
                self.command_input.clear();
                return;
            }
            KeyCode::Char('h') | KeyCode::Left => Msg::Move(Direction::Left),
            KeyCode::Char('j') | KeyCode::Down => Msg::Move(Direction::Down),
            KeyCode::Char('k') | KeyCode::Up => Msg::Move(Direction::Up),
            KeyCode::Char('l') | KeyCode::Right => Msg::Move(Direction::Right),
            KeyCode::Char('g') | KeyCode::Home => Msg::Move(Direction::Home),
            KeyCode::Char('G') | KeyCode::End => Msg::Move(Direction::End),
            KeyCode::Char(' ') => match self.selection.selected() {
                Some(id) => Msg::Select(id.clone()),
                None => return,
            },
            KeyCode::Enter => match self.selection.selected() {
                Some(id) => Msg::Open(id.clone()),
                None => return,
            },
            KeyCode::Esc => Msg::CloseDetail,
            KeyCode::Char('t') => {
                self.toggle_focused();
                return;
            }
            KeyCode::Char('1') => Msg::SetViewMode(ViewMode::Grid),
            KeyCode::Char('2') => Msg::SetViewMode(ViewMode::List),
            KeyCode::Char('3') => Msg::SetViewMode(ViewMode::Table),
            KeyCode::Char('v') => Msg::SetViewMode(self.selection.view_mode().next()),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.adjust_columns(1);
                return;
            }
            KeyCode::Char('-') => {
                self.adjust_columns(-1);
                return;
            }
            KeyCode::Char('r') => Msg::Reload,
            _ => return,
        };

        self.update(msg);
    }

    fn handle_key_command(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.command_input.clear();
            }
            KeyCode::Enter => {
                let command = self.command_input.trim().to_string();
                self.mode = Mode::Normal;
                self.command_input.clear();

                if !command.is_empty() {
                    self.update(Msg::Command(command));
                }
            }
            KeyCode::Backspace => {
                self.command_input.pop();
            }
            KeyCode::Char(ch)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.command_input.push(ch);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        // A second click on the same cell opens what the first click hit,
        // even if selecting it re-laid out the screen underneath.
        let now = Instant::now();
        let at = (mouse.column, mouse.row);
        let window = self.double_click;
        if let Some((_, id, _)) = self.last_click.take_if(|(cell, _, clicked)| {
            *cell == at && now.duration_since(*clicked) <= window
        }) {
            self.open(id);
            return;
        }

        let Some(target) = self.hit_map.hit(mouse.column, mouse.row).cloned() else {
            self.last_click = None;
            return;
        };

        match target {
            HitTarget::Item(id) => {
                self.last_click = Some((at, id.clone(), now));
                self.select(id);
            }
            HitTarget::Toggle(id) => {
                self.last_click = None;
                self.toggle_plugin(id);
            }
        }
    }

    fn handle_command(&mut self, command: String) {
        let command = command.trim();
        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim())),
            None => (command, None),
        };

        match (name, arg) {
            ("", _) => {}
            ("q" | "quit", _) => self.quit(),
            ("reload", _) => self.activate(),
            ("help", _) => self.push_notification(HELP.to_string()),
            ("columns" | "cols", Some(raw)) => match raw.parse::<usize>() {
                Ok(columns) if columns > 0 => self.selection.set_grid_columns(columns),
                _ => self.push_notification(format!("invalid column count: {raw}")),
            },
            ("detail", Some(id)) => self.select(PluginId::new(id)),
            ("open", Some(id)) => self.open(PluginId::new(id)),
            ("enable", Some(id)) => self.set_enabled(PluginId::new(id), true),
            ("disable", Some(id)) => self.set_enabled(PluginId::new(id), false),
            (name, None) => match ViewMode::parse(name) {
                Some(mode) => self.selection.set_view_mode(mode),
                None => self.push_notification(format!("unknown command: {command}")),
            },
            _ => self.push_notification(format!("unknown command: {command}")),
        }
    }

    // ── Notifications ────────────────────────────────────────────

    fn notify_not_found(&mut self, id: &PluginId) {
        tracing::debug!("plugin not found: {id}");
        self.push_notification(ToggleError::NotFound(id.clone()).to_string());
    }

    fn push_notification(&mut self, message: String) {
        self.notifications.push_back(message);
        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.pop_front();
        }
        self.notice_until = Some(Instant::now() + NOTICE_TTL);
    }

    /// Latest notification, while it is still fresh.
    pub fn current_notice(&self) -> Option<&str> {
        self.notice_until
            .and(self.notifications.back().map(String::as_str))
    }

    // ── MVU: View ────────────────────────────────────────────────

    pub fn view(&mut self, frame: &mut Frame) {
        let hits = view::draw(frame, self);
        self.hit_map = hits;
    }
}
