use crossterm::event::{KeyEvent, MouseEvent};

use crate::error::GatewayError;
use crate::model::mode::ViewMode;
use crate::plugin::manifest::{Plugin, PluginId};
use crate::plugin::worker::Activation;

/// Direction for selection movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

/// All possible messages that drive state transitions.
#[derive(Debug)]
pub enum Msg {
    // -- Input events (raw)
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),

    // -- Selection & navigation
    Move(Direction),
    Select(PluginId),
    Open(PluginId),
    CloseDetail,
    SetViewMode(ViewMode),

    // -- Plugin state
    SetEnabled(PluginId, bool),
    Command(String),

    // -- Gateway results
    PluginsLoaded {
        activation: Activation,
        result: Result<Vec<Plugin>, GatewayError>,
    },
    ToggleFinished {
        activation: Activation,
        id: PluginId,
        desired: bool,
        result: Result<(), GatewayError>,
    },

    // -- Lifecycle
    Reload,
    Tick,
    Quit,
}
