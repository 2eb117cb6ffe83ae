use crate::plugin::manifest::PluginId;

/// Failures talking to the plugin host.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("host returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Reasons a toggle request is refused before any I/O happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToggleError {
    #[error("plugin {0} is already updating")]
    InFlight(PluginId),

    #[error("plugin not found: {0}")]
    NotFound(PluginId),
}
