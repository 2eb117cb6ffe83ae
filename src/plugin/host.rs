use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use crate::plugin::manifest::Plugin;

pub const DETAIL_VIEW: &str = "plugin-detail";

/// Request for the hosting shell to open a plugin's detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenEvent {
    pub target_view: String,
    pub title: String,
    pub plugin_id: String,
}

impl OpenEvent {
    pub fn for_plugin(plugin: &Plugin) -> Self {
        Self {
            target_view: DETAIL_VIEW.to_string(),
            title: plugin.name.clone(),
            plugin_id: plugin.id.0.clone(),
        }
    }
}

/// Outbound port to whatever shell embeds the plugin manager.
/// Delivery is fire-and-forget.
pub trait HostShell {
    fn open(&self, event: &OpenEvent);
}

/// Records open events in the log only.
#[derive(Debug, Default)]
pub struct LogHost;

impl HostShell for LogHost {
    fn open(&self, event: &OpenEvent) {
        tracing::info!(
            target_view = %event.target_view,
            plugin_id = %event.plugin_id,
            "open requested: {}",
            event.title
        );
    }
}

/// Appends each open event as one JSON line to a file the shell tails.
#[derive(Debug)]
pub struct JsonLinesHost {
    path: PathBuf,
}

impl JsonLinesHost {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn append(&self, event: &OpenEvent) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

impl HostShell for JsonLinesHost {
    fn open(&self, event: &OpenEvent) {
        if let Err(err) = self.append(event) {
            tracing::warn!("failed to deliver open event to {}: {err}", self.path.display());
        }
    }
}

pub fn from_events_file(events_file: Option<PathBuf>) -> Box<dyn HostShell> {
    match events_file {
        Some(path) => Box::new(JsonLinesHost::new(path)),
        None => Box::new(LogHost),
    }
}
