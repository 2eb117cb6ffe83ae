use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;

use crate::msg::Msg;
use crate::plugin::gateway::PluginGateway;
use crate::plugin::manifest::PluginId;

/// Token scoping I/O results to the activation that requested them.
#[derive(Debug, Clone)]
pub struct Activation {
    generation: u64,
    cancelled: Arc<AtomicBool>,
}

impl Activation {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// True when `other` was issued by this activation and it is still live.
    pub fn accepts(&self, other: &Activation) -> bool {
        self.generation == other.generation && !self.is_cancelled()
    }
}

/// Fetch the plugin set off the UI thread.
pub fn spawn_load(
    gateway: Arc<dyn PluginGateway>,
    activation: Activation,
    tx: mpsc::Sender<Msg>,
) {
    thread::spawn(move || {
        let result = gateway.list_plugins();

        if activation.is_cancelled() {
            tracing::debug!(
                "discarding plugin list for cancelled activation {}",
                activation.generation()
            );
            return;
        }

        let _ = tx.send(Msg::PluginsLoaded { activation, result });
    });
}

/// Issue one enable/disable write off the UI thread.
pub fn spawn_toggle(
    gateway: Arc<dyn PluginGateway>,
    activation: Activation,
    id: PluginId,
    desired: bool,
    tx: mpsc::Sender<Msg>,
) {
    thread::spawn(move || {
        let result = gateway.set_enabled(&id, desired);
        let _ = tx.send(Msg::ToggleFinished {
            activation,
            id,
            desired,
            result,
        });
    });
}
