use serde::Deserialize;
use std::fmt;

/// Opaque, stable plugin identity as handed out by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct PluginId(pub String);

impl PluginId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single installable capability unit as listed by the gateway.
///
/// `enabled` is the only field the client ever mutates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Plugin {
    pub id: PluginId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub operations: Vec<String>,
    #[serde(default)]
    pub utilities: Vec<String>,
}

impl Plugin {
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    pub fn utility_count(&self) -> usize {
        self.utilities.len()
    }

    /// Upper-cased first character of the name, used when no icon is available.
    pub fn initial(&self) -> String {
        self.name
            .trim()
            .chars()
            .next()
            .map(|ch| ch.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }

    pub fn status_label(&self) -> &'static str {
        if self.enabled { "enabled" } else { "disabled" }
    }
}

#[cfg(test)]
pub(crate) fn plugin(id: &str, name: &str) -> Plugin {
    Plugin {
        id: PluginId::new(id),
        name: name.to_string(),
        description: None,
        enabled: false,
        operations: Vec::new(),
        utilities: Vec::new(),
    }
}
