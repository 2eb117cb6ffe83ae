use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::model::mode::ViewMode;

const DEFAULTS: &str = include_str!("../../config/default.toml");
const CONFIG_ENV: &str = "PLUGDECK_CONFIG";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
    pub view: ViewConfig,
    pub icons: IconConfig,
    pub host: HostConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    pub base_url: String,
    pub list_path: String,
    pub action_path: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewConfig {
    pub default_mode: ViewMode,
    pub grid_columns: usize,
    pub double_click_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IconConfig {
    #[serde(default)]
    pub dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostConfig {
    #[serde(default)]
    pub events_file: String,
}

impl AppConfig {
    /// Load configuration with layering: defaults → user config.
    pub fn load() -> Result<Self> {
        let user = match user_config_path() {
            Some(path) if path.exists() => Some(
                fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
            ),
            _ => None,
        };

        Self::from_layers(DEFAULTS, user.as_deref())
    }

    /// Overlay `user` on `defaults` key by key, tables merged recursively.
    pub fn from_layers(defaults: &str, user: Option<&str>) -> Result<Self> {
        let mut merged: toml::Value =
            toml::from_str(defaults).context("parsing default config")?;

        if let Some(user) = user {
            let overlay: toml::Value = toml::from_str(user).context("parsing user config")?;
            merge(&mut merged, overlay);
        }

        merged.try_into().context("invalid configuration")
    }

    pub fn icons_dir(&self) -> Option<PathBuf> {
        non_empty_path(&self.icons.dir).or_else(|| {
            directories::ProjectDirs::from("", "", "plugdeck")
                .map(|dirs| dirs.data_dir().join("icons"))
        })
    }

    pub fn events_file(&self) -> Option<PathBuf> {
        non_empty_path(&self.host.events_file)
    }
}

fn user_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        return Some(expand_tilde(&path));
    }

    directories::ProjectDirs::from("", "", "plugdeck")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn merge(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

fn non_empty_path(raw: &str) -> Option<PathBuf> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| expand_tilde(raw))
}

fn expand_tilde(path: &str) -> PathBuf {
    if !path.starts_with('~') {
        return PathBuf::from(path);
    }

    match directories::BaseDirs::new() {
        Some(base) => PathBuf::from(path.replacen('~', &base.home_dir().to_string_lossy(), 1)),
        None => PathBuf::from(path),
    }
}
