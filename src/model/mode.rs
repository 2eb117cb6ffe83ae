use serde::Deserialize;

/// Application interaction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Normal mode: navigation and plugin actions.
    #[default]
    Normal,
    /// Command palette (`:` prefix).
    Command,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Command => "COMMAND",
        }
    }
}

/// Layout used to present the plugin set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    Table,
}

impl ViewMode {
    pub const ALL: [Self; 3] = [Self::Grid, Self::List, Self::Table];

    pub fn label(self) -> &'static str {
        match self {
            Self::Grid => "GRID",
            Self::List => "LIST",
            Self::Table => "TABLE",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Table,
            Self::Table => Self::Grid,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "grid" => Some(Self::Grid),
            "list" => Some(Self::List),
            "table" => Some(Self::Table),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_visits_every_mode() {
        let mut mode = ViewMode::Grid;
        let mut seen = Vec::new();
        for _ in 0..ViewMode::ALL.len() {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(seen, ViewMode::ALL.to_vec());
        assert_eq!(mode, ViewMode::Grid);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(ViewMode::parse(" Table "), Some(ViewMode::Table));
        assert_eq!(ViewMode::parse("tiles"), None);
    }
}
