use crate::plugin::manifest::{Plugin, PluginId};

/// Single-plugin detail panel. At most one is open, bound to a copy of the
/// selected plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailPanel {
    #[default]
    Closed,
    Open(Plugin),
}

impl DetailPanel {
    /// Open (or rebind) the panel to `plugin`. Re-opening the same plugin
    /// just refreshes the bound copy.
    pub fn open(&mut self, plugin: &Plugin) {
        *self = DetailPanel::Open(plugin.clone());
    }

    pub fn close(&mut self) {
        *self = DetailPanel::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DetailPanel::Open(_))
    }

    pub fn plugin(&self) -> Option<&Plugin> {
        match self {
            DetailPanel::Open(plugin) => Some(plugin),
            DetailPanel::Closed => None,
        }
    }

    pub fn bound_id(&self) -> Option<&PluginId> {
        self.plugin().map(|plugin| &plugin.id)
    }

    /// Replace the bound copy if the panel is showing `plugin.id`.
    pub fn refresh(&mut self, plugin: &Plugin) -> bool {
        match self {
            DetailPanel::Open(bound) if bound.id == plugin.id => {
                *bound = plugin.clone();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::manifest::plugin;

    #[test]
    fn refresh_only_touches_the_bound_plugin() {
        let mut panel = DetailPanel::default();
        panel.open(&plugin("a", "Alpha"));

        let mut other = plugin("b", "Beta");
        other.enabled = true;
        assert!(!panel.refresh(&other));

        let mut alpha = plugin("a", "Alpha");
        alpha.enabled = true;
        assert!(panel.refresh(&alpha));
        assert_eq!(panel.plugin().map(|p| p.enabled), Some(true));
    }

    #[test]
    fn reopening_keeps_a_single_panel() {
        let mut panel = DetailPanel::default();
        panel.open(&plugin("a", "Alpha"));
        panel.open(&plugin("a", "Alpha"));
        assert_eq!(panel, DetailPanel::Open(plugin("a", "Alpha")));

        panel.close();
        assert!(!panel.is_open());
        assert!(!panel.refresh(&plugin("a", "Alpha")));
    }
}
