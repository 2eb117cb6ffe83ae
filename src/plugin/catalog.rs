use std::collections::HashSet;

use crate::plugin::manifest::{Plugin, PluginId};

/// In-memory snapshot of the plugin set for one activation.
///
/// The snapshot is only ever replaced wholesale; the one in-place mutation is
/// flipping `enabled` on a single record.
#[derive(Debug, Default)]
pub struct PluginCatalog {
    plugins: Vec<Plugin>,
}

impl PluginCatalog {
    /// Replace the whole set, sorted by name (case-insensitive, stable).
    /// Duplicate ids keep their first occurrence.
    pub fn replace(&mut self, plugins: Vec<Plugin>) {
        let mut seen = HashSet::new();
        let mut plugins: Vec<Plugin> = plugins
            .into_iter()
            .filter(|plugin| {
                let fresh = seen.insert(plugin.id.clone());
                if !fresh {
                    tracing::warn!("duplicate plugin id in listing: {}", plugin.id);
                }
                fresh
            })
            .collect();

        plugins.sort_by_cached_key(|plugin| plugin.name.to_lowercase());
        self.plugins = plugins;
    }

    pub fn clear(&mut self) {
        self.plugins.clear();
    }

    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn get(&self, id: &PluginId) -> Option<&Plugin> {
        self.plugins.iter().find(|plugin| &plugin.id == id)
    }

    pub fn position(&self, id: &PluginId) -> Option<usize> {
        self.plugins.iter().position(|plugin| &plugin.id == id)
    }

    pub fn contains(&self, id: &PluginId) -> bool {
        self.position(id).is_some()
    }

    pub fn ids(&self) -> Vec<PluginId> {
        self.plugins.iter().map(|plugin| plugin.id.clone()).collect()
    }

    pub fn enabled_count(&self) -> usize {
        self.plugins.iter().filter(|plugin| plugin.enabled).count()
    }

    /// Flip `enabled` on the matching record without touching order or any
    /// other record. Returns the updated record.
    pub fn set_enabled(&mut self, id: &PluginId, enabled: bool) -> Option<&Plugin> {
        let plugin = self.plugins.iter_mut().find(|plugin| &plugin.id == id)?;
        plugin.enabled = enabled;
        Some(plugin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::manifest::plugin;
    use pretty_assertions::assert_eq;

    fn names(catalog: &PluginCatalog) -> Vec<&str> {
        catalog.plugins().iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn replace_sorts_case_insensitively() {
        let mut catalog = PluginCatalog::default();
        catalog.replace(vec![
            plugin("z", "zendesk"),
            plugin("b", "Beta"),
            plugin("a", "alpha"),
            plugin("c", "Confluence"),
        ]);

        assert_eq!(names(&catalog), vec!["alpha", "Beta", "Confluence", "zendesk"]);
    }

    #[test]
    fn toggling_never_resorts_or_touches_neighbours() {
        let mut catalog = PluginCatalog::default();
        catalog.replace(vec![plugin("b", "Beta"), plugin("a", "Alpha"), plugin("c", "Gamma")]);
        let before: Vec<Plugin> = catalog.plugins().to_vec();

        for _ in 0..3 {
            catalog.set_enabled(&PluginId::new("b"), true);
            catalog.set_enabled(&PluginId::new("b"), false);
        }
        let updated = catalog.set_enabled(&PluginId::new("b"), true).cloned();

        assert_eq!(updated.map(|p| p.enabled), Some(true));
        assert_eq!(names(&catalog), vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(catalog.plugins()[0], before[0]);
        assert_eq!(catalog.plugins()[2], before[2]);
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let mut catalog = PluginCatalog::default();
        catalog.replace(vec![plugin("a", "Alpha"), plugin("a", "Impostor")]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.plugins()[0].name, "Alpha");
    }

    #[test]
    fn replace_discards_previous_snapshot() {
        let mut catalog = PluginCatalog::default();
        catalog.replace(vec![plugin("a", "Alpha")]);
        catalog.set_enabled(&PluginId::new("a"), true);
        catalog.replace(vec![plugin("b", "Beta")]);

        assert!(!catalog.contains(&PluginId::new("a")));
        assert_eq!(catalog.plugins()[0].id, PluginId::new("b"));
        assert_eq!(catalog.enabled_count(), 0);
    }

    #[test]
    fn set_enabled_on_unknown_id_is_none() {
        let mut catalog = PluginCatalog::default();
        catalog.replace(vec![plugin("a", "Alpha")]);

        assert!(catalog.set_enabled(&PluginId::new("x"), true).is_none());
        assert!(!catalog.plugins()[0].enabled);
    }
}
