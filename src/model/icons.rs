use std::collections::HashMap;
use std::path::PathBuf;

use crate::plugin::manifest::{Plugin, PluginId};

const ICON_EXTENSION: &str = "icon";
const MAX_GLYPH_CHARS: usize = 2;

/// Per-activation icon lookup. Each id is resolved at most once; failures are
/// remembered and never retried until the next activation.
#[derive(Debug, Default)]
pub struct IconStore {
    dir: Option<PathBuf>,
    glyphs: HashMap<PluginId, String>,
    failed: HashMap<PluginId, bool>,
}

impl IconStore {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self {
            dir,
            ..Self::default()
        }
    }

    /// Resolve icons for every plugin not seen yet in this activation.
    pub fn prime(&mut self, plugins: &[Plugin]) {
        for plugin in plugins {
            if self.glyphs.contains_key(&plugin.id) || self.has_failed(&plugin.id) {
                continue;
            }

            match self.load(&plugin.id) {
                Some(glyph) => {
                    self.glyphs.insert(plugin.id.clone(), glyph);
                }
                None => {
                    tracing::debug!("no icon for plugin {}, using initial", plugin.id);
                    self.failed.insert(plugin.id.clone(), true);
                }
            }
        }
    }

    pub fn has_failed(&self, id: &PluginId) -> bool {
        self.failed.get(id).copied().unwrap_or(false)
    }

    /// Glyph to draw for `plugin`: its icon, or the fallback initial.
    pub fn glyph(&self, plugin: &Plugin) -> String {
        self.glyphs
            .get(&plugin.id)
            .cloned()
            .unwrap_or_else(|| plugin.initial())
    }

    pub fn reset(&mut self) {
        self.glyphs.clear();
        self.failed.clear();
    }

    fn load(&self, id: &PluginId) -> Option<String> {
        let dir = self.dir.as_ref()?;
        if !is_plain_file_name(id.as_str()) {
            tracing::warn!("ignoring icon lookup for unsafe plugin id {id:?}");
            return None;
        }
        let path = dir.join(format!("{}.{ICON_EXTENSION}", id.as_str()));
        let raw = std::fs::read_to_string(&path).ok()?;
        let glyph: String = raw
            .lines()
            .next()?
            .trim()
            .chars()
            .take(MAX_GLYPH_CHARS)
            .collect();

        (!glyph.is_empty()).then_some(glyph)
    }
}

/// Ids are host-supplied; only a single normal path component may be joined
/// onto the icons dir.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::manifest::plugin;

    #[test]
    fn loads_icon_and_falls_back_to_initial() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("gh.icon"), "GH-extra\nignored").expect("icon");
        std::fs::write(dir.path().join("blank.icon"), "   \n").expect("icon");

        let github = plugin("gh", "GitHub");
        let jira = plugin("jira", "jira");
        let blank = plugin("blank", "Blank");
        let mut icons = IconStore::new(Some(dir.path().to_path_buf()));
        icons.prime(&[github.clone(), jira.clone(), blank.clone()]);

        assert_eq!(icons.glyph(&github), "GH");
        assert_eq!(icons.glyph(&jira), "J");
        assert_eq!(icons.glyph(&blank), "B");
        assert!(icons.has_failed(&jira.id));
        assert!(!icons.has_failed(&github.id));
    }

    #[test]
    fn failures_are_not_retried_within_an_activation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let late = plugin("late", "Late");
        let mut icons = IconStore::new(Some(dir.path().to_path_buf()));

        icons.prime(std::slice::from_ref(&late));
        std::fs::write(dir.path().join("late.icon"), "LT").expect("icon");
        icons.prime(std::slice::from_ref(&late));
        assert_eq!(icons.glyph(&late), "L");

        icons.reset();
        icons.prime(std::slice::from_ref(&late));
        assert_eq!(icons.glyph(&late), "LT");
    }

    #[test]
    fn ids_with_path_separators_never_leave_the_icon_dir() {
        let root = tempfile::tempdir().expect("tempdir");
        let icons_dir = root.path().join("icons");
        std::fs::create_dir(&icons_dir).expect("icons dir");
        std::fs::write(root.path().join("secret.icon"), "XX").expect("secret");

        let sneaky = plugin("../secret", "Sneaky");
        let mut icons = IconStore::new(Some(icons_dir));
        icons.prime(std::slice::from_ref(&sneaky));

        assert_eq!(icons.glyph(&sneaky), "S");
        assert!(icons.has_failed(&sneaky.id));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("a\\b"));
        assert!(is_plain_file_name("github"));
    }

    #[test]
    fn no_icon_dir_means_initials() {
        let mut icons = IconStore::new(None);
        let alpha = plugin("a", "alpha");
        icons.prime(std::slice::from_ref(&alpha));

        assert_eq!(icons.glyph(&alpha), "A");
        assert!(icons.has_failed(&alpha.id));
    }
}
