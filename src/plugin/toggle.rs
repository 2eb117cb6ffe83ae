use std::collections::HashMap;

use crate::error::{GatewayError, ToggleError};
use crate::model::detail::DetailPanel;
use crate::plugin::catalog::PluginCatalog;
use crate::plugin::manifest::PluginId;

/// Result of settling a finished enable/disable request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// `enabled` now holds the requested value.
    Committed,
    /// The host rejected the write; `enabled` kept its previous value.
    Failed(String),
    /// The plugin is no longer in the loaded set.
    Vanished,
}

/// Per-plugin in-flight guard for enable/disable writes.
///
/// A plugin is either idle or updating; writes for distinct plugins are
/// independent.
#[derive(Debug, Default)]
pub struct ToggleController {
    updating: HashMap<PluginId, bool>,
}

impl ToggleController {
    pub fn is_updating(&self, id: &PluginId) -> bool {
        self.updating.get(id).copied().unwrap_or(false)
    }

    pub fn in_flight(&self) -> usize {
        self.updating.values().filter(|updating| **updating).count()
    }

    /// Claim the guard for `id`. Callers must only issue the write when this
    /// succeeds.
    pub fn begin(&mut self, catalog: &PluginCatalog, id: &PluginId) -> Result<(), ToggleError> {
        if !catalog.contains(id) {
            return Err(ToggleError::NotFound(id.clone()));
        }
        if self.is_updating(id) {
            return Err(ToggleError::InFlight(id.clone()));
        }

        self.updating.insert(id.clone(), true);
        Ok(())
    }

    /// Release the guard and apply the write's outcome. The guard is released
    /// whether or not the write succeeded.
    pub fn settle(
        &mut self,
        catalog: &mut PluginCatalog,
        detail: &mut DetailPanel,
        id: &PluginId,
        desired: bool,
        result: Result<(), GatewayError>,
    ) -> ToggleOutcome {
        self.updating.insert(id.clone(), false);

        if let Err(err) = result {
            tracing::warn!("failed to set plugin {id} enabled={desired}: {err}");
            return ToggleOutcome::Failed(err.to_string());
        }

        match catalog.set_enabled(id, desired) {
            Some(plugin) => {
                detail.refresh(plugin);
                tracing::info!("plugin {id} {}", plugin.status_label());
                ToggleOutcome::Committed
            }
            None => {
                tracing::debug!("toggle finished for unknown plugin {id}");
                ToggleOutcome::Vanished
            }
        }
    }

    pub fn reset(&mut self) {
        self.updating.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::manifest::plugin;
    use pretty_assertions::assert_eq;

    fn catalog() -> PluginCatalog {
        let mut catalog = PluginCatalog::default();
        catalog.replace(vec![plugin("a", "Alpha"), plugin("b", "Beta")]);
        catalog
    }

    fn rejected() -> GatewayError {
        GatewayError::Status {
            status: 500,
            body: "boom".to_string(),
        }
    }

    #[test]
    fn successful_toggle_commits_only_the_target() {
        let mut catalog = catalog();
        let mut detail = DetailPanel::default();
        let mut toggles = ToggleController::default();
        let b = PluginId::new("b");
        let alpha_before = catalog.plugins()[0].clone();

        toggles.begin(&catalog, &b).expect("begin");
        assert!(toggles.is_updating(&b));

        let outcome = toggles.settle(&mut catalog, &mut detail, &b, true, Ok(()));

        assert_eq!(outcome, ToggleOutcome::Committed);
        assert!(catalog.get(&b).is_some_and(|p| p.enabled));
        assert_eq!(catalog.plugins()[0], alpha_before);
        assert!(!toggles.is_updating(&b));
    }

    #[test]
    fn second_toggle_on_same_id_is_rejected_while_in_flight() {
        let catalog = catalog();
        let mut toggles = ToggleController::default();
        let a = PluginId::new("a");

        toggles.begin(&catalog, &a).expect("begin");
        assert_eq!(toggles.begin(&catalog, &a), Err(ToggleError::InFlight(a.clone())));
        assert_eq!(toggles.in_flight(), 1);
    }

    #[test]
    fn distinct_ids_proceed_independently() {
        let mut catalog = catalog();
        let mut detail = DetailPanel::default();
        let mut toggles = ToggleController::default();
        let a = PluginId::new("a");
        let b = PluginId::new("b");

        toggles.begin(&catalog, &a).expect("begin a");
        toggles.begin(&catalog, &b).expect("begin b");
        assert_eq!(toggles.in_flight(), 2);

        // Responses arrive out of order.
        toggles.settle(&mut catalog, &mut detail, &b, true, Ok(()));
        toggles.settle(&mut catalog, &mut detail, &a, true, Ok(()));

        assert_eq!(catalog.enabled_count(), 2);
        assert_eq!(toggles.in_flight(), 0);
    }

    #[test]
    fn failure_leaves_enabled_and_clears_guard() {
        let mut catalog = catalog();
        let mut detail = DetailPanel::default();
        let mut toggles = ToggleController::default();
        let a = PluginId::new("a");

        toggles.begin(&catalog, &a).expect("begin");
        let outcome = toggles.settle(&mut catalog, &mut detail, &a, true, Err(rejected()));

        assert_eq!(outcome, ToggleOutcome::Failed("host returned 500: boom".to_string()));
        assert!(catalog.get(&a).is_some_and(|p| !p.enabled));
        assert!(!toggles.is_updating(&a));
        assert!(toggles.begin(&catalog, &a).is_ok());
    }

    #[test]
    fn commit_refreshes_bound_detail_panel() {
        let mut catalog = catalog();
        let mut detail = DetailPanel::default();
        let mut toggles = ToggleController::default();
        let a = PluginId::new("a");
        if let Some(alpha) = catalog.get(&a) {
            detail.open(alpha);
        }

        toggles.begin(&catalog, &a).expect("begin");
        toggles.settle(&mut catalog, &mut detail, &a, true, Ok(()));

        assert_eq!(detail.plugin().map(|p| p.enabled), Some(true));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let catalog = catalog();
        let mut toggles = ToggleController::default();
        let x = PluginId::new("x");

        assert_eq!(toggles.begin(&catalog, &x), Err(ToggleError::NotFound(x)));
        assert_eq!(toggles.in_flight(), 0);
    }
}
