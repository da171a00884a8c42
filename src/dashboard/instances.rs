//! Widget Instance Manager
//!
//! Owns the live widget instances of the currently displayed dashboard and
//! the mapping from widget id to instance. Exactly one instance exists per
//! active widget id; the manager is the sole owner. The map is shared with
//! in-flight poll cycles, so every mutation happens in a short critical
//! section with no suspension point inside, and every decision made before
//! an await is re-validated after it.

use crate::dashboard::aggregator;
use crate::dashboard::error::{CycleError, DashboardError};
use crate::dashboard::model::WidgetConfig;
use crate::dashboard::registry::WidgetRegistry;
use crate::relay::Relay;
use crate::surface::Surface;
use crate::widgets::Widget;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct WidgetInstanceManager {
    instances: Arc<Mutex<HashMap<String, Box<dyn Widget>>>>,
}

impl WidgetInstanceManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, widget_id: &str) -> bool {
        self.instances.lock().unwrap().contains_key(widget_id)
    }

    pub fn len(&self) -> usize {
        self.instances.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Constructs one widget: resolve the implementation, build its panel,
    /// instantiate, then run one aggregation+render cycle.
    ///
    /// A failed first cycle does not fail construction — cycle failures are
    /// cycle-scoped and the poll schedule is the retry mechanism. It is
    /// reported back so the caller can log it.
    pub async fn construct(
        &self,
        registry: &mut WidgetRegistry,
        surface: &Surface,
        relay: &dyn Relay,
        config: &WidgetConfig,
    ) -> Result<Option<CycleError>, DashboardError> {
        if self.contains(&config.id) {
            return Err(DashboardError::DuplicateWidgetId(config.id.clone()));
        }

        let target = surface.create_panel(&config.id, &config.title);
        let factory = registry.resolve(&config.widget_type, surface).await?;
        let widget =
            factory
                .create(target, config)
                .map_err(|reason| DashboardError::WidgetConstructionFailed {
                    id: config.id.clone(),
                    reason,
                })?;

        {
            // Re-validate after the awaits above before inserting.
            let mut instances = self.instances.lock().unwrap();
            if instances.contains_key(&config.id) {
                return Err(DashboardError::DuplicateWidgetId(config.id.clone()));
            }
            instances.insert(config.id.clone(), widget);
        }

        // Initial fetch and render.
        match aggregator::run_cycle(relay, &config.data_sources).await {
            Ok(values) => {
                self.apply_update(&config.id, &values);
                Ok(None)
            }
            Err(err) => Ok(Some(err)),
        }
    }

    /// Delivers a completed cycle to an instance. Returns false when the
    /// instance no longer exists (dashboard switched away mid-flight); the
    /// caller drops the update silently in that case.
    pub fn apply_update(&self, widget_id: &str, values: &[Value]) -> bool {
        let mut instances = self.instances.lock().unwrap();
        match instances.get_mut(widget_id) {
            Some(widget) => {
                widget.update(values);
                true
            }
            None => false,
        }
    }

    /// Tears down every live instance and clears the map. Idempotent and
    /// total: safe after a partially constructed dashboard, safe to repeat.
    pub fn destroy_all(&self) {
        let mut drained: Vec<Box<dyn Widget>> = {
            let mut instances = self.instances.lock().unwrap();
            instances.drain().map(|(_, widget)| widget).collect()
        };
        for widget in drained.iter_mut() {
            widget.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::relay::MockRelay;
    use crate::widgets::builtin_registry;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn spacer_config(id: &str) -> WidgetConfig {
        serde_json::from_value(json!({
            "id": id,
            "type": "spacer",
            "title": "",
            "refreshInterval": 60000
        }))
        .unwrap()
    }

    fn relay_with_no_fetches() -> MockRelay {
        let mut relay = MockRelay::new();
        relay
            .expect_environment()
            .return_const(Environment::Local);
        relay
    }

    #[tokio::test]
    // A second widget with the same id must fail construction, not
    // silently replace the first instance.
    async fn test_duplicate_id_fails_construction() {
        let manager = WidgetInstanceManager::new();
        let mut registry = builtin_registry();
        let surface = Surface::new();
        let relay = relay_with_no_fetches();

        manager
            .construct(&mut registry, &surface, &relay, &spacer_config("w1"))
            .await
            .unwrap();
        let result = manager
            .construct(&mut registry, &surface, &relay, &spacer_config("w1"))
            .await;

        assert!(matches!(
            result,
            Err(DashboardError::DuplicateWidgetId(id)) if id == "w1"
        ));
        assert_eq!(manager.len(), 1);
    }

    #[tokio::test]
    // Unknown widget types are isolated errors; nothing is inserted.
    async fn test_unknown_type_leaves_no_instance() {
        let manager = WidgetInstanceManager::new();
        let mut registry = builtin_registry();
        let surface = Surface::new();
        let relay = relay_with_no_fetches();

        let config: WidgetConfig = serde_json::from_value(json!({
            "id": "w1",
            "type": "holographic-display",
            "title": "Nope",
            "refreshInterval": 1000
        }))
        .unwrap();

        let result = manager.construct(&mut registry, &surface, &relay, &config).await;
        assert!(matches!(result, Err(DashboardError::UnknownWidgetType(_))));
        assert!(manager.is_empty());
        // The panel shell still exists for the inline error.
        assert_eq!(surface.panel_count(), 1);
    }

    #[tokio::test]
    // destroy_all runs every teardown hook, empties the map, and can be
    // repeated without effect.
    async fn test_destroy_all_is_total_and_idempotent() {
        struct CountingWidget(Arc<AtomicUsize>);
        impl Widget for CountingWidget {
            fn update(&mut self, _values: &[Value]) {}
            fn destroy(&mut self) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let destroyed = Arc::new(AtomicUsize::new(0));
        let manager = WidgetInstanceManager::new();
        {
            let mut instances = manager.instances.lock().unwrap();
            instances.insert("a".into(), Box::new(CountingWidget(destroyed.clone())));
            instances.insert("b".into(), Box::new(CountingWidget(destroyed.clone())));
        }

        manager.destroy_all();
        assert_eq!(destroyed.load(Ordering::SeqCst), 2);
        assert!(manager.is_empty());

        manager.destroy_all();
        assert_eq!(destroyed.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    // Updates for ids no longer present are reported as dropped.
    async fn test_apply_update_after_destroy_is_dropped() {
        let manager = WidgetInstanceManager::new();
        let mut registry = builtin_registry();
        let surface = Surface::new();
        let relay = relay_with_no_fetches();

        manager
            .construct(&mut registry, &surface, &relay, &spacer_config("w1"))
            .await
            .unwrap();
        manager.destroy_all();

        assert!(!manager.apply_update("w1", &[json!(1)]));
    }
}
