//! Widget Registry/Loader
//!
//! Resolves a widget type tag to its factory and performs each type's
//! one-time side effects (presentation-rule injection) on first resolution.
//! The once-per-type cache is explicit rather than relying on anything
//! else's memoization, so repeat resolutions are cheap no-ops.

use crate::dashboard::error::DashboardError;
use crate::surface::Surface;
use crate::widgets::WidgetFactory;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub struct WidgetRegistry {
    factories: HashMap<&'static str, Arc<dyn WidgetFactory>>,
    /// Types whose one-time setup has already run.
    initialized: HashSet<&'static str>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            initialized: HashSet::new(),
        }
    }

    /// Registers a factory under its type tag. Later registrations for the
    /// same tag replace earlier ones.
    pub fn register(&mut self, factory: Arc<dyn WidgetFactory>) {
        self.factories.insert(factory.type_tag(), factory);
    }

    /// Resolves a type tag to its factory, running the type's one-time
    /// setup (stylesheet injection into the shared surface) on first use.
    ///
    /// Fails with [`DashboardError::UnknownWidgetType`] for unregistered
    /// tags; the caller isolates that failure to the offending widget.
    pub async fn resolve(
        &mut self,
        type_tag: &str,
        surface: &Surface,
    ) -> Result<Arc<dyn WidgetFactory>, DashboardError> {
        let factory = self
            .factories
            .get(type_tag)
            .cloned()
            .ok_or_else(|| DashboardError::UnknownWidgetType(type_tag.to_string()))?;

        if self.initialized.insert(factory.type_tag()) {
            if let Some(style) = factory.stylesheet() {
                surface.inject_style(factory.type_tag(), style);
            }
        }
        Ok(factory)
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::model::WidgetConfig;
    use crate::surface::RenderTarget;
    use crate::widgets::Widget;
    use serde_json::Value;

    struct NullWidget;

    impl Widget for NullWidget {
        fn update(&mut self, _values: &[Value]) {}
        fn destroy(&mut self) {}
    }

    struct StyledFactory;

    impl WidgetFactory for StyledFactory {
        fn type_tag(&self) -> &'static str {
            "styled"
        }

        fn stylesheet(&self) -> Option<&'static str> {
            Some("legend: styled")
        }

        fn create(
            &self,
            _target: RenderTarget,
            _config: &WidgetConfig,
        ) -> Result<Box<dyn Widget>, String> {
            Ok(Box::new(NullWidget))
        }
    }

    #[tokio::test]
    // Unknown tags resolve to a typed error, not a panic.
    async fn test_unknown_type_is_typed_error() {
        let mut registry = WidgetRegistry::new();
        let surface = Surface::new();
        let result = registry.resolve("no-such-widget", &surface).await;
        assert!(matches!(
            result,
            Err(DashboardError::UnknownWidgetType(tag)) if tag == "no-such-widget"
        ));
    }

    #[tokio::test]
    // A type's stylesheet is injected on first resolution only.
    async fn test_stylesheet_injected_once() {
        let mut registry = WidgetRegistry::new();
        registry.register(Arc::new(StyledFactory));
        let surface = Surface::new();

        registry.resolve("styled", &surface).await.unwrap();
        registry.resolve("styled", &surface).await.unwrap();
        registry.resolve("styled", &surface).await.unwrap();

        assert_eq!(surface.snapshot().styles, vec!["legend: styled".to_string()]);
    }

    #[tokio::test]
    // Every built-in type resolves through the shared registry.
    async fn test_builtin_registry_covers_all_types() {
        let mut registry = crate::widgets::builtin_registry();
        let surface = Surface::new();
        for tag in [
            "line-plot",
            "scatter-plot",
            "advanced-plot",
            "heatmap",
            "system-monitor",
            "radial-core-monitor",
            "spacer",
            "image-viewer",
            "file-viewer",
        ] {
            assert!(registry.resolve(tag, &surface).await.is_ok(), "missing {tag}");
        }
    }
}
