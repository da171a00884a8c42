//! Widget implementations.
//!
//! Every widget type satisfies the same capability set: a factory constructs
//! an instance against a [`RenderTarget`], the orchestrator delivers
//! positionally aligned values through [`Widget::update`], and
//! [`Widget::destroy`] releases whatever the instance privately acquired.
//! The orchestration engine treats all of them uniformly; none of the types
//! here are special-cased anywhere outside this module.

use crate::dashboard::model::WidgetConfig;
use crate::dashboard::registry::WidgetRegistry;
use crate::surface::RenderTarget;
use serde_json::Value;

pub mod advanced_plot;
pub mod file_viewer;
pub mod heatmap;
pub mod image_viewer;
pub mod line_plot;
pub mod radial_core_monitor;
pub mod scatter_plot;
pub mod spacer;
pub mod system_monitor;

/// A live widget instance bound to one widget id.
pub trait Widget: Send {
    /// Deliver one aggregation cycle's values, ordered like the widget's
    /// `dataSources`. Never called with a partial cycle.
    fn update(&mut self, values: &[Value]);

    /// Release instance-owned resources. Called exactly once, on teardown.
    fn destroy(&mut self);
}

/// Constructs instances of one widget type.
pub trait WidgetFactory: Send + Sync {
    /// The registry key this factory answers to.
    fn type_tag(&self) -> &'static str;

    /// Optional type-level presentation rules, consumed once per type by the
    /// registry on first resolution.
    fn stylesheet(&self) -> Option<&'static str> {
        None
    }

    /// Build an instance and perform its first (empty) render.
    fn create(
        &self,
        target: RenderTarget,
        config: &WidgetConfig,
    ) -> Result<Box<dyn Widget>, String>;
}

/// Registry preloaded with every built-in widget type.
pub fn builtin_registry() -> WidgetRegistry {
    let mut registry = WidgetRegistry::new();
    registry.register(std::sync::Arc::new(line_plot::LinePlotFactory));
    registry.register(std::sync::Arc::new(scatter_plot::ScatterPlotFactory));
    registry.register(std::sync::Arc::new(advanced_plot::AdvancedPlotFactory));
    registry.register(std::sync::Arc::new(heatmap::HeatmapFactory));
    registry.register(std::sync::Arc::new(system_monitor::SystemMonitorFactory));
    registry.register(std::sync::Arc::new(
        radial_core_monitor::RadialCoreMonitorFactory,
    ));
    registry.register(std::sync::Arc::new(spacer::SpacerFactory));
    registry.register(std::sync::Arc::new(image_viewer::ImageViewerFactory));
    registry.register(std::sync::Arc::new(file_viewer::FileViewerFactory));
    registry
}

/// Parses a `[{x, y}, ...]` payload into points. Non-numeric entries are
/// skipped rather than failing the whole series.
pub(crate) fn parse_points(value: &Value) -> Vec<(f64, f64)> {
    value
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let x = entry.get("x")?.as_f64()?;
                    let y = entry.get("y")?.as_f64()?;
                    Some((x, y))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Renders values as a fixed-height unicode sparkline.
pub(crate) fn sparkline(values: &[f64], width: usize) -> String {
    const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    if values.is_empty() || width == 0 {
        return String::new();
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = if (max - min).abs() < f64::EPSILON {
        1.0
    } else {
        max - min
    };

    // Downsample to at most `width` buckets, averaging within each.
    let bucket_size = values.len().div_ceil(width);
    values
        .chunks(bucket_size)
        .map(|chunk| {
            let avg = chunk.iter().sum::<f64>() / chunk.len() as f64;
            let level = (((avg - min) / span) * (LEVELS.len() - 1) as f64).round() as usize;
            LEVELS[level.min(LEVELS.len() - 1)]
        })
        .collect()
}

/// Min/max over an iterator of coordinates.
pub(crate) fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    (min, max)
}

/// Maps a value within `[min, max]` onto `0..=steps` grid positions.
pub(crate) fn scale(value: f64, min: f64, max: f64, steps: usize) -> usize {
    if (max - min).abs() < f64::EPSILON {
        return 0;
    }
    (((value - min) / (max - min)) * steps as f64).round() as usize
}

/// Formats a horizontal percentage bar, e.g. `[####------] 42.0%`.
pub(crate) fn percent_bar(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {:.1}%",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled)),
        clamped
    )
}
