//! Radial core monitor: per-core CPU usage from a single metrics source.
//!
//! The payload carries `{cpu: {cores: [{core, usage}, ...]}}`; cores are
//! sorted by core number before rendering. The `mode` config field selects
//! the rendition: `classical` (default) draws one percentage bar per core,
//! `line` draws the usage profile across cores as a single sparkline.

use crate::dashboard::model::WidgetConfig;
use crate::surface::RenderTarget;
use crate::widgets::{Widget, WidgetFactory, percent_bar, sparkline};
use serde_json::Value;

const BAR_WIDTH: usize = 30;
const PROFILE_WIDTH: usize = 60;

pub struct RadialCoreMonitorFactory;

impl WidgetFactory for RadialCoreMonitorFactory {
    fn type_tag(&self) -> &'static str {
        "radial-core-monitor"
    }

    fn stylesheet(&self) -> Option<&'static str> {
        Some("radial-core-monitor { range: 0-100; unit: % }")
    }

    fn create(
        &self,
        target: RenderTarget,
        config: &WidgetConfig,
    ) -> Result<Box<dyn Widget>, String> {
        // Unrecognized modes fall back to the classical rendition.
        let mode = match config.extra.get("mode").and_then(Value::as_str) {
            Some("line") => Mode::Line,
            _ => Mode::Classical,
        };
        Ok(Box::new(RadialCoreMonitor { target, mode }))
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Classical,
    Line,
}

struct RadialCoreMonitor {
    target: RenderTarget,
    mode: Mode,
}

impl Widget for RadialCoreMonitor {
    fn update(&mut self, values: &[Value]) {
        // Keep the previous render when the metrics shape is missing.
        let Some(mut cores) = values.first().and_then(parse_cores) else {
            return;
        };
        cores.sort_by_key(|&(core, _)| core);

        let lines = match self.mode {
            Mode::Classical => cores
                .iter()
                .map(|&(core, usage)| format!("Core {core} {}", percent_bar(usage, BAR_WIDTH)))
                .collect(),
            Mode::Line => {
                let usages: Vec<f64> = cores.iter().map(|&(_, usage)| usage).collect();
                let last = cores.last().map(|&(core, _)| core).unwrap_or(0);
                vec![
                    format!("cores 0-{last} [0, 100]"),
                    sparkline(&usages, PROFILE_WIDTH),
                ]
            }
        };
        self.target.set_lines(lines);
    }

    fn destroy(&mut self) {
        self.target.clear();
    }
}

/// Extracts `(core, usage)` pairs from `{cpu: {cores: [...]}}`.
fn parse_cores(metrics: &Value) -> Option<Vec<(u64, f64)>> {
    let cores = metrics.get("cpu")?.get("cores")?.as_array()?;
    Some(
        cores
            .iter()
            .filter_map(|entry| {
                let core = entry.get("core")?.as_u64()?;
                let usage = entry.get("usage")?.as_f64()?;
                Some((core, usage))
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;
    use serde_json::json;

    fn make(mode: Option<&str>) -> (Surface, Box<dyn Widget>) {
        let mut raw = json!({
            "id": "w1",
            "type": "radial-core-monitor",
            "title": "CPU Cores",
            "refreshInterval": 1000
        });
        if let Some(mode) = mode {
            raw["mode"] = json!(mode);
        }
        let config: WidgetConfig = serde_json::from_value(raw).unwrap();
        let surface = Surface::new();
        let target = surface.create_panel("w1", "CPU Cores");
        let widget = RadialCoreMonitorFactory.create(target, &config).unwrap();
        (surface, widget)
    }

    #[test]
    fn test_classical_mode_sorts_cores_into_bars() {
        let (surface, mut widget) = make(None);
        widget.update(&[json!({"cpu": {"cores": [
            {"core": 1, "usage": 75.0},
            {"core": 0, "usage": 25.0}
        ]}})]);

        let lines = surface.snapshot().panels[0].lines.clone();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Core 0"));
        assert!(lines[0].contains("25.0%"));
        assert!(lines[1].starts_with("Core 1"));
        assert!(lines[1].contains("75.0%"));
    }

    #[test]
    fn test_line_mode_renders_usage_profile() {
        let (surface, mut widget) = make(Some("line"));
        widget.update(&[json!({"cpu": {"cores": [
            {"core": 0, "usage": 0.0},
            {"core": 1, "usage": 100.0}
        ]}})]);

        let lines = surface.snapshot().panels[0].lines.clone();
        assert_eq!(lines[0], "cores 0-1 [0, 100]");
        assert_eq!(lines[1], "▁█");
    }

    #[test]
    fn test_malformed_metrics_keep_last_render() {
        let (surface, mut widget) = make(None);
        widget.update(&[json!({"cpu": {"cores": [{"core": 0, "usage": 50.0}]}})]);
        let before = surface.snapshot().panels[0].lines.clone();

        widget.update(&[json!({"memory": {"percent": 12.0}})]);
        assert_eq!(surface.snapshot().panels[0].lines, before);
    }
}
