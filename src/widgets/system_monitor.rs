//! System monitor: labeled percentage bars, one per data source.
//!
//! Each source's `dataKey` field is read as a percentage; payloads shaped
//! like `{"percent": 42.0}` or a bare number both work.

use crate::dashboard::model::WidgetConfig;
use crate::surface::RenderTarget;
use crate::widgets::{Widget, WidgetFactory, percent_bar};
use serde_json::Value;

const BAR_WIDTH: usize = 40;

pub struct SystemMonitorFactory;

impl WidgetFactory for SystemMonitorFactory {
    fn type_tag(&self) -> &'static str {
        "system-monitor"
    }

    fn stylesheet(&self) -> Option<&'static str> {
        Some("system-monitor { bar: block; warn-above: 80; crit-above: 95 }")
    }

    fn create(
        &self,
        target: RenderTarget,
        config: &WidgetConfig,
    ) -> Result<Box<dyn Widget>, String> {
        let labels: Vec<String> = config
            .data_sources
            .iter()
            .map(|ds| ds.label.clone())
            .collect();
        let label_width = labels.iter().map(String::len).max().unwrap_or(0);
        Ok(Box::new(SystemMonitor {
            target,
            labels,
            label_width,
        }))
    }
}

struct SystemMonitor {
    target: RenderTarget,
    labels: Vec<String>,
    label_width: usize,
}

impl Widget for SystemMonitor {
    fn update(&mut self, values: &[Value]) {
        let lines = self
            .labels
            .iter()
            .zip(values)
            .map(|(label, value)| match read_percent(value) {
                Some(percent) => format!(
                    "{label:>width$} {}",
                    percent_bar(percent, BAR_WIDTH),
                    width = self.label_width
                ),
                None => format!("{label:>width$} (no reading)", width = self.label_width),
            })
            .collect();
        self.target.set_lines(lines);
    }

    fn destroy(&mut self) {
        self.target.clear();
    }
}

fn read_percent(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.get("percent").and_then(Value::as_f64))
}
