//! Line plot: one sparkline row per data source, y-values in x order.

use crate::dashboard::model::WidgetConfig;
use crate::surface::RenderTarget;
use crate::widgets::{Widget, WidgetFactory, parse_points, sparkline};
use serde_json::Value;

const PLOT_WIDTH: usize = 60;

pub struct LinePlotFactory;

impl WidgetFactory for LinePlotFactory {
    fn type_tag(&self) -> &'static str {
        "line-plot"
    }

    fn create(
        &self,
        target: RenderTarget,
        config: &WidgetConfig,
    ) -> Result<Box<dyn Widget>, String> {
        let labels = config
            .data_sources
            .iter()
            .map(|ds| ds.label.clone())
            .collect();
        Ok(Box::new(LinePlot { target, labels }))
    }
}

struct LinePlot {
    target: RenderTarget,
    labels: Vec<String>,
}

impl Widget for LinePlot {
    fn update(&mut self, values: &[Value]) {
        let mut lines = Vec::with_capacity(values.len() * 2);
        for (label, value) in self.labels.iter().zip(values) {
            let mut points = parse_points(value);
            points.sort_by(|a, b| a.0.total_cmp(&b.0));
            let ys: Vec<f64> = points.iter().map(|&(_, y)| y).collect();
            if ys.is_empty() {
                lines.push(format!("{label}: (no data)"));
                continue;
            }
            let min = ys.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            lines.push(format!("{label} [{min:.2}, {max:.2}]"));
            lines.push(sparkline(&ys, PLOT_WIDTH));
        }
        self.target.set_lines(lines);
    }

    fn destroy(&mut self) {
        self.target.clear();
    }
}
