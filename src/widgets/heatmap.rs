//! Heatmap: a 2D matrix rendered as shaded cells, one row per matrix row.
//!
//! Expects the first data source to yield `{"rows": [[...], ...]}` style
//! payloads (the configured `dataKey` selects the matrix field).

use crate::dashboard::model::WidgetConfig;
use crate::surface::RenderTarget;
use crate::widgets::{Widget, WidgetFactory};
use serde_json::Value;

const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

pub struct HeatmapFactory;

impl WidgetFactory for HeatmapFactory {
    fn type_tag(&self) -> &'static str {
        "heatmap"
    }

    fn stylesheet(&self) -> Option<&'static str> {
        Some("heatmap { shades: light-to-dark; cell-aspect: 2:1 }")
    }

    fn create(
        &self,
        target: RenderTarget,
        _config: &WidgetConfig,
    ) -> Result<Box<dyn Widget>, String> {
        Ok(Box::new(Heatmap { target }))
    }
}

struct Heatmap {
    target: RenderTarget,
}

impl Widget for Heatmap {
    fn update(&mut self, values: &[Value]) {
        let matrix = values.first().map(parse_matrix).unwrap_or_default();
        if matrix.is_empty() {
            self.target.set_lines(vec!["(no data)".to_string()]);
            return;
        }

        let flat: Vec<f64> = matrix.iter().flatten().copied().collect();
        let min = flat.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = flat.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let span = if (max - min).abs() < f64::EPSILON {
            1.0
        } else {
            max - min
        };

        let lines = matrix
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&cell| {
                        let level =
                            (((cell - min) / span) * (SHADES.len() - 1) as f64).round() as usize;
                        let shade = SHADES[level.min(SHADES.len() - 1)];
                        // Two chars per cell so cells read roughly square.
                        [shade, shade].iter().collect::<String>()
                    })
                    .collect()
            })
            .collect();
        self.target.set_lines(lines);
    }

    fn destroy(&mut self) {
        self.target.clear();
    }
}

fn parse_matrix(value: &Value) -> Vec<Vec<f64>> {
    value
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|row| {
                    let cells: Vec<f64> = row.as_array()?.iter().filter_map(Value::as_f64).collect();
                    (!cells.is_empty()).then_some(cells)
                })
                .collect()
        })
        .unwrap_or_default()
}
