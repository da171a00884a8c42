//! Advanced plot: mixed line and scatter series on one shared grid.
//!
//! Each data source declares its rendition through the per-source `type`
//! field (`line` or `scatter`); sources without a recognized type are left
//! out of the plot. Axis configuration comes from the widget's
//! `chartOptions` extras: `xAxis`/`yAxis` each take a `title` and a `type`
//! of `linear` (default) or `logarithmic`. Logarithmic axes plot log10 of
//! the coordinate and skip non-positive values.

use crate::dashboard::model::WidgetConfig;
use crate::surface::RenderTarget;
use crate::widgets::{Widget, WidgetFactory, bounds, parse_points, scale};
use serde_json::Value;

const GRID_WIDTH: usize = 60;
const GRID_HEIGHT: usize = 12;
const SCATTER_MARKS: [char; 4] = ['o', '*', 'x', '#'];
const LINE_MARK: char = '.';

pub struct AdvancedPlotFactory;

impl WidgetFactory for AdvancedPlotFactory {
    fn type_tag(&self) -> &'static str {
        "advanced-plot"
    }

    fn stylesheet(&self) -> Option<&'static str> {
        Some("advanced-plot { grid: shared; axis-labels: top }")
    }

    fn create(
        &self,
        target: RenderTarget,
        config: &WidgetConfig,
    ) -> Result<Box<dyn Widget>, String> {
        let series = config
            .data_sources
            .iter()
            .map(|ds| SeriesSpec {
                label: ds.label.clone(),
                kind: match ds.plot_type.as_deref() {
                    Some("line") => Some(SeriesKind::Line),
                    Some("scatter") => Some(SeriesKind::Scatter),
                    _ => None,
                },
            })
            .collect();
        Ok(Box::new(AdvancedPlot {
            target,
            series,
            x_axis: AxisSpec::from_extras(&config.extra, "xAxis"),
            y_axis: AxisSpec::from_extras(&config.extra, "yAxis"),
        }))
    }
}

#[derive(Clone, Copy, PartialEq)]
enum SeriesKind {
    Line,
    Scatter,
}

struct SeriesSpec {
    label: String,
    /// `None` for unrecognized source types; the slot still exists so
    /// positional updates stay aligned, it just never draws.
    kind: Option<SeriesKind>,
}

struct AxisSpec {
    title: Option<String>,
    logarithmic: bool,
}

impl AxisSpec {
    fn from_extras(extra: &serde_json::Map<String, Value>, axis: &str) -> Self {
        let options = extra.get("chartOptions").and_then(|opts| opts.get(axis));
        Self {
            title: options
                .and_then(|o| o.get("title"))
                .and_then(Value::as_str)
                .map(str::to_string),
            logarithmic: options
                .and_then(|o| o.get("type"))
                .and_then(Value::as_str)
                == Some("logarithmic"),
        }
    }

    /// Transforms one coordinate onto this axis, `None` if it cannot be
    /// placed (non-positive on a log axis).
    fn place(&self, value: f64) -> Option<f64> {
        if self.logarithmic {
            (value > 0.0).then(|| value.log10())
        } else {
            Some(value)
        }
    }

    fn describe(&self, name: &str) -> Option<String> {
        if self.title.is_none() && !self.logarithmic {
            return None;
        }
        let title = self.title.as_deref().unwrap_or("");
        let suffix = if self.logarithmic { " [log]" } else { "" };
        Some(format!("{name}: {title}{suffix}"))
    }
}

struct AdvancedPlot {
    target: RenderTarget,
    series: Vec<SeriesSpec>,
    x_axis: AxisSpec,
    y_axis: AxisSpec,
}

impl Widget for AdvancedPlot {
    fn update(&mut self, values: &[Value]) {
        // Values arrive in dataSources order; zip keeps typed-out slots
        // aligned with their payloads.
        let plotted: Vec<(SeriesKind, Vec<(f64, f64)>)> = self
            .series
            .iter()
            .zip(values)
            .filter_map(|(spec, value)| {
                let kind = spec.kind?;
                let points: Vec<(f64, f64)> = parse_points(value)
                    .into_iter()
                    .filter_map(|(x, y)| Some((self.x_axis.place(x)?, self.y_axis.place(y)?)))
                    .collect();
                Some((kind, points))
            })
            .collect();

        let all: Vec<(f64, f64)> = plotted.iter().flat_map(|(_, pts)| pts).copied().collect();
        if all.is_empty() {
            self.target.set_lines(vec!["(no data)".to_string()]);
            return;
        }

        let (x_min, x_max) = bounds(all.iter().map(|&(x, _)| x));
        let (y_min, y_max) = bounds(all.iter().map(|&(_, y)| y));

        let mut grid = vec![vec![' '; GRID_WIDTH]; GRID_HEIGHT];
        let mut scatter_index = 0;
        for (kind, points) in &plotted {
            let mark = match kind {
                SeriesKind::Line => LINE_MARK,
                SeriesKind::Scatter => {
                    let mark = SCATTER_MARKS[scatter_index % SCATTER_MARKS.len()];
                    scatter_index += 1;
                    mark
                }
            };
            for &(x, y) in points {
                let col = scale(x, x_min, x_max, GRID_WIDTH - 1);
                // Row 0 is the top of the panel.
                let row = GRID_HEIGHT - 1 - scale(y, y_min, y_max, GRID_HEIGHT - 1);
                grid[row][col] = mark;
            }
        }

        let mut lines = Vec::with_capacity(GRID_HEIGHT + 3);
        if let Some(line) = self.x_axis.describe("x") {
            lines.push(line);
        }
        if let Some(line) = self.y_axis.describe("y") {
            lines.push(line);
        }
        lines.extend(grid.into_iter().map(|row| row.into_iter().collect::<String>()));
        lines.push(self.legend());
        self.target.set_lines(lines);
    }

    fn destroy(&mut self) {
        self.target.clear();
    }
}

impl AdvancedPlot {
    fn legend(&self) -> String {
        let mut scatter_index = 0;
        self.series
            .iter()
            .filter_map(|spec| {
                let mark = match spec.kind? {
                    SeriesKind::Line => LINE_MARK,
                    SeriesKind::Scatter => {
                        let mark = SCATTER_MARKS[scatter_index % SCATTER_MARKS.len()];
                        scatter_index += 1;
                        mark
                    }
                };
                Some(format!("{mark} {}", spec.label))
            })
            .collect::<Vec<_>>()
            .join("   ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;
    use serde_json::json;

    fn make(raw: Value) -> (Surface, Box<dyn Widget>) {
        let config: WidgetConfig = serde_json::from_value(raw).unwrap();
        let surface = Surface::new();
        let target = surface.create_panel("w1", "Mixed");
        let widget = AdvancedPlotFactory.create(target, &config).unwrap();
        (surface, widget)
    }

    fn mixed_config() -> Value {
        json!({
            "id": "w1",
            "type": "advanced-plot",
            "title": "Mixed",
            "refreshInterval": 1000,
            "chartOptions": {
                "xAxis": {"type": "linear", "title": "Time (s)"},
                "yAxis": {"type": "logarithmic", "title": "Amplitude"}
            },
            "dataSources": [
                {
                    "label": "trend",
                    "type": "line",
                    "dataKey": "points",
                    "source": {"clientId": "c", "experiment": "e"}
                },
                {
                    "label": "samples",
                    "type": "scatter",
                    "dataKey": "points",
                    "source": {"clientId": "c", "experiment": "e"}
                }
            ]
        })
    }

    #[test]
    fn test_mixed_series_share_one_grid() {
        let (surface, mut widget) = make(mixed_config());
        widget.update(&[
            json!([{"x": 0.0, "y": 1.0}, {"x": 10.0, "y": 100.0}]),
            json!([{"x": 5.0, "y": 10.0}]),
        ]);

        let lines = surface.snapshot().panels[0].lines.clone();
        // Two axis description lines, the grid, one legend line.
        assert_eq!(lines.len(), 2 + GRID_HEIGHT + 1);
        assert_eq!(lines[0], "x: Time (s)");
        assert_eq!(lines[1], "y: Amplitude [log]");
        let body = lines[2..2 + GRID_HEIGHT].join("\n");
        assert!(body.contains('.'));
        assert!(body.contains('o'));
        assert_eq!(lines.last().unwrap(), ". trend   o samples");
    }

    #[test]
    fn test_log_axis_drops_non_positive_values() {
        let (surface, mut widget) = make(mixed_config());
        // On a log y axis only the positive point can be placed; a single
        // point degenerates the bounds so it lands at the origin column.
        widget.update(&[json!([{"x": 1.0, "y": -5.0}, {"x": 1.0, "y": 10.0}]), json!([])]);

        let lines = surface.snapshot().panels[0].lines.clone();
        let marks: usize = lines[2..2 + GRID_HEIGHT]
            .iter()
            .map(|row| row.matches('.').count())
            .sum();
        assert_eq!(marks, 1);
    }

    #[test]
    fn test_untyped_source_is_not_drawn() {
        let (surface, mut widget) = make(json!({
            "id": "w1",
            "type": "advanced-plot",
            "title": "Mixed",
            "refreshInterval": 1000,
            "dataSources": [
                {
                    "label": "mystery",
                    "dataKey": "points",
                    "source": {"clientId": "c", "experiment": "e"}
                }
            ]
        }));
        widget.update(&[json!([{"x": 0.0, "y": 1.0}])]);

        assert_eq!(
            surface.snapshot().panels[0].lines,
            vec!["(no data)".to_string()]
        );
    }
}
