//! Scatter plot: points placed on a fixed character grid.

use crate::dashboard::model::WidgetConfig;
use crate::surface::RenderTarget;
use crate::widgets::{Widget, WidgetFactory, bounds, parse_points, scale};
use serde_json::Value;

const GRID_WIDTH: usize = 60;
const GRID_HEIGHT: usize = 12;
const MARKS: [char; 6] = ['o', '*', '+', 'x', '#', '@'];

pub struct ScatterPlotFactory;

impl WidgetFactory for ScatterPlotFactory {
    fn type_tag(&self) -> &'static str {
        "scatter-plot"
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
        Ok(Box::new(ScatterPlot { target, labels }))
    }
}

struct ScatterPlot {
    target: RenderTarget,
    labels: Vec<String>,
}

impl Widget for ScatterPlot {
    fn update(&mut self, values: &[Value]) {
        let series: Vec<Vec<(f64, f64)>> = values.iter().map(parse_points).collect();
        let all: Vec<(f64, f64)> = series.iter().flatten().copied().collect();
        if all.is_empty() {
            self.target.set_lines(vec!["(no data)".to_string()]);
            return;
        }

        let (x_min, x_max) = bounds(all.iter().map(|&(x, _)| x));
        let (y_min, y_max) = bounds(all.iter().map(|&(_, y)| y));

        let mut grid = vec![vec![' '; GRID_WIDTH]; GRID_HEIGHT];
        for (index, points) in series.iter().enumerate() {
            let mark = MARKS[index % MARKS.len()];
            for &(x, y) in points {
                let col = scale(x, x_min, x_max, GRID_WIDTH - 1);
                // Row 0 is the top of the panel.
                let row = GRID_HEIGHT - 1 - scale(y, y_min, y_max, GRID_HEIGHT - 1);
                grid[row][col] = mark;
            }
        }

        let mut lines: Vec<String> = grid.into_iter().map(|row| row.into_iter().collect()).collect();
        let legend = self
            .labels
            .iter()
            .enumerate()
            .map(|(index, label)| format!("{} {label}", MARKS[index % MARKS.len()]))
            .collect::<Vec<_>>()
            .join("   ");
        lines.push(legend);
        self.target.set_lines(lines);
    }

    fn destroy(&mut self) {
        self.target.clear();
    }
}
