//! File viewer: shows the tail of a text payload, like following a log.

use crate::dashboard::model::WidgetConfig;
use crate::surface::RenderTarget;
use crate::widgets::{Widget, WidgetFactory};
use serde_json::Value;

const DEFAULT_MAX_LINES: u64 = 20;

pub struct FileViewerFactory;

impl WidgetFactory for FileViewerFactory {
    fn type_tag(&self) -> &'static str {
        "file-viewer"
    }

    fn stylesheet(&self) -> Option<&'static str> {
        Some("file-viewer { font: monospace; wrap: none }")
    }

    fn create(
        &self,
        target: RenderTarget,
        config: &WidgetConfig,
    ) -> Result<Box<dyn Widget>, String> {
        let max_lines = config
            .extra
            .get("maxLines")
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_MAX_LINES) as usize;
        if max_lines == 0 {
            return Err("maxLines must be at least 1".to_string());
        }
        Ok(Box::new(FileViewer { target, max_lines }))
    }
}

struct FileViewer {
    target: RenderTarget,
    max_lines: usize,
}

impl Widget for FileViewer {
    fn update(&mut self, values: &[Value]) {
        let content = values.first().and_then(Value::as_str).unwrap_or_default();
        if content.is_empty() {
            self.target.set_lines(vec!["(empty)".to_string()]);
            return;
        }
        let all: Vec<&str> = content.lines().collect();
        let tail_start = all.len().saturating_sub(self.max_lines);
        let lines = all[tail_start..].iter().map(|line| line.to_string()).collect();
        self.target.set_lines(lines);
    }

    fn destroy(&mut self) {
        self.target.clear();
    }
}
