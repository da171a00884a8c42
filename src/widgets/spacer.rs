//! Spacer: fixed-height blank region for dashboard layout. Has no data
//! sources and ignores updates.

use crate::dashboard::model::WidgetConfig;
use crate::surface::RenderTarget;
use crate::widgets::{Widget, WidgetFactory};
use serde_json::Value;

const DEFAULT_HEIGHT: u64 = 1;

pub struct SpacerFactory;

impl WidgetFactory for SpacerFactory {
    fn type_tag(&self) -> &'static str {
        "spacer"
    }

    fn create(
        &self,
        target: RenderTarget,
        config: &WidgetConfig,
    ) -> Result<Box<dyn Widget>, String> {
        let height = config
            .extra
            .get("height")
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_HEIGHT) as usize;
        target.set_lines(vec![String::new(); height]);
        Ok(Box::new(Spacer { target }))
    }
}

struct Spacer {
    target: RenderTarget,
}

impl Widget for Spacer {
    fn update(&mut self, _values: &[Value]) {}

    fn destroy(&mut self) {
        self.target.clear();
    }
}
