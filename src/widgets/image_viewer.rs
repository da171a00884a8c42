//! Image viewer: reports the image delivered by its source.
//!
//! Payloads carry `{b64_image, mime_type, filename}`. A terminal cannot
//! display the decoded bytes, so the panel reports name, type, and decoded
//! size; generic `application/octet-stream` payloads are flagged as
//! downloads rather than images.

use crate::dashboard::model::WidgetConfig;
use crate::surface::RenderTarget;
use crate::widgets::{Widget, WidgetFactory};
use serde_json::Value;

const DEFAULT_MIME: &str = "application/octet-stream";
const DEFAULT_FILENAME: &str = "downloaded_file";

pub struct ImageViewerFactory;

impl WidgetFactory for ImageViewerFactory {
    fn type_tag(&self) -> &'static str {
        "image-viewer"
    }

    fn stylesheet(&self) -> Option<&'static str> {
        Some("image-viewer { fit: width; caption: below }")
    }

    fn create(
        &self,
        target: RenderTarget,
        _config: &WidgetConfig,
    ) -> Result<Box<dyn Widget>, String> {
        Ok(Box::new(ImageViewer { target }))
    }
}

struct ImageViewer {
    target: RenderTarget,
}

impl Widget for ImageViewer {
    fn update(&mut self, values: &[Value]) {
        let Some(b64) = values
            .first()
            .and_then(|payload| payload.get("b64_image"))
            .and_then(Value::as_str)
        else {
            self.target
                .set_lines(vec!["(no data received)".to_string()]);
            return;
        };
        let payload = &values[0];
        let mime = payload
            .get("mime_type")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_MIME);
        let filename = payload
            .get("filename")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_FILENAME);
        let size = format_size(decoded_len(b64));

        let line = if mime == DEFAULT_MIME {
            format!("download: {filename} ({size})")
        } else {
            format!("image: {filename} ({mime}, {size})")
        };
        self.target.set_lines(vec![line]);
    }

    fn destroy(&mut self) {
        self.target.clear();
    }
}

/// Decoded byte count of a base64 string, accounting for padding.
fn decoded_len(b64: &str) -> usize {
    let padding = b64.bytes().rev().take_while(|&b| b == b'=').count();
    (b64.len() / 4) * 3 - padding
}

fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;
    use serde_json::json;

    fn make() -> (Surface, Box<dyn Widget>) {
        let config: WidgetConfig = serde_json::from_value(json!({
            "id": "w1",
            "type": "image-viewer",
            "title": "Capture",
            "refreshInterval": 5000
        }))
        .unwrap();
        let surface = Surface::new();
        let target = surface.create_panel("w1", "Capture");
        let widget = ImageViewerFactory.create(target, &config).unwrap();
        (surface, widget)
    }

    #[test]
    fn test_image_payload_reports_name_type_and_size() {
        let (surface, mut widget) = make();
        widget.update(&[json!({
            "b64_image": "aGVsbG8=",
            "mime_type": "image/png",
            "filename": "latest.png"
        })]);
        assert_eq!(
            surface.snapshot().panels[0].lines,
            vec!["image: latest.png (image/png, 5 B)".to_string()]
        );
    }

    #[test]
    fn test_octet_stream_defaults_flag_a_download() {
        let (surface, mut widget) = make();
        // mime_type and filename are optional; the generic type is treated
        // as a file delivery, not an image.
        widget.update(&[json!({"b64_image": "aGVsbG8="})]);
        assert_eq!(
            surface.snapshot().panels[0].lines,
            vec!["download: downloaded_file (5 B)".to_string()]
        );
    }

    #[test]
    fn test_missing_image_data_is_reported() {
        let (surface, mut widget) = make();
        widget.update(&[json!({"filename": "latest.png"})]);
        assert_eq!(
            surface.snapshot().panels[0].lines,
            vec!["(no data received)".to_string()]
        );
    }
}
