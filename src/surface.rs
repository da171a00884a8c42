//! Shared render surface.
//!
//! The surface is the terminal analogue of the widget container: an ordered
//! list of panels plus a dashboard-level banner, written by widget instances
//! through [`RenderTarget`] handles and read by the UI as snapshots. Panels
//! are created in construction order, so the display order always matches
//! the definition's widget order.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Dashboard-level display state shown instead of (or above) the panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Loading(String),
    Error(String),
}

/// One widget's render region.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    pub id: String,
    pub title: String,
    pub lines: Vec<String>,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct SurfaceState {
    title: String,
    banner: Option<Banner>,
    panels: Vec<Panel>,
    /// Per-type presentation rules, injected once per widget type.
    styles: Vec<String>,
    injected_types: HashSet<String>,
}

/// Read-only copy of the surface for rendering.
#[derive(Debug, Clone, Default)]
pub struct SurfaceSnapshot {
    pub title: String,
    pub banner: Option<Banner>,
    pub panels: Vec<Panel>,
    pub styles: Vec<String>,
}

/// Cheaply cloneable handle to the shared surface. The inner lock is only
/// ever held for short, non-suspending critical sections.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    inner: Arc<Mutex<SurfaceState>>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every panel and sets the dashboard-level banner. Used on
    /// teardown ("Loading...") and on definition-fetch failure.
    pub fn reset(&self, banner: Option<Banner>) {
        let mut state = self.inner.lock().unwrap();
        state.panels.clear();
        state.title.clear();
        state.banner = banner;
    }

    pub fn set_title(&self, title: &str) {
        let mut state = self.inner.lock().unwrap();
        state.title = title.to_string();
        state.banner = None;
    }

    pub fn set_banner(&self, banner: Banner) {
        self.inner.lock().unwrap().banner = Some(banner);
    }

    /// Appends a panel and returns the handle a widget renders through.
    pub fn create_panel(&self, id: &str, title: &str) -> RenderTarget {
        let mut state = self.inner.lock().unwrap();
        state.panels.push(Panel {
            id: id.to_string(),
            title: title.to_string(),
            lines: Vec::new(),
            error: None,
        });
        RenderTarget {
            surface: self.clone(),
            panel_id: id.to_string(),
        }
    }

    /// Marks a panel as failed. No-op if the panel does not exist.
    pub fn set_panel_error(&self, id: &str, message: &str) {
        let mut state = self.inner.lock().unwrap();
        if let Some(panel) = state.panels.iter_mut().find(|p| p.id == id) {
            panel.error = Some(message.to_string());
        }
    }

    /// Records a widget type's presentation rules exactly once per type.
    /// Returns true when the payload was newly injected.
    pub fn inject_style(&self, type_tag: &str, style: &str) -> bool {
        let mut state = self.inner.lock().unwrap();
        if !state.injected_types.insert(type_tag.to_string()) {
            return false;
        }
        state.styles.push(style.to_string());
        true
    }

    pub fn panel_count(&self) -> usize {
        self.inner.lock().unwrap().panels.len()
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        let state = self.inner.lock().unwrap();
        SurfaceSnapshot {
            title: state.title.clone(),
            banner: state.banner.clone(),
            panels: state.panels.clone(),
            styles: state.styles.clone(),
        }
    }
}

/// Handle to one panel of the surface. Writes from a widget whose panel has
/// been torn down in the meantime land nowhere.
#[derive(Debug, Clone)]
pub struct RenderTarget {
    surface: Surface,
    panel_id: String,
}

impl RenderTarget {
    /// Replaces the panel's content and clears any error.
    pub fn set_lines(&self, lines: Vec<String>) {
        let mut state = self.surface.inner.lock().unwrap();
        if let Some(panel) = state.panels.iter_mut().find(|p| p.id == self.panel_id) {
            panel.lines = lines;
            panel.error = None;
        }
    }

    pub fn set_error(&self, message: &str) {
        self.surface.set_panel_error(&self.panel_id, message);
    }

    pub fn clear(&self) {
        self.set_lines(Vec::new());
    }
}
