// Module declarations
mod app;
mod render;
// Re-exports for external use
pub use app::{App, run};
