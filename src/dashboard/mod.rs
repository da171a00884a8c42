pub mod aggregator;
pub mod error;
pub mod instances;
pub mod loader;
pub mod model;
pub mod registry;
pub mod scheduler;

pub use error::{CycleError, DashboardError};
pub use loader::DashboardLoader;
pub use model::{DashboardDefinition, DashboardDescriptor, WidgetConfig};
pub use registry::WidgetRegistry;
