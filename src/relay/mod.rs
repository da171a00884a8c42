use crate::dashboard::model::{DashboardDefinition, DashboardDescriptor, SourceAddress};
use crate::environment::Environment;
use crate::relay::error::RelayError;
use serde_json::{Map, Value};

pub(crate) mod client;
pub use client::RelayClient;
pub mod error;

#[cfg(test)]
use mockall::{automock, predicate::*};

/// Boundary to the relay backend: the dashboard catalog, dashboard
/// definitions, and proxied data-source fetches.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Relay: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Fetch the catalog of selectable dashboards.
    async fn list_dashboards(&self) -> Result<Vec<DashboardDescriptor>, RelayError>;

    /// Fetch one dashboard definition by its catalog filename.
    async fn dashboard_config(&self, filename: &str) -> Result<DashboardDefinition, RelayError>;

    /// Fetch one data source's raw payload via the relay's `/data` proxy.
    async fn fetch_source(&self, source: &SourceAddress) -> Result<Map<String, Value>, RelayError>;
}
