//! Relay Client
//!
//! A client for the relay server, providing the dashboard catalog, dashboard
//! definitions, and proxied data-source fetches over HTTP/JSON.

use crate::consts::cli_consts::http;
use crate::dashboard::model::{
    DashboardDefinition, DashboardDescriptor, DefinitionEnvelope, SourceAddress,
};
use crate::environment::Environment;
use crate::relay::Relay;
use crate::relay::error::RelayError;
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

// User-Agent string with console version
const USER_AGENT: &str = concat!("relay-console/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    environment: Environment,
}

impl RelayClient {
    pub fn new(environment: Environment) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(http::connect_timeout())
                .timeout(http::request_timeout())
                .build()
                .expect("Failed to create HTTP client"),
            environment,
        }
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.relay_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Builds the `/data` query for one source: `client_id` and `experiment`
    /// first, then the endpoint descriptor forwarded verbatim.
    fn data_endpoint(source: &SourceAddress) -> String {
        let mut endpoint = format!(
            "data?client_id={}&experiment={}",
            urlencoding::encode(&source.client_id),
            urlencoding::encode(&source.experiment),
        );
        for (key, value) in &source.endpoint {
            endpoint.push('&');
            endpoint.push_str(&urlencoding::encode(key));
            endpoint.push('=');
            endpoint.push_str(&urlencoding::encode(value));
        }
        endpoint
    }

    async fn handle_response_status(response: Response) -> Result<Response, RelayError> {
        if !response.status().is_success() {
            return Err(RelayError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, RelayError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&response_bytes)?)
    }
}

#[async_trait::async_trait]
impl Relay for RelayClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Fetch the catalog of selectable dashboards.
    async fn list_dashboards(&self) -> Result<Vec<DashboardDescriptor>, RelayError> {
        self.get_json("dashboards/list").await
    }

    /// Fetch one dashboard definition by its catalog filename.
    async fn dashboard_config(&self, filename: &str) -> Result<DashboardDefinition, RelayError> {
        let endpoint = format!("dashboards/config?name={}", urlencoding::encode(filename));
        let envelope: DefinitionEnvelope = self.get_json(&endpoint).await?;
        Ok(envelope.dashboard)
    }

    /// Fetch one data source's raw payload via the relay's `/data` proxy.
    async fn fetch_source(&self, source: &SourceAddress) -> Result<Map<String, Value>, RelayError> {
        self.get_json(&Self::data_endpoint(source)).await
    }
}
