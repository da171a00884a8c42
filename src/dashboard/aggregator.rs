//! Data Aggregator
//!
//! One aggregation cycle for one widget: every source fetch is issued before
//! any is awaited, results are reassembled in `dataSources` order regardless
//! of completion order, and any single failure fails the whole cycle.
//! Partial results are never delivered — a widget's internal indices assume
//! complete, order-preserving data.

use crate::dashboard::error::CycleError;
use crate::dashboard::model::DataSourceConfig;
use crate::relay::Relay;
use crate::relay::error::RelayError;
use futures::future;
use serde_json::{Map, Value};

/// Runs one fetch-all/await-all/extract cycle. Returns the per-source
/// extracted values positionally aligned with `data_sources`, or the first
/// failure in source order.
pub async fn run_cycle(
    relay: &dyn Relay,
    data_sources: &[DataSourceConfig],
) -> Result<Vec<Value>, CycleError> {
    // Fan-out: build every request future before awaiting any of them.
    let fetches: Vec<_> = data_sources
        .iter()
        .map(|ds| relay.fetch_source(&ds.source))
        .collect();

    // Fan-in: join_all preserves input order independent of completion order.
    let payloads = future::join_all(fetches).await;

    data_sources
        .iter()
        .zip(payloads)
        .map(|(ds, payload)| extract_value(ds, payload))
        .collect()
}

/// Applies the per-source failure policy and pulls out the configured
/// `dataKey` field.
fn extract_value(
    ds: &DataSourceConfig,
    payload: Result<Map<String, Value>, RelayError>,
) -> Result<Value, CycleError> {
    let payload = payload.map_err(|source| CycleError::SourceFetchFailed {
        label: ds.label.clone(),
        source,
    })?;

    if let Some(error) = payload.get("error") {
        let message = error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(CycleError::SourceReportedError {
            label: ds.label.clone(),
            message,
        });
    }

    payload
        .get(&ds.data_key)
        .cloned()
        .ok_or_else(|| CycleError::MissingDataKey {
            label: ds.label.clone(),
            data_key: ds.data_key.clone(),
        })
}
