//! Wire data model for dashboards, widgets, and data sources.
//!
//! Field names mirror the relay's JSON (camelCase); fields the orchestrator
//! does not interpret are kept as an opaque map on [`WidgetConfig`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One entry of the dashboard catalog served at `/dashboards/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardDescriptor {
    pub filename: String,
    pub name: String,
}

/// Wire envelope around one definition: `{"dashboard": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DefinitionEnvelope {
    pub dashboard: DashboardDefinition,
}

/// One dashboard definition, owned by the loader for the duration of one
/// active-dashboard session and superseded wholesale on re-selection.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardDefinition {
    pub title: String,
    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
}

/// Configuration of a single widget within a definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Unique within a definition; duplicates fail construction.
    pub id: String,
    /// Registry key selecting the widget implementation.
    #[serde(rename = "type")]
    pub widget_type: String,
    pub title: String,
    /// Poll interval in milliseconds. Must be > 0; clamped on arming.
    pub refresh_interval: u64,
    #[serde(default)]
    pub data_sources: Vec<DataSourceConfig>,
    /// Widget-type-specific fields (e.g. `chartOptions`), opaque to the
    /// orchestration engine and handed to the implementation untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One independently fetched upstream feed contributing one positional slot
/// to a widget's update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceConfig {
    pub label: String,
    #[serde(default)]
    pub color: Option<String>,
    /// Per-source rendering hint for mixed-mode plots (`line` or `scatter`).
    #[serde(rename = "type", default)]
    pub plot_type: Option<String>,
    /// Field to extract from this source's raw response.
    pub data_key: String,
    pub source: SourceAddress,
}

/// Addressing information forwarded to the relay's `/data` proxy.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAddress {
    pub client_id: String,
    pub experiment: String,
    /// Flat key/value query descriptor forwarded verbatim to the backend.
    #[serde(default)]
    pub endpoint: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DEFINITION: &str = r#"{
        "dashboard": {
            "title": "Trig Functions Demo",
            "widgets": [
                {
                    "id": "sine-widget",
                    "type": "line-plot",
                    "title": "Sine Wave",
                    "refreshInterval": 2000,
                    "chartOptions": {"yAxis": {"min": -1.5, "max": 1.5}},
                    "dataSources": [
                        {
                            "label": "sin(x)",
                            "color": "rgb(75, 192, 192)",
                            "dataKey": "points",
                            "source": {
                                "clientId": "lab-client-1",
                                "experiment": "trig",
                                "endpoint": {"name": "get_sin_data", "points": "50"}
                            }
                        },
                        {
                            "label": "cos(x)",
                            "type": "scatter",
                            "dataKey": "points",
                            "source": {
                                "clientId": "lab-client-1",
                                "experiment": "trig",
                                "endpoint": {"name": "get_cos_data"}
                            }
                        }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    // A definition should parse with camelCase wire names intact.
    fn test_parse_definition_envelope() {
        let envelope: DefinitionEnvelope = serde_json::from_str(SAMPLE_DEFINITION).unwrap();
        let definition = envelope.dashboard;
        assert_eq!(definition.title, "Trig Functions Demo");
        assert_eq!(definition.widgets.len(), 1);

        let widget = &definition.widgets[0];
        assert_eq!(widget.id, "sine-widget");
        assert_eq!(widget.widget_type, "line-plot");
        assert_eq!(widget.refresh_interval, 2000);
        assert_eq!(widget.data_sources.len(), 2);

        let first = &widget.data_sources[0];
        assert_eq!(first.data_key, "points");
        assert_eq!(first.source.client_id, "lab-client-1");
        assert_eq!(
            first.source.endpoint.get("name").map(String::as_str),
            Some("get_sin_data")
        );
        // Color and rendering hint are optional per source.
        assert!(widget.data_sources[1].color.is_none());
        assert!(first.plot_type.is_none());
        assert_eq!(
            widget.data_sources[1].plot_type.as_deref(),
            Some("scatter")
        );
    }

    #[test]
    // Unknown widget-level fields must survive as opaque extras.
    fn test_widget_extras_are_preserved() {
        let envelope: DefinitionEnvelope = serde_json::from_str(SAMPLE_DEFINITION).unwrap();
        let widget = &envelope.dashboard.widgets[0];
        let chart_options = widget.extra.get("chartOptions").unwrap();
        assert_eq!(chart_options["yAxis"]["min"], -1.5);
    }

    #[test]
    // Widgets without data sources (e.g. spacers) are valid.
    fn test_widget_without_data_sources() {
        let raw = r#"{
            "id": "gap-1",
            "type": "spacer",
            "title": "",
            "refreshInterval": 60000
        }"#;
        let widget: WidgetConfig = serde_json::from_str(raw).unwrap();
        assert!(widget.data_sources.is_empty());
    }
}
