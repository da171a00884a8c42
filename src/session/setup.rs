//! Session setup and initialization

use crate::config::Config;
use crate::consts::cli_consts::{CONTROL_QUEUE_SIZE, EVENT_QUEUE_SIZE};
use crate::dashboard::error::DashboardError;
use crate::dashboard::loader::DashboardLoader;
use crate::dashboard::model::DashboardDescriptor;
use crate::environment::Environment;
use crate::events::Event;
use crate::relay::Relay;
use crate::surface::Surface;
use crate::widgets::builtin_registry;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Commands the UI (or headless driver) sends to the loader task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderCommand {
    /// Load and display the dashboard with this catalog filename.
    Load(String),
}

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Event receiver for loader and widget runtime events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Sends dashboard-switch commands to the loader task
    pub control_sender: mpsc::Sender<LoaderCommand>,
    /// Join handles for background tasks
    pub join_handles: Vec<JoinHandle<()>>,
    /// Shutdown sender to stop all background tasks
    pub shutdown_sender: broadcast::Sender<()>,
    /// The catalog of dashboards offered by the relay
    pub catalog: Vec<DashboardDescriptor>,
    /// Filename of the dashboard loaded first
    pub initial_dashboard: String,
    /// Environment the relay client is connected to
    pub environment: Environment,
    /// Shared render surface written by widgets, read by the UI
    pub surface: Surface,
}

/// Picks the dashboard to open first: an explicit request wins, then the
/// saved default if the catalog still lists it, then the catalog's first
/// entry.
fn select_initial_dashboard(
    requested: Option<String>,
    catalog: &[DashboardDescriptor],
    config_path: &Path,
) -> String {
    if let Some(requested) = requested {
        return requested;
    }
    if let Ok(config) = Config::load_from_file(config_path) {
        if catalog
            .iter()
            .any(|entry| entry.filename == config.default_dashboard)
        {
            return config.default_dashboard;
        }
    }
    catalog[0].filename.clone()
}

/// Sets up a dashboard session
///
/// This function handles all the common setup required for both TUI and
/// headless modes:
/// 1. Fetches the dashboard catalog from the relay
/// 2. Selects and persists the initial dashboard
/// 3. Spawns the loader task and queues the first load
/// 4. Returns session data for mode-specific handling
pub async fn setup_session(
    relay: Arc<dyn Relay>,
    requested_dashboard: Option<String>,
    config_path: &Path,
) -> Result<SessionData, Box<dyn Error>> {
    let environment = *relay.environment();

    let catalog = relay
        .list_dashboards()
        .await
        .map_err(DashboardError::CatalogUnavailable)?;
    if catalog.is_empty() {
        return Err(Box::from("The relay's dashboard catalog is empty."));
    }

    let initial_dashboard = select_initial_dashboard(requested_dashboard, &catalog, config_path);

    // Remember the selection for the next session. Not fatal on failure.
    if let Err(e) = Config::new(initial_dashboard.clone()).save(config_path) {
        log::warn!("Failed to persist dashboard selection: {}", e);
    }

    let (event_sender, event_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
    let (control_sender, mut control_receiver) =
        mpsc::channel::<LoaderCommand>(CONTROL_QUEUE_SIZE);

    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    let surface = Surface::new();
    let mut loader = DashboardLoader::new(
        relay.clone(),
        builtin_registry(),
        surface.clone(),
        event_sender,
    );

    let mut shutdown_receiver = shutdown_sender.subscribe();
    let loader_handle = tokio::spawn(async move {
        loop {
            tokio::select! {
                command = control_receiver.recv() => {
                    match command {
                        // Load failures surface through the banner and the
                        // event stream; the task keeps serving commands.
                        Some(LoaderCommand::Load(filename)) => {
                            let _ = loader.load(&filename).await;
                        }
                        None => break,
                    }
                }
                _ = shutdown_receiver.recv() => break,
            }
        }
    });

    control_sender
        .send(LoaderCommand::Load(initial_dashboard.clone()))
        .await?;

    Ok(SessionData {
        event_receiver,
        control_sender,
        join_handles: vec![loader_handle],
        shutdown_sender,
        catalog,
        initial_dashboard,
        environment,
        surface,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn catalog() -> Vec<DashboardDescriptor> {
        vec![
            DashboardDescriptor {
                filename: "trig_demo.json".to_string(),
                name: "Trig Demo".to_string(),
            },
            DashboardDescriptor {
                filename: "system_health.json".to_string(),
                name: "System Health".to_string(),
            },
        ]
    }

    #[test]
    fn test_explicit_request_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        Config::new("system_health.json".to_string()).save(&path).unwrap();

        let selected =
            select_initial_dashboard(Some("other.json".to_string()), &catalog(), &path);
        assert_eq!(selected, "other.json");
    }

    #[test]
    fn test_saved_default_used_when_still_listed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        Config::new("system_health.json".to_string()).save(&path).unwrap();

        let selected = select_initial_dashboard(None, &catalog(), &path);
        assert_eq!(selected, "system_health.json");
    }

    #[test]
    fn test_stale_default_falls_back_to_first_entry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        Config::new("removed.json".to_string()).save(&path).unwrap();

        let selected = select_initial_dashboard(None, &catalog(), &path);
        assert_eq!(selected, "trig_demo.json");
    }

    #[test]
    fn test_missing_config_falls_back_to_first_entry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let selected = select_initial_dashboard(None, &catalog(), &path);
        assert_eq!(selected, "trig_demo.json");
    }
}
