//! Dashboard Loader
//!
//! Top-level coordinator: `Idle → Loading → Displayed → Loading → …`. A load
//! tears down the outgoing dashboard (disarm all polls, destroy all
//! instances) before any network activity for the incoming one, constructs
//! widgets sequentially in definition order, isolates per-widget failures to
//! inline error panels, and arms one poll per constructed widget. Every load
//! bumps an epoch; in-flight cycles from a superseded dashboard compare
//! their epoch on arrival and discard themselves.

use crate::consts::cli_consts::polling;
use crate::dashboard::aggregator;
use crate::dashboard::error::DashboardError;
use crate::dashboard::instances::WidgetInstanceManager;
use crate::dashboard::model::{DashboardDefinition, WidgetConfig};
use crate::dashboard::registry::WidgetRegistry;
use crate::dashboard::scheduler::PollScheduler;
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, EventType, LoaderPhase};
use crate::logging::LogLevel;
use crate::relay::Relay;
use crate::surface::{Banner, Surface};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

pub struct DashboardLoader {
    relay: Arc<dyn Relay>,
    registry: WidgetRegistry,
    instances: WidgetInstanceManager,
    scheduler: PollScheduler,
    surface: Surface,
    event_sender: mpsc::Sender<Event>,
    classifier: ErrorClassifier,
    /// Monotonically increasing tag identifying the currently displayed
    /// dashboard. Stale async continuations compare against it.
    epoch: Arc<AtomicU64>,
    phase: LoaderPhase,
}

impl DashboardLoader {
    pub fn new(
        relay: Arc<dyn Relay>,
        registry: WidgetRegistry,
        surface: Surface,
        event_sender: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            relay,
            registry,
            instances: WidgetInstanceManager::new(),
            scheduler: PollScheduler::new(),
            surface,
            event_sender,
            classifier: ErrorClassifier::new(),
            epoch: Arc::new(AtomicU64::new(0)),
            phase: LoaderPhase::Idle,
        }
    }

    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    pub fn live_widgets(&self) -> usize {
        self.instances.len()
    }

    pub fn armed_polls(&self) -> usize {
        self.scheduler.armed_count()
    }

    /// Loads and displays one dashboard by catalog filename. A definition
    /// fetch failure is fatal to this attempt only; per-widget failures are
    /// rendered inline and do not abort their siblings.
    pub async fn load(&mut self, filename: &str) -> Result<(), DashboardError> {
        self.set_phase(LoaderPhase::Loading, format!("Loading dashboard {filename}"))
            .await;

        // Teardown happens-before any network activity for the incoming
        // dashboard, so stale timers cannot fire into its panels.
        self.scheduler.disarm_all();
        self.instances.destroy_all();
        self.surface
            .reset(Some(Banner::Loading("Loading Dashboard...".to_string())));
        self.epoch.fetch_add(1, Ordering::SeqCst);

        let definition = match self.relay.dashboard_config(filename).await {
            Ok(definition) => definition,
            Err(source) => {
                let level = self.classifier.classify_fetch_error(&source);
                self.send_event(Event::loader_with_level(
                    format!("Failed to fetch definition for {filename}: {source}"),
                    EventType::Error,
                    level,
                ))
                .await;
                self.surface
                    .set_banner(Banner::Error("Error loading dashboard.".to_string()));
                self.set_phase(LoaderPhase::Idle, format!("Failed to load {filename}"))
                    .await;
                return Err(DashboardError::DefinitionUnavailable {
                    name: filename.to_string(),
                    source,
                });
            }
        };

        self.display(definition).await;
        self.set_phase(
            LoaderPhase::Displayed,
            format!("Displaying dashboard {filename}"),
        )
        .await;
        Ok(())
    }

    /// Materializes a fetched definition: widgets construct sequentially in
    /// listed order so panels appear top-to-bottom in config order and one
    /// widget's construction cannot race another's.
    async fn display(&mut self, definition: DashboardDefinition) {
        self.surface.set_title(&definition.title);

        for config in &definition.widgets {
            match self
                .instances
                .construct(&mut self.registry, &self.surface, self.relay.as_ref(), config)
                .await
            {
                Ok(None) => {
                    self.send_event(Event::widget_with_level(
                        format!("Constructed widget {}", config.id),
                        EventType::Success,
                        LogLevel::Debug,
                    ))
                    .await;
                }
                Ok(Some(cycle_err)) => {
                    // Constructed, but the initial fetch failed. The widget
                    // keeps its empty render; the schedule retries.
                    let level = self.classifier.classify_cycle_error(&cycle_err);
                    self.send_event(Event::widget_with_level(
                        format!("Initial refresh of {} failed: {cycle_err}", config.id),
                        EventType::Error,
                        level,
                    ))
                    .await;
                }
                Err(err) => {
                    debug_assert!(err.is_widget_scoped());
                    // A duplicate never got its own panel; marking the id
                    // would hit its namesake's panel instead.
                    if !matches!(err, DashboardError::DuplicateWidgetId(_)) {
                        self.surface.set_panel_error(&config.id, &err.to_string());
                    }
                    self.send_event(Event::widget_with_level(
                        err.to_string(),
                        EventType::Error,
                        LogLevel::Error,
                    ))
                    .await;
                    // Never schedule polling for a widget that failed to
                    // construct; continue with its siblings.
                    continue;
                }
            }
            self.arm_widget(config).await;
        }
    }

    /// Arms the recurring refresh for one constructed widget.
    async fn arm_widget(&mut self, config: &WidgetConfig) {
        let interval = polling::clamp_refresh_interval(config.refresh_interval);
        let relay = self.relay.clone();
        let instances = self.instances.clone();
        let event_sender = self.event_sender.clone();
        let classifier = self.classifier.clone();
        let epoch = self.epoch.clone();
        let armed_at = epoch.load(Ordering::SeqCst);
        let widget_id = config.id.clone();
        let config = Arc::new(config.clone());

        let armed = self.scheduler.arm(&widget_id, interval, move || {
            let relay = relay.clone();
            let instances = instances.clone();
            let event_sender = event_sender.clone();
            let classifier = classifier.clone();
            let epoch = epoch.clone();
            let config = config.clone();
            async move {
                let result = aggregator::run_cycle(relay.as_ref(), &config.data_sources).await;

                // The dashboard may have been switched away while the
                // fetches were in flight; a stale cycle drops itself.
                if epoch.load(Ordering::SeqCst) != armed_at {
                    return;
                }

                match result {
                    Ok(values) => {
                        if instances.apply_update(&config.id, &values) {
                            let _ = event_sender
                                .send(Event::widget_with_level(
                                    format!("Refreshed widget {}", config.id),
                                    EventType::Refresh,
                                    LogLevel::Debug,
                                ))
                                .await;
                        }
                    }
                    Err(cycle_err) => {
                        let level = classifier.classify_cycle_error(&cycle_err);
                        let _ = event_sender
                            .send(Event::widget_with_level(
                                format!("Refresh of {} failed: {cycle_err}", config.id),
                                EventType::Error,
                                level,
                            ))
                            .await;
                    }
                }
            }
        });

        if armed {
            self.send_event(Event::scheduler_with_level(
                format!("Armed {}ms poll for widget {widget_id}", interval.as_millis()),
                EventType::Success,
                LogLevel::Debug,
            ))
            .await;
        }
    }

    async fn set_phase(&mut self, phase: LoaderPhase, msg: String) {
        self.phase = phase;
        self.send_event(Event::state_change(phase, msg)).await;
    }

    async fn send_event(&self, event: Event) {
        let _ = self.event_sender.send(event).await;
    }
}
