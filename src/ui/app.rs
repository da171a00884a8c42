//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::config::Config;
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::dashboard::model::DashboardDescriptor;
use crate::environment::Environment;
use crate::events::{Event as SessionEvent, EventType, LoaderPhase};
use crate::session::LoaderCommand;
use crate::surface::Surface;
use crate::ui::render::render;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Terminal, backend::Backend};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

/// Application state
pub struct App {
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,

    /// The environment in which the application is running.
    pub environment: Environment,

    /// The catalog of dashboards offered by the relay.
    pub catalog: Vec<DashboardDescriptor>,

    /// Index into the catalog of the dashboard currently selected.
    pub selected: usize,

    /// The loader's current phase, tracked from state change events.
    pub loader_phase: LoaderPhase,

    /// Shared render surface, written by widget instances.
    pub surface: Surface,

    /// Activity logs for display.
    pub activity_logs: VecDeque<SessionEvent>,

    /// Receives events from the loader task.
    event_receiver: mpsc::Receiver<SessionEvent>,

    /// Sends dashboard-switch commands to the loader task.
    control_sender: mpsc::Sender<LoaderCommand>,

    /// Broadcasts shutdown signal to background tasks.
    shutdown_sender: broadcast::Sender<()>,

    /// Where the dashboard selection is persisted.
    config_path: PathBuf,
}

impl App {
    /// Creates a new instance of the application.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        environment: Environment,
        catalog: Vec<DashboardDescriptor>,
        initial_dashboard: String,
        surface: Surface,
        event_receiver: mpsc::Receiver<SessionEvent>,
        control_sender: mpsc::Sender<LoaderCommand>,
        shutdown_sender: broadcast::Sender<()>,
        config_path: PathBuf,
    ) -> Self {
        let selected = catalog
            .iter()
            .position(|entry| entry.filename == initial_dashboard)
            .unwrap_or(0);
        Self {
            start_time: Instant::now(),
            environment,
            catalog,
            selected,
            loader_phase: LoaderPhase::Idle,
            surface,
            activity_logs: VecDeque::new(),
            event_receiver,
            control_sender,
            shutdown_sender,
            config_path,
        }
    }

    /// Queue one event: state changes update the header, the rest feed the
    /// activity log.
    fn add_event(&mut self, event: SessionEvent) {
        if event.event_type == EventType::StateChange {
            if let Some(phase) = event.loader_phase {
                self.loader_phase = phase;
            }
            return;
        }
        if !event.should_display() {
            return;
        }
        self.activity_logs.push_back(event);
        while self.activity_logs.len() > MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
    }

    /// Selects the catalog entry `step` positions away (wrapping) and asks
    /// the loader to switch to it.
    fn switch_dashboard(&mut self, step: isize) {
        if self.catalog.len() < 2 {
            return;
        }
        let len = self.catalog.len() as isize;
        self.selected = ((self.selected as isize + step).rem_euclid(len)) as usize;
        let filename = self.catalog[self.selected].filename.clone();

        if let Err(e) = Config::new(filename.clone()).save(&self.config_path) {
            log::warn!("Failed to persist dashboard selection: {}", e);
        }
        // Queue full means switches are already pending; drop this one.
        let _ = self.control_sender.try_send(LoaderCommand::Load(filename));
    }
}

/// Runs the application UI in a loop, handling events and rendering the
/// dashboard surface.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    loop {
        // Queue all incoming events for processing
        while let Ok(event) = app.event_receiver.try_recv() {
            app.add_event(event);
        }

        terminal.draw(|f| render(f, &app))?;

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                match key.code {
                    // Handle exit events
                    KeyCode::Esc | KeyCode::Char('q') => {
                        // Send shutdown signal to background tasks
                        let _ = app.shutdown_sender.send(());
                        return Ok(());
                    }
                    KeyCode::Left => app.switch_dashboard(-1),
                    KeyCode::Right | KeyCode::Tab => app.switch_dashboard(1),
                    _ => {}
                }
            }
        }
    }
}
