//! Event System
//!
//! Types and implementations for dashboard session events and logging

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Component {
    /// The dashboard loader coordinating load and teardown.
    DashboardLoader,
    /// Per-widget runtime: construction, aggregation cycles, updates.
    WidgetRuntime,
    /// The poll scheduler arming and disarming refresh timers.
    PollScheduler,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    StateChange,
}

/// Represents the current phase of the dashboard loader state machine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum LoaderPhase {
    /// No dashboard displayed.
    Idle,
    /// Tearing down the previous dashboard and fetching the next definition.
    Loading,
    /// A dashboard is displayed and its widgets are polling.
    Displayed,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Event {
    pub component: Component,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Optional phase information for state change events
    pub loader_phase: Option<LoaderPhase>,
}

impl Event {
    fn new(component: Component, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            component,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            loader_phase: None,
        }
    }

    pub fn state_change(phase: LoaderPhase, msg: String) -> Self {
        Self {
            component: Component::DashboardLoader,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type: EventType::StateChange,
            log_level: LogLevel::Info,
            loader_phase: Some(phase),
        }
    }

    pub fn loader_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Component::DashboardLoader, msg, event_type, log_level)
    }

    pub fn widget_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Component::WidgetRuntime, msg, event_type, log_level)
    }

    pub fn scheduler_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Component::PollScheduler, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // StateChange events drive the header, not the activity log
        if self.event_type == EventType::StateChange {
            return false;
        }
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_change_carries_phase() {
        let event = Event::state_change(LoaderPhase::Loading, "loading trig demo".to_string());
        assert_eq!(event.loader_phase, Some(LoaderPhase::Loading));
        assert_eq!(event.event_type, EventType::StateChange);
        assert!(!event.should_display());
    }

    #[test]
    fn test_success_events_always_display() {
        let event =
            Event::widget_with_level("w1 refreshed".to_string(), EventType::Success, LogLevel::Debug);
        assert!(event.should_display());
    }
}
