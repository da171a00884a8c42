use crate::dashboard::error::CycleError;
use crate::logging::LogLevel;
use crate::relay::error::RelayError;

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_fetch_error(&self, error: &RelayError) -> LogLevel {
        match error {
            // Non-critical: Temporary server issues
            RelayError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            RelayError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Critical: Auth, malformed responses
            RelayError::Http { status, .. } if *status == 401 => LogLevel::Error,
            RelayError::Http { status, .. } if *status == 403 => LogLevel::Error,
            RelayError::Json(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }

    pub fn classify_cycle_error(&self, error: &CycleError) -> LogLevel {
        match error {
            CycleError::SourceFetchFailed { source, .. } => self.classify_fetch_error(source),

            // The source answered; its own payload says the reading failed.
            CycleError::SourceReportedError { .. } => LogLevel::Warn,

            // Critical: the source and the dashboard config disagree on shape
            CycleError::MissingDataKey { .. } => LogLevel::Error,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
