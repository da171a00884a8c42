pub mod cli_consts {
    //! Console Configuration Constants
    //!
    //! Configuration constants for the relay console, organized by
    //! functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum buffered events between the dashboard session and the UI.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Maximum buffered loader commands (dashboard switches) from the UI.
    pub const CONTROL_QUEUE_SIZE: usize = 8;

    // =============================================================================
    // POLLING CONFIGURATION
    // =============================================================================

    /// Widget polling configuration
    pub mod polling {
        use std::time::Duration;

        /// Smallest refresh interval a dashboard definition may request
        /// (milliseconds). Anything lower is clamped to avoid hammering
        /// the relay.
        pub const MIN_REFRESH_INTERVAL_MS: u64 = 100;

        /// Helper function to clamp a configured refresh interval.
        pub const fn clamp_refresh_interval(requested_ms: u64) -> Duration {
            let ms = if requested_ms < MIN_REFRESH_INTERVAL_MS {
                MIN_REFRESH_INTERVAL_MS
            } else {
                requested_ms
            };
            Duration::from_millis(ms)
        }
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// HTTP client configuration
    pub mod http {
        use std::time::Duration;

        /// Connection timeout for relay requests (seconds).
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Overall request timeout for relay requests (seconds).
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        /// Helper function to get the connect timeout duration
        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        /// Helper function to get the request timeout duration
        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }
}
