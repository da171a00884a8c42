//! Status lines printed outside the TUI (startup, shutdown).

const COLOR_INFO: &str = "\x1b[1;36m"; // Bold Cyan
const COLOR_SUCCESS: &str = "\x1b[1;32m"; // Bold Green
const COLOR_RESET: &str = "\x1b[0m";

pub fn print_session_starting(mode: &str, dashboard: &str) {
    println!("{COLOR_INFO}[INFO]{COLOR_RESET} Starting {mode} mode with dashboard: {dashboard}");
}

pub fn print_session_shutdown() {
    println!("{COLOR_INFO}[INFO]{COLOR_RESET} Shutting down...");
}

pub fn print_session_exit_success() {
    println!("{COLOR_SUCCESS}[SUCCESS]{COLOR_RESET} Relay console exited successfully");
}
