pub mod headless_mode;
pub mod messages;
pub mod setup;
pub mod tui_mode;

pub use headless_mode::run_headless_mode;
pub use setup::{LoaderCommand, SessionData, setup_session};
pub use tui_mode::run_tui_mode;
