mod config;
mod consts;
mod dashboard;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod relay;
mod session;
mod surface;
mod ui;
mod widgets;

use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use crate::relay::{Relay, RelayClient};
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Connect to the relay and display a dashboard
    Start {
        /// Catalog filename of the dashboard to open. Defaults to the saved
        /// selection, then the catalog's first entry.
        #[arg(long, value_name = "DASHBOARD")]
        dashboard: Option<String>,

        /// Run without the terminal UI, logging events to the console.
        #[arg(long)]
        headless: bool,
    },
    /// List the dashboards offered by the relay
    List,
    /// Clear the saved console configuration.
    Logout,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let relay_environment_str = std::env::var("RELAY_ENVIRONMENT").unwrap_or_default();
    let environment = relay_environment_str
        .parse::<Environment>()
        .unwrap_or(Environment::default());

    let config_path = get_config_path()?;
    let args = Args::parse();
    match args.command {
        Command::Start {
            dashboard,
            headless,
        } => {
            let relay = Arc::new(RelayClient::new(environment));
            let session = setup_session(relay, dashboard, &config_path).await?;
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, config_path).await
            }
        }
        Command::List => {
            let relay = RelayClient::new(environment);
            let catalog = relay.list_dashboards().await?;
            if catalog.is_empty() {
                println!("The relay lists no dashboards in environment: {:?}", environment);
            } else {
                for entry in catalog {
                    println!("{}\t{}", entry.filename, entry.name);
                }
            }
            Ok(())
        }
        Command::Logout => {
            println!("Clearing console configuration file...");
            Config::clear(&config_path).map_err(Into::into)
        }
    }
}
