use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents the different relay deployments the console can connect to.
#[derive(Clone, Default, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Local relay, typically `run_relay` on the same machine.
    #[default]
    Local,
    /// Staging relay used for pre-production dashboards.
    Staging,
    /// Production relay serving the lab floor.
    Production,
}

impl Environment {
    /// Returns the relay base URL associated with the environment.
    pub fn relay_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:8080".to_string(),
            Environment::Staging => "https://relay-staging.lab.internal".to_string(),
            Environment::Production => "https://relay.lab.internal".to_string(),
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Staging => write!(f, "Staging"),
            Environment::Production => write!(f, "Production"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.relay_url())
    }
}
