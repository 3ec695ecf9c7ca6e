use std::time::Duration;

use rocket::{
    fairing::{Fairing, Info, Kind},
    tokio::sync::Mutex,
    Build, Rocket,
};
use serde::Deserialize;

use crate::analysis::{Analyst, GenerativeAnalyst, OfflineAnalyst};
use crate::model::Election;

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Debug, Deserialize)]
pub struct Config {
    // non-secrets
    #[serde(default = "default_seed_demo_data")]
    seed_demo_data: bool,
    #[serde(default = "default_analysis_endpoint")]
    analysis_endpoint: String,
    #[serde(default = "default_analysis_model")]
    analysis_model: String,
    #[serde(default = "default_analysis_timeout")]
    analysis_timeout: u32,
    // secrets
    #[serde(default)]
    analysis_api_key: Option<String>,
}

fn default_seed_demo_data() -> bool {
    true
}

fn default_analysis_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_analysis_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_analysis_timeout() -> u32 {
    10
}

impl Config {
    /// Whether to start with the demonstration candidates and accounts.
    pub fn seed_demo_data(&self) -> bool {
        self.seed_demo_data
    }

    /// Base URL of the text-generation API.
    pub fn analysis_endpoint(&self) -> &str {
        &self.analysis_endpoint
    }

    /// Model name used for election analysis.
    pub fn analysis_model(&self) -> &str {
        &self.analysis_model
    }

    /// How long to wait for the text-generation API.
    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout.into())
    }

    /// Key for the text-generation API. Without one, analysis always falls back.
    pub fn analysis_api_key(&self) -> Option<&str> {
        self.analysis_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }
}

/// A fairing that loads the application config and puts it in managed state.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Manage the state.
        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// A fairing that creates the in-memory election, seeding it with the
/// demonstration data if configured, and places it into managed state.
/// Must be attached after [`ConfigFairing`].
pub struct ElectionFairing;

#[rocket::async_trait]
impl Fairing for ElectionFairing {
    fn info(&self) -> Info {
        Info {
            name: "Election",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        let Some(config) = rocket.state::<Config>() else {
            error!("Election setup needs the application config");
            return Err(rocket);
        };

        let election = if config.seed_demo_data() {
            match Election::with_demo_data() {
                Ok(election) => election,
                Err(e) => {
                    error!("Failed to seed demonstration data: {e}");
                    return Err(rocket);
                }
            }
        } else {
            Election::new()
        };
        info!(
            "Election ready with {} candidate(s) and {} registered identit{}",
            election.candidates().len(),
            election.identities().len(),
            if election.identities().len() == 1 { "y" } else { "ies" }
        );

        // Manage the state.
        rocket = rocket.manage(Mutex::new(election));
        Ok(rocket)
    }
}

/// A fairing that builds the text-generation client and places it into
/// managed state as a `Box<dyn Analyst>`. Must be attached after [`ConfigFairing`].
pub struct AnalystFairing;

#[rocket::async_trait]
impl Fairing for AnalystFairing {
    fn info(&self) -> Info {
        Info {
            name: "Election analysis",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        let Some(config) = rocket.state::<Config>() else {
            error!("Analysis setup needs the application config");
            return Err(rocket);
        };

        let analyst: Box<dyn Analyst> = match GenerativeAnalyst::from_config(config) {
            Ok(Some(analyst)) => {
                info!("Loaded analysis config for model {}", config.analysis_model());
                Box::new(analyst)
            }
            Ok(None) => {
                warn!("No analysis API key configured, analysis will use the fallback text");
                Box::new(OfflineAnalyst)
            }
            Err(e) => {
                error!("Failed to build analysis client: {e}");
                return Err(rocket);
            }
        };

        // Manage the state.
        rocket = rocket.manage(analyst);
        Ok(rocket)
    }
}
