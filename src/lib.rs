#[macro_use]
extern crate rocket;

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{tokio::sync::Mutex, Build, Rocket};

use crate::analysis::Analyst;
use crate::config::{AnalystFairing, ConfigFairing, ElectionFairing};
use crate::logging::LoggerFairing;
use crate::model::Election;

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

/// Build the server, creating the election and analysis client from config.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .attach(LoggerFairing)
        .attach(ConfigFairing)
        .attach(ElectionFairing)
        .attach(AnalystFairing)
}

/// Build the server around an existing election and analyst.
pub fn rocket_for_election_and_analyst(
    election: Election,
    analyst: Box<dyn Analyst>,
) -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .attach(LoggerFairing)
        .attach(ConfigFairing)
        .manage(Mutex::new(election))
        .manage(analyst)
}

/// A server seeded with the demonstration data and a canned analyst.
#[cfg(test)]
pub(crate) fn test_rocket() -> Rocket<Build> {
    use crate::analysis::examples::StaticAnalyst;

    log4rs_test_utils::test_logging::init_logging_once_for(["securevote_backend"], None, None);

    rocket_for_election_and_analyst(
        Election::with_demo_data().unwrap(),
        Box::new(StaticAnalyst::example()),
    )
}
