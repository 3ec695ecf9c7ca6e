pub mod auth;
pub mod candidate;
pub mod counter;
pub mod election;
pub mod error;
pub mod id;
pub mod identity;
pub mod ledger;
pub mod results;
pub mod seed;
pub mod session;

pub use election::{Election, SharedElection};
