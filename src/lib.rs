//! Monte Carlo estimation of convertible-bond conversion outcomes.
//!
//! Flow: [`config::ModelConfig`] -> [`simulation::run_simulation`] (repeated
//! path stepping via [`models::StochasticStep`]) -> [`state::TerminalPriceSample`]
//! -> [`outcome::aggregate`] -> [`state::OutcomeReport`].

pub mod config;
pub mod errors;
pub mod models;
pub mod outcome;
pub mod report;
pub mod rng;
pub mod simulation;
pub mod state;
