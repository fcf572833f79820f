#![deny(unsafe_code)]
//! Cognitocracy simulator.
//!
//! Loads protocol parameters and a scenario, drives every proposal through
//! the lifecycle engine, applies delegations, and reports the results.

pub mod config;
pub mod error;
pub mod scenario;

pub use config::{LoggingConfig, ScenarioConfig, ScenarioDelegation, ScenarioProposal, SimConfig};
pub use error::{SimError, SimResult};
pub use scenario::{random_scenario, run_scenario, DelegationReport, ProposalReport, SimReport};
