#[path = "e2e/pool_scenarios.rs"]
mod pool_scenarios;

#[path = "e2e/chamber_scenarios.rs"]
mod chamber_scenarios;

#[path = "e2e/lifecycle_races.rs"]
mod lifecycle_races;

#[path = "e2e/delegation_integrity.rs"]
mod delegation_integrity;

#[path = "e2e/simulator.rs"]
mod simulator;
