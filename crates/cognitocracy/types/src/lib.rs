#![deny(unsafe_code)]
//! Domain types for the cognitocracy governance lifecycle.
//!
//! This crate provides:
//! - **Identifiers** for proposals, chambers and governors ([`ProposalId`], [`ChamberId`], [`GovernorAddress`]).
//! - **Lifecycle types** ([`Stage`], [`Proposal`], [`VoteCounts`]).
//! - **Tallies** supplied fresh on every evaluation ([`PoolCounts`], [`ChamberCounts`]).
//! - **Protocol parameters** as one versioned value ([`ProtocolParams`]).
//! - **Error types** for engine and store failures ([`GovernanceError`]).

pub mod counts;
pub mod error;
pub mod ids;
pub mod params;
pub mod proposal;

pub use counts::{ChamberCounts, PoolCounts, VoteCounts};
pub use error::{GovernanceError, GovernanceResult};
pub use ids::{ChamberId, GovernorAddress, ProposalId};
pub use params::{clamp_fraction, scaled_ceil, scaled_floor, ProtocolParams, UpvoteFloorRule};
pub use proposal::{DelegationEdge, Proposal, Stage};
