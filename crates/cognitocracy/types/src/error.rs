//! Governance error types.

use thiserror::Error;

use crate::ids::{ChamberId, GovernorAddress, ProposalId};
use crate::proposal::Stage;

/// Result type for engine and store operations
pub type GovernanceResult<T> = Result<T, GovernanceError>;

/// Errors raised by the transition-legality check, the delegation graph and
/// lifecycle stores.
///
/// Quorum evaluation never fails; malformed numbers are normalized instead.
/// A stale compare-and-set is reported as `Ok(false)`, not as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    /// The requested stage change is not an edge of the lifecycle.
    #[error("invalid stage transition: {from} -> {to}")]
    InvalidTransition { from: Stage, to: Stage },

    /// The requested delegation would close a loop in the chamber graph.
    #[error("delegation cycle in chamber {chamber}: {delegator} -> {delegatee}")]
    DelegationCycle {
        chamber: ChamberId,
        delegator: GovernorAddress,
        delegatee: GovernorAddress,
    },

    /// An optimistic delegation write was computed against an outdated graph.
    #[error("stale delegation view: expected version {expected}, current {current}")]
    StaleDelegationView { expected: u64, current: u64 },

    /// No proposal with this id exists.
    #[error("proposal not found: {0}")]
    ProposalNotFound(ProposalId),

    /// A record with this identity already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Backing store failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl GovernanceError {
    /// Stable machine-readable kind, for mapping to caller-facing responses.
    pub fn kind(&self) -> &'static str {
        match self {
            GovernanceError::InvalidTransition { .. } => "invalid_transition",
            GovernanceError::DelegationCycle { .. } => "delegation_cycle",
            GovernanceError::StaleDelegationView { .. } => "stale_delegation_view",
            GovernanceError::ProposalNotFound(_) => "proposal_not_found",
            GovernanceError::Conflict(_) => "conflict",
            GovernanceError::Storage(_) => "storage",
        }
    }

    /// Whether retrying against fresh state can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GovernanceError::StaleDelegationView { .. } | GovernanceError::Storage(_)
        )
    }
}
