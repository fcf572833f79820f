#![deny(unsafe_code)]
//! Governance lifecycle engine.
//!
//! This crate provides:
//! - **Quorum evaluators**, pure and total ([`evaluate_pool_quorum`], [`evaluate_chamber_quorum`]).
//! - **Transition policy** binding the evaluators to protocol parameters ([`StageTransitionPolicy`]).
//! - **Lifecycle storage** with compare-and-set stage moves ([`ProposalLifecycleStore`], [`InMemoryLifecycleStore`]).
//! - **Delegation integrity** per chamber ([`DelegationGraph`], [`DelegationStore`], [`InMemoryDelegationStore`]).
//! - **Event log** handle shared by the in-memory stores ([`GovernanceEventLog`]).
//! - **Advancement driver** tying evaluation to storage ([`ProposalAdvancer`]).

pub mod advancer;
pub mod chamber_quorum;
pub mod delegation;
pub mod delegation_store;
pub mod events;
pub mod lifecycle;
pub mod policy;
pub mod pool_quorum;

// Re-exports for convenience.
pub use advancer::{AdvanceOutcome, ProposalAdvancer};
pub use chamber_quorum::{evaluate_chamber_quorum, ChamberQuorumOutcome, ChamberQuorumParams};
pub use delegation::{DelegationChange, DelegationGraph};
pub use delegation_store::{DelegationSnapshot, DelegationStore, InMemoryDelegationStore};
pub use events::{GovernanceEvent, GovernanceEventKind, GovernanceEventLog};
pub use lifecycle::{InMemoryLifecycleStore, ProposalLifecycleStore};
pub use policy::{can_transition, ensure_transition, next_stage, StageDecision, StageTransitionPolicy};
pub use pool_quorum::{evaluate_pool_quorum, PoolQuorumOutcome, PoolQuorumParams};

pub use cognitocracy_types::*;
