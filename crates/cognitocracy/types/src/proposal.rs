//! Proposal records, lifecycle stages and delegation edges.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::counts::VoteCounts;
use crate::ids::{ChamberId, GovernorAddress, ProposalId};

/// Lifecycle stage of a proposal.
///
/// Stages only ever move forward: `Pool -> Vote -> Build`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Gathering attention and upvotes in the proposal pool
    Pool,
    /// Under chamber vote
    Vote,
    /// Accepted and handed to execution
    Build,
}

impl Stage {
    /// All stages in lifecycle order.
    pub const ALL: [Stage; 3] = [Stage::Pool, Stage::Vote, Stage::Build];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Pool => "pool",
            Stage::Vote => "vote",
            Stage::Build => "build",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposal as seen by the lifecycle store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub chamber_id: ChamberId,
    pub stage: Stage,
    #[serde(default)]
    pub vote_counts: VoteCounts,
}

impl Proposal {
    /// A freshly submitted proposal always enters the pool.
    pub fn submitted(id: ProposalId, chamber_id: ChamberId) -> Self {
        Self {
            id,
            chamber_id,
            stage: Stage::Pool,
            vote_counts: VoteCounts::default(),
        }
    }

    pub fn with_vote_counts(mut self, vote_counts: VoteCounts) -> Self {
        self.vote_counts = vote_counts;
        self
    }
}

/// One outgoing delegation inside a chamber.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DelegationEdge {
    pub chamber_id: ChamberId,
    pub delegator: GovernorAddress,
    pub delegatee: GovernorAddress,
}

impl DelegationEdge {
    pub fn new(
        chamber_id: impl Into<String>,
        delegator: impl Into<String>,
        delegatee: impl Into<String>,
    ) -> Self {
        Self {
            chamber_id: ChamberId::new(chamber_id),
            delegator: GovernorAddress::new(delegator),
            delegatee: GovernorAddress::new(delegatee),
        }
    }
}
