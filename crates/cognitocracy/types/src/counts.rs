//! Vote tallies handed to the quorum evaluators.
//!
//! Counts are signed on purpose: callers may hand over whatever their
//! storage layer produced, and the evaluators normalize negative values to
//! zero instead of rejecting them.

use serde::{Deserialize, Serialize};

/// Upvote/downvote tally for a proposal sitting in the pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolCounts {
    pub upvotes: i64,
    pub downvotes: i64,
}

impl PoolCounts {
    pub fn new(upvotes: i64, downvotes: i64) -> Self {
        Self { upvotes, downvotes }
    }
}

/// Yes/no/abstain tally for a proposal under chamber vote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChamberCounts {
    pub yes: i64,
    pub no: i64,
    pub abstain: i64,
}

impl ChamberCounts {
    pub fn new(yes: i64, no: i64, abstain: i64) -> Self {
        Self { yes, no, abstain }
    }
}

/// Tallies stored alongside a proposal record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCounts {
    #[serde(default)]
    pub pool: PoolCounts,
    #[serde(default)]
    pub chamber: ChamberCounts,
}

impl VoteCounts {
    pub fn with_pool(mut self, pool: PoolCounts) -> Self {
        self.pool = pool;
        self
    }

    pub fn with_chamber(mut self, chamber: ChamberCounts) -> Self {
        self.chamber = chamber;
        self
    }
}
