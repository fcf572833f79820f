//! Pool quorum: attention plus an absolute upvote floor.
//!
//! A pool proposal advances only when enough of the active governors have
//! engaged with it (either direction) *and* it has collected enough raw
//! upvotes. Neither condition substitutes for the other.

use cognitocracy_types::{clamp_fraction, scaled_ceil, PoolCounts};
use serde::{Deserialize, Serialize};

/// Inputs to [`evaluate_pool_quorum`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolQuorumParams {
    pub attention_quorum_fraction: f64,
    pub active_governors: i64,
    pub upvote_floor: i64,
}

/// Outcome of a pool quorum evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolQuorumOutcome {
    pub engaged: i64,
    pub engaged_needed: i64,
    pub attention_met: bool,
    pub upvote_met: bool,
    pub should_advance: bool,
}

/// Evaluate whether a pool-stage proposal may advance to chamber vote.
///
/// Total over every input: negative counts count as zero, the fraction is
/// clamped into `[0, 1]`, and an empty electorate never meets attention.
/// With more than one active governor at least two must engage, so a lone
/// vote in a tiny electorate cannot satisfy the rule by rounding.
pub fn evaluate_pool_quorum(params: &PoolQuorumParams, counts: &PoolCounts) -> PoolQuorumOutcome {
    let active = params.active_governors.max(0);
    let fraction = clamp_fraction(params.attention_quorum_fraction);
    let upvotes = counts.upvotes.max(0);
    let downvotes = counts.downvotes.max(0);

    let engaged = upvotes.saturating_add(downvotes);

    let engaged_needed = if active == 0 {
        0
    } else {
        let min_engaged = if active > 1 { 2 } else { 1 };
        min_engaged.max(scaled_ceil(active, fraction))
    };

    let attention_met = active > 0 && engaged >= engaged_needed;
    let upvote_met = upvotes >= params.upvote_floor.max(0);

    PoolQuorumOutcome {
        engaged,
        engaged_needed,
        attention_met,
        upvote_met,
        should_advance: attention_met && upvote_met,
    }
}
