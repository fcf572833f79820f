//! Stage transition policy.
//!
//! Binds the generic quorum evaluators to one set of [`ProtocolParams`] and
//! owns the lifecycle's transition table. The policy answers two questions
//! only: "is advancing justified right now" and "is this transition
//! structurally legal". Moving the proposal is the store's job.

use cognitocracy_types::{
    scaled_ceil, ChamberCounts, GovernanceError, GovernanceResult, PoolCounts, ProtocolParams,
    Stage, UpvoteFloorRule,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chamber_quorum::{evaluate_chamber_quorum, ChamberQuorumOutcome, ChamberQuorumParams};
use crate::pool_quorum::{evaluate_pool_quorum, PoolQuorumOutcome, PoolQuorumParams};

/// `true` only for `pool -> vote` and `vote -> build`.
pub fn can_transition(from: Stage, to: Stage) -> bool {
    matches!((from, to), (Stage::Pool, Stage::Vote) | (Stage::Vote, Stage::Build))
}

/// Fail fast with [`GovernanceError::InvalidTransition`] for any pair that is
/// not an edge of the lifecycle.
pub fn ensure_transition(from: Stage, to: Stage) -> GovernanceResult<()> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(GovernanceError::InvalidTransition { from, to })
    }
}

/// The single stage a proposal may move to next, if any.
pub fn next_stage(stage: Stage) -> Option<Stage> {
    match stage {
        Stage::Pool => Some(Stage::Vote),
        Stage::Vote => Some(Stage::Build),
        Stage::Build => None,
    }
}

/// Decision for whichever stage a proposal currently sits in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "lowercase")]
pub enum StageDecision {
    Pool(PoolQuorumOutcome),
    Vote(ChamberQuorumOutcome),
}

impl StageDecision {
    pub fn should_advance(&self) -> bool {
        match self {
            StageDecision::Pool(outcome) => outcome.should_advance,
            StageDecision::Vote(outcome) => outcome.should_advance,
        }
    }
}

/// Protocol-bound wrapper around the quorum evaluators.
#[derive(Clone, Debug)]
pub struct StageTransitionPolicy {
    params: ProtocolParams,
}

impl Default for StageTransitionPolicy {
    fn default() -> Self {
        Self::new(ProtocolParams::default())
    }
}

impl StageTransitionPolicy {
    /// Build a policy; parameters are normalized once here.
    pub fn new(params: ProtocolParams) -> Self {
        Self {
            params: params.normalized(),
        }
    }

    pub fn params(&self) -> &ProtocolParams {
        &self.params
    }

    pub fn can_transition(&self, from: Stage, to: Stage) -> bool {
        can_transition(from, to)
    }

    /// Absolute upvote floor for a pool proposal. Never below one, so even
    /// an empty electorate needs a genuine upvote.
    pub fn compute_pool_upvote_floor(&self, active_governors: i64) -> i64 {
        let active = active_governors.max(0);
        match self.params.upvote_floor {
            UpvoteFloorRule::Fraction(fraction) => 1.max(scaled_ceil(active, fraction)),
            UpvoteFloorRule::Absolute(floor) => 1.max(floor),
        }
    }

    pub fn should_advance_pool_to_vote(
        &self,
        active_governors: i64,
        counts: &PoolCounts,
    ) -> PoolQuorumOutcome {
        let params = PoolQuorumParams {
            attention_quorum_fraction: self.params.attention_quorum_fraction,
            active_governors,
            upvote_floor: self.compute_pool_upvote_floor(active_governors),
        };
        let outcome = evaluate_pool_quorum(&params, counts);

        debug!(
            protocol = %self.params.version,
            active_governors,
            engaged = outcome.engaged,
            engaged_needed = outcome.engaged_needed,
            upvote_floor = params.upvote_floor,
            should_advance = outcome.should_advance,
            "Pool quorum evaluated"
        );

        outcome
    }

    /// `min_quorum` falls back to the protocol's `default_min_quorum`.
    pub fn should_advance_vote_to_build(
        &self,
        active_governors: i64,
        counts: &ChamberCounts,
        min_quorum: Option<i64>,
    ) -> ChamberQuorumOutcome {
        let params = ChamberQuorumParams {
            quorum_fraction: self.params.chamber_quorum_fraction,
            active_governors,
            passing_fraction: self.params.passing_fraction,
            min_quorum: min_quorum.unwrap_or(self.params.default_min_quorum),
        };
        let outcome = evaluate_chamber_quorum(&params, counts);

        debug!(
            protocol = %self.params.version,
            active_governors,
            engaged = outcome.engaged,
            quorum_needed = outcome.quorum_needed,
            pass_needed = outcome.pass_needed,
            should_advance = outcome.should_advance,
            "Chamber quorum evaluated"
        );

        outcome
    }

    /// Evaluate the rule for `stage`. `None` once the proposal reached build.
    pub fn evaluate_stage(
        &self,
        stage: Stage,
        active_governors: i64,
        pool: &PoolCounts,
        chamber: &ChamberCounts,
        min_quorum: Option<i64>,
    ) -> Option<StageDecision> {
        match stage {
            Stage::Pool => Some(StageDecision::Pool(
                self.should_advance_pool_to_vote(active_governors, pool),
            )),
            Stage::Vote => Some(StageDecision::Vote(self.should_advance_vote_to_build(
                active_governors,
                chamber,
                min_quorum,
            ))),
            Stage::Build => None,
        }
    }
}
