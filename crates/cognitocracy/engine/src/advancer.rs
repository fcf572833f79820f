//! Drives proposals through the lifecycle.
//!
//! Reads a proposal, evaluates the rule for its current stage against the
//! stored tallies, and only when advancing is justified issues the store's
//! compare-and-set. Losing a race is an ordinary outcome, not an error.

use cognitocracy_types::{GovernanceError, GovernanceResult, ProposalId, Stage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::lifecycle::ProposalLifecycleStore;
use crate::policy::{next_stage, StageDecision, StageTransitionPolicy};

/// Result of one advancement attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdvanceOutcome {
    /// The proposal moved forward.
    Advanced { from: Stage, to: Stage },
    /// Thresholds not met; the decision says which.
    Held { decision: StageDecision },
    /// Another caller moved the proposal first; re-read before acting.
    Stale { expected: Stage },
    /// The proposal is already in build.
    Final,
}

/// Lifecycle driver over any [`ProposalLifecycleStore`].
pub struct ProposalAdvancer<S: ProposalLifecycleStore + ?Sized> {
    policy: StageTransitionPolicy,
    store: Arc<S>,
}

impl<S: ProposalLifecycleStore + ?Sized> ProposalAdvancer<S> {
    pub fn new(policy: StageTransitionPolicy, store: Arc<S>) -> Self {
        Self { policy, store }
    }

    pub fn policy(&self) -> &StageTransitionPolicy {
        &self.policy
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Attempt one step forward for `id`.
    pub async fn try_advance(
        &self,
        id: &ProposalId,
        active_governors: i64,
        min_quorum: Option<i64>,
    ) -> GovernanceResult<AdvanceOutcome> {
        let proposal = self
            .store
            .get_proposal(id)
            .await?
            .ok_or_else(|| GovernanceError::ProposalNotFound(id.clone()))?;

        let from = proposal.stage;
        let (Some(to), Some(decision)) = (
            next_stage(from),
            self.policy.evaluate_stage(
                from,
                active_governors,
                &proposal.vote_counts.pool,
                &proposal.vote_counts.chamber,
                min_quorum,
            ),
        ) else {
            return Ok(AdvanceOutcome::Final);
        };

        if !decision.should_advance() {
            debug!(proposal_id = %id, stage = %from, "Proposal held");
            return Ok(AdvanceOutcome::Held { decision });
        }

        if self.store.transition_stage(id, from, to).await? {
            Ok(AdvanceOutcome::Advanced { from, to })
        } else {
            Ok(AdvanceOutcome::Stale { expected: from })
        }
    }

    /// Keep advancing until the proposal is held, stale or final.
    /// Returns every outcome in order.
    pub async fn advance_until_settled(
        &self,
        id: &ProposalId,
        active_governors: i64,
        min_quorum: Option<i64>,
    ) -> GovernanceResult<Vec<AdvanceOutcome>> {
        let mut outcomes = Vec::new();
        loop {
            let outcome = self.try_advance(id, active_governors, min_quorum).await?;
            let moved = matches!(outcome, AdvanceOutcome::Advanced { .. });
            outcomes.push(outcome);
            if !moved {
                return Ok(outcomes);
            }
        }
    }
}
