//! Proposal lifecycle storage.
//!
//! [`ProposalLifecycleStore`] is the contract any backing store owes the
//! engine; [`InMemoryLifecycleStore`] is the reference implementation.

use async_trait::async_trait;
use cognitocracy_types::{GovernanceError, GovernanceResult, Proposal, ProposalId, Stage, VoteCounts};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::events::{GovernanceEventKind, GovernanceEventLog};
use crate::policy::ensure_transition;

/// Storage contract for proposal records.
#[async_trait]
pub trait ProposalLifecycleStore: Send + Sync {
    /// Create a proposal record. Fails with `Conflict` if the id exists.
    async fn insert_proposal(&self, proposal: Proposal) -> GovernanceResult<()>;

    /// Get a proposal by id
    async fn get_proposal(&self, id: &ProposalId) -> GovernanceResult<Option<Proposal>>;

    /// Replace the stored tallies. Never touches the stage.
    async fn record_vote_counts(&self, id: &ProposalId, counts: VoteCounts)
        -> GovernanceResult<()>;

    /// Atomically move a proposal from `from` to `to`.
    ///
    /// Implementations must reject pairs outside the transition table with
    /// `InvalidTransition` before touching storage, then compare-and-set:
    /// `Ok(true)` only when the stored stage equals `from` at write time,
    /// `Ok(false)` with no change otherwise.
    async fn transition_stage(
        &self,
        id: &ProposalId,
        from: Stage,
        to: Stage,
    ) -> GovernanceResult<bool>;
}

/// In-memory lifecycle store for development and testing
#[derive(Debug, Clone)]
pub struct InMemoryLifecycleStore {
    proposals: Arc<RwLock<HashMap<ProposalId, Proposal>>>,
    events: Arc<GovernanceEventLog>,
}

impl InMemoryLifecycleStore {
    pub fn new(events: Arc<GovernanceEventLog>) -> Self {
        Self {
            proposals: Arc::new(RwLock::new(HashMap::new())),
            events,
        }
    }

    pub fn events(&self) -> &Arc<GovernanceEventLog> {
        &self.events
    }

    pub async fn list_proposals(&self) -> Vec<Proposal> {
        let proposals = self.proposals.read().await;
        let mut list: Vec<Proposal> = proposals.values().cloned().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        list
    }
}

impl Default for InMemoryLifecycleStore {
    fn default() -> Self {
        Self::new(Arc::new(GovernanceEventLog::new()))
    }
}

#[async_trait]
impl ProposalLifecycleStore for InMemoryLifecycleStore {
    async fn insert_proposal(&self, proposal: Proposal) -> GovernanceResult<()> {
        let mut proposals = self.proposals.write().await;
        if proposals.contains_key(&proposal.id) {
            return Err(GovernanceError::Conflict(format!(
                "proposal already exists: {}",
                proposal.id
            )));
        }

        let kind = GovernanceEventKind::ProposalSubmitted {
            proposal_id: proposal.id.clone(),
            chamber_id: proposal.chamber_id.clone(),
        };
        debug!(proposal_id = %proposal.id, chamber = %proposal.chamber_id, "Proposal submitted");
        proposals.insert(proposal.id.clone(), proposal);

        // Appended under the record lock so log order matches commit order.
        self.events.append(kind).await;
        Ok(())
    }

    async fn get_proposal(&self, id: &ProposalId) -> GovernanceResult<Option<Proposal>> {
        let proposals = self.proposals.read().await;
        Ok(proposals.get(id).cloned())
    }

    async fn record_vote_counts(
        &self,
        id: &ProposalId,
        counts: VoteCounts,
    ) -> GovernanceResult<()> {
        let mut proposals = self.proposals.write().await;
        let proposal = proposals
            .get_mut(id)
            .ok_or_else(|| GovernanceError::ProposalNotFound(id.clone()))?;
        proposal.vote_counts = counts;
        Ok(())
    }

    async fn transition_stage(
        &self,
        id: &ProposalId,
        from: Stage,
        to: Stage,
    ) -> GovernanceResult<bool> {
        ensure_transition(from, to)?;

        let mut proposals = self.proposals.write().await;
        let proposal = proposals
            .get_mut(id)
            .ok_or_else(|| GovernanceError::ProposalNotFound(id.clone()))?;

        if proposal.stage != from {
            debug!(
                proposal_id = %id,
                expected = %from,
                current = %proposal.stage,
                "Stale stage transition ignored"
            );
            return Ok(false);
        }
        proposal.stage = to;

        info!(proposal_id = %id, from = %from, to = %to, "Proposal advanced");
        self.events
            .append(GovernanceEventKind::StageAdvanced {
                proposal_id: id.clone(),
                from,
                to,
            })
            .await;
        Ok(true)
    }
}
