//! Shared fixtures for the end-to-end and property suites.

use cognitocracy_engine::{
    ChamberId, GovernanceEventLog, GovernorAddress, InMemoryDelegationStore,
    InMemoryLifecycleStore, Proposal, ProposalAdvancer, ProposalId, ProposalLifecycleStore,
    ProtocolParams, StageTransitionPolicy, VoteCounts,
};
use std::sync::Arc;

/// Electorate size used by the regression scenarios.
pub const ACTIVE_GOVERNORS: i64 = 150;

/// Stores and driver sharing one event log.
pub struct Harness {
    pub events: Arc<GovernanceEventLog>,
    pub lifecycle: Arc<InMemoryLifecycleStore>,
    pub delegations: InMemoryDelegationStore,
    pub advancer: ProposalAdvancer<InMemoryLifecycleStore>,
}

impl Harness {
    pub fn new(params: ProtocolParams) -> Self {
        let events = Arc::new(GovernanceEventLog::new());
        let lifecycle = Arc::new(InMemoryLifecycleStore::new(events.clone()));
        let delegations = InMemoryDelegationStore::new(events.clone());
        let advancer = ProposalAdvancer::new(StageTransitionPolicy::new(params), lifecycle.clone());
        Self {
            events,
            lifecycle,
            delegations,
            advancer,
        }
    }

    /// Submit a pool proposal carrying `counts`.
    pub async fn submit(&self, id: &str, chamber: &str, counts: VoteCounts) -> ProposalId {
        let id = ProposalId::new(id);
        self.lifecycle
            .insert_proposal(
                Proposal::submitted(id.clone(), ChamberId::new(chamber)).with_vote_counts(counts),
            )
            .await
            .expect("fresh proposal id");
        id
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(ProtocolParams::default())
    }
}

pub fn addr(address: &str) -> GovernorAddress {
    GovernorAddress::new(address)
}

pub fn chamber(id: &str) -> ChamberId {
    ChamberId::new(id)
}
