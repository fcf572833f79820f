//! Scenario runner.
//!
//! Wires fresh stores to one event log, submits every proposal, advances
//! each as far as its tallies allow, then applies delegations in order.
//! Rejected delegations are part of the report, not failures of the run.

use cognitocracy_engine::{
    AdvanceOutcome, ChamberCounts, ChamberId, DelegationStore, GovernanceError,
    GovernanceEventLog, GovernorAddress, InMemoryDelegationStore, InMemoryLifecycleStore,
    PoolCounts, Proposal, ProposalAdvancer, ProposalId, ProposalLifecycleStore, ProtocolParams,
    Stage, StageTransitionPolicy, VoteCounts,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{ScenarioConfig, ScenarioDelegation, ScenarioProposal};
use crate::error::SimResult;

/// What happened to one proposal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalReport {
    pub id: String,
    pub chamber: String,
    pub final_stage: Stage,
    pub outcomes: Vec<AdvanceOutcome>,
}

/// What happened to one delegation action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelegationReport {
    pub chamber: String,
    pub delegator: String,
    pub delegatee: Option<String>,
    pub accepted: bool,
    /// Error kind when rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<String>,
}

/// Full run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimReport {
    pub protocol_version: String,
    pub active_governors: i64,
    pub proposals: Vec<ProposalReport>,
    pub delegations: Vec<DelegationReport>,
    pub events_recorded: usize,
}

impl SimReport {
    pub fn count_in_stage(&self, stage: Stage) -> usize {
        self.proposals
            .iter()
            .filter(|p| p.final_stage == stage)
            .count()
    }

    pub fn rejected_delegations(&self) -> usize {
        self.delegations.iter().filter(|d| !d.accepted).count()
    }
}

/// Run `scenario` under `params`.
pub async fn run_scenario(params: ProtocolParams, scenario: &ScenarioConfig) -> SimResult<SimReport> {
    let events = Arc::new(GovernanceEventLog::new());
    let lifecycle = Arc::new(InMemoryLifecycleStore::new(events.clone()));
    let delegations = InMemoryDelegationStore::new(events.clone());
    let policy = StageTransitionPolicy::new(params);
    let protocol_version = policy.params().version.clone();
    let advancer = ProposalAdvancer::new(policy, lifecycle);

    info!(
        protocol = %protocol_version,
        active_governors = scenario.active_governors,
        proposals = scenario.proposals.len(),
        delegations = scenario.delegations.len(),
        "Running scenario"
    );

    let mut proposal_reports = Vec::with_capacity(scenario.proposals.len());
    for entry in &scenario.proposals {
        proposal_reports.push(
            run_proposal(&advancer, entry, scenario.active_governors, scenario.min_quorum).await?,
        );
    }

    let mut delegation_reports = Vec::with_capacity(scenario.delegations.len());
    for entry in &scenario.delegations {
        delegation_reports.push(apply_delegation(&delegations, entry).await?);
    }

    Ok(SimReport {
        protocol_version,
        active_governors: scenario.active_governors,
        proposals: proposal_reports,
        delegations: delegation_reports,
        events_recorded: events.len().await,
    })
}

async fn run_proposal(
    advancer: &ProposalAdvancer<InMemoryLifecycleStore>,
    entry: &ScenarioProposal,
    active_governors: i64,
    min_quorum: Option<i64>,
) -> SimResult<ProposalReport> {
    let id = ProposalId::new(&entry.id);
    let counts = VoteCounts::default()
        .with_pool(entry.pool)
        .with_chamber(entry.chamber_votes);
    advancer
        .store()
        .insert_proposal(
            Proposal::submitted(id.clone(), ChamberId::new(&entry.chamber)).with_vote_counts(counts),
        )
        .await?;

    let outcomes = advancer
        .advance_until_settled(&id, active_governors, min_quorum)
        .await?;
    let final_stage = advancer
        .store()
        .get_proposal(&id)
        .await?
        .map(|p| p.stage)
        .ok_or_else(|| GovernanceError::ProposalNotFound(id.clone()))?;

    info!(proposal_id = %id, final_stage = %final_stage, "Proposal settled");

    Ok(ProposalReport {
        id: entry.id.clone(),
        chamber: entry.chamber.clone(),
        final_stage,
        outcomes,
    })
}

async fn apply_delegation(
    store: &InMemoryDelegationStore,
    entry: &ScenarioDelegation,
) -> SimResult<DelegationReport> {
    let chamber = ChamberId::new(&entry.chamber);
    let delegator = GovernorAddress::new(&entry.delegator);
    let delegatee = entry
        .delegatee
        .as_deref()
        .map(|address| GovernorAddress::new(address));

    let rejection = match store
        .set_delegation(&chamber, &delegator, delegatee.as_ref())
        .await
    {
        Ok(_) => None,
        Err(err @ GovernanceError::DelegationCycle { .. }) => {
            warn!(error = %err, "Delegation rejected");
            Some(err.kind().to_string())
        }
        Err(err) => return Err(err.into()),
    };

    Ok(DelegationReport {
        chamber: entry.chamber.clone(),
        delegator: entry.delegator.clone(),
        delegatee: entry.delegatee.clone(),
        accepted: rejection.is_none(),
        rejection,
    })
}

/// Random scenario over `active_governors` governors.
///
/// Tallies are drawn relative to the electorate size; delegations pick
/// random pairs and may propose cycles or self-delegation.
pub fn random_scenario<R: Rng>(
    rng: &mut R,
    proposals: usize,
    active_governors: i64,
    chambers: &[&str],
) -> ScenarioConfig {
    let active = active_governors.max(1);
    let chamber_names: Vec<&str> = if chambers.is_empty() {
        vec!["general"]
    } else {
        chambers.to_vec()
    };
    let pick_chamber =
        |rng: &mut R| chamber_names[rng.gen_range(0..chamber_names.len())].to_string();

    let proposals = (0..proposals)
        .map(|n| {
            let chamber = pick_chamber(rng);
            let upvotes = rng.gen_range(0..=active / 3);
            let downvotes = rng.gen_range(0..=active / 4);
            let yes = rng.gen_range(0..=active / 2);
            let no = rng.gen_range(0..=active / 5);
            let abstain = rng.gen_range(0..=active / 10);
            ScenarioProposal::new(format!("prop-{n:04}"), chamber)
                .with_pool(PoolCounts::new(upvotes, downvotes))
                .with_chamber(ChamberCounts::new(yes, no, abstain))
        })
        .collect();

    let governors = active.min(32);
    let delegations = (0..governors)
        .map(|_| {
            let chamber = pick_chamber(rng);
            let delegator = format!("gov-{:02}", rng.gen_range(0..governors));
            let delegatee = if rng.gen_bool(0.1) {
                None
            } else {
                Some(format!("gov-{:02}", rng.gen_range(0..governors)))
            };
            ScenarioDelegation {
                chamber,
                delegator,
                delegatee,
            }
        })
        .collect();

    ScenarioConfig {
        active_governors,
        min_quorum: None,
        proposals,
        delegations,
    }
}
