//! Governance event log.
//!
//! The log is a handle owned by whoever wires the stores together. Each
//! handle keeps its own sequence, so independent engines (and tests) never
//! share counters.

use chrono::{DateTime, Utc};
use cognitocracy_types::{ChamberId, GovernorAddress, ProposalId, Stage};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// What happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GovernanceEventKind {
    ProposalSubmitted {
        proposal_id: ProposalId,
        chamber_id: ChamberId,
    },
    StageAdvanced {
        proposal_id: ProposalId,
        from: Stage,
        to: Stage,
    },
    DelegationSet {
        chamber_id: ChamberId,
        delegator: GovernorAddress,
        delegatee: GovernorAddress,
    },
    DelegationCleared {
        chamber_id: ChamberId,
        delegator: GovernorAddress,
    },
}

/// A recorded event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceEvent {
    /// Position in this log, starting at 1
    pub sequence: u64,
    pub recorded_at: DateTime<Utc>,
    pub kind: GovernanceEventKind,
}

/// Append-only in-memory event log.
#[derive(Debug, Default)]
pub struct GovernanceEventLog {
    events: RwLock<Vec<GovernanceEvent>>,
    sequence: AtomicU64,
}

impl GovernanceEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and return its sequence number.
    pub async fn append(&self, kind: GovernanceEventKind) -> u64 {
        let mut events = self.events.write().await;
        // Assigned under the write lock so sequence order matches log order.
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        events.push(GovernanceEvent {
            sequence,
            recorded_at: Utc::now(),
            kind,
        });
        sequence
    }

    pub async fn events(&self) -> Vec<GovernanceEvent> {
        self.events.read().await.clone()
    }

    /// Events recorded after `sequence`.
    pub async fn events_since(&self, sequence: u64) -> Vec<GovernanceEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| e.sequence > sequence)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}
