//! Concurrency-safe delegation storage.
//!
//! The cycle check must see the same graph the write lands on. The
//! in-memory store runs both under one exclusive lock, and the optimistic
//! path refuses writes computed against an older snapshot version. Versions
//! are kept per chamber, so writes in one chamber never stale another.

use async_trait::async_trait;
use cognitocracy_types::{
    ChamberId, DelegationEdge, GovernanceError, GovernanceResult, GovernorAddress,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::delegation::{DelegationChange, DelegationGraph};
use crate::events::{GovernanceEventKind, GovernanceEventLog};

/// Consistent view of one chamber's delegations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationSnapshot {
    /// Chamber version the edges were read at
    pub version: u64,
    pub edges: Vec<DelegationEdge>,
}

/// Storage contract for delegation edges.
#[async_trait]
pub trait DelegationStore: Send + Sync {
    async fn snapshot(&self, chamber: &ChamberId) -> GovernanceResult<DelegationSnapshot>;

    async fn delegatee_of(
        &self,
        chamber: &ChamberId,
        delegator: &GovernorAddress,
    ) -> GovernanceResult<Option<GovernorAddress>>;

    /// Cycle-checked write against the current graph.
    async fn set_delegation(
        &self,
        chamber: &ChamberId,
        delegator: &GovernorAddress,
        delegatee: Option<&GovernorAddress>,
    ) -> GovernanceResult<DelegationChange>;

    /// Cycle-checked write that only applies if the chamber is still at
    /// `expected_version`; otherwise `StaleDelegationView`.
    async fn set_delegation_at(
        &self,
        expected_version: u64,
        chamber: &ChamberId,
        delegator: &GovernorAddress,
        delegatee: Option<&GovernorAddress>,
    ) -> GovernanceResult<DelegationChange>;
}

#[derive(Debug, Default)]
struct VersionedGraph {
    graph: DelegationGraph,
    versions: HashMap<ChamberId, u64>,
}

impl VersionedGraph {
    fn version(&self, chamber: &ChamberId) -> u64 {
        self.versions.get(chamber).copied().unwrap_or(0)
    }
}

/// In-memory delegation store for development and testing
#[derive(Debug, Clone)]
pub struct InMemoryDelegationStore {
    inner: Arc<RwLock<VersionedGraph>>,
    events: Arc<GovernanceEventLog>,
}

impl InMemoryDelegationStore {
    pub fn new(events: Arc<GovernanceEventLog>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(VersionedGraph::default())),
            events,
        }
    }

    /// Terminal delegate reached from `start`, or `start` itself.
    pub async fn resolve_delegate(
        &self,
        chamber: &ChamberId,
        start: &GovernorAddress,
    ) -> GovernorAddress {
        let inner = self.inner.read().await;
        inner
            .graph
            .delegation_chain(chamber, start)
            .pop()
            .unwrap_or_else(|| start.clone())
    }

    async fn apply(
        &self,
        expected_version: Option<u64>,
        chamber: &ChamberId,
        delegator: &GovernorAddress,
        delegatee: Option<&GovernorAddress>,
    ) -> GovernanceResult<DelegationChange> {
        let mut inner = self.inner.write().await;

        if let Some(expected) = expected_version {
            let current = inner.version(chamber);
            if expected != current {
                warn!(
                    chamber = %chamber,
                    delegator = %delegator,
                    expected,
                    current,
                    "Delegation write against stale view"
                );
                return Err(GovernanceError::StaleDelegationView { expected, current });
            }
        }

        let change = inner.graph.set_delegation(chamber, delegator, delegatee)?;
        let version = {
            let slot = inner.versions.entry(chamber.clone()).or_insert(0);
            *slot += 1;
            *slot
        };

        let kind = match delegatee {
            Some(delegatee) => {
                info!(
                    chamber = %chamber,
                    delegator = %delegator,
                    delegatee = %delegatee,
                    version,
                    "Delegation set"
                );
                GovernanceEventKind::DelegationSet {
                    chamber_id: chamber.clone(),
                    delegator: delegator.clone(),
                    delegatee: delegatee.clone(),
                }
            }
            None => {
                info!(chamber = %chamber, delegator = %delegator, version, "Delegation cleared");
                GovernanceEventKind::DelegationCleared {
                    chamber_id: chamber.clone(),
                    delegator: delegator.clone(),
                }
            }
        };
        self.events.append(kind).await;

        Ok(change)
    }
}

impl Default for InMemoryDelegationStore {
    fn default() -> Self {
        Self::new(Arc::new(GovernanceEventLog::new()))
    }
}

#[async_trait]
impl DelegationStore for InMemoryDelegationStore {
    async fn snapshot(&self, chamber: &ChamberId) -> GovernanceResult<DelegationSnapshot> {
        let inner = self.inner.read().await;
        Ok(DelegationSnapshot {
            version: inner.version(chamber),
            edges: inner.graph.edges(chamber),
        })
    }

    async fn delegatee_of(
        &self,
        chamber: &ChamberId,
        delegator: &GovernorAddress,
    ) -> GovernanceResult<Option<GovernorAddress>> {
        let inner = self.inner.read().await;
        Ok(inner.graph.delegatee_of(chamber, delegator).cloned())
    }

    async fn set_delegation(
        &self,
        chamber: &ChamberId,
        delegator: &GovernorAddress,
        delegatee: Option<&GovernorAddress>,
    ) -> GovernanceResult<DelegationChange> {
        self.apply(None, chamber, delegator, delegatee).await
    }

    async fn set_delegation_at(
        &self,
        expected_version: u64,
        chamber: &ChamberId,
        delegator: &GovernorAddress,
        delegatee: Option<&GovernorAddress>,
    ) -> GovernanceResult<DelegationChange> {
        self.apply(Some(expected_version), chamber, delegator, delegatee)
            .await
    }
}
