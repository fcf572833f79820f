//! Per-chamber delegation graph.
//!
//! Each governor has at most one outgoing delegation per chamber, and the
//! graph of one chamber stays acyclic after every write. Chambers are
//! independent: a delegation in one has no bearing on another.

use cognitocracy_types::{ChamberId, DelegationEdge, GovernanceError, GovernanceResult, GovernorAddress};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::warn;

/// Effect of an accepted delegation write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DelegationChange {
    /// A new edge was created or an existing one replaced.
    Set {
        previous: Option<GovernorAddress>,
    },
    /// The delegator's edge was removed.
    Cleared {
        previous: Option<GovernorAddress>,
    },
}

/// Chamber-scoped delegator -> delegatee relation.
#[derive(Clone, Debug, Default)]
pub struct DelegationGraph {
    chambers: HashMap<ChamberId, BTreeMap<GovernorAddress, GovernorAddress>>,
}

impl DelegationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set, replace or clear (`None`) the outgoing delegation of `delegator`.
    ///
    /// Rejects with `DelegationCycle`, leaving the graph untouched, when the
    /// new edge would lead back to `delegator`, including self-delegation.
    pub fn set_delegation(
        &mut self,
        chamber: &ChamberId,
        delegator: &GovernorAddress,
        delegatee: Option<&GovernorAddress>,
    ) -> GovernanceResult<DelegationChange> {
        let Some(delegatee) = delegatee else {
            let previous = self
                .chambers
                .get_mut(chamber)
                .and_then(|edges| edges.remove(delegator));
            return Ok(DelegationChange::Cleared { previous });
        };

        if self.would_create_cycle(chamber, delegator, delegatee) {
            warn!(
                chamber = %chamber,
                delegator = %delegator,
                delegatee = %delegatee,
                "Delegation rejected: cycle"
            );
            return Err(GovernanceError::DelegationCycle {
                chamber: chamber.clone(),
                delegator: delegator.clone(),
                delegatee: delegatee.clone(),
            });
        }

        let previous = self
            .chambers
            .entry(chamber.clone())
            .or_default()
            .insert(delegator.clone(), delegatee.clone());
        Ok(DelegationChange::Set { previous })
    }

    /// Walk from `delegatee` along outgoing edges; a cycle forms if the walk
    /// reaches `delegator`.
    pub fn would_create_cycle(
        &self,
        chamber: &ChamberId,
        delegator: &GovernorAddress,
        delegatee: &GovernorAddress,
    ) -> bool {
        if delegator == delegatee {
            return true;
        }
        let Some(edges) = self.chambers.get(chamber) else {
            return false;
        };

        let mut visited: HashSet<&GovernorAddress> = HashSet::new();
        let mut current = delegatee;
        loop {
            if current == delegator {
                return true;
            }
            if !visited.insert(current) {
                // Unreachable while the invariant holds; refuse rather than spin.
                return true;
            }
            match edges.get(current) {
                Some(next) => current = next,
                None => return false,
            }
        }
    }

    pub fn delegatee_of(
        &self,
        chamber: &ChamberId,
        delegator: &GovernorAddress,
    ) -> Option<&GovernorAddress> {
        self.chambers.get(chamber)?.get(delegator)
    }

    /// Ordered chain of delegates reached from `start`, excluding `start`.
    /// The last element is the terminal delegate.
    pub fn delegation_chain(
        &self,
        chamber: &ChamberId,
        start: &GovernorAddress,
    ) -> Vec<GovernorAddress> {
        let mut chain = Vec::new();
        let Some(edges) = self.chambers.get(chamber) else {
            return chain;
        };
        let mut current = start;
        while let Some(next) = edges.get(current) {
            if next == start {
                break;
            }
            chain.push(next.clone());
            current = next;
        }
        chain
    }

    /// All edges of one chamber, ordered by delegator.
    pub fn edges(&self, chamber: &ChamberId) -> Vec<DelegationEdge> {
        self.chambers
            .get(chamber)
            .map(|edges| {
                edges
                    .iter()
                    .map(|(delegator, delegatee)| DelegationEdge {
                        chamber_id: chamber.clone(),
                        delegator: delegator.clone(),
                        delegatee: delegatee.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn edge_count(&self, chamber: &ChamberId) -> usize {
        self.chambers.get(chamber).map_or(0, BTreeMap::len)
    }
}
