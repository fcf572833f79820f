//! End-to-end test: delegation graph integrity through the store.

use cognitocracy_engine::{
    DelegationChange, DelegationEdge, DelegationStore, GovernanceError, GovernanceEventKind,
};
use cognitocracy_tests::{addr, chamber, Harness};

#[tokio::test]
async fn reverse_delegation_is_rejected() {
    let harness = Harness::default();
    let c = chamber("engineering");

    harness
        .delegations
        .set_delegation(&c, &addr("A"), Some(&addr("B")))
        .await
        .unwrap();
    let err = harness
        .delegations
        .set_delegation(&c, &addr("B"), Some(&addr("A")))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "delegation_cycle");
}

#[tokio::test]
async fn disjoint_delegations_both_succeed() {
    let harness = Harness::default();
    let c = chamber("engineering");

    harness
        .delegations
        .set_delegation(&c, &addr("A"), Some(&addr("B")))
        .await
        .unwrap();
    harness
        .delegations
        .set_delegation(&c, &addr("C"), Some(&addr("D")))
        .await
        .unwrap();

    let snapshot = harness.delegations.snapshot(&c).await.unwrap();
    assert_eq!(
        snapshot.edges,
        vec![
            DelegationEdge::new("engineering", "A", "B"),
            DelegationEdge::new("engineering", "C", "D"),
        ]
    );
}

#[tokio::test]
async fn three_hop_chain_rejects_closing_edge() {
    let harness = Harness::default();
    let c = chamber("engineering");

    for (from, to) in [("A", "B"), ("B", "C"), ("C", "D")] {
        harness
            .delegations
            .set_delegation(&c, &addr(from), Some(&addr(to)))
            .await
            .unwrap();
    }
    assert_eq!(harness.delegations.resolve_delegate(&c, &addr("A")).await, addr("D"));

    let err = harness
        .delegations
        .set_delegation(&c, &addr("C"), Some(&addr("A")))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GovernanceError::DelegationCycle {
            chamber: c.clone(),
            delegator: addr("C"),
            delegatee: addr("A"),
        }
    );
    assert_eq!(
        harness.delegations.delegatee_of(&c, &addr("C")).await.unwrap(),
        Some(addr("D"))
    );
}

#[tokio::test]
async fn undelegate_then_reverse() {
    let harness = Harness::default();
    let c = chamber("engineering");

    harness
        .delegations
        .set_delegation(&c, &addr("A"), Some(&addr("B")))
        .await
        .unwrap();
    let change = harness
        .delegations
        .set_delegation(&c, &addr("A"), None)
        .await
        .unwrap();
    assert_eq!(change, DelegationChange::Cleared { previous: Some(addr("B")) });

    harness
        .delegations
        .set_delegation(&c, &addr("B"), Some(&addr("A")))
        .await
        .unwrap();

    let kinds: Vec<&'static str> = harness
        .events
        .events()
        .await
        .iter()
        .map(|e| match e.kind {
            GovernanceEventKind::DelegationSet { .. } => "set",
            GovernanceEventKind::DelegationCleared { .. } => "cleared",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["set", "cleared", "set"]);
}

#[tokio::test]
async fn chambers_do_not_constrain_each_other() {
    let harness = Harness::default();

    harness
        .delegations
        .set_delegation(&chamber("engineering"), &addr("A"), Some(&addr("B")))
        .await
        .unwrap();
    harness
        .delegations
        .set_delegation(&chamber("economics"), &addr("B"), Some(&addr("A")))
        .await
        .unwrap();
}

#[tokio::test]
async fn optimistic_write_against_moved_graph_is_refused() {
    let harness = Harness::default();
    let c = chamber("engineering");

    let view = harness.delegations.snapshot(&c).await.unwrap();
    harness
        .delegations
        .set_delegation(&c, &addr("B"), Some(&addr("A")))
        .await
        .unwrap();

    // Against the old view A -> B looked safe; it is not.
    let err = harness
        .delegations
        .set_delegation_at(view.version, &c, &addr("A"), Some(&addr("B")))
        .await
        .unwrap_err();
    assert!(err.is_retryable());

    // Retrying against a fresh view surfaces the real problem.
    let fresh = harness.delegations.snapshot(&c).await.unwrap();
    let err = harness
        .delegations
        .set_delegation_at(fresh.version, &c, &addr("A"), Some(&addr("B")))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "delegation_cycle");
}

#[tokio::test]
async fn optimistic_view_survives_writes_in_other_chambers() {
    let harness = Harness::default();
    let engineering = chamber("engineering");
    let economics = chamber("economics");

    let view = harness.delegations.snapshot(&engineering).await.unwrap();
    harness
        .delegations
        .set_delegation(&economics, &addr("X"), Some(&addr("Y")))
        .await
        .unwrap();

    harness
        .delegations
        .set_delegation_at(view.version, &engineering, &addr("A"), Some(&addr("B")))
        .await
        .unwrap();
    assert_eq!(
        harness.delegations.delegatee_of(&engineering, &addr("A")).await.unwrap(),
        Some(addr("B"))
    );
}
