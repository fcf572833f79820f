//! End-to-end test: pool-stage attention quorum and upvote floor.
//!
//! Verifies that:
//! - the evaluator reproduces the regression scenarios exactly
//! - the policy derives the same floor from protocol parameters
//! - the advancer holds or moves proposals accordingly

use cognitocracy_engine::{
    evaluate_pool_quorum, AdvanceOutcome, PoolCounts, PoolQuorumParams, ProposalLifecycleStore,
    Stage, StageDecision, StageTransitionPolicy, VoteCounts,
};
use cognitocracy_tests::{Harness, ACTIVE_GOVERNORS};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn scenario_params(active_governors: i64) -> PoolQuorumParams {
    PoolQuorumParams {
        attention_quorum_fraction: 0.22,
        active_governors,
        upvote_floor: 15,
    }
}

// ---------------------------------------------------------------------------
// Evaluator scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_attention_not_met() {
    let outcome = evaluate_pool_quorum(&scenario_params(150), &PoolCounts::new(15, 14));
    assert_eq!(outcome.engaged, 29);
    assert_eq!(outcome.engaged_needed, 33);
    assert!(!outcome.attention_met);
    assert!(outcome.upvote_met);
    assert!(!outcome.should_advance);
}

#[test]
fn scenario_attention_met() {
    let outcome = evaluate_pool_quorum(&scenario_params(150), &PoolCounts::new(15, 18));
    assert_eq!(outcome.engaged, 33);
    assert!(outcome.attention_met);
    assert!(outcome.should_advance);
}

#[test]
fn scenario_empty_electorate() {
    for (up, down) in [(1, 0), (15, 18), (1_000, 1_000)] {
        let outcome = evaluate_pool_quorum(&scenario_params(0), &PoolCounts::new(up, down));
        assert!(!outcome.should_advance, "up={up} down={down}");
    }
}

#[test]
fn policy_floor_matches_scenario_floor() {
    let policy = StageTransitionPolicy::default();
    assert_eq!(policy.compute_pool_upvote_floor(ACTIVE_GOVERNORS), 15);
    assert!(!policy
        .should_advance_pool_to_vote(ACTIVE_GOVERNORS, &PoolCounts::new(14, 40))
        .upvote_met);
}

// ---------------------------------------------------------------------------
// Through the advancer
// ---------------------------------------------------------------------------

#[tokio::test]
async fn advancer_holds_then_moves_after_new_votes() {
    let harness = Harness::default();
    let id = harness
        .submit(
            "pool-1",
            "engineering",
            VoteCounts::default().with_pool(PoolCounts::new(15, 14)),
        )
        .await;

    let outcome = harness
        .advancer
        .try_advance(&id, ACTIVE_GOVERNORS, None)
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        AdvanceOutcome::Held { decision: StageDecision::Pool(_) }
    ));

    harness
        .lifecycle
        .record_vote_counts(&id, VoteCounts::default().with_pool(PoolCounts::new(15, 18)))
        .await
        .unwrap();

    let outcome = harness
        .advancer
        .try_advance(&id, ACTIVE_GOVERNORS, None)
        .await
        .unwrap();
    assert_eq!(outcome, AdvanceOutcome::Advanced { from: Stage::Pool, to: Stage::Vote });
}
