//! Property tests: the lifecycle only ever moves one step forward.

use cognitocracy_engine::{
    can_transition, next_stage, ChamberId, InMemoryLifecycleStore, Proposal, ProposalId,
    ProposalLifecycleStore, Stage,
};
use proptest::prelude::*;

fn arb_stage() -> impl Strategy<Value = Stage> {
    prop_oneof![Just(Stage::Pool), Just(Stage::Vote), Just(Stage::Build)]
}

proptest! {
    /// Legal edges are exactly the successor relation.
    #[test]
    fn can_transition_matches_successor(from in arb_stage(), to in arb_stage()) {
        prop_assert_eq!(can_transition(from, to), next_stage(from) == Some(to));
        prop_assert!(!can_transition(from, from));
        if can_transition(from, to) {
            prop_assert!(!can_transition(to, from));
        }
    }

    /// Arbitrary transition requests never skip a stage or move backwards.
    #[test]
    fn arbitrary_requests_only_move_forward(
        requests in prop::collection::vec((arb_stage(), arb_stage()), 0..24),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");

        rt.block_on(async move {
            let store = InMemoryLifecycleStore::default();
            let id = ProposalId::new("prop");
            store
                .insert_proposal(Proposal::submitted(id.clone(), ChamberId::new("infra")))
                .await
                .unwrap();

            let mut expected = Stage::Pool;
            for (from, to) in requests {
                match store.transition_stage(&id, from, to).await {
                    Ok(true) => {
                        assert_eq!(from, expected);
                        assert_eq!(next_stage(expected), Some(to));
                        expected = to;
                    }
                    Ok(false) => assert_ne!(from, expected),
                    Err(err) => {
                        assert!(!can_transition(from, to));
                        assert_eq!(err.kind(), "invalid_transition");
                    }
                }
                let stored = store.get_proposal(&id).await.unwrap().unwrap().stage;
                assert_eq!(stored, expected);
            }
        });
    }
}
