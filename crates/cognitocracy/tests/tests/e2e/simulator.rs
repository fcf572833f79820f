//! End-to-end test: simulator scenarios through the full stack.

use cognitocracy_engine::{
    AdvanceOutcome, ChamberCounts, PoolCounts, ProtocolParams, Stage, UpvoteFloorRule,
};
use cognitocracy_sim::{
    random_scenario, run_scenario, ScenarioConfig, ScenarioDelegation, ScenarioProposal,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[tokio::test]
async fn delegation_chain_scenario() {
    let scenario = ScenarioConfig {
        active_governors: 150,
        min_quorum: None,
        proposals: vec![],
        delegations: vec![
            ScenarioDelegation::new("infra", "A", Some("B")),
            ScenarioDelegation::new("infra", "B", Some("C")),
            ScenarioDelegation::new("infra", "C", Some("D")),
            ScenarioDelegation::new("infra", "C", Some("A")),
        ],
    };
    let report = run_scenario(ProtocolParams::default(), &scenario).await.unwrap();
    let accepted: Vec<bool> = report.delegations.iter().map(|d| d.accepted).collect();
    assert_eq!(accepted, vec![true, true, true, false]);
}

#[tokio::test]
async fn protocol_version_changes_outcomes_without_code_changes() {
    let scenario = ScenarioConfig {
        active_governors: 150,
        min_quorum: None,
        proposals: vec![ScenarioProposal::new("p-1", "infra")
            .with_pool(PoolCounts::new(15, 18))
            .with_chamber(ChamberCounts::new(35, 17, 0))],
        delegations: vec![],
    };

    let v1 = run_scenario(ProtocolParams::default(), &scenario).await.unwrap();
    assert_eq!(v1.proposals[0].final_stage, Stage::Build);

    let v2 = ProtocolParams::default()
        .with_version("v2")
        .with_upvote_floor(UpvoteFloorRule::Absolute(20));
    let report = run_scenario(v2, &scenario).await.unwrap();
    assert_eq!(report.protocol_version, "v2");
    assert_eq!(report.proposals[0].final_stage, Stage::Pool);
    assert!(matches!(
        report.proposals[0].outcomes[0],
        AdvanceOutcome::Held { .. }
    ));
}

#[tokio::test]
async fn report_serializes_to_json() {
    let report = run_scenario(ProtocolParams::default(), &ScenarioConfig::default())
        .await
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["protocol_version"], "v1");
    assert_eq!(json["proposals"][1]["final_stage"], "build");
    assert_eq!(json["proposals"][1]["outcomes"][0]["outcome"], "advanced");
}

#[tokio::test]
async fn seeded_random_runs_match() {
    let a = random_scenario(&mut StdRng::seed_from_u64(2024), 25, 150, &["infra"]);
    let b = random_scenario(&mut StdRng::seed_from_u64(2024), 25, 150, &["infra"]);

    let ra = run_scenario(ProtocolParams::default(), &a).await.unwrap();
    let rb = run_scenario(ProtocolParams::default(), &b).await.unwrap();

    let stages_a: Vec<Stage> = ra.proposals.iter().map(|p| p.final_stage).collect();
    let stages_b: Vec<Stage> = rb.proposals.iter().map(|p| p.final_stage).collect();
    assert_eq!(stages_a, stages_b);
    assert_eq!(ra.rejected_delegations(), rb.rejected_delegations());
}
