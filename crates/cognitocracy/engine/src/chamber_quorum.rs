//! Chamber quorum and the strict supermajority passing rule.

use cognitocracy_types::{clamp_fraction, scaled_ceil, scaled_floor, ChamberCounts};
use serde::{Deserialize, Serialize};

/// Inputs to [`evaluate_chamber_quorum`].
///
/// `min_quorum` is already resolved; callers holding an optional floor go
/// through [`StageTransitionPolicy`](crate::StageTransitionPolicy), which
/// substitutes the protocol default.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChamberQuorumParams {
    pub quorum_fraction: f64,
    pub active_governors: i64,
    pub passing_fraction: f64,
    pub min_quorum: i64,
}

/// Outcome of a chamber quorum evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChamberQuorumOutcome {
    pub engaged: i64,
    pub quorum_needed: i64,
    pub quorum_met: bool,
    pub yes_fraction: f64,
    pub pass_needed: i64,
    pub pass_met: bool,
    pub should_advance: bool,
}

/// Evaluate whether a vote-stage proposal may advance to build.
///
/// Passing needs `floor(engaged * passing_fraction) + 1` yes votes, so a
/// result sitting exactly on the fraction fails. Abstentions count toward
/// quorum and toward the engaged base, never toward passing.
pub fn evaluate_chamber_quorum(
    params: &ChamberQuorumParams,
    counts: &ChamberCounts,
) -> ChamberQuorumOutcome {
    let active = params.active_governors.max(0);
    let quorum_fraction = clamp_fraction(params.quorum_fraction);
    let passing_fraction = clamp_fraction(params.passing_fraction);
    let min_quorum = params.min_quorum.clamp(0, active);

    let yes = counts.yes.max(0);
    let no = counts.no.max(0);
    let abstain = counts.abstain.max(0);
    let engaged = yes.saturating_add(no).saturating_add(abstain);

    let quorum_needed = if active > 0 {
        min_quorum.max(scaled_ceil(active, quorum_fraction))
    } else {
        0
    };
    let quorum_met = active > 0 && engaged >= quorum_needed;

    let yes_fraction = if engaged > 0 {
        yes as f64 / engaged as f64
    } else {
        0.0
    };

    let pass_needed = if engaged > 0 {
        scaled_floor(engaged, passing_fraction) + 1
    } else {
        0
    };
    let pass_met = engaged > 0 && yes >= pass_needed;

    ChamberQuorumOutcome {
        engaged,
        quorum_needed,
        quorum_met,
        yes_fraction,
        pass_needed,
        pass_met,
        should_advance: quorum_met && pass_met,
    }
}
