//! Versioned protocol parameters.
//!
//! Every fraction the lifecycle rules depend on lives here, so governance
//! parameters can change between protocol versions without touching the
//! evaluators. Values are clamped on read, never rejected.

use serde::{Deserialize, Serialize};

/// Clamp a fraction into `[0, 1]`. NaN maps to `0`.
pub fn clamp_fraction(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Products within this relative distance of an integer are treated as that
/// integer, so `100 * 0.07` rounds up to 7 rather than 8.
const SNAP_EPSILON: f64 = 1e-9;

fn snap_to_integer(value: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() <= SNAP_EPSILON * nearest.abs().max(1.0) {
        nearest
    } else {
        value
    }
}

/// `floor(count * fraction)`, tolerant of binary representation error.
pub fn scaled_floor(count: i64, fraction: f64) -> i64 {
    snap_to_integer(count as f64 * fraction).floor() as i64
}

/// `ceil(count * fraction)`, tolerant of binary representation error.
pub fn scaled_ceil(count: i64, fraction: f64) -> i64 {
    snap_to_integer(count as f64 * fraction).ceil() as i64
}

/// How the pool upvote floor is derived.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum UpvoteFloorRule {
    /// A fraction of the active governors, rounded up.
    Fraction(f64),
    /// A fixed number of upvotes.
    Absolute(i64),
}

impl Default for UpvoteFloorRule {
    fn default() -> Self {
        UpvoteFloorRule::Fraction(default_upvote_floor_fraction())
    }
}

/// Protocol parameters passed into every evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProtocolParams {
    /// Protocol version these parameters belong to
    #[serde(default = "default_version")]
    pub version: String,

    /// Share of active governors that must engage with a pool proposal
    #[serde(default = "default_attention_quorum_fraction")]
    pub attention_quorum_fraction: f64,

    /// Minimum upvotes a pool proposal needs
    #[serde(default)]
    pub upvote_floor: UpvoteFloorRule,

    /// Share of active governors that must vote in a chamber
    #[serde(default = "default_chamber_quorum_fraction")]
    pub chamber_quorum_fraction: f64,

    /// Supermajority fraction; passing needs strictly more than this share
    #[serde(default = "default_passing_fraction")]
    pub passing_fraction: f64,

    /// Chamber quorum floor used when the caller supplies none
    #[serde(default)]
    pub default_min_quorum: i64,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            version: default_version(),
            attention_quorum_fraction: default_attention_quorum_fraction(),
            upvote_floor: UpvoteFloorRule::default(),
            chamber_quorum_fraction: default_chamber_quorum_fraction(),
            passing_fraction: default_passing_fraction(),
            default_min_quorum: 0,
        }
    }
}

impl ProtocolParams {
    /// Copy of these parameters with every fraction clamped into `[0, 1]`
    /// and the default quorum floor made non-negative.
    pub fn normalized(&self) -> Self {
        Self {
            version: self.version.clone(),
            attention_quorum_fraction: clamp_fraction(self.attention_quorum_fraction),
            upvote_floor: match self.upvote_floor {
                UpvoteFloorRule::Fraction(f) => UpvoteFloorRule::Fraction(clamp_fraction(f)),
                UpvoteFloorRule::Absolute(n) => UpvoteFloorRule::Absolute(n.max(0)),
            },
            chamber_quorum_fraction: clamp_fraction(self.chamber_quorum_fraction),
            passing_fraction: clamp_fraction(self.passing_fraction),
            default_min_quorum: self.default_min_quorum.max(0),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_upvote_floor(mut self, rule: UpvoteFloorRule) -> Self {
        self.upvote_floor = rule;
        self
    }
}

fn default_version() -> String {
    "v1".to_string()
}

fn default_attention_quorum_fraction() -> f64 {
    0.22
}

// Not fixed by the protocol documents available; override per deployment.
fn default_upvote_floor_fraction() -> f64 {
    0.10
}

fn default_chamber_quorum_fraction() -> f64 {
    0.33
}

fn default_passing_fraction() -> f64 {
    2.0 / 3.0
}
