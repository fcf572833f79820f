//! Configuration for the simulator

use cognitocracy_engine::{ChamberCounts, PoolCounts, ProtocolParams};
use serde::{Deserialize, Serialize};

/// Main simulator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimConfig {
    /// Protocol parameters the policy is bound to
    #[serde(default)]
    pub protocol: ProtocolParams,

    /// Proposals and delegations to run
    #[serde(default)]
    pub scenario: ScenarioConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scenario configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Size of the active electorate
    #[serde(default = "default_active_governors")]
    pub active_governors: i64,

    /// Chamber quorum floor; protocol default when absent
    #[serde(default)]
    pub min_quorum: Option<i64>,

    #[serde(default)]
    pub proposals: Vec<ScenarioProposal>,

    /// Applied in order
    #[serde(default)]
    pub delegations: Vec<ScenarioDelegation>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            active_governors: default_active_governors(),
            min_quorum: None,
            proposals: vec![
                ScenarioProposal::new("prop-attention-short", "engineering")
                    .with_pool(PoolCounts::new(15, 14)),
                ScenarioProposal::new("prop-accepted", "engineering")
                    .with_pool(PoolCounts::new(15, 18))
                    .with_chamber(ChamberCounts::new(35, 17, 0)),
                ScenarioProposal::new("prop-vote-short", "economics")
                    .with_pool(PoolCounts::new(20, 20))
                    .with_chamber(ChamberCounts::new(33, 17, 0)),
            ],
            delegations: vec![
                ScenarioDelegation::new("engineering", "alice", Some("bob")),
                ScenarioDelegation::new("engineering", "bob", Some("carol")),
                ScenarioDelegation::new("engineering", "carol", Some("alice")),
                ScenarioDelegation::new("economics", "bob", Some("alice")),
            ],
        }
    }
}

/// A proposal entered into the pool with its tallies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioProposal {
    pub id: String,
    pub chamber: String,
    #[serde(default)]
    pub pool: PoolCounts,
    #[serde(default)]
    pub chamber_votes: ChamberCounts,
}

impl ScenarioProposal {
    pub fn new(id: impl Into<String>, chamber: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            chamber: chamber.into(),
            pool: PoolCounts::default(),
            chamber_votes: ChamberCounts::default(),
        }
    }

    pub fn with_pool(mut self, pool: PoolCounts) -> Self {
        self.pool = pool;
        self
    }

    pub fn with_chamber(mut self, chamber_votes: ChamberCounts) -> Self {
        self.chamber_votes = chamber_votes;
        self
    }
}

/// A delegation action; no delegatee means un-delegate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDelegation {
    pub chamber: String,
    pub delegator: String,
    #[serde(default)]
    pub delegatee: Option<String>,
}

impl ScenarioDelegation {
    pub fn new(chamber: &str, delegator: &str, delegatee: Option<&str>) -> Self {
        Self {
            chamber: chamber.to_string(),
            delegator: delegator.to_string(),
            delegatee: delegatee.map(str::to_string),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_active_governors() -> i64 {
    150
}

fn default_log_level() -> String {
    "info".to_string()
}

impl SimConfig {
    /// Load configuration: defaults, then the optional file, then
    /// `COGNITO__`-prefixed environment variables (`__` separates levels).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&SimConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("COGNITO")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
