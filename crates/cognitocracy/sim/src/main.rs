//! Cognitocracy simulator CLI
//!
//! Runs the configured scenario (or a seeded random one) through the
//! lifecycle engine and prints a JSON report on stdout. Logs go to stderr.

use clap::Parser;
use cognitocracy_sim::{random_scenario, run_scenario, SimConfig, SimResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Cognitocracy simulator CLI
#[derive(Parser)]
#[command(name = "cognitocracy-sim")]
#[command(about = "Drive proposals and delegations through the governance lifecycle", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "COGNITO_CONFIG")]
    config: Option<String>,

    /// Override the active electorate size
    #[arg(short, long)]
    active_governors: Option<i64>,

    /// Generate this many random proposals instead of the configured ones
    #[arg(long)]
    random: Option<usize>,

    /// Seed for random scenarios
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Chambers used by random scenarios
    #[arg(long, value_delimiter = ',', default_value = "engineering,economics")]
    chambers: Vec<String>,

    /// Log level
    #[arg(long, env = "COGNITO_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "COGNITO_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> SimResult<()> {
    let cli = Cli::parse();

    let mut config = SimConfig::load(cli.config.as_deref())?;

    // Initialize tracing
    let level = cli.log_level.clone().unwrap_or_else(|| config.logging.level.clone());
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into());

    if cli.json || config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    if let Some(active) = cli.active_governors {
        config.scenario.active_governors = active;
    }

    if let Some(count) = cli.random {
        let chambers: Vec<&str> = cli.chambers.iter().map(String::as_str).collect();
        let mut rng = StdRng::seed_from_u64(cli.seed);
        config.scenario =
            random_scenario(&mut rng, count, config.scenario.active_governors, &chambers);
        tracing::info!(seed = cli.seed, proposals = count, "Generated random scenario");
    }

    let report = run_scenario(config.protocol, &config.scenario).await?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report)?;
    writeln!(stdout)?;

    Ok(())
}
