//! Migration Readiness CLI
//!
//! Scores one token snapshot and prints the full report as JSON.
//!
//! Usage:
//!   readiness token.json
//!   cat token.json | readiness -
//!
//! Environment:
//!   READINESS_CONFIG - JSON file overriding the default policy table
//!   RUST_LOG         - Log level (default: info), logs go to stderr

use std::io::Read;

use migration_readiness::{AppError, AppResult, EngineConfig, MigrationInput, ReadinessEngine};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    if let Err(e) = run() {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run() -> AppResult<()> {
    let source = std::env::args().nth(1).unwrap_or_else(|| "-".to_string());
    let raw = read_input(&source)?;

    let input: MigrationInput = serde_json::from_str(&raw)?;
    input.validate().map_err(AppError::invalid_input)?;

    let config = EngineConfig::from_env()?;
    let engine = ReadinessEngine::new(config);
    let report = engine.evaluate(&input);

    info!(
        "📊 {} on {}: overall {} -> {}",
        report.token,
        report.source_chain,
        report.overall,
        report.strategy.strategy.title()
    );

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| AppError::internal(format!("Cannot serialize report: {}", e)))?;
    println!("{}", json);

    Ok(())
}

fn read_input(source: &str) -> AppResult<String> {
    if source == "-" {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        Ok(raw)
    } else {
        Ok(std::fs::read_to_string(source)?)
    }
}
