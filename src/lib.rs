//! Migration Readiness Library
//!
//! Scores how ready a token is to migrate to a new chain:
//! - Five module scores (demand, market presence, liquidity, bridge
//!   risk, dump risk), each with an itemized breakdown
//! - Constant-product (x*y=k) slippage simulation and LP seeding advice
//! - A weighted composite and a deterministic strategy recommendation
//!
//! All scoring is pure and synchronous; the `api` module wraps it in an
//! axum REST server.

pub mod api;
pub mod core;
pub mod models;
pub mod utils;

pub use crate::core::cpmm::{minimum_tvl_for, slippage_pct, LiquiditySimulator};
pub use crate::core::engine::ReadinessEngine;
pub use crate::core::strategy::recommend;
pub use models::config::{EngineConfig, ServerConfig};
pub use models::errors::{AppError, AppResult, ErrorCode};
pub use models::types::{
    AllScores, LiquiditySimResult, MigrationInput, MigrationReport, ScoreResult, Strategy,
    StrategyResult,
};
pub use utils::telemetry::{TelemetryCollector, TelemetryStats};
