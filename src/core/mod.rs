//! Core Module - Scoring, CPMM Simulation & Strategy
//!
//! Pure, synchronous business logic. Every scorer maps an already-resolved
//! input record to a 0-100 `ScoreResult`; nothing here performs I/O.

pub mod bridge_risk;
pub mod composite;
pub mod cpmm;
pub mod demand;
pub mod dump_risk;
pub mod engine;
pub mod liquidity;
pub mod market_presence;
pub mod normalize;
pub mod strategy;

pub use composite::{overall_score, overall_score_with, weighted_average, COMPOSITE_MODULES};
pub use cpmm::{minimum_tvl_for, slippage_pct, LiquiditySimulator};
pub use engine::ReadinessEngine;
pub use liquidity::LiquidityAssessment;
pub use strategy::{recommend, recommend_with};
