//! Demand Module
//!
//! Trading activity relative to size, market-cap rank and recent momentum.
//!
//! - Turnover (0-40): 24h volume / market cap, x5 per percent; 8% daily
//!   turnover saturates
//! - Rank (0-30): 30 - rank * 0.3, neutral 10 when unranked
//! - Momentum (0-30): centered on 15 so flat price action lands mid-range

use crate::core::normalize::{clamp, clamp_score, round_to, turnover_pct};
use crate::models::types::{BreakdownBuilder, DemandInput, ScoreResult};

pub const TURNOVER_POINTS_PER_PCT: f64 = 5.0;
pub const TURNOVER_MAX: i64 = 40;

pub const RANK_BASE: f64 = 30.0;
pub const RANK_PENALTY_PER_PLACE: f64 = 0.3;
pub const RANK_MAX: i64 = 30;
pub const RANK_NEUTRAL: i64 = 10;

pub const MOMENTUM_CENTER: f64 = 15.0;
pub const MOMENTUM_7D_PER_PCT: f64 = 0.5;
pub const MOMENTUM_30D_PER_PCT: f64 = 0.3;
pub const MOMENTUM_MAX: i64 = 30;

pub fn score(input: &DemandInput) -> ScoreResult {
    let turnover = turnover_pct(input.volume_24h_usd, input.market_cap_usd);
    let turnover_score = clamp(turnover * TURNOVER_POINTS_PER_PCT, 0, TURNOVER_MAX);

    let rank_score = match input.market_cap_rank {
        Some(rank) => clamp(RANK_BASE - rank as f64 * RANK_PENALTY_PER_PLACE, 0, RANK_MAX),
        None => RANK_NEUTRAL,
    };

    let momentum_score = clamp(
        MOMENTUM_CENTER
            + input.price_change_7d_pct * MOMENTUM_7D_PER_PCT
            + input.price_change_30d_pct * MOMENTUM_30D_PER_PCT,
        0,
        MOMENTUM_MAX,
    );

    let total = clamp_score((turnover_score + rank_score + momentum_score) as f64);

    BreakdownBuilder::new()
        .item("volume_24h_usd", "24h Volume (USD)", round_to(input.volume_24h_usd, 2))
        .item("market_cap_usd", "Market Cap (USD)", round_to(input.market_cap_usd, 2))
        .item("turnover_pct", "Turnover Ratio (%)", round_to(turnover, 2))
        .item("turnover_score", "Turnover Score (max 40)", turnover_score)
        .item("market_cap_rank", "Market Cap Rank", input.market_cap_rank)
        .item("rank_score", "Rank Score (max 30)", rank_score)
        .item("price_change_7d_pct", "7d Price Change (%)", round_to(input.price_change_7d_pct, 2))
        .item("price_change_30d_pct", "30d Price Change (%)", round_to(input.price_change_30d_pct, 2))
        .item("momentum_score", "Momentum Score (max 30)", momentum_score)
        .build(total)
}
