//! Liquidity Module
//!
//! Pool depth (log-scaled TVL), price confidence, venue breadth and the
//! 24h trading range. Without TVL data the depth term falls back to the
//! turnover-ratio proxy. Also produces the current-chain slippage tiers.

use serde::{Deserialize, Serialize};

use crate::core::cpmm::slippage_tiers;
use crate::core::normalize::{clamp, clamp_score, log_scale, round_to, turnover_pct};
use crate::models::config::EngineConfig;
use crate::models::types::{BreakdownBuilder, LiquidityInput, ScoreResult, SlippageTier};

pub const TVL_LOG_FACTOR: f64 = 10.0;
pub const TVL_MAX: i64 = 50;
/// Points per percent of turnover when TVL is unknown
pub const TURNOVER_PROXY_PER_PCT: f64 = 5.0;

pub const CONFIDENCE_POINTS: f64 = 20.0;
pub const CONFIDENCE_MAX: i64 = 20;

pub const LISTING_POINTS_EACH: f64 = 0.15;
pub const LISTING_MAX: i64 = 15;

pub const SPREAD_BASE: f64 = 15.0;
pub const SPREAD_PENALTY_PER_PCT: f64 = 1.5;
pub const SPREAD_MAX: i64 = 15;
/// Used when the 24h high is unknown
pub const SPREAD_NEUTRAL: i64 = 10;

/// Liquidity score plus the current-chain slippage side artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityAssessment {
    pub result: ScoreResult,
    pub slippage_tiers: Vec<SlippageTier>,
}

/// Score with the default policy table
pub fn score(input: &LiquidityInput) -> ScoreResult {
    assess(input, &EngineConfig::default()).result
}

pub fn assess(input: &LiquidityInput, config: &EngineConfig) -> LiquidityAssessment {
    let has_tvl_data = input.total_pool_tvl_usd > 0.0;
    let turnover = turnover_pct(input.volume_24h_usd, input.market_cap_usd);

    let (tvl_score, tvl_source) = if has_tvl_data {
        (
            clamp(log_scale(input.total_pool_tvl_usd, TVL_LOG_FACTOR), 0, TVL_MAX),
            "pool TVL",
        )
    } else {
        (
            clamp(turnover * TURNOVER_PROXY_PER_PCT, 0, TVL_MAX),
            "turnover proxy",
        )
    };

    let confidence_score = clamp(input.price_confidence * CONFIDENCE_POINTS, 0, CONFIDENCE_MAX);
    let listing_score = clamp(input.exchange_listings as f64 * LISTING_POINTS_EACH, 0, LISTING_MAX);

    let spread_pct = if input.high_24h_usd > 0.0 {
        Some((input.high_24h_usd - input.low_24h_usd) / input.high_24h_usd * 100.0)
    } else {
        None
    };
    let spread_score = match spread_pct {
        Some(spread) => clamp(SPREAD_BASE - spread * SPREAD_PENALTY_PER_PCT, 0, SPREAD_MAX),
        None => SPREAD_NEUTRAL,
    };

    let total = clamp_score((tvl_score + confidence_score + listing_score + spread_score) as f64);

    let tvl_value = has_tvl_data.then(|| round_to(input.total_pool_tvl_usd, 2));

    let result = BreakdownBuilder::new()
        .item("total_pool_tvl_usd", "Pool TVL (USD)", tvl_value)
        .item("pool_count", "Pools", input.pool_count)
        .item("depth_source", "Depth Signal", tvl_source)
        .item("turnover_pct", "Turnover Ratio (%)", round_to(turnover, 2))
        .item("tvl_score", "Depth Score (max 50)", tvl_score)
        .item("price_confidence", "Price Confidence", round_to(input.price_confidence, 3))
        .item("confidence_score", "Confidence Score (max 20)", confidence_score)
        .item("exchange_listings", "Exchange Listings", input.exchange_listings)
        .item("listing_score", "Venue Score (max 15)", listing_score)
        .item("spread_pct", "24h Range (%)", spread_pct.map(|s| round_to(s, 2)))
        .item("spread_score", "Spread Score (max 15)", spread_score)
        .build(total);

    let slippage_tiers = slippage_tiers(
        &config.trade_sizes.liquidity_usd,
        input.total_pool_tvl_usd,
        &config.risk_thresholds,
    );

    LiquidityAssessment {
        result,
        slippage_tiers,
    }
}
