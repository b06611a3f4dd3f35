//! Dump Risk Module
//!
//! Inverse convention: higher means riskier. Three pressures add up:
//! - whale concentration (top-10 transfer share)
//! - latent supply dilution (`1 - circulating / total`)
//! - speculative momentum (turnover and positive price acceleration)
//!
//! Coefficients come from `DumpRiskWeights`. Every term is
//! non-decreasing in its driver.

use crate::core::normalize::{clamp, clamp_score, round_to, turnover_pct};
use crate::models::config::DumpRiskWeights;
use crate::models::types::{BreakdownBuilder, DumpRiskInput, ScoreResult};

/// Score with the default coefficients
pub fn score(input: &DumpRiskInput) -> ScoreResult {
    score_with(input, &DumpRiskWeights::default())
}

pub fn score_with(input: &DumpRiskInput, weights: &DumpRiskWeights) -> ScoreResult {
    let concentration_score = if input.has_transfer_data {
        clamp(
            input.top10_concentration_pct * weights.concentration_per_pct,
            0,
            weights.concentration_cap as i64,
        )
    } else {
        weights.concentration_neutral.round() as i64
    };

    let latent_supply_pct = latent_supply_pct(input.circulating_supply, input.total_supply);
    let dilution_score = match latent_supply_pct {
        Some(latent) => clamp(latent * weights.dilution_per_pct, 0, weights.dilution_cap as i64),
        None => weights.dilution_neutral.round() as i64,
    };

    let turnover = turnover_pct(input.volume_24h_usd, input.market_cap_usd);
    let turnover_score = clamp(
        turnover * weights.turnover_per_pct,
        0,
        weights.turnover_cap as i64,
    );

    // Only upward moves add pressure; drawdowns are not rewarded
    let acceleration_score = clamp(
        input.price_change_7d_pct.max(0.0) * weights.momentum_7d_per_pct
            + input.price_change_30d_pct.max(0.0) * weights.momentum_30d_per_pct,
        0,
        weights.momentum_cap as i64,
    );

    let total = clamp_score(
        (concentration_score + dilution_score + turnover_score + acceleration_score) as f64,
    );

    let concentration = input
        .has_transfer_data
        .then(|| round_to(input.top10_concentration_pct, 2));

    BreakdownBuilder::new()
        .item("top10_concentration_pct", "Top 10 Recipient Share (%)", concentration)
        .item("concentration_score", "Whale Pressure", concentration_score)
        .item("latent_supply_pct", "Supply Not Circulating (%)", latent_supply_pct.map(|v| round_to(v, 2)))
        .item("dilution_score", "Dilution Pressure", dilution_score)
        .item("turnover_pct", "Turnover Ratio (%)", round_to(turnover, 2))
        .item("turnover_score", "Turnover Pressure", turnover_score)
        .item("acceleration_score", "Price Acceleration Pressure", acceleration_score)
        .item("higher_is_riskier", "Higher Is Riskier", true)
        .build(total)
}

/// Share of total supply not yet circulating, `None` when total supply is unknown
fn latent_supply_pct(circulating: f64, total: f64) -> Option<f64> {
    if total > 0.0 {
        Some((1.0 - circulating.max(0.0) / total).clamp(0.0, 1.0) * 100.0)
    } else {
        None
    }
}
