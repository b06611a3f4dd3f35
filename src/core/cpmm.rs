//! Constant-product liquidity simulator
//!
//! Models a pool as two equal-value reserves (`quote = TVL / 2`) and uses
//! the small-trade approximation of price impact:
//!
//! ```text
//! slippage% = trade / (2 * TVL) * 100      (TVL > 0)
//! ```
//!
//! Accurate to ~5% for trades up to ~10% of pool depth, which is enough
//! for risk-tier classification. The same formula, inverted, gives the
//! depth figures and the minimum TVL for a slippage ceiling.

use tracing::debug;

use crate::models::config::{CpmmConfig, EngineConfig, RiskThresholds};
use crate::models::types::{
    ChainLiquidityProjection, LiquiditySimResult, LpRecommendation, RiskLevel, SlippageTier,
};
use crate::utils::constants::{format_usd, format_usd_compact};

/// Label used for the projected destination pool
pub const DESTINATION_LABEL: &str = "Destination (projected)";

/// Price impact in percent for a trade against a pool, absent without a pool
pub fn slippage_pct(trade_usd: f64, tvl_usd: f64) -> Option<f64> {
    if tvl_usd > 0.0 {
        Some(trade_usd * 100.0 / (2.0 * tvl_usd))
    } else {
        None
    }
}

/// Minimum TVL keeping `target_trade_usd` at or under `max_slippage_pct`.
/// Unbounded when the ceiling is not positive.
pub fn minimum_tvl_for(target_trade_usd: f64, max_slippage_pct: f64) -> f64 {
    if max_slippage_pct <= 0.0 || max_slippage_pct.is_nan() {
        return f64::INFINITY;
    }
    target_trade_usd * 50.0 / max_slippage_pct
}

/// Upper bounds are exclusive: exactly 1% is `High`, not `Moderate`
pub fn classify(slippage_pct: Option<f64>, thresholds: &RiskThresholds) -> RiskLevel {
    match slippage_pct {
        None => RiskLevel::NotApplicable,
        Some(pct) if pct < thresholds.low_below_pct => RiskLevel::Low,
        Some(pct) if pct < thresholds.moderate_below_pct => RiskLevel::Moderate,
        Some(pct) if pct < thresholds.high_below_pct => RiskLevel::High,
        Some(_) => RiskLevel::VeryHigh,
    }
}

pub fn slippage_tier(trade_usd: f64, tvl_usd: f64, thresholds: &RiskThresholds) -> SlippageTier {
    let pct = slippage_pct(trade_usd, tvl_usd);
    SlippageTier {
        trade_size_usd: trade_usd,
        label: format_usd_compact(trade_usd),
        slippage_pct: pct,
        risk_level: classify(pct, thresholds),
    }
}

pub fn slippage_tiers(
    trade_sizes: &[f64],
    tvl_usd: f64,
    thresholds: &RiskThresholds,
) -> Vec<SlippageTier> {
    trade_sizes
        .iter()
        .map(|&size| slippage_tier(size, tvl_usd, thresholds))
        .collect()
}

/// Trade size that itself causes `fraction` price impact
pub fn depth_usd(tvl_usd: f64, fraction: f64) -> f64 {
    let quote_reserve = tvl_usd.max(0.0) / 2.0;
    (quote_reserve * fraction).round()
}

/// Destination TVL: a bounded fraction of source TVL, 0 without source data
pub fn seeded_tvl(source_tvl_usd: f64, cpmm: &CpmmConfig) -> f64 {
    if source_tvl_usd > 0.0 {
        (source_tvl_usd * cpmm.seed_fraction).clamp(cpmm.seed_floor_usd, cpmm.seed_cap_usd)
    } else {
        0.0
    }
}

/// Stateless CPMM simulator over an injected policy table
#[derive(Debug, Clone, Default)]
pub struct LiquiditySimulator {
    config: EngineConfig,
}

impl LiquiditySimulator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Liquidity profile of a pool with the given TVL
    pub fn project(&self, label: &str, tvl_usd: f64) -> ChainLiquidityProjection {
        let cpmm = &self.config.cpmm;
        ChainLiquidityProjection {
            label: label.to_string(),
            tvl_usd: tvl_usd.max(0.0),
            tiers: slippage_tiers(
                &self.config.trade_sizes.projection_usd,
                tvl_usd,
                &self.config.risk_thresholds,
            ),
            depth_1pct_usd: depth_usd(tvl_usd, cpmm.depth_1pct_fraction),
            depth_5pct_usd: depth_usd(tvl_usd, cpmm.depth_5pct_fraction),
        }
    }

    /// LP seeding advice for the two canonical scenarios
    pub fn recommend_lp(&self, seeded_tvl_usd: f64) -> LpRecommendation {
        let cpmm = &self.config.cpmm;
        let min_lp_usd = minimum_tvl_for(cpmm.min_lp_trade_usd, cpmm.lp_max_slippage_pct);
        let target_lp_usd = minimum_tvl_for(cpmm.target_lp_trade_usd, cpmm.lp_max_slippage_pct);

        let mut rationale = format!(
            "Seed at least {} TVL to keep a {} trade under {}% slippage; target {} to keep a {} trade under {}%.",
            format_usd(min_lp_usd),
            format_usd_compact(cpmm.min_lp_trade_usd),
            cpmm.lp_max_slippage_pct,
            format_usd(target_lp_usd),
            format_usd_compact(cpmm.target_lp_trade_usd),
            cpmm.lp_max_slippage_pct,
        );

        if seeded_tvl_usd > 0.0 {
            let verdict = if seeded_tvl_usd >= target_lp_usd {
                "meets the target".to_string()
            } else if seeded_tvl_usd >= min_lp_usd {
                format!(
                    "clears the minimum but is {} short of the target",
                    format_usd(target_lp_usd - seeded_tvl_usd)
                )
            } else {
                format!(
                    "is {} short of the minimum",
                    format_usd(min_lp_usd - seeded_tvl_usd)
                )
            };
            rationale.push_str(&format!(
                " The projected seed of {} {}.",
                format_usd(seeded_tvl_usd),
                verdict
            ));
        }

        LpRecommendation {
            min_lp_usd,
            target_lp_usd,
            rationale,
        }
    }

    /// Current pool profile, destination projection and seeding advice
    pub fn simulate(
        &self,
        source_tvl_usd: f64,
        price_usd: f64,
        source_chain_label: &str,
    ) -> LiquiditySimResult {
        let cpmm = &self.config.cpmm;
        let has_tvl_data = source_tvl_usd > 0.0;

        let current_chain = self.project(source_chain_label, source_tvl_usd);
        let seeded_tvl_usd = seeded_tvl(source_tvl_usd, cpmm);
        let destination = self.project(DESTINATION_LABEL, seeded_tvl_usd);

        let seeded_token_reserve = if seeded_tvl_usd > 0.0 && price_usd > 0.0 {
            Some(seeded_tvl_usd / 2.0 / price_usd)
        } else {
            None
        };

        let note = if !has_tvl_data {
            debug!(chain = %source_chain_label, "No source TVL, destination projection skipped");
            format!(
                "No pool TVL data for {}; slippage is not applicable and the seed figures are standalone minimums.",
                source_chain_label
            )
        } else {
            let raw = source_tvl_usd * cpmm.seed_fraction;
            let bound = if raw < cpmm.seed_floor_usd {
                format!(" (raised to the {} floor)", format_usd(cpmm.seed_floor_usd))
            } else if raw > cpmm.seed_cap_usd {
                format!(" (capped at {})", format_usd(cpmm.seed_cap_usd))
            } else {
                String::new()
            };
            format!(
                "Destination pool assumed seeded with {}% of {} TVL ({}): {}{}.",
                cpmm.seed_fraction * 100.0,
                source_chain_label,
                format_usd(source_tvl_usd),
                format_usd(seeded_tvl_usd),
                bound
            )
        };

        LiquiditySimResult {
            current_chain,
            destination,
            seeded_tvl_usd,
            seeded_token_reserve,
            recommendation: self.recommend_lp(seeded_tvl_usd),
            has_tvl_data,
            note,
        }
    }
}

/// `LiquiditySimulator::simulate` with the default policy table
pub fn simulate(source_tvl_usd: f64, price_usd: f64, source_chain_label: &str) -> LiquiditySimResult {
    LiquiditySimulator::default().simulate(source_tvl_usd, price_usd, source_chain_label)
}
