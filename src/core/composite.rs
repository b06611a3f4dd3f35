//! Composite Aggregator
//!
//! `overall = clamp(demand*0.30 + market_presence*0.25 + liquidity*0.30 + bridge_risk*0.15)`

use crate::core::normalize::clamp_score;
use crate::models::config::CompositeWeights;
use crate::models::types::{AllScores, ModuleKind};

/// Modules feeding the composite. Dump risk is reported but never weighted:
/// whale concentration already lowers market presence.
pub const COMPOSITE_MODULES: [ModuleKind; 4] = [
    ModuleKind::Demand,
    ModuleKind::MarketPresence,
    ModuleKind::Liquidity,
    ModuleKind::BridgeRisk,
];

pub fn is_composite_eligible(module: ModuleKind) -> bool {
    COMPOSITE_MODULES.contains(&module)
}

/// Resolution the weighted sum is snapped to before any cut-off or rounding
const SUM_RESOLUTION: f64 = 1e9;

/// Unrounded weighted sum over the composite-eligible modules.
///
/// Snapped to `1 / SUM_RESOLUTION` so a sum that is exactly 55.0 or 7.5
/// in decimal compares and rounds as such, instead of as 54.999...
pub fn weighted_average(scores: &AllScores, weights: &CompositeWeights) -> f64 {
    let sum: f64 = COMPOSITE_MODULES
        .iter()
        .map(|&module| scores.get(module) as f64 * weights.weight_for(module))
        .sum();
    if sum.is_finite() {
        (sum * SUM_RESOLUTION).round() / SUM_RESOLUTION
    } else {
        sum
    }
}

pub fn overall_score_with(scores: &AllScores, weights: &CompositeWeights) -> u8 {
    clamp_score(weighted_average(scores, weights)) as u8
}

/// Overall readiness under the default weights
pub fn overall_score(scores: &AllScores) -> u8 {
    overall_score_with(scores, &CompositeWeights::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(demand: u8, presence: u8, liquidity: u8, bridge: u8, dump: u8) -> AllScores {
        AllScores {
            demand,
            market_presence: presence,
            liquidity,
            bridge_risk: bridge,
            dump_risk: dump,
        }
    }

    #[test]
    fn test_weighted_example() {
        let s = scores(80, 75, 70, 80, 0);
        let avg = weighted_average(&s, &CompositeWeights::default());
        // 24 + 18.75 + 21 + 12
        assert_eq!(avg, 75.75);
        assert_eq!(overall_score(&s), 76);
    }

    #[test]
    fn test_exact_half_rounds_up() {
        // 0.30*1 + 0.15*48 = 7.5 exactly; the raw f64 sum is 7.4999...
        let s = scores(0, 0, 1, 48, 0);
        assert_eq!(weighted_average(&s, &CompositeWeights::default()), 7.5);
        assert_eq!(overall_score(&s), 8);
    }

    #[test]
    fn test_exact_sums_against_integer_arithmetic() {
        // Default weights in basis points: 3000/2500/3000/1500
        for demand in (0..=100u8).step_by(3) {
            for presence in (0..=100u8).step_by(5) {
                for liquidity in (0..=100u8).step_by(7) {
                    for bridge in 0..=100u8 {
                        let s = scores(demand, presence, liquidity, bridge, 0);
                        let bp = 3000 * demand as i64
                            + 2500 * presence as i64
                            + 3000 * liquidity as i64
                            + 1500 * bridge as i64;
                        let expected = (bp + 5_000) / 10_000;
                        assert_eq!(overall_score(&s) as i64, expected, "{:?}", s);
                        assert_eq!(
                            weighted_average(&s, &CompositeWeights::default()),
                            bp as f64 / 10_000.0
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_dump_risk_excluded() {
        let calm = scores(60, 60, 60, 60, 0);
        let risky = scores(60, 60, 60, 60, 100);
        assert_eq!(overall_score(&calm), overall_score(&risky));
        assert!(!is_composite_eligible(ModuleKind::DumpRisk));
        assert_eq!(COMPOSITE_MODULES.len(), 4);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(overall_score(&scores(0, 0, 0, 0, 0)), 0);
        assert_eq!(overall_score(&scores(100, 100, 100, 100, 100)), 100);
    }

    #[test]
    fn test_monotone_per_module() {
        let base = scores(50, 50, 50, 50, 50);
        let baseline = overall_score(&base);
        assert!(overall_score(&AllScores { demand: 90, ..base }) >= baseline);
        assert!(overall_score(&AllScores { market_presence: 90, ..base }) >= baseline);
        assert!(overall_score(&AllScores { liquidity: 90, ..base }) >= baseline);
        assert!(overall_score(&AllScores { bridge_risk: 90, ..base }) >= baseline);
    }
}
