//! Strategy Decision Procedure
//!
//! Order-sensitive decision tree; later branches overlap earlier ones:
//! 1. weighted average >= 70 -> Canonical Token Launch
//! 2. weighted average >= 55 -> LP-Based Migration
//! 3. liquidity < 40         -> Liquidity Bootstrapping Event
//! 4. otherwise              -> Wrapped Token
//!
//! Branches compare the unrounded weighted average, not the clamped
//! overall score.

use crate::core::composite::weighted_average;
use crate::models::config::{CompositeWeights, StrategyThresholds};
use crate::models::types::{AllScores, Strategy, StrategyResult};

/// Recommend with the default weights and cut-offs
pub fn recommend(scores: &AllScores) -> StrategyResult {
    recommend_with(
        scores,
        &CompositeWeights::default(),
        &StrategyThresholds::default(),
    )
}

pub fn recommend_with(
    scores: &AllScores,
    weights: &CompositeWeights,
    thresholds: &StrategyThresholds,
) -> StrategyResult {
    let avg = weighted_average(scores, weights);

    if avg >= thresholds.canonical_min {
        StrategyResult {
            strategy: Strategy::CanonicalLaunch,
            rationale: format!(
                "Weighted readiness {:.1} >= {}: demand ({}) and liquidity ({}) support migrating the native asset directly.",
                avg, thresholds.canonical_min, scores.demand, scores.liquidity
            ),
        }
    } else if avg >= thresholds.lp_migration_min {
        StrategyResult {
            strategy: Strategy::LpBasedMigration,
            rationale: format!(
                "Weighted readiness {:.1} is between {} and {}: seed a destination pool first (liquidity {}), then migrate holders.",
                avg, thresholds.lp_migration_min, thresholds.canonical_min, scores.liquidity
            ),
        }
    } else if scores.liquidity < thresholds.bootstrap_liquidity_below {
        StrategyResult {
            strategy: Strategy::LiquidityBootstrapping,
            rationale: format!(
                "Weighted readiness {:.1} < {} and liquidity {} < {}: run a price-discovery auction before launch.",
                avg, thresholds.lp_migration_min, scores.liquidity, thresholds.bootstrap_liquidity_below
            ),
        }
    } else {
        StrategyResult {
            strategy: Strategy::WrappedToken,
            rationale: format!(
                "Weighted readiness {:.1} < {} with adequate liquidity ({}): start with a wrapped representation and revisit a canonical launch later.",
                avg, thresholds.lp_migration_min, scores.liquidity
            ),
        }
    }
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
    fn test_canonical_regardless_of_dump_risk() {
        for dump in [0, 50, 100] {
            let result = recommend(&scores(80, 75, 70, 80, dump));
            assert_eq!(result.strategy, Strategy::CanonicalLaunch);
            assert!(result.rationale.contains("75.8"));
        }
    }

    #[test]
    fn test_lp_based_migration() {
        // 0.3*60 + 0.25*60 + 0.3*60 + 0.15*60 = 60
        let result = recommend(&scores(60, 60, 60, 60, 0));
        assert_eq!(result.strategy, Strategy::LpBasedMigration);
    }

    #[test]
    fn test_bootstrapping_when_liquidity_thin() {
        let result = recommend(&scores(50, 50, 30, 50, 0));
        assert_eq!(result.strategy, Strategy::LiquidityBootstrapping);
    }

    #[test]
    fn test_wrapped_fallback() {
        let result = recommend(&scores(40, 40, 45, 30, 0));
        assert_eq!(result.strategy, Strategy::WrappedToken);
    }

    #[test]
    fn test_order_matters() {
        // liquidity < 40 but average >= 70: the first branch wins
        let result = recommend(&scores(100, 100, 30, 100, 0));
        assert_eq!(result.strategy, Strategy::CanonicalLaunch);
    }

    #[test]
    fn test_exact_cutoffs_are_inclusive() {
        // 0.25*46 + 0.30*97 + 0.15*96 = 55.0 exactly
        let lp = recommend(&scores(0, 46, 97, 96, 0));
        assert_eq!(lp.strategy, Strategy::LpBasedMigration);

        // 0.30*100 + 0.25*100 + 0.30*50 = 70.0 exactly
        let canonical = recommend(&scores(100, 100, 50, 0, 0));
        assert_eq!(canonical.strategy, Strategy::CanonicalLaunch);

        // 0.30*50 + 0.25*80 + 0.15*80 = 47.0 with no liquidity
        let thin = recommend(&scores(50, 80, 0, 80, 0));
        assert_eq!(thin.strategy, Strategy::LiquidityBootstrapping);
    }

    #[test]
    fn test_boundary_uses_unrounded_average() {
        // 0.3*69 + 0.25*70 + 0.3*70 + 0.15*70 = 69.7 -> overall rounds to 70
        let s = scores(69, 70, 70, 70, 0);
        assert_eq!(crate::core::composite::overall_score(&s), 70);
        assert_eq!(recommend(&s).strategy, Strategy::LpBasedMigration);
    }
}
