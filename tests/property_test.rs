//! Randomized sweeps over the scoring and CPMM laws

use migration_readiness::core::cpmm::{
    classify, minimum_tvl_for, seeded_tvl, slippage_pct, slippage_tier, LiquiditySimulator,
};
use migration_readiness::core::normalize::clamp;
use migration_readiness::core::{bridge_risk, composite, demand, dump_risk, liquidity, market_presence, strategy};
use migration_readiness::models::config::{CpmmConfig, RiskThresholds};
use migration_readiness::models::types::{
    BridgeRiskInput, BridgeRoute, DemandInput, DumpRiskInput, LiquidityInput,
    MarketPresenceInput, RiskLevel,
};
use migration_readiness::{AllScores, Strategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ITERATIONS: usize = 2_000;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed_2024)
}

/// Values spanning many orders of magnitude, including zero and negatives
fn wide(rng: &mut StdRng) -> f64 {
    match rng.gen_range(0..10) {
        0 => 0.0,
        1 => -rng.gen_range(0.0..1e6),
        _ => 10f64.powf(rng.gen_range(-2.0..12.0)),
    }
}

fn pct(rng: &mut StdRng) -> f64 {
    rng.gen_range(-100.0..500.0)
}

fn random_demand(rng: &mut StdRng) -> DemandInput {
    DemandInput {
        volume_24h_usd: wide(rng),
        market_cap_usd: wide(rng),
        market_cap_rank: rng.gen_bool(0.7).then(|| rng.gen_range(1..5_000)),
        price_change_7d_pct: pct(rng),
        price_change_30d_pct: pct(rng),
    }
}

fn random_presence(rng: &mut StdRng) -> MarketPresenceInput {
    MarketPresenceInput {
        unique_recipients: rng.gen_range(0..10_000_000),
        top10_concentration_pct: rng.gen_range(0.0..100.0),
        has_transfer_data: rng.gen_bool(0.6),
        exchange_listings: rng.gen_range(0..500),
        watchlist_count: rng.gen_range(0..5_000_000),
    }
}

fn random_liquidity(rng: &mut StdRng) -> LiquidityInput {
    let high = wide(rng);
    LiquidityInput {
        total_pool_tvl_usd: wide(rng),
        pool_count: rng.gen_range(0..200),
        price_confidence: rng.gen_range(-0.5..1.5),
        volume_24h_usd: wide(rng),
        market_cap_usd: wide(rng),
        exchange_listings: rng.gen_range(0..500),
        high_24h_usd: high,
        low_24h_usd: high * rng.gen_range(-0.5..1.2),
    }
}

fn random_dump(rng: &mut StdRng) -> DumpRiskInput {
    DumpRiskInput {
        top10_concentration_pct: rng.gen_range(0.0..100.0),
        has_transfer_data: rng.gen_bool(0.6),
        circulating_supply: wide(rng),
        total_supply: wide(rng),
        price_change_7d_pct: pct(rng),
        price_change_30d_pct: pct(rng),
        volume_24h_usd: wide(rng),
        market_cap_usd: wide(rng),
    }
}

fn random_scores(rng: &mut StdRng) -> AllScores {
    AllScores {
        demand: rng.gen_range(0..=100),
        market_presence: rng.gen_range(0..=100),
        liquidity: rng.gen_range(0..=100),
        bridge_risk: rng.gen_range(0..=100),
        dump_risk: rng.gen_range(0..=100),
    }
}

#[test]
fn test_every_module_is_bounded() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let routes = (0..rng.gen_range(0..12))
            .map(|i| BridgeRoute {
                name: format!("route-{}", i),
                available: rng.gen_bool(0.5),
            })
            .collect();

        let results = [
            demand::score(&random_demand(&mut rng)),
            market_presence::score(&random_presence(&mut rng)),
            liquidity::score(&random_liquidity(&mut rng)),
            bridge_risk::score(&BridgeRiskInput { routes }),
            dump_risk::score(&random_dump(&mut rng)),
        ];

        for result in results {
            assert!(result.score <= 100);
            assert!(!result.breakdown.is_empty());
        }
    }
}

#[test]
fn test_extreme_values_stay_bounded() {
    let extremes = [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, f64::MAX, -f64::MAX, 0.0];
    for &a in &extremes {
        for &b in &extremes {
            let d = demand::score(&DemandInput {
                volume_24h_usd: a,
                market_cap_usd: b,
                market_cap_rank: None,
                price_change_7d_pct: a,
                price_change_30d_pct: b,
            });
            assert!(d.score <= 100);

            let l = liquidity::score(&LiquidityInput {
                total_pool_tvl_usd: a,
                price_confidence: b,
                high_24h_usd: a,
                low_24h_usd: b,
                volume_24h_usd: a,
                market_cap_usd: b,
                ..Default::default()
            });
            assert!(l.score <= 100);

            let r = dump_risk::score(&DumpRiskInput {
                top10_concentration_pct: a,
                has_transfer_data: true,
                circulating_supply: a,
                total_supply: b,
                price_change_7d_pct: a,
                price_change_30d_pct: b,
                volume_24h_usd: a,
                market_cap_usd: b,
            });
            assert!(r.score <= 100);
        }
    }
}

#[test]
fn test_clamp_law() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let x: f64 = rng.gen_range(-1e6..1e6);
        let lo: i64 = rng.gen_range(-100..100);
        let hi = lo + rng.gen_range(0..200);
        let c = clamp(x, lo, hi);
        assert!(lo <= c && c <= hi);
        if (lo as f64) <= x.round() && x.round() <= (hi as f64) {
            assert_eq!(c, x.round() as i64);
        }
    }
}

#[test]
fn test_monotonic_drivers() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        // Demand: more volume never lowers the score
        let base = random_demand(&mut rng);
        let more_volume = DemandInput {
            volume_24h_usd: base.volume_24h_usd.max(0.0) * 2.0 + 1.0,
            ..base.clone()
        };
        assert!(demand::score(&more_volume).score >= demand::score(&base).score);

        // Market presence: more recipients and listings never lower it
        let base = random_presence(&mut rng);
        let broader = MarketPresenceInput {
            unique_recipients: base.unique_recipients * 2 + 1,
            exchange_listings: base.exchange_listings + 10,
            ..base.clone()
        };
        assert!(market_presence::score(&broader).score >= market_presence::score(&base).score);

        // Liquidity: more TVL never lowers it
        let base = LiquidityInput {
            total_pool_tvl_usd: rng.gen_range(1.0..1e10),
            ..random_liquidity(&mut rng)
        };
        let deeper = LiquidityInput {
            total_pool_tvl_usd: base.total_pool_tvl_usd * 3.0,
            ..base.clone()
        };
        assert!(liquidity::score(&deeper).score >= liquidity::score(&base).score);

        // Dump risk: more concentration never lowers it
        let base = random_dump(&mut rng);
        let base_score = dump_risk::score(&base).score;
        let concentrated = DumpRiskInput {
            top10_concentration_pct: (base.top10_concentration_pct + 20.0).min(100.0),
            ..base.clone()
        };
        assert!(dump_risk::score(&concentrated).score >= base_score);

        // Less circulating supply means more latent dilution
        let diluted = DumpRiskInput {
            circulating_supply: base.circulating_supply.max(0.0) * rng.gen_range(0.0..1.0),
            ..base.clone()
        };
        assert!(dump_risk::score(&diluted).score >= base_score);

        // Stronger upward moves add momentum pressure
        let hotter = DumpRiskInput {
            price_change_7d_pct: base.price_change_7d_pct.max(0.0) + rng.gen_range(0.0..100.0),
            price_change_30d_pct: base.price_change_30d_pct.max(0.0) + rng.gen_range(0.0..200.0),
            ..base.clone()
        };
        assert!(dump_risk::score(&hotter).score >= base_score);

        // More volume against the same market cap adds turnover pressure
        let churning = DumpRiskInput {
            volume_24h_usd: base.volume_24h_usd.max(0.0) * 2.0 + 1.0,
            ..base.clone()
        };
        assert!(dump_risk::score(&churning).score >= base_score);
    }
}

#[test]
fn test_bridge_score_monotone_in_routes() {
    let mut previous = 0;
    for n in 0..10 {
        let routes = (0..n)
            .map(|i| BridgeRoute {
                name: format!("r{}", i),
                available: true,
            })
            .collect();
        let score = bridge_risk::score(&BridgeRiskInput { routes }).score;
        assert!(score >= previous);
        previous = score;
    }
}

#[test]
fn test_slippage_laws() {
    let mut rng = rng();
    let thresholds = RiskThresholds::default();
    for _ in 0..ITERATIONS {
        let trade = rng.gen_range(1.0..1e7);
        let tvl = rng.gen_range(1.0..1e10);

        // Absent without a pool
        assert_eq!(slippage_pct(trade, 0.0), None);
        assert_eq!(slippage_pct(trade, -tvl), None);
        assert_eq!(slippage_tier(trade, 0.0, &thresholds).risk_level, RiskLevel::NotApplicable);

        // Increasing in trade size, decreasing in TVL
        let s = slippage_pct(trade, tvl).unwrap();
        assert!(slippage_pct(trade * 2.0, tvl).unwrap() > s);
        assert!(slippage_pct(trade, tvl * 2.0).unwrap() < s);
        assert_ne!(classify(Some(s), &thresholds), RiskLevel::NotApplicable);
    }
}

#[test]
fn test_minimum_tvl_round_trip() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let trade = rng.gen_range(1.0..1e7);
        let max_slippage = rng.gen_range(0.01..50.0);
        let tvl = minimum_tvl_for(trade, max_slippage);

        let achieved = slippage_pct(trade, tvl).unwrap();
        assert!((achieved - max_slippage).abs() <= 1e-9 * max_slippage.max(1.0));
    }

    assert_eq!(minimum_tvl_for(10_000.0, 0.0), f64::INFINITY);
    assert_eq!(minimum_tvl_for(10_000.0, -1.0), f64::INFINITY);
}

#[test]
fn test_seed_bounds() {
    let mut rng = rng();
    let cpmm = CpmmConfig::default();
    for _ in 0..ITERATIONS {
        let source = wide(&mut rng);
        let seeded = seeded_tvl(source, &cpmm);
        if source > 0.0 {
            assert!(seeded >= cpmm.seed_floor_usd && seeded <= cpmm.seed_cap_usd);
        } else {
            assert_eq!(seeded, 0.0);
        }
    }
}

#[test]
fn test_simulation_shapes() {
    let mut rng = rng();
    let simulator = LiquiditySimulator::default();
    for _ in 0..200 {
        let tvl = wide(&mut rng);
        let price = wide(&mut rng);
        let sim = simulator.simulate(tvl, price, "Source");

        assert_eq!(sim.has_tvl_data, tvl > 0.0);
        assert_eq!(sim.current_chain.tiers.len(), 4);
        assert_eq!(sim.destination.tiers.len(), 4);
        assert!(sim.recommendation.min_lp_usd <= sim.recommendation.target_lp_usd);
        assert!(sim.destination.depth_1pct_usd <= sim.destination.depth_5pct_usd);
        if !sim.has_tvl_data {
            assert!(sim.current_chain.tiers.iter().all(|t| t.slippage_pct.is_none()));
        }
    }
}

#[test]
fn test_composite_ignores_dump_risk_and_is_monotone() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let scores = random_scores(&mut rng);
        let overall = composite::overall_score(&scores);
        assert!(overall <= 100);

        let other_dump = AllScores {
            dump_risk: rng.gen_range(0..=100),
            ..scores
        };
        assert_eq!(composite::overall_score(&other_dump), overall);
        assert_eq!(
            strategy::recommend(&other_dump).strategy,
            strategy::recommend(&scores).strategy
        );

        let better = AllScores {
            liquidity: scores.liquidity.saturating_add(10).min(100),
            ..scores
        };
        assert!(composite::overall_score(&better) >= overall);
    }
}

#[test]
fn test_strategy_tree_order() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let scores = random_scores(&mut rng);
        // Default weights in basis points, so cut-offs are compared exactly
        let bp = 3000 * scores.demand as u32
            + 2500 * scores.market_presence as u32
            + 3000 * scores.liquidity as u32
            + 1500 * scores.bridge_risk as u32;
        let expected = if bp >= 700_000 {
            Strategy::CanonicalLaunch
        } else if bp >= 550_000 {
            Strategy::LpBasedMigration
        } else if scores.liquidity < 40 {
            Strategy::LiquidityBootstrapping
        } else {
            Strategy::WrappedToken
        };
        let result = strategy::recommend(&scores);
        assert_eq!(result.strategy, expected);
        assert!(!result.rationale.is_empty());
    }
}
