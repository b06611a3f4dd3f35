//! Integration tests for the readiness engine

use migration_readiness::core::cpmm::DESTINATION_LABEL;
use migration_readiness::models::types::{
    BridgeRoute, MarketMetrics, PoolMetrics, RiskLevel, TransferMetrics,
};
use migration_readiness::{
    AllScores, EngineConfig, MigrationInput, MigrationReport, ReadinessEngine, Strategy,
};

fn established_token() -> MigrationInput {
    MigrationInput {
        token: "ACME".to_string(),
        source_chain: "Ethereum".to_string(),
        market: MarketMetrics {
            price_usd: 2.0,
            volume_24h_usd: 40_000_000.0,
            market_cap_usd: 400_000_000.0,
            market_cap_rank: Some(20),
            price_change_7d_pct: 12.0,
            price_change_30d_pct: 20.0,
            high_24h_usd: 2.04,
            low_24h_usd: 1.98,
            circulating_supply: 200_000_000.0,
            total_supply: 250_000_000.0,
            exchange_listings: 80,
            watchlist_count: 150_000,
            price_confidence: 0.95,
        },
        transfers: TransferMetrics {
            available: true,
            unique_recipients: 5_000,
            top10_concentration_pct: 20.0,
        },
        pools: PoolMetrics {
            total_tvl_usd: 30_000_000.0,
            pool_count: 12,
        },
        bridges: vec![
            BridgeRoute { name: "wormhole".to_string(), available: true },
            BridgeRoute { name: "layerzero".to_string(), available: true },
            BridgeRoute { name: "axelar".to_string(), available: false },
        ],
    }
}

fn evaluate(input: &MigrationInput) -> MigrationReport {
    ReadinessEngine::default().evaluate(input)
}

#[test]
fn test_established_token_scores() {
    let report = evaluate(&established_token());

    assert_eq!(
        report.scores,
        AllScores {
            demand: 91,
            market_presence: 84,
            liquidity: 92,
            bridge_risk: 70,
            dump_risk: 33,
        }
    );
    // 0.30*91 + 0.25*84 + 0.30*92 + 0.15*70 = 86.4
    assert_eq!(report.overall, 86);
    assert_eq!(report.strategy.strategy, Strategy::CanonicalLaunch);
    assert!(report.data_notes.is_empty());
}

#[test]
fn test_breakdowns_are_itemized() {
    let report = evaluate(&established_token());

    assert_eq!(report.demand.sub_score("turnover_score"), Some(40));
    assert_eq!(report.demand.sub_score("rank_score"), Some(24));
    assert_eq!(report.demand.sub_score("momentum_score"), Some(27));

    assert_eq!(report.market_presence.sub_score("recipient_score"), Some(40));
    assert_eq!(report.market_presence.sub_score("concentration_score"), Some(24));

    assert_eq!(report.liquidity.sub_score("tvl_score"), Some(50));
    assert_eq!(report.liquidity.sub_score("spread_score"), Some(11));

    assert_eq!(report.bridge_risk.sub_score("supported_bridges"), Some(2));
    assert!(report.dump_risk.get("higher_is_riskier").is_some());
}

#[test]
fn test_current_chain_slippage() {
    let report = evaluate(&established_token());
    let levels: Vec<RiskLevel> = report.current_slippage.iter().map(|t| t.risk_level).collect();
    assert_eq!(
        levels,
        vec![
            RiskLevel::Low,
            RiskLevel::Low,
            RiskLevel::Moderate,
            RiskLevel::Moderate,
            RiskLevel::High,
        ]
    );
}

#[test]
fn test_liquidity_simulation_in_report() {
    let sim = evaluate(&established_token()).liquidity_sim;

    assert!(sim.has_tvl_data);
    assert_eq!(sim.current_chain.label, "Ethereum");
    assert_eq!(sim.destination.label, DESTINATION_LABEL);
    assert_eq!(sim.seeded_tvl_usd, 3_000_000.0);
    assert_eq!(sim.seeded_token_reserve, Some(750_000.0));
    assert_eq!(sim.destination.depth_1pct_usd, 15_000.0);
    assert_eq!(sim.destination.depth_5pct_usd, 75_000.0);

    let destination: Vec<RiskLevel> = sim.destination.tiers.iter().map(|t| t.risk_level).collect();
    assert_eq!(
        destination,
        vec![
            RiskLevel::Low,
            RiskLevel::Moderate,
            RiskLevel::High,
            RiskLevel::VeryHigh,
        ]
    );

    assert_eq!(sim.recommendation.min_lp_usd, 500_000.0);
    assert_eq!(sim.recommendation.target_lp_usd, 5_000_000.0);
}

#[test]
fn test_new_token_without_data() {
    let input = MigrationInput {
        token: "NEWT".to_string(),
        source_chain: "Solana".to_string(),
        market: MarketMetrics {
            price_usd: 0.01,
            volume_24h_usd: 50_000.0,
            market_cap_usd: 2_000_000.0,
            ..Default::default()
        },
        ..Default::default()
    };

    let report = evaluate(&input);

    assert!(!report.liquidity_sim.has_tvl_data);
    assert_eq!(report.liquidity_sim.seeded_tvl_usd, 0.0);
    assert_eq!(report.liquidity_sim.seeded_token_reserve, None);
    assert!(report
        .current_slippage
        .iter()
        .all(|t| t.slippage_pct.is_none() && t.risk_level == RiskLevel::NotApplicable));
    assert_eq!(report.strategy.strategy, Strategy::LiquidityBootstrapping);
    assert!(report.data_notes.iter().any(|n| n.contains("transfer history")));
    assert!(report.data_notes.iter().any(|n| n.contains("TVL")));
}

#[test]
fn test_custom_config_changes_strategy_cutoffs() {
    let config = EngineConfig::from_json(r#"{"strategy": {"canonical_min": 90.0}}"#).unwrap();
    let report = ReadinessEngine::new(config).evaluate(&established_token());

    assert_eq!(report.overall, 86);
    assert_eq!(report.strategy.strategy, Strategy::LpBasedMigration);
}

#[test]
fn test_report_serializes_to_json() {
    let report = evaluate(&established_token());
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["overall"], 86);
    assert_eq!(json["strategy"]["strategy"], "CanonicalLaunch");
    assert_eq!(json["scores"]["dump_risk"], 33);
    assert!(json["demand"]["breakdown"].as_array().unwrap().len() >= 3);

    let parsed: MigrationReport = serde_json::from_value(json).unwrap();
    assert_eq!(parsed.scores, report.scores);
}

#[test]
fn test_input_parses_from_partial_json() {
    let input: MigrationInput = serde_json::from_str(
        r#"{
            "token": "ACME",
            "market": {"market_cap_usd": 1000000, "volume_24h_usd": 50000},
            "pools": {"total_tvl_usd": 250000}
        }"#,
    )
    .unwrap();

    assert!(input.validate().is_ok());
    assert_eq!(input.market.market_cap_rank, None);
    assert!(!input.transfers.available);

    let report = evaluate(&input);
    assert_eq!(report.liquidity_sim.seeded_tvl_usd, 25_000.0);
}

#[test]
fn test_negative_input_rejected_by_validate() {
    let mut input = established_token();
    input.pools.total_tvl_usd = -1.0;
    let err = input.validate().unwrap_err();
    assert!(err.contains("pools.total_tvl_usd"));

    // The engine itself still clamps
    let report = evaluate(&input);
    assert!(!report.liquidity_sim.has_tvl_data);
}
