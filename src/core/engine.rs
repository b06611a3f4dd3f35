//! Readiness engine
//! Runs every scorer over one resolved token snapshot and assembles the report

use std::time::Instant;

use tracing::debug;

use crate::core::composite::{overall_score_with, weighted_average};
use crate::core::cpmm::LiquiditySimulator;
use crate::core::strategy::recommend_with;
use crate::core::{bridge_risk, demand, dump_risk, liquidity, market_presence};
use crate::models::config::EngineConfig;
use crate::models::types::{AllScores, MigrationInput, MigrationReport};

/// Placeholder label when the caller did not name the source chain
pub const UNKNOWN_CHAIN_LABEL: &str = "Source chain";

/// Pure, synchronous evaluator. Holds only the policy table, so one
/// instance can be shared across request handlers.
#[derive(Debug, Clone, Default)]
pub struct ReadinessEngine {
    config: EngineConfig,
    simulator: LiquiditySimulator,
}

impl ReadinessEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            simulator: LiquiditySimulator::new(config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn simulator(&self) -> &LiquiditySimulator {
        &self.simulator
    }

    /// Score all modules, aggregate, pick a strategy and simulate liquidity
    pub fn evaluate(&self, input: &MigrationInput) -> MigrationReport {
        let start = Instant::now();
        let chain_label = if input.source_chain.trim().is_empty() {
            UNKNOWN_CHAIN_LABEL.to_string()
        } else {
            input.source_chain.clone()
        };

        let demand = demand::score(&input.demand_input());
        let market_presence = market_presence::score(&input.market_presence_input());
        let assessment = liquidity::assess(&input.liquidity_input(), &self.config);
        let bridge_risk = bridge_risk::score(&input.bridge_risk_input());
        let dump_risk = dump_risk::score_with(&input.dump_risk_input(), &self.config.dump_risk);

        let scores = AllScores {
            demand: demand.score,
            market_presence: market_presence.score,
            liquidity: assessment.result.score,
            bridge_risk: bridge_risk.score,
            dump_risk: dump_risk.score,
        };

        let overall = overall_score_with(&scores, &self.config.weights);
        let strategy = recommend_with(&scores, &self.config.weights, &self.config.strategy);
        let liquidity_sim = self.simulator.simulate(
            input.pools.total_tvl_usd,
            input.market.price_usd,
            &chain_label,
        );

        let data_notes = collect_data_notes(input);
        for note in &data_notes {
            debug!(token = %input.token, "Degraded input: {}", note);
        }

        debug!(
            token = %input.token,
            chain = %chain_label,
            demand = scores.demand,
            market_presence = scores.market_presence,
            liquidity = scores.liquidity,
            bridge_risk = scores.bridge_risk,
            dump_risk = scores.dump_risk,
            overall,
            weighted = weighted_average(&scores, &self.config.weights),
            strategy = strategy.strategy.as_str(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Readiness evaluated"
        );

        MigrationReport {
            token: input.token.clone(),
            source_chain: chain_label,
            scores,
            demand,
            market_presence,
            liquidity: assessment.result,
            bridge_risk,
            dump_risk,
            current_slippage: assessment.slippage_tiers,
            overall,
            strategy,
            liquidity_sim,
            data_notes,
        }
    }
}

/// Every place where a neutral default stood in for missing data
fn collect_data_notes(input: &MigrationInput) -> Vec<String> {
    let mut notes = Vec::new();

    if input.pools.total_tvl_usd <= 0.0 {
        notes.push(
            "No pool TVL data: liquidity depth uses the turnover proxy and slippage is not applicable"
                .to_string(),
        );
    }
    if !input.transfers.available {
        notes.push(
            "No transfer history: holder distribution and whale pressure use neutral scores"
                .to_string(),
        );
    }
    if input.market.market_cap_rank.is_none() {
        notes.push("Unknown market cap rank: rank score is neutral".to_string());
    }
    if !input.bridges.iter().any(|route| route.available) {
        notes.push("No viable bridge route found: bridge score is at its base".to_string());
    }
    if input.market.total_supply <= 0.0 {
        notes.push("Unknown total supply: dilution pressure is neutral".to_string());
    }
    if input.market.high_24h_usd <= 0.0 {
        notes.push("Unknown 24h range: spread score is neutral".to_string());
    }

    notes
}
