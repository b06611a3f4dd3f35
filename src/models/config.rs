//! Configuration module for the readiness engine
//!
//! Every policy constant the scorers and the simulator use lives here,
//! so breakdowns can point at a named value instead of a literal.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::ModuleKind;
use crate::utils::constants::{
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_RATE_LIMIT_PER_MINUTE, ENV_CONFIG_PATH, ENV_HOST,
    ENV_PORT, ENV_PORT_FALLBACK, ENV_RATE_LIMIT,
};

/// Tolerance used when checking that composite weights sum to 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Composite weighting scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeWeights {
    pub demand: f64,
    pub market_presence: f64,
    pub liquidity: f64,
    pub bridge_risk: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            demand: 0.30,
            market_presence: 0.25,
            liquidity: 0.30,
            bridge_risk: 0.15,
        }
    }
}

impl CompositeWeights {
    /// Weight applied to a module; modules outside the composite get 0
    pub fn weight_for(&self, module: ModuleKind) -> f64 {
        match module {
            ModuleKind::Demand => self.demand,
            ModuleKind::MarketPresence => self.market_presence,
            ModuleKind::Liquidity => self.liquidity,
            ModuleKind::BridgeRisk => self.bridge_risk,
            ModuleKind::DumpRisk => 0.0,
        }
    }

    pub fn sum(&self) -> f64 {
        self.demand + self.market_presence + self.liquidity + self.bridge_risk
    }
}

/// Fixed reference trade sizes (USD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeSizeTiers {
    /// Tiers for pool projections (current and destination chain)
    pub projection_usd: Vec<f64>,
    /// Tiers reported alongside the liquidity score
    pub liquidity_usd: Vec<f64>,
}

impl Default for TradeSizeTiers {
    fn default() -> Self {
        Self {
            projection_usd: vec![1_000.0, 10_000.0, 100_000.0, 1_000_000.0],
            liquidity_usd: vec![1_000.0, 10_000.0, 100_000.0, 500_000.0, 1_000_000.0],
        }
    }
}

/// Slippage classification thresholds (percent, upper bounds exclusive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub low_below_pct: f64,
    pub moderate_below_pct: f64,
    pub high_below_pct: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_below_pct: 0.1,
            moderate_below_pct: 1.0,
            high_below_pct: 5.0,
        }
    }
}

/// Constant-product simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpmmConfig {
    /// Price moves for the depth figures (fraction of the quote reserve)
    pub depth_1pct_fraction: f64,
    pub depth_5pct_fraction: f64,
    /// Share of source TVL assumed to be seeded on the destination
    pub seed_fraction: f64,
    pub seed_floor_usd: f64,
    pub seed_cap_usd: f64,
    /// LP seeding scenarios: trade size kept under `lp_max_slippage_pct`
    pub min_lp_trade_usd: f64,
    pub target_lp_trade_usd: f64,
    pub lp_max_slippage_pct: f64,
}

impl Default for CpmmConfig {
    fn default() -> Self {
        Self {
            depth_1pct_fraction: 0.01,
            depth_5pct_fraction: 0.05,
            seed_fraction: 0.10,
            seed_floor_usd: 10_000.0,
            seed_cap_usd: 50_000_000.0,
            min_lp_trade_usd: 10_000.0,
            target_lp_trade_usd: 100_000.0,
            lp_max_slippage_pct: 1.0,
        }
    }
}

/// Dump risk coefficients. Tunable policy; only the direction of each
/// term is fixed (every term is non-decreasing in its driver).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpRiskWeights {
    /// Points per percent of top-10 concentration
    pub concentration_per_pct: f64,
    pub concentration_cap: f64,
    /// Used when transfer history is missing
    pub concentration_neutral: f64,
    /// Points per percent of supply not yet circulating
    pub dilution_per_pct: f64,
    pub dilution_cap: f64,
    /// Used when total supply is unknown
    pub dilution_neutral: f64,
    /// Points per percent of daily turnover
    pub turnover_per_pct: f64,
    pub turnover_cap: f64,
    /// Points per percent of positive 7d / 30d price change
    pub momentum_7d_per_pct: f64,
    pub momentum_30d_per_pct: f64,
    pub momentum_cap: f64,
}

impl Default for DumpRiskWeights {
    fn default() -> Self {
        Self {
            concentration_per_pct: 0.4,
            concentration_cap: 40.0,
            concentration_neutral: 20.0,
            dilution_per_pct: 0.3,
            dilution_cap: 30.0,
            dilution_neutral: 10.0,
            turnover_per_pct: 1.5,
            turnover_cap: 15.0,
            momentum_7d_per_pct: 0.2,
            momentum_30d_per_pct: 0.1,
            momentum_cap: 15.0,
        }
    }
}

/// Decision-tree cut-offs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyThresholds {
    pub canonical_min: f64,
    pub lp_migration_min: f64,
    /// Liquidity score below which a bootstrapping event is advised
    pub bootstrap_liquidity_below: u8,
}

impl Default for StrategyThresholds {
    fn default() -> Self {
        Self {
            canonical_min: 70.0,
            lp_migration_min: 55.0,
            bootstrap_liquidity_below: 40,
        }
    }
}

/// All engine policy in one table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: CompositeWeights,
    pub trade_sizes: TradeSizeTiers,
    pub risk_thresholds: RiskThresholds,
    pub cpmm: CpmmConfig,
    pub dump_risk: DumpRiskWeights,
    pub strategy: StrategyThresholds,
}

impl EngineConfig {
    /// Load defaults, overridden by the JSON file named in `READINESS_CONFIG`
    pub fn from_env() -> AppResult<Self> {
        match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    /// Load and validate a JSON override file
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::with_source(
                ErrorCode::ConfigInvalidValue,
                format!("Cannot read engine config {}", path.display()),
                e,
            )
        })?;
        let config = Self::from_json(&raw)?;
        info!("⚙️ Engine config loaded from {}", path.display());
        Ok(config)
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        let config: EngineConfig = serde_json::from_str(raw).map_err(|e| {
            AppError::with_source(ErrorCode::ConfigInvalidValue, "Invalid engine config JSON", e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tables that break the stated policy
    pub fn validate(&self) -> AppResult<()> {
        let w = &self.weights;
        let all_weights = [w.demand, w.market_presence, w.liquidity, w.bridge_risk];
        if all_weights.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(AppError::invalid_config("composite weights must be non-negative"));
        }
        if (w.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(AppError::invalid_config(format!(
                "composite weights must sum to 1.0 (got {})",
                w.sum()
            )));
        }

        let t = &self.risk_thresholds;
        if !(0.0 < t.low_below_pct
            && t.low_below_pct < t.moderate_below_pct
            && t.moderate_below_pct < t.high_below_pct)
        {
            return Err(AppError::invalid_config(
                "risk thresholds must be positive and strictly increasing",
            ));
        }

        let sizes = self
            .trade_sizes
            .projection_usd
            .iter()
            .chain(self.trade_sizes.liquidity_usd.iter());
        for size in sizes {
            if !size.is_finite() || *size <= 0.0 {
                return Err(AppError::invalid_config("trade sizes must be positive"));
            }
        }

        let c = &self.cpmm;
        if !(c.seed_fraction > 0.0 && c.seed_fraction <= 1.0) {
            return Err(AppError::invalid_config("seed_fraction must be in (0, 1]"));
        }
        if !(c.seed_floor_usd >= 0.0 && c.seed_floor_usd <= c.seed_cap_usd) {
            return Err(AppError::invalid_config("seed floor must not exceed seed cap"));
        }
        if c.lp_max_slippage_pct <= 0.0 {
            return Err(AppError::invalid_config("lp_max_slippage_pct must be positive"));
        }
        if c.min_lp_trade_usd > c.target_lp_trade_usd {
            return Err(AppError::invalid_config(
                "min_lp_trade_usd must not exceed target_lp_trade_usd",
            ));
        }

        let d = &self.dump_risk;
        let dump_terms = [
            d.concentration_per_pct,
            d.concentration_cap,
            d.concentration_neutral,
            d.dilution_per_pct,
            d.dilution_cap,
            d.dilution_neutral,
            d.turnover_per_pct,
            d.turnover_cap,
            d.momentum_7d_per_pct,
            d.momentum_30d_per_pct,
            d.momentum_cap,
        ];
        if dump_terms.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(AppError::invalid_config("dump risk coefficients must be non-negative"));
        }

        let s = &self.strategy;
        if s.canonical_min < s.lp_migration_min {
            return Err(AppError::invalid_config(
                "canonical_min must be at least lp_migration_min",
            ));
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests per minute per API key / client address
    pub rate_limit_per_minute: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            rate_limit_per_minute: DEFAULT_RATE_LIMIT_PER_MINUTE,
        }
    }
}

impl ServerConfig {
    /// `PORT` wins over `READINESS_PORT` (hosted platforms inject `PORT`)
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let host = std::env::var(ENV_HOST).unwrap_or(defaults.host);

        let port = match std::env::var(ENV_PORT).or_else(|_| std::env::var(ENV_PORT_FALLBACK)) {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::new(
                    ErrorCode::ConfigInvalidValue,
                    format!("Invalid port: {}", raw),
                )
            })?,
            Err(_) => defaults.port,
        };

        let rate_limit_per_minute = match std::env::var(ENV_RATE_LIMIT) {
            Ok(raw) => raw.trim().parse::<u32>().map_err(|_| {
                AppError::new(
                    ErrorCode::ConfigInvalidValue,
                    format!("Invalid {}: {}", ENV_RATE_LIMIT, raw),
                )
            })?,
            Err(_) => defaults.rate_limit_per_minute,
        };

        Ok(Self {
            host,
            port,
            rate_limit_per_minute,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
