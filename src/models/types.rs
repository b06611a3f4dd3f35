//! Type definitions for the readiness engine
//! All value records flowing in and out of scoring and simulation

use serde::{Deserialize, Serialize};

// ============================================
// Score breakdown
// ============================================

/// Displayable value inside a score breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BreakdownValue {
    Int(i64),
    Number(f64),
    Flag(bool),
    Text(String),
    /// Metric not available upstream
    Absent,
}

impl BreakdownValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            BreakdownValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            BreakdownValue::Int(v) => Some(*v as f64),
            BreakdownValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<i64> for BreakdownValue {
    fn from(v: i64) -> Self {
        BreakdownValue::Int(v)
    }
}

impl From<u32> for BreakdownValue {
    fn from(v: u32) -> Self {
        BreakdownValue::Int(v as i64)
    }
}

impl From<u64> for BreakdownValue {
    fn from(v: u64) -> Self {
        BreakdownValue::Int(v.min(i64::MAX as u64) as i64)
    }
}

impl From<usize> for BreakdownValue {
    fn from(v: usize) -> Self {
        BreakdownValue::Int(v as i64)
    }
}

impl From<f64> for BreakdownValue {
    fn from(v: f64) -> Self {
        BreakdownValue::Number(v)
    }
}

impl From<bool> for BreakdownValue {
    fn from(v: bool) -> Self {
        BreakdownValue::Flag(v)
    }
}

impl From<&str> for BreakdownValue {
    fn from(v: &str) -> Self {
        BreakdownValue::Text(v.to_string())
    }
}

impl From<String> for BreakdownValue {
    fn from(v: String) -> Self {
        BreakdownValue::Text(v)
    }
}

impl<T: Into<BreakdownValue>> From<Option<T>> for BreakdownValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(BreakdownValue::Absent)
    }
}

/// One labelled row of a breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownItem {
    /// Stable machine key
    pub key: String,
    /// Human label used for display
    pub label: String,
    pub value: BreakdownValue,
}

/// Output of one scoring module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Module score (0-100)
    pub score: u8,
    /// Ordered breakdown of sub-scores and the raw values behind them
    pub breakdown: Vec<BreakdownItem>,
}

impl ScoreResult {
    /// Look up a breakdown row by key
    pub fn get(&self, key: &str) -> Option<&BreakdownValue> {
        self.breakdown
            .iter()
            .find(|item| item.key == key)
            .map(|item| &item.value)
    }

    /// Integer sub-score stored under `key`
    pub fn sub_score(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(BreakdownValue::as_i64)
    }
}

/// Builder for score breakdowns, keeps insertion order
#[derive(Debug, Default)]
pub struct BreakdownBuilder {
    items: Vec<BreakdownItem>,
}

impl BreakdownBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row
    pub fn item(mut self, key: &str, label: &str, value: impl Into<BreakdownValue>) -> Self {
        self.items.push(BreakdownItem {
            key: key.to_string(),
            label: label.to_string(),
            value: value.into(),
        });
        self
    }

    /// Finish with an already clamped total
    pub fn build(self, score: i64) -> ScoreResult {
        ScoreResult {
            score: score.clamp(0, 100) as u8,
            breakdown: self.items,
        }
    }
}

// ============================================
// Module inputs
// ============================================

/// Inputs for the demand module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemandInput {
    pub volume_24h_usd: f64,
    pub market_cap_usd: f64,
    pub market_cap_rank: Option<u32>,
    pub price_change_7d_pct: f64,
    pub price_change_30d_pct: f64,
}

/// Inputs for the market presence module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketPresenceInput {
    /// Unique recipients across recent transfers
    pub unique_recipients: u64,
    /// Share of recent transfer volume received by the top 10 recipients (%)
    pub top10_concentration_pct: f64,
    pub has_transfer_data: bool,
    pub exchange_listings: u32,
    /// Secondary interest signal (watchlist users), display only
    pub watchlist_count: u64,
}

/// Inputs for the liquidity module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiquidityInput {
    /// Pool TVL aggregated across venues
    pub total_pool_tvl_usd: f64,
    pub pool_count: u32,
    /// Price confidence (0-1)
    pub price_confidence: f64,
    pub volume_24h_usd: f64,
    pub market_cap_usd: f64,
    pub exchange_listings: u32,
    pub high_24h_usd: f64,
    pub low_24h_usd: f64,
}

/// One known cross-chain route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeRoute {
    pub name: String,
    /// Route currently viable for the source chain
    pub available: bool,
}

/// Inputs for the bridge risk module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeRiskInput {
    pub routes: Vec<BridgeRoute>,
}

impl BridgeRiskInput {
    pub fn supported_count(&self) -> usize {
        self.routes.iter().filter(|r| r.available).count()
    }
}

/// Inputs for the dump risk module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpRiskInput {
    pub top10_concentration_pct: f64,
    pub has_transfer_data: bool,
    pub circulating_supply: f64,
    /// Total supply, `<= 0` when unknown
    pub total_supply: f64,
    pub price_change_7d_pct: f64,
    pub price_change_30d_pct: f64,
    pub volume_24h_usd: f64,
    pub market_cap_usd: f64,
}

// ============================================
// CPMM simulation
// ============================================

/// Slippage risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    /// No pool to trade against
    NotApplicable,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
            RiskLevel::VeryHigh => "VERY_HIGH",
            RiskLevel::NotApplicable => "N/A",
        }
    }
}

/// Projected price impact at one trade size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlippageTier {
    pub trade_size_usd: f64,
    pub label: String,
    /// Absent iff the pool TVL is not positive
    pub slippage_pct: Option<f64>,
    pub risk_level: RiskLevel,
}

/// Liquidity profile of one pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainLiquidityProjection {
    pub label: String,
    pub tvl_usd: f64,
    pub tiers: Vec<SlippageTier>,
    /// Trade size that moves the price by 1%
    pub depth_1pct_usd: f64,
    /// Trade size that moves the price by 5%
    pub depth_5pct_usd: f64,
}

/// Minimum / target LP seeding advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpRecommendation {
    pub min_lp_usd: f64,
    pub target_lp_usd: f64,
    pub rationale: String,
}

/// Before/after liquidity simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquiditySimResult {
    pub current_chain: ChainLiquidityProjection,
    pub destination: ChainLiquidityProjection,
    pub seeded_tvl_usd: f64,
    /// Token-side reserve of the seeded pool, absent without a usable price
    pub seeded_token_reserve: Option<f64>,
    pub recommendation: LpRecommendation,
    pub has_tvl_data: bool,
    pub note: String,
}

// ============================================
// Aggregation & strategy
// ============================================

/// Scoring modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    Demand,
    MarketPresence,
    Liquidity,
    BridgeRisk,
    DumpRisk,
}

impl ModuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Demand => "demand",
            ModuleKind::MarketPresence => "market_presence",
            ModuleKind::Liquidity => "liquidity",
            ModuleKind::BridgeRisk => "bridge_risk",
            ModuleKind::DumpRisk => "dump_risk",
        }
    }
}

/// One token's five module scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllScores {
    pub demand: u8,
    pub market_presence: u8,
    pub liquidity: u8,
    pub bridge_risk: u8,
    /// Higher is riskier
    pub dump_risk: u8,
}

impl AllScores {
    pub fn get(&self, module: ModuleKind) -> u8 {
        match module {
            ModuleKind::Demand => self.demand,
            ModuleKind::MarketPresence => self.market_presence,
            ModuleKind::Liquidity => self.liquidity,
            ModuleKind::BridgeRisk => self.bridge_risk,
            ModuleKind::DumpRisk => self.dump_risk,
        }
    }
}

/// Migration strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    CanonicalLaunch,
    LpBasedMigration,
    LiquidityBootstrapping,
    WrappedToken,
}

impl Strategy {
    pub fn title(&self) -> &'static str {
        match self {
            Strategy::CanonicalLaunch => "Canonical Token Launch",
            Strategy::LpBasedMigration => "LP-Based Migration",
            Strategy::LiquidityBootstrapping => "Liquidity Bootstrapping Event",
            Strategy::WrappedToken => "Wrapped Token",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::CanonicalLaunch => "canonical_launch",
            Strategy::LpBasedMigration => "lp_based_migration",
            Strategy::LiquidityBootstrapping => "liquidity_bootstrapping",
            Strategy::WrappedToken => "wrapped_token",
        }
    }
}

/// Recommended approach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    pub strategy: Strategy,
    pub rationale: String,
}

// ============================================
// Aggregate input / report
// ============================================

/// Market data already resolved by the data layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketMetrics {
    pub price_usd: f64,
    pub volume_24h_usd: f64,
    pub market_cap_usd: f64,
    pub market_cap_rank: Option<u32>,
    pub price_change_7d_pct: f64,
    pub price_change_30d_pct: f64,
    pub high_24h_usd: f64,
    pub low_24h_usd: f64,
    pub circulating_supply: f64,
    pub total_supply: f64,
    pub exchange_listings: u32,
    pub watchlist_count: u64,
    /// 0-1
    pub price_confidence: f64,
}

/// Recent transfer history summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferMetrics {
    pub available: bool,
    pub unique_recipients: u64,
    pub top10_concentration_pct: f64,
}

/// Pool data across venues
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolMetrics {
    pub total_tvl_usd: f64,
    pub pool_count: u32,
}

/// Everything the engine needs for one token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationInput {
    pub token: String,
    pub source_chain: String,
    pub market: MarketMetrics,
    pub transfers: TransferMetrics,
    pub pools: PoolMetrics,
    pub bridges: Vec<BridgeRoute>,
}

impl MigrationInput {
    pub fn demand_input(&self) -> DemandInput {
        DemandInput {
            volume_24h_usd: self.market.volume_24h_usd,
            market_cap_usd: self.market.market_cap_usd,
            market_cap_rank: self.market.market_cap_rank,
            price_change_7d_pct: self.market.price_change_7d_pct,
            price_change_30d_pct: self.market.price_change_30d_pct,
        }
    }

    pub fn market_presence_input(&self) -> MarketPresenceInput {
        MarketPresenceInput {
            unique_recipients: self.transfers.unique_recipients,
            top10_concentration_pct: self.transfers.top10_concentration_pct,
            has_transfer_data: self.transfers.available,
            exchange_listings: self.market.exchange_listings,
            watchlist_count: self.market.watchlist_count,
        }
    }

    pub fn liquidity_input(&self) -> LiquidityInput {
        LiquidityInput {
            total_pool_tvl_usd: self.pools.total_tvl_usd,
            pool_count: self.pools.pool_count,
            price_confidence: self.market.price_confidence,
            volume_24h_usd: self.market.volume_24h_usd,
            market_cap_usd: self.market.market_cap_usd,
            exchange_listings: self.market.exchange_listings,
            high_24h_usd: self.market.high_24h_usd,
            low_24h_usd: self.market.low_24h_usd,
        }
    }

    pub fn bridge_risk_input(&self) -> BridgeRiskInput {
        BridgeRiskInput {
            routes: self.bridges.clone(),
        }
    }

    pub fn dump_risk_input(&self) -> DumpRiskInput {
        DumpRiskInput {
            top10_concentration_pct: self.transfers.top10_concentration_pct,
            has_transfer_data: self.transfers.available,
            circulating_supply: self.market.circulating_supply,
            total_supply: self.market.total_supply,
            price_change_7d_pct: self.market.price_change_7d_pct,
            price_change_30d_pct: self.market.price_change_30d_pct,
            volume_24h_usd: self.market.volume_24h_usd,
            market_cap_usd: self.market.market_cap_usd,
        }
    }

    /// Reject values no upstream collaborator should ever produce.
    /// The engine itself accepts anything and clamps.
    pub fn validate(&self) -> Result<(), String> {
        let non_negative = [
            ("market.price_usd", self.market.price_usd),
            ("market.volume_24h_usd", self.market.volume_24h_usd),
            ("market.market_cap_usd", self.market.market_cap_usd),
            ("market.high_24h_usd", self.market.high_24h_usd),
            ("market.low_24h_usd", self.market.low_24h_usd),
            ("market.circulating_supply", self.market.circulating_supply),
            ("market.total_supply", self.market.total_supply),
            ("market.price_confidence", self.market.price_confidence),
            ("transfers.top10_concentration_pct", self.transfers.top10_concentration_pct),
            ("pools.total_tvl_usd", self.pools.total_tvl_usd),
        ];

        for (field, value) in non_negative {
            if !value.is_finite() {
                return Err(format!("{} must be a finite number", field));
            }
            if value < 0.0 {
                return Err(format!("{} must not be negative (got {})", field, value));
            }
        }

        for (field, value) in [
            ("market.price_change_7d_pct", self.market.price_change_7d_pct),
            ("market.price_change_30d_pct", self.market.price_change_30d_pct),
        ] {
            if !value.is_finite() {
                return Err(format!("{} must be a finite number", field));
            }
        }

        Ok(())
    }
}

/// Full readiness report for one token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationReport {
    pub token: String,
    pub source_chain: String,
    pub scores: AllScores,
    pub demand: ScoreResult,
    pub market_presence: ScoreResult,
    pub liquidity: ScoreResult,
    pub bridge_risk: ScoreResult,
    pub dump_risk: ScoreResult,
    /// Current-chain slippage including the liquidity-variant tier
    pub current_slippage: Vec<SlippageTier>,
    /// Composite readiness (0-100)
    pub overall: u8,
    pub strategy: StrategyResult,
    pub liquidity_sim: LiquiditySimResult,
    /// Degradations to neutral defaults
    pub data_notes: Vec<String>,
}
