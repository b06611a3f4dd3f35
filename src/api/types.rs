//! API Request/Response Types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::errors::AppError;
use crate::models::types::{MigrationInput, MigrationReport, StrategyResult};

/// API Response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API Error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub retryable: bool,
}

impl From<&AppError> for ApiError {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code_str().to_string(),
            message: err.message.clone(),
            details: std::error::Error::source(err).map(|s| s.to_string()),
            retryable: err.code.is_retryable(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

// ============================================
// Batch Readiness
// ============================================

#[derive(Debug, Deserialize)]
pub struct BatchReadinessRequest {
    pub tokens: Vec<MigrationInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchReadinessData {
    pub total_requested: usize,
    pub total_processed: usize,
    /// Reports per strategy (`canonical_launch`, ...)
    pub strategy_counts: HashMap<String, usize>,
    pub results: Vec<BatchTokenResult>,
    pub processing_time_ms: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchTokenResult {
    pub token: String,
    pub status: String, // "success" | "error"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<MigrationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

// ============================================
// Liquidity
// ============================================

#[derive(Debug, Deserialize)]
pub struct SimulateLiquidityRequest {
    pub source_tvl_usd: f64,
    #[serde(default)]
    pub price_usd: f64,
    #[serde(default = "default_source_chain")]
    pub source_chain: String,
}

fn default_source_chain() -> String {
    crate::core::engine::UNKNOWN_CHAIN_LABEL.to_string()
}

#[derive(Debug, Deserialize)]
pub struct MinimumTvlRequest {
    pub target_trade_usd: f64,
    pub max_slippage_pct: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MinimumTvlData {
    pub target_trade_usd: f64,
    pub max_slippage_pct: f64,
    /// `None` when no finite pool satisfies the bound
    pub minimum_tvl_usd: Option<f64>,
}

// ============================================
// Strategy
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct StrategyData {
    pub overall: u8,
    pub weighted_average: f64,
    pub title: String,
    pub strategy: StrategyResult,
}

// ============================================
// Stats / Health
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsData {
    pub total_evaluations: u64,
    pub total_simulations: u64,
    pub total_rejected: u64,
    pub strategies: HashMap<String, u64>,
    pub avg_overall: f64,
    pub avg_latency_ms: f64,
    pub uptime_seconds: u64,
    pub api_version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
