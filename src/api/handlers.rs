//! API Request Handlers

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{StatusCode, Uri},
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::types::*;
use crate::core::composite::{overall_score_with, weighted_average};
use crate::core::cpmm::minimum_tvl_for;
use crate::core::engine::ReadinessEngine;
use crate::core::strategy::recommend_with;
use crate::models::errors::{AppError, ErrorCode};
use crate::models::types::{AllScores, LiquiditySimResult, MigrationInput, MigrationReport};
use crate::utils::constants::{APP_VERSION, MAX_BATCH_TOKENS};
use crate::utils::telemetry::TelemetryCollector;

/// Shared application state
pub struct AppState {
    pub engine: ReadinessEngine,
    pub telemetry: Arc<TelemetryCollector>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(engine: ReadinessEngine, telemetry: Arc<TelemetryCollector>) -> Self {
        Self {
            engine,
            telemetry,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

type ApiFailure = (StatusCode, Json<ApiResponse<()>>);
type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiFailure>;

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn failure(err: AppError, start: Instant) -> ApiFailure {
    let status = StatusCode::from_u16(err.code.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ApiResponse::error(ApiError::from(&err), elapsed_ms(start))),
    )
}

fn parse_failure(rejection: JsonRejection, start: Instant) -> ApiFailure {
    failure(
        AppError::new(ErrorCode::InputParseFailed, rejection.body_text()),
        start,
    )
}

/// Non-negative, finite request field
fn require_non_negative(field: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::invalid_input(format!(
            "{} must be a non-negative number (got {})",
            field, value
        )));
    }
    Ok(())
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: APP_VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiFailure {
    failure(
        AppError::new(ErrorCode::ApiNotFound, format!("No route for {}", uri.path())),
        Instant::now(),
    )
}

// ============================================
// Readiness
// ============================================

fn evaluate_one(state: &AppState, input: &MigrationInput) -> Result<MigrationReport, AppError> {
    let start = Instant::now();

    if let Err(reason) = input.validate() {
        state.telemetry.record_rejected();
        return Err(AppError::invalid_input(reason));
    }

    let report = state.engine.evaluate(input);
    state
        .telemetry
        .record_evaluation(&report, start.elapsed().as_micros() as u64);
    Ok(report)
}

pub async fn evaluate_readiness(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MigrationInput>, JsonRejection>,
) -> ApiResult<MigrationReport> {
    let start = Instant::now();
    let Json(input) = payload.map_err(|e| parse_failure(e, start))?;

    let report = evaluate_one(&state, &input).map_err(|e| {
        warn!(token = %input.token, "Readiness input rejected: {}", e);
        failure(e, start)
    })?;

    info!(
        token = %report.token,
        overall = report.overall,
        strategy = report.strategy.strategy.as_str(),
        "Readiness evaluated"
    );

    Ok(Json(ApiResponse::success(report, elapsed_ms(start))))
}

pub async fn batch_readiness(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BatchReadinessRequest>, JsonRejection>,
) -> ApiResult<BatchReadinessData> {
    let start = Instant::now();
    let Json(req) = payload.map_err(|e| parse_failure(e, start))?;

    if req.tokens.is_empty() {
        return Err(failure(
            AppError::bad_request("At least one token is required"),
            start,
        ));
    }

    if req.tokens.len() > MAX_BATCH_TOKENS {
        return Err(failure(
            AppError::bad_request(format!(
                "Maximum {} tokens per batch request",
                MAX_BATCH_TOKENS
            )),
            start,
        ));
    }

    let mut strategy_counts: HashMap<String, usize> = HashMap::new();
    let results: Vec<BatchTokenResult> = req
        .tokens
        .iter()
        .map(|input| match evaluate_one(&state, input) {
            Ok(report) => {
                *strategy_counts
                    .entry(report.strategy.strategy.as_str().to_string())
                    .or_insert(0) += 1;
                BatchTokenResult {
                    token: input.token.clone(),
                    status: "success".to_string(),
                    report: Some(report),
                    error: None,
                }
            }
            Err(e) => BatchTokenResult {
                token: input.token.clone(),
                status: "error".to_string(),
                report: None,
                error: Some(ApiError::from(e)),
            },
        })
        .collect();

    let total_processed = results.iter().filter(|r| r.report.is_some()).count();
    info!(
        requested = req.tokens.len(),
        processed = total_processed,
        "Batch readiness evaluated"
    );

    let data = BatchReadinessData {
        total_requested: req.tokens.len(),
        total_processed,
        strategy_counts,
        results,
        processing_time_ms: elapsed_ms(start),
    };

    Ok(Json(ApiResponse::success(data, elapsed_ms(start))))
}

// ============================================
// Liquidity
// ============================================

pub async fn simulate_liquidity(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimulateLiquidityRequest>, JsonRejection>,
) -> ApiResult<LiquiditySimResult> {
    let start = Instant::now();
    let Json(req) = payload.map_err(|e| parse_failure(e, start))?;

    require_non_negative("source_tvl_usd", req.source_tvl_usd)
        .and_then(|_| require_non_negative("price_usd", req.price_usd))
        .map_err(|e| {
            state.telemetry.record_rejected();
            failure(e, start)
        })?;

    let result = state
        .engine
        .simulator()
        .simulate(req.source_tvl_usd, req.price_usd, &req.source_chain);
    state
        .telemetry
        .record_simulation(start.elapsed().as_micros() as u64);

    Ok(Json(ApiResponse::success(result, elapsed_ms(start))))
}

pub async fn minimum_tvl(
    payload: Result<Json<MinimumTvlRequest>, JsonRejection>,
) -> ApiResult<MinimumTvlData> {
    let start = Instant::now();
    let Json(req) = payload.map_err(|e| parse_failure(e, start))?;

    require_non_negative("target_trade_usd", req.target_trade_usd).map_err(|e| failure(e, start))?;
    if req.max_slippage_pct.is_nan() {
        return Err(failure(
            AppError::invalid_input("max_slippage_pct must be a number"),
            start,
        ));
    }

    let tvl = minimum_tvl_for(req.target_trade_usd, req.max_slippage_pct);
    let data = MinimumTvlData {
        target_trade_usd: req.target_trade_usd,
        max_slippage_pct: req.max_slippage_pct,
        minimum_tvl_usd: tvl.is_finite().then_some(tvl),
    };

    Ok(Json(ApiResponse::success(data, elapsed_ms(start))))
}

// ============================================
// Strategy
// ============================================

pub async fn recommend_strategy(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AllScores>, JsonRejection>,
) -> ApiResult<StrategyData> {
    let start = Instant::now();
    let Json(scores) = payload.map_err(|e| parse_failure(e, start))?;

    let values = [
        scores.demand,
        scores.market_presence,
        scores.liquidity,
        scores.bridge_risk,
        scores.dump_risk,
    ];
    if values.iter().any(|&v| v > 100) {
        return Err(failure(
            AppError::invalid_input("module scores must be within 0-100"),
            start,
        ));
    }

    let config = state.engine.config();
    let strategy = recommend_with(&scores, &config.weights, &config.strategy);
    let data = StrategyData {
        overall: overall_score_with(&scores, &config.weights),
        weighted_average: weighted_average(&scores, &config.weights),
        title: strategy.strategy.title().to_string(),
        strategy,
    };

    Ok(Json(ApiResponse::success(data, elapsed_ms(start))))
}

// ============================================
// Stats
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();
    let stats = state.telemetry.get_stats();

    let data = StatsData {
        total_evaluations: stats.total_evaluations,
        total_simulations: stats.total_simulations,
        total_rejected: stats.total_rejected,
        strategies: stats.strategies,
        avg_overall: stats.avg_overall,
        avg_latency_ms: stats.avg_latency_ms,
        uptime_seconds: state.uptime_seconds(),
        api_version: APP_VERSION.to_string(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}
