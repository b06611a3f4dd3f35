//! Bridge Risk Module
//!
//! Monotone in the number of viable cross-chain routes: more routes,
//! less migration risk (higher score).

use crate::core::normalize::clamp_score;
use crate::models::types::{BreakdownBuilder, BridgeRiskInput, ScoreResult};

pub const BASE_SCORE: f64 = 30.0;
pub const POINTS_PER_ROUTE: f64 = 20.0;

pub fn score(input: &BridgeRiskInput) -> ScoreResult {
    let supported = input.supported_count();
    let total = clamp_score(BASE_SCORE + supported as f64 * POINTS_PER_ROUTE);

    let available: Vec<&str> = input
        .routes
        .iter()
        .filter(|r| r.available)
        .map(|r| r.name.as_str())
        .collect();
    let unavailable: Vec<&str> = input
        .routes
        .iter()
        .filter(|r| !r.available)
        .map(|r| r.name.as_str())
        .collect();

    let join = |names: Vec<&str>| {
        if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        }
    };

    BreakdownBuilder::new()
        .item("routes_checked", "Routes Checked", input.routes.len())
        .item("supported_bridges", "Viable Routes", supported)
        .item("available_routes", "Available", join(available))
        .item("unavailable_routes", "Unavailable", join(unavailable))
        .build(total)
}
