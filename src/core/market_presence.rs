//! Market Presence Module
//!
//! Breadth of the holder base and of exchange coverage.
//! Recipient count is log-scaled so a few very active tokens don't
//! saturate the scale; concentration scores inversely.

use crate::core::normalize::{clamp, clamp_score, log_scale, round_to};
use crate::models::types::{BreakdownBuilder, MarketPresenceInput, ScoreResult};

pub const RECIPIENT_LOG_FACTOR: f64 = 13.0;
pub const RECIPIENT_MAX: i64 = 40;

pub const CONCENTRATION_BASE: f64 = 40.0;
pub const CONCENTRATION_PENALTY_PER_PCT: f64 = 0.8;
pub const CONCENTRATION_MAX: i64 = 40;

/// Used for both transfer-derived sub-scores when history is missing
pub const TRANSFER_NEUTRAL: i64 = 20;

pub const LISTING_POINTS_EACH: f64 = 0.4;
pub const LISTING_MAX: i64 = 20;

pub fn score(input: &MarketPresenceInput) -> ScoreResult {
    let (recipient_score, concentration_score) = if input.has_transfer_data {
        (
            clamp(
                log_scale(input.unique_recipients as f64, RECIPIENT_LOG_FACTOR),
                0,
                RECIPIENT_MAX,
            ),
            clamp(
                CONCENTRATION_BASE - input.top10_concentration_pct * CONCENTRATION_PENALTY_PER_PCT,
                0,
                CONCENTRATION_MAX,
            ),
        )
    } else {
        (TRANSFER_NEUTRAL, TRANSFER_NEUTRAL)
    };

    let listing_score = clamp(input.exchange_listings as f64 * LISTING_POINTS_EACH, 0, LISTING_MAX);

    let total = clamp_score((recipient_score + concentration_score + listing_score) as f64);

    let (recipients, concentration) = if input.has_transfer_data {
        (
            Some(input.unique_recipients),
            Some(round_to(input.top10_concentration_pct, 2)),
        )
    } else {
        (None, None)
    };

    BreakdownBuilder::new()
        .item("transfer_data", "Transfer History Available", input.has_transfer_data)
        .item("unique_recipients", "Unique Recipients (recent transfers)", recipients)
        .item("recipient_score", "Recipient Score (max 40)", recipient_score)
        .item("top10_concentration_pct", "Top 10 Recipient Share (%)", concentration)
        .item("concentration_score", "Distribution Score (max 40)", concentration_score)
        .item("exchange_listings", "Exchange Listings", input.exchange_listings)
        .item("listing_score", "Listing Breadth Score (max 20)", listing_score)
        .item("watchlist_count", "Watchlist Users", input.watchlist_count)
        .build(total)
}
