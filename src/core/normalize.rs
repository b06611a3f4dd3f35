//! Normalization helpers shared by every scorer

/// Round to the nearest integer and bound to `[min, max]`.
///
/// NaN maps to `min`; infinities saturate to the matching bound.
pub fn clamp(value: f64, min: i64, max: i64) -> i64 {
    if value.is_nan() {
        return min;
    }
    // `as` saturates for out-of-range floats
    (value.round() as i64).clamp(min, max)
}

/// `clamp(value, 0, 100)`
pub fn clamp_score(value: f64) -> i64 {
    clamp(value, 0, 100)
}

/// `log10(x + 1) * k`; diminishing returns for metrics spanning many
/// orders of magnitude. Negative inputs are treated as zero.
pub fn log_scale(x: f64, k: f64) -> f64 {
    (x.max(0.0) + 1.0).log10() * k
}

/// 24h volume over market cap, in percent. 0 when market cap is unknown.
pub fn turnover_pct(volume_24h_usd: f64, market_cap_usd: f64) -> f64 {
    if market_cap_usd > 0.0 && volume_24h_usd.is_finite() {
        volume_24h_usd.max(0.0) / market_cap_usd * 100.0
    } else {
        0.0
    }
}

/// Round for display in a breakdown
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
