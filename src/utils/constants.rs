//! Constants Module - Single Source of Truth
//!
//! Application-level constants shared by the binaries and the API.
//! Scoring policy lives in `models::config`, not here.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "MigrationReadiness";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// ENVIRONMENT
// ============================================

/// Path to a JSON file overriding `EngineConfig` defaults
pub const ENV_CONFIG_PATH: &str = "READINESS_CONFIG";
/// Injected by hosting platforms, takes precedence over `ENV_PORT_FALLBACK`
pub const ENV_PORT: &str = "PORT";
pub const ENV_PORT_FALLBACK: &str = "READINESS_PORT";
pub const ENV_HOST: &str = "READINESS_HOST";
pub const ENV_RATE_LIMIT: &str = "READINESS_RATE_LIMIT";

// ============================================
// SERVER DEFAULTS
// ============================================

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 100;
pub const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Upper bound on tokens per batch request
pub const MAX_BATCH_TOKENS: usize = 100;

/// Default directory for telemetry exports
pub const TELEMETRY_EXPORT_DIR: &str = "./telemetry";

// ============================================
// DISPLAY HELPERS
// ============================================

/// Compact USD label for a trade size ($1K, $500K, $1M)
pub fn format_usd_compact(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1_000_000_000.0 {
        (value / 1_000_000_000.0, "B")
    } else if abs >= 1_000_000.0 {
        (value / 1_000_000.0, "M")
    } else if abs >= 1_000.0 {
        (value / 1_000.0, "K")
    } else {
        (value, "")
    };

    if (scaled - scaled.round()).abs() < 1e-9 {
        format!("${}{}", scaled.round() as i64, suffix)
    } else {
        format!("${:.1}{}", scaled, suffix)
    }
}

/// USD amount with thousands separators, no cents ($1,234,567)
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return "unbounded".to_string();
    }
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
