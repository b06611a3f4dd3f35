//! Telemetry Module
//!
//! In-process counters for the API server:
//! - evaluations served and how the strategy verdicts are distributed
//! - liquidity simulations and rejected inputs
//! - average composite score and handler latency
//!
//! Token symbols are never stored; only aggregate counts leave this module.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::types::{MigrationReport, Strategy};
use crate::utils::constants::TELEMETRY_EXPORT_DIR;

/// Aggregated statistics for `/v1/stats` and exports
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelemetryStats {
    pub total_evaluations: u64,
    pub total_simulations: u64,
    /// Inputs rejected before scoring
    pub total_rejected: u64,
    /// Evaluations per strategy (`canonical_launch`, ...)
    pub strategies: HashMap<String, u64>,
    /// Mean composite readiness over all evaluations
    pub avg_overall: f64,
    /// Mean handler latency (ms) over evaluations and simulations
    pub avg_latency_ms: f64,
    pub period_start: u64,
    pub period_end: u64,
}

impl TelemetryStats {
    /// Plain-text summary for the shutdown log
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!(
                "Period: {}s",
                self.period_end.saturating_sub(self.period_start)
            ),
            format!("Evaluations: {}", self.total_evaluations),
            format!("Simulations: {}", self.total_simulations),
            format!("Rejected inputs: {}", self.total_rejected),
            format!("Avg readiness: {:.1}", self.avg_overall),
            format!("Avg latency: {:.2}ms", self.avg_latency_ms),
        ];

        let mut strategies: Vec<_> = self.strategies.iter().collect();
        strategies.sort();
        for (strategy, count) in strategies {
            lines.push(format!("  {}: {}", strategy, count));
        }

        lines.join("\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.2},{:.2}\n",
            self.period_start,
            self.period_end,
            self.total_evaluations,
            self.total_simulations,
            self.total_rejected,
            self.avg_overall,
            self.avg_latency_ms,
        )
    }
}

/// Thread-safe counters shared by all handlers
pub struct TelemetryCollector {
    total_evaluations: AtomicU64,
    total_simulations: AtomicU64,
    total_rejected: AtomicU64,
    total_overall: AtomicU64,
    total_latency_us: AtomicU64,
    strategy_counts: RwLock<HashMap<Strategy, u64>>,
    session_start: u64,
    export_dir: PathBuf,
}

impl TelemetryCollector {
    pub fn new() -> Self {
        Self::with_export_dir(PathBuf::from(TELEMETRY_EXPORT_DIR))
    }

    /// The directory is created lazily on first export
    pub fn with_export_dir(export_dir: PathBuf) -> Self {
        Self {
            total_evaluations: AtomicU64::new(0),
            total_simulations: AtomicU64::new(0),
            total_rejected: AtomicU64::new(0),
            total_overall: AtomicU64::new(0),
            total_latency_us: AtomicU64::new(0),
            strategy_counts: RwLock::new(HashMap::new()),
            session_start: current_timestamp(),
            export_dir,
        }
    }

    /// Record one finished evaluation
    pub fn record_evaluation(&self, report: &MigrationReport, latency_us: u64) {
        self.total_evaluations.fetch_add(1, Ordering::Relaxed);
        self.total_overall
            .fetch_add(report.overall as u64, Ordering::Relaxed);
        self.total_latency_us
            .fetch_add(latency_us, Ordering::Relaxed);

        if let Ok(mut counts) = self.strategy_counts.write() {
            *counts.entry(report.strategy.strategy).or_insert(0) += 1;
        }
    }

    pub fn record_simulation(&self, latency_us: u64) {
        self.total_simulations.fetch_add(1, Ordering::Relaxed);
        self.total_latency_us
            .fetch_add(latency_us, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.total_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> TelemetryStats {
        let total_evaluations = self.total_evaluations.load(Ordering::Relaxed);
        let total_simulations = self.total_simulations.load(Ordering::Relaxed);
        let total_overall = self.total_overall.load(Ordering::Relaxed);
        let total_latency_us = self.total_latency_us.load(Ordering::Relaxed);

        let avg_overall = if total_evaluations > 0 {
            total_overall as f64 / total_evaluations as f64
        } else {
            0.0
        };

        let timed = total_evaluations + total_simulations;
        let avg_latency_ms = if timed > 0 {
            total_latency_us as f64 / timed as f64 / 1000.0
        } else {
            0.0
        };

        let strategies = self
            .strategy_counts
            .read()
            .map(|counts| {
                counts
                    .iter()
                    .map(|(k, v)| (k.as_str().to_string(), *v))
                    .collect()
            })
            .unwrap_or_default();

        TelemetryStats {
            total_evaluations,
            total_simulations,
            total_rejected: self.total_rejected.load(Ordering::Relaxed),
            strategies,
            avg_overall,
            avg_latency_ms,
            period_start: self.session_start,
            period_end: current_timestamp(),
        }
    }

    /// Export current stats to a timestamped JSON file
    pub fn export_stats_json(&self) -> Result<PathBuf, std::io::Error> {
        fs::create_dir_all(&self.export_dir)?;
        let stats = self.get_stats();
        let path = self
            .export_dir
            .join(format!("stats_{}.json", current_timestamp()));

        let json = serde_json::to_string_pretty(&stats)?;
        fs::write(&path, json)?;

        Ok(path)
    }

    /// Append current stats to the CSV history
    pub fn export_stats_csv(&self) -> Result<PathBuf, std::io::Error> {
        fs::create_dir_all(&self.export_dir)?;
        let stats = self.get_stats();
        let path = self.export_dir.join("telemetry_history.csv");

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

        if file.metadata()?.len() == 0 {
            writeln!(
                file,
                "period_start,period_end,total_evaluations,total_simulations,total_rejected,avg_overall,avg_latency_ms"
            )?;
        }

        write!(file, "{}", stats.to_csv_row())?;

        Ok(path)
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
