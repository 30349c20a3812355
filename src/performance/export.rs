//! Leaderboard and roster export.
//!
//! Provides JSON and CSV output for dashboards and reports.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::tracker::PerformanceTracker;
use super::types::{LeaderboardPeriod, PerformanceStats};

/// Version tag written into every export.
pub const EXPORT_VERSION: &str = "1";

/// Exported leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardExport {
    pub period: LeaderboardPeriod,
    pub entries: Vec<EntryExport>,
    pub exported_at: DateTime<Utc>,
    pub export_version: String,
}

/// Leaderboard row for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryExport {
    pub rank: u32,
    pub worker_id: String,
    pub worker_name: String,
    pub department: String,
    pub points: u64,
    pub change: i64,
}

/// Roster snapshot for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterExport {
    pub workers: Vec<WorkerExport>,
    pub stats: PerformanceStats,
    pub exported_at: DateTime<Utc>,
    pub export_version: String,
}

/// Worker data for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerExport {
    pub id: String,
    pub name: String,
    pub department: String,
    pub points: u64,
    pub level: u32,
    pub safety_score: f64,
    pub streak: u32,
    pub total_incidents: u32,
    pub badges: Vec<BadgeExport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeExport {
    pub id: String,
    pub name: String,
    pub earned_at: NaiveDate,
}

/// Exporter over a tracker's current state.
pub struct LeaderboardExporter<'a> {
    tracker: &'a PerformanceTracker,
    exported_at: DateTime<Utc>,
}

impl<'a> LeaderboardExporter<'a> {
    /// Create an exporter stamped with `exported_at`.
    pub fn new(tracker: &'a PerformanceTracker, exported_at: DateTime<Utc>) -> Self {
        Self {
            tracker,
            exported_at,
        }
    }

    /// Build the export structure for a leaderboard.
    pub fn build_leaderboard(&self, period: LeaderboardPeriod) -> LeaderboardExport {
        let entries = self
            .tracker
            .leaderboard(period)
            .iter()
            .map(|entry| EntryExport {
                rank: entry.rank,
                worker_id: entry.worker.id.clone(),
                worker_name: entry.worker.name.clone(),
                department: entry.worker.department.clone(),
                points: entry.points,
                change: entry.change,
            })
            .collect();

        LeaderboardExport {
            period,
            entries,
            exported_at: self.exported_at,
            export_version: EXPORT_VERSION.to_string(),
        }
    }

    /// Export a leaderboard to JSON.
    pub fn export_leaderboard_json(&self, period: LeaderboardPeriod) -> Result<String, ExportError> {
        serde_json::to_string_pretty(&self.build_leaderboard(period))
            .map_err(|e| ExportError::SerializationFailed(e.to_string()))
    }

    /// Export a leaderboard to CSV.
    pub fn export_leaderboard_csv(&self, period: LeaderboardPeriod) -> String {
        let export = self.build_leaderboard(period);

        let mut csv = String::new();
        csv.push_str("rank,worker_id,worker_name,department,points,change\n");

        for entry in &export.entries {
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                entry.rank,
                escape_csv(&entry.worker_id),
                escape_csv(&entry.worker_name),
                escape_csv(&entry.department),
                entry.points,
                entry.change,
            ));
        }

        csv
    }

    /// Build the roster snapshot.
    pub fn build_roster(&self) -> RosterExport {
        let workers = self
            .tracker
            .workers()
            .iter()
            .map(|w| WorkerExport {
                id: w.id.clone(),
                name: w.name.clone(),
                department: w.department.clone(),
                points: w.points,
                level: w.level,
                safety_score: w.safety_score,
                streak: w.streak,
                total_incidents: w.total_incidents,
                badges: w
                    .badges
                    .iter()
                    .map(|b| BadgeExport {
                        id: b.badge.id.clone(),
                        name: b.badge.name.clone(),
                        earned_at: b.earned_at,
                    })
                    .collect(),
            })
            .collect();

        RosterExport {
            workers,
            stats: self.tracker.stats(),
            exported_at: self.exported_at,
            export_version: EXPORT_VERSION.to_string(),
        }
    }

    /// Export the roster snapshot to JSON.
    pub fn export_roster_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(&self.build_roster())
            .map_err(|e| ExportError::SerializationFailed(e.to_string()))
    }
}

/// Parse a period name given on the command line or in a request.
pub fn parse_period(name: &str) -> Result<LeaderboardPeriod, ExportError> {
    LeaderboardPeriod::from_str(name).ok_or_else(|| ExportError::UnknownPeriod(name.to_string()))
}

/// Escape a string for CSV.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Export errors.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Unknown leaderboard period: {0}")]
    UnknownPeriod(String),

    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
}
