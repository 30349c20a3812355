//! Aggregate statistics over the roster.

use chrono::{DateTime, Duration, Utc};

use super::types::{Challenge, PerformanceStats, Worker};

/// Compute a fresh statistics snapshot.
///
/// A worker is active when their last activity falls inside the trailing
/// `active_window`. `incidents_reduction` is passed through unchanged.
pub fn compute_stats(
    workers: &[Worker],
    challenges: &[Challenge],
    now: DateTime<Utc>,
    active_window: Duration,
    incidents_reduction: f64,
) -> PerformanceStats {
    let total_points = workers
        .iter()
        .map(|w| w.points)
        .fold(0u64, u64::saturating_add);
    let active_workers = workers
        .iter()
        .filter(|w| now - w.last_activity < active_window)
        .count();
    let total_badges_earned = workers.iter().map(|w| w.badges.len()).sum();
    let challenges_completed = challenges.iter().filter(|c| c.completed).count();

    let (participation_rate, average_safety_score) = if workers.is_empty() {
        (0.0, 0.0)
    } else {
        let count = workers.len() as f64;
        let score_sum: f64 = workers.iter().map(|w| w.safety_score).sum();
        (active_workers as f64 / count * 100.0, score_sum / count)
    };

    PerformanceStats {
        total_points,
        active_workers,
        participation_rate,
        average_safety_score,
        total_badges_earned,
        challenges_completed,
        incidents_reduction,
    }
}
