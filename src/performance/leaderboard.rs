//! Leaderboard computation.
//!
//! Boards are rebuilt from the roster on every change; nothing is patched
//! in place.

use std::cmp::Reverse;
use std::collections::HashMap;

use super::types::{LeaderboardEntry, LeaderboardPeriod, Worker};

/// Ranked boards for every period.
#[derive(Debug, Clone, Default)]
pub struct Leaderboards {
    boards: HashMap<LeaderboardPeriod, Vec<LeaderboardEntry>>,
}

impl Leaderboards {
    /// Rebuild every period from `workers`.
    pub fn compute(workers: &[Worker]) -> Self {
        let boards = LeaderboardPeriod::ALL
            .iter()
            .map(|&period| (period, rank_workers(workers, period)))
            .collect();
        Self { boards }
    }

    /// Board for `period`. Empty before the first computation.
    pub fn get(&self, period: LeaderboardPeriod) -> &[LeaderboardEntry] {
        self.boards.get(&period).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Rank workers by points, highest first.
///
/// The sort is stable, so equal points keep roster order, and ranks run
/// 1..=N without gaps.
pub fn rank_workers(workers: &[Worker], period: LeaderboardPeriod) -> Vec<LeaderboardEntry> {
    let mut sorted: Vec<&Worker> = workers.iter().collect();
    sorted.sort_by_key(|w| Reverse(w.points));

    sorted
        .into_iter()
        .zip(1u32..)
        .map(|(worker, rank)| LeaderboardEntry {
            rank,
            worker: worker.clone(),
            points: worker.points,
            change: 0,
            period,
        })
        .collect()
}
