//! Performance tracker.
//!
//! Owns the worker roster, the challenge catalog and the badge catalog.
//! Every mutating operation is a single synchronous step: it either applies
//! fully or returns an error without touching state.
//!
//! Leaderboard entries carry worker snapshots, so the boards are rebuilt
//! after every roster change.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::badges::{self, BadgeAward};
use super::challenges::{self, NewChallenge, DAILY_SAFETY_CHECK};
use super::leaderboard::Leaderboards;
use super::seed;
use super::stats;
use super::types::{
    level_for_points, Badge, Challenge, LeaderboardEntry, LeaderboardPeriod, PerformanceStats,
    Worker,
};
use crate::clock::{Clock, SystemClock};
use crate::storage::config::TrackerSettings;

/// In-memory tracker for worker points, badges, challenges and leaderboards.
pub struct PerformanceTracker {
    settings: TrackerSettings,
    clock: Arc<dyn Clock>,
    workers: Vec<Worker>,
    challenges: Vec<Challenge>,
    badges: Vec<Badge>,
    leaderboards: Leaderboards,
}

impl PerformanceTracker {
    /// Create an empty tracker with the badge catalog loaded.
    pub fn new(settings: TrackerSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            settings,
            clock,
            workers: Vec::new(),
            challenges: Vec::new(),
            badges: badges::default_badges(),
            leaderboards: Leaderboards::default(),
        }
    }

    /// Create an empty tracker on wall-clock time.
    pub fn with_system_clock(settings: TrackerSettings) -> Self {
        Self::new(settings, Arc::new(SystemClock))
    }

    /// Load the starter challenges and, when enabled, the demo roster.
    ///
    /// Replaces any existing catalog and roster, then runs one badge pass and
    /// one leaderboard computation.
    pub fn initialize(&mut self) {
        let now = self.clock.now();

        self.challenges = challenges::starter_challenges(now);
        if self.settings.seed_demo_roster {
            self.workers = seed::demo_roster(now);
        }

        self.assign_badges();
        self.update_leaderboards();

        tracing::info!(
            "Performance tracker initialized with {} workers and {} challenges",
            self.workers.len(),
            self.challenges.len()
        );
    }

    /// Add a worker to the roster.
    ///
    /// The safety score is clamped and the level raised to at least what
    /// the worker's points earn.
    pub fn register_worker(&mut self, mut worker: Worker) -> Result<(), PerformanceError> {
        if self.workers.iter().any(|w| w.id == worker.id) {
            return Err(PerformanceError::DuplicateWorker(worker.id));
        }

        worker.safety_score = clamp_score(worker.safety_score);
        worker.level = worker
            .level
            .max(level_for_points(worker.points, self.settings.points_per_level));

        tracing::info!("Registered worker {} ({})", worker.id, worker.name);
        self.workers.push(worker);
        self.assign_badges();
        self.update_leaderboards();
        Ok(())
    }

    /// Award points to a worker for an activity.
    ///
    /// Negative amounts lower points (never below zero) but never the level.
    /// The daily safety check activity extends the worker's streak.
    pub fn award_points(
        &mut self,
        worker_id: &str,
        activity: &str,
        amount: i64,
    ) -> Result<(), PerformanceError> {
        let index = self.worker_index(worker_id)?;
        let now = self.clock.now();
        let points_per_level = self.settings.points_per_level;

        let worker = &mut self.workers[index];
        worker.points = worker.points.saturating_add_signed(amount);
        worker.last_activity = now;

        let new_level = level_for_points(worker.points, points_per_level);
        if new_level > worker.level {
            tracing::info!("Worker {} reached level {}", worker.id, new_level);
            worker.level = new_level;
        }

        if activity == DAILY_SAFETY_CHECK {
            worker.streak += 1;
        }

        tracing::debug!(
            "Awarded {} points to worker {} for {} (total {})",
            amount,
            worker.id,
            activity,
            worker.points
        );

        self.update_leaderboards();
        Ok(())
    }

    /// Complete a challenge on behalf of a worker.
    ///
    /// A challenge completes exactly once; later calls fail with
    /// [`PerformanceError::ChallengeAlreadyCompleted`].
    pub fn complete_challenge(
        &mut self,
        worker_id: &str,
        challenge_id: &str,
    ) -> Result<(), PerformanceError> {
        self.worker_index(worker_id)?;
        let index = self.challenge_index(challenge_id)?;

        let challenge = &mut self.challenges[index];
        if challenge.completed {
            return Err(PerformanceError::ChallengeAlreadyCompleted(
                challenge_id.to_string(),
            ));
        }

        challenge.completed = true;
        challenge.progress = challenge.target;
        let reward = challenge.points;

        tracing::info!("Worker {} completed challenge {}", worker_id, challenge_id);

        let reward = i64::try_from(reward).unwrap_or(i64::MAX);
        self.award_points(worker_id, &format!("challenge-{}", challenge_id), reward)?;
        self.assign_badges();
        Ok(())
    }

    /// Record progress on a challenge.
    ///
    /// Progress is capped at the target and never moves backwards. Reaching
    /// the target completes the challenge for `worker_id`. Only an unknown
    /// challenge is an error.
    pub fn update_challenge_progress(
        &mut self,
        worker_id: &str,
        challenge_id: &str,
        progress: u32,
    ) -> Result<(), PerformanceError> {
        let index = self.challenge_index(challenge_id)?;

        let challenge = &mut self.challenges[index];
        let capped = progress.min(challenge.target);
        if capped > challenge.progress {
            challenge.progress = capped;
        }

        if challenge.progress >= challenge.target && !challenge.completed {
            if let Err(e) = self.complete_challenge(worker_id, challenge_id) {
                tracing::warn!(
                    "Challenge {} reached its target but was not completed: {}",
                    challenge_id,
                    e
                );
            }
        }

        Ok(())
    }

    /// Set a worker's safety score, clamped to 0..=100.
    pub fn update_safety_score(&mut self, worker_id: &str, score: f64) -> Result<(), PerformanceError> {
        let index = self.worker_index(worker_id)?;

        let worker = &mut self.workers[index];
        worker.safety_score = clamp_score(score);
        tracing::debug!("Worker {} safety score set to {}", worker.id, worker.safety_score);

        self.assign_badges();
        self.update_leaderboards();
        Ok(())
    }

    /// Record a safety incident against a worker.
    ///
    /// Resets the streak and deducts the incident penalty from the safety
    /// score. Points are left alone.
    pub fn record_incident(&mut self, worker_id: &str) -> Result<(), PerformanceError> {
        let index = self.worker_index(worker_id)?;
        let penalty = self.settings.incident_penalty;

        let worker = &mut self.workers[index];
        worker.total_incidents += 1;
        worker.streak = 0;
        worker.safety_score = clamp_score(worker.safety_score - penalty);

        tracing::warn!(
            "Incident recorded for worker {} (total {}, safety score {})",
            worker.id,
            worker.total_incidents,
            worker.safety_score
        );

        self.update_leaderboards();
        Ok(())
    }

    /// Add a challenge to the catalog and return its id.
    pub fn create_challenge(&mut self, new_challenge: NewChallenge) -> String {
        let id = format!("challenge-{}", Uuid::new_v4());
        tracing::info!("Created challenge {} ({})", id, new_challenge.title);
        self.challenges.push(new_challenge.into_challenge(id.clone()));
        id
    }

    /// Up to three open challenges suited to the worker's level.
    ///
    /// Unknown workers get no recommendations.
    pub fn recommended_challenges(&self, worker_id: &str) -> Vec<Challenge> {
        match self.worker(worker_id) {
            Some(worker) => challenges::recommend(&self.challenges, worker.level),
            None => Vec::new(),
        }
    }

    /// Fresh statistics snapshot.
    pub fn stats(&self) -> PerformanceStats {
        stats::compute_stats(
            &self.workers,
            &self.challenges,
            self.clock.now(),
            Duration::days(self.settings.active_window_days),
            self.settings.incidents_reduction_pct,
        )
    }

    /// Ranked board for `period`.
    pub fn leaderboard(&self, period: LeaderboardPeriod) -> &[LeaderboardEntry] {
        self.leaderboards.get(period)
    }

    /// Look up a worker.
    pub fn worker(&self, worker_id: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == worker_id)
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// Look up a challenge.
    pub fn challenge(&self, challenge_id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == challenge_id)
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    /// Badge catalog.
    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Current instant according to the tracker's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Current date according to the tracker's clock.
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    fn worker_index(&self, worker_id: &str) -> Result<usize, PerformanceError> {
        self.workers
            .iter()
            .position(|w| w.id == worker_id)
            .ok_or_else(|| {
                tracing::warn!("Worker not found: {}", worker_id);
                PerformanceError::WorkerNotFound(worker_id.to_string())
            })
    }

    fn challenge_index(&self, challenge_id: &str) -> Result<usize, PerformanceError> {
        self.challenges
            .iter()
            .position(|c| c.id == challenge_id)
            .ok_or_else(|| {
                tracing::warn!("Challenge not found: {}", challenge_id);
                PerformanceError::ChallengeNotFound(challenge_id.to_string())
            })
    }

    /// Award every badge workers newly qualify for. Rebuilds the boards when
    /// anything was awarded.
    fn assign_badges(&mut self) {
        let today = self.today();
        let awarded = badges::assign_badges(&mut self.workers, &self.badges, today);

        for BadgeAward { worker_id, badge_id } in &awarded {
            tracing::info!("Worker {} earned badge {}", worker_id, badge_id);
        }

        if !awarded.is_empty() {
            self.update_leaderboards();
        }
    }

    fn update_leaderboards(&mut self) {
        self.leaderboards = Leaderboards::compute(&self.workers);
    }
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

/// Performance tracker errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PerformanceError {
    #[error("Worker not found: {0}")]
    WorkerNotFound(String),

    #[error("Challenge not found: {0}")]
    ChallengeNotFound(String),

    #[error("Challenge already completed: {0}")]
    ChallengeAlreadyCompleted(String),

    #[error("Worker already registered: {0}")]
    DuplicateWorker(String),
}
