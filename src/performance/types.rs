//! Core types for safety performance tracking.
//!
//! Defines workers, badges, challenges, leaderboard entries and the
//! aggregate statistics snapshot.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Badge rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

/// Badge category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCategory {
    Safety,
    Response,
    Training,
    Teamwork,
    Innovation,
}

impl BadgeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeCategory::Safety => "safety",
            BadgeCategory::Response => "response",
            BadgeCategory::Training => "training",
            BadgeCategory::Teamwork => "teamwork",
            BadgeCategory::Innovation => "innovation",
        }
    }
}

/// Badge definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub rarity: Rarity,
    pub category: BadgeCategory,
    /// Descriptive only. Awarding is decided by the badge's rule.
    pub points_required: u64,
}

/// Badge held by a worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnedBadge {
    pub badge: Badge,
    pub earned_at: NaiveDate,
}

/// Presentation tier derived from a worker's level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelTier {
    /// Levels 1-2
    Novice,
    /// Levels 3-4
    Skilled,
    /// Levels 5-7
    Expert,
    /// Level 8 and above
    Master,
}

impl LevelTier {
    pub fn from_level(level: u32) -> Self {
        match level {
            0..=2 => LevelTier::Novice,
            3..=4 => LevelTier::Skilled,
            5..=7 => LevelTier::Expert,
            _ => LevelTier::Master,
        }
    }
}

/// A participant in the safety program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,
    pub name: String,
    /// Avatar glyph
    pub avatar: String,
    pub points: u64,
    /// High-water mark, never lowered.
    pub level: u32,
    pub badges: Vec<EarnedBadge>,
    /// Always within 0..=100
    pub safety_score: f64,
    /// Consecutive compliant periods
    pub streak: u32,
    pub department: String,
    pub last_activity: DateTime<Utc>,
    pub total_incidents: u32,
    /// Average alert response time in minutes, if any responses were recorded.
    pub response_time_minutes: Option<f64>,
}

impl Worker {
    /// Create a new worker with a clean record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: "👷".to_string(),
            points: 0,
            level: 1,
            badges: Vec::new(),
            safety_score: 100.0,
            streak: 0,
            department: department.into(),
            last_activity: now,
            total_incidents: 0,
            response_time_minutes: None,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    pub fn with_response_time(mut self, minutes: f64) -> Self {
        self.response_time_minutes = Some(minutes);
        self
    }

    /// Whether the worker holds the badge with this id.
    pub fn has_badge(&self, badge_id: &str) -> bool {
        self.badges.iter().any(|b| b.badge.id == badge_id)
    }

    pub fn level_tier(&self) -> LevelTier {
        LevelTier::from_level(self.level)
    }

    /// Fraction (0..1) of the way from the current level step to the next.
    pub fn progress_to_next_level(&self, points_per_level: u64) -> f64 {
        if points_per_level == 0 {
            return 0.0;
        }
        (self.points % points_per_level) as f64 / points_per_level as f64
    }
}

/// Level earned by a points total: `floor(points / step) + 1`.
pub fn level_for_points(points: u64, points_per_level: u64) -> u32 {
    if points_per_level == 0 {
        return 1;
    }
    u32::try_from(points / points_per_level)
        .unwrap_or(u32::MAX - 1)
        .saturating_add(1)
}

/// Challenge cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeType {
    Daily,
    Weekly,
    Monthly,
    Special,
}

impl ChallengeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeType::Daily => "daily",
            ChallengeType::Weekly => "weekly",
            ChallengeType::Monthly => "monthly",
            ChallengeType::Special => "special",
        }
    }
}

/// Challenge category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeCategory {
    Safety,
    Training,
    Compliance,
    Emergency,
}

/// Challenge difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// Worker level this difficulty is pitched at.
    pub fn target_level(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 4,
        }
    }
}

/// A bounded task with a point reward.
///
/// `completed` implies `progress == target`. Progress only moves up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub points: u64,
    pub challenge_type: ChallengeType,
    pub progress: u32,
    pub target: u32,
    pub completed: bool,
    pub deadline: NaiveDate,
    pub category: ChallengeCategory,
    pub difficulty: Difficulty,
}

impl Challenge {
    /// Progress as a percentage (0..100).
    pub fn percent_complete(&self) -> f64 {
        if self.target == 0 {
            return if self.completed { 100.0 } else { 0.0 };
        }
        (self.progress as f64 / self.target as f64 * 100.0).min(100.0)
    }
}

/// Leaderboard period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardPeriod {
    Daily,
    Weekly,
    #[default]
    Monthly,
    AllTime,
}

impl LeaderboardPeriod {
    pub const ALL: [LeaderboardPeriod; 4] = [
        LeaderboardPeriod::Daily,
        LeaderboardPeriod::Weekly,
        LeaderboardPeriod::Monthly,
        LeaderboardPeriod::AllTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaderboardPeriod::Daily => "daily",
            LeaderboardPeriod::Weekly => "weekly",
            LeaderboardPeriod::Monthly => "monthly",
            LeaderboardPeriod::AllTime => "all_time",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(LeaderboardPeriod::Daily),
            "weekly" => Some(LeaderboardPeriod::Weekly),
            "monthly" => Some(LeaderboardPeriod::Monthly),
            "all_time" | "allTime" => Some(LeaderboardPeriod::AllTime),
            _ => None,
        }
    }
}

/// Ranked view of one worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based
    pub rank: u32,
    pub worker: Worker,
    /// Points at the time the board was computed
    pub points: u64,
    /// Period-over-period change. Always 0: no history is retained.
    pub change: i64,
    pub period: LeaderboardPeriod,
}

/// Aggregate snapshot over the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStats {
    pub total_points: u64,
    pub active_workers: usize,
    /// Percentage of workers active in the trailing window
    pub participation_rate: f64,
    pub average_safety_score: f64,
    pub total_badges_earned: usize,
    pub challenges_completed: usize,
    /// Externally supplied figure
    pub incidents_reduction: f64,
}
