//! Badge catalog and eligibility rules.
//!
//! Each badge id maps to exactly one [`BadgeRule`]. Rules are pure
//! functions of a [`Worker`] so they can be checked on their own.

use chrono::NaiveDate;

use super::types::{Badge, BadgeCategory, EarnedBadge, Rarity, Worker};

pub const SAFETY_FIRST: &str = "safety-first";
pub const QUICK_RESPONDER: &str = "quick-responder";
pub const PERFECT_WEEK: &str = "perfect-week";
pub const TEAM_PLAYER: &str = "team-player";
pub const INNOVATION_LEADER: &str = "innovation-leader";

/// Eligibility rule for a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeRule {
    /// Streak of 30+ and no incidents ever
    SafetyFirst,
    /// Average response time of 2 minutes or less
    QuickResponder,
    /// Streak of 7+ with a perfect safety score
    PerfectWeek,
    /// 500+ points
    TeamPlayer,
    /// 3000+ points
    InnovationLeader,
}

impl BadgeRule {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            SAFETY_FIRST => Some(BadgeRule::SafetyFirst),
            QUICK_RESPONDER => Some(BadgeRule::QuickResponder),
            PERFECT_WEEK => Some(BadgeRule::PerfectWeek),
            TEAM_PLAYER => Some(BadgeRule::TeamPlayer),
            INNOVATION_LEADER => Some(BadgeRule::InnovationLeader),
            _ => None,
        }
    }

    /// Whether `worker` currently satisfies the rule.
    pub fn is_met(&self, worker: &Worker) -> bool {
        match self {
            BadgeRule::SafetyFirst => worker.streak >= 30 && worker.total_incidents == 0,
            BadgeRule::QuickResponder => worker
                .response_time_minutes
                .is_some_and(|minutes| minutes <= 2.0),
            BadgeRule::PerfectWeek => worker.streak >= 7 && worker.safety_score >= 100.0,
            BadgeRule::TeamPlayer => worker.points >= 500,
            BadgeRule::InnovationLeader => worker.points >= 3000,
        }
    }
}

/// Whether `worker` qualifies for `badge`. Badges without a rule never qualify.
pub fn qualifies(worker: &Worker, badge: &Badge) -> bool {
    BadgeRule::from_id(&badge.id).is_some_and(|rule| rule.is_met(worker))
}

/// Badge awarded during an assignment pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeAward {
    pub worker_id: String,
    pub badge_id: String,
}

/// Award every badge each worker qualifies for and does not hold yet.
///
/// Returns the badges awarded by this pass.
pub fn assign_badges(workers: &mut [Worker], catalog: &[Badge], today: NaiveDate) -> Vec<BadgeAward> {
    let mut awarded = Vec::new();

    for worker in workers.iter_mut() {
        for badge in catalog {
            if worker.has_badge(&badge.id) || !qualifies(worker, badge) {
                continue;
            }

            worker.badges.push(EarnedBadge {
                badge: badge.clone(),
                earned_at: today,
            });
            awarded.push(BadgeAward {
                worker_id: worker.id.clone(),
                badge_id: badge.id.clone(),
            });
        }
    }

    awarded
}

/// The fixed badge catalog.
pub fn default_badges() -> Vec<Badge> {
    vec![
        badge(
            SAFETY_FIRST,
            "Safety First",
            "30 days without incidents",
            "🛡️",
            Rarity::Rare,
            BadgeCategory::Safety,
            1000,
        ),
        badge(
            QUICK_RESPONDER,
            "Quick Responder",
            "Responded to 10 alerts under 2 minutes",
            "⚡",
            Rarity::Epic,
            BadgeCategory::Response,
            2000,
        ),
        badge(
            PERFECT_WEEK,
            "Perfect Week",
            "7 days of perfect safety compliance",
            "⭐",
            Rarity::Legendary,
            BadgeCategory::Safety,
            5000,
        ),
        badge(
            TEAM_PLAYER,
            "Team Player",
            "Helped 5 colleagues with safety training",
            "🤝",
            Rarity::Common,
            BadgeCategory::Teamwork,
            500,
        ),
        badge(
            INNOVATION_LEADER,
            "Innovation Leader",
            "Proposed 3 safety improvements",
            "💡",
            Rarity::Epic,
            BadgeCategory::Innovation,
            3000,
        ),
    ]
}

fn badge(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    rarity: Rarity,
    category: BadgeCategory,
    points_required: u64,
) -> Badge {
    Badge {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        rarity,
        category,
        points_required,
    }
}
