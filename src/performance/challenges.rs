//! Challenge catalog, deadlines and recommendations.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::types::{Challenge, ChallengeCategory, ChallengeType, Difficulty};

/// Id of the recurring daily inspection challenge. Awarding points under
/// this activity label extends the worker's streak.
pub const DAILY_SAFETY_CHECK: &str = "daily-safety-check";
pub const EMERGENCY_RESPONSE_TRAINING: &str = "emergency-response-training";
pub const SAFETY_PROTOCOL_REVIEW: &str = "safety-protocol-review";

/// Most challenges returned by a recommendation query.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Deadline for a challenge of the given cadence created at `now`.
pub fn deadline_for(challenge_type: ChallengeType, now: DateTime<Utc>) -> NaiveDate {
    let days = match challenge_type {
        ChallengeType::Daily => 1,
        ChallengeType::Weekly => 7,
        ChallengeType::Monthly => 30,
        ChallengeType::Special => 0,
    };
    (now + Duration::days(days)).date_naive()
}

/// Fields supplied when creating a challenge. Id, progress and completion
/// are assigned by the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChallenge {
    pub title: String,
    pub description: String,
    pub points: u64,
    pub challenge_type: ChallengeType,
    pub target: u32,
    pub deadline: NaiveDate,
    pub category: ChallengeCategory,
    pub difficulty: Difficulty,
}

impl NewChallenge {
    pub fn into_challenge(self, id: String) -> Challenge {
        Challenge {
            id,
            title: self.title,
            description: self.description,
            points: self.points,
            challenge_type: self.challenge_type,
            progress: 0,
            target: self.target,
            completed: false,
            deadline: self.deadline,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// Starter catalog: one daily, one weekly and one monthly challenge.
pub fn starter_challenges(now: DateTime<Utc>) -> Vec<Challenge> {
    vec![
        Challenge {
            id: DAILY_SAFETY_CHECK.to_string(),
            title: "Daily Safety Check".to_string(),
            description: "Complete all assigned safety inspections".to_string(),
            points: 50,
            challenge_type: ChallengeType::Daily,
            progress: 0,
            target: 5,
            completed: false,
            deadline: deadline_for(ChallengeType::Daily, now),
            category: ChallengeCategory::Safety,
            difficulty: Difficulty::Easy,
        },
        Challenge {
            id: EMERGENCY_RESPONSE_TRAINING.to_string(),
            title: "Emergency Response Training".to_string(),
            description: "Complete quarterly emergency response certification".to_string(),
            points: 200,
            challenge_type: ChallengeType::Monthly,
            progress: 0,
            target: 1,
            completed: false,
            deadline: deadline_for(ChallengeType::Monthly, now),
            category: ChallengeCategory::Training,
            difficulty: Difficulty::Medium,
        },
        Challenge {
            id: SAFETY_PROTOCOL_REVIEW.to_string(),
            title: "Safety Protocol Review".to_string(),
            description: "Review and update 3 safety protocols".to_string(),
            points: 150,
            challenge_type: ChallengeType::Weekly,
            progress: 0,
            target: 3,
            completed: false,
            deadline: deadline_for(ChallengeType::Weekly, now),
            category: ChallengeCategory::Compliance,
            difficulty: Difficulty::Hard,
        },
    ]
}

/// Open challenges ordered by how close their difficulty sits to `level`.
///
/// Equal distances keep catalog order.
pub fn recommend(challenges: &[Challenge], level: u32) -> Vec<Challenge> {
    let mut open: Vec<&Challenge> = challenges.iter().filter(|c| !c.completed).collect();
    open.sort_by_key(|c| c.difficulty.target_level().abs_diff(level));
    open.into_iter()
        .take(MAX_RECOMMENDATIONS)
        .cloned()
        .collect()
}
