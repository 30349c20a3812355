//! Demo roster used when the tracker is initialized with seeding enabled.

use chrono::{DateTime, Utc};

use super::types::Worker;

/// Workers with preset points, safety scores and streaks.
pub fn demo_roster(now: DateTime<Utc>) -> Vec<Worker> {
    vec![
        seeded(
            Worker::new("1", "Sarah Chen", "Mining Operations", now)
                .with_avatar("👩‍🔬")
                .with_response_time(1.2),
            2840,
            8,
            98.0,
            45,
            0,
        ),
        seeded(
            Worker::new("2", "Mike Rodriguez", "Safety Team", now)
                .with_avatar("👨‍🏭")
                .with_response_time(0.8),
            3120,
            9,
            99.0,
            52,
            0,
        ),
        seeded(
            Worker::new("3", "Emma Thompson", "Engineering", now)
                .with_avatar("👩‍💼")
                .with_response_time(2.1),
            1980,
            6,
            95.0,
            28,
            1,
        ),
    ]
}

fn seeded(
    mut worker: Worker,
    points: u64,
    level: u32,
    safety_score: f64,
    streak: u32,
    total_incidents: u32,
) -> Worker {
    worker.points = points;
    worker.level = level;
    worker.safety_score = safety_score;
    worker.streak = streak;
    worker.total_incidents = total_incidents;
    worker
}
