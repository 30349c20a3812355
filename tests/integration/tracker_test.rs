//! Integration tests for the performance tracker

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use minewatch::performance::badges::TEAM_PLAYER;
use minewatch::performance::challenges::{NewChallenge, DAILY_SAFETY_CHECK};
use minewatch::performance::{
    ChallengeCategory, ChallengeType, Difficulty, LeaderboardPeriod, PerformanceError, Worker,
};
use minewatch::{ManualClock, PerformanceTracker, TrackerSettings};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 14, 6, 0, 0).unwrap()
}

/// Tracker with the starter challenges and one fresh worker `w1`.
fn setup() -> (PerformanceTracker, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start()));
    let settings = TrackerSettings {
        seed_demo_roster: false,
        ..TrackerSettings::default()
    };
    let mut tracker = PerformanceTracker::new(settings, clock.clone());
    tracker.initialize();
    tracker
        .register_worker(Worker::new("w1", "Jordan Miles", "Mining Operations", start()))
        .unwrap();
    (tracker, clock)
}

fn add_challenge(tracker: &mut PerformanceTracker, target: u32, points: u64) -> String {
    tracker.create_challenge(NewChallenge {
        title: "Hazard Spotting".to_string(),
        description: "Report hazards on the haul road".to_string(),
        points,
        challenge_type: ChallengeType::Special,
        target,
        deadline: start().date_naive() + Duration::days(3),
        category: ChallengeCategory::Safety,
        difficulty: Difficulty::Medium,
    })
}

#[test]
fn test_award_600_points_levels_up_and_earns_team_player() {
    let (mut tracker, _) = setup();

    tracker.award_points("w1", "x", 600).unwrap();

    let worker = tracker.worker("w1").unwrap();
    assert_eq!(worker.points, 600);
    assert_eq!(worker.level, 2);

    // Badge appears after the next assignment pass
    tracker.update_safety_score("w1", 90.0).unwrap();
    let worker = tracker.worker("w1").unwrap();
    assert!(worker.has_badge(TEAM_PLAYER));
    assert_eq!(worker.badges.iter().filter(|b| b.badge.id == TEAM_PLAYER).count(), 1);
}

#[test]
fn test_progress_to_target_completes_once() {
    let (mut tracker, _) = setup();
    let c1 = add_challenge(&mut tracker, 5, 75);

    tracker.update_challenge_progress("w1", &c1, 5).unwrap();

    let challenge = tracker.challenge(&c1).unwrap();
    assert!(challenge.completed);
    assert_eq!(challenge.progress, 5);
    assert_eq!(tracker.worker("w1").unwrap().points, 75);

    assert_eq!(
        tracker.complete_challenge("w1", &c1),
        Err(PerformanceError::ChallengeAlreadyCompleted(c1.clone()))
    );
    assert_eq!(tracker.worker("w1").unwrap().points, 75);
}

#[test]
fn test_complete_challenge_twice() {
    let (mut tracker, _) = setup();

    assert!(tracker.complete_challenge("w1", DAILY_SAFETY_CHECK).is_ok());
    assert!(tracker.complete_challenge("w1", DAILY_SAFETY_CHECK).is_err());
    assert_eq!(tracker.worker("w1").unwrap().points, 50);
    // Completion reward is not the daily check activity itself
    assert_eq!(tracker.worker("w1").unwrap().streak, 0);
}

#[test]
fn test_progress_overshoot_is_clamped() {
    let (mut tracker, _) = setup();
    let c1 = add_challenge(&mut tracker, 5, 20);

    tracker.update_challenge_progress("w1", &c1, 99).unwrap();

    let challenge = tracker.challenge(&c1).unwrap();
    assert_eq!(challenge.progress, challenge.target);
    assert!(challenge.completed);
}

#[test]
fn test_progress_never_decreases() {
    let (mut tracker, _) = setup();
    let c1 = add_challenge(&mut tracker, 10, 20);

    tracker.update_challenge_progress("w1", &c1, 6).unwrap();
    tracker.update_challenge_progress("w1", &c1, 2).unwrap();

    let challenge = tracker.challenge(&c1).unwrap();
    assert_eq!(challenge.progress, 6);
    assert!(!challenge.completed);
}

#[test]
fn test_progress_unknown_challenge_fails() {
    let (mut tracker, _) = setup();
    assert_eq!(
        tracker.update_challenge_progress("w1", "nope", 1),
        Err(PerformanceError::ChallengeNotFound("nope".to_string()))
    );
}

#[test]
fn test_progress_with_unknown_worker_defers_completion() {
    let (mut tracker, _) = setup();
    let c1 = add_challenge(&mut tracker, 2, 40);

    assert!(tracker.update_challenge_progress("ghost", &c1, 2).is_ok());
    assert!(!tracker.challenge(&c1).unwrap().completed);

    tracker.update_challenge_progress("w1", &c1, 2).unwrap();
    assert!(tracker.challenge(&c1).unwrap().completed);
    assert_eq!(tracker.worker("w1").unwrap().points, 40);
}

#[test]
fn test_record_incident() {
    let (mut tracker, _) = setup();
    tracker.update_safety_score("w1", 90.0).unwrap();
    for _ in 0..10 {
        tracker.award_points("w1", DAILY_SAFETY_CHECK, 5).unwrap();
    }
    assert_eq!(tracker.worker("w1").unwrap().streak, 10);
    let points_before = tracker.worker("w1").unwrap().points;

    tracker.record_incident("w1").unwrap();

    let worker = tracker.worker("w1").unwrap();
    assert_eq!(worker.streak, 0);
    assert_eq!(worker.safety_score, 85.0);
    assert_eq!(worker.total_incidents, 1);
    assert_eq!(worker.points, points_before);
}

#[test]
fn test_safety_score_stays_in_range() {
    let (mut tracker, _) = setup();

    tracker.update_safety_score("w1", 250.0).unwrap();
    assert_eq!(tracker.worker("w1").unwrap().safety_score, 100.0);

    tracker.update_safety_score("w1", 3.0).unwrap();
    tracker.record_incident("w1").unwrap();
    tracker.record_incident("w1").unwrap();
    assert_eq!(tracker.worker("w1").unwrap().safety_score, 0.0);

    tracker.update_safety_score("w1", -40.0).unwrap();
    assert_eq!(tracker.worker("w1").unwrap().safety_score, 0.0);
}

#[test]
fn test_level_never_decreases() {
    let (mut tracker, _) = setup();

    tracker.award_points("w1", "x", 1600).unwrap();
    assert_eq!(tracker.worker("w1").unwrap().level, 4);

    tracker.award_points("w1", "penalty", -1200).unwrap();
    let worker = tracker.worker("w1").unwrap();
    assert_eq!(worker.points, 400);
    assert_eq!(worker.level, 4);

    tracker.award_points("w1", "penalty", -5000).unwrap();
    let worker = tracker.worker("w1").unwrap();
    assert_eq!(worker.points, 0);
    assert_eq!(worker.level, 4);
}

#[test]
fn test_unknown_worker_leaves_roster_unchanged() {
    let (mut tracker, _) = setup();
    let before = tracker.workers().to_vec();

    assert_eq!(
        tracker.award_points("missing", "x", 100),
        Err(PerformanceError::WorkerNotFound("missing".to_string()))
    );
    assert!(tracker.record_incident("missing").is_err());
    assert!(tracker.update_safety_score("missing", 50.0).is_err());
    assert!(tracker.complete_challenge("missing", DAILY_SAFETY_CHECK).is_err());

    assert_eq!(tracker.workers(), before.as_slice());
    assert!(!tracker.challenge(DAILY_SAFETY_CHECK).unwrap().completed);
}

#[test]
fn test_duplicate_registration_rejected() {
    let (mut tracker, _) = setup();
    let result = tracker.register_worker(Worker::new("w1", "Someone Else", "Haulage", start()));
    assert_eq!(result, Err(PerformanceError::DuplicateWorker("w1".to_string())));
    assert_eq!(tracker.workers().len(), 1);
}

#[test]
fn test_leaderboard_tracks_point_changes() {
    let (mut tracker, _) = setup();
    tracker
        .register_worker(Worker::new("w2", "Priya Nair", "Safety Team", start()))
        .unwrap();

    tracker.award_points("w2", "x", 10).unwrap();
    assert_eq!(tracker.leaderboard(LeaderboardPeriod::Weekly)[0].worker.id, "w2");

    tracker.award_points("w1", "x", 20).unwrap();
    for period in LeaderboardPeriod::ALL {
        let board = tracker.leaderboard(period);
        assert_eq!(board[0].worker.id, "w1");
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].points, 20);
        assert_eq!(board[1].rank, 2);
    }
}

#[test]
fn test_recommendations() {
    let (mut tracker, _) = setup();
    assert!(tracker.recommended_challenges("nobody").is_empty());

    let picks = tracker.recommended_challenges("w1");
    assert_eq!(picks.len(), 3);
    assert_eq!(picks[0].difficulty, Difficulty::Easy);

    tracker.complete_challenge("w1", DAILY_SAFETY_CHECK).unwrap();
    let picks = tracker.recommended_challenges("w1");
    assert!(picks.iter().all(|c| !c.completed));
    assert_eq!(picks.len(), 2);
}

#[test]
fn test_stats_active_window() {
    let (mut tracker, clock) = setup();
    tracker
        .register_worker(Worker::new("w2", "Priya Nair", "Safety Team", start()))
        .unwrap();
    tracker.complete_challenge("w1", DAILY_SAFETY_CHECK).unwrap();

    let stats = tracker.stats();
    assert_eq!(stats.active_workers, 2);
    assert_eq!(stats.participation_rate, 100.0);
    assert_eq!(stats.challenges_completed, 1);
    assert_eq!(stats.total_points, 50);
    assert_eq!(stats.incidents_reduction, 15.3);

    clock.advance(Duration::days(6));
    tracker.award_points("w2", "x", 5).unwrap();
    clock.advance(Duration::days(2));

    let stats = tracker.stats();
    assert_eq!(stats.active_workers, 1);
    assert_eq!(stats.participation_rate, 50.0);
    assert_eq!(stats.average_safety_score, 100.0);
}

#[test]
fn test_seeded_tracker_stats() {
    let clock = Arc::new(ManualClock::new(start()));
    let mut tracker = PerformanceTracker::new(TrackerSettings::default(), clock);
    tracker.initialize();

    let stats = tracker.stats();
    assert_eq!(stats.total_points, 2840 + 3120 + 1980);
    assert_eq!(stats.active_workers, 3);
    assert!((stats.average_safety_score - (98.0 + 99.0 + 95.0) / 3.0).abs() < 1e-9);
    // Sarah 3, Mike 4, Emma 1
    assert_eq!(stats.total_badges_earned, 8);
    assert_eq!(stats.challenges_completed, 0);
}

#[test]
fn test_badge_earned_date_comes_from_clock() {
    let (mut tracker, clock) = setup();
    clock.advance(Duration::days(3));

    tracker.award_points("w1", "x", 500).unwrap();
    tracker.update_safety_score("w1", 99.0).unwrap();

    let worker = tracker.worker("w1").unwrap();
    let earned = worker.badges.iter().find(|b| b.badge.id == TEAM_PLAYER).unwrap();
    assert_eq!(earned.earned_at, (start() + Duration::days(3)).date_naive());
    assert_eq!(worker.last_activity, start() + Duration::days(3));
}

#[test]
fn test_registration_enforces_roster_invariants() {
    let (mut tracker, _) = setup();

    let mut veteran = Worker::new("w2", "Sam Okafor", "Haulage", start());
    veteran.safety_score = 150.0;
    veteran.points = 2000;
    veteran.level = 1;
    tracker.register_worker(veteran).unwrap();

    let worker = tracker.worker("w2").unwrap();
    assert_eq!(worker.safety_score, 100.0);
    assert_eq!(worker.level, 5);

    let mut unscored = Worker::new("w3", "Ana Ruiz", "Engineering", start());
    unscored.safety_score = f64::NAN;
    unscored.level = 7;
    tracker.register_worker(unscored).unwrap();

    let worker = tracker.worker("w3").unwrap();
    assert_eq!(worker.safety_score, 0.0);
    // A preset level above the formula value is kept
    assert_eq!(worker.level, 7);
}

#[test]
fn test_tracker_exposes_its_clock() {
    let (tracker, clock) = setup();
    assert_eq!(tracker.now(), start());

    clock.advance(Duration::hours(5));
    assert_eq!(tracker.now(), start() + Duration::hours(5));
    assert_eq!(tracker.today(), start().date_naive());
}
