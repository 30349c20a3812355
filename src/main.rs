//! MineWatch - Worker Safety Performance Tracking
//!
//! Prints a leaderboard and program statistics for the configured roster.

use std::fmt::Write as _;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use minewatch::performance::export::{parse_period, LeaderboardExporter};
use minewatch::performance::LeaderboardPeriod;
use minewatch::storage::config::load_config;
use minewatch::PerformanceTracker;

#[derive(Parser, Debug)]
#[command(name = "minewatch", version, about = "Worker safety performance tracker")]
struct Cli {
    /// Leaderboard period: daily, weekly, monthly or all_time
    #[arg(default_value = "monthly", value_parser = parse_period)]
    period: LeaderboardPeriod,

    /// Print the roster snapshot as JSON instead of the report
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config().context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting MineWatch v{}", env!("CARGO_PKG_VERSION"));

    let mut tracker = PerformanceTracker::with_system_clock(config.tracker.clone());
    tracker.initialize();

    let exporter = LeaderboardExporter::new(&tracker, tracker.now());
    if cli.json {
        println!("{}", exporter.export_roster_json()?);
        return Ok(());
    }

    println!("Leaderboard ({}):", cli.period.as_str());
    print!("{}", exporter.export_leaderboard_csv(cli.period));
    println!();
    print!("{}", render_levels(&tracker, cli.period));
    println!();
    print!("{}", render_stats(&tracker));
    println!();
    print!("{}", render_badges(&tracker));
    println!();
    print!("{}", render_challenges(&tracker));

    Ok(())
}

/// Level progress for everyone on the board, using the configured step.
fn render_levels(tracker: &PerformanceTracker, period: LeaderboardPeriod) -> String {
    let step = tracker.settings().points_per_level;
    let mut out = format!("Level progress ({step} points per level):\n");
    for entry in tracker.leaderboard(period) {
        let worker = &entry.worker;
        let _ = writeln!(
            out,
            "  {:<20} level {:>2}  {:>5.1}% to next",
            worker.name,
            worker.level,
            worker.progress_to_next_level(step) * 100.0
        );
    }
    out
}

fn render_stats(tracker: &PerformanceTracker) -> String {
    let stats = tracker.stats();
    let mut out = String::new();
    let _ = writeln!(out, "Total points:          {}", stats.total_points);
    let _ = writeln!(
        out,
        "Active workers:        {} ({:.1}% participation)",
        stats.active_workers, stats.participation_rate
    );
    let _ = writeln!(out, "Average safety score:  {:.1}", stats.average_safety_score);
    let _ = writeln!(out, "Badges earned:         {}", stats.total_badges_earned);
    let _ = writeln!(out, "Challenges completed:  {}", stats.challenges_completed);
    let _ = writeln!(out, "Incidents reduction:   {:.1}%", stats.incidents_reduction);
    out
}

fn render_badges(tracker: &PerformanceTracker) -> String {
    let mut out = String::from("Badges:\n");
    for badge in tracker.badges() {
        let holders = tracker
            .workers()
            .iter()
            .filter(|w| w.has_badge(&badge.id))
            .count();
        let _ = writeln!(
            out,
            "  {:<24} {:<10} {:<11} held by {}",
            badge.name,
            badge.rarity.as_str(),
            badge.category.as_str(),
            holders
        );
    }
    out
}

fn render_challenges(tracker: &PerformanceTracker) -> String {
    let mut out = String::from("Open challenges:\n");
    for challenge in tracker.challenges().iter().filter(|c| !c.completed) {
        let _ = writeln!(
            out,
            "  {:<28} {:<8} {:>5.1}%  due {}",
            challenge.title,
            challenge.challenge_type.as_str(),
            challenge.percent_complete(),
            challenge.deadline
        );
    }
    out
}
