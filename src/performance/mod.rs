//! Safety performance tracking
//!
//! Provides worker points and levels, badges, challenges, leaderboards,
//! aggregate statistics and export.

pub mod badges;
pub mod challenges;
pub mod export;
pub mod leaderboard;
pub mod seed;
pub mod stats;
pub mod tracker;
pub mod types;

// Re-export commonly used types
pub use challenges::NewChallenge;
pub use export::LeaderboardExporter;
pub use tracker::{PerformanceError, PerformanceTracker};
pub use types::*;
