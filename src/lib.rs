//! MineWatch - Worker Safety Performance Tracking
//!
//! Tracks worker points, levels, badges and safety challenges for mine
//! sites, and derives leaderboards and program statistics from the roster.

pub mod clock;
pub mod performance;
pub mod storage;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use performance::tracker::{PerformanceError, PerformanceTracker};
pub use storage::config::{AppConfig, TrackerSettings};
