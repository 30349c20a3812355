//! Configuration storage.

pub mod config;

pub use config::{AppConfig, ConfigError, LoggingSettings, TrackerSettings};
