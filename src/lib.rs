// DeepGuard Library - Public API

// Re-export error types
pub mod error;
pub use error::{DeepGuardError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::{MonitorSettings, ThresholdConfig};
pub use crate::core::health_monitor::HealthMonitor;

// Initialize logging
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}
