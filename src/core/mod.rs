// Core business logic module

pub mod alert_sink;
pub mod config;
pub mod health_monitor;
pub mod obfuscator;
pub mod secret;

// Re-export commonly used items
pub use alert_sink::{decode_log, AlertSink};
pub use config::{MonitorSettings, ServiceTarget, ThresholdConfig};
pub use obfuscator::Obfuscator;
pub use secret::{SecretKey, KEY_ENV_VAR};
