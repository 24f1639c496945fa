//! Monitoring configuration.
//!
//! Values arrive either from command-line flags or from the interactive
//! prompts; both paths end in [`MonitorSettings::validate`], so the monitor
//! itself can assume the invariants hold.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{DeepGuardError, Result};

/// Compared against the 1-minute load average.
#[cfg(not(windows))]
pub const DEFAULT_CPU_THRESHOLD: f64 = 0.75;
/// Compared against CPU utilisation percent.
#[cfg(windows)]
pub const DEFAULT_CPU_THRESHOLD: f64 = 80.0;
pub const DEFAULT_RAM_THRESHOLD: f64 = 80.0;
pub const DEFAULT_DISK_ALERT_PERCENT: f64 = 90.0;
pub const DEFAULT_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_LOG_FILE: &str = "alerts.log";
pub const DEFAULT_SERVICE_HOST: &str = "127.0.0.1";
pub const DEFAULT_SERVICE_PORT: u16 = 3306;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Thresholds evaluated on every cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Load average on Unix, CPU utilisation percent on Windows.
    pub cpu_threshold: f64,
    /// `None` disables RAM monitoring.
    pub ram_threshold_percent: Option<f64>,
    pub disk_alert_percent: f64,
    pub check_interval: Duration,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            cpu_threshold: DEFAULT_CPU_THRESHOLD,
            ram_threshold_percent: Some(DEFAULT_RAM_THRESHOLD),
            disk_alert_percent: DEFAULT_DISK_ALERT_PERCENT,
            check_interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
        }
    }
}

impl ThresholdConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.cpu_threshold.is_finite() || self.cpu_threshold < 0.0 {
            return Err(DeepGuardError::config(format!(
                "CPU threshold must be a non-negative number, got {}",
                self.cpu_threshold
            )));
        }

        if let Some(ram) = self.ram_threshold_percent {
            if !(0.0..=100.0).contains(&ram) {
                return Err(DeepGuardError::config(format!(
                    "RAM threshold must be between 0 and 100, got {}",
                    ram
                )));
            }
        }

        if !(0.0..=100.0).contains(&self.disk_alert_percent) {
            return Err(DeepGuardError::config(format!(
                "Disk alert threshold must be between 0 and 100, got {}",
                self.disk_alert_percent
            )));
        }

        if self.check_interval.is_zero() {
            return Err(DeepGuardError::config("Check interval must be greater than zero"));
        }

        Ok(())
    }
}

/// Dependent service probed for TCP reachability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTarget {
    pub host: String,
    pub port: u16,
    pub connect_timeout: Duration,
}

impl Default for ServiceTarget {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVICE_HOST.to_string(),
            port: DEFAULT_SERVICE_PORT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl std::fmt::Display for ServiceTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Everything the monitor needs apart from the secret key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSettings {
    pub thresholds: ThresholdConfig,
    pub log_path: PathBuf,
    pub disk_path: PathBuf,
    pub service: ServiceTarget,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            thresholds: ThresholdConfig::default(),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            disk_path: default_disk_path(),
            service: ServiceTarget::default(),
        }
    }
}

impl MonitorSettings {
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;

        if self.log_path.as_os_str().is_empty() {
            return Err(DeepGuardError::config("Log file name must not be empty"));
        }

        if self.service.host.trim().is_empty() {
            return Err(DeepGuardError::config("Service host must not be empty"));
        }

        if self.service.connect_timeout.is_zero() {
            return Err(DeepGuardError::config("Connect timeout must be greater than zero"));
        }

        Ok(())
    }
}

/// Root of the system drive.
pub fn default_disk_path() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from("C:\\")
    } else {
        PathBuf::from("/")
    }
}
