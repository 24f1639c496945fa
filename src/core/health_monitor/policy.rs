//! Threshold policy.
//!
//! Pure function from a [`Snapshot`] and the configured thresholds to a
//! [`Verdict`]. Unavailable signals are skipped: they never raise an alert by
//! themselves, but a cycle with missing signals is reported as degraded
//! rather than healthy.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::readings::{SensorKind, Snapshot};
use crate::core::config::ThresholdConfig;

/// Load above `cpu_threshold * CRITICAL_LOAD_FACTOR` is critical.
pub const CRITICAL_LOAD_FACTOR: f64 = 1.5;
/// Disk usage above this percentage is critical.
pub const CRITICAL_DISK_PERCENT: f64 = 95.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        };
        f.write_str(label)
    }
}

/// A single breached condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Breach {
    Load { value: f64, threshold: f64 },
    Ram { percent: f64, threshold: f64 },
    Disk { percent_used: f64, threshold: f64 },
    Unreachable { target: String },
}

impl fmt::Display for Breach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Breach::Load { value, threshold } => {
                write!(f, "CPU load {:.2} exceeds {:.2}", value, threshold)
            }
            Breach::Ram { percent, threshold } => {
                write!(f, "RAM usage {:.1}% exceeds {:.1}%", percent, threshold)
            }
            Breach::Disk {
                percent_used,
                threshold,
            } => write!(f, "disk usage {:.1}% exceeds {:.1}%", percent_used, threshold),
            Breach::Unreachable { target } => write!(f, "service {} unreachable", target),
        }
    }
}

/// Created when the policy triggers; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEvent {
    pub severity: Severity,
    pub message: String,
    pub breaches: Vec<Breach>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Healthy,
    Degraded { unavailable: Vec<SensorKind> },
    Alert(AlertEvent),
}

pub fn evaluate(snapshot: &Snapshot, config: &ThresholdConfig) -> Verdict {
    let breaches = find_breaches(snapshot, config);
    let unavailable = snapshot.unavailable();

    if breaches.is_empty() {
        return if unavailable.is_empty() {
            Verdict::Healthy
        } else {
            Verdict::Degraded { unavailable }
        };
    }

    let severity = classify(snapshot, config);
    let message = compose_message(snapshot, severity, &breaches, &unavailable);

    Verdict::Alert(AlertEvent {
        severity,
        message,
        breaches,
    })
}

fn find_breaches(snapshot: &Snapshot, config: &ThresholdConfig) -> Vec<Breach> {
    let mut breaches = Vec::new();

    if let Ok(load) = snapshot.load {
        if load > config.cpu_threshold {
            breaches.push(Breach::Load {
                value: load,
                threshold: config.cpu_threshold,
            });
        }
    }

    if let (Some(Ok(ram)), Some(threshold)) = (&snapshot.ram_percent, config.ram_threshold_percent)
    {
        if *ram > threshold {
            breaches.push(Breach::Ram {
                percent: *ram,
                threshold,
            });
        }
    }

    if let Ok(disk) = &snapshot.disk {
        if disk.percent_used > config.disk_alert_percent {
            breaches.push(Breach::Disk {
                percent_used: disk.percent_used,
                threshold: config.disk_alert_percent,
            });
        }
    }

    if let Ok(false) = snapshot.reachable {
        breaches.push(Breach::Unreachable {
            target: snapshot.service_label.clone(),
        });
    }

    breaches
}

fn classify(snapshot: &Snapshot, config: &ThresholdConfig) -> Severity {
    let load_critical = snapshot
        .load
        .as_ref()
        .is_ok_and(|load| *load > config.cpu_threshold * CRITICAL_LOAD_FACTOR);
    let disk_critical = snapshot
        .disk
        .as_ref()
        .is_ok_and(|disk| disk.percent_used > CRITICAL_DISK_PERCENT);

    if load_critical || disk_critical {
        Severity::Critical
    } else {
        Severity::Warning
    }
}

fn compose_message(
    snapshot: &Snapshot,
    severity: Severity,
    breaches: &[Breach],
    unavailable: &[SensorKind],
) -> String {
    let reasons: Vec<String> = breaches.iter().map(ToString::to_string).collect();
    let mut message = format!(
        "Alert [{}]: {} | {}",
        severity,
        reasons.join("; "),
        describe_readings(snapshot)
    );

    if !unavailable.is_empty() {
        let names: Vec<String> = unavailable.iter().map(ToString::to_string).collect();
        message.push_str(&format!(" | unavailable: {}", names.join(", ")));
    }

    message
}

/// Compact one-line rendering of every sampled value.
pub fn describe_readings(snapshot: &Snapshot) -> String {
    let mut parts = Vec::with_capacity(4);

    parts.push(match &snapshot.load {
        Ok(load) => format!("load={:.2}", load),
        Err(_) => "load=n/a".to_string(),
    });

    if let Some(ram) = &snapshot.ram_percent {
        parts.push(match ram {
            Ok(percent) => format!("ram={:.1}%", percent),
            Err(_) => "ram=n/a".to_string(),
        });
    }

    parts.push(match &snapshot.disk {
        Ok(disk) => format!("disk[{}]={:.1}%", snapshot.disk_label, disk.percent_used),
        Err(_) => format!("disk[{}]=n/a", snapshot.disk_label),
    });

    parts.push(match &snapshot.reachable {
        Ok(true) => format!("service[{}]=up", snapshot.service_label),
        Ok(false) => format!("service[{}]=down", snapshot.service_label),
        Err(_) => format!("service[{}]=n/a", snapshot.service_label),
    });

    parts.join(" ")
}
