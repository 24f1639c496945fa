use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The four probes sampled on every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    Load,
    Ram,
    Disk,
    Reachability,
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SensorKind::Load => "load",
            SensorKind::Ram => "ram",
            SensorKind::Disk => "disk",
            SensorKind::Reachability => "reachability",
        };
        f.write_str(name)
    }
}

/// Explicit failure marker for a probe.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{sensor} sensor unavailable: {reason}")]
pub struct SensorError {
    pub sensor: SensorKind,
    pub reason: String,
}

impl SensorError {
    pub fn new<S: Into<String>>(sensor: SensorKind, reason: S) -> Self {
        Self {
            sensor,
            reason: reason.into(),
        }
    }
}

/// A probe result: a valid value or an explicit failure.
pub type Reading<T> = std::result::Result<T, SensorError>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiskStatus {
    pub total_bytes: u64,
    pub free_bytes: u64,
    pub percent_used: f64,
}

impl DiskStatus {
    /// `percent_used` is 0 when the filesystem reports no capacity.
    pub fn from_bytes(total_bytes: u64, free_bytes: u64) -> Self {
        let percent_used = if total_bytes > 0 {
            let used = total_bytes.saturating_sub(free_bytes);
            used as f64 / total_bytes as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_bytes,
            free_bytes,
            percent_used,
        }
    }
}

/// One typed value per probe, or the reason it could not be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "sensor", content = "value", rename_all = "snake_case")]
pub enum SensorReading {
    Load(f64),
    RamPercent(f64),
    DiskStatus(DiskStatus),
    Reachable(bool),
    Unavailable(SensorError),
}

/// Everything sampled during one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub load: Reading<f64>,
    /// `None` when RAM monitoring is disabled.
    pub ram_percent: Option<Reading<f64>>,
    pub disk: Reading<DiskStatus>,
    pub reachable: Reading<bool>,
    pub disk_label: String,
    pub service_label: String,
}

impl Snapshot {
    pub fn readings(&self) -> Vec<SensorReading> {
        let mut readings = vec![to_reading(&self.load, |v| SensorReading::Load(*v))];

        if let Some(ram) = &self.ram_percent {
            readings.push(to_reading(ram, |v| SensorReading::RamPercent(*v)));
        }

        readings.push(to_reading(&self.disk, |v| SensorReading::DiskStatus(*v)));
        readings.push(to_reading(&self.reachable, |v| SensorReading::Reachable(*v)));
        readings
    }

    /// Sensors that failed this cycle.
    pub fn unavailable(&self) -> Vec<SensorKind> {
        self.readings()
            .into_iter()
            .filter_map(|reading| match reading {
                SensorReading::Unavailable(err) => Some(err.sensor),
                _ => None,
            })
            .collect()
    }
}

fn to_reading<T>(reading: &Reading<T>, wrap: impl Fn(&T) -> SensorReading) -> SensorReading {
    match reading {
        Ok(value) => wrap(value),
        Err(err) => SensorReading::Unavailable(err.clone()),
    }
}
