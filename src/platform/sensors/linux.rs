//! Linux probe backed by procfs and statvfs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::health_monitor::{DiskStatus, Reading, SensorError, SensorKind, SystemProbe};
use crate::platform::disk::disk_status;

pub struct LinuxProbe {
    proc_root: PathBuf,
}

impl LinuxProbe {
    pub fn new() -> Self {
        Self::with_proc_root("/proc")
    }

    /// Read `loadavg` and `meminfo` from somewhere other than `/proc`.
    pub fn with_proc_root(root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: root.into(),
        }
    }

    fn read_proc(&self, name: &str, sensor: SensorKind) -> Reading<String> {
        let path = self.proc_root.join(name);
        fs::read_to_string(&path).map_err(|e| {
            SensorError::new(sensor, format!("unable to read {}: {}", path.display(), e))
        })
    }
}

impl Default for LinuxProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProbe for LinuxProbe {
    fn name(&self) -> &'static str {
        "linux-procfs"
    }

    fn load(&mut self) -> Reading<f64> {
        let contents = self.read_proc("loadavg", SensorKind::Load)?;
        parse_loadavg(&contents).map_err(|reason| SensorError::new(SensorKind::Load, reason))
    }

    fn ram_percent(&mut self) -> Reading<f64> {
        let contents = self.read_proc("meminfo", SensorKind::Ram)?;
        parse_meminfo(&contents).map_err(|reason| SensorError::new(SensorKind::Ram, reason))
    }

    fn disk(&mut self, path: &Path) -> Reading<DiskStatus> {
        disk_status(path)
    }
}

/// First field of `/proc/loadavg`: the 1-minute load average.
fn parse_loadavg(contents: &str) -> Result<f64, String> {
    let field = contents
        .split_whitespace()
        .next()
        .ok_or_else(|| "loadavg is empty".to_string())?;

    let load: f64 = field
        .parse()
        .map_err(|_| format!("failed to parse load value {:?}", field))?;

    if !load.is_finite() || load < 0.0 {
        return Err(format!("implausible load value {}", load));
    }

    Ok(load)
}

/// `(MemTotal - MemAvailable) / MemTotal * 100` from `/proc/meminfo`.
fn parse_meminfo(contents: &str) -> Result<f64, String> {
    let mut total = None;
    let mut available = None;

    for line in contents.lines() {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("MemTotal:") => total = parts.next().and_then(|v| v.parse::<u64>().ok()),
            Some("MemAvailable:") => available = parts.next().and_then(|v| v.parse::<u64>().ok()),
            _ => {}
        }
    }

    let total = total.ok_or_else(|| "MemTotal missing from meminfo".to_string())?;
    let available = available.ok_or_else(|| "MemAvailable missing from meminfo".to_string())?;

    if total == 0 {
        return Err("MemTotal is zero".to_string());
    }

    Ok(total.saturating_sub(available) as f64 / total as f64 * 100.0)
}
