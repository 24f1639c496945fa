use std::path::{Path, PathBuf};

use super::cancel::CancelToken;
use super::readings::{DiskStatus, Reading, Snapshot};
use crate::core::config::{MonitorSettings, ServiceTarget};
use crate::platform::net::probe_tcp;

/// Trait for host probes
///
/// One implementation per operating-system family, provided in the platform
/// layer and chosen once at startup. Probes never retry; a failed read is
/// returned as an error and the monitor decides what to do with it.
pub trait SystemProbe: Send {
    /// Short identifier of the implementation (for logs)
    fn name(&self) -> &'static str;

    /// Load average on Unix, CPU utilisation percent on Windows
    fn load(&mut self) -> Reading<f64>;

    /// Physical memory in use, percent
    fn ram_percent(&mut self) -> Reading<f64>;

    /// Capacity of the filesystem containing `path`
    fn disk(&mut self, path: &Path) -> Reading<DiskStatus>;
}

/// The four probes plus their targets.
pub struct SensorSet {
    probe: Box<dyn SystemProbe>,
    disk_path: PathBuf,
    service: ServiceTarget,
    monitor_ram: bool,
}

impl SensorSet {
    pub fn new(
        probe: Box<dyn SystemProbe>,
        disk_path: impl Into<PathBuf>,
        service: ServiceTarget,
        monitor_ram: bool,
    ) -> Self {
        Self {
            probe,
            disk_path: disk_path.into(),
            service,
            monitor_ram,
        }
    }

    pub fn from_settings(probe: Box<dyn SystemProbe>, settings: &MonitorSettings) -> Self {
        Self::new(
            probe,
            settings.disk_path.clone(),
            settings.service.clone(),
            settings.thresholds.ram_threshold_percent.is_some(),
        )
    }

    pub fn probe_name(&self) -> &'static str {
        self.probe.name()
    }

    /// Sample load, RAM, disk and reachability in that order.
    ///
    /// Returns `None` if `cancel` fires before one of the blocking calls.
    pub fn sample(&mut self, cancel: &CancelToken) -> Option<Snapshot> {
        if cancel.is_cancelled() {
            return None;
        }
        let load = self.probe.load();

        let ram_percent = if self.monitor_ram {
            if cancel.is_cancelled() {
                return None;
            }
            Some(self.probe.ram_percent())
        } else {
            None
        };

        if cancel.is_cancelled() {
            return None;
        }
        let disk = self.probe.disk(&self.disk_path);

        if cancel.is_cancelled() {
            return None;
        }
        let reachable = probe_tcp(&self.service);

        for err in [load.as_ref().err(), disk.as_ref().err(), reachable.as_ref().err()]
            .into_iter()
            .flatten()
        {
            log::warn!("{}", err);
        }
        if let Some(Err(err)) = &ram_percent {
            log::warn!("{}", err);
        }

        Some(Snapshot {
            load,
            ram_percent,
            disk,
            reachable,
            disk_label: self.disk_path.display().to_string(),
            service_label: self.service.to_string(),
        })
    }
}
