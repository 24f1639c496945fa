//! Probe built on `sysinfo`, for Unix systems without procfs.

use std::path::Path;
use sysinfo::{MemoryRefreshKind, RefreshKind, System};

use crate::core::health_monitor::{DiskStatus, Reading, SensorError, SensorKind, SystemProbe};
use crate::platform::disk::disk_status;

pub struct PortableProbe {
    system: System,
}

impl PortableProbe {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram());
        Self {
            system: System::new_with_specifics(refresh_kind),
        }
    }
}

impl Default for PortableProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProbe for PortableProbe {
    fn name(&self) -> &'static str {
        "sysinfo"
    }

    fn load(&mut self) -> Reading<f64> {
        let load = System::load_average().one;
        if load.is_finite() && load >= 0.0 {
            Ok(load)
        } else {
            Err(SensorError::new(
                SensorKind::Load,
                format!("implausible load value {}", load),
            ))
        }
    }

    fn ram_percent(&mut self) -> Reading<f64> {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        if total == 0 {
            return Err(SensorError::new(SensorKind::Ram, "total memory reported as zero"));
        }

        let available = self.system.available_memory();
        Ok(total.saturating_sub(available) as f64 / total as f64 * 100.0)
    }

    fn disk(&mut self, path: &Path) -> Reading<DiskStatus> {
        disk_status(path)
    }
}
