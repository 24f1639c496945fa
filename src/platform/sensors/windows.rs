//! Windows probe.
//!
//! Windows has no load average, so the CPU signal is the utilisation
//! percentage reported by `sysinfo`. Memory and disk use the Win32 APIs.

use std::path::Path;
use sysinfo::{CpuRefreshKind, RefreshKind, System};
use windows_sys::Win32::System::SystemInformation::{GlobalMemoryStatusEx, MEMORYSTATUSEX};

use crate::core::health_monitor::{DiskStatus, Reading, SensorError, SensorKind, SystemProbe};
use crate::platform::disk::disk_status;

pub struct WindowsProbe {
    system: System,
    primed: bool,
}

impl WindowsProbe {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_cpu_usage());
        Self {
            system: System::new_with_specifics(refresh_kind),
            primed: false,
        }
    }
}

impl Default for WindowsProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProbe for WindowsProbe {
    fn name(&self) -> &'static str {
        "windows-win32"
    }

    fn load(&mut self) -> Reading<f64> {
        // The first refresh only establishes a baseline.
        if !self.primed {
            self.system.refresh_cpu_usage();
            std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
            self.primed = true;
        }

        self.system.refresh_cpu_usage();
        let usage = self.system.global_cpu_usage() as f64;

        if usage.is_finite() && (0.0..=100.0).contains(&usage) {
            Ok(usage)
        } else {
            Err(SensorError::new(
                SensorKind::Load,
                format!("implausible CPU usage {}", usage),
            ))
        }
    }

    fn ram_percent(&mut self) -> Reading<f64> {
        let mut status: MEMORYSTATUSEX = unsafe { std::mem::zeroed() };
        status.dwLength = std::mem::size_of::<MEMORYSTATUSEX>() as u32;

        let ok = unsafe { GlobalMemoryStatusEx(&mut status) };
        if ok == 0 {
            return Err(SensorError::new(
                SensorKind::Ram,
                format!("GlobalMemoryStatusEx failed: {}", std::io::Error::last_os_error()),
            ));
        }

        if status.ullTotalPhys == 0 {
            return Err(SensorError::new(SensorKind::Ram, "total memory reported as zero"));
        }

        let used = status.ullTotalPhys.saturating_sub(status.ullAvailPhys);
        Ok(used as f64 / status.ullTotalPhys as f64 * 100.0)
    }

    fn disk(&mut self, path: &Path) -> Reading<DiskStatus> {
        disk_status(path)
    }
}
