//! Platform probe strategies.
//!
//! Exactly one [`SystemProbe`] is chosen at startup by [`native_probe`]; the
//! monitor never branches on the operating system itself.

#[cfg(target_os = "linux")]
mod linux;
mod portable;
#[cfg(windows)]
mod windows;

#[cfg(target_os = "linux")]
pub use linux::LinuxProbe;
pub use portable::PortableProbe;
#[cfg(windows)]
pub use windows::WindowsProbe;

use crate::core::health_monitor::SystemProbe;

/// What the CPU threshold is compared against on this platform.
#[cfg(windows)]
pub const CPU_METRIC_LABEL: &str = "CPU usage %";
#[cfg(not(windows))]
pub const CPU_METRIC_LABEL: &str = "CPU load average";

/// Probe implementation for the running operating system.
pub fn native_probe() -> Box<dyn SystemProbe> {
    #[cfg(target_os = "linux")]
    {
        Box::new(LinuxProbe::new())
    }

    #[cfg(windows)]
    {
        Box::new(WindowsProbe::new())
    }

    #[cfg(not(any(target_os = "linux", windows)))]
    {
        Box::new(PortableProbe::new())
    }
}
