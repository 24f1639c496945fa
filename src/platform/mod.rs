// Platform-specific code module

pub mod disk;
pub mod net;
pub mod notifier;
pub mod sensors;

// Re-exports para imports limpios
pub use disk::disk_status;
pub use net::probe_tcp;
pub use notifier::DesktopNotifier;
pub use sensors::{native_probe, CPU_METRIC_LABEL};
