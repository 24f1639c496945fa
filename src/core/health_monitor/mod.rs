//! Host health monitoring core.
//!
//! Sensors are sampled through [`SensorSet`], judged by the threshold
//! [`policy`], and alerts flow to the [`AlertSink`](crate::core::AlertSink)
//! and a [`Notifier`].

mod cancel;
mod notifier;
pub mod policy;
mod readings;
mod runtime;
mod sensors;

pub use cancel::CancelToken;
pub use notifier::{Notifier, NullNotifier};
pub use policy::{evaluate, AlertEvent, Breach, Severity, Verdict};
pub use readings::{DiskStatus, Reading, SensorError, SensorKind, SensorReading, Snapshot};
pub use runtime::{CycleReport, CycleStatus, HealthMonitor, MonitorState, ALERT_TITLE};
pub use sensors::{SensorSet, SystemProbe};
