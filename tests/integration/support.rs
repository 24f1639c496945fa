// Test doubles shared by the integration tests

use deepguard::core::config::{MonitorSettings, ServiceTarget, ThresholdConfig};
use deepguard::core::health_monitor::{
    DiskStatus, Notifier, Reading, SensorError, SensorKind, Severity, SystemProbe,
};
use deepguard::core::SecretKey;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::net::TcpListener;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Probe that replays scripted load readings and fixed RAM/disk values.
pub struct ScriptedProbe {
    loads: VecDeque<Reading<f64>>,
    ram: f64,
    disk: DiskStatus,
    pub calls: Arc<AtomicUsize>,
}

impl ScriptedProbe {
    pub fn new(loads: Vec<Reading<f64>>) -> Self {
        Self {
            loads: loads.into(),
            ram: 40.0,
            disk: DiskStatus::from_bytes(100, 50),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_disk(mut self, disk: DiskStatus) -> Self {
        self.disk = disk;
        self
    }
}

impl SystemProbe for ScriptedProbe {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn load(&mut self) -> Reading<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.loads.pop_front().unwrap_or(Ok(0.10))
    }

    fn ram_percent(&mut self) -> Reading<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.ram)
    }

    fn disk(&mut self, _path: &Path) -> Reading<DiskStatus> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.disk)
    }
}

pub fn load_failure() -> Reading<f64> {
    Err(SensorError::new(SensorKind::Load, "unable to read /proc/loadavg"))
}

/// Remembers every notification it was asked to show.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, Severity)>>,
    pub accept: bool,
}

impl RecordingNotifier {
    pub fn accepting() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            accept: true,
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, _title: &str, message: &str, severity: Severity) -> bool {
        self.sent.lock().push((message.to_string(), severity));
        self.accept
    }
}

// High-bit key bytes never XOR an ASCII byte into '\n'.
pub fn test_key() -> SecretKey {
    SecretKey::new(vec![0xA5, 0xC3, 0x9F, 0xB1]).unwrap()
}

/// A local listener standing in for the dependent service.
pub fn listening_service() -> (TcpListener, ServiceTarget) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let target = ServiceTarget {
        host: "127.0.0.1".to_string(),
        port,
        connect_timeout: Duration::from_millis(500),
    };
    (listener, target)
}

pub fn closed_service() -> ServiceTarget {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    ServiceTarget {
        host: "127.0.0.1".to_string(),
        port,
        connect_timeout: Duration::from_millis(500),
    }
}

pub fn settings(log_path: &Path, service: ServiceTarget) -> MonitorSettings {
    MonitorSettings {
        thresholds: ThresholdConfig {
            cpu_threshold: 0.75,
            ram_threshold_percent: Some(80.0),
            disk_alert_percent: 90.0,
            check_interval: Duration::from_millis(10),
        },
        log_path: log_path.to_path_buf(),
        disk_path: std::env::temp_dir(),
        service,
    }
}
