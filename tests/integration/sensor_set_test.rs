// Integration tests for SensorSet sampling against real sockets and the
// native probe.

use super::support::{closed_service, listening_service, ScriptedProbe};
use deepguard::core::health_monitor::{CancelToken, SensorReading, SensorSet};
use deepguard::platform::native_probe;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[test]
fn test_sample_reports_listening_service_reachable() {
    let (_listener, service) = listening_service();
    let mut sensors = SensorSet::new(
        Box::new(ScriptedProbe::new(vec![Ok(0.5)])),
        std::env::temp_dir(),
        service,
        true,
    );

    let snapshot = sensors.sample(&CancelToken::new()).unwrap();
    assert_eq!(snapshot.load, Ok(0.5));
    assert_eq!(snapshot.ram_percent, Some(Ok(40.0)));
    assert_eq!(snapshot.reachable, Ok(true));
}

#[test]
fn test_sample_reports_closed_port_unreachable() {
    let mut sensors = SensorSet::new(
        Box::new(ScriptedProbe::new(vec![])),
        std::env::temp_dir(),
        closed_service(),
        true,
    );

    let snapshot = sensors.sample(&CancelToken::new()).unwrap();
    assert_eq!(snapshot.reachable, Ok(false));
}

#[test]
fn test_ram_not_sampled_when_disabled() {
    let probe = ScriptedProbe::new(vec![]);
    let calls = Arc::clone(&probe.calls);
    let mut sensors = SensorSet::new(Box::new(probe), std::env::temp_dir(), closed_service(), false);

    let snapshot = sensors.sample(&CancelToken::new()).unwrap();
    assert!(snapshot.ram_percent.is_none());
    // load + disk only
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(snapshot.readings().len(), 3);
}

#[test]
fn test_cancelled_sample_returns_none() {
    let probe = ScriptedProbe::new(vec![]);
    let calls = Arc::clone(&probe.calls);
    let mut sensors = SensorSet::new(Box::new(probe), std::env::temp_dir(), closed_service(), true);

    let cancel = CancelToken::new();
    cancel.cancel();

    assert!(sensors.sample(&cancel).is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_native_probe_reads_temp_dir_disk() {
    let (_listener, service) = listening_service();
    let mut sensors = SensorSet::new(native_probe(), std::env::temp_dir(), service, true);

    let snapshot = sensors.sample(&CancelToken::new()).unwrap();
    let disk = snapshot.disk.as_ref().expect("temp dir should have a filesystem");
    assert!(disk.total_bytes > 0);
    assert!(matches!(
        snapshot.readings().last(),
        Some(SensorReading::Reachable(true))
    ));
}
