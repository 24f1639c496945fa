// Integration tests for the monitoring loop: policy, alert log and notifier
// wiring, sensor failures and cancellation.

use super::support::{
    closed_service, listening_service, load_failure, settings, test_key, RecordingNotifier,
    ScriptedProbe,
};
use deepguard::core::health_monitor::{
    CancelToken, CycleStatus, DiskStatus, HealthMonitor, MonitorState, SensorSet, Severity,
};
use deepguard::core::{decode_log, AlertSink, MonitorSettings};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn build_monitor(
    probe: ScriptedProbe,
    settings: &MonitorSettings,
    notifier: Arc<RecordingNotifier>,
) -> HealthMonitor {
    let sensors = SensorSet::from_settings(Box::new(probe), settings);
    let sink = Arc::new(AlertSink::new(settings.log_path.clone(), test_key()));
    HealthMonitor::new(
        settings.thresholds.clone(),
        sensors,
        sink,
        notifier,
        CancelToken::new(),
    )
}

#[test]
fn test_moderate_load_logs_warning() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("alerts.log");
    let (_listener, service) = listening_service();
    let settings = settings(&log_path, service);
    let notifier = Arc::new(RecordingNotifier::accepting());

    let mut monitor = build_monitor(
        ScriptedProbe::new(vec![Ok(0.80)]),
        &settings,
        Arc::clone(&notifier),
    );
    let report = monitor.run_cycle();

    assert_eq!(report.status, CycleStatus::Alert);
    assert_eq!(report.severity, Some(Severity::Warning));
    assert!(report.logged);
    assert!(report.notified);
    assert_eq!(monitor.state(), MonitorState::Idle);

    let records = decode_log(&log_path, &test_key()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0], report.message);
    assert!(records[0].contains("CPU load 0.80 exceeds 0.75"));

    let sent = notifier.sent.lock();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1, Severity::Warning);
}

#[test]
fn test_heavy_load_is_critical() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("alerts.log");
    let (_listener, service) = listening_service();
    let settings = settings(&log_path, service);

    let mut monitor = build_monitor(
        ScriptedProbe::new(vec![Ok(1.20)]),
        &settings,
        Arc::new(RecordingNotifier::accepting()),
    );
    let report = monitor.run_cycle();

    assert_eq!(report.severity, Some(Severity::Critical));
}

#[test]
fn test_healthy_cycle_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("alerts.log");
    let (_listener, service) = listening_service();
    let settings = settings(&log_path, service);
    let notifier = Arc::new(RecordingNotifier::accepting());

    let mut monitor = build_monitor(
        ScriptedProbe::new(vec![Ok(0.20)]),
        &settings,
        Arc::clone(&notifier),
    );
    let report = monitor.run_cycle();

    assert_eq!(report.status, CycleStatus::Healthy);
    assert!(!log_path.exists());
    assert!(notifier.sent.lock().is_empty());
}

#[test]
fn test_unreachable_service_alerts() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("alerts.log");
    let settings = settings(&log_path, closed_service());

    let mut monitor = build_monitor(
        ScriptedProbe::new(vec![Ok(0.20)]),
        &settings,
        Arc::new(RecordingNotifier::accepting()),
    );
    let report = monitor.run_cycle();

    assert_eq!(report.status, CycleStatus::Alert);
    assert_eq!(report.severity, Some(Severity::Warning));
    assert!(report.message.contains("unreachable"));
}

#[test]
fn test_full_disk_is_critical() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("alerts.log");
    let (_listener, service) = listening_service();
    let settings = settings(&log_path, service);

    let probe = ScriptedProbe::new(vec![Ok(0.20)]).with_disk(DiskStatus::from_bytes(1000, 20));
    let mut monitor = build_monitor(probe, &settings, Arc::new(RecordingNotifier::accepting()));
    let report = monitor.run_cycle();

    assert_eq!(report.severity, Some(Severity::Critical));
}

#[test]
fn test_sensor_failure_is_degraded_and_recovers() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("alerts.log");
    let (_listener, service) = listening_service();
    let settings = settings(&log_path, service);

    let mut monitor = build_monitor(
        ScriptedProbe::new(vec![load_failure(), Ok(0.20)]),
        &settings,
        Arc::new(RecordingNotifier::accepting()),
    );

    let first = monitor.run_cycle();
    assert_eq!(first.status, CycleStatus::Degraded);
    assert!(!log_path.exists());

    let second = monitor.run_cycle();
    assert_eq!(second.status, CycleStatus::Healthy);
}

#[test]
fn test_notifier_failure_does_not_skip_log() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("alerts.log");
    let (_listener, service) = listening_service();
    let settings = settings(&log_path, service);

    let mut monitor = build_monitor(
        ScriptedProbe::new(vec![Ok(0.90)]),
        &settings,
        Arc::new(RecordingNotifier::failing()),
    );
    let report = monitor.run_cycle();

    assert!(report.logged);
    assert!(!report.notified);
    assert_eq!(decode_log(&log_path, &test_key()).unwrap().len(), 1);
}

#[test]
fn test_log_failure_does_not_skip_notifier() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("missing").join("alerts.log");
    let (_listener, service) = listening_service();
    let settings = settings(&log_path, service);
    let notifier = Arc::new(RecordingNotifier::accepting());

    let mut monitor = build_monitor(
        ScriptedProbe::new(vec![Ok(0.90)]),
        &settings,
        Arc::clone(&notifier),
    );
    let report = monitor.run_cycle();

    assert_eq!(report.status, CycleStatus::Alert);
    assert!(!report.logged);
    assert!(report.notified);
    assert_eq!(notifier.sent.lock().len(), 1);
}

#[test]
fn test_run_survives_failures_until_cancelled() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("alerts.log");
    let (_listener, service) = listening_service();
    let settings = settings(&log_path, service);

    let probe = ScriptedProbe::new(vec![load_failure(), load_failure(), Ok(0.90), Ok(0.10)]);
    let mut monitor = build_monitor(probe, &settings, Arc::new(RecordingNotifier::accepting()));
    let cancel = monitor.cancel_token();

    let mut statuses = Vec::new();
    let final_state = monitor.run(|report| {
        statuses.push(report.status);
        if statuses.len() == 4 {
            cancel.cancel();
        }
    });

    assert_eq!(final_state, MonitorState::Stopped);
    assert_eq!(monitor.state(), MonitorState::Stopped);
    assert_eq!(
        statuses,
        vec![
            CycleStatus::Degraded,
            CycleStatus::Degraded,
            CycleStatus::Alert,
            CycleStatus::Healthy
        ]
    );
    assert_eq!(decode_log(&log_path, &test_key()).unwrap().len(), 1);
}

#[test]
fn test_cancelled_before_start_samples_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("alerts.log");
    let settings = settings(&log_path, closed_service());

    let probe = ScriptedProbe::new(vec![Ok(0.90)]);
    let calls = Arc::clone(&probe.calls);
    let mut monitor = build_monitor(probe, &settings, Arc::new(RecordingNotifier::accepting()));

    monitor.cancel_token().cancel();
    let mut cycles = 0;
    let final_state = monitor.run(|_| cycles += 1);

    assert_eq!(final_state, MonitorState::Stopped);
    assert_eq!(cycles, 0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!log_path.exists());
}

#[test]
fn test_huge_interval_stops_cleanly_after_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("alerts.log");
    let (_listener, service) = listening_service();
    let mut settings = settings(&log_path, service);
    settings.thresholds.check_interval = Duration::from_secs(u64::MAX);
    assert!(settings.validate().is_ok());

    let probe = ScriptedProbe::new(vec![Ok(0.10)]);
    let mut monitor = build_monitor(probe, &settings, Arc::new(RecordingNotifier::accepting()));
    let cancel = monitor.cancel_token();

    let mut cycles = 0;
    let final_state = monitor.run(|_| {
        cycles += 1;
        cancel.cancel();
    });

    assert_eq!(final_state, MonitorState::Stopped);
    assert_eq!(cycles, 1);
}

#[test]
fn test_alert_records_keep_detection_order() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("alerts.log");
    let (_listener, service) = listening_service();
    let settings = settings(&log_path, service);

    let mut monitor = build_monitor(
        ScriptedProbe::new(vec![Ok(0.80), Ok(1.50), Ok(0.95)]),
        &settings,
        Arc::new(RecordingNotifier::accepting()),
    );

    let messages: Vec<String> = (0..3).map(|_| monitor.run_cycle().message).collect();
    assert_eq!(decode_log(&log_path, &test_key()).unwrap(), messages);
}
