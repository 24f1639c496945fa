//! The monitoring loop.
//!
//! One long-lived loop samples the sensors, applies the threshold policy and
//! hands alerts to the log and the notifier. Cycles never overlap; the
//! interval is measured from the end of a cycle. The only way out is the
//! cancel token, which leaves the monitor in [`MonitorState::Stopped`].

use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::Arc;

use super::cancel::CancelToken;
use super::notifier::Notifier;
use super::policy::{self, Severity, Verdict};
use super::readings::{SensorKind, SensorReading};
use super::sensors::SensorSet;
use crate::core::alert_sink::AlertSink;
use crate::core::config::ThresholdConfig;

pub const ALERT_TITLE: &str = "DeepGuard Alert";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MonitorState {
    Idle,
    Sampling,
    Evaluating,
    Alerting,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleStatus {
    Healthy,
    Degraded,
    Alert,
    Cancelled,
}

/// What happened during one cycle. Printed by the command layer.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub timestamp: DateTime<Local>,
    pub status: CycleStatus,
    pub severity: Option<Severity>,
    pub message: String,
    pub readings: Vec<SensorReading>,
    pub unavailable: Vec<SensorKind>,
    pub logged: bool,
    pub notified: bool,
}

impl CycleReport {
    fn new(status: CycleStatus, message: String) -> Self {
        Self {
            timestamp: Local::now(),
            status,
            severity: None,
            message,
            readings: Vec::new(),
            unavailable: Vec::new(),
            logged: false,
            notified: false,
        }
    }
}

pub struct HealthMonitor {
    thresholds: ThresholdConfig,
    sensors: SensorSet,
    sink: Arc<AlertSink>,
    notifier: Arc<dyn Notifier>,
    cancel: CancelToken,
    state: MonitorState,
}

impl HealthMonitor {
    pub fn new(
        thresholds: ThresholdConfig,
        sensors: SensorSet,
        sink: Arc<AlertSink>,
        notifier: Arc<dyn Notifier>,
        cancel: CancelToken,
    ) -> Self {
        Self {
            thresholds,
            sensors,
            sink,
            notifier,
            cancel,
            state: MonitorState::Idle,
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run cycles until cancelled. `on_cycle` sees every completed cycle.
    pub fn run<F>(&mut self, mut on_cycle: F) -> MonitorState
    where
        F: FnMut(&CycleReport),
    {
        log::info!(
            "Monitoring started (probe: {}, interval: {:?})",
            self.sensors.probe_name(),
            self.thresholds.check_interval
        );

        while !self.cancel.is_cancelled() {
            let report = self.run_cycle();
            if report.status != CycleStatus::Cancelled {
                on_cycle(&report);
            }

            if self.cancel.wait_timeout(self.thresholds.check_interval) {
                break;
            }
        }

        self.state = MonitorState::Stopped;
        log::info!("Monitoring stopped");
        self.state
    }

    /// Sample, evaluate and, if needed, alert once.
    pub fn run_cycle(&mut self) -> CycleReport {
        if self.state == MonitorState::Stopped {
            return CycleReport::new(CycleStatus::Cancelled, "monitor stopped".to_string());
        }

        self.state = MonitorState::Sampling;
        let snapshot = match self.sensors.sample(&self.cancel) {
            Some(snapshot) => snapshot,
            None => {
                self.state = MonitorState::Idle;
                return CycleReport::new(CycleStatus::Cancelled, "cycle cancelled".to_string());
            }
        };

        self.state = MonitorState::Evaluating;
        let verdict = policy::evaluate(&snapshot, &self.thresholds);
        let summary = policy::describe_readings(&snapshot);

        let mut report = match verdict {
            Verdict::Healthy => CycleReport::new(CycleStatus::Healthy, summary),
            Verdict::Degraded { unavailable } => {
                let mut report = CycleReport::new(CycleStatus::Degraded, summary);
                report.unavailable = unavailable;
                report
            }
            Verdict::Alert(event) => {
                self.state = MonitorState::Alerting;

                let logged = self.sink.record(&event.message).is_ok();
                let notified = self
                    .notifier
                    .notify(ALERT_TITLE, &event.message, event.severity);
                if !notified {
                    log::debug!("Notification not dispatched");
                }

                let mut report = CycleReport::new(CycleStatus::Alert, event.message);
                report.severity = Some(event.severity);
                report.unavailable = snapshot.unavailable();
                report.logged = logged;
                report.notified = notified;
                report
            }
        };

        report.readings = snapshot.readings();
        self.state = MonitorState::Idle;
        report
    }
}
