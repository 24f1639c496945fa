//! Monitor command handler.
//!
//! Collects the configuration, shows the current statistics and runs the
//! monitoring loop until Ctrl+C.

use anyhow::{Context, Result};
use clap::ArgMatches;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::core::config::{
    MonitorSettings, ServiceTarget, ThresholdConfig, DEFAULT_CPU_THRESHOLD, DEFAULT_INTERVAL_SECS,
    DEFAULT_LOG_FILE, DEFAULT_RAM_THRESHOLD,
};
use crate::core::health_monitor::{
    CancelToken, HealthMonitor, Notifier, NullNotifier, SensorSet, Severity,
};
use crate::core::{AlertSink, SecretKey};
use crate::platform::{native_probe, DesktopNotifier, CPU_METRIC_LABEL};
use crate::ui::{self, prompts};

/// Execute the monitor command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    // The key comes first: nothing is prompted, sampled or written without it.
    let key = SecretKey::from_env()?;

    let json_output = matches.get_flag("json");
    let use_defaults = matches.get_flag("defaults");
    let stdin_is_terminal = std::io::stdin().is_terminal();
    let interactive = is_interactive(use_defaults, json_output, stdin_is_terminal);
    if !use_defaults && !json_output && !stdin_is_terminal {
        log::warn!("stdin is not a terminal; using defaults for values not given as flags");
    }

    let settings = resolve_settings(matches, interactive)?;

    let cancel = CancelToken::new();
    let cancel_for_handler = cancel.clone();
    ctrlc::set_handler(move || {
        cancel_for_handler.cancel();
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let mut sensors = SensorSet::from_settings(native_probe(), &settings);

    if !json_output {
        if let Some(snapshot) = sensors.sample(&cancel) {
            ui::print_system_statistics(&snapshot, CPU_METRIC_LABEL);
        }
        ui::print_configuration(&settings, CPU_METRIC_LABEL, json_output);
    }

    let notifier: Arc<dyn Notifier> = if matches.get_flag("no-notify") {
        Arc::new(NullNotifier)
    } else {
        Arc::new(DesktopNotifier::new())
    };

    let sink = Arc::new(AlertSink::new(settings.log_path.clone(), key));
    let mut monitor = HealthMonitor::new(
        settings.thresholds.clone(),
        sensors,
        sink,
        Arc::clone(&notifier),
        cancel,
    );

    notifier.notify("DeepGuard", "Monitoring active", Severity::Info);

    monitor.run(|report| ui::print_cycle(report, json_output));

    notifier.notify("DeepGuard", "Monitoring stopped", Severity::Info);
    if !json_output {
        println!();
        ui::info("Monitoring stopped.");
    }

    Ok(())
}

/// Prompts only run on a terminal, and never when stdout carries JSON lines.
fn is_interactive(use_defaults: bool, json_output: bool, stdin_is_terminal: bool) -> bool {
    !use_defaults && !json_output && stdin_is_terminal
}

/// Build settings from flags, prompting for the core values not given.
pub fn resolve_settings(matches: &ArgMatches, interactive: bool) -> Result<MonitorSettings> {
    if interactive {
        prompts::print_setup_header(&ThresholdConfig::default());
    }

    let cpu_threshold = match matches.get_one::<f64>("cpu-threshold") {
        Some(value) => *value,
        None if interactive => prompts::prompt_cpu_threshold(CPU_METRIC_LABEL, DEFAULT_CPU_THRESHOLD)?,
        None => DEFAULT_CPU_THRESHOLD,
    };

    let ram_threshold_percent = if matches.get_flag("no-ram") {
        None
    } else {
        Some(match matches.get_one::<f64>("ram-threshold") {
            Some(value) => *value,
            None if interactive => prompts::prompt_ram_threshold(DEFAULT_RAM_THRESHOLD)?,
            None => DEFAULT_RAM_THRESHOLD,
        })
    };

    let log_path = match matches.get_one::<PathBuf>("log-file") {
        Some(path) => path.clone(),
        None if interactive => PathBuf::from(prompts::prompt_log_file(DEFAULT_LOG_FILE)?),
        None => PathBuf::from(DEFAULT_LOG_FILE),
    };

    let interval_secs = match matches.get_one::<u64>("interval") {
        Some(value) => *value,
        None if interactive => prompts::prompt_interval_secs(DEFAULT_INTERVAL_SECS)?,
        None => DEFAULT_INTERVAL_SECS,
    };

    let mut settings = target_settings(matches)?;
    settings.thresholds.cpu_threshold = cpu_threshold;
    settings.thresholds.ram_threshold_percent = ram_threshold_percent;
    settings.thresholds.check_interval = Duration::from_secs(interval_secs);
    settings.log_path = log_path;

    settings.validate()?;
    Ok(settings)
}

/// Settings that never need prompting: disk, service and RAM switches.
pub fn target_settings(matches: &ArgMatches) -> Result<MonitorSettings> {
    let mut settings = MonitorSettings::default();

    if let Some(disk_threshold) = matches.get_one::<f64>("disk-threshold") {
        settings.thresholds.disk_alert_percent = *disk_threshold;
    }

    if let Some(path) = matches.get_one::<PathBuf>("disk-path") {
        settings.disk_path = path.clone();
    }

    if matches.get_flag("no-ram") {
        settings.thresholds.ram_threshold_percent = None;
    }

    let defaults = ServiceTarget::default();
    settings.service = ServiceTarget {
        host: matches
            .get_one::<String>("service-host")
            .cloned()
            .unwrap_or(defaults.host),
        port: matches
            .get_one::<u16>("service-port")
            .copied()
            .unwrap_or(defaults.port),
        connect_timeout: matches
            .get_one::<u64>("connect-timeout-ms")
            .map(|ms| Duration::from_millis(*ms))
            .unwrap_or(defaults.connect_timeout),
    };

    settings
        .validate()
        .context("Invalid monitoring target configuration")?;
    Ok(settings)
}
