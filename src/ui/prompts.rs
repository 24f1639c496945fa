// UI prompts and user interaction module

use colored::Colorize;
use dialoguer::Input;

use crate::core::config::ThresholdConfig;
use crate::error::{DeepGuardError, Result};

/// Display a warning message
pub fn warn(message: &str) {
    println!("{}", format!("⚠️  Warning: {}", message).yellow().bold());
}

/// Display an info message
pub fn info(message: &str) {
    println!("{}", message.cyan());
}

/// Display an error message
pub fn error(message: &str) {
    eprintln!("{}", message.red().bold());
}

/// Display a dimmed/secondary message
pub fn dimmed(message: &str) {
    println!("{}", message.dimmed());
}

pub fn validate_cpu_threshold(value: f64) -> std::result::Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err("Please enter a positive number".to_string())
    }
}

pub fn validate_percent(value: f64) -> std::result::Result<(), String> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err("Please enter a number between 0 and 100".to_string())
    }
}

pub fn validate_interval(value: u64) -> std::result::Result<(), String> {
    if value > 0 {
        Ok(())
    } else {
        Err("Please enter a positive integer".to_string())
    }
}

pub fn validate_file_name(value: &str) -> std::result::Result<(), String> {
    if value.trim().is_empty() {
        Err("Please enter a file name".to_string())
    } else {
        Ok(())
    }
}

/// Ask for the CPU threshold; `metric` names what it is compared against.
pub fn prompt_cpu_threshold(metric: &str, default: f64) -> Result<f64> {
    Input::<f64>::new()
        .with_prompt(format!("[1/4] {} threshold", metric))
        .default(default)
        .validate_with(|value: &f64| validate_cpu_threshold(*value))
        .interact_text()
        .map_err(|e| DeepGuardError::prompt(e.to_string()))
}

pub fn prompt_ram_threshold(default: f64) -> Result<f64> {
    Input::<f64>::new()
        .with_prompt("[2/4] RAM usage % threshold")
        .default(default)
        .validate_with(|value: &f64| validate_percent(*value))
        .interact_text()
        .map_err(|e| DeepGuardError::prompt(e.to_string()))
}

pub fn prompt_log_file(default: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt("[3/4] Log file name")
        .default(default.to_string())
        .validate_with(|value: &String| validate_file_name(value))
        .interact_text()
        .map(|value| value.trim().to_string())
        .map_err(|e| DeepGuardError::prompt(e.to_string()))
}

pub fn prompt_interval_secs(default: u64) -> Result<u64> {
    Input::<u64>::new()
        .with_prompt("[4/4] Check interval in seconds")
        .default(default)
        .validate_with(|value: &u64| validate_interval(*value))
        .interact_text()
        .map_err(|e| DeepGuardError::prompt(e.to_string()))
}

/// Show the setup header before the interactive questions.
pub fn print_setup_header(defaults: &ThresholdConfig) {
    println!("{}", "-------------------------------------------".cyan());
    println!("{}", "      DEEP GUARD: UNIVERSAL SETUP          ".cyan().bold());
    println!("{}", "-------------------------------------------".cyan());
    dimmed(&format!(
        "Press Enter to accept a default (disk alert fixed at > {:.0}% unless --disk-threshold is given)",
        defaults.disk_alert_percent
    ));
}
