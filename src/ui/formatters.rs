use colored::Colorize;
use humansize::{format_size as human_format_size, BINARY};

use crate::core::config::MonitorSettings;
use crate::core::health_monitor::{CycleReport, CycleStatus, Severity, Snapshot};

/// Format a byte count in human-readable form (KiB, MiB, GiB)
pub fn format_size(bytes: u64) -> String {
    human_format_size(bytes, BINARY)
}

/// Heartbeat or alert line for one cycle.
pub fn format_cycle_line(report: &CycleReport) -> String {
    let time = report.timestamp.format("%Y-%m-%d %H:%M:%S");
    let prefix = format!("[{}] [Monitor]", time);

    match report.status {
        CycleStatus::Healthy => format!(
            "{} {} {}",
            prefix.dimmed(),
            "System Healthy.".green(),
            report.message
        ),
        CycleStatus::Degraded => {
            let names: Vec<String> = report.unavailable.iter().map(ToString::to_string).collect();
            format!(
                "{} {} {} {}",
                prefix.dimmed(),
                "Monitoring degraded.".yellow(),
                report.message,
                format!("(unavailable: {})", names.join(", ")).yellow()
            )
        }
        CycleStatus::Alert => {
            let body = match report.severity {
                Some(Severity::Critical) => report.message.red().bold(),
                _ => report.message.yellow().bold(),
            };
            let logged = if report.logged {
                "logged".dimmed()
            } else {
                "NOT logged".red()
            };
            format!("{} {} ({})", prefix.dimmed(), body, logged)
        }
        CycleStatus::Cancelled => format!("{} {}", prefix.dimmed(), "Cycle cancelled".dimmed()),
    }
}

/// Print one cycle, as text or as a JSON line.
pub fn print_cycle(report: &CycleReport, json: bool) {
    if json {
        match serde_json::to_string(report) {
            Ok(line) => println!("{}", line),
            Err(e) => log::error!("Unable to serialize cycle report: {}", e),
        }
    } else {
        println!("{}", format_cycle_line(report));
    }
}

/// The "current system statistics" block shown before monitoring starts.
pub fn print_system_statistics(snapshot: &Snapshot, cpu_label: &str) {
    println!();
    println!("{}", "========================================".cyan());
    println!("{}", "  CURRENT SYSTEM STATISTICS".cyan().bold());
    println!("{}", "========================================".cyan());

    match &snapshot.load {
        Ok(load) => println!("  {:<20} {:.2}", format!("{}:", cpu_label), load),
        Err(_) => println!("  {:<20} {}", format!("{}:", cpu_label), "Unable to read".red()),
    }

    match &snapshot.ram_percent {
        Some(Ok(ram)) => println!("  {:<20} {:.1}%", "RAM Usage:", ram),
        Some(Err(_)) => println!("  {:<20} {}", "RAM Usage:", "Unable to read".red()),
        None => println!("  {:<20} {}", "RAM Usage:", "not monitored".dimmed()),
    }

    let disk_label = format!("Disk ({}):", snapshot.disk_label);
    match &snapshot.disk {
        Ok(disk) => {
            println!("  {:<20} {:.1}% used", disk_label, disk.percent_used);
            println!("    Total: {}", format_size(disk.total_bytes));
            println!("    Free:  {}", format_size(disk.free_bytes));
        }
        Err(_) => println!("  {:<20} {}", disk_label, "Unable to read".red()),
    }

    let service_label = format!("Service ({}):", snapshot.service_label);
    match &snapshot.reachable {
        Ok(true) => println!("  {:<20} {}", service_label, "Connected".green()),
        Ok(false) => println!("  {:<20} {}", service_label, "Not reachable".red()),
        Err(e) => println!("  {:<20} {}", service_label, e.reason.red()),
    }
}

/// The "monitoring configuration" banner.
pub fn print_configuration(settings: &MonitorSettings, cpu_label: &str, json: bool) {
    let thresholds = &settings.thresholds;

    println!();
    println!("{}", "========================================".cyan());
    println!("{}", "  MONITORING CONFIGURATION".cyan().bold());
    println!("{}", "========================================".cyan());
    println!("  {:<18} {}", "Target Log:", settings.log_path.display());
    println!("  {:<18} {}", format!("{}:", cpu_label), thresholds.cpu_threshold);
    match thresholds.ram_threshold_percent {
        Some(ram) => println!("  {:<18} {} %", "RAM Threshold:", ram),
        None => println!("  {:<18} {}", "RAM Threshold:", "disabled"),
    }
    println!(
        "  {:<18} {} seconds",
        "Check Interval:",
        thresholds.check_interval.as_secs()
    );
    println!(
        "  {:<18} > {}% usage on {}",
        "Disk Alert:",
        thresholds.disk_alert_percent,
        settings.disk_path.display()
    );
    println!(
        "  {:<18} {} (timeout {} ms)",
        "Service:",
        settings.service,
        settings.service.connect_timeout.as_millis()
    );
    println!("  {:<18} {}", "Log Encoding:", "XOR obfuscation (not encryption)");
    println!("  {:<18} {}", "Output:", if json { "json" } else { "text" });
    println!("{}", "========================================".cyan());
    println!("{}", "  Status: MONITORING ACTIVE".green().bold());
    println!("{}", "  Press Ctrl+C to stop".dimmed());
    println!("{}", "========================================".cyan());
    println!();
}
