//! Native desktop notifications.
//!
//! Each notification is handed to the platform's notifier program on a
//! detached thread. The monitor never waits for it and never learns whether
//! it was shown.

use std::process::{Command, Stdio};
use std::thread;

use crate::core::health_monitor::{Notifier, Severity};

/// Program and arguments used to display one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationCommand {
    pub program: &'static str,
    pub args: Vec<String>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, message: &str, severity: Severity) -> bool {
        dispatch(notification_command(title, message, severity))
    }
}

/// Run `command` on a detached thread. Returns whether the thread started.
fn dispatch(command: NotificationCommand) -> bool {
    let spawned = thread::Builder::new()
        .name("notifier".to_string())
        .spawn(move || {
            let result = Command::new(command.program)
                .args(&command.args)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();

            match result {
                Ok(status) if !status.success() => {
                    log::debug!("{} exited with {}", command.program, status)
                }
                Err(e) => log::debug!("Unable to run {}: {}", command.program, e),
                _ => {}
            }
        });

    match spawned {
        Ok(_) => true,
        Err(e) => {
            log::debug!("Unable to spawn notifier thread: {}", e);
            false
        }
    }
}

/// freedesktop urgency level for `severity`.
pub fn urgency(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "low",
        Severity::Warning => "normal",
        Severity::Critical => "critical",
    }
}

/// freedesktop icon name for `severity`.
pub fn icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "dialog-information",
        Severity::Warning => "dialog-warning",
        Severity::Critical => "dialog-error",
    }
}

#[cfg(windows)]
pub fn notification_command(title: &str, message: &str, severity: Severity) -> NotificationCommand {
    let (system_icon, balloon_icon) = match severity {
        Severity::Info => ("Information", "Info"),
        Severity::Warning => ("Warning", "Warning"),
        Severity::Critical => ("Error", "Error"),
    };

    let script = format!(
        "Add-Type -AssemblyName System.Windows.Forms; \
         $n = New-Object System.Windows.Forms.NotifyIcon; \
         $n.Icon = [System.Drawing.SystemIcons]::{}; \
         $n.BalloonTipIcon = '{}'; \
         $n.BalloonTipTitle = '{}'; \
         $n.BalloonTipText = '{}'; \
         $n.Visible = $true; \
         $n.ShowBalloonTip(10000); \
         Start-Sleep -Seconds 10; \
         $n.Dispose()",
        system_icon,
        balloon_icon,
        powershell_quote(title),
        powershell_quote(message)
    );

    NotificationCommand {
        program: "powershell",
        args: vec!["-NoProfile".to_string(), "-Command".to_string(), script],
    }
}

#[cfg(target_os = "macos")]
pub fn notification_command(title: &str, message: &str, severity: Severity) -> NotificationCommand {
    let script = format!(
        "display notification \"{}\" with title \"{}\" subtitle \"{}\"",
        applescript_quote(message),
        applescript_quote(title),
        severity
    );

    NotificationCommand {
        program: "osascript",
        args: vec!["-e".to_string(), script],
    }
}

#[cfg(not(any(windows, target_os = "macos")))]
pub fn notification_command(title: &str, message: &str, severity: Severity) -> NotificationCommand {
    NotificationCommand {
        program: "notify-send",
        args: vec![
            "-u".to_string(),
            urgency(severity).to_string(),
            "-i".to_string(),
            icon(severity).to_string(),
            "-a".to_string(),
            "DeepGuard".to_string(),
            title.to_string(),
            message.to_string(),
        ],
    }
}

#[cfg(windows)]
fn powershell_quote(text: &str) -> String {
    text.replace('\'', "''")
}

#[cfg(target_os = "macos")]
fn applescript_quote(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
