use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use deepguard::commands;

fn main() {
    deepguard::init_logging();

    if let Err(e) = run() {
        deepguard::ui::error(&format!("[DeepGuard] Error: {:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = Command::new("deepguard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Host health monitor with an obfuscated alert log")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("monitor")
                .about("Watch CPU, RAM, disk and a dependent service until Ctrl+C")
                .long_about(
                    "Watch CPU, RAM, disk and a dependent service until Ctrl+C\n\n\
                     Alerts are appended to the log file XOR-obfuscated with the key in \
                     MONITOR_KEY. This is obfuscation, not encryption.",
                )
                .arg(
                    Arg::new("cpu-threshold")
                        .short('c')
                        .long("cpu-threshold")
                        .value_name("VALUE")
                        .help("CPU threshold (load average on Unix, usage % on Windows)")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("ram-threshold")
                        .short('r')
                        .long("ram-threshold")
                        .value_name("PERCENT")
                        .help("RAM usage % threshold")
                        .value_parser(clap::value_parser!(f64))
                        .conflicts_with("no-ram"),
                )
                .arg(
                    Arg::new("log-file")
                        .short('l')
                        .long("log-file")
                        .value_name("FILE")
                        .help("Alert log file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("SECONDS")
                        .help("Seconds between checks")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("no-notify")
                        .long("no-notify")
                        .help("Do not show desktop notifications")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("defaults")
                        .short('y')
                        .long("defaults")
                        .help("Use defaults instead of prompting for missing values (implied by --json)")
                        .action(ArgAction::SetTrue),
                )
                .args(commands::target_args()),
        )
        .subcommand(
            Command::new("status")
                .about("Sample every sensor once and print the current statistics")
                .args(commands::target_args()),
        )
        .subcommand(
            Command::new("decode")
                .about("Print the records of an alert log using MONITOR_KEY")
                .long_about(
                    "Print the records of an alert log using MONITOR_KEY\n\n\
                     Records are split on newline bytes after obfuscation. If a key byte XORs \
                     a message byte into a newline, that record is split in two and the \
                     pieces decode as garbage. Such records are flagged with a warning.",
                )
                .arg(
                    Arg::new("file")
                        .help("Alert log file")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("monitor", sub_matches)) => commands::monitor::execute(sub_matches),
        Some(("status", sub_matches)) => commands::status::execute(sub_matches),
        Some(("decode", sub_matches)) => commands::decode::execute(sub_matches),
        _ => {
            println!("Use 'deepguard --help' for more information.");
            Ok(())
        }
    }
}
