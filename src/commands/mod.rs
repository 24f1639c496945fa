// Command handlers module
pub mod decode;
pub mod monitor;
pub mod status;

use clap::{Arg, ArgAction};
use std::path::PathBuf;

/// Disk, service and RAM switches shared by `monitor` and `status`.
pub fn target_args() -> Vec<Arg> {
    vec![
        Arg::new("disk-path")
            .long("disk-path")
            .value_name("PATH")
            .help("Filesystem to watch (default: / or C:\\)")
            .value_parser(clap::value_parser!(PathBuf)),
        Arg::new("disk-threshold")
            .long("disk-threshold")
            .value_name("PERCENT")
            .help("Alert when disk usage exceeds this percentage")
            .value_parser(clap::value_parser!(f64))
            .default_value("90"),
        Arg::new("no-ram")
            .long("no-ram")
            .help("Do not monitor RAM usage")
            .action(ArgAction::SetTrue),
        Arg::new("service-host")
            .long("service-host")
            .value_name("HOST")
            .help("Host of the dependent service to probe")
            .default_value("127.0.0.1"),
        Arg::new("service-port")
            .long("service-port")
            .value_name("PORT")
            .help("TCP port of the dependent service")
            .value_parser(clap::value_parser!(u16))
            .default_value("3306"),
        Arg::new("connect-timeout-ms")
            .long("connect-timeout-ms")
            .value_name("MS")
            .help("Reachability connect timeout in milliseconds")
            .value_parser(clap::value_parser!(u64).range(1..))
            .default_value("2000"),
        Arg::new("json")
            .long("json")
            .help("Emit JSON instead of text")
            .action(ArgAction::SetTrue),
    ]
}
