use anyhow::Result;
use clap::ArgMatches;

use super::monitor::target_settings;
use crate::core::health_monitor::{CancelToken, SensorSet};
use crate::platform::{native_probe, CPU_METRIC_LABEL};

/// Sample every sensor once and print the result.
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let settings = target_settings(matches)?;
    let mut sensors = SensorSet::from_settings(native_probe(), &settings);

    if let Some(snapshot) = sensors.sample(&CancelToken::new()) {
        if matches.get_flag("json") {
            println!("{}", serde_json::to_string(&snapshot.readings())?);
        } else {
            crate::ui::print_system_statistics(&snapshot, CPU_METRIC_LABEL);
        }
    }

    Ok(())
}
