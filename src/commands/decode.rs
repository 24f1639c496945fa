use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use std::path::PathBuf;

use crate::core::{decode_log, SecretKey};
use crate::ui;

/// Print the records of an alert log in plain text.
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let key = SecretKey::from_env()?;
    let path = matches
        .get_one::<PathBuf>("file")
        .context("Log file argument is required")?;

    let records = decode_log(path, &key)
        .with_context(|| format!("Failed to read alert log {}", path.display()))?;

    if records.is_empty() {
        println!("{}", "No alerts recorded.".dimmed());
        return Ok(());
    }

    let suspect: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| looks_split(record))
        .map(|(index, _)| index + 1)
        .collect();

    for (index, record) in records.iter().enumerate() {
        println!("{} {}", format!("{:>4}.", index + 1).dimmed(), record);
    }

    if !suspect.is_empty() {
        let numbers: Vec<String> = suspect.iter().map(ToString::to_string).collect();
        ui::warn(&format!(
            "Records {} contain non-printable bytes; a record may have been split on an \
             obfuscated newline or decoded with the wrong key",
            numbers.join(", ")
        ));
    }

    Ok(())
}

/// Alert messages are printable text; control characters or replacement
/// characters mean the record boundary or the key is wrong.
fn looks_split(record: &str) -> bool {
    record
        .chars()
        .any(|c| c == char::REPLACEMENT_CHARACTER || (c.is_control() && c != '\t'))
}
