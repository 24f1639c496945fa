//! Append-only obfuscated alert log.

use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::obfuscator::Obfuscator;
use super::secret::SecretKey;
use crate::error::{DeepGuardError, Result};

/// Writes one obfuscated, newline-terminated record per alert.
///
/// The file is opened in append mode for every record and closed before the
/// lock is released, so the log is never truncated and concurrent callers
/// within the process never interleave. A second process writing the same
/// path is not guarded against.
pub struct AlertSink {
    path: PathBuf,
    obfuscator: Obfuscator,
    write_lock: Mutex<()>,
}

impl AlertSink {
    pub fn new(path: impl Into<PathBuf>, key: SecretKey) -> Self {
        Self {
            path: path.into(),
            obfuscator: Obfuscator::new(key),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `message`. Failures are reported on stderr through the logger
    /// and returned, never panicked on.
    pub fn record(&self, message: &str) -> Result<()> {
        let mut record = self.obfuscator.transform(message.as_bytes());
        record.push(b'\n');

        let _guard = self.write_lock.lock();

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(&record));

        result.map_err(|e| {
            log::error!("Unable to write alert log {}: {}", self.path.display(), e);
            DeepGuardError::log_write_failed(&self.path, e)
        })
    }
}

/// Read a log written by [`AlertSink`] and return its records in plain text.
pub fn decode_log(path: &Path, key: &SecretKey) -> Result<Vec<String>> {
    let data = fs::read(path)?;
    let obfuscator = Obfuscator::new(key.clone());

    Ok(data
        .split(|&b| b == b'\n')
        .filter(|record| !record.is_empty())
        .map(|record| String::from_utf8_lossy(&obfuscator.transform(record)).into_owned())
        .collect())
}
