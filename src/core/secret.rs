use std::ffi::OsString;
use std::fmt;

use crate::error::{DeepGuardError, Result};

/// Environment variable holding the obfuscation key.
pub const KEY_ENV_VAR: &str = "MONITOR_KEY";

/// Non-empty key material for the alert log.
///
/// There is deliberately no `Default` and no fallback key.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(DeepGuardError::key_missing("key must not be empty"));
        }
        Ok(Self(bytes))
    }

    /// Read the key from [`KEY_ENV_VAR`].
    pub fn from_env() -> Result<Self> {
        Self::from_env_value(std::env::var_os(KEY_ENV_VAR))
    }

    pub fn from_env_value(value: Option<OsString>) -> Result<Self> {
        let value = value.ok_or_else(|| {
            DeepGuardError::key_missing(format!("{} environment variable not set", KEY_ENV_VAR))
        })?;

        Self::new(os_string_bytes(value)).map_err(|_| {
            DeepGuardError::key_missing(format!("{} environment variable is empty", KEY_ENV_VAR))
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

#[cfg(unix)]
fn os_string_bytes(value: OsString) -> Vec<u8> {
    use std::os::unix::ffi::OsStringExt;
    value.into_vec()
}

#[cfg(not(unix))]
fn os_string_bytes(value: OsString) -> Vec<u8> {
    value.to_string_lossy().into_owned().into_bytes()
}
