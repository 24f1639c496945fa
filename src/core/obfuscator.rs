//! Keyed XOR scrambling for alert records.
//!
//! This is obfuscation only. XOR with a repeating key gives no
//! confidentiality or integrity guarantees; it keeps casual readers from
//! reading the log in a text editor and nothing more.

use super::secret::SecretKey;

/// Symmetric byte-wise transform. Applying it twice with the same key
/// returns the input.
#[derive(Debug, Clone)]
pub struct Obfuscator {
    key: SecretKey,
}

impl Obfuscator {
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }

    /// Output byte `i` is input byte `i` XOR key byte `i % key.len()`.
    pub fn transform(&self, data: &[u8]) -> Vec<u8> {
        let key = self.key.as_bytes();
        data.iter()
            .zip(key.iter().cycle())
            .map(|(byte, mask)| byte ^ mask)
            .collect()
    }

    /// Key byte applied at `position`.
    pub fn mask_at(&self, position: usize) -> u8 {
        let key = self.key.as_bytes();
        key[position % key.len()]
    }
}
