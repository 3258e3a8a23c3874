//! Secret key material for each supported security level
//!
//! The table is built once on first use and is read-only afterwards, so it
//! can be shared between threads without locking.

use std::{collections::HashMap, sync::LazyLock};

use crate::{mac::MAC_KEY_SIZE, security_level::SecurityLevel};

/// 128 bit AES key used as the CMAC key for one security level.
///
/// Never leaves the crate.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct SecretKey([u8; MAC_KEY_SIZE]);

impl SecretKey {
    pub(crate) fn as_bytes(&self) -> &[u8; MAC_KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

// Example secrets. Replace with the real per-level keys for the target ECU.
const LEVEL_1_KEY: SecretKey = SecretKey([
    0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00,
]);

const LEVEL_3_KEY: SecretKey = SecretKey([
    0x00, 0xAA, 0x00, 0xAA, 0x00, 0xAA, 0x00, 0xAA, 0x00, 0xAA, 0x00, 0xAA, 0x00, 0xAA, 0x00, 0xAA,
]);

static KEY_TABLE: LazyLock<HashMap<SecurityLevel, SecretKey>> = LazyLock::new(|| {
    HashMap::from([
        (SecurityLevel::Level1, LEVEL_1_KEY),
        (SecurityLevel::Level3, LEVEL_3_KEY),
    ])
});

/// Returns the secret key for `level`
pub(crate) fn secret_key(level: SecurityLevel) -> Option<&'static SecretKey> {
    KEY_TABLE.get(&level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_level_has_a_key() {
        for level in SecurityLevel::iter() {
            assert!(secret_key(level).is_some(), "{level} has no key");
        }
    }

    #[test]
    fn keys_are_distinct() {
        assert_ne!(
            secret_key(SecurityLevel::Level1),
            secret_key(SecurityLevel::Level3)
        );
    }

    #[test]
    fn debug_does_not_leak_key() {
        let printed = format!("{LEVEL_1_KEY:?}");
        assert_eq!(printed, "SecretKey(<redacted>)");
        assert!(!printed.contains("FF"));
    }
}
