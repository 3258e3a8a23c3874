//! Seed to key computation for UDS Security Access
//!
//! The key for a seed is the AES-128 CMAC of the first 16 bytes of the seed,
//! keyed with the secret for the requested security level. Shorter seeds are
//! authenticated as-is, without padding.

use crate::{
    key_table,
    mac::{self, MacError, TAG_SIZE},
    security_level::SecurityLevel,
};

/// Size of every key produced by [generate_key]
pub const KEY_SIZE: usize = TAG_SIZE;

/// Maximum number of seed bytes fed into the MAC
pub const MAX_SEED_MESSAGE_LEN: usize = 16;

/// Seed/key result
pub type SeedKeyResult<T> = Result<T, KeyGenError>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
/// Reason a key could not be generated
pub enum KeyGenError {
    /// Seed was empty, or the output buffer cannot hold a full key
    #[error("Seed is empty or key buffer is too small")]
    InvalidInput,
    /// No secret key exists for the requested level
    #[error("Requested security level is not supported")]
    UnsupportedLevel,
    /// The MAC engine failed
    #[error("Key computation failed")]
    ComputationFailed(
        #[from]
        #[source]
        MacError,
    ),
}

/// Status code returned across the seed/key DLL boundary
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyGenStatus {
    /// Key was generated
    Ok = 0,
    /// Key could not be generated, for any reason
    Failure = 2,
}

impl<T> From<&SeedKeyResult<T>> for KeyGenStatus {
    fn from(res: &SeedKeyResult<T>) -> Self {
        match res {
            Ok(_) => KeyGenStatus::Ok,
            Err(_) => KeyGenStatus::Failure,
        }
    }
}

/// Computes the key for a seed issued by the ECU.
///
/// Validation and level lookup happen before any cryptographic work.
/// `key_out` is only written once the key is fully computed, and only its
/// first [KEY_SIZE] bytes are touched.
///
/// ## Parameters
/// * seed - Seed sent by the ECU. Only the first 16 bytes are used
/// * security_level - Raw security level requested by the tool
/// * key_out - Buffer to receive the key. Must be at least [KEY_SIZE] bytes
///
/// ## Returns
/// The number of key bytes written, which is always [KEY_SIZE]
pub fn generate_key(seed: &[u8], security_level: u32, key_out: &mut [u8]) -> SeedKeyResult<usize> {
    if seed.is_empty() || key_out.len() < KEY_SIZE {
        log::warn!(
            "Rejecting seed/key request. Seed length {}, key buffer length {}",
            seed.len(),
            key_out.len()
        );
        return Err(KeyGenError::InvalidInput);
    }

    let secret = SecurityLevel::try_from(security_level)
        .ok()
        .and_then(key_table::secret_key)
        .ok_or_else(|| {
            log::warn!("Security level 0x{security_level:02X} is not supported");
            KeyGenError::UnsupportedLevel
        })?;

    let message = &seed[..seed.len().min(MAX_SEED_MESSAGE_LEN)];
    log::debug!(
        "Computing key for level 0x{security_level:02X} over {} seed bytes",
        message.len()
    );
    let tag = mac::compute_tag(secret.as_bytes(), message)?;

    key_out[..KEY_SIZE].copy_from_slice(&tag);
    Ok(KEY_SIZE)
}

/// Status code flavour of [generate_key], matching the seed/key DLL contract.
///
/// Every error collapses to [KeyGenStatus::Failure]. `actual_key_size` is
/// only written on success.
///
/// ## Parameters
/// * variant - ECU variant name. Accepted for interface compatibility, currently unused
pub fn generate_key_ex(
    seed: &[u8],
    security_level: u32,
    variant: &str,
    key_out: &mut [u8],
    actual_key_size: &mut u32,
) -> KeyGenStatus {
    let _ = variant;
    let res = generate_key(seed, security_level, key_out);
    if let Ok(written) = res {
        // KEY_SIZE always fits
        *actual_key_size = written as u32;
    }
    KeyGenStatus::from(&res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mac::MacStage;

    const SCENARIO_1_KEY: [u8; KEY_SIZE] = [
        0x52, 0x6a, 0xfa, 0x78, 0x6d, 0x63, 0x21, 0xf4, 0x7d, 0x1e, 0xa8, 0x87, 0x99, 0xdd, 0x5b, 0x92,
    ];

    #[test]
    fn full_block_seed_level_1() {
        let mut key = [0u8; KEY_SIZE];
        assert_eq!(generate_key(&[0x01; 16], 0x01, &mut key), Ok(KEY_SIZE));
        assert_eq!(key, SCENARIO_1_KEY);
    }

    #[test]
    fn long_seed_is_truncated() {
        let mut long_seed = [0x01; 32];
        long_seed[16..].fill(0xEE);
        let mut key = [0u8; KEY_SIZE];
        generate_key(&long_seed, 0x01, &mut key).unwrap();
        assert_eq!(key, SCENARIO_1_KEY);
    }

    #[test]
    fn empty_seed_rejected() {
        let mut key = [0u8; KEY_SIZE];
        assert_eq!(generate_key(&[], 0x01, &mut key), Err(KeyGenError::InvalidInput));
    }

    #[test]
    fn short_buffer_checked_before_level() {
        let mut key = [0u8; 8];
        assert_eq!(generate_key(&[0x01; 16], 99, &mut key), Err(KeyGenError::InvalidInput));
    }

    #[test]
    fn unsupported_level() {
        let mut key = [0u8; KEY_SIZE];
        for level in [0, 2, 4, 99] {
            assert_eq!(
                generate_key(&[0x01; 16], level, &mut key),
                Err(KeyGenError::UnsupportedLevel)
            );
        }
        assert_eq!(key, [0u8; KEY_SIZE]);
    }

    #[test]
    fn status_mapping() {
        let mut key = [0u8; KEY_SIZE];
        let mut size = 0xAAAA_AAAA;
        assert_eq!(
            generate_key_ex(&[0x01; 16], 0x01, "", &mut key, &mut size),
            KeyGenStatus::Ok
        );
        assert_eq!(size, 16);

        let mut size = 0xAAAA_AAAA;
        assert_eq!(
            generate_key_ex(&[0x01; 16], 0x05, "ECU_A", &mut key, &mut size),
            KeyGenStatus::Failure
        );
        assert_eq!(size, 0xAAAA_AAAA);
        assert_eq!(KeyGenStatus::Failure as i32, 2);
    }

    #[test]
    fn mac_error_source_is_kept() {
        use std::error::Error;
        let err = KeyGenError::from(MacError { stage: MacStage::Init });
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Key computation failed");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn status_serde_round_trip() {
        for status in [KeyGenStatus::Ok, KeyGenStatus::Failure] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(serde_json::from_str::<KeyGenStatus>(&json).unwrap(), status);
        }
        assert_eq!(serde_json::to_string(&KeyGenStatus::Failure).unwrap(), "\"Failure\"");
    }
}
