//! AES-128 CMAC engine (NIST SP 800-38B / RFC 4493)
//!
//! This module wraps the RustCrypto `cmac` and `aes` crates behind a single
//! fixed-size operation, [compute_tag]. CMAC derives its own subkeys from the
//! cipher key, so no IV is required, and the construction is defined over
//! messages of any length (including empty messages).

use aes::Aes128;
use cmac::{Cmac, Mac};
use strum_macros::Display;

/// Size of an AES-128 key in bytes
pub const MAC_KEY_SIZE: usize = 16;

/// Size of a CMAC tag in bytes (one AES block)
pub const TAG_SIZE: usize = 16;

/// MAC engine result
pub type MacResult<T> = Result<T, MacError>;

/// Step of the CMAC computation that failed
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum MacStage {
    /// Creating the CMAC context from the key
    #[strum(serialize = "initialisation")]
    Init,
    /// Reading the tag out of the finalized context
    #[strum(serialize = "finalization")]
    Finalize,
    /// Known answer test did not produce the expected tag
    #[strum(serialize = "self test")]
    SelfTest,
}

/// The CMAC backend could not produce a tag.
///
/// Inputs are already validated by the time they reach the engine, so this
/// indicates an environment fault and should not be retried.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("CMAC computation failed during {stage}")]
pub struct MacError {
    /// Failing step
    pub stage: MacStage,
}

impl MacError {
    fn at(stage: MacStage) -> Self {
        Self { stage }
    }
}

/// Computes the AES-128 CMAC tag of `message` under `key`.
///
/// Identical `(key, message)` pairs always produce the identical tag. The
/// CMAC context lives on the stack for the duration of this call only and is
/// dropped on every return path.
///
/// ## Parameters
/// * key - 128 bit AES key
/// * message - Data to authenticate. May be empty
///
/// ## Returns
/// The 16 byte tag
pub fn compute_tag(key: &[u8; MAC_KEY_SIZE], message: &[u8]) -> MacResult<[u8; TAG_SIZE]> {
    let mut mac = Cmac::<Aes128>::new_from_slice(key).map_err(|e| {
        log::error!("Could not create CMAC context: {e}");
        MacError::at(MacStage::Init)
    })?;
    mac.update(message);
    let tag = mac.finalize().into_bytes();
    <[u8; TAG_SIZE]>::try_from(tag.as_slice()).map_err(|_| {
        log::error!("Unexpected CMAC tag length: {}", tag.len());
        MacError::at(MacStage::Finalize)
    })
}

const RFC4493_KEY: [u8; MAC_KEY_SIZE] = [
    0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c,
];

const RFC4493_MESSAGE: [u8; 40] = [
    0x6b, 0xc1, 0xbe, 0xe2, 0x2e, 0x40, 0x9f, 0x96, 0xe9, 0x3d, 0x7e, 0x11, 0x73, 0x93, 0x17, 0x2a,
    0xae, 0x2d, 0x8a, 0x57, 0x1e, 0x03, 0xac, 0x9c, 0x9e, 0xb7, 0x6f, 0xac, 0x45, 0xaf, 0x8e, 0x51,
    0x30, 0xc8, 0x1c, 0x46, 0xa3, 0x5c, 0xe4, 0x11,
];

// (message length, expected tag) from RFC 4493 section 4, examples 1-3
const RFC4493_VECTORS: [(usize, [u8; TAG_SIZE]); 3] = [
    (
        0,
        [
            0xbb, 0x1d, 0x69, 0x29, 0xe9, 0x59, 0x37, 0x28, 0x7f, 0xa3, 0x7d, 0x12, 0x9b, 0x75,
            0x67, 0x46,
        ],
    ),
    (
        16,
        [
            0x07, 0x0a, 0x16, 0xb4, 0x6b, 0x4d, 0x41, 0x44, 0xf7, 0x9b, 0xdd, 0x9d, 0xd0, 0x4a,
            0x28, 0x7c,
        ],
    ),
    (
        40,
        [
            0xdf, 0xa6, 0x67, 0x47, 0xde, 0x9a, 0xe6, 0x30, 0x30, 0xca, 0x32, 0x61, 0x14, 0x97,
            0xc8, 0x27,
        ],
    ),
];

/// Runs the RFC 4493 known answer tests against the CMAC backend.
///
/// Tool integrators can call this once at load time to check that the
/// backend produces standard tags before any seed is processed.
pub fn self_test() -> MacResult<()> {
    for (len, expected) in RFC4493_VECTORS.iter() {
        let tag = compute_tag(&RFC4493_KEY, &RFC4493_MESSAGE[..*len])?;
        if tag != *expected {
            log::error!("CMAC known answer test failed for {len} byte message");
            return Err(MacError::at(MacStage::SelfTest));
        }
    }
    log::debug!("CMAC known answer tests passed");
    Ok(())
}
