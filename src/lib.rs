#![warn(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    clippy::uninlined_format_args
)]

//! A crate which computes the key half of a UDS Security Access (0x27)
//! seed/key exchange, for use by diagnostic tools that unlock protected ECU
//! functions.
//!
//! ## Algorithm
//!
//! The ECU sends a seed for the requested security level. The key returned to the
//! ECU is the AES-128 CMAC (NIST SP 800-38B) of the first 16 bytes of that seed,
//! keyed with a secret that belongs to the security level. Seeds shorter than 16
//! bytes are authenticated unpadded. The key is always 16 bytes.
//!
//! Supported security levels are listed in [SecurityLevel].
//!
//! ## Thread safety
//!
//! Every call is independent. The per-level secrets live in a read-only table built
//! once, and the CMAC context is created and dropped inside each call, so
//! [generate_key] can be called from many threads at once.
//!
//! ## Tool integration
//!
//! The `uds_seed_key_ffi` crate exports [generate_key_ex] as the C symbol
//! `GenerateKeyEx`, the entry point that seed/key DLL hosts look up.
//!
//! ```
//! use uds_seed_key::{generate_key, KEY_SIZE};
//!
//! let mut key = [0u8; KEY_SIZE];
//! let written = generate_key(&[0x12, 0x34], 0x03, &mut key).unwrap();
//! assert_eq!(written, KEY_SIZE);
//! ```

mod key_table;
pub mod mac;
pub mod security_level;
mod seed_key;

pub use mac::{MacError, MacResult, MacStage};
pub use security_level::SecurityLevel;
pub use seed_key::*;
