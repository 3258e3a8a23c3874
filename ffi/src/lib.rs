//! FFI bindings for uds_seed_key
//!
//! Exports the `GenerateKeyEx` entry point that seed/key DLL hosts (such as
//! Vector diagnostic tools) look up, plus a self test for the CMAC backend.
//!
//! Unlike most FFI surfaces, these functions hold no global mutable state and can be
//! called from any thread.

use std::{
    ffi::{c_char, c_int},
    panic::{self, AssertUnwindSafe},
};

use uds_seed_key::{generate_key_ex, mac, KeyGenStatus, MAX_SEED_MESSAGE_LEN};

/// Computes the key for a seed sent by the ECU.
///
/// ## Parameters
/// * ip_seed_array - Seed from the ECU
/// * i_seed_array_size - Number of bytes in `ip_seed_array`
/// * i_security_level - Requested security level (0x01 or 0x03)
/// * ip_variant - ECU variant name. May be NULL. Never read
/// * iop_key_array - Buffer to receive the key
/// * i_max_key_array_size - Capacity of `iop_key_array`. Must be at least 16
/// * o_actual_key_array_size - Set to the key length (16) on success, untouched otherwise
///
/// ## Returns
/// 0 on success, 2 on any failure. On failure, `iop_key_array` is not modified
///
/// # Safety
/// Non-NULL pointers must be valid for the sizes given. Only the first 16 seed
/// bytes are read, and they are copied out before `iop_key_array` is touched, so
/// the seed and key buffers may overlap. `o_actual_key_array_size` must not
/// overlap either buffer.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn GenerateKeyEx(
    ip_seed_array: *const u8,
    i_seed_array_size: u32,
    i_security_level: u32,
    ip_variant: *const c_char,
    iop_key_array: *mut u8,
    i_max_key_array_size: u32,
    o_actual_key_array_size: *mut u32,
) -> c_int {
    let _ = ip_variant;
    if ip_seed_array.is_null() || iop_key_array.is_null() || o_actual_key_array_size.is_null() {
        log::warn!("GenerateKeyEx called with a NULL pointer");
        return KeyGenStatus::Failure as c_int;
    }

    let seed_len = (i_seed_array_size as usize).min(MAX_SEED_MESSAGE_LEN);
    let mut seed = [0u8; MAX_SEED_MESSAGE_LEN];
    seed[..seed_len].copy_from_slice(std::slice::from_raw_parts(ip_seed_array, seed_len));

    let key_out = std::slice::from_raw_parts_mut(iop_key_array, i_max_key_array_size as usize);
    let actual_key_size = &mut *o_actual_key_array_size;

    let status = panic::catch_unwind(AssertUnwindSafe(|| {
        generate_key_ex(&seed[..seed_len], i_security_level, "", key_out, actual_key_size)
    }))
    .unwrap_or_else(|_| {
        log::error!("Panic caught while generating key");
        KeyGenStatus::Failure
    });
    status as c_int
}

/// Runs the CMAC known answer tests.
///
/// ## Returns
/// 0 if the CMAC backend produced the expected tags, 2 otherwise
#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn SeedKeySelfTest() -> c_int {
    match panic::catch_unwind(mac::self_test) {
        Ok(Ok(())) => KeyGenStatus::Ok as c_int,
        Ok(Err(e)) => {
            log::error!("CMAC self test failed: {}", e);
            KeyGenStatus::Failure as c_int
        }
        Err(_) => {
            log::error!("Panic caught during CMAC self test");
            KeyGenStatus::Failure as c_int
        }
    }
}
