// Callers must pass valid pointers; see the per-function comments.
#![allow(clippy::missing_safety_doc)]

// modthree-ffi: C-compatible FFI layer for the mod-three automaton.
//
// Memory management rules:
// - Opaque `ModThreeHandle` pointer: created by `modthree_handle_new`, freed by
//   `modthree_handle_free`.
// - Error strings written to `error_out`: caller must free with `modthree_free_str`.
// - All input strings are UTF-8 encoded, null-terminated C strings.
//
// Result convention: `0`, `1` or `2` is the remainder; `-1` means the call
// failed and, if `error_out` is non-NULL, it receives the `FfiError` message.

use std::ffi::{CStr, CString, c_char, c_int};

use modthree_fsm::{InvalidInput, ModThreeHandle, compute_mod_three};

/// Why a call returned -1.
#[derive(Debug, thiserror::Error)]
enum FfiError {
    #[error("{0} is null")]
    Null(&'static str),

    #[error("input is not valid UTF-8")]
    NotUtf8,

    #[error(transparent)]
    Rejected(#[from] InvalidInput),
}

// ── One-shot computation ────────────────────────────────────────

/// Remainder of the binary numeral `input` divided by three.
///
/// Returns 0, 1 or 2 on success, -1 on failure.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn modthree_compute(
    input: *const c_char,
    error_out: *mut *mut c_char,
) -> c_int {
    let result =
        input_str(input).and_then(|input| compute_mod_three(input).map_err(FfiError::from));
    into_c_result(result, error_out)
}

// ── Handle lifecycle ─────────────────────────────────────────────

/// Create a reusable mod-three handle. Free it with `modthree_handle_free`.
#[unsafe(no_mangle)]
pub extern "C" fn modthree_handle_new() -> *mut ModThreeHandle {
    Box::into_raw(Box::new(ModThreeHandle::new()))
}

/// Free a handle created by `modthree_handle_new`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn modthree_handle_free(handle: *mut ModThreeHandle) {
    if !handle.is_null() {
        drop(unsafe { Box::from_raw(handle) });
    }
}

/// Remainder of `input` divided by three, using a reusable handle.
///
/// Returns 0, 1 or 2 on success, -1 on failure. The handle must not be used
/// from two threads at once.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn modthree_handle_remainder(
    handle: *mut ModThreeHandle,
    input: *const c_char,
    error_out: *mut *mut c_char,
) -> c_int {
    let result = unsafe { handle.as_mut() }
        .ok_or(FfiError::Null("handle"))
        .and_then(|handle| {
            let input = input_str(input)?;
            handle.remainder(input).map_err(FfiError::from)
        });
    into_c_result(result, error_out)
}

// ── Memory management ───────────────────────────────────────────

/// Free a string returned through `error_out`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn modthree_free_str(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ── Internal helpers ────────────────────────────────────────────

/// Borrow a NUL-terminated input string as `&str`.
fn input_str<'a>(input: *const c_char) -> Result<&'a str, FfiError> {
    if input.is_null() {
        return Err(FfiError::Null("input"));
    }
    unsafe { CStr::from_ptr(input) }
        .to_str()
        .map_err(|_| FfiError::NotUtf8)
}

/// Map a result onto the C convention, writing the error message to
/// `error_out` when it is non-NULL.
fn into_c_result(result: Result<u8, FfiError>, error_out: *mut *mut c_char) -> c_int {
    match result {
        Ok(remainder) => c_int::from(remainder),
        Err(err) => {
            if !error_out.is_null() {
                // Messages never contain NUL: inputs are C strings.
                let message = CString::new(err.to_string()).unwrap_or_default();
                unsafe { *error_out = message.into_raw() };
            }
            -1
        }
    }
}
