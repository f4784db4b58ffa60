//! FFI bindings for adaptive profiling
//!
//! This module exposes an [`AdaptiveSession`] through C-compatible functions so
//! any view technology can drive it. Strings returned by these functions are
//! allocated by Rust and must be freed by the caller using `adapt_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::pipeline::{profile_from_interactions, AdaptiveSession};
use crate::types::{InteractionKind, Profile};

/// `adapt_session_record` kind code for Expand
pub const ADAPT_KIND_EXPAND: i32 = 0;
/// `adapt_session_record` kind code for Collapse
pub const ADAPT_KIND_COLLAPSE: i32 = 1;

/// `adapt_session_classify` result code for Expert
pub const ADAPT_PROFILE_EXPERT: i32 = 0;
/// `adapt_session_classify` result code for Beginner
pub const ADAPT_PROFILE_BEGINNER: i32 = 1;
/// Returned when an operation fails; see `adapt_last_error`
pub const ADAPT_ERROR: i32 = -1;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

fn kind_from_code(code: i32) -> Option<InteractionKind> {
    match code {
        ADAPT_KIND_EXPAND => Some(InteractionKind::Expand),
        ADAPT_KIND_COLLAPSE => Some(InteractionKind::Collapse),
        _ => None,
    }
}

// ============================================================================
// Stateless API
// ============================================================================

/// Classify an interaction log (NDJSON or JSON array) and return report JSON.
///
/// # Safety
/// - `interactions` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `adapt_free_string`.
/// - Returns NULL on error; call `adapt_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn adapt_profile_from_interactions(
    interactions: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let log = match cstr_to_string(interactions) {
        Some(s) => s,
        None => {
            set_last_error("Invalid interactions string pointer");
            return ptr::null_mut();
        }
    };

    match profile_from_interactions(&log) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Stateful API
// ============================================================================

/// Opaque handle to an adaptive session
pub struct AdaptSessionHandle {
    session: AdaptiveSession,
}

/// Create a new session with the default threshold.
///
/// # Safety
/// - Returns a pointer that must be freed with `adapt_session_free`.
#[no_mangle]
pub unsafe extern "C" fn adapt_session_new() -> *mut AdaptSessionHandle {
    clear_last_error();
    Box::into_raw(Box::new(AdaptSessionHandle {
        session: AdaptiveSession::new(),
    }))
}

/// Create a new session with a custom expert threshold.
///
/// # Safety
/// - Returns a pointer that must be freed with `adapt_session_free`.
/// - Returns NULL if the threshold is invalid; call `adapt_last_error` for details.
#[no_mangle]
pub unsafe extern "C" fn adapt_session_new_with_threshold(
    threshold: f64,
) -> *mut AdaptSessionHandle {
    clear_last_error();

    match AdaptiveSession::with_threshold(threshold) {
        Ok(session) => Box::into_raw(Box::new(AdaptSessionHandle { session })),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free a session.
///
/// # Safety
/// - `session` must be a pointer returned by `adapt_session_new*`, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn adapt_session_free(session: *mut AdaptSessionHandle) {
    if !session.is_null() {
        drop(Box::from_raw(session));
    }
}

/// Record one interaction (`0` = expand, `1` = collapse).
///
/// # Safety
/// - `session` must be a valid pointer returned by `adapt_session_new*`.
/// - Returns 0 on success, -1 on a null session or unknown kind code.
#[no_mangle]
pub unsafe extern "C" fn adapt_session_record(
    session: *mut AdaptSessionHandle,
    kind: i32,
) -> i32 {
    clear_last_error();

    if session.is_null() {
        set_last_error("Null session pointer");
        return ADAPT_ERROR;
    }

    let Some(kind) = kind_from_code(kind) else {
        set_last_error(&format!("Unknown interaction kind code: {}", kind));
        return ADAPT_ERROR;
    };

    let handle = &mut *session;
    handle.session.record(kind);
    0
}

/// Classify the session's accumulated counters.
///
/// # Safety
/// - `session` must be a valid pointer returned by `adapt_session_new*`.
/// - Returns 0 for Expert, 1 for Beginner, -1 on error (including when no
///   interaction has been recorded yet); call `adapt_last_error` for details.
#[no_mangle]
pub unsafe extern "C" fn adapt_session_classify(session: *const AdaptSessionHandle) -> i32 {
    clear_last_error();

    if session.is_null() {
        set_last_error("Null session pointer");
        return ADAPT_ERROR;
    }

    let handle = &*session;

    match handle.session.classify() {
        Ok(Profile::Expert) => ADAPT_PROFILE_EXPERT,
        Ok(Profile::Beginner) => ADAPT_PROFILE_BEGINNER,
        Err(e) => {
            set_last_error(&e.to_string());
            ADAPT_ERROR
        }
    }
}

/// Classify and return the full adaptation report as JSON.
///
/// # Safety
/// - `session` must be a valid pointer returned by `adapt_session_new*`.
/// - Returns a newly allocated string that must be freed with `adapt_free_string`.
/// - Returns NULL on error; call `adapt_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn adapt_session_adapt_json(
    session: *const AdaptSessionHandle,
) -> *mut c_char {
    clear_last_error();

    if session.is_null() {
        set_last_error("Null session pointer");
        return ptr::null_mut();
    }

    let handle = &*session;

    match handle.session.adapt_to_json() {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by adapt functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by an adapt function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn adapt_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next adapt function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn adapt_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn adapt_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
