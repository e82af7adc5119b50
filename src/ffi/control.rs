//! Run state, speed, and rule toggles.

use std::ffi::{c_char, CStr};

use crate::automaton::AnimationDriver;

/// Borrow a C string as UTF-8, or `None` for null or invalid input.
unsafe fn rule_name<'a>(name: *const c_char) -> Option<&'a str> {
    if name.is_null() {
        return None;
    }
    CStr::from_ptr(name).to_str().ok()
}

/// Pauses (`running == 0`) or resumes (anything else) the driver.
///
/// # Safety
/// - `ptr` must be a valid pointer to a driver, or null (no-op)
#[no_mangle]
pub unsafe extern "C" fn pa_set_running(ptr: *mut AnimationDriver, running: u8) {
    if ptr.is_null() {
        return;
    }
    (*ptr).set_running(running != 0);
}

/// Returns 1 if running, 0 if paused, -1 if ptr is null.
///
/// # Safety
/// - `ptr` must be a valid pointer to a driver, or null
#[no_mangle]
pub unsafe extern "C" fn pa_is_running(ptr: *const AnimationDriver) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    i32::from((*ptr).is_running())
}

/// Sets the frame rate in frames per second.
///
/// # Safety
/// - `ptr` must be a valid pointer to a driver, or null
///
/// # Returns
/// 0 on success, 1 if `fps` is outside 1..=60 (speed unchanged),
/// -1 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn pa_set_speed(ptr: *mut AnimationDriver, fps: u32) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    match (*ptr).set_speed(fps) {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// Gets the current frame rate, or 0 if ptr is null.
///
/// # Safety
/// - `ptr` must be a valid pointer to a driver, or null
#[no_mangle]
pub unsafe extern "C" fn pa_get_speed(ptr: *const AnimationDriver) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).speed()
}

/// Queues a toggle of the named rule for the next step.
///
/// # Safety
/// - `ptr` must be a valid pointer to a driver, or null
/// - `name` must be a valid NUL-terminated string, or null
///
/// # Returns
/// 1 if the name is in the rule catalog, 0 if it is unknown (ignored),
/// -1 if either pointer is null or the name is not UTF-8.
#[no_mangle]
pub unsafe extern "C" fn pa_toggle_rule(ptr: *mut AnimationDriver, name: *const c_char) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    match rule_name(name) {
        Some(name) => i32::from((*ptr).toggle_rule(name)),
        None => -1,
    }
}

/// Whether the named rule was active during the most recent step.
///
/// # Safety
/// - `ptr` must be a valid pointer to a driver, or null
/// - `name` must be a valid NUL-terminated string, or null
///
/// # Returns
/// 1 if active, 0 if not, -1 if either pointer is null or the name is not UTF-8.
#[no_mangle]
pub unsafe extern "C" fn pa_rule_active(ptr: *const AnimationDriver, name: *const c_char) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    match rule_name(name) {
        Some(name) => i32::from((*ptr).toggles().is_named_active(name)),
        None => -1,
    }
}
