//! Frame-clock ticks and frame export.

use crate::automaton::{AnimationDriver, TickOutcome};

/// Feeds one frame-clock tick at `now_ms` (monotonic milliseconds).
///
/// # Safety
/// - `ptr` must be a valid pointer to a driver, or null
///
/// # Returns
/// - 0: paused, the host may stop scheduling ticks
/// - 1: running, frame interval not yet elapsed
/// - 2: one step completed
/// - -1: null pointer or a step aborted on a structural error
#[no_mangle]
pub unsafe extern "C" fn pa_tick(ptr: *mut AnimationDriver, now_ms: f64) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    match (*ptr).tick(now_ms) {
        Ok(TickOutcome::Paused) => 0,
        Ok(TickOutcome::Skipped) => 1,
        Ok(TickOutcome::Stepped(_)) => 2,
        Err(_) => -1,
    }
}

/// Writes the field edge lengths to `width` and `height`.
///
/// # Safety
/// - `ptr` must be a valid pointer to a driver, or null
/// - `width` and `height` must be valid for writes, or null
///
/// # Returns
/// The RGBA frame length in bytes, or 0 if any pointer is null.
#[no_mangle]
pub unsafe extern "C" fn pa_frame_size(
    ptr: *const AnimationDriver,
    width: *mut u32,
    height: *mut u32,
) -> u64 {
    if ptr.is_null() || width.is_null() || height.is_null() {
        return 0;
    }
    let driver = &*ptr;
    let (w, h) = driver.frame_size();
    *width = w as u32;
    *height = h as u32;
    driver.frame().len() as u64
}

/// Copies the last rendered RGBA frame into `out`.
///
/// # Safety
/// - `ptr` must be a valid pointer to a driver, or null
/// - `out` must be valid for `len` bytes of writes, or null
///
/// # Returns
/// The number of bytes written, or 0 if any pointer is null or `len` is not
/// exactly the frame length.
#[no_mangle]
pub unsafe extern "C" fn pa_copy_frame(
    ptr: *const AnimationDriver,
    out: *mut u8,
    len: u64,
) -> u64 {
    if ptr.is_null() || out.is_null() {
        return 0;
    }
    let out = std::slice::from_raw_parts_mut(out, len as usize);
    match (*ptr).copy_frame(out) {
        Ok(written) => written as u64,
        Err(_) => 0,
    }
}
