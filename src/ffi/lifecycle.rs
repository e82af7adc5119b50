//! Driver creation, destruction, and generation queries.

use tracing::warn;

use crate::automaton::AnimationDriver;
use crate::config::Preset;

/// Creates a driver from one of the shipped presets and returns an opaque
/// pointer.
///
/// `rng_seed == 0` seeds the random source from entropy; any other value
/// gives a reproducible stream.
///
/// # Returns
/// A pointer to a new driver, or null when `preset` is unknown.
///
/// # Safety
/// The returned pointer must eventually be freed with `pa_destroy()`.
#[no_mangle]
pub extern "C" fn pa_create(preset: u8, rng_seed: u64) -> *mut AnimationDriver {
    let Some(preset) = Preset::from_u8(preset) else {
        warn!(preset, "unknown preset");
        return std::ptr::null_mut();
    };

    let config = preset.config();
    let driver = if rng_seed == 0 {
        AnimationDriver::new(&config)
    } else {
        AnimationDriver::seeded(&config, rng_seed)
    };

    match driver {
        Ok(driver) => Box::into_raw(Box::new(driver)),
        Err(err) => {
            warn!(error = %err, "driver creation failed");
            std::ptr::null_mut()
        }
    }
}

/// Destroys a driver and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `pa_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn pa_destroy(ptr: *mut AnimationDriver) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the number of completed steps.
///
/// # Safety
/// - `ptr` must be a valid pointer to a driver, or null
///
/// # Returns
/// The generation counter, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn pa_get_generation(ptr: *const AnimationDriver) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).generation()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_create_and_destroy() {
        for preset in 0..5 {
            let driver = pa_create(preset, 1);
            assert!(!driver.is_null(), "preset {} should create", preset);
            unsafe { pa_destroy(driver) };
        }
    }

    #[test]
    fn test_create_unknown_preset() {
        assert!(pa_create(5, 1).is_null());
        assert!(pa_create(255, 0).is_null());
    }

    #[test]
    fn test_initial_generation() {
        unsafe {
            let driver = pa_create(0, 0);
            assert_eq!(pa_get_generation(driver), 0);
            pa_destroy(driver);
        }
    }

    #[test]
    fn test_destroy_null() {
        unsafe {
            // Should not crash
            pa_destroy(ptr::null_mut());
        }
    }

    #[test]
    fn test_get_generation_null() {
        unsafe {
            assert_eq!(pa_get_generation(ptr::null()), 0);
        }
    }
}
