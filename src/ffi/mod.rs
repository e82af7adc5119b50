//! C FFI layer for embedding hosts.
//!
//! Every function is `#[no_mangle] extern "C"` and takes the opaque
//! [`AnimationDriver`](crate::automaton::AnimationDriver) handle returned by
//! `pa_create`. These are thin wrappers: they handle null checks, pointer
//! safety and C-to-Rust conversions, and the logic stays in `automaton`.
//!
//! Status codes follow one convention: `0` success, `1` rejected input with
//! state unchanged, `-1` null handle or structural error.

pub mod control;
pub mod frame;
pub mod lifecycle;

pub use control::{
    pa_get_speed, pa_is_running, pa_rule_active, pa_set_running, pa_set_speed, pa_toggle_rule,
};
pub use frame::{pa_copy_frame, pa_frame_size, pa_tick};
pub use lifecycle::{pa_create, pa_destroy, pa_get_generation};
