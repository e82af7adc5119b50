//! Pixel Automata - frame-stepped number-to-color automaton
//!
//! A square field of integers scrolls one column left per step while a
//! generator appends a fresh column on the right. Every cell is colored from
//! its number-theoretic class and that of its neighbors, optional toggle
//! rules reshape the colors, and a flood-fill pass can lock small groups.
//!
//! Rust callers drive [`AnimationDriver`] directly; other hosts go through
//! the C ABI in [`ffi`].

pub mod automaton;
pub mod config;
pub mod error;
pub mod ffi;
pub mod state;

#[cfg(test)]
mod tests;

pub use automaton::{AnimationDriver, StepReport, TickOutcome};
pub use config::{AutomatonConfig, Preset};
pub use error::{AutomatonError, Result};
pub use state::State;
