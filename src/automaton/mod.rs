//! Core automaton logic.
//!
//! Value generation, classification, coloring, grouping and the frame-clock
//! driver all live here. The FFI layer in `ffi/` calls into
//! [`driver::AnimationDriver`].

pub mod classify;
pub mod driver;
pub mod generator;
pub mod grid;
pub mod locker;
pub mod palette;
pub mod random;
pub mod rules;
pub mod stepping;

pub use classify::{is_even, is_odd, is_power_of_base, is_prime, Classification, NeighborCounts};
pub use driver::{AnimationDriver, RunState, TickOutcome};
pub use generator::{GeneratorVariant, ValueGenerator};
pub use grid::{create_field, index_of, neighbors_of, scroll_and_append, PixelField};
pub use locker::{apply_locks, scan_groups, LockScan, PixelGroup};
pub use palette::{ColorStrategy, PaletteKind, PaletteStyle, Precedence, Rgb};
pub use random::{RandomSource, SequenceSource, SmallRngSource};
pub use rules::{RuleToggleSet, ToggleRule, RULE_CATEGORIES};
pub use stepping::{render_frame, step_automaton, StepReport};
