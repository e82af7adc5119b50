//! One simulation step: scroll, append, recolor, lock.

use tracing::debug;

use super::grid::{neighbors_of, scroll_and_append, PixelField};
use super::locker::{apply_locks, scan_groups};
use super::palette::{ColorStrategy, PixelContext};
use super::random::RandomSource;
use super::rules::RuleToggleSet;
use crate::error::{AutomatonError, Result};
use crate::state::{State, CHANNELS};

/// What a completed step produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Field generation after the step.
    pub generation: u64,
    /// Groups found by the locker (0 when locking is off).
    pub groups: usize,
    pub locked: usize,
    pub reseeded: bool,
}

/// Color every cell of `field` into `out` (RGBA, alpha 255).
pub fn render_frame(
    field: &PixelField,
    palette: &dyn ColorStrategy,
    toggles: &RuleToggleSet,
    seed: Option<f64>,
    rng: &mut dyn RandomSource,
    out: &mut [u8],
) -> Result<()> {
    let expected = field.width * field.height * CHANNELS;
    if out.len() != expected {
        return Err(AutomatonError::DimensionMismatch {
            expected,
            actual: out.len(),
        });
    }

    for y in 0..field.height {
        for x in 0..field.width {
            let index = y * field.width + x;
            let hood = neighbors_of(field, x, y);
            let ctx = PixelContext {
                value: field.cells[index],
                neighbors: hood.as_slice(),
                x,
                y,
                index,
                seed,
                toggles,
            };
            let color = palette.color(&ctx, rng);

            let o = index * CHANNELS;
            out[o] = color.r;
            out[o + 1] = color.g;
            out[o + 2] = color.b;
            out[o + 3] = 255;
        }
    }
    Ok(())
}

/// Step the automaton forward by one column.
///
/// The frame buffer is checked before anything moves, so a structural
/// error leaves the field, the seed and the frame untouched.
pub fn step_automaton(state: &mut State, rng: &mut dyn RandomSource) -> Result<StepReport> {
    let expected = state.frame_len();
    if state.frame.len() != expected {
        return Err(AutomatonError::DimensionMismatch {
            expected,
            actual: state.frame.len(),
        });
    }

    let column = state.generator.next_column(&state.field, rng);
    scroll_and_append(&mut state.field, &column)?;
    let reseeded = state.generator.maybe_reseed(state.field.generation, rng);

    let mut next = vec![0u8; expected];
    render_frame(
        &state.field,
        state.palette.as_ref(),
        &state.toggles,
        state.generator.seed(),
        rng,
        &mut next,
    )?;

    let mut report = StepReport {
        generation: state.field.generation,
        reseeded,
        ..StepReport::default()
    };

    if state.locking {
        let scan = scan_groups(&next, state.field.width, state.field.height)?;
        report.groups = scan.len();
        report.locked = apply_locks(&mut next, &scan)?;
    }

    state.frame = next;

    debug!(
        generation = report.generation,
        groups = report.groups,
        locked = report.locked,
        "automaton stepped"
    );
    Ok(report)
}
