//! Frame-clock driven control loop.
//!
//! The host's frame clock calls [`AnimationDriver::tick`] with a monotonic
//! timestamp in milliseconds. While running, a tick performs at most one
//! step, and only once `1000 / fps` ms have elapsed since the last accepted
//! tick. The accepted timestamp is pulled back by the overshoot
//! (`now - elapsed % interval`) so the cadence does not drift.
//!
//! Control calls never touch state mid-step: rule toggles are queued and
//! applied at the start of the next step, so every pixel of a step sees the
//! same toggle snapshot.

use tracing::{debug, info, trace, warn};

use super::random::{RandomSource, SmallRngSource};
use super::rules::{is_catalog_rule, RuleToggleSet};
use super::stepping::{step_automaton, StepReport};
use crate::config::{validate_speed, AutomatonConfig};
use crate::error::{AutomatonError, Result};
use crate::state::State;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused: nothing happened and the host should stop re-registering.
    Paused,
    /// Running, but the frame interval has not elapsed yet.
    Skipped,
    Stepped(StepReport),
}

impl TickOutcome {
    /// Whether the host should request another tick.
    pub fn reschedule(&self) -> bool {
        !matches!(self, TickOutcome::Paused)
    }
}

/// Owns the session state, the run state and the random source.
pub struct AnimationDriver {
    pub state: State,
    run_state: RunState,
    fps: u32,
    last_frame_ms: f64,
    pending_toggles: Vec<String>,
    rng: Box<dyn RandomSource>,
}

impl AnimationDriver {
    /// Driver with an entropy-seeded random source. Starts running.
    pub fn new(config: &AutomatonConfig) -> Result<Self> {
        Self::with_random_source(config, Box::new(SmallRngSource::from_entropy()))
    }

    /// Driver with a reproducible random stream.
    pub fn seeded(config: &AutomatonConfig, seed: u64) -> Result<Self> {
        Self::with_random_source(config, Box::new(SmallRngSource::seeded(seed)))
    }

    pub fn with_random_source(
        config: &AutomatonConfig,
        mut rng: Box<dyn RandomSource>,
    ) -> Result<Self> {
        let state = State::from_config(config, rng.as_mut())?;
        Ok(AnimationDriver {
            state,
            run_state: RunState::Running,
            fps: config.fps,
            last_frame_ms: 0.0,
            pending_toggles: Vec::new(),
            rng,
        })
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn set_running(&mut self, running: bool) {
        let next = if running {
            RunState::Running
        } else {
            RunState::Paused
        };
        if next != self.run_state {
            info!(state = ?next, "run state changed");
            self.run_state = next;
        }
    }

    pub fn speed(&self) -> u32 {
        self.fps
    }

    /// Change the frame rate. Out-of-range values are rejected and the
    /// previous speed is kept.
    pub fn set_speed(&mut self, fps: u32) -> Result<()> {
        match validate_speed(fps) {
            Ok(fps) => {
                if fps != self.fps {
                    info!(fps, "speed changed");
                }
                self.fps = fps;
                Ok(())
            }
            Err(err) => {
                warn!(fps, current = self.fps, "rejected speed");
                Err(err)
            }
        }
    }

    /// Milliseconds between steps at the current speed.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.fps as f64
    }

    pub fn last_frame_ms(&self) -> f64 {
        self.last_frame_ms
    }

    /// Queue a rule toggle for the next step. Returns whether the name is
    /// in the rule catalog; unknown names are dropped without queueing.
    pub fn toggle_rule(&mut self, name: &str) -> bool {
        if !is_catalog_rule(name) {
            debug!(rule = name, "ignoring unknown rule");
            return false;
        }
        self.pending_toggles.push(name.to_owned());
        true
    }

    pub fn pending_toggles(&self) -> usize {
        self.pending_toggles.len()
    }

    /// Toggle snapshot used by the most recent step.
    pub fn toggles(&self) -> &RuleToggleSet {
        &self.state.toggles
    }

    pub fn generation(&self) -> u64 {
        self.state.field.generation
    }

    /// Last rendered RGBA frame.
    pub fn frame(&self) -> &[u8] {
        &self.state.frame
    }

    pub fn frame_size(&self) -> (usize, usize) {
        (self.state.field.width, self.state.field.height)
    }

    /// Copy the last frame into a renderer-owned buffer of exactly the
    /// frame's length. Returns the number of bytes written.
    pub fn copy_frame(&self, out: &mut [u8]) -> Result<usize> {
        let frame = self.frame();
        if out.len() != frame.len() {
            return Err(AutomatonError::DimensionMismatch {
                expected: frame.len(),
                actual: out.len(),
            });
        }
        out.copy_from_slice(frame);
        Ok(frame.len())
    }

    /// Apply queued toggles, then run one step regardless of timing.
    ///
    /// The new toggle snapshot is committed only with a successful step; on
    /// error the previous snapshot and the queue are left as they were.
    pub fn step(&mut self) -> Result<StepReport> {
        let mut next = self.state.toggles.clone();
        for name in &self.pending_toggles {
            next.toggle(name);
        }
        let previous = std::mem::replace(&mut self.state.toggles, next);

        match step_automaton(&mut self.state, self.rng.as_mut()) {
            Ok(report) => {
                self.pending_toggles.clear();
                Ok(report)
            }
            Err(err) => {
                self.state.toggles = previous;
                Err(err)
            }
        }
    }

    /// Handle one frame-clock tick at `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> Result<TickOutcome> {
        if self.run_state == RunState::Paused {
            return Ok(TickOutcome::Paused);
        }

        let elapsed = now_ms - self.last_frame_ms;
        let interval = self.frame_interval_ms();
        if elapsed < interval {
            trace!(elapsed, interval, "tick skipped");
            return Ok(TickOutcome::Skipped);
        }

        match self.step() {
            Ok(report) => {
                self.last_frame_ms = now_ms - (elapsed % interval);
                Ok(TickOutcome::Stepped(report))
            }
            Err(err) => {
                warn!(error = %err, "step aborted");
                Err(err)
            }
        }
    }
}
