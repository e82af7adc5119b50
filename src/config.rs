//! Session configuration and the shipped presets.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::automaton::generator::GeneratorVariant;
use crate::automaton::palette::{PaletteKind, PaletteStyle, Precedence};
use crate::error::{AutomatonError, Result};

/// Largest accepted grid edge.
pub const MAX_GRID_SIZE: usize = 4096;
pub const DEFAULT_GRID_SIZE: usize = 256;
/// Edge used by the rules panel and the grouping view.
pub const PANEL_GRID_SIZE: usize = 240;

pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 60;
pub const DEFAULT_FPS: u32 = 20;

/// Ticks between noise seed re-rolls in the randomized generator.
pub const DEFAULT_RESEED_EVERY: u64 = 100;

/// Everything needed to build a session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct AutomatonConfig {
    /// Grid edge; the field is `size` x `size`.
    pub size: usize,
    pub fps: u32,
    pub generator: GeneratorVariant,
    pub palette: PaletteKind,
    /// Run the component locker after every recolor.
    pub locking: bool,
    /// Starting noise seed. Drawn from the random source when absent.
    pub seed: Option<f64>,
    pub reseed_every: u64,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self::number_stream()
    }
}

impl AutomatonConfig {
    /// Plain counter values, fixed classification colors.
    pub fn number_stream() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            fps: DEFAULT_FPS,
            generator: GeneratorVariant::Plain,
            palette: PaletteKind::Classification {
                style: PaletteStyle::Plain,
                precedence: Precedence::ContactFirst,
            },
            locking: false,
            seed: None,
            reseed_every: DEFAULT_RESEED_EVERY,
        }
    }

    /// Noise + Fibonacci values, position-tinted colors, cluster branch first.
    pub fn artistic_stream() -> Self {
        Self {
            generator: GeneratorVariant::Noise { seeded: false },
            palette: PaletteKind::Classification {
                style: PaletteStyle::Artistic,
                precedence: Precedence::ClusterFirst,
            },
            ..Self::number_stream()
        }
    }

    /// Seeded noise, random bias on values and colors, periodic re-seeding.
    pub fn randomized_stream() -> Self {
        Self {
            generator: GeneratorVariant::Randomized,
            palette: PaletteKind::Classification {
                style: PaletteStyle::Randomized,
                precedence: Precedence::ClusterFirst,
            },
            ..Self::number_stream()
        }
    }

    /// Random pixels shaped by the toggle rules.
    pub fn rules_panel() -> Self {
        Self {
            size: PANEL_GRID_SIZE,
            fps: 30,
            palette: PaletteKind::Toggles,
            ..Self::number_stream()
        }
    }

    /// Seeded noise values with the component locker enabled.
    pub fn grouping() -> Self {
        Self {
            size: PANEL_GRID_SIZE,
            generator: GeneratorVariant::Noise { seeded: true },
            palette: PaletteKind::Classification {
                style: PaletteStyle::Artistic,
                precedence: Precedence::ContactFirst,
            },
            locking: true,
            ..Self::number_stream()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 || self.size > MAX_GRID_SIZE {
            return Err(AutomatonError::InvalidSize(self.size));
        }
        validate_speed(self.fps)?;
        Ok(())
    }
}

/// Accept `fps` in `MIN_FPS..=MAX_FPS`.
pub fn validate_speed(fps: u32) -> Result<u32> {
    if (MIN_FPS..=MAX_FPS).contains(&fps) {
        Ok(fps)
    } else {
        Err(AutomatonError::InvalidSpeed(fps))
    }
}

/// Preset identifiers for hosts that cannot build a config struct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Preset {
    NumberStream = 0,
    ArtisticStream = 1,
    RandomizedStream = 2,
    RulesPanel = 3,
    Grouping = 4,
}

impl Preset {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Preset::NumberStream),
            1 => Some(Preset::ArtisticStream),
            2 => Some(Preset::RandomizedStream),
            3 => Some(Preset::RulesPanel),
            4 => Some(Preset::Grouping),
            _ => None,
        }
    }

    pub fn config(self) -> AutomatonConfig {
        match self {
            Preset::NumberStream => AutomatonConfig::number_stream(),
            Preset::ArtisticStream => AutomatonConfig::artistic_stream(),
            Preset::RandomizedStream => AutomatonConfig::randomized_stream(),
            Preset::RulesPanel => AutomatonConfig::rules_panel(),
            Preset::Grouping => AutomatonConfig::grouping(),
        }
    }
}
