//! Core session state and helper methods.

use crate::automaton::generator::ValueGenerator;
use crate::automaton::grid::{create_field, PixelField};
use crate::automaton::palette::ColorStrategy;
use crate::automaton::random::RandomSource;
use crate::automaton::rules::RuleToggleSet;
use crate::config::AutomatonConfig;
use crate::error::Result;

/// Bytes per rendered pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Everything one simulation step reads and writes.
pub struct State {
    pub field: PixelField,
    pub generator: ValueGenerator,
    pub palette: Box<dyn ColorStrategy>,
    pub locking: bool,
    /// Toggle snapshot every pixel of a step sees.
    pub toggles: RuleToggleSet,
    /// Last rendered RGBA frame, row-major.
    pub frame: Vec<u8>,
}

impl State {
    /// Build a session from a validated config. A seeded generator without
    /// an explicit seed draws one from `rng`.
    pub fn from_config(config: &AutomatonConfig, rng: &mut dyn RandomSource) -> Result<Self> {
        config.validate()?;
        let field = create_field(config.size, config.size)?;
        let generator = ValueGenerator::new(config.generator, config.seed, config.reseed_every, rng);
        let frame = opaque_black(field.width * field.height);

        Ok(State {
            field,
            generator,
            palette: config.palette.build(),
            locking: config.locking,
            toggles: RuleToggleSet::new(),
            frame,
        })
    }

    /// Byte length of a full RGBA frame for this field.
    #[inline]
    pub fn frame_len(&self) -> usize {
        self.field.width * self.field.height * CHANNELS
    }

    /// Byte offset of pixel `(x, y)` in the frame.
    #[inline]
    pub fn frame_offset(&self, x: usize, y: usize) -> usize {
        (y * self.field.width + x) * CHANNELS
    }
}

/// `pixels` pixels of (0, 0, 0, 255).
pub fn opaque_black(pixels: usize) -> Vec<u8> {
    let mut frame = vec![0u8; pixels * CHANNELS];
    for px in frame.chunks_exact_mut(CHANNELS) {
        px[3] = 255;
    }
    frame
}
