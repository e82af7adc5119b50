//! Color rules: cell value + neighborhood (+ toggles) to RGB.
//!
//! Two strategies share [`PixelContext`]:
//! - [`ClassificationPalette`] maps a value to a color by its class and the
//!   classes of its neighbors (first matching branch wins).
//! - [`TogglePalette`] starts from a random color per pixel and applies every
//!   active [`ToggleRule`] in a fixed order.
//!
//! Channel arithmetic is per branch: some branches wrap with `% 255`, others
//! add jitter to a constant and rely on the final clamp. All channels are
//! clamped to `0..=255` (and rounded) only when the color is emitted.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::classify::{is_even, is_odd, is_prime, NeighborCounts};
use super::generator::random_bias;
use super::random::{random_channel, RandomSource};
use super::rules::{RuleToggleSet, ToggleRule};

/// Probability of the white static flash on the background branch.
pub const STATIC_FLASH_PROBABILITY: f64 = 0.001;
/// Per-pixel probability of a neon blip when the rule is active.
pub const NEON_BLIP_PROBABILITY: f64 = 0.02;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const PURPLE: Rgb = Rgb::new(128, 0, 128);
    pub const RED: Rgb = Rgb::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Emit intermediate channels, clamping to `0..=255` and rounding half to even.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        Self::new(emit_channel(r), emit_channel(g), emit_channel(b))
    }

    /// Three uniform channels, drawn r, g, b.
    pub fn random(rng: &mut dyn RandomSource) -> Self {
        let r = random_channel(rng);
        let g = random_channel(rng);
        let b = random_channel(rng);
        Self::new(r, g, b)
    }

    /// `floor((r + g + b) / 3)`
    #[inline]
    pub fn average(self) -> u8 {
        ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
    }
}

#[inline]
fn emit_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round_ties_even() as u8
}

/// Truncating remainder by 255; negative inputs stay negative.
#[inline]
fn wrap255(value: f64) -> f64 {
    value % 255.0
}

/// Everything a strategy may read for one pixel.
pub struct PixelContext<'a> {
    pub value: i64,
    pub neighbors: &'a [i64],
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
    /// Flat raster index, `y * width + x`.
    pub index: usize,
    pub seed: Option<f64>,
    pub toggles: &'a RuleToggleSet,
}

/// Maps one pixel to a color. Strategies draw randomness only from `rng`.
pub trait ColorStrategy {
    fn color(&self, ctx: &PixelContext<'_>, rng: &mut dyn RandomSource) -> Rgb;
}

/// Jitter applied on top of the classification colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PaletteStyle {
    /// Fixed colors per branch.
    Plain,
    /// Position-dependent noise factor on every branch.
    Artistic,
    /// Seeded noise factor, per-pixel random bias and rare white static.
    Randomized,
}

/// Branch order for the classification palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Precedence {
    /// prime-contact, even-meets-odd, prime-cluster, prime, even, odd.
    #[default]
    ContactFirst,
    /// prime-cluster, even-meets-odd, prime-contact, prime, even, odd.
    ClusterFirst,
}

/// The branch a value falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Branch {
    /// Prime next to at least one even or odd neighbor: yellow.
    PrimeContact,
    /// Even next to at least one odd neighbor: purple.
    EvenMeetsOdd,
    /// Prime with more than one prime neighbor: per-channel rainbow.
    PrimeCluster,
    Prime,
    Even,
    Odd,
    /// Neither even nor odd (negative odd values).
    Background,
}

/// `(sin(x * 0.01 + y * 0.01) + 1) / 2`, both coordinates shifted by `seed`.
pub fn noise_factor(x: usize, y: usize, seed: Option<f64>) -> f64 {
    let shift = seed.unwrap_or(0.0);
    (((x as f64 + shift) * 0.01 + (y as f64 + shift) * 0.01).sin() + 1.0) * 0.5
}

/// Mode A: value classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassificationPalette {
    pub style: PaletteStyle,
    pub precedence: Precedence,
}

impl ClassificationPalette {
    pub fn new(style: PaletteStyle, precedence: Precedence) -> Self {
        Self { style, precedence }
    }

    /// First branch whose condition holds, in this palette's precedence.
    pub fn branch(&self, value: i64, neighbors: &[i64]) -> Branch {
        let counts = NeighborCounts::tally(neighbors);
        let prime = is_prime(value);
        let even = is_even(value);

        let contact = prime && (counts.evens > 0 || counts.odds > 0);
        let even_meets_odd = even && counts.odds > 0;
        let cluster = prime && counts.primes > 1;

        let leading = match self.precedence {
            Precedence::ContactFirst => [
                (contact, Branch::PrimeContact),
                (even_meets_odd, Branch::EvenMeetsOdd),
                (cluster, Branch::PrimeCluster),
            ],
            Precedence::ClusterFirst => [
                (cluster, Branch::PrimeCluster),
                (even_meets_odd, Branch::EvenMeetsOdd),
                (contact, Branch::PrimeContact),
            ],
        };
        if let Some(&(_, branch)) = leading.iter().find(|(hit, _)| *hit) {
            return branch;
        }

        if prime {
            Branch::Prime
        } else if even {
            Branch::Even
        } else if is_odd(value) {
            Branch::Odd
        } else {
            Branch::Background
        }
    }
}

impl ColorStrategy for ClassificationPalette {
    fn color(&self, ctx: &PixelContext<'_>, rng: &mut dyn RandomSource) -> Rgb {
        let (nf, bias) = match self.style {
            PaletteStyle::Plain => (0.0, 0.0),
            PaletteStyle::Artistic => (noise_factor(ctx.x, ctx.y, None), 0.0),
            // One bias draw per pixel, before the branch is known.
            PaletteStyle::Randomized => (noise_factor(ctx.x, ctx.y, ctx.seed), random_bias(rng)),
        };
        let v = ctx.value as f64;

        match self.branch(ctx.value, ctx.neighbors) {
            Branch::PrimeContact => {
                Rgb::from_channels(255.0, 255.0, (nf * 100.0 + bias * 100.0).floor())
            }
            // Jitter on a constant: clamped, never wrapped.
            Branch::EvenMeetsOdd => {
                Rgb::from_channels(128.0 + bias * 50.0, 0.0, 128.0 + bias * 50.0)
            }
            Branch::PrimeCluster => Rgb::from_channels(
                wrap255(v * 3.0 + (nf * 255.0).floor() + bias * 100.0),
                wrap255(v * 5.0 + (nf * 180.0).floor() + bias * 150.0),
                wrap255(v * 7.0 + (nf * 200.0).floor() + bias * 200.0),
            ),
            Branch::Prime => Rgb::RED,
            Branch::Even => {
                Rgb::from_channels(0.0, 0.0, wrap255(v * 5.0 + (nf * 100.0).floor() + bias * 100.0))
            }
            Branch::Odd => {
                Rgb::from_channels(0.0, wrap255(v * 7.0 + (nf * 150.0).floor() + bias * 150.0), 0.0)
            }
            Branch::Background => {
                if self.style == PaletteStyle::Randomized
                    && rng.next_uniform() < STATIC_FLASH_PROBABILITY
                {
                    Rgb::WHITE
                } else {
                    Rgb::BLACK
                }
            }
        }
    }
}

/// Mode B: random base color mutated by the active toggles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TogglePalette;

/// Apply one toggle to the running color of pixel `index`.
pub fn apply_toggle(
    rule: ToggleRule,
    color: Rgb,
    index: usize,
    rng: &mut dyn RandomSource,
) -> Rgb {
    match rule {
        ToggleRule::RainbowDrift => Rgb::new(
            color.r.wrapping_add(10),
            color.g.wrapping_add(7),
            color.b.wrapping_add(13),
        ),
        ToggleRule::GreyscaleMode => {
            let avg = color.average();
            Rgb::new(avg, avg, avg)
        }
        ToggleRule::NegativeWorld if index % 5 == 0 => {
            Rgb::new(255 - color.r, 255 - color.g, 255 - color.b)
        }
        ToggleRule::NegativeWorld => color,
        // Replaces the accumulated color; later rules still apply on top.
        ToggleRule::RandomNeonBlips => {
            if rng.next_uniform() < NEON_BLIP_PROBABILITY {
                Rgb::random(rng)
            } else {
                color
            }
        }
        ToggleRule::PrimeNumberClusters if is_prime(index as i64) => Rgb::YELLOW,
        ToggleRule::PrimeNumberClusters => color,
        ToggleRule::EvenOddChecker if index % 2 == 0 => {
            Rgb::new(color.r.saturating_sub(20), color.g, color.b)
        }
        ToggleRule::EvenOddChecker => color,
        ToggleRule::GravityPull => Rgb::new(color.r, color.g, color.b.saturating_sub(10)),
        ToggleRule::PixelMass => {
            let mass = color.average();
            Rgb::new(mass, mass, mass.saturating_add(20))
        }
    }
}

impl ColorStrategy for TogglePalette {
    fn color(&self, ctx: &PixelContext<'_>, rng: &mut dyn RandomSource) -> Rgb {
        let base = Rgb::random(rng);
        ctx.toggles
            .active_rules()
            .fold(base, |color, rule| apply_toggle(rule, color, ctx.index, &mut *rng))
    }
}

/// Which strategy a session renders with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PaletteKind {
    Classification {
        style: PaletteStyle,
        precedence: Precedence,
    },
    Toggles,
}

impl PaletteKind {
    pub fn build(self) -> Box<dyn ColorStrategy> {
        match self {
            PaletteKind::Classification { style, precedence } => {
                Box::new(ClassificationPalette::new(style, precedence))
            }
            PaletteKind::Toggles => Box::new(TogglePalette),
        }
    }
}
