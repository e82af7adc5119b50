//! Named toggle rules and the per-session toggle set.
//!
//! The rules panel offers twenty names in three categories. Eight of them
//! mutate colors (see [`ToggleRule`]); the rest can be switched on and off
//! but have no effect. Names outside the catalog are ignored.

use std::collections::BTreeMap;

use tracing::debug;

/// A panel category and the rule names it lists.
pub struct RuleCategory {
    pub title: &'static str,
    pub rules: &'static [&'static str],
}

pub const RULE_CATEGORIES: &[RuleCategory] = &[
    RuleCategory {
        title: "Color Dynamics",
        rules: &[
            "Rainbow Drift",
            "Heatmap Mode",
            "Greyscale Mode",
            "Negative World",
            "Pulse Glow",
            "Color Echo",
            "Spectrum Waves",
            "Inverted Spectrum",
            "Contrast Boost",
            "Random Neon Blips",
        ],
    },
    RuleCategory {
        title: "Mathematical Patterns",
        rules: &[
            "Fibonacci Spiral",
            "Prime Number Clusters",
            "Multiplication Table Grid",
            "Even/Odd Checker",
            "Power of Two Highlights",
        ],
    },
    RuleCategory {
        title: "Physics Principles",
        rules: &[
            "Gravity Pull",
            "Pixel Mass",
            "Magnetic Attraction",
            "Brownian Motion",
            "Thermal Diffusion",
        ],
    },
];

/// Whether `name` appears anywhere in [`RULE_CATEGORIES`].
pub fn is_catalog_rule(name: &str) -> bool {
    RULE_CATEGORIES
        .iter()
        .any(|category| category.rules.contains(&name))
}

/// Rules that mutate colors, declared in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToggleRule {
    RainbowDrift,
    GreyscaleMode,
    NegativeWorld,
    RandomNeonBlips,
    PrimeNumberClusters,
    EvenOddChecker,
    GravityPull,
    PixelMass,
}

impl ToggleRule {
    /// Fixed evaluation order. Callers never choose the order.
    pub const ORDER: [ToggleRule; 8] = [
        ToggleRule::RainbowDrift,
        ToggleRule::GreyscaleMode,
        ToggleRule::NegativeWorld,
        ToggleRule::RandomNeonBlips,
        ToggleRule::PrimeNumberClusters,
        ToggleRule::EvenOddChecker,
        ToggleRule::GravityPull,
        ToggleRule::PixelMass,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToggleRule::RainbowDrift => "Rainbow Drift",
            ToggleRule::GreyscaleMode => "Greyscale Mode",
            ToggleRule::NegativeWorld => "Negative World",
            ToggleRule::RandomNeonBlips => "Random Neon Blips",
            ToggleRule::PrimeNumberClusters => "Prime Number Clusters",
            ToggleRule::EvenOddChecker => "Even/Odd Checker",
            ToggleRule::GravityPull => "Gravity Pull",
            ToggleRule::PixelMass => "Pixel Mass",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ToggleRule::ORDER.into_iter().find(|rule| rule.name() == name)
    }
}

/// Rule name to active flag. Only catalog names are ever stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleToggleSet {
    active: BTreeMap<String, bool>,
}

impl RuleToggleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `name`. Returns the new state, or `None` for unknown names.
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        if !is_catalog_rule(name) {
            debug!(rule = name, "ignoring unknown rule");
            return None;
        }
        let state = self.active.entry(name.to_owned()).or_insert(false);
        *state = !*state;
        Some(*state)
    }

    /// Set `name` explicitly. Unknown names are ignored.
    pub fn set(&mut self, name: &str, on: bool) {
        if is_catalog_rule(name) {
            self.active.insert(name.to_owned(), on);
        }
    }

    pub fn is_named_active(&self, name: &str) -> bool {
        self.active.get(name).copied().unwrap_or(false)
    }

    #[inline]
    pub fn is_active(&self, rule: ToggleRule) -> bool {
        self.is_named_active(rule.name())
    }

    /// Active color rules, in evaluation order.
    pub fn active_rules(&self) -> impl Iterator<Item = ToggleRule> + '_ {
        ToggleRule::ORDER
            .into_iter()
            .filter(move |&rule| self.is_active(rule))
    }
}
