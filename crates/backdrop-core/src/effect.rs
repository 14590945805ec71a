//! Effect selection and animation speed.

use serde::{Deserialize, Serialize};

/// Which background effect is mounted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectStyle {
    None,
    /// Drifting starfield with depth parallax.
    #[default]
    Starfield,
    /// Morphing blob pushed around by the pointer.
    LiquidBlob,
    /// Stacked parallax layers with cursor trail and click ripples.
    Parallax,
    /// Tilting lattice of dots riding a travelling wave.
    WaveGrid,
    /// Rotating sphere inside a slowly orbiting particle cloud.
    #[serde(rename = "hero_3d")]
    Hero3D,
}

impl EffectStyle {
    /// Every style in cycling order.
    pub const ALL: [EffectStyle; 6] = [
        EffectStyle::Starfield,
        EffectStyle::LiquidBlob,
        EffectStyle::Parallax,
        EffectStyle::WaveGrid,
        EffectStyle::Hero3D,
        EffectStyle::None,
    ];

    /// Cycle to the next style.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Cycle to the previous style.
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Human readable name for the help line.
    pub fn name(self) -> &'static str {
        match self {
            EffectStyle::None => "none",
            EffectStyle::Starfield => "starfield",
            EffectStyle::LiquidBlob => "liquid blob",
            EffectStyle::Parallax => "parallax",
            EffectStyle::WaveGrid => "wave grid",
            EffectStyle::Hero3D => "hero 3d",
        }
    }
}

/// Global animation speed multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Cycle to the next speed.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Factor applied to wall-clock time before it reaches the effects.
    pub fn time_scale(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 1.75,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }
}
