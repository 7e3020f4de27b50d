use crate::{
    composition::model::{Cue, Direction, EffectKind, Pose, RandomVariant},
    foundation::color::Rgb,
};

/// Default strobe frequency in Hz.
pub const DEFAULT_STROBE_HZ: f64 = 10.0;
/// Default chase head speed in LEDs per second.
pub const DEFAULT_CHASE_PX_PER_SEC: f64 = 20.0;
/// Default wave phase rate (radians per second).
pub const DEFAULT_WAVE_RATE: f64 = 5.0;
/// Default sparkle re-roll frequency in Hz.
pub const DEFAULT_SPARKLE_HZ: f64 = 15.0;
/// Default random re-roll frequency in Hz.
pub const DEFAULT_RANDOM_HZ: f64 = 10.0;

/// A cue's effect with kind-specific parameters resolved and defaulted.
///
/// Each variant carries only what its algorithm reads; the match in
/// [`crate::resolve_cue_contribution`] is exhaustive over these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    /// Primary everywhere.
    Solid,
    /// Primary on even steps, black on odd ones.
    Strobe {
        /// Steps per second.
        hz: f64,
    },
    /// A single moving head with a half-brightness trail.
    Chase {
        /// Head speed in LEDs per second.
        px_per_sec: f64,
        /// `Backward` starts at the end of the range.
        direction: Direction,
        /// Color of LEDs that are neither head nor trail.
        background: Rgb,
    },
    /// Lights a growing share of the range in index order.
    Fill {
        /// Which end of the range fills first.
        direction: Direction,
    },
    /// Clears a growing share of the range in index order.
    Wipe {
        /// Which end of the range clears first.
        direction: Direction,
    },
    /// Vertical fill over the body, head to feet.
    BodyFill {
        /// `Backward` runs feet to head.
        direction: Direction,
        /// Arm pose used for the wrist anchor.
        pose: Pose,
    },
    /// Vertical wipe over the body.
    BodyWipe {
        /// `Backward` runs feet to head.
        direction: Direction,
        /// Arm pose used for the wrist anchor.
        pose: Pose,
    },
    /// Horizontal fill over the body, left to right.
    BodyFillHorizontal {
        /// `Backward` runs right to left.
        direction: Direction,
    },
    /// Horizontal wipe over the body.
    BodyWipeHorizontal {
        /// `Backward` runs right to left.
        direction: Direction,
    },
    /// Secondary to primary over the window.
    Fade {
        /// Starting color.
        from: Rgb,
    },
    /// Primary to secondary over the window.
    Blend {
        /// Ending color.
        to: Rgb,
    },
    /// Primary dimmed by a travelling sine.
    Wave {
        /// Phase rate.
        rate: f64,
    },
    /// Pseudo-random LEDs flash primary.
    Sparkle {
        /// Re-rolls per second.
        hz: f64,
    },
    /// Primary to `to` across the LED range.
    Gradient {
        /// Color at the end of the range.
        to: Rgb,
    },
    /// Random fully saturated hues.
    Random {
        /// Re-rolls per second.
        hz: f64,
        /// One hue per LED or one for the whole range.
        variant: RandomVariant,
    },
    /// LEDs switch on in a fixed scattered order.
    RandomFill,
}

impl Effect {
    /// The serialized kind this effect was built from.
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Solid => EffectKind::Solid,
            Self::Strobe { .. } => EffectKind::Strobe,
            Self::Chase { .. } => EffectKind::Chase,
            Self::Fill { .. } => EffectKind::Fill,
            Self::Wipe { .. } => EffectKind::Wipe,
            Self::BodyFill { .. } => EffectKind::BodyFill,
            Self::BodyWipe { .. } => EffectKind::BodyWipe,
            Self::BodyFillHorizontal { .. } => EffectKind::BodyFillHorizontal,
            Self::BodyWipeHorizontal { .. } => EffectKind::BodyWipeHorizontal,
            Self::Fade { .. } => EffectKind::Fade,
            Self::Blend { .. } => EffectKind::Blend,
            Self::Wave { .. } => EffectKind::Wave,
            Self::Sparkle { .. } => EffectKind::Sparkle,
            Self::Gradient { .. } => EffectKind::Gradient,
            Self::Random { .. } => EffectKind::Random,
            Self::RandomFill => EffectKind::RandomFill,
        }
    }
}

impl From<&Cue> for Effect {
    fn from(cue: &Cue) -> Self {
        let direction = cue.direction.unwrap_or_default();
        let pose = cue.pose.unwrap_or_default();
        let secondary = cue.secondary_color.unwrap_or(Rgb::BLACK);
        let speed = |default: f64| match cue.speed {
            Some(s) if s != 0.0 && !s.is_nan() => s,
            _ => default,
        };

        match cue.kind {
            EffectKind::Solid => Self::Solid,
            EffectKind::Strobe => Self::Strobe {
                hz: speed(DEFAULT_STROBE_HZ),
            },
            EffectKind::Chase => Self::Chase {
                px_per_sec: speed(DEFAULT_CHASE_PX_PER_SEC),
                direction,
                background: secondary,
            },
            EffectKind::Fill => Self::Fill { direction },
            EffectKind::Wipe => Self::Wipe { direction },
            EffectKind::BodyFill => Self::BodyFill { direction, pose },
            EffectKind::BodyWipe => Self::BodyWipe { direction, pose },
            EffectKind::BodyFillHorizontal => Self::BodyFillHorizontal { direction },
            EffectKind::BodyWipeHorizontal => Self::BodyWipeHorizontal { direction },
            EffectKind::Fade => Self::Fade { from: secondary },
            EffectKind::Blend => Self::Blend { to: secondary },
            EffectKind::Wave => Self::Wave {
                rate: speed(DEFAULT_WAVE_RATE),
            },
            EffectKind::Sparkle => Self::Sparkle {
                hz: speed(DEFAULT_SPARKLE_HZ),
            },
            EffectKind::Gradient => Self::Gradient { to: secondary },
            EffectKind::Random => Self::Random {
                hz: speed(DEFAULT_RANDOM_HZ),
                variant: cue.variant.unwrap_or_default(),
            },
            EffectKind::RandomFill => Self::RandomFill,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/effect.rs"]
mod tests;
