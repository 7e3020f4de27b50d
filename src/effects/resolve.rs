use crate::{
    composition::model::{Cue, Direction, EffectKind, RandomVariant},
    effects::effect::Effect,
    foundation::color::Rgb,
    foundation::math::clamp01,
    geometry::layout::ChannelLayout,
};

/// Body sweeps travel over `-0.05..=1.05` so extremities fully resolve at
/// progress 0 and 1.
const SWEEP_START: f64 = -0.05;
const SWEEP_END: f64 = 1.05;
const SWEEP_SPAN: f64 = 1.1;
/// Fraction of LEDs lit by a sparkle at any step is `1 - SPARKLE_GATE`.
const SPARKLE_GATE: f64 = 0.8;

/// Color contributed by one cue to one LED at `time` (milliseconds).
///
/// The caller is responsible for the LED range and active-window checks; this
/// only runs the kind's algorithm and the cue's brightness. "Nothing right
/// now" is [`Rgb::BLACK`].
pub fn resolve_cue_contribution(cue: &Cue, led: u16, time: f64, layout: &ChannelLayout) -> Rgb {
    let rel = time - cue.start_time;
    let effect = Effect::from(cue);
    let color = resolve_effect(&effect, cue, led, rel, layout);
    match cue.brightness {
        Some(b) if b < 100.0 => color.dim(b.max(0.0) / 100.0),
        _ => color,
    }
}

fn resolve_effect(effect: &Effect, cue: &Cue, led: u16, rel: f64, layout: &ChannelLayout) -> Rgb {
    let primary = cue.color;
    let width = i64::from(cue.led_range_end) - i64::from(cue.led_range_start);
    let offset = i64::from(led) - i64::from(cue.led_range_start);
    let lit = |on: bool| if on { primary } else { Rgb::BLACK };

    match *effect {
        Effect::Solid => primary,

        Effect::Strobe { hz } => {
            let step = (rel / (1000.0 / hz)).floor() as i64;
            lit(step.rem_euclid(2) == 0)
        }

        Effect::Chase {
            px_per_sec,
            direction,
            background,
        } => {
            if width <= 0 {
                return Rgb::BLACK;
            }
            let travelled = (rel / 1000.0) * px_per_sec;
            let mut head = (travelled.floor() as i64).rem_euclid(width);
            let backward = direction == Direction::Backward;
            if backward {
                head = width - 1 - head;
            }
            let trail = if backward {
                offset == head + 1 || (head == width - 1 && offset == 0)
            } else {
                offset == head - 1 || (head == 0 && offset == width - 1)
            };
            if offset == head {
                primary
            } else if trail {
                primary.dim(0.5)
            } else {
                background
            }
        }

        Effect::Fill { direction } => {
            let filled = (progress(cue, rel) * width as f64).floor() as i64;
            lit(match direction {
                Direction::Forward => offset < filled,
                Direction::Backward => offset >= width - filled,
            })
        }

        Effect::Wipe { direction } => {
            let wiped = (progress(cue, rel) * width as f64).floor() as i64;
            lit(match direction {
                Direction::Forward => offset >= wiped,
                Direction::Backward => offset < width - wiped,
            })
        }

        Effect::BodyFill { direction, pose } => {
            let y = layout.approximate_y(led, pose, direction, EffectKind::BodyFill);
            lit(sweep_covers(y, progress(cue, rel), direction, Sweep::Fill))
        }

        Effect::BodyWipe { direction, pose } => {
            let y = layout.approximate_y(led, pose, direction, EffectKind::BodyWipe);
            lit(sweep_covers(y, progress(cue, rel), direction, Sweep::Wipe))
        }

        Effect::BodyFillHorizontal { direction } => {
            let x = layout.approximate_x(led);
            lit(sweep_covers(x, progress(cue, rel), direction, Sweep::Fill))
        }

        Effect::BodyWipeHorizontal { direction } => {
            let x = layout.approximate_x(led);
            lit(sweep_covers(x, progress(cue, rel), direction, Sweep::Wipe))
        }

        Effect::Fade { from } => from.lerp(primary, progress(cue, rel)),

        Effect::Blend { to } => primary.lerp(to, progress(cue, rel)),

        Effect::Wave { rate } => {
            let wave = (rel * (rate / 1000.0) + f64::from(led) * 0.5).sin();
            primary.dim((wave + 1.0) / 2.0)
        }

        Effect::Sparkle { hz } => {
            let step = (rel / (1000.0 / hz)).floor();
            let seed = f64::from(led) * 12.9898 + step * 78.233;
            let noise = (seed.sin() * 43758.5453).abs() % 1.0;
            lit(noise > SPARKLE_GATE)
        }

        Effect::Gradient { to } => {
            if width > 1 {
                let t = clamp01(offset as f64 / (width - 1) as f64);
                primary.lerp(to, t)
            } else {
                primary
            }
        }

        Effect::Random { hz, variant } => {
            let step_ms = (1000.0 / hz).max(1.0);
            let step = (rel / step_ms).floor();
            let spatial = match variant {
                RandomVariant::Uniform => 0.0,
                RandomVariant::PerPixel => f64::from(led) * 999.9,
            };
            let seed = step * 43758.5453 + spatial;
            let hue = seed.sin().abs() % 1.0;
            Rgb::from_hsl(hue, 1.0, 0.5)
        }

        Effect::RandomFill => lit(progress(cue, rel) >= random_fill_threshold(led)),
    }
}

/// Fraction of the window elapsed, clamped to `[0, 1]`.
fn progress(cue: &Cue, rel: f64) -> f64 {
    if cue.duration > 0.0 {
        clamp01(rel / cue.duration)
    } else {
        1.0
    }
}

/// Per-LED reveal point of `random-fill`, fixed by the index alone.
pub(crate) fn random_fill_threshold(led: u16) -> f64 {
    let seed = (u64::from(led) * 9301 + 49297) % 233_280;
    seed as f64 / 233_280.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sweep {
    Fill,
    Wipe,
}

/// Whether a normalized body coordinate is lit by a sweep at progress `p`.
///
/// Wipe is the complement of fill with strict and non-strict comparisons
/// swapped, so the two never light the same LED at the same progress.
fn sweep_covers(pos: f64, p: f64, direction: Direction, sweep: Sweep) -> bool {
    match direction {
        Direction::Forward => {
            let threshold = SWEEP_START + p * SWEEP_SPAN;
            match sweep {
                Sweep::Fill => pos <= threshold,
                Sweep::Wipe => pos > threshold,
            }
        }
        Direction::Backward => {
            let threshold = SWEEP_END - p * SWEEP_SPAN;
            match sweep {
                Sweep::Fill => pos >= threshold,
                Sweep::Wipe => pos < threshold,
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/resolve.rs"]
mod tests;
