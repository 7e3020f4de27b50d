use crate::{
    composition::model::{Cue, SuitConfig},
    effects::resolve::resolve_cue_contribution,
    eval::active::active_cues,
    foundation::color::{ChannelSum, LedState, Rgb},
    geometry::layout::ChannelLayout,
};

/// Additive per-LED blending of the cues active on a suit.
///
/// Stateless apart from the borrowed channel layout, so the live preview and
/// the show compiler share one instance per layout and observe identical
/// results for identical inputs.
#[derive(Clone, Copy, Debug)]
pub struct Compositor<'a> {
    layout: &'a ChannelLayout,
}

impl Compositor<'static> {
    /// Compositor over the built-in 541-LED layout.
    pub fn standard() -> Self {
        Self::new(ChannelLayout::standard())
    }
}

impl<'a> Compositor<'a> {
    /// Compositor over a custom layout.
    pub fn new(layout: &'a ChannelLayout) -> Self {
        Self { layout }
    }

    /// The layout LED positions are read from.
    pub fn layout(&self) -> &'a ChannelLayout {
        self.layout
    }

    /// One cue's color on one LED, or black when the LED is outside the
    /// cue's range.
    pub fn cue_contribution(&self, cue: &Cue, led: u16, time: f64) -> Rgb {
        if !cue.covers_led(led) {
            return Rgb::BLACK;
        }
        resolve_cue_contribution(cue, led, time, self.layout)
    }

    /// Sum every in-range contribution, clamp once, and report
    /// [`LedState::Idle`] when nothing lit the LED.
    pub fn resolve_led(&self, led: u16, time: f64, active: &[&Cue]) -> LedState {
        let mut sum = ChannelSum::default();
        for cue in active.iter().filter(|c| c.covers_led(led)) {
            sum.add(resolve_cue_contribution(cue, led, time, self.layout));
        }
        sum.finish()
    }

    /// Every LED of `suit` at `time`, indexed by LED.
    pub fn resolve_suit(&self, suit: &SuitConfig, cues: &[Cue], time: f64) -> Vec<LedState> {
        let active = active_cues(cues, suit.id, time);
        self.resolve_active(suit.led_count, time, &active)
    }

    pub(crate) fn resolve_active(&self, led_count: u16, time: f64, active: &[&Cue]) -> Vec<LedState> {
        (0..led_count)
            .map(|led| {
                if active.is_empty() {
                    LedState::Idle
                } else {
                    self.resolve_led(led, time, active)
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/compositor.rs"]
mod tests;
