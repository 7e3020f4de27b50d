use std::collections::BTreeMap;

use crate::{
    compile::show::{CompiledShow, ShowEvent},
    foundation::color::Rgb,
};

/// Replays a compiled event stream the way the firmware does: one cursor,
/// advanced while the next event's timestamp is not after "now".
///
/// LED buffers are keyed by suit id and start black. Events for unknown
/// suits or out-of-range LEDs are consumed without effect.
#[derive(Clone, Debug)]
pub struct ShowPlayer<'a> {
    events: &'a [ShowEvent],
    total_duration: u32,
    leds: BTreeMap<u8, Vec<Rgb>>,
    cursor: usize,
    now: u32,
}

impl<'a> ShowPlayer<'a> {
    /// Player at time zero with every LED black.
    pub fn new(show: &'a CompiledShow) -> Self {
        let mut leds: BTreeMap<u8, Vec<Rgb>> = BTreeMap::new();
        for suit in &show.project.suits {
            let buf = leds.entry(suit.id).or_default();
            let n = usize::from(suit.led_count).max(buf.len());
            buf.resize(n, Rgb::BLACK);
        }
        Self {
            events: &show.events,
            total_duration: show.total_duration(),
            leds,
            cursor: 0,
            now: 0,
        }
    }

    /// Apply every pending event with `ms <= now`; returns how many were consumed.
    pub fn advance_to(&mut self, now: u32) -> usize {
        let start = self.cursor;
        self.now = self.now.max(now);
        while let Some(e) = self.events.get(self.cursor) {
            if e.ms > now {
                break;
            }
            if let Some(slot) = self
                .leds
                .get_mut(&e.suit)
                .and_then(|buf| buf.get_mut(usize::from(e.led)))
            {
                *slot = e.rgb();
            }
            self.cursor += 1;
        }
        self.cursor - start
    }

    /// Like [`advance_to`](Self::advance_to) on a clock that restarts once it
    /// passes the show's total duration.
    pub fn advance_looped(&mut self, elapsed: u64) -> usize {
        let period = u64::from(self.total_duration) + 1;
        let now = (elapsed % period) as u32;
        if now < self.now {
            self.restart();
        }
        self.advance_to(now)
    }

    /// Rewind to the start with every LED off.
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.now = 0;
        for buf in self.leds.values_mut() {
            buf.fill(Rgb::BLACK);
        }
    }

    /// Current color of one LED; `None` for unknown suits or indices.
    pub fn led(&self, suit: u8, led: u16) -> Option<Rgb> {
        self.leds.get(&suit)?.get(usize::from(led)).copied()
    }

    /// Current buffer of one suit.
    pub fn suit_leds(&self, suit: u8) -> Option<&[Rgb]> {
        self.leds.get(&suit).map(Vec::as_slice)
    }

    /// Index of the next event to apply.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True once every event has been applied.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.events.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/player.rs"]
mod tests;
