use crate::composition::model::Cue;

/// Cues driving `suit_id` at `time`, in input order.
///
/// A cue is active on `[start_time, start_time + duration)`; zero or negative
/// durations never are. Unknown suit ids simply match nothing.
pub fn active_cues(cues: &[Cue], suit_id: u8, time: f64) -> Vec<&Cue> {
    cues.iter()
        .filter(|c| c.suit_id == suit_id && c.is_active_at(time))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/eval/active.rs"]
mod tests;
