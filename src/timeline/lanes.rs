use std::collections::BTreeMap;

use crate::composition::model::{Cue, Project};

/// Visual lane of every cue on one suit track.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneAssignment {
    /// Lanes opened; equals the maximum overlap depth.
    pub lane_count: usize,
    /// Cue id to lane index.
    pub lanes: BTreeMap<String, usize>,
}

impl LaneAssignment {
    /// Lane of a cue id; unknown ids sit in lane 0.
    pub fn lane_of(&self, cue_id: &str) -> usize {
        self.lanes.get(cue_id).copied().unwrap_or(0)
    }

    /// True when at least two cues share time on the track.
    pub fn has_overlaps(&self) -> bool {
        self.lane_count > 1
    }
}

/// Greedy interval partitioning.
///
/// Cues are visited by start time (stable, so ties keep input order) and each
/// takes the lowest lane whose last end time is `<=` its start, opening a new
/// lane when none is free. Cues sharing an id keep the last assignment.
pub fn assign_lanes<'a>(cues: impl IntoIterator<Item = &'a Cue>) -> LaneAssignment {
    let mut sorted: Vec<&Cue> = cues.into_iter().collect();
    sorted.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    let mut lane_ends: Vec<f64> = Vec::new();
    let mut lanes = BTreeMap::new();
    for cue in sorted {
        let lane = match lane_ends.iter().position(|&end| end <= cue.start_time) {
            Some(i) => {
                lane_ends[i] = cue.end_time();
                i
            }
            None => {
                lane_ends.push(cue.end_time());
                lane_ends.len() - 1
            }
        };
        lanes.insert(cue.id.clone(), lane);
    }

    LaneAssignment {
        lane_count: lane_ends.len(),
        lanes,
    }
}

/// [`assign_lanes`] over the cues of one suit.
pub fn assign_suit_lanes(project: &Project, suit_id: u8) -> LaneAssignment {
    assign_lanes(project.cues_for_suit(suit_id))
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/lanes.rs"]
mod tests;
