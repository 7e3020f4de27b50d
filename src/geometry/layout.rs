use std::{collections::BTreeMap, sync::LazyLock};

use kurbo::Point;

use crate::{
    composition::model::{Direction, EffectKind, Pose},
    foundation::error::{LuminaError, LuminaResult},
};

/// Returned for indices past the last segment.
pub const NEUTRAL_POSITION: f64 = 0.5;

/// Vertical body landmarks in normalized space (0 = top of head, 1 = feet).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyAnchor {
    /// Top of the head.
    Top,
    /// Shoulder line.
    Shoulder,
    /// Waist line.
    Waist,
    /// Depends on pose: below the waist with hands down, at shoulder height with hands up.
    Wrist,
    /// Soles of the feet.
    Feet,
}

impl BodyAnchor {
    /// Normalized height of the landmark in `pose`.
    pub fn y(self, pose: Pose) -> f64 {
        const TOP: f64 = 0.0;
        const SHOULDER: f64 = 0.20;
        const WAIST: f64 = 0.50;
        const FEET: f64 = 1.0;
        match self {
            Self::Top => TOP,
            Self::Shoulder => SHOULDER,
            Self::Waist => WAIST,
            Self::Wrist => match pose {
                Pose::HandsDown => 0.60,
                Pose::HandsUp => SHOULDER,
            },
            Self::Feet => FEET,
        }
    }
}

/// Horizontal position function of a segment (0 = left, 1 = right).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XPos {
    /// Every LED of the segment at the same x.
    Fixed(f64),
    /// `start + t * delta`, `t` running 0..=1 across the segment.
    Ramp {
        /// x of the first LED.
        start: f64,
        /// Change in x from the first LED to the last.
        delta: f64,
    },
}

/// Vertical position function of a segment.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YPos {
    /// Every LED of the segment at one landmark.
    Anchor(BodyAnchor),
    /// Straight run from one landmark to another across the segment.
    Span {
        /// Landmark of the first LED.
        from: BodyAnchor,
        /// Landmark of the last LED.
        to: BodyAnchor,
    },
    /// A fixed distance from a landmark.
    Offset {
        /// Reference landmark.
        anchor: BodyAnchor,
        /// Added to the landmark's y.
        offset: f64,
    },
    /// Sits at the waist, except that a backward `body-wipe` treats it as
    /// being at the feet. Kept as observed in shipped shows.
    Pocket,
}

/// A contiguous run of LEDs on one anatomical part.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    /// Anatomical part name, e.g. `rTorso`.
    pub part: String,
    /// Last LED index of the segment (inclusive upper bound).
    pub last: u16,
    /// Horizontal position across the segment.
    pub x: XPos,
    /// Vertical position across the segment.
    pub y: YPos,
}

/// Ordered breakpoint table mapping flat LED indices onto the body.
///
/// Segment `i` covers `(segments[i-1].last + 1)..=segments[i].last`; the first
/// segment starts at index 0.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChannelLayout {
    segments: Vec<Segment>,
}

static STANDARD: LazyLock<ChannelLayout> = LazyLock::new(ChannelLayout::standard_541);

impl ChannelLayout {
    /// Build and validate a layout from explicit segments.
    pub fn new(segments: Vec<Segment>) -> LuminaResult<Self> {
        let layout = Self { segments };
        layout.validate()?;
        Ok(layout)
    }

    /// The shipped 541-LED suit wiring.
    pub fn standard() -> &'static ChannelLayout {
        &STANDARD
    }

    /// Parse and validate a layout JSON document.
    pub fn from_json_str(s: &str) -> LuminaResult<Self> {
        let layout: Self = serde_json::from_str(s)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Check that segments are non-empty, strictly increasing and finite.
    pub fn validate(&self) -> LuminaResult<()> {
        if self.segments.is_empty() {
            return Err(LuminaError::validation("layout must have at least one segment"));
        }
        let mut prev: Option<u16> = None;
        for seg in &self.segments {
            if seg.part.trim().is_empty() {
                return Err(LuminaError::validation("layout segment part must be non-empty"));
            }
            if let Some(p) = prev
                && seg.last <= p
            {
                return Err(LuminaError::validation(format!(
                    "layout segment '{}' must end after index {p}",
                    seg.part
                )));
            }
            let finite = match seg.x {
                XPos::Fixed(v) => v.is_finite(),
                XPos::Ramp { start, delta } => start.is_finite() && delta.is_finite(),
            } && match seg.y {
                YPos::Offset { offset, .. } => offset.is_finite(),
                _ => true,
            };
            if !finite {
                return Err(LuminaError::validation(format!(
                    "layout segment '{}' has non-finite coordinates",
                    seg.part
                )));
            }
            prev = Some(seg.last);
        }
        Ok(())
    }

    /// Segments in index order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of LEDs covered by the table.
    pub fn led_count(&self) -> u16 {
        self.segments.last().map_or(0, |s| s.last.saturating_add(1))
    }

    /// LED count per part name.
    pub fn part_counts(&self) -> BTreeMap<String, u32> {
        let mut out = BTreeMap::new();
        let mut first = 0u32;
        for seg in &self.segments {
            let last = u32::from(seg.last);
            *out.entry(seg.part.clone()).or_insert(0) += last + 1 - first;
            first = last + 1;
        }
        out
    }

    /// Anatomical part name of an LED, `None` past the table.
    pub fn part_at(&self, index: u16) -> Option<&str> {
        self.locate(index).map(|(seg, _)| seg.part.as_str())
    }

    /// Normalized horizontal position of an LED.
    pub fn approximate_x(&self, index: u16) -> f64 {
        match self.locate(index) {
            None => NEUTRAL_POSITION,
            Some((seg, t)) => match seg.x {
                XPos::Fixed(v) => v,
                XPos::Ramp { start, delta } => start + t * delta,
            },
        }
    }

    /// Normalized vertical position of an LED.
    ///
    /// `direction` and `kind` only matter for pocket segments: a backward
    /// [`EffectKind::BodyWipe`] places them at the feet instead of the waist.
    pub fn approximate_y(
        &self,
        index: u16,
        pose: Pose,
        direction: Direction,
        kind: EffectKind,
    ) -> f64 {
        let Some((seg, t)) = self.locate(index) else {
            return NEUTRAL_POSITION;
        };
        match seg.y {
            YPos::Anchor(a) => a.y(pose),
            YPos::Span { from, to } => {
                let from = from.y(pose);
                from + t * (to.y(pose) - from)
            }
            YPos::Offset { anchor, offset } => anchor.y(pose) + offset,
            YPos::Pocket => {
                if kind == EffectKind::BodyWipe && direction == Direction::Backward {
                    BodyAnchor::Feet.y(pose)
                } else {
                    BodyAnchor::Waist.y(pose)
                }
            }
        }
    }

    /// Preview position of an LED (x right, y down, both normalized).
    pub fn position(&self, index: u16, pose: Pose) -> Point {
        Point::new(
            self.approximate_x(index),
            self.approximate_y(index, pose, Direction::Forward, EffectKind::BodyFill),
        )
    }

    /// Segment containing `index` and the fraction `t` of the way through it.
    fn locate(&self, index: u16) -> Option<(&Segment, f64)> {
        let mut first = 0u16;
        for seg in &self.segments {
            if index <= seg.last {
                let span = seg.last - first;
                let t = if span == 0 {
                    0.0
                } else {
                    f64::from(index - first) / f64::from(span)
                };
                return Some((seg, t));
            }
            first = seg.last + 1;
        }
        None
    }

    fn standard_541() -> Self {
        use BodyAnchor::{Feet, Shoulder, Top, Waist, Wrist};

        fn seg(part: &str, last: u16, x: XPos, y: YPos) -> Segment {
            Segment {
                part: part.to_string(),
                last,
                x,
                y,
            }
        }
        let fixed = XPos::Fixed;
        let ramp = |start, delta| XPos::Ramp { start, delta };
        let span = |from, to| YPos::Span { from, to };
        let wrist_tip = YPos::Offset {
            anchor: Wrist,
            offset: 0.05,
        };

        Self {
            segments: vec![
                seg("rTorso", 32, fixed(0.45), span(Waist, Shoulder)),
                seg("rPocket", 68, fixed(0.42), YPos::Pocket),
                seg("rArmDown", 96, ramp(0.35, -0.25), span(Shoulder, Wrist)),
                seg("rFingers", 102, fixed(0.05), wrist_tip),
                seg("rArmUpper", 142, ramp(0.1, 0.25), span(Wrist, Shoulder)),
                seg("face", 183, fixed(0.5), YPos::Anchor(Top)),
                seg("lArmUp", 222, ramp(0.65, 0.25), span(Shoulder, Wrist)),
                seg("lFingers", 228, fixed(0.95), wrist_tip),
                seg("lArmDown", 258, ramp(0.9, -0.25), span(Wrist, Shoulder)),
                seg("lPocket", 291, fixed(0.58), YPos::Pocket),
                seg("lTorso", 330, fixed(0.55), span(Shoulder, Waist)),
                seg("lLegOuter", 381, ramp(0.55, 0.1), span(Waist, Feet)),
                seg("lLegInner", 422, ramp(0.65, -0.15), span(Feet, Waist)),
                seg("rLegInner", 463, ramp(0.5, -0.15), span(Waist, Feet)),
                seg("rLegOuter", 527, ramp(0.35, 0.1), span(Feet, Waist)),
                seg("lLegOuterExt", 540, fixed(0.65), YPos::Anchor(Feet)),
            ],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/layout.rs"]
mod tests;
