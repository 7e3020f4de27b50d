use std::{collections::BTreeMap, path::Path};

use crate::{
    foundation::color::Rgb,
    foundation::error::{LuminaError, LuminaResult},
    geometry::layout::ChannelLayout,
};

/// Format version of projects created by this crate.
pub const PROJECT_FORMAT_VERSION: &str = "1.0.0";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One physical costume.
pub struct SuitConfig {
    /// Suit identifier; doubles as the `suit` field of compiled events.
    pub id: u8,
    /// Display name.
    pub name: String,
    /// Total LED count on the suit's data line.
    pub led_count: u16,
    /// Informational LED count per named part; sums to `led_count`.
    #[serde(default)]
    pub parts: BTreeMap<String, u32>,
}

impl SuitConfig {
    /// A suit wired with the standard channel layout.
    pub fn standard(id: u8, name: impl Into<String>) -> Self {
        let layout = ChannelLayout::standard();
        Self {
            id,
            name: name.into(),
            led_count: layout.led_count(),
            parts: layout.part_counts(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Effect kind of a cue.
pub enum EffectKind {
    /// `solid`
    Solid,
    /// `strobe`
    Strobe,
    /// `chase`
    Chase,
    /// `fill`
    Fill,
    /// `wipe`
    Wipe,
    /// `body-fill`
    BodyFill,
    /// `body-wipe`
    BodyWipe,
    /// `body-fill-horizontal`
    BodyFillHorizontal,
    /// `body-wipe-horizontal`
    BodyWipeHorizontal,
    /// `wave`
    Wave,
    /// `fade`
    Fade,
    /// `blend`
    Blend,
    /// `sparkle`
    Sparkle,
    /// `gradient`
    Gradient,
    /// `random`
    Random,
    /// `random-fill`
    RandomFill,
}

impl EffectKind {
    /// Every kind, in editor menu order.
    pub const ALL: [EffectKind; 16] = [
        Self::Solid,
        Self::Strobe,
        Self::Chase,
        Self::Fill,
        Self::Wipe,
        Self::BodyFill,
        Self::BodyWipe,
        Self::BodyFillHorizontal,
        Self::BodyWipeHorizontal,
        Self::Wave,
        Self::Fade,
        Self::Blend,
        Self::Sparkle,
        Self::Gradient,
        Self::Random,
        Self::RandomFill,
    ];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Travel direction for directional kinds.
pub enum Direction {
    /// Start of range, top of body, or left side first.
    #[default]
    Forward,
    /// The reverse of `Forward`.
    Backward,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Arm pose assumed by vertical body sweeps.
pub enum Pose {
    /// Wrists below the waist.
    #[default]
    HandsDown,
    /// Wrists raised to shoulder height.
    HandsUp,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Hue distribution of the `random` kind.
pub enum RandomVariant {
    /// Independent hue per LED.
    #[default]
    PerPixel,
    /// One hue shared by the whole range.
    Uniform,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A timed effect assignment on one suit and LED sub-range.
///
/// Optional fields stay `None` when absent so that a project survives an
/// export/import round trip unchanged; defaults are applied at resolution.
pub struct Cue {
    /// Editor-assigned identifier, unique within a project.
    pub id: String,
    /// Target suit; unknown ids are not an error, the cue just never shows.
    pub suit_id: u8,
    /// Start of the active window in milliseconds.
    pub start_time: f64,
    /// Window length in milliseconds; `<= 0` is never active.
    pub duration: f64,
    /// Effect algorithm; serialized as `type`.
    #[serde(rename = "type")]
    pub kind: EffectKind,
    /// Primary color.
    pub color: Rgb,
    /// Background or end color for kinds that use one; black when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<Rgb>,
    /// Hue distribution for `random`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<RandomVariant>,
    /// Travel direction; forward when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Arm pose for vertical body sweeps; hands down when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose: Option<Pose>,
    /// Kind-specific rate (Hz, pixels per second or phase rate).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// 0..=100; dims this cue's own contribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    /// First LED this cue may affect (inclusive).
    pub led_range_start: u16,
    /// Last LED this cue may affect (inclusive).
    pub led_range_end: u16,
}

impl Cue {
    /// Minimal cue with every optional field unset.
    pub fn new(
        id: impl Into<String>,
        suit_id: u8,
        kind: EffectKind,
        start_time: f64,
        duration: f64,
        color: Rgb,
    ) -> Self {
        Self {
            id: id.into(),
            suit_id,
            start_time,
            duration,
            kind,
            color,
            secondary_color: None,
            variant: None,
            direction: None,
            pose: None,
            speed: None,
            brightness: None,
            led_range_start: 0,
            led_range_end: 0,
        }
    }

    /// Builder-style LED range setter (inclusive bounds).
    pub fn with_range(mut self, start: u16, end: u16) -> Self {
        self.led_range_start = start;
        self.led_range_end = end;
        self
    }

    /// Exclusive end of the active window.
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// `start_time <= t < start_time + duration`.
    pub fn is_active_at(&self, t: f64) -> bool {
        self.duration > 0.0 && self.start_time <= t && t < self.end_time()
    }

    /// Inclusive LED range check.
    pub fn covers_led(&self, led: u16) -> bool {
        self.led_range_start <= led && led <= self.led_range_end
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Everything needed to reproduce a show: suits, cues and total duration.
///
/// This is the structure embedded verbatim into compiled artifacts,
/// `version` included: a project written under another format version comes
/// back from [`crate::extract_project`] with that version unchanged.
pub struct Project {
    /// Suits in playback order.
    pub suits: Vec<SuitConfig>,
    /// Cues in insertion order.
    pub cues: Vec<Cue>,
    /// Total show length in milliseconds.
    pub duration: u32,
    /// Project format version; [`PROJECT_FORMAT_VERSION`] when absent.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    PROJECT_FORMAT_VERSION.to_string()
}

impl Project {
    /// Project at the current format version.
    pub fn new(suits: Vec<SuitConfig>, cues: Vec<Cue>, duration: u32) -> Self {
        Self {
            suits,
            cues,
            duration,
            version: default_version(),
        }
    }

    /// Five standard suits ("Dancer 1".."Dancer 5") and no cues.
    pub fn with_default_suits(duration: u32) -> Self {
        let suits = (0..5u8)
            .map(|i| SuitConfig::standard(i, format!("Dancer {}", i + 1)))
            .collect();
        Self::new(suits, Vec::new(), duration)
    }

    /// Default suits plus two starter cues: a red solid on the first suit and
    /// a face chase on the third.
    pub fn demo() -> Self {
        let mut project = Self::with_default_suits(30_000);
        project.cues.push(
            Cue::new("1", 0, EffectKind::Solid, 1000.0, 2000.0, Rgb::new(0xff, 0, 0))
                .with_range(0, 541),
        );
        let mut chase = Cue::new(
            "2",
            2,
            EffectKind::Chase,
            2500.0,
            3000.0,
            Rgb::new(0x00, 0xd9, 0xff),
        )
        .with_range(143, 183);
        chase.secondary_color = Some(Rgb::BLACK);
        chase.speed = Some(5.0);
        project.cues.push(chase);
        project
    }

    /// First suit with `id`, if any.
    pub fn suit(&self, id: u8) -> Option<&SuitConfig> {
        self.suits.iter().find(|s| s.id == id)
    }

    /// Cues on one suit, in insertion order.
    pub fn cues_for_suit(&self, suit_id: u8) -> impl Iterator<Item = &Cue> {
        self.cues.iter().filter(move |c| c.suit_id == suit_id)
    }

    /// Parse a project JSON document.
    pub fn from_json_str(s: &str) -> LuminaResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Compact JSON in editor field naming.
    pub fn to_json_string(&self) -> LuminaResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a project JSON file.
    pub fn from_path(path: &Path) -> LuminaResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            LuminaError::Other(anyhow::Error::new(e).context(format!(
                "read project '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
