//! Lumina is a cue compositing and show compilation engine for wearable LED
//! suits.
//!
//! A project is a list of suits plus timed, parameterized effect cues. The
//! engine turns that timeline into concrete per-LED colors and compiles it
//! into a compact event stream for microcontroller playback.
//!
//! # Pipeline overview
//!
//! 1. **Filter**: `cues + suit + time -> active cues` ([`active_cues`])
//! 2. **Resolve**: `cue + LED + time -> Rgb`, one algorithm per [`EffectKind`]
//!    ([`resolve_cue_contribution`])
//! 3. **Composite**: additive blend of active cues into a [`LedState`]
//!    ([`Compositor`])
//! 4. **Compile**: sample every 50 ms, delta-encode into [`ShowEvent`]s
//!    ([`compile_show`]) and emit the artifact ([`render_artifact`])
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: every stage is a pure function of its inputs, so the
//!   live preview, the compiler and the replayed stream agree bit for bit.
//! - **Geometry as data**: LED positions come from a [`ChannelLayout`] table.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compile;
mod composition;
mod effects;
mod eval;
mod foundation;
mod geometry;
mod playback;
mod timeline;

pub use compile::artifact::{
    EVENT_RECORD_LEN, SAVE_END_MARKER, SAVE_START_MARKER, decode_events_le, encode_events_le,
    extract_project, render_artifact,
};
pub use compile::show::{
    CompileOpts, CompileStats, CompiledShow, SAMPLE_STEP_MS, ShowEvent, compile_show,
    compile_show_with_layout,
};
pub use composition::model::{
    Cue, Direction, EffectKind, PROJECT_FORMAT_VERSION, Pose, Project, RandomVariant, SuitConfig,
};
pub use effects::effect::{
    DEFAULT_CHASE_PX_PER_SEC, DEFAULT_RANDOM_HZ, DEFAULT_SPARKLE_HZ, DEFAULT_STROBE_HZ,
    DEFAULT_WAVE_RATE, Effect,
};
pub use effects::resolve::resolve_cue_contribution;
pub use eval::active::active_cues;
pub use eval::compositor::Compositor;
pub use foundation::color::{LedState, Rgb};
pub use foundation::error::{LuminaError, LuminaResult};
pub use geometry::layout::{BodyAnchor, ChannelLayout, NEUTRAL_POSITION, Segment, XPos, YPos};
pub use playback::player::ShowPlayer;
pub use timeline::lanes::{LaneAssignment, assign_lanes, assign_suit_lanes};
