use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::{
    composition::model::Project,
    eval::{active::active_cues, compositor::Compositor},
    foundation::color::Rgb,
    foundation::error::{LuminaError, LuminaResult},
    geometry::layout::ChannelLayout,
};

/// Sampling period of the compiled show in milliseconds.
pub const SAMPLE_STEP_MS: u32 = 50;

#[derive(Clone, Debug)]
/// Sampling and threading controls for [`compile_show`].
pub struct CompileOpts {
    /// Distance between samples in milliseconds.
    pub sample_step_ms: u32,
    /// Resolve samples on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
    /// Samples resolved per parallel batch.
    pub chunk_size: usize,
}

impl Default for CompileOpts {
    fn default() -> Self {
        Self {
            sample_step_ms: SAMPLE_STEP_MS,
            parallel: false,
            threads: None,
            chunk_size: 64,
        }
    }
}

impl CompileOpts {
    /// Reject a zero step or an explicit zero thread count.
    pub fn validate(&self) -> LuminaResult<()> {
        if self.sample_step_ms == 0 {
            return Err(LuminaError::validation("compile 'sample_step_ms' must be > 0"));
        }
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(LuminaError::validation(
                "compile 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// One LED color change in the compiled stream.
///
/// Field widths match the firmware `Cmd` record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ShowEvent {
    /// Sample timestamp in milliseconds.
    pub ms: u32,
    /// Suit id.
    pub suit: u8,
    /// LED index on the suit.
    pub led: u16,
    /// New red channel.
    pub r: u8,
    /// New green channel.
    pub g: u8,
    /// New blue channel.
    pub b: u8,
}

impl ShowEvent {
    /// The new color as [`Rgb`].
    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Counters gathered while compiling.
pub struct CompileStats {
    /// Time samples taken (`duration / step + 1`).
    pub samples: u64,
    /// LED colors resolved across all samples and suits.
    pub leds_resolved: u64,
    /// Events emitted after delta compression.
    pub events: u64,
    /// Cues whose suit id is not part of the project.
    pub orphan_cues: u64,
}

#[derive(Clone, Debug, PartialEq)]
/// Delta-encoded event stream plus the project it was compiled from.
pub struct CompiledShow {
    /// Source project, kept verbatim for re-import.
    pub project: Project,
    /// Events ordered by time, then suit-list position, then LED index.
    pub events: Vec<ShowEvent>,
    /// Counters gathered while compiling.
    pub stats: CompileStats,
}

impl CompiledShow {
    /// Number of events; the firmware's `FRAME_COUNT`.
    pub fn frame_count(&self) -> usize {
        self.events.len()
    }

    /// Show length in milliseconds; the firmware's `TOTAL_DURATION`.
    pub fn total_duration(&self) -> u32 {
        self.project.duration
    }
}

/// Compile `project` against the built-in channel layout.
pub fn compile_show(project: &Project, opts: &CompileOpts) -> LuminaResult<CompiledShow> {
    compile_show_with_layout(project, ChannelLayout::standard(), opts)
}

/// Sample the compositor every `opts.sample_step_ms` over `0..=duration` and
/// emit an event whenever an LED's output color differs from the last one
/// emitted for it. Every LED starts out black; idle LEDs emit black.
#[tracing::instrument(skip(project, layout, opts), fields(suits = project.suits.len(), cues = project.cues.len()))]
pub fn compile_show_with_layout(
    project: &Project,
    layout: &ChannelLayout,
    opts: &CompileOpts,
) -> LuminaResult<CompiledShow> {
    opts.validate()?;
    let compositor = Compositor::new(layout);
    let step = opts.sample_step_ms;
    let samples = (project.duration / step) as usize + 1;

    let mut stats = CompileStats {
        samples: samples as u64,
        orphan_cues: count_orphan_cues(project),
        ..CompileStats::default()
    };
    warn_duplicate_suits(project);

    let mut encoder = DeltaEncoder::new(project);

    if !opts.parallel {
        for i in 0..samples {
            let ms = sample_ms(i, step);
            let frame = sample_frame(&compositor, project, ms);
            encoder.push(ms, &frame);
        }
    } else {
        let pool = build_thread_pool(opts.threads)?;
        let chunk_size = normalized_chunk_size(opts.chunk_size);
        let mut chunk_start = 0usize;
        while chunk_start < samples {
            let chunk_end = (chunk_start + chunk_size).min(samples);
            let frames: Vec<Frame> = pool.install(|| {
                (chunk_start..chunk_end)
                    .into_par_iter()
                    .map(|i| sample_frame(&compositor, project, sample_ms(i, step)))
                    .collect()
            });
            for (i, frame) in (chunk_start..chunk_end).zip(&frames) {
                encoder.push(sample_ms(i, step), frame);
            }
            chunk_start = chunk_end;
        }
    }

    let events = encoder.finish();
    stats.leds_resolved =
        stats.samples * project.suits.iter().map(|s| u64::from(s.led_count)).sum::<u64>();
    stats.events = events.len() as u64;
    tracing::debug!(
        samples = stats.samples,
        leds_resolved = stats.leds_resolved,
        events = stats.events,
        "show compiled"
    );

    Ok(CompiledShow {
        project: project.clone(),
        events,
        stats,
    })
}

/// Output colors of every suit (in suit-list order) at one sample.
type Frame = Vec<Vec<Rgb>>;

fn sample_ms(i: usize, step: u32) -> u32 {
    // i * step <= duration, which fits in u32
    (i as u64 * u64::from(step)) as u32
}

fn sample_frame(compositor: &Compositor<'_>, project: &Project, ms: u32) -> Frame {
    let t = f64::from(ms);
    project
        .suits
        .iter()
        .map(|suit| {
            let active = active_cues(&project.cues, suit.id, t);
            compositor
                .resolve_active(suit.led_count, t, &active)
                .into_iter()
                .map(|s| s.output_rgb())
                .collect()
        })
        .collect()
}

/// Last emitted color per suit-list position and LED.
struct DeltaEncoder {
    suit_ids: Vec<u8>,
    last: Vec<Vec<Rgb>>,
    events: Vec<ShowEvent>,
}

impl DeltaEncoder {
    fn new(project: &Project) -> Self {
        Self {
            suit_ids: project.suits.iter().map(|s| s.id).collect(),
            last: project
                .suits
                .iter()
                .map(|s| vec![Rgb::BLACK; usize::from(s.led_count)])
                .collect(),
            events: Vec::new(),
        }
    }

    fn push(&mut self, ms: u32, frame: &Frame) {
        for ((suit, cache), colors) in self.suit_ids.iter().zip(&mut self.last).zip(frame) {
            for (led, (prev, &color)) in cache.iter_mut().zip(colors).enumerate() {
                if *prev == color {
                    continue;
                }
                *prev = color;
                self.events.push(ShowEvent {
                    ms,
                    suit: *suit,
                    // led < led_count: u16
                    led: led as u16,
                    r: color.r,
                    g: color.g,
                    b: color.b,
                });
            }
        }
    }

    fn finish(self) -> Vec<ShowEvent> {
        self.events
    }
}

fn count_orphan_cues(project: &Project) -> u64 {
    let mut orphans = 0u64;
    for cue in &project.cues {
        if project.suit(cue.suit_id).is_none() {
            tracing::warn!(cue = %cue.id, suit = cue.suit_id, "cue targets a suit that is not in the project");
            orphans += 1;
        }
    }
    orphans
}

fn warn_duplicate_suits(project: &Project) {
    let mut seen: BTreeMap<u8, usize> = BTreeMap::new();
    for suit in &project.suits {
        *seen.entry(suit.id).or_default() += 1;
    }
    for (id, n) in seen.into_iter().filter(|(_, n)| *n > 1) {
        tracing::warn!(suit = id, count = n, "duplicate suit id; events cannot tell these suits apart");
    }
}

fn normalized_chunk_size(chunk_size: usize) -> usize {
    chunk_size.max(1)
}

fn build_thread_pool(threads: Option<usize>) -> LuminaResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| LuminaError::compile(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/compile/show.rs"]
mod tests;
