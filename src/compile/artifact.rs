use std::fmt::Write as _;

use crate::{
    compile::show::{CompiledShow, ShowEvent},
    composition::model::Project,
    foundation::error::{LuminaError, LuminaResult},
};

/// Opens the embedded project block (also opens a C comment).
pub const SAVE_START_MARKER: &str = "/*__LUMINA_SAVE_DATA_START__";
/// Closes the embedded project block.
pub const SAVE_END_MARKER: &str = "__LUMINA_SAVE_DATA_END__*/";

/// Size of one packed little-endian event record.
pub const EVENT_RECORD_LEN: usize = 10;

/// Render the artifact text: the project block followed by the command table.
///
/// The project is written verbatim, version included; `*/` inside the JSON is
/// escaped so that string contents cannot close the comment early.
#[tracing::instrument(skip(show), fields(events = show.events.len()))]
pub fn render_artifact(show: &CompiledShow) -> LuminaResult<String> {
    let json = show.project.to_json_string()?.replace("*/", "*\\/");

    let mut out = String::with_capacity(json.len() + show.events.len() * 28 + 256);
    let fmt_err = |e: std::fmt::Error| LuminaError::compile(format!("format artifact: {e}"));

    writeln!(out, "{SAVE_START_MARKER}").map_err(fmt_err)?;
    writeln!(out, "{json}").map_err(fmt_err)?;
    writeln!(out, "{SAVE_END_MARKER}").map_err(fmt_err)?;
    writeln!(out).map_err(fmt_err)?;
    writeln!(out, "// Generated by Lumina").map_err(fmt_err)?;
    writeln!(
        out,
        "struct Cmd {{ uint32_t ms; uint8_t suit; uint16_t led; uint8_t r, g, b; }};"
    )
    .map_err(fmt_err)?;
    writeln!(out).map_err(fmt_err)?;
    writeln!(out, "const Cmd choreography[] = {{").map_err(fmt_err)?;
    for e in &show.events {
        writeln!(
            out,
            "  {{{}, {}, {}, {}, {}, {}}},",
            e.ms, e.suit, e.led, e.r, e.g, e.b
        )
        .map_err(fmt_err)?;
    }
    writeln!(out, "}};").map_err(fmt_err)?;
    writeln!(out).map_err(fmt_err)?;
    writeln!(out, "const uint32_t FRAME_COUNT = {};", show.frame_count()).map_err(fmt_err)?;
    write!(out, "const uint32_t TOTAL_DURATION = {};", show.total_duration()).map_err(fmt_err)?;
    Ok(out)
}

/// Recover the project embedded in artifact text.
///
/// Missing markers yield [`LuminaError::ProjectDataNotFound`]; a block that is
/// present but does not parse yields [`LuminaError::Serde`].
#[tracing::instrument(skip(text), fields(len = text.len()))]
pub fn extract_project(text: &str) -> LuminaResult<Project> {
    let start = text
        .find(SAVE_START_MARKER)
        .ok_or(LuminaError::ProjectDataNotFound)?
        + SAVE_START_MARKER.len();
    let end = text[start..]
        .find(SAVE_END_MARKER)
        .ok_or(LuminaError::ProjectDataNotFound)?
        + start;
    let block = text[start..end].trim();
    let project = Project::from_json_str(block)?;
    tracing::debug!(
        suits = project.suits.len(),
        cues = project.cues.len(),
        version = %project.version,
        "project extracted"
    );
    Ok(project)
}

/// Pack events as `u32 ms, u8 suit, u16 led, u8 r, u8 g, u8 b`, little-endian.
pub fn encode_events_le(events: &[ShowEvent]) -> Vec<u8> {
    let mut out = Vec::with_capacity(events.len() * EVENT_RECORD_LEN);
    for e in events {
        out.extend_from_slice(&e.ms.to_le_bytes());
        out.push(e.suit);
        out.extend_from_slice(&e.led.to_le_bytes());
        out.extend_from_slice(&[e.r, e.g, e.b]);
    }
    out
}

/// Inverse of [`encode_events_le`]; the length must be a whole number of records.
pub fn decode_events_le(bytes: &[u8]) -> LuminaResult<Vec<ShowEvent>> {
    if bytes.len() % EVENT_RECORD_LEN != 0 {
        return Err(LuminaError::validation(format!(
            "event stream length {} is not a multiple of {EVENT_RECORD_LEN}",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(EVENT_RECORD_LEN)
        .map(|rec| ShowEvent {
            ms: u32::from_le_bytes([rec[0], rec[1], rec[2], rec[3]]),
            suit: rec[4],
            led: u16::from_le_bytes([rec[5], rec[6]]),
            r: rec[7],
            g: rec[8],
            b: rec[9],
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/compile/artifact.rs"]
mod tests;
