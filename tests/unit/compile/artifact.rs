use super::*;
use crate::{
    compile::show::{CompileOpts, compile_show},
    composition::model::{Cue, EffectKind},
    foundation::color::Rgb,
};

fn demo_show() -> CompiledShow {
    compile_show(&Project::demo(), &CompileOpts::default()).unwrap()
}

#[test]
fn artifact_layout_starts_with_project_block() {
    let show = demo_show();
    let text = render_artifact(&show).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(SAVE_START_MARKER));
    assert!(lines.next().unwrap().starts_with("{\"suits\":["));
    assert_eq!(lines.next(), Some(SAVE_END_MARKER));
    assert!(text.contains("struct Cmd { uint32_t ms; uint8_t suit; uint16_t led; uint8_t r, g, b; };"));
    assert!(text.contains(&format!("const uint32_t FRAME_COUNT = {};", show.events.len())));
    assert!(text.ends_with("const uint32_t TOTAL_DURATION = 30000;"));
}

#[test]
fn artifact_lists_every_event_in_order() {
    let show = demo_show();
    let text = render_artifact(&show).unwrap();
    let records: Vec<&str> = text
        .lines()
        .filter(|l| l.starts_with("  {"))
        .collect();
    assert_eq!(records.len(), show.events.len());
    let e = show.events[0];
    assert_eq!(
        records[0],
        format!("  {{{}, {}, {}, {}, {}, {}}},", e.ms, e.suit, e.led, e.r, e.g, e.b)
    );
    assert_eq!(records[0], "  {1000, 0, 0, 255, 0, 0},");
}

#[test]
fn extract_round_trips_project() {
    let show = demo_show();
    let text = render_artifact(&show).unwrap();
    assert_eq!(extract_project(&text).unwrap(), show.project);
}

#[test]
fn comment_terminator_in_strings_survives() {
    let mut project = Project::with_default_suits(200);
    project.suits[0].name = "Lead */ Dancer".to_string();
    project
        .cues
        .push(Cue::new("a*/b", 0, EffectKind::Solid, 0.0, 100.0, Rgb::new(1, 2, 3)).with_range(0, 5));
    let show = compile_show(&project, &CompileOpts::default()).unwrap();
    let text = render_artifact(&show).unwrap();

    let block_end = text.find(SAVE_END_MARKER).unwrap();
    assert!(!text[..block_end].contains("*/"));
    assert_eq!(extract_project(&text).unwrap(), project);
}

#[test]
fn missing_markers_are_not_found() {
    let err = extract_project("void loop() {}").unwrap_err();
    assert!(err.is_not_found());

    let only_start = format!("{SAVE_START_MARKER}{{}}");
    assert!(extract_project(&only_start).unwrap_err().is_not_found());

    let end_before_start = format!("{SAVE_END_MARKER}\n{SAVE_START_MARKER}\n{{}}");
    assert!(extract_project(&end_before_start).unwrap_err().is_not_found());
}

#[test]
fn malformed_block_is_serde_error() {
    let text = format!("{SAVE_START_MARKER}\n{{\"suits\": [\n{SAVE_END_MARKER}");
    let err = extract_project(&text).unwrap_err();
    assert!(matches!(err, LuminaError::Serde(_)));
}

#[test]
fn empty_project_is_valid_not_missing() {
    let text = format!(
        "{SAVE_START_MARKER}\n{{\"suits\":[],\"cues\":[],\"duration\":0,\"version\":\"1.0.0\"}}\n{SAVE_END_MARKER}"
    );
    let project = extract_project(&text).unwrap();
    assert!(project.suits.is_empty());
    assert!(project.cues.is_empty());
}

#[test]
fn binary_records_are_ten_bytes_little_endian() {
    let events = [ShowEvent {
        ms: 0x0102_0304,
        suit: 7,
        led: 0x0201,
        r: 10,
        g: 20,
        b: 30,
    }];
    let bytes = encode_events_le(&events);
    assert_eq!(bytes, [4, 3, 2, 1, 7, 1, 2, 10, 20, 30]);
    assert_eq!(decode_events_le(&bytes).unwrap(), events);
}

#[test]
fn binary_stream_of_compiled_show_decodes() {
    let show = demo_show();
    let bytes = encode_events_le(&show.events);
    assert_eq!(bytes.len(), show.events.len() * EVENT_RECORD_LEN);
    assert_eq!(decode_events_le(&bytes).unwrap(), show.events);
}

#[test]
fn truncated_binary_stream_is_rejected() {
    assert!(decode_events_le(&[0u8; 15]).is_err());
}

#[test]
fn project_version_is_kept_as_given() {
    let mut project = Project::with_default_suits(100);
    project.version = "0.9.0".to_string();
    let show = compile_show(&project, &CompileOpts::default()).unwrap();
    let text = render_artifact(&show).unwrap();
    assert!(text.contains("\"version\":\"0.9.0\""));
    assert_eq!(extract_project(&text).unwrap(), project);
}
