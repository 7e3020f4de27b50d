use super::*;
use crate::{composition::model::EffectKind, foundation::color::Rgb};

fn cue(id: &str, suit: u8, start: f64, duration: f64) -> Cue {
    Cue::new(id, suit, EffectKind::Solid, start, duration, Rgb::new(255, 0, 0))
}

fn ids(cues: Vec<&Cue>) -> Vec<&str> {
    cues.into_iter().map(|c| c.id.as_str()).collect()
}

#[test]
fn window_is_half_open() {
    let cues = vec![cue("a", 0, 1000.0, 2000.0)];
    assert!(active_cues(&cues, 0, 999.9).is_empty());
    assert_eq!(ids(active_cues(&cues, 0, 1000.0)), ["a"]);
    assert_eq!(ids(active_cues(&cues, 0, 2999.0)), ["a"]);
    assert!(active_cues(&cues, 0, 3000.0).is_empty());
}

#[test]
fn filters_by_suit_and_keeps_input_order() {
    let cues = vec![
        cue("late", 0, 500.0, 1000.0),
        cue("other", 1, 0.0, 2000.0),
        cue("early", 0, 0.0, 2000.0),
    ];
    assert_eq!(ids(active_cues(&cues, 0, 600.0)), ["late", "early"]);
    assert_eq!(ids(active_cues(&cues, 1, 600.0)), ["other"]);
    assert!(active_cues(&cues, 9, 600.0).is_empty());
}

#[test]
fn non_positive_duration_is_never_active() {
    let cues = vec![cue("zero", 0, 100.0, 0.0), cue("neg", 0, 100.0, -50.0)];
    for t in [50.0, 100.0, 120.0] {
        assert!(active_cues(&cues, 0, t).is_empty());
    }
}
