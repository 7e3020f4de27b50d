use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn standard_layout_covers_541_leds() {
    let layout = ChannelLayout::standard();
    layout.validate().unwrap();
    assert_eq!(layout.led_count(), 541);
    assert_eq!(layout.segments().len(), 16);

    let counts = layout.part_counts();
    assert_eq!(counts.values().sum::<u32>(), 541);
    assert_eq!(counts["rTorso"], 33);
    assert_eq!(counts["face"], 41);
    assert_eq!(counts["rLegOuter"], 64);
    assert_eq!(counts["lLegOuterExt"], 13);
}

#[test]
fn part_lookup_uses_inclusive_upper_bounds() {
    let layout = ChannelLayout::standard();
    assert_eq!(layout.part_at(0), Some("rTorso"));
    assert_eq!(layout.part_at(32), Some("rTorso"));
    assert_eq!(layout.part_at(33), Some("rPocket"));
    assert_eq!(layout.part_at(183), Some("face"));
    assert_eq!(layout.part_at(540), Some("lLegOuterExt"));
    assert_eq!(layout.part_at(541), None);
}

#[test]
fn x_is_piecewise_linear() {
    let layout = ChannelLayout::standard();
    assert!(approx(layout.approximate_x(0), 0.45));
    assert!(approx(layout.approximate_x(69), 0.35));
    assert!(approx(layout.approximate_x(96), 0.10));
    assert!(approx(layout.approximate_x(100), 0.05));
    assert!(approx(layout.approximate_x(331), 0.55));
    assert!(approx(layout.approximate_x(381), 0.65));
    assert!(approx(layout.approximate_x(225), 0.95));
}

#[test]
fn out_of_table_indices_are_neutral() {
    let layout = ChannelLayout::standard();
    assert_eq!(layout.approximate_x(541), NEUTRAL_POSITION);
    assert_eq!(
        layout.approximate_y(9000, Pose::HandsUp, Direction::Forward, EffectKind::BodyFill),
        NEUTRAL_POSITION
    );
}

#[test]
fn y_follows_anatomy_and_pose() {
    let layout = ChannelLayout::standard();
    let y = |i, pose| layout.approximate_y(i, pose, Direction::Forward, EffectKind::BodyFill);

    assert!(approx(y(0, Pose::HandsDown), 0.5));
    assert!(approx(y(32, Pose::HandsDown), 0.2));
    assert!(approx(y(150, Pose::HandsDown), 0.0));
    assert!(approx(y(100, Pose::HandsDown), 0.65));
    assert!(approx(y(100, Pose::HandsUp), 0.25));
    assert!(approx(y(96, Pose::HandsDown), 0.6));
    assert!(approx(y(96, Pose::HandsUp), 0.2));
    assert!(approx(y(381, Pose::HandsDown), 1.0));
    assert!(approx(y(540, Pose::HandsUp), 1.0));
}

#[test]
fn pockets_drop_to_feet_only_for_backward_body_wipe() {
    // Observed behavior of shipped shows: a bottom-up body-wipe treats the
    // pockets as if they were at the feet.
    let layout = ChannelLayout::standard();
    for pocket in [50u16, 270] {
        assert!(approx(
            layout.approximate_y(pocket, Pose::HandsDown, Direction::Backward, EffectKind::BodyWipe),
            1.0
        ));
        assert!(approx(
            layout.approximate_y(pocket, Pose::HandsDown, Direction::Forward, EffectKind::BodyWipe),
            0.5
        ));
        assert!(approx(
            layout.approximate_y(pocket, Pose::HandsDown, Direction::Backward, EffectKind::BodyFill),
            0.5
        ));
    }
    // Torso is unaffected.
    assert!(approx(
        layout.approximate_y(0, Pose::HandsDown, Direction::Backward, EffectKind::BodyWipe),
        0.5
    ));
}

#[test]
fn position_is_a_point() {
    let p = ChannelLayout::standard().position(150, Pose::HandsDown);
    assert!(approx(p.x, 0.5));
    assert!(approx(p.y, 0.0));
}

#[test]
fn custom_layouts_are_data() {
    let json = r#"{
        "segments": [
            { "part": "strip", "last": 9, "x": { "ramp": { "start": 0.0, "delta": 1.0 } }, "y": { "anchor": "waist" } },
            { "part": "tip", "last": 10, "x": { "fixed": 1.0 }, "y": { "span": { "from": "top", "to": "feet" } } }
        ]
    }"#;
    let layout = ChannelLayout::from_json_str(json).unwrap();
    assert_eq!(layout.led_count(), 11);
    assert!(approx(layout.approximate_x(9), 1.0));
    assert!(approx(layout.approximate_x(0), 0.0));
    // Single-LED segment sits at the start of its span.
    assert!(approx(
        layout.approximate_y(10, Pose::HandsDown, Direction::Forward, EffectKind::BodyFill),
        0.0
    ));
}

#[test]
fn invalid_layouts_are_rejected() {
    assert!(ChannelLayout::new(vec![]).is_err());
    let seg = |last| Segment {
        part: "p".to_string(),
        last,
        x: XPos::Fixed(0.5),
        y: YPos::Anchor(BodyAnchor::Top),
    };
    assert!(ChannelLayout::new(vec![seg(5), seg(5)]).is_err());
    assert!(ChannelLayout::new(vec![seg(5), seg(6)]).is_ok());
    let bad = Segment {
        x: XPos::Fixed(f64::NAN),
        ..seg(1)
    };
    assert!(ChannelLayout::new(vec![bad]).is_err());
}
