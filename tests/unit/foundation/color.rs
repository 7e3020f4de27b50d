use super::*;

#[test]
fn hex_parse_and_format() {
    assert_eq!(Rgb::parse_hex("#ff0000").unwrap(), Rgb::new(255, 0, 0));
    assert_eq!(Rgb::parse_hex("00D9FF").unwrap(), Rgb::new(0, 0xd9, 0xff));
    assert_eq!(Rgb::new(0, 0xd9, 0xff).to_hex(), "#00d9ff");
    assert!(Rgb::parse_hex("#fff").is_err());
    assert!(Rgb::parse_hex("#gg0000").is_err());
}

#[test]
fn packed_conversion() {
    assert_eq!(Rgb::IDLE.to_packed(), 0x33_33_33);
    assert_eq!(Rgb::from_packed(0x12_34_56), Rgb::new(0x12, 0x34, 0x56));
}

#[test]
fn serde_uses_hex_strings() {
    let json = serde_json::to_string(&Rgb::new(1, 2, 3)).unwrap();
    assert_eq!(json, "\"#010203\"");
    let back: Rgb = serde_json::from_str("\"#FF3366\"").unwrap();
    assert_eq!(back, Rgb::new(0xff, 0x33, 0x66));
    assert!(serde_json::from_str::<Rgb>("\"red\"").is_err());
}

#[test]
fn lerp_rounds_half_up() {
    let red = Rgb::new(255, 0, 0);
    assert_eq!(Rgb::BLACK.lerp(red, 0.5), Rgb::new(128, 0, 0));
    assert_eq!(Rgb::BLACK.lerp(red, 0.0), Rgb::BLACK);
    assert_eq!(Rgb::BLACK.lerp(red, 1.0), red);
    assert_eq!(red.lerp(Rgb::BLACK, 0.5), Rgb::new(128, 0, 0));
}

#[test]
fn dim_scales_channels() {
    assert_eq!(Rgb::new(255, 100, 1).dim(0.5), Rgb::new(128, 50, 1));
    assert_eq!(Rgb::new(255, 255, 255).dim(0.0), Rgb::BLACK);
}

#[test]
fn hsl_primary_hues() {
    assert_eq!(Rgb::from_hsl(0.0, 1.0, 0.5), Rgb::new(255, 0, 0));
    assert_eq!(Rgb::from_hsl(1.0 / 3.0, 1.0, 0.5), Rgb::new(0, 255, 0));
    assert_eq!(Rgb::from_hsl(2.0 / 3.0, 1.0, 0.5), Rgb::new(0, 0, 255));
    assert_eq!(Rgb::from_hsl(0.5, 0.0, 0.5), Rgb::new(128, 128, 128));
}

#[test]
fn led_state_idle_vs_black() {
    assert_eq!(LedState::Idle.display_rgb(), Rgb::IDLE);
    assert_eq!(LedState::Idle.output_rgb(), Rgb::BLACK);
    assert_eq!(LedState::Lit(Rgb::IDLE).output_rgb(), Rgb::IDLE);
}

#[test]
fn channel_sum_clamps_once() {
    let mut sum = ChannelSum::default();
    assert_eq!(sum.finish(), LedState::Idle);
    for _ in 0..5 {
        sum.add(Rgb::new(255, 200, 0));
    }
    assert_eq!(sum.finish(), LedState::Lit(Rgb::new(255, 255, 0)));

    let mut black_only = ChannelSum::default();
    black_only.add(Rgb::BLACK);
    assert_eq!(black_only.finish(), LedState::Idle);
}

#[test]
fn only_all_zero_is_black() {
    assert!(Rgb::BLACK.is_black());
    assert!(!Rgb::new(0, 0, 1).is_black());
    assert!(!Rgb::IDLE.is_black());

    let mut dim = ChannelSum::default();
    dim.add(Rgb::new(0, 1, 0));
    assert_eq!(dim.finish(), LedState::Lit(Rgb::new(0, 1, 0)));
}
