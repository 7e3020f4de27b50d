/// Round to the nearest integer, ties toward positive infinity.
///
/// Channel math everywhere goes through this so that `127.5` becomes `128`
/// on every call site, independent of `f64::round`'s ties-away-from-zero rule.
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Convert a channel value in `0..=255` space to `u8`, rounding half up and
/// saturating at both ends.
pub(crate) fn channel_u8(x: f64) -> u8 {
    let v = round_half_up(x);
    if v.is_nan() || v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        v as u8
    }
}

/// Clamp to `[0, 1]`; NaN stays NaN.
pub(crate) fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
