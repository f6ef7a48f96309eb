/// Smallest representable value strictly greater than `v`.
pub fn next_float_up(v: f64) -> f64 {
    v.next_up()
}

pub fn clamp(x: f64, min: f64, max: f64) -> f64 {
    x.max(min).min(max)
}

/// Relative comparison that stays meaningful for values close to zero,
/// where the difference is measured against `f64::MIN_POSITIVE` instead.
pub fn nearly_equal(a: f64, b: f64, epsilon: f64) -> bool {
    let diff = (a - b).abs();
    if a == b {
        true
    } else if a == 0.0 || b == 0.0 || diff < f64::MIN_POSITIVE {
        diff < epsilon * f64::MIN_POSITIVE
    } else {
        diff / (a.abs() + b.abs()).min(f64::MAX) < epsilon
    }
}
