#[must_use]
#[inline]
pub fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).fold(0.0, |dot, (xi, yi)| dot + xi * yi)
}

#[must_use]
pub fn mean(x: &[f64]) -> f64 {
    x.iter().sum::<f64>() / x.len().max(1) as f64
}

/// Rounds to the specified number of decimal digits, ties to even on the scaled value.
/// Values too large to be scaled are returned as is.
#[must_use]
pub fn round_to(value: f64, n_digits: i32) -> f64 {
    let scale = 10.0_f64.powi(n_digits);
    let scaled = value * scale;
    if scaled.is_finite() {
        scaled.round_ties_even() / scale
    } else {
        value
    }
}
