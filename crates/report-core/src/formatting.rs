/// Round `value` to `decimals` places, resolving exact midpoints away from zero.
///
/// The midpoint test is made on `value * 10^decimals` as an `f64`, so a value
/// whose binary form sits just below a decimal midpoint rounds down.
///
/// # Examples
///
/// ```
/// use report_core::formatting::round_half_away;
///
/// assert_eq!(round_half_away(0.125, 2), 0.13);
/// assert_eq!(round_half_away(-0.125, 2), -0.13);
/// assert_eq!(round_half_away(17810.333333, 2), 17810.33);
/// ```
pub fn round_half_away(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10_f64.powi(decimals as i32);
    let scaled = value * factor;
    // At or above 2^52 an f64 has no fractional digits left to round, and
    // past f64::MAX the scaled value overflows to infinity.
    if !scaled.is_finite() || scaled.abs() >= MAX_FRACTIONAL_MAGNITUDE {
        return value;
    }
    scaled.round() / factor
}

/// Smallest magnitude from which every `f64` is a whole number (2^52).
const MAX_FRACTIONAL_MAGNITUDE: f64 = 4_503_599_627_370_496.0;

/// Format `value` with exactly `decimals` digits after the point.
///
/// No thousands grouping is applied, so output stays locale-invariant and
/// parses back with [`str::parse`].
///
/// # Examples
///
/// ```
/// use report_core::formatting::format_decimal;
///
/// assert_eq!(format_decimal(15.0, 2), "15.00");
/// assert_eq!(format_decimal(1234567.891, 2), "1234567.89");
/// ```
pub fn format_decimal(value: f64, decimals: u32) -> String {
    format!("{:.prec$}", value, prec = decimals as usize)
}

/// Arithmetic mean of `values`, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
