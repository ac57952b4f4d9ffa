//! Plain numeric routines over price slices.

/// Simple moving average of the first `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    Some(values[..period].iter().sum::<f64>() / period as f64)
}

/// Exponential moving average of the whole slice.
///
/// Seeded with the simple average of the first `period` values, then
/// `ema = alpha * value + (1 - alpha) * ema` over the remaining values with
/// `alpha = 2 / (period + 1)`, written as `ema + alpha * (value - ema)` so a
/// constant input stays exactly constant. Returns `None` for fewer than
/// `period` values.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    let seed = sma(values, period)?;
    let alpha = 2.0 / (period as f64 + 1.0);
    let value = values[period..]
        .iter()
        .fold(seed, |prev, &v| prev + alpha * (v - prev));
    Some(value)
}

/// Largest finite value in the slice.
pub fn max(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
}

/// `(now / then - 1) * 100`
pub fn percent_return(now: f64, then: f64) -> Option<f64> {
    if then <= 0.0 || !then.is_finite() || !now.is_finite() {
        return None;
    }
    Some((now / then - 1.0) * 100.0)
}

/// `now / (then - 1) * 100`, the historical non-percentage formula.
pub fn legacy_return(now: f64, then: f64) -> Option<f64> {
    let denominator = then - 1.0;
    if denominator == 0.0 || !denominator.is_finite() || !now.is_finite() {
        return None;
    }
    Some(now / denominator * 100.0)
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
