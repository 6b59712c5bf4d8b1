//! Population moments over plain slices.
//!
//! Every function returns `None` for empty input instead of dividing by zero.

/// Values closer than this, relative to their magnitude, count as equal when
/// checking for a constant series.
const RELATIVE_TOLERANCE: f64 = 1e-9;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let sum_sq = values
        .iter()
        .map(|v| {
            let diff = v - m;
            diff * diff
        })
        .sum::<f64>();
    Some(sum_sq / values.len() as f64)
}

pub fn std_dev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

/// Population covariance. `None` when the slices are empty or differ in length.
pub fn covariance(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() {
        return None;
    }
    let ma = mean(a)?;
    let mb = mean(b)?;
    let sum = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - ma) * (y - mb))
        .sum::<f64>();
    Some(sum / a.len() as f64)
}

/// True when the series has no dispersion: empty, a single value, or every
/// value equal to the first within a relative tolerance.
///
/// Returns recomputed from prices carry rounding noise, so a constant series
/// would otherwise show a tiny positive variance.
pub fn is_constant(values: &[f64]) -> bool {
    match values.first() {
        None => true,
        Some(&first) => values.iter().all(|&v| approx_eq(v, first)),
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= RELATIVE_TOLERANCE * a.abs().max(b.abs())
}
