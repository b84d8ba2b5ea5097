/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Trailing moving average over nullable values.
///
/// Position `i` holds the mean of `values[i + 1 - window..=i]`. The first
/// `window - 1` positions are `None`, and so is any position whose window
/// contains a `None`. A `window` of zero yields all `None`.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            let present: Option<Vec<f64>> = slice.iter().copied().collect();
            present.map(|v| mean(&v))
        })
        .collect()
}
