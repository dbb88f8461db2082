/// Centered moving average over an odd window.
///
/// Even windows are widened by one. Near the edges the window is truncated.
/// Non-finite samples are skipped; an output slot whose window holds no
/// finite sample stays NaN.
#[must_use]
pub fn centered_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let window = normalized_window(window);
    if window <= 1 || values.is_empty() {
        return values.to_vec();
    }

    let half = window / 2;
    let mut prefix_sum = Vec::with_capacity(values.len() + 1);
    let mut prefix_count = Vec::with_capacity(values.len() + 1);
    prefix_sum.push(0.0);
    prefix_count.push(0usize);
    for value in values {
        let (sum, count) = (prefix_sum[prefix_sum.len() - 1], prefix_count[prefix_count.len() - 1]);
        if value.is_finite() {
            prefix_sum.push(sum + value);
            prefix_count.push(count + 1);
        } else {
            prefix_sum.push(sum);
            prefix_count.push(count);
        }
    }

    (0..values.len())
        .map(|index| {
            let start = index.saturating_sub(half);
            let end = (index + half + 1).min(values.len());
            let count = prefix_count[end] - prefix_count[start];
            if count == 0 {
                f64::NAN
            } else {
                (prefix_sum[end] - prefix_sum[start]) / count as f64
            }
        })
        .collect()
}

#[must_use]
pub fn normalized_window(window: usize) -> usize {
    if window % 2 == 0 { window + 1 } else { window }
}
