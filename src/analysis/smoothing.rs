//! Moving-average smoothing for the displayed rate series
//!
//! Equivalent of numpy's `convolve(data, ones(w)/w, mode='valid')`: a
//! trailing window that only produces fully-covered positions. Display-only;
//! recorded rates are never filtered.

/// Trailing moving average with window `window`.
///
/// For input length `L >= window` the output has length `L - window + 1`,
/// with `output[i] = mean(input[i..i + window])`. If the input is shorter
/// than the window the input is returned unchanged, matching the live-chart
/// behavior of showing raw values until enough samples exist. A window of 0
/// or 1 is the identity.
pub fn moving_average(data: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 || data.len() < window {
        return data.to_vec();
    }

    let mut out = Vec::with_capacity(data.len() - window + 1);
    let inv = 1.0 / window as f64;
    let mut sum: f64 = data[..window].iter().sum();
    out.push(sum * inv);
    for i in window..data.len() {
        sum += data[i] - data[i - window];
        out.push(sum * inv);
    }
    out
}
