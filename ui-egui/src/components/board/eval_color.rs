// SPDX-License-Identifier: MIT OR Apache-2.0

//! Points-lost to color bucket mapping

/// Bucket of `points_lost` for ascending `thresholds`.
///
/// Each threshold is the inclusive lower bound of the next bucket, so a value
/// equal to a threshold lands in the worse bucket.
pub fn eval_bucket(points_lost: f64, thresholds: &[f64]) -> usize {
    let mut i = 0;
    while i < thresholds.len() && points_lost >= thresholds[i] {
        i += 1;
    }
    i
}

/// Color for `points_lost`; the last color absorbs every overflow bucket
pub fn eval_color<C: Copy>(points_lost: f64, thresholds: &[f64], colors: &[C]) -> Option<C> {
    let last = colors.len().checked_sub(1)?;
    Some(colors[eval_bucket(points_lost, thresholds).min(last)])
}
