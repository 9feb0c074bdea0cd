// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Anti-aliased integer-factor decimation.
//!
//! The low-pass stage is a linear-phase FIR filter (Hamming-windowed sinc,
//! `20 * q + 1` taps) with its cutoff at the Nyquist frequency of the output
//! rate. It is applied centered on each kept sample, so the output has no
//! group delay, and the signal is extended at both ends by odd reflection
//! to keep edge samples close to their neighbours.
//!
//! Only the kept samples are filtered: sample `j` of the output is the
//! filtered value at input index `j * q`, for `j < floor(N / q)`.

use std::f64::consts::PI;

use crate::core::error::{GifError, Result};

/// Taps per unit of decimation factor on each side of the filter center.
const HALF_TAPS_PER_FACTOR: usize = 10;

/// Relative tolerance when checking that a rate ratio is an integer.
const RATIO_TOLERANCE: f64 = 1e-9;

/// Integer decimation factor that takes `source_rate` to `target_rate`.
///
/// # Errors
///
/// Returns [`GifError::Configuration`] when either rate is not a positive
/// finite number, when the target exceeds the source, or when the ratio is
/// not an integer.
pub fn decimation_factor(source_rate: f64, target_rate: f64) -> Result<usize> {
    if !(source_rate.is_finite() && source_rate > 0.0) {
        return Err(GifError::configuration(format!(
            "source sample rate must be positive, got {source_rate}"
        )));
    }
    if !(target_rate.is_finite() && target_rate > 0.0) {
        return Err(GifError::configuration(format!(
            "target sample rate must be positive, got {target_rate}"
        )));
    }

    let ratio = source_rate / target_rate;
    let factor = ratio.round();
    if factor < 1.0 || (ratio - factor).abs() > RATIO_TOLERANCE * ratio {
        return Err(GifError::configuration(format!(
            "cannot decimate {source_rate} Hz to {target_rate} Hz: ratio {ratio} is not a whole number >= 1"
        )));
    }
    Ok(factor as usize)
}

/// Low-pass FIR coefficients for decimation by `factor`, normalized to
/// unity gain at DC.
pub fn lowpass_taps(factor: usize) -> Vec<f64> {
    let half = HALF_TAPS_PER_FACTOR * factor;
    let len = 2 * half + 1;
    let q = factor as f64;

    let mut taps: Vec<f64> = (0..len)
        .map(|k| {
            let n = k as f64 - half as f64;
            let sinc = if n == 0.0 {
                1.0
            } else {
                let x = PI * n / q;
                x.sin() / x
            };
            let window = 0.54 - 0.46 * (2.0 * PI * k as f64 / (len - 1) as f64).cos();
            sinc * window
        })
        .collect();

    let sum: f64 = taps.iter().sum();
    for tap in &mut taps {
        *tap /= sum;
    }
    taps
}

/// Sample `j` of the signal extended by odd reflection about its end points.
fn extended(values: &[f64], j: isize) -> f64 {
    let n = values.len() as isize;
    let last = n - 1;
    if j < 0 {
        let mirror = (-j).min(last);
        2.0 * values[0] - values[mirror as usize]
    } else if j > last {
        let mirror = (2 * last - j).max(0);
        2.0 * values[last as usize] - values[mirror as usize]
    } else {
        values[j as usize]
    }
}

/// Decimate `values` by `factor`.
///
/// Returns `floor(values.len() / factor)` samples. A factor of 1 returns the
/// input unchanged. `NaN` samples propagate into every output sample whose
/// filter window covers them.
///
/// # Errors
///
/// Returns [`GifError::Configuration`] if `factor` is zero.
pub fn decimate(values: &[f64], factor: usize) -> Result<Vec<f64>> {
    if factor == 0 {
        return Err(GifError::configuration("decimation factor must be at least 1"));
    }
    if factor == 1 {
        return Ok(values.to_vec());
    }

    let out_len = values.len() / factor;
    if out_len == 0 {
        return Ok(Vec::new());
    }

    let taps = lowpass_taps(factor);
    let half = (taps.len() / 2) as isize;

    let out = (0..out_len)
        .map(|j| {
            let center = (j * factor) as isize;
            taps.iter()
                .enumerate()
                .map(|(k, h)| h * extended(values, center + k as isize - half))
                .sum()
        })
        .collect();
    Ok(out)
}
