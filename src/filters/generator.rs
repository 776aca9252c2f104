//! Spectral weights for the frequency-domain filters.
//!
//! Index 0 is the DC bin. The weights are plain gains for a transform pair whose
//! inverse divides by `N` (see [`crate::fft::Normalization::InverseN`]).

use ndarray::Array1;
use std::f64::consts::PI;

/// Unwindowed ramp: rises linearly from 0 at DC to about 0.5 at bin `N/2`, then
/// falls back toward the last bin.
pub fn generate_ram_lak(size: usize) -> Array1<f64> {
    let mut filter = Array1::zeros(size);
    if size < 2 {
        return filter;
    }
    let step = 0.5 / (size / 2) as f64;
    for i in 1..size {
        filter[i] = if i <= size / 2 {
            filter[i - 1] + step
        } else {
            filter[i - 1] - step
        };
    }
    filter
}

/// Ramp rolled off by a cosine: `w·cos(π·w)` with `w = i/N`, mirrored onto the
/// negative frequencies.
///
/// The Nyquist bin `N/2` is never written and stays zero.
pub fn generate_cosine(size: usize) -> Array1<f64> {
    let mut filter = Array1::zeros(size);
    for i in 1..size / 2 {
        let w = i as f64 / size as f64;
        filter[i] = w * (PI * w).cos();
        filter[size - i] = filter[i];
    }
    filter
}
