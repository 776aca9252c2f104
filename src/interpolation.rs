//! Resampling and rounding primitives shared by the projectors.
//!
//! `floor` is a true floor toward negative infinity; every index below goes
//! through it rather than an `as` cast, which truncates toward zero.

use crate::error::TomographyError;
use ndarray::{ArrayView1, ArrayView2};

/// Largest integer not greater than `d`.
#[inline]
pub fn floor(d: f64) -> isize {
    d.floor() as isize
}

/// Smallest integer not less than `d`.
#[inline]
pub fn ceil(d: f64) -> isize {
    -floor(-d)
}

/// Closest integer to `d`; halves round toward positive infinity (`-2.5 -> -2`).
#[inline]
pub fn round(d: f64) -> isize {
    floor(d + 0.5)
}

/// Bilinear blend of the four samples around `(x, y)`.
///
/// `x` addresses columns and `y` rows. The caller guarantees
/// `floor(x) ∈ [0, width-2]` and `floor(y) ∈ [0, height-2]`; the projectors do
/// so through the inscribed-circle test. No clamping happens here; debug builds
/// assert the precondition and [`try_bilinear`] reports it as an error.
#[inline]
pub fn bilinear(grid: &ArrayView2<f64>, x: f64, y: f64) -> f64 {
    let i = floor(x);
    let j = floor(y);
    debug_assert!(
        lattice_contains(grid, i, j),
        "bilinear sample ({x}, {y}) outside the interpolation lattice"
    );
    let (i, j) = (i as usize, j as usize);
    let dx = x - i as f64;
    let dy = y - j as f64;

    let v00 = grid[[j, i]];
    let v10 = grid[[j, i + 1]];
    let v01 = grid[[j + 1, i]];
    let v11 = grid[[j + 1, i + 1]];

    v00 * (1.0 - dx) * (1.0 - dy) + v10 * dx * (1.0 - dy) + v01 * (1.0 - dx) * dy + v11 * dx * dy
}

/// Checked variant of [`bilinear`].
///
/// # Errors
/// `OutOfRange` if the four neighbours of `(x, y)` are not all inside `grid`.
pub fn try_bilinear(grid: &ArrayView2<f64>, x: f64, y: f64) -> Result<f64, TomographyError> {
    if !x.is_finite() || !y.is_finite() || !lattice_contains(grid, floor(x), floor(y)) {
        return Err(TomographyError::OutOfRange(format!(
            "bilinear sample ({}, {}) outside a {}x{} lattice",
            x,
            y,
            grid.nrows(),
            grid.ncols()
        )));
    }
    Ok(bilinear(grid, x, y))
}

fn lattice_contains(grid: &ArrayView2<f64>, i: isize, j: isize) -> bool {
    i >= 0 && j >= 0 && i + 1 < grid.ncols() as isize && j + 1 < grid.nrows() as isize
}

/// Linear interpolation along a detector column.
///
/// Positions left of the first sample return the first sample and positions at or
/// beyond the last sample return the last one.
///
/// # Panics
/// If `vector` is empty.
#[inline]
pub fn linear(vector: &ArrayView1<f64>, t: f64) -> f64 {
    let len = vector.len() as isize;
    let i = floor(t);
    if i >= 0 && i < len - 1 {
        let dx = t - i as f64;
        let i = i as usize;
        vector[i] * (1.0 - dx) + vector[i + 1] * dx
    } else if i < 0 {
        vector[0]
    } else {
        vector[vector.len() - 1]
    }
}
