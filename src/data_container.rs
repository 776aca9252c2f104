//! Shape-carrying containers for images and sinograms.
//!
//! Both wrap an `ndarray::Array2<f64>` and only hand out bounds-checked accessors,
//! so a mismatched shape surfaces as a `TomographyError` instead of a silent
//! out-of-bounds read.

use crate::error::TomographyError;
use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut2, Axis};
use serde::{Deserialize, Serialize};

/// A 2D grid of samples addressed `(row, col)`.
///
/// Rows run along the y axis and columns along the x axis of the projection
/// geometry. Projection requires a square image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Image {
    data: Array2<f64>,
}

impl Image {
    /// Creates an image of `height` rows and `width` columns filled with zeros.
    pub fn zeros(height: usize, width: usize) -> Image {
        Image {
            data: Array2::zeros((height, width)),
        }
    }

    pub fn from_array(data: Array2<f64>) -> Image {
        Image { data }
    }

    /// Builds an image from row-major samples.
    pub fn from_shape_vec(
        height: usize,
        width: usize,
        samples: Vec<f64>,
    ) -> Result<Image, TomographyError> {
        let actual = samples.len();
        let data = Array2::from_shape_vec((height, width), samples).map_err(|_| {
            TomographyError::DimensionMismatch {
                expected: height * width,
                actual,
            }
        })?;
        Ok(Image { data })
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Edge length of a square image.
    ///
    /// # Errors
    /// `InvalidDimension` if width and height differ.
    pub fn size(&self) -> Result<usize, TomographyError> {
        if self.width() != self.height() {
            return Err(TomographyError::InvalidDimension(format!(
                "image must be square, got {}x{} (height x width)",
                self.height(),
                self.width()
            )));
        }
        Ok(self.width())
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64, TomographyError> {
        self.data
            .get((row, col))
            .copied()
            .ok_or_else(|| out_of_range(row, col, self.height(), self.width()))
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), TomographyError> {
        let (height, width) = (self.height(), self.width());
        let sample = self
            .data
            .get_mut((row, col))
            .ok_or_else(|| out_of_range(row, col, height, width))?;
        *sample = value;
        Ok(())
    }

    pub fn row(&self, row: usize) -> Result<ArrayView1<'_, f64>, TomographyError> {
        check_index(row, self.height(), "row")?;
        Ok(self.data.row(row))
    }

    pub fn column(&self, col: usize) -> Result<ArrayView1<'_, f64>, TomographyError> {
        check_index(col, self.width(), "column")?;
        Ok(self.data.column(col))
    }

    pub fn put_row(&mut self, row: usize, values: &[f64]) -> Result<(), TomographyError> {
        check_index(row, self.height(), "row")?;
        check_len(values.len(), self.width())?;
        self.data
            .row_mut(row)
            .iter_mut()
            .zip(values)
            .for_each(|(dst, &src)| *dst = src);
        Ok(())
    }

    pub fn put_column(&mut self, col: usize, values: &[f64]) -> Result<(), TomographyError> {
        check_index(col, self.width(), "column")?;
        check_len(values.len(), self.height())?;
        self.data
            .column_mut(col)
            .iter_mut()
            .zip(values)
            .for_each(|(dst, &src)| *dst = src);
        Ok(())
    }

    /// Arithmetic mean of all samples, `0.0` for an empty image.
    pub fn mean(&self) -> f64 {
        self.data.mean().unwrap_or(0.0)
    }

    /// Subtracts `value` from every sample in place.
    pub fn subtract(&mut self, value: f64) {
        self.data.mapv_inplace(|v| v - value);
    }

    /// Returns a copy with `value` subtracted from every sample.
    pub fn subtracted(&self, value: f64) -> Image {
        Image {
            data: self.data.mapv(|v| v - value),
        }
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn into_array(self) -> Array2<f64> {
        self.data
    }
}

/// Projection data: one column per angle, one row per detector bin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sinogram {
    data: Array2<f64>,
}

impl Sinogram {
    pub fn zeros(n_bins: usize, n_angles: usize) -> Sinogram {
        Sinogram {
            data: Array2::zeros((n_bins, n_angles)),
        }
    }

    /// Wraps an array shaped `(n_bins, n_angles)`.
    pub fn from_array(data: Array2<f64>) -> Sinogram {
        Sinogram { data }
    }

    pub fn n_angles(&self) -> usize {
        self.data.ncols()
    }

    pub fn n_bins(&self) -> usize {
        self.data.nrows()
    }

    pub fn get(&self, bin: usize, angle: usize) -> Result<f64, TomographyError> {
        self.data
            .get((bin, angle))
            .copied()
            .ok_or_else(|| out_of_range(bin, angle, self.n_bins(), self.n_angles()))
    }

    /// Projection recorded at angle index `angle`.
    pub fn column(&self, angle: usize) -> Result<ArrayView1<'_, f64>, TomographyError> {
        check_index(angle, self.n_angles(), "angle")?;
        Ok(self.data.column(angle))
    }

    pub fn put_column(&mut self, angle: usize, values: &[f64]) -> Result<(), TomographyError> {
        check_index(angle, self.n_angles(), "angle")?;
        check_len(values.len(), self.n_bins())?;
        self.data
            .column_mut(angle)
            .iter_mut()
            .zip(values)
            .for_each(|(dst, &src)| *dst = src);
        Ok(())
    }

    /// Iterates over the projections in angle order.
    pub fn columns(&self) -> ndarray::iter::AxisIter<'_, f64, ndarray::Ix1> {
        self.data.axis_iter(Axis(1))
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub(crate) fn view_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        self.data.view_mut()
    }

    pub fn into_array(self) -> Array2<f64> {
        self.data
    }
}

fn out_of_range(row: usize, col: usize, height: usize, width: usize) -> TomographyError {
    TomographyError::OutOfRange(format!(
        "({}, {}) outside grid of {}x{}",
        row, col, height, width
    ))
}

fn check_index(index: usize, len: usize, what: &str) -> Result<(), TomographyError> {
    if index >= len {
        return Err(TomographyError::OutOfRange(format!(
            "{} {} outside 0..{}",
            what, index, len
        )));
    }
    Ok(())
}

fn check_len(actual: usize, expected: usize) -> Result<(), TomographyError> {
    if actual != expected {
        return Err(TomographyError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
