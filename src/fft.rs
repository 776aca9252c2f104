//! 1D discrete Fourier transform used by the frequency-domain sinogram filters.
//!
//! The filters only depend on the [`SpectralTransform`] trait; [`FftTransform`] is
//! the `rustfft` implementation used by default.

use crate::error::TomographyError;
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::fmt::Debug;
use std::sync::Arc;

/// Scaling applied by a transform pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Neither direction is scaled; `inverse(forward(x)) == N·x`.
    Unscaled,
    /// The inverse divides by `N`; `inverse(forward(x)) == x`.
    InverseN,
    /// Both directions divide by `√N`.
    Unitary,
}

/// In-place complex transform of a fixed length, split into real and imaginary parts.
pub trait SpectralTransform: Send + Sync + Debug {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn normalization(&self) -> Normalization;

    /// # Errors
    /// `DimensionMismatch` if either buffer length differs from [`SpectralTransform::len`].
    fn forward(&self, real: &mut [f64], imag: &mut [f64]) -> Result<(), TomographyError>;

    /// # Errors
    /// `DimensionMismatch` if either buffer length differs from [`SpectralTransform::len`].
    fn inverse(&self, real: &mut [f64], imag: &mut [f64]) -> Result<(), TomographyError>;
}

/// `rustfft` plans for one length, normalized as [`Normalization::InverseN`].
#[derive(Clone)]
pub struct FftTransform {
    len: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl FftTransform {
    pub fn new(len: usize) -> FftTransform {
        let mut planner = FftPlanner::<f64>::new();
        FftTransform {
            len,
            forward: planner.plan_fft_forward(len),
            inverse: planner.plan_fft_inverse(len),
        }
    }

    fn run(
        &self,
        fft: &Arc<dyn Fft<f64>>,
        real: &mut [f64],
        imag: &mut [f64],
        scale: f64,
    ) -> Result<(), TomographyError> {
        for buffer_len in [real.len(), imag.len()] {
            if buffer_len != self.len {
                return Err(TomographyError::DimensionMismatch {
                    expected: self.len,
                    actual: buffer_len,
                });
            }
        }

        let mut buffer: Vec<Complex64> = real
            .iter()
            .zip(imag.iter())
            .map(|(&re, &im)| Complex64::new(re, im))
            .collect();
        fft.process(&mut buffer);

        for ((re, im), c) in real.iter_mut().zip(imag.iter_mut()).zip(buffer) {
            *re = c.re * scale;
            *im = c.im * scale;
        }
        Ok(())
    }
}

impl Debug for FftTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FftTransform").field("len", &self.len).finish()
    }
}

impl SpectralTransform for FftTransform {
    fn len(&self) -> usize {
        self.len
    }

    fn normalization(&self) -> Normalization {
        Normalization::InverseN
    }

    fn forward(&self, real: &mut [f64], imag: &mut [f64]) -> Result<(), TomographyError> {
        self.run(&self.forward, real, imag, 1.0)
    }

    fn inverse(&self, real: &mut [f64], imag: &mut [f64]) -> Result<(), TomographyError> {
        let scale = if self.len == 0 {
            1.0
        } else {
            1.0 / self.len as f64
        };
        self.run(&self.inverse, real, imag, scale)
    }
}
