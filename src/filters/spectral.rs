//! Zero-phase filtering of sinogram columns in the frequency domain.

use crate::control::ComputeControl;
use crate::data_container::Sinogram;
use crate::error::TomographyError;
use crate::fft::{FftTransform, SpectralTransform};
use cancellable_loops::par_try_for_each_cancellable;
use ndarray::{Array1, Axis};
use rayon::prelude::*;
use std::sync::Arc;

/// Applies a real spectral weighting to every projection of a sinogram.
///
/// Each column is transformed with a zero imaginary part, both spectral
/// components are multiplied by the same weight, and the real part of the
/// inverse transform becomes the output column. Columns share no state and are
/// processed in parallel.
#[derive(Debug, Clone)]
pub struct SpectralFilterBank {
    transform: Arc<dyn SpectralTransform>,
}

impl SpectralFilterBank {
    /// Filter bank for `n_bins` detector bins using [`FftTransform`].
    pub fn new(n_bins: usize) -> SpectralFilterBank {
        SpectralFilterBank {
            transform: Arc::new(FftTransform::new(n_bins)),
        }
    }

    pub fn with_transform(transform: Arc<dyn SpectralTransform>) -> SpectralFilterBank {
        SpectralFilterBank { transform }
    }

    pub fn transform(&self) -> &dyn SpectralTransform {
        self.transform.as_ref()
    }

    /// # Errors
    /// `DimensionMismatch` if `filter` or the transform length differs from the
    /// number of detector bins.
    pub fn apply_filter(
        &self,
        sinogram: &Sinogram,
        filter: &Array1<f64>,
    ) -> Result<Sinogram, TomographyError> {
        self.apply_filter_with(sinogram, filter, &ComputeControl::new())
    }

    pub fn apply_filter_with(
        &self,
        sinogram: &Sinogram,
        filter: &Array1<f64>,
        control: &ComputeControl,
    ) -> Result<Sinogram, TomographyError> {
        let n_bins = sinogram.n_bins();
        let n_angles = sinogram.n_angles();
        for actual in [filter.len(), self.transform.len()] {
            if actual != n_bins {
                return Err(TomographyError::DimensionMismatch {
                    expected: n_bins,
                    actual,
                });
            }
        }
        log::debug!(
            "spectral filtering {} columns of {} bins ({:?})",
            n_angles,
            n_bins,
            self.transform.normalization()
        );

        let mut output = Sinogram::zeros(n_bins, n_angles);
        let progress = control.start();

        let outcome = par_try_for_each_cancellable(
            output
                .view_mut()
                .axis_iter_mut(Axis(1))
                .into_par_iter()
                .zip(sinogram.view().axis_iter(Axis(1)).into_par_iter()),
            &control.abort_flag,
            |(mut out_column, in_column)| {
                let mut real = in_column.to_vec();
                let mut imag = vec![0.0; n_bins];
                self.transform.forward(&mut real, &mut imag)?;
                for ((re, im), weight) in real.iter_mut().zip(imag.iter_mut()).zip(filter) {
                    *re *= weight;
                    *im *= weight;
                }
                self.transform.inverse(&mut real, &mut imag)?;
                out_column.assign(&Array1::from(real));
                progress.step(n_angles);
                Ok(())
            },
        );

        match outcome {
            Ok(completed) => control.finish(completed, "spectral filter")?,
            Err(err) => return Err(control.fail("spectral filter", err)),
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fft::Normalization;
    use approx::assert_abs_diff_eq;
    use ndarray::Array2;

    fn ramp_sinogram(n_bins: usize, n_angles: usize) -> Sinogram {
        Sinogram::from_array(Array2::from_shape_fn((n_bins, n_angles), |(m, k)| {
            ((m * 7 + k * 3) % 11) as f64 - 5.0
        }))
    }

    #[test]
    fn test_unit_filter_is_identity() {
        let sinogram = ramp_sinogram(16, 5);
        let bank = SpectralFilterBank::new(16);
        let output = bank
            .apply_filter(&sinogram, &Array1::ones(16))
            .unwrap();
        for (a, b) in output.view().iter().zip(sinogram.view().iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_dc_weight_removes_column_mean() {
        let sinogram = Sinogram::from_array(Array2::from_elem((8, 3), 4.0));
        let mut filter = Array1::ones(8);
        filter[0] = 0.0;
        let output = SpectralFilterBank::new(8)
            .apply_filter(&sinogram, &filter)
            .unwrap();
        for value in output.view().iter() {
            assert_abs_diff_eq!(*value, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_columns_are_filtered_independently() {
        let mut sinogram = Sinogram::zeros(8, 3);
        sinogram
            .put_column(1, &[0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
            .unwrap();
        let filter = crate::filters::generator::generate_ram_lak(8);
        let output = SpectralFilterBank::new(8)
            .apply_filter(&sinogram, &filter)
            .unwrap();
        for value in output.column(0).unwrap().iter() {
            assert_eq!(*value, 0.0);
        }
        for value in output.column(2).unwrap().iter() {
            assert_eq!(*value, 0.0);
        }
        // ramp response of an impulse: positive peak, negative side lobes
        let column = output.column(1).unwrap();
        assert!(column[1] > 0.0);
        assert!(column[0] < 0.0 && column[2] < 0.0);
        assert_abs_diff_eq!(column.sum(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_length_mismatches_are_rejected() {
        let sinogram = Sinogram::zeros(8, 2);
        let bank = SpectralFilterBank::new(8);
        assert_eq!(
            bank.apply_filter(&sinogram, &Array1::ones(7)),
            Err(TomographyError::DimensionMismatch {
                expected: 8,
                actual: 7
            })
        );
        let short_bank = SpectralFilterBank::new(6);
        assert_eq!(
            short_bank.apply_filter(&sinogram, &Array1::ones(8)),
            Err(TomographyError::DimensionMismatch {
                expected: 8,
                actual: 6
            })
        );
    }

    #[test]
    fn test_custom_transform_is_used() {
        let bank = SpectralFilterBank::with_transform(Arc::new(FftTransform::new(4)));
        assert_eq!(bank.transform().len(), 4);
        assert_eq!(bank.transform().normalization(), Normalization::InverseN);
    }

    /// Fails every forward transform and raises the abort flag while doing so.
    #[derive(Debug)]
    struct FailingTransform {
        len: usize,
        abort_flag: Arc<std::sync::atomic::AtomicBool>,
    }

    impl SpectralTransform for FailingTransform {
        fn len(&self) -> usize {
            self.len
        }

        fn normalization(&self) -> Normalization {
            Normalization::Unscaled
        }

        fn forward(&self, _real: &mut [f64], _imag: &mut [f64]) -> Result<(), TomographyError> {
            self.abort_flag
                .store(true, std::sync::atomic::Ordering::Relaxed);
            Err(TomographyError::OutOfRange("transform failed".to_string()))
        }

        fn inverse(&self, _real: &mut [f64], _imag: &mut [f64]) -> Result<(), TomographyError> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_run_leaves_control_ready_for_next_run() {
        let control = ComputeControl::new();
        let bank = SpectralFilterBank::with_transform(Arc::new(FailingTransform {
            len: 8,
            abort_flag: control.abort_flag.clone(),
        }));
        let sinogram = ramp_sinogram(8, 6);

        // depending on scheduling the failure or the raised flag ends the loop
        assert!(bank
            .apply_filter_with(&sinogram, &Array1::ones(8), &control)
            .is_err());
        assert!(!control.is_aborted());
        assert_eq!(control.progress(), None);

        let output = SpectralFilterBank::new(8)
            .apply_filter_with(&sinogram, &Array1::ones(8), &control)
            .unwrap();
        for (a, b) in output.view().iter().zip(sinogram.view().iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_abort_flag_stops_filtering() {
        let control = ComputeControl::new();
        control.abort();
        let result = SpectralFilterBank::new(8).apply_filter_with(
            &Sinogram::zeros(8, 4),
            &Array1::ones(8),
            &control,
        );
        assert_eq!(result, Err(TomographyError::Aborted));
    }
}
