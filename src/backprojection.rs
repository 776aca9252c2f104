//! Backprojection: smears every (filtered) projection back across the image
//! along its acquisition direction and sums over all views.
//!
//! The detector position `center + mc·cos + nc·sin` is the transpose of the forward
//! projector's rotation, which keeps the two operators adjoint. Output rows are
//! split among workers, each pixel summing its views in angle order, so the
//! result does not depend on the thread count.

use crate::control::ComputeControl;
use crate::data_container::{Image, Sinogram};
use crate::error::TomographyError;
use crate::geometry::{AngleGrid, FieldOfView};
use crate::interpolation::linear;
use cancellable_loops::par_for_each_cancellable;
use ndarray::{Array2, Axis};
use rayon::prelude::*;

/// Reconstructs `size × size` images from sinograms with `size` detector bins.
#[derive(Debug, Clone)]
pub struct BackProjector {
    size: usize,
}

impl BackProjector {
    /// # Errors
    /// `InvalidDimension` if `size` is below 2.
    pub fn new(size: usize) -> Result<BackProjector, TomographyError> {
        if size < 2 {
            return Err(TomographyError::InvalidDimension(format!(
                "reconstruction size must be at least 2, got {}",
                size
            )));
        }
        Ok(BackProjector { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Backprojects every column of `sinogram`, weighting each view by `π/A`.
    ///
    /// Pixels outside the inscribed circle stay exactly zero.
    ///
    /// # Errors
    /// `InvalidDimension` if the detector axis differs from the reconstruction size,
    /// `InvalidArgument` if the sinogram has no views.
    pub fn reconstruct(&self, sinogram: &Sinogram) -> Result<Image, TomographyError> {
        self.reconstruct_with(sinogram, &ComputeControl::new())
    }

    pub fn reconstruct_with(
        &self,
        sinogram: &Sinogram,
        control: &ComputeControl,
    ) -> Result<Image, TomographyError> {
        let size = self.size;
        if sinogram.n_bins() != size {
            return Err(TomographyError::InvalidDimension(format!(
                "sinogram has {} detector bins, reconstruction expects {}",
                sinogram.n_bins(),
                size
            )));
        }
        let n_angles = sinogram.n_angles();
        if n_angles == 0 {
            return Err(TomographyError::InvalidArgument(
                "sinogram holds no projections".to_string(),
            ));
        }
        log::debug!("backprojecting {} views into {1}x{1}", n_angles, size);

        let angles = AngleGrid::new(n_angles);
        let step = angles.step();
        let fov = FieldOfView::new(size);
        let center = fov.center();

        let mut reconstruction = Array2::<f64>::zeros((size, size));
        let progress = control.start();

        let completed = par_for_each_cancellable(
            reconstruction
                .axis_iter_mut(Axis(0))
                .into_par_iter()
                .enumerate(),
            &control.abort_flag,
            |(j, mut row)| {
                let nc = j as f64 - center;
                for (i, column) in sinogram.columns().enumerate() {
                    let (cos, sin) = angles.cos_sin(i);
                    for (k, pixel) in row.iter_mut().enumerate() {
                        let mc = k as f64 - center;
                        if fov.contains(mc, nc) {
                            let m = center + mc * cos + nc * sin;
                            *pixel += step * linear(&column, m);
                        }
                    }
                }
                progress.step(size);
            },
        );

        control.finish(completed, "backprojection")?;
        Ok(Image::from_array(reconstruction))
    }
}
