//! Forward projection: image to sinogram.
//!
//! Every detector bin accumulates the bilinearly interpolated image along a ray
//! rotated by the view angle. Only samples inside the inscribed circle take part,
//! which keeps every interpolation inside the image lattice.

use crate::control::ComputeControl;
use crate::data_container::{Image, Sinogram};
use crate::error::TomographyError;
use crate::geometry::{AngleGrid, FieldOfView};
use crate::interpolation::bilinear;
use cancellable_loops::par_for_each_cancellable;
use ndarray::Axis;
use rayon::prelude::*;

/// Parallel-beam Radon transform over a fixed number of views.
#[derive(Debug, Clone)]
pub struct ForwardProjector {
    n_angles: usize,
}

impl ForwardProjector {
    /// # Errors
    /// `InvalidArgument` if `n_angles` is zero.
    pub fn new(n_angles: usize) -> Result<ForwardProjector, TomographyError> {
        if n_angles == 0 {
            return Err(TomographyError::InvalidArgument(
                "number of angles must be at least 1".to_string(),
            ));
        }
        Ok(ForwardProjector { n_angles })
    }

    pub fn n_angles(&self) -> usize {
        self.n_angles
    }

    /// Projects `image` into a sinogram of shape `[size bins, n_angles]`.
    ///
    /// The image mean is removed on a private copy first; `image` itself is not
    /// modified. Line sums are stored raw, without normalization.
    ///
    /// # Errors
    /// `InvalidDimension` if the image is not square or smaller than 2×2.
    pub fn project(&self, image: &Image) -> Result<Sinogram, TomographyError> {
        self.project_with(image, &ComputeControl::new())
    }

    /// Same as [`ForwardProjector::project`], reporting progress per view and
    /// returning `Aborted` once `control.abort_flag` is raised.
    pub fn project_with(
        &self,
        image: &Image,
        control: &ComputeControl,
    ) -> Result<Sinogram, TomographyError> {
        let size = image.size()?;
        if size < 2 {
            return Err(TomographyError::InvalidDimension(format!(
                "image must be at least 2x2, got {0}x{0}",
                size
            )));
        }
        log::debug!("projecting {0}x{0} image over {1} angles", size, self.n_angles);

        let working = image.subtracted(image.mean());
        let grid = working.view();
        let fov = FieldOfView::new(size);
        let center = fov.center();
        let angles = AngleGrid::new(self.n_angles);

        let mut sinogram = Sinogram::zeros(size, self.n_angles);
        let progress = control.start();

        let completed = par_for_each_cancellable(
            sinogram
                .view_mut()
                .axis_iter_mut(Axis(1))
                .into_par_iter()
                .enumerate(),
            &control.abort_flag,
            |(k, mut column)| {
                let (cos, sin) = angles.cos_sin(k);
                for (m, bin) in column.iter_mut().enumerate() {
                    let mc = m as f64 - center;
                    let mut sum = 0.0;
                    for n in 0..size {
                        let nc = n as f64 - center;
                        if fov.contains(mc, nc) {
                            let x = center + mc * cos - nc * sin;
                            let y = center + mc * sin + nc * cos;
                            sum += bilinear(&grid, x, y);
                        }
                    }
                    *bin = sum;
                }
                progress.step(self.n_angles);
            },
        );

        control.finish(completed, "forward projection")?;
        Ok(sinogram)
    }
}
