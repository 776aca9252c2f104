//! Project, filter and backproject an image in one call.

use crate::backprojection::BackProjector;
use crate::config::ReconstructionConfig;
use crate::control::ComputeControl;
use crate::data_container::{Image, Sinogram};
use crate::error::TomographyError;
use crate::filters::filter::SinogramFilter;
use crate::radon::ForwardProjector;
use std::time::{Duration, Instant};

/// Wall-clock time spent in each stage of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StageTimings {
    pub projection: Duration,
    pub filtering: Duration,
    pub backprojection: Duration,
}

impl StageTimings {
    pub fn total(&self) -> Duration {
        self.projection + self.filtering + self.backprojection
    }
}

/// Everything produced by one [`ReconstructionPipeline::run`].
#[derive(Debug, Clone)]
pub struct Reconstruction {
    pub sinogram: Sinogram,
    /// Identical to `sinogram` when no filter is configured.
    pub filtered_sinogram: Sinogram,
    pub image: Image,
    pub timings: StageTimings,
}

#[derive(Debug, Clone)]
pub struct ReconstructionPipeline {
    config: ReconstructionConfig,
    projector: ForwardProjector,
    filter: Option<Box<dyn SinogramFilter>>,
}

impl ReconstructionPipeline {
    /// # Errors
    /// `InvalidArgument` if the configuration asks for zero angles.
    pub fn new(config: ReconstructionConfig) -> Result<ReconstructionPipeline, TomographyError> {
        let projector = ForwardProjector::new(config.n_angles)?;
        let filter = config.filter.build();
        Ok(ReconstructionPipeline {
            config,
            projector,
            filter,
        })
    }

    pub fn config(&self) -> &ReconstructionConfig {
        &self.config
    }

    pub fn run(&self, image: &Image) -> Result<Reconstruction, TomographyError> {
        self.run_with(image, &ComputeControl::new())
    }

    /// Runs all three stages, sharing `control` between them. An abort in any
    /// stage ends the run with `Aborted`.
    pub fn run_with(
        &self,
        image: &Image,
        control: &ComputeControl,
    ) -> Result<Reconstruction, TomographyError> {
        let size = image.size()?;
        let backprojector = BackProjector::new(size)?;
        let mut timings = StageTimings::default();

        let start = Instant::now();
        let sinogram = self.projector.project_with(image, control)?;
        timings.projection = start.elapsed();
        log::info!(
            "projected {0}x{0} image over {1} angles in {2:.3} ms",
            size,
            self.config.n_angles,
            timings.projection.as_secs_f64() * 1000.0
        );

        let start = Instant::now();
        let filtered_sinogram = match &self.filter {
            Some(filter) => filter.filter(&sinogram, control)?,
            None => sinogram.clone(),
        };
        timings.filtering = start.elapsed();
        log::info!(
            "{} filter took {:.3} ms",
            self.config.filter,
            timings.filtering.as_secs_f64() * 1000.0
        );

        let start = Instant::now();
        let reconstruction = backprojector.reconstruct_with(&filtered_sinogram, control)?;
        timings.backprojection = start.elapsed();
        log::info!(
            "backprojection took {:.3} ms, {:.3} ms in total",
            timings.backprojection.as_secs_f64() * 1000.0,
            timings.total().as_secs_f64() * 1000.0
        );

        Ok(Reconstruction {
            sinogram,
            filtered_sinogram,
            image: reconstruction,
            timings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterKind;
    use crate::geometry::FieldOfView;

    fn disc(size: usize, radius: f64) -> Image {
        let mut image = Image::zeros(size, size);
        let center = (size as f64 - 1.0) / 2.0;
        for j in 0..size {
            for k in 0..size {
                let (y, x) = (j as f64 - center, k as f64 - center);
                if x * x + y * y < radius * radius {
                    image.set(j, k, 1.0).unwrap();
                }
            }
        }
        image
    }

    fn pipeline(n_angles: usize, filter: FilterKind) -> ReconstructionPipeline {
        ReconstructionPipeline::new(ReconstructionConfig { n_angles, filter }).unwrap()
    }

    fn rms_difference(a: &Image, b: &Image) -> f64 {
        let sum: f64 = a
            .view()
            .iter()
            .zip(b.view().iter())
            .map(|(x, y)| (x - y).powi(2))
            .sum();
        (sum / a.view().len() as f64).sqrt()
    }

    #[test]
    fn test_zero_angles_config_is_rejected() {
        let config = ReconstructionConfig {
            n_angles: 0,
            filter: FilterKind::RamLak,
        };
        assert!(matches!(
            ReconstructionPipeline::new(config),
            Err(TomographyError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unfiltered_error_shrinks_with_more_angles() {
        let phantom = disc(32, 9.0);
        let reference = pipeline(512, FilterKind::None).run(&phantom).unwrap().image;

        let errors: Vec<f64> = [8, 32, 128]
            .iter()
            .map(|&n| {
                let image = pipeline(n, FilterKind::None).run(&phantom).unwrap().image;
                rms_difference(&image, &reference)
            })
            .collect();

        assert!(errors[0] >= errors[1], "{:?}", errors);
        assert!(errors[1] >= errors[2], "{:?}", errors);
    }

    #[test]
    fn test_unfiltered_run_passes_sinogram_through() {
        let result = pipeline(16, FilterKind::None).run(&disc(12, 3.0)).unwrap();
        assert_eq!(result.sinogram, result.filtered_sinogram);
        assert_eq!(result.sinogram.n_angles(), 16);
        assert_eq!(result.sinogram.n_bins(), 12);
    }

    #[test]
    fn test_ram_lak_reconstruction_recovers_disc() {
        let size = 32;
        let radius = 8.0;
        let result = pipeline(64, FilterKind::RamLak)
            .run(&disc(size, radius))
            .unwrap();
        assert_ne!(result.sinogram, result.filtered_sinogram);

        let fov = FieldOfView::new(size);
        let center = fov.center();
        let (mut inside, mut n_inside) = (0.0, 0usize);
        let (mut outside, mut n_outside) = (0.0, 0usize);
        for j in 0..size {
            for k in 0..size {
                let (y, x) = (j as f64 - center, k as f64 - center);
                let value = result.image.get(j, k).unwrap();
                if !fov.contains(x, y) {
                    assert_eq!(value, 0.0);
                } else if x * x + y * y < (radius - 1.5).powi(2) {
                    inside += value;
                    n_inside += 1;
                } else if x * x + y * y > (radius + 1.5).powi(2) {
                    outside += value;
                    n_outside += 1;
                }
            }
        }
        assert!(inside / n_inside as f64 > outside / n_outside as f64);
    }

    #[test]
    fn test_every_filter_keeps_field_of_view_clean() {
        let size = 16;
        let fov = FieldOfView::new(size);
        let center = fov.center();
        for kind in [FilterKind::Cosine, FilterKind::Laplacian] {
            let image = pipeline(20, kind).run(&disc(size, 4.0)).unwrap().image;
            for j in 0..size {
                for k in 0..size {
                    if !fov.contains(k as f64 - center, j as f64 - center) {
                        assert_eq!(image.get(j, k).unwrap(), 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_non_square_image_is_rejected() {
        assert!(matches!(
            pipeline(8, FilterKind::RamLak).run(&Image::zeros(8, 9)),
            Err(TomographyError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_abort_ends_run() {
        let control = ComputeControl::new();
        control.abort();
        let result = pipeline(8, FilterKind::Cosine).run_with(&disc(16, 4.0), &control);
        assert!(matches!(result, Err(TomographyError::Aborted)));
        assert!(!control.is_aborted());
        assert_eq!(control.progress(), None);
    }
}
