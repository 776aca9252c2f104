//! Parallel-beam tomography on square images.
//!
//! [`ForwardProjector`] turns an image into a sinogram (the Radon transform),
//! the filters in [`filters`] sharpen the projections, and [`BackProjector`]
//! smears them back into an image. [`pipeline::ReconstructionPipeline`] runs
//! all three stages from a [`ReconstructionConfig`].
//!
//! ```no_run
//! use radon_tomography::{FilterKind, Image, ReconstructionConfig, ReconstructionPipeline};
//!
//! let mut phantom = Image::zeros(64, 64);
//! phantom.set(20, 40, 1.0)?;
//! let config = ReconstructionConfig { n_angles: 90, filter: FilterKind::RamLak };
//! let result = ReconstructionPipeline::new(config)?.run(&phantom)?;
//! println!("{:?}", result.timings);
//! # Ok::<(), radon_tomography::TomographyError>(())
//! ```

pub mod backprojection;
pub mod config;
pub mod control;
pub mod data_container;
pub mod error;
pub mod fft;
pub mod filters;
pub mod geometry;
pub mod interpolation;
pub mod pipeline;
pub mod radon;

pub use backprojection::BackProjector;
pub use config::{ConfigCommand, FilterKind, ReconstructionConfig};
pub use control::ComputeControl;
pub use data_container::{Image, Sinogram};
pub use error::TomographyError;
pub use filters::cosine::CosineFilter;
pub use filters::filter::{FilterConfig, FilterDomain, SinogramFilter, FILTER_REGISTRY};
pub use filters::generator::{generate_cosine, generate_ram_lak};
pub use filters::laplacian::LaplacianFilter;
pub use filters::ram_lak::RamLakFilter;
pub use filters::spectral::SpectralFilterBank;
pub use pipeline::{Reconstruction, ReconstructionPipeline};
pub use radon::ForwardProjector;
