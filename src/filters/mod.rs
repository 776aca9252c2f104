//! Sinogram filters applied between projection and backprojection.
//!
//! # Filter Categories
//!
//! * **Frequency Domain Filters**: weight the spectrum of each projection
//!   (Ram-Lak, raised cosine) through a [`spectral::SpectralFilterBank`].
//!
//! * **Spatial Filters**: apply a short stencil along the detector axis (Laplacian).
//!
//! Each filter implements the `SinogramFilter` trait defined in the `filter`
//! module and registers itself in the global `FILTER_REGISTRY`.

/// Raised-cosine (apodized ramp) filter.
pub mod cosine;

/// Core filter interfaces and the filter registry.
pub mod filter;

/// Ram-Lak and raised-cosine weight vectors.
pub mod generator;

/// Three-tap second difference along the detector axis.
pub mod laplacian;

/// Unwindowed ramp filter.
pub mod ram_lak;

/// Applies a weight vector to every projection through a spectral transform.
pub mod spectral;
