//! Second-difference (Laplacian) filter along the detector axis.
//!
//! Interior bins use the symmetric stencil `[1, -2, 1]`; the first and last bin use
//! the one-sided `[-2, 2]` pair toward their only neighbour.

use crate::control::ComputeControl;
use crate::data_container::Sinogram;
use crate::error::TomographyError;
use crate::filters::filter::{FilterConfig, FilterDomain, SinogramFilter};
use cancellable_loops::for_each_cancellable;
use filter_macros::register_filter;
use ndarray::{ArrayView1, ArrayViewMut1, Axis};

#[register_filter]
#[derive(Clone, Debug)]
pub struct LaplacianFilter;

fn second_difference(input: &ArrayView1<f64>, output: &mut ArrayViewMut1<f64>) {
    let n = input.len();
    output[0] = -2.0 * input[0] + 2.0 * input[1];
    for j in 1..n - 1 {
        output[j] = input[j - 1] - 2.0 * input[j] + input[j + 1];
    }
    output[n - 1] = -2.0 * input[n - 1] + 2.0 * input[n - 2];
}

impl SinogramFilter for LaplacianFilter {
    fn new() -> Self
    where
        Self: Sized,
    {
        LaplacianFilter
    }

    fn config(&self) -> FilterConfig {
        FilterConfig {
            name: "Laplacian".to_string(),
            description: "Three-tap second difference along each projection.".to_string(),
            domain: FilterDomain::Spatial,
        }
    }

    /// # Errors
    /// `InvalidDimension` for sinograms with fewer than two detector bins.
    fn filter(
        &self,
        sinogram: &Sinogram,
        control: &ComputeControl,
    ) -> Result<Sinogram, TomographyError> {
        let n_bins = sinogram.n_bins();
        let n_angles = sinogram.n_angles();
        if n_bins < 2 {
            return Err(TomographyError::InvalidDimension(format!(
                "laplacian needs at least 2 detector bins, got {}",
                n_bins
            )));
        }

        let mut output = Sinogram::zeros(n_bins, n_angles);
        let progress = control.start();
        let completed = for_each_cancellable(
            output
                .view_mut()
                .axis_iter_mut(Axis(1))
                .zip(sinogram.columns()),
            &control.abort_flag,
            |(mut out_column, in_column)| {
                second_difference(&in_column, &mut out_column);
                progress.step(n_angles);
            },
        );
        control.finish(completed, "laplacian filter")?;
        Ok(output)
    }
}
