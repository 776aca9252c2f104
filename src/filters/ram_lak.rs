//! Ram-Lak (ramp) filter, the ideal |frequency| weighting that undoes the 1/r blur
//! of plain backprojection.

use crate::control::ComputeControl;
use crate::data_container::Sinogram;
use crate::error::TomographyError;
use crate::filters::filter::{FilterConfig, FilterDomain, SinogramFilter};
use crate::filters::generator::generate_ram_lak;
use crate::filters::spectral::SpectralFilterBank;
use filter_macros::register_filter;

#[register_filter]
#[derive(Clone, Debug)]
pub struct RamLakFilter;

impl SinogramFilter for RamLakFilter {
    fn new() -> Self
    where
        Self: Sized,
    {
        RamLakFilter
    }

    fn config(&self) -> FilterConfig {
        FilterConfig {
            name: "Ram-Lak".to_string(),
            description: "Unwindowed ramp filter applied in the frequency domain.".to_string(),
            domain: FilterDomain::Frequency,
        }
    }

    fn filter(
        &self,
        sinogram: &Sinogram,
        control: &ComputeControl,
    ) -> Result<Sinogram, TomographyError> {
        let n_bins = sinogram.n_bins();
        SpectralFilterBank::new(n_bins).apply_filter_with(
            sinogram,
            &generate_ram_lak(n_bins),
            control,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::Array2;

    #[test]
    fn test_ram_lak_removes_column_offsets() {
        let sinogram = Sinogram::from_array(Array2::from_shape_fn((16, 4), |(_, k)| k as f64));
        let output = RamLakFilter::new()
            .filter(&sinogram, &ComputeControl::new())
            .unwrap();
        assert_eq!(output.n_bins(), 16);
        assert_eq!(output.n_angles(), 4);
        for value in output.view().iter() {
            assert_abs_diff_eq!(*value, 0.0, epsilon = 1e-12);
        }
    }
}
