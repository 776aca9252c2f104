//! Raised-cosine filter: a ramp rolled off toward the Nyquist frequency, trading
//! some resolution for less high-frequency noise than Ram-Lak.

use crate::control::ComputeControl;
use crate::data_container::Sinogram;
use crate::error::TomographyError;
use crate::filters::filter::{FilterConfig, FilterDomain, SinogramFilter};
use crate::filters::generator::generate_cosine;
use crate::filters::spectral::SpectralFilterBank;
use filter_macros::register_filter;

#[register_filter]
#[derive(Clone, Debug)]
pub struct CosineFilter;

impl SinogramFilter for CosineFilter {
    fn new() -> Self
    where
        Self: Sized,
    {
        CosineFilter
    }

    fn config(&self) -> FilterConfig {
        FilterConfig {
            name: "Cosine".to_string(),
            description: "Ramp filter apodized by a cosine, applied in the frequency domain."
                .to_string(),
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
            &generate_cosine(n_bins),
            control,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::ram_lak::RamLakFilter;
    use ndarray::Array2;

    #[test]
    fn test_cosine_is_smoother_than_ram_lak() {
        let sinogram = Sinogram::from_array(Array2::from_shape_fn((32, 2), |(m, _)| {
            if m % 2 == 0 {
                1.0
            } else {
                -1.0
            }
        }));
        let control = ComputeControl::new();
        let energy = |s: &Sinogram| s.view().iter().map(|v| v * v).sum::<f64>();

        let ram_lak = RamLakFilter::new().filter(&sinogram, &control).unwrap();
        let cosine = CosineFilter::new().filter(&sinogram, &control).unwrap();

        // an alternating column lives entirely in the Nyquist bin
        assert!(energy(&ram_lak) > 1.0);
        assert!(energy(&cosine) < 1e-20);
    }
}
