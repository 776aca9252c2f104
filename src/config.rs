//! Reconstruction settings and the commands that change them.

use crate::error::TomographyError;
use crate::filters::cosine::CosineFilter;
use crate::filters::filter::SinogramFilter;
use crate::filters::laplacian::LaplacianFilter;
use crate::filters::ram_lak::RamLakFilter;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Filter applied to the sinogram before backprojection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    /// Plain (blurred) backprojection.
    None,
    RamLak,
    Cosine,
    Laplacian,
}

impl FilterKind {
    /// Instance of the selected filter, `None` for unfiltered backprojection.
    pub fn build(&self) -> Option<Box<dyn SinogramFilter>> {
        match self {
            FilterKind::None => None,
            FilterKind::RamLak => Some(Box::new(RamLakFilter::new())),
            FilterKind::Cosine => Some(Box::new(CosineFilter::new())),
            FilterKind::Laplacian => Some(Box::new(LaplacianFilter::new())),
        }
    }
}

impl Display for FilterKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterKind::None => write!(f, "None"),
            FilterKind::RamLak => write!(f, "Ram-Lak"),
            FilterKind::Cosine => write!(f, "Cosine"),
            FilterKind::Laplacian => write!(f, "Laplacian"),
        }
    }
}

/// Change requests applied through [`ReconstructionConfig::apply`].
pub enum ConfigCommand {
    SetAngles(usize),
    SetFilter(FilterKind),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionConfig {
    pub n_angles: usize,
    pub filter: FilterKind,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        ReconstructionConfig {
            n_angles: 180,
            filter: FilterKind::RamLak,
        }
    }
}

impl ReconstructionConfig {
    /// Applies `command`, leaving the configuration unchanged if it is rejected.
    ///
    /// # Errors
    /// `InvalidArgument` for a zero angle count.
    pub fn apply(&mut self, command: ConfigCommand) -> Result<(), TomographyError> {
        match command {
            ConfigCommand::SetAngles(n_angles) => {
                if n_angles == 0 {
                    return Err(TomographyError::InvalidArgument(
                        "number of angles must be at least 1".to_string(),
                    ));
                }
                self.n_angles = n_angles;
            }
            ConfigCommand::SetFilter(filter) => self.filter = filter,
        }
        Ok(())
    }
}
