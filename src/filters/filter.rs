//! This module provides the `SinogramFilter` trait, the metadata every filter
//! reports, and a global, thread-safe registry of the available filters.

use crate::control::ComputeControl;
use crate::data_container::Sinogram;
use crate::error::TomographyError;
#[allow(unused_imports)] // this dependency is required by the `register_filter` macro
use ctor::ctor;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Mutex;

/// A filter applied to every projection of a sinogram before backprojection.
///
/// Implementors derive `Clone` and `Debug` and are announced with
/// `#[register_filter]` (from `filter_macros`), which inserts a default instance
/// into [`FILTER_REGISTRY`] at start-up. The module also needs to be listed in
/// `src/filters/mod.rs`.
///
/// **Example**:
/// ```ignore
/// use crate::filters::filter::{FilterConfig, FilterDomain, SinogramFilter};
///
/// #[register_filter]
/// #[derive(Clone, Debug)]
/// struct Identity;
///
/// impl SinogramFilter for Identity {
///     fn new() -> Self { Identity }
///
///     fn config(&self) -> FilterConfig {
///         FilterConfig {
///             name: "Identity".to_string(),
///             description: "Returns the sinogram unchanged.".to_string(),
///             domain: FilterDomain::Spatial,
///         }
///     }
///
///     fn filter(
///         &self,
///         sinogram: &Sinogram,
///         _control: &ComputeControl,
///     ) -> Result<Sinogram, TomographyError> {
///         Ok(sinogram.clone())
///     }
/// }
/// ```
pub trait SinogramFilter: Send + Sync + Debug + CloneBoxedFilter {
    /// Creates a new instance of the filter with default parameters.
    fn new() -> Self
    where
        Self: Sized;

    /// Returns the filter configuration, including name, description and domain.
    fn config(&self) -> FilterConfig;

    /// Filters every column of `sinogram` and returns a new sinogram of the same shape.
    ///
    /// Long-running filters check `control.abort_flag` between columns and return
    /// [`TomographyError::Aborted`] when it is raised.
    fn filter(
        &self,
        sinogram: &Sinogram,
        control: &ComputeControl,
    ) -> Result<Sinogram, TomographyError>;
}

/// Where a filter does its work along the detector axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDomain {
    /// Weights the spectrum of each projection.
    Frequency,
    /// Convolves each projection with a short stencil.
    Spatial,
}

/// Metadata of a filter.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// The name of the filter, used as registry key.
    pub name: String,
    pub description: String,
    pub domain: FilterDomain,
}

/// A trait to allow cloning of boxed filters.
/// This is necessary because `Box<dyn SinogramFilter>` cannot be cloned directly.
pub trait CloneBoxedFilter {
    fn clone_box(&self) -> Box<dyn SinogramFilter>;
}

impl<T> CloneBoxedFilter for T
where
    T: 'static + SinogramFilter + Clone,
{
    fn clone_box(&self) -> Box<dyn SinogramFilter> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn SinogramFilter> {
    fn clone(&self) -> Box<dyn SinogramFilter> {
        self.as_ref().clone_box()
    }
}

/// Registered filters, keyed by [`FilterConfig::name`].
#[derive(Debug, Default)]
pub struct FilterRegistry {
    pub filters: HashMap<String, Box<dyn SinogramFilter>>,
}

impl FilterRegistry {
    /// Inserts a default instance of `F` into the global [`FILTER_REGISTRY`].
    ///
    /// Registering a second filter under the same name replaces the first.
    pub fn register_filter<F: SinogramFilter + 'static>() {
        let filter_instance = F::new();
        let name = filter_instance.config().name;
        match FILTER_REGISTRY.lock() {
            Ok(mut registry) => {
                if registry
                    .filters
                    .insert(name.clone(), Box::new(filter_instance))
                    .is_some()
                {
                    log::warn!("filter \"{}\" registered twice, keeping the latest", name);
                }
            }
            Err(err) => log::error!("filter registry poisoned: {err:?}"),
        }
    }

    /// Retrieves a registered filter by its name.
    pub fn get_filter(&self, name: &str) -> Option<&dyn SinogramFilter> {
        self.filters.get(name).map(|filter| filter.as_ref())
    }

    /// Names of all registered filters, sorted for stable display.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.filters.keys().cloned().collect();
        names.sort();
        names
    }
}

impl<'a> IntoIterator for &'a FilterRegistry {
    type Item = &'a Box<dyn SinogramFilter>;
    type IntoIter = std::collections::hash_map::Values<'a, String, Box<dyn SinogramFilter>>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.values()
    }
}

/// A global, thread-safe filter registry.
///
/// **Usage Example**:
/// ```
/// use radon_tomography::filters::filter::FILTER_REGISTRY;
///
/// if let Ok(registry) = FILTER_REGISTRY.lock() {
///     for name in registry.names() {
///         println!("available filter: {name}");
///     }
/// }
/// ```
pub static FILTER_REGISTRY: Lazy<Mutex<FilterRegistry>> =
    Lazy::new(|| Mutex::new(FilterRegistry::default()));
