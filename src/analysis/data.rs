use std::collections::BTreeMap;

use crate::geom::Tolerance;

use super::error::{AnalysisError, AnalysisResult};

/// Named result series. Each series is expected to hold one value per
/// calculation location, which is only checked on request.
pub type Results<T> = BTreeMap<String, Vec<T>>;

/// Whether adopted result series must match the calculation location count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeriesLengthCheck {
    /// Accept series of any length.
    #[default]
    Unchecked,
    /// Reject construction when a series length differs.
    Strict,
}

/// Construction options for [`super::SurfaceSampleSet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOptions {
    /// Open interval applied to the distance between an evaluated location
    /// and its surface.
    pub tolerance: Tolerance,
    pub length_check: SeriesLengthCheck,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::ON_SURFACE,
            length_check: SeriesLengthCheck::Unchecked,
        }
    }
}

/// Calculation locations paired with named result series.
pub trait SampleSet {
    type Location;
    type Value;

    fn calculation_locations(&self) -> &[Self::Location];

    fn results(&self) -> &Results<Self::Value>;

    fn results_mut(&mut self) -> &mut Results<Self::Value>;

    #[must_use]
    fn result(&self, name: &str) -> Option<&[Self::Value]> {
        self.results().get(name).map(Vec::as_slice)
    }

    /// Add or replace a series, returning the replaced one.
    fn insert_result(
        &mut self,
        name: impl Into<String>,
        values: Vec<Self::Value>,
    ) -> Option<Vec<Self::Value>> {
        self.results_mut().insert(name.into(), values)
    }

    fn remove_result(&mut self, name: &str) -> Option<Vec<Self::Value>> {
        self.results_mut().remove(name)
    }

    fn result_names(&self) -> Vec<&str> {
        self.results().keys().map(String::as_str).collect()
    }

    /// Check that every series has one value per calculation location.
    ///
    /// # Errors
    /// Returns [`AnalysisError::SeriesLengthMismatch`] for the first
    /// offending series in name order.
    fn validate_result_lengths(&self) -> AnalysisResult<()> {
        check_series_lengths(self.results(), self.calculation_locations().len())
    }
}

/// A [`SampleSet`] whose locations are parameters on a surface.
pub trait SurfaceSamples: SampleSet {
    type Surface: ?Sized;

    fn surface(&self) -> &Self::Surface;
}

pub(crate) fn check_series_lengths<T>(results: &Results<T>, expected: usize) -> AnalysisResult<()> {
    match results.iter().find(|(_, values)| values.len() != expected) {
        Some((name, values)) => Err(AnalysisError::SeriesLengthMismatch {
            name: name.clone(),
            expected,
            actual: values.len(),
        }),
        None => Ok(()),
    }
}
