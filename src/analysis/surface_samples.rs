use crate::geom::UvPoint;

use super::cull::{CullDiagnostics, cull_calculation_locations_with_diagnostics};
use super::data::{
    AnalysisOptions, Results, SampleSet, SeriesLengthCheck, SurfaceSamples, check_series_lengths,
};
use super::error::AnalysisResult;
use super::evaluator::SurfaceEvaluator;

/// Parametric calculation locations on a surface with scalar result series.
///
/// Locations that do not lie on the surface are culled during construction
/// and cannot be changed afterwards. `S` is the surface handle: a reference,
/// a box or an owned surface.
#[derive(Debug, Clone)]
pub struct SurfaceSampleSet<S> {
    surface: S,
    locations: Vec<UvPoint>,
    results: Results<f64>,
}

impl<S: SurfaceEvaluator> SurfaceSampleSet<S> {
    /// Cull `locations` against `surface` and start with no results.
    ///
    /// # Errors
    /// Fails when the surface cannot be evaluated at one of the locations.
    pub fn new(surface: S, locations: impl IntoIterator<Item = UvPoint>) -> AnalysisResult<Self> {
        Self::with_results(surface, locations, Results::new())
    }

    /// Cull `locations` and adopt `results` as-is, whatever the series lengths.
    ///
    /// # Errors
    /// Fails when the surface cannot be evaluated at one of the locations.
    pub fn with_results(
        surface: S,
        locations: impl IntoIterator<Item = UvPoint>,
        results: Results<f64>,
    ) -> AnalysisResult<Self> {
        Self::with_options(surface, locations, results, &AnalysisOptions::default())
    }

    /// # Errors
    /// Fails on an invalid tolerance, an evaluation fault, or a series
    /// length mismatch under [`SeriesLengthCheck::Strict`].
    pub fn with_options(
        surface: S,
        locations: impl IntoIterator<Item = UvPoint>,
        results: Results<f64>,
        options: &AnalysisOptions,
    ) -> AnalysisResult<Self> {
        Self::new_with_diagnostics(surface, locations, results, options).map(|(set, _)| set)
    }

    /// Like [`Self::with_options`], also returning culling statistics.
    ///
    /// # Errors
    /// See [`Self::with_options`].
    pub fn new_with_diagnostics(
        surface: S,
        locations: impl IntoIterator<Item = UvPoint>,
        results: Results<f64>,
        options: &AnalysisOptions,
    ) -> AnalysisResult<(Self, CullDiagnostics)> {
        let (locations, diagnostics) =
            cull_calculation_locations_with_diagnostics(&surface, locations, options.tolerance)?;

        match options.length_check {
            SeriesLengthCheck::Strict => check_series_lengths(&results, locations.len())?,
            SeriesLengthCheck::Unchecked => {
                if let Err(err) = check_series_lengths(&results, locations.len()) {
                    log::debug!("adopting misaligned results: {err}");
                }
            }
        }

        let set = Self {
            surface,
            locations,
            results,
        };
        Ok((set, diagnostics))
    }
}

impl<S> SurfaceSampleSet<S> {
    /// Split into surface handle, culled locations and results.
    #[must_use]
    pub fn into_parts(self) -> (S, Vec<UvPoint>, Results<f64>) {
        (self.surface, self.locations, self.results)
    }
}

impl<S> SampleSet for SurfaceSampleSet<S> {
    type Location = UvPoint;
    type Value = f64;

    fn calculation_locations(&self) -> &[UvPoint] {
        &self.locations
    }

    fn results(&self) -> &Results<f64> {
        &self.results
    }

    fn results_mut(&mut self) -> &mut Results<f64> {
        &mut self.results
    }
}

impl<S> SurfaceSamples for SurfaceSampleSet<S> {
    type Surface = S;

    fn surface(&self) -> &S {
        &self.surface
    }
}
