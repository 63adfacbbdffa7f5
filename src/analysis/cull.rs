//! On-surface filtering of parametric calculation locations.
//!
//! A location (u, v) is kept when the point evaluated at (u, v) lies on the
//! surface, i.e. its distance to the surface falls strictly inside
//! `(-tol, tol)`. Input order is preserved and nothing is deduplicated.

use crate::geom::{Tolerance, UvPoint};

use super::error::{AnalysisError, AnalysisResult};
use super::evaluator::SurfaceEvaluator;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Statistics from one culling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CullDiagnostics {
    pub input_count: usize,
    pub retained_count: usize,
    pub culled_count: usize,
    /// Largest absolute distance among retained locations.
    pub max_retained_deviation: f64,
}

impl CullDiagnostics {
    #[must_use]
    pub fn had_culls(&self) -> bool {
        self.culled_count > 0
    }

    fn record(&mut self, deviation: f64, retained: bool) {
        self.input_count += 1;
        if retained {
            self.retained_count += 1;
            self.max_retained_deviation = self.max_retained_deviation.max(deviation.abs());
        } else {
            self.culled_count += 1;
        }
    }
}

/// Keep the locations whose evaluated point lies on `surface` within `tol`.
///
/// # Errors
/// Returns [`AnalysisError::InvalidTolerance`] for a non-positive or
/// non-finite tolerance, and [`AnalysisError::Evaluation`] for the first
/// location the evaluator fails on. Nothing is returned for a failed pass.
pub fn cull_calculation_locations<E, I>(
    surface: &E,
    locations: I,
    tol: Tolerance,
) -> AnalysisResult<Vec<UvPoint>>
where
    E: SurfaceEvaluator + ?Sized,
    I: IntoIterator<Item = UvPoint>,
{
    cull_calculation_locations_with_diagnostics(surface, locations, tol).map(|(kept, _)| kept)
}

/// Same as [`cull_calculation_locations`], also returning pass statistics.
///
/// # Errors
/// See [`cull_calculation_locations`].
pub fn cull_calculation_locations_with_diagnostics<E, I>(
    surface: &E,
    locations: I,
    tol: Tolerance,
) -> AnalysisResult<(Vec<UvPoint>, CullDiagnostics)>
where
    E: SurfaceEvaluator + ?Sized,
    I: IntoIterator<Item = UvPoint>,
{
    validate_tolerance(tol)?;

    let locations = locations.into_iter();
    let mut kept = Vec::with_capacity(locations.size_hint().0);
    let mut diagnostics = CullDiagnostics::default();

    for (index, location) in locations.enumerate() {
        let deviation = deviation_at(surface, index, location)?;
        let on_surface = tol.within_open(deviation);
        diagnostics.record(deviation, on_surface);
        if on_surface {
            kept.push(location);
        }
    }

    log_pass(&diagnostics);
    Ok((kept, diagnostics))
}

/// Parallel variant of [`cull_calculation_locations`] on the rayon pool.
///
/// Output order matches input order. If several locations fail, the error
/// for the lowest index is returned.
///
/// # Errors
/// See [`cull_calculation_locations`].
#[cfg(feature = "parallel")]
pub fn cull_calculation_locations_parallel<E>(
    surface: &E,
    locations: &[UvPoint],
    tol: Tolerance,
) -> AnalysisResult<Vec<UvPoint>>
where
    E: SurfaceEvaluator + Sync + ?Sized,
{
    validate_tolerance(tol)?;

    let deviations: Vec<AnalysisResult<f64>> = locations
        .par_iter()
        .enumerate()
        .map(|(index, &location)| deviation_at(surface, index, location))
        .collect();

    let mut kept = Vec::with_capacity(locations.len());
    let mut diagnostics = CullDiagnostics::default();
    for (location, deviation) in locations.iter().zip(deviations) {
        let deviation = deviation?;
        let on_surface = tol.within_open(deviation);
        diagnostics.record(deviation, on_surface);
        if on_surface {
            kept.push(*location);
        }
    }

    log_pass(&diagnostics);
    Ok(kept)
}

fn validate_tolerance(tol: Tolerance) -> AnalysisResult<()> {
    if tol.is_valid() {
        Ok(())
    } else {
        Err(AnalysisError::InvalidTolerance(tol.eps))
    }
}

fn deviation_at<E>(surface: &E, index: usize, location: UvPoint) -> AnalysisResult<f64>
where
    E: SurfaceEvaluator + ?Sized,
{
    let wrap = |source| AnalysisError::Evaluation {
        index,
        location,
        source,
    };
    let point = surface.point_at_parameter(location).map_err(wrap)?;
    surface.distance_to_surface(point).map_err(wrap)
}

fn log_pass(diagnostics: &CullDiagnostics) {
    log::debug!(
        "culled {} of {} calculation locations (max retained deviation {:e})",
        diagnostics.culled_count,
        diagnostics.input_count,
        diagnostics.max_retained_deviation
    );
}
