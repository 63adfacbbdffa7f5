//! Calculation locations paired with named analysis result series.
//!
//! - [`SurfaceSampleSet`]: (u, v) locations on a surface, culled to the ones
//!   that actually lie on it, with scalar results.
//! - [`VectorSampleSet`]: points in space with vector results.
//! - [`ScalarSampleSet`]: points in space with scalar results.

mod cull;
mod data;
mod error;
mod evaluator;
mod point_samples;
mod surface_samples;

#[cfg(feature = "parallel")]
pub use cull::cull_calculation_locations_parallel;
pub use cull::{CullDiagnostics, cull_calculation_locations, cull_calculation_locations_with_diagnostics};
pub use data::{AnalysisOptions, Results, SampleSet, SeriesLengthCheck, SurfaceSamples};
pub use error::{AnalysisError, AnalysisResult, EvaluationError};
pub use evaluator::SurfaceEvaluator;
pub use point_samples::{PointSampleSet, ScalarSampleSet, VectorSampleSet};
pub use surface_samples::SurfaceSampleSet;
