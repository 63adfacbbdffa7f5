use crate::geom::{Point3, Vec3};

use super::data::{Results, SampleSet};

/// Points in space with named result series of `T`.
///
/// Points are stored exactly as given: no filtering, no validation.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSampleSet<T> {
    locations: Vec<Point3>,
    results: Results<T>,
}

/// Points with vector-valued results.
pub type VectorSampleSet = PointSampleSet<Vec3>;

/// Points with scalar results.
pub type ScalarSampleSet = PointSampleSet<f64>;

impl<T> PointSampleSet<T> {
    #[must_use]
    pub fn new(points: impl Into<Vec<Point3>>) -> Self {
        Self::with_results(points, Results::new())
    }

    #[must_use]
    pub fn with_results(points: impl Into<Vec<Point3>>, results: Results<T>) -> Self {
        Self {
            locations: points.into(),
            results,
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<Point3>, Results<T>) {
        (self.locations, self.results)
    }
}

impl<T> SampleSet for PointSampleSet<T> {
    type Location = Point3;
    type Value = T;

    fn calculation_locations(&self) -> &[Point3] {
        &self.locations
    }

    fn results(&self) -> &Results<T> {
        &self.results
    }

    fn results_mut(&mut self) -> &mut Results<T> {
        &mut self.results
    }
}

impl<T> FromIterator<Point3> for PointSampleSet<T> {
    fn from_iter<I: IntoIterator<Item = Point3>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}
