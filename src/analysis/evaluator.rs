use crate::geom::{Point3, Surface, UvPoint};

use super::error::EvaluationError;

/// Geometry capability used to decide whether a calculation location lies
/// on its surface.
///
/// Every [`Surface`] gets an implementation that rejects non-finite inputs
/// and outputs. Other geometry engines can implement it directly.
pub trait SurfaceEvaluator {
    /// Point on the surface at `location`.
    fn point_at_parameter(&self, location: UvPoint) -> Result<Point3, EvaluationError>;

    /// Distance from `point` to the surface. Values near zero must keep a
    /// stable sign so the open tolerance interval can be applied.
    fn distance_to_surface(&self, point: Point3) -> Result<f64, EvaluationError>;
}

impl<S: Surface + ?Sized> SurfaceEvaluator for S {
    fn point_at_parameter(&self, location: UvPoint) -> Result<Point3, EvaluationError> {
        let UvPoint { u, v } = location;
        if !location.is_finite() {
            return Err(EvaluationError::NonFiniteParameter { u, v });
        }

        let point = self.point_at(u, v);
        if point.is_finite() {
            Ok(point)
        } else {
            Err(EvaluationError::NonFinitePoint { u, v })
        }
    }

    fn distance_to_surface(&self, point: Point3) -> Result<f64, EvaluationError> {
        let distance = self.distance_to(point);
        if distance.is_finite() {
            Ok(distance)
        } else {
            Err(EvaluationError::NonFiniteDistance)
        }
    }
}
