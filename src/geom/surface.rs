use super::core::{Point3, Tolerance, Vec3};
use super::trim::{TrimRegion, UvDomain, UvPoint};

const DEFAULT_BOUNDARY_SAMPLES: usize = 16;
const MAX_BOUNDARY_SAMPLES: usize = 1024;

fn wrap_param(value: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if !span.is_finite() || span == 0.0 {
        return start;
    }
    let mut t = (value - start) % span;
    if t < 0.0 {
        t += span;
    }
    start + t
}

fn orthogonal_unit_vector(reference: Vec3) -> Vec3 {
    let candidate = if reference.x.abs() < reference.y.abs() {
        Vec3::new(0.0, -reference.z, reference.y)
    } else {
        Vec3::new(-reference.z, 0.0, reference.x)
    };

    candidate.normalized().unwrap_or(Vec3::X)
}

/// Angle of `(x, y)` mapped onto a closed [0, 1) parameter.
fn angle_param(x: f64, y: f64) -> f64 {
    if x == 0.0 && y == 0.0 {
        return 0.0;
    }
    wrap_param(y.atan2(x) / std::f64::consts::TAU, 0.0, 1.0)
}

/// A parametric surface that can also measure distances to itself.
///
/// `distance_to` is signed (positive on the normal side) when the closest
/// point lies inside the surface, and the unsigned distance to the nearest
/// boundary otherwise.
pub trait Surface {
    fn point_at(&self, u: f64, v: f64) -> Point3;

    /// Parameter of the surface point nearest to `point`.
    fn closest_parameter(&self, point: Point3) -> UvPoint;

    fn distance_to(&self, point: Point3) -> f64;

    #[must_use]
    fn domain_u(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    #[must_use]
    fn domain_v(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    #[must_use]
    fn is_u_closed(&self) -> bool {
        false
    }

    #[must_use]
    fn is_v_closed(&self) -> bool {
        false
    }

    #[must_use]
    fn domain(&self) -> UvDomain {
        let (u0, u1) = self.domain_u();
        let (v0, v1) = self.domain_v();
        UvDomain::new(u0, u1, v0, v1)
    }
}

impl<S: Surface + ?Sized> Surface for &S {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        (**self).point_at(u, v)
    }

    fn closest_parameter(&self, point: Point3) -> UvPoint {
        (**self).closest_parameter(point)
    }

    fn distance_to(&self, point: Point3) -> f64 {
        (**self).distance_to(point)
    }

    fn domain_u(&self) -> (f64, f64) {
        (**self).domain_u()
    }

    fn domain_v(&self) -> (f64, f64) {
        (**self).domain_v()
    }

    fn is_u_closed(&self) -> bool {
        (**self).is_u_closed()
    }

    fn is_v_closed(&self) -> bool {
        (**self).is_v_closed()
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        (**self).point_at(u, v)
    }

    fn closest_parameter(&self, point: Point3) -> UvPoint {
        (**self).closest_parameter(point)
    }

    fn distance_to(&self, point: Point3) -> f64 {
        (**self).distance_to(point)
    }

    fn domain_u(&self) -> (f64, f64) {
        (**self).domain_u()
    }

    fn domain_v(&self) -> (f64, f64) {
        (**self).domain_v()
    }

    fn is_u_closed(&self) -> bool {
        (**self).is_u_closed()
    }

    fn is_v_closed(&self) -> bool {
        (**self).is_v_closed()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plane
// ─────────────────────────────────────────────────────────────────────────────

/// Parallelogram patch `origin + u * u_axis + v * v_axis`, u and v in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSurface {
    pub origin: Point3,
    pub u_axis: Vec3,
    pub v_axis: Vec3,
}

impl PlaneSurface {
    /// Axes may have any length but must span a plane.
    pub fn new(origin: Point3, u_axis: Vec3, v_axis: Vec3) -> Result<Self, String> {
        if !origin.is_finite() || !u_axis.is_finite() || !v_axis.is_finite() {
            return Err("plane origin and axes must be finite".to_string());
        }

        let span = u_axis.cross(v_axis).length();
        if span <= Tolerance::ZERO_LENGTH.eps * u_axis.length() * v_axis.length() {
            return Err("plane axes must be non-zero and not parallel".to_string());
        }

        Ok(Self {
            origin,
            u_axis,
            v_axis,
        })
    }

    /// Unconstrained projection onto the infinite plane.
    fn project(&self, point: Point3) -> Option<UvPoint> {
        let d = point.sub_point(self.origin);
        let uu = self.u_axis.dot(self.u_axis);
        let uv = self.u_axis.dot(self.v_axis);
        let vv = self.v_axis.dot(self.v_axis);
        // det = uu * vv * sin^2(angle), so the threshold scales with the axes.
        let det = uu * vv - uv * uv;
        if !det.is_finite() || det.abs() <= Tolerance::ZERO_LENGTH.eps * uu * vv {
            return None;
        }
        let du = d.dot(self.u_axis);
        let dv = d.dot(self.v_axis);
        Some(UvPoint::new((du * vv - dv * uv) / det, (dv * uu - du * uv) / det))
    }

    fn closest_on_boundary(&self, point: Point3) -> UvPoint {
        let corners = [
            UvPoint::new(0.0, 0.0),
            UvPoint::new(1.0, 0.0),
            UvPoint::new(1.0, 1.0),
            UvPoint::new(0.0, 1.0),
        ];

        let mut best = corners[0];
        let mut best_dist = f64::INFINITY;
        for i in 0..corners.len() {
            let (a, b) = (corners[i], corners[(i + 1) % corners.len()]);
            let pa = self.point_at(a.u, a.v);
            let edge = self.point_at(b.u, b.v).sub_point(pa);
            let len2 = edge.length_squared();
            let t = if len2 > Tolerance::ZERO_LENGTH.eps_squared() {
                (point.sub_point(pa).dot(edge) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let uv = UvPoint::new(a.u + (b.u - a.u) * t, a.v + (b.v - a.v) * t);
            let dist = point.distance_to(self.point_at(uv.u, uv.v));
            if dist < best_dist {
                best_dist = dist;
                best = uv;
            }
        }
        best
    }
}

impl Surface for PlaneSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.origin
            .add_vec(self.u_axis.mul_scalar(u))
            .add_vec(self.v_axis.mul_scalar(v))
    }

    fn closest_parameter(&self, point: Point3) -> UvPoint {
        match self.project(point) {
            Some(uv) if self.domain().contains(uv, Tolerance::ZERO_LENGTH) => self.domain().clamp(uv),
            _ => self.closest_on_boundary(point),
        }
    }

    fn distance_to(&self, point: Point3) -> f64 {
        let normal = self.u_axis.cross(self.v_axis).normalized();
        match (self.project(point), normal) {
            (Some(uv), Some(normal)) if self.domain().contains(uv, Tolerance::ZERO_LENGTH) => {
                point.sub_point(self.origin).dot(normal)
            }
            _ => {
                let uv = self.closest_on_boundary(point);
                point.distance_to(self.point_at(uv.u, uv.v))
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cylinder
// ─────────────────────────────────────────────────────────────────────────────

/// Cylinder around `axis` starting at `base`; u runs around, v along the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderSurface {
    pub base: Point3,
    pub axis: Vec3,
    pub axis_dir: Vec3,
    pub x_axis: Vec3,
    pub y_axis: Vec3,
    pub radius: f64,
}

impl CylinderSurface {
    pub fn new(base: Point3, axis: Vec3, radius: f64) -> Result<Self, String> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err("cylinder radius must be finite and > 0".to_string());
        }

        let axis_dir = axis
            .normalized()
            .ok_or_else(|| "cylinder axis must be non-zero".to_string())?;
        let x_axis = orthogonal_unit_vector(axis_dir);
        let y_axis = axis_dir.cross(x_axis).normalized().unwrap_or(Vec3::Y);

        Ok(Self {
            base,
            axis,
            axis_dir,
            x_axis,
            y_axis,
            radius,
        })
    }

    /// Axial parameter (unclamped) and radial offset from the axis.
    fn decompose(&self, point: Point3) -> (f64, Vec3) {
        let d = point.sub_point(self.base);
        let height = d.dot(self.axis_dir);
        let radial = d.sub(self.axis_dir.mul_scalar(height));
        (height / self.axis.length(), radial)
    }
}

impl Surface for CylinderSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        let angle = std::f64::consts::TAU * wrap_param(u, 0.0, 1.0);
        let radial = self
            .x_axis
            .mul_scalar(angle.cos())
            .add(self.y_axis.mul_scalar(angle.sin()))
            .mul_scalar(self.radius);

        self.base.add_vec(self.axis.mul_scalar(v)).add_vec(radial)
    }

    fn closest_parameter(&self, point: Point3) -> UvPoint {
        let (v, radial) = self.decompose(point);
        let u = angle_param(radial.dot(self.x_axis), radial.dot(self.y_axis));
        UvPoint::new(u, v.clamp(0.0, 1.0))
    }

    fn distance_to(&self, point: Point3) -> f64 {
        let (v, radial) = self.decompose(point);
        if (0.0..=1.0).contains(&v) {
            radial.length() - self.radius
        } else {
            let uv = self.closest_parameter(point);
            point.distance_to(self.point_at(uv.u, uv.v))
        }
    }

    fn is_u_closed(&self) -> bool {
        true
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sphere
// ─────────────────────────────────────────────────────────────────────────────

/// Sphere with u as longitude and v as latitude from the south pole.
///
/// u wraps around like the cylinder's. v is clamped to [0, 1], so a
/// parameter beyond either pole evaluates to that pole and lies on the
/// sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereSurface {
    pub center: Point3,
    pub x_axis: Vec3,
    pub y_axis: Vec3,
    pub z_axis: Vec3,
    pub radius: f64,
}

impl SphereSurface {
    pub fn new(center: Point3, radius: f64) -> Result<Self, String> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err("sphere radius must be finite and > 0".to_string());
        }

        Ok(Self {
            center,
            x_axis: Vec3::X,
            y_axis: Vec3::Y,
            z_axis: Vec3::Z,
            radius,
        })
    }
}

impl Surface for SphereSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        let theta = std::f64::consts::TAU * wrap_param(u, 0.0, 1.0);
        let phi = std::f64::consts::PI * (v.clamp(0.0, 1.0) - 0.5);
        let cos_phi = phi.cos();

        self.center.add_vec(
            self.x_axis
                .mul_scalar(cos_phi * theta.cos())
                .add(self.y_axis.mul_scalar(cos_phi * theta.sin()))
                .add(self.z_axis.mul_scalar(phi.sin()))
                .mul_scalar(self.radius),
        )
    }

    fn closest_parameter(&self, point: Point3) -> UvPoint {
        let d = point.sub_point(self.center);
        let (x, y, z) = (d.dot(self.x_axis), d.dot(self.y_axis), d.dot(self.z_axis));
        let phi = z.atan2(x.hypot(y));
        UvPoint::new(angle_param(x, y), phi / std::f64::consts::PI + 0.5)
    }

    fn distance_to(&self, point: Point3) -> f64 {
        point.distance_to(self.center) - self.radius
    }

    fn is_u_closed(&self) -> bool {
        true
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Trimmed
// ─────────────────────────────────────────────────────────────────────────────

/// A base surface restricted to a [`TrimRegion`] of its parameter domain.
///
/// Points whose closest base parameter falls outside the region measure
/// their distance to the trim boundary, which is evaluated on the base
/// surface and sampled into polylines at construction.
#[derive(Debug, Clone)]
pub struct TrimmedSurface<S> {
    base: S,
    region: TrimRegion,
    boundary: Vec<Vec<(UvPoint, Point3)>>,
}

impl<S: Surface> TrimmedSurface<S> {
    #[must_use]
    pub fn new(base: S, region: TrimRegion) -> Self {
        Self::with_boundary_samples(base, region, DEFAULT_BOUNDARY_SAMPLES)
    }

    /// `samples` is the number of segments each trim edge is split into,
    /// clamped to `1..=1024`.
    #[must_use]
    pub fn with_boundary_samples(base: S, region: TrimRegion, samples: usize) -> Self {
        let samples = samples.clamp(1, MAX_BOUNDARY_SAMPLES);
        let boundary = region
            .loops()
            .map(|loop_| {
                let mut polyline = Vec::with_capacity(loop_.len().saturating_mul(samples).saturating_add(1));
                for (a, b) in loop_.edges() {
                    for step in 0..samples {
                        let t = step as f64 / samples as f64;
                        let uv = UvPoint::new(a.u + (b.u - a.u) * t, a.v + (b.v - a.v) * t);
                        polyline.push((uv, base.point_at(uv.u, uv.v)));
                    }
                }
                if let Some(first) = polyline.first().copied() {
                    polyline.push(first);
                }
                polyline
            })
            .collect();

        Self {
            base,
            region,
            boundary,
        }
    }

    #[must_use]
    pub fn base(&self) -> &S {
        &self.base
    }

    #[must_use]
    pub fn region(&self) -> &TrimRegion {
        &self.region
    }

    fn inside(&self, uv: UvPoint) -> bool {
        self.region.contains(uv, Tolerance::DEFAULT)
    }

    /// Nearest boundary sample and the distance to the boundary polyline.
    fn nearest_boundary(&self, point: Point3) -> (UvPoint, f64) {
        let mut best_uv = UvPoint::new(0.0, 0.0);
        let mut best_sample = f64::INFINITY;
        let mut best_dist = f64::INFINITY;

        for polyline in &self.boundary {
            for pair in polyline.windows(2) {
                let ((uv, a), (_, b)) = (pair[0], pair[1]);
                best_dist = best_dist.min(point.distance_to_segment(a, b));
                let sample = point.distance_to(a);
                if sample < best_sample {
                    best_sample = sample;
                    best_uv = uv;
                }
            }
        }

        (best_uv, best_dist)
    }
}

impl<S: Surface> Surface for TrimmedSurface<S> {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.base.point_at(u, v)
    }

    fn closest_parameter(&self, point: Point3) -> UvPoint {
        let uv = self.base.closest_parameter(point);
        if self.inside(uv) {
            uv
        } else {
            self.nearest_boundary(point).0
        }
    }

    fn distance_to(&self, point: Point3) -> f64 {
        let uv = self.base.closest_parameter(point);
        if self.inside(uv) {
            self.base.distance_to(point)
        } else {
            self.nearest_boundary(point).1
        }
    }

    fn domain_u(&self) -> (f64, f64) {
        self.base.domain_u()
    }

    fn domain_v(&self) -> (f64, f64) {
        self.base.domain_v()
    }

    fn is_u_closed(&self) -> bool {
        self.base.is_u_closed()
    }

    fn is_v_closed(&self) -> bool {
        self.base.is_v_closed()
    }
}
