//! Trim loops and regions in surface parameter space.
//!
//! A [`TrimRegion`] is one counter-clockwise outer [`TrimLoop`] with optional
//! clockwise holes. [`super::TrimmedSurface`] uses it to decide which
//! parametric calculation locations actually lie on a trimmed face.
//!
//! ```ignore
//! use analysis_data::geom::{Tolerance, TrimLoop, TrimRegion, UvPoint};
//!
//! let tol = Tolerance::new(1e-9);
//! let outer = TrimLoop::new(vec![
//!     UvPoint::new(0.0, 0.0),
//!     UvPoint::new(1.0, 0.0),
//!     UvPoint::new(1.0, 1.0),
//!     UvPoint::new(0.0, 1.0),
//! ], tol)?;
//!
//! let region = TrimRegion::from_loops(vec![outer], tol)?;
//! assert!(region.contains(UvPoint::new(0.5, 0.5), tol));
//! ```

use super::core::Tolerance;

/// Errors raised while building trim loops and regions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrimError {
    #[error("trim loop points must be finite")]
    NonFinitePoints,
    #[error("trim loop requires at least 3 points, got {count}")]
    InsufficientPoints { count: usize },
    #[error("trim loop self-intersects")]
    SelfIntersection,
    #[error("trim region requires at least one loop")]
    EmptyLoopSet,
    #[error("trim hole intersects outer loop")]
    HoleIntersectsOuter,
    #[error("trim hole is not inside outer loop")]
    HoleOutsideBoundary,
    #[error("trim holes intersect")]
    HolesIntersect,
    #[error("nested trim holes are not supported")]
    NestedHoles,
}

// ============================================================================
// UV Domain
// ============================================================================

/// A rectangular domain in UV parameter space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvDomain {
    pub u_min: f64,
    pub u_max: f64,
    pub v_min: f64,
    pub v_max: f64,
}

impl UvDomain {
    #[must_use]
    pub fn new(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Self {
            u_min,
            u_max,
            v_min,
            v_max,
        }
    }

    /// The unit domain [0, 1] x [0, 1].
    #[must_use]
    pub fn unit() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }

    #[must_use]
    pub fn contains(&self, point: UvPoint, tol: Tolerance) -> bool {
        point.u >= self.u_min - tol.eps
            && point.u <= self.u_max + tol.eps
            && point.v >= self.v_min - tol.eps
            && point.v <= self.v_max + tol.eps
    }

    /// Clamp a point into this domain.
    #[must_use]
    pub fn clamp(&self, point: UvPoint) -> UvPoint {
        UvPoint::new(
            point.u.clamp(self.u_min, self.u_max),
            point.v.clamp(self.v_min, self.v_max),
        )
    }
}

impl Default for UvDomain {
    fn default() -> Self {
        Self::unit()
    }
}

// ============================================================================
// UvPoint
// ============================================================================

/// A parametric coordinate (U, V) on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvPoint {
    pub u: f64,
    pub v: f64,
}

impl UvPoint {
    #[must_use]
    pub const fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.u.is_finite() && self.v.is_finite()
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 2] {
        [self.u, self.v]
    }
}

impl From<[f64; 2]> for UvPoint {
    fn from(arr: [f64; 2]) -> Self {
        Self::new(arr[0], arr[1])
    }
}

impl From<(f64, f64)> for UvPoint {
    fn from((u, v): (f64, f64)) -> Self {
        Self::new(u, v)
    }
}

fn approx_eq_uv(tol: Tolerance, a: UvPoint, b: UvPoint) -> bool {
    (a.u - b.u).abs() <= tol.eps && (a.v - b.v).abs() <= tol.eps
}

fn signed_area(points: &[UvPoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for (a, b) in closed_edges(points) {
        area += a.u * b.v - b.u * a.v;
    }
    0.5 * area
}

/// Edges of a closed polygon, including the closing edge.
fn closed_edges(points: &[UvPoint]) -> impl Iterator<Item = (UvPoint, UvPoint)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}

fn orient2d(a: UvPoint, b: UvPoint, c: UvPoint) -> f64 {
    (b.u - a.u) * (c.v - a.v) - (b.v - a.v) * (c.u - a.u)
}

fn point_on_segment(p: UvPoint, a: UvPoint, b: UvPoint, tol: Tolerance) -> bool {
    if orient2d(a, b, p).abs() > tol.eps {
        return false;
    }

    let dot = (p.u - a.u) * (b.u - a.u) + (p.v - a.v) * (b.v - a.v);
    let len2 = (b.u - a.u).powi(2) + (b.v - a.v).powi(2);
    dot >= -tol.eps && dot - len2 <= tol.eps
}

fn segments_intersect(a: UvPoint, b: UvPoint, c: UvPoint, d: UvPoint, tol: Tolerance) -> bool {
    let o1 = orient2d(a, b, c);
    let o2 = orient2d(a, b, d);
    let o3 = orient2d(c, d, a);
    let o4 = orient2d(c, d, b);

    if (o1.abs() <= tol.eps && point_on_segment(c, a, b, tol))
        || (o2.abs() <= tol.eps && point_on_segment(d, a, b, tol))
        || (o3.abs() <= tol.eps && point_on_segment(a, c, d, tol))
        || (o4.abs() <= tol.eps && point_on_segment(b, c, d, tol))
    {
        return true;
    }

    let straddles_ab = (o1 > tol.eps && o2 < -tol.eps) || (o1 < -tol.eps && o2 > tol.eps);
    let straddles_cd = (o3 > tol.eps && o4 < -tol.eps) || (o3 < -tol.eps && o4 > tol.eps);
    straddles_ab && straddles_cd
}

fn loop_self_intersects(points: &[UvPoint], tol: Tolerance) -> bool {
    let n = points.len();
    if n < 4 {
        return false;
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let j_next = (j + 1) % n;
            // Adjacent edges share a vertex.
            if j == (i + 1) % n || j_next == i {
                continue;
            }
            if segments_intersect(points[i], points[(i + 1) % n], points[j], points[j_next], tol) {
                return true;
            }
        }
    }

    false
}

fn loops_intersect(a: &[UvPoint], b: &[UvPoint], tol: Tolerance) -> bool {
    closed_edges(a).any(|(a0, a1)| {
        closed_edges(b).any(|(b0, b1)| segments_intersect(a0, a1, b0, b1, tol))
    })
}

/// Even-odd containment; points on an edge count as inside.
fn contains_point_polygon(p: UvPoint, points: &[UvPoint], tol: Tolerance) -> bool {
    if points.len() < 3 {
        return false;
    }

    if closed_edges(points).any(|(a, b)| point_on_segment(p, a, b, tol)) {
        return true;
    }

    let mut inside = false;
    for (a, b) in closed_edges(points) {
        if (a.v > p.v) == (b.v > p.v) {
            continue;
        }
        let t = (p.v - a.v) / (b.v - a.v);
        let x = a.u + t * (b.u - a.u);
        if p.u <= x + tol.eps {
            inside = !inside;
        }
    }

    inside
}

// ============================================================================
// TrimLoop
// ============================================================================

/// A closed loop of UV points.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimLoop {
    points: Vec<UvPoint>,
}

impl TrimLoop {
    /// Create a trim loop from points.
    ///
    /// A repeated closing point and consecutive duplicates are dropped. The
    /// cleaned loop needs at least 3 distinct finite points and must not
    /// self-intersect.
    ///
    /// # Errors
    /// Returns `TrimError` if validation fails.
    pub fn new(mut points: Vec<UvPoint>, tol: Tolerance) -> Result<Self, TrimError> {
        if points.iter().any(|p| !p.is_finite()) {
            return Err(TrimError::NonFinitePoints);
        }

        if points.len() > 2 {
            if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) {
                if approx_eq_uv(tol, first, last) {
                    points.pop();
                }
            }
        }

        let mut cleaned: Vec<UvPoint> = Vec::with_capacity(points.len());
        for p in points {
            if cleaned.last().is_some_and(|prev| approx_eq_uv(tol, *prev, p)) {
                continue;
            }
            cleaned.push(p);
        }

        if cleaned.len() < 3 {
            return Err(TrimError::InsufficientPoints {
                count: cleaned.len(),
            });
        }

        if loop_self_intersects(&cleaned, tol) {
            return Err(TrimError::SelfIntersection);
        }

        Ok(Self { points: cleaned })
    }

    #[must_use]
    pub fn points(&self) -> &[UvPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Edges of the loop, closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = (UvPoint, UvPoint)> + '_ {
        closed_edges(&self.points)
    }

    /// Positive for counter-clockwise loops.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    #[must_use]
    pub fn contains(&self, point: UvPoint, tol: Tolerance) -> bool {
        contains_point_polygon(point, &self.points, tol)
    }
}

// ============================================================================
// TrimRegion
// ============================================================================

/// An outer boundary (CCW) with optional holes (CW).
#[derive(Debug, Clone, PartialEq)]
pub struct TrimRegion {
    pub outer: TrimLoop,
    pub holes: Vec<TrimLoop>,
}

impl TrimRegion {
    /// Build a region from loops.
    ///
    /// The loop with the largest area becomes the outer boundary, the rest
    /// are holes. Orientations are normalized.
    ///
    /// # Errors
    /// Returns `TrimError` when no loops are given, or when a hole crosses
    /// the outer loop, lies outside it, crosses another hole or nests in one.
    pub fn from_loops(mut loops: Vec<TrimLoop>, tol: Tolerance) -> Result<Self, TrimError> {
        if loops.is_empty() {
            return Err(TrimError::EmptyLoopSet);
        }

        let outer_index = loops
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.signed_area().abs().total_cmp(&b.1.signed_area().abs()))
            .map_or(0, |(idx, _)| idx);

        let outer = loops.swap_remove(outer_index);
        let outer = if outer.is_ccw() { outer } else { outer.reversed() };

        let mut holes: Vec<TrimLoop> = Vec::with_capacity(loops.len());
        for loop_ in loops {
            let hole = if loop_.is_ccw() { loop_.reversed() } else { loop_ };
            let probe = hole.points[0];

            if loops_intersect(outer.points(), hole.points(), tol) {
                return Err(TrimError::HoleIntersectsOuter);
            }
            if !outer.contains(probe, tol) {
                return Err(TrimError::HoleOutsideBoundary);
            }

            for existing in &holes {
                if loops_intersect(existing.points(), hole.points(), tol) {
                    return Err(TrimError::HolesIntersect);
                }
                if existing.contains(probe, tol) || hole.contains(existing.points[0], tol) {
                    return Err(TrimError::NestedHoles);
                }
            }
            holes.push(hole);
        }

        Ok(Self { outer, holes })
    }

    /// A rectangular region covering `domain`.
    #[must_use]
    pub fn from_domain(domain: &UvDomain) -> Self {
        let outer = TrimLoop {
            points: vec![
                UvPoint::new(domain.u_min, domain.v_min),
                UvPoint::new(domain.u_max, domain.v_min),
                UvPoint::new(domain.u_max, domain.v_max),
                UvPoint::new(domain.u_min, domain.v_max),
            ],
        };
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Inside the outer loop and outside every hole. Boundaries count as inside.
    #[must_use]
    pub fn contains(&self, point: UvPoint, tol: Tolerance) -> bool {
        if !self.outer.contains(point, tol) {
            return false;
        }
        !self.holes.iter().any(|hole| {
            hole.contains(point, tol) && !hole.edges().any(|(a, b)| point_on_segment(point, a, b, tol))
        })
    }

    /// All loops, outer first.
    pub fn loops(&self) -> impl Iterator<Item = &TrimLoop> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }
}
