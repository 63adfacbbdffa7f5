use crate::geom::{Tolerance, TrimError, TrimLoop, TrimRegion, UvDomain, UvPoint};

fn square(u0: f64, v0: f64, u1: f64, v1: f64, tol: Tolerance) -> TrimLoop {
    TrimLoop::new(
        vec![
            UvPoint::new(u0, v0),
            UvPoint::new(u1, v0),
            UvPoint::new(u1, v1),
            UvPoint::new(u0, v1),
        ],
        tol,
    )
    .unwrap()
}

#[test]
fn trim_region_normalizes_orientation_and_contains_points() {
    let tol = Tolerance::new(1e-9);

    let outer_cw = TrimLoop::new(
        vec![
            UvPoint::new(0.0, 0.0),
            UvPoint::new(0.0, 1.0),
            UvPoint::new(1.0, 1.0),
            UvPoint::new(1.0, 0.0),
        ],
        tol,
    )
    .unwrap();
    let hole_ccw = square(0.4, 0.4, 0.6, 0.6, tol);

    let region = TrimRegion::from_loops(vec![hole_ccw, outer_cw], tol).unwrap();
    assert!(region.outer.is_ccw());
    assert_eq!(region.holes.len(), 1);
    assert!(!region.holes[0].is_ccw());

    assert!(region.contains(UvPoint::new(0.2, 0.2), tol));
    assert!(!region.contains(UvPoint::new(0.5, 0.5), tol));
    assert!(!region.contains(UvPoint::new(1.2, 0.2), tol));
    assert_eq!(region.loops().count(), 2);
}

#[test]
fn trim_region_boundaries_count_as_inside() {
    let tol = Tolerance::new(1e-9);
    let region = TrimRegion::from_loops(
        vec![square(0.0, 0.0, 1.0, 1.0, tol), square(0.4, 0.4, 0.6, 0.6, tol)],
        tol,
    )
    .unwrap();

    assert!(region.contains(UvPoint::new(0.0, 0.5), tol));
    assert!(region.contains(UvPoint::new(1.0, 1.0), tol));
    assert!(region.contains(UvPoint::new(0.4, 0.5), tol));
    assert!(region.contains(UvPoint::new(0.6, 0.6), tol));
}

#[test]
fn trim_loop_drops_closing_and_duplicate_points() {
    let tol = Tolerance::new(1e-9);
    let loop_ = TrimLoop::new(
        vec![
            UvPoint::new(0.0, 0.0),
            UvPoint::new(1.0, 0.0),
            UvPoint::new(1.0, 0.0),
            UvPoint::new(1.0, 1.0),
            UvPoint::new(0.0, 0.0),
        ],
        tol,
    )
    .unwrap();

    assert_eq!(loop_.len(), 3);
    assert_eq!(loop_.edges().count(), 3);
    assert!((loop_.signed_area() - 0.5).abs() < 1e-12);
}

#[test]
fn trim_loop_rejects_degenerate_input() {
    let tol = Tolerance::new(1e-9);

    let closed_segment = TrimLoop::new(
        vec![UvPoint::new(0.0, 0.0), UvPoint::new(1.0, 0.0), UvPoint::new(0.0, 0.0)],
        tol,
    );
    assert_eq!(closed_segment, Err(TrimError::InsufficientPoints { count: 2 }));

    let non_finite = TrimLoop::new(
        vec![UvPoint::new(0.0, 0.0), UvPoint::new(f64::NAN, 0.0), UvPoint::new(0.0, 1.0)],
        tol,
    );
    assert_eq!(non_finite, Err(TrimError::NonFinitePoints));
}

#[test]
fn trim_loop_rejects_self_intersection() {
    let tol = Tolerance::new(1e-9);
    let loop_ = TrimLoop::new(
        vec![
            UvPoint::new(0.0, 0.0),
            UvPoint::new(1.0, 1.0),
            UvPoint::new(0.0, 1.0),
            UvPoint::new(1.0, 0.0),
        ],
        tol,
    );
    assert!(matches!(loop_, Err(TrimError::SelfIntersection)));
}

#[test]
fn trim_region_rejects_invalid_holes() {
    let tol = Tolerance::new(1e-9);
    let outer = || square(0.0, 0.0, 2.0, 2.0, tol);

    let crossing = square(0.5, 0.5, 1.5, 2.5, tol);
    let err = TrimRegion::from_loops(vec![outer(), crossing], tol).unwrap_err();
    assert!(matches!(err, TrimError::HoleIntersectsOuter));

    let outside = square(3.0, 3.0, 3.5, 3.5, tol);
    let err = TrimRegion::from_loops(vec![outer(), outside], tol).unwrap_err();
    assert!(matches!(err, TrimError::HoleOutsideBoundary));

    let big = square(0.5, 0.5, 1.5, 1.5, tol);
    let nested = square(0.8, 0.8, 1.2, 1.2, tol);
    let err = TrimRegion::from_loops(vec![outer(), big, nested], tol).unwrap_err();
    assert!(matches!(err, TrimError::NestedHoles));

    let a = square(0.2, 0.2, 1.0, 1.0, tol);
    let b = square(0.8, 0.8, 1.6, 1.6, tol);
    let err = TrimRegion::from_loops(vec![outer(), a, b], tol).unwrap_err();
    assert!(matches!(err, TrimError::HolesIntersect));

    let err = TrimRegion::from_loops(Vec::new(), tol).unwrap_err();
    assert!(matches!(err, TrimError::EmptyLoopSet));
}

#[test]
fn uv_domain_contains_and_clamps() {
    let domain = UvDomain::new(0.0, 2.0, -1.0, 1.0);
    let tol = Tolerance::new(1e-9);

    assert!(domain.contains(UvPoint::new(2.0, -1.0), tol));
    assert!(!domain.contains(UvPoint::new(2.1, 0.0), tol));
    assert_eq!(domain.clamp(UvPoint::new(3.0, -4.0)), UvPoint::new(2.0, -1.0));

    let region = TrimRegion::from_domain(&domain);
    assert!(region.contains(UvPoint::new(1.0, 0.5), tol));
    assert!(region.outer.is_ccw());
    assert_eq!(UvDomain::default(), UvDomain::unit());
}
