use analysis_data::analysis::{
    AnalysisOptions, Results, SampleSet, SeriesLengthCheck, SurfaceSampleSet, SurfaceSamples,
    VectorSampleSet,
};
use analysis_data::geom::{
    CylinderSurface, PlaneSurface, Point3, SphereSurface, Surface, Tolerance, TrimLoop, TrimRegion,
    TrimmedSurface, UvPoint, Vec3,
};

fn square(u0: f64, v0: f64, u1: f64, v1: f64) -> TrimLoop {
    TrimLoop::new(
        vec![
            UvPoint::new(u0, v0),
            UvPoint::new(u1, v0),
            UvPoint::new(u1, v1),
            UvPoint::new(u0, v1),
        ],
        Tolerance::default_geom(),
    )
    .expect("valid square loop")
}

fn grid(n: usize, lo: f64, hi: f64) -> Vec<UvPoint> {
    let step = (hi - lo) / (n - 1) as f64;
    (0..n)
        .flat_map(|i| (0..n).map(move |j| UvPoint::new(lo + i as f64 * step, lo + j as f64 * step)))
        .collect()
}

#[test]
fn plane_keeps_locations_inside_its_domain() {
    let plane = PlaneSurface::new(Point3::ORIGIN, Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0)).expect("plane");
    let locations = grid(7, -0.5, 1.5);
    let inside = locations
        .iter()
        .filter(|uv| (0.0..=1.0).contains(&uv.u) && (0.0..=1.0).contains(&uv.v))
        .count();

    let set = SurfaceSampleSet::new(&plane, locations).expect("plane sample set");

    assert_eq!(set.calculation_locations().len(), inside);
    for uv in set.calculation_locations() {
        let deviation = plane.distance_to(plane.point_at(uv.u, uv.v));
        assert!(Tolerance::ON_SURFACE.within_open(deviation));
    }
}

#[test]
fn trimmed_plane_drops_locations_in_hole_and_outside_outer_loop() {
    let tol = Tolerance::default_geom();
    let region = TrimRegion::from_loops(vec![square(0.0, 0.0, 0.8, 0.8), square(0.3, 0.3, 0.5, 0.5)], tol)
        .expect("region with one hole");
    let surface = TrimmedSurface::new(
        PlaneSurface::new(Point3::ORIGIN, Vec3::X, Vec3::Y).expect("plane"),
        region,
    );
    let locations = vec![
        UvPoint::new(0.1, 0.1),
        UvPoint::new(0.4, 0.4),
        UvPoint::new(0.9, 0.1),
        UvPoint::new(0.7, 0.6),
        UvPoint::new(0.3, 0.4),
    ];

    let set = SurfaceSampleSet::new(surface, locations).expect("trimmed sample set");

    assert_eq!(
        set.calculation_locations(),
        &[UvPoint::new(0.1, 0.1), UvPoint::new(0.7, 0.6), UvPoint::new(0.3, 0.4)]
    );
    assert_eq!(set.surface().region().holes.len(), 1);
}

#[test]
fn sphere_keeps_every_finite_location() {
    let sphere = SphereSurface::new(Point3::new(1.0, -2.0, 0.5), 3.0).expect("sphere");
    let locations = grid(6, 0.0, 1.0);

    let set = SurfaceSampleSet::new(sphere, locations.clone()).expect("sphere sample set");

    assert_eq!(set.calculation_locations(), locations.as_slice());
}

#[test]
fn cylinder_drops_locations_beyond_its_height() {
    let cylinder = CylinderSurface::new(Point3::ORIGIN, Vec3::new(0.0, 0.0, 5.0), 2.0).expect("cylinder");
    let locations = vec![
        UvPoint::new(0.25, 0.5),
        UvPoint::new(0.75, 1.2),
        UvPoint::new(1.25, 0.1),
        UvPoint::new(0.5, -0.3),
    ];

    let set = SurfaceSampleSet::new(Box::new(cylinder) as Box<dyn Surface>, locations).expect("cylinder sample set");

    assert_eq!(
        set.calculation_locations(),
        &[UvPoint::new(0.25, 0.5), UvPoint::new(1.25, 0.1)]
    );
}

#[test]
fn strict_options_reject_results_that_do_not_match_culled_locations() {
    let plane = PlaneSurface::new(Point3::ORIGIN, Vec3::X, Vec3::Y).expect("plane");
    let locations = vec![UvPoint::new(0.5, 0.5), UvPoint::new(2.0, 0.5)];
    let mut results = Results::new();
    results.insert("illuminance".to_string(), vec![300.0, 450.0]);

    let unchecked = SurfaceSampleSet::with_results(&plane, locations.clone(), results.clone())
        .expect("unchecked construction");
    assert_eq!(unchecked.result("illuminance"), Some(&[300.0, 450.0][..]));

    let options = AnalysisOptions {
        length_check: SeriesLengthCheck::Strict,
        ..AnalysisOptions::default()
    };
    let err = SurfaceSampleSet::with_options(&plane, locations, results, &options)
        .expect_err("strict construction must fail");
    assert!(err.to_string().contains("illuminance"));
}

#[test]
fn vector_sample_set_keeps_input_order() {
    let points = vec![
        Point3::new(3.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
    ];

    let mut set = VectorSampleSet::new(points.clone());
    assert!(set.results().is_empty());
    assert_eq!(set.calculation_locations(), points.as_slice());

    set.insert_result("wind", vec![Vec3::X, Vec3::Y, Vec3::Z]);
    assert!(set.validate_result_lengths().is_ok());
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_cull_matches_sample_set_construction() {
    use analysis_data::analysis::cull_calculation_locations_parallel;

    let tol = Tolerance::default_geom();
    let region = TrimRegion::from_loops(vec![square(0.1, 0.1, 0.9, 0.9), square(0.4, 0.4, 0.6, 0.6)], tol)
        .expect("region with one hole");
    let surface = TrimmedSurface::new(
        CylinderSurface::new(Point3::ORIGIN, Vec3::Z, 1.0).expect("cylinder"),
        region,
    );
    let locations = grid(21, 0.0, 1.0);

    let parallel = cull_calculation_locations_parallel(&surface, &locations, Tolerance::ON_SURFACE)
        .expect("parallel cull");
    let set = SurfaceSampleSet::new(&surface, locations).expect("sequential sample set");

    assert_eq!(parallel.as_slice(), set.calculation_locations());
}
