use approx::assert_relative_eq;
use itertools::Itertools;
use nalgebra::{Point2, Vector2};

use crate::prelude::*;

fn straight_line() -> CubicBezier2D<f64> {
    // linear cubic from (0, 0) to (10, 0): arc length equals Euclidean
    // distance regardless of subdivision
    CubicBezier2D::new(
        Point2::new(0., 0.),
        Point2::new(10. / 3., 0.),
        Point2::new(20. / 3., 0.),
        Point2::new(10., 0.),
    )
}

fn wavy_curve() -> CubicBezier2D<f64> {
    CubicBezier2D::new(
        Point2::new(1., 1.),
        Point2::new(3., 4.),
        Point2::new(5., 1.),
        Point2::new(7., 4.),
    )
}

#[test]
fn straight_line_total_length_is_exact_within_tolerance() {
    let tolerance = 1e-6;
    let parameterized = straight_line().arc_length_parameterized(tolerance).unwrap();
    assert_relative_eq!(parameterized.total_arc_length(), 10., epsilon = tolerance);
}

#[test]
fn arc_length_is_monotonic_in_the_parameter() {
    let parameterized = wavy_curve().arc_length_parameterized(1e-4).unwrap();
    let lengths = ParameterValue::steps(64)
        .into_iter()
        .map(|t| parameterized.arc_length_at(t))
        .collect_vec();
    assert!(lengths.iter().tuple_windows().all(|(a, b)| a <= b));
    assert_relative_eq!(lengths[0], 0.);
    assert_relative_eq!(
        lengths[lengths.len() - 1],
        parameterized.total_arc_length()
    );
}

#[test]
fn total_length_agrees_with_quadrature() {
    let curve = wavy_curve();
    let tolerance = 1e-6;
    let parameterized = curve.arc_length_parameterized(tolerance).unwrap();
    assert_relative_eq!(
        parameterized.total_arc_length(),
        curve.length(),
        epsilon = tolerance * 10.
    );
}

#[test]
fn walking_a_straight_line_by_distance() {
    let parameterized = straight_line().arc_length_parameterized(1e-9).unwrap();
    assert_relative_eq!(
        parameterized.point_along(2.5).unwrap(),
        Point2::new(2.5, 0.),
        epsilon = 1e-6
    );
    assert_relative_eq!(
        parameterized.parameter_at_length(5.).unwrap().value(),
        0.5,
        epsilon = 1e-6
    );
    assert_relative_eq!(parameterized.midpoint(), Point2::new(5., 0.), epsilon = 1e-6);
}

#[test]
fn out_of_range_lengths_are_rejected() {
    let parameterized = straight_line().arc_length_parameterized(1e-6).unwrap();
    assert!(parameterized.point_along(-1e-9).is_none());
    assert!(parameterized
        .point_along(parameterized.total_arc_length() + 1e-6)
        .is_none());
    // the extremes themselves are inside the domain
    assert!(parameterized.point_along(0.).is_some());
    assert!(parameterized
        .point_along(parameterized.total_arc_length())
        .is_some());
}

#[test]
fn round_trip_between_parameter_and_length() {
    let parameterized = wavy_curve().arc_length_parameterized(1e-6).unwrap();
    for t in ParameterValue::steps(16) {
        let s = parameterized.arc_length_at(t);
        let back = parameterized.parameter_at_length(s).unwrap();
        assert_relative_eq!(back.value(), t.value(), epsilon = 1e-9);
    }
}

#[test]
fn tangent_along_points_in_the_direction_of_travel() {
    let parameterized = straight_line().arc_length_parameterized(1e-6).unwrap();
    let tangent = parameterized.tangent_direction_along(3.).unwrap();
    assert_relative_eq!(tangent.into_inner(), Vector2::new(1., 0.));

    let (point, direction) = parameterized.sample_along(7.).unwrap();
    assert_relative_eq!(point, Point2::new(7., 0.), epsilon = 1e-6);
    assert_relative_eq!(direction.into_inner(), Vector2::new(1., 0.));
}

#[test]
fn degenerate_point_curve_has_length_zero_and_no_tangents() {
    let p = Point2::new(3., -1.);
    let curve = CubicBezier2D::new(p, p, p, p);
    let parameterized = curve.arc_length_parameterized(1e-6).unwrap();
    assert_relative_eq!(parameterized.total_arc_length(), 0.);
    assert!(parameterized.tangent_direction_along(0.).is_none());
    assert!(parameterized.sample_along(0.).is_none());
    // the location is still reportable
    assert_relative_eq!(parameterized.point_along(0.).unwrap(), p);
    assert_relative_eq!(parameterized.midpoint(), p);
}

#[test]
fn divide_by_count_is_uniform_on_a_straight_line() {
    let parameterized = straight_line().arc_length_parameterized(1e-9).unwrap();
    let samples = parameterized.try_divide_by_count(4).unwrap();
    assert_eq!(samples.len(), 5);
    for (i, sample) in samples.iter().enumerate() {
        assert_relative_eq!(sample.length(), 2.5 * i as f64, epsilon = 1e-6);
        assert_relative_eq!(sample.parameter().value(), 0.25 * i as f64, epsilon = 1e-6);
    }
}

#[test]
fn invalid_build_and_divide_inputs_fail() {
    let curve = wavy_curve();
    assert!(curve.arc_length_parameterized(0.).is_err());
    assert!(curve.arc_length_parameterized(-1e-3).is_err());

    let parameterized = curve.arc_length_parameterized(1e-6).unwrap();
    assert!(parameterized.try_divide_by_length(0.).is_err());
    assert!(parameterized.try_divide_by_count(0).is_err());
}

#[test]
fn midpoint_handles_the_exact_half_length_boundary() {
    // the documented fallback to the start point must stay unreachable
    let parameterized = wavy_curve().arc_length_parameterized(1e-6).unwrap();
    let half = parameterized.total_arc_length() * 0.5;
    let direct = parameterized.point_along(half).unwrap();
    assert_relative_eq!(parameterized.midpoint(), direct);
    assert!(parameterized.midpoint() != *parameterized.curve().start_point());
}
