#![cfg(feature = "serde")]

use bezio::prelude::*;
use nalgebra::Point3;

#[test]
fn curve_round_trips_through_json() {
    let curve = CubicBezier3D::new(
        Point3::new(0., 0., 0.),
        Point3::new(1., 2., 0.),
        Point3::new(3., 2., 1.),
        Point3::new(4., 0., 1.),
    );
    let json = serde_json::to_string_pretty(&curve).unwrap();
    let decoded: CubicBezier3D<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, curve);
}

#[test]
fn parameterization_round_trips_through_json() {
    let curve = CubicBezier3D::new(
        Point3::new(0., 0., 0.),
        Point3::new(1., 2., 0.),
        Point3::new(3., 2., 1.),
        Point3::new(4., 0., 1.),
    );
    let parameterized = curve.arc_length_parameterized(1e-4).unwrap();
    let json = serde_json::to_string(parameterized.parameterization()).unwrap();
    let decoded: ArcLengthParameterization<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.total_length(), parameterized.total_arc_length());
    assert_eq!(decoded.divisions(), parameterized.parameterization().divisions());
}
