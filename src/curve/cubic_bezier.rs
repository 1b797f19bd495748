use gauss_quad::GaussLegendre;
use nalgebra::allocator::Allocator;
use nalgebra::{
    Const, DefaultAllocator, DimName, Isometry2, Isometry3, OPoint, OVector, Unit,
};
use simba::scalar::SupersetOf;

use crate::arc_length::ArcLengthParameterized;
use crate::curve::Nondegenerate;
use crate::misc::{BoundingBox, FloatingPoint, Invertible, ParameterValue, Transformable};

/// A cubic Bezier curve defined by four control points.
/// By generics, it can be used for 2D or 3D curves with f32 or f64 scalar types.
///
/// The curve is immutable once constructed; reversing, splitting and
/// transforming all return new values.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound(
        serialize = "OPoint<T, D>: serde::Serialize",
        deserialize = "OPoint<T, D>: serde::Deserialize<'de>"
    ))
)]
pub struct CubicBezier<T: FloatingPoint, D: DimName>
where
    DefaultAllocator: Allocator<D>,
{
    control_points: [OPoint<T, D>; 4],
}

/// 2D cubic Bezier curve alias
pub type CubicBezier2D<T> = CubicBezier<T, Const<2>>;

/// 3D cubic Bezier curve alias
pub type CubicBezier3D<T> = CubicBezier<T, Const<3>>;

/// Linear interpolation between two points.
pub(crate) fn interpolate_points<T: FloatingPoint, D: DimName>(
    a: &OPoint<T, D>,
    b: &OPoint<T, D>,
    t: T,
) -> OPoint<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    a.coords.lerp(&b.coords, t).into()
}

impl<T: FloatingPoint, D: DimName> CubicBezier<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    /// The polynomial degree of the curve.
    pub const DEGREE: usize = 3;

    /// Create a new cubic Bezier curve from its four control points
    /// (start point, start control point, end control point, end point).
    pub fn new(p0: OPoint<T, D>, p1: OPoint<T, D>, p2: OPoint<T, D>, p3: OPoint<T, D>) -> Self {
        Self {
            control_points: [p0, p1, p2, p3],
        }
    }

    pub fn from_control_points(control_points: [OPoint<T, D>; 4]) -> Self {
        Self { control_points }
    }

    /// Create a curve from its endpoints and the first derivatives there
    /// (cubic Hermite form).
    ///
    /// # Example
    /// ```
    /// use bezio::prelude::*;
    /// use nalgebra::{Point2, Vector2};
    /// use approx::assert_relative_eq;
    ///
    /// let curve = CubicBezier2D::hermite(
    ///     Point2::new(0., 0.),
    ///     Vector2::new(3., 0.),
    ///     Point2::new(1., 1.),
    ///     Vector2::new(0., 3.),
    /// );
    /// assert_relative_eq!(curve.first_derivative_at(ParameterValue::zero()), Vector2::new(3., 0.));
    /// assert_relative_eq!(curve.first_derivative_at(ParameterValue::one()), Vector2::new(0., 3.));
    /// ```
    pub fn hermite(
        start: OPoint<T, D>,
        start_derivative: OVector<T, D>,
        end: OPoint<T, D>,
        end_derivative: OVector<T, D>,
    ) -> Self {
        let third = T::from_f64(1. / 3.).unwrap();
        let p1 = &start + &start_derivative * third;
        let p2 = &end - &end_derivative * third;
        Self::new(start, p1, p2, end)
    }

    /// Create a cubic curve tracing the same path as a quadratic Bezier
    /// curve (exact degree elevation).
    pub fn from_quadratic(q0: OPoint<T, D>, q1: OPoint<T, D>, q2: OPoint<T, D>) -> Self {
        let two_thirds = T::from_f64(2. / 3.).unwrap();
        let p1 = interpolate_points(&q0, &q1, two_thirds);
        let p2 = interpolate_points(&q2, &q1, two_thirds);
        Self::new(q0, p1, p2, q2)
    }

    pub fn control_points(&self) -> &[OPoint<T, D>; 4] {
        &self.control_points
    }

    pub fn start_point(&self) -> &OPoint<T, D> {
        &self.control_points[0]
    }

    pub fn end_point(&self) -> &OPoint<T, D> {
        &self.control_points[3]
    }

    pub fn degree(&self) -> usize {
        Self::DEGREE
    }

    /// Evaluate the curve at a given parameter by the de Casteljau
    /// recursion (three passes of pairwise interpolation), which is
    /// numerically preferable to evaluating the expanded polynomial.
    ///
    /// # Example
    /// ```
    /// use bezio::prelude::*;
    /// use nalgebra::Point2;
    /// use approx::assert_relative_eq;
    ///
    /// let curve = CubicBezier2D::new(
    ///     Point2::new(1., 1.),
    ///     Point2::new(3., 4.),
    ///     Point2::new(5., 1.),
    ///     Point2::new(7., 4.),
    /// );
    /// assert_relative_eq!(curve.point_at(ParameterValue::zero()), Point2::new(1., 1.));
    /// assert_relative_eq!(curve.point_at(ParameterValue::half()), Point2::new(4., 2.5));
    /// assert_relative_eq!(curve.point_at(ParameterValue::one()), Point2::new(7., 4.));
    /// ```
    pub fn point_at(&self, t: ParameterValue<T>) -> OPoint<T, D> {
        let t = t.value();
        let [p0, p1, p2, p3] = &self.control_points;
        let q0 = interpolate_points(p0, p1, t);
        let q1 = interpolate_points(p1, p2, t);
        let q2 = interpolate_points(p2, p3, t);
        let r0 = interpolate_points(&q0, &q1, t);
        let r1 = interpolate_points(&q1, &q2, t);
        interpolate_points(&r0, &r1, t)
    }

    /// Edge vectors between consecutive control points.
    fn edge_vectors(&self) -> [OVector<T, D>; 3] {
        let [p0, p1, p2, p3] = &self.control_points;
        [p1 - p0, p2 - p1, p3 - p2]
    }

    /// Evaluate the first derivative at a given parameter.
    ///
    /// The de Casteljau recursion over the edge vectors is run forward for
    /// `t <= 0.5` and mirrored (reversed edges at `1 - t`) otherwise;
    /// evaluating a single recursion from one end loses precision as the
    /// parameter approaches the far end.
    pub fn first_derivative_at(&self, t: ParameterValue<T>) -> OVector<T, D> {
        let [v0, v1, v2] = self.edge_vectors();
        let degree = T::from_usize(Self::DEGREE).unwrap();
        let half = T::from_f64(0.5).unwrap();
        if t.value() <= half {
            let t = t.value();
            let w0 = v0.lerp(&v1, t);
            let w1 = v1.lerp(&v2, t);
            w0.lerp(&w1, t) * degree
        } else {
            let u = t.one_minus().value();
            let w0 = v2.lerp(&v1, u);
            let w1 = v1.lerp(&v0, u);
            w0.lerp(&w1, u) * degree
        }
    }

    /// Evaluate the second derivative at a given parameter
    /// (linear in the parameter for a cubic).
    pub fn second_derivative_at(&self, t: ParameterValue<T>) -> OVector<T, D> {
        let [v0, v1, v2] = self.edge_vectors();
        let e0 = &v1 - &v0;
        let e1 = &v2 - &v1;
        let scale = T::from_usize(Self::DEGREE * (Self::DEGREE - 1)).unwrap();
        e0.lerp(&e1, t.value()) * scale
    }

    /// The third derivative, constant over the whole curve.
    pub fn third_derivative(&self) -> OVector<T, D> {
        let [v0, v1, v2] = self.edge_vectors();
        let scale =
            T::from_usize(Self::DEGREE * (Self::DEGREE - 1) * (Self::DEGREE - 2)).unwrap();
        ((&v2 - &v1) - (&v1 - &v0)) * scale
    }

    /// An upper bound on the second derivative magnitude over the whole
    /// curve. The second derivative is linear in the parameter, so its norm
    /// is maximized at one of the endpoints.
    pub fn max_second_derivative_magnitude(&self) -> T {
        let at_start = self.second_derivative_at(ParameterValue::zero()).norm();
        let at_end = self.second_derivative_at(ParameterValue::one()).norm();
        at_start.max(at_end)
    }

    /// Check that the curve has a well-defined tangent direction
    /// everywhere, returning a witness carrying the fallback direction for
    /// parameters where lower-order derivatives vanish.
    ///
    /// Fails if the curve collapses to a single point, returning that
    /// point.
    pub fn try_nondegenerate(&self) -> Result<Nondegenerate<T, D>, OPoint<T, D>> {
        Nondegenerate::try_new(self.clone())
    }

    /// Build an arc-length parameterized view of the curve whose length
    /// estimates are accurate to within `max_error`.
    ///
    /// This is an explicit, potentially expensive step; callers doing
    /// repeated arc-length queries should build once and reuse the result.
    pub fn arc_length_parameterized(
        &self,
        max_error: T,
    ) -> anyhow::Result<ArcLengthParameterized<T, D>> {
        ArcLengthParameterized::try_new(self.clone(), max_error)
    }

    /// Sample the curve at evenly spaced parameter values
    /// (`samples` points including both endpoints).
    pub fn sample_regular(&self, samples: usize) -> Vec<OPoint<T, D>> {
        ParameterValue::steps(samples.saturating_sub(1))
            .into_iter()
            .map(|t| self.point_at(t))
            .collect()
    }

    /// Compute the length of the curve by Gauss-Legendre quadrature.
    ///
    /// # Example
    /// ```
    /// use bezio::prelude::*;
    /// use nalgebra::Point2;
    /// use approx::assert_relative_eq;
    ///
    /// let line = CubicBezier2D::new(
    ///     Point2::new(0., 0.),
    ///     Point2::new(1., 0.),
    ///     Point2::new(2., 0.),
    ///     Point2::new(3., 0.),
    /// );
    /// assert_relative_eq!(line.length(), 3., epsilon = 1e-12);
    /// ```
    pub fn length(&self) -> T {
        let gauss = GaussLegendre::init(16 + Self::DEGREE);
        let sum = gauss.integrate(0., 1., |x| {
            let t = ParameterValue::clamped(T::from_f64(x).unwrap());
            self.first_derivative_at(t).norm().to_f64().unwrap()
        });
        T::from_f64(sum).unwrap()
    }

    /// Map every control point through a pure point transformation.
    ///
    /// This is the seam for coordinate-frame conversions: any
    /// `Point -> Point` map (a frame change, a projection, a custom rigid
    /// transform) applied pointwise yields the transformed curve.
    pub fn map_control_points<F>(&self, f: F) -> Self
    where
        F: FnMut(&OPoint<T, D>) -> OPoint<T, D>,
    {
        Self {
            control_points: self.control_points.each_ref().map(f),
        }
    }

    /// The curve translated by a vector.
    pub fn translated(&self, translation: &OVector<T, D>) -> Self {
        self.map_control_points(|p| p + translation)
    }

    /// The curve scaled about the origin.
    pub fn scaled(&self, factor: T) -> Self {
        self.map_control_points(|p| (&p.coords * factor).into())
    }

    /// The curve mirrored across the hyperplane through the origin with the
    /// given unit normal (a line in 2D, a plane in 3D).
    pub fn mirrored(&self, normal: &Unit<OVector<T, D>>) -> Self {
        let two = T::from_usize(2).unwrap();
        self.map_control_points(|p| {
            let n = normal.as_ref();
            (&p.coords - n * (p.coords.dot(n) * two)).into()
        })
    }

    /// The axis-aligned extrema of the control points. The curve itself is
    /// contained in this box by the convex hull property.
    pub fn control_points_bounds(&self) -> BoundingBox<T, D> {
        BoundingBox::from_points(self.control_points.iter().cloned())
    }

    /// Cast the curve to a curve with another floating point type.
    pub fn cast<F: FloatingPoint + SupersetOf<T>>(&self) -> CubicBezier<F, D> {
        CubicBezier {
            control_points: self.control_points.each_ref().map(|p| p.clone().cast()),
        }
    }
}

impl<T: FloatingPoint, D: DimName> PartialEq for CubicBezier<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    fn eq(&self, other: &Self) -> bool {
        self.control_points == other.control_points
    }
}

/// Enable to transform a 2D curve by an isometry (rotation + translation)
impl<'a, T: FloatingPoint> Transformable<&'a Isometry2<T>> for CubicBezier<T, Const<2>> {
    fn transform(&mut self, transform: &'a Isometry2<T>) {
        self.control_points
            .iter_mut()
            .for_each(|p| *p = transform.transform_point(p));
    }
}

/// Enable to transform a 3D curve by an isometry (rotation + translation)
impl<'a, T: FloatingPoint> Transformable<&'a Isometry3<T>> for CubicBezier<T, Const<3>> {
    fn transform(&mut self, transform: &'a Isometry3<T>) {
        self.control_points
            .iter_mut()
            .for_each(|p| *p = transform.transform_point(p));
    }
}

impl<T: FloatingPoint, D: DimName> Invertible for CubicBezier<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    /// Reverse the direction of the curve
    /// # Example
    /// ```
    /// use bezio::prelude::*;
    /// use nalgebra::Point2;
    /// use approx::assert_relative_eq;
    ///
    /// let curve = CubicBezier2D::new(
    ///     Point2::new(0., 0.),
    ///     Point2::new(1., 2.),
    ///     Point2::new(2., -1.),
    ///     Point2::new(3., 1.),
    /// );
    /// let reversed = curve.inverse();
    /// assert_relative_eq!(*reversed.start_point(), *curve.end_point());
    /// assert_relative_eq!(
    ///     reversed.point_at(ParameterValue::clamped(0.25)),
    ///     curve.point_at(ParameterValue::clamped(0.75)),
    /// );
    /// ```
    fn invert(&mut self) {
        self.control_points.reverse();
    }
}
