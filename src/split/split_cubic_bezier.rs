use nalgebra::{allocator::Allocator, DefaultAllocator, DimName};

use crate::curve::{interpolate_points, CubicBezier};
use crate::misc::{FloatingPoint, ParameterValue};

use super::Split;

impl<T: FloatingPoint, D: DimName> Split for CubicBezier<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    type Option = ParameterValue<T>;

    /// Split the curve into two curves before and after the parameter.
    ///
    /// Runs the de Casteljau recursion to full depth and keeps every
    /// intermediate point as a control point of one of the children, so the
    /// subdivision is exact: both children trace the original curve.
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
    /// let (left, right) = curve.try_split(ParameterValue::half()).unwrap();
    /// assert_relative_eq!(*left.end_point(), Point2::new(4., 2.5));
    /// assert_relative_eq!(*right.start_point(), Point2::new(4., 2.5));
    /// assert_relative_eq!(*left.start_point(), *curve.start_point());
    /// assert_relative_eq!(*right.end_point(), *curve.end_point());
    /// ```
    fn try_split(&self, t: ParameterValue<T>) -> anyhow::Result<(Self, Self)> {
        let [p0, p1, p2, p3] = self.control_points().clone();
        let t = t.value();

        let q0 = interpolate_points(&p0, &p1, t);
        let q1 = interpolate_points(&p1, &p2, t);
        let q2 = interpolate_points(&p2, &p3, t);
        let r0 = interpolate_points(&q0, &q1, t);
        let r1 = interpolate_points(&q1, &q2, t);
        let junction = interpolate_points(&r0, &r1, t);

        Ok((
            Self::new(p0, q0, r0, junction.clone()),
            Self::new(junction, r1, q2, p3),
        ))
    }
}
