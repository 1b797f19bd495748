use itertools::Itertools;
use nalgebra::allocator::Allocator;
use nalgebra::{DefaultAllocator, DimName, OPoint, OVector, Unit};

use crate::arc_length::{ArcLengthParameterization, CurveLengthParameter};
use crate::curve::{CubicBezier, Nondegenerate};
use crate::misc::{FloatingPoint, ParameterValue};

/// A curve composed with its arc-length parameterization, the unit of
/// "walk this curve by physical distance".
///
/// The nondegeneracy witness is carried alongside when it exists; a curve
/// that collapses to a single point can still be parameterized (with total
/// length zero) but has no tangent directions.
#[derive(Clone, Debug)]
pub struct ArcLengthParameterized<T: FloatingPoint, D: DimName>
where
    DefaultAllocator: Allocator<D>,
{
    curve: CubicBezier<T, D>,
    parameterization: ArcLengthParameterization<T>,
    nondegenerate: Option<Nondegenerate<T, D>>,
}

impl<T: FloatingPoint, D: DimName> ArcLengthParameterized<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    /// Build the parameterization of a curve, accurate to within
    /// `max_error`.
    ///
    /// # Failures
    /// - if `max_error` is not positive
    ///
    /// # Example
    /// ```
    /// use bezio::prelude::*;
    /// use nalgebra::Point2;
    /// use approx::assert_relative_eq;
    ///
    /// let line = CubicBezier2D::new(
    ///     Point2::new(0., 0.),
    ///     Point2::new(2., 0.),
    ///     Point2::new(4., 0.),
    ///     Point2::new(6., 0.),
    /// );
    /// let parameterized = line.arc_length_parameterized(1e-9).unwrap();
    /// assert_relative_eq!(parameterized.total_arc_length(), 6., epsilon = 1e-9);
    /// assert_relative_eq!(parameterized.point_along(1.5).unwrap(), Point2::new(1.5, 0.));
    /// ```
    pub fn try_new(curve: CubicBezier<T, D>, max_error: T) -> anyhow::Result<Self> {
        let parameterization = ArcLengthParameterization::try_new(
            |t| curve.first_derivative_at(t).norm(),
            curve.max_second_derivative_magnitude(),
            max_error,
        )?;
        let nondegenerate = curve.try_nondegenerate().ok();
        Ok(Self {
            curve,
            parameterization,
            nondegenerate,
        })
    }

    pub fn curve(&self) -> &CubicBezier<T, D> {
        &self.curve
    }

    pub fn parameterization(&self) -> &ArcLengthParameterization<T> {
        &self.parameterization
    }

    pub fn into_curve(self) -> CubicBezier<T, D> {
        self.curve
    }

    /// The total arc length of the curve, within the build error bound.
    pub fn total_arc_length(&self) -> T {
        self.parameterization.total_length()
    }

    /// The parameter value at which the given arc length is reached, or
    /// `None` when the length lies outside [0, total].
    pub fn parameter_at_length(&self, length: T) -> Option<ParameterValue<T>> {
        self.parameterization.arc_length_to_parameter(length)
    }

    /// The arc length traveled from the start to the given parameter.
    pub fn arc_length_at(&self, t: ParameterValue<T>) -> T {
        self.parameterization.parameter_to_arc_length(t)
    }

    /// The point reached after traveling the given arc length from the
    /// start, or `None` when the length lies outside the curve's extent.
    pub fn point_along(&self, length: T) -> Option<OPoint<T, D>> {
        let t = self.parameter_at_length(length)?;
        Some(self.curve.point_at(t))
    }

    /// The tangent direction after traveling the given arc length, or
    /// `None` when the length is out of range or the curve is a single
    /// point (no tangent exists anywhere on it).
    pub fn tangent_direction_along(&self, length: T) -> Option<Unit<OVector<T, D>>> {
        let nondegenerate = self.nondegenerate.as_ref()?;
        let t = self.parameter_at_length(length)?;
        Some(nondegenerate.tangent_at(t))
    }

    /// Point and tangent direction after traveling the given arc length.
    pub fn sample_along(&self, length: T) -> Option<(OPoint<T, D>, Unit<OVector<T, D>>)> {
        let nondegenerate = self.nondegenerate.as_ref()?;
        let t = self.parameter_at_length(length)?;
        Some(nondegenerate.sample_at(t))
    }

    /// The point halfway along the curve by physical distance.
    ///
    /// Half of a valid total length is always inside [0, total], so the
    /// lookup cannot fail; the fallback to the curve's start point exists
    /// only to keep the function total.
    pub fn midpoint(&self) -> OPoint<T, D> {
        let half = self.total_arc_length() * T::from_f64(0.5).unwrap();
        self.point_along(half)
            .unwrap_or_else(|| self.curve.start_point().clone())
    }

    /// Walk the curve at a fixed physical distance, returning the
    /// (parameter, arc length) pairs of every step including both curve
    /// ends when they fall on a step.
    ///
    /// # Failures
    /// - if the step length is not positive
    ///
    /// # Example
    /// ```
    /// use bezio::prelude::*;
    /// use nalgebra::Point2;
    /// use approx::assert_relative_eq;
    ///
    /// let line = CubicBezier2D::new(
    ///     Point2::new(0., 0.),
    ///     Point2::new(2., 0.),
    ///     Point2::new(4., 0.),
    ///     Point2::new(6., 0.),
    /// );
    /// let parameterized = line.arc_length_parameterized(1e-9).unwrap();
    /// let samples = parameterized.try_divide_by_length(1.5).unwrap();
    /// assert_eq!(samples.len(), 5);
    /// assert_relative_eq!(samples[2].length(), 3.);
    /// assert_relative_eq!(samples[2].parameter().value(), 0.5, epsilon = 1e-6);
    /// ```
    pub fn try_divide_by_length(&self, length: T) -> anyhow::Result<Vec<CurveLengthParameter<T>>> {
        anyhow::ensure!(length > T::zero(), "The length must be greater than zero");

        let total = self.total_arc_length();
        // absorb round-off when the last step lands exactly on the curve end
        let count = (total / length).to_f64().unwrap() + 1e-9;
        let count = count.floor() as usize;

        let samples = (0..=count)
            .filter_map(|k| {
                let s = (length * T::from_usize(k).unwrap()).min(total);
                self.parameter_at_length(s)
                    .map(|t| CurveLengthParameter::new(t, s))
            })
            .collect_vec();
        Ok(samples)
    }

    /// Divide the curve into the given number of segments of equal arc
    /// length, returning the (parameter, arc length) pairs of the segment
    /// boundaries including both curve ends.
    ///
    /// # Failures
    /// - if `segments` is zero
    pub fn try_divide_by_count(
        &self,
        segments: usize,
    ) -> anyhow::Result<Vec<CurveLengthParameter<T>>> {
        anyhow::ensure!(segments > 0, "The segment count must be greater than zero");
        let step = self.total_arc_length() / T::from_usize(segments).unwrap();
        self.try_divide_by_length(step)
    }
}
