use itertools::Itertools;

use crate::misc::{FloatingPoint, ParameterValue};

/// A monotonic, invertible mapping between curve parameter and arc length,
/// accurate to the error bound it was built with.
///
/// Built from a speed function (first derivative magnitude) and a global
/// bound on the second derivative magnitude; owns no reference to the
/// curve, only the cumulative length table. Immutable once built, so it can
/// be shared freely across readers.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcLengthParameterization<T: FloatingPoint> {
    /// Cumulative arc length at each subdivision boundary;
    /// `lengths[0] == 0` and the last entry is the total length.
    lengths: Vec<T>,
    max_error: T,
}

impl<T: FloatingPoint> ArcLengthParameterization<T> {
    /// Build a parameterization from a speed function over [0, 1], a
    /// conservative bound on the second derivative magnitude over the whole
    /// curve, and the maximum tolerated arc length error.
    ///
    /// Approximating the arc length of a sub-interval of width `dt` by
    /// `speed(midpoint) * dt` is off by at most `bound * dt^2 / 8`, so the
    /// interval count is chosen analytically to keep the summed error
    /// within `max_error`; there is no open-ended convergence loop.
    ///
    /// # Failures
    /// - if `max_error` is not positive
    /// - if the second derivative bound is negative
    pub fn try_new(
        speed: impl Fn(ParameterValue<T>) -> T,
        max_second_derivative: T,
        max_error: T,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            max_error > T::zero(),
            "The max error must be greater than zero"
        );
        anyhow::ensure!(
            max_second_derivative >= T::zero(),
            "The second derivative bound must be non-negative"
        );

        let eight = T::from_f64(8.).unwrap();
        let divisions = (max_second_derivative / (eight * max_error))
            .to_f64()
            .unwrap()
            .ceil()
            .max(1.) as usize;

        let dt = T::one() / T::from_usize(divisions).unwrap();
        let half = T::from_f64(0.5).unwrap();
        let mut lengths = Vec::with_capacity(divisions + 1);
        lengths.push(T::zero());
        let mut acc = T::zero();
        for i in 0..divisions {
            let mid = (T::from_usize(i).unwrap() + half) * dt;
            acc += speed(ParameterValue::clamped(mid)) * dt;
            lengths.push(acc);
        }
        debug_assert!(lengths.iter().tuple_windows().all(|(a, b)| a <= b));

        Ok(Self { lengths, max_error })
    }

    /// The total arc length, fixed once built.
    pub fn total_length(&self) -> T {
        self.lengths[self.lengths.len() - 1]
    }

    /// The error bound the table was built for.
    pub fn max_error(&self) -> T {
        self.max_error
    }

    /// The number of sub-intervals in the table.
    pub fn divisions(&self) -> usize {
        self.lengths.len() - 1
    }

    /// Find the parameter value at which the given arc length is reached.
    ///
    /// Returns `None` if the length is negative or exceeds the total arc
    /// length; the distance is outside the curve's extent. The recovered
    /// parameter is clamped into [0, 1] to absorb round-off at the exact
    /// endpoints.
    ///
    /// # Example
    /// ```
    /// use bezio::prelude::*;
    ///
    /// // constant speed 2 over [0, 1]
    /// let parameterization = ArcLengthParameterization::try_new(|_| 2.0, 0., 1e-6).unwrap();
    /// let t = parameterization.arc_length_to_parameter(0.5).unwrap();
    /// assert_eq!(t.value(), 0.25);
    /// assert!(parameterization.arc_length_to_parameter(-0.1).is_none());
    /// assert!(parameterization.arc_length_to_parameter(2.5).is_none());
    /// ```
    pub fn arc_length_to_parameter(&self, length: T) -> Option<ParameterValue<T>> {
        if length < T::zero() || length > self.total_length() {
            return None;
        }
        let divisions = self.divisions();
        // first boundary strictly beyond the target length
        let upper = self.lengths.partition_point(|l| *l <= length);
        let i = (upper - 1).min(divisions - 1);
        let segment = self.lengths[i + 1] - self.lengths[i];
        let fraction = if segment > T::zero() {
            (length - self.lengths[i]) / segment
        } else {
            T::zero()
        };
        let t = (T::from_usize(i).unwrap() + fraction) / T::from_usize(divisions).unwrap();
        Some(ParameterValue::clamped(t))
    }

    /// Estimate the arc length from the curve start to the given parameter.
    pub fn parameter_to_arc_length(&self, t: ParameterValue<T>) -> T {
        let divisions = self.divisions();
        let x = t.value() * T::from_usize(divisions).unwrap();
        let i = x.floor().to_usize().unwrap().min(divisions - 1);
        let fraction = x - T::from_usize(i).unwrap();
        self.lengths[i] + (self.lengths[i + 1] - self.lengths[i]) * fraction
    }
}
