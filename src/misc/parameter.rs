use crate::misc::FloatingPoint;

/// A curve parameter constrained to the closed unit interval [0, 1].
///
/// Every construction path clamps or validates its input, so evaluation
/// code downstream never has to re-check the range.
///
/// # Example
/// ```
/// use bezio::prelude::*;
///
/// let t = ParameterValue::clamped(1.5);
/// assert_eq!(t.value(), 1.0);
/// assert!(ParameterValue::try_new(-0.1).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterValue<T>(T);

impl<T: FloatingPoint> ParameterValue<T> {
    /// The start of the parameter domain.
    pub fn zero() -> Self {
        Self(T::zero())
    }

    /// The middle of the parameter domain.
    pub fn half() -> Self {
        Self(T::from_f64(0.5).unwrap())
    }

    /// The end of the parameter domain.
    pub fn one() -> Self {
        Self(T::one())
    }

    /// Create a parameter value, clamping the input into [0, 1].
    pub fn clamped(value: T) -> Self {
        Self(value.clamp(T::zero(), T::one()))
    }

    /// Create a parameter value, rejecting inputs outside [0, 1].
    pub fn try_new(value: T) -> Option<Self> {
        (T::zero()..=T::one()).contains(&value).then_some(Self(value))
    }

    /// Midpoint of two parameter values.
    pub fn midpoint(a: Self, b: Self) -> Self {
        Self((a.0 + b.0) * T::from_f64(0.5).unwrap())
    }

    /// `n + 1` evenly spaced parameter values covering [0, 1] inclusively.
    ///
    /// # Example
    /// ```
    /// use bezio::prelude::*;
    ///
    /// let steps = ParameterValue::<f64>::steps(4);
    /// assert_eq!(steps.len(), 5);
    /// assert_eq!(steps[0].value(), 0.);
    /// assert_eq!(steps[2].value(), 0.5);
    /// assert_eq!(steps[4].value(), 1.);
    /// ```
    pub fn steps(n: usize) -> Vec<Self> {
        let n = n.max(1);
        let den = T::from_usize(n).unwrap();
        (0..=n)
            .map(|i| Self::clamped(T::from_usize(i).unwrap() / den))
            .collect()
    }

    /// The wrapped scalar.
    pub fn value(self) -> T {
        self.0
    }

    /// The parameter mirrored around the middle of the domain.
    pub fn one_minus(self) -> Self {
        Self(T::one() - self.0)
    }

    pub fn is_one(self) -> bool {
        self.0 == T::one()
    }

    pub fn is_zero(self) -> bool {
        self.0 == T::zero()
    }
}
