use nalgebra::allocator::Allocator;
use nalgebra::{DefaultAllocator, DimName, OPoint, OVector, Unit};

use crate::curve::CubicBezier;
use crate::misc::{FloatingPoint, ParameterValue};

/// The derivative order anchoring the fallback tangent direction of a
/// nondegenerate curve, together with that direction.
///
/// A closed set of variants: the witness is established by the lowest
/// derivative order that is nonzero everywhere on the curve.
#[derive(Clone, Debug)]
enum DerivativeAnchor<T: FloatingPoint, D: DimName>
where
    DefaultAllocator: Allocator<D>,
{
    /// The first derivative is constant and nonzero (a straight segment).
    FirstDerivative(Unit<OVector<T, D>>),
    /// The second derivative is constant and nonzero; the first derivative
    /// may vanish at isolated parameter values.
    SecondDerivative(Unit<OVector<T, D>>),
    /// The third derivative is nonzero; both lower derivatives may vanish
    /// at isolated parameter values.
    ThirdDerivative(Unit<OVector<T, D>>),
}

/// Proof that a curve has at least one derivative order that is nonzero
/// everywhere, so a tangent direction can be reported at every parameter.
///
/// Can only be obtained from [`CubicBezier::try_nondegenerate`]; the fields
/// are private so a witness cannot be fabricated for a degenerate curve.
///
/// # Example
/// ```
/// use bezio::prelude::*;
/// use nalgebra::{Point2, Vector2};
/// use approx::assert_relative_eq;
///
/// let curve = CubicBezier2D::new(
///     Point2::new(0., 0.),
///     Point2::new(1., 1.),
///     Point2::new(2., 1.),
///     Point2::new(3., 0.),
/// );
/// let nondegenerate = curve.try_nondegenerate().unwrap();
/// let tangent = nondegenerate.tangent_at(ParameterValue::zero());
/// assert_relative_eq!(tangent.into_inner(), Vector2::new(1., 1.).normalize());
///
/// // a single-point curve has no tangent anywhere
/// let point = Point2::new(2., 3.);
/// let degenerate = CubicBezier2D::new(point, point, point, point);
/// assert_eq!(degenerate.try_nondegenerate().unwrap_err(), point);
/// ```
#[derive(Clone, Debug)]
pub struct Nondegenerate<T: FloatingPoint, D: DimName>
where
    DefaultAllocator: Allocator<D>,
{
    curve: CubicBezier<T, D>,
    anchor: DerivativeAnchor<T, D>,
}

impl<T: FloatingPoint, D: DimName> Nondegenerate<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    /// Resolve the degeneracy of a curve.
    ///
    /// Checks, in order: the (constant) third derivative; the second
    /// derivative at parameter 0, which is constant when the third
    /// derivative is zero; the first derivative at parameter 0, constant
    /// when both higher orders are zero. The first nonzero order anchors
    /// the witness. If all three vanish the curve is a single point, which
    /// is returned as the error.
    pub fn try_new(curve: CubicBezier<T, D>) -> Result<Self, OPoint<T, D>> {
        let eps = T::default_epsilon();
        if let Some(direction) = Unit::try_new(curve.third_derivative(), eps) {
            return Ok(Self {
                curve,
                anchor: DerivativeAnchor::ThirdDerivative(direction),
            });
        }
        if let Some(direction) =
            Unit::try_new(curve.second_derivative_at(ParameterValue::zero()), eps)
        {
            return Ok(Self {
                curve,
                anchor: DerivativeAnchor::SecondDerivative(direction),
            });
        }
        if let Some(direction) =
            Unit::try_new(curve.first_derivative_at(ParameterValue::zero()), eps)
        {
            return Ok(Self {
                curve,
                anchor: DerivativeAnchor::FirstDerivative(direction),
            });
        }
        Err(curve.start_point().clone())
    }

    pub fn curve(&self) -> &CubicBezier<T, D> {
        &self.curve
    }

    /// Discard the witness, recovering the plain curve.
    pub fn into_curve(self) -> CubicBezier<T, D> {
        self.curve
    }

    /// The tangent direction at a given parameter.
    ///
    /// Where the first derivative is nonzero its direction is the tangent.
    /// At a reversal point (zero first derivative) the tangent just after
    /// the reversal equals the second derivative direction and the tangent
    /// just before equals its negation, so the second derivative direction
    /// is reported everywhere except exactly at parameter 1, where the
    /// incoming (negated) direction applies. If the second derivative also
    /// vanishes there, the constant third derivative direction is the
    /// tangent.
    pub fn tangent_at(&self, t: ParameterValue<T>) -> Unit<OVector<T, D>> {
        let eps = T::default_epsilon();
        if let Some(direction) = Unit::try_new(self.curve.first_derivative_at(t), eps) {
            return direction;
        }
        match &self.anchor {
            DerivativeAnchor::FirstDerivative(direction) => direction.clone(),
            DerivativeAnchor::SecondDerivative(direction) => {
                flipped_at_end(direction.clone(), t)
            }
            DerivativeAnchor::ThirdDerivative(direction) => {
                match Unit::try_new(self.curve.second_derivative_at(t), eps) {
                    Some(second) => flipped_at_end(second, t),
                    None => direction.clone(),
                }
            }
        }
    }

    /// Point and tangent direction at a given parameter.
    pub fn sample_at(&self, t: ParameterValue<T>) -> (OPoint<T, D>, Unit<OVector<T, D>>) {
        (self.curve.point_at(t), self.tangent_at(t))
    }
}

/// The tangent strictly at the final endpoint reflects the incoming motion,
/// not a direction that would carry the curve past its own end.
fn flipped_at_end<T: FloatingPoint, D: DimName>(
    direction: Unit<OVector<T, D>>,
    t: ParameterValue<T>,
) -> Unit<OVector<T, D>>
where
    DefaultAllocator: Allocator<D>,
{
    if t.is_one() {
        Unit::new_unchecked(-direction.into_inner())
    } else {
        direction
    }
}
