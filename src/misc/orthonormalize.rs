use nalgebra::{UnitVector2, UnitVector3, Vector2, Vector3};

use crate::misc::FloatingPoint;

/// Relative tolerance below which a Gram-Schmidt residual counts as zero.
const RESIDUAL_TOLERANCE: f64 = 1e-10;

fn residual_tolerance<T: FloatingPoint>(magnitude: T) -> T {
    T::from_f64(RESIDUAL_TOLERANCE).unwrap() * magnitude
}

/// Build an orthonormal 2D basis from two arbitrary vectors by
/// Gram-Schmidt orthogonalization.
///
/// Returns `None` if the first vector is zero or the two vectors are
/// parallel. On success the two directions are perpendicular, unit length,
/// and each has a nonnegative component along the input it was derived
/// from (the basis follows the inputs, it never flips orientation).
///
/// # Example
/// ```
/// use bezio::prelude::*;
/// use nalgebra::Vector2;
/// use approx::assert_relative_eq;
///
/// let (x, y) = orthonormalize_2d(&Vector2::new(2., 0.), &Vector2::new(1., 3.)).unwrap();
/// assert_relative_eq!(x.into_inner(), Vector2::new(1., 0.));
/// assert_relative_eq!(y.into_inner(), Vector2::new(0., 1.));
///
/// // parallel inputs are rejected
/// assert!(orthonormalize_2d(&Vector2::new(1., 2.), &Vector2::new(-3., -6.)).is_none());
/// ```
pub fn orthonormalize_2d<T: FloatingPoint>(
    u: &Vector2<T>,
    v: &Vector2<T>,
) -> Option<(UnitVector2<T>, UnitVector2<T>)> {
    let x = UnitVector2::try_new(*u, residual_tolerance(u.norm()))?;
    let v_residual = v - x.as_ref() * x.dot(v);
    let y = UnitVector2::try_new(v_residual, residual_tolerance(v.norm()))?;
    Some((x, y))
}

/// Build an orthonormal 3D basis from three arbitrary vectors by
/// Gram-Schmidt orthogonalization.
///
/// Returns `None` at the first vector that is linearly dependent on the
/// directions accepted before it (zero first vector, parallel first pair,
/// or a coplanar triple). The postconditions match [`orthonormalize_2d`].
///
/// # Example
/// ```
/// use bezio::prelude::*;
/// use nalgebra::Vector3;
///
/// let basis = orthonormalize_3d(
///     &Vector3::new(1., 0., 0.),
///     &Vector3::new(2., 3., 0.),
///     &Vector3::new(-1., 2., 4.),
/// );
/// assert!(basis.is_some());
///
/// // coplanar inputs are rejected
/// let coplanar = orthonormalize_3d(
///     &Vector3::new(1., 0., 0.),
///     &Vector3::new(2., 3., 0.),
///     &Vector3::new(-1., 2., 0.),
/// );
/// assert!(coplanar.is_none());
/// ```
pub fn orthonormalize_3d<T: FloatingPoint>(
    u: &Vector3<T>,
    v: &Vector3<T>,
    w: &Vector3<T>,
) -> Option<(UnitVector3<T>, UnitVector3<T>, UnitVector3<T>)> {
    let x = UnitVector3::try_new(*u, residual_tolerance(u.norm()))?;
    let v_residual = v - x.as_ref() * x.dot(v);
    let y = UnitVector3::try_new(v_residual, residual_tolerance(v.norm()))?;
    let w_residual = w - x.as_ref() * x.dot(w) - y.as_ref() * y.dot(w);
    let z = UnitVector3::try_new(w_residual, residual_tolerance(w.norm()))?;
    Some((x, y, z))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{Vector2, Vector3};

    use super::*;

    #[test]
    fn orthonormal_2d_follows_inputs() {
        let u = Vector2::new(3., 1.);
        let v = Vector2::new(-1., 2.);
        let (x, y) = orthonormalize_2d(&u, &v).unwrap();
        assert_relative_eq!(x.norm(), 1.);
        assert_relative_eq!(y.norm(), 1.);
        assert_relative_eq!(x.dot(&y), 0., epsilon = 1e-12);
        assert!(x.dot(&u) >= 0.);
        assert!(y.dot(&v) >= 0.);
    }

    #[test]
    fn parallel_2d_inputs_are_rejected() {
        assert!(orthonormalize_2d(&Vector2::new(1., 2.), &Vector2::new(-3., -6.)).is_none());
        assert!(orthonormalize_2d(&Vector2::zeros(), &Vector2::new(1., 0.)).is_none());
    }

    #[test]
    fn orthonormal_3d_is_pairwise_perpendicular() {
        let u = Vector3::new(1., 0.5, 0.);
        let v = Vector3::new(0., 2., 1.);
        let w = Vector3::new(1., 1., 4.);
        let (x, y, z) = orthonormalize_3d(&u, &v, &w).unwrap();
        assert_relative_eq!(x.dot(&y), 0., epsilon = 1e-12);
        assert_relative_eq!(y.dot(&z), 0., epsilon = 1e-12);
        assert_relative_eq!(x.dot(&z), 0., epsilon = 1e-12);
        assert!(x.dot(&u) >= 0.);
        assert!(y.dot(&v) >= 0.);
        assert!(z.dot(&w) >= 0.);
    }

    #[test]
    fn coplanar_3d_inputs_are_rejected() {
        let basis = orthonormalize_3d(
            &Vector3::new(1., 0., 0.),
            &Vector3::new(2., 3., 0.),
            &Vector3::new(-1., 2., 0.),
        );
        assert!(basis.is_none());
    }
}
