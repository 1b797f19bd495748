use nalgebra::{allocator::Allocator, DefaultAllocator, DimName, OPoint, OVector};

use crate::misc::FloatingPoint;

/// An axis-aligned bounding box in D space.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox<T: FloatingPoint, D: DimName>
where
    DefaultAllocator: Allocator<D>,
{
    min: OPoint<T, D>,
    max: OPoint<T, D>,
}

impl<T: FloatingPoint, D: DimName> BoundingBox<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    /// Create a bounding box enclosing an iterator of points.
    ///
    /// # Example
    /// ```
    /// use bezio::prelude::*;
    /// use nalgebra::Point2;
    ///
    /// let b = BoundingBox::from_points([
    ///     Point2::new(1., 4.),
    ///     Point2::new(-2., 0.),
    ///     Point2::new(3., 1.),
    /// ]);
    /// assert_eq!(*b.min(), Point2::new(-2., 0.));
    /// assert_eq!(*b.max(), Point2::new(3., 4.));
    /// ```
    pub fn from_points<I: IntoIterator<Item = OPoint<T, D>>>(iter: I) -> Self {
        let mut min = OVector::<T, D>::from_element(T::max_value().unwrap());
        let mut max = OVector::<T, D>::from_element(T::min_value().unwrap());

        for point in iter {
            for i in 0..D::dim() {
                min[i] = min[i].min(point[i]);
                max[i] = max[i].max(point[i]);
            }
        }

        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn min(&self) -> &OPoint<T, D> {
        &self.min
    }

    pub fn max(&self) -> &OPoint<T, D> {
        &self.max
    }

    /// The center of the box.
    pub fn center(&self) -> OPoint<T, D> {
        let half = T::from_f64(0.5).unwrap();
        ((&self.min.coords + &self.max.coords) * half).into()
    }

    /// The extent of the box along each axis.
    pub fn size(&self) -> OVector<T, D> {
        &self.max.coords - &self.min.coords
    }
}
