pub mod bounding_box;
pub mod floating_point;
pub mod invertible;
pub mod orthonormalize;
pub mod parameter;
pub mod transformable;

pub use bounding_box::*;
pub use floating_point::*;
pub use invertible::*;
pub use orthonormalize::*;
pub use parameter::*;
pub use transformable::*;
