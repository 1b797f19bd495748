mod arc_length;
mod curve;
mod misc;
mod split;

pub mod prelude {
    pub use crate::arc_length::*;
    pub use crate::curve::*;
    pub use crate::misc::*;
    pub use crate::split::*;
}
