pub mod cubic_bezier;
pub mod nondegenerate;
pub use cubic_bezier::*;
pub use nondegenerate::*;
