pub mod curve_length_parameter;
pub mod parameterization;
pub mod parameterized;
pub use curve_length_parameter::*;
pub use parameterization::*;
pub use parameterized::*;

#[cfg(test)]
mod tests;
