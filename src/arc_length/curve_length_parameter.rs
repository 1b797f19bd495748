use crate::misc::{FloatingPoint, ParameterValue};

/// A curve parameter paired with the arc length of the curve at that
/// parameter.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveLengthParameter<T: FloatingPoint> {
    parameter: ParameterValue<T>,
    length: T,
}

impl<T: FloatingPoint> CurveLengthParameter<T> {
    pub fn new(parameter: ParameterValue<T>, length: T) -> Self {
        Self { parameter, length }
    }

    pub fn parameter(&self) -> ParameterValue<T> {
        self.parameter
    }

    pub fn length(&self) -> T {
        self.length
    }
}
