// gridfill/src/element.rs

use std::fmt::{Debug, Display};

/// Floating point element types a grid may hold.
///
/// Relaxation always runs in double precision; values are widened with
/// [`GridElement::to_f64`] on the way in and narrowed with
/// [`GridElement::from_f64`] on the way out.
pub trait GridElement: Copy + PartialEq + Debug + Display + Send + Sync + 'static {
    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;
    fn is_finite(self) -> bool;
}

impl GridElement for f64 {
    fn to_f64(self) -> f64 {
        self
    }
    fn from_f64(value: f64) -> Self {
        value
    }
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

impl GridElement for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }
    fn from_f64(value: f64) -> Self {
        value as f32
    }
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
}
