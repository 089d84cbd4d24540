//! Adapter between named-coordinate cubes and [`crate::fill`].
//!
//! A cube knows which of its dimensions is the x and y axis, and whether the
//! x axis is circular, so callers only supply the relaxation parameters.

mod coords;
mod cube;
mod errors;
mod fill_cube;

pub use coords::{CoordAxis, DimCoord, DimCoordBuilder, DimCoordBuilderError};
pub use cube::{Cube, CubeData};
pub use errors::CubeFillError;
pub use fill_cube::{fill_cube, fill_cube_full, fill_cube_inplace, non_convergence_message};
