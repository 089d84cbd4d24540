// gridfill/src/cube/errors.rs

use super::coords::CoordAxis;
use crate::fill::GridFillError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CubeFillError {
    #[error("Cube has {0} dimensions but {1} dimension coordinates were given")]
    CoordinateCountMismatch(usize, usize),
    #[error("Cube has no dimension coordinate for the {0} axis")]
    CoordinateNotFound(CoordAxis),
    #[error("Cube has more than one dimension coordinate for the {0} axis")]
    DuplicateCoordinate(CoordAxis),
    #[error(transparent)]
    GridFillError(#[from] GridFillError),
}
