// gridfill/src/fill/errors.rs

use ndarray::ShapeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridFillError {
    #[error("xdim and ydim must be distinct dimensions of the grid in [0, {ndim}), but got xdim={xdim} and ydim={ydim}")]
    InvalidAxis { xdim: usize, ydim: usize, ndim: usize },
    #[error("grids must be a masked array")]
    NotMasked,
    #[error("eps must be finite and >= 0, but got {0}")]
    InvalidEps(f64),
    #[error("Expected an array of shape {0:?} but got {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),
    #[error(transparent)]
    NDArrayShapeError(#[from] ShapeError),
}
