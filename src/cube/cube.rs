// gridfill/src/cube/cube.rs

use super::coords::{CoordAxis, DimCoord};
use super::errors::CubeFillError;
use crate::element::GridElement;
use crate::masked::{Maskable, MaskedArray};
use ndarray::{ArrayD, ArrayViewD};

/// Payload of a cube, with or without a missing-value mask.
#[derive(Clone, Debug, PartialEq)]
pub enum CubeData<T> {
    Masked(MaskedArray<T>),
    Plain(ArrayD<T>),
}

impl<T: GridElement> CubeData<T> {
    pub fn shape(&self) -> &[usize] {
        match self {
            CubeData::Masked(masked) => masked.shape(),
            CubeData::Plain(array) => array.shape(),
        }
    }

    pub fn is_masked(&self) -> bool {
        matches!(self, CubeData::Masked(_))
    }
}

impl<T: GridElement> Maskable for CubeData<T> {
    type Elem = T;

    fn data(&self) -> ArrayViewD<'_, T> {
        match self {
            CubeData::Masked(masked) => masked.data().view(),
            CubeData::Plain(array) => array.view(),
        }
    }

    fn mask(&self) -> Option<ArrayViewD<'_, bool>> {
        match self {
            CubeData::Masked(masked) => Some(masked.mask().view()),
            CubeData::Plain(_) => None,
        }
    }
}

/// N-D data with one named coordinate per dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct Cube<T> {
    data: CubeData<T>,
    dim_coords: Vec<DimCoord>,
}

impl<T: GridElement> Cube<T> {
    pub fn new(data: CubeData<T>, dim_coords: Vec<DimCoord>) -> Result<Self, CubeFillError> {
        let ndim = data.shape().len();
        if ndim != dim_coords.len() {
            return Err(CubeFillError::CoordinateCountMismatch(
                ndim,
                dim_coords.len(),
            ));
        }
        Ok(Self { data, dim_coords })
    }

    pub fn data(&self) -> &CubeData<T> {
        &self.data
    }

    pub fn dim_coords(&self) -> &[DimCoord] {
        &self.dim_coords
    }

    pub fn ndim(&self) -> usize {
        self.dim_coords.len()
    }

    /// Index of the single dimension whose coordinate describes `axis`.
    pub fn coord_dim(&self, axis: CoordAxis) -> Result<usize, CubeFillError> {
        let mut dims = self
            .dim_coords
            .iter()
            .enumerate()
            .filter(|(_, coord)| coord.axis() == Some(axis))
            .map(|(dim, _)| dim);
        let dim = dims
            .next()
            .ok_or(CubeFillError::CoordinateNotFound(axis))?;
        if dims.next().is_some() {
            return Err(CubeFillError::DuplicateCoordinate(axis));
        }
        Ok(dim)
    }

    pub fn coord(&self, axis: CoordAxis) -> Result<&DimCoord, CubeFillError> {
        Ok(&self.dim_coords[self.coord_dim(axis)?])
    }

    /// Copy of this cube holding `data` instead, with the same coordinates.
    pub(crate) fn with_data(&self, data: ArrayD<T>) -> Self {
        Self {
            data: CubeData::Plain(data),
            dim_coords: self.dim_coords.clone(),
        }
    }

    pub(crate) fn replace_data(&mut self, data: ArrayD<T>) {
        self.data = CubeData::Plain(data);
    }
}
