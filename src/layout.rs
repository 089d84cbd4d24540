// gridfill/src/layout.rs
//
// Pivots an N-D grid into (rows, columns, slices) so the relaxation can run
// over a uniform batch of 2-D planes, and back again.

use crate::fill::GridFillError;
use ndarray::{Array3, ArrayD, ArrayViewD, IxDyn};

/// Axis permutation and intermediate shape for one grid.
///
/// `order[i]` is the original axis that becomes intermediate axis `i`. The
/// y axis is always moved to position 0 and the x axis to position 1; all
/// remaining axes keep their relative order and are merged into a single
/// trailing slice axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    shape: Vec<usize>,
    order: Vec<usize>,
    intshape: Vec<usize>,
}

impl Layout {
    pub fn new(shape: &[usize], xdim: usize, ydim: usize) -> Result<Self, GridFillError> {
        let ndim = shape.len();
        if ndim < 2 || xdim >= ndim || ydim >= ndim || xdim == ydim {
            return Err(GridFillError::InvalidAxis { xdim, ydim, ndim });
        }
        let mut order = Vec::with_capacity(ndim);
        order.push(ydim);
        order.push(xdim);
        order.extend((0..ndim).filter(|&dim| dim != xdim && dim != ydim));
        let intshape = order.iter().map(|&dim| shape[dim]).collect();
        Ok(Self {
            shape: shape.to_vec(),
            order,
            intshape,
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn nrows(&self) -> usize {
        self.intshape[0]
    }

    pub fn ncols(&self) -> usize {
        self.intshape[1]
    }

    /// Number of 2-D slices, the product of all non-spatial axis lengths.
    pub fn nslices(&self) -> usize {
        self.intshape[2..].iter().product()
    }

    /// Permutation undoing `order`: `inverse[order[i]] == i`.
    pub fn inverse_order(&self) -> Vec<usize> {
        let mut inverse = vec![0; self.order.len()];
        for (position, &dim) in self.order.iter().enumerate() {
            inverse[dim] = position;
        }
        inverse
    }

    pub fn prep<T: Clone>(&self, grid: ArrayViewD<'_, T>) -> Result<Array3<T>, GridFillError> {
        if grid.shape() != self.shape.as_slice() {
            return Err(GridFillError::ShapeMismatch(
                self.shape.clone(),
                grid.shape().to_vec(),
            ));
        }
        let permuted = grid.permuted_axes(IxDyn(&self.order));
        let contiguous = permuted.as_standard_layout().into_owned();
        Ok(contiguous.into_shape((self.nrows(), self.ncols(), self.nslices()))?)
    }

    pub fn recover<T: Clone>(&self, grids: Array3<T>) -> Result<ArrayD<T>, GridFillError> {
        let contiguous = grids.as_standard_layout().into_owned();
        let unflattened = contiguous.into_shape(IxDyn(&self.intshape))?;
        let restored = unflattened.permuted_axes(IxDyn(&self.inverse_order()));
        Ok(restored.as_standard_layout().into_owned())
    }
}
