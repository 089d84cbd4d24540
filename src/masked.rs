// gridfill/src/masked.rs

use crate::element::GridElement;
use crate::fill::GridFillError;
use crate::layout::Layout;
use ndarray::{Array, Array3, ArrayD, ArrayView2, ArrayViewD, Dimension, Zip};
use thiserror::Error;

/// Value written into missing cells before relaxation. Large enough that it
/// cannot be mistaken for a real measurement.
pub const FILL_VALUE: f64 = 1.0e20;

/// A grid together with an explicit missing-value mask (`true` = missing).
#[derive(Clone, Debug, PartialEq)]
pub struct MaskedArray<T> {
    data: ArrayD<T>,
    mask: ArrayD<bool>,
}

impl<T: GridElement> MaskedArray<T> {
    pub fn new<D: Dimension>(
        data: Array<T, D>,
        mask: Array<bool, D>,
    ) -> Result<Self, MaskedArrayError> {
        if data.shape() != mask.shape() {
            return Err(MaskedArrayError::ShapeMismatch(
                data.shape().to_vec(),
                mask.shape().to_vec(),
            ));
        }
        Ok(Self {
            data: data.into_dyn(),
            mask: mask.into_dyn(),
        })
    }

    /// Masks every NaN or infinite element.
    pub fn masked_invalid<D: Dimension>(data: Array<T, D>) -> Self {
        let mask = data.mapv(|value| !value.is_finite()).into_dyn();
        Self {
            data: data.into_dyn(),
            mask,
        }
    }

    /// Masks every element exactly equal to `value`.
    pub fn masked_values<D: Dimension>(data: Array<T, D>, value: T) -> Self {
        let mask = data.mapv(|element| element == value).into_dyn();
        Self {
            data: data.into_dyn(),
            mask,
        }
    }

    /// A masked array with nothing masked.
    pub fn unmasked<D: Dimension>(data: Array<T, D>) -> Self {
        let mask = ArrayD::from_elem(data.shape(), false);
        Self {
            data: data.into_dyn(),
            mask,
        }
    }

    pub fn data(&self) -> &ArrayD<T> {
        &self.data
    }

    pub fn mask(&self) -> &ArrayD<bool> {
        &self.mask
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn count_missing(&self) -> usize {
        self.mask.iter().filter(|&&missing| missing).count()
    }

    /// Dense copy with every missing element replaced by `fill_value`.
    pub fn filled(&self, fill_value: T) -> ArrayD<T> {
        Zip::from(&self.data)
            .and(&self.mask)
            .map_collect(|&value, &missing| if missing { fill_value } else { value })
    }

    pub fn into_parts(self) -> (ArrayD<T>, ArrayD<bool>) {
        (self.data, self.mask)
    }
}

/// Grid containers that may carry a missing-value mask.
///
/// A container without mask information returns `None` from [`Maskable::mask`],
/// which [`crate::fill`] rejects instead of guessing which values are missing.
pub trait Maskable {
    type Elem: GridElement;

    fn data(&self) -> ArrayViewD<'_, Self::Elem>;
    fn mask(&self) -> Option<ArrayViewD<'_, bool>>;
}

impl<T: GridElement> Maskable for MaskedArray<T> {
    type Elem = T;

    fn data(&self) -> ArrayViewD<'_, T> {
        self.data.view()
    }

    fn mask(&self) -> Option<ArrayViewD<'_, bool>> {
        Some(self.mask.view())
    }
}

impl<T: GridElement, D: Dimension> Maskable for Array<T, D> {
    type Elem = T;

    fn data(&self) -> ArrayViewD<'_, T> {
        self.view().into_dyn()
    }

    fn mask(&self) -> Option<ArrayViewD<'_, bool>> {
        None
    }
}

/// Dense double precision slices with [`FILL_VALUE`] at missing cells, plus
/// the matching missing-cell mask, both laid out as (rows, columns, slices).
#[derive(Clone, Debug)]
pub struct Extracted {
    pub values: Array3<f64>,
    pub missing: Array3<bool>,
}

pub fn extract<G: Maskable>(grid: &G, layout: &Layout) -> Result<Extracted, GridFillError> {
    let mask = grid.mask().ok_or(GridFillError::NotMasked)?;
    let data = grid.data();
    if data.shape() != mask.shape() {
        return Err(GridFillError::ShapeMismatch(
            data.shape().to_vec(),
            mask.shape().to_vec(),
        ));
    }
    let missing = layout.prep(mask)?;
    let values = layout.prep(data)?;
    let values = Zip::from(&values)
        .and(&missing)
        .map_collect(|&value, &is_missing| {
            if is_missing {
                FILL_VALUE
            } else {
                value.to_f64()
            }
        });
    Ok(Extracted { values, missing })
}

/// Coordinates of the missing cells of one slice, in row-major order.
pub fn missing_cells(missing: &ArrayView2<'_, bool>) -> Vec<(usize, usize)> {
    missing
        .indexed_iter()
        .filter(|(_, &is_missing)| is_missing)
        .map(|(index, _)| index)
        .collect()
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MaskedArrayError {
    #[error("mask shape {1:?} does not match data shape {0:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),
}
