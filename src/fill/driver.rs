// gridfill/src/fill/driver.rs

use super::errors::GridFillError;
use super::init::seed_missing;
use super::options::FillOptions;
use super::relax::{ConvergenceRecord, Relaxation};
use crate::element::GridElement;
use crate::layout::Layout;
use crate::masked::{extract, Extracted, Maskable};
use humantime::format_duration;
use log::{debug, info};
use ndarray::{Array1, Array3, ArrayD, Axis};
use ndarray_stats::errors::MinMaxError;
use ndarray_stats::QuantileExt;
use rayon::prelude::*;
use std::time::Instant;

/// Filled grid plus one convergence record per slice.
#[derive(Clone, Debug)]
pub struct FillOutput<T> {
    grid: ArrayD<T>,
    records: Vec<ConvergenceRecord>,
}

impl<T> FillOutput<T> {
    pub fn grid(&self) -> &ArrayD<T> {
        &self.grid
    }

    pub fn records(&self) -> &[ConvergenceRecord] {
        &self.records
    }

    pub fn nslices(&self) -> usize {
        self.records.len()
    }

    /// One flag per slice, in row-major order over the non-spatial axes.
    pub fn converged(&self) -> Array1<bool> {
        self.records.iter().map(|record| record.converged).collect()
    }

    pub fn not_converged_count(&self) -> usize {
        self.records.iter().filter(|record| !record.converged).count()
    }

    /// Largest final residual over all slices.
    pub fn max_residual(&self) -> Result<f64, MinMaxError> {
        let residuals: Array1<f64> = self.records.iter().map(|r| r.max_residual).collect();
        Ok(*residuals.max()?)
    }

    pub fn into_parts(self) -> (ArrayD<T>, Vec<ConvergenceRecord>) {
        (self.grid, self.records)
    }
}

/// Fills the missing values of `grid` by relaxation over the spatial axes
/// `xdim` and `ydim`, treating every other axis as a batch of independent
/// slices.
///
/// Returns the filled grid, in the original shape and element type, and one
/// convergence flag per slice. A slice that does not converge within
/// `itermax` sweeps is still returned with its best-effort values.
pub fn fill<G: Maskable>(
    grid: &G,
    xdim: usize,
    ydim: usize,
    eps: f64,
    options: &FillOptions,
) -> Result<(ArrayD<G::Elem>, Array1<bool>), GridFillError> {
    let output = fill_with_records(grid, xdim, ydim, eps, options)?;
    let converged = output.converged();
    Ok((output.grid, converged))
}

/// Same as [`fill`] but keeps the full per-slice [`ConvergenceRecord`]s.
pub fn fill_with_records<G: Maskable>(
    grid: &G,
    xdim: usize,
    ydim: usize,
    eps: f64,
    options: &FillOptions,
) -> Result<FillOutput<G::Elem>, GridFillError> {
    validate_eps(eps)?;
    let layout = Layout::new(grid.data().shape(), xdim, ydim)?;
    let Extracted {
        mut values,
        missing,
    } = extract(grid, &layout)?;
    info!(
        "Filling {} slice(s) of {}x{} with {} missing value(s)",
        layout.nslices(),
        layout.nrows(),
        layout.ncols(),
        missing.iter().filter(|&&is_missing| is_missing).count()
    );
    let relaxation = Relaxation {
        eps,
        relax: options.relax(),
        itermax: options.itermax(),
        cyclic: options.cyclic(),
    };
    let now = Instant::now();
    let records = relax_slices(&mut values, &missing, &relaxation, options.initzonal());
    debug!(
        "Took {} to relax {} slice(s).",
        format_duration(now.elapsed()),
        records.len()
    );
    report(&records, options.verbose());
    let filled = values.mapv(<G::Elem as GridElement>::from_f64);
    Ok(FillOutput {
        grid: layout.recover(filled)?,
        records,
    })
}

/// Seeds and relaxes every slice independently, in parallel. Records come back
/// in slice order.
fn relax_slices(
    values: &mut Array3<f64>,
    missing: &Array3<bool>,
    relaxation: &Relaxation,
    initzonal: bool,
) -> Vec<ConvergenceRecord> {
    values
        .axis_iter_mut(Axis(2))
        .into_par_iter()
        .zip(missing.axis_iter(Axis(2)).into_par_iter())
        .map(|(mut slice, slice_missing)| {
            seed_missing(&mut slice, &slice_missing, initzonal);
            relaxation.run(&mut slice, &slice_missing)
        })
        .collect()
}

fn report(records: &[ConvergenceRecord], verbose: bool) {
    for (index, record) in records.iter().enumerate() {
        if verbose {
            println!("[{}] {}", index, record);
        } else {
            debug!("[{}] {}", index, record);
        }
    }
}

fn validate_eps(eps: f64) -> Result<(), GridFillError> {
    if !(eps.is_finite() && eps >= 0.) {
        return Err(GridFillError::InvalidEps(eps));
    }
    Ok(())
}
