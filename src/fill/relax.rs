// gridfill/src/fill/relax.rs
//
// Successive over-relaxation of the missing cells of a single slice. Cells are
// updated in place in row-major order, so later cells in a sweep already see
// the values updated earlier in the same sweep.

use crate::masked::missing_cells;
use log::trace;
use ndarray::{ArrayView2, ArrayViewMut2};
use std::fmt;

/// Outcome of relaxing one slice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvergenceRecord {
    pub iterations: usize,
    pub max_residual: f64,
    pub converged: bool,
}

impl ConvergenceRecord {
    fn already_filled() -> Self {
        Self {
            iterations: 0,
            max_residual: 0.,
            converged: true,
        }
    }
}

impl fmt::Display for ConvergenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.converged {
            "converged"
        } else {
            "did not converge"
        };
        write!(
            f,
            "relaxation {} ({} iterations with maximum residual {})",
            status,
            self.iterations,
            format_scientific(self.max_residual)
        )
    }
}

/// Scientific notation with three decimals and a signed, two digit exponent,
/// e.g. `1.230e-04`.
pub fn format_scientific(value: f64) -> String {
    let formatted = format!("{:.3e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => {
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exponent.abs())
            }
            Err(_) => formatted,
        },
        None => formatted,
    }
}

/// Sweep parameters shared by every slice of a batch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Relaxation {
    pub eps: f64,
    pub relax: f64,
    pub itermax: usize,
    pub cyclic: bool,
}

impl Relaxation {
    /// Relaxes the already seeded `grid` until the largest update of a sweep
    /// is <= eps or `itermax` sweeps have run. With `itermax == 0` no sweep
    /// runs and a slice with missing cells is reported as not converged.
    pub fn run(
        &self,
        grid: &mut ArrayViewMut2<'_, f64>,
        missing: &ArrayView2<'_, bool>,
    ) -> ConvergenceRecord {
        let cells = missing_cells(missing);
        if cells.is_empty() {
            return ConvergenceRecord::already_filled();
        }
        if self.itermax == 0 {
            return ConvergenceRecord {
                iterations: 0,
                max_residual: f64::INFINITY,
                converged: false,
            };
        }
        let mut iterations = 0;
        loop {
            let max_residual = self.sweep(grid, &cells);
            iterations += 1;
            trace!("sweep {}: maximum residual {:e}", iterations, max_residual);
            if max_residual <= self.eps {
                return ConvergenceRecord {
                    iterations,
                    max_residual,
                    converged: true,
                };
            }
            if iterations >= self.itermax {
                return ConvergenceRecord {
                    iterations,
                    max_residual,
                    converged: false,
                };
            }
        }
    }

    /// One in-place pass over `cells`, returning the largest absolute update.
    pub fn sweep(&self, grid: &mut ArrayViewMut2<'_, f64>, cells: &[(usize, usize)]) -> f64 {
        let mut max_residual: f64 = 0.;
        for &(row, col) in cells {
            let mean = match self.neighbour_mean(&grid.view(), row, col) {
                Some(mean) => mean,
                None => continue,
            };
            let old = grid[[row, col]];
            let new = old + self.relax * (mean - old);
            grid[[row, col]] = new;
            max_residual = max_residual.max((new - old).abs());
        }
        max_residual
    }

    /// Average of the in-range 4-neighbours of (row, col). Rows never wrap;
    /// columns wrap when `cyclic` is set.
    fn neighbour_mean(&self, grid: &ArrayView2<'_, f64>, row: usize, col: usize) -> Option<f64> {
        let (nrows, ncols) = grid.dim();
        let mut total = 0.;
        let mut count = 0usize;
        if row > 0 {
            total += grid[[row - 1, col]];
            count += 1;
        }
        if row + 1 < nrows {
            total += grid[[row + 1, col]];
            count += 1;
        }
        for neighbour in self.column_neighbours(col, ncols).into_iter().flatten() {
            total += grid[[row, neighbour]];
            count += 1;
        }
        if count == 0 {
            None
        } else {
            Some(total / count as f64)
        }
    }

    fn column_neighbours(&self, col: usize, ncols: usize) -> [Option<usize>; 2] {
        let west = if col > 0 {
            Some(col - 1)
        } else if self.cyclic {
            Some(ncols - 1)
        } else {
            None
        };
        let east = if col + 1 < ncols {
            Some(col + 1)
        } else if self.cyclic {
            Some(0)
        } else {
            None
        };
        // a single column wraps onto itself, which is not a neighbour
        [west.filter(|&c| c != col), east.filter(|&c| c != col)]
    }
}
