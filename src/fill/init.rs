// gridfill/src/fill/init.rs

use ndarray::{Array1, ArrayView2, ArrayViewMut2};

/// Mean of the non-missing values in each row. Rows with no valid values get
/// a mean of zero.
pub fn zonal_means(values: &ArrayView2<'_, f64>, missing: &ArrayView2<'_, bool>) -> Array1<f64> {
    values
        .outer_iter()
        .zip(missing.outer_iter())
        .map(|(row, row_missing)| {
            let (total, count) = row
                .iter()
                .zip(row_missing.iter())
                .filter(|(_, &is_missing)| !is_missing)
                .fold((0., 0usize), |(total, count), (&value, _)| {
                    (total + value, count + 1)
                });
            if count == 0 {
                0.
            } else {
                total / count as f64
            }
        })
        .collect()
}

/// Overwrites every missing cell with its initial guess: zero, or the zonal
/// mean of its row when `initzonal` is set.
pub fn seed_missing(
    values: &mut ArrayViewMut2<'_, f64>,
    missing: &ArrayView2<'_, bool>,
    initzonal: bool,
) {
    let means = if initzonal {
        zonal_means(&values.view(), missing)
    } else {
        Array1::zeros(values.nrows())
    };
    for ((mut row, row_missing), &mean) in values
        .outer_iter_mut()
        .zip(missing.outer_iter())
        .zip(means.iter())
    {
        for (value, &is_missing) in row.iter_mut().zip(row_missing.iter()) {
            if is_missing {
                *value = mean;
            }
        }
    }
}
