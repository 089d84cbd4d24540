// gridfill/src/cube/fill_cube.rs

use super::coords::CoordAxis;
use super::cube::Cube;
use super::errors::CubeFillError;
use crate::element::GridElement;
use crate::fill::{fill_with_records, FillOptions, FillOutput};
use log::{info, warn};
use ndarray::Array1;

/// Fills the missing values of `cube` over its X and Y dimensions.
///
/// The X coordinate's `circular` flag decides whether the x axis wraps,
/// overriding `options.cyclic()`. The returned cube holds unmasked data.
pub fn fill_cube<T: GridElement>(
    cube: &Cube<T>,
    eps: f64,
    options: &FillOptions,
) -> Result<Cube<T>, CubeFillError> {
    let (output, _) = fill_resolved(cube, eps, options)?;
    let (grid, _) = output.into_parts();
    Ok(cube.with_data(grid))
}

/// As [`fill_cube`], additionally returning one flag per slice that is `true`
/// where the relaxation did *not* converge.
pub fn fill_cube_full<T: GridElement>(
    cube: &Cube<T>,
    eps: f64,
    options: &FillOptions,
) -> Result<(Cube<T>, Array1<bool>), CubeFillError> {
    let (output, _) = fill_resolved(cube, eps, options)?;
    let not_converged = output.converged().mapv(|converged| !converged);
    let (grid, _) = output.into_parts();
    Ok((cube.with_data(grid), not_converged))
}

/// As [`fill_cube`], but replaces the data of `cube` itself.
pub fn fill_cube_inplace<T: GridElement>(
    cube: &mut Cube<T>,
    eps: f64,
    options: &FillOptions,
) -> Result<(), CubeFillError> {
    let (output, _) = fill_resolved(cube, eps, options)?;
    let (grid, _) = output.into_parts();
    cube.replace_data(grid);
    Ok(())
}

/// Warning text for a batch in which some slices failed to converge.
pub fn non_convergence_message<T>(output: &FillOutput<T>) -> Option<String> {
    let failures = output.not_converged_count();
    if failures == 0 {
        return None;
    }
    Some(format!(
        "gridfill did not converge on {} out of {} slices",
        failures,
        output.nslices()
    ))
}

/// Fills `cube` and returns the output together with the warning logged for
/// it, if any.
fn fill_resolved<T: GridElement>(
    cube: &Cube<T>,
    eps: f64,
    options: &FillOptions,
) -> Result<(FillOutput<T>, Option<String>), CubeFillError> {
    let xdim = cube.coord_dim(CoordAxis::X)?;
    let ydim = cube.coord_dim(CoordAxis::Y)?;
    let cyclic = cube.dim_coords()[xdim].circular();
    info!(
        "Filling cube over x={} (dim {}, cyclic={}) and y={} (dim {})",
        cube.dim_coords()[xdim].name(),
        xdim,
        cyclic,
        cube.dim_coords()[ydim].name(),
        ydim
    );
    let output = fill_with_records(cube.data(), xdim, ydim, eps, &options.with_cyclic(cyclic))?;
    let warning = non_convergence_message(&output);
    if let Some(message) = &warning {
        warn!("{}", message);
    }
    Ok((output, warning))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::{CubeData, DimCoord, DimCoordBuilder};
    use crate::fill::{fill, FillOptionsBuilder, GridFillError};
    use crate::masked::MaskedArray;
    use ndarray::{Array3, ArrayD};

    fn coord(name: &str, circular: bool) -> DimCoord {
        DimCoordBuilder::default()
            .name(name)
            .circular(circular)
            .build()
            .unwrap()
    }

    /// (altitude, latitude, longitude) data with holes.
    fn holey_data() -> Array3<f64> {
        let mut data = Array3::from_shape_fn((3, 6, 8), |(level, lat, lon)| {
            level as f64 + (lat as f64 * 0.3).cos() * (lon as f64 * 0.7).sin()
        });
        for level in 0..3 {
            data[[level, 2, 0]] = f64::NAN;
            data[[level, 3, 7]] = f64::NAN;
            data[[level, 4, 3 + level]] = f64::NAN;
        }
        data
    }

    fn make_cube(cyclic: bool) -> Cube<f64> {
        let data = CubeData::Masked(MaskedArray::masked_invalid(holey_data()));
        let coords = vec![
            coord("altitude", false),
            coord("latitude", false),
            coord("longitude", cyclic),
        ];
        Cube::new(data, coords).unwrap()
    }

    fn options() -> FillOptions {
        FillOptionsBuilder::default()
            .itermax(2000)
            .initzonal(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_matches_plain_fill() {
        for cyclic in [false, true] {
            let cube = make_cube(cyclic);
            let filled = fill_cube(&cube, 1e-4, &options()).unwrap();
            assert!(!filled.data().is_masked());
            assert_eq!(filled.dim_coords(), cube.dim_coords());

            let plain_options = FillOptionsBuilder::default()
                .itermax(2000)
                .initzonal(true)
                .cyclic(cyclic)
                .build()
                .unwrap();
            let grid = MaskedArray::masked_invalid(holey_data());
            let (expected, _) = fill(&grid, 2, 1, 1e-4, &plain_options).unwrap();
            assert_eq!(filled.data(), &CubeData::Plain(expected));
        }
    }

    #[test]
    fn test_circular_coordinate_overrides_options() {
        let cube = make_cube(true);
        let noncyclic = FillOptionsBuilder::default()
            .itermax(2000)
            .initzonal(true)
            .cyclic(false)
            .build()
            .unwrap();
        let filled = fill_cube(&cube, 1e-4, &noncyclic).unwrap();
        let bounded = fill_cube(&make_cube(false), 1e-4, &noncyclic).unwrap();
        assert_ne!(filled.data(), bounded.data());
    }

    #[test]
    fn test_single_slice_cube() {
        let data = holey_data();
        let slice: ArrayD<f64> = data.index_axis(ndarray::Axis(0), 0).to_owned().into_dyn();
        let cube = Cube::new(
            CubeData::Masked(MaskedArray::masked_invalid(slice)),
            vec![coord("latitude", false), coord("longitude", true)],
        )
        .unwrap();
        let (filled, not_converged) = fill_cube_full(&cube, 1e-4, &options()).unwrap();
        assert_eq!(not_converged.len(), 1);
        assert!(!not_converged[0]);
        assert_eq!(filled.data().shape(), &[6, 8]);
    }

    #[test]
    fn test_inplace() {
        let mut cube = make_cube(true);
        let expected = fill_cube(&cube, 1e-4, &options()).unwrap();
        fill_cube_inplace(&mut cube, 1e-4, &options()).unwrap();
        assert!(!cube.data().is_masked());
        assert_eq!(cube, expected);
    }

    #[test]
    fn test_not_masked() {
        let cube = Cube::new(
            CubeData::Plain(holey_data().into_dyn()),
            vec![
                coord("altitude", false),
                coord("latitude", false),
                coord("longitude", true),
            ],
        )
        .unwrap();
        assert!(matches!(
            fill_cube(&cube, 1e-4, &options()),
            Err(CubeFillError::GridFillError(GridFillError::NotMasked))
        ));
    }

    #[test]
    fn test_not_converged() {
        let cube = make_cube(true);
        let short_run = FillOptionsBuilder::default()
            .itermax(5)
            .initzonal(true)
            .build()
            .unwrap();
        let (filled, not_converged) = fill_cube_full(&cube, 1e-4 / 1e7, &short_run).unwrap();
        assert_eq!(not_converged, ndarray::array![true, true, true]);
        assert!(filled.data().shape() == cube.data().shape());

        let (output, warning) = fill_resolved(&cube, 1e-4 / 1e7, &short_run).unwrap();
        assert_eq!(output.not_converged_count(), 3);
        assert_eq!(
            warning.as_deref(),
            Some("gridfill did not converge on 3 out of 3 slices")
        );
        let (_, warning) = fill_resolved(&cube, 1e-4, &options()).unwrap();
        assert_eq!(warning, None);
    }

    #[test]
    fn test_coordinate_resolution_errors() {
        let data = || CubeData::Masked(MaskedArray::masked_invalid(holey_data()));
        assert!(matches!(
            Cube::new(data(), vec![coord("latitude", false)]),
            Err(CubeFillError::CoordinateCountMismatch(3, 1))
        ));

        let no_x = Cube::new(
            data(),
            vec![
                coord("altitude", false),
                coord("latitude", false),
                coord("station", false),
            ],
        )
        .unwrap();
        assert!(matches!(
            fill_cube(&no_x, 1e-4, &options()),
            Err(CubeFillError::CoordinateNotFound(CoordAxis::X))
        ));

        let two_y = Cube::new(
            data(),
            vec![
                coord("grid_latitude", false),
                coord("latitude", false),
                coord("longitude", false),
            ],
        )
        .unwrap();
        assert!(matches!(
            two_y.coord_dim(CoordAxis::Y),
            Err(CubeFillError::DuplicateCoordinate(CoordAxis::Y))
        ));
        assert_eq!(two_y.coord(CoordAxis::X).unwrap().name(), "longitude");
    }
}
