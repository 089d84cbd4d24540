// gridfill/src/io.rs
//
// CSV reading and writing of single 2-D grids. One grid row per line, no
// header. Empty cells, non-finite numbers and an optional sentinel token are
// read as missing.

use crate::masked::{MaskedArray, MaskedArrayError};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::debug;
use ndarray::{Array2, ArrayView2, ShapeError};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

pub fn read_csv_grid<R: Read>(
    reader: R,
    missing_token: Option<&str>,
) -> Result<MaskedArray<f64>, GridIoError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(reader);
    let mut values = Vec::new();
    let mut mask = Vec::new();
    let mut nrows = 0;
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        for (col, field) in record.iter().enumerate() {
            match parse_cell(field, missing_token) {
                Some(Ok(value)) => {
                    values.push(value);
                    mask.push(false);
                }
                Some(Err(_)) => {
                    return Err(GridIoError::ParseError {
                        row: row + 1,
                        col: col + 1,
                        value: field.to_string(),
                    })
                }
                None => {
                    values.push(f64::NAN);
                    mask.push(true);
                }
            }
        }
        nrows += 1;
    }
    if nrows == 0 {
        return Err(GridIoError::EmptyGrid);
    }
    let ncols = values.len() / nrows;
    let missing = mask.iter().filter(|&&is_missing| is_missing).count();
    debug!(
        "Read a {}x{} grid with {} missing value(s)",
        nrows, ncols, missing
    );
    let data = Array2::from_shape_vec((nrows, ncols), values)?;
    let mask = Array2::from_shape_vec((nrows, ncols), mask)?;
    Ok(MaskedArray::new(data, mask)?)
}

/// `None` for a missing cell, otherwise the parse result.
fn parse_cell(
    field: &str,
    missing_token: Option<&str>,
) -> Option<Result<f64, std::num::ParseFloatError>> {
    if field.is_empty() || missing_token == Some(field) {
        return None;
    }
    match field.parse::<f64>() {
        Ok(value) if !value.is_finite() => None,
        parsed => Some(parsed),
    }
}

pub fn read_csv_grid_from_path(
    path: &Path,
    missing_token: Option<&str>,
) -> Result<MaskedArray<f64>, GridIoError> {
    let file = File::open(path)?;
    read_csv_grid(file, missing_token)
}

pub fn write_csv_grid<W: Write>(writer: W, grid: &ArrayView2<'_, f64>) -> Result<(), GridIoError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    for row in grid.outer_iter() {
        writer.write_record(row.iter().map(|value| value.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv_grid_to_path(path: &Path, grid: &ArrayView2<'_, f64>) -> Result<(), GridIoError> {
    let file = File::create(path)?;
    write_csv_grid(file, grid)
}

#[derive(Error, Debug)]
pub enum GridIoError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Could not parse {value:?} at row {row}, column {col} as a number")]
    ParseError {
        row: usize,
        col: usize,
        value: String,
    },
    #[error("Grid file contains no rows")]
    EmptyGrid,
    #[error(transparent)]
    NDArrayShapeError(#[from] ShapeError),
    #[error(transparent)]
    MaskedArrayError(#[from] MaskedArrayError),
}
