//! Matrix Market coordinate files.
//!
//! Each artifact is an `N x 3` real matrix written as
//!
//! ```text
//! %%MatrixMarket matrix coordinate real general
//! %
//! <rows> <cols> <entries>
//! <row> <col> <value>
//! ```
//!
//! with 1-indexed coordinates in row-major order. Every entry is listed, zeros
//! included, and values carry 17 significant digits so that reading a file
//! back reproduces the written `f64` exactly. Files are read back through
//! `nalgebra_sparse`.

use super::MatrixRow;
use crate::error::{GoldenError, Result};
use nalgebra::{DMatrix, Point3, Vector3};
use std::fs::{self, File};
use nalgebra_sparse::io::load_coo_from_matrix_market_str;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const HEADER: &str = "%%MatrixMarket matrix coordinate real general";

/// Number of columns of every artifact.
pub const COLUMNS: usize = 3;

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| GoldenError::io(parent, e))?;
        }
    }
    Ok(())
}

/// Writes `rows` to `path`, replacing any existing file.
pub fn write_matrix<R: MatrixRow>(path: &Path, rows: &[R]) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|e| GoldenError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_rows(&mut writer, rows).map_err(|e| GoldenError::io(path, e))?;
    writer.flush().map_err(|e| GoldenError::io(path, e))
}

/// Writes sample points, one `(x, y, z)` row each.
pub fn write_points(path: &Path, points: &[Point3<f64>]) -> Result<()> {
    write_matrix(path, points)
}

/// Writes field samples, one `(Bx, By, Bz)` row each.
pub fn write_fields(path: &Path, fields: &[Vector3<f64>]) -> Result<()> {
    write_matrix(path, fields)
}

fn write_rows<W: Write, R: MatrixRow>(writer: &mut W, rows: &[R]) -> std::io::Result<()> {
    writeln!(writer, "{}", HEADER)?;
    writeln!(writer, "%")?;
    writeln!(writer, "{} {} {}", rows.len(), COLUMNS, rows.len() * COLUMNS)?;
    for (i, row) in rows.iter().enumerate() {
        for (j, value) in row.row().iter().enumerate() {
            writeln!(writer, "{} {} {:.16e}", i + 1, j + 1, value)?;
        }
    }
    Ok(())
}

/// Reads a coordinate matrix written by [write_matrix] (or any other
/// real general coordinate file) with the same loader the consuming test
/// suite uses. Entries that are not listed are zero.
pub fn read_matrix(path: &Path) -> Result<DMatrix<f64>> {
    let contents = fs::read_to_string(path).map_err(|e| GoldenError::io(path, e))?;
    let coo = load_coo_from_matrix_market_str::<f64>(&contents).map_err(|e| GoldenError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(DMatrix::from(&coo))
}
