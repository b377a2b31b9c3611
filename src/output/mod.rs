//! Write generated datasets to disk.

use nalgebra::{Point3, Vector3};

pub mod matrix_market;

pub use matrix_market::{read_matrix, write_fields, write_matrix, write_points};

/// A sample that is written as one three-column row of an artifact.
pub trait MatrixRow {
    fn row(&self) -> [f64; 3];
}

impl MatrixRow for Point3<f64> {
    fn row(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl MatrixRow for Vector3<f64> {
    fn row(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl MatrixRow for [f64; 3] {
    fn row(&self) -> [f64; 3] {
        *self
    }
}
