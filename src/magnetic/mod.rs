//! Magnets, collections of magnets, and their fields.

use crate::error::Result;
use crate::oracle::FieldOracle;
use nalgebra::{Point3, Vector3};

pub mod collection;
pub mod magnet;
pub mod source;

pub use collection::Collection;
pub use magnet::Magnet;
pub use source::Source;

/// Anything that produces a magnetic field.
pub trait FieldSource {
    /// Calculates the B-field at each of `points`, in units of Tesla.
    ///
    /// The result has one entry per point, in the same order. An empty slice of
    /// points gives an empty result.
    fn get_field(&self, oracle: &dyn FieldOracle, points: &[Point3<f64>])
        -> Result<Vec<Vector3<f64>>>;
}

/// Adds `contribution` to `total` point by point.
pub(crate) fn superpose(total: &mut [Vector3<f64>], contribution: &[Vector3<f64>]) {
    for (sum, field) in total.iter_mut().zip(contribution.iter()) {
        *sum += field;
    }
}
