//! Field evaluation.
//!
//! Magnets never compute their own field: they hand their geometry and pose
//! to a [FieldOracle], whose output is taken as ground truth.

use crate::error::{GoldenError, Result};
use crate::pose::Pose;
use crate::shapes::Cylinder;
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

pub mod cylinder;
pub mod elliptic;
#[cfg(feature = "magpylib")]
pub mod magpylib;

#[cfg(feature = "magpylib")]
pub use self::magpylib::MagpylibOracle;

pub trait FieldOracle {
    /// Calculates the B-field of a cylindrical magnet at each point.
    ///
    /// # Arguments
    ///
    /// `shape`: magnet geometry
    ///
    /// `polarization`: magnet polarization rotated into the world frame, T
    ///
    /// `pose`: position and orientation of the magnet
    ///
    /// `points`: field points in the world frame, m
    ///
    /// Returns one world-frame field vector per point, in the order of `points`.
    fn evaluate(
        &self,
        shape: &Cylinder,
        polarization: &Vector3<f64>,
        pose: &Pose,
        points: &[Point3<f64>],
    ) -> Result<Vec<Vector3<f64>>>;
}

/// Closed-form and elliptic-integral field of a solid cylinder.
///
/// Works offline. It follows the same formulas as the engine the datasets
/// validate, so build with the `magpylib` feature for independent datasets.
///
/// Points are evaluated in parallel; each result depends on its point only, so
/// the output is identical to a sequential run.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnalyticOracle;

impl FieldOracle for AnalyticOracle {
    fn evaluate(
        &self,
        shape: &Cylinder,
        polarization: &Vector3<f64>,
        pose: &Pose,
        points: &[Point3<f64>],
    ) -> Result<Vec<Vector3<f64>>> {
        let local_polarization = pose.orientation.inverse_transform_vector(polarization);
        points
            .par_iter()
            .map(|point| {
                let local_point = pose.to_local(point);
                let local_b = cylinder::local_field(&local_point, shape, &local_polarization)?;
                let b = pose.orientation * local_b;
                if !b.iter().all(|c| c.is_finite()) {
                    return Err(GoldenError::Oracle(format!(
                        "non-finite field ({}, {}, {}) at ({}, {}, {})",
                        b.x, b.y, b.z, point.x, point.y, point.z
                    )));
                }
                Ok(b)
            })
            .collect()
    }
}
