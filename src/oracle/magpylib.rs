//! Field evaluation by magpylib, called in-process through `pyo3`.
//!
//! Needs a Python interpreter with `magpylib`, `scipy` and `numpy` installed.

use super::FieldOracle;
use crate::error::{GoldenError, Result};
use crate::pose::Pose;
use crate::shapes::Cylinder;
use nalgebra::{Point3, Vector3};
use pyo3::prelude::*;
use pyo3::types::PyModule;

fn python_error(e: PyErr) -> GoldenError {
    GoldenError::Oracle(format!("magpylib: {}", e))
}

/// Evaluates `magpylib.magnet.Cylinder(...).getB(points)`.
#[derive(Clone, Copy, Debug)]
pub struct MagpylibOracle {
    _private: (),
}

impl MagpylibOracle {
    /// Starts the interpreter and checks that the required modules import.
    pub fn new() -> Result<Self> {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| -> PyResult<()> {
            for module in ["magpylib", "scipy.spatial.transform", "numpy"] {
                PyModule::import_bound(py, module)?;
            }
            Ok(())
        })
        .map_err(python_error)?;
        Ok(MagpylibOracle { _private: () })
    }
}

impl FieldOracle for MagpylibOracle {
    fn evaluate(
        &self,
        shape: &Cylinder,
        polarization: &Vector3<f64>,
        pose: &Pose,
        points: &[Point3<f64>],
    ) -> Result<Vec<Vector3<f64>>> {
        if points.is_empty() {
            return Ok(Vec::new());
        }
        // magpylib takes the polarization in the magnet's own frame
        let local_polarization = pose.orientation.inverse_transform_vector(polarization);
        let q = pose.orientation.quaternion();
        let observers: Vec<[f64; 3]> = points.iter().map(|p| [p.x, p.y, p.z]).collect();

        let rows: Vec<[f64; 3]> = Python::with_gil(|py| -> PyResult<Vec<[f64; 3]>> {
            // scipy quaternions are scalar-last
            let orientation = PyModule::import_bound(py, "scipy.spatial.transform")?
                .getattr("Rotation")?
                .call_method1("from_quat", ([q.i, q.j, q.k, q.w],))?;
            let magnet = PyModule::import_bound(py, "magpylib.magnet")?
                .getattr("Cylinder")?
                .call1((
                    [pose.position.x, pose.position.y, pose.position.z],
                    orientation,
                    [shape.diameter(), shape.height()],
                    [local_polarization.x, local_polarization.y, local_polarization.z],
                ))?;
            let field = magnet.call_method1("getB", (observers,))?;
            // a single observer comes back squeezed to shape (3,)
            PyModule::import_bound(py, "numpy")?
                .getattr("reshape")?
                .call1((field, (-1, 3)))?
                .call_method0("tolist")?
                .extract()
        })
        .map_err(python_error)?;

        if rows.len() != points.len() {
            return Err(GoldenError::Oracle(format!(
                "magpylib returned {} field samples for {} points",
                rows.len(),
                points.len()
            )));
        }
        Ok(rows
            .into_iter()
            .map(|[bx, by, bz]| Vector3::new(bx, by, bz))
            .collect())
    }
}
