//! Magnet geometries.

use crate::error::{GoldenError, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;

pub trait Volume {
    /// Whether a point, expressed in the body frame, lies inside the volume.
    fn contains(&self, local_point: &Point3<f64>) -> bool;
}

/// A solid cylinder whose symmetry axis is the body-frame z axis.
///
/// The body-frame origin sits at the centre of the cylinder.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cylinder {
    /// Diameter of the cylinder, in m.
    diameter: f64,
    /// Height of the cylinder along its axis, in m.
    height: f64,
}

impl Cylinder {
    pub fn new(diameter: f64, height: f64) -> Result<Cylinder> {
        if !(diameter.is_finite() && diameter > 0.0) {
            return Err(GoldenError::InvalidArgument(format!(
                "cylinder diameter must be positive, got {}",
                diameter
            )));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(GoldenError::InvalidArgument(format!(
                "cylinder height must be positive, got {}",
                height
            )));
        }
        Ok(Cylinder { diameter, height })
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Volume for Cylinder {
    fn contains(&self, local_point: &Point3<f64>) -> bool {
        if f64::abs(local_point.z) > self.height / 2.0 {
            return false;
        }
        local_point.x.hypot(local_point.y) <= self.radius()
    }
}

impl fmt::Display for Cylinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cylinder(d={:?}, h={:?})", self.diameter, self.height)
    }
}
