//! A single permanent magnet.

use super::FieldSource;
use crate::error::Result;
use crate::oracle::FieldOracle;
use crate::pose::{Pose, Transform};
use crate::shapes::Cylinder;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use std::fmt;

/// A uniformly polarized cylindrical magnet.
#[derive(Clone, Debug, PartialEq)]
pub struct Magnet {
    shape: Cylinder,
    /// Polarization in the magnet's body frame, in units of Tesla.
    polarization: Vector3<f64>,
    pose: Pose,
}

impl Magnet {
    pub fn new(
        shape: Cylinder,
        polarization: Vector3<f64>,
        position: Point3<f64>,
        orientation: UnitQuaternion<f64>,
    ) -> Self {
        Magnet {
            shape,
            polarization,
            pose: Pose::new(position, orientation),
        }
    }

    /// Creates a cylindrical magnet from its diameter and height, in m.
    ///
    /// Fails with `InvalidArgument` if either dimension is not positive.
    pub fn cylinder(
        diameter: f64,
        height: f64,
        polarization: Vector3<f64>,
        position: Point3<f64>,
        orientation: UnitQuaternion<f64>,
    ) -> Result<Self> {
        Ok(Magnet::new(
            Cylinder::new(diameter, height)?,
            polarization,
            position,
            orientation,
        ))
    }

    pub fn shape(&self) -> &Cylinder {
        &self.shape
    }

    pub fn polarization(&self) -> Vector3<f64> {
        self.polarization
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Polarization rotated into the world frame by the current orientation.
    pub fn world_polarization(&self) -> Vector3<f64> {
        self.pose.orientation * self.polarization
    }
}

impl Transform for Magnet {
    fn position(&self) -> Point3<f64> {
        self.pose.position
    }

    fn orientation(&self) -> UnitQuaternion<f64> {
        self.pose.orientation
    }

    fn set_position(&mut self, position: Point3<f64>) {
        self.pose = Pose::new(position, self.pose.orientation);
    }

    fn set_orientation(&mut self, orientation: UnitQuaternion<f64>) {
        self.pose = Pose::new(self.pose.position, orientation);
    }

    fn translate(&mut self, delta: &Vector3<f64>) {
        self.pose = self.pose.translated(delta);
    }

    fn rotate(&mut self, rotation: &UnitQuaternion<f64>) {
        self.pose = self.pose.rotated(rotation);
    }

    fn rotate_about(&mut self, rotation: &UnitQuaternion<f64>, anchor: &Point3<f64>) {
        self.pose = self.pose.rotated_about(rotation, anchor);
    }
}

impl FieldSource for Magnet {
    fn get_field(
        &self,
        oracle: &dyn FieldOracle,
        points: &[Point3<f64>],
    ) -> Result<Vec<Vector3<f64>>> {
        if points.is_empty() {
            return Ok(Vec::new());
        }
        oracle.evaluate(&self.shape, &self.world_polarization(), &self.pose, points)
    }
}

impl fmt::Display for Magnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pol=({:?},{:?},{:?}) {}",
            self.shape, self.polarization.x, self.polarization.y, self.polarization.z, self.pose
        )
    }
}
