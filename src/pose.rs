//! Rigid-body poses and the operations that move magnets around.

use nalgebra::{Point3, UnitQuaternion, Vector3};
use std::fmt;

/// Position and orientation of a rigid body in world coordinates.
///
/// A `Pose` is a value: every operation returns a new pose and the owner
/// replaces its stored pose with the result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Position of the body centre, world frame.
    pub position: Point3<f64>,
    /// Rotation taking body-frame vectors into the world frame.
    pub orientation: UnitQuaternion<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Pose {
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
        }
    }
}

impl Pose {
    pub fn new(position: Point3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Pose {
            position,
            orientation,
        }
    }

    /// Shifts the position by `delta`; orientation is untouched.
    pub fn translated(&self, delta: &Vector3<f64>) -> Self {
        Pose {
            position: self.position + delta,
            orientation: self.orientation,
        }
    }

    /// Applies `rotation` in the world frame about `anchor`.
    ///
    /// The new orientation is `rotation * orientation`, and the position is
    /// carried around the anchor: `anchor + rotation * (position - anchor)`.
    pub fn rotated_about(&self, rotation: &UnitQuaternion<f64>, anchor: &Point3<f64>) -> Self {
        let offset = self.position - anchor;
        Pose {
            position: anchor + rotation * offset,
            orientation: rotation * self.orientation,
        }
    }

    /// Applies `rotation` about the body's own position, leaving it in place.
    pub fn rotated(&self, rotation: &UnitQuaternion<f64>) -> Self {
        Pose {
            position: self.position,
            orientation: rotation * self.orientation,
        }
    }

    /// Maps a world-frame point into the body frame.
    pub fn to_local(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.orientation.inverse_transform_vector(&(point - self.position)))
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rotvec = self.orientation.scaled_axis();
        write!(
            f,
            "pos=({:?},{:?},{:?}) rotvec=({:?},{:?},{:?})",
            self.position.x, self.position.y, self.position.z, rotvec.x, rotvec.y, rotvec.z
        )
    }
}

/// Rotation from a rotation vector: axis scaled by angle in radians.
pub fn rotation_from_rotvec(x: f64, y: f64, z: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_scaled_axis(Vector3::new(x, y, z))
}

/// Moves and rotates objects in 3D Cartesian space.
///
/// `rotate` anchors at the object's own current position; use `rotate_about`
/// for any other centre of rotation.
pub trait Transform {
    fn position(&self) -> Point3<f64>;
    fn orientation(&self) -> UnitQuaternion<f64>;
    fn set_position(&mut self, position: Point3<f64>);
    fn set_orientation(&mut self, orientation: UnitQuaternion<f64>);
    fn translate(&mut self, delta: &Vector3<f64>);
    fn rotate(&mut self, rotation: &UnitQuaternion<f64>);
    fn rotate_about(&mut self, rotation: &UnitQuaternion<f64>, anchor: &Point3<f64>);
}

/// One pose operation in a scripted sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PoseStep {
    Translate(Vector3<f64>),
    Rotate(UnitQuaternion<f64>),
    RotateAbout(UnitQuaternion<f64>, Point3<f64>),
    SetPosition(Point3<f64>),
    SetOrientation(UnitQuaternion<f64>),
}

impl PoseStep {
    pub fn apply<T: Transform + ?Sized>(&self, target: &mut T) {
        match self {
            PoseStep::Translate(delta) => target.translate(delta),
            PoseStep::Rotate(rotation) => target.rotate(rotation),
            PoseStep::RotateAbout(rotation, anchor) => target.rotate_about(rotation, anchor),
            PoseStep::SetPosition(position) => target.set_position(*position),
            PoseStep::SetOrientation(orientation) => target.set_orientation(*orientation),
        }
    }
}
