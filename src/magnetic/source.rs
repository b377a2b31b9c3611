//! A field source that is either a single magnet or a collection.

use super::{Collection, FieldSource, Magnet};
use crate::error::Result;
use crate::oracle::FieldOracle;
use crate::pose::Transform;
use nalgebra::{Point3, UnitQuaternion, Vector3};

/// A single magnet is evaluated directly; a collection by superposition.
/// Both share the same pose operations.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    Magnet(Magnet),
    Collection(Collection),
}

impl From<Magnet> for Source {
    fn from(magnet: Magnet) -> Self {
        Source::Magnet(magnet)
    }
}

impl From<Collection> for Source {
    fn from(collection: Collection) -> Self {
        Source::Collection(collection)
    }
}

impl Source {
    fn as_transform(&self) -> &dyn Transform {
        match self {
            Source::Magnet(magnet) => magnet,
            Source::Collection(collection) => collection,
        }
    }

    fn as_transform_mut(&mut self) -> &mut dyn Transform {
        match self {
            Source::Magnet(magnet) => magnet,
            Source::Collection(collection) => collection,
        }
    }

    /// The magnets making up this source, in order.
    pub fn magnets(&self) -> &[Magnet] {
        match self {
            Source::Magnet(magnet) => std::slice::from_ref(magnet),
            Source::Collection(collection) => collection.magnets(),
        }
    }
}

impl Transform for Source {
    fn position(&self) -> Point3<f64> {
        self.as_transform().position()
    }

    fn orientation(&self) -> UnitQuaternion<f64> {
        self.as_transform().orientation()
    }

    fn set_position(&mut self, position: Point3<f64>) {
        self.as_transform_mut().set_position(position)
    }

    fn set_orientation(&mut self, orientation: UnitQuaternion<f64>) {
        self.as_transform_mut().set_orientation(orientation)
    }

    fn translate(&mut self, delta: &Vector3<f64>) {
        self.as_transform_mut().translate(delta)
    }

    fn rotate(&mut self, rotation: &UnitQuaternion<f64>) {
        self.as_transform_mut().rotate(rotation)
    }

    fn rotate_about(&mut self, rotation: &UnitQuaternion<f64>, anchor: &Point3<f64>) {
        self.as_transform_mut().rotate_about(rotation, anchor)
    }
}

impl FieldSource for Source {
    fn get_field(
        &self,
        oracle: &dyn FieldOracle,
        points: &[Point3<f64>],
    ) -> Result<Vec<Vector3<f64>>> {
        match self {
            Source::Magnet(magnet) => magnet.get_field(oracle, points),
            Source::Collection(collection) => collection.get_field(oracle, points),
        }
    }
}
