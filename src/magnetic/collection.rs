//! Groups of magnets that move as one rigid body.

use super::{superpose, FieldSource, Magnet};
use crate::error::Result;
use crate::oracle::FieldOracle;
use crate::pose::{Pose, Transform};
use nalgebra::{Point3, UnitQuaternion, Vector3};

/// An ordered group of magnets sharing a group pose.
///
/// Group pose changes are pushed down to every member as they happen, so the
/// stored member poses always reflect the full history of group operations.
/// The field of a collection is the superposition of its members' fields.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Collection {
    pose: Pose,
    magnets: Vec<Magnet>,
}

impl Collection {
    /// Creates a collection at the origin with identity orientation. Members keep
    /// the absolute poses they were given.
    pub fn new(magnets: Vec<Magnet>) -> Self {
        Collection {
            pose: Pose::default(),
            magnets,
        }
    }

    pub fn push(&mut self, magnet: Magnet) {
        self.magnets.push(magnet);
    }

    pub fn magnets(&self) -> &[Magnet] {
        &self.magnets
    }

    pub fn len(&self) -> usize {
        self.magnets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnets.is_empty()
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }
}

impl Transform for Collection {
    fn position(&self) -> Point3<f64> {
        self.pose.position
    }

    fn orientation(&self) -> UnitQuaternion<f64> {
        self.pose.orientation
    }

    /// Moves the group so that its position becomes `position`, carrying every
    /// member along by the same displacement.
    fn set_position(&mut self, position: Point3<f64>) {
        let delta = position - self.pose.position;
        for magnet in self.magnets.iter_mut() {
            magnet.translate(&delta);
        }
        self.pose = Pose::new(position, self.pose.orientation);
    }

    /// Rotates the group to `orientation`. Members turn rigidly about the
    /// current group position by `orientation * old_orientation^-1`.
    fn set_orientation(&mut self, orientation: UnitQuaternion<f64>) {
        let delta = orientation * self.pose.orientation.inverse();
        let anchor = self.pose.position;
        for magnet in self.magnets.iter_mut() {
            magnet.rotate_about(&delta, &anchor);
        }
        self.pose = Pose::new(self.pose.position, orientation);
    }

    fn translate(&mut self, delta: &Vector3<f64>) {
        for magnet in self.magnets.iter_mut() {
            magnet.translate(delta);
        }
        self.pose = self.pose.translated(delta);
    }

    fn rotate(&mut self, rotation: &UnitQuaternion<f64>) {
        let anchor = self.pose.position;
        for magnet in self.magnets.iter_mut() {
            magnet.rotate_about(rotation, &anchor);
        }
        self.pose = self.pose.rotated(rotation);
    }

    fn rotate_about(&mut self, rotation: &UnitQuaternion<f64>, anchor: &Point3<f64>) {
        for magnet in self.magnets.iter_mut() {
            magnet.rotate_about(rotation, anchor);
        }
        self.pose = self.pose.rotated_about(rotation, anchor);
    }
}

impl FieldSource for Collection {
    fn get_field(
        &self,
        oracle: &dyn FieldOracle,
        points: &[Point3<f64>],
    ) -> Result<Vec<Vector3<f64>>> {
        let mut total = vec![Vector3::zeros(); points.len()];
        for magnet in self.magnets.iter() {
            superpose(&mut total, &magnet.get_field(oracle, points)?);
        }
        Ok(total)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::constant::PI;
    use crate::grid::{build_grid, GridSpec};
    use crate::oracle::AnalyticOracle;
    use crate::pose::rotation_from_rotvec;
    use assert_approx_eq::assert_approx_eq;

    fn three_magnets() -> Collection {
        Collection::new(vec![
            Magnet::cylinder(
                0.3,
                0.4,
                Vector3::new(1.0, 2.0, 3.0),
                Point3::new(0.9, 0.0, -0.6),
                rotation_from_rotvec(1.2, 1.2, 1.2),
            )
            .unwrap(),
            Magnet::cylinder(
                0.4,
                0.5,
                Vector3::new(0.4, 0.5, 0.6),
                Point3::new(-0.45, 0.8, -0.6),
                rotation_from_rotvec(1.5, 0.4, 0.4),
            )
            .unwrap(),
            Magnet::cylinder(
                0.5,
                0.6,
                Vector3::new(0.9, 0.8, 0.6),
                Point3::new(-0.45, -0.8, -0.6),
                rotation_from_rotvec(1.5, -0.4, -0.4),
            )
            .unwrap(),
        ])
    }

    fn assert_point_close(a: &Point3<f64>, b: &Point3<f64>) {
        assert_approx_eq!((a - b).norm(), 0.0, 1e-12);
    }

    #[test]
    fn test_new_collection_sits_at_origin() {
        let collection = three_magnets();
        assert_eq!(collection.position(), Point3::origin());
        assert_eq!(collection.orientation(), UnitQuaternion::identity());
        assert_eq!(collection.magnets()[1].position(), Point3::new(-0.45, 0.8, -0.6));
    }

    #[test]
    fn test_set_position_is_rigid() {
        let mut collection = three_magnets();
        let before: Vec<Point3<f64>> = collection.magnets().iter().map(|m| m.position()).collect();
        collection.set_position(Point3::new(0.1, 0.15, 0.2));
        let after: Vec<Point3<f64>> = collection.magnets().iter().map(|m| m.position()).collect();

        for i in 0..before.len() {
            for j in 0..before.len() {
                let d_before = before[i] - before[j];
                let d_after = after[i] - after[j];
                assert_approx_eq!((d_before - d_after).norm(), 0.0, 1e-12);
            }
        }
        assert_point_close(&after[0], &Point3::new(1.0, 0.15, -0.4));
        assert_eq!(collection.position(), Point3::new(0.1, 0.15, 0.2));
    }

    #[test]
    fn test_set_orientation_rotates_about_group_position() {
        let mut collection = three_magnets();
        collection.set_position(Point3::new(1.0, 0.0, 0.0));
        let before: Vec<Point3<f64>> = collection.magnets().iter().map(|m| m.position()).collect();
        let rotation = rotation_from_rotvec(0.0, 0.0, PI / 2.0);
        collection.set_orientation(rotation);

        let anchor = Point3::new(1.0, 0.0, 0.0);
        for (magnet, old) in collection.magnets().iter().zip(before.iter()) {
            let expected = anchor + rotation * (old - anchor);
            assert_point_close(&magnet.position(), &expected);
            // distance to the group position is preserved
            assert_approx_eq!(
                (magnet.position() - anchor).norm(),
                (old - anchor).norm(),
                1e-12
            );
        }
        assert_eq!(collection.orientation(), rotation);
    }

    #[test]
    fn test_set_orientation_applies_delta_from_current_orientation() {
        let mut collection = three_magnets();
        let first = rotation_from_rotvec(PI / 3.0, PI / 4.0, PI / 5.0);
        let second = rotation_from_rotvec(-0.2, 0.9, 0.1);
        let initial = collection.magnets()[0].orientation();

        collection.set_orientation(first);
        collection.set_orientation(second);
        // the net member rotation is `second`, not `second * first`
        let net = collection.magnets()[0].orientation() * initial.inverse();
        assert_approx_eq!(net.angle_to(&second), 0.0, 1e-7);
    }

    /// Incremental updates must agree with replaying every group delta, in
    /// order, on the initial member poses.
    #[test]
    fn test_incremental_updates_match_replayed_deltas() {
        let mut collection = three_magnets();
        let initial: Vec<Pose> = collection.magnets().iter().map(|m| *m.pose()).collect();

        let p1 = Point3::new(0.1, 0.15, 0.2);
        let q1 = rotation_from_rotvec(PI / 3.0, PI / 4.0, PI / 5.0);
        let p2 = Point3::new(-0.3, 0.0, 0.5);
        let q2 = rotation_from_rotvec(0.1, -0.7, 0.3);

        collection.set_position(p1);
        collection.set_orientation(q1);
        collection.set_position(p2);
        collection.set_orientation(q2);

        for (magnet, pose) in collection.magnets().iter().zip(initial.iter()) {
            let replayed = pose
                .translated(&(p1 - Point3::origin()))
                .rotated_about(&q1, &p1)
                .translated(&(p2 - p1))
                .rotated_about(&(q2 * q1.inverse()), &p2);
            assert_point_close(&magnet.position(), &replayed.position);
            assert_approx_eq!(magnet.orientation().angle_to(&replayed.orientation), 0.0, 1e-7);
        }
    }

    #[test]
    fn test_translate_and_rotate_keep_group_pose_in_step() {
        let mut collection = three_magnets();
        collection.translate(&Vector3::new(0.5, 0.0, 0.0));
        collection.rotate(&rotation_from_rotvec(0.0, PI, 0.0));
        assert_point_close(&collection.position(), &Point3::new(0.5, 0.0, 0.0));

        collection.rotate_about(&rotation_from_rotvec(0.0, 0.0, PI), &Point3::origin());
        assert_point_close(&collection.position(), &Point3::new(-0.5, 0.0, 0.0));
    }

    #[test]
    fn test_field_is_superposition_of_members() {
        let oracle = AnalyticOracle;
        let mut collection = three_magnets();
        collection.set_position(Point3::new(0.1, 0.15, 0.2));
        collection.set_orientation(rotation_from_rotvec(PI / 3.0, PI / 4.0, PI / 5.0));
        let points = build_grid(&GridSpec::cube(-2.0, 2.0, 4)).unwrap();

        let total = collection.get_field(&oracle, &points).unwrap();
        let mut expected = vec![Vector3::zeros(); points.len()];
        for magnet in collection.magnets() {
            let field = magnet.get_field(&oracle, &points).unwrap();
            for (sum, b) in expected.iter_mut().zip(field.iter()) {
                *sum += b;
            }
        }
        assert_eq!(total.len(), points.len());
        for (a, b) in total.iter().zip(expected.iter()) {
            assert_approx_eq!((a - b).norm(), 0.0, 1e-15);
        }
    }

    #[test]
    fn test_empty_collection_has_zero_field() {
        let collection = Collection::default();
        let points = [Point3::new(1.0, 2.0, 3.0), Point3::new(0.0, 0.0, 0.0)];
        let field = collection.get_field(&AnalyticOracle, &points).unwrap();
        assert_eq!(field, vec![Vector3::zeros(); 2]);
    }
}
