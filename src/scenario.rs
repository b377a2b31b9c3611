//! The fixed set of reference scenarios and the driver that writes them.
//!
//! Every literal in this module is part of the dataset contract: the consuming
//! test suite rebuilds the same magnets from the same numbers and compares its
//! fields against the artifacts written here.

use crate::configuration::{GeneratorConfiguration, SuiteName};
use crate::constant::PI;
use crate::error::Result;
use crate::grid::{build_grid, GridSpec};
use crate::magnetic::{Collection, FieldSource, Magnet, Source};
use crate::oracle::FieldOracle;
use crate::output::{write_fields, write_points};
use crate::pose::{rotation_from_rotvec, PoseStep};
use nalgebra::{Point3, UnitQuaternion, Vector3};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const ARTIFACT_EXTENSION: &str = "mtx";

/// A named configuration: how to build the source, and the pose operations to
/// replay on it before the field is evaluated.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub artifact: &'static str,
    pub build: fn() -> Result<Source>,
    pub steps: Vec<PoseStep>,
}

impl Scenario {
    fn new(artifact: &'static str, build: fn() -> Result<Source>, steps: Vec<PoseStep>) -> Self {
        Scenario {
            artifact,
            build,
            steps,
        }
    }

    /// Builds a fresh source and applies the scenario's steps in order.
    pub fn prepare(&self) -> Result<Source> {
        let mut source = (self.build)()?;
        for step in self.steps.iter() {
            step.apply(&mut source);
        }
        Ok(source)
    }

    pub fn evaluate(
        &self,
        oracle: &dyn FieldOracle,
        points: &[Point3<f64>],
    ) -> Result<Vec<Vector3<f64>>> {
        let source = self.prepare()?;
        for (index, magnet) in source.magnets().iter().enumerate() {
            debug!(scenario = self.artifact, index, "{}", magnet);
        }
        source.get_field(oracle, points)
    }
}

/// Scenarios sharing one sample grid.
#[derive(Clone, Debug)]
pub struct Suite {
    pub name: SuiteName,
    pub grid: GridSpec,
    pub points_artifact: &'static str,
    pub scenarios: Vec<Scenario>,
}

/// What a suite run wrote.
#[derive(Clone, Debug, PartialEq)]
pub struct SuiteReport {
    pub suite: SuiteName,
    pub points: usize,
    /// Every file written, points first, in the order they were written.
    pub artifacts: Vec<PathBuf>,
}

pub fn artifact_path(output_dir: &Path, artifact: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", artifact, ARTIFACT_EXTENSION))
}

fn reference_rotation() -> UnitQuaternion<f64> {
    rotation_from_rotvec(PI / 7.0, PI / 6.0, PI / 5.0)
}

fn reference_cylinder() -> Result<Source> {
    Ok(Magnet::cylinder(
        1.0,
        2.0,
        Vector3::new(1.0, 2.0, 3.0),
        Point3::new(0.1, 0.2, 0.3),
        reference_rotation(),
    )?
    .into())
}

fn small_cylinder() -> Result<Source> {
    Ok(Magnet::cylinder(
        28e-3,
        10e-3,
        Vector3::new(0.15, 0.15, 0.3),
        Point3::new(0.03, 0.02, 0.01),
        rotation_from_rotvec(PI / 8.0, PI / 7.0, PI / 6.0),
    )?
    .into())
}

fn centred_cylinder(polarization: Vector3<f64>) -> Result<Source> {
    Ok(Magnet::cylinder(
        1.0,
        2.0,
        polarization,
        Point3::origin(),
        UnitQuaternion::identity(),
    )?
    .into())
}

fn axial_cylinder() -> Result<Source> {
    centred_cylinder(Vector3::new(0.0, 0.0, 3.0))
}

fn diametric_cylinder() -> Result<Source> {
    centred_cylinder(Vector3::new(0.0, 1.0, 0.0))
}

fn oblique_diametric_cylinder() -> Result<Source> {
    centred_cylinder(Vector3::new(2.0, 1.0, 0.0))
}

/// Three cylinders spaced around the z axis, 6 mm below the origin.
fn three_cylinders() -> Result<Source> {
    Ok(Collection::new(vec![
        Magnet::cylinder(
            3e-3,
            4e-3,
            Vector3::new(1.0, 2.0, 3.0),
            Point3::new(0.009389999999999999, 0.0, -0.006),
            rotation_from_rotvec(1.2091995761561452, 1.209199576156145, 1.2091995761561452),
        )?,
        Magnet::cylinder(
            4e-3,
            5e-3,
            Vector3::new(0.4, 0.5, 0.6),
            Point3::new(-0.004694999999999998, 0.008131978541535878, -0.006),
            rotation_from_rotvec(1.5315599088338596, 0.41038024073191587, 0.4103802407319159),
        )?,
        Magnet::cylinder(
            5e-3,
            6e-3,
            Vector3::new(0.9, 0.8, 0.6),
            Point3::new(-0.004695000000000004, -0.008131978541535875, -0.006),
            rotation_from_rotvec(1.5315599088338594, -0.410380240731917, -0.41038024073191703),
        )?,
    ])
    .into())
}

/// Single cylinders on a 20x20x20 grid over `[-5, 5]^3`.
pub fn cylinder_suite() -> Suite {
    Suite {
        name: SuiteName::Cylinder,
        grid: GridSpec::cube(-5.0, 5.0, 20),
        points_artifact: "cylinder-points",
        scenarios: vec![
            Scenario::new("cylinder-result", reference_cylinder, vec![]),
            Scenario::new("cylinder-small-result", small_cylinder, vec![]),
            Scenario::new(
                "cylinder-translate-result",
                reference_cylinder,
                vec![PoseStep::Translate(Vector3::new(-0.1, -0.2, -0.3))],
            ),
            Scenario::new(
                "cylinder-rotate-result",
                reference_cylinder,
                vec![PoseStep::Rotate(reference_rotation().inverse())],
            ),
            Scenario::new(
                "cylinder-rotate-translate-result",
                reference_cylinder,
                vec![
                    PoseStep::Translate(Vector3::new(3.0, 2.0, 1.0)),
                    PoseStep::Rotate(rotation_from_rotvec(PI / 3.0, PI / 2.0, PI)),
                ],
            ),
            Scenario::new("cylinder-axial-result", axial_cylinder, vec![]),
            Scenario::new("cylinder-diametric-result", diametric_cylinder, vec![]),
            Scenario::new(
                "cylinder-diametric-result-2",
                oblique_diametric_cylinder,
                vec![],
            ),
        ],
    }
}

/// A three-magnet collection on a 10x10x10 grid over `[-1, 1]^3`.
///
/// The step lists replay one collection being moved, reset and rotated in
/// sequence, so every fresh collection reaches bit-identical member poses.
pub fn collection_suite() -> Suite {
    let offset = Point3::new(0.1, 0.15, 0.2);
    let rotate = vec![
        PoseStep::SetPosition(offset),
        PoseStep::SetPosition(Point3::origin()),
        PoseStep::SetOrientation(rotation_from_rotvec(PI / 3.0, PI / 4.0, PI / 5.0)),
    ];
    let mut translate_rotate = rotate.clone();
    translate_rotate.push(PoseStep::SetPosition(offset));

    Suite {
        name: SuiteName::Collection,
        grid: GridSpec::cube(-1.0, 1.0, 10),
        points_artifact: "single-collection-points",
        scenarios: vec![
            Scenario::new("cylinder-collection-result", three_cylinders, vec![]),
            Scenario::new(
                "cylinder-collection-translate-result",
                three_cylinders,
                vec![PoseStep::SetPosition(offset)],
            ),
            Scenario::new("cylinder-collection-rotate-result", three_cylinders, rotate),
            Scenario::new(
                "cylinder-collection-translate-rotate-result",
                three_cylinders,
                translate_rotate,
            ),
        ],
    }
}

pub fn suite(name: SuiteName) -> Suite {
    match name {
        SuiteName::Cylinder => cylinder_suite(),
        SuiteName::Collection => collection_suite(),
    }
}

/// Writes the grid and every scenario of `suite` into `output_dir`.
///
/// Stops at the first failure; artifacts already written stay on disk.
pub fn run_suite(
    suite: &Suite,
    oracle: &dyn FieldOracle,
    output_dir: &Path,
) -> Result<SuiteReport> {
    info!(
        suite = suite.name.as_str(),
        scenarios = suite.scenarios.len(),
        "generating suite"
    );
    let points = build_grid(&suite.grid)?;
    let mut artifacts = Vec::with_capacity(suite.scenarios.len() + 1);

    let points_path = artifact_path(output_dir, suite.points_artifact);
    write_points(&points_path, &points)?;
    info!(path = %points_path.display(), rows = points.len(), "wrote points");
    artifacts.push(points_path);

    for scenario in suite.scenarios.iter() {
        let field = scenario.evaluate(oracle, &points)?;
        let path = artifact_path(output_dir, scenario.artifact);
        write_fields(&path, &field)?;
        info!(path = %path.display(), rows = field.len(), "wrote field");
        artifacts.push(path);
    }

    Ok(SuiteReport {
        suite: suite.name,
        points: points.len(),
        artifacts,
    })
}

/// Runs every suite selected by `config`, cylinder before collection.
pub fn run_all(
    config: &GeneratorConfiguration,
    oracle: &dyn FieldOracle,
) -> Result<Vec<SuiteReport>> {
    [SuiteName::Cylinder, SuiteName::Collection]
        .iter()
        .filter(|name| config.includes(**name))
        .map(|name| run_suite(&suite(*name), oracle, &config.output_dir))
        .collect()
}
