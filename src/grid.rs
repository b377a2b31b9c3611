//! Axis-aligned lattices of sample points.
use crate::error::{GoldenError, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Mesh expansion convention used when flattening the lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Indexing {
    /// Cartesian (`xy`) meshing: the mesh has shape `(n_y, n_x, n_z)`, so the
    /// flattened points iterate y outermost, then x, then z innermost.
    #[default]
    Cartesian,
    /// Matrix (`ij`) meshing: x outermost, then y, then z innermost.
    Matrix,
}

/// Defines a sampling lattice.
///
/// # Fields
///
/// `bounds`: lower and upper bound along each of the (x,y,z) axes.
///
/// `counts`: number of samples along each axis, each at least 1.
///
/// `indexing`: mesh convention that fixes the point ordering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub bounds: [[f64; 2]; 3],
    pub counts: [usize; 3],
    #[serde(default)]
    pub indexing: Indexing,
}

impl GridSpec {
    /// A cube `[lower, upper]^3` with `n` samples per axis.
    pub fn cube(lower: f64, upper: f64, n: usize) -> Self {
        GridSpec {
            bounds: [[lower, upper]; 3],
            counts: [n; 3],
            indexing: Indexing::Cartesian,
        }
    }

    /// Total number of points in the lattice.
    pub fn len(&self) -> usize {
        self.counts.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn validate(&self) -> Result<()> {
        for (axis, (bound, &n)) in self.bounds.iter().zip(self.counts.iter()).enumerate() {
            if n < 1 {
                return Err(GoldenError::InvalidArgument(format!(
                    "grid axis {} needs at least one sample, got {}",
                    axis, n
                )));
            }
            if !bound[0].is_finite() || !bound[1].is_finite() {
                return Err(GoldenError::InvalidArgument(format!(
                    "grid axis {} has non-finite bounds {:?}",
                    axis, bound
                )));
            }
        }
        Ok(())
    }
}

/// Evenly spaced samples over `[start, stop]`, both ends included.
///
/// Each value is `i * step + start`; the final value is pinned to `stop` so the
/// upper bound is reproduced exactly. A single sample is `start`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => return Vec::new(),
        1 => return vec![start],
        _ => (),
    }
    let step = (stop - start) / (n - 1) as f64;
    let mut values: Vec<f64> = (0..n).map(|i| i as f64 * step + start).collect();
    if let Some(last) = values.last_mut() {
        *last = stop;
    }
    values
}

/// Builds the lattice of sample points described by `grid`.
///
/// The ordering is part of the dataset contract: field results are written in
/// the same order, so consumers must regenerate points identically.
pub fn build_grid(grid: &GridSpec) -> Result<Vec<Point3<f64>>> {
    grid.validate()?;
    let xs = linspace(grid.bounds[0][0], grid.bounds[0][1], grid.counts[0]);
    let ys = linspace(grid.bounds[1][0], grid.bounds[1][1], grid.counts[1]);
    let zs = linspace(grid.bounds[2][0], grid.bounds[2][1], grid.counts[2]);

    let mut points = Vec::with_capacity(grid.len());
    match grid.indexing {
        Indexing::Cartesian => {
            for &y in &ys {
                for &x in &xs {
                    for &z in &zs {
                        points.push(Point3::new(x, y, z));
                    }
                }
            }
        }
        Indexing::Matrix => {
            for &x in &xs {
                for &y in &ys {
                    for &z in &zs {
                        points.push(Point3::new(x, y, z));
                    }
                }
            }
        }
    }
    Ok(points)
}
