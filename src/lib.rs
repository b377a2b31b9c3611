//! Golden reference datasets for validating a magnetostatic field engine.
//!
//! A run builds fixed sample grids, places cylinder magnets and collections of
//! them in a set of named poses, evaluates the B-field of each configuration
//! with a [FieldOracle](oracle::FieldOracle) and writes points and fields as
//! Matrix Market files.
pub mod configuration;
pub mod constant;
pub mod error;
pub mod grid;
pub mod integration_tests;
pub mod magnetic;
pub mod oracle;
pub mod output;
pub mod pose;
pub mod scenario;
pub mod shapes;

pub use error::{GoldenError, Result};
