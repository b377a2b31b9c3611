//! Integration tests for dataset generation
//!
//! These run the full suites into a temporary directory and read every
//! artifact back, checking it against the scenario it came from.
