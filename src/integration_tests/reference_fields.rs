//! Integration tests pinning scenario fields to fixed reference values
//!
//! The reference triples were computed independently of the elliptic-integral
//! formulas, by integrating the field of the surface charge of each uniformly
//! polarized cylinder at 20 significant digits, with the poses the scenarios
//! document. They pin grid ordering, rotation order, the polarization frame
//! and the rotation anchors together.
