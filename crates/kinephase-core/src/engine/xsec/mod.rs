//! Differential cross-section models and their integration into total cross
//! sections.
//!
//! - [`model`] - The [`model::XSecAlgorithm`] trait a differential model implements
//! - [`integrator`] - Threshold-aware (W, Q²) integration with free-nucleon caching

pub mod integrator;
pub mod model;
