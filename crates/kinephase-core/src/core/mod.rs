//! # Core Module
//!
//! Stateless building blocks of the library: the interaction data model, the
//! kinematic limit formulas, the phase-space facade and the numerical routines
//! the engine integrates and interpolates with.
//!
//! ## Architecture
//!
//! - **Physical constants** ([`constants`]) - Masses, numerical guards and unit conversions
//! - **Interaction description** ([`models`]) - Particles, processes, targets and kinematics
//! - **Limit formulas** ([`kinematics`]) - Pure W, Q², x, y functions per physics family
//! - **Phase space** ([`phase_space`]) - Thresholds, limits and the allowed-region test
//! - **Numerics** ([`numerics`]) - Splines and two-dimensional cubature
//! - **Utilities** ([`utils`]) - Four-vectors and one-dimensional ranges
//!
//! ## Key Capabilities
//!
//! - **Closed channel dispatch** so every scattering kind has an explicit answer
//! - **Sentinel ranges** for closed or inapplicable regions instead of errors
//! - **Frame-aware energies** with off-shell hit nucleons

pub mod constants;
pub mod kinematics;
pub mod models;
pub mod numerics;
pub mod phase_space;
pub mod utils;
