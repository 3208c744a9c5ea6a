//! # kinephase Core Library
//!
//! Kinematic phase space, interaction thresholds and cached cross-section
//! integration for neutrino, charged-lepton and dark-matter scattering.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Interaction`), the pure
//!   kinematic limit formulas and the `PhaseSpace` facade that answers threshold,
//!   limit and allowed-region questions for one interaction.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer: configuration, the
//!   process-lifetime cache store, the differential-to-total cross-section
//!   integrator and the max-cross-section cache behind rejection sampling.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures built on the engine,
//!   such as tabulating a total cross-section spline over an energy grid.

pub mod core;
pub mod engine;
pub mod workflows;
