//! # Core Models Module
//!
//! Data structures describing a single scattering interaction: who scatters off
//! what, through which channel, and at which kinematic point.
//!
//! ## Overview
//!
//! An [`interaction::Interaction`] is assembled from smaller immutable pieces and
//! then handed to the phase-space engine, the integrator and the max-xsec cache.
//! Only its running kinematics and its flags change after construction.
//!
//! ## Key Components
//!
//! - [`particle`] - PDG codes, the static mass table and particle predicates
//! - [`process`] - Scattering channel and interaction current, with predicates
//! - [`exclusive`] - Final-state exclusivity tags (pions, charm, strangeness)
//! - [`target`] - Nuclear or free-nucleon target with an optional hit nucleon
//! - [`state`] - Probe plus target, and probe energies in the lab or nucleon frame
//! - [`kinematics`] - Kinematic variable tags and the running kinematic point
//! - [`interaction`] - The full interaction descriptor and its builder
//!
//! ## Usage
//!
//! ```ignore
//! use kinephase::core::models::interaction::Interaction;
//! use kinephase::core::models::particle;
//! use kinephase::core::models::process::{InteractionCurrent, ScatteringKind};
//! use kinephase::core::models::target::Target;
//!
//! let interaction = Interaction::builder()
//!     .process(ScatteringKind::QuasiElastic, InteractionCurrent::WeakCC)
//!     .probe(particle::NU_MU, 1.0)
//!     .target(Target::new(6, 12))
//!     .hit_nucleon(particle::NEUTRON)
//!     .build()?;
//! ```

pub mod exclusive;
pub mod interaction;
pub mod kinematics;
pub mod particle;
pub mod process;
pub mod state;
pub mod target;
