//! # Kinematic Limits Module
//!
//! Closed-form kinematic boundaries for every scattering family, written as pure
//! functions of energies and masses. They are the building blocks that
//! [`crate::core::phase_space::PhaseSpace`] dispatches to once it has read the
//! relevant energies and masses off an interaction.
//!
//! ## Architecture
//!
//! - **Weak inelastic** ([`inelastic`]) - W, Q², x and y limits for a massless probe
//! - **Massive probe** ([`electromagnetic`]) - the same limits when the probe and its
//!   outgoing partner share a non-zero mass
//! - **Dark matter** ([`dark`]) - massive-probe limits specialised to dark matter
//! - **Coherent** ([`coherent`]) - nucleus-level Q² and y limits, CEvNS
//! - **Conversions** ([`conversions`]) - `(x, y) <-> (W, Q²)`
//!
//! Every function returns a [`crate::core::utils::range::Range1D`]; a kinematically
//! closed region comes back as the `{-1, -1}` sentinel rather than an error.

pub mod coherent;
pub mod conversions;
pub mod dark;
pub mod electromagnetic;
pub mod inelastic;
