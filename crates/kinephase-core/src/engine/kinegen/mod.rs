//! # Kinematics Generation Module
//!
//! Accept/reject selection of event kinematics, backed by an energy-indexed
//! cache of the maximum differential cross section.
//!
//! ## Architecture
//!
//! - **Event Record** ([`event`]): the interaction being generated, the
//!   differential cross section of the accepted point and the error flags.
//! - **Max-XSec Cache** ([`cached`]): the [`KineGeneratorWithCache`] trait.
//!   Implementors only compute the maximum; lookup, spline maturation and the
//!   post-draw bound check are shared.
//! - **Rejection Sampler** ([`rejection`]): a (W, Q²) generator for any
//!   [`XSecAlgorithm`](crate::engine::xsec::model::XSecAlgorithm).
//!
//! A non-positive maximum or an exhausted draw budget abandons only the
//! current event ([`EngineError::KinematicsGeneration`](crate::engine::error::EngineError)).
//! An overshoot of the cached bound beyond tolerance is fatal.

pub mod cached;
pub mod event;
pub mod rejection;

pub use cached::KineGeneratorWithCache;
pub use event::{EventRecord, KinePhaseSpace};
pub use rejection::WQ2RejectionGenerator;
