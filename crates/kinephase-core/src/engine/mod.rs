//! # Engine Module
//!
//! This module holds the stateful half of kinephase: everything that turns the
//! pure phase-space calculators of [`crate::core`] into total cross sections and
//! sampled event kinematics.
//!
//! ## Overview
//!
//! The engine integrates differential cross-section models over the accessible
//! (W, Q²) region, memoizes expensive results in an explicitly passed
//! [`cache::Cache`], and supports rejection sampling with a cached upper bound on
//! the differential cross section.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Typed tunables with builders, loadable from TOML
//! - **Error Handling** ([`error`]) - Engine error taxonomy with fatal/recoverable classification
//! - **Cache Store** ([`cache`]) - Process-lifetime, string-keyed memoization branches
//! - **Spline Registry** ([`spline_list`]) - Free-nucleon total cross sections, CSV-backed
//! - **Integration** ([`xsec`]) - The model trait and the differential-to-total integrator
//! - **Kinematics Generation** ([`kinegen`]) - Max-xsec cache and the (W, Q²) rejection sampler
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//!
//! ## Key Capabilities
//!
//! - **Threshold and region checks** before any model evaluation
//! - **Free-nucleon fast path** scaling a registered or cached spline by the like-nucleon count
//! - **Adaptive cubature** with configurable tolerances and evaluation caps
//! - **Energy-indexed max-xsec caching** maturing into a spline once enough samples exist

pub mod cache;
pub mod config;
pub mod error;
pub mod kinegen;
pub mod progress;
pub mod spline_list;
pub mod xsec;
