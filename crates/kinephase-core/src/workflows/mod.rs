//! # Workflows Module
//!
//! This module provides the end-to-end procedures built on top of the engine.
//!
//! ## Overview
//!
//! Workflows are the top-level entry points for users of kinephase. Each one
//! takes a model, an interaction and the loaded tunables, reports progress
//! through a [`ProgressReporter`](crate::engine::progress::ProgressReporter),
//! and returns a ready-to-use result.
//!
//! ## Architecture
//!
//! - **Cross-Section Spline Workflow** ([`xsec_spline`]) - Tabulates a total cross
//!   section over a log-spaced energy grid and fits a spline through the knots,
//!   ready for registration in an
//!   [`XSecSplineList`](crate::engine::spline_list::XSecSplineList) or export as CSV.

pub mod xsec_spline;
