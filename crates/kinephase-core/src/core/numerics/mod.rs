//! # Numerics Module
//!
//! Numerical building blocks shared by the cross-section integrator, the
//! max-xsec cache and the spline tabulation workflow.
//!
//! - [`spline`] - Natural cubic, monotone and linear interpolation through knots
//! - [`integration`] - Genz–Malik adaptive cubature and Gauss–Legendre product rules

pub mod integration;
pub mod spline;
