//! Kinematic limits for a dark-matter probe of mass `mx` scattering off a nucleon.
//!
//! The outgoing dark-matter particle keeps the probe mass, so the two-body
//! relations are the massive-probe ones of [`super::electromagnetic`]; only the
//! x range differs, since no final-state mass enters the Bjorken-x edge.

use super::electromagnetic;
use crate::core::constants::{A_SMALL_NUM, MIN_Q2_LIMIT};
use crate::core::utils::range::Range1D;

pub fn w_lim(ev: f64, m: f64, mx: f64) -> Range1D {
    electromagnetic::w_lim(ev, m, mx)
}

pub fn q2_lim_w(ev: f64, m: f64, mx: f64, w: f64) -> Range1D {
    electromagnetic::q2_lim_w(ev, m, mx, w, MIN_Q2_LIMIT)
}

pub fn q2_lim_w_with_cut(ev: f64, m: f64, mx: f64, w: f64, q2_min_cut: f64) -> Range1D {
    electromagnetic::q2_lim_w(ev, m, mx, w, q2_min_cut)
}

pub fn q2_lim(ev: f64, m: f64, mx: f64) -> Range1D {
    electromagnetic::q2_lim(ev, m, mx, MIN_Q2_LIMIT)
}

pub fn x_lim(_ev: f64, _m: f64, _mx: f64) -> Range1D {
    Range1D::new(A_SMALL_NUM, 1.0 - A_SMALL_NUM)
}

pub fn y_lim_x(ev: f64, m: f64, mx: f64, x: f64) -> Range1D {
    electromagnetic::y_lim_x(ev, m, mx, x)
}

pub fn y_lim(ev: f64, m: f64, mx: f64) -> Range1D {
    super::inelastic::scan_y_over_x(x_lim(ev, m, mx), |x| y_lim_x(ev, m, mx, x))
}
