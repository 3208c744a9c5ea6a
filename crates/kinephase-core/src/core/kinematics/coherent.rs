//! Coherent scattering off the whole nucleus: pion (or photon-like) production and
//! coherent elastic neutrino-nucleus scattering.

use crate::core::constants::{A_SMALL_NUM, MIN_Q2_LIMIT_VLE, PION_MASS};
use crate::core::utils::range::Range1D;

/// Smallest hadronic invariant mass squared: nucleus plus produced system.
pub fn w2_min(mn: f64, m_produced: f64) -> f64 {
    (mn + m_produced).powi(2)
}

/// Q² limits for coherent production (Kartavtsev–Paschos–Gounaris).
///
/// The upper edge is left open; the differential cross section's nuclear form
/// factor cuts it off long before any kinematic bound.
pub fn q2_lim(mn: f64, m_produced: f64, ml: f64, ev: f64) -> Range1D {
    let mn2 = mn * mn;
    let ml2 = ml * ml;
    let s = mn2 + 2.0 * mn * ev;
    let w2min = w2_min(mn, m_produced);

    let a = 1.0;
    let b = ml2 / s;
    let c = w2min / s;
    let lambda = a * a + b * b + c * c - 2.0 * a * b - 2.0 * a * c - 2.0 * b * c;

    let mut min = 0.0;
    if lambda > 0.0 {
        let big_a = (s - mn2) / 2.0;
        let big_b = 1.0 - lambda.sqrt();
        let big_c = 0.5 * (w2min + ml2 - mn2 * (w2min - ml2) / s);
        min = (big_a * big_b - big_c).max(0.0);
    }
    Range1D::new(min, f64::MAX)
}

pub fn x_lim() -> Range1D {
    Range1D::new(A_SMALL_NUM, 1.0 - A_SMALL_NUM)
}

/// Lab-frame y limits: enough energy transfer for a pion, and enough left over for
/// the lepton.
pub fn y_lim(ev_lab: f64, ml: f64) -> Range1D {
    Range1D::new(
        PION_MASS / ev_lab + A_SMALL_NUM,
        1.0 - ml / ev_lab - A_SMALL_NUM,
    )
}

/// Paschos–Schalla y limits at fixed Q², parameterized by ξ.
///
/// The floor is the larger of the hadronic-mass requirement and `ξ·√Q²/E`; the
/// ceiling is set by the smallest outgoing lepton energy compatible with Q².
pub fn y_lim_xi(mn: f64, m_produced: f64, ml: f64, ev: f64, q2: f64, xi: f64) -> Range1D {
    if ev <= 0.0 || q2 < 0.0 {
        return Range1D::UNDEFINED;
    }
    let mn2 = mn * mn;
    let ml2 = ml * ml;
    let w2min = w2_min(mn, m_produced);

    let hadronic_floor = (w2min - mn2 + q2) / (2.0 * mn * ev);
    let min = hadronic_floor.max(xi * q2.sqrt() / ev);

    let k = (q2 + ml2) / (2.0 * ev);
    if k <= 0.0 {
        return Range1D::UNDEFINED;
    }
    let el_min = (k * k + ml2) / (2.0 * k);
    let max = 1.0 - el_min / ev;

    if max < min {
        return Range1D::UNDEFINED;
    }
    Range1D::new(min, max)
}

/// CEvNS Q² limits from the lab-frame probe energy.
pub fn cevns_q2_lim(ev_lab: f64) -> Range1D {
    Range1D::new(MIN_Q2_LIMIT_VLE, 4.0 * ev_lab * ev_lab)
}
