//! Kinematic limits for a massive probe whose outgoing partner has the same mass:
//! charged-lepton electromagnetic scattering, and (through [`super::dark`])
//! dark-matter scattering.
//!
//! Arguments follow the same order as [`super::inelastic`]: probe energy in the
//! hit-nucleon rest frame, nucleon mass, probe mass.

use super::inelastic::scan_y_over_x;
use crate::core::constants::{A_SMALL_NUM, NEUTRON_MASS, PHOTON_TEST_MASS};
use crate::core::utils::range::Range1D;

fn mandelstam_s(e: f64, m: f64, ml: f64) -> f64 {
    m * m + ml * ml + 2.0 * m * e
}

pub fn w_lim(e: f64, m: f64, ml: f64) -> Range1D {
    let s = mandelstam_s(e, m, ml);
    let min = NEUTRON_MASS + PHOTON_TEST_MASS;
    let max = s.max(0.0).sqrt() - ml;
    if max <= min {
        return Range1D::UNDEFINED;
    }
    Range1D::new(min, max).shrunk(A_SMALL_NUM)
}

/// Two-body Q² limits at fixed W for equal incoming and outgoing probe masses.
pub fn q2_lim_w(e: f64, m: f64, ml: f64, w: f64, q2_min_cut: f64) -> Range1D {
    let ml2 = ml * ml;
    let s = mandelstam_s(e, m, ml);
    let sqs = s.max(0.0).sqrt();
    if sqs <= 0.0 {
        return Range1D::UNDEFINED;
    }
    let e0_cm = (s + ml2 - m * m) / (2.0 * sqs);
    let p0_cm = (e0_cm * e0_cm - ml2).max(0.0).sqrt();
    let e1_cm = (s + ml2 - w * w) / (2.0 * sqs);
    let p1_cm = (e1_cm * e1_cm - ml2).max(0.0).sqrt();

    let min = (2.0 * (e0_cm * e1_cm - p0_cm * p1_cm) - 2.0 * ml2)
        .max(0.0)
        .max(q2_min_cut);
    let max = (2.0 * (e0_cm * e1_cm + p0_cm * p1_cm) - 2.0 * ml2).max(0.0);
    if max < min {
        return Range1D::UNDEFINED;
    }
    Range1D::new(min, max)
}

pub fn q2_lim(e: f64, m: f64, ml: f64, q2_min_cut: f64) -> Range1D {
    let w = w_lim(e, m, ml);
    if w.is_undefined() {
        return Range1D::UNDEFINED;
    }
    q2_lim_w(e, m, ml, w.min, q2_min_cut)
}

pub fn x_lim(e: f64, m: f64, ml: f64) -> Range1D {
    let s = mandelstam_s(e, m, ml);
    Range1D::new(
        ml * ml / (s - m * m) + A_SMALL_NUM,
        1.0 - A_SMALL_NUM,
    )
}

/// y limits at fixed x.
///
/// With `u = 1 − y` the lepton-vertex constraint `|cos θ| ≤ 1` becomes a quadratic
/// `qa·u² + qb·u + qc ≤ 0`; its roots bound the outgoing energy fraction.
pub fn y_lim_x(e: f64, m: f64, ml: f64, x: f64) -> Range1D {
    let e2 = e * e;
    let ml2 = ml * ml;
    let mex = m * e * x;
    let a = e2 + mex;
    let b = ml2 + mex;

    let qa = a * a - e2 * e2 + e2 * ml2;
    let qb = -2.0 * a * b;
    let qc = b * b + e2 * ml2 - ml2 * ml2;

    let discriminant = qb * qb - 4.0 * qa * qc;
    if qa <= 0.0 || discriminant < 0.0 {
        return Range1D::UNDEFINED;
    }
    let root = discriminant.sqrt();
    let u_low = (-qb - root) / (2.0 * qa);
    let u_high = (-qb + root) / (2.0 * qa);

    let min = (1.0 - u_high).max(0.0) + A_SMALL_NUM;
    let max = (1.0 - u_low).min(1.0) - A_SMALL_NUM;
    if max < min {
        return Range1D::UNDEFINED;
    }
    Range1D::new(min, max)
}

pub fn y_lim(e: f64, m: f64, ml: f64) -> Range1D {
    scan_y_over_x(x_lim(e, m, ml), |x| y_lim_x(e, m, ml, x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{ELECTRON_MASS, MIN_Q2_LIMIT, MUON_MASS, NUCLEON_MASS};
    use crate::core::kinematics::inelastic;

    const M: f64 = NUCLEON_MASS;

    #[test]
    fn massive_probe_raises_cm_energy() {
        let weak = inelastic::w_lim(2.0, M, MUON_MASS);
        let em = w_lim(2.0, M, MUON_MASS);
        assert!(em.max > weak.max);
    }

    #[test]
    fn electron_limits_approach_massless_limits() {
        let em = y_lim_x(5.0, M, ELECTRON_MASS, 0.4);
        let weak = inelastic::y_lim_x(5.0, M, 0.0, 0.4);
        assert!((em.max - weak.max).abs() < 1e-3);
        assert!(em.min < 1e-3);
    }

    #[test]
    fn y_range_at_fixed_x_respects_energy_conservation() {
        let y = y_lim_x(1.0, M, MUON_MASS, 0.3);
        assert!(y.is_valid());
        assert!(y.max <= 1.0 - MUON_MASS / 1.0);
    }

    #[test]
    fn q2_limits_are_ordered_above_cut() {
        let q2 = q2_lim(3.0, M, MUON_MASS, MIN_Q2_LIMIT);
        assert!(q2.is_valid());
        assert!(q2.min >= MIN_Q2_LIMIT);
    }

    #[test]
    fn scanned_y_range_is_inside_unit_interval() {
        let y = y_lim(4.0, M, MUON_MASS);
        assert!(y.min >= A_SMALL_NUM && y.max <= 1.0 - A_SMALL_NUM);
        assert!(y.min < y.max);
    }
}
