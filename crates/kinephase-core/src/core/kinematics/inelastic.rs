//! Kinematic limits for weak inelastic scattering of a (nearly) massless probe
//! on a nucleon at rest, producing a lepton of mass `ml`.
//!
//! All energies are in the hit-nucleon rest frame.

use crate::core::constants::{A_SMALL_NUM, NEUTRON_MASS, PHOTON_TEST_MASS};
use crate::core::utils::range::Range1D;

const Y_SCAN_POINTS: usize = 100;

pub fn w_lim(ev: f64, m: f64, ml: f64) -> Range1D {
    let s = m * m + 2.0 * m * ev;
    let min = NEUTRON_MASS + PHOTON_TEST_MASS;
    let max = s.max(0.0).sqrt() - ml;
    if max <= min {
        return Range1D::UNDEFINED;
    }
    Range1D::new(min, max).shrunk(A_SMALL_NUM)
}

/// Q² limits at fixed hadronic invariant mass `w`, with `q2_min_cut` as floor.
pub fn q2_lim_w(ev: f64, m: f64, ml: f64, w: f64, q2_min_cut: f64) -> Range1D {
    let m2 = m * m;
    let ml2 = ml * ml;
    let s = m2 + 2.0 * m * ev;
    let sqs = s.max(0.0).sqrt();
    if sqs <= 0.0 {
        return Range1D::UNDEFINED;
    }
    let e1_cm = (s + ml2 - w * w) / (2.0 * sqs);
    let p1_cm = (e1_cm * e1_cm - ml2).max(0.0).sqrt();
    let e0_cm = (s - m2) / (2.0 * sqs);

    let min = (-ml2 + 2.0 * e0_cm * (e1_cm - p1_cm)).max(0.0).max(q2_min_cut);
    let max = (-ml2 + 2.0 * e0_cm * (e1_cm + p1_cm)).max(0.0);
    if max < min {
        return Range1D::UNDEFINED;
    }
    Range1D::new(min, max)
}

/// W-integrated Q² limits: the fixed-W limits at the smallest allowed W.
pub fn q2_lim(ev: f64, m: f64, ml: f64, q2_min_cut: f64) -> Range1D {
    let w = w_lim(ev, m, ml);
    if w.is_undefined() {
        return Range1D::UNDEFINED;
    }
    q2_lim_w(ev, m, ml, w.min, q2_min_cut)
}

pub fn x_lim(ev: f64, m: f64, ml: f64) -> Range1D {
    let m2 = m * m;
    let s = m2 + 2.0 * m * ev;
    Range1D::new(ml * ml / (s - m2) + A_SMALL_NUM, 1.0 - A_SMALL_NUM)
}

/// y limits at fixed Bjorken x.
pub fn y_lim_x(ev: f64, m: f64, ml: f64, x: f64) -> Range1D {
    let ml2 = ml * ml;
    let a = 0.5 * ml2 / (m * ev * x);
    let b = ml2 / (ev * ev);
    let c = 1.0 + 0.5 * x * m / ev;
    let d = ((1.0 - a).powi(2) - b).max(0.0);

    let big_a = 0.5 * (1.0 - a - 0.5 * b) / c;
    let big_b = 0.5 * d.sqrt() / c;

    Range1D::new(
        (big_a - big_b).max(0.0) + A_SMALL_NUM,
        (big_a + big_b).min(1.0) - A_SMALL_NUM,
    )
}

/// x-integrated y limits, found by scanning [`y_lim_x`] over a log-spaced x grid.
pub fn y_lim(ev: f64, m: f64, ml: f64) -> Range1D {
    let x_range = x_lim(ev, m, ml);
    scan_y_over_x(x_range, |x| y_lim_x(ev, m, ml, x))
}

/// Envelope of per-x y limits over `x_range`, kept only if it lies within [0, 1].
pub(crate) fn scan_y_over_x(x_range: Range1D, y_at: impl Fn(f64) -> Range1D) -> Range1D {
    if !(x_range.min > 0.0 && x_range.max > 0.0) {
        return Range1D::UNDEFINED;
    }
    let log_min = x_range.min.log10();
    let log_max = x_range.max.log10();
    let step = (log_max - log_min) / (Y_SCAN_POINTS - 1) as f64;

    let mut y_min = 999.0_f64;
    let mut y_max = -999.0_f64;
    for i in 0..Y_SCAN_POINTS {
        let x = 10f64.powf(log_min + i as f64 * step);
        let y = y_at(x);
        if (0.0..=1.0).contains(&y.max) {
            y_max = y_max.max(y.max);
        }
        if (0.0..=1.0).contains(&y.min) {
            y_min = y_min.min(y.min);
        }
    }

    if (0.0..=1.0).contains(&y_max) && (0.0..=1.0).contains(&y_min) {
        Range1D::new(y_min.max(A_SMALL_NUM), y_max.min(1.0 - A_SMALL_NUM))
    } else {
        Range1D::UNDEFINED
    }
}
