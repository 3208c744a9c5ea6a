//! Conversions between the Bjorken `(x, y)` and invariant `(W, Q²)` descriptions
//! of a kinematic point, for a probe of energy `ev` on a nucleon of mass `m` at rest.

pub fn q2_from_xy(ev: f64, m: f64, x: f64, y: f64) -> f64 {
    2.0 * m * ev * x * y
}

/// `(W, Q²)` for the point `(x, y)`. An unphysical W² is clamped to zero.
pub fn xy_to_wq2(ev: f64, m: f64, x: f64, y: f64) -> (f64, f64) {
    let q2 = q2_from_xy(ev, m, x, y);
    let w2 = m * m + 2.0 * m * ev * y - q2;
    (w2.max(0.0).sqrt(), q2)
}

/// `(x, y)` for the point `(W, Q²)`; `None` when the energy transfer vanishes.
pub fn wq2_to_xy(ev: f64, m: f64, w: f64, q2: f64) -> Option<(f64, f64)> {
    let nu = (w * w - m * m + q2) / (2.0 * m);
    if nu <= 0.0 || ev <= 0.0 {
        return None;
    }
    let x = q2 / (2.0 * m * nu);
    let y = nu / ev;
    Some((x, y))
}
