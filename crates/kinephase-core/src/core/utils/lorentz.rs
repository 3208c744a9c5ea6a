use nalgebra::Vector4;

/// Four-momentum `(px, py, pz, E)` in GeV, energy last.
pub type P4 = Vector4<f64>;

pub fn p4(px: f64, py: f64, pz: f64, e: f64) -> P4 {
    Vector4::new(px, py, pz, e)
}

/// Four-momentum of a particle of mass `mass` at rest.
pub fn at_rest(mass: f64) -> P4 {
    Vector4::new(0.0, 0.0, 0.0, mass)
}

/// Four-momentum of a particle of mass `mass` and energy `energy` moving along +z.
///
/// The momentum is clamped to zero when `energy < mass`.
pub fn along_z(mass: f64, energy: f64) -> P4 {
    let pz = (energy * energy - mass * mass).max(0.0).sqrt();
    Vector4::new(0.0, 0.0, pz, energy)
}

/// Minkowski product with metric (+,−,−,−).
pub fn dot(a: &P4, b: &P4) -> f64 {
    a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z
}

pub fn mass2(p: &P4) -> f64 {
    dot(p, p)
}

/// Invariant mass; a space-like vector reports `-sqrt(-m²)` like ROOT's `TLorentzVector::M`.
pub fn mass(p: &P4) -> f64 {
    let m2 = mass2(p);
    if m2 < 0.0 { -(-m2).sqrt() } else { m2.sqrt() }
}

pub fn momentum(p: &P4) -> f64 {
    (p.x * p.x + p.y * p.y + p.z * p.z).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn particle_at_rest_has_its_mass_as_invariant() {
        assert!((mass(&at_rest(0.938)) - 0.938).abs() < TOLERANCE);
    }

    #[test]
    fn boosted_particle_keeps_invariant_mass() {
        let p = along_z(0.105, 3.0);
        assert!((mass(&p) - 0.105).abs() < 1e-9);
        assert!((momentum(&p) - (9.0f64 - 0.105 * 0.105).sqrt()).abs() < TOLERANCE);
    }

    #[test]
    fn along_z_below_mass_gives_zero_momentum() {
        let p = along_z(1.0, 0.5);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn space_like_vector_reports_negative_mass() {
        let q = p4(0.0, 0.0, 2.0, 1.0);
        assert!((mass(&q) + 3.0f64.sqrt()).abs() < TOLERANCE);
    }
}
