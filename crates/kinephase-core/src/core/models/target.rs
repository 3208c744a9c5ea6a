use super::particle::{self, Pdg};
use crate::core::constants::{NEUTRON_MASS, PROTON_MASS};
use crate::core::utils::lorentz::{self, P4};

// Bethe–Weizsäcker coefficients in GeV.
const SEMF_VOLUME: f64 = 0.015_75;
const SEMF_SURFACE: f64 = 0.017_8;
const SEMF_COULOMB: f64 = 0.000_711;
const SEMF_ASYMMETRY: f64 = 0.023_7;
const SEMF_PAIRING: f64 = 0.011_18;

/// Nuclear mass from the semi-empirical mass formula, in GeV.
///
/// M(Z,A) = Z·m_p + N·m_n − B(Z,A), with
/// B = a_v·A − a_s·A^(2/3) − a_c·Z(Z−1)/A^(1/3) − a_a·(N−Z)²/A + δ.
pub fn semf_mass(z: u32, a: u32) -> f64 {
    let n = a.saturating_sub(z);
    let free = z as f64 * PROTON_MASS + n as f64 * NEUTRON_MASS;
    if a <= 1 {
        return free;
    }
    let af = a as f64;
    let zf = z as f64;
    let nf = n as f64;

    let mut binding = SEMF_VOLUME * af;
    binding -= SEMF_SURFACE * af.powf(2.0 / 3.0);
    binding -= SEMF_COULOMB * zf * (zf - 1.0) / af.powf(1.0 / 3.0);
    binding -= SEMF_ASYMMETRY * (nf - zf).powi(2) / af;

    let pairing = SEMF_PAIRING / af.sqrt();
    if z % 2 == 0 && n % 2 == 0 {
        binding += pairing;
    } else if z % 2 == 1 && n % 2 == 1 {
        binding -= pairing;
    }

    free - binding.max(0.0)
}

/// The struck constituent of the target: a nucleon, or a nucleon cluster for MEC.
#[derive(Debug, Clone, PartialEq)]
pub struct HitNucleon {
    pub pdg: Pdg,
    /// Lab-frame four-momentum; may be off the mass shell for bound nucleons.
    pub p4: P4,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pdg: Pdg,
    z: u32,
    a: u32,
    mass: f64,
    hit_nucleon: Option<HitNucleon>,
}

impl Target {
    /// A nucleus (or free nucleon for `a == 1`) with its mass from the particle
    /// table or the semi-empirical mass formula.
    pub fn new(z: u32, a: u32) -> Self {
        let mass = match (z, a) {
            (1, 1) => PROTON_MASS,
            (0, 1) => NEUTRON_MASS,
            _ => semf_mass(z, a),
        };
        Self {
            pdg: particle::ion_pdg(z, a),
            z,
            a,
            mass,
            hit_nucleon: None,
        }
    }

    pub fn from_pdg(pdg: Pdg) -> Option<Self> {
        let (z, a) = particle::ion_za(pdg)?;
        Some(Self::new(z, a))
    }

    pub fn free_proton() -> Self {
        Self::new(1, 1)
    }

    pub fn free_neutron() -> Self {
        Self::new(0, 1)
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Sets the struck nucleon (or cluster) at rest and on its mass shell.
    pub fn with_hit_nucleon(self, pdg: Pdg) -> Self {
        let mass = particle::mass(pdg).unwrap_or(0.0);
        self.with_hit_nucleon_p4(pdg, lorentz::at_rest(mass))
    }

    pub fn with_hit_nucleon_p4(mut self, pdg: Pdg, p4: P4) -> Self {
        self.hit_nucleon = Some(HitNucleon { pdg, p4 });
        self
    }

    pub fn clear_hit_nucleon(&mut self) {
        self.hit_nucleon = None;
    }

    pub fn pdg(&self) -> Pdg {
        self.pdg
    }
    pub fn z(&self) -> u32 {
        self.z
    }
    pub fn a(&self) -> u32 {
        self.a
    }
    pub fn n(&self) -> u32 {
        self.a.saturating_sub(self.z)
    }
    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn is_nucleus(&self) -> bool {
        self.a > 1
    }

    pub fn is_free_nucleon(&self) -> bool {
        self.a == 1
    }

    pub fn is_free_proton(&self) -> bool {
        self.a == 1 && self.z == 1
    }

    pub fn is_free_neutron(&self) -> bool {
        self.a == 1 && self.z == 0
    }

    pub fn hit_nucleon(&self) -> Option<&HitNucleon> {
        self.hit_nucleon.as_ref()
    }

    pub fn hit_nucleon_pdg(&self) -> Option<Pdg> {
        self.hit_nucleon.as_ref().map(|hit| hit.pdg)
    }

    pub fn hit_nucleon_is_set(&self) -> bool {
        self.hit_nucleon.is_some()
    }

    /// Invariant mass of the hit nucleon four-momentum (off-shell aware).
    pub fn hit_nucleon_mass(&self) -> Option<f64> {
        self.hit_nucleon.as_ref().map(|hit| lorentz::mass(&hit.p4))
    }

    /// Number of nucleons of the same kind as the hit nucleon: Z for a proton,
    /// N for a neutron.
    pub fn like_nucleon_count(&self) -> Option<u32> {
        match self.hit_nucleon_pdg()? {
            particle::PROTON => Some(self.z),
            particle::NEUTRON => Some(self.n()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_nucleon_targets_use_table_masses() {
        assert_eq!(Target::free_proton().mass(), PROTON_MASS);
        assert_eq!(Target::free_neutron().mass(), NEUTRON_MASS);
        assert_eq!(Target::free_proton().pdg(), particle::FREE_PROTON_TARGET);
    }

    #[test]
    fn carbon_mass_is_close_to_measured_value() {
        let carbon = Target::new(6, 12);
        assert!((carbon.mass() - 11.1749).abs() < 0.01);
        assert!(carbon.mass() < 6.0 * PROTON_MASS + 6.0 * NEUTRON_MASS);
    }

    #[test]
    fn iron_binding_per_nucleon_is_physical() {
        let free = 26.0 * PROTON_MASS + 30.0 * NEUTRON_MASS;
        let binding_per_nucleon = (free - semf_mass(26, 56)) / 56.0;
        assert!(binding_per_nucleon > 0.0080 && binding_per_nucleon < 0.0095);
    }

    #[test]
    fn mass_override_replaces_formula_mass() {
        let target = Target::new(6, 12).with_mass(11.0);
        assert_eq!(target.mass(), 11.0);
    }

    #[test]
    fn hit_nucleon_defaults_to_on_shell_at_rest() {
        let target = Target::new(6, 12).with_hit_nucleon(particle::NEUTRON);
        let m = target.hit_nucleon_mass().unwrap();
        assert!((m - NEUTRON_MASS).abs() < 1e-12);
    }

    #[test]
    fn off_shell_hit_nucleon_reports_its_invariant_mass() {
        let p4 = lorentz::p4(0.0, 0.0, 0.2, 0.9);
        let target = Target::new(6, 12).with_hit_nucleon_p4(particle::PROTON, p4);
        let expected = (0.81f64 - 0.04).sqrt();
        assert!((target.hit_nucleon_mass().unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn like_nucleon_count_follows_hit_nucleon() {
        let argon = Target::new(18, 40);
        assert_eq!(argon.like_nucleon_count(), None);
        assert_eq!(
            argon.clone().with_hit_nucleon(particle::PROTON).like_nucleon_count(),
            Some(18)
        );
        assert_eq!(
            argon.with_hit_nucleon(particle::NEUTRON).like_nucleon_count(),
            Some(22)
        );
    }

    #[test]
    fn target_from_pdg_decodes_z_and_a() {
        let target = Target::from_pdg(1_000_180_400).unwrap();
        assert_eq!((target.z(), target.a(), target.n()), (18, 40, 22));
        assert!(Target::from_pdg(particle::PROTON).is_none());
    }
}
