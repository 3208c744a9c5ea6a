use super::exclusive::ExclusiveTag;
use super::kinematics::Kinematics;
use super::particle::{self, Pdg};
use super::process::{InteractionCurrent, ProcessInfo, ScatteringKind};
use super::state::{InitialState, RefFrame};
use super::target::Target;
use crate::core::kinematics::conversions;
use crate::core::utils::lorentz::{self, P4};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InteractionError {
    #[error("Interaction is missing its probe")]
    MissingProbe,

    #[error("Interaction is missing its target")]
    MissingTarget,

    #[error("Unknown particle code: {0}")]
    UnknownParticle(Pdg),

    #[error("Hit nucleon {0} is neither a nucleon nor a nucleon cluster")]
    InvalidHitNucleon(Pdg),
}

/// Per-interaction switches read by the integrator and the kinematics generators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InteractionFlags {
    pub skip_process_check: bool,
    pub skip_kinematic_check: bool,
    pub no_nuclear_correction: bool,
    pub assume_free_nucleon: bool,
}

impl InteractionFlags {
    pub fn reset_skip_checks(&mut self) {
        self.skip_process_check = false;
        self.skip_kinematic_check = false;
    }
}

/// A fully specified scattering: process, initial state, exclusive final state,
/// primary final-state lepton and the running kinematic point.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    process: ProcessInfo,
    init_state: InitialState,
    exclusive: ExclusiveTag,
    fs_lepton_pdg: Pdg,
    pub kinematics: Kinematics,
    pub flags: InteractionFlags,
}

impl Interaction {
    pub fn builder() -> InteractionBuilder {
        InteractionBuilder::new()
    }

    pub fn process(&self) -> &ProcessInfo {
        &self.process
    }

    pub fn scattering(&self) -> ScatteringKind {
        self.process.scattering
    }

    pub fn init_state(&self) -> &InitialState {
        &self.init_state
    }

    pub fn init_state_mut(&mut self) -> &mut InitialState {
        &mut self.init_state
    }

    pub fn target(&self) -> &Target {
        self.init_state.target()
    }

    pub fn exclusive(&self) -> &ExclusiveTag {
        &self.exclusive
    }

    pub fn probe_pdg(&self) -> Pdg {
        self.init_state.probe_pdg()
    }

    pub fn probe_energy(&self, frame: RefFrame) -> f64 {
        self.init_state.probe_energy(frame)
    }

    pub fn fs_lepton_pdg(&self) -> Pdg {
        self.fs_lepton_pdg
    }

    /// Mass of the primary final-state lepton. A dark-matter final state carries
    /// the probe mass.
    pub fn fs_lepton_mass(&self) -> f64 {
        if particle::is_dark_matter(self.fs_lepton_pdg) {
            return self.init_state.probe_mass();
        }
        particle::mass(self.fs_lepton_pdg).unwrap_or(0.0)
    }

    /// Struck nucleon mass, off-shell aware.
    pub fn hit_nucleon_mass(&self) -> Option<f64> {
        self.target().hit_nucleon_mass()
    }

    /// The nucleon (or cluster) left behind by quasi-elastic-like and MEC channels.
    pub fn recoil_nucleon_pdg(&self) -> Option<Pdg> {
        let struck = self.target().hit_nucleon_pdg()?;
        let cc = self.process.is_weak_cc();
        match self.process.scattering {
            ScatteringKind::QuasiElastic
            | ScatteringKind::InverseBetaDecay
            | ScatteringKind::DarkMatterElastic => {
                if !particle::is_nucleon(struck) {
                    return None;
                }
                Some(if cc {
                    particle::switch_proton_neutron(struck)
                } else {
                    struck
                })
            }
            ScatteringKind::MEC => {
                if !particle::is_nucleon_cluster(struck) {
                    return None;
                }
                if !cc {
                    return Some(struck);
                }
                let shifted = if particle::is_neutrino(self.probe_pdg()) {
                    struck + 1
                } else {
                    struck - 1
                };
                particle::is_nucleon_cluster(shifted).then_some(shifted)
            }
            _ => None,
        }
    }

    pub fn recoil_nucleon_mass(&self) -> Option<f64> {
        self.recoil_nucleon_pdg().and_then(particle::mass)
    }

    /// Canonical string identifying the interaction independent of its energy and
    /// running kinematics; used to key cache branches and splines.
    pub fn as_key(&self) -> String {
        let mut key = format!("nu:{};tgt:{};", self.probe_pdg(), self.target().pdg());
        if let Some(hit) = self.target().hit_nucleon_pdg() {
            key.push_str(&format!("N:{hit};"));
        }
        key.push_str(&format!("proc:{};", self.process));
        key.push_str(&format!("fsl:{};", self.fs_lepton_pdg));
        key.push_str(&self.exclusive.to_string());
        key
    }

    /// Replaces the probe four-momentum with one of energy `energy` along +z.
    pub fn set_probe_energy(&mut self, energy: f64) {
        let mass = self.init_state.probe_mass();
        self.init_state.set_probe_p4(lorentz::along_z(mass, energy));
    }

    /// The same process on a free nucleon of the hit-nucleon species, with the hit
    /// nucleon at rest on its mass shell. `None` when no nucleon is struck.
    pub fn free_nucleon_equivalent(&self) -> Option<Interaction> {
        let hit = self.target().hit_nucleon_pdg()?;
        let target = match hit {
            particle::PROTON => Target::free_proton(),
            particle::NEUTRON => Target::free_neutron(),
            _ => return None,
        }
        .with_hit_nucleon(hit);
        let mut copy = self.clone();
        *copy.init_state.target_mut() = target;
        Some(copy)
    }

    /// Recomputes the running `W` and `Q²` from the running `x` and `y`.
    ///
    /// Returns the new `(W, Q²)` pair, or `None` (leaving the kinematics untouched)
    /// when `x`, `y` or the hit nucleon are unset.
    pub fn update_wq2_from_xy(&mut self) -> Option<(f64, f64)> {
        let (x, y) = (self.kinematics.x?, self.kinematics.y?);
        let m = self.hit_nucleon_mass()?;
        let ev = self.probe_energy(RefFrame::HitNucleonRest);
        let (w, q2) = conversions::xy_to_wq2(ev, m, x, y);
        self.kinematics.w = Some(w);
        self.kinematics.q2 = Some(q2);
        Some((w, q2))
    }
}

/// Default primary final-state particle for a probe under a given process.
fn default_fs_lepton(process: &ProcessInfo, probe: Pdg) -> Pdg {
    match process.scattering {
        ScatteringKind::GlashowResonance => particle::W_BOSON,
        ScatteringKind::InverseMuonDecay | ScatteringKind::IMDAnnihilation => particle::MUON,
        _ if process.current == InteractionCurrent::WeakCC => {
            particle::charged_partner(probe).unwrap_or(probe)
        }
        _ => probe,
    }
}

#[derive(Default)]
pub struct InteractionBuilder {
    process: ProcessInfo,
    probe_pdg: Option<Pdg>,
    probe_p4: Option<P4>,
    target: Option<Target>,
    hit_nucleon: Option<Pdg>,
    fs_lepton_pdg: Option<Pdg>,
    exclusive: ExclusiveTag,
    kinematics: Kinematics,
    flags: InteractionFlags,
}

impl InteractionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process(mut self, scattering: ScatteringKind, current: InteractionCurrent) -> Self {
        self.process = ProcessInfo::new(scattering, current);
        self
    }
    /// A probe of known mass moving along +z with lab energy `energy`.
    pub fn probe(mut self, pdg: Pdg, energy: f64) -> Self {
        let mass = particle::mass(pdg).unwrap_or(0.0);
        self.probe_pdg = Some(pdg);
        self.probe_p4 = Some(lorentz::along_z(mass, energy));
        self
    }
    pub fn dark_matter_probe(mut self, mass: f64, energy: f64) -> Self {
        self.probe_pdg = Some(particle::DARK_MATTER);
        self.probe_p4 = Some(lorentz::along_z(mass, energy));
        self
    }
    pub fn probe_p4(mut self, pdg: Pdg, p4: P4) -> Self {
        self.probe_pdg = Some(pdg);
        self.probe_p4 = Some(p4);
        self
    }
    pub fn target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }
    pub fn hit_nucleon(mut self, pdg: Pdg) -> Self {
        self.hit_nucleon = Some(pdg);
        self
    }
    pub fn fs_lepton(mut self, pdg: Pdg) -> Self {
        self.fs_lepton_pdg = Some(pdg);
        self
    }
    pub fn exclusive(mut self, tag: ExclusiveTag) -> Self {
        self.exclusive = tag;
        self
    }
    pub fn kinematics(mut self, kinematics: Kinematics) -> Self {
        self.kinematics = kinematics;
        self
    }
    pub fn flags(mut self, flags: InteractionFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn build(self) -> Result<Interaction, InteractionError> {
        let probe_pdg = self.probe_pdg.ok_or(InteractionError::MissingProbe)?;
        let probe_p4 = self.probe_p4.ok_or(InteractionError::MissingProbe)?;
        if !particle::is_dark_matter(probe_pdg) && particle::mass(probe_pdg).is_none() {
            return Err(InteractionError::UnknownParticle(probe_pdg));
        }

        let mut target = self.target.ok_or(InteractionError::MissingTarget)?;
        if let Some(hit) = self.hit_nucleon {
            if !particle::is_nucleon(hit) && !particle::is_nucleon_cluster(hit) {
                return Err(InteractionError::InvalidHitNucleon(hit));
            }
            target = target.with_hit_nucleon(hit);
        }

        let fs_lepton_pdg = self
            .fs_lepton_pdg
            .unwrap_or_else(|| default_fs_lepton(&self.process, probe_pdg));
        if !particle::is_dark_matter(fs_lepton_pdg) && particle::mass(fs_lepton_pdg).is_none() {
            return Err(InteractionError::UnknownParticle(fs_lepton_pdg));
        }

        Ok(Interaction {
            process: self.process,
            init_state: InitialState::new(probe_pdg, probe_p4, target),
            exclusive: self.exclusive,
            fs_lepton_pdg,
            kinematics: self.kinematics,
            flags: self.flags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{MUON_MASS, NEUTRON_MASS, PROTON_MASS, W_BOSON_MASS};

    fn numu_cc_qe_on_carbon(energy: f64) -> Interaction {
        Interaction::builder()
            .process(ScatteringKind::QuasiElastic, InteractionCurrent::WeakCC)
            .probe(particle::NU_MU, energy)
            .target(Target::new(6, 12))
            .hit_nucleon(particle::NEUTRON)
            .build()
            .unwrap()
    }

    #[test]
    fn build_fails_without_probe_or_target() {
        let missing_probe = Interaction::builder().target(Target::free_proton()).build();
        assert_eq!(missing_probe, Err(InteractionError::MissingProbe));
        let missing_target = Interaction::builder().probe(particle::NU_E, 1.0).build();
        assert_eq!(missing_target, Err(InteractionError::MissingTarget));
    }

    #[test]
    fn build_rejects_unknown_probe_and_bad_hit_nucleon() {
        let unknown = Interaction::builder()
            .probe(12345, 1.0)
            .target(Target::free_proton())
            .build();
        assert_eq!(unknown, Err(InteractionError::UnknownParticle(12345)));
        let bad_hit = Interaction::builder()
            .probe(particle::NU_E, 1.0)
            .target(Target::free_proton())
            .hit_nucleon(particle::PI0)
            .build();
        assert_eq!(bad_hit, Err(InteractionError::InvalidHitNucleon(particle::PI0)));
    }

    #[test]
    fn charged_current_defaults_to_charged_partner_lepton() {
        let interaction = numu_cc_qe_on_carbon(1.0);
        assert_eq!(interaction.fs_lepton_pdg(), particle::MUON);
        assert_eq!(interaction.fs_lepton_mass(), MUON_MASS);
    }

    #[test]
    fn glashow_resonance_defaults_to_w_boson() {
        let interaction = Interaction::builder()
            .process(ScatteringKind::GlashowResonance, InteractionCurrent::WeakCC)
            .probe(particle::ANTI_NU_E, 6.3e6)
            .target(Target::new(8, 16))
            .build()
            .unwrap();
        assert_eq!(interaction.fs_lepton_mass(), W_BOSON_MASS);
    }

    #[test]
    fn dark_matter_final_state_carries_probe_mass() {
        let interaction = Interaction::builder()
            .process(ScatteringKind::DarkMatterElastic, InteractionCurrent::Dark)
            .dark_matter_probe(0.3, 2.0)
            .target(Target::free_proton())
            .hit_nucleon(particle::PROTON)
            .build()
            .unwrap();
        assert!((interaction.fs_lepton_mass() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn quasi_elastic_cc_recoils_the_other_nucleon() {
        let interaction = numu_cc_qe_on_carbon(1.0);
        assert_eq!(interaction.recoil_nucleon_pdg(), Some(particle::PROTON));
        assert_eq!(interaction.recoil_nucleon_mass(), Some(PROTON_MASS));
    }

    #[test]
    fn mec_cc_neutrino_raises_cluster_charge() {
        let interaction = Interaction::builder()
            .process(ScatteringKind::MEC, InteractionCurrent::WeakCC)
            .probe(particle::NU_MU, 1.0)
            .target(Target::new(6, 12))
            .hit_nucleon(particle::CLUSTER_NN)
            .build()
            .unwrap();
        assert_eq!(interaction.recoil_nucleon_pdg(), Some(particle::CLUSTER_NP));
    }

    #[test]
    fn key_ignores_energy_but_not_process() {
        let a = numu_cc_qe_on_carbon(1.0);
        let b = numu_cc_qe_on_carbon(5.0);
        assert_eq!(a.as_key(), b.as_key());
        assert_eq!(
            a.as_key(),
            "nu:14;tgt:1000060120;N:2112;proc:weak-cc,quasi-elastic;fsl:13;"
        );
    }

    #[test]
    fn free_nucleon_equivalent_swaps_target_and_keeps_process() {
        let interaction = numu_cc_qe_on_carbon(2.0);
        let free = interaction.free_nucleon_equivalent().unwrap();
        assert!(free.target().is_free_neutron());
        assert_eq!(free.target().hit_nucleon_pdg(), Some(particle::NEUTRON));
        assert_eq!(free.process(), interaction.process());
        assert!((free.hit_nucleon_mass().unwrap() - NEUTRON_MASS).abs() < 1e-12);
    }

    #[test]
    fn update_wq2_requires_x_and_y() {
        let mut interaction = numu_cc_qe_on_carbon(2.0);
        assert_eq!(interaction.update_wq2_from_xy(), None);
        interaction.kinematics = Kinematics::new().with_xy(0.5, 0.5);
        let (w, q2) = interaction.update_wq2_from_xy().unwrap();
        assert_eq!(interaction.kinematics.w, Some(w));
        assert_eq!(interaction.kinematics.q2, Some(q2));
        assert!(q2 > 0.0 && w > 0.0);
    }

    #[test]
    fn set_probe_energy_keeps_probe_on_shell() {
        let mut interaction = numu_cc_qe_on_carbon(2.0);
        interaction.set_probe_energy(4.0);
        assert_eq!(interaction.probe_energy(RefFrame::Lab), 4.0);
    }
}
