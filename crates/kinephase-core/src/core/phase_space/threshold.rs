use super::{PhaseSpace, PhaseSpaceError, particle_mass};
use crate::core::constants::{
    A_SMALL_NUM, ELECTRON_MASS, ELECTRON_MASS2, LIGHTEST_CHARM_HADRON_MASS, MUON_MASS2,
    NEUTRON_MASS, NUCLEON_MASS, PHOTON_TEST_MASS, PION_MASS, PROTON_MASS, TAU_MASS,
    W_BOSON_MASS, MUON_MASS,
};
use crate::core::models::particle;
use crate::core::models::process::ScatteringKind as K;
use crate::core::models::state::RefFrame;
use tracing::debug;

impl PhaseSpace<'_> {
    /// Minimum probe energy at which the final state is kinematically reachable.
    ///
    /// The energy is quoted in the frame [`PhaseSpace::is_above_threshold`] compares
    /// it in: the hit-nucleon rest frame for nucleon-level channels, the lab frame
    /// for channels on the whole nucleus or on atomic electrons.
    pub fn threshold(&self) -> Result<f64, PhaseSpaceError> {
        let interaction = self.interaction;
        let process = interaction.process();
        let xcls = interaction.exclusive();
        let target = interaction.target();
        let ml = self.lepton_mass();

        if !process.is_known() {
            tracing::error!("Cannot compute a threshold for '{}'", process);
            return Err(PhaseSpaceError::UnsupportedChannel(*process));
        }

        let ethr = match self.kind() {
            K::SinglePion => {
                self.require_hit_nucleon()?;
                let mi = self.nucleon_mass();
                let mf = particle_mass(xcls.final_nucleon())?;
                let pion = xcls.single_pion().ok_or_else(|| {
                    PhaseSpaceError::UnresolvedChannel(
                        "single-pion final state has no unique pion".into(),
                    )
                })?;
                let mpi = particle_mass(pion)?;
                let m_probe = interaction.init_state().probe_mass();
                let mtot = mf + ml + mpi;
                (mtot * mtot - mi * mi - m_probe * m_probe) / (2.0 * mi)
            }

            K::Normalization => 0.0,

            K::SingleKaon => {
                self.require_hit_nucleon()?;
                let kaon = xcls.strange_hadron.ok_or_else(|| {
                    PhaseSpaceError::UnresolvedChannel("single-kaon final state has no kaon".into())
                })?;
                let mi = self.nucleon_mass();
                let mf = particle_mass(xcls.final_nucleon())?;
                let mk = particle_mass(kaon)?;
                let mtot = mf + ml + mk;
                (mtot * mtot - mi * mi) / (2.0 * mi)
            }

            K::CoherentElastic => ml + 0.5 * ml * ml / target.mass(),

            K::CoherentProduction => {
                let m = ml + self.coherent_produced_mass();
                m + 0.5 * m * m / target.mass()
            }

            K::QuasiElastic
            | K::DarkMatterElastic
            | K::InverseBetaDecay
            | K::Resonant
            | K::DeepInelastic
            | K::DarkMatterDeepInelastic
            | K::Diffractive => {
                let hit = self.require_hit_nucleon()?;
                let mn = self.nucleon_mass();
                let mn2 = mn * mn;
                let kind = self.kind();
                let qe_like = matches!(
                    kind,
                    K::QuasiElastic | K::DarkMatterElastic | K::InverseBetaDecay
                );

                let mut wmin = NUCLEON_MASS + PION_MASS;
                if qe_like {
                    let final_nucleon = if process.is_weak_cc() {
                        particle::switch_proton_neutron(hit)
                    } else {
                        hit
                    };
                    wmin = particle_mass(final_nucleon)?;
                }
                if kind == K::Resonant {
                    wmin = NUCLEON_MASS + PHOTON_TEST_MASS;
                }
                if xcls.is_charm_event() {
                    wmin = match xcls.charm_hadron {
                        None => NUCLEON_MASS + LIGHTEST_CHARM_HADRON_MASS,
                        Some(pdg) => {
                            let mchm = particle_mass(pdg)?;
                            if matches!(kind, K::QuasiElastic | K::InverseBetaDecay) {
                                mchm + A_SMALL_NUM
                            } else {
                                NEUTRON_MASS + mchm + A_SMALL_NUM
                            }
                        }
                    };
                }

                if matches!(kind, K::DarkMatterElastic | K::DarkMatterDeepInelastic) {
                    let smin = (mn + ml).powi(2);
                    (0.5 * (smin - mn2 - ml * ml) / mn).max(ml)
                } else {
                    let smin = (wmin + ml).powi(2);
                    0.5 * (smin - mn2) / mn
                }
            }

            K::InverseMuonDecay | K::IMDAnnihilation => {
                0.5 * (MUON_MASS2 - ELECTRON_MASS2) / ELECTRON_MASS
            }

            K::NuElectronElastic | K::DarkMatterElectronElastic | K::AMNuGamma => 0.0,

            K::MEC => {
                if target.hit_nucleon_is_set() {
                    let mn = self.nucleon_mass();
                    let wmin = self.recoil_mass()?;
                    let smin = (wmin + ml).powi(2);
                    0.5 * (smin - mn * mn) / mn
                } else {
                    ml
                }
            }

            K::GlashowResonance => 0.5 * (ml * ml - ELECTRON_MASS2) / ELECTRON_MASS,

            K::PhotonResonance => {
                let mn = self.nucleon_mass();
                0.5 * (ml * ml - mn * mn) / mn
            }

            K::PhotonCoherent => {
                let probe = interaction.probe_pdg();
                let ml = if particle::is_nu_e(probe) {
                    ELECTRON_MASS
                } else if particle::is_nu_mu(probe) {
                    MUON_MASS
                } else if particle::is_nu_tau(probe) {
                    TAU_MASS
                } else {
                    0.0
                };
                let ma = target.z() as f64 * PROTON_MASS + target.n() as f64 * NEUTRON_MASS;
                0.5 * ((W_BOSON_MASS + ml).powi(2) - ma * ma) / ma
            }

            K::Unknown => {
                tracing::error!("Cannot compute a threshold for '{}'", process);
                return Err(PhaseSpaceError::UnsupportedChannel(*process));
            }
        };

        Ok(ethr.max(0.0))
    }

    /// Frame in which the probe energy is compared against the threshold.
    pub fn threshold_frame(&self) -> RefFrame {
        match self.kind() {
            K::CoherentElastic
            | K::CoherentProduction
            | K::InverseMuonDecay
            | K::IMDAnnihilation
            | K::NuElectronElastic
            | K::DarkMatterElectronElastic
            | K::MEC
            | K::PhotonCoherent
            | K::PhotonResonance
            | K::GlashowResonance
            | K::Normalization
            | K::Unknown => RefFrame::Lab,

            K::QuasiElastic
            | K::DarkMatterElastic
            | K::InverseBetaDecay
            | K::Resonant
            | K::DeepInelastic
            | K::DarkMatterDeepInelastic
            | K::Diffractive
            | K::SingleKaon
            | K::SinglePion
            | K::AMNuGamma => RefFrame::HitNucleonRest,
        }
    }

    /// True when the probe energy strictly exceeds [`PhaseSpace::threshold`].
    pub fn is_above_threshold(&self) -> Result<bool, PhaseSpaceError> {
        let ethr = self.threshold()?;
        let e = self.interaction.probe_energy(self.threshold_frame());
        debug!("E = {e}, Ethr = {ethr}");
        Ok(e > ethr)
    }
}
