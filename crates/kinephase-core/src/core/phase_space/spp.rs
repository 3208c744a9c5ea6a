//! Single-pion production helpers, both for a resolved isospin channel and for
//! the isospin-averaged case where only the pion count is known.

use super::{PhaseSpace, PhaseSpaceError, particle_mass};
use crate::core::constants::{NUCLEON_MASS, PI0_MASS, PION_MASS};
use crate::core::models::particle::{self, Pdg};
use crate::core::utils::range::{Range1D, snap_degenerate};
use tracing::warn;

const AVERAGE_PION_MASS: f64 = (2.0 * PION_MASS + PI0_MASS) / 3.0;

/// A resolved single-pion isospin channel, `N + probe -> N' + lepton + π`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SppChannel {
    pub initial_nucleon: Pdg,
    pub final_nucleon: Pdg,
    pub pion: Pdg,
}

fn hadron_charge(pdg: Pdg) -> Option<i32> {
    match pdg {
        particle::PROTON | particle::PI_PLUS => Some(1),
        particle::NEUTRON | particle::PI0 => Some(0),
        particle::PI_MINUS => Some(-1),
        _ => None,
    }
}

/// Drops inverted windows, then snaps near-degenerate ones.
fn snapped(range: Range1D) -> Range1D {
    if !range.is_valid() {
        return Range1D::UNDEFINED;
    }
    snap_degenerate(range)
}

impl PhaseSpace<'_> {
    /// Resolves the isospin channel from the hit nucleon and the exclusive tag,
    /// checking that the hadronic charge balances.
    pub fn spp_channel(&self) -> Result<SppChannel, PhaseSpaceError> {
        let initial_nucleon = self.require_hit_nucleon()?;
        if !particle::is_nucleon(initial_nucleon) {
            return Err(PhaseSpaceError::UnresolvedChannel(format!(
                "single-pion production off {initial_nucleon}"
            )));
        }
        let xcls = self.interaction.exclusive();
        let final_nucleon = xcls.final_nucleon();
        let pion = xcls.single_pion().ok_or_else(|| {
            PhaseSpaceError::UnresolvedChannel("final state has no unique pion".into())
        })?;

        let process = self.interaction.process();
        let probe = self.interaction.probe_pdg();
        let transferred = if process.is_weak_cc() {
            if particle::is_anti_neutrino(probe) { -1 } else { 1 }
        } else {
            0
        };
        let charge_in = hadron_charge(initial_nucleon).unwrap_or(0) + transferred;
        let charge_out = hadron_charge(final_nucleon).unwrap_or(0) + hadron_charge(pion).unwrap_or(0);
        if charge_in != charge_out {
            return Err(PhaseSpaceError::UnresolvedChannel(format!(
                "charge is not conserved in {initial_nucleon} -> {final_nucleon} + {pion}"
            )));
        }

        Ok(SppChannel {
            initial_nucleon,
            final_nucleon,
            pion,
        })
    }

    /// Threshold with every hadron replaced by its isospin-averaged mass.
    pub fn threshold_spp_iso(&self) -> f64 {
        let m = NUCLEON_MASS;
        let mi = self.interaction.init_state().probe_mass();
        let mtot = m + self.lepton_mass() + AVERAGE_PION_MASS;
        ((mtot * mtot - m * m - mi * mi) / (2.0 * m)).max(0.0)
    }

    /// W limits for the resolved channel: from the nucleon-pion mass sum up to the
    /// centre-of-mass energy left after the lepton.
    pub fn w_lim_spp(&self) -> Result<Range1D, PhaseSpaceError> {
        let channel = self.spp_channel()?;
        let min = particle_mass(channel.final_nucleon)? + particle_mass(channel.pion)?;
        let max = self.interaction.init_state().cm_energy() - self.lepton_mass();
        Ok(self.traced("W(spp)", snapped(Range1D::new(min, max))))
    }

    /// Isospin-averaged W limits, for a nucleon of average mass at rest.
    pub fn w_lim_spp_iso(&self) -> Range1D {
        let m = NUCLEON_MASS;
        let mi = self.interaction.init_state().probe_mass();
        let ei = self.energy_rest();
        let ecm = (m * (m + 2.0 * ei) + mi * mi).max(0.0).sqrt();
        let range = Range1D::new(m + AVERAGE_PION_MASS, ecm - self.lepton_mass());
        self.traced("W(spp-iso)", snapped(range))
    }

    /// Q² limits at the running W for the resolved channel, at the actual
    /// centre-of-mass energy of the (possibly off-shell) hit nucleon.
    pub fn q2_lim_w_spp(&self) -> Result<Range1D, PhaseSpaceError> {
        let channel = self.spp_channel()?;
        let m = particle_mass(channel.initial_nucleon)?;
        let ecm = self.interaction.init_state().cm_energy();
        Ok(self.traced("Q2|W(spp)", self.spp_q2_at_running_w(ecm * ecm, m)))
    }

    /// Isospin-averaged Q² limits at the running W, for a nucleon of average
    /// mass at rest.
    pub fn q2_lim_w_spp_iso(&self) -> Range1D {
        let m = NUCLEON_MASS;
        let mi = self.interaction.init_state().probe_mass();
        let s = m * (m + 2.0 * self.energy_rest()) + mi * mi;
        self.traced("Q2|W(spp-iso)", self.spp_q2_at_running_w(s, m))
    }

    fn spp_q2_at_running_w(&self, s: f64, nucleon_mass: f64) -> Range1D {
        let Some(w) = self.interaction.kinematics.w else {
            warn!("Running W is not set; single-pion Q2 limits are undefined");
            return Range1D::UNDEFINED;
        };
        let mi = self.interaction.init_state().probe_mass();
        spp_q2_lim_w(s, nucleon_mass, mi, self.lepton_mass(), w)
    }
}

/// Two-body Q² limits in the centre-of-mass frame at squared energy `s`, for a
/// probe of mass `mi` on a nucleon of mass `m`, at hadronic mass `w`.
fn spp_q2_lim_w(s: f64, m: f64, mi: f64, ml: f64, w: f64) -> Range1D {
    let mi2 = mi * mi;
    let ml2 = ml * ml;
    let ecm = s.max(0.0).sqrt();
    if ecm <= w + ml {
        return Range1D::UNDEFINED;
    }

    let ei_cm = (s + mi2 - m * m) / (2.0 * ecm);
    let pi_cm = (ei_cm * ei_cm - mi2).max(0.0).sqrt();
    let el_cm = (s + ml2 - w * w) / (2.0 * ecm);
    let pl_cm = (el_cm * el_cm - ml2).max(0.0).sqrt();

    let min = (2.0 * (ei_cm * el_cm - pi_cm * pl_cm) - ml2 - mi2).max(0.0);
    let max = 2.0 * (ei_cm * el_cm + pi_cm * pl_cm) - ml2 - mi2;
    snapped(Range1D::new(min, max))
}
