use super::particle::{self, Pdg};
use super::target::Target;
use crate::core::utils::lorentz::{self, P4};

/// Reference frame in which a probe energy is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefFrame {
    Lab,
    HitNucleonRest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitialState {
    probe_pdg: Pdg,
    probe_p4: P4,
    target: Target,
}

impl InitialState {
    pub fn new(probe_pdg: Pdg, probe_p4: P4, target: Target) -> Self {
        Self {
            probe_pdg,
            probe_p4,
            target,
        }
    }

    pub fn probe_pdg(&self) -> Pdg {
        self.probe_pdg
    }

    pub fn probe_p4(&self) -> &P4 {
        &self.probe_p4
    }

    pub fn set_probe_p4(&mut self, p4: P4) {
        self.probe_p4 = p4;
    }

    /// Probe rest mass: the particle table for known codes, the four-momentum
    /// invariant otherwise (dark matter).
    pub fn probe_mass(&self) -> f64 {
        particle::mass(self.probe_pdg).unwrap_or_else(|| lorentz::mass(&self.probe_p4).max(0.0))
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut Target {
        &mut self.target
    }

    /// Probe energy in the requested frame.
    ///
    /// The hit-nucleon rest frame energy is the invariant `p·P / M`; it falls back
    /// to the lab energy when no hit nucleon is set.
    pub fn probe_energy(&self, frame: RefFrame) -> f64 {
        match frame {
            RefFrame::Lab => self.probe_p4.w,
            RefFrame::HitNucleonRest => match self.target.hit_nucleon() {
                Some(hit) => {
                    let m = lorentz::mass(&hit.p4);
                    if m > 0.0 {
                        lorentz::dot(&self.probe_p4, &hit.p4) / m
                    } else {
                        self.probe_p4.w
                    }
                }
                None => self.probe_p4.w,
            },
        }
    }

    /// Four-momentum of the struck system: the hit nucleon when set, otherwise the
    /// whole target at rest.
    fn struck_p4(&self) -> P4 {
        match self.target.hit_nucleon() {
            Some(hit) => hit.p4,
            None => lorentz::at_rest(self.target.mass()),
        }
    }

    /// Centre-of-mass energy √s of probe plus struck system.
    pub fn cm_energy(&self) -> f64 {
        let total = self.probe_p4 + self.struck_p4();
        lorentz::mass2(&total).max(0.0).sqrt()
    }
}
