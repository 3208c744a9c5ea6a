use super::particle::{self, Pdg};
use std::fmt;

/// Final-state exclusivity annotations used to adjust mass thresholds.
///
/// An inclusive charm (or strange) final state sets the flag without a hadron
/// code; an exclusive one names the produced hadron.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExclusiveTag {
    pub n_protons: u32,
    pub n_neutrons: u32,
    pub n_pi_plus: u32,
    pub n_pi_minus: u32,
    pub n_pi0: u32,
    pub charm: bool,
    pub charm_hadron: Option<Pdg>,
    pub strange: bool,
    pub strange_hadron: Option<Pdg>,
}

impl ExclusiveTag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nucleons(mut self, n_protons: u32, n_neutrons: u32) -> Self {
        self.n_protons = n_protons;
        self.n_neutrons = n_neutrons;
        self
    }

    pub fn with_pions(mut self, n_pi_plus: u32, n_pi0: u32, n_pi_minus: u32) -> Self {
        self.n_pi_plus = n_pi_plus;
        self.n_pi0 = n_pi0;
        self.n_pi_minus = n_pi_minus;
        self
    }

    pub fn with_inclusive_charm(mut self) -> Self {
        self.charm = true;
        self.charm_hadron = None;
        self
    }

    pub fn with_charm_hadron(mut self, pdg: Pdg) -> Self {
        self.charm = true;
        self.charm_hadron = Some(pdg);
        self
    }

    pub fn with_strange_hadron(mut self, pdg: Pdg) -> Self {
        self.strange = true;
        self.strange_hadron = Some(pdg);
        self
    }

    pub fn n_pions(&self) -> u32 {
        self.n_pi_plus + self.n_pi_minus + self.n_pi0
    }

    pub fn is_charm_event(&self) -> bool {
        self.charm
    }

    pub fn is_inclusive_charm(&self) -> bool {
        self.charm && self.charm_hadron.is_none()
    }

    pub fn is_strange_event(&self) -> bool {
        self.strange
    }

    pub fn is_inclusive_strange(&self) -> bool {
        self.strange && self.strange_hadron.is_none()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The single pion of a one-pion final state, if exactly one multiplicity is one.
    ///
    /// π⁺ takes precedence over π⁻, which takes precedence over π⁰.
    pub fn single_pion(&self) -> Option<Pdg> {
        if self.n_pi_plus == 1 {
            Some(particle::PI_PLUS)
        } else if self.n_pi_minus == 1 {
            Some(particle::PI_MINUS)
        } else if self.n_pi0 == 1 {
            Some(particle::PI0)
        } else {
            None
        }
    }

    /// Final-state nucleon selected by the charge rule: one proton means a proton,
    /// anything else a neutron.
    pub fn final_nucleon(&self) -> Pdg {
        if self.n_protons == 1 {
            particle::PROTON
        } else {
            particle::NEUTRON
        }
    }
}

impl fmt::Display for ExclusiveTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.charm {
            match self.charm_hadron {
                Some(pdg) => write!(f, "charm:{pdg};")?,
                None => write!(f, "charm:incl;")?,
            }
        }
        if self.strange {
            match self.strange_hadron {
                Some(pdg) => write!(f, "strange:{pdg};")?,
                None => write!(f, "strange:incl;")?,
            }
        }
        if self.n_protons + self.n_neutrons > 0 {
            write!(f, "N(p={},n={});", self.n_protons, self.n_neutrons)?;
        }
        if self.n_pions() > 0 {
            write!(
                f,
                "pi(+={},0={},-={});",
                self.n_pi_plus, self.n_pi0, self.n_pi_minus
            )?;
        }
        Ok(())
    }
}
