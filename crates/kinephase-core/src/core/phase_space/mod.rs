//! # Phase Space Module
//!
//! The phase-space boundary engine: thresholds, per-variable kinematic limits and
//! the allowed-region test for a single interaction.
//!
//! ## Overview
//!
//! [`PhaseSpace`] borrows one [`Interaction`] and answers every boundary question
//! about it by dispatching on the closed [`ScatteringKind`] enum to the pure
//! formulas in [`crate::core::kinematics`]. It never mutates the interaction: when
//! a limit needs `W` or `Q²` derived from the running `x` and `y`, the derivation
//! is done locally.
//!
//! ## Architecture
//!
//! - **Thresholds** ([`threshold`]) - minimum probe energy per channel and the
//!   strict above-threshold test
//! - **Limits** ([`limits`]) - W, Q², q², x, y and t ranges, and the
//!   variable-tagged `limits` dispatcher
//! - **Allowed region** ([`allowed`]) - whether the running kinematics lie inside
//!   the channel's limits
//! - **Single pion** ([`spp`]) - channel-resolved and isospin-averaged helpers for
//!   single-pion production
//!
//! ## Failure policy
//!
//! Missing formulas and closed regions are reported as the `{-1, -1}` sentinel
//! from the limit functions so batch loops keep running. Only configurations that
//! cannot be given any meaning (an unknown channel asked for a threshold, a NaN
//! t-minimum, a missing required parameter) surface as [`PhaseSpaceError`].

use crate::core::constants::{A_SMALL_NUM, NUCLEON_MASS, PI0_MASS, PION_MASS};
use crate::core::models::interaction::Interaction;
use crate::core::models::kinematics::KineVar;
use crate::core::models::particle::{self, Pdg};
use crate::core::models::process::{ProcessInfo, ScatteringKind};
use crate::core::models::state::RefFrame;
use crate::core::utils::range::Range1D;
use thiserror::Error;

pub mod allowed;
pub mod limits;
pub mod spp;
pub mod threshold;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhaseSpaceError {
    #[error("No kinematic formula for process '{0}'")]
    UnsupportedChannel(ProcessInfo),

    #[error("Cannot resolve the final state: {0}")]
    UnresolvedChannel(String),

    #[error("{quantity} is not a number ({details})")]
    NumericalError {
        quantity: &'static str,
        details: String,
    },

    #[error("Unknown particle code: {0}")]
    UnknownParticle(Pdg),

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Tunables read by the phase-space engine. Loaded once with the rest of the
/// configuration and passed in explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseSpaceParams {
    /// Upper |t| bound for diffractive scattering (GeV²), `DFR-t-max`.
    pub dfr_t_max: Option<f64>,
}

impl PhaseSpaceParams {
    pub fn with_dfr_t_max(mut self, t_max: f64) -> Self {
        self.dfr_t_max = Some(t_max);
        self
    }
}

/// Phase-space queries bound to one interaction.
#[derive(Debug, Clone)]
pub struct PhaseSpace<'a> {
    interaction: &'a Interaction,
    params: PhaseSpaceParams,
}

impl<'a> PhaseSpace<'a> {
    pub fn new(interaction: &'a Interaction) -> Self {
        Self::with_params(interaction, PhaseSpaceParams::default())
    }

    pub fn with_params(interaction: &'a Interaction, params: PhaseSpaceParams) -> Self {
        Self {
            interaction,
            params,
        }
    }

    /// Rebinds to another interaction. Nothing from the previous binding survives
    /// except the tunables.
    pub fn use_interaction(&mut self, interaction: &'a Interaction) {
        self.interaction = interaction;
    }

    pub fn interaction(&self) -> &'a Interaction {
        self.interaction
    }

    pub fn params(&self) -> &PhaseSpaceParams {
        &self.params
    }

    fn kind(&self) -> ScatteringKind {
        self.interaction.scattering()
    }

    fn is_em(&self) -> bool {
        self.interaction.process().is_em()
    }

    fn lepton_mass(&self) -> f64 {
        self.interaction.fs_lepton_mass()
    }

    fn energy_lab(&self) -> f64 {
        self.interaction.probe_energy(RefFrame::Lab)
    }

    fn energy_rest(&self) -> f64 {
        self.interaction.probe_energy(RefFrame::HitNucleonRest)
    }

    /// Hit nucleon invariant mass; a target without a struck nucleon behaves as if
    /// an average nucleon sat at rest.
    fn nucleon_mass(&self) -> f64 {
        self.interaction.hit_nucleon_mass().unwrap_or(NUCLEON_MASS)
    }

    fn require_hit_nucleon(&self) -> Result<Pdg, PhaseSpaceError> {
        self.interaction
            .target()
            .hit_nucleon_pdg()
            .ok_or_else(|| PhaseSpaceError::UnresolvedChannel("hit nucleon is not set".into()))
    }

    fn recoil_mass(&self) -> Result<f64, PhaseSpaceError> {
        self.interaction.recoil_nucleon_mass().ok_or_else(|| {
            PhaseSpaceError::UnresolvedChannel(format!(
                "no recoil nucleon for '{}'",
                self.interaction.process()
            ))
        })
    }

    /// Mass of the hadronic system produced coherently: a pion when the final state
    /// has one (charged for CC), otherwise a photon-like placeholder.
    fn coherent_produced_mass(&self) -> f64 {
        if self.interaction.exclusive().n_pions() > 0 {
            self.charged_or_neutral_pion_mass()
        } else {
            A_SMALL_NUM
        }
    }

    fn charged_or_neutral_pion_mass(&self) -> f64 {
        if self.interaction.process().is_weak_cc() {
            PION_MASS
        } else {
            PI0_MASS
        }
    }

    /// Passes a computed range through, recording it at trace level.
    fn traced(&self, what: &'static str, range: Range1D) -> Range1D {
        tracing::trace!(
            process = %self.interaction.process(),
            "{what} limits = {range}"
        );
        range
    }

    /// Minimum of [`PhaseSpace::limits`].
    pub fn minimum(&self, var: KineVar) -> Result<f64, PhaseSpaceError> {
        Ok(self.limits(var)?.min)
    }

    /// Maximum of [`PhaseSpace::limits`].
    pub fn maximum(&self, var: KineVar) -> Result<f64, PhaseSpaceError> {
        Ok(self.limits(var)?.max)
    }
}

pub(crate) fn particle_mass(pdg: Pdg) -> Result<f64, PhaseSpaceError> {
    particle::mass(pdg).ok_or(PhaseSpaceError::UnknownParticle(pdg))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::models::exclusive::ExclusiveTag;
    use crate::core::models::interaction::Interaction;
    use crate::core::models::kinematics::Kinematics;
    use crate::core::models::particle::{self, Pdg};
    use crate::core::models::process::{InteractionCurrent, ScatteringKind};
    use crate::core::models::target::Target;

    pub fn numu_on_carbon(
        kind: ScatteringKind,
        current: InteractionCurrent,
        energy: f64,
        hit: Option<Pdg>,
    ) -> Interaction {
        let mut builder = Interaction::builder()
            .process(kind, current)
            .probe(particle::NU_MU, energy)
            .target(Target::new(6, 12));
        if let Some(hit) = hit {
            builder = builder.hit_nucleon(hit);
        }
        builder.build().unwrap()
    }

    pub fn with_tag(interaction: Interaction, tag: ExclusiveTag) -> Interaction {
        Interaction::builder()
            .process(interaction.scattering(), interaction.process().current)
            .probe_p4(interaction.probe_pdg(), *interaction.init_state().probe_p4())
            .target(interaction.target().clone())
            .fs_lepton(interaction.fs_lepton_pdg())
            .exclusive(tag)
            .kinematics(interaction.kinematics)
            .build()
            .unwrap()
    }

    pub fn with_kinematics(mut interaction: Interaction, kinematics: Kinematics) -> Interaction {
        interaction.kinematics = kinematics;
        interaction
    }
}
