use super::{PhaseSpace, PhaseSpaceError, particle_mass};
use crate::core::constants::{
    A_SMALL_NUM, COH_T_MAX, ELECTRON_MASS, ELECTRON_MASS2, LIGHTEST_CHARM_HADRON_MASS,
    MEC_Q2_MAX, MIN_Q2_LIMIT, MIN_Q2_LIMIT_VLE, NEUTRON_MASS, PION_MASS,
};
use crate::core::kinematics::{coherent, conversions, dark, electromagnetic, inelastic};
use crate::core::models::kinematics::KineVar;
use crate::core::models::process::ScatteringKind as K;
use crate::core::utils::range::Range1D;
use tracing::{error, warn};

impl PhaseSpace<'_> {
    /// Limits of one kinematic variable.
    ///
    /// Variables without a calculator are logged and answered with the sentinel.
    pub fn limits(&self, var: KineVar) -> Result<Range1D, PhaseSpaceError> {
        match var {
            KineVar::W => self.w_lim(),
            KineVar::Q2 => self.q2_lim(),
            KineVar::SmallQ2 => self.small_q2_lim(),
            KineVar::X => Ok(self.x_lim()),
            KineVar::Y => Ok(self.y_lim()),
            KineVar::T => self.t_lim(),
            other => {
                error!("No kinematic limits for variable '{}'", other.as_str());
                Ok(Range1D::UNDEFINED)
            }
        }
    }

    /// Hadronic invariant mass limits.
    pub fn w_lim(&self) -> Result<Range1D, PhaseSpaceError> {
        if !self.interaction.process().is_known() {
            error!("Unknown process '{}'", self.interaction.process());
            return Ok(Range1D::UNDEFINED);
        }
        let range = match self.kind() {
            K::QuasiElastic | K::InverseBetaDecay | K::DarkMatterElastic => {
                Range1D::point(self.recoil_mass()?)
            }
            K::DeepInelastic | K::Resonant | K::Diffractive => {
                let (ev, m, ml) = (self.energy_rest(), self.nucleon_mass(), self.lepton_mass());
                let w = if self.is_em() {
                    electromagnetic::w_lim(ev, m, ml)
                } else {
                    inelastic::w_lim(ev, m, ml)
                };
                self.raise_w_floor(w)
            }
            K::DarkMatterDeepInelastic => {
                let w = dark::w_lim(self.energy_rest(), self.nucleon_mass(), self.lepton_mass());
                self.raise_w_floor(w)
            }
            _ => Range1D::UNDEFINED,
        };
        Ok(self.traced("W", range))
    }

    fn raise_w_floor(&self, mut w: Range1D) -> Range1D {
        if w.is_undefined() {
            return w;
        }
        if self.interaction.exclusive().is_charm_event() {
            w.min = w.min.max(NEUTRON_MASS + LIGHTEST_CHARM_HADRON_MASS);
        }
        if matches!(self.kind(), K::Diffractive | K::DeepInelastic) {
            w.min = w.min.max(NEUTRON_MASS + PION_MASS);
        }
        if w.min > w.max {
            return Range1D::UNDEFINED;
        }
        w
    }

    /// Q² limits at the running W (or at the fixed recoil mass for elastic-like
    /// channels).
    pub fn q2_lim_w(&self) -> Result<Range1D, PhaseSpaceError> {
        if !self.interaction.process().is_known() {
            error!("Unknown process '{}'", self.interaction.process());
            return Ok(Range1D::UNDEFINED);
        }
        let range = match self.kind() {
            K::CoherentProduction => return self.q2_lim(),
            K::QuasiElastic | K::InverseBetaDecay | K::DarkMatterElastic => {
                self.q2_lim_w_at(self.recoil_mass()?)
            }
            K::DeepInelastic | K::Resonant | K::Diffractive | K::DarkMatterDeepInelastic => {
                match self.interaction.kinematics.w {
                    Some(w) => self.q2_lim_w_at(w),
                    None => {
                        warn!("Running W is not set; Q2 limits are undefined");
                        Range1D::UNDEFINED
                    }
                }
            }
            _ => Range1D::UNDEFINED,
        };
        Ok(self.traced("Q2|W", range))
    }

    /// Q² limits at an explicit hadronic mass `w`, with the cut appropriate to the
    /// channel.
    pub(crate) fn q2_lim_w_at(&self, w: f64) -> Range1D {
        let (ev, m, ml) = (self.energy_rest(), self.nucleon_mass(), self.lepton_mass());
        match self.kind() {
            K::DarkMatterElastic | K::DarkMatterDeepInelastic => dark::q2_lim_w(ev, m, ml, w),
            K::InverseBetaDecay => inelastic::q2_lim_w(ev, m, ml, w, MIN_Q2_LIMIT_VLE),
            _ if self.is_em() => electromagnetic::q2_lim_w(ev, m, ml, w, MIN_Q2_LIMIT),
            _ => inelastic::q2_lim_w(ev, m, ml, w, MIN_Q2_LIMIT),
        }
    }

    /// Signed momentum transfer limits at the running W: the mirror of
    /// [`PhaseSpace::q2_lim_w`].
    pub fn small_q2_lim_w(&self) -> Result<Range1D, PhaseSpaceError> {
        Ok(self.q2_lim_w()?.reflected())
    }

    /// W-integrated signed momentum transfer limits.
    pub fn small_q2_lim(&self) -> Result<Range1D, PhaseSpaceError> {
        Ok(self.q2_lim()?.reflected())
    }

    /// W-integrated Q² limits.
    pub fn q2_lim(&self) -> Result<Range1D, PhaseSpaceError> {
        if !self.interaction.process().is_known() {
            error!("Unknown process '{}'", self.interaction.process());
            return Ok(Range1D::UNDEFINED);
        }
        let (ev, m, ml) = (self.energy_rest(), self.nucleon_mass(), self.lepton_mass());
        let range = match self.kind() {
            K::CoherentElastic => coherent::cevns_q2_lim(self.energy_lab()),
            K::CoherentProduction => coherent::q2_lim(m, self.coherent_produced_mass(), ml, ev),
            K::QuasiElastic | K::InverseBetaDecay | K::DarkMatterElastic => {
                let w = self.elastic_hadron_mass()?;
                self.q2_lim_w_at(w)
            }
            K::MEC => {
                let w = self.recoil_mass()?;
                let mut q2 = if self.is_em() {
                    electromagnetic::q2_lim_w(ev, m, ml, w, MIN_Q2_LIMIT)
                } else {
                    inelastic::q2_lim_w(ev, m, ml, w, MIN_Q2_LIMIT)
                };
                if q2.is_valid() {
                    q2.max = q2.max.min(MEC_Q2_MAX);
                    if q2.max < q2.min {
                        q2 = Range1D::UNDEFINED;
                    }
                }
                q2
            }
            K::DarkMatterDeepInelastic => dark::q2_lim(ev, m, ml),
            K::DeepInelastic | K::Resonant | K::Diffractive => {
                if self.is_em() {
                    electromagnetic::q2_lim(ev, m, ml, MIN_Q2_LIMIT)
                } else {
                    inelastic::q2_lim(ev, m, ml, MIN_Q2_LIMIT)
                }
            }
            _ => Range1D::UNDEFINED,
        };
        Ok(self.traced("Q2", range))
    }

    /// Hadronic mass of an elastic-like final state: the exclusive charm or
    /// strange hadron when tagged, otherwise the recoil nucleon.
    fn elastic_hadron_mass(&self) -> Result<f64, PhaseSpaceError> {
        let xcls = self.interaction.exclusive();
        if xcls.is_charm_event() {
            let pdg = xcls.charm_hadron.ok_or_else(|| {
                PhaseSpaceError::UnresolvedChannel(
                    "quasi-elastic charm production needs an exclusive charm hadron".into(),
                )
            })?;
            return particle_mass(pdg);
        }
        if let Some(pdg) = xcls.strange_hadron.filter(|_| xcls.is_strange_event()) {
            return particle_mass(pdg);
        }
        self.recoil_mass()
    }

    /// Bjorken x limits.
    pub fn x_lim(&self) -> Range1D {
        if !self.interaction.process().is_known() {
            error!("Unknown process '{}'", self.interaction.process());
            return Range1D::UNDEFINED;
        }
        let (ev, m, ml) = (self.energy_rest(), self.nucleon_mass(), self.lepton_mass());
        let range = match self.kind() {
            K::DeepInelastic | K::Resonant => {
                if self.is_em() {
                    electromagnetic::x_lim(ev, m, ml)
                } else {
                    inelastic::x_lim(ev, m, ml)
                }
            }
            K::DarkMatterDeepInelastic => dark::x_lim(ev, m, ml),
            K::CoherentProduction => coherent::x_lim(),
            K::QuasiElastic | K::InverseBetaDecay | K::DarkMatterElastic => Range1D::point(1.0),
            K::Diffractive => Range1D::new(A_SMALL_NUM, 1.0 - A_SMALL_NUM),
            _ => Range1D::UNDEFINED,
        };
        self.traced("x", range)
    }

    /// x-integrated inelasticity limits.
    pub fn y_lim(&self) -> Range1D {
        if !self.interaction.process().is_known() {
            error!("Unknown process '{}'", self.interaction.process());
            return Range1D::UNDEFINED;
        }
        let (ev, m, ml) = (self.energy_rest(), self.nucleon_mass(), self.lepton_mass());
        let range = match self.kind() {
            K::DeepInelastic | K::Resonant => {
                if self.is_em() {
                    electromagnetic::y_lim(ev, m, ml)
                } else {
                    inelastic::y_lim(ev, m, ml)
                }
            }
            K::DarkMatterDeepInelastic => dark::y_lim(ev, m, ml),
            K::CoherentProduction => coherent::y_lim(self.energy_lab(), ml),
            K::InverseMuonDecay | K::IMDAnnihilation | K::NuElectronElastic => {
                let e = self.energy_lab();
                let ceiling = 1.0 - (ml * ml + ELECTRON_MASS2) / (2.0 * ELECTRON_MASS * e);
                Range1D::new(A_SMALL_NUM, ceiling - A_SMALL_NUM)
            }
            K::DarkMatterElectronElastic => {
                let e = self.energy_lab();
                let me = ELECTRON_MASS;
                let ml2 = ml * ml;
                let floor =
                    (e * me * me + ml2 * (e + 2.0 * me)) / (e * (2.0 * e * me + me * me + ml2));
                Range1D::new(floor + A_SMALL_NUM, 1.0 - A_SMALL_NUM)
            }
            K::Diffractive => Range1D::new(PION_MASS / ev + A_SMALL_NUM, 1.0 - ml / ev - A_SMALL_NUM),
            _ => Range1D::UNDEFINED,
        };
        self.traced("y", range)
    }

    /// Inelasticity limits at the running Bjorken x.
    pub fn y_lim_x(&self) -> Range1D {
        if !self.interaction.process().is_known() {
            error!("Unknown process '{}'", self.interaction.process());
            return Range1D::UNDEFINED;
        }
        let (ev, m, ml) = (self.energy_rest(), self.nucleon_mass(), self.lepton_mass());
        let range = match self.kind() {
            K::DeepInelastic | K::Resonant | K::DarkMatterDeepInelastic => {
                let Some(x) = self.interaction.kinematics.x else {
                    warn!("Running x is not set; y limits are undefined");
                    return Range1D::UNDEFINED;
                };
                if self.kind() == K::DarkMatterDeepInelastic {
                    dark::y_lim_x(ev, m, ml, x)
                } else if self.is_em() {
                    electromagnetic::y_lim_x(ev, m, ml, x)
                } else {
                    inelastic::y_lim_x(ev, m, ml, x)
                }
            }
            K::CoherentProduction => coherent::y_lim(self.energy_lab(), ml),
            _ => Range1D::UNDEFINED,
        };
        self.traced("y|x", range)
    }

    /// Paschos–Schalla ξ-parameterized y limits at the running Q² for coherent
    /// production; every other channel ignores ξ and answers [`PhaseSpace::y_lim`].
    pub fn y_lim_xi(&self, xi: f64) -> Range1D {
        if self.kind() != K::CoherentProduction {
            return self.y_lim();
        }
        let Some(q2) = self.interaction.kinematics.q2 else {
            warn!("Running Q2 is not set; coherent y limits are undefined");
            return Range1D::UNDEFINED;
        };
        let range = coherent::y_lim_xi(
            self.interaction.target().mass(),
            self.coherent_produced_mass(),
            self.lepton_mass(),
            self.energy_rest(),
            q2,
            xi,
        );
        self.traced("y(xi)", range)
    }

    /// ξ-parameterized variant of [`PhaseSpace::y_lim_x`].
    pub fn y_lim_x_xi(&self, xi: f64) -> Range1D {
        if self.kind() == K::CoherentProduction {
            self.y_lim_xi(xi)
        } else {
            self.y_lim_x()
        }
    }

    /// Momentum transfer to the nucleus, |t|, at the running (x, y).
    pub fn t_lim(&self) -> Result<Range1D, PhaseSpaceError> {
        let kind = self.kind();
        if !matches!(kind, K::CoherentProduction | K::Diffractive) {
            warn!(
                "t limits are only defined for coherent and diffractive scattering, not '{}'",
                self.interaction.process()
            );
            return Ok(Range1D::UNDEFINED);
        }
        let (Some(x), Some(y)) = (self.interaction.kinematics.x, self.interaction.kinematics.y)
        else {
            warn!("Running x and y must be set to compute t limits");
            return Ok(Range1D::UNDEFINED);
        };

        let ev = self.energy_rest();
        let m = self.nucleon_mass();
        let q2 = conversions::q2_from_xy(ev, m, x, y);
        let nu = ev * y;

        let range = if kind == K::CoherentProduction {
            let m_other = self.coherent_produced_mass();
            let t_min = ((q2 + m_other * m_other) / (2.0 * nu)).powi(2);
            Range1D::new(t_min, COH_T_MAX)
        } else {
            let t_min = diffractive_t_min(nu, q2, m, self.charged_or_neutral_pion_mass());
            if t_min.is_nan() {
                error!("Diffractive t-min is NaN (nu = {nu}, Q2 = {q2})");
                return Err(PhaseSpaceError::NumericalError {
                    quantity: "diffractive t-min",
                    details: format!("nu = {nu}, Q2 = {q2}"),
                });
            }
            let t_max = self
                .params
                .dfr_t_max
                .ok_or(PhaseSpaceError::MissingParameter("DFR-t-max"))?;
            Range1D::new(t_min, t_max)
        };
        Ok(self.traced("t", range))
    }
}

/// Smallest |t| for diffractive pion production off a nucleon of mass `m`.
fn diffractive_t_min(nu: f64, q2: f64, m: f64, m_pi: f64) -> f64 {
    let m_pi2 = m_pi * m_pi;
    let nu_m = nu / m;
    let nu2 = nu * nu;

    let a1 = 1.0 + 2.0 * nu_m + nu_m * nu_m - (nu2 + q2) / (m * m);
    let a2 = (1.0 + nu_m) * (m_pi2 - q2 - 2.0 * nu2) + 2.0 * nu_m * (nu2 + q2);
    let a3 = (m_pi2 - q2 - 2.0 * nu2).powi(2) - 4.0 * (nu2 + q2) * (nu2 - m_pi2);

    ((a2 + (a2 * a2 - a1 * a3).sqrt()) / a1).abs()
}

#[cfg(test)]
mod tests {
    use super::super::PhaseSpaceParams;
    use super::super::test_support::{numu_on_carbon, with_kinematics, with_tag};
    use super::*;
    use crate::core::models::exclusive::ExclusiveTag;
    use crate::core::models::interaction::Interaction;
    use crate::core::models::kinematics::Kinematics;
    use crate::core::models::particle;
    use crate::core::constants::MUON_MASS2;
    use crate::core::models::process::InteractionCurrent as C;
    use crate::core::models::target::Target;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn quasi_elastic_w_is_degenerate_at_recoil_mass() {
        let interaction = numu_on_carbon(K::QuasiElastic, C::WeakCC, 1.0, Some(particle::NEUTRON));
        let w = PhaseSpace::new(&interaction).w_lim().unwrap();
        assert_eq!(w.min, w.max);
        assert!((w.min - interaction.recoil_nucleon_mass().unwrap()).abs() < TOLERANCE);
    }

    #[test]
    fn small_q2_limits_mirror_q2_limits() {
        let interaction = numu_on_carbon(K::DeepInelastic, C::WeakCC, 5.0, Some(particle::NEUTRON));
        let ps = PhaseSpace::new(&interaction);
        let big = ps.q2_lim().unwrap();
        let small = ps.small_q2_lim().unwrap();
        assert!(big.is_valid());
        assert_eq!(small.min, -big.max);
        assert_eq!(small.max, -big.min);
    }

    #[test]
    fn deep_inelastic_y_window_widens_with_energy() {
        let widths: Vec<f64> = [2.0, 5.0, 20.0]
            .iter()
            .map(|&e| {
                let interaction =
                    numu_on_carbon(K::DeepInelastic, C::WeakCC, e, Some(particle::NEUTRON));
                PhaseSpace::new(&interaction).y_lim().width()
            })
            .collect();
        assert!(widths[0] <= widths[1] && widths[1] <= widths[2]);
    }

    #[test]
    fn deep_inelastic_w_floor_leaves_room_for_a_pion() {
        let interaction = numu_on_carbon(K::DeepInelastic, C::WeakCC, 5.0, Some(particle::NEUTRON));
        let w = PhaseSpace::new(&interaction).w_lim().unwrap();
        assert!(w.min >= NEUTRON_MASS + PION_MASS);
    }

    #[test]
    fn charm_floor_closes_w_window_below_charm_threshold() {
        let interaction = with_tag(
            numu_on_carbon(K::DeepInelastic, C::WeakCC, 1.5, Some(particle::NEUTRON)),
            ExclusiveTag::new().with_inclusive_charm(),
        );
        assert!(PhaseSpace::new(&interaction).w_lim().unwrap().is_undefined());
    }

    #[test]
    fn mec_q2_ceiling_is_capped() {
        let interaction = numu_on_carbon(K::MEC, C::WeakCC, 10.0, Some(particle::CLUSTER_NP));
        let q2 = PhaseSpace::new(&interaction).q2_lim().unwrap();
        assert!(q2.is_valid());
        assert!(q2.max <= MEC_Q2_MAX);
    }

    #[test]
    fn coherent_elastic_q2_uses_lab_energy() {
        let interaction = numu_on_carbon(K::CoherentElastic, C::WeakNC, 0.03, None);
        let q2 = PhaseSpace::new(&interaction).q2_lim().unwrap();
        assert!((q2.max - 4.0 * 0.03 * 0.03).abs() < 1e-15);
    }

    #[test]
    fn running_w_is_required_for_inelastic_q2_at_fixed_w() {
        let interaction = numu_on_carbon(K::Resonant, C::WeakCC, 2.0, Some(particle::PROTON));
        assert!(PhaseSpace::new(&interaction).q2_lim_w().unwrap().is_undefined());

        let interaction = with_kinematics(interaction, Kinematics::new().with_wq2(1.232, 0.5));
        assert!(PhaseSpace::new(&interaction).q2_lim_w().unwrap().is_valid());
    }

    #[test]
    fn channels_without_formula_answer_the_sentinel() {
        let interaction = numu_on_carbon(K::InverseMuonDecay, C::WeakCC, 20.0, None);
        let ps = PhaseSpace::new(&interaction);
        assert!(ps.w_lim().unwrap().is_undefined());
        assert!(ps.x_lim().is_undefined());
        assert!(ps.y_lim().is_valid());
    }

    #[test]
    fn unknown_variable_answers_the_sentinel() {
        let interaction = numu_on_carbon(K::DeepInelastic, C::WeakCC, 5.0, Some(particle::NEUTRON));
        let range = PhaseSpace::new(&interaction).limits(KineVar::Nu).unwrap();
        assert!(range.is_undefined());
    }

    #[test]
    fn minimum_and_maximum_project_limits() {
        let interaction = numu_on_carbon(K::DeepInelastic, C::WeakCC, 5.0, Some(particle::NEUTRON));
        let ps = PhaseSpace::new(&interaction);
        let x = ps.limits(KineVar::X).unwrap();
        assert_eq!(ps.minimum(KineVar::X).unwrap(), x.min);
        assert_eq!(ps.maximum(KineVar::X).unwrap(), x.max);
    }

    #[test]
    fn t_limits_on_inapplicable_channel_are_the_sentinel() {
        let interaction = numu_on_carbon(K::QuasiElastic, C::WeakCC, 1.0, Some(particle::NEUTRON));
        assert!(PhaseSpace::new(&interaction).t_lim().unwrap().is_undefined());
    }

    #[test]
    fn coherent_t_limits_have_fixed_ceiling() {
        let interaction = with_kinematics(
            numu_on_carbon(K::CoherentProduction, C::WeakCC, 2.0, None),
            Kinematics::new().with_xy(0.1, 0.3),
        );
        let t = PhaseSpace::new(&interaction).t_lim().unwrap();
        assert_eq!(t.max, COH_T_MAX);
        assert!(t.min > 0.0);
    }

    fn diffractive(energy: f64, x: f64, y: f64) -> Interaction {
        with_kinematics(
            numu_on_carbon(K::Diffractive, C::WeakCC, energy, Some(particle::PROTON)),
            Kinematics::new().with_xy(x, y),
        )
    }

    #[test]
    fn diffractive_t_max_is_a_required_parameter() {
        let interaction = diffractive(5.0, 0.1, 0.3);
        assert_eq!(
            PhaseSpace::new(&interaction).t_lim(),
            Err(PhaseSpaceError::MissingParameter("DFR-t-max"))
        );
        let params = PhaseSpaceParams::default().with_dfr_t_max(0.6);
        let t = PhaseSpace::with_params(&interaction, params).t_lim().unwrap();
        assert_eq!(t.max, 0.6);
        assert!(t.min >= 0.0);
    }

    #[test]
    fn diffractive_nan_t_min_is_a_numerical_error() {
        let interaction = diffractive(5.0, f64::NAN, 0.3);
        let params = PhaseSpaceParams::default().with_dfr_t_max(0.6);
        assert!(matches!(
            PhaseSpace::with_params(&interaction, params).t_lim(),
            Err(PhaseSpaceError::NumericalError { .. })
        ));
    }

    #[test]
    fn xi_is_ignored_outside_coherent_production() {
        let interaction = numu_on_carbon(K::DeepInelastic, C::WeakCC, 5.0, Some(particle::NEUTRON));
        let ps = PhaseSpace::new(&interaction);
        assert_eq!(ps.y_lim_xi(2.0), ps.y_lim());
    }

    #[test]
    fn unknown_process_limits_are_the_sentinel() {
        let interaction = numu_on_carbon(K::Unknown, C::WeakCC, 5.0, Some(particle::NEUTRON));
        let ps = PhaseSpace::new(&interaction);
        assert!(ps.q2_lim().unwrap().is_undefined());
        assert!(ps.w_lim().unwrap().is_undefined());
    }

    #[test]
    fn elastic_family_x_is_degenerate_at_one() {
        let interaction = numu_on_carbon(K::QuasiElastic, C::WeakCC, 2.0, Some(particle::NEUTRON));
        assert_eq!(PhaseSpace::new(&interaction).x_lim(), Range1D::point(1.0));
    }

    #[test]
    fn diffractive_x_spans_the_open_unit_interval() {
        let interaction = diffractive(5.0, 0.1, 0.3);
        let x = PhaseSpace::new(&interaction).x_lim();
        assert_eq!(x, Range1D::new(A_SMALL_NUM, 1.0 - A_SMALL_NUM));
    }

    #[test]
    fn diffractive_y_leaves_room_for_pion_and_lepton() {
        let interaction = diffractive(5.0, 0.1, 0.3);
        let ps = PhaseSpace::new(&interaction);
        let (ev, ml) = (ps.energy_rest(), ps.lepton_mass());
        let y = ps.y_lim();
        assert!((y.min - (PION_MASS / ev + A_SMALL_NUM)).abs() < TOLERANCE);
        assert!((y.max - (1.0 - ml / ev - A_SMALL_NUM)).abs() < TOLERANCE);
    }

    #[test]
    fn inverse_muon_decay_y_ceiling_follows_lepton_masses() {
        let energy = 20.0;
        let interaction = numu_on_carbon(K::InverseMuonDecay, C::WeakCC, energy, None);
        let y = PhaseSpace::new(&interaction).y_lim();
        let ceiling = 1.0 - (MUON_MASS2 + ELECTRON_MASS2) / (2.0 * ELECTRON_MASS * energy);
        assert!((y.min - A_SMALL_NUM).abs() < TOLERANCE);
        assert!((y.max - (ceiling - A_SMALL_NUM)).abs() < TOLERANCE);
    }

    #[test]
    fn neutrino_electron_elastic_y_ceiling_uses_massless_lepton() {
        let energy = 0.5;
        let interaction = numu_on_carbon(K::NuElectronElastic, C::WeakNC, energy, None);
        let y = PhaseSpace::new(&interaction).y_lim();
        let ceiling = 1.0 - ELECTRON_MASS2 / (2.0 * ELECTRON_MASS * energy);
        assert!((y.max - (ceiling - A_SMALL_NUM)).abs() < TOLERANCE);
    }

    #[test]
    fn dark_matter_electron_elastic_y_has_a_mass_dependent_floor() {
        let interaction = Interaction::builder()
            .process(K::DarkMatterElectronElastic, C::Dark)
            .dark_matter_probe(0.01, 1.0)
            .target(Target::new(6, 12))
            .build()
            .unwrap();
        let ps = PhaseSpace::new(&interaction);
        let (e, ml, me) = (ps.energy_lab(), ps.lepton_mass(), ELECTRON_MASS);
        let floor = (e * me * me + ml * ml * (e + 2.0 * me)) / (e * (2.0 * e * me + me * me + ml * ml));

        let y = ps.y_lim();
        assert!(floor > 0.0);
        assert!((y.min - (floor + A_SMALL_NUM)).abs() < TOLERANCE);
        assert_eq!(y.max, 1.0 - A_SMALL_NUM);
    }

    #[test]
    fn inverse_beta_decay_q2_uses_the_low_energy_cut() {
        let interaction = Interaction::builder()
            .process(K::InverseBetaDecay, C::WeakCC)
            .probe(particle::ANTI_NU_E, 0.01)
            .target(Target::free_proton())
            .hit_nucleon(particle::PROTON)
            .build()
            .unwrap();
        let ps = PhaseSpace::new(&interaction);
        let (ev, m, ml) = (ps.energy_rest(), ps.nucleon_mass(), ps.lepton_mass());
        let expected = inelastic::q2_lim_w(ev, m, ml, NEUTRON_MASS, MIN_Q2_LIMIT_VLE);

        let q2 = ps.q2_lim_w_at(NEUTRON_MASS);
        assert!(q2.is_valid());
        assert_eq!(q2, expected);
        assert!(q2.min < MIN_Q2_LIMIT);
    }
}
