use super::{PhaseSpace, PhaseSpaceError};
use crate::core::kinematics::conversions;
use crate::core::models::process::ScatteringKind as K;
use crate::core::utils::range::Range1D;

fn within(value: Option<f64>, range: Range1D) -> bool {
    value.is_some_and(|v| range.contains(v))
}

impl PhaseSpace<'_> {
    /// Whether the running kinematics of the bound interaction lie inside the
    /// channel's limits. Channels without limits are never allowed.
    pub fn is_allowed(&self) -> Result<bool, PhaseSpaceError> {
        let kine = &self.interaction.kinematics;
        let allowed = match self.kind() {
            K::SingleKaon => true,

            K::QuasiElastic | K::InverseBetaDecay | K::DarkMatterElastic | K::MEC => {
                within(kine.q2, self.q2_lim()?)
            }

            K::Resonant | K::DeepInelastic | K::DarkMatterDeepInelastic => {
                within(kine.w, self.w_lim()?) && within(kine.q2, self.q2_lim_w()?)
            }

            K::InverseMuonDecay
            | K::IMDAnnihilation
            | K::NuElectronElastic
            | K::DarkMatterElectronElastic => within(kine.y, self.y_lim()),

            K::CoherentProduction => within(kine.x, self.x_lim()) && within(kine.y, self.y_lim()),

            K::CoherentElastic => kine.q2.is_some_and(|q2| q2 > 0.0),

            K::Diffractive => self.diffractive_is_allowed()?,

            K::SinglePion
            | K::AMNuGamma
            | K::GlashowResonance
            | K::PhotonResonance
            | K::PhotonCoherent
            | K::Normalization
            | K::Unknown => false,
        };
        Ok(allowed)
    }

    /// The (W, Q²) pair implied by the running (x, y) is checked first; t is only
    /// looked at once that point is inside.
    fn diffractive_is_allowed(&self) -> Result<bool, PhaseSpaceError> {
        let kine = &self.interaction.kinematics;
        let (Some(x), Some(y)) = (kine.x, kine.y) else {
            return Ok(false);
        };
        let (w, q2) = conversions::xy_to_wq2(self.energy_rest(), self.nucleon_mass(), x, y);

        let in_wq2 = self.w_lim()?.contains(w) && self.q2_lim_w_at(w).contains(q2);
        if !in_wq2 {
            return Ok(false);
        }
        Ok(within(kine.t, self.t_lim()?))
    }
}

#[cfg(test)]
mod tests {
    use super::super::PhaseSpaceParams;
    use super::super::test_support::{numu_on_carbon, with_kinematics};
    use super::*;
    use crate::core::models::kinematics::Kinematics;
    use crate::core::models::particle;
    use crate::core::models::process::InteractionCurrent as C;

    #[test]
    fn single_kaon_is_always_allowed() {
        let interaction = numu_on_carbon(K::SingleKaon, C::WeakCC, 2.0, Some(particle::PROTON));
        assert!(PhaseSpace::new(&interaction).is_allowed().unwrap());
    }

    #[test]
    fn quasi_elastic_checks_q2_only() {
        let base = numu_on_carbon(K::QuasiElastic, C::WeakCC, 1.0, Some(particle::NEUTRON));
        let inside = with_kinematics(base.clone(), Kinematics { q2: Some(0.3), ..Kinematics::new() });
        assert!(PhaseSpace::new(&inside).is_allowed().unwrap());

        let outside = with_kinematics(base, Kinematics { q2: Some(50.0), ..Kinematics::new() });
        assert!(!PhaseSpace::new(&outside).is_allowed().unwrap());
    }

    #[test]
    fn unset_kinematics_are_not_allowed() {
        let interaction = numu_on_carbon(K::QuasiElastic, C::WeakCC, 1.0, Some(particle::NEUTRON));
        assert!(!PhaseSpace::new(&interaction).is_allowed().unwrap());
    }

    #[test]
    fn closed_w_window_is_never_allowed() {
        let interaction = with_kinematics(
            numu_on_carbon(K::DeepInelastic, C::WeakCC, 0.2, Some(particle::NEUTRON)),
            Kinematics::new().with_wq2(1.0, 0.01),
        );
        let ps = PhaseSpace::new(&interaction);
        assert!(ps.w_lim().unwrap().is_undefined());
        assert!(!ps.is_allowed().unwrap());
    }

    #[test]
    fn resonant_point_inside_w_and_q2_is_allowed() {
        let interaction = with_kinematics(
            numu_on_carbon(K::Resonant, C::WeakCC, 2.0, Some(particle::PROTON)),
            Kinematics::new().with_wq2(1.232, 0.5),
        );
        assert!(PhaseSpace::new(&interaction).is_allowed().unwrap());
    }

    #[test]
    fn coherent_elastic_requires_positive_q2() {
        let base = numu_on_carbon(K::CoherentElastic, C::WeakNC, 0.03, None);
        let zero = with_kinematics(base.clone(), Kinematics { q2: Some(0.0), ..Kinematics::new() });
        assert!(!PhaseSpace::new(&zero).is_allowed().unwrap());
        let positive = with_kinematics(base, Kinematics { q2: Some(1e-4), ..Kinematics::new() });
        assert!(PhaseSpace::new(&positive).is_allowed().unwrap());
    }

    #[test]
    fn inverse_muon_decay_checks_y() {
        let base = numu_on_carbon(K::InverseMuonDecay, C::WeakCC, 20.0, None);
        let inside = with_kinematics(base.clone(), Kinematics::new().with_xy(0.5, 0.2));
        assert!(PhaseSpace::new(&inside).is_allowed().unwrap());
        let outside = with_kinematics(base, Kinematics::new().with_xy(0.5, 0.99));
        assert!(!PhaseSpace::new(&outside).is_allowed().unwrap());
    }

    #[test]
    fn diffractive_outside_wq2_skips_t_check() {
        // W below the pion floor: rejected before t-max is ever needed.
        let interaction = with_kinematics(
            numu_on_carbon(K::Diffractive, C::WeakCC, 5.0, Some(particle::PROTON)),
            Kinematics::new().with_xy(0.99, 0.01),
        );
        assert!(!PhaseSpace::new(&interaction).is_allowed().unwrap());
    }

    #[test]
    fn diffractive_inside_wq2_checks_t() {
        let base = numu_on_carbon(K::Diffractive, C::WeakCC, 5.0, Some(particle::PROTON));
        let params = PhaseSpaceParams::default().with_dfr_t_max(0.6);

        let no_t = with_kinematics(base.clone(), Kinematics::new().with_xy(0.1, 0.3));
        assert!(PhaseSpace::new(&no_t).is_allowed().is_err());
        assert!(!PhaseSpace::with_params(&no_t, params).is_allowed().unwrap());

        let t_min = PhaseSpace::with_params(&no_t, params).t_lim().unwrap().min;
        let with_t = with_kinematics(base, Kinematics::new().with_xy(0.1, 0.3).with_t(t_min + 0.01));
        assert!(PhaseSpace::with_params(&with_t, params).is_allowed().unwrap());
    }

    #[test]
    fn single_pion_has_no_allowed_region() {
        let interaction = numu_on_carbon(K::SinglePion, C::WeakCC, 2.0, Some(particle::PROTON));
        assert!(!PhaseSpace::new(&interaction).is_allowed().unwrap());
    }
}
