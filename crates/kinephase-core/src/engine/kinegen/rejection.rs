use super::cached::KineGeneratorWithCache;
use super::event::{EventRecord, KinePhaseSpace};
use crate::core::models::interaction::Interaction;
use crate::core::phase_space::{PhaseSpace, PhaseSpaceParams};
use crate::core::utils::range::Range1D;
use crate::engine::cache::Cache;
use crate::engine::config::{KineCacheConfig, RejectionConfig};
use crate::engine::error::EngineError;
use crate::engine::xsec::model::{AlgorithmId, XSecAlgorithm};
use itertools::Itertools;
use rand::Rng;
use tracing::{debug, instrument, trace};

/// Refinement grid points per axis around the best coarse-scan cell.
const REFINE_POINTS: usize = 10;

/// Accept/reject sampler of (W, Q²) for one differential cross-section model.
///
/// Candidates are drawn uniformly in the `W × Q²` bounding box of the
/// accessible region, discarded outside `Q²(W)`, and accepted with probability
/// `xsec / max_xsec`, where the maximum comes from the energy-indexed cache.
pub struct WQ2RejectionGenerator<'m> {
    model: &'m dyn XSecAlgorithm,
    params: PhaseSpaceParams,
    rejection: RejectionConfig,
    cache_config: KineCacheConfig,
}

impl<'m> WQ2RejectionGenerator<'m> {
    pub fn new(
        model: &'m dyn XSecAlgorithm,
        params: PhaseSpaceParams,
        rejection: RejectionConfig,
        cache_config: KineCacheConfig,
    ) -> Self {
        Self {
            model,
            params,
            rejection,
            cache_config,
        }
    }

    pub fn cache_config(&self) -> &KineCacheConfig {
        &self.cache_config
    }

    fn xsec_at(&self, probe: &mut Interaction, w: f64, q2: f64) -> f64 {
        probe.kinematics.w = Some(w);
        probe.kinematics.q2 = Some(q2);
        self.model.xsec(probe)
    }

    /// Best value over an `n × n` grid spanning `w` and, at each W, the
    /// accessible Q² window intersected with `q2_box`.
    fn scan(
        &self,
        interaction: &Interaction,
        probe: &mut Interaction,
        w: Range1D,
        q2_box: Range1D,
        n: usize,
    ) -> Option<(f64, f64, f64)> {
        let ps = PhaseSpace::with_params(interaction, self.params);
        let mut best: Option<(f64, f64, f64)> = None;
        for (i, j) in (0..n).cartesian_product(0..n) {
            let wi = grid_point(w, i, n);
            let q2_w = ps.q2_lim_w_at(wi);
            let q2 = Range1D::new(q2_w.min.max(q2_box.min), q2_w.max.min(q2_box.max));
            if !q2.is_valid() || q2.min < 0.0 {
                continue;
            }
            let q2j = grid_point(q2, j, n);
            let xsec = self.xsec_at(probe, wi, q2j);
            if best.is_none_or(|(_, _, b)| xsec > b) {
                best = Some((wi, q2j, xsec));
            }
        }
        best
    }
}

/// The `i`-th of `n` evenly spaced points across `range`, ends included.
fn grid_point(range: Range1D, i: usize, n: usize) -> f64 {
    if n < 2 {
        return 0.5 * (range.min + range.max);
    }
    range.min + range.width() * i as f64 / (n - 1) as f64
}

impl KineGeneratorWithCache for WQ2RejectionGenerator<'_> {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("WQ2RejectionGenerator", self.model.id().to_string())
    }

    #[instrument(skip(self, interaction), fields(interaction = %interaction.as_key()))]
    fn compute_max_xsec(
        &self,
        interaction: &Interaction,
        variant: u32,
    ) -> Result<f64, EngineError> {
        if variant > 1 {
            debug!("No max-xsec procedure for variant {variant}");
            return Ok(-1.0);
        }
        let ps = PhaseSpace::with_params(interaction, self.params);
        let w = ps.w_lim()?;
        let q2 = ps.q2_lim()?;
        if !w.is_valid() || !q2.is_valid() || w.min < 0.0 || q2.min < 0.0 {
            return Ok(0.0);
        }

        let mut probe = interaction.clone();
        let n = self.rejection.scan_points;
        let Some((w_best, q2_best, mut max)) = self.scan(interaction, &mut probe, w, q2, n) else {
            return Ok(0.0);
        };

        if variant == 1 && n >= 2 {
            let dw = w.width() / (n - 1) as f64;
            let dq2 = q2.width() / (n - 1) as f64;
            let w_cell = Range1D::new((w_best - dw).max(w.min), (w_best + dw).min(w.max));
            let q2_cell = Range1D::new((q2_best - dq2).max(q2.min), (q2_best + dq2).min(q2.max));
            let refined = self.scan(interaction, &mut probe, w_cell, q2_cell, REFINE_POINTS);
            if let Some((_, _, refined)) = refined {
                max = max.max(refined);
            }
        }
        debug!("Scanned max xsec = {max:.6e}");
        Ok(max)
    }
}

impl WQ2RejectionGenerator<'_> {
    /// Draws (W, Q²) for the event, storing the accepted point and its
    /// differential cross section.
    ///
    /// Exhausting the configured number of draws abandons the event with a
    /// recoverable error.
    #[instrument(skip_all, fields(interaction = %event.interaction.as_key()))]
    pub fn select_kinematics<R: Rng + ?Sized>(
        &self,
        event: &mut EventRecord,
        rng: &mut R,
        cache: &mut Cache,
    ) -> Result<(), EngineError> {
        let max = self.max_xsec(event, 0, cache, &self.cache_config)?;

        let mut probe = event.interaction.clone();
        let (w, q2) = {
            let ps = PhaseSpace::with_params(&probe, self.params);
            (ps.w_lim()?, ps.q2_lim()?)
        };
        if !w.is_valid() || !q2.is_valid() {
            event.mark_kine_gen_error();
            return Err(EngineError::KinematicsGeneration {
                reason: format!("empty phase space: W = {w}, Q2 = {q2}"),
                fast_forward: true,
            });
        }
        let bounds = PhaseSpace::with_params(&event.interaction, self.params);

        for iteration in 0..self.rejection.max_iterations {
            let wi = rng.gen_range(w.min..=w.max);
            let q2i = rng.gen_range(q2.min..=q2.max);
            if !bounds.q2_lim_w_at(wi).contains(q2i) {
                continue;
            }

            let xsec = self.xsec_at(&mut probe, wi, q2i);
            self.assert_xsec_limits(&probe, xsec, max, &self.cache_config)?;

            if max * rng.r#gen::<f64>() < xsec {
                trace!("Accepted W = {wi}, Q2 = {q2i} after {} draws", iteration + 1);
                event.interaction.kinematics = probe.kinematics;
                event.interaction.flags.reset_skip_checks();
                event.set_diff_xsec(xsec, KinePhaseSpace::WQ2);
                return Ok(());
            }
        }

        event.mark_kine_gen_error();
        Err(EngineError::KinematicsGeneration {
            reason: format!(
                "no kinematics accepted after {} draws",
                self.rejection.max_iterations
            ),
            fast_forward: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::XSEC_UNIT;
    use crate::core::models::particle;
    use crate::core::models::process::{InteractionCurrent, ScatteringKind};
    use crate::core::models::target::Target;
    use crate::engine::config::KineCacheConfigBuilder;
    use crate::engine::xsec::model::test_models::ConstantXSec;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Gaussian bump in (W, Q²), centred off any coarse grid point.
    struct PeakedXSec {
        w0: f64,
        q20: f64,
        width: f64,
    }

    impl XSecAlgorithm for PeakedXSec {
        fn id(&self) -> AlgorithmId {
            AlgorithmId::new("PeakedXSec", "Default")
        }

        fn valid_process(&self, interaction: &Interaction) -> bool {
            interaction.scattering() == ScatteringKind::DeepInelastic
        }

        fn xsec(&self, interaction: &Interaction) -> f64 {
            let w = interaction.kinematics.w.unwrap_or(0.0);
            let q2 = interaction.kinematics.q2.unwrap_or(0.0);
            let r2 = ((w - self.w0).powi(2) + (q2 - self.q20).powi(2)) / self.width.powi(2);
            (-r2).exp() * XSEC_UNIT
        }
    }

    fn dis(energy: f64) -> Interaction {
        Interaction::builder()
            .process(ScatteringKind::DeepInelastic, InteractionCurrent::WeakCC)
            .probe(particle::NU_MU, energy)
            .target(Target::free_proton())
            .hit_nucleon(particle::PROTON)
            .build()
            .unwrap()
    }

    fn generator(model: &dyn XSecAlgorithm, max_iterations: usize) -> WQ2RejectionGenerator<'_> {
        WQ2RejectionGenerator::new(
            model,
            PhaseSpaceParams::default(),
            RejectionConfig {
                max_iterations,
                scan_points: 20,
            },
            KineCacheConfigBuilder::new().min_energy(1.0).build().unwrap(),
        )
    }

    #[test]
    fn constant_model_max_is_its_value() {
        let model = ConstantXSec::new(ScatteringKind::DeepInelastic, 3.0);
        let max = generator(&model, 100).compute_max_xsec(&dis(10.0), 0).unwrap();
        assert!((max - 3.0 * XSEC_UNIT).abs() < 1e-12 * XSEC_UNIT);
        assert!(model.calls() > 0);
    }

    #[test]
    fn refinement_never_lowers_the_scanned_max() {
        let model = PeakedXSec {
            w0: 2.013,
            q20: 3.017,
            width: 0.05,
        };
        let generator = generator(&model, 100);
        let coarse = generator.compute_max_xsec(&dis(10.0), 0).unwrap();
        let refined = generator.compute_max_xsec(&dis(10.0), 1).unwrap();
        assert!(refined >= coarse);
        assert!(refined > 0.0);
    }

    #[test]
    fn unknown_variant_gives_no_max() {
        let model = ConstantXSec::new(ScatteringKind::DeepInelastic, 1.0);
        let max = generator(&model, 100).compute_max_xsec(&dis(10.0), 7).unwrap();
        assert!(max <= 0.0);
    }

    #[test]
    fn closed_phase_space_gives_zero_max() {
        let model = ConstantXSec::new(ScatteringKind::DeepInelastic, 1.0);
        let max = generator(&model, 100).compute_max_xsec(&dis(0.2), 0).unwrap();
        assert_eq!(max, 0.0);
        assert_eq!(model.calls(), 0);
    }

    #[test]
    fn accepted_kinematics_lie_inside_the_allowed_region() {
        let model = ConstantXSec::new(ScatteringKind::DeepInelastic, 2.0);
        let generator = generator(&model, 1000);
        let mut cache = Cache::new();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let mut event = EventRecord::new(dis(10.0));
            generator
                .select_kinematics(&mut event, &mut rng, &mut cache)
                .unwrap();

            let w = event.interaction.kinematics.w.unwrap();
            let q2 = event.interaction.kinematics.q2.unwrap();
            let ps = PhaseSpace::new(&event.interaction);
            assert!(ps.w_lim().unwrap().contains(w));
            assert!(ps.q2_lim_w_at(w).contains(q2));
            assert_eq!(event.phase_space, KinePhaseSpace::WQ2);
            assert!((event.diff_xsec - 2.0 * XSEC_UNIT).abs() < 1e-12 * XSEC_UNIT);
            assert!(!event.flags.kine_gen_error);
        }
        assert_eq!(cache.branch_count(), 1);
    }

    #[test]
    fn exhausting_the_draws_abandons_the_event() {
        let model = ConstantXSec::new(ScatteringKind::DeepInelastic, 2.0);
        let generator = generator(&model, 0);
        let mut event = EventRecord::new(dis(10.0));
        let err = generator
            .select_kinematics(&mut event, &mut StdRng::seed_from_u64(1), &mut Cache::new())
            .unwrap_err();
        assert!(err.is_recoverable());
        assert!(event.flags.kine_gen_error);
    }

    #[test]
    fn zero_model_abandons_the_event_before_drawing() {
        let model = ConstantXSec::new(ScatteringKind::DeepInelastic, 0.0);
        let generator = generator(&model, 1000);
        let mut event = EventRecord::new(dis(10.0));
        let err = generator
            .select_kinematics(&mut event, &mut StdRng::seed_from_u64(1), &mut Cache::new())
            .unwrap_err();
        assert!(matches!(err, EngineError::KinematicsGeneration { .. }));
        assert!(event.flags.kine_gen_error);
    }
}
