use super::model::XSecAlgorithm;
use crate::core::constants::XSEC_UNIT;
use crate::core::models::interaction::Interaction;
use crate::core::models::state::RefFrame;
use crate::core::numerics::integration::{self, IntegrationResult};
use crate::core::numerics::spline::{Interpolation, Spline};
use crate::core::phase_space::{PhaseSpace, PhaseSpaceParams};
use crate::core::utils::range::Range1D;
use crate::engine::cache::{Cache, branch_key};
use crate::engine::config::{IntegrationConfig, IntegrationType};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::spline_list::XSecSplineList;
use tracing::{debug, info, instrument, trace};

const MIN_KNOTS: usize = 40;
const KNOTS_PER_DECADE: f64 = 10.0;
const KNOTS_BELOW_THRESHOLD: usize = 5;
const FREE_NUCLEON_BRANCH: &str = "free-nucleon-xsec";

/// Log-spaced energies in `[emin, emax]`, `n` of them including both ends.
pub fn log_grid(emin: f64, emax: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![emin];
    }
    let (lo, hi) = (emin.ln(), emax.ln());
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|i| (lo + i as f64 * step).exp()).collect()
}

/// Knot energies for tabulating a cross section over `[emin, emax]`.
///
/// At least 40 knots and 10 per decade; when the threshold lies inside the
/// grid, 5 knots are spent below it and the rest start at the threshold.
pub fn knot_energies(emin: f64, emax: f64, threshold: f64) -> Vec<f64> {
    let decades = (emax / emin).log10();
    let n = MIN_KNOTS.max((KNOTS_PER_DECADE * decades).ceil() as usize);
    if threshold > emin && threshold < emax {
        let mut knots = log_grid(emin, threshold, KNOTS_BELOW_THRESHOLD + 1);
        knots.pop();
        knots.extend(log_grid(threshold, emax, n - KNOTS_BELOW_THRESHOLD));
        knots
    } else {
        log_grid(emin, emax, n)
    }
}

/// Integrates differential cross sections over (W, Q²) into total cross sections.
pub struct XSecIntegrator<'a> {
    config: IntegrationConfig,
    params: PhaseSpaceParams,
    splines: Option<&'a XSecSplineList>,
}

impl<'a> XSecIntegrator<'a> {
    pub fn new(config: IntegrationConfig, params: PhaseSpaceParams) -> Self {
        Self {
            config,
            params,
            splines: None,
        }
    }

    pub fn with_spline_list(mut self, splines: &'a XSecSplineList) -> Self {
        self.splines = Some(splines);
        self
    }

    pub fn config(&self) -> &IntegrationConfig {
        &self.config
    }

    /// Total cross section of `interaction` under `model`, in natural units.
    ///
    /// Inapplicable models and sub-threshold energies give zero. Nuclear targets
    /// are served from a registered free-nucleon spline, and any target from the
    /// cached free-nucleon table when pre-calculation is enabled. The result is
    /// scaled by the like-nucleon count unless the nucleon is assumed free.
    #[instrument(skip_all, fields(interaction = %interaction.as_key()))]
    pub fn integrate(
        &self,
        model: &dyn XSecAlgorithm,
        interaction: &Interaction,
        cache: &mut Cache,
        reporter: &ProgressReporter,
    ) -> Result<f64, EngineError> {
        if !model.valid_process(interaction) {
            debug!("Model {} does not apply", model.id());
            return Ok(0.0);
        }
        let ps = PhaseSpace::with_params(interaction, self.params);
        if !ps.is_above_threshold()? {
            debug!("Below threshold");
            return Ok(0.0);
        }

        let target = interaction.target();
        if let (Some(free), Some(n)) = (
            interaction.free_nucleon_equivalent(),
            target.like_nucleon_count(),
        ) {
            let energy = interaction.probe_energy(RefFrame::HitNucleonRest);
            let scale = if interaction.flags.assume_free_nucleon {
                1.0
            } else {
                n as f64
            };
            let model_key = model.id().to_string();
            let free_key = free.as_key();

            let registered = self
                .splines
                .filter(|_| target.is_nucleus())
                .and_then(|s| s.get(&model_key, &free_key));
            if let Some(spline) = registered {
                trace!("Using registered free-nucleon spline");
                return Ok(scale * spline.evaluate(energy));
            }

            if self.config.precalc_bare_xsec {
                let key = branch_key(&model_key, &free_key, FREE_NUCLEON_BRANCH);
                if cache.branch(&key).and_then(|b| b.spline()).is_none() {
                    let spline = self.tabulate_free_nucleon(model, &free, reporter)?;
                    cache.get_or_create(&key).set_spline(spline);
                }
                let value = cache
                    .branch(&key)
                    .and_then(|b| b.spline())
                    .map_or(0.0, |s| s.evaluate(energy));
                return Ok(scale * value);
            }
        }

        self.integrate_direct(model, interaction)
    }

    #[instrument(skip_all, fields(interaction = %free.as_key()))]
    fn tabulate_free_nucleon(
        &self,
        model: &dyn XSecAlgorithm,
        free: &Interaction,
        reporter: &ProgressReporter,
    ) -> Result<Spline, EngineError> {
        let threshold = PhaseSpace::with_params(free, self.params).threshold()?;
        let knots = knot_energies(self.config.emin / 3.0, 3.0 * self.config.emax, threshold);
        info!(
            "Caching free-nucleon cross section for {} at {} knots",
            model.id(),
            knots.len()
        );

        reporter.report(Progress::TaskStart {
            total_steps: knots.len() as u64,
        });
        let mut probe = free.clone();
        let mut table = Vec::with_capacity(knots.len());
        for energy in knots {
            probe.set_probe_energy(energy);
            let above = PhaseSpace::with_params(&probe, self.params).is_above_threshold()?;
            let xsec = if above {
                self.integrate_direct(model, &probe)?
            } else {
                0.0
            };
            reporter.report(Progress::Knot { energy, xsec });
            reporter.report(Progress::TaskIncrement);
            table.push((energy, xsec));
        }
        reporter.report(Progress::TaskFinish);

        Ok(Spline::new(&table, Interpolation::Cubic)?)
    }

    /// Integrates the bare differential cross section over the (W, Q²)
    /// rectangle, without nuclear corrections.
    pub fn integrate_direct(
        &self,
        model: &dyn XSecAlgorithm,
        interaction: &Interaction,
    ) -> Result<f64, EngineError> {
        let mut point = interaction.clone();
        point.flags.skip_process_check = true;
        point.flags.no_nuclear_correction = true;

        let ps = PhaseSpace::with_params(&point, self.params);
        let w = ps.w_lim()?;
        let q2 = ps.q2_lim()?;
        if !is_integrable(w) || !is_integrable(q2) {
            debug!("Empty integration region: W = {w}, Q2 = {q2}");
            return Ok(0.0);
        }
        if w.width() == 0.0 || q2.width() == 0.0 {
            debug!("Zero-area integration region: W = {w}, Q2 = {q2}");
            return Ok(0.0);
        }

        let lower = [w.min, q2.min];
        let upper = [w.max, q2.max];
        let integrand = |p: &[f64]| {
            point.kinematics.w = Some(p[0]);
            point.kinematics.q2 = Some(p[1]);
            model.xsec(&point) / XSEC_UNIT
        };

        let result: IntegrationResult = match self.config.integration_type {
            IntegrationType::Adaptive => {
                integration::adaptive(integrand, &lower, &upper, &self.config.tolerances)?
            }
            IntegrationType::Gauss => {
                integration::gauss_legendre(integrand, &lower, &upper, self.config.gauss_order)?
            }
        };
        debug!(
            "XSec over W {w}, Q2 {q2} = {:.6e} x 1e-38 cm2 (+- {:.2e}, {} calls)",
            result.value,
            result.error,
            result.evaluations
        );
        Ok(result.value * XSEC_UNIT)
    }
}

fn is_integrable(range: Range1D) -> bool {
    range.min >= 0.0 && range.max >= 0.0 && range.max >= range.min
}
