use crate::core::models::interaction::Interaction;
use crate::core::numerics::spline::{Interpolation, Spline};
use crate::core::phase_space::PhaseSpace;
use crate::engine::cache::Cache;
use crate::engine::config::Tunables;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::xsec::integrator::{XSecIntegrator, knot_energies};
use crate::engine::xsec::model::XSecAlgorithm;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct XSecSplineResult {
    pub threshold: f64,
    /// `(energy, total xsec)` pairs in ascending energy.
    pub knots: Vec<(f64, f64)>,
    pub spline: Spline,
}

#[instrument(skip_all, name = "xsec_spline_workflow", fields(interaction = %interaction.as_key()))]
pub fn run(
    model: &dyn XSecAlgorithm,
    interaction: &Interaction,
    config: &Tunables,
    reporter: &ProgressReporter,
) -> Result<XSecSplineResult, EngineError> {
    // === Phase 1: Energy grid ===
    reporter.report(Progress::PhaseStart { name: "Energy grid" });
    let threshold = PhaseSpace::with_params(interaction, config.phase_space).threshold()?;
    let energies = knot_energies(config.integration.emin, config.integration.emax, threshold);
    info!(
        "Tabulating {} knots in [{}, {}] GeV (threshold {:.4} GeV)",
        energies.len(),
        config.integration.emin,
        config.integration.emax,
        threshold
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Integration at each knot ===
    reporter.report(Progress::PhaseStart { name: "Integration" });
    reporter.report(Progress::TaskStart {
        total_steps: energies.len() as u64,
    });
    let integrator = XSecIntegrator::new(config.integration.clone(), config.phase_space);
    let silent = ProgressReporter::new();
    let mut cache = Cache::new();
    let mut probe = interaction.clone();
    let mut knots = Vec::with_capacity(energies.len());
    for energy in energies {
        probe.set_probe_energy(energy);
        let xsec = integrator.integrate(model, &probe, &mut cache, &silent)?;
        reporter.report(Progress::Knot { energy, xsec });
        reporter.report(Progress::TaskIncrement);
        knots.push((energy, xsec));
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let spline = Spline::new(&knots, Interpolation::Cubic)?;
    info!("Cross-section spline complete.");
    Ok(XSecSplineResult {
        threshold,
        knots,
        spline,
    })
}
