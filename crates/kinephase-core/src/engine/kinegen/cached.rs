use super::event::EventRecord;
use crate::core::models::interaction::Interaction;
use crate::core::models::state::RefFrame;
use crate::core::numerics::spline::Spline;
use crate::engine::cache::{Cache, branch_key};
use crate::engine::config::KineCacheConfig;
use crate::engine::error::EngineError;
use crate::engine::xsec::model::AlgorithmId;
use tracing::{debug, error, info, instrument, warn};

/// Samples a branch needs before it is turned into a spline.
pub const SPLINE_MIN_POINTS: usize = 40;

/// Rejection-sampling support: a safe upper bound on the differential cross
/// section, memoized per (generator, interaction, variant) as a function of
/// probe energy.
///
/// Implementors supply [`compute_max_xsec`](Self::compute_max_xsec); lookup,
/// caching and the post-draw sanity check come for free.
pub trait KineGeneratorWithCache {
    fn id(&self) -> AlgorithmId;

    /// The unscaled maximum over the accessible phase space. Variant 0 is the
    /// default procedure; unknown variants return a non-positive value.
    fn compute_max_xsec(&self, interaction: &Interaction, variant: u32)
    -> Result<f64, EngineError>;

    /// The energy the cache is indexed by.
    fn energy(&self, interaction: &Interaction) -> f64 {
        interaction.probe_energy(RefFrame::HitNucleonRest)
    }

    fn cache_branch_key(&self, interaction: &Interaction, variant: u32) -> String {
        branch_key(
            &self.id().to_string(),
            &interaction.as_key(),
            &variant.to_string(),
        )
    }

    /// Safety-scaled maximum for the event's current energy.
    ///
    /// A non-positive maximum abandons the event: it is flagged and a
    /// recoverable [`EngineError::KinematicsGeneration`] is returned.
    #[instrument(skip(self, event, cache, config))]
    fn max_xsec(
        &self,
        event: &mut EventRecord,
        variant: u32,
        cache: &mut Cache,
        config: &KineCacheConfig,
    ) -> Result<f64, EngineError> {
        let safety = config.safety_factor(variant);

        if let Some(max) = self.find_max_xsec(&event.interaction, variant, cache, config) {
            if max > 0.0 {
                return Ok(safety * max);
            }
        }

        debug!("Computing the max xsec explicitly");
        let max = self.compute_max_xsec(&event.interaction, variant)?;
        if max > 0.0 {
            info!("max = {max:.6e}");
            self.cache_max_xsec(&event.interaction, variant, max, cache, config)?;
            return Ok(safety * max);
        }

        info!("Can not generate event kinematics (max xsec <= 0)");
        event.mark_kine_gen_error();
        Err(EngineError::KinematicsGeneration {
            reason: "max xsec <= 0".to_string(),
            fast_forward: true,
        })
    }

    /// A cached maximum for the current energy, or `None` to force
    /// recomputation.
    fn find_max_xsec(
        &self,
        interaction: &Interaction,
        variant: u32,
        cache: &Cache,
        config: &KineCacheConfig,
    ) -> Option<f64> {
        let energy = self.energy(interaction);
        if energy < config.min_energy {
            debug!("E = {energy} below the cacheable minimum");
            return None;
        }
        let branch = cache.branch(&self.cache_branch_key(interaction, variant))?;

        if let Some(spline) = branch.spline() {
            if spline.contains(energy) {
                let max = spline.evaluate(energy);
                debug!("Interpolated max (E = {energy}) = {max:.6e}");
                return Some(max);
            }
            debug!("E = {energy} outside the spline domain");
            return None;
        }

        let window = 0.25_f64.min(0.05 * energy);
        branch.nearest_within(energy, window).map(|(_, max)| max)
    }

    /// Records a computed maximum, building or extending the branch spline
    /// once enough samples exist.
    fn cache_max_xsec(
        &self,
        interaction: &Interaction,
        variant: u32,
        max_xsec: f64,
        cache: &mut Cache,
        config: &KineCacheConfig,
    ) -> Result<(), EngineError> {
        let energy = self.energy(interaction);
        if energy < config.min_energy {
            return Ok(());
        }
        let branch = cache.get_or_create(&self.cache_branch_key(interaction, variant));
        if max_xsec > 0.0 {
            branch.insert(energy, max_xsec);
        }

        let rebuild = match branch.spline() {
            None => branch.len() >= SPLINE_MIN_POINTS,
            Some(spline) => !spline.contains(energy),
        };
        if rebuild {
            let method = config.interpolation(variant);
            let spline = Spline::new(branch.points(), method)?;
            info!(
                "Built {method} max-xsec spline over [{}, {}] from {} points",
                spline.x_min(),
                spline.x_max(),
                spline.len()
            );
            branch.set_spline(spline);
        }
        Ok(())
    }

    /// Checks a realized cross section against the bound it was drawn under.
    ///
    /// Overshoots beyond the configured percentage are an
    /// [`EngineError::InvariantViolation`]; smaller ones are tolerated with a
    /// warning. Negative values are only logged.
    fn assert_xsec_limits(
        &self,
        interaction: &Interaction,
        xsec: f64,
        xsec_max: f64,
        config: &KineCacheConfig,
    ) -> Result<(), EngineError> {
        if xsec > xsec_max {
            let deviation = 200.0 * (xsec - xsec_max) / (xsec_max + xsec);
            if deviation > config.max_xsec_diff_tolerance {
                error!(
                    "xsec (current) = {xsec:.6e} > (max) = {xsec_max:.6e} for {}",
                    interaction.as_key()
                );
                return Err(EngineError::InvariantViolation(format!(
                    "differential xsec {xsec:.6e} exceeds the rejection bound {xsec_max:.6e} by {deviation:.2}%"
                )));
            }
            warn!(
                "xsec (current) = {xsec:.6e} > (max) = {xsec_max:.6e}; deviation of {deviation:.2}% allowed"
            );
        }
        if xsec < 0.0 {
            error!(
                "Negative cross section for current kinematics: {}",
                interaction.as_key()
            );
        }
        Ok(())
    }
}
