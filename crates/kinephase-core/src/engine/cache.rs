use crate::core::numerics::spline::Spline;
use std::collections::HashMap;
use tracing::info;

/// Sorted `(energy, value)` samples, optionally matured into a spline.
#[derive(Debug, Default, Clone)]
pub struct CacheBranch {
    points: Vec<(f64, f64)>,
    spline: Option<Spline>,
}

impl CacheBranch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Inserts a sample, keeping energies sorted. A sample at an existing energy
    /// replaces the old value.
    pub fn insert(&mut self, energy: f64, value: f64) {
        let idx = self.points.partition_point(|(e, _)| *e < energy);
        match self.points.get_mut(idx) {
            Some(point) if point.0 == energy => point.1 = value,
            _ => self.points.insert(idx, (energy, value)),
        }
    }

    /// The stored sample closest in energy to `energy`, if any lies within
    /// `window` of it.
    pub fn nearest_within(&self, energy: f64, window: f64) -> Option<(f64, f64)> {
        let idx = self.points.partition_point(|(e, _)| *e < energy);
        let below = idx.checked_sub(1).and_then(|i| self.points.get(i));
        let above = self.points.get(idx);
        [below, above]
            .into_iter()
            .flatten()
            .filter(|(e, _)| (e - energy).abs() <= window)
            .min_by(|a, b| (a.0 - energy).abs().total_cmp(&(b.0 - energy).abs()))
            .copied()
    }

    pub fn spline(&self) -> Option<&Spline> {
        self.spline.as_ref()
    }

    pub fn set_spline(&mut self, spline: Spline) {
        self.spline = Some(spline);
    }
}

/// Process-lifetime memoization store for expensive per-interaction quantities.
///
/// Branches are keyed by strings from [`branch_key`] and are never evicted.
#[derive(Debug, Default, Clone)]
pub struct Cache {
    branches: HashMap<String, CacheBranch>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn branch(&self, key: &str) -> Option<&CacheBranch> {
        self.branches.get(key)
    }

    pub fn branch_mut(&mut self, key: &str) -> Option<&mut CacheBranch> {
        self.branches.get_mut(key)
    }

    pub fn get_or_create(&mut self, key: &str) -> &mut CacheBranch {
        self.branches.entry(key.to_string()).or_insert_with(|| {
            info!("Creating cache branch: {key}");
            CacheBranch::new()
        })
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    pub fn clear(&mut self) {
        self.branches.clear();
    }
}

/// Composite key isolating one (algorithm, configuration, interaction, sub-key)
/// combination.
pub fn branch_key(algorithm: &str, interaction_key: &str, sub_key: &str) -> String {
    format!("{algorithm}/{interaction_key}/{sub_key}")
}
