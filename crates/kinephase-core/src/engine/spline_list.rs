use super::error::EngineError;
use crate::core::numerics::spline::{Interpolation, Spline};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct KnotRecord {
    energy: f64,
    xsec: f64,
}

/// Registry of total cross-section splines, keyed by model and interaction.
///
/// The integrator consults it for free-nucleon cross sections before falling
/// back to numerical integration.
#[derive(Debug, Default, Clone)]
pub struct XSecSplineList {
    splines: HashMap<(String, String), Spline>,
}

impl XSecSplineList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, model_key: &str, interaction_key: &str, spline: Spline) {
        self.splines
            .insert((model_key.to_string(), interaction_key.to_string()), spline);
    }

    pub fn get(&self, model_key: &str, interaction_key: &str) -> Option<&Spline> {
        self.splines
            .get(&(model_key.to_string(), interaction_key.to_string()))
    }

    pub fn contains(&self, model_key: &str, interaction_key: &str) -> bool {
        self.get(model_key, interaction_key).is_some()
    }

    pub fn len(&self) -> usize {
        self.splines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splines.is_empty()
    }

    /// Loads an `energy,xsec` knot file and registers the spline under the
    /// given keys.
    pub fn load_csv(
        &mut self,
        path: &Path,
        model_key: &str,
        interaction_key: &str,
        method: Interpolation,
    ) -> Result<(), EngineError> {
        debug!("Loading cross-section knots from {:?}", path);
        let csv_error = |source| EngineError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;
        let knots = reader
            .deserialize::<KnotRecord>()
            .map(|record| record.map(|k| (k.energy, k.xsec)).map_err(csv_error))
            .collect::<Result<Vec<_>, _>>()?;

        let spline = Spline::new(&knots, method)?;
        info!(
            "Loaded {} knots for {} / {} from {:?}",
            spline.len(),
            model_key,
            interaction_key,
            path
        );
        self.insert(model_key, interaction_key, spline);
        Ok(())
    }

    /// Writes the knots of a registered spline as an `energy,xsec` file.
    pub fn save_csv(
        &self,
        path: &Path,
        model_key: &str,
        interaction_key: &str,
    ) -> Result<(), EngineError> {
        let spline = self.get(model_key, interaction_key).ok_or_else(|| {
            EngineError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no spline registered for {model_key} / {interaction_key}"),
                ),
            }
        })?;
        let csv_error = |source| EngineError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
        for (energy, xsec) in spline.knots() {
            writer
                .serialize(KnotRecord { energy, xsec })
                .map_err(csv_error)?;
        }
        writer.flush().map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn knots_written_out_load_back_identically() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("numu_p.csv");

        let mut list = XSecSplineList::new();
        let spline = Spline::new(
            &[(0.5, 1.0e-39), (1.0, 4.0e-39), (2.0, 6.0e-39)],
            Interpolation::Linear,
        )
        .unwrap();
        list.insert("model", "nu:14;tgt:1000010010", spline.clone());
        list.save_csv(&path, "model", "nu:14;tgt:1000010010").unwrap();

        let mut reloaded = XSecSplineList::new();
        reloaded
            .load_csv(&path, "model", "other-key", Interpolation::Linear)
            .unwrap();
        let knots: Vec<_> = reloaded.get("model", "other-key").unwrap().knots().collect();
        assert_eq!(knots, spline.knots().collect::<Vec<_>>());
    }

    #[test]
    fn load_csv_accepts_hand_written_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("knots.csv");
        fs::write(&path, "energy,xsec\n1.0,2.0\n3.0,4.0\n").unwrap();

        let mut list = XSecSplineList::new();
        list.load_csv(&path, "m", "i", Interpolation::Linear).unwrap();
        let spline = list.get("m", "i").unwrap();
        assert!((spline.evaluate(2.0) - 3.0).abs() < 1e-12);
        assert!(list.contains("m", "i"));
        assert!(!list.contains("m", "j"));
    }

    #[test]
    fn malformed_csv_is_reported_with_its_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "energy,xsec\n1.0,not-a-number\n").unwrap();

        let mut list = XSecSplineList::new();
        let err = list
            .load_csv(&path, "m", "i", Interpolation::Cubic)
            .unwrap_err();
        assert!(matches!(err, EngineError::Csv { .. }));
        assert!(err.to_string().contains("bad.csv"));
    }

    #[test]
    fn saving_an_unknown_spline_fails() {
        let dir = tempdir().unwrap();
        let list = XSecSplineList::new();
        assert!(list.save_csv(&dir.path().join("x.csv"), "m", "i").is_err());
    }
}
