use crate::error::{CliError, Result};
use kinephase::core::models::exclusive::ExclusiveTag;
use kinephase::core::models::interaction::Interaction;
use kinephase::core::models::kinematics::Kinematics;
use kinephase::core::models::particle::{self, Pdg};
use kinephase::core::models::process::{InteractionCurrent, ScatteringKind};
use kinephase::core::models::target::Target;
use kinephase::core::phase_space::PhaseSpaceParams;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileTarget {
    z: u32,
    a: u32,
    mass: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case", default)]
struct FileExclusive {
    n_protons: u32,
    n_neutrons: u32,
    n_pi_plus: u32,
    n_pi_minus: u32,
    n_pi0: u32,
    charm: bool,
    charm_hadron: Option<Pdg>,
    strange: bool,
    strange_hadron: Option<Pdg>,
}

impl From<FileExclusive> for ExclusiveTag {
    fn from(f: FileExclusive) -> Self {
        ExclusiveTag {
            n_protons: f.n_protons,
            n_neutrons: f.n_neutrons,
            n_pi_plus: f.n_pi_plus,
            n_pi_minus: f.n_pi_minus,
            n_pi0: f.n_pi0,
            charm: f.charm || f.charm_hadron.is_some(),
            charm_hadron: f.charm_hadron,
            strange: f.strange || f.strange_hadron.is_some(),
            strange_hadron: f.strange_hadron,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, Copy)]
#[serde(deny_unknown_fields)]
struct FileKinematics {
    x: Option<f64>,
    y: Option<f64>,
    #[serde(rename = "Q2", alias = "q2")]
    q2: Option<f64>,
    #[serde(rename = "W", alias = "w")]
    w: Option<f64>,
    t: Option<f64>,
}

impl From<FileKinematics> for Kinematics {
    fn from(f: FileKinematics) -> Self {
        Kinematics {
            x: f.x,
            y: f.y,
            q2: f.q2,
            w: f.w,
            t: f.t,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileInteraction {
    process: String,
    current: String,
    probe: Pdg,
    energy: f64,
    dark_matter_mass: Option<f64>,
    target: FileTarget,
    hit_nucleon: Option<Pdg>,
    fs_lepton: Option<Pdg>,
    exclusive: Option<FileExclusive>,
    kinematics: Option<FileKinematics>,
}

#[derive(Deserialize, Debug, Default, Clone, Copy)]
#[serde(deny_unknown_fields)]
struct FilePhaseSpace {
    #[serde(rename = "DFR-t-max", alias = "dfr-t-max")]
    dfr_t_max: Option<f64>,
}

/// The contents of a query file: one `[interaction]` table and an optional
/// `[phase-space]` table.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct QueryConfig {
    interaction: FileInteraction,
    phase_space: Option<FilePhaseSpace>,
}

impl QueryConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading query configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn phase_space_params(&self) -> PhaseSpaceParams {
        let mut params = PhaseSpaceParams::default();
        if let Some(t_max) = self.phase_space.and_then(|p| p.dfr_t_max) {
            params = params.with_dfr_t_max(t_max);
        }
        params
    }

    /// Builds the described interaction, optionally at a different probe energy.
    pub fn interaction(&self, energy_override: Option<f64>) -> Result<Interaction> {
        let desc = &self.interaction;
        let scattering: ScatteringKind = desc
            .process
            .parse()
            .map_err(|e| CliError::Config(format!("{e}")))?;
        let current: InteractionCurrent = desc
            .current
            .parse()
            .map_err(|e| CliError::Config(format!("{e}")))?;

        let energy = energy_override.unwrap_or(desc.energy);
        if energy.is_nan() || energy <= 0.0 {
            return Err(CliError::Argument(format!(
                "probe energy must be positive, got {energy}"
            )));
        }

        let mut target = Target::new(desc.target.z, desc.target.a);
        if let Some(mass) = desc.target.mass {
            target = target.with_mass(mass);
        }

        let mut builder = Interaction::builder()
            .process(scattering, current)
            .target(target)
            .exclusive(desc.exclusive.clone().unwrap_or_default().into())
            .kinematics(desc.kinematics.unwrap_or_default().into());

        builder = if particle::is_dark_matter(desc.probe) {
            let mass = desc.dark_matter_mass.ok_or_else(|| {
                CliError::Config(
                    "'dark-matter-mass' is required for a dark-matter probe".to_string(),
                )
            })?;
            builder.dark_matter_probe(mass, energy)
        } else {
            builder.probe(desc.probe, energy)
        };
        if let Some(hit) = desc.hit_nucleon {
            builder = builder.hit_nucleon(hit);
        }
        if let Some(fsl) = desc.fs_lepton {
            builder = builder.fs_lepton(fsl);
        }

        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinephase::core::models::state::RefFrame;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const NUMU_DIS_ON_CARBON: &str = r#"
        [interaction]
        process = "deep-inelastic"
        current = "weak-cc"
        probe = 14
        energy = 5.0
        hit-nucleon = 2212

        [interaction.target]
        z = 6
        a = 12

        [interaction.kinematics]
        x = 0.2
        y = 0.4

        [phase-space]
        DFR-t-max = 0.6
    "#;

    #[test]
    fn full_file_builds_the_interaction() {
        let file = write_config(NUMU_DIS_ON_CARBON);
        let config = QueryConfig::from_file(file.path()).unwrap();
        let interaction = config.interaction(None).unwrap();

        assert_eq!(interaction.scattering(), ScatteringKind::DeepInelastic);
        assert!(interaction.process().is_weak_cc());
        assert_eq!(interaction.probe_pdg(), particle::NU_MU);
        assert_eq!(interaction.fs_lepton_pdg(), particle::MUON);
        assert_eq!(interaction.target().z(), 6);
        assert_eq!(interaction.target().hit_nucleon_pdg(), Some(particle::PROTON));
        assert_eq!(interaction.kinematics.x, Some(0.2));
        assert_eq!(interaction.kinematics.q2, None);
        assert_eq!(config.phase_space_params().dfr_t_max, Some(0.6));
    }

    #[test]
    fn energy_override_replaces_the_file_value() {
        let file = write_config(NUMU_DIS_ON_CARBON);
        let config = QueryConfig::from_file(file.path()).unwrap();
        let interaction = config.interaction(Some(12.0)).unwrap();
        assert!((interaction.probe_energy(RefFrame::Lab) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn non_positive_energy_is_rejected() {
        let file = write_config(NUMU_DIS_ON_CARBON);
        let config = QueryConfig::from_file(file.path()).unwrap();
        assert!(matches!(
            config.interaction(Some(0.0)),
            Err(CliError::Argument(_))
        ));
    }

    #[test]
    fn exclusive_hadron_implies_its_flag() {
        let file = write_config(
            r#"
            [interaction]
            process = "quasi-elastic"
            current = "weak-cc"
            probe = 14
            energy = 3.0
            hit-nucleon = 2112

            [interaction.target]
            z = 1
            a = 1

            [interaction.exclusive]
            charm-hadron = 4122
            "#,
        );
        let interaction = QueryConfig::from_file(file.path())
            .unwrap()
            .interaction(None)
            .unwrap();
        assert!(interaction.exclusive().is_charm_event());
        assert_eq!(interaction.exclusive().charm_hadron, Some(particle::LAMBDA_C_PLUS));
    }

    #[test]
    fn dark_matter_probe_needs_a_mass() {
        let file = write_config(
            r#"
            [interaction]
            process = "dark-matter-elastic"
            current = "dark"
            probe = 2000010000
            energy = 3.0
            hit-nucleon = 2212

            [interaction.target]
            z = 1
            a = 1
            "#,
        );
        let config = QueryConfig::from_file(file.path()).unwrap();
        assert!(matches!(config.interaction(None), Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_process_name_is_a_config_error() {
        let file = write_config(&NUMU_DIS_ON_CARBON.replace("deep-inelastic", "deeply-inelastic"));
        let config = QueryConfig::from_file(file.path()).unwrap();
        assert!(matches!(config.interaction(None), Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config(&NUMU_DIS_ON_CARBON.replace("probe = 14", "probe = 14\nflux = 1"));
        assert!(matches!(
            QueryConfig::from_file(file.path()),
            Err(CliError::FileParsing { .. })
        ));
    }
}
