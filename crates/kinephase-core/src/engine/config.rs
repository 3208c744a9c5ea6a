use crate::core::numerics::integration::Tolerances;
use crate::core::numerics::spline::Interpolation;
use crate::core::phase_space::PhaseSpaceParams;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Safety factor of the primary max-xsec variant when none is configured.
const DEFAULT_SAFETY_FACTOR: f64 = 1.25;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },

    #[error("Failed to read '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{path}': {source}", path = path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrationType {
    /// Genz–Malik adaptive cubature.
    #[default]
    Adaptive,
    /// Fixed Gauss–Legendre product rule.
    Gauss,
}

impl IntegrationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationType::Adaptive => "adaptive",
            IntegrationType::Gauss => "gauss",
        }
    }
}

impl fmt::Display for IntegrationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown integration type: '{0}'")]
pub struct ParseIntegrationTypeError(pub String);

impl FromStr for IntegrationType {
    type Err = ParseIntegrationTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "adaptive" | "genz-malik" => Ok(IntegrationType::Adaptive),
            "gauss" | "gauss-legendre" => Ok(IntegrationType::Gauss),
            _ => Err(ParseIntegrationTypeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationConfig {
    pub integration_type: IntegrationType,
    pub tolerances: Tolerances,
    pub gauss_order: usize,
    /// Validity range of the cross-section model (GeV).
    pub emin: f64,
    pub emax: f64,
    /// Tabulate free-nucleon cross sections once and interpolate afterwards.
    pub precalc_bare_xsec: bool,
}

#[derive(Default)]
pub struct IntegrationConfigBuilder {
    integration_type: Option<IntegrationType>,
    relative_tolerance: Option<f64>,
    absolute_tolerance: Option<f64>,
    max_evaluations: Option<usize>,
    min_evaluations: Option<usize>,
    gauss_order: Option<usize>,
    emin: Option<f64>,
    emax: Option<f64>,
    precalc_bare_xsec: Option<bool>,
}

impl IntegrationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn integration_type(mut self, kind: IntegrationType) -> Self {
        self.integration_type = Some(kind);
        self
    }
    pub fn relative_tolerance(mut self, tolerance: f64) -> Self {
        self.relative_tolerance = Some(tolerance);
        self
    }
    pub fn absolute_tolerance(mut self, tolerance: f64) -> Self {
        self.absolute_tolerance = Some(tolerance);
        self
    }
    pub fn max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = Some(n);
        self
    }
    pub fn min_evaluations(mut self, n: usize) -> Self {
        self.min_evaluations = Some(n);
        self
    }
    pub fn gauss_order(mut self, order: usize) -> Self {
        self.gauss_order = Some(order);
        self
    }
    pub fn emin(mut self, energy: f64) -> Self {
        self.emin = Some(energy);
        self
    }
    pub fn emax(mut self, energy: f64) -> Self {
        self.emax = Some(energy);
        self
    }
    pub fn precalc_bare_xsec(mut self, enabled: bool) -> Self {
        self.precalc_bare_xsec = Some(enabled);
        self
    }

    pub fn build(self) -> Result<IntegrationConfig, ConfigError> {
        let defaults = Tolerances::default();
        let emin = self.emin.ok_or(ConfigError::MissingParameter("emin"))?;
        let emax = self.emax.ok_or(ConfigError::MissingParameter("emax"))?;
        if !(emin > 0.0 && emax > emin) {
            return Err(ConfigError::InvalidValue {
                parameter: "emax",
                reason: format!("validity range [{emin}, {emax}] is empty"),
            });
        }
        let tolerances = Tolerances {
            relative: self.relative_tolerance.unwrap_or(defaults.relative),
            absolute: self.absolute_tolerance.unwrap_or(defaults.absolute),
            max_evaluations: self.max_evaluations.unwrap_or(defaults.max_evaluations),
            min_evaluations: self.min_evaluations.unwrap_or(defaults.min_evaluations),
        };
        if tolerances.min_evaluations > tolerances.max_evaluations {
            return Err(ConfigError::InvalidValue {
                parameter: "min-evaluations",
                reason: format!(
                    "{} exceeds max-evaluations {}",
                    tolerances.min_evaluations, tolerances.max_evaluations
                ),
            });
        }
        Ok(IntegrationConfig {
            integration_type: self.integration_type.unwrap_or_default(),
            tolerances,
            gauss_order: self.gauss_order.unwrap_or(12),
            emin,
            emax,
            precalc_bare_xsec: self.precalc_bare_xsec.unwrap_or(false),
        })
    }
}

/// Per-variant tunables of the max-xsec cache.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantSettings {
    pub safety_factor: f64,
    pub interpolation: Interpolation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KineCacheConfig {
    /// Below this probe energy the max xsec is always recomputed.
    pub min_energy: f64,
    /// Tolerated overshoot of the cached maximum, in percent.
    pub max_xsec_diff_tolerance: f64,
    primary: VariantSettings,
    variants: HashMap<u32, VariantSettings>,
}

impl KineCacheConfig {
    /// Settings of one variant. Variant 0 falls back to the top-level settings;
    /// any other unlisted variant keeps its maximum unscaled.
    pub fn variant(&self, index: u32) -> VariantSettings {
        match self.variants.get(&index) {
            Some(settings) => *settings,
            None if index == 0 => self.primary,
            None => VariantSettings {
                safety_factor: 1.0,
                interpolation: self.primary.interpolation,
            },
        }
    }

    pub fn safety_factor(&self, index: u32) -> f64 {
        self.variant(index).safety_factor
    }

    pub fn interpolation(&self, index: u32) -> Interpolation {
        self.variant(index).interpolation
    }
}

#[derive(Default)]
pub struct KineCacheConfigBuilder {
    min_energy: Option<f64>,
    max_xsec_diff_tolerance: Option<f64>,
    safety_factor: Option<f64>,
    interpolation: Option<Interpolation>,
    variants: HashMap<u32, VariantSettings>,
}

impl KineCacheConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_energy(mut self, energy: f64) -> Self {
        self.min_energy = Some(energy);
        self
    }
    pub fn max_xsec_diff_tolerance(mut self, percent: f64) -> Self {
        self.max_xsec_diff_tolerance = Some(percent);
        self
    }
    pub fn safety_factor(mut self, factor: f64) -> Self {
        self.safety_factor = Some(factor);
        self
    }
    pub fn interpolation(mut self, method: Interpolation) -> Self {
        self.interpolation = Some(method);
        self
    }
    pub fn variant(mut self, index: u32, settings: VariantSettings) -> Self {
        self.variants.insert(index, settings);
        self
    }

    pub fn build(self) -> Result<KineCacheConfig, ConfigError> {
        let min_energy = self
            .min_energy
            .ok_or(ConfigError::MissingParameter("min-energy"))?;
        let primary = VariantSettings {
            safety_factor: self.safety_factor.unwrap_or(DEFAULT_SAFETY_FACTOR),
            interpolation: self.interpolation.unwrap_or_default(),
        };
        for settings in std::iter::once(&primary).chain(self.variants.values()) {
            let factor = settings.safety_factor;
            if !(factor.is_finite() && factor > 0.0) {
                return Err(ConfigError::InvalidValue {
                    parameter: "safety-factor",
                    reason: format!("{factor} is not a positive finite number"),
                });
            }
        }
        let tolerance = self.max_xsec_diff_tolerance.unwrap_or(999_999.0);
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(ConfigError::InvalidValue {
                parameter: "max-xsec-diff-tolerance",
                reason: format!("{tolerance} is not a non-negative percentage"),
            });
        }
        Ok(KineCacheConfig {
            min_energy,
            max_xsec_diff_tolerance: tolerance,
            primary,
            variants: self.variants,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RejectionConfig {
    /// Draws before an event is abandoned.
    pub max_iterations: usize,
    /// Grid points per axis in the max-xsec scan.
    pub scan_points: usize,
}

impl Default for RejectionConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            scan_points: 40,
        }
    }
}

/// Every tunable of the engine, as loaded from one TOML file.
#[derive(Debug, Clone, PartialEq)]
pub struct Tunables {
    pub integration: IntegrationConfig,
    pub kine_cache: KineCacheConfig,
    pub phase_space: PhaseSpaceParams,
    pub rejection: RejectionConfig,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileIntegration {
    #[serde(rename = "type")]
    integration_type: Option<IntegrationType>,
    relative_tolerance: Option<f64>,
    absolute_tolerance: Option<f64>,
    max_evaluations: Option<usize>,
    min_evaluations: Option<usize>,
    gauss_order: Option<usize>,
    emin: Option<f64>,
    emax: Option<f64>,
    precalc_bare_xsec: Option<bool>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileVariant {
    index: u32,
    safety_factor: Option<f64>,
    interpolation: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileKineCache {
    min_energy: Option<f64>,
    max_xsec_diff_tolerance: Option<f64>,
    safety_factor: Option<f64>,
    interpolation: Option<String>,
    #[serde(default)]
    variant: Vec<FileVariant>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FilePhaseSpace {
    #[serde(rename = "DFR-t-max", alias = "dfr-t-max")]
    dfr_t_max: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileRejection {
    max_iterations: Option<usize>,
    scan_points: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileTunables {
    integration: Option<FileIntegration>,
    kine_cache: Option<FileKineCache>,
    phase_space: Option<FilePhaseSpace>,
    rejection: Option<FileRejection>,
}

fn parse_interpolation(value: &str) -> Result<Interpolation, ConfigError> {
    value.parse().map_err(|e| ConfigError::InvalidValue {
        parameter: "interpolation",
        reason: format!("{e}"),
    })
}

impl Tunables {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading tunables from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileTunables = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_file(file)
    }

    fn from_file(file: FileTunables) -> Result<Self, ConfigError> {
        let integ = file.integration.unwrap_or_default();
        let mut builder = IntegrationConfigBuilder::new();
        if let Some(kind) = integ.integration_type {
            builder = builder.integration_type(kind);
        }
        if let Some(v) = integ.relative_tolerance {
            builder = builder.relative_tolerance(v);
        }
        if let Some(v) = integ.absolute_tolerance {
            builder = builder.absolute_tolerance(v);
        }
        if let Some(v) = integ.max_evaluations {
            builder = builder.max_evaluations(v);
        }
        if let Some(v) = integ.min_evaluations {
            builder = builder.min_evaluations(v);
        }
        if let Some(v) = integ.gauss_order {
            builder = builder.gauss_order(v);
        }
        if let Some(v) = integ.emin {
            builder = builder.emin(v);
        }
        if let Some(v) = integ.emax {
            builder = builder.emax(v);
        }
        if let Some(v) = integ.precalc_bare_xsec {
            builder = builder.precalc_bare_xsec(v);
        }
        let integration = builder.build()?;

        let cache = file.kine_cache.unwrap_or_default();
        let mut builder = KineCacheConfigBuilder::new();
        if let Some(v) = cache.min_energy {
            builder = builder.min_energy(v);
        }
        if let Some(v) = cache.max_xsec_diff_tolerance {
            builder = builder.max_xsec_diff_tolerance(v);
        }
        let default_safety = cache.safety_factor.unwrap_or(DEFAULT_SAFETY_FACTOR);
        let default_interpolation = match cache.interpolation.as_deref() {
            Some(name) => parse_interpolation(name)?,
            None => Interpolation::default(),
        };
        builder = builder
            .safety_factor(default_safety)
            .interpolation(default_interpolation);
        for variant in cache.variant {
            let interpolation = match variant.interpolation.as_deref() {
                Some(name) => parse_interpolation(name)?,
                None => default_interpolation,
            };
            builder = builder.variant(
                variant.index,
                VariantSettings {
                    safety_factor: variant.safety_factor.unwrap_or(default_safety),
                    interpolation,
                },
            );
        }
        let kine_cache = builder.build()?;

        let phase_space = PhaseSpaceParams {
            dfr_t_max: file.phase_space.and_then(|p| p.dfr_t_max),
        };

        let defaults = RejectionConfig::default();
        let rejection = file.rejection.unwrap_or_default();
        let rejection = RejectionConfig {
            max_iterations: rejection.max_iterations.unwrap_or(defaults.max_iterations),
            scan_points: rejection.scan_points.unwrap_or(defaults.scan_points),
        };

        Ok(Self {
            integration,
            kine_cache,
            phase_space,
            rejection,
        })
    }
}
