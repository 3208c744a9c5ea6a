use std::path::PathBuf;
use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::interaction::InteractionError;
use crate::core::numerics::integration::IntegrationError;
use crate::core::numerics::spline::SplineError;
use crate::core::phase_space::PhaseSpaceError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Phase space error: {source}")]
    PhaseSpace {
        #[from]
        source: PhaseSpaceError,
    },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid interaction: {source}")]
    Interaction {
        #[from]
        source: InteractionError,
    },

    #[error("Integration failed: {source}")]
    Integration {
        #[from]
        source: IntegrationError,
    },

    #[error("Spline construction failed: {source}")]
    Spline {
        #[from]
        source: SplineError,
    },

    #[error("Kinematics generation failed: {reason}")]
    KinematicsGeneration { reason: String, fast_forward: bool },

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Failed to read or write '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed spline file '{path}': {source}", path = path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl EngineError {
    /// Errors after which the process must stop: a broken rejection bound, or a
    /// channel that has no kinematics at all.
    pub fn is_fatal(&self) -> bool {
        match self {
            EngineError::InvariantViolation(_) => true,
            EngineError::PhaseSpace { source } => matches!(
                source,
                PhaseSpaceError::UnsupportedChannel(_) | PhaseSpaceError::NumericalError { .. }
            ),
            _ => false,
        }
    }

    /// Errors that only abandon the current event; the generation loop retries.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::KinematicsGeneration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::process::ProcessInfo;

    #[test]
    fn kinematics_generation_is_recoverable_not_fatal() {
        let err = EngineError::KinematicsGeneration {
            reason: "non-positive max xsec".into(),
            fast_forward: true,
        };
        assert!(err.is_recoverable());
        assert!(!err.is_fatal());
    }

    #[test]
    fn invariant_violation_is_fatal() {
        let err = EngineError::InvariantViolation("xsec above bound".into());
        assert!(err.is_fatal());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn phase_space_errors_are_classified_by_kind() {
        let unsupported: EngineError =
            PhaseSpaceError::UnsupportedChannel(ProcessInfo::default()).into();
        assert!(unsupported.is_fatal());

        let missing: EngineError = PhaseSpaceError::MissingParameter("DFR-t-max").into();
        assert!(!missing.is_fatal());
        assert!(!missing.is_recoverable());
    }
}
