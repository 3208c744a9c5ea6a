use crate::core::models::interaction::Interaction;
use std::fmt;

/// Identity of a configured algorithm: its name plus the name of the parameter
/// set it was configured with. Two configurations of one model never share
/// cache entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlgorithmId {
    pub name: String,
    pub config: String,
}

impl AlgorithmId {
    pub fn new(name: impl Into<String>, config: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: config.into(),
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.config)
    }
}

/// A differential cross-section model over the (W, Q²) plane.
pub trait XSecAlgorithm {
    fn id(&self) -> AlgorithmId;

    /// Whether the model describes this interaction at all.
    fn valid_process(&self, interaction: &Interaction) -> bool;

    /// d²σ/dW dQ² at the interaction's running kinematics, in natural units.
    ///
    /// Models are expected to return zero outside the kinematically allowed
    /// region unless the interaction's `skip_kinematic_check` flag is set.
    fn xsec(&self, interaction: &Interaction) -> f64;
}
