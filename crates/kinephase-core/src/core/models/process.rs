use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The scattering channel of an interaction.
///
/// Every phase-space query dispatches on this enum with an exhaustive match, so a
/// new channel cannot be added without deciding its threshold and limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScatteringKind {
    QuasiElastic,
    SinglePion,
    SingleKaon,
    Resonant,
    DeepInelastic,
    CoherentElastic,
    CoherentProduction,
    Diffractive,
    InverseMuonDecay,
    IMDAnnihilation,
    InverseBetaDecay,
    NuElectronElastic,
    AMNuGamma,
    MEC,
    GlashowResonance,
    PhotonResonance,
    PhotonCoherent,
    DarkMatterElastic,
    DarkMatterDeepInelastic,
    DarkMatterElectronElastic,
    Normalization,
    #[default]
    Unknown,
}

impl ScatteringKind {
    pub const ALL: [ScatteringKind; 22] = [
        ScatteringKind::QuasiElastic,
        ScatteringKind::SinglePion,
        ScatteringKind::SingleKaon,
        ScatteringKind::Resonant,
        ScatteringKind::DeepInelastic,
        ScatteringKind::CoherentElastic,
        ScatteringKind::CoherentProduction,
        ScatteringKind::Diffractive,
        ScatteringKind::InverseMuonDecay,
        ScatteringKind::IMDAnnihilation,
        ScatteringKind::InverseBetaDecay,
        ScatteringKind::NuElectronElastic,
        ScatteringKind::AMNuGamma,
        ScatteringKind::MEC,
        ScatteringKind::GlashowResonance,
        ScatteringKind::PhotonResonance,
        ScatteringKind::PhotonCoherent,
        ScatteringKind::DarkMatterElastic,
        ScatteringKind::DarkMatterDeepInelastic,
        ScatteringKind::DarkMatterElectronElastic,
        ScatteringKind::Normalization,
        ScatteringKind::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScatteringKind::QuasiElastic => "quasi-elastic",
            ScatteringKind::SinglePion => "single-pion",
            ScatteringKind::SingleKaon => "single-kaon",
            ScatteringKind::Resonant => "resonant",
            ScatteringKind::DeepInelastic => "deep-inelastic",
            ScatteringKind::CoherentElastic => "coherent-elastic",
            ScatteringKind::CoherentProduction => "coherent-production",
            ScatteringKind::Diffractive => "diffractive",
            ScatteringKind::InverseMuonDecay => "inverse-muon-decay",
            ScatteringKind::IMDAnnihilation => "imd-annihilation",
            ScatteringKind::InverseBetaDecay => "inverse-beta-decay",
            ScatteringKind::NuElectronElastic => "nu-electron-elastic",
            ScatteringKind::AMNuGamma => "am-nu-gamma",
            ScatteringKind::MEC => "mec",
            ScatteringKind::GlashowResonance => "glashow-resonance",
            ScatteringKind::PhotonResonance => "photon-resonance",
            ScatteringKind::PhotonCoherent => "photon-coherent",
            ScatteringKind::DarkMatterElastic => "dark-matter-elastic",
            ScatteringKind::DarkMatterDeepInelastic => "dark-matter-deep-inelastic",
            ScatteringKind::DarkMatterElectronElastic => "dark-matter-electron-elastic",
            ScatteringKind::Normalization => "normalization",
            ScatteringKind::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionCurrent {
    WeakCC,
    WeakNC,
    WeakMix,
    EM,
    Dark,
    #[default]
    Unknown,
}

impl InteractionCurrent {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionCurrent::WeakCC => "weak-cc",
            InteractionCurrent::WeakNC => "weak-nc",
            InteractionCurrent::WeakMix => "weak-mix",
            InteractionCurrent::EM => "em",
            InteractionCurrent::Dark => "dark",
            InteractionCurrent::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid process name: '{0}'")]
pub struct ParseProcessError(pub String);

impl FromStr for ScatteringKind {
    type Err = ParseProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        ScatteringKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseProcessError(s.to_string()))
    }
}

impl FromStr for InteractionCurrent {
    type Err = ParseProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "weak-cc" | "cc" => Ok(InteractionCurrent::WeakCC),
            "weak-nc" | "nc" => Ok(InteractionCurrent::WeakNC),
            "weak-mix" | "mix" => Ok(InteractionCurrent::WeakMix),
            "em" => Ok(InteractionCurrent::EM),
            "dark" => Ok(InteractionCurrent::Dark),
            "unknown" => Ok(InteractionCurrent::Unknown),
            _ => Err(ParseProcessError(s.to_string())),
        }
    }
}

impl fmt::Display for ScatteringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for InteractionCurrent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scattering channel plus the current that mediates it. Immutable once an
/// interaction has been built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProcessInfo {
    pub scattering: ScatteringKind,
    pub current: InteractionCurrent,
}

impl ProcessInfo {
    pub fn new(scattering: ScatteringKind, current: InteractionCurrent) -> Self {
        Self {
            scattering,
            current,
        }
    }

    pub fn is_known(&self) -> bool {
        self.scattering != ScatteringKind::Unknown && self.current != InteractionCurrent::Unknown
    }

    pub fn is_quasi_elastic(&self) -> bool {
        self.scattering == ScatteringKind::QuasiElastic
    }
    pub fn is_single_pion(&self) -> bool {
        self.scattering == ScatteringKind::SinglePion
    }
    pub fn is_single_kaon(&self) -> bool {
        self.scattering == ScatteringKind::SingleKaon
    }
    pub fn is_resonant(&self) -> bool {
        self.scattering == ScatteringKind::Resonant
    }
    pub fn is_deep_inelastic(&self) -> bool {
        self.scattering == ScatteringKind::DeepInelastic
    }
    pub fn is_coherent_elastic(&self) -> bool {
        self.scattering == ScatteringKind::CoherentElastic
    }
    pub fn is_coherent_production(&self) -> bool {
        self.scattering == ScatteringKind::CoherentProduction
    }
    pub fn is_diffractive(&self) -> bool {
        self.scattering == ScatteringKind::Diffractive
    }
    pub fn is_inverse_beta_decay(&self) -> bool {
        self.scattering == ScatteringKind::InverseBetaDecay
    }
    pub fn is_mec(&self) -> bool {
        self.scattering == ScatteringKind::MEC
    }
    pub fn is_dark_matter_elastic(&self) -> bool {
        self.scattering == ScatteringKind::DarkMatterElastic
    }
    pub fn is_dark_matter_deep_inelastic(&self) -> bool {
        self.scattering == ScatteringKind::DarkMatterDeepInelastic
    }

    pub fn is_weak_cc(&self) -> bool {
        self.current == InteractionCurrent::WeakCC
    }
    pub fn is_weak_nc(&self) -> bool {
        self.current == InteractionCurrent::WeakNC
    }
    pub fn is_weak(&self) -> bool {
        matches!(
            self.current,
            InteractionCurrent::WeakCC | InteractionCurrent::WeakNC | InteractionCurrent::WeakMix
        )
    }
    pub fn is_em(&self) -> bool {
        self.current == InteractionCurrent::EM
    }
    pub fn is_dark(&self) -> bool {
        self.current == InteractionCurrent::Dark
    }
}

impl fmt::Display for ProcessInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.current, self.scattering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scattering_kind_parses_from_its_own_name() {
        for kind in ScatteringKind::ALL {
            assert_eq!(kind.as_str().parse::<ScatteringKind>(), Ok(kind));
        }
    }

    #[test]
    fn scattering_kind_parsing_accepts_underscores_and_case() {
        assert_eq!(
            "Deep_Inelastic".parse::<ScatteringKind>(),
            Ok(ScatteringKind::DeepInelastic)
        );
    }

    #[test]
    fn scattering_kind_parsing_rejects_unknown_names() {
        assert_eq!(
            "hyperon".parse::<ScatteringKind>(),
            Err(ParseProcessError("hyperon".to_string()))
        );
    }

    #[test]
    fn current_parsing_accepts_short_aliases() {
        assert_eq!("cc".parse(), Ok(InteractionCurrent::WeakCC));
        assert_eq!("Weak-NC".parse(), Ok(InteractionCurrent::WeakNC));
        assert!("strong".parse::<InteractionCurrent>().is_err());
    }

    #[test]
    fn process_with_unknown_part_is_not_known() {
        let info = ProcessInfo::new(ScatteringKind::QuasiElastic, InteractionCurrent::Unknown);
        assert!(!info.is_known());
        let info = ProcessInfo::new(ScatteringKind::QuasiElastic, InteractionCurrent::WeakCC);
        assert!(info.is_known());
        assert!(info.is_weak());
        assert!(info.is_weak_cc());
    }

    #[test]
    fn process_display_lists_current_then_scattering() {
        let info = ProcessInfo::new(ScatteringKind::Resonant, InteractionCurrent::WeakNC);
        assert_eq!(info.to_string(), "weak-nc,resonant");
    }
}
