//! Physical constants, numerical controls and unit conversions.
//!
//! All masses and energies are in GeV and all cross sections are in natural
//! units (GeV⁻²) unless a name says otherwise.

// --- Lepton masses (PDG 2022) ---
pub const ELECTRON_MASS: f64 = 0.000_510_998_95;
pub const MUON_MASS: f64 = 0.105_658_375_5;
pub const TAU_MASS: f64 = 1.776_86;

pub const ELECTRON_MASS2: f64 = ELECTRON_MASS * ELECTRON_MASS;
pub const MUON_MASS2: f64 = MUON_MASS * MUON_MASS;

// --- Hadron masses ---
pub const PROTON_MASS: f64 = 0.938_272_088_16;
pub const NEUTRON_MASS: f64 = 0.939_565_420_52;
pub const NUCLEON_MASS: f64 = 0.5 * (PROTON_MASS + NEUTRON_MASS);
pub const PION_MASS: f64 = 0.139_570_39; // charged pion
pub const PI0_MASS: f64 = 0.134_976_8;
pub const LIGHTEST_CHARM_HADRON_MASS: f64 = 1.87;

// --- Boson masses ---
pub const W_BOSON_MASS: f64 = 80.377;
/// Small effective mass assigned to a photon-like hadronic system so that
/// two-body formulas stay finite.
pub const PHOTON_TEST_MASS: f64 = 1e-6;

// --- Numerical controls ---
/// Generic guard used to keep ranges strictly inside their physical edges.
pub const A_SMALL_NUM: f64 = 1e-6;
/// Lower Q² cut applied to inelastic limits (GeV²).
pub const MIN_Q2_LIMIT: f64 = 1e-4;
/// Lower Q² cut for very-low-energy processes such as inverse beta decay (GeV²).
pub const MIN_Q2_LIMIT_VLE: f64 = 1e-10;

// --- Channel-specific caps ---
/// Upper Q² bound for meson-exchange-current interactions (GeV²).
///
/// Kept as a named constant rather than a tunable; the value matches the
/// ceiling the MEC models were validated against.
pub const MEC_Q2_MAX: f64 = 1.44;
/// Upper |t| bound for coherent production (GeV²).
pub const COH_T_MAX: f64 = 0.05;

// --- Units ---
/// ħc in GeV·cm.
pub const HBAR_C_GEV_CM: f64 = 1.973_269_804e-14;
/// One centimetre in natural units (GeV⁻¹).
pub const CM: f64 = 1.0 / HBAR_C_GEV_CM;
/// One square centimetre in natural units (GeV⁻²).
pub const CM2: f64 = CM * CM;
/// Internal integration unit: differential cross sections are integrated
/// in multiples of 1e-38 cm² and rescaled on the way out.
pub const XSEC_UNIT: f64 = 1e-38 * CM2;
