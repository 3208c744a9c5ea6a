use phf::{Map, phf_map};

pub type Pdg = i32;

pub const ELECTRON: Pdg = 11;
pub const POSITRON: Pdg = -11;
pub const NU_E: Pdg = 12;
pub const ANTI_NU_E: Pdg = -12;
pub const MUON: Pdg = 13;
pub const NU_MU: Pdg = 14;
pub const ANTI_NU_MU: Pdg = -14;
pub const TAU: Pdg = 15;
pub const NU_TAU: Pdg = 16;
pub const ANTI_NU_TAU: Pdg = -16;
pub const PHOTON: Pdg = 22;
pub const W_BOSON: Pdg = 24;

pub const PI0: Pdg = 111;
pub const PI_PLUS: Pdg = 211;
pub const PI_MINUS: Pdg = -211;
pub const K0: Pdg = 311;
pub const K_PLUS: Pdg = 321;
pub const K_MINUS: Pdg = -321;

pub const PROTON: Pdg = 2212;
pub const NEUTRON: Pdg = 2112;
pub const LAMBDA: Pdg = 3122;
pub const SIGMA_PLUS: Pdg = 3222;
pub const SIGMA_0: Pdg = 3212;
pub const SIGMA_MINUS: Pdg = 3112;

pub const D0: Pdg = 421;
pub const D_PLUS: Pdg = 411;
pub const DS_PLUS: Pdg = 431;
pub const LAMBDA_C_PLUS: Pdg = 4122;
pub const SIGMA_C_PLUS_PLUS: Pdg = 4222;
pub const SIGMA_C_PLUS: Pdg = 4212;

// Two-nucleon clusters struck in meson-exchange-current interactions.
pub const CLUSTER_NN: Pdg = 2_000_000_200;
pub const CLUSTER_NP: Pdg = 2_000_000_201;
pub const CLUSTER_PP: Pdg = 2_000_000_202;

pub const DARK_MATTER: Pdg = 2_000_010_000;

pub const FREE_PROTON_TARGET: Pdg = 1_000_010_010;
pub const FREE_NEUTRON_TARGET: Pdg = 1_000_000_010;

#[rustfmt::skip]
static MASSES: Map<i32, f64> = phf_map! {
    // --- Leptons ---
    11i32 => 0.000_510_998_95,
    12i32 => 0.0, 14i32 => 0.0, 16i32 => 0.0,
    13i32 => 0.105_658_375_5,
    15i32 => 1.776_86,

    // --- Gauge bosons ---
    22i32 => 0.0,
    24i32 => 80.377,

    // --- Light mesons ---
    111i32 => 0.134_976_8,
    211i32 => 0.139_570_39,
    311i32 => 0.497_611,
    321i32 => 0.493_677,

    // --- Nucleons and strange baryons ---
    2212i32 => 0.938_272_088_16,
    2112i32 => 0.939_565_420_52,
    3122i32 => 1.115_683,
    3222i32 => 1.189_37,
    3212i32 => 1.192_642,
    3112i32 => 1.197_449,

    // --- Charm hadrons ---
    421i32 => 1.864_84,
    411i32 => 1.869_66,
    431i32 => 1.968_35,
    4122i32 => 2.286_46,
    4222i32 => 2.453_97,
    4212i32 => 2.452_65,

    // --- Nucleon clusters (sum of constituent masses) ---
    2000000200i32 => 1.879_130_841_04,
    2000000201i32 => 1.877_837_508_68,
    2000000202i32 => 1.876_544_176_32,

    // --- Free nucleon targets ---
    1000010010i32 => 0.938_272_088_16,
    1000000010i32 => 0.939_565_420_52,
};

/// Rest mass for a PDG code, in GeV. Antiparticles share the particle mass.
///
/// Nuclear codes other than the free nucleons and the dark-matter probe are not
/// tabulated: nuclear masses come from [`super::target::Target`] and the
/// dark-matter mass from the probe four-momentum.
pub fn mass(pdg: Pdg) -> Option<f64> {
    MASSES.get(&pdg.abs()).copied()
}

pub fn is_neutrino(pdg: Pdg) -> bool {
    matches!(pdg, NU_E | NU_MU | NU_TAU)
}

pub fn is_anti_neutrino(pdg: Pdg) -> bool {
    matches!(pdg, ANTI_NU_E | ANTI_NU_MU | ANTI_NU_TAU)
}

pub fn is_neutral_lepton(pdg: Pdg) -> bool {
    is_neutrino(pdg) || is_anti_neutrino(pdg)
}

pub fn is_charged_lepton(pdg: Pdg) -> bool {
    matches!(pdg.abs(), ELECTRON | MUON | TAU)
}

pub fn is_nu_e(pdg: Pdg) -> bool {
    pdg.abs() == NU_E
}

pub fn is_nu_mu(pdg: Pdg) -> bool {
    pdg.abs() == NU_MU
}

pub fn is_nu_tau(pdg: Pdg) -> bool {
    pdg.abs() == NU_TAU
}

pub fn is_dark_matter(pdg: Pdg) -> bool {
    pdg.abs() == DARK_MATTER
}

pub fn is_proton(pdg: Pdg) -> bool {
    pdg == PROTON
}

pub fn is_neutron(pdg: Pdg) -> bool {
    pdg == NEUTRON
}

pub fn is_nucleon(pdg: Pdg) -> bool {
    is_proton(pdg) || is_neutron(pdg)
}

pub fn is_nucleon_cluster(pdg: Pdg) -> bool {
    matches!(pdg, CLUSTER_NN | CLUSTER_NP | CLUSTER_PP)
}

pub fn switch_proton_neutron(pdg: Pdg) -> Pdg {
    match pdg {
        PROTON => NEUTRON,
        NEUTRON => PROTON,
        other => other,
    }
}

/// Charged lepton produced by a charged-current interaction of `probe`.
pub fn charged_partner(probe: Pdg) -> Option<Pdg> {
    match probe {
        NU_E => Some(ELECTRON),
        ANTI_NU_E => Some(POSITRON),
        NU_MU => Some(MUON),
        ANTI_NU_MU => Some(-MUON),
        NU_TAU => Some(TAU),
        ANTI_NU_TAU => Some(-TAU),
        _ => None,
    }
}

pub fn ion_pdg(z: u32, a: u32) -> Pdg {
    1_000_000_000 + (z as Pdg) * 10_000 + (a as Pdg) * 10
}

pub fn is_ion(pdg: Pdg) -> bool {
    (1_000_000_000..2_000_000_000).contains(&pdg)
}

/// Proton number and mass number encoded in a `10LZZZAAAI` nuclear code.
pub fn ion_za(pdg: Pdg) -> Option<(u32, u32)> {
    if !is_ion(pdg) {
        return None;
    }
    let z = ((pdg / 10_000) % 1_000) as u32;
    let a = ((pdg / 10) % 1_000) as u32;
    Some((z, a))
}
