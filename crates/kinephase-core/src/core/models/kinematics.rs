use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kinematic variables that a phase-space query can be asked about.
///
/// Only the first six have limit calculators; the rest are accepted so that a
/// request for them degrades to a logged sentinel instead of a hard failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KineVar {
    X,
    Y,
    Q2,
    SmallQ2,
    W,
    T,
    Nu,
    LeptonKineticEnergy,
    CosThetaLepton,
}

impl KineVar {
    pub const LIMITED: [KineVar; 6] = [
        KineVar::W,
        KineVar::Q2,
        KineVar::SmallQ2,
        KineVar::X,
        KineVar::Y,
        KineVar::T,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KineVar::X => "x",
            KineVar::Y => "y",
            KineVar::Q2 => "Q2",
            KineVar::SmallQ2 => "q2",
            KineVar::W => "W",
            KineVar::T => "t",
            KineVar::Nu => "nu",
            KineVar::LeptonKineticEnergy => "Tl",
            KineVar::CosThetaLepton => "ctl",
        }
    }
}

impl fmt::Display for KineVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid kinematic variable: '{0}'")]
pub struct ParseKineVarError(pub String);

impl FromStr for KineVar {
    type Err = ParseKineVarError;

    // Case matters: `Q2` and `q2` are different variables.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" => Ok(KineVar::X),
            "y" => Ok(KineVar::Y),
            "Q2" => Ok(KineVar::Q2),
            "q2" => Ok(KineVar::SmallQ2),
            "W" | "w" => Ok(KineVar::W),
            "t" => Ok(KineVar::T),
            "nu" => Ok(KineVar::Nu),
            "Tl" => Ok(KineVar::LeptonKineticEnergy),
            "ctl" => Ok(KineVar::CosThetaLepton),
            other => Err(ParseKineVarError(other.to_string())),
        }
    }
}

/// The running kinematic point of an interaction. Unset values are `None`,
/// which is distinct from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Kinematics {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub q2: Option<f64>,
    pub w: Option<f64>,
    pub t: Option<f64>,
}

impl Kinematics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_xy(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_wq2(mut self, w: f64, q2: f64) -> Self {
        self.w = Some(w);
        self.q2 = Some(q2);
        self
    }

    pub fn with_t(mut self, t: f64) -> Self {
        self.t = Some(t);
        self
    }

    pub fn get(&self, var: KineVar) -> Option<f64> {
        match var {
            KineVar::X => self.x,
            KineVar::Y => self.y,
            KineVar::Q2 => self.q2,
            KineVar::SmallQ2 => self.q2.map(|q2| -q2),
            KineVar::W => self.w,
            KineVar::T => self.t,
            KineVar::Nu | KineVar::LeptonKineticEnergy | KineVar::CosThetaLepton => None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
