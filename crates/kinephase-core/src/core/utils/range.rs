use std::fmt;

/// A closed interval `[min, max]` over one kinematic variable.
///
/// `{-1, -1}` is the sentinel for an undefined or inapplicable range and never
/// contains any value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range1D {
    pub min: f64,
    pub max: f64,
}

impl Range1D {
    pub const UNDEFINED: Range1D = Range1D {
        min: -1.0,
        max: -1.0,
    };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub const fn point(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn is_undefined(&self) -> bool {
        self.min == -1.0 && self.max == -1.0
    }

    /// True for a non-sentinel range with `min <= max` and neither bound NaN.
    pub fn is_valid(&self) -> bool {
        !self.is_undefined() && self.min <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        self.is_valid() && value >= self.min && value <= self.max
    }

    /// The signed-variable mirror: `[-max, -min]`. The sentinel maps to itself.
    pub fn reflected(&self) -> Self {
        if self.is_undefined() {
            return *self;
        }
        Self {
            min: -self.max,
            max: -self.min,
        }
    }

    /// Moves both ends inward by `eps`.
    pub fn shrunk(&self, eps: f64) -> Self {
        Self {
            min: self.min + eps,
            max: self.max - eps,
        }
    }
}

impl Default for Range1D {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl fmt::Display for Range1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            write!(f, "[undefined]")
        } else {
            write!(f, "[{:.6e}, {:.6e}]", self.min, self.max)
        }
    }
}

/// Collapses a near-degenerate window onto a single value, otherwise pulls both
/// ends inside by one machine epsilon (relative).
///
/// Integration over a zero-width region is numerically unstable, so windows whose
/// width is below `(max + min) * EPSILON` become the point `2·max·min / (max + min)`.
pub fn snap_degenerate(range: Range1D) -> Range1D {
    let Range1D { min, max } = range;
    if (max - min) < (max + min) * f64::EPSILON {
        let mid = 2.0 * max * min / (max + min);
        Range1D::point(mid)
    } else {
        Range1D::new(min * (1.0 + f64::EPSILON), max * (1.0 - f64::EPSILON))
    }
}
