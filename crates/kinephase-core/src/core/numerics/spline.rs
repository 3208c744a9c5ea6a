use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    /// Natural cubic spline (zero curvature at both ends).
    #[default]
    Cubic,
    /// Fritsch–Carlson monotone piecewise cubic.
    Monotone,
    Linear,
}

impl Interpolation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interpolation::Cubic => "cubic",
            Interpolation::Monotone => "monotone",
            Interpolation::Linear => "linear",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown interpolation method: '{0}'")]
pub struct ParseInterpolationError(pub String);

impl FromStr for Interpolation {
    type Err = ParseInterpolationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tspline3" | "cubic" | "spline" => Ok(Interpolation::Cubic),
            "monotone" | "fritsch-carlson" => Ok(Interpolation::Monotone),
            "linear" => Ok(Interpolation::Linear),
            _ => Err(ParseInterpolationError(s.to_string())),
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SplineError {
    #[error("A spline needs at least 2 distinct knots, got {0}")]
    TooFewKnots(usize),
    #[error("Knot {index} is not finite: ({x}, {y})")]
    NonFinite { index: usize, x: f64, y: f64 },
}

/// Piecewise cubic `y = a + b·t + c·t² + d·t³` with `t = x - x_i` on segment `i`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Segment {
    fn eval(&self, t: f64) -> f64 {
        self.a + t * (self.b + t * (self.c + t * self.d))
    }
}

/// One-dimensional interpolating spline through a set of knots.
///
/// Evaluation outside `[x_min, x_max]` yields zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    segments: Vec<Segment>,
    method: Interpolation,
}

impl Spline {
    /// Builds a spline from knots in any order. Knots sharing an abscissa keep the
    /// last value given.
    pub fn new(knots: &[(f64, f64)], method: Interpolation) -> Result<Self, SplineError> {
        if let Some((index, &(x, y))) = knots
            .iter()
            .enumerate()
            .find(|(_, (x, y))| !x.is_finite() || !y.is_finite())
        {
            return Err(SplineError::NonFinite { index, x, y });
        }

        let mut sorted: Vec<(f64, f64)> = knots.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut deduped: Vec<(f64, f64)> = Vec::with_capacity(sorted.len());
        for (x, y) in sorted {
            match deduped.last_mut() {
                Some(last) if last.0 == x => last.1 = y,
                _ => deduped.push((x, y)),
            }
        }
        if deduped.len() < 2 {
            return Err(SplineError::TooFewKnots(deduped.len()));
        }

        let (xs, ys): (Vec<f64>, Vec<f64>) = deduped.into_iter().unzip();
        let segments = match method {
            Interpolation::Cubic => natural_cubic(&xs, &ys),
            Interpolation::Monotone => monotone_cubic(&xs, &ys),
            Interpolation::Linear => linear(&xs, &ys),
        };
        Ok(Self {
            xs,
            ys,
            segments,
            method,
        })
    }

    pub fn method(&self) -> Interpolation {
        self.method
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn x_min(&self) -> f64 {
        self.xs[0]
    }

    pub fn x_max(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.x_min() && x <= self.x_max()
    }

    pub fn knots(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        if !self.contains(x) {
            return 0.0;
        }
        let i = match self.xs.binary_search_by(|k| k.total_cmp(&x)) {
            Ok(i) => return self.ys[i],
            Err(i) => i - 1,
        };
        self.segments[i].eval(x - self.xs[i])
    }
}

fn secants(xs: &[f64], ys: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let delta: Vec<f64> = ys
        .windows(2)
        .zip(&h)
        .map(|(w, h)| (w[1] - w[0]) / h)
        .collect();
    (h, delta)
}

fn linear(xs: &[f64], ys: &[f64]) -> Vec<Segment> {
    let (_, delta) = secants(xs, ys);
    ys.iter()
        .zip(delta)
        .map(|(&a, b)| Segment {
            a,
            b,
            c: 0.0,
            d: 0.0,
        })
        .collect()
}

fn natural_cubic(xs: &[f64], ys: &[f64]) -> Vec<Segment> {
    let n = xs.len();
    let (h, delta) = secants(xs, ys);

    // Second derivatives m[i], with m[0] = m[n-1] = 0, from the tridiagonal system.
    let mut m = vec![0.0; n];
    if n > 2 {
        let mut diag = vec![0.0; n];
        let mut rhs = vec![0.0; n];
        for i in 1..n - 1 {
            diag[i] = 2.0 * (h[i - 1] + h[i]);
            rhs[i] = 6.0 * (delta[i] - delta[i - 1]);
        }
        for i in 2..n - 1 {
            let factor = h[i - 1] / diag[i - 1];
            diag[i] -= factor * h[i - 1];
            rhs[i] -= factor * rhs[i - 1];
        }
        for i in (1..n - 1).rev() {
            let upper = if i + 1 < n - 1 { h[i] * m[i + 1] } else { 0.0 };
            m[i] = (rhs[i] - upper) / diag[i];
        }
    }

    (0..n - 1)
        .map(|i| Segment {
            a: ys[i],
            b: delta[i] - h[i] * (2.0 * m[i] + m[i + 1]) / 6.0,
            c: m[i] / 2.0,
            d: (m[i + 1] - m[i]) / (6.0 * h[i]),
        })
        .collect()
}

fn monotone_cubic(xs: &[f64], ys: &[f64]) -> Vec<Segment> {
    let n = xs.len();
    let (h, delta) = secants(xs, ys);

    let mut tangent = vec![0.0; n];
    tangent[0] = delta[0];
    tangent[n - 1] = delta[n - 2];
    for i in 1..n - 1 {
        tangent[i] = if delta[i - 1] * delta[i] <= 0.0 {
            0.0
        } else {
            0.5 * (delta[i - 1] + delta[i])
        };
    }
    for i in 0..n - 1 {
        if delta[i] == 0.0 {
            tangent[i] = 0.0;
            tangent[i + 1] = 0.0;
            continue;
        }
        let alpha = tangent[i] / delta[i];
        let beta = tangent[i + 1] / delta[i];
        let norm = alpha * alpha + beta * beta;
        if norm > 9.0 {
            let tau = 3.0 / norm.sqrt();
            tangent[i] = tau * alpha * delta[i];
            tangent[i + 1] = tau * beta * delta[i];
        }
    }

    (0..n - 1)
        .map(|i| Segment {
            a: ys[i],
            b: tangent[i],
            c: (3.0 * delta[i] - 2.0 * tangent[i] - tangent[i + 1]) / h[i],
            d: (tangent[i] + tangent[i + 1] - 2.0 * delta[i]) / (h[i] * h[i]),
        })
        .collect()
}
