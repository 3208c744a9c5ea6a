use std::cmp::Ordering;
use std::collections::BinaryHeap;
use thiserror::Error;
use tracing::{debug, warn};

const LAMBDA2: f64 = 0.358_568_582_800_318_1; // sqrt(9/70)
const LAMBDA4: f64 = 0.948_683_298_050_513_8; // sqrt(9/10), also lambda3
const LAMBDA5: f64 = 0.688_247_201_611_685_3; // sqrt(9/19)
const FOURTH_DIFF_RATIO: f64 = (9.0 / 70.0) / (9.0 / 10.0);

#[derive(Debug, Error, PartialEq)]
pub enum IntegrationError {
    #[error("Lower and upper bounds have different dimensions ({lower} vs {upper})")]
    DimensionMismatch { lower: usize, upper: usize },
    #[error("Adaptive cubature needs at least 2 dimensions, got {0}")]
    UnsupportedDimension(usize),
    #[error("Gauss-Legendre order must be at least 1")]
    ZeroOrder,
}

/// Stopping criteria for adaptive cubature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub relative: f64,
    pub absolute: f64,
    pub min_evaluations: usize,
    pub max_evaluations: usize,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            relative: 1e-2,
            absolute: 0.0,
            min_evaluations: 10_000,
            max_evaluations: 500_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationResult {
    pub value: f64,
    pub error: f64,
    pub evaluations: usize,
    pub converged: bool,
}

#[derive(Debug, Clone)]
struct Region {
    center: Vec<f64>,
    half_width: Vec<f64>,
    value: f64,
    error: f64,
    split_axis: usize,
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.error.total_cmp(&other.error) == Ordering::Equal
    }
}

impl Eq for Region {}

impl PartialOrd for Region {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Region {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error.total_cmp(&other.error)
    }
}

fn check_bounds(lower: &[f64], upper: &[f64]) -> Result<usize, IntegrationError> {
    if lower.len() != upper.len() {
        return Err(IntegrationError::DimensionMismatch {
            lower: lower.len(),
            upper: upper.len(),
        });
    }
    Ok(lower.len())
}

/// Genz–Malik degree-7 rule with an embedded degree-5 error estimate, applied
/// to one region. Returns the evaluated region and the number of calls made.
fn genz_malik<F>(f: &mut F, center: Vec<f64>, half_width: Vec<f64>) -> (Region, usize)
where
    F: FnMut(&[f64]) -> f64,
{
    let n = center.len();
    let nf = n as f64;
    let volume: f64 = half_width.iter().map(|h| 2.0 * h).product();

    let w7 = [
        (12824.0 - 9120.0 * nf + 400.0 * nf * nf) / 19683.0,
        980.0 / 6561.0,
        (1820.0 - 400.0 * nf) / 19683.0,
        200.0 / 19683.0,
        6859.0 / 19683.0 / 2f64.powi(n as i32),
    ];
    let w5 = [
        (729.0 - 950.0 * nf + 50.0 * nf * nf) / 729.0,
        245.0 / 486.0,
        (265.0 - 100.0 * nf) / 1458.0,
        25.0 / 729.0,
    ];

    let mut calls = 0;
    let mut point = center.clone();
    let mut eval = |point: &[f64], calls: &mut usize| {
        *calls += 1;
        f(point)
    };

    let f_center = eval(&point, &mut calls);

    let mut sum2 = 0.0;
    let mut sum3 = 0.0;
    let mut split_axis = 0;
    let mut largest_diff = -1.0;
    for i in 0..n {
        let mut axis_pair = |lambda: f64, calls: &mut usize| {
            point[i] = center[i] + lambda * half_width[i];
            let plus = eval(&point, calls);
            point[i] = center[i] - lambda * half_width[i];
            let minus = eval(&point, calls);
            point[i] = center[i];
            plus + minus
        };
        let pair2 = axis_pair(LAMBDA2, &mut calls);
        let pair3 = axis_pair(LAMBDA4, &mut calls);
        sum2 += pair2;
        sum3 += pair3;

        let diff = ((pair2 - 2.0 * f_center) - FOURTH_DIFF_RATIO * (pair3 - 2.0 * f_center)).abs();
        if diff > largest_diff {
            largest_diff = diff;
            split_axis = i;
        }
    }

    let mut sum4 = 0.0;
    for i in 0..n {
        for j in i + 1..n {
            for (si, sj) in [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)] {
                point[i] = center[i] + si * LAMBDA4 * half_width[i];
                point[j] = center[j] + sj * LAMBDA4 * half_width[j];
                sum4 += eval(&point, &mut calls);
            }
            point[i] = center[i];
            point[j] = center[j];
        }
    }

    let mut sum5 = 0.0;
    for mask in 0..(1usize << n) {
        for (k, p) in point.iter_mut().enumerate() {
            let sign = if mask & (1 << k) == 0 { 1.0 } else { -1.0 };
            *p = center[k] + sign * LAMBDA5 * half_width[k];
        }
        sum5 += eval(&point, &mut calls);
    }

    let rule7 = w7[0] * f_center + w7[1] * sum2 + w7[2] * sum3 + w7[3] * sum4 + w7[4] * sum5;
    let rule5 = w5[0] * f_center + w5[1] * sum2 + w5[2] * sum3 + w5[3] * sum4;

    let region = Region {
        center,
        half_width,
        value: volume * rule7,
        error: (volume * (rule7 - rule5)).abs(),
        split_axis,
    };
    (region, calls)
}

/// Adaptive cubature of `f` over the box `[lower, upper]` (at least two
/// dimensions), bisecting the worst region along its roughest axis until the
/// error estimate meets the tolerances.
pub fn adaptive<F>(
    mut f: F,
    lower: &[f64],
    upper: &[f64],
    tolerances: &Tolerances,
) -> Result<IntegrationResult, IntegrationError>
where
    F: FnMut(&[f64]) -> f64,
{
    let n = check_bounds(lower, upper)?;
    if n < 2 {
        return Err(IntegrationError::UnsupportedDimension(n));
    }

    let center: Vec<f64> = lower.iter().zip(upper).map(|(a, b)| 0.5 * (a + b)).collect();
    let half_width: Vec<f64> = lower.iter().zip(upper).map(|(a, b)| 0.5 * (b - a)).collect();
    let (first, mut evaluations) = genz_malik(&mut f, center, half_width);
    let calls_per_split = 2 * evaluations;

    let mut value = first.value;
    let mut error = first.error;
    let mut heap = BinaryHeap::from([first]);

    let converged = loop {
        let target = tolerances.absolute.max(tolerances.relative * value.abs());
        if error <= target && evaluations >= tolerances.min_evaluations {
            break true;
        }
        if evaluations + calls_per_split > tolerances.max_evaluations {
            break false;
        }
        let Some(worst) = heap.pop() else {
            break false;
        };
        value -= worst.value;
        error -= worst.error;

        let axis = worst.split_axis;
        let mut half = worst.half_width;
        half[axis] *= 0.5;
        for sign in [-1.0, 1.0] {
            let mut center = worst.center.clone();
            center[axis] += sign * half[axis];
            let (region, calls) = genz_malik(&mut f, center, half.clone());
            evaluations += calls;
            value += region.value;
            error += region.error;
            heap.push(region);
        }
    };

    // Running sums drift; recompute from the surviving regions.
    let value: f64 = heap.iter().map(|r| r.value).sum();
    let error: f64 = heap.iter().map(|r| r.error).sum();
    if converged {
        debug!("Cubature converged: {value:.6e} +- {error:.3e} after {evaluations} calls");
    } else {
        warn!("Cubature stopped at {evaluations} calls: {value:.6e} +- {error:.3e}");
    }
    Ok(IntegrationResult {
        value,
        error,
        evaluations,
        converged,
    })
}

/// Nodes and weights of the `order`-point Gauss–Legendre rule on [-1, 1].
pub fn gauss_legendre_nodes(order: usize) -> Vec<(f64, f64)> {
    let n = order;
    let mut nodes = Vec::with_capacity(n);
    for i in 0..n {
        let mut x = (std::f64::consts::PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
        let mut derivative = 1.0;
        for _ in 0..100 {
            // Three-term recurrence: p1 ends as P_n(x), p0 as P_{n-1}(x).
            let (mut p0, mut p1) = (1.0, x);
            for k in 2..=n {
                let kf = k as f64;
                let p2 = ((2.0 * kf - 1.0) * x * p1 - (kf - 1.0) * p0) / kf;
                p0 = p1;
                p1 = p2;
            }
            derivative = n as f64 * (x * p1 - p0) / (x * x - 1.0);
            let dx = p1 / derivative;
            x -= dx;
            if dx.abs() < 1e-15 {
                break;
            }
        }
        let weight = 2.0 / ((1.0 - x * x) * derivative * derivative);
        nodes.push((x, weight));
    }
    nodes
}

/// Fixed tensor-product Gauss–Legendre rule with `order` points per axis.
pub fn gauss_legendre<F>(
    mut f: F,
    lower: &[f64],
    upper: &[f64],
    order: usize,
) -> Result<IntegrationResult, IntegrationError>
where
    F: FnMut(&[f64]) -> f64,
{
    let n = check_bounds(lower, upper)?;
    if order == 0 {
        return Err(IntegrationError::ZeroOrder);
    }
    let rule = gauss_legendre_nodes(order);
    let half: Vec<f64> = lower.iter().zip(upper).map(|(a, b)| 0.5 * (b - a)).collect();
    let mid: Vec<f64> = lower.iter().zip(upper).map(|(a, b)| 0.5 * (a + b)).collect();
    let jacobian: f64 = half.iter().product();

    let mut index = vec![0usize; n];
    let mut point = vec![0.0; n];
    let mut value = 0.0;
    let mut evaluations = 0;
    loop {
        let mut weight = 1.0;
        for k in 0..n {
            let (x, w) = rule[index[k]];
            point[k] = mid[k] + half[k] * x;
            weight *= w;
        }
        value += weight * f(&point);
        evaluations += 1;

        let mut k = 0;
        while k < n {
            index[k] += 1;
            if index[k] < order {
                break;
            }
            index[k] = 0;
            k += 1;
        }
        if k == n {
            break;
        }
    }

    Ok(IntegrationResult {
        value: jacobian * value,
        error: 0.0,
        evaluations,
        converged: true,
    })
}
