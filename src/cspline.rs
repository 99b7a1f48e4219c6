//! Cubic-spline interpolation with selectable boundary conditions.
//!
//! [`CSpline`] fits the classic piecewise cubic through a set of knots by
//! solving the tridiagonal second-derivative-continuity system, then answers
//! single-point and vectorized queries for values, first derivatives, and
//! cumulative definite integrals. The knot arrays are copied into the spline
//! at construction, so the spline never dangles if the caller's buffers go
//! away; rebuilding is required if the knots change.
//!
//! On interval `[x[i], x[i+1])` the spline is
//! `y[i] + b[i]*dx + c[i]*dx^2 + a[i]*dx^3` with `dx = x - x[i]`. Queries
//! outside the knot range are not errors: they extrapolate with the nearest
//! interval's polynomial.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{
    validate_data_length, validate_finite_slice, validate_strictly_increasing, NumericError,
    NumericResult,
};

/// Boundary condition selecting how the spline behaves at its end knots.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SplineBoundary {
    /// Second derivative zero at both ends.
    Natural,
    /// Second derivative constant over the first and last intervals.
    Parabolic,
    /// Third derivative continuous across the second and next-to-last knots
    /// (cubic extrapolation of the end second derivatives).
    Cubic,
    /// First derivative fixed by the caller at each end knot.
    Clamped {
        /// Spline slope at `x[0]`
        left: f64,
        /// Spline slope at `x[n-1]`
        right: f64,
    },
}

/// A fitted cubic spline over owned copies of the knots.
///
/// ```rust
/// use quadnum::{CSpline, SplineBoundary};
///
/// let spline = CSpline::new(
///     &[0.0, 1.0, 2.0, 3.0],
///     &[0.0, 1.0, 0.0, 1.0],
///     SplineBoundary::Natural,
/// )?;
/// assert_eq!(spline.value_at(0.0), 0.0);
/// # quadnum::NumericResult::Ok(())
/// ```
#[derive(Debug, Clone)]
pub struct CSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    boundary: SplineBoundary,
    // Per-interval coefficients, one entry per interval (n - 1 of each).
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    // cumulative[i] = definite integral from x[0] to x[i].
    cumulative: Vec<f64>,
}

impl CSpline {
    /// Fits a spline through the given knots.
    ///
    /// Fails fast, returning no partial object, if fewer than two knots are
    /// supplied, the arrays differ in length, any coordinate is non-finite,
    /// or `x` is not strictly increasing.
    pub fn new(x: &[f64], y: &[f64], boundary: SplineBoundary) -> NumericResult<Self> {
        if x.len() != y.len() {
            return Err(NumericError::MismatchedLengths {
                left: x.len(),
                right: y.len(),
            });
        }
        validate_data_length(x, 2)?;
        validate_finite_slice(x)?;
        validate_finite_slice(y)?;
        validate_strictly_increasing(x)?;
        if let SplineBoundary::Clamped { left, right } = boundary {
            for (name, v) in [("left", left), ("right", right)] {
                if !v.is_finite() {
                    return Err(NumericError::InvalidParameter {
                        parameter: name.to_string(),
                        value: v,
                        constraint: "finite clamped end derivative".to_string(),
                    });
                }
            }
        }

        let n = x.len();
        let h: Vec<f64> = (0..n - 1).map(|i| x[i + 1] - x[i]).collect();
        let s = second_derivatives(x, y, &h, boundary);

        let mut a = Vec::with_capacity(n - 1);
        let mut b = Vec::with_capacity(n - 1);
        let mut c = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            let slope = (y[i + 1] - y[i]) / h[i];
            b.push(slope - h[i] * (2.0 * s[i] + s[i + 1]) / 6.0);
            c.push(s[i] / 2.0);
            a.push((s[i + 1] - s[i]) / (6.0 * h[i]));
        }

        // Prefix sums of per-interval antiderivatives for integral queries.
        let mut cumulative = Vec::with_capacity(n - 1);
        cumulative.push(0.0);
        for i in 0..n - 2 {
            let piece = antiderivative(y[i], b[i], c[i], a[i], h[i]);
            cumulative.push(cumulative[i] + piece);
        }

        Ok(CSpline {
            x: x.to_vec(),
            y: y.to_vec(),
            boundary,
            a,
            b,
            c,
            cumulative,
        })
    }

    /// Number of knots.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false: construction requires at least two knots.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The knot x coordinates.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// The knot y coordinates.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// The boundary condition the spline was fitted with.
    pub fn boundary(&self) -> SplineBoundary {
        self.boundary
    }

    /// Index of the interval whose polynomial covers `t`.
    ///
    /// Out-of-range queries clamp to the first or last interval, which is
    /// what makes extrapolation use the boundary polynomial.
    fn interval(&self, t: f64) -> usize {
        let idx = self.x.partition_point(|&k| k <= t);
        idx.saturating_sub(1).min(self.x.len() - 2)
    }

    /// Evaluates the spline at a single point.
    pub fn value_at(&self, t: f64) -> f64 {
        let i = self.interval(t);
        let dx = t - self.x[i];
        self.y[i] + dx * (self.b[i] + dx * (self.c[i] + dx * self.a[i]))
    }

    /// Analytic first derivative at a single point.
    pub fn deriv_at(&self, t: f64) -> f64 {
        let i = self.interval(t);
        let dx = t - self.x[i];
        self.b[i] + dx * (2.0 * self.c[i] + 3.0 * self.a[i] * dx)
    }

    /// Definite integral of the spline from `x[0]` to a single point.
    ///
    /// Accumulated interval by interval; points left of `x[0]` give the
    /// (negative) integral of the first interval's polynomial.
    pub fn integral_at(&self, t: f64) -> f64 {
        let i = self.interval(t);
        let dx = t - self.x[i];
        self.cumulative[i] + antiderivative(self.y[i], self.b[i], self.c[i], self.a[i], dx)
    }

    /// Evaluates the spline at each query point independently.
    pub fn values(&self, ts: &[f64]) -> Vec<f64> {
        ts.iter().map(|&t| self.value_at(t)).collect()
    }

    /// First derivative at each query point independently.
    pub fn derivs(&self, ts: &[f64]) -> Vec<f64> {
        ts.iter().map(|&t| self.deriv_at(t)).collect()
    }

    /// Definite integral from `x[0]` to each query point independently.
    pub fn integrals(&self, ts: &[f64]) -> Vec<f64> {
        ts.iter().map(|&t| self.integral_at(t)).collect()
    }
}

/// Antiderivative of one interval's cubic, evaluated at offset `dx` from the
/// interval's left knot.
fn antiderivative(y: f64, b: f64, c: f64, a: f64, dx: f64) -> f64 {
    dx * (y + dx * (b / 2.0 + dx * (c / 3.0 + dx * a / 4.0)))
}

/// Solves for the knot second derivatives under the given boundary rule.
fn second_derivatives(x: &[f64], y: &[f64], h: &[f64], boundary: SplineBoundary) -> Vec<f64> {
    let n = x.len();

    // Boundary rules that need more knots than we have degenerate to the
    // natural rule.
    let boundary = match boundary {
        SplineBoundary::Parabolic if n < 3 => {
            log::debug!("parabolic boundary needs 3 knots, got {}; using natural", n);
            SplineBoundary::Natural
        }
        SplineBoundary::Cubic if n < 4 => {
            log::debug!("cubic boundary needs 4 knots, got {}; using natural", n);
            SplineBoundary::Natural
        }
        other => other,
    };

    let rhs_interior =
        |i: usize| 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);

    if let SplineBoundary::Cubic = boundary {
        // Eliminate s[0] and s[n-1] via third-derivative continuity
        // (s extrapolates linearly at each end), then solve the reduced
        // tridiagonal system for the interior second derivatives.
        let m = n - 2;
        let mut sub = vec![0.0; m];
        let mut diag = vec![0.0; m];
        let mut sup = vec![0.0; m];
        let mut rhs = vec![0.0; m];
        for k in 0..m {
            let i = k + 1;
            sub[k] = h[i - 1];
            diag[k] = 2.0 * (h[i - 1] + h[i]);
            sup[k] = h[i];
            rhs[k] = rhs_interior(i);
        }
        // s0 = ((h0 + h1) s1 - h0 s2) / h1
        diag[0] += h[0] * (h[0] + h[1]) / h[1];
        sup[0] -= h[0] * h[0] / h[1];
        // s[n-1] = ((h[n-2] + h[n-3]) s[n-2] - h[n-2] s[n-3]) / h[n-3]
        let he = h[n - 2];
        let hp = h[n - 3];
        diag[m - 1] += he * (he + hp) / hp;
        sub[m - 1] -= he * he / hp;

        let interior = thomas_solve(&sub, &diag, &sup, &rhs);
        let mut s = vec![0.0; n];
        s[1..n - 1].copy_from_slice(&interior);
        s[0] = ((h[0] + h[1]) * s[1] - h[0] * s[2]) / h[1];
        s[n - 1] = ((he + hp) * s[n - 2] - he * s[n - 3]) / hp;
        return s;
    }

    let mut sub = vec![0.0; n];
    let mut diag = vec![0.0; n];
    let mut sup = vec![0.0; n];
    let mut rhs = vec![0.0; n];
    for i in 1..n - 1 {
        sub[i] = h[i - 1];
        diag[i] = 2.0 * (h[i - 1] + h[i]);
        sup[i] = h[i];
        rhs[i] = rhs_interior(i);
    }
    match boundary {
        SplineBoundary::Natural => {
            diag[0] = 1.0;
            diag[n - 1] = 1.0;
        }
        SplineBoundary::Parabolic => {
            diag[0] = 1.0;
            sup[0] = -1.0;
            sub[n - 1] = -1.0;
            diag[n - 1] = 1.0;
        }
        SplineBoundary::Clamped { left, right } => {
            diag[0] = 2.0 * h[0];
            sup[0] = h[0];
            rhs[0] = 6.0 * ((y[1] - y[0]) / h[0] - left);
            sub[n - 1] = h[n - 2];
            diag[n - 1] = 2.0 * h[n - 2];
            rhs[n - 1] = 6.0 * (right - (y[n - 1] - y[n - 2]) / h[n - 2]);
        }
        // Handled above.
        SplineBoundary::Cubic => unreachable!(),
    }
    thomas_solve(&sub, &diag, &sup, &rhs)
}

/// Thomas algorithm for a tridiagonal system. The spline systems are
/// diagonally dominant for strictly increasing knots, so no pivoting.
fn thomas_solve(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> Vec<f64> {
    let n = diag.len();
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];
    c_prime[0] = sup[0] / diag[0];
    d_prime[0] = rhs[0] / diag[0];
    for i in 1..n {
        let denom = diag[i] - sub[i] * c_prime[i - 1];
        c_prime[i] = sup[i] / denom;
        d_prime[i] = (rhs[i] - sub[i] * d_prime[i - 1]) / denom;
    }
    let mut s = vec![0.0; n];
    s[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        s[i] = d_prime[i] - c_prime[i] * s[i + 1];
    }
    s
}
