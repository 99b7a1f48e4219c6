//! Double-double ("quad") extended-precision arithmetic.
//!
//! A [`Quad`] represents a real number as an unevaluated sum `hi + lo` of two
//! native floats with `|lo|` at most half an ulp of `hi`, giving roughly twice
//! the mantissa precision of the underlying format. Every operation uses
//! error-free transformations (two-sum, Veltkamp/Dekker splitting) to capture
//! rounding error into the low word rather than discarding it.
//!
//! The arithmetic is generic over [`QuadFloat`], with `f64` as the standard
//! instantiation; `f32` mirrors every operation for callers working in the
//! narrower format. Whether the error-free transformations actually hold on
//! the running floating unit can be probed at runtime with
//! [`Quad::functional`] (see [`quad_functional`] for the cached `f64` form) —
//! contracted FMA or x87 double rounding both break the required invariants.
//!
//! # Quick start
//!
//! ```rust
//! use quadnum::Quad;
//!
//! let a = Quad::new(1.0e16);
//! let b = Quad::new(1.0);
//! // 1e16 + 1 - 1e16 is 0.0 in plain f64 arithmetic; Quad keeps the 1.
//! let r = a + b - a;
//! assert_eq!(r.value(), 1.0);
//! ```

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::sync::LazyLock;

use num_traits::Float;

use crate::errors::{NumericError, NumericResult};

/// Floating-point formats usable as the base of [`Quad`] arithmetic.
///
/// Supplies the Veltkamp split constant `2^ceil(p/2) + 1` for a `p`-bit
/// mantissa, which [`Quad::mul12`] uses to split a float into two exact
/// halves. Implemented for `f64` (the standard variant) and `f32` (the
/// mirrored narrow variant).
pub trait QuadFloat: Float {
    /// Veltkamp split constant for this format.
    const SPLIT: Self;
}

impl QuadFloat for f64 {
    // 2^27 + 1 for the 53-bit mantissa
    const SPLIT: f64 = 134_217_729.0;
}

impl QuadFloat for f32 {
    // 2^12 + 1 for the 24-bit mantissa
    const SPLIT: f32 = 4_097.0;
}

/// A double-double extended-precision scalar.
///
/// Value type: `Copy`, immutable, with results returned rather than written
/// through out-parameters, so expressions like `x = x + y` are trivially
/// safe where the equivalent C API had to support output aliasing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad<T: QuadFloat> {
    hi: T,
    lo: T,
}

/// `Quad` over `f64`, the standard instantiation.
pub type Quad64 = Quad<f64>;

impl<T: QuadFloat> Quad<T> {
    /// Creates a quad holding exactly `h` (low word zero).
    #[inline]
    pub fn new(h: T) -> Self {
        Quad {
            hi: h,
            lo: T::zero(),
        }
    }

    /// The zero quad.
    #[inline]
    pub fn zero() -> Self {
        Self::new(T::zero())
    }

    /// Projects back to the native format.
    ///
    /// The representation keeps `hi` renormalized as the correctly rounded
    /// sum of both words, so this is simply the high word.
    #[inline]
    pub fn value(self) -> T {
        self.hi
    }

    /// The low (correction) word.
    #[inline]
    pub fn err(self) -> T {
        self.lo
    }

    /// Renormalizes a high/low pair so that `hi` absorbs as much of the sum
    /// as the format allows and `lo` holds the residual.
    #[inline]
    fn renorm(hi: T, lo: T) -> Self {
        let s = hi + lo;
        Quad {
            hi: s,
            lo: hi - s + lo,
        }
    }

    /// Splits `x` into two halves whose product terms are exact.
    #[inline]
    fn split(x: T) -> (T, T) {
        let t = T::SPLIT * x;
        let hi = t - (t - x);
        (hi, x - hi)
    }

    /// Error-free product of two native floats.
    ///
    /// Returns the exact value of `x * y` as a quad: the high word is the
    /// rounded product and the low word the exact rounding residual,
    /// obtained by Dekker's algorithm via Veltkamp splitting.
    pub fn mul12(x: T, y: T) -> Self {
        let p = x * y;
        let (x1, x2) = Self::split(x);
        let (y1, y2) = Self::split(y);
        let e = ((x1 * y1 - p) + x1 * y2 + x2 * y1) + x2 * y2;
        Quad { hi: p, lo: e }
    }

    /// Square root, computed as a native approximation refined with one
    /// Newton step in double-double arithmetic.
    ///
    /// Zero maps to exact zero; negative inputs yield a NaN quad, matching
    /// IEEE propagation rather than trapping.
    pub fn sqrt(self) -> Self {
        if self.hi > T::zero() {
            let half = T::from(0.5).unwrap();
            let r = self.hi.sqrt();
            let u = Self::mul12(r, r);
            let rl = (self.hi - u.hi - u.lo + self.lo) * half / r;
            Self::renorm(r, rl)
        } else if self.hi == T::zero() {
            Self::zero()
        } else {
            Self::new(T::nan())
        }
    }

    /// Absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        if self.hi < T::zero() {
            -self
        } else {
            self
        }
    }

    /// Dot product of two quad slices with pairwise compensated summation.
    ///
    /// Each elementwise product is formed in full double-double precision and
    /// the products are combined by pairwise splitting, so the error bound
    /// grows with `log n` rather than `n`. Returns an error if the slices
    /// differ in length; empty slices yield zero.
    pub fn dot(a: &[Quad<T>], b: &[Quad<T>]) -> NumericResult<Quad<T>> {
        if a.len() != b.len() {
            return Err(NumericError::MismatchedLengths {
                left: a.len(),
                right: b.len(),
            });
        }
        Ok(Self::dot_pairwise(a, b))
    }

    fn dot_pairwise(a: &[Quad<T>], b: &[Quad<T>]) -> Quad<T> {
        // Small blocks accumulate sequentially; larger ones split in half.
        if a.len() <= 8 {
            let mut sum = Self::zero();
            for (&x, &y) in a.iter().zip(b) {
                sum = sum + x * y;
            }
            sum
        } else {
            let mid = a.len() / 2;
            Self::dot_pairwise(&a[..mid], &b[..mid])
                + Self::dot_pairwise(&a[mid..], &b[mid..])
        }
    }

    /// Probes whether the error-free transformations hold at runtime.
    ///
    /// Verifies that two-sum captures a sub-ulp addend exactly and that
    /// [`Quad::mul12`] recovers the exact product residual. Both fail when
    /// intermediate results carry excess precision (x87 double rounding) or
    /// when the compiler contracts the split arithmetic into FMAs, in which
    /// case none of the precision guarantees of this module apply.
    pub fn functional() -> bool {
        let one = T::one();
        let eps = T::epsilon();
        let tiny = eps * eps;

        // 1 + eps^2 rounds to 1; the low word must hold eps^2 exactly.
        let s = Quad::new(one) + Quad::new(tiny);
        if s.value() != one || s.err() != tiny {
            return false;
        }

        // (1 + eps)^2 = 1 + 2 eps + eps^2; the residual is exactly eps^2.
        let x = one + eps;
        let p = Self::mul12(x, x);
        p.value() == x * x && p.err() == tiny
    }
}

impl<T: QuadFloat> From<T> for Quad<T> {
    fn from(h: T) -> Self {
        Quad::new(h)
    }
}

impl<T: QuadFloat> Default for Quad<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: QuadFloat> Neg for Quad<T> {
    type Output = Quad<T>;

    #[inline]
    fn neg(self) -> Quad<T> {
        Quad {
            hi: -self.hi,
            lo: -self.lo,
        }
    }
}

impl<T: QuadFloat> Add for Quad<T> {
    type Output = Quad<T>;

    /// Double-double addition via the two-sum error-free transformation.
    fn add(self, other: Quad<T>) -> Quad<T> {
        let r = self.hi + other.hi;
        let s = if self.hi.abs() > other.hi.abs() {
            self.hi - r + other.hi + other.lo + self.lo
        } else {
            other.hi - r + self.hi + self.lo + other.lo
        };
        Self::renorm(r, s)
    }
}

impl<T: QuadFloat> Sub for Quad<T> {
    type Output = Quad<T>;

    #[inline]
    fn sub(self, other: Quad<T>) -> Quad<T> {
        self + (-other)
    }
}

impl<T: QuadFloat> Mul for Quad<T> {
    type Output = Quad<T>;

    /// Double-double multiplication: exact high product via [`Quad::mul12`]
    /// plus the cross terms folded into the low word.
    fn mul(self, other: Quad<T>) -> Quad<T> {
        let c = Self::mul12(self.hi, other.hi);
        let lo = self.hi * other.lo + self.lo * other.hi + c.lo;
        Self::renorm(c.hi, lo)
    }
}

impl<T: QuadFloat> Div for Quad<T> {
    type Output = Quad<T>;

    /// Double-double division: native quotient approximation plus one
    /// Newton-style correction against the exact product.
    fn div(self, other: Quad<T>) -> Quad<T> {
        let q = self.hi / other.hi;
        let u = Self::mul12(q, other.hi);
        let ql = (self.hi - u.hi - u.lo + self.lo - q * other.lo) / other.hi;
        Self::renorm(q, ql)
    }
}

impl<T: QuadFloat> AddAssign for Quad<T> {
    fn add_assign(&mut self, other: Quad<T>) {
        *self = *self + other;
    }
}

impl<T: QuadFloat> SubAssign for Quad<T> {
    fn sub_assign(&mut self, other: Quad<T>) {
        *self = *self - other;
    }
}

impl<T: QuadFloat> MulAssign for Quad<T> {
    fn mul_assign(&mut self, other: Quad<T>) {
        *self = *self * other;
    }
}

impl<T: QuadFloat> DivAssign for Quad<T> {
    fn div_assign(&mut self, other: Quad<T>) {
        *self = *self / other;
    }
}

static QUAD_FUNCTIONAL: LazyLock<bool> = LazyLock::new(Quad::<f64>::functional);

/// Cached capability probe for the standard `f64` instantiation.
///
/// Callers relying on double-double precision guarantees (rather than merely
/// plain-double results) should check this once before depending on them.
pub fn quad_functional() -> bool {
    *QUAD_FUNCTIONAL
}
