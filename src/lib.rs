//! # Quadnum — extended-precision numeric kernels
//!
//! The toolkit-independent numeric core behind chart rendering and
//! statistics code: double-double ("quad") arithmetic, compensated running
//! summation, Euler rotation matrices, cubic-spline interpolation, and a
//! recursive radix-2 FFT. All five kernels are pure, synchronous functions
//! over caller-supplied numeric buffers — no I/O, no global mutable state,
//! and nothing blocks. Distinct data may be processed from any number of
//! threads concurrently; individual mutable objects ([`Accumulator`],
//! [`CSpline`] under reconstruction) belong to one thread at a time.
//!
//! ## Key components
//!
//! - **[`Quad`]**: a number held as an unevaluated sum of two floats, giving
//!   roughly twice the native precision. Error-free transformations
//!   (two-sum, Dekker splitting) back every operation. Check
//!   [`quad_functional`] once if you depend on the precision guarantees.
//! - **[`Accumulator`]**: running sum whose error stays bounded no matter
//!   how many values it absorbs, via non-overlapping partial sums.
//! - **[`Matrix3x3`]**: closed-form Z-X-Z Euler rotation matrix and vector
//!   transform for 3D chart projections.
//! - **[`CSpline`]**: natural/parabolic/cubic/clamped cubic splines with
//!   value, derivative, and cumulative-integral evaluation, scalar or
//!   vectorized.
//! - **[`fft`]**: recursive decimation-in-time transform with a 0.5-per-merge
//!   normalization (both directions scale by `1/n`; see the module docs
//!   before assuming textbook conventions).
//!
//! ## Quick start
//!
//! ```rust
//! use quadnum::{Accumulator, CSpline, Quad, SplineBoundary};
//!
//! // Sum a million small terms without drift.
//! let mut acc = Accumulator::new();
//! for _ in 0..1_000_000 {
//!     acc.add(0.1);
//! }
//! assert_eq!(acc.value(), 100_000.0);
//!
//! // Exact-feeling arithmetic on awkward magnitudes.
//! let x = Quad::new(1.0e16) + Quad::new(1.0);
//! assert_eq!((x - Quad::new(1.0e16)).value(), 1.0);
//!
//! // Smooth a handful of chart points.
//! let spline = CSpline::new(
//!     &[0.0, 1.0, 2.0, 3.0],
//!     &[0.0, 1.0, 0.0, 1.0],
//!     SplineBoundary::Natural,
//! )?;
//! let curve = spline.values(&[0.5, 1.5, 2.5]);
//! assert_eq!(curve.len(), 3);
//! # quadnum::NumericResult::Ok(())
//! ```
//!
//! ## Errors and edge values
//!
//! Constructors validate eagerly and return [`NumericError`]; nothing
//! partially built ever escapes. NaN and infinities inside already-valid
//! computations are data, not errors — they propagate exactly as IEEE 754
//! dictates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accumulator;
pub mod cspline;
pub mod errors;
pub mod fft;
pub mod matrix;
pub mod quad;

pub use accumulator::Accumulator;
pub use cspline::{CSpline, SplineBoundary};
pub use errors::{NumericError, NumericResult};
pub use fft::fft;
pub use matrix::Matrix3x3;
pub use quad::{quad_functional, Quad, Quad64, QuadFloat};
