//! Compensated running summation with length-independent error.
//!
//! [`Accumulator`] folds a stream of `f64` values (or pre-formed
//! [`Quad`] values) into a set of non-overlapping partial sums, the scheme
//! popularized by Shewchuk's adaptive-precision arithmetic. Every addition is
//! an error-free transformation, so the collapsed total is exact to within a
//! single final rounding no matter how long the stream is — unlike naive
//! sequential addition, whose error grows with the number of terms.
//!
//! The result for a given sequence of additions is bit-reproducible across
//! platforms with IEEE 754 doubles. A single instance is not safe for
//! concurrent mutation; confine it to one thread or synchronize externally.

use crate::quad::Quad;

/// A running total maintained as non-overlapping partial sums.
///
/// ```rust
/// use quadnum::Accumulator;
///
/// let mut acc = Accumulator::new();
/// for _ in 0..10 {
///     acc.add(0.1);
/// }
/// // Naive summation gives 0.9999999999999999.
/// assert_eq!(acc.value(), 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    partials: Vec<f64>,
}

impl Accumulator {
    /// Creates an empty accumulator with value 0.
    pub fn new() -> Self {
        Accumulator {
            partials: Vec::new(),
        }
    }

    /// Resets the running total to 0, keeping the allocation.
    pub fn clear(&mut self) {
        self.partials.clear();
    }

    /// Folds one value into the running total.
    ///
    /// Each existing partial is combined with the addend by two-sum; nonzero
    /// low parts are kept, so the partials stay non-overlapping and the sum
    /// they represent is exact. NaN and infinities are not trapped: a
    /// non-finite addend collapses the state into the single total that
    /// plain IEEE addition would have produced, and propagates from there.
    pub fn add(&mut self, value: f64) {
        let poisoned = self.partials.last().is_some_and(|p| !p.is_finite());
        if !value.is_finite() || poisoned {
            let total = self.partials.drain(..).sum::<f64>() + value;
            self.partials.push(total);
            return;
        }

        let mut x = value;
        let mut kept = 0;
        for j in 0..self.partials.len() {
            let mut y = self.partials[j];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                self.partials[kept] = lo;
                kept += 1;
            }
            x = hi;
        }
        self.partials.truncate(kept);
        self.partials.push(x);
    }

    /// Folds a pre-formed double-double value into the running total.
    ///
    /// Both words enter the partials, so no precision is lost at the seam
    /// between quad arithmetic and the accumulator.
    pub fn add_quad(&mut self, value: Quad<f64>) {
        self.add(value.value());
        self.add(value.err());
    }

    /// Collapses the partials to a single double.
    ///
    /// The partials are kept ordered by increasing magnitude, with any
    /// non-finite total stored alone; summing from the largest down while
    /// carrying a compensation term yields the correctly rounded result in
    /// all but borderline tie cases. An accumulator with no additions
    /// returns 0.
    pub fn value(&self) -> f64 {
        let mut iter = self.partials.iter().rev();
        let mut hi = match iter.next() {
            Some(&p) => p,
            None => return 0.0,
        };
        let mut lo = 0.0;
        for &y in iter {
            let s = hi + y;
            lo += y - (s - hi);
            hi = s;
        }
        hi + lo
    }

    /// Number of internal partial sums currently held.
    ///
    /// Exposed for diagnostics; stays small (bounded by the exponent range)
    /// regardless of how many values have been added.
    pub fn partial_count(&self) -> usize {
        self.partials.len()
    }
}
