//! 3x3 rotation matrices from Euler angles.
//!
//! Closed-form construction of the Z-X-Z Euler rotation matrix used by 3D
//! chart projections, plus the matching vector transform. Pure value type:
//! nine coefficients, no hidden state, no error paths. Angles are taken as
//! given — they are not wrapped or normalized, which is the caller's
//! business.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 3x3 rotation matrix with row-major coefficients `a11..a33`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Matrix3x3 {
    /// Row 1, column 1
    pub a11: f64,
    /// Row 1, column 2
    pub a12: f64,
    /// Row 1, column 3
    pub a13: f64,
    /// Row 2, column 1
    pub a21: f64,
    /// Row 2, column 2
    pub a22: f64,
    /// Row 2, column 3
    pub a23: f64,
    /// Row 3, column 1
    pub a31: f64,
    /// Row 3, column 2
    pub a32: f64,
    /// Row 3, column 3
    pub a33: f64,
}

impl Matrix3x3 {
    /// The identity matrix.
    pub fn identity() -> Self {
        Matrix3x3 {
            a11: 1.0,
            a12: 0.0,
            a13: 0.0,
            a21: 0.0,
            a22: 1.0,
            a23: 0.0,
            a31: 0.0,
            a32: 0.0,
            a33: 1.0,
        }
    }

    /// Builds the rotation matrix for Euler angles `psi`, `theta`, `phi`
    /// (radians, Z-X-Z convention).
    ///
    /// ```rust
    /// use quadnum::Matrix3x3;
    ///
    /// let m = Matrix3x3::from_euler(0.0, 0.0, 0.0);
    /// assert_eq!(m, Matrix3x3::identity());
    /// ```
    pub fn from_euler(psi: f64, theta: f64, phi: f64) -> Self {
        let (sp, cp) = psi.sin_cos();
        let (st, ct) = theta.sin_cos();
        let (sf, cf) = phi.sin_cos();
        Matrix3x3 {
            a11: cf * cp - sf * sp * ct,
            a12: -cp * sf - sp * cf * ct,
            a13: st * sp,
            a21: sp * cf + cp * sf * ct,
            a22: cf * cp * ct - sf * sp,
            a23: -st * cp,
            a31: st * sf,
            a32: st * cf,
            a33: ct,
        }
    }

    /// Applies the matrix to a point: each row dotted with `(x0, y0, z0)`.
    pub fn transform(&self, x0: f64, y0: f64, z0: f64) -> (f64, f64, f64) {
        (
            self.a11 * x0 + self.a12 * y0 + self.a13 * z0,
            self.a21 * x0 + self.a22 * y0 + self.a23 * z0,
            self.a31 * x0 + self.a32 * y0 + self.a33 * z0,
        )
    }

    /// Determinant of the matrix. Rotation matrices built by
    /// [`from_euler`](Self::from_euler) have determinant 1 up to rounding.
    pub fn determinant(&self) -> f64 {
        self.a11 * (self.a22 * self.a33 - self.a23 * self.a32)
            - self.a12 * (self.a21 * self.a33 - self.a23 * self.a31)
            + self.a13 * (self.a21 * self.a32 - self.a22 * self.a31)
    }
}

impl Default for Matrix3x3 {
    fn default() -> Self {
        Self::identity()
    }
}
