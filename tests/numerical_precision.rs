//! Precision properties the kernels must deliver.
//!
//! These assertions quantify the gains over plain f64 arithmetic: quad
//! operations must beat double rounding, the accumulator must beat naive
//! summation, the spline must reproduce its knots, and the FFT must honor
//! its documented 1/n-per-direction normalization.

use assert_approx_eq::assert_approx_eq;
use num_complex::Complex64;
use quadnum::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod quad_precision {
    use super::*;

    #[test]
    fn test_init_round_trip_random() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let h: f64 = rng.gen_range(-1.0e12..1.0e12);
            assert_eq!(Quad::new(h).value(), h);
        }
    }

    #[test]
    fn test_add_at_least_double_precision() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..1000 {
            let a: f64 = rng.gen_range(-1.0e8..1.0e8);
            let b: f64 = rng.gen_range(-1.0e-8..1.0e-8);
            let s = Quad::new(a) + Quad::new(b);
            // The double sum is the quad's high word by construction; the
            // residual the double sum lost must sit in the low word.
            assert_eq!(s.value(), a + b);
            let residual = s.err();
            let recovered = (s - Quad::new(a)).value();
            assert_approx_eq!(recovered, b, b.abs() * 1.0e-25 + 1.0e-30);
            assert!(residual.abs() <= (a + b).abs() * f64::EPSILON);
        }
    }

    #[test]
    fn test_associativity_random_within_quad_tolerance() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..1000 {
            let a = Quad::<f64>::new(rng.gen_range(-1.0e10..1.0e10));
            let b = Quad::<f64>::new(rng.gen_range(-1.0e10..1.0e10));
            let c = Quad::<f64>::new(rng.gen_range(-1.0e10..1.0e10));
            let left = (a + b) + c;
            let right = a + (b + c);
            let scale = a.value().abs() + b.value().abs() + c.value().abs();
            assert!(
                (left.value() - right.value()).abs() <= scale * 1.0e-30,
                "associativity gap beyond double-double bound"
            );
        }
    }

    #[test]
    fn test_mul12_recovers_exact_products() {
        let mut rng = StdRng::seed_from_u64(19);
        for _ in 0..1000 {
            let x: f64 = rng.gen_range(-1.0e6..1.0e6);
            let y: f64 = rng.gen_range(-1.0e6..1.0e6);
            let p = Quad::<f64>::mul12(x, y);
            // hi is the rounded product; hi + lo is the exact one, so lo is
            // bounded by half an ulp of hi.
            assert_eq!(p.value(), x * y);
            assert!(p.err().abs() <= (x * y).abs() * f64::EPSILON);
        }
    }
}

mod accumulator_precision {
    use super::*;

    /// Naive left-to-right f64 summation, the baseline to beat.
    fn naive_sum(values: &[f64]) -> f64 {
        values.iter().sum()
    }

    /// Reference sum in quad precision.
    fn quad_sum(values: &[f64]) -> f64 {
        let mut total = Quad::<f64>::zero();
        for &v in values {
            total = total + Quad::new(v);
        }
        total.value()
    }

    #[test]
    fn test_error_shrinks_versus_naive() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut naive_worse = 0;
        for _ in 0..50 {
            // Ill-conditioned stream: large and tiny magnitudes mixed.
            let values: Vec<f64> = (0..10_000)
                .map(|i| {
                    if i % 3 == 0 {
                        rng.gen_range(-1.0e12..1.0e12)
                    } else {
                        rng.gen_range(-1.0e-6..1.0e-6)
                    }
                })
                .collect();

            let mut acc = Accumulator::new();
            for &v in &values {
                acc.add(v);
            }
            let reference = quad_sum(&values);
            let acc_err = (acc.value() - reference).abs();
            let naive_err = (naive_sum(&values) - reference).abs();
            if acc_err < naive_err {
                naive_worse += 1;
            }
            // Allow a few ulps of slack at these magnitudes for the final
            // collapse rounding; anything beyond that is a real regression.
            assert!(
                acc_err <= naive_err + 0.05,
                "accumulator must never be meaningfully worse"
            );
        }
        assert!(
            naive_worse > 25,
            "accumulator should strictly beat naive summation on most streams"
        );
    }

    #[test]
    fn test_many_small_additions_exact() {
        let mut acc = Accumulator::new();
        let n = 100_000;
        for _ in 0..n {
            acc.add(1.0e-10);
        }
        assert_approx_eq!(acc.value(), 1.0e-5, 1.0e-18);
    }

    #[test]
    fn test_quad_and_plain_paths_agree() {
        let mut rng = StdRng::seed_from_u64(29);
        let mut plain = Accumulator::new();
        let mut quad = Accumulator::new();
        for _ in 0..1000 {
            let v: f64 = rng.gen_range(-1.0..1.0);
            plain.add(v);
            quad.add_quad(Quad::new(v));
        }
        assert_eq!(plain.value().to_bits(), quad.value().to_bits());
    }
}

mod matrix_precision {
    use super::*;

    #[test]
    fn test_orthonormality_random_angles() {
        let mut rng = StdRng::seed_from_u64(31);
        for _ in 0..500 {
            let m = Matrix3x3::from_euler(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            );
            // M · Mᵗ = I: rows are orthonormal.
            let rows = [
                [m.a11, m.a12, m.a13],
                [m.a21, m.a22, m.a23],
                [m.a31, m.a32, m.a33],
            ];
            for i in 0..3 {
                for j in 0..3 {
                    let dot: f64 = (0..3).map(|k| rows[i][k] * rows[j][k]).sum();
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert_approx_eq!(dot, expected, 1.0e-12);
                }
            }
            assert_approx_eq!(m.determinant(), 1.0, 1.0e-12);
        }
    }
}

mod spline_precision {
    use super::*;

    #[test]
    fn test_natural_spline_reproduces_knots() {
        let s = CSpline::new(
            &[0.0, 1.0, 2.0, 3.0],
            &[0.0, 1.0, 0.0, 1.0],
            SplineBoundary::Natural,
        )
        .unwrap();
        assert_eq!(s.value_at(0.0), 0.0);
        assert_eq!(s.value_at(1.0), 1.0);
        assert_eq!(s.value_at(2.0), 0.0);
        assert_approx_eq!(s.value_at(3.0), 1.0, 1.0e-12);
    }

    #[test]
    fn test_derivative_first_order_accuracy() {
        let x: Vec<f64> = (0..10).map(|i| i as f64 * 0.5).collect();
        let y: Vec<f64> = x.iter().map(|&t| (t * 1.3).sin()).collect();
        let s = CSpline::new(&x, &y, SplineBoundary::Cubic).unwrap();
        let mut rng = StdRng::seed_from_u64(37);
        for _ in 0..100 {
            let t = rng.gen_range(0.1..4.4);
            let eps = 1.0e-7;
            let fd = (s.value_at(t + eps) - s.value_at(t - eps)) / (2.0 * eps);
            assert_approx_eq!(s.deriv_at(t), fd, 1.0e-4);
        }
    }

    #[test]
    fn test_integral_consistent_with_derivative() {
        // d/dt integral_at(t) == value_at(t), checked by finite differences.
        let x = vec![0.0, 0.7, 1.9, 3.0, 4.2];
        let y = vec![1.0, -0.5, 2.0, 0.3, 1.1];
        let s = CSpline::new(&x, &y, SplineBoundary::Natural).unwrap();
        for &t in &[0.3, 1.0, 2.5, 4.0] {
            let eps = 1.0e-6;
            let fd = (s.integral_at(t + eps) - s.integral_at(t - eps)) / (2.0 * eps);
            assert_approx_eq!(fd, s.value_at(t), 1.0e-6);
        }
    }
}

mod fft_precision {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_round_trip_scale_is_one_over_n() {
        let mut rng = StdRng::seed_from_u64(41);
        for &n in &[1usize, 2, 4, 8, 32, 256] {
            let x: Vec<Complex64> = (0..n)
                .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
                .collect();
            let back = fft(&fft(&x, n, 1, false).unwrap(), n, 1, true).unwrap();
            for (orig, rt) in x.iter().zip(&back) {
                let scaled = *orig / n as f64;
                assert_approx_eq!(rt.re, scaled.re, 1.0e-12);
                assert_approx_eq!(rt.im, scaled.im, 1.0e-12);
            }
        }
    }

    #[test]
    fn test_matches_direct_dft() {
        let n = 16;
        let mut rng = StdRng::seed_from_u64(43);
        let x: Vec<Complex64> = (0..n)
            .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();
        let out = fft(&x, n, 1, false).unwrap();
        for k in 0..n {
            // Direct DFT with the crate's 1/n scale.
            let mut direct = Complex64::new(0.0, 0.0);
            for (j, &xj) in x.iter().enumerate() {
                let angle = -2.0 * PI * (k * j) as f64 / n as f64;
                direct += xj * Complex64::from_polar(1.0, angle);
            }
            direct /= n as f64;
            assert_approx_eq!(out[k].re, direct.re, 1.0e-12);
            assert_approx_eq!(out[k].im, direct.im, 1.0e-12);
        }
    }
}
