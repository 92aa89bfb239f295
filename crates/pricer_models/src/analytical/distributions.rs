//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//!
//! All functions are generic over `T: Float` and total over finite inputs.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// sqrt(2 * pi), as used by Hart's continued-fraction tail.
const SQRT_2PI: f64 = 2.506_628_274_631;

/// Boundary between the rational and continued-fraction branches (10/√2).
const RATIONAL_LIMIT: f64 = 7.071_067_811_865_47;

/// Beyond this |x| the tail underflows double precision.
const SATURATION_LIMIT: f64 = 37.0;

/// Hart (1968) numerator coefficients, highest degree first.
const HART_NUM: [f64; 7] = [
    3.526_249_659_989_11e-2,
    0.700_383_064_443_688,
    6.373_962_203_531_65,
    33.912_866_078_383,
    112.079_291_497_871,
    221.213_596_169_931,
    220.206_867_912_376,
];

/// Hart (1968) denominator coefficients, highest degree first.
const HART_DEN: [f64; 8] = [
    8.838_834_764_831_84e-2,
    1.755_667_163_182_64,
    16.064_177_579_207,
    86.780_732_202_946_1,
    296.564_248_779_674,
    637.333_633_378_831,
    793.826_512_519_948,
    440.413_735_824_752,
];

#[inline]
fn horner<T: Float>(coefficients: &[f64], x: T) -> T {
    coefficients
        .iter()
        .fold(T::zero(), |acc, &c| acc * x + T::from(c).unwrap())
}

/// Lower tail Φ(-a) for a >= 0.
#[inline]
fn lower_tail<T: Float>(a: T) -> T {
    if a > T::from(SATURATION_LIMIT).unwrap() {
        return T::zero();
    }

    let half = T::from(0.5).unwrap();
    let e = (-half * a * a).exp();

    if a < T::from(RATIONAL_LIMIT).unwrap() {
        e * horner(&HART_NUM, a) / horner(&HART_DEN, a)
    } else {
        let mut b = a + T::from(0.65).unwrap();
        for k in [4.0, 3.0, 2.0, 1.0] {
            b = a + T::from(k).unwrap() / b;
        }
        e / b / T::from(SQRT_2PI).unwrap()
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1).
///
/// # Algorithm
/// Hart's double-precision approximation: a rational function of |x| times
/// exp(-x²/2) for |x| < 7.071, a continued fraction in the far tail, and
/// saturation to 0 or 1 beyond |x| = 37. The lower tail is computed
/// directly and the upper tail as its complement, so Φ(x) + Φ(-x) = 1.
///
/// # Arguments
/// * `x` - Input value
///
/// # Returns
/// The probability P(X <= x) for standard normal X, in range [0, 1].
///
/// # Accuracy
/// Absolute error below 1e-14 for |x| <= 10 in `f64`.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert_eq!(norm_cdf(0.0_f64), 0.5);
/// assert!((norm_cdf(1.96_f64) - 0.9750021048517795).abs() < 1e-12);
/// assert_eq!(norm_cdf(-40.0_f64), 0.0);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let tail = lower_tail(x.abs());
    if x > T::zero() {
        T::one() - tail
    } else {
        tail
    }
}

/// Standard normal probability density function.
///
/// Computes the density φ(x) = (1 / sqrt(2π)) * exp(-x² / 2).
///
/// # Arguments
/// * `x` - Input value
///
/// # Returns
/// The density value φ(x), always non-negative.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// let pdf_0 = norm_pdf(0.0_f64);
/// // φ(0) = 1 / sqrt(2π) ≈ 0.3989
/// assert!((pdf_0 - 0.3989422804).abs() < 1e-7);
///
/// let pdf_1 = norm_pdf(1.0_f64);
/// // φ(1) = exp(-0.5) / sqrt(2π) ≈ 0.2420
/// assert!((pdf_1 - 0.2419707245).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();

    frac_1_sqrt_2pi * (-half * x * x).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // norm_cdf tests
    // ==========================================================

    #[test]
    fn test_norm_cdf_at_zero() {
        assert_eq!(norm_cdf(0.0_f64), 0.5);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        let test_values = [-9.0, -7.5, -3.0, -2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0, 3.0, 7.5, 9.0];
        for x in test_values {
            let cdf_pos = norm_cdf(x);
            let cdf_neg = norm_cdf(-x);
            assert_relative_eq!(cdf_pos + cdf_neg, 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(1.0_f64), 0.8413447460685429, epsilon = 1e-12);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.15865525393145707, epsilon = 1e-12);
        assert_relative_eq!(norm_cdf(2.0_f64), 0.9772498680518208, epsilon = 1e-12);
        assert_relative_eq!(norm_cdf(-2.0_f64), 0.022750131948179195, epsilon = 1e-12);
        assert_relative_eq!(norm_cdf(3.0_f64), 0.9986501019683699, epsilon = 1e-12);
        assert_relative_eq!(norm_cdf(0.35_f64), 0.6368306511756191, epsilon = 1e-12);
    }

    #[test]
    fn test_norm_cdf_far_tail_branch() {
        // |x| > 7.071 uses the continued fraction
        assert_relative_eq!(norm_cdf(-8.0_f64), 6.220960574271785e-16, max_relative = 1e-6);
        assert_relative_eq!(norm_cdf(-10.0_f64), 7.619853024160527e-24, max_relative = 1e-6);
    }

    #[test]
    fn test_norm_cdf_continuous_at_branch_boundary() {
        let below = norm_cdf(-(RATIONAL_LIMIT - 1e-9));
        let above = norm_cdf(-(RATIONAL_LIMIT + 1e-9));
        assert_relative_eq!(below, above, max_relative = 1e-6);
    }

    #[test]
    fn test_norm_cdf_saturates() {
        assert_eq!(norm_cdf(-38.0_f64), 0.0);
        assert_eq!(norm_cdf(38.0_f64), 1.0);
        assert_eq!(norm_cdf(f64::NEG_INFINITY), 0.0);
        assert_eq!(norm_cdf(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_norm_cdf_monotonic() {
        let values: Vec<f64> = (-50..=50).map(|i| i as f64 * 0.1).collect();
        for i in 0..values.len() - 1 {
            let cdf_a = norm_cdf(values[i]);
            let cdf_b = norm_cdf(values[i + 1]);
            assert!(cdf_b > cdf_a, "CDF not monotonic at x = {}", values[i]);
        }
    }

    #[test]
    fn test_norm_cdf_bounds() {
        let test_values: Vec<f64> = (-100..=100).map(|i| i as f64 * 0.1).collect();
        for x in test_values {
            let result = norm_cdf(x);
            assert!(result >= 0.0, "CDF < 0 at x = {}", x);
            assert!(result <= 1.0, "CDF > 1 at x = {}", x);
        }
    }

    #[test]
    fn test_norm_cdf_f32_compatibility() {
        let result = norm_cdf(1.0_f32);
        assert!((result - 0.841_344_7).abs() < 1e-5);
    }

    // ==========================================================
    // norm_pdf tests
    // ==========================================================

    #[test]
    fn test_norm_pdf_at_zero() {
        let result = norm_pdf(0.0_f64);
        assert_relative_eq!(result, FRAC_1_SQRT_2PI, epsilon = 1e-15);
    }

    #[test]
    fn test_norm_pdf_symmetry() {
        for x in [0.5, 1.0, 1.5, 2.0, 2.5, 3.0] {
            assert_eq!(norm_pdf(x), norm_pdf(-x));
        }
    }

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(1.0_f64), 0.24197072451914337, epsilon = 1e-14);
        assert_relative_eq!(norm_pdf(2.0_f64), 0.05399096651318806, epsilon = 1e-14);
        assert_relative_eq!(norm_pdf(3.0_f64), 0.004431848411938008, epsilon = 1e-14);
    }

    #[test]
    fn test_norm_pdf_maximum_at_zero() {
        let pdf_0 = norm_pdf(0.0_f64);
        for x in [-0.1, 0.1, -1.0, 1.0, -2.0, 2.0] {
            assert!(pdf_0 > norm_pdf(x), "PDF(0) not greater than PDF({})", x);
        }
    }

    #[test]
    fn test_norm_pdf_approaches_zero() {
        assert!(norm_pdf(5.0_f64) < 1e-5);
        assert!(norm_pdf(8.0_f64) < 1e-12);
    }

    // ==========================================================
    // Property-based tests
    // ==========================================================

    #[test]
    fn test_cdf_pdf_relationship() {
        // Central difference of the CDF recovers the density
        let h = 1e-5;
        for x in [-6.0, -2.0, -1.0, 0.0, 1.0, 2.0, 6.0] {
            let numerical_derivative = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(numerical_derivative, norm_pdf(x), epsilon = 1e-8);
        }
    }
}
