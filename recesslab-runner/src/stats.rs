//! Two-sample mean-difference testing, from first principles.
//!
//! Implements:
//! - Lanczos approximation for ln(Gamma)
//! - Regularized incomplete beta function (Lentz continued fraction)
//! - Student's t-distribution CDF
//! - Two-sided two-independent-sample test of equal means, in both the
//!   Welch (unequal variances) and Student (pooled variance) flavors
//!
//! Everything here is deterministic: identical samples produce bit-for-bit
//! identical results.

use serde::{Deserialize, Serialize};

// ─── Math primitives ─────────────────────────────────────────────────

/// Lanczos approximation for ln(Gamma(x)), g=7, n=9.
fn ln_gamma(x: f64) -> f64 {
    #[allow(clippy::excessive_precision)]
    const LANCZOS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];
    const G: f64 = 7.0;

    if x < 0.5 {
        // Reflection: Gamma(x) * Gamma(1-x) = pi / sin(pi*x)
        let sin_term = (std::f64::consts::PI * x).sin();
        if sin_term.abs() < 1e-300 {
            return f64::INFINITY;
        }
        return std::f64::consts::PI.ln() - sin_term.abs().ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut series = LANCZOS[0];
    for (i, &c) in LANCZOS.iter().enumerate().skip(1) {
        series += c / (x + i as f64);
    }
    let t = x + G + 0.5;

    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + series.ln()
}

/// Regularized incomplete beta function I_x(a, b), continued fraction via
/// the modified Lentz algorithm.
fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if !(0.0..=1.0).contains(&x) {
        return f64::NAN;
    }
    if x == 0.0 {
        return 0.0;
    }
    if x == 1.0 {
        return 1.0;
    }

    // Symmetry keeps the continued fraction in its fast-converging region.
    if x > (a + 1.0) / (a + b + 2.0) {
        return 1.0 - regularized_incomplete_beta(b, a, 1.0 - x);
    }

    let ln_front =
        a * x.ln() + b * (1.0 - x).ln() + ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) - a.ln();
    let front = ln_front.exp();

    const MAX_ITER: usize = 200;
    const EPS: f64 = 1e-14;
    const TINY: f64 = 1e-30;

    let clamp = |v: f64| if v.abs() < TINY { TINY } else { v };

    let mut c = 1.0_f64;
    let mut d = 1.0 / clamp(1.0 - (a + b) * x / (a + 1.0));
    let mut value = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;

        // Even coefficient d_{2m}
        let coef = m * (b - m) * x / ((a + 2.0 * m - 1.0) * (a + 2.0 * m));
        d = 1.0 / clamp(1.0 + coef * d);
        c = clamp(1.0 + coef / c);
        value *= c * d;

        // Odd coefficient d_{2m+1}
        let coef = -((a + m) * (a + b + m) * x) / ((a + 2.0 * m) * (a + 2.0 * m + 1.0));
        d = 1.0 / clamp(1.0 + coef * d);
        c = clamp(1.0 + coef / c);
        let delta = c * d;
        value *= delta;

        if (delta - 1.0).abs() < EPS {
            break;
        }
    }

    front * value
}

/// Student's t-distribution CDF: P(T <= t) with `df` degrees of freedom.
pub fn t_cdf(t: f64, df: f64) -> f64 {
    if df <= 0.0 {
        return f64::NAN;
    }
    if t == 0.0 {
        return 0.5;
    }

    let x = df / (df + t * t);
    let ib = regularized_incomplete_beta(df / 2.0, 0.5, x);

    if t > 0.0 {
        1.0 - 0.5 * ib
    } else {
        0.5 * ib
    }
}

// ─── Two-sample test ─────────────────────────────────────────────────

/// Which two-sample flavor to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    /// Unequal-variance (Welch-Satterthwaite degrees of freedom).
    Welch,
    /// Pooled-variance Student's t (df = n1 + n2 - 2).
    Student,
}

/// Result of a two-sided two-sample test of equal means.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoSampleTest {
    /// The t-statistic for mean(a) - mean(b).
    pub t_statistic: f64,
    /// Degrees of freedom (Welch-Satterthwaite or pooled).
    pub df: f64,
    /// Two-sided p-value: P(|T| >= |t|) under equal means.
    pub p_value: f64,
}

/// Two-sided two-independent-sample t-test of equal means.
///
/// Returns `None` if either sample has fewer than 2 values. The two-sided
/// p-value is invariant under swapping the samples (the t-statistic negates).
pub fn two_sample_t_test(a: &[f64], b: &[f64], kind: TestKind) -> Option<TwoSampleTest> {
    let (n1, n2) = (a.len(), b.len());
    if n1 < 2 || n2 < 2 {
        return None;
    }
    let (n1f, n2f) = (n1 as f64, n2 as f64);

    let mean1 = a.iter().sum::<f64>() / n1f;
    let mean2 = b.iter().sum::<f64>() / n2f;
    let var1 = a.iter().map(|&x| (x - mean1).powi(2)).sum::<f64>() / (n1f - 1.0);
    let var2 = b.iter().map(|&x| (x - mean2).powi(2)).sum::<f64>() / (n2f - 1.0);

    let (std_err, df) = match kind {
        TestKind::Welch => {
            let se2 = var1 / n1f + var2 / n2f;
            let df = if se2 > 0.0 {
                se2 * se2
                    / ((var1 / n1f).powi(2) / (n1f - 1.0) + (var2 / n2f).powi(2) / (n2f - 1.0))
            } else {
                n1f + n2f - 2.0
            };
            (se2.sqrt(), df)
        }
        TestKind::Student => {
            let pooled = ((n1f - 1.0) * var1 + (n2f - 1.0) * var2) / (n1f + n2f - 2.0);
            ((pooled * (1.0 / n1f + 1.0 / n2f)).sqrt(), n1f + n2f - 2.0)
        }
    };

    if std_err < 1e-15 {
        // Zero variance in both samples: the means are the data.
        return Some(if (mean1 - mean2).abs() < 1e-15 {
            TwoSampleTest { t_statistic: 0.0, df, p_value: 1.0 }
        } else {
            TwoSampleTest {
                t_statistic: (mean1 - mean2).signum() * f64::INFINITY,
                df,
                p_value: 0.0,
            }
        });
    }

    let t = (mean1 - mean2) / std_err;
    let p_value = (2.0 * (1.0 - t_cdf(t.abs(), df))).clamp(0.0, 1.0);

    Some(TwoSampleTest { t_statistic: t, df, p_value })
}
