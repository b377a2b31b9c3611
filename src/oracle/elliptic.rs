//! Complete elliptic integrals used by the cylinder field.

use crate::constant::{CEL_ERRTOL, PI};
use crate::error::{GoldenError, Result};

/// Relative error requested from the arithmetic-geometric mean iteration.
const AGM_EPSREL: f64 = 1e-24;

/// Computes the complete elliptic integrals of first and second kind.
///
/// Conventions for the argument are the same as in
/// Carlson, B. C. (1995). "Numerical Computation of Real or Complex Elliptic Integrals". Numerical Algorithms. 10 (1): 13–26.
///
/// The arithmetic-geometric mean starts from `a = 1`, `g = sqrt(1 - m)` and
/// `c^2 = m`, so a negative parameter needs no transformation and stays
/// finite however large it gets.
///
/// # Arguments
///
/// `m`: parameter of the elliptic integrals (the squared modulus), must be m < 1.
///
/// `epsrel`: relative tolerable error for the function evaluation
pub fn ellip_ke(m: f64, epsrel: f64) -> (f64, f64) {
    let mut a = 1.;
    let mut g = (1. - m).sqrt();
    let mut c_squared = m;
    let mut power2_acc = 0.5;
    let mut c_acc = power2_acc * c_squared;
    loop {
        let a_new = (a + g) / 2.;
        let g_new = (a * g).sqrt();
        let c_new = c_squared / 4. / a_new;
        power2_acc *= 2.;
        c_acc += power2_acc * c_new.powi(2);
        let agm_converged = (a_new - a).abs() <= epsrel.sqrt() * a_new;

        a = a_new;
        g = g_new;
        c_squared = c_new.powi(2);
        if agm_converged {
            break;
        }
    }
    let ellip_k = PI / 2. / a;
    let ellip_e = ellip_k * (1. - c_acc);
    (ellip_k, ellip_e)
}

/// Complete elliptic integrals K(m) and E(m) for a parameter `m < 1`.
pub fn ellipke_parameter(m: f64) -> Result<(f64, f64)> {
    if !(m.is_finite() && m < 1.0) {
        return Err(GoldenError::Oracle(format!(
            "elliptic parameter must be finite and below 1, got {}",
            m
        )));
    }
    let (k, e) = ellip_ke(m, AGM_EPSREL);
    if !(k.is_finite() && e.is_finite()) {
        return Err(GoldenError::Oracle(format!(
            "elliptic integrals are not finite for parameter {}",
            m
        )));
    }
    Ok((k, e))
}

/// Bulirsch's generalized complete elliptic integral `cel(kc, p, c, s)`.
///
/// Uses the reduced-operation iteration of Derby & Olbert (2010).
pub fn cel(kc: f64, p: f64, c: f64, s: f64) -> Result<f64> {
    if kc == 0.0 {
        return Err(GoldenError::Oracle(
            "cel: complementary modulus cannot be zero".to_string(),
        ));
    }

    let mut k = kc.abs();
    let (mut pp, mut cc, mut ss) = if p > 0.0 {
        let pp = p.sqrt();
        (pp, c, s / pp)
    } else {
        let f = kc * kc;
        let q = (1.0 - f) * (s - c * p);
        let g = 1.0 - p;
        let h = f - p;
        let pp = (h / g).sqrt();
        let cc = (c - s) / g;
        (pp, cc, -q / (g * g * pp) + cc * pp)
    };

    let mut em = 1.0;
    let mut f = cc;
    cc += ss / pp;
    let mut g = k / pp;
    ss = 2.0 * (ss + f * g);
    pp += g;
    g = em;
    em += k;
    let mut kk = k;

    while (g - k).abs() > g * CEL_ERRTOL {
        k = 2.0 * kk.sqrt();
        kk = k * em;
        f = cc;
        cc += ss / pp;
        g = kk / pp;
        ss = 2.0 * (ss + f * g);
        pp += g;
        g = em;
        em += k;
    }

    Ok((PI / 2.0) * (ss + cc * em) / (em * (em + pp)))
}
