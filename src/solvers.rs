//! Closed-form polynomial root solvers for the intersection math.
//!
//! Quadratics cover the conic primitives, the cubic exists to feed the
//! quartic's resolvent, and the quartic is what makes the torus possible.
//! All three mark complex or degenerate roots as NaN and leave filtering to
//! the caller — an all-NaN result from a primitive means "no hit", never an
//! error. Each invocation bumps a process-wide atomic counter so renders can
//! report how much root-finding they actually did.

use crate::precision::{Real, ROOT_EPSILON, TAU};
use std::sync::atomic::{AtomicU64, Ordering};

/// Invocation counters, profiling only. Relaxed ordering: the counts are
/// read after the render completes, never during.
pub struct SolverStats {
    pub quadratic: AtomicU64,
    pub cubic: AtomicU64,
    pub quartic: AtomicU64,
}

pub static SOLVER_STATS: SolverStats = SolverStats {
    quadratic: AtomicU64::new(0),
    cubic: AtomicU64::new(0),
    quartic: AtomicU64::new(0),
};

impl SolverStats {
    /// (quadratic, cubic, quartic) invocation counts since process start.
    pub fn snapshot(&self) -> (u64, u64, u64) {
        (
            self.quadratic.load(Ordering::Relaxed),
            self.cubic.load(Ordering::Relaxed),
            self.quartic.load(Ordering::Relaxed),
        )
    }
}

#[inline]
fn root_zero(value: Real) -> bool {
    value.abs() < ROOT_EPSILON
}

/// Roots of a·t² + b·t + c = 0 as an unordered pair.
///
/// Degenerate leading coefficient or a negative discriminant yields
/// `(NaN, NaN)`. Roots are not sorted; callers filter non-finite values and
/// pick the smallest positive themselves.
pub fn quadratic_roots(a: Real, b: Real, c: Real) -> (Real, Real) {
    SOLVER_STATS.quadratic.fetch_add(1, Ordering::Relaxed);
    if root_zero(a) {
        return (Real::NAN, Real::NAN);
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant >= 0.0 {
        let s = discriminant.sqrt();
        ((-b + s) / (2.0 * a), (-b - s) / (2.0 * a))
    } else {
        (Real::NAN, Real::NAN)
    }
}

/// Roots of a·t³ + b·t² + c·t + d = 0.
///
/// Reduces to depressed form by the shift −b/(3a), classifies by the
/// discriminant D = Q³ + R², and recovers the real roots: three (trigonometric
/// Cardano) when D < 0, a double/triple root when D ≈ 0, and one when D > 0.
/// NaN marks the complex ones. A cubic always crosses zero, so at least one
/// returned root is real; anything else is a solver bug.
pub fn cubic_roots(a: Real, b: Real, c: Real, d: Real) -> (Real, Real, Real) {
    SOLVER_STATS.cubic.fetch_add(1, Ordering::Relaxed);
    if root_zero(a) {
        return (Real::NAN, Real::NAN, Real::NAN);
    }
    let b = b / a;
    let c = c / a;
    let d = d / a;
    // the closed forms below assume the inflection sits on t = 0
    let shift = -b / 3.0;
    let q = (3.0 * c - b * b) / 9.0;
    let r = (b * (9.0 * c - 2.0 * b * b) - 27.0 * d) / 54.0;
    let discriminant = q * q * q + r * r;

    let (x1, x2, x3);
    if root_zero(discriminant) {
        // double (or triple) root
        let rc = r.cbrt();
        x1 = 2.0 * rc + shift;
        x2 = -rc + shift;
        x3 = -rc + shift;
    } else if discriminant < 0.0 {
        // three distinct real roots; q < 0 is implied here
        let neg_q = -q;
        let theta = (r / (neg_q * neg_q * neg_q).sqrt()).clamp(-1.0, 1.0).acos();
        let scale = 2.0 * neg_q.sqrt();
        x1 = scale * (theta / 3.0).cos() + shift;
        x2 = scale * ((theta + TAU) / 3.0).cos() + shift;
        x3 = scale * ((theta + 2.0 * TAU) / 3.0).cos() + shift;
    } else {
        // one real root, two complex conjugates
        let sq = discriminant.sqrt();
        let s = (r + sq).cbrt();
        let t = (r - sq).cbrt();
        x1 = s + t + shift;
        x2 = Real::NAN;
        x3 = Real::NAN;
    }
    debug_assert!(
        !(x1.is_nan() && x2.is_nan() && x3.is_nan()),
        "cubics always have at least one real solution"
    );
    (x1, x2, x3)
}

/// Roots of a·t⁴ + b·t³ + c·t² + d·t + e = 0.
///
/// Herbert E. Salzer, "A Note on the Solution of Quartic Equations"
/// (Proc. Am. Math. Society, 1959): solve the resolvent cubic for z, derive
/// m² = b²/4 − c + z, then the four candidates as closed forms in b, m, γ, δ.
/// Candidates whose sign predicate fails, or that come out infinite, are
/// masked to NaN.
pub fn quartic_roots(a: Real, b: Real, c: Real, d: Real, e: Real) -> (Real, Real, Real, Real) {
    SOLVER_STATS.quartic.fetch_add(1, Ordering::Relaxed);
    if root_zero(a) {
        return (Real::NAN, Real::NAN, Real::NAN, Real::NAN);
    }
    let b = b / a;
    let c = c / a;
    let d = d / a;
    let e = e / a;

    // resolvent cubic
    let c1 = b * d - 4.0 * e;
    let d1 = e * (4.0 * c - b * b) - d * d;
    let (z1, z2, z3) = cubic_roots(1.0, -c, c1, d1);
    let mut z = z1;
    if z.is_nan() {
        z = z2;
    }
    if z.is_nan() {
        z = z3;
    }

    let mm = 0.25 * b * b - c + z;
    let (m, n);
    if mm > 0.0 && !root_zero(mm) {
        m = mm.sqrt();
        n = 0.25 * (b * z - 2.0 * d) / m;
    } else if root_zero(mm) {
        m = 0.0;
        let nn = 0.25 * z * z - e;
        if nn < 0.0 {
            return (Real::NAN, Real::NAN, Real::NAN, Real::NAN);
        }
        n = nn.sqrt();
    } else {
        // m is imaginary: every root is complex
        return (Real::NAN, Real::NAN, Real::NAN, Real::NAN);
    }

    let alpha = 0.5 * b * b - z - c;
    let beta = 4.0 * n - b * m;
    let alpha_plus_beta = alpha + beta;
    let alpha_minus_beta = alpha - beta;

    let mut x1 = Real::NAN;
    let mut x2 = Real::NAN;
    let mut x3 = Real::NAN;
    let mut x4 = Real::NAN;
    if alpha_plus_beta >= 0.0 {
        let gamma = alpha_plus_beta.sqrt();
        x1 = 0.5 * (-b * 0.5 + m + gamma);
        x3 = 0.5 * (-b * 0.5 + m - gamma);
    }
    if alpha_minus_beta >= 0.0 {
        let delta = alpha_minus_beta.sqrt();
        x2 = 0.5 * (-b * 0.5 - m + delta);
        x4 = 0.5 * (-b * 0.5 - m - delta);
    }
    let mask = |v: Real| if v.is_infinite() { Real::NAN } else { v };
    (mask(x1), mask(x2), mask(x3), mask(x4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision::EPSILON;

    fn close(a: Real, b: Real) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Sorts the finite entries to the front for order-insensitive asserts.
    fn finite_sorted(roots: &[Real]) -> Vec<Real> {
        let mut v: Vec<Real> = roots.iter().copied().filter(|r| r.is_finite()).collect();
        v.sort_by(|a, b| a.partial_cmp(b).unwrap());
        v
    }

    #[test]
    fn quadratic_two_real_roots() {
        // (t - 2)(t + 3) = t² + t − 6
        let (p, q) = quadratic_roots(1.0, 1.0, -6.0);
        let roots = finite_sorted(&[p, q]);
        assert_eq!(roots.len(), 2);
        assert!(close(roots[0], -3.0));
        assert!(close(roots[1], 2.0));
    }

    #[test]
    fn quadratic_degenerate_and_complex_are_nan() {
        let (p, q) = quadratic_roots(0.0, 1.0, 1.0);
        assert!(p.is_nan() && q.is_nan());
        let (p, q) = quadratic_roots(1.0, 0.0, 1.0);
        assert!(p.is_nan() && q.is_nan());
    }

    #[test]
    fn cubic_three_real_roots() {
        // (t − 1)(t − 2)(t − 3) = t³ − 6t² + 11t − 6
        let (x1, x2, x3) = cubic_roots(1.0, -6.0, 11.0, -6.0);
        let roots = finite_sorted(&[x1, x2, x3]);
        assert_eq!(roots.len(), 3);
        assert!(close(roots[0], 1.0));
        assert!(close(roots[1], 2.0));
        assert!(close(roots[2], 3.0));
    }

    #[test]
    fn cubic_one_real_root() {
        // t³ + t + 10 has the single real root t = −2
        let (x1, x2, x3) = cubic_roots(1.0, 0.0, 1.0, 10.0);
        let roots = finite_sorted(&[x1, x2, x3]);
        assert_eq!(roots.len(), 1);
        assert!(close(roots[0], -2.0));
    }

    #[test]
    fn cubic_triple_root() {
        // (t − 1)³ = t³ − 3t² + 3t − 1
        let (x1, x2, x3) = cubic_roots(1.0, -3.0, 3.0, -1.0);
        for x in [x1, x2, x3] {
            assert!(close(x, 1.0), "root {x}");
        }
    }

    #[test]
    fn quartic_four_real_roots() {
        // (t − 1)(t + 1)(t − 2)(t + 2) = t⁴ − 5t² + 4
        let (x1, x2, x3, x4) = quartic_roots(1.0, 0.0, -5.0, 0.0, 4.0);
        let roots = finite_sorted(&[x1, x2, x3, x4]);
        assert_eq!(roots.len(), 4);
        assert!(close(roots[0], -2.0));
        assert!(close(roots[1], -1.0));
        assert!(close(roots[2], 1.0));
        assert!(close(roots[3], 2.0));
    }

    #[test]
    fn quartic_two_real_roots() {
        // (t² + 1)(t − 1)(t + 1) = t⁴ − 1
        let (x1, x2, x3, x4) = quartic_roots(1.0, 0.0, 0.0, 0.0, -1.0);
        let roots = finite_sorted(&[x1, x2, x3, x4]);
        assert_eq!(roots.len(), 2);
        assert!(close(roots[0], -1.0));
        assert!(close(roots[1], 1.0));
    }

    #[test]
    fn quartic_no_real_roots() {
        // t⁴ + 1 has no real roots
        let (x1, x2, x3, x4) = quartic_roots(1.0, 0.0, 0.0, 0.0, 1.0);
        assert!(x1.is_nan() && x2.is_nan() && x3.is_nan() && x4.is_nan());
    }

    #[test]
    fn counters_only_go_up() {
        let (q0, ..) = SOLVER_STATS.snapshot();
        quadratic_roots(1.0, 0.0, -1.0);
        let (q1, ..) = SOLVER_STATS.snapshot();
        assert!(q1 > q0);
    }
}
