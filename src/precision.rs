//! The scalar kernel: the `Real` alias, the epsilon policy, and tagged angles.
//!
//! Every geometric comparison in the tracer goes through [`nearly_zero`] /
//! [`nearly_equal`] rather than `==`. The process epsilon is deliberately
//! looser than machine epsilon so that intersections near tangencies (a ray
//! grazing a sphere, a point sitting on a slab face) stay stable instead of
//! flickering between hit and miss.

/// The working precision of the whole tracer.
pub type Real = f64;

/// Process-wide tolerance for "numerically zero": 2⁻¹⁰.
pub const EPSILON: Real = 0.000_976_562_5;

/// Offset used when re-launching shadow and bounce rays off a surface.
/// Slightly larger than the geometric epsilon to defeat self-shadowing acne.
pub const SHADOW_EPSILON: Real = 4.0 * EPSILON;

/// The solvers' near-zero test. Tighter than the geometric epsilon so a
/// genuinely tiny leading coefficient still degrades to a lower-order
/// polynomial instead of producing wild roots.
pub const ROOT_EPSILON: Real = EPSILON / 16.0;

pub use std::f64::consts::PI;
pub use std::f64::consts::TAU;

/// True when `value` is within the process epsilon of zero.
#[inline(always)]
pub fn nearly_zero(value: Real) -> bool {
    value.abs() < EPSILON
}

/// True when `a` and `b` are within the process epsilon of each other.
#[inline(always)]
pub fn nearly_equal(a: Real, b: Real) -> bool {
    (a - b).abs() < EPSILON
}

/// True when `low <= value <= high`.
#[inline(always)]
pub fn within(low: Real, value: Real, high: Real) -> bool {
    low <= value && value <= high
}

/// Linear remap of `value` from [in_lo, in_hi] to [out_lo, out_hi].
#[inline]
pub fn remap(value: Real, in_lo: Real, in_hi: Real, out_lo: Real, out_hi: Real) -> Real {
    out_lo + (value - in_lo) * (out_hi - out_lo) / (in_hi - in_lo)
}

// ─── Angles ─────────────────────────────────────────────────────────────────

/// A tagged angle. Conversions between the three systems are explicit; the
/// renderer normalizes to radians at its API boundaries and keeps them there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Angle {
    Radians(Real),
    Degrees(Real),
    Turns(Real),
}

impl Angle {
    /// The angle expressed in radians.
    #[inline]
    pub fn radians(self) -> Real {
        match self {
            Angle::Radians(r) => r,
            Angle::Degrees(d) => d * PI / 180.0,
            Angle::Turns(t) => t * TAU,
        }
    }

    /// The angle expressed in degrees.
    #[inline]
    pub fn degrees(self) -> Real {
        match self {
            Angle::Radians(r) => r * 180.0 / PI,
            Angle::Degrees(d) => d,
            Angle::Turns(t) => t * 360.0,
        }
    }

    /// The angle expressed in turns (1 turn = τ radians).
    #[inline]
    pub fn turns(self) -> Real {
        match self {
            Angle::Radians(r) => r / TAU,
            Angle::Degrees(d) => d / 360.0,
            Angle::Turns(t) => t,
        }
    }

    #[inline]
    pub fn sin(self) -> Real {
        self.radians().sin()
    }

    #[inline]
    pub fn cos(self) -> Real {
        self.radians().cos()
    }

    #[inline]
    pub fn tan(self) -> Real {
        self.radians().tan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_conversions_round_trip() {
        let a = Angle::Degrees(90.0);
        assert!(nearly_equal(a.radians(), PI / 2.0));
        assert!(nearly_equal(a.turns(), 0.25));
        let b = Angle::Turns(0.5);
        assert!(nearly_equal(b.degrees(), 180.0));
        assert!(nearly_equal(b.radians(), PI));
        let c = Angle::Radians(TAU);
        assert!(nearly_equal(c.turns(), 1.0));
    }

    #[test]
    fn epsilon_separates_tangency_noise() {
        assert!(nearly_zero(EPSILON / 2.0));
        assert!(!nearly_zero(EPSILON * 2.0));
        assert!(nearly_equal(1.0, 1.0 + EPSILON / 2.0));
    }

    #[test]
    fn remap_is_linear() {
        assert!(nearly_equal(remap(0.5, 0.0, 1.0, -1.0, 1.0), 0.0));
        assert!(nearly_equal(remap(-1.0, -1.0, 1.0, 0.0, 1.0), 0.0));
    }
}
