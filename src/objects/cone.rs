//! The cone about the Z axis.
//!
//! The finite form has its base circle of `bottom_radius` in the z = 0 plane
//! and its apex at (0, 0, h): `(z − h)² = (h²/r²)(x² + y²)`, clipped to
//! 0 ≤ z ≤ h. The infinite form is the full double cone through the origin
//! with half-angle α. Both reduce to a quadratic in t.

use super::{HitList, ObjectHit};
use crate::math::{Point2, Point3, Ray, Vector3};
use crate::precision::{nearly_zero, within, Angle, Real, EPSILON, TAU};
use crate::solvers::quadratic_roots;

#[derive(Debug, Clone)]
pub struct Cone {
    bottom_radius: Real,
    height: Real,
    half_angle: Real,
}

impl Cone {
    /// The finite cone: base radius in the z = 0 plane, apex at z = `height`.
    pub fn new(bottom_radius: Real, height: Real) -> Self {
        debug_assert!(bottom_radius > 0.0 && height > 0.0);
        Self {
            bottom_radius,
            height,
            half_angle: bottom_radius.atan2(height),
        }
    }

    /// The infinite double cone with the given half-angle at the apex.
    pub fn infinite(half_angle: Angle) -> Self {
        let a = half_angle.radians();
        debug_assert!(a > 0.0 && a < TAU / 4.0, "half angle must be under 90°");
        Self {
            bottom_radius: 0.0,
            height: 0.0,
            half_angle: a,
        }
    }

    pub fn is_infinite(&self) -> bool {
        nearly_zero(self.height)
    }

    /// The slope term `h²/r²` (or `1/tan²α` for the infinite form).
    fn slope(&self) -> Real {
        if self.is_infinite() {
            let f = self.half_angle.tan();
            1.0 / (f * f)
        } else {
            (self.height * self.height) / (self.bottom_radius * self.bottom_radius)
        }
    }

    fn in_height(&self, z: Real) -> bool {
        self.is_infinite() || within(0.0, z, self.height)
    }

    pub fn collisions_along(&self, ray: &Ray) -> HitList {
        let mut hits = HitList::new();
        let (x, y, z) = (ray.origin.x, ray.origin.y, ray.origin.z);
        let (i, j, k) = (ray.direction.x, ray.direction.y, ray.direction.z);
        let s = self.slope();
        let z_h = z - self.height;
        let a = s * (i * i + j * j) - k * k;
        let b = 2.0 * (s * (i * x + j * y) - k * z_h);
        let c = s * (x * x + y * y) - z_h * z_h;
        let (t0, t1) = quadratic_roots(a, b, c);
        for t in [t0, t1] {
            if t.is_finite() {
                let p = ray.solve(t);
                if self.in_height(p.z) {
                    hits.push(ObjectHit::new(t, p, self.normal_at(p)));
                }
            }
        }
        hits.sort_by(|a, b| a.t.partial_cmp(&b.t).expect("finite roots"));
        hits
    }

    /// Lateral normal, blending the radial direction with the slope. The
    /// apex and off-surface heights have no meaningful normal and return the
    /// null vector.
    pub fn normal_at(&self, p: Point3) -> Vector3 {
        if !self.in_height(p.z) {
            return Vector3::zero();
        }
        if nearly_zero(p.x) && nearly_zero(p.y) {
            return Vector3::zero();
        }
        let (height, radius) = if self.is_infinite() {
            (1.0, self.half_angle.tan())
        } else {
            (self.height, self.bottom_radius)
        };
        let mut n = Vector3::new(p.x, p.y, 0.0).normalized() * height;
        n.z = if self.is_infinite() {
            if p.z > 0.0 {
                -radius
            } else {
                radius
            }
        } else {
            radius
        };
        n.normalized()
    }

    pub fn is_surface_point(&self, p: Point3) -> bool {
        if !self.in_height(p.z) {
            return false;
        }
        let z_h = p.z - self.height;
        (self.slope() * (p.x * p.x + p.y * p.y) - z_h * z_h).abs() < EPSILON
    }

    pub fn map(&self, p: Point3) -> Point2 {
        let theta = p.y.atan2(p.x) / TAU + 0.5;
        let v = if self.is_infinite() {
            // no natural height scale; wrap on unit period
            p.z.rem_euclid(1.0)
        } else {
            (p.z / self.height).clamp(0.0, 1.0)
        };
        Point2::new(theta, v)
    }

    pub fn object_extent(&self) -> Real {
        if self.is_infinite() {
            Real::INFINITY
        } else {
            (self.bottom_radius * self.bottom_radius + self.height * self.height).sqrt()
        }
    }

    pub fn is_closed(&self) -> bool {
        self.is_infinite()
    }
}
