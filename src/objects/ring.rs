//! A plane clipped to an annulus: r_inner ≤ √(x² + y²) ≤ r_outer.
//! With r_inner = 0 it doubles as the end cap for finite cylinders.

use super::{HitList, ObjectHit};
use crate::math::{Point2, Point3, Ray, Vector3};
use crate::precision::{nearly_zero, Real, EPSILON, TAU};

#[derive(Debug, Clone)]
pub struct Ring {
    pub inner_radius: Real,
    pub outer_radius: Real,
}

impl Ring {
    pub fn new(inner_radius: Real, outer_radius: Real) -> Self {
        debug_assert!(inner_radius <= outer_radius);
        Self {
            inner_radius,
            outer_radius,
        }
    }

    /// A filled disc.
    pub fn disc(radius: Real) -> Self {
        Self::new(0.0, radius)
    }

    fn in_annulus(&self, p: Point3) -> bool {
        let r2 = p.x * p.x + p.y * p.y;
        let inner = self.inner_radius - EPSILON;
        let outer = self.outer_radius + EPSILON;
        r2 >= inner.max(0.0) * inner.max(0.0) && r2 <= outer * outer
    }

    pub fn collisions_along(&self, ray: &Ray) -> HitList {
        let mut hits = HitList::new();
        let denom = ray.direction.z;
        if nearly_zero(denom) {
            return hits;
        }
        let t = -ray.origin.z / denom;
        let p = ray.solve(t);
        if self.in_annulus(p) {
            hits.push(ObjectHit::new(t, p, Vector3::unit_z()));
        }
        hits
    }

    pub fn normal_at(&self, _p: Point3) -> Vector3 {
        Vector3::unit_z()
    }

    pub fn is_surface_point(&self, p: Point3) -> bool {
        nearly_zero(p.z) && self.in_annulus(p)
    }

    /// Angle → u, radial position between the rims → v.
    pub fn map(&self, p: Point3) -> Point2 {
        let theta = p.y.atan2(p.x) / TAU + 0.5;
        let r = (p.x * p.x + p.y * p.y).sqrt();
        let span = (self.outer_radius - self.inner_radius).max(EPSILON);
        let v = ((r - self.inner_radius) / span).clamp(0.0, 1.0);
        Point2::new(theta, v)
    }

    pub fn object_extent(&self) -> Real {
        self.outer_radius
    }
}
