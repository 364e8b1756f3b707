//! The cylinder about the Z axis: x² + y² = r², optionally clipped to
//! |z| ≤ h/2. The lateral surface only — end caps are separate [`Ring`]
//! objects placed at ±h/2.
//!
//! [`Ring`]: super::Ring

use super::{HitList, ObjectHit};
use crate::mapping;
use crate::math::{Point2, Point3, Ray, Vector3};
use crate::precision::{nearly_equal, Real};
use crate::solvers::quadratic_roots;

#[derive(Debug, Clone)]
pub struct Cylinder {
    pub radius: Real,
    /// `None` for the infinite cylinder.
    pub half_height: Option<Real>,
}

impl Cylinder {
    pub fn new(radius: Real, half_height: Real) -> Self {
        debug_assert!(radius > 0.0 && half_height > 0.0);
        Self {
            radius,
            half_height: Some(half_height),
        }
    }

    pub fn infinite(radius: Real) -> Self {
        debug_assert!(radius > 0.0);
        Self {
            radius,
            half_height: None,
        }
    }

    fn in_height(&self, z: Real) -> bool {
        match self.half_height {
            Some(h) => z.abs() <= h,
            None => true,
        }
    }

    pub fn collisions_along(&self, ray: &Ray) -> HitList {
        let mut hits = HitList::new();
        let (x, y) = (ray.origin.x, ray.origin.y);
        let (i, j) = (ray.direction.x, ray.direction.y);
        let a = i * i + j * j;
        let b = 2.0 * (x * i + y * j);
        let c = x * x + y * y - self.radius * self.radius;
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

    pub fn normal_at(&self, p: Point3) -> Vector3 {
        Vector3::new(p.x, p.y, 0.0) / self.radius
    }

    pub fn is_surface_point(&self, p: Point3) -> bool {
        nearly_equal((p.x * p.x + p.y * p.y).sqrt(), self.radius) && self.in_height(p.z)
    }

    pub fn map(&self, p: Point3) -> Point2 {
        let height = match self.half_height {
            Some(h) => 2.0 * h,
            None => 2.0 * self.radius,
        };
        mapping::cylindrical(p, height)
    }

    pub fn object_extent(&self) -> Real {
        match self.half_height {
            Some(h) => (self.radius * self.radius + h * h).sqrt(),
            None => Real::INFINITY,
        }
    }

    pub fn is_closed(&self) -> bool {
        // the infinite tube separates space; the open finite tube does not
        self.half_height.is_none()
    }
}
