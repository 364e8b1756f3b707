//! The sphere: substitute the ray into (P − C)·(P − C) = r² and solve the
//! quadratic in t.

use super::{HitList, ObjectHit};
use crate::mapping;
use crate::math::{Point2, Point3, Ray, Vector3};
use crate::precision::{nearly_equal, Real};
use crate::solvers::quadratic_roots;

#[derive(Debug, Clone)]
pub struct Sphere {
    pub radius: Real,
}

impl Sphere {
    pub fn new(radius: Real) -> Self {
        debug_assert!(radius > 0.0);
        Self { radius }
    }

    pub fn collisions_along(&self, ray: &Ray) -> HitList {
        let mut hits = HitList::new();
        let oc = ray.origin - Point3::origin();
        let a = ray.direction.quadrance();
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.quadrance() - self.radius * self.radius;
        let (t0, t1) = quadratic_roots(a, b, c);
        for t in [t0, t1] {
            if t.is_finite() {
                let p = ray.solve(t);
                hits.push(ObjectHit::new(t, p, self.normal_at(p)));
            }
        }
        hits.sort_by(|a, b| a.t.partial_cmp(&b.t).expect("finite roots"));
        hits
    }

    pub fn normal_at(&self, p: Point3) -> Vector3 {
        p.as_vector() / self.radius
    }

    pub fn is_surface_point(&self, p: Point3) -> bool {
        nearly_equal(p.as_vector().magnitude(), self.radius)
    }

    pub fn map(&self, p: Point3) -> Point2 {
        mapping::spherical(p, self.radius)
    }

    pub fn object_extent(&self) -> Real {
        self.radius
    }
}
