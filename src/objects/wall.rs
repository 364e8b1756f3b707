//! A slab of thickness 2w: the pair of parallel planes z = ±w. Points
//! strictly between the faces have no meaningful normal and report the null
//! vector — the shading path respects that.

use super::{HitList, ObjectHit};
use crate::mapping;
use crate::math::{Point2, Point3, Ray, Vector3};
use crate::precision::{nearly_equal, nearly_zero, Real};

#[derive(Debug, Clone)]
pub struct Wall {
    /// Half the slab thickness.
    pub half_thickness: Real,
    /// World units per texture tile on the faces.
    pub surface_scale: Real,
}

impl Wall {
    pub fn new(half_thickness: Real, surface_scale: Real) -> Self {
        debug_assert!(half_thickness > 0.0);
        Self {
            half_thickness,
            surface_scale,
        }
    }

    pub fn collisions_along(&self, ray: &Ray) -> HitList {
        let mut hits = HitList::new();
        let dz = ray.direction.z;
        if nearly_zero(dz) {
            // parallel to the faces: crosses neither
            return hits;
        }
        let w = self.half_thickness;
        let mut t0 = (-w - ray.origin.z) / dz;
        let mut t1 = (w - ray.origin.z) / dz;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        for t in [t0, t1] {
            let p = ray.solve(t);
            hits.push(ObjectHit::new(t, p, self.normal_at(p)));
        }
        hits
    }

    pub fn normal_at(&self, p: Point3) -> Vector3 {
        if nearly_equal(p.z, self.half_thickness) {
            Vector3::unit_z()
        } else if nearly_equal(p.z, -self.half_thickness) {
            -Vector3::unit_z()
        } else {
            // interior
            Vector3::zero()
        }
    }

    pub fn is_surface_point(&self, p: Point3) -> bool {
        nearly_equal(p.z.abs(), self.half_thickness)
    }

    pub fn map(&self, p: Point3) -> Point2 {
        mapping::planar(p, self.surface_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision::EPSILON;

    #[test]
    fn crossing_ray_reports_both_faces() {
        let wall = Wall::new(0.5, 1.0);
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        let hits = wall.collisions_along(&ray);
        assert_eq!(hits.len(), 2);
        assert!((hits[0].t - 4.5).abs() < EPSILON);
        assert!((hits[1].t - 5.5).abs() < EPSILON);
        assert_eq!(hits[0].normal, Vector3::unit_z());
        assert_eq!(hits[1].normal, -Vector3::unit_z());
    }

    #[test]
    fn parallel_ray_misses_even_inside() {
        let wall = Wall::new(0.5, 1.0);
        let inside = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::unit_x());
        assert!(wall.collisions_along(&inside).is_empty());
    }

    #[test]
    fn interior_normal_is_null() {
        let wall = Wall::new(0.5, 1.0);
        assert!(wall.normal_at(Point3::new(1.0, 2.0, 0.0)).is_null());
        assert!(!wall.normal_at(Point3::new(1.0, 2.0, 0.5)).is_null());
    }

    #[test]
    fn surface_predicate_only_on_the_faces() {
        let wall = Wall::new(0.5, 1.0);
        assert!(wall.is_surface_point(Point3::new(7.0, -3.0, 0.5)));
        assert!(wall.is_surface_point(Point3::new(7.0, -3.0, -0.5)));
        assert!(!wall.is_surface_point(Point3::new(7.0, -3.0, 0.0)));
    }
}
