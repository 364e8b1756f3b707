//! A plane clipped to |x|, |y| ≤ half_side.

use super::{HitList, ObjectHit};
use crate::math::{Point2, Point3, Ray, Vector3};
use crate::precision::{nearly_zero, Real, EPSILON};

#[derive(Debug, Clone)]
pub struct Square {
    pub half_side: Real,
}

impl Square {
    pub fn new(half_side: Real) -> Self {
        Self { half_side }
    }

    pub fn collisions_along(&self, ray: &Ray) -> HitList {
        let mut hits = HitList::new();
        let denom = ray.direction.z;
        if nearly_zero(denom) {
            return hits;
        }
        let t = -ray.origin.z / denom;
        let p = ray.solve(t);
        if p.x.abs() <= self.half_side + EPSILON && p.y.abs() <= self.half_side + EPSILON {
            hits.push(ObjectHit::new(t, p, Vector3::unit_z()));
        }
        hits
    }

    pub fn normal_at(&self, _p: Point3) -> Vector3 {
        Vector3::unit_z()
    }

    pub fn is_surface_point(&self, p: Point3) -> bool {
        nearly_zero(p.z)
            && p.x.abs() <= self.half_side + EPSILON
            && p.y.abs() <= self.half_side + EPSILON
    }

    pub fn map(&self, p: Point3) -> Point2 {
        let side = 2.0 * self.half_side;
        Point2::new(
            ((p.x + self.half_side) / side).clamp(0.0, 1.0),
            ((p.y + self.half_side) / side).clamp(0.0, 1.0),
        )
    }

    pub fn object_extent(&self) -> Real {
        // corner distance
        self.half_side * std::f64::consts::SQRT_2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_hits_outside_misses() {
        let sq = Square::new(1.0);
        let inside = Ray::new(Point3::new(0.5, -0.5, 3.0), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(sq.collisions_along(&inside).len(), 1);
        let outside = Ray::new(Point3::new(1.5, 0.0, 3.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(sq.collisions_along(&outside).is_empty());
    }

    #[test]
    fn corner_maps_to_unit_square_corner() {
        let sq = Square::new(2.0);
        let uv = sq.map(Point3::new(2.0, 2.0, 0.0));
        assert!((uv.x - 1.0).abs() < EPSILON && (uv.y - 1.0).abs() < EPSILON);
        let center = sq.map(Point3::origin());
        assert!((center.x - 0.5).abs() < EPSILON);
    }
}
