//! An axis-aligned box of half-extents (a, b, c) around the origin, solved
//! with the slab method. The normal at a surface point is the axis whose
//! coordinate sits on its half-extent; on edges, the axis the ray approaches
//! most steeply wins.

use super::{HitList, ObjectHit};
use crate::mapping;
use crate::math::{Point2, Point3, Ray, Vector3};
use crate::precision::{Real, EPSILON};

#[derive(Debug, Clone)]
pub struct Cuboid {
    pub half_extents: Point3,
}

impl Cuboid {
    pub fn new(a: Real, b: Real, c: Real) -> Self {
        debug_assert!(a > 0.0 && b > 0.0 && c > 0.0);
        Self {
            half_extents: Point3::new(a, b, c),
        }
    }

    pub fn cube(half_side: Real) -> Self {
        Self::new(half_side, half_side, half_side)
    }

    pub fn collisions_along(&self, ray: &Ray) -> HitList {
        let mut hits = HitList::new();
        let he = self.half_extents;
        let mut t_near = Real::NEG_INFINITY;
        let mut t_far = Real::INFINITY;
        for axis in 0..3 {
            let inv_d = 1.0 / ray.direction[axis];
            let mut t0 = (-he[axis] - ray.origin[axis]) * inv_d;
            let mut t1 = (he[axis] - ray.origin[axis]) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t0.max(t_near);
            t_far = t1.min(t_far);
            if t_near > t_far {
                return hits;
            }
        }
        for t in [t_near, t_far] {
            if t.is_finite() {
                let p = ray.solve(t);
                hits.push(ObjectHit::new(t, p, self.surface_normal(p, ray.direction)));
            }
        }
        hits
    }

    /// The face normal for a point on the surface. Edge and corner hits are
    /// disambiguated by the strongest ray approach.
    fn surface_normal(&self, p: Point3, direction: Vector3) -> Vector3 {
        let he = self.half_extents;
        let mut candidates: [(usize, Real); 3] = [(0, 0.0); 3];
        let mut count = 0;
        for axis in 0..3 {
            if (p[axis].abs() - he[axis]).abs() <= EPSILON {
                candidates[count] = (axis, direction[axis].abs());
                count += 1;
            }
        }
        if count == 0 {
            // interior query; no face applies
            return Vector3::zero();
        }
        let (axis, _) = candidates[..count]
            .iter()
            .copied()
            .max_by(|a, b| a.1.partial_cmp(&b.1).expect("finite components"))
            .expect("count > 0");
        let mut n = Vector3::zero();
        match axis {
            0 => n.x = p.x.signum(),
            1 => n.y = p.y.signum(),
            _ => n.z = p.z.signum(),
        }
        n
    }

    pub fn normal_at(&self, p: Point3) -> Vector3 {
        // outside a ray context, prefer the face the point is deepest into
        self.surface_normal(p, Vector3::new(1.0, 1.0, 1.0))
    }

    pub fn is_surface_point(&self, p: Point3) -> bool {
        let he = self.half_extents;
        let inside = p.x.abs() <= he.x + EPSILON
            && p.y.abs() <= he.y + EPSILON
            && p.z.abs() <= he.z + EPSILON;
        let on_face = (p.x.abs() - he.x).abs() <= EPSILON
            || (p.y.abs() - he.y).abs() <= EPSILON
            || (p.z.abs() - he.z).abs() <= EPSILON;
        inside && on_face
    }

    /// The 6 faces flattened into a 3×2 grid, the layout UV unwrap tools use.
    pub fn map(&self, p: Point3) -> Point2 {
        mapping::cube_faces(p, self.half_extents)
    }

    pub fn object_extent(&self) -> Real {
        self.half_extents.as_vector().magnitude()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_ray_enters_and_exits() {
        let c = Cuboid::new(1.0, 2.0, 3.0);
        let ray = Ray::new(Point3::new(5.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0));
        let hits = c.collisions_along(&ray);
        assert_eq!(hits.len(), 2);
        assert!((hits[0].t - 4.0).abs() < EPSILON);
        assert!((hits[1].t - 6.0).abs() < EPSILON);
        assert_eq!(hits[0].normal, Vector3::unit_x());
        assert_eq!(hits[1].normal, -Vector3::unit_x());
    }

    #[test]
    fn miss_outside_the_slabs() {
        let c = Cuboid::cube(1.0);
        let ray = Ray::new(Point3::new(5.0, 3.0, 0.0), Vector3::new(-1.0, 0.0, 0.0));
        assert!(c.collisions_along(&ray).is_empty());
    }

    #[test]
    fn ray_from_inside_reports_both_crossings() {
        let c = Cuboid::cube(1.0);
        let ray = Ray::new(Point3::origin(), Vector3::unit_z());
        let hits = c.collisions_along(&ray);
        assert_eq!(hits.len(), 2);
        assert!(hits[0].t < 0.0 && hits[1].t > 0.0);
    }

    #[test]
    fn surface_predicate() {
        let c = Cuboid::new(1.0, 2.0, 3.0);
        assert!(c.is_surface_point(Point3::new(1.0, 0.5, 0.5)));
        assert!(c.is_surface_point(Point3::new(-1.0, 2.0, 3.0)));
        assert!(!c.is_surface_point(Point3::new(0.5, 0.5, 0.5)));
        assert!(!c.is_surface_point(Point3::new(1.5, 0.0, 0.0)));
    }

    #[test]
    fn oblique_hit_picks_the_entered_face() {
        let c = Cuboid::cube(1.0);
        let ray = Ray::new(Point3::new(5.0, 0.3, 0.2), Vector3::new(-1.0, 0.0, 0.0));
        let hits = c.collisions_along(&ray);
        assert_eq!(hits[0].normal, Vector3::unit_x());
    }

    #[test]
    fn face_centers_map_to_distinct_grid_cells() {
        let c = Cuboid::cube(1.0);
        let a = c.map(Point3::new(1.0, 0.0, 0.0));
        let b = c.map(Point3::new(0.0, 0.0, -1.0));
        assert!((a.x - b.x).abs() > EPSILON || (a.y - b.y).abs() > EPSILON);
    }
}
