//! The four-sided pyramid `z = h − |x| − |y|`, apex at (0, 0, h).
//!
//! The absolute values split the surface into four quadrant planes. Each
//! candidate root is solved with a fixed sign pair (a, b) ∈ {±1}² standing in
//! for |x| and |y|, then kept only if the hit point actually lands in that
//! quadrant — the sign predicates below. The surface extends without bound
//! below the apex, so the shape reports an infinite extent.

use super::{HitList, ObjectHit};
use crate::math::{Point2, Point3, Ray, Vector3};
use crate::precision::{nearly_equal, nearly_zero, Real};

#[derive(Debug, Clone)]
pub struct Pyramid {
    pub height: Real,
}

#[inline]
fn is_positive(p: Real, d: Real, t: Real) -> bool {
    (p + d * t) > 0.0
}

impl Pyramid {
    pub fn new(height: Real) -> Self {
        Self { height }
    }

    pub fn collisions_along(&self, ray: &Ray) -> HitList {
        let mut hits = HitList::new();
        let h = self.height;
        let (px, py, pz) = (ray.origin.x, ray.origin.y, ray.origin.z);
        let (dx, dy, dz) = (ray.direction.x, ray.direction.y, ray.direction.z);
        // 0 = h − a(px + dx·t) − b(py + dy·t) − (pz + dz·t), one solve per
        // sign pair (a, b)
        let denoms = [
            dx + dy + dz,  // a =  1, b =  1
            dy - dx + dz,  // a = -1, b =  1
            dx - dy + dz,  // a =  1, b = -1
            dz - dx - dy,  // a = -1, b = -1
        ];
        let numers = [
            h - px - py - pz,
            h + px - py - pz,
            h - px + py - pz,
            h + px + py - pz,
        ];
        let t: [Real; 4] = std::array::from_fn(|q| {
            if nearly_zero(denoms[q]) {
                Real::NAN
            } else {
                numers[q] / denoms[q]
            }
        });
        let usable = [
            is_positive(px, dx, t[0]) && is_positive(py, dy, t[0]),
            !is_positive(px, dx, t[1]) && is_positive(py, dy, t[1]),
            is_positive(px, dx, t[2]) && !is_positive(py, dy, t[2]),
            !is_positive(px, dx, t[3]) && !is_positive(py, dy, t[3]),
        ];
        for q in 0..4 {
            // every real root is reported, behind-the-origin ones included;
            // the caller picks the forward ones
            if t[q].is_finite() && usable[q] {
                let p = ray.solve(t[q]);
                hits.push(ObjectHit::new(t[q], p, self.normal_at(p)));
            }
        }
        hits.sort_by(|a, b| a.t.partial_cmp(&b.t).expect("finite roots"));
        hits
    }

    /// The face normal is constant per quadrant: (±1, ±1, 1) normalized,
    /// signs from the surface point's quadrant.
    pub fn normal_at(&self, p: Point3) -> Vector3 {
        let sx = if p.x > 0.0 { 1.0 } else { -1.0 };
        let sy = if p.y > 0.0 { 1.0 } else { -1.0 };
        Vector3::new(sx, sy, 1.0).normalized()
    }

    pub fn is_surface_point(&self, p: Point3) -> bool {
        nearly_equal(p.z, self.height - p.x.abs() - p.y.abs())
    }

    /// Distance from the apex axis → u, height → v, both clamped.
    pub fn map(&self, p: Point3) -> Point2 {
        let u = ((p.x.abs() + p.y.abs()) / self.height).clamp(0.0, 1.0);
        let v = (p.z / self.height).clamp(0.0, 1.0);
        Point2::new(u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision::EPSILON;

    #[test]
    fn axis_ray_hits_the_apex_face() {
        let pyr = Pyramid::new(2.0);
        let ray = Ray::new(Point3::new(0.5, 0.5, 5.0), Vector3::new(0.0, 0.0, -1.0));
        let hits = pyr.collisions_along(&ray);
        assert_eq!(hits.len(), 1);
        // z = 2 − 0.5 − 0.5 = 1
        assert!((hits[0].point.z - 1.0).abs() < EPSILON);
        assert!(pyr.is_surface_point(hits[0].point));
    }

    #[test]
    fn quadrant_normals_carry_the_right_signs() {
        let pyr = Pyramid::new(2.0);
        let n = pyr.normal_at(Point3::new(0.5, 0.5, 1.0));
        assert!(n.x > 0.0 && n.y > 0.0 && n.z > 0.0);
        let n = pyr.normal_at(Point3::new(-0.5, 0.5, 1.0));
        assert!(n.x < 0.0 && n.y > 0.0 && n.z > 0.0);
        assert!((n.magnitude() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn side_ray_crosses_two_faces() {
        let pyr = Pyramid::new(2.0);
        // horizontal ray through the pyramid body below the apex
        let ray = Ray::new(Point3::new(5.0, 0.0, 1.0), Vector3::new(-1.0, 0.0, 0.0));
        let hits = pyr.collisions_along(&ray);
        assert_eq!(hits.len(), 2);
        // faces at x = ±1 when z = 1, y = 0
        assert!((hits[0].point.x - 1.0).abs() < EPSILON);
        assert!((hits[1].point.x + 1.0).abs() < EPSILON);
    }

    #[test]
    fn quadrant_predicates_reject_cross_solutions() {
        let pyr = Pyramid::new(2.0);
        // a ray that would solve the (+,+) face equation but land at
        // negative x is discarded
        let ray = Ray::new(Point3::new(-3.0, 0.5, 5.0), Vector3::new(0.0, 0.0, -1.0));
        let hits = pyr.collisions_along(&ray);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].point.x < 0.0);
        assert!(pyr.is_surface_point(hits[0].point));
    }

    #[test]
    fn behind_root_is_reported_with_negative_t() {
        let pyr = Pyramid::new(2.0);
        // pointing up from above the face: the crossing is behind the origin
        let ray = Ray::new(Point3::new(0.5, 0.5, 5.0), Vector3::new(0.0, 0.0, 1.0));
        let hits = pyr.collisions_along(&ray);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].t + 4.0).abs() < EPSILON);
        assert!(pyr.is_surface_point(hits[0].point));
    }

    #[test]
    fn surface_extends_below_the_base() {
        let pyr = Pyramid::new(2.0);
        assert!(pyr.is_surface_point(Point3::new(3.0, 1.0, -2.0)));
    }
}
