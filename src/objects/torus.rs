//! The torus: (√(x² + y²) − R)² + z² = r², a quartic in the ray parameter.
//!
//! Expanding the substitution by hand explodes into dozens of terms; the
//! grouped coefficients below follow the simplification where everything is
//! expressed through the three sums `i²+j²+k²`, `ix+jy+kz`, and
//! `x²+y²+z²−(r²+R²)`. Rays whose closest approach to the origin is farther
//! than R + r cannot touch the surface, so the quartic is skipped entirely.

use super::{HitList, ObjectHit};
use crate::mapping;
use crate::math::{Point2, Point3, Ray, Vector3};
use crate::precision::{nearly_equal, Real};
use crate::solvers::quartic_roots;

#[derive(Debug, Clone)]
pub struct Torus {
    pub ring_radius: Real,
    pub tube_radius: Real,
}

impl Torus {
    /// `tube_radius` must not exceed `ring_radius` or the surface
    /// self-intersects.
    pub fn new(ring_radius: Real, tube_radius: Real) -> Self {
        debug_assert!(
            tube_radius > 0.0 && tube_radius <= ring_radius,
            "self-intersecting torus"
        );
        Self {
            ring_radius,
            tube_radius,
        }
    }

    pub fn collisions_along(&self, ray: &Ray) -> HitList {
        let mut hits = HitList::new();
        // reach test against the outer shell
        let closest = ray.closest(Point3::origin());
        let reach = self.ring_radius + self.tube_radius;
        if closest.as_vector().quadrance() > reach * reach {
            return hits;
        }

        let (x, y, z) = (ray.origin.x, ray.origin.y, ray.origin.z);
        let (i, j, k) = (ray.direction.x, ray.direction.y, ray.direction.z);
        let qq = self.ring_radius * self.ring_radius;
        let rr = self.tube_radius * self.tube_radius;
        let ii_jj_kk = i * i + j * j + k * k;
        let ix_jy_kz = i * x + j * y + k * z;
        let xx_yy_zz = x * x + y * y + z * z;
        let shifted = xx_yy_zz - (rr + qq);

        let a = ii_jj_kk * ii_jj_kk;
        let b = 4.0 * ii_jj_kk * ix_jy_kz;
        let c = 2.0 * ii_jj_kk * shifted + 4.0 * ix_jy_kz * ix_jy_kz + 4.0 * qq * k * k;
        let d = 4.0 * shifted * ix_jy_kz + 8.0 * qq * k * z;
        let e = shifted * shifted - 4.0 * qq * (rr - z * z);

        let (r0, r1, r2, r3) = quartic_roots(a, b, c, d, e);
        for t in [r0, r1, r2, r3] {
            if t.is_finite() {
                let p = ray.solve(t);
                hits.push(ObjectHit::new(t, p, self.normal_at(p)));
            }
        }
        hits.sort_by(|a, b| a.t.partial_cmp(&b.t).expect("finite roots"));
        hits
    }

    /// Project the surface point onto the ring plane, scale out to the ring
    /// circle, and point from there to the surface.
    pub fn normal_at(&self, p: Point3) -> Vector3 {
        let ring_vector = Vector3::new(p.x, p.y, 0.0).normalized() * self.ring_radius;
        let ring_point = Point3::origin() + ring_vector;
        (p - ring_point).normalized()
    }

    pub fn is_surface_point(&self, p: Point3) -> bool {
        let r_xy = (p.x * p.x + p.y * p.y).sqrt();
        let d = r_xy - self.ring_radius;
        nearly_equal(d * d + p.z * p.z, self.tube_radius * self.tube_radius)
    }

    pub fn map(&self, p: Point3) -> Point2 {
        mapping::toroidal(p, self.ring_radius)
    }

    pub fn object_extent(&self) -> Real {
        self.ring_radius + self.tube_radius
    }
}
