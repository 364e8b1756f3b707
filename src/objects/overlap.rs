//! Constructive solid geometry over two closed children.
//!
//! Each child produces its full root list along the ray; a point on the ray
//! is inside a closed child iff an odd number of that child's roots lie
//! beyond it. The boolean op is then evaluated just before and just after
//! every boundary — where the combined predicate flips, the boundary is a
//! surface of the composite. Subtraction reports the cutter's boundaries
//! with flipped normals, since the cut face looks into what used to be B's
//! interior.

use super::{HitList, Object, ObjectHit};
use crate::math::{Point2, Point3, Ray, Vector3};
use crate::precision::{Real, EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapOp {
    /// A ∩ B.
    Inclusive,
    /// A \ B.
    Subtractive,
    /// A ∪ B.
    Additive,
}

#[derive(Debug, Clone)]
pub struct Overlap {
    pub op: OverlapOp,
    pub a: Object,
    pub b: Object,
}

impl Overlap {
    /// Children must be closed shapes; an open child has no interior to
    /// combine.
    pub fn new(op: OverlapOp, a: Object, b: Object) -> Self {
        assert!(
            a.shape.is_closed() && b.shape.is_closed(),
            "CSG children must be closed shapes"
        );
        Self { op, a, b }
    }

    /// Roots of one child along the composite-space ray, with points and
    /// normals lifted back into composite space. [`Group`] walks its children
    /// with the same lift.
    ///
    /// [`Group`]: super::Group
    pub(super) fn child_roots(child: &Object, ray: &Ray) -> HitList {
        let child_ray = child.pose.reverse_ray(*ray);
        let mut roots = child.shape.collisions_along(&child_ray);
        for hit in roots.iter_mut() {
            hit.point = child.pose.forward_point(hit.point);
            hit.normal = child.pose.forward_vector(hit.normal).normalized();
        }
        roots.sort_by(|a, b| a.t.partial_cmp(&b.t).expect("finite roots"));
        roots
    }

    /// Parity containment: inside iff an odd number of roots lie beyond `t`.
    fn inside(roots: &[ObjectHit], t: Real) -> bool {
        roots.iter().filter(|h| h.t > t).count() % 2 == 1
    }

    fn combine(&self, in_a: bool, in_b: bool) -> bool {
        match self.op {
            OverlapOp::Inclusive => in_a && in_b,
            OverlapOp::Subtractive => in_a && !in_b,
            OverlapOp::Additive => in_a || in_b,
        }
    }

    pub fn collisions_along(&self, ray: &Ray) -> HitList {
        let roots_a = Self::child_roots(&self.a, ray);
        let roots_b = Self::child_roots(&self.b, ray);
        let mut hits = HitList::new();
        // walk every boundary; δ strides over root multiplicity noise
        let delta = EPSILON / 2.0;
        for (owner_is_b, boundary) in roots_a
            .iter()
            .map(|h| (false, h))
            .chain(roots_b.iter().map(|h| (true, h)))
        {
            let t = boundary.t;
            let before = self.combine(
                Self::inside(&roots_a, t - delta),
                Self::inside(&roots_b, t - delta),
            );
            let after = self.combine(
                Self::inside(&roots_a, t + delta),
                Self::inside(&roots_b, t + delta),
            );
            if before != after {
                let mut hit = *boundary;
                if owner_is_b && self.op == OverlapOp::Subtractive {
                    hit.normal = -hit.normal;
                }
                hits.push(hit);
            }
        }
        hits.sort_by(|a, b| a.t.partial_cmp(&b.t).expect("finite roots"));
        hits
    }

    /// Containment of a composite-space point in one child, by parity along
    /// a probe ray.
    fn contains(child: &Object, p: Point3) -> bool {
        let probe = Ray::new(p, Vector3::unit_x());
        let roots = Self::child_roots(child, &probe);
        Self::inside(&roots, 0.0)
    }

    pub fn normal_at(&self, p: Point3) -> Vector3 {
        let on_a = self.a.shape.is_surface_point(self.a.pose.reverse_point(p));
        let on_b = self.b.shape.is_surface_point(self.b.pose.reverse_point(p));
        if on_a {
            let n = self.a.pose.reverse_point(p);
            return self.a.pose.forward_vector(self.a.shape.normal_at(n)).normalized();
        }
        if on_b {
            let n = self.b.pose.reverse_point(p);
            let normal = self.b.pose.forward_vector(self.b.shape.normal_at(n)).normalized();
            return if self.op == OverlapOp::Subtractive {
                -normal
            } else {
                normal
            };
        }
        Vector3::zero()
    }

    pub fn is_surface_point(&self, p: Point3) -> bool {
        let on_a = self.a.shape.is_surface_point(self.a.pose.reverse_point(p));
        let on_b = self.b.shape.is_surface_point(self.b.pose.reverse_point(p));
        let in_a = Self::contains(&self.a, p);
        let in_b = Self::contains(&self.b, p);
        match self.op {
            OverlapOp::Inclusive => (on_a && (in_b || on_b)) || (on_b && (in_a || on_a)),
            OverlapOp::Subtractive => (on_a && !in_b) || (on_b && in_a),
            OverlapOp::Additive => (on_a && !in_b) || (on_b && !in_a),
        }
    }

    pub fn map(&self, p: Point3) -> Point2 {
        if self.a.shape.is_surface_point(self.a.pose.reverse_point(p)) {
            self.a.shape.map(self.a.pose.reverse_point(p))
        } else {
            self.b.shape.map(self.b.pose.reverse_point(p))
        }
    }

    pub fn object_extent(&self) -> Real {
        let reach = |o: &Object| {
            let e = o.shape.object_extent();
            if e.is_infinite() {
                return Real::INFINITY;
            }
            let s = o.pose.scaling();
            o.pose.position().as_vector().magnitude() + e * s.x.abs().max(s.y.abs()).max(s.z.abs())
        };
        match self.op {
            // anything cut or intersected stays within A's reach
            OverlapOp::Inclusive | OverlapOp::Subtractive => reach(&self.a),
            OverlapOp::Additive => reach(&self.a).max(reach(&self.b)),
        }
    }
}
