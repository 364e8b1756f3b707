//! The infinite plane, and the pose helper that orients one.
//!
//! In object space every plane is `z = 0` with normal +Z; position and
//! orientation live entirely in the pose.

use super::{HitList, ObjectHit};
use crate::mapping;
use crate::math::{Point2, Point3, Ray, Vector3};
use crate::precision::{nearly_zero, Angle, Real, PI};
use crate::transform::{axis_rotation, Transform};

#[derive(Debug, Clone)]
pub struct Plane {
    /// World units per texture tile for the planar mapping.
    pub surface_scale: Real,
}

impl Plane {
    pub fn new(surface_scale: Real) -> Self {
        Self { surface_scale }
    }

    /// Builds the pose that carries the canonical `z = 0` plane onto the
    /// plane through `point` with the given normal.
    pub fn pose_through(point: Point3, normal: Vector3) -> Transform {
        let n = normal.normalized();
        let z = Vector3::unit_z();
        let mut pose = Transform::at(point);
        let axis = z.cross(n);
        if axis.is_null() {
            if n.dot(z) < 0.0 {
                // anti-parallel: flip over X
                pose.set_rotation_axis_angle(Vector3::unit_x(), Angle::Radians(PI));
            }
        } else {
            let angle = z.dot(n).clamp(-1.0, 1.0).acos();
            pose.set_rotation_matrix(axis_rotation(axis.normalized(), Angle::Radians(angle)))
                .expect("axis rotation is orthonormal");
        }
        pose
    }

    pub fn collisions_along(&self, ray: &Ray) -> HitList {
        let mut hits = HitList::new();
        let denom = ray.direction.z;
        if nearly_zero(denom) {
            // parallel: no crossing, even when the ray lies in the plane
            return hits;
        }
        let t = -ray.origin.z / denom;
        let p = ray.solve(t);
        hits.push(ObjectHit::new(t, p, Vector3::unit_z()));
        hits
    }

    pub fn normal_at(&self, _p: Point3) -> Vector3 {
        Vector3::unit_z()
    }

    pub fn is_surface_point(&self, p: Point3) -> bool {
        nearly_zero(p.z)
    }

    pub fn map(&self, p: Point3) -> Point2 {
        mapping::planar(p, self.surface_scale)
    }
}
