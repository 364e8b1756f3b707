//! An ordered collection of child objects sharing one pose. The group's own
//! transform (applied at the [`Object`] layer) moves, spins, and scales the
//! whole arrangement around the group origin; children keep their poses
//! relative to it.

use super::{HitList, Object, Overlap};
use crate::math::{Point2, Point3, Ray, Vector3};
use crate::precision::Real;

#[derive(Debug, Clone, Default)]
pub struct Group {
    pub children: Vec<Object>,
}

impl Group {
    pub fn new(children: Vec<Object>) -> Self {
        Self { children }
    }

    pub fn push(&mut self, child: Object) {
        self.children.push(child);
    }

    pub fn collisions_along(&self, ray: &Ray) -> HitList {
        let mut hits = HitList::new();
        for child in &self.children {
            hits.extend(Overlap::child_roots(child, ray));
        }
        hits.sort_by(|a, b| a.t.partial_cmp(&b.t).expect("finite roots"));
        hits
    }

    fn owner_of(&self, p: Point3) -> Option<&Object> {
        self.children
            .iter()
            .find(|c| c.shape.is_surface_point(c.pose.reverse_point(p)))
    }

    pub fn normal_at(&self, p: Point3) -> Vector3 {
        match self.owner_of(p) {
            Some(child) => child
                .pose
                .forward_vector(child.shape.normal_at(child.pose.reverse_point(p)))
                .normalized(),
            None => Vector3::zero(),
        }
    }

    pub fn is_surface_point(&self, p: Point3) -> bool {
        self.owner_of(p).is_some()
    }

    pub fn map(&self, p: Point3) -> Point2 {
        match self.owner_of(p) {
            Some(child) => child.shape.map(child.pose.reverse_point(p)),
            None => Point2::new(0.0, 0.0),
        }
    }

    pub fn object_extent(&self) -> Real {
        let mut extent: Real = 0.0;
        for child in &self.children {
            let e = child.shape.object_extent();
            if e.is_infinite() {
                return Real::INFINITY;
            }
            let s = child.pose.scaling();
            let reach = child.pose.position().as_vector().magnitude()
                + e * s.x.abs().max(s.y.abs()).max(s.z.abs());
            extent = extent.max(reach);
        }
        extent
    }
}
