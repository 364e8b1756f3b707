//! Flat polygonal primitives: the triangle (Möller–Trumbore) and the general
//! coplanar polygon (plane hit + 2-D point-in-polygon).

use super::{HitList, ObjectHit};
use crate::math::{Point2, Point3, Ray, Vector3};
use crate::precision::{nearly_zero, Real, EPSILON};

// ─── Triangle ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Triangle {
    pub v0: Point3,
    pub v1: Point3,
    pub v2: Point3,
    normal: Vector3,
}

impl Triangle {
    /// Vertices wind counter-clockwise around the front face.
    pub fn new(v0: Point3, v1: Point3, v2: Point3) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalized();
        Self { v0, v1, v2, normal }
    }

    /// Möller–Trumbore: solve for (t, u, v) in one shot, rejecting
    /// barycentrics outside the face.
    fn moller_trumbore(&self, ray: &Ray) -> Option<(Real, Real, Real)> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);
        // the determinant scales with the face area, so the degenerate test
        // cannot use the (much coarser) process epsilon
        if a.abs() < 1e-8 {
            return None;
        }
        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        Some((f * edge2.dot(q), u, v))
    }

    pub fn collisions_along(&self, ray: &Ray) -> HitList {
        let mut hits = HitList::new();
        if let Some((t, _, _)) = self.moller_trumbore(ray) {
            hits.push(ObjectHit::new(t, ray.solve(t), self.normal));
        }
        hits
    }

    pub fn normal_at(&self, _p: Point3) -> Vector3 {
        self.normal
    }

    pub fn is_surface_point(&self, p: Point3) -> bool {
        // on the carrier plane, and barycentrics inside the face
        if !nearly_zero((p - self.v0).dot(self.normal)) {
            return false;
        }
        let (u, v) = self.barycentric(p);
        u >= -EPSILON && v >= -EPSILON && u + v <= 1.0 + EPSILON
    }

    fn barycentric(&self, p: Point3) -> (Real, Real) {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        let w = p - self.v0;
        let d11 = e1.quadrance();
        let d12 = e1.dot(e2);
        let d22 = e2.quadrance();
        let dw1 = w.dot(e1);
        let dw2 = w.dot(e2);
        let denom = d11 * d22 - d12 * d12;
        if nearly_zero(denom) {
            return (-1.0, -1.0);
        }
        let u = (d22 * dw1 - d12 * dw2) / denom;
        let v = (d11 * dw2 - d12 * dw1) / denom;
        (u, v)
    }

    /// Barycentric (u, v) directly as the texture pair.
    pub fn map(&self, p: Point3) -> Point2 {
        let (u, v) = self.barycentric(p);
        Point2::new(u.clamp(0.0, 1.0), v.clamp(0.0, 1.0))
    }

    pub fn object_extent(&self) -> Real {
        [self.v0, self.v1, self.v2]
            .iter()
            .map(|p| p.as_vector().magnitude())
            .fold(0.0, Real::max)
    }
}

// ─── Polygon ────────────────────────────────────────────────────────────────

/// N coplanar vertices, counter-clockwise around the front face.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub vertices: Vec<Point3>,
    normal: Vector3,
    /// the two axes the even-odd test projects onto (the dominant normal
    /// axis is dropped)
    axes: (usize, usize),
}

impl Polygon {
    pub fn new(vertices: Vec<Point3>) -> Self {
        debug_assert!(vertices.len() >= 3, "a polygon needs at least 3 vertices");
        // Newell's method tolerates slightly noisy coplanarity
        let mut n = Vector3::zero();
        for i in 0..vertices.len() {
            let a = vertices[i];
            let b = vertices[(i + 1) % vertices.len()];
            n.x += (a.y - b.y) * (a.z + b.z);
            n.y += (a.z - b.z) * (a.x + b.x);
            n.z += (a.x - b.x) * (a.y + b.y);
        }
        let normal = n.normalized();
        let axes = if normal.z.abs() >= normal.x.abs() && normal.z.abs() >= normal.y.abs() {
            (0, 1)
        } else if normal.x.abs() >= normal.y.abs() {
            (1, 2)
        } else {
            (0, 2)
        };
        Self {
            vertices,
            normal,
            axes,
        }
    }

    /// Even-odd crossing test in the projected plane.
    fn contains_projected(&self, p: Point3) -> bool {
        let (a0, a1) = self.axes;
        let (px, py) = (p[a0], p[a1]);
        let mut inside = false;
        let n = self.vertices.len();
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = (self.vertices[i][a0], self.vertices[i][a1]);
            let (xj, yj) = (self.vertices[j][a0], self.vertices[j][a1]);
            if (yi > py) != (yj > py) {
                let x_cross = xi + (py - yi) / (yj - yi) * (xj - xi);
                if px < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    pub fn collisions_along(&self, ray: &Ray) -> HitList {
        let mut hits = HitList::new();
        let denom = ray.direction.dot(self.normal);
        if nearly_zero(denom) {
            return hits;
        }
        let t = (self.vertices[0] - ray.origin).dot(self.normal) / denom;
        let p = ray.solve(t);
        if self.contains_projected(p) {
            hits.push(ObjectHit::new(t, p, self.normal));
        }
        hits
    }

    pub fn normal_at(&self, _p: Point3) -> Vector3 {
        self.normal
    }

    pub fn is_surface_point(&self, p: Point3) -> bool {
        nearly_zero((p - self.vertices[0]).dot(self.normal)) && self.contains_projected(p)
    }

    /// Projects into the polygon's own bounding rectangle.
    pub fn map(&self, p: Point3) -> Point2 {
        let (a0, a1) = self.axes;
        let (mut min0, mut max0) = (Real::INFINITY, Real::NEG_INFINITY);
        let (mut min1, mut max1) = (Real::INFINITY, Real::NEG_INFINITY);
        for v in &self.vertices {
            min0 = min0.min(v[a0]);
            max0 = max0.max(v[a0]);
            min1 = min1.min(v[a1]);
            max1 = max1.max(v[a1]);
        }
        let span0 = (max0 - min0).max(EPSILON);
        let span1 = (max1 - min1).max(EPSILON);
        Point2::new(
            ((p[a0] - min0) / span0).clamp(0.0, 1.0),
            ((p[a1] - min1) / span1).clamp(0.0, 1.0),
        )
    }

    pub fn object_extent(&self) -> Real {
        self.vertices
            .iter()
            .map(|p| p.as_vector().magnitude())
            .fold(0.0, Real::max)
    }
}
