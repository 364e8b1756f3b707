//! Axis-aligned bounding boxes, the octree's subdivision unit.
//!
//! Degenerate (min == max) boxes are allowed. Infinite primitives — planes,
//! walls, the open cone and cylinder — report the [`Bounds::infinite`]
//! sentinel, which intersects everything and pins them to the octree root.

use crate::math::{Point3, Ray, Vector3};
use crate::precision::Real;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3,
    pub max: Point3,
}

impl Bounds {
    /// Builds a box from componentwise min ≤ max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "Bounds corners out of order"
        );
        Self { min, max }
    }

    /// The sentinel that intersects every ray and every box.
    pub fn infinite() -> Self {
        Self {
            min: Point3::new(Real::NEG_INFINITY, Real::NEG_INFINITY, Real::NEG_INFINITY),
            max: Point3::new(Real::INFINITY, Real::INFINITY, Real::INFINITY),
        }
    }

    /// A box centered on `center` reaching `extent` along every axis.
    pub fn centered(center: Point3, extent: Real) -> Self {
        if extent.is_infinite() {
            return Self::infinite();
        }
        let r = Vector3::new(extent, extent, extent);
        Self::new(center - r, center + r)
    }

    pub fn is_infinite(&self) -> bool {
        self.min.x.is_infinite()
            || self.min.y.is_infinite()
            || self.min.z.is_infinite()
            || self.max.x.is_infinite()
            || self.max.y.is_infinite()
            || self.max.z.is_infinite()
    }

    pub fn center(&self) -> Point3 {
        Point3::new(
            0.5 * (self.min.x + self.max.x),
            0.5 * (self.min.y + self.max.y),
            0.5 * (self.min.z + self.max.z),
        )
    }

    pub fn contains(&self, p: Point3) -> bool {
        self.min.x <= p.x
            && p.x <= self.max.x
            && self.min.y <= p.y
            && p.y <= self.max.y
            && self.min.z <= p.z
            && p.z <= self.max.z
    }

    /// True when `other` fits entirely inside this box.
    pub fn encloses(&self, other: &Bounds) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Slab-method ray test. Divisions by a zero direction component produce
    /// signed infinities, which the min/max folding handles; the ray hits iff
    /// the largest near-t is ≤ the smallest far-t and the far-t is ahead of
    /// the origin.
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        if self.is_infinite() {
            return true;
        }
        let mut t_near = Real::NEG_INFINITY;
        let mut t_far = Real::INFINITY;
        for axis in 0..3 {
            let inv_d = 1.0 / ray.direction[axis];
            let mut t0 = (self.min[axis] - ray.origin[axis]) * inv_d;
            let mut t1 = (self.max[axis] - ray.origin[axis]) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t0.max(t_near);
            t_far = t1.min(t_far);
            if t_near > t_far {
                return false;
            }
        }
        t_far >= 0.0
    }

    /// Pairwise interval overlap on each axis.
    pub fn intersects_bounds(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
            && self.min.z <= other.max.z
            && other.min.z <= self.max.z
    }

    /// The smallest box containing both inputs.
    pub fn surrounding(a: &Bounds, b: &Bounds) -> Bounds {
        Bounds {
            min: Point3::new(
                a.min.x.min(b.min.x),
                a.min.y.min(b.min.y),
                a.min.z.min(b.min.z),
            ),
            max: Point3::new(
                a.max.x.max(b.max.x),
                a.max.y.max(b.max.y),
                a.max.z.max(b.max.z),
            ),
        }
    }

    /// Maps a point to its octant: bit 2 = x ≥ cx, bit 1 = y ≥ cy,
    /// bit 0 = z ≥ cz.
    pub fn octant_of(&self, p: Point3) -> usize {
        let c = self.center();
        (usize::from(p.x >= c.x) << 2) | (usize::from(p.y >= c.y) << 1) | usize::from(p.z >= c.z)
    }

    /// The 8 child boxes produced by splitting at the center, indexed by the
    /// same 3-bit octant code as [`Bounds::octant_of`].
    pub fn split(&self) -> [Bounds; 8] {
        let c = self.center();
        let pick = |bit: bool, lo: Real, mid: Real, hi: Real| -> (Real, Real) {
            if bit {
                (mid, hi)
            } else {
                (lo, mid)
            }
        };
        std::array::from_fn(|i| {
            let (x0, x1) = pick(i & 4 != 0, self.min.x, c.x, self.max.x);
            let (y0, y1) = pick(i & 2 != 0, self.min.y, c.y, self.max.y);
            let (z0, z1) = pick(i & 1 != 0, self.min.z, c.z, self.max.z);
            Bounds::new(Point3::new(x0, y0, z0), Point3::new(x1, y1, z1))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Bounds {
        Bounds::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0))
    }

    #[test]
    fn containment_is_inclusive() {
        let b = unit_box();
        assert!(b.contains(Point3::new(0.0, 0.0, 0.0)));
        assert!(b.contains(Point3::new(2.0, 2.0, 2.0)));
        assert!(b.contains(Point3::new(1.0, 1.0, 1.0)));
        assert!(!b.contains(Point3::new(2.1, 1.0, 1.0)));
    }

    #[test]
    fn ray_hits_through_and_misses_aside() {
        let b = unit_box();
        let hit = Ray::new(Point3::new(1.0, 1.0, -5.0), Vector3::unit_z());
        assert!(b.intersects_ray(&hit));
        let miss = Ray::new(Point3::new(5.0, 5.0, -5.0), Vector3::unit_z());
        assert!(!b.intersects_ray(&miss));
        // behind the origin does not count
        let behind = Ray::new(Point3::new(1.0, 1.0, 5.0), Vector3::unit_z());
        assert!(!b.intersects_ray(&behind));
    }

    #[test]
    fn ray_parallel_to_slab_face() {
        let b = unit_box();
        // runs along x at y=1, z=1: inside the y and z slabs, hits
        let inside = Ray::new(Point3::new(-5.0, 1.0, 1.0), Vector3::unit_x());
        assert!(b.intersects_ray(&inside));
        // runs along x at y=3: outside the y slab, division by zero folds to
        // an empty interval
        let outside = Ray::new(Point3::new(-5.0, 3.0, 1.0), Vector3::unit_x());
        assert!(!b.intersects_ray(&outside));
    }

    #[test]
    fn ray_origin_inside_hits() {
        let b = unit_box();
        let r = Ray::new(Point3::new(1.0, 1.0, 1.0), Vector3::unit_x());
        assert!(b.intersects_ray(&r));
    }

    #[test]
    fn box_overlap() {
        let a = unit_box();
        let b = Bounds::new(Point3::new(1.0, 1.0, 1.0), Point3::new(3.0, 3.0, 3.0));
        let c = Bounds::new(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0));
        assert!(a.intersects_bounds(&b));
        assert!(b.intersects_bounds(&a));
        assert!(!a.intersects_bounds(&c));
        // shared face counts as overlap
        let d = Bounds::new(Point3::new(2.0, 0.0, 0.0), Point3::new(4.0, 2.0, 2.0));
        assert!(a.intersects_bounds(&d));
    }

    #[test]
    fn infinite_sentinel_intersects_everything() {
        let inf = Bounds::infinite();
        assert!(inf.is_infinite());
        assert!(inf.intersects_bounds(&unit_box()));
        let r = Ray::new(Point3::new(1e9, -1e9, 0.0), Vector3::unit_y());
        assert!(inf.intersects_ray(&r));
    }

    #[test]
    fn octant_codes_match_bit_layout() {
        let b = Bounds::new(Point3::new(-70.0, -42.0, -99.0), Point3::new(55.0, 147.0, 22.0));
        assert_eq!(b.center(), Point3::new(-7.5, 52.5, -38.5));
        assert_eq!(b.octant_of(Point3::new(-70.0, -42.0, -99.0)), 0);
        assert_eq!(b.octant_of(Point3::new(-70.0, -42.0, 22.0)), 1);
        assert_eq!(b.octant_of(Point3::new(-70.0, 147.0, -99.0)), 2);
        assert_eq!(b.octant_of(Point3::new(-70.0, 147.0, 22.0)), 3);
        assert_eq!(b.octant_of(Point3::new(55.0, -42.0, -99.0)), 4);
        assert_eq!(b.octant_of(Point3::new(55.0, -42.0, 22.0)), 5);
        assert_eq!(b.octant_of(Point3::new(55.0, 147.0, -99.0)), 6);
        assert_eq!(b.octant_of(Point3::new(55.0, 147.0, 22.0)), 7);
    }

    #[test]
    fn split_octants_tile_the_box() {
        let b = unit_box();
        let sub = b.split();
        assert_eq!(sub[0].min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(sub[0].max, Point3::new(1.0, 1.0, 1.0));
        assert_eq!(sub[1].min, Point3::new(0.0, 0.0, 1.0));
        assert_eq!(sub[3].min, Point3::new(0.0, 1.0, 1.0));
        assert_eq!(sub[7].max, Point3::new(2.0, 2.0, 2.0));
        // each octant's center lands in its own code
        for (i, s) in sub.iter().enumerate() {
            assert_eq!(b.octant_of(s.center()), i);
        }
    }

    #[test]
    fn surrounding_covers_both() {
        let a = unit_box();
        let b = Bounds::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(0.5, 0.5, 0.5));
        let s = Bounds::surrounding(&a, &b);
        assert!(s.encloses(&a));
        assert!(s.encloses(&b));
    }
}
