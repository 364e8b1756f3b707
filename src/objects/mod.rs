//! The primitive hierarchy.
//!
//! Geometry is a closed set of variants, so the hierarchy is a tagged enum
//! ([`Shape`]) rather than a trait-object tree; dispatch happens in one match
//! per call site and the hot loops monomorphize. An [`Object`] is a shape
//! plus a pose and a medium.
//!
//! The space discipline is strict: every shape solves its intersection in
//! object space. The one public entry point, [`Object::intersect`], reverse-
//! transforms the world ray, runs [`Shape::collisions_along`], picks the
//! smallest positive parameter, and forward-transforms the point and normal
//! back out. Because the pose is affine, the ray parameter is the same number
//! in both spaces, so hits from different objects compare directly.

mod cone;
mod cuboid;
mod cylinder;
mod group;
mod model;
mod overlap;
mod plane;
mod pyramid;
mod quadric;
mod ring;
mod sphere;
mod square;
mod torus;
mod triangle;
mod wall;

pub use cone::Cone;
pub use cuboid::Cuboid;
pub use cylinder::Cylinder;
pub use group::Group;
pub use model::Model;
pub use overlap::{Overlap, OverlapOp};
pub use plane::Plane;
pub use pyramid::Pyramid;
pub use quadric::Quadric;
pub use ring::Ring;
pub use sphere::Sphere;
pub use square::Square;
pub use torus::Torus;
pub use triangle::{Polygon, Triangle};
pub use wall::Wall;

use crate::bounds::Bounds;
use crate::math::{Point2, Point3, Ray, Vector3};
use crate::mediums::Medium;
use crate::precision::{Real, EPSILON};
use crate::transform::Transform;
use smallvec::SmallVec;
use std::sync::Arc;

/// What a ray/shape collision produced geometrically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    /// No contact.
    Miss,
    /// The usual case: a single surface point.
    Point(Point3),
    /// The ray's entire line lies in the surface.
    Line(Ray),
    /// The ray enters the surface and stays (a grazing half-line).
    Ray(Ray),
    /// Contact reported by a composite rather than a single surface.
    Object,
}

/// One root of a shape's intersection polynomial, in object space.
#[derive(Debug, Clone, Copy)]
pub struct ObjectHit {
    /// Ray parameter of the root (the ray's own parameterization).
    pub t: Real,
    /// Surface point at the root.
    pub point: Point3,
    /// Unit outward surface normal at the root. The null vector marks points
    /// with no meaningful normal (a wall interior).
    pub normal: Vector3,
}

impl ObjectHit {
    pub fn new(t: Real, point: Point3, normal: Vector3) -> Self {
        Self { t, point, normal }
    }
}

/// Per-primitive hit lists are small and bounded (a quartic has at most four
/// roots), so they live inline on the stack.
pub type HitList = SmallVec<[ObjectHit; 4]>;

/// A world-space surface hit, ready for shading.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit {
    pub intersect: Intersection,
    /// Ray parameter of the hit.
    pub distance: Real,
    /// Hit point in world space.
    pub point: Point3,
    /// Hit point in object space, for volumetric texturing.
    pub object_point: Point3,
    /// Unit normal in world space, facing the ray origin for closed shapes.
    pub normal: Vector3,
}

/// Every primitive the tracer knows how to intersect.
#[derive(Debug, Clone)]
pub enum Shape {
    Plane(Plane),
    Square(Square),
    Ring(Ring),
    Sphere(Sphere),
    Cuboid(Cuboid),
    Cylinder(Cylinder),
    Cone(Cone),
    Torus(Torus),
    Triangle(Triangle),
    Polygon(Polygon),
    Quadric(Quadric),
    Pyramid(Pyramid),
    Wall(Wall),
    Overlap(Box<Overlap>),
    Group(Group),
    Model(Model),
}

impl Shape {
    /// All intersection roots along an object-space ray, in parameter order.
    /// Includes roots behind the origin — CSG needs them.
    pub fn collisions_along(&self, ray: &Ray) -> HitList {
        match self {
            Shape::Plane(s) => s.collisions_along(ray),
            Shape::Square(s) => s.collisions_along(ray),
            Shape::Ring(s) => s.collisions_along(ray),
            Shape::Sphere(s) => s.collisions_along(ray),
            Shape::Cuboid(s) => s.collisions_along(ray),
            Shape::Cylinder(s) => s.collisions_along(ray),
            Shape::Cone(s) => s.collisions_along(ray),
            Shape::Torus(s) => s.collisions_along(ray),
            Shape::Triangle(s) => s.collisions_along(ray),
            Shape::Polygon(s) => s.collisions_along(ray),
            Shape::Quadric(s) => s.collisions_along(ray),
            Shape::Pyramid(s) => s.collisions_along(ray),
            Shape::Wall(s) => s.collisions_along(ray),
            Shape::Overlap(s) => s.collisions_along(ray),
            Shape::Group(s) => s.collisions_along(ray),
            Shape::Model(s) => s.collisions_along(ray),
        }
    }

    /// Unit outward normal at an object-space surface point.
    pub fn normal_at(&self, p: Point3) -> Vector3 {
        match self {
            Shape::Plane(s) => s.normal_at(p),
            Shape::Square(s) => s.normal_at(p),
            Shape::Ring(s) => s.normal_at(p),
            Shape::Sphere(s) => s.normal_at(p),
            Shape::Cuboid(s) => s.normal_at(p),
            Shape::Cylinder(s) => s.normal_at(p),
            Shape::Cone(s) => s.normal_at(p),
            Shape::Torus(s) => s.normal_at(p),
            Shape::Triangle(s) => s.normal_at(p),
            Shape::Polygon(s) => s.normal_at(p),
            Shape::Quadric(s) => s.normal_at(p),
            Shape::Pyramid(s) => s.normal_at(p),
            Shape::Wall(s) => s.normal_at(p),
            Shape::Overlap(s) => s.normal_at(p),
            Shape::Group(s) => s.normal_at(p),
            Shape::Model(s) => s.normal_at(p),
        }
    }

    /// Distance-to-surface ≤ ε test at an object-space point.
    pub fn is_surface_point(&self, p: Point3) -> bool {
        match self {
            Shape::Plane(s) => s.is_surface_point(p),
            Shape::Square(s) => s.is_surface_point(p),
            Shape::Ring(s) => s.is_surface_point(p),
            Shape::Sphere(s) => s.is_surface_point(p),
            Shape::Cuboid(s) => s.is_surface_point(p),
            Shape::Cylinder(s) => s.is_surface_point(p),
            Shape::Cone(s) => s.is_surface_point(p),
            Shape::Torus(s) => s.is_surface_point(p),
            Shape::Triangle(s) => s.is_surface_point(p),
            Shape::Polygon(s) => s.is_surface_point(p),
            Shape::Quadric(s) => s.is_surface_point(p),
            Shape::Pyramid(s) => s.is_surface_point(p),
            Shape::Wall(s) => s.is_surface_point(p),
            Shape::Overlap(s) => s.is_surface_point(p),
            Shape::Group(s) => s.is_surface_point(p),
            Shape::Model(s) => s.is_surface_point(p),
        }
    }

    /// Texture coordinates in [0,1]² for an object-space surface point.
    pub fn map(&self, p: Point3) -> Point2 {
        match self {
            Shape::Plane(s) => s.map(p),
            Shape::Square(s) => s.map(p),
            Shape::Ring(s) => s.map(p),
            Shape::Sphere(s) => s.map(p),
            Shape::Cuboid(s) => s.map(p),
            Shape::Cylinder(s) => s.map(p),
            Shape::Cone(s) => s.map(p),
            Shape::Torus(s) => s.map(p),
            Shape::Triangle(s) => s.map(p),
            Shape::Polygon(s) => s.map(p),
            Shape::Quadric(s) => s.map(p),
            Shape::Pyramid(s) => s.map(p),
            Shape::Wall(s) => s.map(p),
            Shape::Overlap(s) => s.map(p),
            Shape::Group(s) => s.map(p),
            Shape::Model(s) => s.map(p),
        }
    }

    /// Object-space radius of the shape around its origin, `INFINITY` for
    /// unbounded primitives. Backs the world bounds the octree consumes.
    pub fn object_extent(&self) -> Real {
        match self {
            Shape::Plane(_) | Shape::Wall(_) => Real::INFINITY,
            Shape::Square(s) => s.object_extent(),
            Shape::Ring(s) => s.object_extent(),
            Shape::Sphere(s) => s.object_extent(),
            Shape::Cuboid(s) => s.object_extent(),
            Shape::Cylinder(s) => s.object_extent(),
            Shape::Cone(s) => s.object_extent(),
            Shape::Torus(s) => s.object_extent(),
            Shape::Triangle(s) => s.object_extent(),
            Shape::Polygon(s) => s.object_extent(),
            // paraboloids and hyperboloids are unbounded; the general form
            // cannot tell, so every quadric is treated as infinite
            Shape::Quadric(_) => Real::INFINITY,
            // unbounded below +z despite the finite apex
            Shape::Pyramid(_) => Real::INFINITY,
            Shape::Overlap(s) => s.object_extent(),
            Shape::Group(s) => s.object_extent(),
            Shape::Model(s) => s.object_extent(),
        }
    }

    /// Upper bound on roots a single ray can produce against this shape.
    pub fn max_collisions(&self) -> usize {
        match self {
            Shape::Plane(_) | Shape::Triangle(_) | Shape::Polygon(_) => 1,
            Shape::Square(_) | Shape::Ring(_) => 1,
            Shape::Sphere(_) | Shape::Cylinder(_) | Shape::Cone(_) | Shape::Quadric(_) => 2,
            Shape::Pyramid(_) | Shape::Wall(_) => 2,
            Shape::Torus(_) => 4,
            Shape::Cuboid(_) => 6,
            Shape::Overlap(_) | Shape::Group(_) | Shape::Model(_) => usize::MAX,
        }
    }

    /// Whether the interior has a well-defined inside/outside. CSG children
    /// must be closed.
    pub fn is_closed(&self) -> bool {
        match self {
            Shape::Sphere(_) | Shape::Cuboid(_) | Shape::Torus(_) => true,
            Shape::Cone(s) => s.is_closed(),
            Shape::Cylinder(s) => s.is_closed(),
            Shape::Quadric(_) => true,
            Shape::Wall(_) => true,
            Shape::Overlap(_) => true,
            _ => false,
        }
    }
}

/// A shape placed in the world with a pose and a surface medium.
#[derive(Debug, Clone)]
pub struct Object {
    pub pose: Transform,
    pub shape: Shape,
    pub medium: Arc<Medium>,
}

impl Object {
    pub fn new(shape: Shape, medium: Arc<Medium>) -> Self {
        Self {
            pose: Transform::new(),
            shape,
            medium,
        }
    }

    pub fn at(mut self, position: Point3) -> Self {
        self.pose.set_position(position);
        self
    }

    /// Nearest valid hit in front of the world ray, if any.
    pub fn intersect(&self, world_ray: &Ray) -> Option<SurfaceHit> {
        let object_ray = self.pose.reverse_ray(*world_ray);
        let hits = self.shape.collisions_along(&object_ray);
        let nearest = hits
            .iter()
            .filter(|h| h.t.is_finite() && h.t > EPSILON)
            .min_by(|a, b| a.t.partial_cmp(&b.t).expect("hit parameters are finite"))?;

        let world_point = self.pose.forward_point(nearest.point);
        let mut world_normal = self.pose.forward_vector(nearest.normal).normalized();
        // a closed shape hit from inside reports the inward face
        if self.shape.is_closed()
            && !world_normal.is_null()
            && world_normal.dot(world_ray.direction) > 0.0
        {
            world_normal = -world_normal;
        }
        Some(SurfaceHit {
            intersect: Intersection::Point(world_point),
            distance: nearest.t,
            point: world_point,
            object_point: nearest.point,
            normal: world_normal,
        })
    }

    /// All object-space roots along an already reverse-transformed ray.
    pub fn collisions_along(&self, object_ray: &Ray) -> HitList {
        self.shape.collisions_along(object_ray)
    }

    /// Unit outward world-space normal at a world-space surface point.
    pub fn normal(&self, world_point: Point3) -> Vector3 {
        let object_point = self.pose.reverse_point(world_point);
        let n = self.shape.normal_at(object_point);
        self.pose.forward_vector(n).normalized()
    }

    pub fn is_surface_point(&self, world_point: Point3) -> bool {
        self.shape.is_surface_point(self.pose.reverse_point(world_point))
    }

    /// Texture coordinates for a world-space surface point, honoring the
    /// medium's reducer override when set.
    pub fn map(&self, world_point: Point3) -> Point2 {
        let object_point = self.pose.reverse_point(world_point);
        match self.medium.reducer {
            Some(reducer) => reducer.reduce(object_point),
            None => self.shape.map(object_point),
        }
    }

    /// Conservative world-space bounds: a box around the pose position with
    /// the object extent stretched by the largest scale component.
    pub fn world_bounds(&self) -> Bounds {
        let extent = self.shape.object_extent();
        if extent.is_infinite() {
            return Bounds::infinite();
        }
        let s = self.pose.scaling();
        let max_scale = s.x.abs().max(s.y.abs()).max(s.z.abs());
        Bounds::centered(self.pose.position(), extent * max_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediums;
    use crate::precision::Angle;

    fn dull_sphere(radius: Real) -> Object {
        Object::new(Shape::Sphere(Sphere::new(radius)), mediums::dull())
    }

    #[test]
    fn intersect_transforms_both_ways() {
        let obj = dull_sphere(2.0).at(Point3::new(0.0, 0.0, 0.0));
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        let hit = obj.intersect(&ray).expect("sphere on axis must hit");
        assert_eq!(hit.point, Point3::new(0.0, 0.0, 2.0));
        assert_eq!(hit.normal, Vector3::unit_z());
        assert!((hit.distance - 3.0).abs() < EPSILON);
    }

    #[test]
    fn translated_object_hits_at_translated_point() {
        let obj = dull_sphere(1.0).at(Point3::new(0.0, 3.0, 0.0));
        let ray = Ray::new(Point3::new(0.0, -3.0, 0.0), Vector3::unit_y());
        let hit = obj.intersect(&ray).unwrap();
        assert_eq!(hit.point, Point3::new(0.0, 2.0, 0.0));
        assert!((hit.distance - 5.0).abs() < EPSILON);
    }

    #[test]
    fn scaled_sphere_becomes_ellipsoid() {
        let mut obj = dull_sphere(1.0);
        obj.pose.set_scale(2.0, 1.0, 1.0).unwrap();
        // along x the surface is at 2
        let ray = Ray::new(Point3::new(5.0, 0.0, 0.0), -Vector3::unit_x());
        let hit = obj.intersect(&ray).unwrap();
        assert_eq!(hit.point, Point3::new(2.0, 0.0, 0.0));
        // along y it stays at 1
        let ray = Ray::new(Point3::new(0.0, 5.0, 0.0), -Vector3::unit_y());
        let hit = obj.intersect(&ray).unwrap();
        assert_eq!(hit.point, Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn normals_face_the_ray_origin_for_closed_shapes() {
        let obj = dull_sphere(1.0);
        // from inside, the reported normal still faces the origin of the ray
        let ray = Ray::new(Point3::origin(), Vector3::unit_x());
        let hit = obj.intersect(&ray).unwrap();
        assert!(hit.normal.dot(ray.direction) < 0.0);
    }

    #[test]
    fn behind_the_origin_is_not_a_hit() {
        let obj = dull_sphere(1.0);
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::unit_z());
        assert!(obj.intersect(&ray).is_none());
    }

    #[test]
    fn rotated_pose_round_trips_normals() {
        let mut obj = Object::new(
            Shape::Cuboid(Cuboid::new(1.0, 1.0, 1.0)),
            mediums::dull(),
        );
        obj.pose
            .set_rotation(Angle::Degrees(0.0), Angle::Degrees(0.0), Angle::Degrees(45.0));
        let ray = Ray::new(Point3::new(5.0, 0.0, 0.0), -Vector3::unit_x());
        let hit = obj.intersect(&ray).unwrap();
        // the yawed cube presents an edge-on face whose normal splits x/y
        assert!(hit.normal.dot(Vector3::unit_x()) > 0.5);
        assert!((hit.normal.magnitude() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn world_bounds_scale_with_pose() {
        let mut obj = dull_sphere(1.0).at(Point3::new(1.0, 2.0, 3.0));
        obj.pose.set_scale(3.0, 1.0, 1.0).unwrap();
        let b = obj.world_bounds();
        assert!(b.contains(Point3::new(4.0, 2.0, 3.0)));
        assert!(!b.is_infinite());
        let plane = Object::new(Shape::Plane(Plane::new(1.0)), mediums::dull());
        assert!(plane.world_bounds().is_infinite());
    }
}
