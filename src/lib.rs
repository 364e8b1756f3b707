//! # lumen
//!
//! A physically inspired CPU ray tracer: a small linear-algebra runtime, a
//! polymorphic primitive set (spheres through quartic tori and CSG
//! booleans), Phong/Fresnel shading with Beer absorption, an octree over
//! object bounds, and a row-parallel renderer that writes PPM/PAM/TGA.
//!
//! ## Architecture
//!
//! Leaves first: `precision` (scalar + angle kernel), `matrix` and `solvers`
//! (the quartic solver is what makes the torus possible), `math`
//! (vector/point/ray), `transform` (poses), `bounds` + `octree` (culling),
//! `color` + `laws` + `noise` + `mapping` (shading support), then the three
//! sum-type hierarchies (`objects`, `mediums`, `lights`), the `camera`, the
//! `image` plane, and the `scene` integrator on top.
//!
//! Every pixel is independent: the scene is immutable during a render and
//! the workers own disjoint pixels, so the deterministic sampling stencil
//! renders bit-identical images at any thread count.
//!
//! ```no_run
//! use lumen::prelude::*;
//!
//! let mut scene = Scene::new();
//! scene.add_object(Object::new(
//!     Shape::Sphere(Sphere::new(1.0)),
//!     lumen::mediums::dull(),
//! ));
//! scene.add_light(Light::beam(Vector3::new(0.0, 0.0, -1.0), colors::WHITE, 1.0));
//! scene.rebuild_octree();
//!
//! let mut camera = Camera::new(120, 160, Angle::Degrees(70.0)).unwrap();
//! camera.move_to(Point3::new(-5.0, 0.0, 1.0), Point3::origin());
//! let image = scene.render(&camera, &RenderConfig::default());
//! image.write_ppm("sphere.ppm").unwrap();
//! ```

pub mod bounds;
pub mod camera;
pub mod color;
pub mod error;
pub mod image;
pub mod laws;
pub mod lights;
pub mod mapping;
pub mod math;
pub mod matrix;
pub mod mediums;
pub mod noise;
pub mod obj_parser;
pub mod objects;
pub mod octree;
pub mod precision;
pub mod presets;
pub mod scene;
pub mod solvers;
pub mod transform;

/// The names almost every scene-building program wants.
pub mod prelude {
    pub use crate::bounds::Bounds;
    pub use crate::camera::{Camera, StereoCamera, StereoLayout};
    pub use crate::color::{colors, Color, Space};
    pub use crate::error::{Error, Result};
    pub use crate::image::Image;
    pub use crate::lights::{intensities, Light};
    pub use crate::math::{Point2, Point3, Ray, Vector2, Vector3};
    pub use crate::mediums::{Medium, Texture};
    pub use crate::objects::{
        Cone, Cuboid, Cylinder, Group, Model, Object, Overlap, OverlapOp, Plane, Polygon, Pyramid,
        Quadric, Ring, Shape, Sphere, Square, Torus, Triangle, Wall,
    };
    pub use crate::precision::{Angle, Real, EPSILON};
    pub use crate::scene::{RenderConfig, Scene, SceneHit};
    pub use crate::transform::Transform;
}
