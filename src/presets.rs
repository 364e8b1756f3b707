//! Built-in scene presets for the CLI, so a first render is one flag away.

use crate::camera::Camera;
use crate::color::{colors, Color};
use crate::error::Result;
use crate::lights::{intensities, Light};
use crate::math::{Point3, Vector3};
use crate::mediums::{self, Medium, Texture};
use crate::objects::{
    Cone, Cuboid, Cylinder, Object, Overlap, OverlapOp, Plane, Pyramid, Ring, Shape, Sphere, Torus,
};
use crate::precision::{Angle, Real, TAU};
use crate::scene::Scene;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Available built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScenePreset {
    /// Hero spheres (matte, metal, glass) over a checkerboard floor.
    Showcase,
    /// One primitive of every kind arranged in a ring.
    Gallery,
    /// Boolean solids: a lens, a bitten sphere, and a merged pair.
    Csg,
    /// A single lit sphere on a floor — the quickest sanity render.
    Minimal,
    /// Two hundred seeded random spheres to lean on the octree.
    Stress,
}

impl ScenePreset {
    pub fn name(self) -> &'static str {
        match self {
            ScenePreset::Showcase => "showcase",
            ScenePreset::Gallery => "gallery",
            ScenePreset::Csg => "csg",
            ScenePreset::Minimal => "minimal",
            ScenePreset::Stress => "stress",
        }
    }

    /// Builds the scene and a camera for it. `height`/`width`/`fov` come
    /// from the CLI.
    pub fn build(self, height: usize, width: usize, fov: Angle) -> Result<(Scene, Camera)> {
        let mut camera = Camera::new(height, width, fov)?;
        let mut scene = Scene::new();
        match self {
            ScenePreset::Showcase => build_showcase(&mut scene, &mut camera),
            ScenePreset::Gallery => build_gallery(&mut scene, &mut camera),
            ScenePreset::Csg => build_csg(&mut scene, &mut camera),
            ScenePreset::Minimal => build_minimal(&mut scene, &mut camera),
            ScenePreset::Stress => build_stress(&mut scene, &mut camera),
        }
        scene.rebuild_octree();
        Ok((scene, camera))
    }
}

fn checker_floor(scene: &mut Scene) {
    let mut floor = Object::new(
        Shape::Plane(Plane::new(2.0)),
        Arc::new(mediums::checkerboard(
            2.0,
            Color::new(0.05, 0.05, 0.05),
            Color::new(0.9, 0.9, 0.9),
        )),
    );
    floor.pose = Plane::pose_through(Point3::origin(), Vector3::unit_z());
    scene.add_object(floor);
}

fn sun(scene: &mut Scene) {
    scene.add_light(Light::beam(
        Vector3::new(0.3, -0.2, -1.0),
        colors::WHITE,
        intensities::NOMINAL,
    ));
}

fn build_showcase(scene: &mut Scene, camera: &mut Camera) {
    scene.background = Color::new(0.5, 0.7, 0.9);
    checker_floor(scene);

    scene.add_object(
        Object::new(
            Shape::Sphere(Sphere::new(1.0)),
            Arc::new(mediums::plain(
                Color::new(0.7, 0.15, 0.15),
                mediums::smoothness::BARELY,
                mediums::roughness::MEDIUM,
            )),
        )
        .at(Point3::new(0.0, 2.5, 1.0)),
    );
    scene.add_object(
        Object::new(
            Shape::Sphere(Sphere::new(1.0)),
            Arc::new(mediums::metals::silver()),
        )
        .at(Point3::new(0.0, -2.5, 1.0)),
    );
    scene.add_object(
        Object::new(Shape::Sphere(Sphere::new(1.0)), Arc::new(mediums::glass()))
            .at(Point3::new(0.0, 0.0, 1.0)),
    );
    scene.add_object(
        Object::new(
            Shape::Torus(Torus::new(1.6, 0.35)),
            Arc::new(mediums::metals::bronze()),
        )
        .at(Point3::new(3.0, 0.0, 0.4)),
    );

    sun(scene);
    scene.add_light(Light::bulb(
        Point3::new(-3.0, 3.0, 6.0),
        0.8,
        colors::WHITE,
        intensities::BRIGHT,
    ));
    camera.move_to(Point3::new(-7.0, 0.0, 2.5), Point3::new(0.0, 0.0, 1.0));
}

fn build_gallery(scene: &mut Scene, camera: &mut Camera) {
    scene.background = Color::new(0.12, 0.12, 0.16);
    checker_floor(scene);

    let marble = Arc::new(mediums::marble(
        7,
        Color::new(0.9, 0.9, 0.85),
        Color::new(0.25, 0.2, 0.3),
    ));
    let spots: [(Shape, Arc<Medium>); 6] = [
        (
            Shape::Sphere(Sphere::new(0.8)),
            Arc::new(mediums::plain(
                colors::RED,
                mediums::smoothness::SMALL,
                mediums::roughness::MEDIUM,
            )),
        ),
        (Shape::Cuboid(Cuboid::cube(0.7)), marble),
        (
            Shape::Cylinder(Cylinder::new(0.5, 0.8)),
            Arc::new(mediums::metals::copper()),
        ),
        (
            Shape::Cone(Cone::new(0.7, 1.4)),
            Arc::new(mediums::plain(
                colors::GREEN,
                mediums::smoothness::NONE,
                mediums::roughness::LOOSE,
            )),
        ),
        (
            Shape::Torus(Torus::new(0.7, 0.25)),
            Arc::new(mediums::metals::gold()),
        ),
        (
            Shape::Pyramid(Pyramid::new(1.2)),
            Arc::new(mediums::plain(
                colors::BLUE,
                mediums::smoothness::BARELY,
                mediums::roughness::MEDIUM,
            )),
        ),
    ];
    let count = spots.len();
    for (i, (shape, medium)) in spots.into_iter().enumerate() {
        let angle = TAU * i as Real / count as Real;
        let base = Point3::new(3.0 * angle.cos(), 3.0 * angle.sin(), 0.9);
        scene.add_object(Object::new(shape, medium).at(base));
    }
    // a striped disc as the centerpiece pedestal
    let mut dais = Object::new(
        Shape::Ring(Ring::disc(1.2)),
        Arc::new(Medium {
            diffuse: colors::ORANGE,
            texture: Texture::Diagonal {
                scale: 0.3,
                other: colors::DARK_GREY,
            },
            ..Medium::default()
        }),
    );
    dais.pose = Plane::pose_through(Point3::new(0.0, 0.0, 0.02), Vector3::unit_z());
    scene.add_object(dais);

    sun(scene);
    scene.add_light(Light::spot(
        Point3::new(0.0, 0.0, 8.0),
        Vector3::new(0.0, 0.0, -1.0),
        Angle::Degrees(30.0),
        colors::WHITE,
        intensities::BRIGHT,
    ));
    camera.move_to(Point3::new(-8.0, -4.0, 4.0), Point3::new(0.0, 0.0, 0.8));
}

fn build_csg(scene: &mut Scene, camera: &mut Camera) {
    scene.background = Color::new(0.1, 0.14, 0.18);
    checker_floor(scene);

    let solid = |color: Color| {
        Arc::new(mediums::plain(
            color,
            mediums::smoothness::SMALL,
            mediums::roughness::MEDIUM,
        ))
    };
    let part = |shape: Shape, at: Point3| Object::new(shape, mediums::dull()).at(at);

    // lens: two offset spheres intersected
    let lens = Overlap::new(
        OverlapOp::Inclusive,
        part(Shape::Sphere(Sphere::new(1.0)), Point3::new(-0.45, 0.0, 0.0)),
        part(Shape::Sphere(Sphere::new(1.0)), Point3::new(0.45, 0.0, 0.0)),
    );
    scene.add_object(
        Object::new(Shape::Overlap(Box::new(lens)), solid(colors::CYAN))
            .at(Point3::new(0.0, 2.6, 1.0)),
    );

    // bitten: a sphere with a cube carved out
    let bitten = Overlap::new(
        OverlapOp::Subtractive,
        part(Shape::Sphere(Sphere::new(1.0)), Point3::origin()),
        part(Shape::Cuboid(Cuboid::cube(0.75)), Point3::new(0.6, 0.6, 0.6)),
    );
    scene.add_object(
        Object::new(Shape::Overlap(Box::new(bitten)), solid(colors::ORANGE))
            .at(Point3::new(0.0, 0.0, 1.0)),
    );

    // merged: a sphere unioned with a torus
    let merged = Overlap::new(
        OverlapOp::Additive,
        part(Shape::Sphere(Sphere::new(0.7)), Point3::origin()),
        part(Shape::Torus(Torus::new(0.9, 0.25)), Point3::origin()),
    );
    scene.add_object(
        Object::new(Shape::Overlap(Box::new(merged)), solid(colors::MAGENTA))
            .at(Point3::new(0.0, -2.6, 1.0)),
    );

    sun(scene);
    camera.move_to(Point3::new(-6.5, 0.0, 2.2), Point3::new(0.0, 0.0, 1.0));
}

fn build_minimal(scene: &mut Scene, camera: &mut Camera) {
    scene.background = Color::new(0.5, 0.7, 0.9);
    checker_floor(scene);
    scene.add_object(
        Object::new(
            Shape::Sphere(Sphere::new(1.0)),
            Arc::new(mediums::metals::steel()),
        )
        .at(Point3::new(0.0, 0.0, 1.0)),
    );
    sun(scene);
    camera.move_to(Point3::new(-5.0, 0.0, 1.5), Point3::new(0.0, 0.0, 1.0));
}

fn build_stress(scene: &mut Scene, camera: &mut Camera) {
    scene.background = Color::new(0.05, 0.05, 0.08);
    // a fixed seed keeps the stress scene identical across runs
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let center = Point3::new(
            rng.gen_range(-25.0..25.0),
            rng.gen_range(-25.0..25.0),
            rng.gen_range(-25.0..25.0),
        );
        let radius = rng.gen_range(0.3..1.2);
        let tint = Color::new(
            rng.gen_range(0.2..1.0),
            rng.gen_range(0.2..1.0),
            rng.gen_range(0.2..1.0),
        );
        scene.add_object(
            Object::new(
                Shape::Sphere(Sphere::new(radius)),
                Arc::new(mediums::plain(
                    tint,
                    mediums::smoothness::BARELY,
                    mediums::roughness::MEDIUM,
                )),
            )
            .at(center),
        );
    }
    sun(scene);
    scene.add_light(Light::speck(
        Point3::new(0.0, 0.0, 40.0),
        colors::WHITE,
        intensities::BLINDING,
    ));
    camera.move_to(Point3::new(-60.0, 0.0, 10.0), Point3::origin());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_builds() {
        for preset in [
            ScenePreset::Showcase,
            ScenePreset::Gallery,
            ScenePreset::Csg,
            ScenePreset::Minimal,
            ScenePreset::Stress,
        ] {
            let (scene, camera) = preset.build(20, 30, Angle::Degrees(60.0)).unwrap();
            assert!(scene.object_count() > 0, "{} is empty", preset.name());
            assert!(scene.light_count() > 0);
            assert_eq!(camera.width(), 30);
        }
    }

    #[test]
    fn stress_scene_is_reproducible() {
        let (a, _) = ScenePreset::Stress.build(10, 10, Angle::Degrees(60.0)).unwrap();
        let (b, _) = ScenePreset::Stress.build(10, 10, Angle::Degrees(60.0)).unwrap();
        assert_eq!(a.object_count(), b.object_count());
        for i in 0..a.object_count() {
            assert_eq!(a.object(i).pose.position(), b.object(i).pose.position());
        }
    }
}
