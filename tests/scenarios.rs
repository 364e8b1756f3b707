//! End-to-end scenarios: literal-input renders and traces that pin the
//! whole pipeline down, from camera casting through octree culling to the
//! recursive shading.

use lumen::prelude::*;
use lumen::laws;
use lumen::mediums::{self, Perturbation};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

fn dull_sphere(radius: Real) -> Object {
    Object::new(Shape::Sphere(Sphere::new(radius)), mediums::dull())
}

// ─── Scenario A: sphere intersection on axis ────────────────────────────────

#[test]
fn scenario_a_sphere_on_axis() {
    let mut scene = Scene::new();
    scene.add_object(dull_sphere(2.0));
    scene.rebuild_octree();

    let mut camera = Camera::new(2, 2, Angle::Degrees(90.0)).unwrap();
    camera.move_to(Point3::new(0.0, 0.0, 5.0), Point3::origin());

    // the image center maps straight down the optical axis
    let center_ray = camera.cast(Point2::new(1.0, 1.0));
    let hits = scene.find_intersections(&center_ray);
    assert!(!hits.is_empty());
    let nearest = scene.nearest_object(&center_ray, &hits).unwrap();
    assert!((nearest.hit.point.z - 2.0).abs() <= 1e-9);
    assert!(nearest.hit.point.x.abs() <= 1e-9);
    assert!(nearest.hit.point.y.abs() <= 1e-9);
}

// ─── Scenario B: plane shadow ───────────────────────────────────────────────

#[test]
fn scenario_b_plane_shadow() {
    let mut scene = Scene::new();
    // pure diffuse white floor with no ambient cheat, so shadow means dark
    let white = Arc::new(Medium {
        ambient_scale: 0.0,
        diffuse: colors::WHITE,
        ..Medium::default()
    });
    let mut floor = Object::new(Shape::Plane(Plane::new(1.0)), white);
    floor.pose = Plane::pose_through(Point3::origin(), Vector3::unit_z());
    scene.add_object(floor);
    scene.add_object(dull_sphere(1.0).at(Point3::new(0.0, 0.0, 3.0)));
    scene.add_light(Light::beam(
        Vector3::new(0.0, 0.0, -1.0),
        colors::WHITE,
        intensities::NOMINAL,
    ));
    scene.rebuild_octree();

    // a low side view whose eye rays miss the occluding sphere
    let eye = Point3::new(6.0, 0.0, 1.0);
    let shadowed = scene.trace(&Ray::new(eye, Point3::origin() - eye), 1);
    assert!(
        shadowed.max_channel() <= 0.05,
        "shadowed point too bright: {:?}",
        shadowed
    );

    let lit_target = Point3::new(3.0, 0.0, 0.0);
    let lit = scene.trace(&Ray::new(eye, lit_target - eye), 1);
    assert!(lit.max_channel() >= 0.4, "lit point too dark: {:?}", lit);
}

// ─── Scenario C: mirror sphere in a checker room ────────────────────────────

#[test]
fn scenario_c_mirror_sphere_second_bounce() {
    let mut scene = Scene::new();
    let checker = Arc::new(Medium {
        ambient_scale: mediums::ambient_scale::GLOWY,
        texture: Texture::Checkerboard {
            scale: 2.0,
            other: colors::RED,
        },
        ambient: colors::WHITE,
        diffuse: colors::WHITE,
        ..Medium::default()
    });
    // an inward-facing cube of checker planes, 10 units across
    let walls: [(Point3, Vector3); 6] = [
        (Point3::new(-5.0, 0.0, 0.0), Vector3::unit_x()),
        (Point3::new(5.0, 0.0, 0.0), -Vector3::unit_x()),
        (Point3::new(0.0, -5.0, 0.0), Vector3::unit_y()),
        (Point3::new(0.0, 5.0, 0.0), -Vector3::unit_y()),
        (Point3::new(0.0, 0.0, -5.0), Vector3::unit_z()),
        (Point3::new(0.0, 0.0, 5.0), -Vector3::unit_z()),
    ];
    for (point, normal) in walls {
        let mut wall = Object::new(Shape::Plane(Plane::new(1.0)), checker.clone());
        wall.pose = Plane::pose_through(point, normal);
        scene.add_object(wall);
    }
    scene.add_object(Object::new(
        Shape::Sphere(Sphere::new(1.0)),
        Arc::new(mediums::mirror()),
    ));
    scene.rebuild_octree();

    let mut camera = Camera::new(9, 9, Angle::Degrees(60.0)).unwrap();
    // slightly off the axis so the bounce lands inside one checker cell
    camera.move_to(Point3::new(-4.0, 0.3, 0.2), Point3::new(0.0, 0.3, 0.2));

    let center_ray = camera.cast(Point2::new(4.5, 4.5));
    let mirrored = scene.trace(&center_ray, 2);

    // reproduce the second bounce by hand
    let first = {
        let hits = scene.find_intersections(&center_ray);
        scene.nearest_object(&center_ray, &hits).unwrap()
    };
    let reflected_dir = laws::reflection(first.hit.normal, center_ray.direction.normalized());
    let bounce = Ray::new(
        first.hit.point + first.hit.normal * lumen::precision::SHADOW_EPSILON,
        reflected_dir,
    );
    let continuation = scene.trace(&bounce, 1);
    assert_eq!(mirrored, continuation, "recursion must mirror the bounce");

    // and the bounce must land on a wall, not fade to background
    let second = {
        let hits = scene.find_intersections(&bounce);
        scene.nearest_object(&bounce, &hits).unwrap()
    };
    assert!(second.object < 6, "second bounce must strike a wall");
    assert!(mirrored.max_channel() > 0.1, "mirror lost the wall color");
}

// ─── Scenario D: refraction bend through a slab ─────────────────────────────

#[test]
fn scenario_d_slab_refraction_displacement() {
    // glass slab of thickness 1 centered at the origin
    let glass_slab = Object::new(
        Shape::Wall(Wall::new(0.5, 1.0)),
        Arc::new(mediums::glass()),
    );
    let eta_glass = 1.5;

    // a ray coming down at 30° from the normal in the xz-plane
    let theta_i: Real = (30.0 as Real).to_radians();
    let direction = Vector3::new(theta_i.sin(), 0.0, -theta_i.cos());
    let origin = Point3::new(-2.0, 0.0, 3.0);
    let ray = Ray::new(origin, direction);

    // entry
    let entry = glass_slab.intersect(&ray).expect("ray must enter the slab");
    let inside_dir = laws::snell(Vector3::unit_z(), direction, 1.0, eta_glass);
    assert!(!inside_dir.is_null());

    // exit: continue inside until the far face
    let inner_ray = Ray::new(
        Point3::new(entry.point.x, entry.point.y, entry.point.z - 1e-12),
        inside_dir.normalized(),
    );
    let exit = glass_slab
        .intersect(&inner_ray)
        .expect("refracted ray must exit the slab");
    let out_dir = laws::snell(Vector3::unit_z(), inside_dir.normalized(), eta_glass, 1.0);
    assert!(!out_dir.is_null());

    // the outgoing direction is parallel to the incoming one
    assert!(out_dir.normalized().cross(direction).magnitude() < 1e-9);

    // closed-form lateral displacement: d·sin(θi − θt)/cos(θt)
    let sin_t = theta_i.sin() / eta_glass;
    let theta_t = sin_t.asin();
    let thickness = 1.0;
    let expected = thickness * (theta_i - theta_t).sin() / theta_t.cos();

    // measured displacement: the drift of the exit point from where the
    // unrefracted ray crosses the exit plane, projected perpendicular to
    // the travel direction
    let t_straight = (origin.z - (-0.5)) / theta_i.cos();
    let straight_exit = ray.distance_along(t_straight);
    let measured = (exit.point.x - straight_exit.x).abs() * theta_i.cos();
    assert!(
        (measured - expected).abs() < 1e-6,
        "displacement {measured} vs closed form {expected}"
    );
}

// ─── Scenario E: torus quartic ──────────────────────────────────────────────

#[test]
fn scenario_e_torus_quartic_roots() {
    let torus = Torus::new(2.0, 0.5);
    let ray = Ray::new(Point3::new(2.01, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
    let hits = torus.collisions_along(&ray);
    assert_eq!(hits.len(), 2, "the vertical ray crosses the tube twice");
    // (√(x²+y²) − R)² + z² = r² at x = 2.01 gives z = ±√(r² − 0.01²)
    let expected = (0.25_f64 - 0.0001).sqrt();
    assert!((hits[0].point.z - expected).abs() < 1e-6);
    assert!((hits[1].point.z + expected).abs() < 1e-6);
}

// ─── Scenario F: octree vs brute force ──────────────────────────────────────

#[test]
fn scenario_f_octree_matches_brute_force() {
    let mut scene = Scene::new();
    let mut rng = SmallRng::seed_from_u64(0xF00D);
    let mut bounds_list = Vec::new();
    for _ in 0..200 {
        let center = Point3::new(
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
        );
        let object = dull_sphere(1.0).at(center);
        bounds_list.push(object.world_bounds());
        scene.add_object(object);
    }

    // brute-force results before the octree exists
    let rays: Vec<Ray> = (0..100)
        .map(|_| {
            let origin = Point3::new(
                rng.gen_range(-80.0..80.0),
                rng.gen_range(-80.0..80.0),
                rng.gen_range(-80.0..80.0),
            );
            let direction = Vector3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            Ray::new(origin, direction)
        })
        .collect();

    let brute: Vec<Vec<usize>> = rays
        .iter()
        .map(|ray| scene.find_intersections(ray).iter().map(|h| h.object).collect())
        .collect();

    scene.rebuild_octree();
    for (ray, expected) in rays.iter().zip(&brute) {
        let culled: Vec<usize> = scene.find_intersections(ray).iter().map(|h| h.object).collect();
        assert_eq!(&culled, expected, "octree changed the hit list");
    }
}

// ─── Properties: determinism and parallel equivalence ───────────────────────

fn pixels_bitwise_equal(a: &Image, b: &Image) -> bool {
    assert_eq!(a.width(), b.width());
    assert_eq!(a.height(), b.height());
    for y in 0..a.height() {
        for x in 0..a.width() {
            let (pa, pb) = (a.at(y, x), b.at(y, x));
            if pa.red.to_bits() != pb.red.to_bits()
                || pa.green.to_bits() != pb.green.to_bits()
                || pa.blue.to_bits() != pb.blue.to_bits()
            {
                return false;
            }
        }
    }
    true
}

fn test_scene() -> (Scene, Camera) {
    lumen::presets::ScenePreset::Showcase
        .build(24, 32, Angle::Degrees(70.0))
        .unwrap()
}

#[test]
fn renders_are_deterministic() {
    let (scene, camera) = test_scene();
    let config = RenderConfig {
        samples: 9,
        ..RenderConfig::default()
    };
    let first = scene.render(&camera, &config);
    let second = scene.render(&camera, &config);
    assert!(pixels_bitwise_equal(&first, &second));
}

#[test]
fn single_and_multi_threaded_renders_agree() {
    let (scene, camera) = test_scene();
    let config = RenderConfig {
        samples: 4,
        ..RenderConfig::default()
    };
    let solo_pool = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap();
    let solo = solo_pool.install(|| scene.render(&camera, &config));
    let parallel = scene.render(&camera, &config);
    assert!(pixels_bitwise_equal(&solo, &parallel));
}

// ─── Properties: normals, round trips, bump stability ───────────────────────

#[test]
fn closed_primitive_normals_point_outward_and_unit() {
    // probe each closed shape with a fan of rays from outside
    // convex closed shapes, where "outward" means away from the center
    let shapes: Vec<Shape> = vec![
        Shape::Sphere(Sphere::new(1.3)),
        Shape::Cuboid(Cuboid::new(1.0, 0.8, 0.6)),
        Shape::Quadric(Quadric::ellipsoid(1.0, 1.2, 0.8)),
    ];
    for shape in shapes {
        let object = Object::new(shape, mediums::dull());
        for i in 0..32 {
            let angle = lumen::precision::TAU * i as Real / 32.0;
            let origin = Point3::new(6.0 * angle.cos(), 6.0 * angle.sin(), 2.5);
            let ray = Ray::new(origin, Point3::origin() - origin);
            if let Some(hit) = object.intersect(&ray) {
                assert!((hit.normal.magnitude() - 1.0).abs() < EPSILON);
                // outward: away from the body center for a frontal hit
                assert!(hit.normal.dot(hit.point - Point3::origin()) >= -EPSILON);
            }
        }
    }
}

#[test]
fn ray_sphere_round_trip_under_random_poses() {
    let mut rng = SmallRng::seed_from_u64(99);
    for _ in 0..100 {
        let center = Point3::new(
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
        );
        let radius = rng.gen_range(0.5..3.0);
        let object = dull_sphere(radius).at(center);
        // aim from a guaranteed-outside origin through the center
        let origin = center + Vector3::new(radius + 5.0, radius + 3.0, radius + 2.0);
        let ray = Ray::new(origin, center - origin);
        let hit = object.intersect(&ray).expect("through-center ray must hit");
        let on_surface = ((hit.point - center).magnitude() - radius).abs();
        assert!(on_surface <= EPSILON, "drifted {on_surface}");
    }
}

#[test]
fn bumpy_medium_still_renders_in_range() {
    let mut scene = Scene::new();
    let bumpy = Arc::new(Medium {
        diffuse: colors::GREEN,
        perturbation: Perturbation::Noise {
            perlin: lumen::noise::Perlin::new(5),
            amplitude: 0.2,
            scale: 0.5,
        },
        ..Medium::default()
    });
    scene.add_object(Object::new(Shape::Sphere(Sphere::new(1.0)), bumpy));
    scene.add_light(Light::speck(
        Point3::new(5.0, 5.0, 5.0),
        colors::WHITE,
        intensities::BRIGHT,
    ));
    scene.rebuild_octree();
    let mut camera = Camera::new(8, 8, Angle::Degrees(60.0)).unwrap();
    camera.move_to(Point3::new(-4.0, 0.0, 0.0), Point3::origin());
    let image = scene.render(&camera, &RenderConfig {
        samples: 4,
        output_space: Space::Linear,
        ..RenderConfig::default()
    });
    for y in 0..image.height() {
        for x in 0..image.width() {
            let c = image.at(y, x);
            assert!(c.red.is_finite() && c.green.is_finite() && c.blue.is_finite());
            assert!((0.0..=1.0).contains(&c.red));
        }
    }
}
