//! Scene assembly and the shading integrator.
//!
//! The scene owns its objects and lights in flat pools; the octree stores
//! 32-bit indices into the object pool and only culls candidates — all
//! actual intersection happens here. Shading is classic Whitted: ambient and
//! emissive seed the color, each light contributes Lambert diffuse and Phong
//! specular behind a shadow test, and smooth or transmissive surfaces
//! recurse through a shared depth budget. Nothing in the shading path
//! touches an RNG, so a render is a pure function of the scene.

use crate::camera::Camera;
use crate::color::Color;
use crate::image::{Image, RowNotifier};
use crate::laws;
use crate::lights::Light;
use crate::math::{Point3, Ray};
use crate::mediums::Medium;
use crate::objects::{Object, SurfaceHit};
use crate::octree::Node;
use crate::precision::{Real, EPSILON, SHADOW_EPSILON};
use crate::bounds::Bounds;
use log::info;

/// Default recursion budget shared by reflection and refraction.
pub const DEFAULT_TRACE_DEPTH: u32 = 4;

/// A hit annotated with the object that produced it.
#[derive(Debug, Clone, Copy)]
pub struct SceneHit {
    pub object: usize,
    pub hit: SurfaceHit,
}

pub struct Scene {
    objects: Vec<Object>,
    lights: Vec<Light>,
    pub background: Color,
    /// Recursion budget for reflection + refraction.
    pub max_depth: u32,
    /// η of the medium the camera sits in.
    pub ambient_eta: Real,
    octree: Option<Node>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            background: Color::black(),
            max_depth: DEFAULT_TRACE_DEPTH,
            ambient_eta: 1.0,
            octree: None,
        }
    }

    /// Adds an object, returning its pool index. Invalidates the octree.
    pub fn add_object(&mut self, object: Object) -> usize {
        self.octree = None;
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn add_light(&mut self, light: Light) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    pub fn object(&self, id: usize) -> &Object {
        &self.objects[id]
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Builds the octree over the current object pool. Finite objects size
    /// the root box; infinite ones pin to the root by their sentinel bounds.
    pub fn rebuild_octree(&mut self) {
        let mut root_bounds: Option<Bounds> = None;
        for object in &self.objects {
            let b = object.world_bounds();
            if b.is_infinite() {
                continue;
            }
            root_bounds = Some(match root_bounds {
                Some(acc) => Bounds::surrounding(&acc, &b),
                None => b,
            });
        }
        let bounds = root_bounds.unwrap_or_else(|| {
            Bounds::new(Point3::new(-100.0, -100.0, -100.0), Point3::new(100.0, 100.0, 100.0))
        });
        let mut root = Node::new(bounds);
        for (id, object) in self.objects.iter().enumerate() {
            root.insert(id as u32, object.world_bounds());
        }
        info!(
            "octree rebuilt over {} objects, root {:?}",
            self.objects.len(),
            bounds
        );
        self.octree = Some(root);
    }

    /// Candidate object ids for a ray: the octree query when built, the
    /// whole pool otherwise.
    fn candidates(&self, ray: &Ray, out: &mut Vec<u32>) {
        out.clear();
        match &self.octree {
            Some(root) => root.query_ray(ray, out),
            None => out.extend(0..self.objects.len() as u32),
        }
    }

    /// All object intersections along a ray, nearest first.
    pub fn find_intersections(&self, ray: &Ray) -> Vec<SceneHit> {
        let mut ids = Vec::new();
        self.candidates(ray, &mut ids);
        let mut hits: Vec<SceneHit> = ids
            .iter()
            .filter_map(|&id| {
                self.objects[id as usize]
                    .intersect(ray)
                    .map(|hit| SceneHit {
                        object: id as usize,
                        hit,
                    })
            })
            .collect();
        hits.sort_by(|a, b| {
            a.hit
                .distance
                .partial_cmp(&b.hit.distance)
                .expect("hit distances are finite")
        });
        hits
    }

    /// The winning hit: smallest positive distance, ties within ε broken by
    /// the material's specular priority.
    pub fn nearest_object(&self, _ray: &Ray, hits: &[SceneHit]) -> Option<SceneHit> {
        let first = hits.first()?;
        let mut best = *first;
        for candidate in &hits[1..] {
            if candidate.hit.distance - first.hit.distance > EPSILON {
                break;
            }
            let best_priority = self.objects[best.object].medium.specular_priority;
            let priority = self.objects[candidate.object].medium.specular_priority;
            if priority > best_priority {
                best = *candidate;
            }
        }
        Some(best)
    }

    fn nearest_hit(&self, ray: &Ray) -> Option<SceneHit> {
        let hits = self.find_intersections(ray);
        self.nearest_object(ray, &hits)
    }

    /// The emissive contribution of a medium at a point, scaled.
    pub fn emissive_light(&self, scale: Real, medium: &Medium, point: Point3) -> Color {
        medium.emissive(point) * scale
    }

    /// True when something sits strictly between the surface point and the
    /// light. The incident ray parameterizes the light at t = 1 for finite
    /// lights, so occlusion is a hit in (ε, 1); the beam occludes on any
    /// forward hit.
    fn occluded(&self, shadow_ray: &Ray, light: &Light, from: Point3) -> bool {
        let limit = if light.distance_from(from).is_finite() {
            1.0 - EPSILON
        } else {
            Real::INFINITY
        };
        let mut ids = Vec::new();
        self.candidates(shadow_ray, &mut ids);
        ids.iter().any(|&id| {
            self.objects[id as usize]
                .intersect(shadow_ray)
                .is_some_and(|hit| hit.distance > EPSILON && hit.distance < limit)
        })
    }

    /// Shades one surface hit, recursing for mirrors and refraction.
    fn shade(&self, ray: &Ray, scene_hit: &SceneHit, depth: u32) -> Color {
        let object = &self.objects[scene_hit.object];
        let medium = &object.medium;
        let hit = &scene_hit.hit;
        let surface_point = hit.point;
        let object_point = hit.object_point;

        let mut normal = hit.normal;
        let bump = medium.perturbation(object_point);
        if !bump.is_null() {
            normal = (normal + bump).normalized();
        }
        // a wall interior or a degenerate apex shades flat
        if normal.is_null() {
            return (medium.ambient(object_point) + medium.emissive(object_point)).clamped();
        }

        let view_dir = -ray.direction.normalized();
        let uv = object.map(surface_point);
        let launch_point = surface_point + normal * SHADOW_EPSILON;

        let mut color = medium.ambient(object_point) + medium.emissive(object_point);

        for light in &self.lights {
            let samples = light.samples();
            let mut accumulated = Color::black();
            for s in 0..samples {
                let to_light = light.incident(launch_point, s);
                let light_dir = to_light.direction.normalized();
                let facing = normal.dot(light_dir);
                if facing <= 0.0 {
                    continue;
                }
                if self.occluded(&to_light, light, launch_point) {
                    continue;
                }
                let intensity = light.intensity_at(surface_point);
                let light_color = light.color_at(surface_point);
                // Lambert diffuse
                let diffuse = medium
                    .diffuse_at(object_point, uv)
                    .filter(light_color)
                    * (facing * intensity);
                // Phong specular: the incident light reflected about the
                // normal, compared against the view direction
                let reflected = laws::reflection(normal, -light_dir);
                let alignment = reflected.dot(view_dir).max(0.0);
                let k = medium.specular_tightness(object_point);
                let specular =
                    medium.specular(object_point, alignment.powf(k) * intensity, light_color);
                accumulated += diffuse + specular;
            }
            color += accumulated * (1.0 / samples as Real);
        }

        let smoothness = medium.smoothness(object_point);
        if depth > 0 && smoothness > 0.0 {
            let bounce_dir = laws::reflection(normal, ray.direction.normalized());
            let bounce = Ray::new(launch_point, bounce_dir);
            let mut reflected_color = self.trace(&bounce, depth - 1) * smoothness;
            if medium.conductor {
                reflected_color = reflected_color.filter(medium.diffuse_at(object_point, uv));
            }
            color += reflected_color;
        }

        let transmissivity = medium.transmissivity(object_point);
        if depth > 0 && transmissivity > 0.0 {
            color += self.transmitted(ray, object, hit, depth) * transmissivity;
        }

        color.clamped()
    }

    /// The refracted contribution through a transmissive surface, with Beer
    /// absorption over the interior segment when entering.
    fn transmitted(&self, ray: &Ray, object: &Object, hit: &SurfaceHit, depth: u32) -> Color {
        let medium = &object.medium;
        let unit_dir = ray.direction.normalized();
        // the geometric outward normal decides entering vs leaving
        let outward = object.normal(hit.point);
        let entering = unit_dir.dot(outward) < 0.0;
        let (eta1, eta2, facing_normal) = if entering {
            (
                self.ambient_eta,
                medium.refractive_index(hit.object_point),
                outward,
            )
        } else {
            (
                medium.refractive_index(hit.object_point),
                self.ambient_eta,
                -outward,
            )
        };
        let refracted = laws::snell(facing_normal, unit_dir, eta1, eta2);
        if refracted.is_null() {
            // total internal reflection: the energy stays mirrored
            let bounce_dir = laws::reflection(facing_normal, unit_dir);
            let bounce = Ray::new(hit.point + facing_normal * SHADOW_EPSILON, bounce_dir);
            return self.trace(&bounce, depth - 1);
        }
        let inward = Ray::new(
            hit.point - facing_normal * SHADOW_EPSILON,
            refracted.normalized(),
        );
        let transmitted_color = self.trace(&inward, depth - 1);
        if entering {
            // the next surface along the interior ray bounds the segment
            let interior = self
                .nearest_hit(&inward)
                .map_or(0.0, |exit| exit.hit.distance);
            medium.absorbance(interior, transmitted_color)
        } else {
            transmitted_color
        }
    }

    /// Traces one ray to a color. The public entry for subsample shading.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Color {
        match self.nearest_hit(ray) {
            Some(scene_hit) => self.shade(ray, &scene_hit, depth),
            None => self.background,
        }
    }

    /// Renders the camera's view. The scene graph is immutable here and is
    /// read concurrently by the rayon workers; pixels have disjoint owners.
    pub fn render(&self, camera: &Camera, config: &RenderConfig) -> Image {
        assert!(
            self.octree.is_some() || self.objects.is_empty(),
            "rebuild_octree before rendering"
        );
        let mut image = Image::new(camera.height(), camera.width());
        image.output_space = config.output_space;
        let depth = self.max_depth;
        image.generate_each(
            |image_point| {
                let ray = camera.cast(image_point);
                self.trace(&ray, depth)
            },
            config.samples,
            config.row_notifier,
            config.mask.as_deref(),
            config.mask_threshold,
        );
        image
    }
}

/// Knobs for one render pass. The recursion cap lives on the [`Scene`]
/// itself (`max_depth`), alongside its other shading constants.
pub struct RenderConfig<'a> {
    /// Subsamples per pixel, averaged through the image-plane stencil.
    pub samples: usize,
    /// The color space pixels are written out in.
    pub output_space: crate::color::Space,
    /// Optional per-row completion callback, invoked from the worker.
    pub row_notifier: Option<RowNotifier<'a>>,
    /// Optional antialiasing gate; pixels below the threshold are skipped.
    pub mask: Option<Vec<u8>>,
    pub mask_threshold: u8,
}

impl Default for RenderConfig<'_> {
    fn default() -> Self {
        Self {
            samples: 25,
            output_space: crate::color::Space::Gamma,
            row_notifier: None,
            mask: None,
            mask_threshold: 0,
        }
    }
}
