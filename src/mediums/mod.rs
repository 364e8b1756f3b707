//! Surface/volumetric mediums: everything the shading integrator asks a
//! material for.
//!
//! One struct carries the published coefficients (ambient, diffuse, Phong
//! tightness, smoothness, transmissivity, refractive index, emissive) and a
//! [`Texture`] variant for the diffuse term — the material "hierarchy" is a
//! sum type, not a class tree. Points handed to a medium are in *object*
//! space, so solid textures stay glued to their object under any pose.

mod presets;

pub use presets::*;

use crate::color::Color;
use crate::laws;
use crate::mapping::Reducer;
use crate::math::{Point2, Point3, Vector2, Vector3};
use crate::noise::{pseudo_random, seed_vector, Perlin};
use crate::precision::{Angle, Real};

/// Procedural diffuse patterns. `Solid` uses the medium's diffuse color
/// alone; the others blend it against their own second color.
#[derive(Debug, Clone)]
pub enum Texture {
    /// The constant diffuse color.
    Solid,
    /// 3-D checkerboard in object space, cube edge = `scale`.
    Checkerboard { scale: Real, other: Color },
    /// 2-D checkerboard over the surface (u,v), `repeats` cells per side.
    SurfaceCheckers { repeats: Real, other: Color },
    /// Polka dots of `radius` (in cell units) on a unit cell grid.
    Dots { scale: Real, radius: Real, other: Color },
    /// Grid lines of `line_width` (cell fraction) every `scale` units.
    Grid { scale: Real, line_width: Real, other: Color },
    /// Diagonal stripes of equal width in object space.
    Diagonal { scale: Real, other: Color },
    /// Perlin-turbulence marble: veins of `other` through the diffuse base.
    Marble {
        perlin: Perlin,
        scale: Real,
        other: Color,
    },
    /// The sine-dot pseudo-random functor: three seed angles, a radius, and
    /// a gain.
    Random {
        seeds: [Vector2; 3],
        radius: Real,
        gain: Real,
    },
}

impl Texture {
    pub fn random(angles: [Angle; 3], radius: Real, gain: Real) -> Self {
        Texture::Random {
            seeds: [
                seed_vector(angles[0]),
                seed_vector(angles[1]),
                seed_vector(angles[2]),
            ],
            radius,
            gain,
        }
    }

    /// Samples the pattern. `base` is the medium's diffuse color; `uv` is
    /// the surface mapping of the same point for the 2-D patterns.
    fn sample(&self, p: Point3, uv: Point2, base: Color) -> Color {
        match self {
            Texture::Solid => base,
            Texture::Checkerboard { scale, other } => {
                let cell = |v: Real| (v / scale).floor() as i64;
                if (cell(p.x) + cell(p.y) + cell(p.z)).rem_euclid(2) == 0 {
                    base
                } else {
                    *other
                }
            }
            Texture::SurfaceCheckers { repeats, other } => {
                let cu = (uv.x * repeats).floor() as i64;
                let cv = (uv.y * repeats).floor() as i64;
                if (cu + cv).rem_euclid(2) == 0 {
                    base
                } else {
                    *other
                }
            }
            Texture::Dots { scale, radius, other } => {
                let fx = (p.x / scale).rem_euclid(1.0) - 0.5;
                let fy = (p.y / scale).rem_euclid(1.0) - 0.5;
                let fz = (p.z / scale).rem_euclid(1.0) - 0.5;
                if fx * fx + fy * fy + fz * fz <= radius * radius {
                    *other
                } else {
                    base
                }
            }
            Texture::Grid { scale, line_width, other } => {
                let near_line = |v: Real| {
                    let f = (v / scale).rem_euclid(1.0);
                    f < *line_width || f > 1.0 - line_width
                };
                if near_line(p.x) || near_line(p.y) || near_line(p.z) {
                    *other
                } else {
                    base
                }
            }
            Texture::Diagonal { scale, other } => {
                if ((p.x + p.y + p.z) / scale).rem_euclid(2.0) < 1.0 {
                    base
                } else {
                    *other
                }
            }
            Texture::Marble { perlin, scale, other } => {
                let q = Point3::new(p.x / scale, p.y / scale, p.z / scale);
                let turb = perlin.turbulence(q, 5);
                // veins form where the turbulated sine crosses zero
                let vein = (0.5 * (1.0 + (q.x * 3.0 + 4.0 * turb).sin())).powf(0.75);
                Color::new(
                    base.red * vein + other.red * (1.0 - vein),
                    base.green * vein + other.green * (1.0 - vein),
                    base.blue * vein + other.blue * (1.0 - vein),
                )
            }
            Texture::Random { seeds, radius, gain } => {
                let v = Vector2::new(p.x / radius, p.y / radius);
                let r = pseudo_random(v, seeds[0], *gain);
                let g = pseudo_random(v, seeds[1], *gain);
                let b = pseudo_random(v, seeds[2], *gain);
                Color::new(base.red * r, base.green * g, base.blue * b)
            }
        }
    }
}

/// A bump field added to shading normals.
#[derive(Debug, Clone)]
pub enum Perturbation {
    None,
    /// Perlin gradient bump of the given amplitude and spatial scale.
    Noise {
        perlin: Perlin,
        amplitude: Real,
        scale: Real,
    },
}

#[derive(Debug, Clone)]
pub struct Medium {
    /// Color of the surface under ambient light.
    pub ambient: Color,
    /// How bright the ambient term is, unit scale.
    pub ambient_scale: Real,
    /// Base diffuse color, fed through the texture.
    pub diffuse: Color,
    /// Phong exponent K: higher is a tighter highlight.
    pub tightness: Real,
    /// Mirror fraction in [0, 1].
    pub smoothness: Real,
    /// Fraction of light transmitted through the surface, [0, 1].
    pub transmissivity: Real,
    /// η of the volume behind the surface.
    pub refractive_index: Real,
    /// Additive self-light.
    pub emissive: Color,
    pub texture: Texture,
    /// Overrides the shape's own (x,y,z) → (u,v) mapping when set.
    pub reducer: Option<Reducer>,
    /// Conductors tint their specular highlight with the diffuse color.
    pub conductor: bool,
    /// Beer's-law dropoff per unit distance inside the medium; `None` is a
    /// vacuum (identity).
    pub absorption: Option<Real>,
    pub perturbation: Perturbation,
    /// Tie-breaker when two surfaces sit within ε of the same hit distance:
    /// higher wins the pixel.
    pub specular_priority: u8,
}

impl Default for Medium {
    /// A dull matte gray.
    fn default() -> Self {
        Self {
            ambient: Color::new(0.2, 0.2, 0.2),
            ambient_scale: presets::ambient_scale::DIM,
            diffuse: Color::new(0.6, 0.6, 0.6),
            tightness: presets::roughness::LOOSE,
            smoothness: presets::smoothness::NONE,
            transmissivity: 0.0,
            refractive_index: 1.0,
            emissive: Color::black(),
            texture: Texture::Solid,
            reducer: None,
            conductor: false,
            absorption: None,
            perturbation: Perturbation::None,
            specular_priority: 0,
        }
    }
}

impl Medium {
    /// Ambient contribution at a point, post-scaled.
    pub fn ambient(&self, _p: Point3) -> Color {
        self.ambient * self.ambient_scale
    }

    /// Diffuse color at an object-space point; `uv` is the surface mapping
    /// of the same point for the 2-D patterns.
    pub fn diffuse_at(&self, p: Point3, uv: Point2) -> Color {
        self.texture.sample(p, uv, self.diffuse)
    }

    /// Specular color for one light: the light color scaled, tinted by the
    /// surface for conductors.
    pub fn specular(&self, _p: Point3, scaling: Real, light_color: Color) -> Color {
        let s = light_color * scaling;
        if self.conductor {
            s.filter(self.diffuse)
        } else {
            s
        }
    }

    pub fn specular_tightness(&self, _p: Point3) -> Real {
        self.tightness
    }

    pub fn smoothness(&self, _p: Point3) -> Real {
        self.smoothness
    }

    pub fn transmissivity(&self, _p: Point3) -> Real {
        self.transmissivity
    }

    pub fn emissive(&self, _p: Point3) -> Color {
        self.emissive
    }

    pub fn refractive_index(&self, _p: Point3) -> Real {
        self.refractive_index
    }

    /// The (emitted, reflected, transmitted) split at an interface with a
    /// medium of index `other_eta`. Emission is zero and the other two sum
    /// to one: the Schlick reflectance floor-ed by the surface smoothness,
    /// so a mirror reflects everything regardless of angle.
    pub fn radiosity(
        &self,
        _p: Point3,
        other_eta: Real,
        incident_angle: Real,
        _transmitted_angle: Real,
    ) -> (Real, Real, Real) {
        let f = laws::schlick(other_eta, self.refractive_index, incident_angle);
        let reflected = self.smoothness + (1.0 - self.smoothness) * f;
        (0.0, reflected, 1.0 - reflected)
    }

    /// Filters a color that traveled `distance` inside the medium.
    pub fn absorbance(&self, distance: Real, given: Color) -> Color {
        match self.absorption {
            None => given,
            Some(c) => given * laws::beers(distance, c),
        }
    }

    /// Normal perturbation at a point; null when the surface is smooth.
    pub fn perturbation(&self, p: Point3) -> Vector3 {
        match &self.perturbation {
            Perturbation::None => Vector3::zero(),
            Perturbation::Noise {
                perlin,
                amplitude,
                scale,
            } => {
                let q = Point3::new(p.x / scale, p.y / scale, p.z / scale);
                // cheap gradient estimate from three offset taps
                let base = perlin.noise3(q);
                let dx = perlin.noise3(Point3::new(q.x + 0.1, q.y, q.z)) - base;
                let dy = perlin.noise3(Point3::new(q.x, q.y + 0.1, q.z)) - base;
                let dz = perlin.noise3(Point3::new(q.x, q.y, q.z + 0.1)) - base;
                Vector3::new(dx, dy, dz) * (*amplitude / 0.1)
            }
        }
    }
}
