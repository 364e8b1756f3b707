//! Procedural noise for the textured mediums.
//!
//! The core is Ken Perlin's improved noise: a seeded integer permutation
//! table, the quintic fade `6t⁵ − 15t⁴ + 10t³`, and the canonical gradient
//! set. The 2-D variant rides on the 3-D kernel at z = 0 so both share one
//! interpolation path. On top sit fractal Brownian motion and turbulence for
//! the marble medium, and the cheap sine-dot hash the pseudo-random medium
//! uses.

use crate::math::{Point2, Point3, Vector2};
use crate::precision::{Angle, Real};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Improved Perlin noise over a seeded permutation table.
#[derive(Debug, Clone)]
pub struct Perlin {
    perm: [u8; 512],
}

/// The quintic smoothstep with zero first and second derivatives at the
/// lattice points.
#[inline]
pub fn fade(t: Real) -> Real {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: Real, b: Real, t: Real) -> Real {
    a + t * (b - a)
}

/// Gradient dot-product against the canonical 12-vector set, selected by the
/// low hash bits.
#[inline]
fn grad(hash: u8, x: Real, y: Real, z: Real) -> Real {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

impl Perlin {
    /// A table shuffled deterministically from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut table: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut rng = SmallRng::seed_from_u64(seed);
        // Fisher–Yates
        for i in (1..256).rev() {
            let j = rng.gen_range(0..=i);
            table.swap(i, j);
        }
        let mut perm = [0u8; 512];
        for i in 0..512 {
            perm[i] = table[i & 255];
        }
        Self { perm }
    }

    /// 3-D noise in [−1, 1].
    pub fn noise3(&self, p: Point3) -> Real {
        let xi = p.x.floor() as i64 & 255;
        let yi = p.y.floor() as i64 & 255;
        let zi = p.z.floor() as i64 & 255;
        let x = p.x - p.x.floor();
        let y = p.y - p.y.floor();
        let z = p.z - p.z.floor();
        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let perm = &self.perm;
        let idx = |i: i64| perm[i as usize & 511] as i64;
        let a = idx(xi) + yi;
        let aa = idx(a) + zi;
        let ab = idx(a + 1) + zi;
        let b = idx(xi + 1) + yi;
        let ba = idx(b) + zi;
        let bb = idx(b + 1) + zi;

        let g = |i: i64, dx: Real, dy: Real, dz: Real| grad(perm[i as usize & 511], dx, dy, dz);
        lerp(
            lerp(
                lerp(g(aa, x, y, z), g(ba, x - 1.0, y, z), u),
                lerp(g(ab, x, y - 1.0, z), g(bb, x - 1.0, y - 1.0, z), u),
                v,
            ),
            lerp(
                lerp(g(aa + 1, x, y, z - 1.0), g(ba + 1, x - 1.0, y, z - 1.0), u),
                lerp(
                    g(ab + 1, x, y - 1.0, z - 1.0),
                    g(bb + 1, x - 1.0, y - 1.0, z - 1.0),
                    u,
                ),
                v,
            ),
            w,
        )
    }

    /// 2-D noise in [−1, 1] through the shared 3-D kernel.
    #[inline]
    pub fn noise2(&self, p: Point2) -> Real {
        self.noise3(Point3::new(p.x, p.y, 0.0))
    }

    /// Fractal Brownian motion: `octaves` layers of noise, each scaled up by
    /// `lacunarity` in frequency and down by `gain` in amplitude.
    pub fn fbm(&self, p: Point3, octaves: usize, lacunarity: Real, gain: Real) -> Real {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        for _ in 0..octaves {
            let q = Point3::new(p.x * frequency, p.y * frequency, p.z * frequency);
            value += amplitude * self.noise3(q);
            frequency *= lacunarity;
            amplitude *= gain;
        }
        value
    }

    /// Sum of absolute noise octaves — the classic turbulence for marble.
    pub fn turbulence(&self, p: Point3, octaves: usize) -> Real {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        for _ in 0..octaves {
            let q = Point3::new(p.x * frequency, p.y * frequency, p.z * frequency);
            value += amplitude * self.noise3(q).abs();
            frequency *= 2.0;
            amplitude *= 0.5;
        }
        value
    }
}

impl Default for Perlin {
    fn default() -> Self {
        Self::new(0)
    }
}

// ─── Sine-dot hash ──────────────────────────────────────────────────────────

/// Converts a seed angle to a unit seed vector for [`pseudo_random`].
pub fn seed_vector(angle: Angle) -> Vector2 {
    let r = angle.radians();
    Vector2::new(r.cos(), r.sin())
}

/// A repeatable "random" scalar in [0, 1): the input projected onto the seed
/// vector, pushed through a scaled sine, keeping only the fraction. Cheap,
/// stateless, and entirely deterministic — the pseudo-random medium's whole
/// look comes from this.
pub fn pseudo_random(v: Vector2, seeds: Vector2, gain: Real) -> Real {
    let value = v.dot(seeds);
    let scaled = value.sin() * gain;
    scaled - scaled.floor()
}
