//! Named constants and ready-made mediums.

use super::{Medium, Texture};
use crate::color::{colors, Color};
use crate::precision::Real;
use std::sync::Arc;

/// What to expect from a smoothness value.
pub mod smoothness {
    use crate::precision::Real;

    /// No coherent reflection at all, diffuse and ambient only.
    pub const NONE: Real = 0.0;
    /// Barely-there reflections.
    pub const BARELY: Real = 0.0625;
    /// A small amount of mirroring.
    pub const SMALL: Real = 0.2;
    /// Polished metal.
    pub const POLISHED: Real = 0.7;
    /// A good silver mirror; mild ambient and diffuse remain.
    pub const MIRROR: Real = 0.95;
    /// Reflection only — no surface color of its own.
    pub const PERFECT_MIRROR: Real = 1.0;
}

/// Phong exponents. Lower values spread the highlight, higher tighten it.
pub mod roughness {
    use crate::precision::Real;

    pub const TIGHT: Real = 100.0;
    pub const MEDIUM: Real = 50.0;
    pub const LOOSE: Real = 20.0;
}

/// Ambient light is a cheat to keep unlit detail visible; these are the
/// sanctioned amounts of cheating.
pub mod ambient_scale {
    use crate::precision::Real;

    pub const NONE: Real = 0.0;
    pub const DIM: Real = 0.1;
    pub const GLOWY: Real = 0.4;
}

/// A matte single-color surface.
pub fn plain(diffuse: Color, smooth: Real, tightness: Real) -> Medium {
    Medium {
        ambient: diffuse,
        diffuse,
        smoothness: smooth,
        tightness,
        ..Medium::default()
    }
}

/// The fallback matte gray.
pub fn dull() -> Arc<Medium> {
    Arc::new(Medium::default())
}

/// Bright matte white with no highlight to speak of.
pub fn chalk() -> Arc<Medium> {
    Arc::new(plain(Color::new(0.95, 0.95, 0.92), smoothness::NONE, 5.0))
}

/// A two-color 3-D checkerboard.
pub fn checkerboard(scale: Real, a: Color, b: Color) -> Medium {
    Medium {
        ambient: a,
        diffuse: a,
        texture: Texture::Checkerboard { scale, other: b },
        ..Medium::default()
    }
}

/// Perlin marble: `base` stone with `vein` streaks.
pub fn marble(seed: u64, base: Color, vein: Color) -> Medium {
    Medium {
        ambient: base,
        diffuse: base,
        smoothness: smoothness::BARELY,
        tightness: roughness::MEDIUM,
        texture: Texture::Marble {
            perlin: crate::noise::Perlin::new(seed),
            scale: 1.0,
            other: vein,
        },
        ..Medium::default()
    }
}

fn metal(tint: Color) -> Medium {
    Medium {
        ambient: tint,
        ambient_scale: ambient_scale::DIM,
        diffuse: tint,
        tightness: roughness::TIGHT,
        smoothness: smoothness::POLISHED,
        conductor: true,
        specular_priority: 1,
        ..Medium::default()
    }
}

/// Conductor presets; the highlight carries the metal's own tint.
pub mod metals {
    use super::{metal, Color, Medium};

    pub fn steel() -> Medium {
        metal(Color::new(0.62, 0.62, 0.66))
    }

    pub fn stainless() -> Medium {
        metal(Color::new(0.75, 0.75, 0.77))
    }

    pub fn bronze() -> Medium {
        metal(Color::new(0.71, 0.43, 0.18))
    }

    pub fn copper() -> Medium {
        metal(Color::new(0.72, 0.45, 0.2))
    }

    pub fn silver() -> Medium {
        let mut m = metal(Color::new(0.92, 0.92, 0.92));
        m.smoothness = super::smoothness::MIRROR;
        m
    }

    pub fn gold() -> Medium {
        metal(Color::new(1.0, 0.84, 0.0))
    }
}

fn dielectric(eta: Real, absorption: Option<Real>) -> Medium {
    Medium {
        ambient: colors::WHITE,
        ambient_scale: ambient_scale::NONE,
        diffuse: Color::new(0.02, 0.02, 0.02),
        tightness: roughness::TIGHT,
        smoothness: smoothness::BARELY,
        transmissivity: 0.92,
        refractive_index: eta,
        absorption,
        specular_priority: 2,
        ..Medium::default()
    }
}

/// Clear glass, η = 1.5, with a touch of Beer absorption.
pub fn glass() -> Medium {
    dielectric(1.5, Some(0.05))
}

/// Water, η = 1.33.
pub fn water() -> Medium {
    dielectric(1.33, Some(0.02))
}

/// Diamond, η = 2.42.
pub fn diamond() -> Medium {
    dielectric(2.42, None)
}

/// A glowing surface: emits `emissive` regardless of lighting.
pub fn glow(emissive: Color) -> Medium {
    Medium {
        ambient: emissive,
        ambient_scale: ambient_scale::GLOWY,
        diffuse: emissive,
        emissive,
        ..Medium::default()
    }
}

/// A perfect mirror.
pub fn mirror() -> Medium {
    Medium {
        ambient: Color::black(),
        ambient_scale: ambient_scale::NONE,
        diffuse: Color::black(),
        tightness: roughness::TIGHT,
        smoothness: smoothness::PERFECT_MIRROR,
        specular_priority: 3,
        ..Medium::default()
    }
}
