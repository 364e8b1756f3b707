//! Color with an explicit linear / gamma-corrected tag.
//!
//! Shading accumulates in linear space; the image plane converts once at
//! write-out. The tag travels with the value so a double-correction is a
//! visible bug rather than a silent washed-out render.

use crate::precision::{nearly_equal, Real};
use std::ops::{Add, AddAssign, Mul, MulAssign};

/// Which space the channel values are currently expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    Linear,
    Gamma,
}

/// The display gamma used when converting between spaces.
const GAMMA: Real = 2.2;

/// Linear → display.
#[inline]
pub fn apply_gamma(channel: Real) -> Real {
    channel.max(0.0).powf(1.0 / GAMMA)
}

/// Display → linear.
#[inline]
pub fn remove_gamma(channel: Real) -> Real {
    channel.max(0.0).powf(GAMMA)
}

#[derive(Debug, Clone, Copy)]
pub struct Color {
    pub red: Real,
    pub green: Real,
    pub blue: Real,
    pub space: Space,
}

impl Color {
    /// A linear-space color.
    #[inline(always)]
    pub const fn new(red: Real, green: Real, blue: Real) -> Self {
        Self {
            red,
            green,
            blue,
            space: Space::Linear,
        }
    }

    #[inline(always)]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    #[inline(always)]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Per-channel clamp to [0, 1].
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            red: self.red.clamp(0.0, 1.0),
            green: self.green.clamp(0.0, 1.0),
            blue: self.blue.clamp(0.0, 1.0),
            space: self.space,
        }
    }

    /// Per-channel product — filtering one color through another.
    #[inline]
    pub fn filter(self, other: Color) -> Self {
        debug_assert_eq!(self.space, other.space, "filtering across color spaces");
        Self {
            red: self.red * other.red,
            green: self.green * other.green,
            blue: self.blue * other.blue,
            space: self.space,
        }
    }

    /// The brightest channel, used by the shadow assertions and the
    /// antialiasing mask.
    #[inline]
    pub fn max_channel(self) -> Real {
        self.red.max(self.green).max(self.blue)
    }

    /// Rec. 709 luma, used for grayscale output and the mask gate.
    #[inline]
    pub fn luma(self) -> Real {
        0.2126 * self.red + 0.7152 * self.green + 0.0722 * self.blue
    }

    /// Re-expresses the color in the requested space; a no-op when already
    /// there.
    pub fn to_space(self, desired: Space) -> Self {
        match (self.space, desired) {
            (Space::Linear, Space::Gamma) => Self {
                red: apply_gamma(self.red),
                green: apply_gamma(self.green),
                blue: apply_gamma(self.blue),
                space: Space::Gamma,
            },
            (Space::Gamma, Space::Linear) => Self {
                red: remove_gamma(self.red),
                green: remove_gamma(self.green),
                blue: remove_gamma(self.blue),
                space: Space::Linear,
            },
            _ => self,
        }
    }

    /// Quantizes to 8-bit RGB, clamping first.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let c = self.clamped();
        (
            (c.red * 255.0).round() as u8,
            (c.green * 255.0).round() as u8,
            (c.blue * 255.0).round() as u8,
        )
    }

    /// Averages a set of subsamples in linear space. The samples arrive in
    /// deterministic stencil order, so the sum is reproducible bit for bit.
    pub fn blend_samples(samples: &[Color]) -> Color {
        if samples.is_empty() {
            return Color::black();
        }
        let mut acc = Color::black();
        for s in samples {
            acc += s.to_space(Space::Linear);
        }
        acc * (1.0 / samples.len() as Real)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl PartialEq for Color {
    fn eq(&self, rhs: &Self) -> bool {
        self.space == rhs.space
            && nearly_equal(self.red, rhs.red)
            && nearly_equal(self.green, rhs.green)
            && nearly_equal(self.blue, rhs.blue)
    }
}

impl Add for Color {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        debug_assert_eq!(self.space, rhs.space, "adding across color spaces");
        Self {
            red: self.red + rhs.red,
            green: self.green + rhs.green,
            blue: self.blue + rhs.blue,
            space: self.space,
        }
    }
}

impl AddAssign for Color {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<Real> for Color {
    type Output = Self;
    #[inline(always)]
    fn mul(self, t: Real) -> Self {
        Self {
            red: self.red * t,
            green: self.green * t,
            blue: self.blue * t,
            space: self.space,
        }
    }
}

impl Mul<Color> for Real {
    type Output = Color;
    #[inline(always)]
    fn mul(self, c: Color) -> Color {
        c * self
    }
}

impl MulAssign<Real> for Color {
    #[inline(always)]
    fn mul_assign(&mut self, t: Real) {
        *self = *self * t;
    }
}

/// The usual named colors, all linear.
pub mod colors {
    use super::Color;

    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);
    pub const CYAN: Color = Color::new(0.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0);
    pub const ORANGE: Color = Color::new(1.0, 0.647, 0.0);
    pub const GREY: Color = Color::new(0.5, 0.5, 0.5);
    pub const DARK_GREY: Color = Color::new(0.25, 0.25, 0.25);
    pub const LIGHT_GREY: Color = Color::new(0.75, 0.75, 0.75);
}
