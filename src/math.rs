//! Fixed-dimension geometry: vectors, points, and rays.
//!
//! Vectors are free displacements and points are absolute locations; the
//! compiler enforces the distinction. Their algebra is deliberately partial —
//! `Point − Point = Vector`, `Point + Vector = Point`, `Vector + Vector =
//! Vector`, and that is all. Equality is componentwise against the process
//! epsilon, so two points that differ by tangency noise compare equal.

use crate::precision::{nearly_equal, nearly_zero, Real, EPSILON};
use rand::Rng;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

// ─── Vector3 / Point3 ───────────────────────────────────────────────────────

/// A free 3-D displacement.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vector3 {
    pub x: Real,
    pub y: Real,
    pub z: Real,
}

/// An absolute 3-D location.
#[derive(Debug, Clone, Copy, Default)]
pub struct Point3 {
    pub x: Real,
    pub y: Real,
    pub z: Real,
}

impl Vector3 {
    #[inline(always)]
    pub const fn new(x: Real, y: Real, z: Real) -> Self {
        Self { x, y, z }
    }

    /// The null vector.
    #[inline(always)]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    #[inline(always)]
    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    #[inline(always)]
    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    #[inline(always)]
    pub const fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Squared Euclidean norm — used anywhere a norm would otherwise be
    /// squared, which keeps the sqrt off the intersection hot path.
    #[inline(always)]
    pub fn quadrance(self) -> Real {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline(always)]
    pub fn magnitude(self) -> Real {
        self.quadrance().sqrt()
    }

    /// The unit vector. Normalizing the null vector returns the null vector
    /// — not NaN — so degenerate lighting cases don't poison downstream math.
    #[inline(always)]
    pub fn normalized(self) -> Self {
        let q = self.quadrance();
        if q < Real::EPSILON {
            Self::zero()
        } else {
            self / q.sqrt()
        }
    }

    #[inline(always)]
    pub fn dot(self, rhs: Self) -> Real {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline(always)]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Component-wise (Hadamard) product.
    #[inline(always)]
    pub fn hadamard(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }

    /// True when every component is within the process epsilon of zero.
    #[inline(always)]
    pub fn is_null(self) -> bool {
        nearly_zero(self.x) && nearly_zero(self.y) && nearly_zero(self.z)
    }

    /// Parallelism test via the cross-product magnitude. Anti-parallel
    /// vectors count as parallel — these are line semantics, not ray.
    #[inline]
    pub fn parallel(self, rhs: Self) -> bool {
        self.cross(rhs).quadrance() < EPSILON * EPSILON
    }

    #[inline]
    pub fn perpendicular(self, rhs: Self) -> bool {
        nearly_zero(self.dot(rhs))
    }
}

/// Scalar triple product `a · (b × c)`.
#[inline(always)]
pub fn triple(a: Vector3, b: Vector3, c: Vector3) -> Real {
    a.dot(b.cross(c))
}

/// Rotates `v` around the unit axis `k` by `theta` radians using the
/// Rodrigues formula. The preferred primitive for oblique rotations —
/// composing Euler matrices for a one-off axis spin is both slower and
/// harder to audit.
pub fn rodrigues(k: Vector3, v: Vector3, theta: Real) -> Vector3 {
    let (sin_t, cos_t) = theta.sin_cos();
    v * cos_t + k.cross(v) * sin_t + k * (k.dot(v) * (1.0 - cos_t))
}

impl Point3 {
    #[inline(always)]
    pub const fn new(x: Real, y: Real, z: Real) -> Self {
        Self { x, y, z }
    }

    #[inline(always)]
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// The displacement of this point from the origin.
    #[inline(always)]
    pub fn as_vector(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl PartialEq for Vector3 {
    fn eq(&self, rhs: &Self) -> bool {
        nearly_equal(self.x, rhs.x) && nearly_equal(self.y, rhs.y) && nearly_equal(self.z, rhs.z)
    }
}

impl PartialEq for Point3 {
    fn eq(&self, rhs: &Self) -> bool {
        nearly_equal(self.x, rhs.x) && nearly_equal(self.y, rhs.y) && nearly_equal(self.z, rhs.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:.4}, {:.4}, {:.4}>", self.x, self.y, self.z)
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }
}

impl Neg for Vector3 {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Add for Vector3 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vector3 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector3 {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<Real> for Vector3 {
    type Output = Self;
    #[inline(always)]
    fn mul(self, t: Real) -> Self {
        Self::new(self.x * t, self.y * t, self.z * t)
    }
}

impl Mul<Vector3> for Real {
    type Output = Vector3;
    #[inline(always)]
    fn mul(self, v: Vector3) -> Vector3 {
        v * self
    }
}

impl MulAssign<Real> for Vector3 {
    #[inline(always)]
    fn mul_assign(&mut self, t: Real) {
        self.x *= t;
        self.y *= t;
        self.z *= t;
    }
}

impl Div<Real> for Vector3 {
    type Output = Self;
    #[inline(always)]
    fn div(self, t: Real) -> Self {
        let inv = 1.0 / t;
        Self::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

impl DivAssign<Real> for Vector3 {
    #[inline(always)]
    fn div_assign(&mut self, t: Real) {
        let inv = 1.0 / t;
        self.x *= inv;
        self.y *= inv;
        self.z *= inv;
    }
}

impl Sub for Point3 {
    type Output = Vector3;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Add<Vector3> for Point3 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Vector3) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign<Vector3> for Point3 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Vector3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub<Vector3> for Point3 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Vector3) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Index<usize> for Vector3 {
    type Output = Real;
    fn index(&self, i: usize) -> &Real {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 index out of bounds: {i}"),
        }
    }
}

impl Index<usize> for Point3 {
    type Output = Real;
    fn index(&self, i: usize) -> &Real {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Point3 index out of bounds: {i}"),
        }
    }
}

// ─── 2-D and 4-D companions ─────────────────────────────────────────────────

/// A free 2-D displacement, used by the image plane and the noise kernels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vector2 {
    pub x: Real,
    pub y: Real,
}

/// An absolute 2-D location — an image-plane point or a (u,v) pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct Point2 {
    pub x: Real,
    pub y: Real,
}

impl Vector2 {
    #[inline(always)]
    pub const fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub fn dot(self, rhs: Self) -> Real {
        self.x * rhs.x + self.y * rhs.y
    }

    #[inline(always)]
    pub fn quadrance(self) -> Real {
        self.dot(self)
    }

    #[inline(always)]
    pub fn magnitude(self) -> Real {
        self.quadrance().sqrt()
    }
}

impl Point2 {
    #[inline(always)]
    pub const fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }
}

impl PartialEq for Point2 {
    fn eq(&self, rhs: &Self) -> bool {
        nearly_equal(self.x, rhs.x) && nearly_equal(self.y, rhs.y)
    }
}

impl Add<Vector2> for Point2 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Vector2) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Vector2;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Vector2 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<Real> for Vector2 {
    type Output = Self;
    #[inline(always)]
    fn mul(self, t: Real) -> Self {
        Self::new(self.x * t, self.y * t)
    }
}

/// A homogenized 4-component vector: the bridge between 3-D geometry and the
/// 4×4 transform / quadric coefficient matrices.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector4 {
    pub x: Real,
    pub y: Real,
    pub z: Real,
    pub w: Real,
}

impl Vector4 {
    #[inline(always)]
    pub const fn new(x: Real, y: Real, z: Real, w: Real) -> Self {
        Self { x, y, z, w }
    }

    /// Homogenizes a point with w = 1.
    #[inline(always)]
    pub fn from_point(p: Point3) -> Self {
        Self::new(p.x, p.y, p.z, 1.0)
    }

    /// Homogenizes a direction with w = 0.
    #[inline(always)]
    pub fn from_vector(v: Vector3) -> Self {
        Self::new(v.x, v.y, v.z, 0.0)
    }

    #[inline(always)]
    pub fn dot(self, rhs: Self) -> Real {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    /// Drops the homogeneous coordinate.
    #[inline(always)]
    pub fn truncated(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn as_array(self) -> [Real; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

// ─── Ray ────────────────────────────────────────────────────────────────────

/// A parametric ray `R(t) = origin + t · direction`.
///
/// The direction is *not* required to be unit length. Intersection math runs
/// on the raw parameterization ([`Ray::solve`]); visibility tests that need a
/// metric distance use [`Ray::distance_along`], which normalizes.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3,
}

impl PartialEq for Ray {
    fn eq(&self, rhs: &Self) -> bool {
        self.origin == rhs.origin && self.direction == rhs.direction
    }
}

impl Ray {
    #[inline(always)]
    pub const fn new(origin: Point3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Evaluates the ray at parameter `t` in the ray's own parameterization.
    #[inline(always)]
    pub fn solve(self, t: Real) -> Point3 {
        self.origin + self.direction * t
    }

    /// The point a metric distance `t` along the normalized direction.
    #[inline(always)]
    pub fn distance_along(self, t: Real) -> Point3 {
        self.origin + self.direction.normalized() * t
    }

    /// The point on the ray's line closest to `p` (projection, may land
    /// behind the origin).
    pub fn closest(self, p: Point3) -> Point3 {
        let q = self.direction.quadrance();
        if nearly_zero(q) {
            return self.origin;
        }
        let t = (p - self.origin).dot(self.direction) / q;
        self.solve(t)
    }

    #[inline(always)]
    pub fn normalized(self) -> Self {
        Self::new(self.origin, self.direction.normalized())
    }
}

// ─── Random samplers ────────────────────────────────────────────────────────

/// Uniform point inside the unit sphere via rejection sampling.
pub fn random_in_unit_sphere(rng: &mut dyn rand::RngCore) -> Vector3 {
    loop {
        let v = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if v.quadrance() < 1.0 {
            return v;
        }
    }
}

/// Uniform direction on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn rand::RngCore) -> Vector3 {
    random_in_unit_sphere(rng).normalized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision::PI;

    #[test]
    fn point_vector_algebra() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 6.0, 8.0);
        let d = b - a;
        assert_eq!(d, Vector3::new(3.0, 4.0, 5.0));
        assert_eq!(a + d, b);
        assert_eq!(b - d, a);
        assert_eq!(d + d, Vector3::new(6.0, 8.0, 10.0));
    }

    #[test]
    fn quadrance_matches_magnitude() {
        let v = Vector3::new(3.0, 4.0, 12.0);
        assert!(nearly_equal(v.quadrance(), 169.0));
        assert!(nearly_equal(v.magnitude(), 13.0));
    }

    #[test]
    fn normalizing_null_returns_null() {
        let v = Vector3::zero().normalized();
        assert!(v.is_null());
        assert!(v.x == 0.0 && v.y == 0.0 && v.z == 0.0);
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        let x = Vector3::unit_x();
        let y = Vector3::unit_y();
        assert_eq!(x.cross(y), Vector3::unit_z());
        assert_eq!(y.cross(x), -Vector3::unit_z());
    }

    #[test]
    fn triple_product_of_basis_is_one() {
        assert!(nearly_equal(
            triple(Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z()),
            1.0
        ));
    }

    #[test]
    fn parallel_includes_antiparallel() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert!(v.parallel(v * 2.5));
        assert!(v.parallel(-v));
        assert!(!v.parallel(Vector3::unit_x()));
    }

    #[test]
    fn perpendicular_basis_vectors() {
        assert!(Vector3::unit_x().perpendicular(Vector3::unit_y()));
        assert!(!Vector3::unit_x().perpendicular(Vector3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn rodrigues_quarter_turn() {
        let rotated = rodrigues(Vector3::unit_z(), Vector3::unit_x(), PI / 2.0);
        assert_eq!(rotated, Vector3::unit_y());
        // full turn comes back
        let full = rodrigues(Vector3::unit_z(), Vector3::new(1.0, 2.0, 3.0), 2.0 * PI);
        assert_eq!(full, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn ray_solve_vs_distance_along() {
        // direction of length 2: solve(1) travels 2 units, distance_along(1)
        // travels 1
        let r = Ray::new(Point3::origin(), Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(r.solve(1.0), Point3::new(0.0, 0.0, 2.0));
        assert_eq!(r.distance_along(1.0), Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn ray_closest_projects_onto_line() {
        let r = Ray::new(Point3::origin(), Vector3::unit_x() * 3.0);
        let c = r.closest(Point3::new(5.0, 4.0, 0.0));
        assert_eq!(c, Point3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn epsilon_equality() {
        let a = Point3::new(1.0, 1.0, 1.0);
        let b = Point3::new(1.0 + EPSILON / 2.0, 1.0, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn homogenization_tags_w() {
        let p = Vector4::from_point(Point3::new(1.0, 2.0, 3.0));
        assert!(nearly_equal(p.w, 1.0));
        let v = Vector4::from_vector(Vector3::new(1.0, 2.0, 3.0));
        assert!(nearly_equal(v.w, 0.0));
    }
}
