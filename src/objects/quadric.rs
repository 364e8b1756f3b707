//! The general quadric surface pᵀ·Q·p = 0 for a symmetric 4×4 coefficient
//! matrix Q and homogenized p.
//!
//! Substituting the ray gives a quadratic in t whose coefficients are the
//! Q-weighted sums below, written against 1-based indices to match the
//! standard derivations. The normal at a surface point is the gradient
//! 2·Q·p, truncated to 3-D.

use super::{HitList, ObjectHit};
use crate::math::{Point2, Point3, Ray, Vector3, Vector4};
use crate::matrix::Matrix;
use crate::precision::{nearly_zero, Real};
use crate::solvers::quadratic_roots;

#[derive(Debug, Clone)]
pub struct Quadric {
    coefficients: Matrix,
}

impl Quadric {
    /// Wraps an arbitrary symmetric 4×4 coefficient matrix.
    pub fn new(coefficients: Matrix) -> Self {
        assert!(
            coefficients.rows() == 4 && coefficients.cols() == 4,
            "quadric coefficients must be 4x4"
        );
        Self { coefficients }
    }

    /// x²/a² + y²/b² + z²/c² − 1 = 0.
    pub fn ellipsoid(a: Real, b: Real, c: Real) -> Self {
        let mut q = Matrix::zeros(4, 4);
        *q.at_mut(1, 1) = 1.0 / (a * a);
        *q.at_mut(2, 2) = 1.0 / (b * b);
        *q.at_mut(3, 3) = 1.0 / (c * c);
        *q.at_mut(4, 4) = -1.0;
        Self::new(q)
    }

    /// x²/a² + y²/b² − z = 0, the elliptic paraboloid opening along +z.
    pub fn elliptic_paraboloid(a: Real, b: Real) -> Self {
        let mut q = Matrix::zeros(4, 4);
        *q.at_mut(1, 1) = 1.0 / (a * a);
        *q.at_mut(2, 2) = 1.0 / (b * b);
        // the linear z term splits across the symmetric off-diagonal pair
        *q.at_mut(3, 4) = -0.5;
        *q.at_mut(4, 3) = -0.5;
        Self::new(q)
    }

    /// x²/a² + y²/b² − z²/c² − 1 = 0, the hyperboloid of one sheet.
    pub fn hyperboloid_one_sheet(a: Real, b: Real, c: Real) -> Self {
        let mut q = Matrix::zeros(4, 4);
        *q.at_mut(1, 1) = 1.0 / (a * a);
        *q.at_mut(2, 2) = 1.0 / (b * b);
        *q.at_mut(3, 3) = -1.0 / (c * c);
        *q.at_mut(4, 4) = -1.0;
        Self::new(q)
    }

    pub fn coefficients(&self) -> &Matrix {
        &self.coefficients
    }

    pub fn collisions_along(&self, ray: &Ray) -> HitList {
        let mut hits = HitList::new();
        let (x, y, z) = (ray.origin.x, ray.origin.y, ray.origin.z);
        let (i, j, k) = (ray.direction.x, ray.direction.y, ray.direction.z);
        let q = &self.coefficients;
        let q1221 = q.at(1, 2) + q.at(2, 1);
        let q2332 = q.at(2, 3) + q.at(3, 2);
        let q1331 = q.at(1, 3) + q.at(3, 1);
        let q1441 = q.at(1, 4) + q.at(4, 1);
        let q2442 = q.at(2, 4) + q.at(4, 2);
        let q3443 = q.at(3, 4) + q.at(4, 3);
        let q11 = q.at(1, 1);
        let q22 = q.at(2, 2);
        let q33 = q.at(3, 3);
        let q44 = q.at(4, 4);

        let a = i * (i * q11 + j * q1221) + j * (j * q22 + k * q2332) + k * (k * q33 + i * q1331);
        let b = i * ((z * q1331 + y * q1221 + x * (2.0 * q11)) + q1441)
            + j * ((z * q2332 + x * q1221 + y * (2.0 * q22)) + q2442)
            + k * ((y * q2332 + x * q1331 + z * (2.0 * q33)) + q3443);
        let c = x * (x * q11 + y * q1221 + z * q1331 + q1441)
            + y * (y * q22 + z * q2332 + q2442)
            + z * (z * q33 + q3443)
            + q44;

        let (t0, t1) = quadratic_roots(a, b, c);
        for t in [t0, t1] {
            if t.is_finite() {
                let p = ray.solve(t);
                hits.push(ObjectHit::new(t, p, self.normal_at(p)));
            }
        }
        hits.sort_by(|a, b| a.t.partial_cmp(&b.t).expect("finite roots"));
        hits
    }

    pub fn normal_at(&self, p: Point3) -> Vector3 {
        let grad = self.coefficients.apply4(Vector4::from_point(p).as_array());
        (Vector3::new(grad[0], grad[1], grad[2]) * 2.0).normalized()
    }

    pub fn is_surface_point(&self, p: Point3) -> bool {
        let h = Vector4::from_point(p);
        let qp = self.coefficients.apply4(h.as_array());
        nearly_zero(h.dot(Vector4::new(qp[0], qp[1], qp[2], qp[3])))
    }

    /// General quadrics carry no intrinsic parameterization; textured
    /// surfaces set a reducer on the medium instead.
    pub fn map(&self, _p: Point3) -> Point2 {
        Point2::new(0.0, 0.0)
    }
}
