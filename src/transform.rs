//! The entity pose: world position, rotation, and (non-uniform) scale.
//!
//! Every object and camera carries one of these. The composed homogeneous
//! matrix is `T · (R · S)` — scale, then rotate, then translate when applied
//! to an object-space point — and the inverse is recomputed eagerly on every
//! mutation, so lookups are always just a multiply. Vectors transform through
//! the 3×3 rotation alone; points go through the full 4×4.

use crate::error::{Error, Result};
use crate::math::{rodrigues, Point3, Ray, Vector3, Vector4};
use crate::matrix::Matrix;
use crate::precision::{nearly_zero, Angle, Real};

/// A 3×3 rotation about one of the canonical axes or an arbitrary unit axis.
pub fn axis_rotation(axis: Vector3, angle: Angle) -> Matrix {
    let k = axis.normalized();
    let theta = angle.radians();
    // columns are the rotated basis vectors
    let cx = rodrigues(k, Vector3::unit_x(), theta);
    let cy = rodrigues(k, Vector3::unit_y(), theta);
    let cz = rodrigues(k, Vector3::unit_z(), theta);
    Matrix::from_rows(&[&[cx.x, cy.x, cz.x], &[cx.y, cy.y, cz.y], &[cx.z, cy.z, cz.z]])
}

/// The pose of an entity in the scene.
#[derive(Debug, Clone)]
pub struct Transform {
    position: Point3,
    rotation: Matrix,
    inv_rotation: Matrix,
    scaling: Vector3,
    forward: Matrix,
    inverse: Matrix,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            rotation: Matrix::identity(3),
            inv_rotation: Matrix::identity(3),
            scaling: Vector3::new(1.0, 1.0, 1.0),
            forward: Matrix::identity(4),
            inverse: Matrix::identity(4),
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(position: Point3) -> Self {
        let mut t = Self::default();
        t.set_position(position);
        t
    }

    /// The entity's position in world space.
    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn rotation(&self) -> &Matrix {
        &self.rotation
    }

    pub fn scaling(&self) -> Vector3 {
        self.scaling
    }

    pub fn set_position(&mut self, world_point: Point3) {
        self.position = world_point;
        self.recompute();
    }

    /// Moves the entity by a world-space displacement.
    pub fn move_by(&mut self, world_vector: Vector3) {
        self.position += world_vector;
        self.recompute();
    }

    /// Sets the rotation from an arbitrary 3×3 matrix. The caller owns the
    /// orthonormality of what it passes in.
    pub fn set_rotation_matrix(&mut self, rotation: Matrix) -> Result<()> {
        self.inv_rotation = rotation.inverse()?;
        self.rotation = rotation;
        self.recompute();
        Ok(())
    }

    /// Sets the rotation from roll/pitch/yaw, composed as `Rz · Ry · Rx`.
    /// Callers that need a different convention build the matrix themselves
    /// and use [`Transform::set_rotation_matrix`].
    pub fn set_rotation(&mut self, x: Angle, y: Angle, z: Angle) {
        let rx = axis_rotation(Vector3::unit_x(), x);
        let ry = axis_rotation(Vector3::unit_y(), y);
        let rz = axis_rotation(Vector3::unit_z(), z);
        let r = &(&rz * &ry) * &rx;
        // a composition of axis rotations is orthonormal, its inverse exists
        self.inv_rotation = r.transposed();
        self.rotation = r;
        self.recompute();
    }

    /// Sets the rotation as a spin of `angle` around an arbitrary axis,
    /// built through Rodrigues rather than the composed XYZ form.
    pub fn set_rotation_axis_angle(&mut self, axis: Vector3, angle: Angle) {
        let r = axis_rotation(axis, angle);
        self.inv_rotation = r.transposed();
        self.rotation = r;
        self.recompute();
    }

    /// Sets the per-axis scale. Components must be nonzero or the composed
    /// transform would be singular.
    pub fn set_scale(&mut self, x: Real, y: Real, z: Real) -> Result<()> {
        if nearly_zero(x) || nearly_zero(y) || nearly_zero(z) {
            return Err(Error::DegenerateGeometry(format!(
                "scale components must be nonzero, got ({x}, {y}, {z})"
            )));
        }
        self.scaling = Vector3::new(x, y, z);
        self.recompute();
        Ok(())
    }

    /// Object space → world space for points.
    pub fn forward_point(&self, object_point: Point3) -> Point3 {
        let h = self.forward.apply4(Vector4::from_point(object_point).as_array());
        Point3::new(h[0], h[1], h[2])
    }

    /// Object space → world space for free vectors (rotation only).
    pub fn forward_vector(&self, object_vector: Vector3) -> Vector3 {
        let v = self
            .rotation
            .apply3([object_vector.x, object_vector.y, object_vector.z]);
        Vector3::new(v[0], v[1], v[2])
    }

    pub fn forward_ray(&self, object_ray: Ray) -> Ray {
        Ray::new(
            self.forward_point(object_ray.origin),
            self.forward_vector(object_ray.direction),
        )
    }

    /// World space → object space for points.
    pub fn reverse_point(&self, world_point: Point3) -> Point3 {
        let h = self.inverse.apply4(Vector4::from_point(world_point).as_array());
        Point3::new(h[0], h[1], h[2])
    }

    /// World space → object space for free vectors.
    pub fn reverse_vector(&self, world_vector: Vector3) -> Vector3 {
        let v = self
            .inv_rotation
            .apply3([world_vector.x, world_vector.y, world_vector.z]);
        Vector3::new(v[0], v[1], v[2])
    }

    pub fn reverse_ray(&self, world_ray: Ray) -> Ray {
        Ray::new(
            self.reverse_point(world_ray.origin),
            self.reverse_vector(world_ray.direction),
        )
    }

    /// Right-handedness survives rotation-then-scale only while the product
    /// of the scale components stays positive.
    pub fn is_right_handed(&self) -> bool {
        self.scaling.x * self.scaling.y * self.scaling.z > 0.0
    }

    fn recompute(&mut self) {
        let mut t = Matrix::identity(4);
        t[(0, 3)] = self.position.x;
        t[(1, 3)] = self.position.y;
        t[(2, 3)] = self.position.z;
        let mut s = Matrix::identity(4);
        s[(0, 0)] = self.scaling.x;
        s[(1, 1)] = self.scaling.y;
        s[(2, 2)] = self.scaling.z;
        let mut r = Matrix::identity(4);
        self.rotation.assign_into(&mut r, 0, 0);
        // applied to a point: scale, rotate, then translate
        self.forward = &t * &(&r * &s);
        self.inverse = self
            .forward
            .inverse()
            .expect("pose transform is invertible: scale components are nonzero");
    }
}
