//! The pinhole camera, and a stereo pair built from two of them.
//!
//! The world is Z-up and the default camera looks down +X with +Y to its
//! left. The intrinsics carry a negative principal-point offset so the image
//! plane runs (0,0)..(W,H) with (0,0) at the top-left; a cast ray starts at
//! the pinhole and passes through its image point on the focal plane at
//! parameter 1.

use crate::error::{Error, Result};
use crate::math::{Point2, Point3, Ray, Vector3};
use crate::matrix::Matrix;
use crate::precision::{Angle, Real};
use crate::transform::axis_rotation;

#[derive(Debug, Clone)]
pub struct Camera {
    position: Point3,
    look_at: Point3,
    forward: Vector3,
    left: Vector3,
    up: Vector3,
    width: usize,
    height: usize,
    fov: Angle,
    focal: Real,
}

impl Camera {
    /// A camera of the given raster size and *horizontal* field of view,
    /// sitting at the origin looking down +X.
    pub fn new(height: usize, width: usize, fov: Angle) -> Result<Self> {
        let degrees = fov.degrees();
        if !(0.0 < degrees && degrees < 180.0) {
            return Err(Error::OutOfDomain(format!(
                "field of view must be in (0°, 180°), got {degrees}°"
            )));
        }
        let half_width = width as Real / 2.0;
        let focal = half_width / (fov.radians() / 2.0).tan();
        Ok(Self {
            position: Point3::origin(),
            look_at: Point3::new(1.0, 0.0, 0.0),
            forward: Vector3::unit_x(),
            left: Vector3::unit_y(),
            up: Vector3::unit_z(),
            width,
            height,
            fov,
            focal,
        })
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn look_at(&self) -> Point3 {
        self.look_at
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn fov(&self) -> Angle {
        self.fov
    }

    /// The camera basis as rays anchored at the position.
    pub fn forward(&self) -> Ray {
        Ray::new(self.position, self.forward)
    }

    pub fn left(&self) -> Ray {
        Ray::new(self.position, self.left)
    }

    pub fn up(&self) -> Ray {
        Ray::new(self.position, self.up)
    }

    /// The 3×3 intrinsics with the negative principal-point offset.
    pub fn intrinsics(&self) -> Matrix {
        let cx = self.width as Real / 2.0;
        let cy = self.height as Real / 2.0;
        Matrix::from_rows(&[
            &[self.focal, 0.0, -cx],
            &[0.0, self.focal, -cy],
            &[0.0, 0.0, 1.0],
        ])
    }

    /// Places the camera at `from` looking toward `at`, rebuilding the
    /// orthonormal basis against the world up (+Z). Looking straight along
    /// ±Z falls back to +Y as the reference so the pole stays usable.
    pub fn move_to(&mut self, from: Point3, at: Point3) {
        self.position = from;
        self.look_at = at;
        self.forward = (at - from).normalized();
        let world_up = Vector3::unit_z();
        let reference = if self.forward.parallel(world_up) {
            Vector3::unit_y()
        } else {
            world_up
        };
        self.left = reference.cross(self.forward).normalized();
        self.up = self.forward.cross(self.left);
    }

    /// Spins the default basis by roll/pitch/yaw instead of a look-at.
    pub fn set_rotation(&mut self, x: Angle, y: Angle, z: Angle) {
        let rx = axis_rotation(Vector3::unit_x(), x);
        let ry = axis_rotation(Vector3::unit_y(), y);
        let rz = axis_rotation(Vector3::unit_z(), z);
        let r = &(&rz * &ry) * &rx;
        let apply = |v: Vector3| {
            let out = r.apply3([v.x, v.y, v.z]);
            Vector3::new(out[0], out[1], out[2])
        };
        self.forward = apply(Vector3::unit_x());
        self.left = apply(Vector3::unit_y());
        self.up = apply(Vector3::unit_z());
        self.look_at = self.position + self.forward;
    }

    /// Casts the ray for an image-plane point: the inverse intrinsics put
    /// the point on the focal plane (left = cx − px, up = cy − py, forward =
    /// f), the basis carries it to world space, and the ray leaves the
    /// position through it — `solve(1)` lands on the focal plane.
    pub fn cast(&self, image_point: Point2) -> Ray {
        let cx = self.width as Real / 2.0;
        let cy = self.height as Real / 2.0;
        let through = self.forward * self.focal
            + self.left * (cx - image_point.x)
            + self.up * (cy - image_point.y);
        Ray::new(self.position, through)
    }
}

// ─── Stereo pair ────────────────────────────────────────────────────────────

/// How the two stereo views share one canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StereoLayout {
    LeftRight,
    TopBottom,
}

/// Two cameras separated by a baseline, toed in on the shared look-at point.
#[derive(Debug, Clone)]
pub struct StereoCamera {
    pub left_eye: Camera,
    pub right_eye: Camera,
    baseline: Real,
    pub layout: StereoLayout,
}

impl StereoCamera {
    pub fn new(
        height: usize,
        width: usize,
        fov: Angle,
        baseline: Real,
        layout: StereoLayout,
    ) -> Result<Self> {
        if baseline <= 0.0 {
            return Err(Error::OutOfDomain(format!(
                "stereo baseline must be positive, got {baseline}"
            )));
        }
        Ok(Self {
            left_eye: Camera::new(height, width, fov)?,
            right_eye: Camera::new(height, width, fov)?,
            baseline,
            layout,
        })
    }

    pub fn baseline(&self) -> Real {
        self.baseline
    }

    /// Places both eyes around `from`, each looking at the shared target —
    /// the toe-in falls out of the two look-at bases.
    pub fn move_to(&mut self, from: Point3, at: Point3) {
        // a scratch camera finds the center basis to split the baseline along
        let mut center = self.left_eye.clone();
        center.move_to(from, at);
        let half = center.left().direction * (self.baseline / 2.0);
        self.left_eye.move_to(from + half, at);
        self.right_eye.move_to(from - half, at);
    }

    /// Merges the two rendered views onto one canvas per the layout:
    /// side by side, or left eye above right.
    pub fn composite(&self, left: &crate::image::Image, right: &crate::image::Image) -> crate::image::Image {
        assert_eq!(left.width(), right.width(), "eye renders must match");
        assert_eq!(left.height(), right.height(), "eye renders must match");
        let (w, h) = (left.width(), left.height());
        let mut out = match self.layout {
            StereoLayout::LeftRight => crate::image::Image::new(h, w * 2),
            StereoLayout::TopBottom => crate::image::Image::new(h * 2, w),
        };
        out.output_space = left.output_space;
        for y in 0..h {
            for x in 0..w {
                match self.layout {
                    StereoLayout::LeftRight => {
                        out.set(y, x, left.at(y, x));
                        out.set(y, x + w, right.at(y, x));
                    }
                    StereoLayout::TopBottom => {
                        out.set(y, x, left.at(y, x));
                        out.set(y + h, x, right.at(y, x));
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision::EPSILON;

    #[test]
    fn default_basis_and_intrinsics() {
        let cam = Camera::new(2, 2, Angle::Degrees(90.0)).unwrap();
        assert_eq!(cam.forward().direction, Vector3::unit_x());
        assert_eq!(cam.left().direction, Vector3::unit_y());
        assert_eq!(cam.up().direction, Vector3::unit_z());
        let k = cam.intrinsics();
        assert!((k[(0, 0)] - 1.0).abs() < EPSILON);
        assert!((k[(0, 2)] + 1.0).abs() < EPSILON);
        assert!((k[(1, 2)] + 1.0).abs() < EPSILON);
    }

    #[test]
    fn casting_passes_through_the_focal_plane() {
        let cam = Camera::new(2, 2, Angle::Degrees(90.0)).unwrap();
        let expected = [
            (Point2::new(0.5, 0.5), Point3::new(1.0, 0.5, 0.5)),
            (Point2::new(1.5, 0.5), Point3::new(1.0, -0.5, 0.5)),
            (Point2::new(0.5, 1.5), Point3::new(1.0, 0.5, -0.5)),
            (Point2::new(1.5, 1.5), Point3::new(1.0, -0.5, -0.5)),
        ];
        for (image_point, world_point) in expected {
            let ray = cam.cast(image_point);
            assert_eq!(ray.origin, cam.position());
            assert_eq!(ray.solve(1.0), world_point);
        }
    }

    #[test]
    fn move_to_builds_an_orthonormal_basis() {
        let mut cam = Camera::new(120, 240, Angle::Degrees(55.0)).unwrap();
        cam.move_to(Point3::new(-1.0, 0.0, 0.0), Point3::origin());
        assert_eq!(cam.position(), Point3::new(-1.0, 0.0, 0.0));
        assert_eq!(cam.forward().direction, Vector3::unit_x());
        assert_eq!(cam.up().direction, Vector3::unit_z());
        assert_eq!(cam.left().direction, Vector3::unit_y());
        // basis stays orthonormal from any vantage
        cam.move_to(Point3::new(3.0, -2.0, 5.0), Point3::new(0.0, 1.0, 0.0));
        let f = cam.forward().direction;
        let l = cam.left().direction;
        let u = cam.up().direction;
        assert!(f.dot(l).abs() < EPSILON);
        assert!(f.dot(u).abs() < EPSILON);
        assert!((u.magnitude() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn looking_straight_down_does_not_degenerate() {
        let mut cam = Camera::new(4, 4, Angle::Degrees(90.0)).unwrap();
        cam.move_to(Point3::new(0.0, 0.0, 5.0), Point3::origin());
        assert_eq!(cam.forward().direction, -Vector3::unit_z());
        assert!(!cam.left().direction.is_null());
        assert!(!cam.up().direction.is_null());
        // center ray heads straight down
        let center = cam.cast(Point2::new(2.0, 2.0));
        assert_eq!(center.direction.normalized(), -Vector3::unit_z());
    }

    #[test]
    fn wide_fov_is_rejected() {
        assert!(Camera::new(10, 10, Angle::Degrees(180.0)).is_err());
        assert!(Camera::new(10, 10, Angle::Degrees(0.0)).is_err());
    }

    #[test]
    fn stereo_eyes_straddle_the_center_and_toe_in() {
        let mut stereo =
            StereoCamera::new(10, 10, Angle::Degrees(60.0), 1.0, StereoLayout::LeftRight).unwrap();
        stereo.move_to(Point3::new(-5.0, 0.0, 0.0), Point3::origin());
        let l = stereo.left_eye.position();
        let r = stereo.right_eye.position();
        assert!(((l - r).magnitude() - 1.0).abs() < EPSILON);
        // both converge on the target
        assert!(stereo.left_eye.forward().direction.dot(Vector3::unit_x()) > 0.9);
        assert!(stereo.right_eye.forward().direction.dot(Vector3::unit_x()) > 0.9);
        assert!(
            stereo
                .left_eye
                .forward()
                .direction
                .dot(stereo.right_eye.forward().direction)
                < 1.0
        );
    }

    #[test]
    fn stereo_composite_layouts() {
        use crate::color::colors;
        use crate::image::Image;

        let stereo =
            StereoCamera::new(4, 4, Angle::Degrees(60.0), 0.5, StereoLayout::LeftRight).unwrap();
        let mut left = Image::new(4, 4);
        let mut right = Image::new(4, 4);
        left.set(0, 0, colors::RED);
        right.set(0, 0, colors::BLUE);
        let side_by_side = stereo.composite(&left, &right);
        assert_eq!(side_by_side.width(), 8);
        assert_eq!(side_by_side.height(), 4);
        assert_eq!(side_by_side.at(0, 0), colors::RED);
        assert_eq!(side_by_side.at(0, 4), colors::BLUE);

        let stacked = StereoCamera::new(4, 4, Angle::Degrees(60.0), 0.5, StereoLayout::TopBottom)
            .unwrap()
            .composite(&left, &right);
        assert_eq!(stacked.width(), 4);
        assert_eq!(stacked.height(), 8);
        assert_eq!(stacked.at(4, 0), colors::BLUE);
    }
}
