//! Reductions from object-space surface points to (u,v) texture coordinates,
//! plus the golden-ratio sphere mapper the area lights sample with.

use crate::math::{Point2, Point3};
use crate::precision::{Real, PI, TAU};

/// An (x,y,z) → (u,v) reduction a medium can carry to override the shape's
/// native mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reducer {
    /// Latitude/longitude over a sphere of the given radius.
    Spherical { radius: Real },
    /// Angle around Z → u, height → v over a cylinder.
    Cylindrical { height: Real },
    /// Projection onto the XY axes, scaled and wrapped to [0,1).
    Planar { scale: Real },
    /// Ring angle → u, tube angle → v over a torus.
    Toroidal { ring: Real },
}

impl Reducer {
    pub fn reduce(&self, p: Point3) -> Point2 {
        match *self {
            Reducer::Spherical { radius } => spherical(p, radius),
            Reducer::Cylindrical { height } => cylindrical(p, height),
            Reducer::Planar { scale } => planar(p, scale),
            Reducer::Toroidal { ring } => toroidal(p, ring),
        }
    }
}

/// Latitude/longitude mapping: θ = atan2(y,x)/τ, φ = acos(z/r)/π,
/// (u,v) = (θ + ½, φ).
pub fn spherical(p: Point3, radius: Real) -> Point2 {
    let theta = p.y.atan2(p.x) / TAU;
    let phi = (p.z / radius).clamp(-1.0, 1.0).acos() / PI;
    Point2::new(theta + 0.5, phi)
}

/// Wraps θ around Z to u and the height to v, with z = −h/2 at v = 0.
pub fn cylindrical(p: Point3, height: Real) -> Point2 {
    let theta = p.y.atan2(p.x) / TAU;
    let v = (p.z / height + 0.5).clamp(0.0, 1.0);
    Point2::new(theta + 0.5, v)
}

/// Projects onto the XY axes scaled by `scale`, wrapped to [0,1).
pub fn planar(p: Point3, scale: Real) -> Point2 {
    let u = (p.x / scale).rem_euclid(1.0);
    let v = (p.y / scale).rem_euclid(1.0);
    Point2::new(u, v)
}

/// Two angles over a torus: around Z for u and around the tube section for
/// v, each remapped from (−π, π] to [0, 1]. The seam runs along the inner
/// edge at −X.
pub fn toroidal(p: Point3, ring: Real) -> Point2 {
    let t = p.y.atan2(p.x);
    let r_xy = (p.x * p.x + p.y * p.y).sqrt();
    // signed distance from the tube's center circle in the radial plane
    let d_rz = r_xy - ring;
    let b = p.z.atan2(d_rz);
    Point2::new((t + PI) / TAU, (b + PI) / TAU)
}

/// Flattens the six cuboid faces into a 3×2 grid, the layout UV unwrap tools
/// produce: ±X, ±Y on the top row, ±Z on the bottom.
pub fn cube_faces(p: Point3, half_extents: Point3) -> Point2 {
    let nx = (p.x / half_extents.x).clamp(-1.0, 1.0);
    let ny = (p.y / half_extents.y).clamp(-1.0, 1.0);
    let nz = (p.z / half_extents.z).clamp(-1.0, 1.0);
    // dominant axis picks the face; the in-face coordinates normalize to [0,1]
    let (cell, fu, fv) = if nx.abs() >= ny.abs() && nx.abs() >= nz.abs() {
        let face = if nx > 0.0 { 0 } else { 1 };
        (face, 0.5 * (ny + 1.0), 0.5 * (nz + 1.0))
    } else if ny.abs() >= nz.abs() {
        let face = if ny > 0.0 { 2 } else { 3 };
        (face, 0.5 * (nx + 1.0), 0.5 * (nz + 1.0))
    } else {
        let face = if nz > 0.0 { 4 } else { 5 };
        (face, 0.5 * (nx + 1.0), 0.5 * (ny + 1.0))
    };
    let col = (cell % 3) as Real;
    let row = (cell / 3) as Real;
    Point2::new((col + fu) / 3.0, (row + fv) / 2.0)
}

/// The `index`-th of `range` stratified points on the unit sphere, by the
/// golden-ratio spiral. Deterministic, so area-light shadows are
/// reproducible bit for bit.
pub fn golden_ratio_sphere(index: usize, range: usize) -> Point3 {
    debug_assert!(range > 0);
    let golden = (1.0 + (5.0 as Real).sqrt()) / 2.0;
    let i = index as Real;
    let theta = TAU * i / golden;
    let z = 1.0 - 2.0 * (i + 0.5) / range as Real;
    let r = (1.0 - z * z).max(0.0).sqrt();
    Point3::new(r * theta.cos(), r * theta.sin(), z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision::nearly_equal;

    #[test]
    fn spherical_poles_and_equator() {
        let north = spherical(Point3::new(0.0, 0.0, 1.0), 1.0);
        assert!(nearly_equal(north.y, 0.0));
        let south = spherical(Point3::new(0.0, 0.0, -1.0), 1.0);
        assert!(nearly_equal(south.y, 1.0));
        let equator = spherical(Point3::new(1.0, 0.0, 0.0), 1.0);
        assert!(nearly_equal(equator.x, 0.5));
        assert!(nearly_equal(equator.y, 0.5));
    }

    #[test]
    fn cylindrical_height_maps_to_v() {
        let bottom = cylindrical(Point3::new(1.0, 0.0, -1.0), 2.0);
        assert!(nearly_equal(bottom.y, 0.0));
        let top = cylindrical(Point3::new(1.0, 0.0, 1.0), 2.0);
        assert!(nearly_equal(top.y, 1.0));
    }

    #[test]
    fn planar_wraps_into_unit_square() {
        let p = planar(Point3::new(2.5, -0.25, 0.0), 1.0);
        assert!(nearly_equal(p.x, 0.5));
        assert!(nearly_equal(p.y, 0.75));
    }

    #[test]
    fn toroidal_outer_equator() {
        // the point farthest from the axis on the ring plane: tube angle 0
        // remaps to v = 0.5, and the +X seam-opposite lands at u = 0.5
        let p = toroidal(Point3::new(2.5, 0.0, 0.0), 2.0);
        assert!(nearly_equal(p.x, 0.5));
        assert!(nearly_equal(p.y, 0.5));
    }

    #[test]
    fn cube_faces_land_in_distinct_cells() {
        let he = Point3::new(1.0, 1.0, 1.0);
        let faces = [
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, -1.0),
        ];
        let mut cells = std::collections::BTreeSet::new();
        for f in faces {
            let uv = cube_faces(f, he);
            assert!((0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y));
            cells.insert(((uv.x * 3.0) as usize).min(2) + 3 * ((uv.y * 2.0) as usize).min(1));
        }
        assert_eq!(cells.len(), 6);
    }

    #[test]
    fn golden_ratio_points_sit_on_the_unit_sphere() {
        let n = 64;
        for i in 0..n {
            let p = golden_ratio_sphere(i, n);
            assert!(nearly_equal(p.as_vector().magnitude(), 1.0));
        }
        // stratification: first and last samples land near opposite poles
        assert!(golden_ratio_sphere(0, n).z > 0.9);
        assert!(golden_ratio_sphere(n - 1, n).z < -0.9);
    }

    #[test]
    fn golden_ratio_is_deterministic() {
        let a = golden_ratio_sphere(17, 64);
        let b = golden_ratio_sphere(17, 64);
        assert!(nearly_equal((a - b).magnitude(), 0.0));
    }
}
