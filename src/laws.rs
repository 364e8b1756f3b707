//! The little laws of optics the shader leans on, each returning new vectors
//! or plain coefficients instead of angles.

use crate::math::Vector3;
use crate::precision::Real;

/// Perfect mirror reflection of the incident vector `i` about the unit
/// normal `n`: `i − 2·(n·i)·n`. Preserves the incident magnitude.
#[inline]
pub fn reflection(n: Vector3, i: Vector3) -> Vector3 {
    i - 2.0 * n.dot(i) * n
}

/// Snell's-law refraction of the unit incident `i` crossing from a medium of
/// index `eta1` into `eta2`, with `n` the unit surface normal pointing
/// *against* the incident direction.
///
/// Returns the null vector when total internal reflection occurs (the
/// refraction angle would need `sin² > 1`).
pub fn snell(n: Vector3, i: Vector3, eta1: Real, eta2: Real) -> Vector3 {
    let eta = eta1 / eta2;
    let cos_theta = n.dot(i); // negative: n opposes i
    let sin2_phi = eta * eta * (1.0 - cos_theta * cos_theta);
    if sin2_phi <= 1.0 {
        (eta * i) - ((eta * cos_theta + (1.0 - sin2_phi).sqrt()) * n)
    } else {
        Vector3::zero()
    }
}

/// Fresnel reflectance of a dielectric interface, averaged over the two
/// polarizations:
///
/// ```text
///   Rs = ((n₁·cosθᵢ − n₂·cosθₜ) / (n₁·cosθᵢ + n₂·cosθₜ))²
///   Rp = ((n₂·cosθᵢ − n₁·cosθₜ) / (n₂·cosθᵢ + n₁·cosθₜ))²
/// ```
///
/// The transmittance coefficient is `1 − fresnel(...)`.
pub fn fresnel(n1: Real, n2: Real, theta_i: Real, theta_t: Real) -> Real {
    let cos_i = theta_i.cos();
    let cos_t = theta_t.cos();
    let rs = (n1 * cos_i - n2 * cos_t) / (n1 * cos_i + n2 * cos_t);
    let rp = (n2 * cos_i - n1 * cos_t) / (n2 * cos_i + n1 * cos_t);
    0.5 * (rs * rs + rp * rp)
}

/// Schlick's approximation of the Fresnel reflectance given only the
/// incident angle from the normal.
pub fn schlick(n1: Real, n2: Real, theta: Real) -> Real {
    let r0 = ((n1 - n2) / (n1 + n2)).powi(2);
    let one_minus_cos = 1.0 - theta.cos();
    r0 + (1.0 - r0) * one_minus_cos.powi(5)
}

/// Beer's-law attenuation over a traveled `distance` inside a medium with
/// dropoff coefficient `c` in [0, 1]. Always in (0, 1], monotonically
/// non-increasing in distance.
#[inline]
pub fn beers(distance: Real, c: Real) -> Real {
    (-distance * c).exp()
}

/// Inverse-square falloff shifted so zero distance yields exactly 1.
#[inline]
pub fn inverse_square(distance: Real) -> Real {
    debug_assert!(distance >= 0.0, "negative distance {distance}");
    let b = distance + 1.0;
    1.0 / (b * b)
}
