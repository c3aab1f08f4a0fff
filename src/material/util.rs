/// Mirror `v` about the surface normal `n`.
pub fn reflect(v: glam::Vec3A, n: glam::Vec3A) -> glam::Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Bend the unit vector `uv` through the surface by Snell's law, with
/// `etai_over_etat` the ratio of refractive indices across the interface.
pub fn refract(uv: glam::Vec3A, n: glam::Vec3A, etai_over_etat: f32) -> glam::Vec3A {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation of the Fresnel reflectance at `cosine` incidence.
pub fn reflectance(cosine: f32, etai_over_etat: f32) -> f32 {
    let r0 = (1.0 - etai_over_etat) / (1.0 + etai_over_etat);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect_mirrors_about_normal() {
        let v = glam::Vec3A::new(1.0, -1.0, 0.0);
        let n = glam::Vec3A::new(0.0, 1.0, 0.0);
        assert_eq!(reflect(v, n), glam::Vec3A::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn refract_with_matched_indices_is_identity() {
        let uv = glam::Vec3A::new(1.0, -1.0, 0.0).normalize();
        let n = glam::Vec3A::new(0.0, 1.0, 0.0);
        let out = refract(uv, n, 1.0);
        assert!((out - uv).length() < 1e-5);
    }

    #[test]
    fn refract_obeys_snells_law() {
        // Entering glass at 45 degrees: sin(out) = sin(45) / 1.5.
        let uv = glam::Vec3A::new(1.0, -1.0, 0.0).normalize();
        let n = glam::Vec3A::new(0.0, 1.0, 0.0);
        let out = refract(uv, n, 1.0 / 1.5);
        let sin_in = uv.x;
        let sin_out = out.x / out.length();
        assert!((sin_out - sin_in / 1.5).abs() < 1e-5);
    }

    #[test]
    fn reflectance_ranges_from_r0_to_one() {
        let ratio: f32 = 1.0 / 1.5;
        let r0 = ((1.0 - ratio) / (1.0 + ratio)).powi(2);
        assert!((reflectance(1.0, ratio) - r0).abs() < 1e-6);
        assert!((reflectance(0.0, ratio) - 1.0).abs() < 1e-6);
    }
}
