use crate::core::color::Color;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;

use super::{MaterialT, ScatterRecord};

/// Diffuse surface: scatters around the normal with a cosine-ish lobe built
/// from `normal + unit vector`, attenuated by the albedo.
#[derive(Clone, Copy)]
pub struct Lambert {
    albedo: Color,
}

impl Lambert {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl MaterialT for Lambert {
    fn scatter(&self, _ray: &Ray, inter: &Intersection<'_>, rng: &mut Rng) -> Option<ScatterRecord> {
        let mut direction = inter.normal + rng.uniform_on_sphere();

        // The random vector can cancel the normal almost exactly; fall back
        // to the normal rather than emit a degenerate ray.
        if direction.length_squared() < 1e-8 {
            direction = inter.normal;
        }

        Some(ScatterRecord {
            attenuation: self.albedo,
            scattered: Ray::new(inter.position, direction),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_scatters_with_exact_albedo() {
        let albedo = Color::new(0.7, 0.3, 0.1);
        let material = Lambert::new(albedo);
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::new(0.0, 0.0, -1.0));
        let mut inter = Intersection::default();
        inter.position = glam::Vec3A::new(0.0, 0.0, -0.5);
        inter.set_face_normal(&ray, glam::Vec3A::new(0.0, 0.0, 1.0));

        let mut rng = Rng::with_seed(3);
        for _ in 0..64 {
            let scatter = material.scatter(&ray, &inter, &mut rng);
            let scatter = scatter.expect("lambert never absorbs");
            assert_eq!(scatter.attenuation, albedo);
            assert_eq!(scatter.scattered.origin, inter.position);
            assert!(scatter.scattered.direction.length_squared() > 1e-8);
        }
    }
}
