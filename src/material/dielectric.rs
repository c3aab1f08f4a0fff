use crate::core::color::Color;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;

use super::{util, MaterialT, ScatterRecord};

/// Clear refractive surface (glass, water) characterized by a single index
/// of refraction. Light is split between reflection and refraction by
/// Schlick's approximation; impossible refraction falls back to reflection.
#[derive(Clone, Copy)]
pub struct Dielectric {
    ior: f32,
}

impl Dielectric {
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }
}

impl MaterialT for Dielectric {
    fn scatter(&self, ray: &Ray, inter: &Intersection<'_>, rng: &mut Rng) -> Option<ScatterRecord> {
        let etai_over_etat = if inter.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = ray.direction.normalize();
        let cos_theta = (-unit_direction).dot(inter.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = etai_over_etat * sin_theta > 1.0;
        let direction = if cannot_refract
            || util::reflectance(cos_theta, etai_over_etat) > rng.uniform_1d()
        {
            util::reflect(unit_direction, inter.normal)
        } else {
            util::refract(unit_direction, inter.normal, etai_over_etat)
        };

        Some(ScatterRecord {
            attenuation: Color::WHITE,
            scattered: Ray::new(inter.position, direction),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_internal_reflection_always_reflects() {
        // Leaving glass at a grazing angle: ior * sin_theta > 1, so
        // refraction is impossible no matter what the rng draws.
        let material = Dielectric::new(1.5);
        let ray = Ray::new(
            glam::Vec3A::new(-1.0, 0.5, 0.0),
            glam::Vec3A::new(1.0, -0.5, 0.0),
        );
        let mut inter = Intersection::default();
        inter.position = glam::Vec3A::ZERO;
        // Struck from inside the glass.
        inter.set_face_normal(&ray, glam::Vec3A::new(0.0, -1.0, 0.0));
        assert!(!inter.front_face);

        let expected = util::reflect(ray.direction.normalize(), inter.normal);
        let mut rng = Rng::with_seed(21);
        for _ in 0..64 {
            let scatter = material.scatter(&ray, &inter, &mut rng).unwrap();
            assert!((scatter.scattered.direction - expected).length() < 1e-6);
        }
    }

    #[test]
    fn always_scatters_with_white_attenuation() {
        let material = Dielectric::new(1.5);
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::new(0.0, -1.0, 0.0));
        let mut inter = Intersection::default();
        inter.position = glam::Vec3A::new(0.0, -1.0, 0.0);
        inter.set_face_normal(&ray, glam::Vec3A::new(0.0, 1.0, 0.0));

        let mut rng = Rng::with_seed(23);
        for _ in 0..64 {
            let scatter = material.scatter(&ray, &inter, &mut rng);
            assert_eq!(scatter.unwrap().attenuation, Color::WHITE);
        }
    }

    #[test]
    fn head_on_entry_mostly_refracts_straight_through() {
        // At normal incidence Schlick reflectance is about 0.04, so most
        // draws take the refracted branch, and refraction at normal
        // incidence keeps the direction.
        let material = Dielectric::new(1.5);
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::new(0.0, -1.0, 0.0));
        let mut inter = Intersection::default();
        inter.set_face_normal(&ray, glam::Vec3A::new(0.0, 1.0, 0.0));

        let mut rng = Rng::with_seed(25);
        let mut straight = 0;
        for _ in 0..256 {
            let scatter = material.scatter(&ray, &inter, &mut rng).unwrap();
            let direction = scatter.scattered.direction.normalize();
            if (direction - glam::Vec3A::new(0.0, -1.0, 0.0)).length() < 1e-5 {
                straight += 1;
            }
        }
        assert!(straight > 128);
    }
}
