use crate::core::color::Color;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;

use super::{util, MaterialT, ScatterRecord};

/// Specular surface: mirror reflection perturbed by a fuzz sphere. Fuzz is
/// clamped to [0, 1] at construction, never validated at use.
#[derive(Clone, Copy)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    #[cfg(test)]
    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }
}

impl MaterialT for Metal {
    fn scatter(&self, ray: &Ray, inter: &Intersection<'_>, rng: &mut Rng) -> Option<ScatterRecord> {
        let reflected = util::reflect(ray.direction.normalize(), inter.normal);
        let direction = reflected + self.fuzz * rng.uniform_in_sphere();

        // A fuzzed direction that dips below the surface is absorbed.
        if direction.dot(inter.normal) > 0.0 {
            Some(ScatterRecord {
                attenuation: self.albedo,
                scattered: Ray::new(inter.position, direction),
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grazing_setup() -> (Ray, Intersection<'static>) {
        let ray = Ray::new(
            glam::Vec3A::new(-1.0, 1.0, 0.0),
            glam::Vec3A::new(1.0, -1.0, 0.0),
        );
        let mut inter = Intersection::default();
        inter.position = glam::Vec3A::ZERO;
        inter.set_face_normal(&ray, glam::Vec3A::new(0.0, 1.0, 0.0));
        (ray, inter)
    }

    #[test]
    fn zero_fuzz_is_a_deterministic_mirror() {
        let material = Metal::new(Color::new(0.8, 0.8, 0.8), 0.0);
        let (ray, inter) = grazing_setup();
        let expected = util::reflect(ray.direction.normalize(), inter.normal);

        let mut rng = Rng::with_seed(5);
        for _ in 0..16 {
            let scatter = material.scatter(&ray, &inter, &mut rng).unwrap();
            assert!((scatter.scattered.direction - expected).length() < 1e-6);
        }
    }

    #[test]
    fn scattered_ray_stays_above_surface() {
        let material = Metal::new(Color::WHITE, 1.0);
        let (ray, inter) = grazing_setup();
        let mut rng = Rng::with_seed(9);
        for _ in 0..128 {
            if let Some(scatter) = material.scatter(&ray, &inter, &mut rng) {
                assert!(scatter.scattered.direction.dot(inter.normal) > 0.0);
            }
        }
    }

    #[test]
    fn fuzz_is_clamped_at_construction() {
        assert_eq!(Metal::new(Color::WHITE, 5.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::WHITE, -1.0).fuzz(), 0.0);
        assert_eq!(Metal::new(Color::WHITE, 0.25).fuzz(), 0.25);
    }
}
