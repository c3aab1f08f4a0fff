use crate::core::ray::Ray;
use crate::material::Material;

/// Result of a successful ray/surface intersection. `t` doubles as the upper
/// bound for further intersection tests, so a default record starts at
/// `f32::MAX` and shrinks as closer hits are found.
pub struct Intersection<'a> {
    pub t: f32,
    pub position: glam::Vec3A,
    pub normal: glam::Vec3A,
    pub front_face: bool,
    pub material: Option<&'a Material>,
}

impl Default for Intersection<'_> {
    fn default() -> Self {
        Self {
            t: f32::MAX,
            position: glam::Vec3A::ZERO,
            normal: glam::Vec3A::Y,
            front_face: true,
            material: None,
        }
    }
}

impl<'a> Intersection<'a> {
    #[allow(dead_code)]
    pub fn with_t_max(t_max: f32) -> Self {
        Self {
            t: t_max,
            ..Default::default()
        }
    }

    /// Store the surface orientation. The stored normal always opposes the
    /// incoming ray; `front_face` records which side was struck.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: glam::Vec3A) {
        self.front_face = ray.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}
