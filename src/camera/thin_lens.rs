use crate::core::ray::Ray;
use crate::core::rng::Rng;

use super::CameraT;

/// Look-at camera with an optional thin-lens aperture. With aperture zero it
/// degenerates to a pinhole and generates no lens samples.
pub struct ThinLensCamera {
    origin: glam::Vec3A,
    lower_left_corner: glam::Vec3A,
    horizontal: glam::Vec3A,
    vertical: glam::Vec3A,
    u: glam::Vec3A,
    v: glam::Vec3A,
    lens_radius: f32,
}

impl ThinLensCamera {
    pub fn new(
        eye: glam::Vec3A,
        look_at: glam::Vec3A,
        up: glam::Vec3A,
        vertical_fov_deg: f32,
        aspect: f32,
        aperture: f32,
        focus_distance: f32,
    ) -> Self {
        let theta = vertical_fov_deg.to_radians();
        let half_height = (theta * 0.5).tan();
        let viewport_height = 2.0 * half_height;
        let viewport_width = aspect * viewport_height;

        let w = (eye - look_at).normalize();
        let u = up.cross(w).normalize();
        let v = w.cross(u);

        let horizontal = focus_distance * viewport_width * u;
        let vertical = focus_distance * viewport_height * v;
        let lower_left_corner = eye - horizontal * 0.5 - vertical * 0.5 - focus_distance * w;

        Self {
            origin: eye,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            lens_radius: aperture * 0.5,
        }
    }

    /// Pinhole construction: no aperture, focus plane at unit distance.
    #[allow(dead_code)]
    pub fn pinhole(
        eye: glam::Vec3A,
        look_at: glam::Vec3A,
        up: glam::Vec3A,
        vertical_fov_deg: f32,
        aspect: f32,
    ) -> Self {
        Self::new(eye, look_at, up, vertical_fov_deg, aspect, 0.0, 1.0)
    }
}

impl CameraT for ThinLensCamera {
    fn generate_ray(&self, point: (f32, f32), rng: &mut Rng) -> Ray {
        let (s, t) = point;
        let offset = if self.lens_radius > 0.0 {
            let (disk_x, disk_y) = rng.uniform_in_disk();
            self.u * (self.lens_radius * disk_x) + self.v * (self.lens_radius * disk_y)
        } else {
            glam::Vec3A::ZERO
        };

        let origin = self.origin + offset;
        let direction =
            self.lower_left_corner + s * self.horizontal + t * self.vertical - origin;
        Ray::new(origin, direction)
    }
}
