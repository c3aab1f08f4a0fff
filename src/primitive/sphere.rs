use crate::core::intersection::Intersection;
use crate::core::ray::Ray;

use super::PrimitiveT;

/// Sphere primitive. The radius may be negative: the quadratic below only
/// sees it squared, but the outward normal `(point - center) / radius`
/// inverts, which is how hollow glass shells get their inward-facing
/// normals. Construction must not clamp it.
#[derive(Clone, Copy)]
pub struct Sphere {
    center: glam::Vec3A,
    radius: f32,
}

impl Sphere {
    pub fn new(center: glam::Vec3A, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Solve `a t^2 + 2 half_b t + c = 0` for the ray against this sphere.
    /// The half-b form drops a factor of two and conditions the
    /// discriminant better than the textbook quadratic.
    fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32)> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let half_b = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;
        let delta = half_b * half_b - a * c;
        if delta >= 0.0 {
            let sqrt_delta = delta.sqrt();
            let min = (-half_b - sqrt_delta) / a;
            let max = (-half_b + sqrt_delta) / a;
            Some((min, max))
        } else {
            None
        }
    }
}

impl PrimitiveT for Sphere {
    fn intersect(&self, ray: &Ray, inter: &mut Intersection<'_>) -> bool {
        if let Some((min, max)) = self.intersect_ray(ray) {
            // Prefer the nearer root; fall back to the farther one when the
            // nearer lies outside the accepted interval (ray origin inside
            // the sphere).
            let mut root = min;
            if root < ray.t_min || root > inter.t {
                root = max;
                if root < ray.t_min || root > inter.t {
                    return false;
                }
            }
            inter.t = root;
            inter.position = ray.point_at(root);
            let outward_normal = (inter.position - self.center) / self.radius;
            inter.set_face_normal(ray, outward_normal);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_ray_toward(center: glam::Vec3A) -> Ray {
        Ray::new(glam::Vec3A::ZERO, center.normalize())
    }

    #[test]
    fn head_on_hit_reports_exact_record() {
        let sphere = Sphere::new(glam::Vec3A::new(0.0, 0.0, -1.0), 0.5);
        let ray = unit_ray_toward(glam::Vec3A::new(0.0, 0.0, -1.0));
        let mut inter = Intersection::default();
        assert!(sphere.intersect(&ray, &mut inter));
        assert!((inter.t - 0.5).abs() < 1e-6);
        assert_eq!(inter.position, glam::Vec3A::new(0.0, 0.0, -0.5));
        assert_eq!(inter.normal, glam::Vec3A::new(0.0, 0.0, 1.0));
        assert!(inter.front_face);
    }

    #[test]
    fn hit_is_within_bounds_and_normal_is_unit() {
        let sphere = Sphere::new(glam::Vec3A::new(0.3, -0.2, -2.0), 0.7);
        let ray = unit_ray_toward(glam::Vec3A::new(0.3, -0.2, -2.0));
        let mut inter = Intersection::with_t_max(100.0);
        assert!(sphere.intersect(&ray, &mut inter));
        assert!(inter.t >= ray.t_min && inter.t <= 100.0);
        assert!((inter.normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn negative_radius_keeps_t_and_flips_face() {
        let direction = glam::Vec3A::new(0.0, 0.0, -1.0);
        let ray = Ray::new(glam::Vec3A::ZERO, direction);

        let solid = Sphere::new(glam::Vec3A::new(0.0, 0.0, -1.0), 0.5);
        let shell = Sphere::new(glam::Vec3A::new(0.0, 0.0, -1.0), -0.5);

        let mut solid_inter = Intersection::default();
        let mut shell_inter = Intersection::default();
        assert!(solid.intersect(&ray, &mut solid_inter));
        assert!(shell.intersect(&ray, &mut shell_inter));

        // Same quadratic, same roots; only the outward normal inverts, which
        // shows up as the opposite face orientation.
        assert!((solid_inter.t - shell_inter.t).abs() < 1e-6);
        assert!(solid_inter.front_face);
        assert!(!shell_inter.front_face);
        assert_eq!(solid_inter.normal, shell_inter.normal);
    }

    #[test]
    fn miss_leaves_record_untouched() {
        let sphere = Sphere::new(glam::Vec3A::new(0.0, 10.0, 0.0), 0.5);
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::new(0.0, 0.0, -1.0));
        let mut inter = Intersection::default();
        assert!(!sphere.intersect(&ray, &mut inter));
        assert_eq!(inter.t, f32::MAX);
    }

    #[test]
    fn origin_inside_sphere_takes_far_root() {
        let sphere = Sphere::new(glam::Vec3A::ZERO, 2.0);
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::new(0.0, 0.0, -1.0));
        let mut inter = Intersection::default();
        assert!(sphere.intersect(&ray, &mut inter));
        assert!((inter.t - 2.0).abs() < 1e-6);
        // Struck from inside, so the stored normal opposes the ray.
        assert!(!inter.front_face);
        assert_eq!(inter.normal, glam::Vec3A::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn hit_beyond_t_max_is_rejected() {
        let sphere = Sphere::new(glam::Vec3A::new(0.0, 0.0, -10.0), 0.5);
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::new(0.0, 0.0, -1.0));
        let mut inter = Intersection::with_t_max(1.0);
        assert!(!sphere.intersect(&ray, &mut inter));
    }
}
