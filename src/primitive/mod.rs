mod sphere;

pub use sphere::*;

use crate::core::intersection::Intersection;
use crate::core::ray::Ray;

#[enum_dispatch::enum_dispatch(Primitive)]
pub trait PrimitiveT: Send + Sync {
    /// Test the ray against this primitive within `(ray.t_min, inter.t)`.
    /// On a hit, tighten `inter` to the new closest intersection and return
    /// true; otherwise leave it untouched.
    fn intersect(&self, ray: &Ray, inter: &mut Intersection<'_>) -> bool;
}

#[enum_dispatch::enum_dispatch]
#[derive(Clone, Copy)]
pub enum Primitive {
    Sphere,
}
