mod thin_lens;

pub use thin_lens::*;

use crate::core::ray::Ray;
use crate::core::rng::Rng;

#[enum_dispatch::enum_dispatch(Camera)]
pub trait CameraT: Send + Sync {
    /// Generate a primary ray through the image plane at `point = (s, t)`,
    /// both in [0, 1], where `t = 1` is the top row. The rng feeds lens
    /// sampling for depth of field.
    fn generate_ray(&self, point: (f32, f32), rng: &mut Rng) -> Ray;
}

#[enum_dispatch::enum_dispatch]
pub enum Camera {
    ThinLensCamera,
}
