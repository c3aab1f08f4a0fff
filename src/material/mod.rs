pub mod util;

mod dielectric;
mod lambert;
mod metal;

pub use dielectric::*;
pub use lambert::*;
pub use metal::*;

use crate::core::color::Color;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;

/// Outcome of a successful scatter: the ray to follow next and the
/// per-channel attenuation picked up at this bounce.
pub struct ScatterRecord {
    pub attenuation: Color,
    pub scattered: Ray,
}

#[enum_dispatch::enum_dispatch(Material)]
pub trait MaterialT: Send + Sync {
    /// Scatter the incoming ray at the intersection. `None` means the ray is
    /// absorbed and contributes nothing.
    fn scatter(&self, ray: &Ray, inter: &Intersection<'_>, rng: &mut Rng) -> Option<ScatterRecord>;
}

#[enum_dispatch::enum_dispatch]
#[derive(Clone, Copy)]
pub enum Material {
    Lambert,
    Metal,
    Dielectric,
}
