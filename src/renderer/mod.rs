mod pool;
mod pt;
pub mod util;

pub use pool::*;
pub use pt::*;

use std::sync::Arc;

use crate::camera::Camera;
use crate::core::scene::Scene;

pub struct OutputConfig {
    pub width: u32,
    pub height: u32,
    pub output_filename: String,
}

#[enum_dispatch::enum_dispatch(Renderer)]
pub trait RendererT: Send + Sync {
    fn render(
        &self,
        scene: Arc<Scene>,
        camera: Arc<Camera>,
        config: &OutputConfig,
    ) -> anyhow::Result<()>;
}

#[enum_dispatch::enum_dispatch]
pub enum Renderer {
    PathTracer,
}
