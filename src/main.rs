use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use structopt::StructOpt;

mod camera;
mod core;
mod loader;
mod material;
mod primitive;
mod renderer;

use crate::core::color::Color;
use crate::core::scene::Scene;

use camera::ThinLensCamera;
use loader::{RenderSettings, SceneDescription};
use material::{Dielectric, Lambert, Metal};
use primitive::Sphere;
use renderer::{OutputConfig, PathTracer, Renderer, RendererT};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "simple-ray-tracer",
    about = "Offline stochastic ray tracer for sphere scenes"
)]
struct Opt {
    /// Scene JSON to render; without one, a built-in demo scene is used
    #[structopt(parse(from_os_str))]
    scene: Option<PathBuf>,

    /// Output image width in pixels
    #[structopt(long)]
    width: Option<u32>,

    /// Output image height in pixels
    #[structopt(long)]
    height: Option<u32>,

    /// Samples per pixel
    #[structopt(long)]
    spp: Option<u32>,

    /// Maximum scatter depth per light path
    #[structopt(long)]
    max_depth: Option<u32>,

    /// Worker thread count, defaults to the logical cpu count
    #[structopt(long)]
    threads: Option<u32>,

    /// Base seed for reproducible renders; omit for entropy seeding
    #[structopt(long)]
    seed: Option<u64>,

    /// Output image path (.ppm for plain text, anything else goes through
    /// the image crate)
    #[structopt(short, long)]
    output: Option<String>,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let description = match &opt.scene {
        Some(path) => {
            log::info!("loading scene '{}'", path.display());
            loader::load(path)?
        }
        None => {
            log::info!("no scene file given, using the built-in demo scene");
            demo_scene(
                opt.width.unwrap_or(400),
                opt.height.unwrap_or(225),
            )
        }
    };

    let SceneDescription {
        scene,
        camera,
        settings,
        output,
    } = description;

    let settings = RenderSettings {
        spp: opt.spp.unwrap_or(settings.spp),
        max_depth: opt.max_depth.unwrap_or(settings.max_depth),
        threads: opt.threads.or(settings.threads),
        seed: opt.seed.or(settings.seed),
    };
    let output = OutputConfig {
        width: opt.width.unwrap_or(output.width),
        height: opt.height.unwrap_or(output.height),
        output_filename: opt.output.unwrap_or(output.output_filename),
    };

    let num_threads = settings
        .threads
        .unwrap_or_else(|| num_cpus::get() as u32);
    let renderer = Renderer::from(PathTracer::new(
        settings.spp,
        settings.max_depth,
        num_threads,
        settings.seed,
    ));

    let begin_time = std::time::Instant::now();
    renderer.render(scene, camera, &output)?;
    log::info!(
        "finished '{}', time used: {:.2?}",
        output.output_filename,
        begin_time.elapsed()
    );

    Ok(())
}

/// The classic three-sphere arrangement: diffuse ground and center sphere,
/// a hollow glass shell on the left (negative-radius inner sphere), fuzzless
/// metal on the right.
fn demo_scene(width: u32, height: u32) -> SceneDescription {
    let mut scene = Scene::new();
    scene.add(
        Sphere::new(glam::Vec3A::new(0.0, -100.5, -1.0), 100.0),
        Lambert::new(Color::new(0.8, 0.8, 0.0)),
    );
    scene.add(
        Sphere::new(glam::Vec3A::new(0.0, 0.0, -1.0), 0.5),
        Lambert::new(Color::new(0.1, 0.2, 0.5)),
    );
    scene.add(
        Sphere::new(glam::Vec3A::new(-1.0, 0.0, -1.0), 0.5),
        Dielectric::new(1.5),
    );
    scene.add(
        Sphere::new(glam::Vec3A::new(-1.0, 0.0, -1.0), -0.45),
        Dielectric::new(1.5),
    );
    scene.add(
        Sphere::new(glam::Vec3A::new(1.0, 0.0, -1.0), 0.5),
        Metal::new(Color::new(0.8, 0.6, 0.2), 0.0),
    );

    let aspect = width as f32 / height as f32;
    let camera = ThinLensCamera::new(
        glam::Vec3A::new(-2.0, 2.0, 1.0),
        glam::Vec3A::new(0.0, 0.0, -1.0),
        glam::Vec3A::new(0.0, 1.0, 0.0),
        20.0,
        aspect,
        0.0,
        (glam::Vec3A::new(-2.0, 2.0, 1.0) - glam::Vec3A::new(0.0, 0.0, -1.0)).length(),
    );

    SceneDescription {
        scene: Arc::new(scene),
        camera: Arc::new(camera.into()),
        settings: RenderSettings::default(),
        output: OutputConfig {
            width,
            height,
            output_filename: "output.ppm".to_string(),
        },
    }
}
