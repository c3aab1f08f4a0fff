use std::sync::Arc;

use anyhow::Context;

use crate::camera::{Camera, CameraT};
use crate::core::color::Color;
use crate::core::film::{Film, UnsafeFilm};
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::material::MaterialT;

use super::pool::ThreadPool;
use super::{util, OutputConfig, RendererT};

pub struct PathTracer {
    spp: u32,
    max_depth: u32,
    num_threads: u32,
    seed: Option<u64>,
}

impl PathTracer {
    pub fn new(spp: u32, max_depth: u32, num_threads: u32, seed: Option<u64>) -> Self {
        Self {
            spp,
            max_depth,
            num_threads: num_threads.max(1),
            seed,
        }
    }

    /// Render into a fresh film. One job per worker; each job owns a
    /// disjoint set of scanlines and its own rng, so the shared film needs
    /// no locking.
    pub fn render_film(
        &self,
        scene: Arc<Scene>,
        camera: Arc<Camera>,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Film> {
        let film = UnsafeFilm::new(Film::new(width, height));
        let progress_bar = util::render_progress_bar(width, height);
        let mut pool = ThreadPool::new(self.num_threads);
        let num_threads = pool.num_threads();

        for tid in 0..num_threads {
            let scene = scene.clone();
            let camera = camera.clone();
            let film = film.clone();
            let progress_bar = progress_bar.clone();
            let spp = self.spp;
            let max_depth = self.max_depth;
            let seed = self.seed.map(|seed| seed.wrapping_add(tid as u64));
            let width_scale = 1.0 / width.saturating_sub(1).max(1) as f32;
            let height_scale = 1.0 / height.saturating_sub(1).max(1) as f32;

            pool.queue_job(move || {
                let mut rng = match seed {
                    Some(seed) => Rng::with_seed(seed),
                    None => Rng::new(),
                };
                for j in util::worker_rows(tid, num_threads, height) {
                    for i in 0..width {
                        let mut color = Color::BLACK;
                        for _ in 0..spp {
                            let (offset_x, offset_y) = rng.uniform_2d();
                            let s = (i as f32 + offset_x) * width_scale;
                            let t = (j as f32 + offset_y) * height_scale;
                            let ray = camera.generate_ray((s, t), &mut rng);
                            color += trace_ray(&scene, ray, max_depth, &mut rng);
                        }
                        // This worker is the only owner of row j.
                        unsafe {
                            film.set_pixel(i, j, color);
                        }
                        progress_bar.inc(1);
                    }
                }
            });
        }

        pool.start()?;
        pool.stop();
        progress_bar.finish();

        film.into_inner()
    }
}

impl RendererT for PathTracer {
    fn render(
        &self,
        scene: Arc<Scene>,
        camera: Arc<Camera>,
        config: &OutputConfig,
    ) -> anyhow::Result<()> {
        log::info!(
            "rendering {}x{} at {} spp, max depth {}, {} workers",
            config.width,
            config.height,
            self.spp,
            self.max_depth,
            self.num_threads
        );

        let film = self.render_film(scene, camera, config.width, config.height)?;

        if config.output_filename.ends_with(".ppm") {
            let file = std::fs::File::create(&config.output_filename)
                .with_context(|| format!("can't create '{}'", config.output_filename))?;
            let mut writer = std::io::BufWriter::new(file);
            film.write_ppm(&mut writer, self.spp)
                .with_context(|| format!("can't write '{}'", config.output_filename))?;
        } else {
            film.to_rgb_image(self.spp)
                .save(&config.output_filename)
                .with_context(|| format!("can't save '{}'", config.output_filename))?;
        }

        Ok(())
    }
}

/// Follow a ray through successive scatter events. The recursion of the
/// textbook formulation is unrolled into a loop carrying the accumulated
/// attenuation product; the bounce counter decreases every iteration, which
/// bounds the per-sample work.
pub fn trace_ray(scene: &Scene, mut ray: Ray, max_depth: u32, rng: &mut Rng) -> Color {
    let mut throughput = Color::WHITE;

    for _ in 0..max_depth {
        let mut inter = Intersection::default();
        if !scene.intersect(&ray, &mut inter) {
            return throughput * background_color(&ray);
        }

        let material = inter.material.unwrap();
        match material.scatter(&ray, &inter, rng) {
            Some(scatter) => {
                throughput *= scatter.attenuation;
                ray = scatter.scattered;
            }
            None => return Color::BLACK,
        }
    }

    // Bounce budget exhausted: no more light is gathered.
    Color::BLACK
}

/// Backdrop blend: white at the horizon up to sky blue straight overhead.
fn background_color(ray: &Ray) -> Color {
    let unit_direction = ray.direction.normalize();
    let t = 0.5 * (unit_direction.y + 1.0);
    (1.0 - t) * Color::WHITE + t * Color::new(0.5, 0.7, 1.0)
}
