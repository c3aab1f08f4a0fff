use std::cell::UnsafeCell;
use std::io::Write;
use std::sync::Arc;

use image::{Rgb, RgbImage};

use crate::core::color::Color;

/// Accumulated per-pixel color sums. Row 0 is the bottom of the image; the
/// serializers emit rows top-down.
pub struct Film {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Film {
    pub fn new(width: u32, height: u32) -> Self {
        let pixels = vec![Color::BLACK; (width * height) as usize];
        Self {
            width,
            height,
            pixels,
        }
    }

    #[allow(dead_code)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[allow(dead_code)]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index_of(x, y);
        self.pixels[index] = color;
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index_of(x, y)]
    }

    fn index_of(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    /// Write the film as a plain-text PPM: `P3` header, then one `R G B`
    /// triple per pixel, topmost row (`height - 1`) first.
    pub fn write_ppm<W: Write>(&self, writer: &mut W, samples_per_pixel: u32) -> std::io::Result<()> {
        writeln!(writer, "P3\n{} {}\n255", self.width, self.height)?;
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let [r, g, b] = self.pixel(x, y).resolve_rgb8(samples_per_pixel);
                writeln!(writer, "{} {} {}", r, g, b)?;
            }
        }
        Ok(())
    }

    pub fn to_rgb_image(&self, samples_per_pixel: u32) -> RgbImage {
        let mut image = RgbImage::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let rgb = self.pixel(x, y).resolve_rgb8(samples_per_pixel);
                image.put_pixel(x, self.height - 1 - y, Rgb(rgb));
            }
        }
        image
    }
}

/// Shared handle letting render workers write the film without a lock.
///
/// Soundness rests on the row partition: every `(x, y)` cell is written by
/// exactly one worker, exactly once, so concurrent `set_pixel` calls never
/// alias.
#[derive(Clone)]
pub struct UnsafeFilm {
    film: Arc<UnsafeCell<Film>>,
}

unsafe impl Send for UnsafeFilm {}
unsafe impl Sync for UnsafeFilm {}

impl UnsafeFilm {
    pub fn new(film: Film) -> Self {
        Self {
            film: Arc::new(UnsafeCell::new(film)),
        }
    }

    /// # Safety
    ///
    /// Callers must guarantee that no two threads ever write the same pixel
    /// cell and that no reads happen while writers are live.
    pub unsafe fn set_pixel(&self, x: u32, y: u32, color: Color) {
        (*self.film.get()).set_pixel(x, y, color);
    }

    /// Reclaim the film after all workers have been joined.
    pub fn into_inner(self) -> anyhow::Result<Film> {
        Arc::try_unwrap(self.film)
            .map(|cell| cell.into_inner())
            .map_err(|_| anyhow::anyhow!("film is still shared by render workers"))
    }
}
