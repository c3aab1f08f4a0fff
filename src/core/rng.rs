use rand::SeedableRng;

/// Per-worker random source. Workers never share a generator; a render that
/// wants reproducibility hands each worker its own seed instead.
pub struct Rng {
    rng: rand::rngs::SmallRng,
}

impl Rng {
    pub fn new() -> Self {
        Self {
            rng: rand::rngs::SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: rand::rngs::SmallRng::seed_from_u64(seed),
        }
    }

    pub fn uniform_1d(&mut self) -> f32 {
        rand::Rng::gen(&mut self.rng)
    }

    pub fn uniform_2d(&mut self) -> (f32, f32) {
        (self.uniform_1d(), self.uniform_1d())
    }

    pub fn uniform_in_disk(&mut self) -> (f32, f32) {
        loop {
            let (rand_x, rand_y) = self.uniform_2d();
            let x = rand_x * 2.0 - 1.0;
            let y = rand_y * 2.0 - 1.0;
            if x * x + y * y < 1.0 {
                return (x, y);
            }
        }
    }

    pub fn uniform_in_sphere(&mut self) -> glam::Vec3A {
        loop {
            let (rand_x, rand_y) = self.uniform_2d();
            let rand_z = self.uniform_1d();
            let p = glam::Vec3A::new(
                rand_x * 2.0 - 1.0,
                rand_y * 2.0 - 1.0,
                rand_z * 2.0 - 1.0,
            );
            if p.length_squared() < 1.0 {
                return p;
            }
        }
    }

    pub fn uniform_on_sphere(&mut self) -> glam::Vec3A {
        let (rand_x, rand_y) = self.uniform_2d();
        let phi = rand_x * 2.0 * std::f32::consts::PI;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let cos_theta = 1.0 - 2.0 * rand_y;
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        glam::Vec3A::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
    }
}
