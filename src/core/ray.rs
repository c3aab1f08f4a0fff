#[derive(Debug, Copy, Clone)]
pub struct Ray {
    pub origin: glam::Vec3A,
    pub direction: glam::Vec3A,
    pub t_min: f32,
}

impl Ray {
    pub const T_MIN_EPS: f32 = 0.001;

    pub fn new(origin: glam::Vec3A, direction: glam::Vec3A) -> Self {
        Self {
            origin,
            direction,
            t_min: Self::T_MIN_EPS,
        }
    }

    pub fn point_at(&self, t: f32) -> glam::Vec3A {
        self.origin + self.direction * t
    }
}
