use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::material::Material;
use crate::primitive::{Primitive, PrimitiveT};

struct SceneObject {
    primitive: Primitive,
    material: Material,
}

/// The scene arena: an insertion-ordered list of (primitive, material)
/// pairs. Built once before rendering, then read-only and shared across
/// workers.
#[derive(Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<P: Into<Primitive>, M: Into<Material>>(&mut self, primitive: P, material: M) {
        self.objects.push(SceneObject {
            primitive: primitive.into(),
            material: material.into(),
        });
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Find the closest intersection across all objects. The record's `t` is
    /// the shrinking upper bound, so each accepted hit tightens the interval
    /// later objects are tested against.
    pub fn intersect<'a>(&'a self, ray: &Ray, inter: &mut Intersection<'a>) -> bool {
        let mut result = false;
        for object in &self.objects {
            if object.primitive.intersect(ray, inter) {
                inter.material = Some(&object.material);
                result = true;
            }
        }
        result
    }
}
