use crate::*;

#[derive(Clone, Debug)]
pub struct PointLight {
    pub position: P3,
    pub intensity: RGB,
}

impl PointLight {
    pub fn new(position: P3, intensity: RGB) -> Self {
        PointLight {
            position,
            intensity,
        }
    }

    // No distance bound: anything along the ray, even past the light, occludes it.
    pub fn shadow_ray(&self, from: &P3) -> Ray {
        Ray::from_to(from, &self.position)
    }
}
