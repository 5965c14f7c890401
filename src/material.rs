use crate::*;

/// Blinn-Phong surface description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// k_d
    pub diffuse: RGB,
    /// k_s, also the per-bounce reflection attenuation
    pub specular: RGB,
    /// n
    pub exponent: f32,
}

impl Material {
    pub fn new(diffuse: RGB, specular: RGB, exponent: f32) -> Self {
        Material {
            diffuse,
            specular,
            exponent,
        }
    }

    pub fn new_lambert(color: RGB) -> Self {
        Self::new(color, RGB::all(0.0), 0.0)
    }

    pub fn new_mirror(color: RGB) -> Self {
        Self::new(RGB::all(0.0), color, 1000.0)
    }
}
