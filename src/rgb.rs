use std::ops::{Add, AddAssign, Mul, MulAssign, Sub};
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RGB {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RGB {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        RGB { r, g, b }
    }
    pub fn all(x: f32) -> Self {
        Self::new(x, x, x)
    }

    pub fn sum(&self) -> f32 {
        self.r + self.g + self.b
    }

    pub fn max(&self) -> f32 {
        self.r.max(self.g).max(self.b)
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    pub fn map<F: Fn(f32) -> f32>(&self, f: F) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }
}

impl<'a> Add<&'a Self> for RGB {
    type Output = Self;
    fn add(self, rhs: &'a Self) -> Self {
        RGB {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
        }
    }
}

impl Add for RGB {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.add(&rhs)
    }
}

impl AddAssign for RGB {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<'a> Sub<&'a Self> for RGB {
    type Output = Self;
    fn sub(self, rhs: &'a Self) -> Self {
        RGB {
            r: self.r - rhs.r,
            g: self.g - rhs.g,
            b: self.b - rhs.b,
        }
    }
}

impl Sub for RGB {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.sub(&rhs)
    }
}

impl<'a> Mul<&'a Self> for RGB {
    type Output = Self;
    fn mul(self, rhs: &'a Self) -> Self {
        RGB {
            r: self.r * rhs.r,
            g: self.g * rhs.g,
            b: self.b * rhs.b,
        }
    }
}

impl Mul for RGB {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.mul(&rhs)
    }
}

impl Mul<f32> for RGB {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        RGB {
            r: self.r * rhs,
            g: self.g * rhs,
            b: self.b * rhs,
        }
    }
}

impl Mul<RGB> for f32 {
    type Output = RGB;
    fn mul(self, rhs: RGB) -> RGB {
        rhs * self
    }
}

impl MulAssign for RGB {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// Color plus coverage, as produced by a single trace.
/// `alpha` is 1 when the ray struck geometry and 0 when only the environment was seen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: RGB,
    pub alpha: f32,
}

impl Rgba {
    pub fn new(rgb: RGB, alpha: f32) -> Self {
        Rgba { rgb, alpha }
    }

    pub fn transparent() -> Self {
        Self::new(RGB::all(0.0), 0.0)
    }
}
