use crate::*;

/// Direction to color lookup used whenever a ray escapes every sphere.
pub trait EnvMap: Send + Sync {
    fn sample(&self, dir: &V3) -> RGB;
}

impl<F> EnvMap for F
where
    F: Fn(&V3) -> RGB + Send + Sync,
{
    fn sample(&self, dir: &V3) -> RGB {
        self(dir)
    }
}

#[derive(Clone, Debug)]
pub struct Uniform(pub RGB);

impl EnvMap for Uniform {
    fn sample(&self, _dir: &V3) -> RGB {
        self.0
    }
}

/// Vertical gradient, `horizon` at and below y = 0 blending to `zenith` straight up.
#[derive(Clone, Debug)]
pub struct Sky {
    pub horizon: RGB,
    pub zenith: RGB,
}

impl EnvMap for Sky {
    fn sample(&self, dir: &V3) -> RGB {
        let t = (dir[1] / dir.norm()).max(0.0);
        self.horizon * (1.0 - t) + self.zenith * t
    }
}

/// Equirectangular image. u follows the azimuth around +y, v the height.
pub struct LatLong {
    w: u32,
    h: u32,
    buf: Vec<RGB>,
}

impl LatLong {
    // `buf` holds `w * h` texels, row-major from the top
    fn new(w: u32, h: u32, buf: Vec<RGB>) -> Self {
        LatLong { w, h, buf }
    }

    pub fn open<P: AsRef<std::path::Path>>(path: P) -> image::ImageResult<Self> {
        let img = image::open(path)?.to_rgb32f();
        let (w, h) = img.dimensions();
        let buf = img
            .pixels()
            .map(|p| RGB::new(p[0], p[1], p[2]))
            .collect();
        Ok(Self::new(w, h, buf))
    }

    // u and v in [-1, 1], v = 1 is the top row
    fn at_uv(&self, u: f32, v: f32) -> &RGB {
        let x = ((u + 1.0) / 2.0 * self.w as f32) as i64;
        let y = ((1.0 - v) / 2.0 * self.h as f32) as i64;
        let x = x.max(0).min(self.w as i64 - 1) as u32;
        let y = y.max(0).min(self.h as i64 - 1) as u32;
        &self.buf[y as usize * self.w as usize + x as usize]
    }
}

impl EnvMap for LatLong {
    fn sample(&self, dir: &V3) -> RGB {
        let dir = dir.normalize();
        let v = dir[1];
        let u = dir[0].atan2(-dir[2]) * std::f32::consts::FRAC_1_PI;
        *self.at_uv(u, v)
    }
}

/// Looks up `inner` with y and z swapped, for maps authored with z as the up axis.
pub struct YUp<E>(pub E);

impl<E: EnvMap> EnvMap for YUp<E> {
    fn sample(&self, dir: &V3) -> RGB {
        self.0.sample(&V3::new(dir[0], dir[2], dir[1]))
    }
}
