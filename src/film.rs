use crate::*;

const GAMMA: f32 = 2.2;
/// Largest accepted film side, in pixels.
pub const MAX_SIDE: u32 = 16384;
/// Largest accepted pixel count.
pub const MAX_PIXELS: usize = 1 << 26;

/// Rejects film sizes that are empty or too large to allocate.
pub fn check_size(w: u32, h: u32) -> Result<(), String> {
    if w == 0 || h == 0 {
        return Err(format!("film size {}x{} is empty", w, h));
    }
    if w > MAX_SIDE || h > MAX_SIDE || w as usize * h as usize > MAX_PIXELS {
        return Err(format!(
            "film size {}x{} exceeds the limit of {} pixels per side and {} pixels total",
            w, h, MAX_SIDE, MAX_PIXELS
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct Film {
    w: u32,
    h: u32,
    buf: Vec<Rgba>,
}

impl Film {
    pub fn new(w: u32, h: u32) -> Self {
        let mut buf = Vec::new();
        buf.resize(w as usize * h as usize, Rgba::transparent());
        Film { w, h, buf }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.w as usize + x as usize
    }

    pub fn at(&self, x: u32, y: u32) -> &Rgba {
        &self.buf[self.index(x, y)]
    }

    pub fn at_mut(&mut self, x: u32, y: u32) -> &mut Rgba {
        let i = self.index(x, y);
        &mut self.buf[i]
    }

    pub fn w(&self) -> u32 {
        self.w
    }
    pub fn h(&self) -> u32 {
        self.h
    }

    /// Clamps to [0, 1] and gamma encodes. Coverage goes to the alpha channel unchanged.
    pub fn to_rgba8(&self) -> image::RgbaImage {
        fn encode(x: f32) -> u8 {
            let x = if x.is_nan() { 0.0 } else { x.max(0.0).min(1.0) };
            (x.powf(1.0 / GAMMA) * 255.0 + 0.5) as u8
        }
        image::RgbaImage::from_fn(self.w, self.h, |x, y| {
            let p = self.at(x, y);
            image::Rgba([
                encode(p.rgb.r),
                encode(p.rgb.g),
                encode(p.rgb.b),
                (p.alpha.max(0.0).min(1.0) * 255.0 + 0.5) as u8,
            ])
        })
    }

    pub fn write_png<P: AsRef<std::path::Path>>(&self, path: P) -> image::ImageResult<()> {
        self.to_rgba8().save_with_format(path, image::ImageFormat::Png)
    }
}
