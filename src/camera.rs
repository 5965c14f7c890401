use crate::*;

pub trait Camera {
    /// Width of the film plane at unit distance from the eye.
    fn film_width(&self) -> f32;
    /// Primary ray through film-plane offset `(du, dv)` from the center, `dv` pointing up.
    fn ray_to(&self, du: f32, dv: f32) -> Ray;
}

#[derive(Clone)]
pub struct PinHole {
    lc: LocalCoord,
    film_width: f32,
}

impl PinHole {
    pub fn new(origin: P3, view_at: P3, view_up: V3, fov_degree: f32) -> Self {
        let lc = LocalCoord::new_zy(&origin, &(origin - view_at), &view_up);
        let fov_rad = fov_degree * std::f32::consts::PI / 180.0;
        let half_tan = (fov_rad / 2.0).tan();
        PinHole {
            lc,
            film_width: 2.0 * half_tan,
        }
    }
}

impl Camera for PinHole {
    fn film_width(&self) -> f32 {
        self.film_width
    }

    fn ray_to(&self, du: f32, dv: f32) -> Ray {
        let l2w = self.lc.l2w();
        Ray::new(
            l2w * P3::origin(),
            l2w * V3::new(du, dv, -1.0).normalize(),
        )
    }
}
