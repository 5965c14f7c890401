use crate::camera::Camera;
use crate::film::Film;
use crate::*;

use log::*;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Instant;

pub mod whitted;

#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    pub nthread: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            nthread: num_cpus::get(),
        }
    }
}

/// Hands out row indices to worker threads until the film is covered.
struct RowCursor {
    next: u32,
    h: u32,
}

impl RowCursor {
    fn take(&mut self) -> Option<u32> {
        if self.next < self.h {
            self.next += 1;
            Some(self.next - 1)
        } else {
            None
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum RenderError {
    /// Some worker threads panicked; their rows are missing from the film.
    ThreadPanicked { failed: usize, nthread: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderError::ThreadPanicked { failed, nthread } => {
                write!(f, "{} of {} render thread(s) panicked", failed, nthread)
            }
        }
    }
}

impl std::error::Error for RenderError {}

pub struct Renderer;

impl Renderer {
    /// Traces one ray per pixel center. The result does not depend on `config.nthread`.
    pub fn render<C: Camera + Clone + Send + 'static>(
        &self,
        scene: Arc<Scene>,
        camera: &C,
        film: Film,
        config: RenderConfig,
    ) -> Result<Film, RenderError> {
        use std::thread;
        let start = Instant::now();
        let nthread = config.nthread.max(1);
        info!(
            "rendering {}x{} with {} thread(s), {} sphere(s), {} light(s), bounce limit {}",
            film.w(),
            film.h(),
            nthread,
            scene.spheres().len(),
            scene.lights().len(),
            scene.bounce_limit()
        );

        let cursor = Arc::new(Mutex::new(RowCursor {
            next: 0,
            h: film.h(),
        }));
        let film = Arc::new(Mutex::new(film));
        let mut threads = vec![];
        for i in 0..nthread {
            let film = film.clone();
            let camera = camera.clone();
            let scene = scene.clone();
            let cursor = cursor.clone();
            let thread = thread::spawn(move || Self::render_thread(&scene, camera, film, cursor, i));
            threads.push(thread);
        }
        let failed = threads
            .into_iter()
            .map(|thread| thread.join())
            .filter(Result::is_err)
            .count();
        let panicked = RenderError::ThreadPanicked { failed, nthread };
        if failed > 0 {
            error!("{}", panicked);
            return Err(panicked);
        }

        info!("render finished in {:.3}s", start.elapsed().as_secs_f32());
        // every worker has been joined, so this is the last handle
        Arc::try_unwrap(film)
            .ok()
            .and_then(|film| film.into_inner().ok())
            .ok_or(panicked)
    }

    fn render_thread<C: Camera>(
        scene: &Scene,
        camera: C,
        film: Arc<Mutex<Film>>,
        cursor: Arc<Mutex<RowCursor>>,
        thread_id: usize,
    ) {
        let (w, h) = {
            let film = film.lock().unwrap_or_else(|e| e.into_inner());
            (film.w(), film.h())
        };
        let px_size = camera.film_width() / w as f32;
        let mut rows = 0;
        let mut bounces = 0;
        debug!("thread {} started", thread_id);

        loop {
            let yi = match cursor.lock().unwrap_or_else(|e| e.into_inner()).take() {
                Some(yi) => yi,
                None => break,
            };

            let mut row = Vec::with_capacity(w as usize);
            for xi in 0..w {
                let du = (xi as f32 + 0.5 - w as f32 / 2.0) * px_size;
                let dv = (h as f32 / 2.0 - (yi as f32 + 0.5)) * px_size;
                let ray = camera.ray_to(du, dv);
                let (sample, stats) = whitted::trace_detailed(scene, &ray);
                if !sample.rgb.is_finite() {
                    warn!("traced color is not finite at ({}, {}): {:?}", xi, yi, sample.rgb);
                }
                bounces += stats.bounces;
                row.push(sample);
            }

            let mut film = film.lock().unwrap_or_else(|e| e.into_inner());
            for (xi, sample) in row.into_iter().enumerate() {
                *film.at_mut(xi as u32, yi) = sample;
            }
            rows += 1;
        }
        debug!(
            "thread {} finished: {} row(s), {} reflection ray(s)",
            thread_id, rows, bounces
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PinHole;
    use crate::envmap::Uniform;

    fn camera() -> PinHole {
        PinHole::new(
            P3::new(0.0, 0.0, 5.0),
            P3::origin(),
            V3::new(0.0, 1.0, 0.0),
            45.0,
        )
    }

    fn scene() -> Arc<Scene> {
        let spheres = vec![
            Sphere::new(
                P3::new(-0.6, 0.0, 0.0),
                0.5,
                Material::new(RGB::all(0.3), RGB::all(0.6), 32.0),
            ),
            Sphere::new(
                P3::new(0.6, 0.0, 0.0),
                0.5,
                Material::new(RGB::new(0.8, 0.2, 0.2), RGB::all(0.3), 8.0),
            ),
        ];
        let lights = vec![PointLight::new(P3::new(2.0, 3.0, 4.0), RGB::all(1.0))];
        Arc::new(
            Scene::new(spheres, lights)
                .with_envmap(Uniform(RGB::new(0.1, 0.2, 0.3)))
                .with_bounce_limit(4),
        )
    }

    #[test]
    fn empty_scene_is_background() {
        let env = RGB::new(0.25, 0.5, 0.75);
        let scene = Arc::new(Scene::new(vec![], vec![]).with_envmap(Uniform(env)));
        let film = Renderer.render(scene, &camera(), Film::new(8, 6), RenderConfig { nthread: 2 })
            .unwrap();
        for yi in 0..film.h() {
            for xi in 0..film.w() {
                assert_eq!(*film.at(xi, yi), Rgba::new(env, 0.0));
            }
        }
    }

    #[test]
    fn center_pixel_covers_geometry() {
        let scene = Arc::new(
            Scene::new(
                vec![Sphere::new(P3::origin(), 1.0, Material::new_lambert(RGB::all(0.5)))],
                vec![],
            ),
        );
        let film = Renderer.render(scene, &camera(), Film::new(9, 9), RenderConfig { nthread: 1 })
            .unwrap();
        assert_eq!(film.at(4, 4).alpha, 1.0);
        assert_eq!(film.at(0, 0).alpha, 0.0);
    }

    #[test]
    fn thread_count_does_not_change_output() {
        let one = Renderer.render(scene(), &camera(), Film::new(24, 16), RenderConfig { nthread: 1 })
            .unwrap();
        let many = Renderer.render(scene(), &camera(), Film::new(24, 16), RenderConfig { nthread: 5 })
            .unwrap();
        for yi in 0..one.h() {
            for xi in 0..one.w() {
                assert_eq!(one.at(xi, yi), many.at(xi, yi));
            }
        }
    }

    // Panics on the lower half of the film.
    #[derive(Clone)]
    struct CrackedLens(PinHole);

    impl Camera for CrackedLens {
        fn film_width(&self) -> f32 {
            self.0.film_width()
        }

        fn ray_to(&self, du: f32, dv: f32) -> Ray {
            if dv < 0.0 {
                panic!("cracked lens");
            }
            self.0.ray_to(du, dv)
        }
    }

    #[test]
    fn worker_panic_fails_the_render() {
        for &nthread in &[1, 3] {
            let result = Renderer.render(
                scene(),
                &CrackedLens(camera()),
                Film::new(8, 8),
                RenderConfig { nthread },
            );
            match result {
                Err(RenderError::ThreadPanicked { failed, nthread: n }) => {
                    assert!(failed >= 1 && failed <= nthread);
                    assert_eq!(n, nthread);
                }
                Ok(_) => panic!("render with a panicking worker returned a film"),
            }
        }
    }
}
