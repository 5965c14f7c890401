use crate::camera::PinHole;
use crate::envmap::Sky;
use crate::scene::SceneError;
use crate::*;

use rand::prelude::*;
use rand::rngs::SmallRng;

pub const PRESETS: &[&str] = &["mirrors", "random", "single"];

fn sky() -> Sky {
    Sky {
        horizon: RGB::new(0.9, 0.9, 0.85),
        zenith: RGB::new(0.25, 0.45, 0.9),
    }
}

fn look_at(origin: P3) -> PinHole {
    PinHole::new(origin, P3::new(0.0, 0.0, 0.0), V3::new(0.0, 1.0, 0.0), 45.0)
}

pub fn by_name(name: &str, seed: u64) -> Result<(PinHole, Scene), SceneError> {
    match name {
        "mirrors" => Ok(make_mirrors()),
        "random" => Ok(make_random(seed)),
        "single" => Ok(make_single()),
        _ => Err(SceneError::UnknownPreset(name.to_owned())),
    }
}

/// Three glossy balls on a huge floor sphere, lit by two lights.
pub fn make_mirrors() -> (PinHole, Scene) {
    const R: f32 = 1000.0;
    let spheres = vec![
        Sphere::new(
            P3::new(0.0, -R - 1.0, 0.0),
            R,
            Material::new(RGB::all(0.4), RGB::all(0.2), 20.0),
        ),
        Sphere::new(
            P3::new(-2.2, 0.0, 0.0),
            1.0,
            Material::new(RGB::new(0.7, 0.1, 0.1), RGB::all(0.3), 50.0),
        ),
        Sphere::new(
            P3::new(0.0, 0.0, -0.5),
            1.0,
            Material::new_mirror(RGB::all(0.9)),
        ),
        Sphere::new(
            P3::new(2.2, 0.0, 0.0),
            1.0,
            Material::new(RGB::new(0.1, 0.2, 0.7), RGB::all(0.5), 100.0),
        ),
    ];
    let lights = vec![
        PointLight::new(P3::new(-5.0, 8.0, 6.0), RGB::all(0.8)),
        PointLight::new(P3::new(6.0, 4.0, 2.0), RGB::new(0.4, 0.35, 0.3)),
    ];
    let scene = Scene::new(spheres, lights).with_envmap(sky());
    (look_at(P3::new(0.0, 2.0, 9.0)), scene)
}

/// Floor plus a seeded scatter of small spheres with random materials.
pub fn make_random(seed: u64) -> (PinHole, Scene) {
    const R: f32 = 1000.0;
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut spheres = vec![Sphere::new(
        P3::new(0.0, -R - 1.0, 0.0),
        R,
        Material::new(RGB::all(0.5), RGB::all(0.1), 10.0),
    )];
    for _ in 0..24 {
        let radius = rng.gen_range(0.2..0.6);
        let center = P3::new(rng.gen_range(-4.0..4.0), radius - 1.0, rng.gen_range(-4.0..2.0));
        let diffuse = RGB::new(rng.gen(), rng.gen(), rng.gen());
        let specular = if rng.gen_bool(0.3) {
            RGB::all(rng.gen_range(0.5..0.95))
        } else {
            RGB::all(rng.gen_range(0.0..0.2))
        };
        let exponent = rng.gen_range(5.0..200.0);
        spheres.push(Sphere::new(
            center,
            radius,
            Material::new(diffuse * 0.8, specular, exponent),
        ));
    }
    let lights = vec![
        PointLight::new(P3::new(4.0, 10.0, 6.0), RGB::all(0.9)),
        PointLight::new(P3::new(-6.0, 5.0, 3.0), RGB::all(0.3)),
    ];
    let scene = Scene::new(spheres, lights).with_envmap(sky());
    (look_at(P3::new(0.0, 3.0, 10.0)), scene)
}

pub fn make_single() -> (PinHole, Scene) {
    let spheres = vec![Sphere::new(
        P3::origin(),
        1.0,
        Material::new(RGB::new(0.6, 0.5, 0.3), RGB::all(0.4), 30.0),
    )];
    let lights = vec![PointLight::new(P3::new(3.0, 4.0, 5.0), RGB::all(1.0))];
    let scene = Scene::new(spheres, lights).with_envmap(sky());
    (look_at(P3::new(0.0, 0.0, 5.0)), scene)
}
