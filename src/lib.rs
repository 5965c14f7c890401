pub mod math;
pub use math::{LocalCoord, P3, V3};

pub mod rgb;
pub use rgb::{Rgba, RGB};

pub mod ray;
pub use ray::Ray;

pub mod material;
pub use material::Material;

pub mod light;
pub use light::PointLight;

pub mod shape;
pub use shape::{Hit, Sphere};

pub mod envmap;
pub mod scene;
pub use scene::Scene;

pub mod shade;

pub mod camera;
pub mod example_scenes;
pub mod film;
pub mod renderer;
