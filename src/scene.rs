use crate::envmap::{EnvMap, Uniform};
use crate::shape::{EPSILON, T_INFINITY};
use crate::*;
use std::fmt;

/// Hard ceiling on reflection bounces, whatever the configured limit.
pub const MAX_BOUNCES: usize = 16;

pub struct Scene {
    spheres: Vec<Sphere>,
    lights: Vec<PointLight>,
    envmap: Box<dyn EnvMap>,
    bounce_limit: usize,
}

impl Scene {
    pub fn new(spheres: Vec<Sphere>, lights: Vec<PointLight>) -> Self {
        Scene {
            spheres,
            lights,
            envmap: Box::new(Uniform(RGB::all(0.0))),
            bounce_limit: 0,
        }
    }

    pub fn with_envmap<E: EnvMap + 'static>(mut self, envmap: E) -> Self {
        self.envmap = Box::new(envmap);
        self
    }

    pub fn with_bounce_limit(mut self, bounce_limit: usize) -> Self {
        self.bounce_limit = bounce_limit;
        self
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn bounce_limit(&self) -> usize {
        self.bounce_limit
    }

    pub fn envmap_dir(&self, dir: &V3) -> RGB {
        self.envmap.sample(dir)
    }

    /// Nearest sphere hit farther than [`EPSILON`] along the ray, with no upper bound.
    ///
    /// Spheres are scanned in order and a later sphere only wins when strictly nearer,
    /// so exact ties go to the lower index.
    pub fn test_hit(&self, ray: &Ray) -> Option<Hit> {
        let mut hit = None::<Hit>;
        for s in self.spheres.iter() {
            let tfar = hit.as_ref().map_or(T_INFINITY, |h| h.dist);
            if let Some(h) = s.test_hit(ray, EPSILON, tfar) {
                hit = Some(h);
            }
        }
        hit
    }

    pub fn validate(&self, limits: &SceneLimits) -> Result<(), SceneError> {
        use SceneError::*;
        if limits.max_bounces > MAX_BOUNCES {
            return Err(BounceLimit {
                limit: limits.max_bounces,
                max: MAX_BOUNCES,
            });
        }
        if self.spheres.len() > limits.max_spheres {
            return Err(TooManySpheres {
                count: self.spheres.len(),
                max: limits.max_spheres,
            });
        }
        if self.lights.len() > limits.max_lights {
            return Err(TooManyLights {
                count: self.lights.len(),
                max: limits.max_lights,
            });
        }
        if self.bounce_limit > limits.max_bounces {
            return Err(BounceLimit {
                limit: self.bounce_limit,
                max: limits.max_bounces,
            });
        }
        for (index, s) in self.spheres.iter().enumerate() {
            if !(s.radius.is_finite() && s.radius > 0.0) {
                return Err(BadRadius {
                    index,
                    radius: s.radius,
                });
            }
            let m = &s.material;
            if !(m.exponent.is_finite() && m.exponent >= 0.0) {
                return Err(BadExponent {
                    index,
                    exponent: m.exponent,
                });
            }
            if !(all_finite(&s.center.coords) && m.diffuse.is_finite() && m.specular.is_finite())
            {
                return Err(NonFinite {
                    what: "sphere",
                    index,
                });
            }
        }
        for (index, l) in self.lights.iter().enumerate() {
            if !(all_finite(&l.position.coords) && l.intensity.is_finite()) {
                return Err(NonFinite {
                    what: "light",
                    index,
                });
            }
        }
        Ok(())
    }
}

fn all_finite(v: &V3) -> bool {
    v.iter().all(|x| x.is_finite())
}

/// Sizing fixed when a render is configured.
#[derive(Clone, Copy, Debug)]
pub struct SceneLimits {
    pub max_spheres: usize,
    pub max_lights: usize,
    pub max_bounces: usize,
}

impl Default for SceneLimits {
    fn default() -> Self {
        SceneLimits {
            max_spheres: 64,
            max_lights: 8,
            max_bounces: MAX_BOUNCES,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneError {
    TooManySpheres { count: usize, max: usize },
    TooManyLights { count: usize, max: usize },
    BounceLimit { limit: usize, max: usize },
    BadRadius { index: usize, radius: f32 },
    BadExponent { index: usize, exponent: f32 },
    NonFinite { what: &'static str, index: usize },
    UnknownPreset(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use SceneError::*;
        match self {
            TooManySpheres { count, max } => {
                write!(f, "scene has {} spheres but at most {} are allowed", count, max)
            }
            TooManyLights { count, max } => {
                write!(f, "scene has {} lights but at most {} are allowed", count, max)
            }
            BounceLimit { limit, max } => {
                write!(f, "bounce limit {} exceeds maximum {}", limit, max)
            }
            BadRadius { index, radius } => {
                write!(f, "sphere {} has invalid radius {}", index, radius)
            }
            BadExponent { index, exponent } => {
                write!(f, "sphere {} has invalid specular exponent {}", index, exponent)
            }
            NonFinite { what, index } => write!(f, "{} {} has non-finite values", what, index),
            UnknownPreset(name) => write!(f, "unknown scene preset '{}'", name),
        }
    }
}

impl std::error::Error for SceneError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn lambert(c: f32) -> Material {
        Material::new_lambert(RGB::all(c))
    }

    fn down_z() -> Ray {
        Ray::new(P3::new(0.0, 0.0, 5.0), V3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn empty_scene_misses() {
        let scene = Scene::new(vec![], vec![]);
        assert!(scene.test_hit(&down_z()).is_none());
    }

    #[test]
    fn nearest_of_overlapping() {
        let far = Sphere::new(P3::origin(), 1.0, lambert(0.1));
        let near = Sphere::new(P3::new(0.0, 0.0, 0.5), 1.0, lambert(0.9));
        let scene = Scene::new(vec![far.clone(), near.clone()], vec![]);
        let hit = scene.test_hit(&down_z()).unwrap();
        assert!((hit.dist - 3.5).abs() < 1e-5);
        assert_eq!(hit.material, near.material);

        // order does not matter when distances differ
        let scene = Scene::new(vec![near.clone(), far], vec![]);
        let hit = scene.test_hit(&down_z()).unwrap();
        assert_eq!(hit.material, near.material);
    }

    #[test]
    fn tie_goes_to_lower_index() {
        let a = Sphere::new(P3::origin(), 1.0, lambert(0.25));
        let b = Sphere::new(P3::origin(), 1.0, lambert(0.75));
        let scene = Scene::new(vec![a.clone(), b.clone()], vec![]);
        assert_eq!(scene.test_hit(&down_z()).unwrap().material, a.material);
        let scene = Scene::new(vec![b.clone(), a], vec![]);
        assert_eq!(scene.test_hit(&down_z()).unwrap().material, b.material);
    }

    #[test]
    fn inside_one_sphere_sees_the_next() {
        // the ray starts inside the big sphere; only the small one is reported
        let big = Sphere::new(P3::origin(), 10.0, lambert(0.1));
        let small = Sphere::new(P3::new(0.0, 0.0, -3.0), 1.0, lambert(0.9));
        let scene = Scene::new(vec![big, small.clone()], vec![]);
        let ray = Ray::new(P3::origin(), V3::new(0.0, 0.0, -1.0));
        let hit = scene.test_hit(&ray).unwrap();
        assert!((hit.dist - 2.0).abs() < 1e-5);
        assert_eq!(hit.material, small.material);
    }

    #[test]
    fn validation() {
        let ok = Sphere::new(P3::origin(), 1.0, lambert(0.5));
        let light = PointLight::new(P3::new(0.0, 5.0, 0.0), RGB::all(1.0));
        let limits = SceneLimits {
            max_spheres: 2,
            max_lights: 1,
            max_bounces: 4,
        };

        let scene = Scene::new(vec![ok.clone()], vec![light.clone()]).with_bounce_limit(4);
        assert_eq!(scene.validate(&limits), Ok(()));

        let scene = Scene::new(vec![ok.clone(); 3], vec![]);
        assert_eq!(
            scene.validate(&limits),
            Err(SceneError::TooManySpheres { count: 3, max: 2 })
        );

        let scene = Scene::new(vec![], vec![light.clone(), light]);
        assert_eq!(
            scene.validate(&limits),
            Err(SceneError::TooManyLights { count: 2, max: 1 })
        );

        let scene = Scene::new(vec![], vec![]).with_bounce_limit(5);
        assert_eq!(
            scene.validate(&limits),
            Err(SceneError::BounceLimit { limit: 5, max: 4 })
        );

        let mut bad = ok.clone();
        bad.radius = 0.0;
        let scene = Scene::new(vec![ok.clone(), bad], vec![]);
        assert_eq!(
            scene.validate(&limits),
            Err(SceneError::BadRadius {
                index: 1,
                radius: 0.0
            })
        );

        let mut bad = ok.clone();
        bad.material.exponent = -1.0;
        let scene = Scene::new(vec![bad], vec![]);
        assert!(matches!(
            scene.validate(&limits),
            Err(SceneError::BadExponent { index: 0, .. })
        ));

        let mut bad = ok;
        bad.center = P3::new(std::f32::INFINITY, 0.0, 0.0);
        let scene = Scene::new(vec![bad], vec![]);
        assert!(matches!(
            scene.validate(&limits),
            Err(SceneError::NonFinite { what: "sphere", .. })
        ));
    }

    #[test]
    fn limits_above_ceiling_are_rejected() {
        let limits = SceneLimits {
            max_bounces: MAX_BOUNCES + 1,
            ..Default::default()
        };
        let scene = Scene::new(vec![], vec![]);
        assert!(scene.validate(&limits).is_err());
    }
}
