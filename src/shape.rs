use crate::*;

/// Minimum accepted hit distance. Keeps rays leaving a surface from hitting it again.
pub const EPSILON: f32 = 1e-4;
/// Starting bound of the closest-hit scan.
pub const T_INFINITY: f32 = 1e30;

#[derive(Clone, Debug)]
pub struct Hit {
    pub dist: f32,
    pub pos: P3,
    pub normal: V3,
    pub material: Material,
}

#[derive(Clone, Debug)]
pub struct Sphere {
    pub center: P3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: P3, radius: f32, material: Material) -> Self {
        Sphere {
            center,
            radius,
            material,
        }
    }

    /// Smaller root of `|origin + t dir - center|^2 = radius^2`, if the ray line meets the sphere.
    ///
    /// The far root is never returned, so a ray starting inside the sphere gets a negative
    /// distance here and is treated as a miss by [`Sphere::test_hit`].
    pub fn near_root(&self, ray: &Ray) -> Option<f32> {
        let oc = ray.origin - self.center;
        let a = ray.dir.dot(&ray.dir);
        let b = 2.0 * ray.dir.dot(&oc);
        let c = oc.dot(&oc) - self.radius * self.radius;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            None
        } else {
            Some((-b - disc.sqrt()) / (a + a))
        }
    }

    pub fn test_hit(&self, ray: &Ray, tnear: f32, tfar: f32) -> Option<Hit> {
        let dist = self.near_root(ray)?;
        if tnear < dist && dist < tfar {
            Some(self.make_hit(ray, dist))
        } else {
            None
        }
    }

    fn make_hit(&self, ray: &Ray, dist: f32) -> Hit {
        let pos = ray.at(dist);
        Hit {
            dist,
            pos,
            normal: (pos - self.center).normalize(),
            material: self.material,
        }
    }
}
