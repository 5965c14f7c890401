use crate::scene::Scene;
use crate::*;

/// Blinn-Phong direct lighting at `pos`, summed over every light that is not shadowed.
///
/// `view` points from the surface toward the viewer and must be unit length.
/// The result is not clamped.
pub fn shade(scene: &Scene, material: &Material, pos: &P3, normal: &V3, view: &V3) -> RGB {
    let mut color = RGB::all(0.0);
    for light in scene.lights() {
        let shadow_ray = light.shadow_ray(pos);
        if scene.test_hit(&shadow_ray).is_some() {
            continue;
        }
        let light_dir = shadow_ray.dir;
        let h = (view + light_dir).normalize();
        let cos_theta = normal.dot(&light_dir).max(0.0);
        let cos_phi = h.dot(normal).max(0.0);
        let specular = cos_phi.powf(material.exponent);
        color += light.intensity
            * (material.diffuse * cos_theta + material.specular * specular);
    }
    color
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material() -> Material {
        Material::new(RGB::new(0.5, 0.25, 0.125), RGB::all(0.5), 8.0)
    }

    fn base() -> Sphere {
        Sphere::new(P3::origin(), 1.0, material())
    }

    fn top() -> (P3, V3, V3) {
        let z = V3::new(0.0, 0.0, 1.0);
        (P3::new(0.0, 0.0, 1.0), z, z)
    }

    fn shade_top(scene: &Scene) -> RGB {
        let (pos, normal, view) = top();
        shade(scene, &material(), &pos, &normal, &view)
    }

    #[test]
    fn head_on_light() {
        let light = PointLight::new(P3::new(0.0, 0.0, 10.0), RGB::all(2.0));
        let scene = Scene::new(vec![base()], vec![light]);
        let c = shade_top(&scene);
        let m = material();
        let expected = RGB::all(2.0) * (m.diffuse + m.specular);
        assert!((c - expected).map(f32::abs).max() < 1e-5);
    }

    #[test]
    fn no_lights_is_black() {
        let scene = Scene::new(vec![base()], vec![]);
        assert_eq!(shade_top(&scene), RGB::all(0.0));
    }

    #[test]
    fn light_below_horizon() {
        let light = PointLight::new(P3::new(0.0, 10.0, -10.0), RGB::all(1.0));
        let scene = Scene::new(vec![], vec![light]);
        let (pos, normal, view) = top();
        let matte = Material::new_lambert(RGB::all(1.0));
        assert_eq!(shade(&scene, &matte, &pos, &normal, &view), RGB::all(0.0));
    }

    #[test]
    fn occluder_blocks_light() {
        let light = PointLight::new(P3::new(0.0, 0.0, 10.0), RGB::all(1.0));
        let occluder = Sphere::new(P3::new(0.0, 0.0, 4.0), 1.0, material());
        let blocked = Scene::new(vec![base(), occluder], vec![light.clone()]);
        assert_eq!(shade_top(&blocked), RGB::all(0.0));

        let open = Scene::new(vec![base()], vec![light]);
        let c = shade_top(&open);
        let b = shade_top(&blocked);
        assert!(c.r >= b.r && c.g >= b.g && c.b >= b.b);
        assert!(c.sum() > 0.0);
    }

    #[test]
    fn occluder_beyond_light_still_blocks() {
        let light = PointLight::new(P3::new(0.0, 0.0, 3.0), RGB::all(1.0));
        let behind = Sphere::new(P3::new(0.0, 0.0, 10.0), 1.0, material());
        let scene = Scene::new(vec![base(), behind], vec![light]);
        assert_eq!(shade_top(&scene), RGB::all(0.0));
    }

    #[test]
    fn lights_add_up() {
        let a = PointLight::new(P3::new(3.0, 0.0, 4.0), RGB::new(1.0, 0.0, 0.0));
        let b = PointLight::new(P3::new(-3.0, 1.0, 4.0), RGB::new(0.0, 1.0, 0.5));
        let both = shade_top(&Scene::new(vec![base()], vec![a.clone(), b.clone()]));
        let only_a = shade_top(&Scene::new(vec![base()], vec![a]));
        let only_b = shade_top(&Scene::new(vec![base()], vec![b]));
        let sum = only_a + only_b;
        assert!((both - sum).map(f32::abs).max() < 1e-6);
    }
}
