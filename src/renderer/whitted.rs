use crate::math::reflect;
use crate::scene::MAX_BOUNCES;
use crate::shade::shade;
use crate::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TraceStats {
    /// Reflection rays that were cast.
    pub bounces: usize,
    /// Whether the path ended in the environment.
    pub escaped: bool,
}

/// Color seen along `ray`: direct lighting at the first hit plus its reflection chain.
pub fn trace(scene: &Scene, ray: &Ray) -> Rgba {
    trace_detailed(scene, ray).0
}

pub fn trace_detailed(scene: &Scene, ray: &Ray) -> (Rgba, TraceStats) {
    let mut stats = TraceStats::default();
    let mut hit = match scene.test_hit(ray) {
        Some(hit) => hit,
        None => {
            stats.escaped = true;
            return (Rgba::new(scene.envmap_dir(&ray.dir), 0.0), stats);
        }
    };

    let mut view = (-ray.dir).normalize();
    let mut color = shade(scene, &hit.material, &hit.pos, &hit.normal, &view);

    let mut k = hit.material.specular;
    for _ in 0..scene.bounce_limit().min(MAX_BOUNCES) {
        if k.sum() <= 0.0 {
            break;
        }
        let r = Ray::new(hit.pos, reflect(&-view, &hit.normal).normalize());
        stats.bounces += 1;
        match scene.test_hit(&r) {
            Some(next) => {
                view = (-r.dir).normalize();
                color += k * shade(scene, &next.material, &next.pos, &next.normal, &view);
                k *= next.material.specular;
                hit = next;
            }
            None => {
                color += k * scene.envmap_dir(&r.dir);
                stats.escaped = true;
                break;
            }
        }
    }
    (Rgba::new(color, 1.0), stats)
}
