use nalgebra::*;
pub type P3 = Point3<f32>;
pub type V3 = Vector3<f32>;

/// Mirrors `i` about the plane with normal `n` (`n` is expected to be unit length).
pub fn reflect(i: &V3, n: &V3) -> V3 {
    *i - *n * (2.0 * i.dot(n))
}

#[derive(Clone)]
pub struct LocalCoord {
    l2w: Isometry3<f32>,
}

impl LocalCoord {
    pub fn new_zy(o: &P3, z: &V3, y_like: &V3) -> Self {
        let tr = Translation3::from(o.coords);
        let rot = UnitQuaternion::face_towards(z, y_like);
        Self::from_iso(Isometry3::from_parts(tr, rot))
    }

    pub fn from_iso(l2w: Isometry3<f32>) -> Self {
        LocalCoord { l2w }
    }

    //local to world
    pub fn l2w(&self) -> &Isometry3<f32> {
        &self.l2w
    }
}
